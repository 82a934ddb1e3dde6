pub mod command_handler;
pub mod handlers;
pub mod report_commands;

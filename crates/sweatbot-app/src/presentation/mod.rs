pub mod bootstrap;
pub mod bot;
pub mod state;

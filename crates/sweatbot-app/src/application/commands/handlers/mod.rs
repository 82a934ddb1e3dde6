mod report_activity_handler;

#[cfg(test)]
mod tests;

pub use report_activity_handler::ReportActivityCommandHandler;

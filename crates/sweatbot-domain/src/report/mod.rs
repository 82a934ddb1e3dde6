mod aggregate;
mod domain_service;
mod repository;


pub use aggregate::{Report, ReportTransition};
pub use domain_service::{DayGap, StreakRules};
pub use repository::{ReportLock, ReportRepository};

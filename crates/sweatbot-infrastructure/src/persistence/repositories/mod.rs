pub mod in_memory_report_repo;
pub mod member_alias_repo;
pub mod report_repo;

pub use in_memory_report_repo::InMemoryReportRepository;
pub use member_alias_repo::SqliteMemberAliasRepository;
pub use report_repo::SqliteReportRepository;

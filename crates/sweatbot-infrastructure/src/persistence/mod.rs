pub mod repositories;

mod database;
mod error_mapper;
mod member_locks;
mod result_ext;

pub use database::Database;
pub use error_mapper::RepositoryErrorMapper;
pub use member_locks::MemberLocks;
pub use result_ext::ResultExt;

use sweatbot_domain::shared::DomainError;

/// Translates storage errors into domain errors, keeping the failed
/// operation in the message.
pub struct RepositoryErrorMapper;

impl RepositoryErrorMapper {
    pub fn map_sqlx_error(error: sqlx::Error, operation: &str) -> DomainError {
        match &error {
            sqlx::Error::Database(db_err) if db_err.is_unique_violation() => {
                DomainError::DataIntegrity(format!("{}: duplicate key: {}", operation, db_err))
            }
            sqlx::Error::Database(db_err) if db_err.is_check_violation() => {
                DomainError::DataIntegrity(format!("{}: constraint failed: {}", operation, db_err))
            }
            sqlx::Error::PoolTimedOut => {
                DomainError::Infrastructure(format!("{}: database pool timed out", operation))
            }
            _ => DomainError::Repository(format!("{}: {}", operation, error)),
        }
    }
}

use async_trait::async_trait;
use sqlx::SqlitePool;
use std::sync::Arc;

use sweatbot_domain::shared::{DomainError, MemberId};
use sweatbot_domain::transport::IdentityResolver;

use crate::persistence::ResultExt;

/// Linked-device aliases (`lid`) mapped to the phone-number id a member's
/// reports are stored under.
pub struct SqliteMemberAliasRepository {
    pool: Arc<SqlitePool>,
}

impl SqliteMemberAliasRepository {
    pub fn new(pool: Arc<SqlitePool>) -> Self {
        Self { pool }
    }

    pub async fn find_member(&self, alias: &str) -> Result<Option<MemberId>, DomainError> {
        let member_id: Option<String> =
            sqlx::query_scalar("SELECT member_id FROM member_aliases WHERE alias = ?1")
                .bind(alias)
                .fetch_optional(&*self.pool)
                .await
                .map_repo_error("Failed to load member alias")?;

        Ok(member_id.map(|id| MemberId::from_string(&id)))
    }
}

#[async_trait]
impl IdentityResolver for SqliteMemberAliasRepository {
    async fn resolve(&self, sender: &str) -> MemberId {
        match self.find_member(sender).await {
            Ok(Some(member_id)) => member_id,
            Ok(None) => MemberId::from_string(sender),
            Err(e) => {
                log::warn!("Alias lookup failed for {}, using it as is: {}", sender, e);
                MemberId::from_string(sender)
            }
        }
    }

    async fn link(&self, alias: &str, member_id: &MemberId) -> Result<(), DomainError> {
        sqlx::query(
            r#"
            INSERT INTO member_aliases (alias, member_id, linked_at)
            VALUES (?1, ?2, strftime('%Y-%m-%dT%H:%M:%SZ', 'now'))
            ON CONFLICT(alias) DO UPDATE SET
                member_id = excluded.member_id,
                linked_at = excluded.linked_at
            "#,
        )
        .bind(alias)
        .bind(member_id.as_str())
        .execute(&*self.pool)
        .await
        .map_repo_error("Failed to save member alias")?;

        log::info!("Alias {} linked to member {}", alias, member_id);
        Ok(())
    }
}

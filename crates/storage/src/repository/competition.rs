use sqlx::PgPool;

use crate::error::Result;
use crate::models::Competition;

/// Repository for Competition database operations
pub struct CompetitionRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> CompetitionRepository<'a> {
    /// Create a new CompetitionRepository
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Get a competition by ID, only if it belongs to `username`
    pub async fn find_owned(&self, id: i32, username: &str) -> Result<Option<Competition>> {
        let competition = sqlx::query_as::<_, Competition>(
            r#"
            SELECT id, name, username
            FROM competitions
            WHERE id = $1 AND username = $2
            "#,
        )
        .bind(id)
        .bind(username)
        .fetch_optional(self.pool)
        .await?;

        Ok(competition)
    }
}

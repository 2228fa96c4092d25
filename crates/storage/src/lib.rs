pub mod dto;
pub mod error;
pub mod memory;
pub mod models;
pub mod repository;
pub mod services;
pub mod store;

use async_trait::async_trait;
use chrono::NaiveDateTime;
use sqlx::{PgPool, postgres::PgPoolOptions};
use std::time::Duration;

use dto::match_data::MatchSubmission;
use error::Result;
use models::{Competition, MatchRecord};
use repository::{competition::CompetitionRepository, match_data::MatchDataRepository};

pub use memory::InMemoryStore;
pub use store::MatchDataStore;

/// Postgres-backed storage
#[derive(Debug, Clone)]
pub struct Database {
    pool: PgPool,
}

impl Database {
    pub async fn new(database_url: &str) -> Result<Self> {
        let pool = PgPoolOptions::new()
            .max_connections(10)
            .acquire_timeout(Duration::from_secs(5))
            .connect(database_url)
            .await?;

        Ok(Self { pool })
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    pub async fn run_migrations(&self) -> Result<()> {
        sqlx::migrate!("./migrations").run(&self.pool).await?;
        Ok(())
    }
}

#[async_trait]
impl MatchDataStore for Database {
    async fn find_owned_competition(
        &self,
        competition_id: i32,
        username: &str,
    ) -> Result<Option<Competition>> {
        CompetitionRepository::new(&self.pool)
            .find_owned(competition_id, username)
            .await
    }

    async fn list_matches(&self, competition_id: i32) -> Result<Vec<MatchRecord>> {
        MatchDataRepository::new(&self.pool)
            .list_by_competition(competition_id)
            .await
    }

    async fn update_match(
        &self,
        competition_id: i32,
        submission: &MatchSubmission,
        at: NaiveDateTime,
    ) -> Result<u64> {
        MatchDataRepository::new(&self.pool)
            .update_by_key(competition_id, submission, at)
            .await
    }

    async fn insert_match(
        &self,
        competition_id: i32,
        submission: &MatchSubmission,
        at: NaiveDateTime,
    ) -> Result<MatchRecord> {
        MatchDataRepository::new(&self.pool)
            .insert(competition_id, submission, at)
            .await
    }
}

use async_trait::async_trait;
use chrono::NaiveDateTime;

use crate::dto::match_data::MatchSubmission;
use crate::error::Result;
use crate::models::{Competition, MatchRecord};

/// Storage operations the record synchronizer is built on.
///
/// Implementations must bind values rather than interpolate them, and must
/// reject a second row for the same `(competition, team, match)` key with
/// [`StorageError::ConstraintViolation`](crate::error::StorageError).
#[async_trait]
pub trait MatchDataStore: Send + Sync {
    /// The competition with this id, if it is owned by `username`.
    async fn find_owned_competition(
        &self,
        competition_id: i32,
        username: &str,
    ) -> Result<Option<Competition>>;

    /// Rows of a competition, oldest insertion first.
    async fn list_matches(&self, competition_id: i32) -> Result<Vec<MatchRecord>>;

    /// Overwrite the row for the submission's key; returns rows affected.
    async fn update_match(
        &self,
        competition_id: i32,
        submission: &MatchSubmission,
        at: NaiveDateTime,
    ) -> Result<u64>;

    /// Insert a new row for the submission's key.
    async fn insert_match(
        &self,
        competition_id: i32,
        submission: &MatchSubmission,
        at: NaiveDateTime,
    ) -> Result<MatchRecord>;
}

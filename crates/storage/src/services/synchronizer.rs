//! Record synchronization: the upsert-by-identity-key write path for match
//! data and its ownership-checked read path.
//!
//! A submission is applied by first updating the row that carries its
//! `(competition, team, match)` key and inserting only when that update
//! touched nothing. The same call therefore serves first submissions and
//! corrections, and the caller learns which one happened from
//! [`SyncOutcome`].
//!
//! The two statements are not atomic. Two first submissions for the same key
//! can both miss on update; the unique identity index rejects the second
//! insert and that is reported as [`SyncError::Conflict`].

use std::fmt;

use chrono::Utc;
use thiserror::Error;
use validator::{Validate, ValidationErrors};

use crate::dto::match_data::MatchSubmission;
use crate::error::StorageError;
use crate::models::MatchRecord;
use crate::store::MatchDataStore;

/// Which write the synchronizer performed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncOutcome {
    Inserted,
    Updated,
}

impl SyncOutcome {
    pub fn message(self) -> &'static str {
        match self {
            Self::Inserted => "Successfully posted new match data",
            Self::Updated => "Successfully updated existing match data",
        }
    }
}

/// The storage call a failure happened in
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncStage {
    OwnershipLookup,
    ListRecords,
    Update,
    Insert,
}

impl SyncStage {
    /// Short label shown to the caller in place of the storage error
    pub fn message(self) -> &'static str {
        match self {
            Self::OwnershipLookup => "Failed to get competitions",
            Self::ListRecords => "Failed to get match data",
            Self::Update => "Failed to attempt updating existing match data",
            Self::Insert => "Failed to post new match data",
        }
    }
}

impl fmt::Display for SyncStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::OwnershipLookup => "ownership lookup",
            Self::ListRecords => "list records",
            Self::Update => "update",
            Self::Insert => "insert",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Error)]
pub enum SyncError {
    /// The competition does not exist or belongs to someone else; the two
    /// cases are not distinguished.
    #[error("competition is not available to this user")]
    Unauthorized,

    #[error("storage failure during {stage}: {source}")]
    StorageFailure {
        stage: SyncStage,
        #[source]
        source: StorageError,
    },

    #[error("conflicting submission for team {team_number} match {match_number}")]
    Conflict {
        team_number: i32,
        match_number: String,
    },

    #[error("invalid match data: {0}")]
    ValidationFailure(#[from] ValidationErrors),
}

impl SyncError {
    fn storage(stage: SyncStage) -> impl FnOnce(StorageError) -> Self {
        move |source| {
            tracing::error!(%stage, error = ?source, "Match data storage failure");
            Self::StorageFailure { stage, source }
        }
    }
}

pub type SyncResult<T> = std::result::Result<T, SyncError>;

pub struct RecordSynchronizer<'a> {
    store: &'a dyn MatchDataStore,
}

impl<'a> RecordSynchronizer<'a> {
    pub fn new(store: &'a dyn MatchDataStore) -> Self {
        Self { store }
    }

    async fn authorize(&self, competition_id: i32, username: &str) -> SyncResult<()> {
        let competition = self
            .store
            .find_owned_competition(competition_id, username)
            .await
            .map_err(SyncError::storage(SyncStage::OwnershipLookup))?;

        if competition.is_none() {
            tracing::warn!(competition_id, username, "Competition not owned by user");
            return Err(SyncError::Unauthorized);
        }

        Ok(())
    }

    /// Apply a submission: update the row for its key, or insert one if none
    /// exists.
    pub async fn synchronize(
        &self,
        competition_id: i32,
        username: &str,
        submission: &MatchSubmission,
    ) -> SyncResult<SyncOutcome> {
        self.authorize(competition_id, username).await?;

        submission.validate()?;

        let now = Utc::now().naive_utc();

        let affected = self
            .store
            .update_match(competition_id, submission, now)
            .await
            .map_err(SyncError::storage(SyncStage::Update))?;

        let outcome = if affected > 0 {
            SyncOutcome::Updated
        } else {
            match self
                .store
                .insert_match(competition_id, submission, now)
                .await
            {
                Ok(_) => SyncOutcome::Inserted,
                Err(e) if e.is_unique_violation() => {
                    tracing::warn!(
                        competition_id,
                        team_number = submission.team_number,
                        match_number = %submission.match_number,
                        "Concurrent first submission lost the insert race"
                    );
                    return Err(SyncError::Conflict {
                        team_number: submission.team_number,
                        match_number: submission.match_number.clone(),
                    });
                }
                // The competition vanished between the ownership check and the insert
                Err(e) if e.is_foreign_key_violation() || matches!(e, StorageError::NotFound) => {
                    return Err(SyncError::Unauthorized);
                }
                Err(e) => return Err(SyncError::storage(SyncStage::Insert)(e)),
            }
        };

        tracing::info!(
            competition_id,
            team_number = submission.team_number,
            match_number = %submission.match_number,
            ?outcome,
            "Match data synchronized"
        );

        Ok(outcome)
    }

    /// Every record of an owned competition, in insertion order.
    pub async fn list_records(
        &self,
        competition_id: i32,
        username: &str,
    ) -> SyncResult<Vec<MatchRecord>> {
        self.authorize(competition_id, username).await?;

        self.store
            .list_matches(competition_id)
            .await
            .map_err(SyncError::storage(SyncStage::ListRecords))
    }
}

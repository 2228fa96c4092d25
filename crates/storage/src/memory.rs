//! Process-local [`MatchDataStore`] backing the test suites. Mirrors the
//! Postgres schema's unique identity index.

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::NaiveDateTime;
use tokio::sync::RwLock;

use crate::dto::match_data::MatchSubmission;
use crate::error::{Result, StorageError};
use crate::models::{Competition, MatchRecord};
use crate::store::MatchDataStore;

type IdentityKey = (i32, i32, String);

#[derive(Debug, Default)]
struct Tables {
    competitions: Vec<Competition>,
    matches: Vec<MatchRecord>,
    identity: HashMap<IdentityKey, usize>,
    next_competition_id: i32,
    next_match_id: i64,
}

#[derive(Debug, Default)]
pub struct InMemoryStore {
    tables: RwLock<Tables>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn create_competition(&self, name: &str, username: &str) -> Competition {
        let mut tables = self.tables.write().await;
        tables.next_competition_id += 1;

        let competition = Competition {
            id: tables.next_competition_id,
            name: name.to_string(),
            username: username.to_string(),
        };
        tables.competitions.push(competition.clone());
        competition
    }

    pub async fn match_count(&self) -> usize {
        self.tables.read().await.matches.len()
    }
}

fn identity_key(competition_id: i32, submission: &MatchSubmission) -> IdentityKey {
    (
        competition_id,
        submission.team_number,
        submission.match_number.clone(),
    )
}

#[async_trait]
impl MatchDataStore for InMemoryStore {
    async fn find_owned_competition(
        &self,
        competition_id: i32,
        username: &str,
    ) -> Result<Option<Competition>> {
        let tables = self.tables.read().await;
        Ok(tables
            .competitions
            .iter()
            .find(|c| c.id == competition_id && c.username == username)
            .cloned())
    }

    async fn list_matches(&self, competition_id: i32) -> Result<Vec<MatchRecord>> {
        let tables = self.tables.read().await;
        // Rows are appended, so storage order is already id order.
        Ok(tables
            .matches
            .iter()
            .filter(|m| m.competition_id == competition_id)
            .cloned()
            .collect())
    }

    async fn update_match(
        &self,
        competition_id: i32,
        submission: &MatchSubmission,
        at: NaiveDateTime,
    ) -> Result<u64> {
        let mut tables = self.tables.write().await;
        let Some(&index) = tables.identity.get(&identity_key(competition_id, submission)) else {
            return Ok(0);
        };

        let existing = std::mem::take(&mut tables.matches[index]);
        tables.matches[index] = existing.with_measurements(submission, at);
        Ok(1)
    }

    async fn insert_match(
        &self,
        competition_id: i32,
        submission: &MatchSubmission,
        at: NaiveDateTime,
    ) -> Result<MatchRecord> {
        let mut tables = self.tables.write().await;

        if !tables.competitions.iter().any(|c| c.id == competition_id) {
            return Err(StorageError::NotFound);
        }

        let key = identity_key(competition_id, submission);
        if tables.identity.contains_key(&key) {
            return Err(StorageError::ConstraintViolation(
                "Match data already exists for this team and match".to_string(),
            ));
        }

        tables.next_match_id += 1;
        let record =
            MatchRecord::from_submission(tables.next_match_id, competition_id, submission, at);

        let index = tables.matches.len();
        tables.matches.push(record.clone());
        tables.identity.insert(key, index);
        Ok(record)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn now() -> NaiveDateTime {
        chrono::Utc::now().naive_utc()
    }

    #[tokio::test]
    async fn test_update_without_row_touches_nothing() {
        let store = InMemoryStore::new();
        let comp = store.create_competition("Regional", "alice").await;

        let submission = MatchSubmission::new(118, "12", "R1");
        let affected = store.update_match(comp.id, &submission, now()).await.unwrap();

        assert_eq!(affected, 0);
        assert_eq!(store.match_count().await, 0);
    }

    #[tokio::test]
    async fn test_duplicate_insert_is_constraint_violation() {
        let store = InMemoryStore::new();
        let comp = store.create_competition("Regional", "alice").await;
        let submission = MatchSubmission::new(118, "12", "R1");

        store.insert_match(comp.id, &submission, now()).await.unwrap();
        let err = store
            .insert_match(comp.id, &submission, now())
            .await
            .unwrap_err();

        assert!(err.is_unique_violation());
        assert_eq!(store.match_count().await, 1);
    }

    #[tokio::test]
    async fn test_same_key_in_other_competition_is_independent() {
        let store = InMemoryStore::new();
        let first = store.create_competition("Regional", "alice").await;
        let second = store.create_competition("District", "alice").await;
        let submission = MatchSubmission::new(118, "12", "R1");

        store.insert_match(first.id, &submission, now()).await.unwrap();
        store.insert_match(second.id, &submission, now()).await.unwrap();

        assert_eq!(store.list_matches(first.id).await.unwrap().len(), 1);
        assert_eq!(store.list_matches(second.id).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_ownership_lookup_requires_matching_user() {
        let store = InMemoryStore::new();
        let comp = store.create_competition("Regional", "alice").await;

        assert!(
            store
                .find_owned_competition(comp.id, "alice")
                .await
                .unwrap()
                .is_some()
        );
        assert!(
            store
                .find_owned_competition(comp.id, "mallory")
                .await
                .unwrap()
                .is_none()
        );
        assert!(
            store
                .find_owned_competition(comp.id + 1, "alice")
                .await
                .unwrap()
                .is_none()
        );
    }
}

use storage::{
    MatchDataStore,
    dto::match_data::MatchSubmission,
    models::MatchRecord,
    services::synchronizer::{RecordSynchronizer, SyncOutcome, SyncResult},
};

/// List a competition's match data for its owner
pub async fn list_match_data(
    store: &dyn MatchDataStore,
    competition_id: i32,
    username: &str,
) -> SyncResult<Vec<MatchRecord>> {
    RecordSynchronizer::new(store)
        .list_records(competition_id, username)
        .await
}

/// Store one team's match data, updating the existing row for the match if any
pub async fn submit_match_data(
    store: &dyn MatchDataStore,
    competition_id: i32,
    username: &str,
    submission: &MatchSubmission,
) -> SyncResult<SyncOutcome> {
    RecordSynchronizer::new(store)
        .synchronize(competition_id, username, submission)
        .await
}

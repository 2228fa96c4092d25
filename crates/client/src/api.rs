use reqwest::StatusCode;
use serde::Deserialize;
use storage::{
    dto::{common::ApiMessage, match_data::MatchSubmission},
    models::MatchRecord,
};

use crate::error::{ClientError, Result};

/// The list endpoint answers with either the rows or a failure message.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum ListResponse {
    Records(Vec<MatchRecord>),
    Failure(ApiMessage),
}

/// Authenticated access to a scouting server's match-data endpoints
pub struct ScoutingClient {
    base_url: String,
    token: String,
    client: reqwest::Client,
}

impl ScoutingClient {
    pub fn new(base_url: impl Into<String>, token: impl Into<String>) -> Result<Self> {
        Ok(Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            token: token.into(),
            client: reqwest::Client::builder().build()?,
        })
    }

    fn data_url(&self, competition_id: i32) -> String {
        format!("{}/api/data/{}", self.base_url, competition_id)
    }

    /// Every match-data row of a competition, in submission order
    pub async fn list_records(&self, competition_id: i32) -> Result<Vec<MatchRecord>> {
        let response = self
            .client
            .get(self.data_url(competition_id))
            .bearer_auth(&self.token)
            .send()
            .await?;

        if response.status() == StatusCode::UNAUTHORIZED {
            return Err(ClientError::Unauthorized);
        }

        match response.json::<ListResponse>().await? {
            ListResponse::Records(records) => Ok(records),
            ListResponse::Failure(message) => Err(ClientError::Rejected(message)),
        }
    }

    /// Submit a team's match data; the returned message says whether a new
    /// row was created or an existing one corrected.
    pub async fn submit(
        &self,
        competition_id: i32,
        submission: &MatchSubmission,
    ) -> Result<ApiMessage> {
        let response = self
            .client
            .post(self.data_url(competition_id))
            .bearer_auth(&self.token)
            .json(submission)
            .send()
            .await?;

        if response.status() == StatusCode::UNAUTHORIZED {
            return Err(ClientError::Unauthorized);
        }

        let message = response.json::<ApiMessage>().await?;
        if message.is_good() {
            Ok(message)
        } else {
            Err(ClientError::Rejected(message))
        }
    }
}

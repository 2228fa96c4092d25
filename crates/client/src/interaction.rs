//! Client-side interaction state: per-row modals, transient messages and the
//! loaded rows of one competition.

use storage::{
    dto::{
        common::{ApiMessage, MessageType},
        match_data::MatchSubmission,
    },
    models::MatchRecord,
};
use tracing::{debug, warn};

use crate::api::ScoutingClient;
use crate::error::{ClientError, Result};
use crate::heatmap::HeatmapView;
use crate::row::RowView;

/// Transient notifications shown above the table
#[derive(Debug, Default)]
pub struct MessageBoard {
    messages: Vec<ApiMessage>,
}

impl MessageBoard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, message: ApiMessage) {
        self.messages.push(message);
    }

    pub fn clear(&mut self) {
        self.messages.clear();
    }

    pub fn latest(&self) -> Option<&ApiMessage> {
        self.messages.last()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    fn push_error(&mut self, error: &ClientError) {
        match error {
            ClientError::Rejected(message) => self.push(message.clone()),
            other => self.push(ApiMessage {
                message: other.to_string(),
                kind: MessageType::Bad,
                err: None,
            }),
        }
    }
}

/// Open/closed state of one row's detail modals
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct RowModals {
    pub actions_open: bool,
    pub heatmap_open: bool,
}

impl RowModals {
    /// Opening or closing the actions modal also dismisses stale messages.
    pub fn toggle_actions(&mut self, messages: &mut MessageBoard) {
        self.actions_open = !self.actions_open;
        messages.clear();
    }

    pub fn toggle_heatmap(&mut self) {
        self.heatmap_open = !self.heatmap_open;
    }

    /// The heatmap view, decoded only while the heatmap modal is open.
    pub fn heatmap(&self, record: &MatchRecord) -> Option<Result<HeatmapView>> {
        self.heatmap_open.then(|| HeatmapView::from_record(record))
    }
}

/// Rows of one competition as currently shown, plus their message board
pub struct ScoutingSession {
    client: ScoutingClient,
    competition_id: i32,
    rows: Vec<MatchRecord>,
    pub messages: MessageBoard,
}

impl ScoutingSession {
    pub fn new(client: ScoutingClient, competition_id: i32) -> Self {
        Self {
            client,
            competition_id,
            rows: Vec::new(),
            messages: MessageBoard::new(),
        }
    }

    pub fn rows(&self) -> &[MatchRecord] {
        &self.rows
    }

    pub fn views(&self) -> Vec<RowView> {
        self.rows.iter().map(RowView::from_record).collect()
    }

    /// Re-fetch the rows. On failure the previous rows are kept and the
    /// failure is posted to the message board.
    pub async fn refresh(&mut self) -> Result<()> {
        match self.client.list_records(self.competition_id).await {
            Ok(rows) => {
                debug!(
                    competition_id = self.competition_id,
                    rows = rows.len(),
                    "Loaded match data"
                );
                self.rows = rows;
                Ok(())
            }
            Err(e) => {
                warn!(competition_id = self.competition_id, "Failed to load match data: {}", e);
                self.messages.push_error(&e);
                Err(e)
            }
        }
    }

    /// Submit a new or corrected observation and reload the table.
    pub async fn submit_correction(&mut self, submission: &MatchSubmission) -> Result<()> {
        self.messages.clear();

        match self.client.submit(self.competition_id, submission).await {
            Ok(message) => {
                self.messages.push(message);
                self.refresh().await
            }
            Err(e) => {
                warn!(
                    competition_id = self.competition_id,
                    team_number = submission.team_number,
                    "Match data submission failed: {}",
                    e
                );
                self.messages.push_error(&e);
                Err(e)
            }
        }
    }
}

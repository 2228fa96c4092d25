use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;

use crate::dto::match_data::MatchSubmission;

/// One scouted observation of one team in one match.
///
/// The identity key is `(competition_id, team_number, match_number)`; the
/// database holds at most one row per key. `id` is assigned on insert and
/// only ever grows, so ordering by it keeps rows stable across refreshes
/// even though records are updated in place.
///
/// Field names on the wire follow the column names of the scouting
/// database (`TeamNumber`, `DefenseQuality`, ...).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "PascalCase", default)]
pub struct MatchRecord {
    #[serde(rename = "ID")]
    pub id: i64,
    #[serde(rename = "CompetitionID")]
    pub competition_id: i32,
    pub team_number: i32,
    pub match_number: String,
    pub date_time: NaiveDateTime,
    pub updated: bool,
    pub robot_station: String,

    // Serialized JSON arrays
    pub event_array: String,
    pub outer_heatmap: String,
    pub inner_heatmap: String,
    pub pickup_heatmap: String,

    pub cross_line: f64,
    pub number_bottom_auto: f64,
    pub number_outer_auto: f64,
    pub number_inner_auto: f64,
    pub number_bottom: f64,
    pub number_outer: f64,
    pub number_inner: f64,
    pub number_pickup: f64,
    pub time_defended: f64,
    pub time_defending: f64,
    pub number_fouls: f64,
    pub defense_quality: f64,
    pub time_mal: f64,
    pub time_rotation: f64,
    pub time_position: f64,
    pub success_rotation: f64,
    pub success_position: f64,
    pub endgame_score: f64,
    pub endgame_level: f64,
    pub score: f64,

    pub comments: String,
    pub scout_name: String,
}

impl MatchRecord {
    /// Build the row a submission produces once it has been stored.
    pub fn from_submission(
        id: i64,
        competition_id: i32,
        s: &MatchSubmission,
        date_time: NaiveDateTime,
    ) -> Self {
        Self {
            id,
            competition_id,
            team_number: s.team_number,
            match_number: s.match_number.clone(),
            date_time,
            ..Self::default()
        }
        .with_measurements(s, date_time)
    }

    /// Overwrite every submitted column, leaving `id` and the identity key
    /// untouched.
    pub fn with_measurements(mut self, s: &MatchSubmission, date_time: NaiveDateTime) -> Self {
        self.date_time = date_time;
        self.updated = s.updated;
        self.robot_station = s.robot_station.clone();
        self.event_array = s.event_array.clone();
        self.outer_heatmap = s.outer_heatmap.clone();
        self.inner_heatmap = s.inner_heatmap.clone();
        self.pickup_heatmap = s.pickup_heatmap.clone();
        self.cross_line = s.cross_line;
        self.number_bottom_auto = s.number_bottom_auto;
        self.number_outer_auto = s.number_outer_auto;
        self.number_inner_auto = s.number_inner_auto;
        self.number_bottom = s.number_bottom;
        self.number_outer = s.number_outer;
        self.number_inner = s.number_inner;
        self.number_pickup = s.number_pickup;
        self.time_defended = s.time_defended;
        self.time_defending = s.time_defending;
        self.number_fouls = s.number_fouls;
        self.defense_quality = s.defense_quality;
        self.time_mal = s.time_mal;
        self.time_rotation = s.time_rotation;
        self.time_position = s.time_position;
        self.success_rotation = s.success_rotation;
        self.success_position = s.success_position;
        self.endgame_score = s.endgame_score;
        self.endgame_level = s.endgame_level;
        self.score = s.score;
        self.comments = s.comments.clone();
        self.scout_name = s.scout_name.clone();
        self
    }

    /// Rows that have not been assigned an identity yet (for example rows
    /// pre-generated from a match schedule on the client).
    pub fn is_placeholder(&self) -> bool {
        self.id <= 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wire_names_follow_column_names() {
        let record = MatchRecord {
            id: 7,
            competition_id: 3,
            team_number: 118,
            match_number: "12".to_string(),
            defense_quality: 2.0,
            endgame_score: 1.0,
            ..Default::default()
        };

        let value = serde_json::to_value(&record).unwrap();
        assert_eq!(value["ID"], 7);
        assert_eq!(value["CompetitionID"], 3);
        assert_eq!(value["TeamNumber"], 118);
        assert_eq!(value["MatchNumber"], "12");
        assert_eq!(value["DefenseQuality"], 2.0);
        assert_eq!(value["EndgameScore"], 1.0);
        assert!(value.get("DateTime").is_some());
    }

    #[test]
    fn test_missing_id_deserializes_as_placeholder() {
        let record: MatchRecord =
            serde_json::from_str(r#"{"TeamNumber": 254, "MatchNumber": "3"}"#).unwrap();
        assert!(record.is_placeholder());
        assert_eq!(record.team_number, 254);
    }
}

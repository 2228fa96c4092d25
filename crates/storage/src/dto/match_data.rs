use serde::{Deserialize, Deserializer, Serialize};
use utoipa::ToSchema;
use validator::{Validate, ValidationError};

use crate::models::is_robot_station;

/// Request payload for submitting (or correcting) one team's match data.
///
/// The identity key is `(competition, team_number, match_number)`; the
/// competition comes from the request path.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct MatchSubmission {
    #[serde(default)]
    pub updated: bool,

    #[validate(range(min = 1, message = "Team number must be positive"))]
    pub team_number: i32,

    #[validate(length(
        min = 1,
        max = 32,
        message = "Match number must be between 1 and 32 characters"
    ))]
    #[serde(deserialize_with = "string_or_integer")]
    #[schema(value_type = String)]
    pub match_number: String,

    #[validate(custom(function = "validate_station"))]
    pub robot_station: String,

    #[validate(custom(function = "validate_json_array"))]
    #[serde(default = "empty_array")]
    pub event_array: String,

    #[validate(custom(function = "validate_heatmap"))]
    #[serde(default = "empty_array")]
    pub outer_heatmap: String,

    #[validate(custom(function = "validate_heatmap"))]
    #[serde(default = "empty_array")]
    pub inner_heatmap: String,

    #[validate(custom(function = "validate_heatmap"))]
    #[serde(default = "empty_array")]
    pub pickup_heatmap: String,

    #[validate(range(min = 0.0))]
    #[serde(default)]
    pub cross_line: f64,

    #[validate(range(min = 0.0))]
    #[serde(default)]
    pub number_bottom_auto: f64,

    #[validate(range(min = 0.0))]
    #[serde(default)]
    pub number_outer_auto: f64,

    #[validate(range(min = 0.0))]
    #[serde(default)]
    pub number_inner_auto: f64,

    #[validate(range(min = 0.0))]
    #[serde(default)]
    pub number_bottom: f64,

    #[validate(range(min = 0.0))]
    #[serde(default)]
    pub number_outer: f64,

    #[validate(range(min = 0.0))]
    #[serde(default)]
    pub number_inner: f64,

    #[validate(range(min = 0.0))]
    #[serde(default)]
    pub number_pickup: f64,

    #[validate(range(min = 0.0))]
    #[serde(default)]
    pub time_defended: f64,

    #[validate(range(min = 0.0))]
    #[serde(default)]
    pub time_defending: f64,

    #[validate(range(min = 0.0))]
    #[serde(default)]
    pub number_fouls: f64,

    #[validate(range(min = 0.0))]
    #[serde(default)]
    pub defense_quality: f64,

    #[validate(range(min = 0.0))]
    #[serde(default)]
    pub time_mal: f64,

    #[validate(range(min = 0.0))]
    #[serde(default)]
    pub time_rotation: f64,

    #[validate(range(min = 0.0))]
    #[serde(default)]
    pub time_position: f64,

    #[validate(range(min = 0.0))]
    #[serde(default)]
    pub success_rotation: f64,

    #[validate(range(min = 0.0))]
    #[serde(default)]
    pub success_position: f64,

    #[validate(range(min = 0.0))]
    #[serde(default)]
    pub endgame_score: f64,

    #[validate(range(min = 0.0))]
    #[serde(default)]
    pub endgame_level: f64,

    #[validate(range(min = 0.0))]
    #[serde(default)]
    pub score: f64,

    #[validate(length(max = 2000))]
    #[serde(default)]
    pub comments: String,

    #[validate(length(max = 255))]
    #[serde(default)]
    pub scout_name: String,
}

impl MatchSubmission {
    /// Minimal submission for a team and match with every metric zeroed.
    pub fn new(team_number: i32, match_number: impl Into<String>, robot_station: &str) -> Self {
        Self {
            updated: false,
            team_number,
            match_number: match_number.into(),
            robot_station: robot_station.to_string(),
            event_array: empty_array(),
            outer_heatmap: empty_array(),
            inner_heatmap: empty_array(),
            pickup_heatmap: empty_array(),
            cross_line: 0.0,
            number_bottom_auto: 0.0,
            number_outer_auto: 0.0,
            number_inner_auto: 0.0,
            number_bottom: 0.0,
            number_outer: 0.0,
            number_inner: 0.0,
            number_pickup: 0.0,
            time_defended: 0.0,
            time_defending: 0.0,
            number_fouls: 0.0,
            defense_quality: 0.0,
            time_mal: 0.0,
            time_rotation: 0.0,
            time_position: 0.0,
            success_rotation: 0.0,
            success_position: 0.0,
            endgame_score: 0.0,
            endgame_level: 0.0,
            score: 0.0,
            comments: String::new(),
            scout_name: String::new(),
        }
    }
}

fn empty_array() -> String {
    "[]".to_string()
}

/// Scouting tablets send match numbers either as numbers or as labels.
fn string_or_integer<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum StringOrInteger {
        String(String),
        Integer(i64),
    }

    Ok(match StringOrInteger::deserialize(deserializer)? {
        StringOrInteger::String(s) => s,
        StringOrInteger::Integer(n) => n.to_string(),
    })
}

fn validate_station(station: &str) -> Result<(), ValidationError> {
    if is_robot_station(station) {
        Ok(())
    } else {
        Err(ValidationError::new("invalid_station"))
    }
}

fn validate_json_array(raw: &str) -> Result<(), ValidationError> {
    match serde_json::from_str::<serde_json::Value>(raw) {
        Ok(serde_json::Value::Array(_)) => Ok(()),
        _ => Err(ValidationError::new("invalid_json_array")),
    }
}

fn validate_heatmap(raw: &str) -> Result<(), ValidationError> {
    match serde_json::from_str::<Vec<f64>>(raw) {
        Ok(cells) if cells.iter().all(|c| c.is_finite() && *c >= 0.0) => Ok(()),
        _ => Err(ValidationError::new("invalid_heatmap")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_deserialize_with_numeric_match_number() {
        let submission: MatchSubmission = serde_json::from_value(json!({
            "teamNumber": 118,
            "matchNumber": 12,
            "robotStation": "R2",
            "defenseQuality": 2,
            "endgameScore": 1,
        }))
        .unwrap();

        assert_eq!(submission.match_number, "12");
        assert_eq!(submission.defense_quality, 2.0);
        assert_eq!(submission.endgame_score, 1.0);
        assert_eq!(submission.outer_heatmap, "[]");
        assert!(!submission.updated);
        assert!(submission.validate().is_ok());
    }

    #[test]
    fn test_deserialize_with_textual_match_number() {
        let submission: MatchSubmission = serde_json::from_value(json!({
            "teamNumber": 118,
            "matchNumber": "QF2",
            "robotStation": "B1",
        }))
        .unwrap();

        assert_eq!(submission.match_number, "QF2");
    }

    #[test]
    fn test_text_with_quotes_is_accepted_verbatim() {
        let mut submission = MatchSubmission::new(118, "12", "R1");
        submission.comments = r#"Robot "tipped"; driver's fault \ retry"#.to_string();
        submission.scout_name = "O'Brien".to_string();

        assert!(submission.validate().is_ok());
    }

    #[test]
    fn test_rejects_unknown_station() {
        let submission = MatchSubmission::new(118, "12", "G7");
        let errors = submission.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("robot_station"));
    }

    #[test]
    fn test_rejects_negative_metric_and_bad_team() {
        let mut submission = MatchSubmission::new(0, "12", "R1");
        submission.time_defending = -1.5;

        let errors = submission.validate().unwrap_err();
        let fields = errors.field_errors();
        assert!(fields.contains_key("team_number"));
        assert!(fields.contains_key("time_defending"));
    }

    #[test]
    fn test_rejects_malformed_heatmap() {
        let mut submission = MatchSubmission::new(118, "12", "R1");
        submission.inner_heatmap = "[1, 2, \"x\"]".to_string();
        submission.pickup_heatmap = "1,2,3".to_string();

        let errors = submission.validate().unwrap_err();
        let fields = errors.field_errors();
        assert!(fields.contains_key("inner_heatmap"));
        assert!(fields.contains_key("pickup_heatmap"));
        assert!(!fields.contains_key("outer_heatmap"));
    }

    #[test]
    fn test_rejects_empty_match_number() {
        let submission = MatchSubmission::new(118, "", "R1");
        let errors = submission.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("match_number"));
    }
}

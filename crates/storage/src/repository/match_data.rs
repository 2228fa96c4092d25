use chrono::NaiveDateTime;
use sqlx::{PgPool, Postgres, postgres::PgArguments, query::Query};

use crate::dto::match_data::MatchSubmission;
use crate::error::{Result, StorageError};
use crate::models::MatchRecord;

const MATCH_COLUMNS: &str = r#"
    id, competition_id, team_number, match_number, date_time, updated, robot_station,
    event_array, outer_heatmap, inner_heatmap, pickup_heatmap,
    cross_line, number_bottom_auto, number_outer_auto, number_inner_auto,
    number_bottom, number_outer, number_inner, number_pickup,
    time_defended, time_defending, number_fouls, defense_quality, time_mal,
    time_rotation, time_position, success_rotation, success_position,
    endgame_score, endgame_level, score, comments, scout_name
"#;

/// Repository for match data rows
pub struct MatchDataRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> MatchDataRepository<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// All rows of a competition in insertion order
    pub async fn list_by_competition(&self, competition_id: i32) -> Result<Vec<MatchRecord>> {
        let sql = format!(
            "SELECT {MATCH_COLUMNS} FROM match_data WHERE competition_id = $1 ORDER BY id ASC"
        );

        let records = sqlx::query_as::<_, MatchRecord>(&sql)
            .bind(competition_id)
            .fetch_all(self.pool)
            .await?;

        Ok(records)
    }

    /// Overwrite the row identified by `(competition_id, team_number,
    /// match_number)`. Returns the number of rows touched.
    pub async fn update_by_key(
        &self,
        competition_id: i32,
        submission: &MatchSubmission,
        at: NaiveDateTime,
    ) -> Result<u64> {
        let query = sqlx::query(
            r#"
            UPDATE match_data
            SET
                date_time = $1,
                updated = $2,
                robot_station = $3,
                event_array = $4,
                outer_heatmap = $5,
                inner_heatmap = $6,
                pickup_heatmap = $7,
                cross_line = $8,
                number_bottom_auto = $9,
                number_outer_auto = $10,
                number_inner_auto = $11,
                number_bottom = $12,
                number_outer = $13,
                number_inner = $14,
                number_pickup = $15,
                time_defended = $16,
                time_defending = $17,
                number_fouls = $18,
                defense_quality = $19,
                time_mal = $20,
                time_rotation = $21,
                time_position = $22,
                success_rotation = $23,
                success_position = $24,
                endgame_score = $25,
                endgame_level = $26,
                score = $27,
                comments = $28,
                scout_name = $29
            WHERE competition_id = $30 AND team_number = $31 AND match_number = $32
            "#,
        )
        .bind(at);

        let result = bind_measurements(query, submission)
            .bind(competition_id)
            .bind(submission.team_number)
            .bind(&submission.match_number)
            .execute(self.pool)
            .await?;

        Ok(result.rows_affected())
    }

    /// Insert a brand-new row for the submission's identity key
    pub async fn insert(
        &self,
        competition_id: i32,
        submission: &MatchSubmission,
        at: NaiveDateTime,
    ) -> Result<MatchRecord> {
        let query = sqlx::query(
            r#"
            INSERT INTO match_data (
                date_time, updated, robot_station,
                event_array, outer_heatmap, inner_heatmap, pickup_heatmap,
                cross_line, number_bottom_auto, number_outer_auto, number_inner_auto,
                number_bottom, number_outer, number_inner, number_pickup,
                time_defended, time_defending, number_fouls, defense_quality, time_mal,
                time_rotation, time_position, success_rotation, success_position,
                endgame_score, endgame_level, score, comments, scout_name,
                competition_id, team_number, match_number
            )
            VALUES (
                $1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15, $16,
                $17, $18, $19, $20, $21, $22, $23, $24, $25, $26, $27, $28, $29, $30, $31, $32
            )
            RETURNING id
            "#,
        )
        .bind(at);

        let row = bind_measurements(query, submission)
            .bind(competition_id)
            .bind(submission.team_number)
            .bind(&submission.match_number)
            .fetch_one(self.pool)
            .await
            .map_err(|e| {
                if let sqlx::Error::Database(ref db_err) = e {
                    if db_err.code().as_deref() == Some("23505") {
                        return StorageError::ConstraintViolation(
                            "Match data already exists for this team and match".to_string(),
                        );
                    }
                }
                StorageError::from(e)
            })?;

        let id: i64 = sqlx::Row::try_get(&row, "id")?;
        Ok(MatchRecord::from_submission(id, competition_id, submission, at))
    }
}

/// Binds every submitted column except the timestamp and the identity key,
/// in the order shared by the UPDATE and INSERT statements above.
fn bind_measurements<'q>(
    query: Query<'q, Postgres, PgArguments>,
    s: &'q MatchSubmission,
) -> Query<'q, Postgres, PgArguments> {
    query
        .bind(s.updated)
        .bind(&s.robot_station)
        .bind(&s.event_array)
        .bind(&s.outer_heatmap)
        .bind(&s.inner_heatmap)
        .bind(&s.pickup_heatmap)
        .bind(s.cross_line)
        .bind(s.number_bottom_auto)
        .bind(s.number_outer_auto)
        .bind(s.number_inner_auto)
        .bind(s.number_bottom)
        .bind(s.number_outer)
        .bind(s.number_inner)
        .bind(s.number_pickup)
        .bind(s.time_defended)
        .bind(s.time_defending)
        .bind(s.number_fouls)
        .bind(s.defense_quality)
        .bind(s.time_mal)
        .bind(s.time_rotation)
        .bind(s.time_position)
        .bind(s.success_rotation)
        .bind(s.success_position)
        .bind(s.endgame_score)
        .bind(s.endgame_level)
        .bind(s.score)
        .bind(&s.comments)
        .bind(&s.scout_name)
}

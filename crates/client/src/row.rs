//! Display projection of one match-data row.
//!
//! [`RowView::from_record`] derives everything a table row shows from a
//! [`MatchRecord`] and never touches the record itself.

use rust_decimal::Decimal;
use storage::models::MatchRecord;

use crate::format::round2;
use crate::labels::{CodeTable, DEFENSE_QUALITY, ENDGAME, code_of};

/// Side of the field, taken from the first character of the station
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Alliance {
    Red,
    Blue,
}

impl Alliance {
    pub fn from_station(station: &str) -> Self {
        if station.starts_with('R') {
            Self::Red
        } else {
            Self::Blue
        }
    }

    pub fn css_class(self) -> &'static str {
        match self {
            Self::Red => "red",
            Self::Blue => "blue",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowState {
    Normal,
    Updated,
}

impl RowState {
    pub fn css_class(self) -> &'static str {
        match self {
            Self::Normal => "",
            Self::Updated => "updated",
        }
    }
}

/// A metric shown with its categorical label
#[derive(Debug, Clone, PartialEq)]
pub struct CodedValue {
    pub value: Decimal,
    pub code: i64,
    /// `None` for placeholder rows and for codes outside the table
    pub label: Option<&'static str>,
}

impl CodedValue {
    fn new(value: f64, table: CodeTable, placeholder: bool) -> Self {
        let code = code_of(value);
        Self {
            value: round2(value),
            code,
            label: if placeholder { None } else { table.label(code) },
        }
    }

    pub fn label_text(&self) -> &'static str {
        self.label.unwrap_or("")
    }
}

/// Inner / outer / bottom goal counts for one period
#[derive(Debug, Clone, PartialEq)]
pub struct GoalCounts {
    pub inner: Decimal,
    pub outer: Decimal,
    pub bottom: Decimal,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RowView {
    pub team_number: i32,
    pub match_number: String,
    pub station: String,
    pub alliance: Alliance,
    pub state: RowState,
    pub cross_line: Decimal,
    pub auto: GoalCounts,
    pub teleop: GoalCounts,
    pub pickups: Decimal,
    pub time_defended: Decimal,
    pub time_defending: Decimal,
    pub defense: CodedValue,
    pub time_mal: Decimal,
    pub endgame: CodedValue,
    pub comments: String,
    pub scout_name: String,
}

impl RowView {
    pub fn from_record(record: &MatchRecord) -> Self {
        let placeholder = record.is_placeholder();

        Self {
            team_number: record.team_number,
            match_number: record.match_number.clone(),
            station: record.robot_station.clone(),
            alliance: Alliance::from_station(&record.robot_station),
            state: if record.updated {
                RowState::Updated
            } else {
                RowState::Normal
            },
            cross_line: round2(record.cross_line),
            auto: GoalCounts {
                inner: round2(record.number_inner_auto),
                outer: round2(record.number_outer_auto),
                bottom: round2(record.number_bottom_auto),
            },
            teleop: GoalCounts {
                inner: round2(record.number_inner),
                outer: round2(record.number_outer),
                bottom: round2(record.number_bottom),
            },
            pickups: round2(record.number_pickup),
            time_defended: round2(record.time_defended),
            time_defending: round2(record.time_defending),
            defense: CodedValue::new(record.defense_quality, DEFENSE_QUALITY, placeholder),
            time_mal: round2(record.time_mal),
            endgame: CodedValue::new(record.endgame_score, ENDGAME, placeholder),
            comments: record.comments.clone(),
            scout_name: record.scout_name.clone(),
        }
    }

    /// CSS class of the defense cell, e.g. `def3`
    pub fn defense_class(&self) -> String {
        format!("def{}", self.defense.code)
    }

    /// The row's cells, in table order, skipping excluded columns
    pub fn cells(&self, exclude: &Exclusions) -> Vec<Cell> {
        let mut cells = Vec::new();
        let mut push = |column: Column, lines: Vec<String>, class: &str| {
            if !exclude.hides(column) {
                cells.push(Cell {
                    column,
                    lines,
                    class: class.to_string(),
                });
            }
        };

        push(Column::Team, vec![self.team_number.to_string()], "link");
        push(Column::Match, vec![self.match_number.clone()], "link");
        push(
            Column::Station,
            vec![self.station.clone()],
            self.alliance.css_class(),
        );
        push(Column::Playback, Vec::new(), "icons");
        push(Column::Heatmap, Vec::new(), "icons");
        push(Column::CrossLine, vec![self.cross_line.to_string()], "");
        push(Column::Auto, goal_lines(&self.auto), "");
        push(Column::Teleop, goal_lines(&self.teleop), "");
        push(Column::Pickups, vec![self.pickups.to_string()], "");
        push(
            Column::TimeDefended,
            vec![self.time_defended.to_string()],
            "",
        );
        push(
            Column::TimeDefending,
            vec![self.time_defending.to_string()],
            "",
        );
        push(
            Column::Defense,
            coded_lines(&self.defense),
            &self.defense_class(),
        );
        push(Column::TimeMal, vec![self.time_mal.to_string()], "");
        push(Column::Endgame, coded_lines(&self.endgame), "");
        push(Column::Comments, vec![self.comments.clone()], "");
        push(Column::Scout, vec![self.scout_name.clone()], "");
        push(Column::Actions, Vec::new(), "icons");

        cells
    }
}

fn goal_lines(counts: &GoalCounts) -> Vec<String> {
    vec![
        counts.inner.to_string(),
        counts.outer.to_string(),
        counts.bottom.to_string(),
    ]
}

fn coded_lines(value: &CodedValue) -> Vec<String> {
    vec![value.value.to_string(), value.label_text().to_string()]
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Column {
    Team,
    Match,
    Station,
    Playback,
    Heatmap,
    CrossLine,
    Auto,
    Teleop,
    Pickups,
    TimeDefended,
    TimeDefending,
    Defense,
    TimeMal,
    Endgame,
    Comments,
    Scout,
    Actions,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Cell {
    pub column: Column,
    pub lines: Vec<String>,
    pub class: String,
}

/// Columns a table may hide, e.g. the team column on a team's own page
#[derive(Debug, Clone, Copy, Default)]
pub struct Exclusions {
    pub team_number: bool,
    pub match_number: bool,
    pub robot_station: bool,
    pub playback: bool,
    pub comments: bool,
    pub scout_name: bool,
    pub actions: bool,
}

impl Exclusions {
    pub fn hides(&self, column: Column) -> bool {
        match column {
            Column::Team => self.team_number,
            Column::Match => self.match_number,
            Column::Station => self.robot_station,
            Column::Playback => self.playback,
            Column::Comments => self.comments,
            Column::Scout => self.scout_name,
            Column::Actions => self.actions,
            _ => false,
        }
    }
}

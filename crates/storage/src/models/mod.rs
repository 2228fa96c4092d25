pub mod competition;
pub mod match_record;
pub mod station;

pub use competition::Competition;
pub use match_record::MatchRecord;
pub use station::{ROBOT_STATIONS, is_robot_station};

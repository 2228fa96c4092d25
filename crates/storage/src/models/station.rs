/// Driver-station designators a robot can occupy in a match.
pub const ROBOT_STATIONS: &[&str] = &["R1", "R2", "R3", "B1", "B2", "B3"];

pub fn is_robot_station(station: &str) -> bool {
    ROBOT_STATIONS.contains(&station)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_stations() {
        assert!(is_robot_station("R1"));
        assert!(is_robot_station("B3"));
        assert!(!is_robot_station("r1"));
        assert!(!is_robot_station("R4"));
        assert!(!is_robot_station(""));
    }
}

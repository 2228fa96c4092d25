pub mod competition;
pub mod match_data;

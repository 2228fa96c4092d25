pub mod match_data;

pub mod browse;
pub mod search;
pub mod stats;

pub mod bench;
pub mod clock;
pub mod config;
pub mod errors;
pub mod launcher;
pub mod report;
pub mod sizes;
pub mod types;

pub mod envelope;
pub mod export;
pub mod report;

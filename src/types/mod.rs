pub mod config;
pub mod principle;
pub mod report;
pub mod scoring;

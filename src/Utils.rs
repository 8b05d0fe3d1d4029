//! different utility modules used throughout the project
/// logger setup, timing and statistics tables
pub mod logger;

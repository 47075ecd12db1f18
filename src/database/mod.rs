/// Connection pool management and schema setup
pub mod connection;
/// Row types and storage access
pub mod models;

/// Class date parsing and formatting
pub mod datetime;
/// Emoji-prefixed reply helpers
pub mod feedback;
/// Structured logging helpers with consistent prefixes
pub mod logging;

/// Command definitions and per-command handlers
pub mod commands;
/// Dispatcher schema and message routing
pub mod handlers;

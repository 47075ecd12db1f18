pub mod attendance;
pub mod check;

use teloxide::types::User;
use teloxide::utils::command::BotCommands;

#[derive(BotCommands, Clone)]
#[command(rename_rule = "lowercase", description = "Class attendance commands:")]
pub enum Command {
    #[command(description = "Show available commands")]
    Start,
    #[command(description = "Record today's class")]
    Today,
    #[command(description = "Record a class for a date (YYYY-MM-DD)")]
    Record(String),
    #[command(description = "Remove recorded classes for a date (YYYY-MM-DD)")]
    Remove(String),
    #[command(description = "Show all recorded classes")]
    Check,
}

/// The name stored with each record: the Telegram handle when present,
/// otherwise the first name.
pub fn display_name(user: &User) -> String {
    user.username.clone().unwrap_or_else(|| user.first_name.clone())
}

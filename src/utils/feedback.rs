use teloxide::prelude::*;

use crate::config::ErrorReplyPolicy;

/// Feedback types for different command outcomes
#[derive(Debug, Clone)]
pub enum FeedbackType {
    Success,
    Error,
    Info,
}

impl FeedbackType {
    fn emoji(&self) -> &'static str {
        match self {
            FeedbackType::Success => "✅",
            FeedbackType::Error => "❌",
            FeedbackType::Info => "ℹ️",
        }
    }
}

/// Centralized feedback system for bot commands. Replies are plain text so
/// user-supplied names never collide with Telegram markup rules.
pub struct CommandFeedback {
    bot: Bot,
    chat_id: ChatId,
}

impl CommandFeedback {
    pub fn new(bot: Bot, chat_id: ChatId) -> Self {
        Self { bot, chat_id }
    }

    /// Send immediate feedback message
    pub async fn send(&self, feedback_type: FeedbackType, message: &str) -> ResponseResult<Message> {
        let formatted_message = format!("{} {}", feedback_type.emoji(), message);

        self.bot.send_message(self.chat_id, formatted_message).await
    }

    /// Send success feedback
    pub async fn success(&self, message: &str) -> ResponseResult<Message> {
        self.send(FeedbackType::Success, message).await
    }

    /// Send error feedback
    pub async fn error(&self, message: &str) -> ResponseResult<Message> {
        self.send(FeedbackType::Error, message).await
    }

    /// Send info feedback
    pub async fn info(&self, message: &str) -> ResponseResult<Message> {
        self.send(FeedbackType::Info, message).await
    }

    /// The fixed reply for malformed or missing date arguments.
    pub async fn usage_hint(&self, command: &str) -> ResponseResult<Message> {
        self.error(&usage_hint_text(command)).await
    }

    /// Reply for a failed storage operation. The full error always goes to
    /// the logs; the policy decides whether the chat sees the raw text or a
    /// generic message.
    pub async fn storage_error(
        &self,
        policy: ErrorReplyPolicy,
        error: &sqlx::Error,
    ) -> ResponseResult<Message> {
        match policy {
            ErrorReplyPolicy::LogOnly => {
                self.error("Something went wrong while accessing the attendance records. Please try again.")
                    .await
            }
            ErrorReplyPolicy::ReplyWithError => {
                self.error(&format!("Failed to access the attendance records: {error}"))
                    .await
            }
        }
    }
}

/// Usage hint named after the invoking command, e.g. `/record`.
pub fn usage_hint_text(command: &str) -> String {
    format!("Please provide a date in YYYY-MM-DD format\nExample: {command} 2024-11-27")
}

use anyhow::{anyhow, Result};
use std::env;
use url::Url;

/// How storage errors are reported back to the chat.
///
/// Both variants always produce a reply; the policy only controls whether
/// the reply carries the raw error text or a generic message while the
/// detail stays in the logs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorReplyPolicy {
    LogOnly,
    ReplyWithError,
}

impl ErrorReplyPolicy {
    fn from_env_value(value: &str) -> Result<Self> {
        match value.trim() {
            "" | "log-only" => Ok(ErrorReplyPolicy::LogOnly),
            "reply-with-error" => Ok(ErrorReplyPolicy::ReplyWithError),
            other => Err(anyhow!(
                "Invalid ERROR_REPLY_POLICY '{other}', expected 'log-only' or 'reply-with-error'"
            )),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    pub telegram_bot_token: String,
    pub database_url: String,
    pub http_port: u16,
    /// When set the bot registers this callback URL and switches from long
    /// polling to the webhook bridge.
    pub webhook_url: Option<Url>,
    pub error_reply_policy: ErrorReplyPolicy,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        let token = env::var("TELEGRAM_BOT_TOKEN")
            .map_err(|_| anyhow!("TELEGRAM_BOT_TOKEN must be set"))?;

        if token.trim().is_empty() {
            return Err(anyhow!("TELEGRAM_BOT_TOKEN must be set"));
        }

        let database_url = env::var("DATABASE_URL")
            .unwrap_or_else(|_| "sqlite:./data/attendance.db".to_string());
        let database_url = if database_url.trim().is_empty() {
            "sqlite:./data/attendance.db".to_string()
        } else {
            database_url
        };

        let port_str = env::var("HTTP_PORT")
            .unwrap_or_else(|_| "3000".to_string());
        let http_port = port_str.trim()
            .parse()
            .map_err(|_| anyhow!("Invalid HTTP_PORT"))?;

        let webhook_url = match env::var("WEBHOOK_URL") {
            Ok(raw) if !raw.trim().is_empty() => Some(
                Url::parse(raw.trim()).map_err(|_| anyhow!("Invalid WEBHOOK_URL"))?,
            ),
            _ => None,
        };

        let error_reply_policy = match env::var("ERROR_REPLY_POLICY") {
            Ok(raw) => ErrorReplyPolicy::from_env_value(&raw)?,
            Err(_) => ErrorReplyPolicy::LogOnly,
        };

        Ok(Config {
            telegram_bot_token: token,
            database_url,
            http_port,
            webhook_url,
            error_reply_policy,
        })
    }
}

//! # Class Tracker Bot
//!
//! A Telegram bot that records class attendance, one row per user per date.
//!
//! ## Features
//! - Record attendance for today or any specific date
//! - Remove recorded dates again
//! - Ranked attendance report across all users with a credit allowance
//! - Long polling or webhook delivery, selected by configuration
//! - Persistent storage with SQLite

/// Bot command handlers and message processing
pub mod bot;
/// Configuration management and environment variables
pub mod config;
/// Database models, connections, and schema setup
pub mod database;
/// HTTP-facing services: health endpoints and the webhook bridge
pub mod services;
/// Utility functions for dates, feedback, and logging
pub mod utils;

/// Health check endpoints
pub mod health;
/// Webhook delivery bridge between HTTP and the dispatcher
pub mod webhook;

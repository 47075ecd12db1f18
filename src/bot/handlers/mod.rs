pub mod message;

use teloxide::{dispatching::UpdateHandler, prelude::*};

use crate::config::ErrorReplyPolicy;
use crate::database::connection::DatabaseManager;

pub struct BotHandler {
    pub db: DatabaseManager,
    pub policy: ErrorReplyPolicy,
}

impl BotHandler {
    pub fn new(db: DatabaseManager, policy: ErrorReplyPolicy) -> Self {
        Self { db, policy }
    }

    /// The dispatch table: exactly one endpoint per recognized command.
    /// Anything that fails the command filter falls through to the
    /// dispatcher's default handler and is ignored.
    pub fn schema(&self) -> UpdateHandler<teloxide::RequestError> {
        use teloxide::dispatching::UpdateFilterExt;

        let db = self.db.clone();
        let policy = self.policy;

        Update::filter_message()
            .filter_command::<crate::bot::commands::Command>()
            .endpoint(move |bot, msg, cmd| {
                let db = db.clone();
                async move { message::command_handler(bot, msg, cmd, db, policy).await }
            })
    }
}

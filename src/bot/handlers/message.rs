use teloxide::prelude::*;
use teloxide::utils::command::BotCommands;

use crate::bot::commands::{attendance, check, Command};
use crate::config::ErrorReplyPolicy;
use crate::database::connection::DatabaseManager;

pub async fn command_handler(
    bot: Bot,
    msg: Message,
    cmd: Command,
    db: DatabaseManager,
    policy: ErrorReplyPolicy,
) -> ResponseResult<()> {
    match cmd {
        Command::Start => {
            bot.send_message(msg.chat.id, Command::descriptions().to_string()).await?;
        }
        Command::Today => {
            attendance::handle_today(bot, msg, &db, policy).await?;
        }
        Command::Record(date) => {
            attendance::handle_record(bot, msg, date, &db, policy).await?;
        }
        Command::Remove(date) => {
            attendance::handle_remove(bot, msg, date, &db, policy).await?;
        }
        Command::Check => {
            check::handle_check(bot, msg, &db, policy).await?;
        }
    }
    Ok(())
}

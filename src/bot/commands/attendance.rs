use teloxide::prelude::*;

use crate::bot::commands::display_name;
use crate::config::ErrorReplyPolicy;
use crate::database::{connection::DatabaseManager, models::AttendanceRecord};
use crate::utils::datetime::{format_class_date, parse_class_date, today};
use crate::utils::feedback::CommandFeedback;
use crate::utils::logging::{
    log_command_error, log_command_start, log_command_success, log_validation_error,
};

/// `/today` - record attendance for the host-local current date.
pub async fn handle_today(
    bot: Bot,
    msg: Message,
    db: &DatabaseManager,
    policy: ErrorReplyPolicy,
) -> ResponseResult<()> {
    let Some(user) = msg.from().cloned() else {
        tracing::debug!("Ignoring /today without a sender");
        return Ok(());
    };
    let username = display_name(&user);
    let user_id = user.id.0 as i64;
    let chat_id = msg.chat.id;
    let feedback = CommandFeedback::new(bot, chat_id);

    let class_date = today();
    log_command_start("today", &username, user_id, chat_id.0, Some(&format_class_date(class_date)));

    match AttendanceRecord::record(&db.pool, user_id, &username, class_date).await {
        Ok(_) => {
            log_command_success("today", &username, user_id, chat_id.0, None);
            feedback
                .success(&format!(
                    "Recorded class for today ({})",
                    format_class_date(class_date)
                ))
                .await?;
        }
        Err(e) => {
            log_command_error("today", &username, user_id, chat_id.0, &e.to_string());
            feedback.storage_error(policy, &e).await?;
        }
    }

    Ok(())
}

/// `/record <YYYY-MM-DD>` - record attendance for an arbitrary date.
pub async fn handle_record(
    bot: Bot,
    msg: Message,
    date_arg: String,
    db: &DatabaseManager,
    policy: ErrorReplyPolicy,
) -> ResponseResult<()> {
    let Some(user) = msg.from().cloned() else {
        tracing::debug!("Ignoring /record without a sender");
        return Ok(());
    };
    let username = display_name(&user);
    let user_id = user.id.0 as i64;
    let chat_id = msg.chat.id;
    let feedback = CommandFeedback::new(bot, chat_id);

    log_command_start("record", &username, user_id, chat_id.0, Some(&date_arg));

    let class_date = match parse_class_date(&date_arg) {
        Ok(date) => date,
        Err(_) => {
            log_validation_error("record", &date_arg, &username, user_id, chat_id.0);
            feedback.usage_hint("/record").await?;
            return Ok(());
        }
    };

    match AttendanceRecord::record(&db.pool, user_id, &username, class_date).await {
        Ok(_) => {
            log_command_success("record", &username, user_id, chat_id.0, None);
            feedback
                .success(&format!("Recorded class for {}", format_class_date(class_date)))
                .await?;
        }
        Err(e) => {
            log_command_error("record", &username, user_id, chat_id.0, &e.to_string());
            feedback.storage_error(policy, &e).await?;
        }
    }

    Ok(())
}

/// `/remove <YYYY-MM-DD>` - delete every record of the caller for that date.
pub async fn handle_remove(
    bot: Bot,
    msg: Message,
    date_arg: String,
    db: &DatabaseManager,
    policy: ErrorReplyPolicy,
) -> ResponseResult<()> {
    let Some(user) = msg.from().cloned() else {
        tracing::debug!("Ignoring /remove without a sender");
        return Ok(());
    };
    let username = display_name(&user);
    let user_id = user.id.0 as i64;
    let chat_id = msg.chat.id;
    let feedback = CommandFeedback::new(bot, chat_id);

    log_command_start("remove", &username, user_id, chat_id.0, Some(&date_arg));

    let class_date = match parse_class_date(&date_arg) {
        Ok(date) => date,
        Err(_) => {
            log_validation_error("remove", &date_arg, &username, user_id, chat_id.0);
            feedback.usage_hint("/remove").await?;
            return Ok(());
        }
    };

    match AttendanceRecord::remove_for_date(&db.pool, user_id, class_date).await {
        Ok(0) => {
            log_command_success("remove", &username, user_id, chat_id.0, Some("no rows"));
            feedback
                .info(&format!(
                    "No class record found for {}",
                    format_class_date(class_date)
                ))
                .await?;
        }
        Ok(removed) => {
            log_command_success(
                "remove",
                &username,
                user_id,
                chat_id.0,
                Some(&format!("{removed} rows")),
            );
            let label = if removed == 1 { "record" } else { "records" };
            feedback
                .success(&format!(
                    "Removed {} {} for {}",
                    removed,
                    label,
                    format_class_date(class_date)
                ))
                .await?;
        }
        Err(e) => {
            log_command_error("remove", &username, user_id, chat_id.0, &e.to_string());
            feedback.storage_error(policy, &e).await?;
        }
    }

    Ok(())
}

use teloxide::prelude::*;

use crate::config::ErrorReplyPolicy;
use crate::database::{connection::DatabaseManager, models::AttendanceRecord};
use crate::utils::datetime::format_class_date;
use crate::utils::feedback::CommandFeedback;
use crate::utils::logging::{log_command_error, log_command_start, log_command_success};
use chrono::NaiveDate;

/// Fixed class allowance the credits figure is derived from.
pub const CLASS_ALLOWANCE: i64 = 100;

/// The fixed reply when the store holds no records at all.
pub const NO_CLASSES_MESSAGE: &str = "No classes recorded";

/// One user's section of the report: name and ascending dates.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserClasses {
    pub username: String,
    pub dates: Vec<NaiveDate>,
}

/// `/check` - the global attendance report, not scoped to the caller.
pub async fn handle_check(
    bot: Bot,
    msg: Message,
    db: &DatabaseManager,
    policy: ErrorReplyPolicy,
) -> ResponseResult<()> {
    let (username, user_id) = match msg.from() {
        Some(user) => (super::display_name(user), user.id.0 as i64),
        None => ("unknown".to_string(), 0),
    };
    let chat_id = msg.chat.id;
    let feedback = CommandFeedback::new(bot.clone(), chat_id);

    log_command_start("check", &username, user_id, chat_id.0, None);

    let records = match AttendanceRecord::fetch_all(&db.pool).await {
        Ok(records) => records,
        Err(e) => {
            log_command_error("check", &username, user_id, chat_id.0, &e.to_string());
            feedback.storage_error(policy, &e).await?;
            return Ok(());
        }
    };

    if records.is_empty() {
        log_command_success("check", &username, user_id, chat_id.0, Some("empty store"));
        feedback.info(NO_CLASSES_MESSAGE).await?;
        return Ok(());
    }

    let groups = group_by_user(&records);
    log_command_success(
        "check",
        &username,
        user_id,
        chat_id.0,
        Some(&format!("{} rows, {} users", records.len(), groups.len())),
    );
    bot.send_message(chat_id, render_report(&groups)).await?;

    Ok(())
}

/// Groups records by username and orders the groups by descending record
/// count. Ties keep first-seen order (the stable sort leaves the input
/// enumeration order intact). Input rows are expected in ascending date
/// order, so each group's date list stays ascending.
pub fn group_by_user(records: &[AttendanceRecord]) -> Vec<UserClasses> {
    let mut groups: Vec<UserClasses> = Vec::new();

    for record in records {
        match groups.iter_mut().find(|g| g.username == record.username) {
            Some(group) => group.dates.push(record.class_date),
            None => groups.push(UserClasses {
                username: record.username.clone(),
                dates: vec![record.class_date],
            }),
        }
    }

    groups.sort_by(|a, b| b.dates.len().cmp(&a.dates.len()));
    groups
}

/// Renders the report text. The displayed total is the size of the largest
/// group, not a grand total across users; the credits figure is derived from
/// that same value. This mirrors the behavior of every earlier report
/// iteration and must not be corrected to a real sum without product
/// sign-off.
pub fn render_report(groups: &[UserClasses]) -> String {
    let total_classes = groups.first().map(|g| g.dates.len() as i64).unwrap_or(0);
    let credits_left = CLASS_ALLOWANCE - total_classes;

    let mut text = format!(
        "📊 Classes taken: {total_classes}\n💳 Credits left: {credits_left}\n"
    );

    for group in groups {
        let label = if group.dates.len() == 1 { "class" } else { "classes" };
        text.push_str(&format!(
            "\n{} ({} {}):\n",
            group.username,
            group.dates.len(),
            label
        ));
        for date in &group.dates {
            text.push_str(&format_class_date(*date));
            text.push('\n');
        }
    }

    text
}

use chrono::NaiveDate;
use sqlx::FromRow;

/// One row asserting that a user attended a class on a date.
///
/// There is deliberately no uniqueness over `(user_id, class_date)`:
/// recording the same date twice produces two independent rows, and removal
/// deletes every matching row at once.
#[derive(Debug, Clone, FromRow)]
pub struct AttendanceRecord {
    pub id: i64,
    pub user_id: i64,
    /// Display name captured at record time; not kept in sync with later
    /// name changes.
    pub username: String,
    pub class_date: NaiveDate,
}

impl AttendanceRecord {
    pub async fn record(
        pool: &sqlx::SqlitePool,
        user_id: i64,
        username: &str,
        class_date: NaiveDate,
    ) -> Result<Self, sqlx::Error> {
        let result = sqlx::query(
            "INSERT INTO class_attendance (user_id, username, class_date) VALUES (?, ?, ?)",
        )
        .bind(user_id)
        .bind(username)
        .bind(class_date)
        .execute(pool)
        .await?;

        Ok(AttendanceRecord {
            id: result.last_insert_rowid(),
            user_id,
            username: username.to_owned(),
            class_date,
        })
    }

    /// Deletes every row matching the user and date, duplicates included.
    /// Returns the number of rows removed.
    pub async fn remove_for_date(
        pool: &sqlx::SqlitePool,
        user_id: i64,
        class_date: NaiveDate,
    ) -> Result<u64, sqlx::Error> {
        let result = sqlx::query(
            "DELETE FROM class_attendance WHERE user_id = ? AND class_date = ?",
        )
        .bind(user_id)
        .bind(class_date)
        .execute(pool)
        .await?;

        Ok(result.rows_affected())
    }

    /// All records, dates ascending. Rows with equal dates keep insertion
    /// order via the id tie-break.
    pub async fn fetch_all(
        pool: &sqlx::SqlitePool,
    ) -> Result<Vec<Self>, sqlx::Error> {
        sqlx::query_as::<_, AttendanceRecord>(
            "SELECT id, user_id, username, class_date FROM class_attendance \
             ORDER BY class_date ASC, id ASC",
        )
        .fetch_all(pool)
        .await
    }

    pub async fn count(pool: &sqlx::SqlitePool) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar("SELECT COUNT(*) FROM class_attendance")
            .fetch_one(pool)
            .await
    }
}

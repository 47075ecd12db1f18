use anyhow::Result;
use chrono::NaiveDate;
use class_tracker_bot::database::{connection::DatabaseManager, models::AttendanceRecord};
use tempfile::{tempdir, TempDir};

async fn setup_test_db() -> Result<(DatabaseManager, TempDir)> {
    let temp_dir = tempdir()?;
    let db_path = temp_dir.path().join("test.db");
    let database_url = format!("sqlite:{}", db_path.display());

    let db_manager = DatabaseManager::new(&database_url).await?;
    db_manager.init_schema().await?;

    Ok((db_manager, temp_dir))
}

fn date(s: &str) -> NaiveDate {
    s.parse().unwrap()
}

#[tokio::test]
async fn test_record_creation_and_retrieval() -> Result<()> {
    let (db, _temp_dir) = setup_test_db().await?;

    let record = AttendanceRecord::record(&db.pool, 12345, "ada", date("2024-11-27")).await?;
    assert_eq!(record.user_id, 12345);
    assert_eq!(record.username, "ada");
    assert_eq!(record.class_date, date("2024-11-27"));
    assert!(record.id > 0);

    let all = AttendanceRecord::fetch_all(&db.pool).await?;
    assert_eq!(all.len(), 1);
    assert_eq!(all[0].id, record.id);
    assert_eq!(all[0].class_date, date("2024-11-27"));

    Ok(())
}

#[tokio::test]
async fn test_schema_creation_is_idempotent() -> Result<()> {
    let (db, _temp_dir) = setup_test_db().await?;

    AttendanceRecord::record(&db.pool, 1, "ada", date("2024-01-01")).await?;

    // Running schema setup again must not touch existing data
    db.init_schema().await?;
    assert_eq!(AttendanceRecord::count(&db.pool).await?, 1);

    Ok(())
}

#[tokio::test]
async fn test_duplicate_dates_create_independent_rows() -> Result<()> {
    let (db, _temp_dir) = setup_test_db().await?;

    let first = AttendanceRecord::record(&db.pool, 1, "ada", date("2024-03-10")).await?;
    let second = AttendanceRecord::record(&db.pool, 1, "ada", date("2024-03-10")).await?;
    assert_ne!(first.id, second.id);
    assert_eq!(AttendanceRecord::count(&db.pool).await?, 2);

    // One removal deletes both duplicates
    let removed = AttendanceRecord::remove_for_date(&db.pool, 1, date("2024-03-10")).await?;
    assert_eq!(removed, 2);

    // A second removal for the same pair finds nothing
    let removed = AttendanceRecord::remove_for_date(&db.pool, 1, date("2024-03-10")).await?;
    assert_eq!(removed, 0);
    assert_eq!(AttendanceRecord::count(&db.pool).await?, 0);

    Ok(())
}

#[tokio::test]
async fn test_remove_matches_user_and_date_exactly() -> Result<()> {
    let (db, _temp_dir) = setup_test_db().await?;

    AttendanceRecord::record(&db.pool, 1, "ada", date("2024-03-10")).await?;
    AttendanceRecord::record(&db.pool, 1, "ada", date("2024-03-11")).await?;
    AttendanceRecord::record(&db.pool, 2, "bob", date("2024-03-10")).await?;

    let removed = AttendanceRecord::remove_for_date(&db.pool, 1, date("2024-03-10")).await?;
    assert_eq!(removed, 1);

    // Ada's other date and Bob's row on the removed date survive
    let remaining = AttendanceRecord::fetch_all(&db.pool).await?;
    assert_eq!(remaining.len(), 2);
    assert!(remaining
        .iter()
        .any(|r| r.user_id == 1 && r.class_date == date("2024-03-11")));
    assert!(remaining
        .iter()
        .any(|r| r.user_id == 2 && r.class_date == date("2024-03-10")));

    Ok(())
}

#[tokio::test]
async fn test_fetch_all_orders_dates_ascending() -> Result<()> {
    let (db, _temp_dir) = setup_test_db().await?;

    AttendanceRecord::record(&db.pool, 1, "ada", date("2024-06-01")).await?;
    AttendanceRecord::record(&db.pool, 1, "ada", date("2023-12-24")).await?;
    AttendanceRecord::record(&db.pool, 1, "ada", date("2024-01-15")).await?;

    let all = AttendanceRecord::fetch_all(&db.pool).await?;
    let dates: Vec<NaiveDate> = all.iter().map(|r| r.class_date).collect();
    assert_eq!(
        dates,
        vec![date("2023-12-24"), date("2024-01-15"), date("2024-06-01")]
    );

    Ok(())
}

#[tokio::test]
async fn test_past_and_future_dates_are_accepted() -> Result<()> {
    let (db, _temp_dir) = setup_test_db().await?;

    AttendanceRecord::record(&db.pool, 1, "ada", date("1999-01-01")).await?;
    AttendanceRecord::record(&db.pool, 1, "ada", date("2099-12-31")).await?;
    assert_eq!(AttendanceRecord::count(&db.pool).await?, 2);

    Ok(())
}

#[tokio::test]
async fn test_recorded_date_appears_in_user_report() -> Result<()> {
    use class_tracker_bot::bot::commands::check::group_by_user;

    let (db, _temp_dir) = setup_test_db().await?;

    AttendanceRecord::record(&db.pool, 1, "ada", date("2024-11-27")).await?;
    AttendanceRecord::record(&db.pool, 2, "bob", date("2024-11-01")).await?;

    let records = AttendanceRecord::fetch_all(&db.pool).await?;
    let groups = group_by_user(&records);

    let ada = groups
        .iter()
        .find(|g| g.username == "ada")
        .expect("ada should have a report section");
    assert_eq!(ada.dates, vec![date("2024-11-27")]);

    Ok(())
}

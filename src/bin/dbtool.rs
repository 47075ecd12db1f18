//! Maintenance tool for the attendance database: create the schema, inspect
//! its state, or wipe and rebuild it.

use anyhow::{anyhow, Result};
use class_tracker_bot::config::Config;
use class_tracker_bot::database::connection::DatabaseManager;
use class_tracker_bot::database::models::AttendanceRecord;
use std::env;
use std::io;
use std::path::Path;

#[tokio::main]
async fn main() -> Result<()> {
    let args: Vec<String> = env::args().collect();
    let command = args.get(1).map(|s| s.as_str()).unwrap_or("init");

    match command {
        "init" | "up" => {
            let config = load_config()?;
            ensure_schema(&config).await
        }
        "check" => check_database().await,
        "reset" => reset_database().await,
        "help" | "--help" | "-h" => {
            print_help();
            Ok(())
        }
        _ => {
            eprintln!("Unknown command: {command}");
            print_help();
            std::process::exit(1);
        }
    }
}

fn load_config() -> Result<Config> {
    dotenvy::dotenv().ok();
    let config = Config::from_env()?;
    println!("📊 Database: {}", mask_url(&config.database_url));
    Ok(config)
}

/// Creates the attendance schema, including the SQLite data directory when
/// the URL points into one that does not exist yet.
async fn ensure_schema(config: &Config) -> Result<()> {
    if let Some(db_path) = config.database_url.strip_prefix("sqlite:") {
        if let Some(parent) = Path::new(db_path).parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                println!("📁 Creating directory: {}", parent.display());
                std::fs::create_dir_all(parent)?;
            }
        }
    }

    let db_manager = DatabaseManager::new(&config.database_url)
        .await
        .map_err(|e| anyhow!("Failed to connect to database: {}", e))?;
    db_manager
        .init_schema()
        .await
        .map_err(|e| anyhow!("Schema creation failed: {}", e))?;

    println!("✅ Attendance schema ready");
    Ok(())
}

async fn check_database() -> Result<()> {
    let config = load_config()?;

    let db_manager = DatabaseManager::new(&config.database_url)
        .await
        .map_err(|e| anyhow!("Failed to connect to database: {}", e))?;

    let attendance_table: Option<String> = sqlx::query_scalar(
        "SELECT name FROM sqlite_master WHERE type = 'table' AND name = 'class_attendance'",
    )
    .fetch_optional(&db_manager.pool)
    .await?;

    match attendance_table {
        Some(_) => {
            let records = AttendanceRecord::count(&db_manager.pool).await?;
            println!("✅ class_attendance table present, {records} record(s)");
        }
        None => {
            println!("⚠️  class_attendance table missing");
            println!("💡 Run 'dbtool init' to create it");
        }
    }

    Ok(())
}

async fn reset_database() -> Result<()> {
    println!("⚠️  This deletes ALL attendance records. Continue? (yes/no)");

    let mut input = String::new();
    io::stdin().read_line(&mut input)?;
    if input.trim().to_lowercase() != "yes" {
        println!("Reset cancelled.");
        return Ok(());
    }

    let config = load_config()?;

    let Some(db_path) = config.database_url.strip_prefix("sqlite:") else {
        return Err(anyhow!("Reset is only supported for SQLite databases"));
    };
    if Path::new(db_path).exists() {
        std::fs::remove_file(db_path)?;
        println!("🗑️  Deleted {db_path}");
    }

    ensure_schema(&config).await
}

/// Keeps only the file name of SQLite paths so logs do not leak the full
/// filesystem layout.
fn mask_url(url: &str) -> String {
    let Some(path) = url.strip_prefix("sqlite:") else {
        return url.to_string();
    };
    match Path::new(path).file_name() {
        Some(filename) => format!("sqlite:.../{}", filename.to_string_lossy()),
        None => url.to_string(),
    }
}

fn print_help() {
    println!("dbtool - attendance database maintenance");
    println!();
    println!("USAGE: dbtool [init|check|reset|help]");
    println!();
    println!("    init, up  Create the attendance schema (default)");
    println!("    check     Report whether the attendance table exists and its row count");
    println!("    reset     Delete the SQLite file and recreate the schema - DESTRUCTIVE");
    println!("    help      Show this message");
    println!();
    println!("Reads DATABASE_URL (default: sqlite:./data/attendance.db).");
}

//! Database migration tool for the quest booking bot.

use anyhow::{anyhow, Result};
use quest_booking_bot::config::Config;
use quest_booking_bot::database::connection::DatabaseManager;
use std::env;
use std::io;
use std::path::Path;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize basic logging for the migration
    env_logger::init();

    // Parse command line arguments
    let args: Vec<String> = env::args().collect();
    let command = args.get(1).map(|s| s.as_str()).unwrap_or("migrate");

    match command {
        "migrate" | "up" => run_migrations().await,
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

async fn run_migrations() -> Result<()> {
    println!("🔧 Quest Booking Bot - Database Migration Tool");
    println!("==============================================");

    // Load environment configuration
    dotenvy::dotenv().ok();
    let config = Config::from_env()?;

    println!("📊 Database URL: {}", mask_url(&config.database_url));

    // Ensure data directory exists for SQLite
    if config.database_url.starts_with("sqlite:") {
        let db_path = config
            .database_url
            .strip_prefix("sqlite:")
            .unwrap_or(&config.database_url);
        if let Some(parent) = Path::new(db_path).parent() {
            if !parent.exists() {
                println!("📁 Creating directory: {}", parent.display());
                std::fs::create_dir_all(parent)?;
            }
        }
    }

    println!("🚀 Running database migrations...");

    let db_manager = DatabaseManager::new(&config.database_url)
        .await
        .map_err(|e| anyhow!("Failed to connect to database: {}", e))?;

    match db_manager.run_migrations().await {
        Ok(()) => {
            println!("✅ Migrations completed successfully!");
            println!("\n🎯 Your booking database is ready!");
        }
        Err(e) => {
            eprintln!("❌ Migration failed: {e}");
            std::process::exit(1);
        }
    }

    Ok(())
}

async fn check_database() -> Result<()> {
    println!("🔍 Checking database connection and schema...");

    dotenvy::dotenv().ok();
    let config = Config::from_env()?;

    println!("📊 Database URL: {}", mask_url(&config.database_url));

    let db_manager = DatabaseManager::new(&config.database_url)
        .await
        .map_err(|e| anyhow!("Failed to connect to database: {}", e))?;

    let total: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM bookings")
        .fetch_one(&db_manager.pool)
        .await
        .map_err(|e| anyhow!("Schema check failed, run migrations first: {}", e))?;

    for status in ["pending", "confirmed", "rejected"] {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM bookings WHERE status = ?")
            .bind(status)
            .fetch_one(&db_manager.pool)
            .await?;
        println!("  {status}: {count}");
    }

    println!("✅ Database looks good, {total} booking(s) total");
    Ok(())
}

async fn reset_database() -> Result<()> {
    println!("⚠️  This will DELETE ALL bookings. Type 'yes' to continue:");

    let mut input = String::new();
    io::stdin().read_line(&mut input)?;
    if input.trim() != "yes" {
        println!("Aborted.");
        return Ok(());
    }

    dotenvy::dotenv().ok();
    let config = Config::from_env()?;

    let db_manager = DatabaseManager::new(&config.database_url).await?;
    sqlx::query("DROP TABLE IF EXISTS bookings")
        .execute(&db_manager.pool)
        .await?;
    sqlx::query("DELETE FROM _sqlx_migrations")
        .execute(&db_manager.pool)
        .await
        .ok();
    db_manager.run_migrations().await?;

    println!("✅ Database reset complete");
    Ok(())
}

fn mask_url(url: &str) -> String {
    // SQLite URLs carry no credentials, but keep the habit for other schemes
    match url.split_once('@') {
        Some((_, tail)) => format!("***@{tail}"),
        None => url.to_string(),
    }
}

fn print_help() {
    println!("Quest Booking Bot - Database Migration Tool");
    println!();
    println!("USAGE:");
    println!("    migrate [COMMAND]");
    println!();
    println!("COMMANDS:");
    println!("    migrate, up    Run pending migrations (default)");
    println!("    check          Check database connectivity and booking counts");
    println!("    reset          Drop and re-create the bookings table");
    println!("    help           Show this help");
}

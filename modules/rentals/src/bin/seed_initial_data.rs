//! One-shot idempotent bootstrap of catalog rows and system settings.
//!
//! Safe to run repeatedly: rows are created if absent by unique key and
//! left untouched otherwise. Exits nonzero only when the store is
//! unreachable.

use tracing_subscriber::EnvFilter;

use rentals_rs::config::Config;
use rentals_rs::db;
use rentals_rs::repos::{meter_type_repo, settings_repo, utility_type_repo};

const UTILITY_TYPES: &[(&str, &str)] = &[
    ("Electricity", "Electricity bills"),
    ("Gas", "Natural gas bills"),
    ("Water", "Water and sewage bills"),
    ("Internet", "Internet service bills"),
    ("Condominio", "Condominium maintenance fees"),
];

const METER_TYPES: &[(&str, &str, i32, i32)] = &[
    ("Electricity", "kWh", 25, 5),
    ("Gas", "m³", 20, 10),
    ("Water", "m³", 15, 5),
];

const SYSTEM_SETTINGS: &[(&str, &str, &str)] = &[
    (
        "bnr_exchange_rate_url",
        "https://www.bnr.ro/nbrfxrates.xml",
        "BNR XML feed URL for exchange rates",
    ),
    (
        "default_exchange_rate",
        "5.00",
        "Default EUR to RON exchange rate when BNR is unavailable",
    ),
    (
        "meter_reading_notification_days",
        "3",
        "Days before reading period ends to send notification",
    ),
];

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    if let Err(e) = run().await {
        eprintln!("Initial data setup failed: {e}");
        std::process::exit(1);
    }
}

async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::from_env()?;

    let pool = db::init_pool(&config.database_url).await?;
    sqlx::migrate!("./db/migrations").run(&pool).await?;

    println!("Setting up initial data...");

    for (name, description) in UTILITY_TYPES {
        if utility_type_repo::ensure(&pool, name, description).await? {
            println!("Created utility type: {name}");
        } else {
            println!("Utility type already exists: {name}");
        }
    }

    for (name, unit, day_start, day_end) in METER_TYPES {
        if meter_type_repo::ensure(&pool, name, unit, *day_start, *day_end).await? {
            println!("Created meter type: {name} ({day_start}-{day_end})");
        } else {
            println!("Meter type already exists: {name}");
        }
    }

    for (key, value, description) in SYSTEM_SETTINGS {
        if settings_repo::ensure(&pool, key, value, description).await? {
            println!("Created system setting: {key}");
        } else {
            println!("System setting already exists: {key}");
        }
    }

    println!("Initial data setup completed!");
    Ok(())
}

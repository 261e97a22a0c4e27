use clap::Parser;
use migration::{Migrator, MigratorTrait};
use settings::Database;

mod settings;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let cli = settings::Cli::parse();
    let settings = settings::Settings::new(&cli)?;

    tracing_subscriber::fmt()
        .with_env_filter(format!(
            "splitledger={level},server={level},engine={level}",
            level = settings.app.level
        ))
        .init();

    let Some(server) = settings.server else {
        tracing::warn!("no [server] section found in settings, nothing to run");
        return Ok(());
    };

    tracing::info!("Found server settings...");
    let timezone: chrono_tz::Tz = settings
        .ledger
        .timezone
        .parse()
        .map_err(|err| format!("invalid ledger timezone: {err}"))?;
    if settings.ledger.lock_after_days < 0 {
        return Err("ledger.lock_after_days must be >= 0".into());
    }

    let db = parse_database(&server.database).await?;
    let engine = engine::Engine::builder()
        .database(db)
        .lock_policy(engine::ledger::LockPolicy::after_days(
            settings.ledger.lock_after_days,
        ))
        .timezone(timezone)
        .build()
        .await?;

    let bind = server.bind.unwrap_or_else(|| "127.0.0.1".to_string());
    let addr = format!("{}:{}", bind, server.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    server::run_with_listener(engine, listener).await?;

    Ok(())
}

async fn parse_database(
    config: &settings::Database,
) -> Result<sea_orm::DatabaseConnection, Box<dyn std::error::Error + Send + Sync>> {
    let url = match config {
        Database::Memory => String::from("sqlite::memory:"),
        Database::Sqlite(path) => format!("sqlite:{}?mode=rwc", path),
    };

    let database = sea_orm::Database::connect(url).await?;
    Migrator::up(&database, None).await?;
    Ok(database)
}

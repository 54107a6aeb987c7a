use c500_bot::{
    bot::{self, BotData},
    config::{self, database},
    core::schedule,
    errors::{Error, Result},
};
use dotenvy::dotenv;
use std::{env, sync::Arc};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    // 1. Initialize tracing (as early as possible)
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    // 2. Load .env file; variables may also be set externally
    dotenv().ok();
    info!("Attempted to load .env file.");

    // 3. Load the application configuration
    let app_config = Arc::new(config::load_app_configuration()?);

    // 4. Open the ledger database and make sure the tables exist
    let db = database::create_connection()
        .await
        .inspect_err(|e| error!("Failed to connect to the ledger database: {}", e))?;
    database::create_tables(&db)
        .await
        .inspect(|_| info!("Ledger database initialized successfully."))
        .inspect_err(|e| error!("Failed to create ledger tables: {}", e))?;

    // 5. Start the end-of-day batch
    if app_config.reconciliation.enabled {
        schedule::spawn_daily_reconciliation(db.clone(), app_config.reconciliation.run_at_hour_utc);
    } else {
        info!("Daily reconciliation is disabled.");
    }

    // 6. Run the bot
    // DISCORD_BOT_TOKEN is loaded here, directly before use, not stored in AppConfig
    let token = env::var("DISCORD_BOT_TOKEN")
        .inspect_err(|e| error!("DISCORD_BOT_TOKEN not found: {}", e))
        .map_err(Error::EnvVar)?;

    let data = BotData::new(app_config, db)?;
    bot::run_bot(token, data).await
}

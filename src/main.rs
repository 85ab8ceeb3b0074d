//! fitonomics - Telegram fitness and nutrition tracking bot

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Result;
use clap::Parser;
use teloxide::Bot;
use tokio::sync::Mutex;
use tracing::info;

use fitonomics::bot::{BotConfig, run_bot};
use fitonomics::content::MealCatalog;
use fitonomics::db::Database;
use fitonomics::sched::{Dispatcher, Registry};

#[derive(Parser)]
#[command(name = "fitonomics")]
#[command(author, version, about = "Fitonomics - fitness and nutrition tracking bot")]
struct Cli {
    /// Telegram bot token (required; the process refuses to start without it)
    #[arg(long, env = "BOT_TOKEN")]
    token: String,

    /// SQLite database path
    #[arg(long, env = "DB_PATH", default_value = "fitonomics.db")]
    db: String,

    /// Channel users must join before onboarding
    #[arg(long, env = "CHANNEL_USERNAME", default_value = "@fitonomics_uz")]
    channel: String,

    /// Chat id with unconditional admin access
    #[arg(long, env = "SUPER_ADMIN_ID")]
    super_admin: Option<i64>,

    /// Meal packs data file
    #[arg(long, env = "MEALS_PATH", default_value = "data/meals.json")]
    meals: PathBuf,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if present
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    let db = Arc::new(Mutex::new(Database::open(&cli.db)?));
    let catalog = Arc::new(MealCatalog::load(&cli.meals));

    let bot = Bot::new(cli.token.clone());
    let dispatcher = Dispatcher::new(bot.clone(), Arc::clone(&db));
    let registry = Registry::new(dispatcher);

    // Jobs are a projection of users + settings; rebuild, then run the clock.
    registry.reload().await?;
    registry.start().await;

    let config = Arc::new(BotConfig {
        channel: cli.channel,
        super_admin: cli.super_admin,
    });
    info!("Бот запущен...");
    run_bot(bot, db, Arc::clone(&registry), catalog, config).await?;

    registry.stop().await;
    Ok(())
}

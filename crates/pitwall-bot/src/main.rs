use std::sync::Arc;
use std::time::Duration;

use tracing::info;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    // load config: explicit path via PITWALL_CONFIG > ./pitwall.toml
    let config_path = std::env::var("PITWALL_CONFIG").ok();
    let config = pitwall_core::config::PitwallConfig::load(config_path.as_deref())
        .map_err(|e| anyhow::anyhow!("config load failed: {e}"))?;
    let season = config.feed.season_or_current();

    // initialize SQLite database (single file for all subsystems)
    let db_path = &config.database.path;
    ensure_parent_dir(db_path);
    info!(path = %db_path, "opening SQLite database");

    let db = rusqlite::Connection::open(db_path)?;
    db.execute_batch("PRAGMA journal_mode=WAL; PRAGMA foreign_keys=ON;")?;
    pitwall_store::db::init_db(&db)?;
    drop(db);
    info!("database migrations complete");

    // build stores; each gets its own connection for thread safety
    let users = Arc::new(pitwall_store::UserStore::new(rusqlite::Connection::open(
        db_path,
    )?));
    let reminders = Arc::new(pitwall_store::ReminderStore::new(
        rusqlite::Connection::open(db_path)?,
    ));
    let cache = Arc::new(pitwall_store::CacheStore::new(rusqlite::Connection::open(
        db_path,
    )?));

    // feed: primary + fallback behind one trait, with shared usage counters
    let metrics = Arc::new(pitwall_data::FeedMetrics::new());
    let timeout = Duration::from_secs(config.feed.request_timeout_secs);
    let primary =
        pitwall_data::ErgastClient::new(&config.feed.primary_url, timeout, Arc::clone(&metrics))?;
    let secondary =
        pitwall_data::ErgastClient::new(&config.feed.fallback_url, timeout, Arc::clone(&metrics))?;
    let feed = Arc::new(pitwall_data::FallbackFeed::new(
        primary,
        secondary,
        Arc::clone(&metrics),
    ));

    let bot = teloxide::Bot::new(&config.telegram.bot_token);
    let notifier = Arc::new(pitwall_telegram::TelegramNotifier::new(bot.clone()));

    let (shutdown_tx, shutdown_rx) = tokio::sync::watch::channel(false);

    // reminder engine: due-window scan + delivery loop
    let engine = pitwall_scheduler::ReminderEngine::new(
        Arc::clone(&feed) as Arc<dyn pitwall_data::RaceFeed>,
        Arc::clone(&reminders),
        Arc::clone(&users),
        notifier,
        season,
        &config.scheduler,
    );
    let engine_task = tokio::spawn(engine.run(shutdown_rx.clone()));

    // cache refresh job: warms races/standings tables for offline fallbacks
    let refresh = pitwall_scheduler::RefreshJob::new(
        Arc::clone(&feed) as Arc<dyn pitwall_data::RaceFeed>,
        Arc::clone(&cache),
        season,
        Duration::from_secs(config.scheduler.refresh_secs),
    );
    let refresh_task = tokio::spawn(refresh.run(shutdown_rx));

    let ctx = Arc::new(pitwall_telegram::AppContext {
        feed,
        metrics,
        users,
        reminders,
        cache,
        selection: pitwall_telegram::selection::SelectionStore::default(),
        season,
    });
    let adapter = pitwall_telegram::TelegramAdapter::new(bot, ctx);

    info!(season, "pitwall is running");

    tokio::select! {
        _ = adapter.run() => {
            info!("dispatcher stopped");
        }
        _ = tokio::signal::ctrl_c() => {
            info!("shutdown signal received");
        }
    }

    // Let an in-flight tick finish its current deliver/delete pair.
    let _ = shutdown_tx.send(true);
    let _ = engine_task.await;
    let _ = refresh_task.await;
    info!("pitwall stopped");
    Ok(())
}

fn ensure_parent_dir(path: &str) {
    if let Some(parent) = std::path::Path::new(path).parent() {
        if !parent.as_os_str().is_empty() {
            let _ = std::fs::create_dir_all(parent);
        }
    }
}

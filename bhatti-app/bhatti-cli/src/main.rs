use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use tokio::sync::broadcast::error::RecvError;
use tracing::{info, warn};

use bhatti_client::{
    spawn_admin_watcher, spawn_customer_watcher, ApiClient, WatchConfig, WatchEvent,
};
use bhatti_core::repositories::MenuRepository;
use bhatti_core::services::MenuService;
use bhatti_infrastructure::{create_pool, run_migrations, MemoryStore, PgMenuRepository};
use bhatti_security::JwtService;
use bhatti_shared::config::{AppConfig, DatabaseDriver};

#[derive(Parser, Debug)]
#[command(name = "bhatti", version, about = "Urban Bhatti operations tool")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Insert the built-in menu, skipping dishes already stored
    SeedMenu,

    /// Mint a bearer token for local testing
    IssueToken {
        #[arg(long)]
        uid: String,

        #[arg(long)]
        email: Option<String>,

        /// Role claim, e.g. `admin`
        #[arg(long)]
        role: Option<String>,
    },

    /// Poll a running server and print order notifications until Ctrl-C
    Watch {
        #[arg(value_enum)]
        feed: Feed,

        #[arg(long, env = "BHATTI_BASE_URL", default_value = "http://127.0.0.1:8080")]
        base_url: String,

        #[arg(long, env = "BHATTI_TOKEN")]
        token: String,
    },
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum Feed {
    /// New orders across the shop (admin token)
    Admin,
    /// Status changes on the caller's own orders
    Orders,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    bhatti_shared::telemetry::init_cli_telemetry();

    let cli = Cli::parse();
    let config = AppConfig::load().context("failed to load configuration")?;

    match cli.command {
        Command::SeedMenu => seed_menu(&config).await,
        Command::IssueToken { uid, email, role } => {
            let jwt = JwtService::from_settings(&config.auth);
            let token = jwt.issue_token(&uid, email.as_deref(), role.as_deref())?;
            println!("{}", token);
            Ok(())
        }
        Command::Watch { feed, base_url, token } => watch(&config, feed, base_url, token).await,
    }
}

async fn seed_menu(config: &AppConfig) -> Result<()> {
    let repo: Arc<dyn MenuRepository> = match config.database.driver {
        DatabaseDriver::Postgres => {
            let pool = create_pool(&config.database)
                .await
                .context("failed to connect to database")?;
            run_migrations(&pool).await?;
            Arc::new(PgMenuRepository::new(pool))
        }
        DatabaseDriver::Memory => {
            warn!("Seeding the in-memory store; nothing will persist");
            Arc::new(MemoryStore::default())
        }
    };

    let report = MenuService::new(repo).seed_catalogue().await?;
    info!(
        "Seed finished: {} inserted, {} skipped",
        report.inserted.len(),
        report.skipped.len()
    );
    Ok(())
}

async fn watch(config: &AppConfig, feed: Feed, base_url: String, token: String) -> Result<()> {
    let client = ApiClient::new(base_url, Duration::from_secs(config.polling.request_timeout_secs))
        .with_token(token);
    let settings = WatchConfig::from_settings(&config.polling);

    let handle = match feed {
        Feed::Admin => spawn_admin_watcher(client, settings.without_delay()),
        Feed::Orders => spawn_customer_watcher(client, settings),
    };
    let mut events = handle.subscribe();
    info!("Watching {:?} feed, press Ctrl-C to stop", feed);

    loop {
        tokio::select! {
            _ = tokio::signal::ctrl_c() => break,
            received = events.recv() => match received {
                Ok(event) => print_event(&event),
                Err(RecvError::Lagged(n)) => warn!("Skipped {} notifications", n),
                Err(RecvError::Closed) => break,
            },
        }
    }

    handle.shutdown().await;
    Ok(())
}

fn print_event(event: &WatchEvent) {
    match event {
        WatchEvent::NewOrder { order_id, order_number } => {
            println!(
                "New order received {}",
                order_number.as_deref().unwrap_or(order_id)
            );
        }
        WatchEvent::StatusChanged { order_id, order_number, current, .. } => {
            println!(
                "Order {} is now {}",
                order_number.as_deref().unwrap_or(order_id),
                current
            );
        }
    }
    if let Ok(json) = serde_json::to_string(event) {
        tracing::debug!("{}", json);
    }
}

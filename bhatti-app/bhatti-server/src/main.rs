use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use tracing::{error, info, warn};

use bhatti_api::{build_router, AppState, Repositories};
use bhatti_core::events::EventBus;
use bhatti_core::notifier::OrderNotifier;
use bhatti_infrastructure::{
    create_pool, run_migrations, spawn_dispatcher, MemoryStore, PgMenuRepository,
    PgMetricsRepository, PgOfferRepository, PgOrderRepository, PgProfileRepository,
    ReceiptPrinter, WhatsappNotifier,
};
use bhatti_security::JwtService;
use bhatti_shared::config::{AppConfig, DatabaseDriver};

const EVENT_BUS_CAPACITY: usize = 256;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env
    dotenvy::dotenv().ok();

    // Load configuration
    let config = match AppConfig::load() {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to load configuration: {}", e);
            std::process::exit(1);
        }
    };

    // Initialize telemetry
    if let Err(e) = bhatti_shared::telemetry::init_telemetry(&config.app.name) {
        eprintln!("Failed to initialise telemetry: {}", e);
        std::process::exit(1);
    }

    info!("Urban Bhatti server starting ({})...", config.app.env);

    if !config.is_production() && config.auth.jwt_secret == "change-me" {
        warn!("Using the default JWT secret; set APP__AUTH__JWT_SECRET");
    }
    if config.auth.admin_uids.is_empty() {
        warn!("No admin uids configured; admin access relies on role claims");
    }

    let repos = match config.database.driver {
        DatabaseDriver::Postgres => {
            info!("Connecting to database...");
            let pool = create_pool(&config.database).await?;
            run_migrations(&pool).await?;
            info!("Database connection established.");
            Repositories {
                menu: Arc::new(PgMenuRepository::new(pool.clone())),
                orders: Arc::new(PgOrderRepository::new(pool.clone())),
                offers: Arc::new(PgOfferRepository::new(pool.clone())),
                profiles: Arc::new(PgProfileRepository::new(pool.clone())),
                metrics: Arc::new(PgMetricsRepository::new(pool)),
            }
        }
        DatabaseDriver::Memory => {
            warn!("Using the in-memory store; data is lost on restart");
            let store = Arc::new(MemoryStore::default());
            Repositories {
                menu: store.clone(),
                orders: store.clone(),
                offers: store.clone(),
                profiles: store.clone(),
                metrics: store,
            }
        }
    };

    // Order side channels
    let event_bus = Arc::new(EventBus::new(EVENT_BUS_CAPACITY));
    let printer = ReceiptPrinter::from_settings(&config.printer);
    if !printer.is_enabled() {
        info!("Receipt printer not configured, printing disabled");
    }
    let whatsapp = WhatsappNotifier::from_settings(&config.whatsapp);
    if !whatsapp.is_enabled() {
        info!("WhatsApp credentials not configured, alerts disabled");
    }
    let notifiers: Vec<Arc<dyn OrderNotifier>> = vec![Arc::new(printer), Arc::new(whatsapp)];
    let dispatcher = spawn_dispatcher(&event_bus, notifiers);

    // Create App State
    let jwt = Arc::new(JwtService::from_settings(&config.auth));
    let state = AppState::new(
        repos,
        event_bus,
        jwt,
        config.auth.admin_uids.clone(),
        config.limits.visit_per_second,
    );

    let app = build_router(state, Duration::from_secs(config.app.request_timeout_secs));

    // Bind address
    let host: std::net::IpAddr = config.app.host.parse()?;
    let addr = SocketAddr::from((host, config.app.port));
    info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    if let Err(e) = axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
    {
        error!("Server error: {}", e);
        return Err(e.into());
    }

    dispatcher.abort();
    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!("Failed to listen for shutdown signal: {}", e);
        return;
    }
    info!("Shutdown signal received");
}

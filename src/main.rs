use margincore::pricing::TariffStore;
use margincore::{api, config::Config, db::init_db, import, PriceSource, Repository};
use std::net::SocketAddr;
use std::sync::Arc;

#[tokio::main]
async fn main() {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing_subscriber::filter::LevelFilter::INFO.into()),
        )
        .init();

    // Load configuration
    let config = match Config::from_env() {
        Ok(cfg) => cfg,
        Err(e) => {
            eprintln!("Configuration error: {}", e);
            std::process::exit(1);
        }
    };

    let port = config.port;

    // Initialize database and dependencies
    let pool = match init_db(&config.database_path).await {
        Ok(p) => p,
        Err(e) => {
            eprintln!("Failed to initialize database: {}", e);
            std::process::exit(1);
        }
    };

    let repo = Arc::new(Repository::new(pool));

    // Seed the tariff vault before serving, so a configured seed file that
    // cannot be read is a startup failure rather than an empty catalog.
    if let Some(path) = &config.tariff_seed_file {
        if let Err(e) = import::seed_from_csv_path(&repo, path).await {
            eprintln!("Failed to seed tariffs: {}", e);
            std::process::exit(1);
        }
    }

    let price_source: Arc<dyn PriceSource> = Arc::new(TariffStore::new(repo.clone()));

    // Create router
    let app = api::create_router(api::AppState::new(repo, price_source, config));

    // Bind to address
    let addr = SocketAddr::from(([127, 0, 0, 1], port));
    let listener = match tokio::net::TcpListener::bind(&addr).await {
        Ok(l) => l,
        Err(e) => {
            eprintln!("Failed to bind to {}: {}", addr, e);
            std::process::exit(1);
        }
    };

    tracing::info!("Server listening on {}", addr);

    // Run server
    if let Err(e) = axum::serve(listener, app).await {
        eprintln!("Server error: {}", e);
        std::process::exit(1);
    }
}

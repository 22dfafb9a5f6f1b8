use actix_cors::Cors;
use actix_web::{middleware, web, App, HttpServer};
use kibi_match::config::Settings;
use kibi_match::routes::{self, AppState};
use kibi_match::services::{AssetCatalog, InMemoryCatalog};
use kibi_match::{RankingSelector, RecommendationService};
use std::sync::Arc;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

fn init_logging(level: &str, format: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_level(true);

    if format == "pretty" {
        subscriber.pretty().init();
    } else {
        subscriber.json().init();
    }
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // Load .env file if present
    dotenv::dotenv().ok();

    let settings = match Settings::load() {
        Ok(settings) => settings,
        Err(e) => {
            eprintln!("Configuration error: {}", e);
            return Err(std::io::Error::new(std::io::ErrorKind::InvalidInput, e));
        }
    };

    init_logging(&settings.logging.level, &settings.logging.format);

    info!("Starting KIBI Match recommendation service...");

    if settings.transport.uses_dev_secret() {
        warn!("Using the development token secret; set KIBI__TRANSPORT__SECRET in production");
    }

    // Load catalog snapshot
    let catalog: Arc<dyn AssetCatalog> = match &settings.catalog.path {
        Some(path) => match InMemoryCatalog::load(path).await {
            Ok(catalog) => Arc::new(catalog),
            Err(e) => {
                error!("Failed to load catalog from {}: {}", path.display(), e);
                return Err(std::io::Error::new(std::io::ErrorKind::InvalidData, e));
            }
        },
        None => {
            info!("No catalog path configured, using built-in catalog");
            Arc::new(InMemoryCatalog::seeded())
        }
    };

    let engine = settings.scoring.build();
    info!("Scoring engine initialized with weights: {:?}", engine.weights());

    let service = RecommendationService::new(
        settings.transport.build(),
        engine,
        RankingSelector::new(settings.scoring.min_score),
        settings.selection.caps(),
        catalog,
    );

    // Build application state
    let app_state = AppState {
        service: Arc::new(service),
        cookie_name: settings.transport.cookie_name.clone(),
        public_url: settings.server.public_url.clone(),
    };

    // Configure HTTP server
    let host = settings.server.host.clone();
    let port = settings.server.port;
    let workers = settings.server.workers.unwrap_or(4);

    info!("Starting HTTP server on {}:{}", host, port);

    HttpServer::new(move || {
        let cors = Cors::permissive();

        App::new()
            .app_data(web::Data::new(app_state.clone()))
            .wrap(cors)
            .wrap(middleware::Logger::default())
            .wrap(middleware::Compress::default())
            .configure(routes::configure_routes)
    })
    .workers(workers)
    .bind((host, port))?
    .run()
    .await
}

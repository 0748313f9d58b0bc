use crate::assets::StaticAssets;
use crate::cli::ServeArgs;
use crate::infra::{AppState, InMemoryApartmentRepository};
use crate::routes::with_listing_routes;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use std::sync::atomic::Ordering;
use std::sync::Arc;
use tracing::info;
use wws_listings::config::AppConfig;
use wws_listings::error::AppError;
use wws_listings::listings::ListingService;
use wws_listings::seed::SeedImporter;
use wws_listings::telemetry;

pub(crate) async fn run(mut args: ServeArgs) -> Result<(), AppError> {
    let mut config = AppConfig::load()?;

    if let Some(host) = args.host.take() {
        config.server.host = host;
    }
    if let Some(port) = args.port.take() {
        config.server.port = port;
    }

    telemetry::init(&config.telemetry, config.environment)?;

    let (prometheus_layer, prometheus_handle) = PrometheusMetricLayer::pair();
    let readiness_flag = Arc::new(std::sync::atomic::AtomicBool::new(false));
    let app_state = AppState {
        readiness: readiness_flag.clone(),
        metrics: Arc::new(prometheus_handle),
    };

    let repository = Arc::new(InMemoryApartmentRepository::default());
    let listing_service = Arc::new(ListingService::new(repository));

    if let Some(seed_path) = args.seed.take().or_else(|| config.listings.seed_path.clone()) {
        let drafts = SeedImporter::from_path(&seed_path)?;
        let summary = listing_service.seed(drafts)?;
        info!(
            path = %seed_path.display(),
            inserted = summary.inserted.len(),
            "catalog seeded"
        );
    }

    let assets = StaticAssets::new(config.listings.public_dir.clone());
    let app = with_listing_routes(listing_service, assets)
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(?config.environment, %addr, "listing service ready");

    axum::serve(listener, app).await?;
    Ok(())
}

use crate::cli::ServeArgs;
use crate::demo::seed_catalog;
use crate::infra::{AppState, InMemoryListingStore};
use crate::routes::with_catalog_routes;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use propmarket::config::AppConfig;
use propmarket::error::AppError;
use propmarket::listings::ListingService;
use propmarket::telemetry;
use std::sync::atomic::Ordering;
use std::sync::Arc;
use tracing::info;

pub(crate) async fn run(mut args: ServeArgs) -> Result<(), AppError> {
    let mut config = AppConfig::load()?;

    if let Some(host) = args.host.take() {
        config.server.host = host;
    }
    if let Some(port) = args.port.take() {
        config.server.port = port;
    }

    telemetry::init(&config.telemetry)?;

    let (prometheus_layer, prometheus_handle) = PrometheusMetricLayer::pair();
    let readiness_flag = Arc::new(std::sync::atomic::AtomicBool::new(false));
    let app_state = AppState {
        readiness: readiness_flag.clone(),
        metrics: Arc::new(prometheus_handle),
    };

    let store = Arc::new(InMemoryListingStore::default());
    let catalog = Arc::new(ListingService::new(store));

    if args.seed {
        let seeded = seed_catalog(&catalog)?;
        info!(seeded, "loaded demo listings into the catalog");
    }

    let app = with_catalog_routes(catalog)
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(?config.environment, %addr, "property marketplace catalog ready");

    axum::serve(listener, app).await?;
    Ok(())
}

use mrt_server::config::ServerConfig;
use mrt_server::data::SnapshotSource;
use mrt_server::web::{AppState, create_router};
use tracing::info;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() {
    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "mrt_server=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = ServerConfig::from_env();

    // Load the snapshot once up front (fail fast if it is missing or invalid)
    let snapshots = SnapshotSource::new(&config.data_path, &config.cache);
    let snapshot = snapshots
        .get()
        .await
        .expect("Failed to load network snapshot");
    info!(
        path = %snapshots.path().display(),
        stations = snapshot.network.stations().count(),
        "Network snapshot ready"
    );

    let state = AppState::new(snapshots, config.search.clone());
    let app = create_router(state);

    info!(addr = %config.listen_addr, "MRT route planner listening");
    info!("  GET  /health      - Health check");
    info!("  GET  /api/search  - Find routes (from, to, time, order_by)");

    let listener = tokio::net::TcpListener::bind(config.listen_addr)
        .await
        .expect("Failed to bind listen address");
    axum::serve(listener, app).await.expect("Server error");
}

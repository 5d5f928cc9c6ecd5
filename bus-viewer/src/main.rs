use std::process::ExitCode;

use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use bus_viewer::config::ViewerConfig;
use bus_viewer::dataset::DatasetLoader;
use bus_viewer::web::{AppState, create_router};

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("bus_viewer=info,tower_http=info")),
        )
        .init();

    let config = ViewerConfig::from_env();

    // Load routes once; failures fall back to the embedded dataset
    let loader = match DatasetLoader::new(config.dataset.clone(), config.fetch_timeout) {
        Ok(loader) => loader,
        Err(e) => {
            error!("failed to create dataset loader: {e}");
            return ExitCode::FAILURE;
        }
    };
    info!(source = %loader.source(), "loading dataset");
    let dataset = loader.load().await;
    info!(
        routes = dataset.routes.len(),
        origin = %dataset.origin,
        "dataset ready"
    );

    let state = AppState::new(dataset);
    let app = create_router(state, &config.static_dir);

    let listener = match tokio::net::TcpListener::bind(config.addr).await {
        Ok(listener) => listener,
        Err(e) => {
            error!(addr = %config.addr, "failed to bind: {e}");
            return ExitCode::FAILURE;
        }
    };

    info!("Bus route viewer listening on http://{}", config.addr);
    info!("Open http://{} in your browser for the viewer.", config.addr);

    if let Err(e) = axum::serve(listener, app).await {
        error!("server error: {e}");
        return ExitCode::FAILURE;
    }

    ExitCode::SUCCESS
}

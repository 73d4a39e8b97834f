//! brew-journal server: reads settings, connects the table backend, serves the API.

use axum::{extract::Request, ServiceExt};
use brew_journal::{app_service, connect, AppState, Settings};
use tokio::net::TcpListener;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let settings = Settings::from_env()?;
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(settings.log_directive())),
        )
        .init();

    let backend = connect(&settings.backend).await?;
    let app = app_service(AppState::new(backend), &settings);

    let listener = TcpListener::bind(("0.0.0.0", settings.port)).await?;
    let port = listener.local_addr()?.port();
    tracing::info!(debug = settings.debug, "brew-journal listening on http://0.0.0.0:{}", port);
    axum::serve(listener, ServiceExt::<Request>::into_make_service(app)).await?;
    Ok(())
}

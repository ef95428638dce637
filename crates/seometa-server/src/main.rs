mod api;
mod middleware;

use std::sync::Arc;

use seometa_catalog::CatalogClient;
use seometa_generator::SeoGenerator;
use tracing_subscriber::EnvFilter;

use crate::api::{build_app, AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let config = seometa_core::load_app_config()?;
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    if config.catalog_api_token.is_none() {
        tracing::error!("CATALOG_API_TOKEN is not set; catalog calls will be rejected upstream");
    }

    let generator = SeoGenerator::from_config(&config)?;
    if generator.ai_enabled() {
        tracing::info!(model = %config.openai_model, "generation-service client initialized");
    } else {
        tracing::warn!(
            "OPENAI_API_KEY is not set; AI calls will be skipped and the fallback generator used"
        );
    }

    let catalog = CatalogClient::from_config(&config)?;
    let app = build_app(AppState {
        generator: Arc::new(generator),
        catalog: Arc::new(catalog),
    });

    let listener = tokio::net::TcpListener::bind(config.bind_addr).await?;
    tracing::info!(addr = %config.bind_addr, env = %config.env, "seometa-server listening");
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("failed to listen for ctrl-c");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }

    tracing::info!("received shutdown signal, starting graceful shutdown");
}

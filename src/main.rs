use anyhow::Context;
use courtside::api::{router, AppState};
use courtside::config::AppConfig;
use courtside::metrics::Metrics;
use courtside::service::StatsService;
use courtside::upstream;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    init_tracing();

    let cfg = AppConfig::from_env()?;

    let nba = upstream::build_api(&cfg.upstream)?;
    let service = StatsService::new(nba);
    let metrics = Metrics::new()?;

    let app = router(AppState { service, metrics }, &cfg)?;

    let listen_addr = cfg.listen_addr;
    let listener = tokio::net::TcpListener::bind(listen_addr).await?;

    tracing::info!(%listen_addr, provider = ?cfg.upstream.provider, "starting courtside api");

    let (shutdown_tx, shutdown_rx) = tokio::sync::oneshot::channel::<()>();
    let mut server = tokio::spawn(async move {
        axum::serve(listener, app)
            .with_graceful_shutdown(async {
                shutdown_rx.await.ok();
            })
            .await
    });

    tokio::select! {
        outcome = &mut server => {
            outcome.context("server task panicked")??;
            anyhow::bail!("server exited unexpectedly");
        }
        _ = shutdown_signal() => {
            let _ = shutdown_tx.send(());
        }
    }

    // give in-flight requests the configured grace period to drain
    match tokio::time::timeout(cfg.shutdown_timeout, &mut server).await {
        Ok(outcome) => {
            outcome.context("server task panicked")??;
            tracing::info!("courtside exited cleanly");
        }
        Err(_) => {
            tracing::warn!("graceful shutdown timed out, forcing exit");
            server.abort();
        }
    }

    Ok(())
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(error) = tokio::signal::ctrl_c().await {
            tracing::warn!(%error, "failed to install Ctrl+C handler");
        }
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{signal, SignalKind};
        match signal(SignalKind::terminate()) {
            Ok(mut term_signal) => term_signal.recv().await,
            Err(error) => {
                tracing::warn!(%error, "failed to install SIGTERM handler");
                None
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("shutdown signal received");
}

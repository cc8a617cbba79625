use anyhow::{Context, Result};
use clap::Parser;
use std::sync::Arc;

use authserver::config::{Cli, Command, Config, RunArgs};
use authserver::{create_router, logging, AppState};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    match cli.command {
        Command::Run(args) => run(args).await,
    }
}

async fn run(args: RunArgs) -> Result<()> {
    logging::init_tracing(args.log_format, args.log_file.as_deref())?;

    let config = Config::from_args(&args)?;
    let bind_address = config.bind_address;

    let state = Arc::new(AppState::new(&config).await?);
    let mounted: Vec<&str> = state.providers.kinds().map(|k| k.as_str()).collect();
    tracing::info!(
        providers = ?mounted,
        registry = %config.registry,
        issuer = %config.issuer,
        "Starting authserver on {}",
        bind_address
    );

    let app = create_router(state);

    let listener = tokio::net::TcpListener::bind(bind_address)
        .await
        .with_context(|| format!("cannot bind {}", bind_address))?;
    tracing::info!("Server listening on {}", bind_address);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "failed to install signal handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Graceful shutdown initiated");
}

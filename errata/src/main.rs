#![allow(clippy::must_use_candidate, clippy::missing_errors_doc)]

mod args;

use std::net::SocketAddr;
use std::path::Path;

use anyhow::Context;
use args::{Args, Command};
use clap::Parser;
use errata_config::Config;
use errata_dispatch::{Dispatcher, ErrorDescriptor, Resolution};
use errata_server::Server;
use tokio_util::sync::CancellationToken;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let config = Config::load(&args.config)?;

    let _telemetry_guard = errata_telemetry::init(config.telemetry.as_ref(), &args.log)?;

    match args.command {
        Command::Serve { listen } => serve(&args.config, &config, listen).await,
        Command::Check => check(&config),
    }
}

async fn serve(config_path: &Path, config: &Config, listen: Option<SocketAddr>) -> anyhow::Result<()> {
    tracing::info!(config_path = %config_path.display(), errors = config.errors.len(), "starting errata");

    let mut server = Server::new(config)?;
    if let Some(listen) = listen {
        server = server.with_listen_address(listen);
    }

    let shutdown = CancellationToken::new();
    let cancel = shutdown.clone();

    tokio::spawn(async move {
        shutdown_signal().await;
        cancel.cancel();
    });

    server.serve(shutdown).await?;

    tracing::info!("errata stopped");
    Ok(())
}

/// Print each configured error with the exact body it renders to
///
/// Also confirms that every sentinel resolves to its own template.
fn check(config: &Config) -> anyhow::Result<()> {
    let dispatcher = Dispatcher::new(errata_server::build_registry(config).context("invalid error table")?);
    let registry = dispatcher.registry();

    for (sentinel, descriptor) in registry.iter() {
        let resolution = dispatcher.resolve(sentinel);
        if resolution != Resolution::Mapped(descriptor) {
            anyhow::bail!("error '{sentinel}' resolves as {}", resolution.outcome());
        }

        println!("{sentinel}\t{}\t{}", descriptor.status().as_u16(), payload(descriptor));
    }

    println!("(unmapped)\t500\t{}", payload(registry.generic()));
    println!("{} error(s) ok", registry.len());
    Ok(())
}

fn payload(descriptor: &ErrorDescriptor) -> String {
    descriptor
        .serialized()
        .map(|bytes| String::from_utf8_lossy(bytes).into_owned())
        .unwrap_or_default()
}

/// Wait for a shutdown signal (`SIGINT` or `SIGTERM`)
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "failed to listen for Ctrl+C");
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
                tracing::error!(error = %e, "failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {}
        () = terminate => {}
    }

    tracing::info!("shutdown signal received");
}

// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

use anyhow::{Context as _, Result};
use axum::{http::StatusCode, routing::get, Router};
use clap::Parser;
use kube::Client;
use pod_dns_source::{
    config::{Config, OutputFormat},
    constants::TOKIO_WORKER_THREADS,
    endpoint::Endpoint,
    metrics::gather_metrics,
    pod_source::PodSource,
};
use std::net::SocketAddr;
use tracing::{debug, error, info, warn};

fn main() -> Result<()> {
    let config = Config::parse();

    // Build Tokio runtime with custom thread names
    let runtime = tokio::runtime::Builder::new_multi_thread()
        .worker_threads(TOKIO_WORKER_THREADS)
        .thread_name("pod-dns-source")
        .enable_all()
        .build()?;

    runtime.block_on(async_main(config))
}

async fn async_main(config: Config) -> Result<()> {
    // Respects RUST_LOG (default: info) and RUST_LOG_FORMAT (text or json)
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));

    let log_format = std::env::var("RUST_LOG_FORMAT").unwrap_or_else(|_| "text".to_string());

    match log_format.to_lowercase().as_str() {
        "json" => {
            tracing_subscriber::fmt()
                .with_env_filter(env_filter)
                .with_file(true)
                .with_line_number(true)
                .with_thread_names(true)
                .with_target(false)
                .json()
                .init();
        }
        _ => {
            tracing_subscriber::fmt()
                .with_env_filter(env_filter)
                .with_file(true)
                .with_line_number(true)
                .with_thread_names(true)
                .with_target(false)
                .with_ansi(true)
                .compact()
                .init();
        }
    }

    info!(
        namespace = %config.namespace,
        compatibility = %config.compatibility,
        "Starting pod DNS source"
    );

    debug!("Initializing Kubernetes client");
    let client = Client::try_default()
        .await
        .context("failed to create Kubernetes client")?;

    let source = PodSource::start(client, &config).await?;

    if config.once {
        let endpoints = source.endpoints()?;
        println!("{}", render(&endpoints, config.output)?);
        return Ok(());
    }

    tokio::select! {
        result = run_metrics_server(config.metrics_bind_address) => {
            error!("CRITICAL: metrics server exited unexpectedly: {:?}", result);
            result?;
            anyhow::bail!("metrics server exited unexpectedly without error")
        }
        () = run_refresh_loop(&source, &config) => {
            anyhow::bail!("refresh loop exited unexpectedly")
        }
        result = shutdown_signal() => {
            result?;
            info!("Received shutdown signal, exiting");
            Ok(())
        }
    }
}

/// Wait for SIGINT, or SIGTERM on Unix.
async fn shutdown_signal() -> Result<()> {
    #[cfg(unix)]
    {
        use tokio::signal::unix::{signal, SignalKind};

        let mut sigterm = signal(SignalKind::terminate())?;
        tokio::select! {
            result = tokio::signal::ctrl_c() => result?,
            _ = sigterm.recv() => {}
        }
    }

    #[cfg(not(unix))]
    tokio::signal::ctrl_c().await?;

    Ok(())
}

/// Resolve endpoints every interval until the process stops.
///
/// A failed pass is logged and retried on the next tick.
async fn run_refresh_loop(source: &PodSource, config: &Config) {
    let mut interval = tokio::time::interval(config.interval());
    interval.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);

    loop {
        interval.tick().await;

        match source.endpoints() {
            Ok(endpoints) => {
                for endpoint in &endpoints {
                    debug!(%endpoint, "Desired endpoint");
                }
                info!(endpoints = endpoints.len(), "Resolution pass complete");
            }
            Err(e) => {
                warn!(error = %e, "Resolution pass failed, retrying next interval");
            }
        }
    }
}

/// Serve `/metrics` and `/healthz`.
async fn run_metrics_server(addr: SocketAddr) -> Result<()> {
    let app = Router::new()
        .route("/metrics", get(metrics_handler))
        .route("/healthz", get(|| async { "ok" }));

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind metrics server to {addr}"))?;
    info!(%addr, "Metrics server listening");

    axum::serve(listener, app).await?;
    Ok(())
}

async fn metrics_handler() -> Result<String, (StatusCode, String)> {
    gather_metrics().map_err(|e| (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()))
}

fn render(endpoints: &[Endpoint], format: OutputFormat) -> Result<String> {
    Ok(match format {
        OutputFormat::Json => serde_json::to_string_pretty(endpoints)?,
        OutputFormat::Yaml => serde_yaml::to_string(endpoints)?,
    })
}

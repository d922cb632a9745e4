use anyhow::{Context, Result};
use std::io::ErrorKind;
use tokio::{net::TcpListener, task::JoinSet};
use tracing_subscriber::EnvFilter;

mod config;
mod errors;
mod handlers;
mod models;
mod routes;
mod services;

use config::AppConfig;
use services::{log_hub::LogHub, page_service::PageService, udp_transport::UdpTransport};

#[tokio::main]
async fn main() -> Result<()> {
    // --- Logging setup ---
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    // --- Parse config ---
    let cfg = AppConfig::from_env_and_args()?;

    tracing::info!("Starting nmea-bridge-web with config: {:?}", cfg);

    // --- Assemble pages and shared log hub ---
    let pages = PageService::new(&cfg);
    let (hub, outbound) = LogHub::new();

    let mut tasks = JoinSet::new();

    // --- UDP transport ---
    let transport = UdpTransport::bind(&cfg.udp_addr(), cfg.udp_target.as_deref())
        .await
        .context("starting UDP transport")?;
    tracing::info!(
        "UDP transport on {} forwarding to {}",
        transport.local_addr()?,
        cfg.udp_target.as_deref().unwrap_or("nowhere")
    );
    let transport_hub = hub.clone();
    tasks.spawn(async move {
        transport
            .run(transport_hub, outbound)
            .await
            .context("UDP transport failed")
    });

    // --- Websocket log stream ---
    if cfg.websocket_log {
        let listener = bind_listener(&cfg, cfg.websocket_port, "--websocket-port").await?;
        tracing::info!("Log stream listening on ws://{}", listener.local_addr()?);
        let app = routes::routes::websocket_routes(hub.clone());
        tasks.spawn(async move {
            axum::serve(listener, app)
                .await
                .context("websocket server failed")
        });
    } else {
        tracing::info!("Websocket log disabled");
    }

    // --- Web interface ---
    let listener = bind_listener(&cfg, cfg.port, "--port").await?;
    tracing::info!("Server listening on http://{}", listener.local_addr()?);
    let app = routes::routes::routes(pages);
    tasks.spawn(async move { axum::serve(listener, app).await.context("web server failed") });

    // Every task runs forever; the first one to return ends the process.
    if let Some(result) = tasks.join_next().await {
        result.context("server task panicked")??;
    }

    Ok(())
}

/// Bind `cfg.host:port`, falling back to loopback when binding a wildcard
/// address is not permitted. `flag` names the option that sets `port`.
async fn bind_listener(cfg: &AppConfig, port: u16, flag: &str) -> Result<TcpListener> {
    let addr = format!("{}:{}", cfg.host, port);
    let result = match TcpListener::bind(&addr).await {
        Ok(listener) => Ok(listener),
        Err(err)
            if err.kind() == ErrorKind::PermissionDenied
                && matches!(cfg.host.as_str(), "0.0.0.0" | "::") =>
        {
            let fallback_addr = format!("127.0.0.1:{}", port);
            tracing::warn!(
                "Permission denied binding to {} ({}). Falling back to {}",
                addr,
                err,
                fallback_addr
            );
            TcpListener::bind(&fallback_addr)
                .await
                .with_context(|| format!("binding {}", fallback_addr))
        }
        Err(err) => Err(err).with_context(|| format!("binding {}", addr)),
    };
    result.map_err(|err| match privileged_port_hint(&err, port, flag) {
        Some(hint) => err.context(hint),
        None => err,
    })
}

/// Explain a permission error on a port below 1024.
fn privileged_port_hint(err: &anyhow::Error, port: u16, flag: &str) -> Option<String> {
    let denied = err
        .downcast_ref::<std::io::Error>()
        .is_some_and(|io| io.kind() == ErrorKind::PermissionDenied);
    (denied && port < 1024).then(|| {
        format!(
            "port {} is privileged; run with elevated rights or choose a port above 1023 with {}",
            port, flag
        )
    })
}

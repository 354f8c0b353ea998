//! `roibot serve` command - run the HTTP chat server

use std::sync::Arc;

use tokio::net::TcpListener;

use crate::commands::{build_assistant, load_kb};
use crate::server;
use roibot_core::config::ServerConfig;
use roibot_core::error::{Result, RoiError};

/// Execute the serve command
pub fn execute(config: &ServerConfig) -> Result<()> {
    let kb = Arc::new(load_kb(config));
    let assistant = build_assistant(config, kb);
    let app = server::build_router(Arc::new(assistant), &config.allowed_origins);

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .map_err(|e| RoiError::failed("start runtime", e))?;

    runtime.block_on(async move {
        let listener = bind_listener(&config.host, config.port).await?;
        let addr = listener
            .local_addr()
            .map_err(|e| RoiError::failed("read listen address", e))?;

        tracing::info!(
            %addr,
            allow_external = config.allow_external,
            fallback = config.fallback.is_configured(),
            "server_listening"
        );

        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown_signal())
            .await
            .map_err(|e| RoiError::failed("serve", e))
    })
}

/// Bind `host:port`; hostnames and bare IPv6 addresses are resolved
pub async fn bind_listener(host: &str, port: u16) -> Result<TcpListener> {
    TcpListener::bind((host, port))
        .await
        .map_err(|e| RoiError::failed(&format!("bind {}:{}", host, port), e))
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    tracing::info!("shutdown_requested");
}

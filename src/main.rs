use std::{net::SocketAddr, sync::Arc, time::Duration};

use anyhow::Context;
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use a2a_bridge::{
    agent::{EchoAgent, InMemoryRegistry},
    server,
    service::{BridgeConfig, TaskBridgeBuilder},
};

/// Serve the A2A task endpoint for the registered agents
#[derive(Parser, Debug)]
#[command(name = "a2a-bridge", version, about)]
struct Cli {
    /// Address to listen on
    #[arg(long, env = "A2A_BRIDGE_LISTEN", default_value = "127.0.0.1:4111")]
    listen: SocketAddr,

    /// Seconds to wait for an agent reply, 0 waits indefinitely
    #[arg(long, env = "A2A_BRIDGE_INVOCATION_TIMEOUT_SECS", default_value_t = 30)]
    invocation_timeout_secs: u64,

    /// Id the echo agent is registered under
    #[arg(long, env = "A2A_BRIDGE_AGENT_ID", default_value = "echoAgent")]
    agent_id: String,
}

impl Cli {
    fn bridge_config(&self) -> BridgeConfig {
        match self.invocation_timeout_secs {
            0 => BridgeConfig::new().without_invocation_timeout(),
            secs => BridgeConfig::new().with_invocation_timeout(Duration::from_secs(secs)),
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "a2a_bridge=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();

    let registry =
        InMemoryRegistry::new().with_agent(cli.agent_id.as_str(), Arc::new(EchoAgent::new()));
    tracing::info!(agents = ?registry.agent_ids(), "registered agents");

    let bridge = TaskBridgeBuilder::new(Arc::new(registry))
        .with_config(cli.bridge_config())
        .build();

    let listener = tokio::net::TcpListener::bind(cli.listen)
        .await
        .with_context(|| format!("failed to bind {}", cli.listen))?;
    tracing::info!(addr = %cli.listen, "A2A bridge listening");

    axum::serve(listener, server::router(bridge))
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    tracing::info!("shutting down");
}

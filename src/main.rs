use clap::Parser;
use conductor::adapters::health_handler::HealthHandler;
use conductor::cli::Cli;
use conductor::config::Settings;
use std::net::SocketAddr;
use std::sync::Arc;
use tracing::info;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    // Load configuration
    let cli = Cli::parse();
    let settings = Settings::new_with_cli(&cli)?;
    let host = settings.server.host.clone();
    let port = settings.server.port;

    info!(
        agents = settings.agents.len(),
        tools = settings.tools.len(),
        "Starting Conductor on {}:{}",
        host,
        port
    );

    let health_handler = Arc::new(HealthHandler::new(settings.agents.len()));
    let state = conductor::build_state(&settings)?;

    let app = conductor::create_app(state, health_handler);

    let addr: SocketAddr = format!("{}:{}", host, port).parse()?;
    info!("Listening on {}", addr);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

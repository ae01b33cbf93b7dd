use std::sync::Arc;

use load_generator::config::GeneratorConfig;
use load_generator::stats;
use load_generator::supervisor::GeneratorSupervisor;
use load_generator::transport::StdoutSink;

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    let config = GeneratorConfig::from_env()?;
    tracing::info!(
        symbols = ?config.symbols,
        total_rate = config.total_rate,
        "Starting synthetic trade load generator"
    );

    let sink = Arc::new(StdoutSink::new());
    let supervisor = GeneratorSupervisor::start(config, sink)?;
    let reporter = stats::spawn_reporter(
        supervisor.total_sent_counter(),
        stats::DEFAULT_INTERVAL,
        supervisor.cancellation_token(),
    );

    tokio::signal::ctrl_c().await?;
    tracing::info!("Shutdown signal received");

    supervisor.stop().await;
    let _ = reporter.await;

    Ok(())
}

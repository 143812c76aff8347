//! Command-line interface for sensor-stream-producer
//!
//! # Usage Examples
//!
//! ```bash
//! # Publish to the "TestStream" Kinesis stream every 2 seconds
//! sensor-stream-producer
//!
//! # Custom stream, faster rate, stop after 50 records
//! sensor-stream-producer --stream-name sensors --interval 250ms --max-records 50
//!
//! # Dry run with debug logging
//! RUST_LOG=debug sensor-stream-producer --dry-run
//! ```

use anyhow::Context;
use clap::Parser;
use sensor_generator::{RecordGenerator, DEV_TOPOLOGY};
use sensor_stream_producer::{
    shutdown_on_ctrl_c, KinesisOpts, PublishOpts, Publisher, PublisherConfig,
};
use stream_sink::{DiscardSink, KinesisOptions, KinesisSink, StreamSink};
use tokio::sync::broadcast;

#[derive(Parser)]
#[command(name = "sensor-stream-producer")]
#[command(about = "Publish synthetic sensor records to a Kinesis stream")]
#[command(long_about = None)]
struct Cli {
    #[command(flatten)]
    publish: PublishOpts,

    #[command(flatten)]
    kinesis: KinesisOpts,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    if let Err(e) = run().await {
        eprintln!("Error: {e:#}");
        std::process::exit(1);
    }
    Ok(())
}

async fn run() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    let cli = Cli::parse();

    let generator = RecordGenerator::new(&DEV_TOPOLOGY, cli.publish.seed)
        .context("Failed to initialize record generator")?;
    let config = PublisherConfig::from(&cli.publish);
    let echo = !cli.publish.quiet;
    let shutdown = shutdown_on_ctrl_c();

    if cli.kinesis.dry_run {
        tracing::info!("Dry run: records will be printed but not sent");
        run_publisher(DiscardSink::new(), generator, config, echo, shutdown).await
    } else {
        let options = KinesisOptions::from(&cli.kinesis);
        let sink = KinesisSink::new(&options).await;
        run_publisher(sink, generator, config, echo, shutdown).await
    }
}

async fn run_publisher<S: StreamSink>(
    sink: S,
    generator: RecordGenerator,
    config: PublisherConfig,
    echo: bool,
    shutdown: broadcast::Receiver<()>,
) -> anyhow::Result<()> {
    let mut publisher = Publisher::new(sink, generator, config).with_echo(echo);
    publisher.run(shutdown).await?;
    Ok(())
}

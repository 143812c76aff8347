//! The publish loop.
//!
//! Each tick waits a fixed interval, builds one fresh record, prints it,
//! encodes it and submits it to the sink under the configured partition
//! key. The wait is uncompensated: time spent generating and submitting
//! adds on top of the interval.

use anyhow::Context;
use sensor_generator::{encode_record, to_pretty_json, RecordGenerator};
use std::time::{Duration, Instant};
use stream_sink::{SinkError, StreamSink, SubmitReceipt};
use tokio::sync::broadcast;
use tracing::{debug, info, warn};

/// Upper bound for the retry backoff.
pub const MAX_RETRY_BACKOFF: Duration = Duration::from_secs(30);

/// What happens when a submit fails or times out.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailurePolicy {
    /// Propagate the error and stop.
    Abort,
    /// Log, count, drop the record and carry on.
    Skip,
    /// Resubmit the same payload up to `max_retries` times with doubling
    /// backoff, then propagate the last error.
    Retry { max_retries: u32, backoff: Duration },
}

#[derive(Debug, Clone)]
pub struct PublisherConfig {
    pub stream_name: String,
    pub partition_key: String,
    pub interval: Duration,
    /// `None` runs until shutdown or an escalated error.
    pub max_records: Option<u64>,
    pub on_error: FailurePolicy,
    pub send_timeout: Duration,
}

/// How a single tick ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TickOutcome {
    /// The sink acknowledged the record.
    Published(SubmitReceipt),
    /// The submit failed and the record was dropped under [`FailurePolicy::Skip`].
    Skipped,
    /// Shutdown fired while the record was being submitted or between retries.
    Interrupted,
}

/// Metrics from a publish run.
#[derive(Debug, Clone, Default)]
pub struct PublishMetrics {
    /// Records generated, one per tick.
    pub records_generated: u64,
    /// Records the sink acknowledged.
    pub records_published: u64,
    /// Records that were never acknowledged.
    pub failures: u64,
    /// Extra submit attempts made by the retry policy.
    pub retries: u64,
    /// Total time taken.
    pub total_duration: Duration,
}

impl PublishMetrics {
    /// Calculate published records per second.
    pub fn records_per_second(&self) -> f64 {
        if self.total_duration.as_secs_f64() > 0.0 {
            self.records_published as f64 / self.total_duration.as_secs_f64()
        } else {
            0.0
        }
    }
}

/// Generates records and hands them to a [`StreamSink`], one per tick.
pub struct Publisher<S: StreamSink> {
    sink: S,
    generator: RecordGenerator,
    config: PublisherConfig,
    metrics: PublishMetrics,
    echo: bool,
}

impl<S: StreamSink> Publisher<S> {
    pub fn new(sink: S, generator: RecordGenerator, config: PublisherConfig) -> Self {
        Self {
            sink,
            generator,
            config,
            metrics: PublishMetrics::default(),
            echo: true,
        }
    }

    /// Print every record to stdout before it is submitted (on by default).
    pub fn with_echo(mut self, echo: bool) -> Self {
        self.echo = echo;
        self
    }

    pub fn metrics(&self) -> &PublishMetrics {
        &self.metrics
    }

    /// Run the loop until `shutdown` fires, `max_records` ticks have run,
    /// or the failure policy escalates an error.
    ///
    /// Shutdown is honored during the wait, during a submit and during a
    /// retry backoff. The record in flight is abandoned and the metrics
    /// gathered so far are returned.
    pub async fn run(
        &mut self,
        mut shutdown: broadcast::Receiver<()>,
    ) -> anyhow::Result<PublishMetrics> {
        let start = Instant::now();

        info!(
            stream = %self.config.stream_name,
            partition_key = %self.config.partition_key,
            interval = ?self.config.interval,
            max_records = ?self.config.max_records,
            on_error = ?self.config.on_error,
            "Starting publisher"
        );

        loop {
            if let Some(max) = self.config.max_records {
                if self.metrics.records_generated >= max {
                    info!("Reached {max} records, stopping publisher");
                    break;
                }
            }

            tokio::select! {
                _ = shutdown.recv() => {
                    info!("Shutdown requested, stopping publisher");
                    break;
                }
                _ = tokio::time::sleep(self.config.interval) => {}
            }

            match self.publish_once(&mut shutdown).await {
                Ok(TickOutcome::Interrupted) => {
                    info!("Shutdown requested during submit, abandoning in-flight record");
                    break;
                }
                Ok(_) => {}
                Err(e) => {
                    self.metrics.total_duration = start.elapsed();
                    warn!(
                        "Publisher stopped after {} records ({} failed, {} retries)",
                        self.metrics.records_published,
                        self.metrics.failures,
                        self.metrics.retries
                    );
                    return Err(e);
                }
            }
        }

        self.metrics.total_duration = start.elapsed();
        info!(
            "Published {} records ({} failed, {} retries) in {:?} ({:.2} records/sec)",
            self.metrics.records_published,
            self.metrics.failures,
            self.metrics.retries,
            self.metrics.total_duration,
            self.metrics.records_per_second()
        );

        Ok(self.metrics.clone())
    }

    /// Generate, print, encode and submit a single record.
    ///
    /// The submit and every retry backoff are raced against `shutdown`.
    pub async fn publish_once(
        &mut self,
        shutdown: &mut broadcast::Receiver<()>,
    ) -> anyhow::Result<TickOutcome> {
        let record = self
            .generator
            .next_record()
            .context("Failed to generate record")?;
        self.metrics.records_generated += 1;

        if self.echo {
            println!(
                "{}",
                to_pretty_json(&record).context("Failed to format record")?
            );
        }
        debug!(
            meta_id = record.meta_id,
            node_id = %record.node_id,
            sensor = %record.sensor,
            datetime = %record.datetime,
            "Generated record"
        );

        let payload = encode_record(&record).context("Failed to encode record")?;

        match self.submit_with_policy(&payload, shutdown).await {
            Ok(Some(receipt)) => {
                self.metrics.records_published += 1;
                debug!(
                    shard_id = %receipt.shard_id,
                    sequence_number = %receipt.sequence_number,
                    "Record published"
                );
                Ok(TickOutcome::Published(receipt))
            }
            Ok(None) => Ok(TickOutcome::Interrupted),
            Err(e) => {
                self.metrics.failures += 1;
                if self.config.on_error == FailurePolicy::Skip {
                    warn!(meta_id = record.meta_id, "Skipping record: {e}");
                    return Ok(TickOutcome::Skipped);
                }
                Err(anyhow::Error::new(e).context(format!(
                    "Failed to publish record to stream '{}'",
                    self.config.stream_name
                )))
            }
        }
    }

    /// `Ok(None)` means shutdown fired before the record was acknowledged.
    async fn submit_with_policy(
        &mut self,
        payload: &[u8],
        shutdown: &mut broadcast::Receiver<()>,
    ) -> Result<Option<SubmitReceipt>, SinkError> {
        let (max_retries, mut backoff) = match self.config.on_error {
            FailurePolicy::Retry {
                max_retries,
                backoff,
            } => (max_retries, backoff),
            FailurePolicy::Abort | FailurePolicy::Skip => (0, Duration::ZERO),
        };

        let mut attempt = 0;
        loop {
            let result = tokio::select! {
                _ = shutdown.recv() => return Ok(None),
                result = self.submit(payload) => result,
            };

            match result {
                Ok(receipt) => return Ok(Some(receipt)),
                Err(e) if attempt < max_retries => {
                    attempt += 1;
                    self.metrics.retries += 1;
                    warn!(
                        "Submit failed (attempt {attempt}/{}), retrying in {backoff:?}: {e}",
                        max_retries + 1
                    );
                    tokio::select! {
                        _ = shutdown.recv() => return Ok(None),
                        _ = tokio::time::sleep(backoff) => {}
                    }
                    backoff = backoff.saturating_mul(2).min(MAX_RETRY_BACKOFF);
                }
                Err(e) => return Err(e),
            }
        }
    }

    async fn submit(&self, payload: &[u8]) -> Result<SubmitReceipt, SinkError> {
        let stream = &self.config.stream_name;
        let timeout = self.config.send_timeout;

        tokio::time::timeout(
            timeout,
            self.sink
                .submit(stream, &self.config.partition_key, payload),
        )
        .await
        .unwrap_or_else(|_| Err(SinkError::timeout(stream, timeout)))
    }
}

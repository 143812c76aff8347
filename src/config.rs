//! CLI options and their conversion into publisher configuration.

pub mod duration;

use crate::publisher::{FailurePolicy, PublisherConfig};
use clap::{Args, ValueEnum};
use duration::parse_duration;
use std::time::Duration;
use stream_sink::KinesisOptions;

/// What to do when a record cannot be submitted.
#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum OnError {
    /// Stop the process with the error
    Abort,
    /// Log the error, drop the record and continue with the next tick
    Skip,
    /// Retry with exponential backoff, then stop if every attempt failed
    Retry,
}

/// Publish loop options.
#[derive(Args, Clone, Debug)]
pub struct PublishOpts {
    /// Name of the stream records are appended to
    #[arg(long, env = "SENSOR_STREAM_NAME", default_value = "TestStream")]
    pub stream_name: String,

    /// Partition key used for every record
    #[arg(long, env = "SENSOR_PARTITION_KEY", default_value = "arbitrary")]
    pub partition_key: String,

    /// Wait before each record (e.g. "2s", "500ms", "1m")
    #[arg(long, env = "SENSOR_INTERVAL", default_value = "2s", value_parser = parse_duration)]
    pub interval: Duration,

    /// Stop after this many records (default: run until interrupted)
    #[arg(long)]
    pub max_records: Option<u64>,

    /// Random seed for reproducible records (default: OS entropy)
    #[arg(long)]
    pub seed: Option<u64>,

    /// Failure policy for submits
    #[arg(long, value_enum, default_value_t = OnError::Retry)]
    pub on_error: OnError,

    /// Retries per record with --on-error retry
    #[arg(long, default_value = "3")]
    pub max_retries: u32,

    /// Initial retry backoff, doubled after every failed attempt
    #[arg(long, default_value = "500ms", value_parser = parse_duration)]
    pub retry_backoff: Duration,

    /// Timeout for a single submit
    #[arg(long, default_value = "30s", value_parser = parse_duration)]
    pub send_timeout: Duration,

    /// Don't print each record to stdout
    #[arg(long)]
    pub quiet: bool,
}

/// Kinesis connection options.
#[derive(Args, Clone, Debug)]
pub struct KinesisOpts {
    /// AWS region (default: resolved by the AWS SDK)
    #[arg(long, env = "AWS_REGION")]
    pub aws_region: Option<String>,

    /// Kinesis endpoint override, e.g. http://localhost:4566 for LocalStack
    #[arg(long, env = "KINESIS_ENDPOINT_URL")]
    pub endpoint_url: Option<String>,

    /// Dry run mode - generate and print records without sending them
    #[arg(long)]
    pub dry_run: bool,
}

impl From<&PublishOpts> for PublisherConfig {
    fn from(opts: &PublishOpts) -> Self {
        let on_error = match opts.on_error {
            OnError::Abort => FailurePolicy::Abort,
            OnError::Skip => FailurePolicy::Skip,
            OnError::Retry => FailurePolicy::Retry {
                max_retries: opts.max_retries,
                backoff: opts.retry_backoff,
            },
        };

        Self {
            stream_name: opts.stream_name.clone(),
            partition_key: opts.partition_key.clone(),
            interval: opts.interval,
            max_records: opts.max_records,
            on_error,
            send_timeout: opts.send_timeout,
        }
    }
}

impl From<&KinesisOpts> for KinesisOptions {
    fn from(opts: &KinesisOpts) -> Self {
        Self {
            region: opts.aws_region.clone(),
            endpoint_url: opts.endpoint_url.clone(),
        }
    }
}

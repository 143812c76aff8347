//! Synthetic sensor stream producer.
//!
//! Publishes one randomized sensor record every few seconds to a Kinesis
//! stream so that a downstream consumer can be exercised during
//! development.
//!
//! # Crates
//!
//! - `sensor_generator` - topology tables, `Record`, `RecordGenerator`, ASCII JSON encoding
//! - `stream_sink` - the `StreamSink` trait with Kinesis, in-memory and dry-run sinks
//! - this crate - CLI options, the publish loop and shutdown handling
//!
//! # CLI Usage
//!
//! ```bash
//! # Publish to the default stream every 2 seconds until Ctrl+C
//! sensor-stream-producer
//!
//! # Publish 100 records to a LocalStack stream, skipping failed submits
//! sensor-stream-producer --stream-name sensors --max-records 100 \
//!   --endpoint-url http://localhost:4566 --on-error skip
//!
//! # Print records without sending them
//! sensor-stream-producer --dry-run --interval 500ms
//! ```

pub mod config;
pub mod publisher;
pub mod shutdown;

pub use config::{KinesisOpts, OnError, PublishOpts};
pub use publisher::{FailurePolicy, PublishMetrics, Publisher, PublisherConfig, TickOutcome};
pub use shutdown::shutdown_on_ctrl_c;

//! Synthetic sensor record generator for sensor-stream-producer.
//!
//! This crate provides the `RecordGenerator`, which builds one randomized
//! [`Record`] per call from a static node/sensor/feature topology, and the
//! ASCII-safe JSON encoding the records are published in.
//!
//! # Architecture
//!
//! ```text
//! DEV_TOPOLOGY (static)
//!   node → sensors
//!   sensor → features
//!        │
//!        ▼
//! ┌─────────────────┐
//! │ RecordGenerator │
//! │                 │
//! │  - rng (StdRng) │
//! │  - clock (Utc)  │
//! └────────┬────────┘
//!          │
//!          ▼
//!    Record { meta_id, node_id, sensor, feature_of_interest, data, datetime }
//!          │
//!          ▼
//!    encode_record → ASCII JSON bytes
//! ```
//!
//! # Example
//!
//! ```rust
//! use sensor_generator::{encode_record, RecordGenerator, DEV_TOPOLOGY};
//!
//! let mut generator = RecordGenerator::new(&DEV_TOPOLOGY, Some(42)).unwrap();
//! let record = generator.next_record().unwrap();
//! assert!(DEV_TOPOLOGY
//!     .sensors_for(&record.node_id)
//!     .unwrap()
//!     .contains(&record.sensor.as_str()));
//!
//! let payload = encode_record(&record).unwrap();
//! assert!(payload.is_ascii());
//! ```

pub mod encode;
pub mod generator;
pub mod record;
pub mod topology;

// Re-exports for convenience
pub use encode::{decode_record, encode_record, to_pretty_json, EncodeError};
pub use generator::{GeneratorError, RecordGenerator};
pub use record::{iso_datetime, Record, MAX_META_ID};
pub use topology::{Node, Sensor, Topology, TopologyError, DEV_TOPOLOGY};

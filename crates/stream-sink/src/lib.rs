//! Append-only stream sink abstraction.
//!
//! This crate defines the `StreamSink` trait the publisher writes through,
//! plus three implementations:
//!
//! - [`KinesisSink`] - AWS Kinesis `PutRecord`
//! - [`MemorySink`] - records submissions in memory, with scriptable failures
//! - [`DiscardSink`] - dry run, drops every payload

mod discard;
mod error;
mod kinesis;
mod memory;
mod traits;

pub use discard::DiscardSink;
pub use error::SinkError;
pub use kinesis::{KinesisOptions, KinesisSink};
pub use memory::{MemorySink, Submission};
pub use traits::{StreamSink, SubmitReceipt};

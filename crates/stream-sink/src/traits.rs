//! StreamSink trait definition.
//!
//! The sink is treated as an opaque capability with a single operation:
//! append one payload to a named stream under a partition key. Keeping the
//! surface this narrow lets the publisher run unchanged against Kinesis,
//! an in-memory recorder in tests, or a dry-run sink.

use crate::error::SinkError;

/// Acknowledgement returned by a successful submit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmitReceipt {
    /// Shard (or logical partition) the payload landed in.
    pub shard_id: String,
    /// Sink-assigned position of the payload within its shard.
    pub sequence_number: String,
}

/// Trait for appending payloads to an external stream.
///
/// # Usage Pattern
///
/// The publish loop is generic over the sink:
///
/// ```ignore
/// pub struct Publisher<S: StreamSink> {
///     sink: S,
///     // ...
/// }
///
/// sink.submit("TestStream", "arbitrary", &payload).await?;
/// ```
///
/// The CLI entry point picks the implementation once (Kinesis or dry run)
/// and everything after that is monomorphized for it.
#[async_trait::async_trait]
pub trait StreamSink: Send + Sync {
    /// Append `payload` to `stream_name` under `partition_key`.
    async fn submit(
        &self,
        stream_name: &str,
        partition_key: &str,
        payload: &[u8],
    ) -> Result<SubmitReceipt, SinkError>;
}

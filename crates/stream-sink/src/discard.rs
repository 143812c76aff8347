//! Dry-run sink: accepts and drops every payload without network access.

use crate::error::SinkError;
use crate::traits::{StreamSink, SubmitReceipt};
use std::sync::atomic::{AtomicU64, Ordering};

#[derive(Debug, Default)]
pub struct DiscardSink {
    discarded: AtomicU64,
}

impl DiscardSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn discarded(&self) -> u64 {
        self.discarded.load(Ordering::Relaxed)
    }
}

#[async_trait::async_trait]
impl StreamSink for DiscardSink {
    async fn submit(
        &self,
        stream_name: &str,
        partition_key: &str,
        payload: &[u8],
    ) -> Result<SubmitReceipt, SinkError> {
        let sequence = self.discarded.fetch_add(1, Ordering::Relaxed);
        tracing::info!(
            stream = stream_name,
            partition_key,
            bytes = payload.len(),
            "Dry run: record not sent"
        );
        Ok(SubmitReceipt {
            shard_id: "dry-run".to_string(),
            sequence_number: sequence.to_string(),
        })
    }
}

//! In-memory sink that records every submission.
//!
//! Clones share state, so a test can hand one clone to the publisher and
//! inspect the other afterwards. Failures and latency can be scripted to
//! exercise the publisher's failure policy.

use crate::error::SinkError;
use crate::traits::{StreamSink, SubmitReceipt};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Mutex;

/// A payload accepted by a [`MemorySink`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Submission {
    pub stream_name: String,
    pub partition_key: String,
    pub payload: Vec<u8>,
}

#[derive(Debug, Default)]
struct State {
    submissions: Vec<Submission>,
    attempts: u64,
    failures_remaining: u64,
    delay: Option<Duration>,
}

#[derive(Debug, Clone, Default)]
pub struct MemorySink {
    state: Arc<Mutex<State>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make the next `count` submits fail with a transmission error.
    pub async fn fail_next(&self, count: u64) {
        self.state.lock().await.failures_remaining = count;
    }

    /// Delay every submit by `delay` before it completes.
    pub async fn set_delay(&self, delay: Duration) {
        self.state.lock().await.delay = Some(delay);
    }

    /// Accepted submissions, in order.
    pub async fn submissions(&self) -> Vec<Submission> {
        self.state.lock().await.submissions.clone()
    }

    /// Every submit call, including failed ones.
    pub async fn attempts(&self) -> u64 {
        self.state.lock().await.attempts
    }
}

#[async_trait::async_trait]
impl StreamSink for MemorySink {
    async fn submit(
        &self,
        stream_name: &str,
        partition_key: &str,
        payload: &[u8],
    ) -> Result<SubmitReceipt, SinkError> {
        let delay = {
            let mut state = self.state.lock().await;
            state.attempts += 1;
            state.delay
        };

        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }

        let mut state = self.state.lock().await;
        if state.failures_remaining > 0 {
            state.failures_remaining -= 1;
            return Err(SinkError::transmission(stream_name, "injected failure"));
        }

        let sequence_number = state.submissions.len().to_string();
        state.submissions.push(Submission {
            stream_name: stream_name.to_string(),
            partition_key: partition_key.to_string(),
            payload: payload.to_vec(),
        });

        Ok(SubmitReceipt {
            shard_id: "shardId-000000000000".to_string(),
            sequence_number,
        })
    }
}

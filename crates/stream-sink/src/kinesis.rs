//! AWS Kinesis sink.

use crate::error::SinkError;
use crate::traits::{StreamSink, SubmitReceipt};
use aws_config::BehaviorVersion;
use aws_sdk_kinesis::config::Region;
use aws_sdk_kinesis::error::DisplayErrorContext;
use aws_sdk_kinesis::primitives::Blob;

/// Overrides applied on top of the AWS default configuration chain.
#[derive(Debug, Clone, Default)]
pub struct KinesisOptions {
    /// Region to use instead of the one resolved from the environment/profile.
    pub region: Option<String>,
    /// Endpoint override, e.g. a LocalStack URL.
    pub endpoint_url: Option<String>,
}

/// Sink backed by the Kinesis `PutRecord` API.
///
/// Credentials, retries and signing are left to the SDK's defaults.
pub struct KinesisSink {
    client: aws_sdk_kinesis::Client,
}

impl KinesisSink {
    /// Create a new Kinesis sink from the AWS default config plus `options`.
    pub async fn new(options: &KinesisOptions) -> Self {
        let mut loader = aws_config::defaults(BehaviorVersion::latest());
        if let Some(region) = &options.region {
            loader = loader.region(Region::new(region.clone()));
        }
        if let Some(endpoint_url) = &options.endpoint_url {
            loader = loader.endpoint_url(endpoint_url);
        }
        let sdk_config = loader.load().await;

        tracing::debug!(
            region = ?sdk_config.region(),
            endpoint_url = ?options.endpoint_url,
            "Created Kinesis client"
        );

        Self::from_client(aws_sdk_kinesis::Client::new(&sdk_config))
    }

    /// Wrap an already configured client.
    pub fn from_client(client: aws_sdk_kinesis::Client) -> Self {
        Self { client }
    }
}

#[async_trait::async_trait]
impl StreamSink for KinesisSink {
    async fn submit(
        &self,
        stream_name: &str,
        partition_key: &str,
        payload: &[u8],
    ) -> Result<SubmitReceipt, SinkError> {
        let output = self
            .client
            .put_record()
            .stream_name(stream_name)
            .partition_key(partition_key)
            .data(Blob::new(payload))
            .send()
            .await
            .map_err(|e| SinkError::transmission(stream_name, DisplayErrorContext(&e).to_string()))?;

        Ok(SubmitReceipt {
            shard_id: output.shard_id().to_string(),
            sequence_number: output.sequence_number().to_string(),
        })
    }
}

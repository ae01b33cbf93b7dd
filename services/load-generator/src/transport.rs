//! Transport boundary
//!
//! The generator publishes encoded trade events through the
//! [`TradeSink`] port. The real deployment injects a message-broker
//! client here; this crate only requires that publishing preserves
//! per-partition-key ordering, is safe for concurrent use by all
//! workers, and surfaces failures as a catchable error per call.

use async_trait::async_trait;
use std::sync::atomic::{AtomicU64, Ordering};
use tokio::io::AsyncWriteExt;
use types::errors::TransportError;

/// Port for handing one encoded event to the message transport.
#[async_trait]
pub trait TradeSink: Send + Sync {
    /// Publish one payload under a partition key.
    ///
    /// Ordering is preserved per partition key by the transport.
    async fn publish(&self, partition_key: &str, payload: Vec<u8>) -> Result<(), TransportError>;
}

/// Sink that writes one JSON line per event to stdout.
///
/// Default boundary implementation for the demo binary; a broker
/// client replaces it in deployments.
pub struct StdoutSink {
    stdout: tokio::sync::Mutex<tokio::io::Stdout>,
}

impl StdoutSink {
    pub fn new() -> Self {
        Self {
            stdout: tokio::sync::Mutex::new(tokio::io::stdout()),
        }
    }
}

impl Default for StdoutSink {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl TradeSink for StdoutSink {
    async fn publish(&self, _partition_key: &str, payload: Vec<u8>) -> Result<(), TransportError> {
        let mut out = self.stdout.lock().await;
        out.write_all(&payload)
            .await
            .map_err(|e| TransportError::PublishFailed {
                reason: e.to_string(),
            })?;
        out.write_all(b"\n")
            .await
            .map_err(|e| TransportError::PublishFailed {
                reason: e.to_string(),
            })
    }
}

/// Sink that records every published event in memory. Test support.
#[derive(Default)]
pub struct RecordingSink {
    published: tokio::sync::Mutex<Vec<(String, Vec<u8>)>>,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of all (partition key, payload) pairs published so far.
    pub async fn published(&self) -> Vec<(String, Vec<u8>)> {
        self.published.lock().await.clone()
    }

    /// Number of events published so far.
    pub async fn count(&self) -> usize {
        self.published.lock().await.len()
    }
}

#[async_trait]
impl TradeSink for RecordingSink {
    async fn publish(&self, partition_key: &str, payload: Vec<u8>) -> Result<(), TransportError> {
        self.published
            .lock()
            .await
            .push((partition_key.to_string(), payload));
        Ok(())
    }
}

/// Sink that fails every publish. Test support for the drop-and-continue
/// policy.
#[derive(Default)]
pub struct FailingSink {
    attempts: AtomicU64,
}

impl FailingSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of publish attempts observed.
    pub fn attempts(&self) -> u64 {
        self.attempts.load(Ordering::Relaxed)
    }
}

#[async_trait]
impl TradeSink for FailingSink {
    async fn publish(&self, _partition_key: &str, _payload: Vec<u8>) -> Result<(), TransportError> {
        self.attempts.fetch_add(1, Ordering::Relaxed);
        Err(TransportError::PublishFailed {
            reason: "injected failure".to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_recording_sink_captures_in_order() {
        let sink = RecordingSink::new();
        sink.publish("BTCUSDT", b"one".to_vec()).await.unwrap();
        sink.publish("ETHUSDT", b"two".to_vec()).await.unwrap();

        let published = sink.published().await;
        assert_eq!(published.len(), 2);
        assert_eq!(published[0], ("BTCUSDT".to_string(), b"one".to_vec()));
        assert_eq!(published[1].0, "ETHUSDT");
    }

    #[tokio::test]
    async fn test_failing_sink_counts_attempts() {
        let sink = FailingSink::new();
        for _ in 0..3 {
            assert!(sink.publish("BTCUSDT", b"x".to_vec()).await.is_err());
        }
        assert_eq!(sink.attempts(), 3);
    }
}

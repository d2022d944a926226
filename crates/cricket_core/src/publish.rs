//! Snapshot publishing seam.
//!
//! The simulation only knows how to hand a JSON payload to a subject. Message
//! bus clients live outside this crate and plug in through
//! [`SnapshotPublisher`].

use std::sync::{mpsc, Mutex};

use serde_json::Value;
use tracing::info;

use crate::error::PublishError;

pub trait SnapshotPublisher: Send + Sync {
    fn publish(&self, subject: &str, payload: &Value) -> Result<(), PublishError>;
}

/// Writes every payload to the log at `info` level.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogPublisher;

impl SnapshotPublisher for LogPublisher {
    fn publish(&self, subject: &str, payload: &Value) -> Result<(), PublishError> {
        let body = serde_json::to_string(payload)?;
        info!(subject, payload = %body, "publish");
        Ok(())
    }
}

/// Forwards `(subject, payload)` pairs to an in-process receiver.
#[derive(Debug)]
pub struct ChannelPublisher {
    sender: Mutex<mpsc::Sender<(String, Value)>>,
}

impl ChannelPublisher {
    pub fn new() -> (Self, mpsc::Receiver<(String, Value)>) {
        let (sender, receiver) = mpsc::channel();
        (Self { sender: Mutex::new(sender) }, receiver)
    }
}

impl SnapshotPublisher for ChannelPublisher {
    fn publish(&self, subject: &str, payload: &Value) -> Result<(), PublishError> {
        let sender = self.sender.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        sender
            .send((subject.to_string(), payload.clone()))
            .map_err(|_| PublishError::Disconnected { subject: subject.to_string() })
    }
}

/// Discards everything.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullPublisher;

impl SnapshotPublisher for NullPublisher {
    fn publish(&self, _subject: &str, _payload: &Value) -> Result<(), PublishError> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_channel_publisher_forwards() {
        let (publisher, receiver) = ChannelPublisher::new();
        publisher.publish("stark.sports.data", &json!({"hello": "world!"})).unwrap();
        let (subject, payload) = receiver.recv().unwrap();
        assert_eq!(subject, "stark.sports.data");
        assert_eq!(payload["hello"], "world!");
    }

    #[test]
    fn test_channel_publisher_reports_disconnect() {
        let (publisher, receiver) = ChannelPublisher::new();
        drop(receiver);
        let err = publisher.publish("s", &json!(1)).unwrap_err();
        assert!(matches!(err, PublishError::Disconnected { .. }));
    }

    #[test]
    fn test_log_publisher_accepts_payload() {
        assert!(LogPublisher.publish("s", &json!({"a": [1, 2]})).is_ok());
    }
}

//! Broker backend implementations.
//!
//! `build(config)` is the factory — called once at startup by the
//! messaging initializer. Adding a new backend = new module + new match arm.

pub mod mock;

#[cfg(feature = "kafka")]
pub mod kafka;

use crate::config::MessagingConfig;
use crate::messaging::client::{BrokerClient, BrokerError};

/// Construct a `BrokerClient` bound to the configured broker list.
///
/// Binds addresses only; no network handshake happens here. Backend
/// constructor validation failures (rejected client configuration)
/// propagate as initialization failures.
pub fn build(config: &MessagingConfig) -> Result<BrokerClient, BrokerError> {
    match config.backend.as_str() {
        #[cfg(feature = "kafka")]
        "kafka" => Ok(BrokerClient::Kafka(kafka::KafkaBackend::new(config)?)),
        "mock" => Ok(BrokerClient::Mock(mock::MockBackend::new(
            config.brokers.clone(),
        ))),
        other => Err(BrokerError::UnknownBackend(other.to_string())),
    }
}

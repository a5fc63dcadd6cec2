//! Broker client abstraction.
//!
//! `BrokerClient` is an enum over concrete backend implementations.
//! Add a new variant + module in `backends/` for each additional backend.
//!
//! Enum dispatch avoids `dyn` trait objects and the `async-trait`
//! dependency. Adding a backend = new module + new variant + new arm in
//! each operation.
//!
//! Construction only binds the broker address list; no backend performs a
//! network handshake until `connect` or the first produce/consume. Callers
//! holding a client therefore cannot assume the broker is reachable.

use thiserror::Error;

use crate::messaging::backends;

// ── Error ─────────────────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum BrokerError {
    #[error("invalid broker configuration: {0}")]
    Config(String),

    #[error("unknown messaging backend: {0}")]
    UnknownBackend(String),

    #[error("client is closed")]
    Closed,

    #[cfg(feature = "kafka")]
    #[error("kafka error: {0}")]
    Kafka(#[from] rdkafka::error::KafkaError),
}

// ── Client enum ───────────────────────────────────────────────────────────────

/// All available broker backends.
pub enum BrokerClient {
    #[cfg(feature = "kafka")]
    Kafka(backends::kafka::KafkaBackend),
    Mock(backends::mock::MockBackend),
}

/// Broker acknowledgement for a produced record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Delivery {
    pub partition: i32,
    pub offset: i64,
}

impl BrokerClient {
    /// Broker endpoints this client was constructed against.
    pub fn brokers(&self) -> &[String] {
        match self {
            #[cfg(feature = "kafka")]
            BrokerClient::Kafka(b) => b.brokers(),
            BrokerClient::Mock(b) => b.brokers(),
        }
    }

    /// Name of the concrete backend, for logs.
    pub fn backend_name(&self) -> &'static str {
        match self {
            #[cfg(feature = "kafka")]
            BrokerClient::Kafka(_) => "kafka",
            BrokerClient::Mock(_) => "mock",
        }
    }

    /// Force connection establishment ahead of first use.
    ///
    /// Optional — produce/consume connect lazily on their own. Useful when
    /// a caller wants to fail early on an unreachable broker.
    pub async fn connect(&self) -> Result<(), BrokerError> {
        match self {
            #[cfg(feature = "kafka")]
            BrokerClient::Kafka(b) => b.connect().await,
            BrokerClient::Mock(b) => b.connect().await,
        }
    }

    /// Publish `payload` to `topic`, optionally keyed for partitioning.
    pub async fn produce(
        &self,
        topic: &str,
        key: Option<&[u8]>,
        payload: &[u8],
    ) -> Result<Delivery, BrokerError> {
        match self {
            #[cfg(feature = "kafka")]
            BrokerClient::Kafka(b) => b.produce(topic, key, payload).await,
            BrokerClient::Mock(b) => b.produce(topic, key, payload).await,
        }
    }

    /// Fetch the next message from `topic`, or `None` when nothing is
    /// available right now.
    pub async fn consume(&self, topic: &str) -> Result<Option<Vec<u8>>, BrokerError> {
        match self {
            #[cfg(feature = "kafka")]
            BrokerClient::Kafka(b) => b.consume(topic).await,
            BrokerClient::Mock(b) => b.consume(topic).await,
        }
    }

    /// Flush outstanding work and release the connection. Further
    /// operations fail with [`BrokerError::Closed`].
    pub async fn close(&self) -> Result<(), BrokerError> {
        match self {
            #[cfg(feature = "kafka")]
            BrokerClient::Kafka(b) => b.close().await,
            BrokerClient::Mock(b) => b.close().await,
        }
    }
}

impl std::fmt::Debug for BrokerClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BrokerClient")
            .field("backend", &self.backend_name())
            .field("brokers", &self.brokers())
            .finish()
    }
}

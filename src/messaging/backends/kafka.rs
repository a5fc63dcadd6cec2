//! Kafka backend over `rdkafka`.
//!
//! `ClientConfig::create` validates configuration and allocates the
//! librdkafka handles without touching the network; actual connections are
//! established by librdkafka on first use. That keeps startup failure modes
//! limited to configuration errors.

use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use rdkafka::ClientConfig;
use rdkafka::Message;
use rdkafka::consumer::{Consumer, StreamConsumer};
use rdkafka::producer::{FutureProducer, FutureRecord, Producer};
use rdkafka::util::Timeout;

use crate::config::MessagingConfig;
use crate::messaging::client::{BrokerError, Delivery};

/// Delivery-report wait bound for a single produce call.
const SEND_TIMEOUT: Duration = Duration::from_secs(5);

/// Metadata fetch bound used by `connect`.
const CONNECT_TIMEOUT: Duration = Duration::from_secs(5);

/// How long `consume` polls before reporting "nothing available".
const CONSUME_TIMEOUT: Duration = Duration::from_secs(1);

/// Bound for the final flush in `close`.
const CLOSE_TIMEOUT: Duration = Duration::from_secs(5);

pub struct KafkaBackend {
    brokers: Vec<String>,
    producer: FutureProducer,
    consumer: StreamConsumer,
    /// Topic the consumer is currently subscribed to, if any.
    subscription: Mutex<Option<String>>,
    closed: AtomicBool,
}

impl KafkaBackend {
    pub fn new(config: &MessagingConfig) -> Result<Self, BrokerError> {
        let servers = config.brokers.join(",");

        let producer: FutureProducer = ClientConfig::new()
            .set("bootstrap.servers", &servers)
            .set("message.timeout.ms", "5000")
            .create()?;

        let consumer: StreamConsumer = ClientConfig::new()
            .set("bootstrap.servers", &servers)
            .set("group.id", &config.group_id)
            .set("enable.partition.eof", "false")
            .set("auto.offset.reset", "earliest")
            .create()?;

        Ok(Self {
            brokers: config.brokers.clone(),
            producer,
            consumer,
            subscription: Mutex::new(None),
            closed: AtomicBool::new(false),
        })
    }

    pub fn brokers(&self) -> &[String] {
        &self.brokers
    }

    fn ensure_open(&self) -> Result<(), BrokerError> {
        if self.closed.load(Ordering::SeqCst) {
            return Err(BrokerError::Closed);
        }
        Ok(())
    }

    /// Force a metadata round-trip so an unreachable broker surfaces now
    /// instead of on the first produce.
    pub async fn connect(&self) -> Result<(), BrokerError> {
        self.ensure_open()?;
        self.producer
            .client()
            .fetch_metadata(None, Timeout::After(CONNECT_TIMEOUT))?;
        Ok(())
    }

    pub async fn produce(
        &self,
        topic: &str,
        key: Option<&[u8]>,
        payload: &[u8],
    ) -> Result<Delivery, BrokerError> {
        self.ensure_open()?;
        let record = match key {
            Some(k) => FutureRecord::to(topic).payload(payload).key(k),
            None => FutureRecord::<[u8], [u8]>::to(topic).payload(payload),
        };
        let (partition, offset) = self
            .producer
            .send(record, Timeout::After(SEND_TIMEOUT))
            .await
            .map_err(|(e, _msg)| BrokerError::Kafka(e))?;
        Ok(Delivery { partition, offset })
    }

    pub async fn consume(&self, topic: &str) -> Result<Option<Vec<u8>>, BrokerError> {
        self.ensure_open()?;
        self.subscribe_if_needed(topic)?;
        match tokio::time::timeout(CONSUME_TIMEOUT, self.consumer.recv()).await {
            Ok(Ok(msg)) => Ok(msg.payload().map(<[u8]>::to_vec)),
            Ok(Err(e)) => Err(BrokerError::Kafka(e)),
            // No message arrived inside the poll window.
            Err(_elapsed) => Ok(None),
        }
    }

    fn subscribe_if_needed(&self, topic: &str) -> Result<(), BrokerError> {
        let mut current = self
            .subscription
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        if current.as_deref() != Some(topic) {
            self.consumer.subscribe(&[topic])?;
            *current = Some(topic.to_string());
        }
        Ok(())
    }

    pub async fn close(&self) -> Result<(), BrokerError> {
        if self.closed.swap(true, Ordering::SeqCst) {
            // Already closed; close is idempotent.
            return Ok(());
        }
        self.consumer.unsubscribe();
        self.producer.flush(Timeout::After(CLOSE_TIMEOUT))?;
        Ok(())
    }
}

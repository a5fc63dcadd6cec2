//! In-memory mock backend — per-topic FIFO queues, no broker required.
//! Used by the test suite and as a no-infrastructure backend for local runs.

use std::collections::{HashMap, VecDeque};
use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, Ordering};

use crate::messaging::client::{BrokerError, Delivery};

#[derive(Default)]
struct TopicQueue {
    next_offset: i64,
    queue: VecDeque<Vec<u8>>,
}

pub struct MockBackend {
    brokers: Vec<String>,
    topics: Mutex<HashMap<String, TopicQueue>>,
    closed: AtomicBool,
}

impl MockBackend {
    pub fn new(brokers: Vec<String>) -> Self {
        Self {
            brokers,
            topics: Mutex::new(HashMap::new()),
            closed: AtomicBool::new(false),
        }
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

    pub async fn connect(&self) -> Result<(), BrokerError> {
        self.ensure_open()
    }

    pub async fn produce(
        &self,
        topic: &str,
        _key: Option<&[u8]>,
        payload: &[u8],
    ) -> Result<Delivery, BrokerError> {
        self.ensure_open()?;
        let mut topics = self
            .topics
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        let entry = topics.entry(topic.to_string()).or_default();
        entry.queue.push_back(payload.to_vec());
        let offset = entry.next_offset;
        entry.next_offset += 1;
        Ok(Delivery {
            partition: 0,
            offset,
        })
    }

    pub async fn consume(&self, topic: &str) -> Result<Option<Vec<u8>>, BrokerError> {
        self.ensure_open()?;
        let mut topics = self
            .topics
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        Ok(topics.get_mut(topic).and_then(|t| t.queue.pop_front()))
    }

    pub async fn close(&self) -> Result<(), BrokerError> {
        self.closed.store(true, Ordering::SeqCst);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn backend() -> MockBackend {
        MockBackend::new(vec!["kafka:9092".into()])
    }

    #[tokio::test]
    async fn produce_then_consume_round_trip() {
        let b = backend();
        b.produce("chat", None, b"hello").await.unwrap();
        b.produce("chat", None, b"world").await.unwrap();
        assert_eq!(b.consume("chat").await.unwrap(), Some(b"hello".to_vec()));
        assert_eq!(b.consume("chat").await.unwrap(), Some(b"world".to_vec()));
        assert_eq!(b.consume("chat").await.unwrap(), None);
    }

    #[tokio::test]
    async fn topics_are_isolated() {
        let b = backend();
        b.produce("a", None, b"x").await.unwrap();
        assert_eq!(b.consume("b").await.unwrap(), None);
        assert_eq!(b.consume("a").await.unwrap(), Some(b"x".to_vec()));
    }

    #[tokio::test]
    async fn offsets_increase_per_topic() {
        let b = backend();
        let d0 = b.produce("t", None, b"0").await.unwrap();
        let d1 = b.produce("t", None, b"1").await.unwrap();
        assert_eq!(d0.offset, 0);
        assert_eq!(d1.offset, 1);
        // offsets keep growing even after messages are consumed
        b.consume("t").await.unwrap();
        let d2 = b.produce("t", None, b"2").await.unwrap();
        assert_eq!(d2.offset, 2);
    }

    #[tokio::test]
    async fn closed_client_refuses_operations() {
        let b = backend();
        b.close().await.unwrap();
        assert!(matches!(
            b.produce("t", None, b"x").await,
            Err(BrokerError::Closed)
        ));
        assert!(matches!(b.consume("t").await, Err(BrokerError::Closed)));
        assert!(matches!(b.connect().await, Err(BrokerError::Closed)));
        // close stays idempotent
        b.close().await.unwrap();
    }
}

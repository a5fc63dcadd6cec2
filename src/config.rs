//! Messaging configuration from environment variables.
//!
//! Reads `KAFKA_DISABLED` and `KAFKA_BROKERS` once at startup. The values
//! are never watched for change; reconfiguration means restarting the
//! process.
//!
//! Gating rule: the exact string `"true"` in `KAFKA_DISABLED` disables
//! messaging. Anything else — unset, `"false"`, `"TRUE"`, even the empty
//! string — leaves it enabled.

use std::env;

use crate::error::AppError;

/// Env var gating messaging. Exact match against `"true"` disables.
pub const ENV_DISABLED: &str = "KAFKA_DISABLED";

/// Env var holding the broker address list, comma-separated.
pub const ENV_BROKERS: &str = "KAFKA_BROKERS";

/// Env var selecting the backend implementation (`"kafka"` or `"mock"`).
pub const ENV_BACKEND: &str = "MESSAGING_BACKEND";

/// Env var for the consumer group id used by the kafka backend.
pub const ENV_GROUP_ID: &str = "KAFKA_GROUP_ID";

/// Fallback endpoint used when `KAFKA_BROKERS` is unset.
pub const DEFAULT_BROKER: &str = "kafka:9092";

fn default_backend() -> String {
    "kafka".to_string()
}

fn default_group_id() -> String {
    "kafka-bootstrap".to_string()
}

/// Resolved messaging configuration.
#[derive(Debug, Clone)]
pub struct MessagingConfig {
    /// True when `KAFKA_DISABLED` was exactly `"true"`.
    pub disabled: bool,
    /// Broker endpoints the client binds to. Empty when `disabled` —
    /// the address value is not even parsed in that case.
    pub brokers: Vec<String>,
    /// Which backend to construct (`"kafka"` or `"mock"`).
    pub backend: String,
    /// Consumer group id for the kafka backend.
    pub group_id: String,
}

impl MessagingConfig {
    /// Read configuration from the process environment.
    ///
    /// Called once at startup; the result is final for the process.
    pub fn from_env() -> Result<Self, AppError> {
        let disabled = env::var(ENV_DISABLED).ok();
        let brokers = env::var(ENV_BROKERS).ok();
        let backend = env::var(ENV_BACKEND).ok();
        let group_id = env::var(ENV_GROUP_ID).ok();
        Self::resolve(
            disabled.as_deref(),
            brokers.as_deref(),
            backend.as_deref(),
            group_id.as_deref(),
        )
    }

    /// Internal resolver — accepts raw values directly.
    /// Tests pass values here instead of mutating env vars.
    pub fn resolve(
        disabled: Option<&str>,
        brokers: Option<&str>,
        backend: Option<&str>,
        group_id: Option<&str>,
    ) -> Result<Self, AppError> {
        let backend = backend.map(str::to_string).unwrap_or_else(default_backend);
        let group_id = group_id.map(str::to_string).unwrap_or_else(default_group_id);

        // Exact-match gate. "TRUE", "1", "yes" etc. do NOT disable.
        if disabled == Some("true") {
            // Disabled short-circuits before any address work: a malformed
            // broker value next to a disabling flag is not an error.
            return Ok(Self {
                disabled: true,
                brokers: Vec::new(),
                backend,
                group_id,
            });
        }

        let brokers = match brokers {
            None => vec![DEFAULT_BROKER.to_string()],
            Some(raw) => {
                let list: Vec<String> = raw
                    .split(',')
                    .map(str::trim)
                    .filter(|s| !s.is_empty())
                    .map(str::to_string)
                    .collect();
                // An explicitly supplied but empty value is a config error,
                // never silently replaced by the fallback.
                if list.is_empty() {
                    return Err(AppError::Config(format!(
                        "{ENV_BROKERS} is set but contains no broker address"
                    )));
                }
                list
            }
        };

        Ok(Self {
            disabled: false,
            brokers,
            backend,
            group_id,
        })
    }
}

#[cfg(test)]
impl MessagingConfig {
    /// Enabled config against the mock backend — no external services.
    pub fn test_default() -> Self {
        Self {
            disabled: false,
            brokers: vec![DEFAULT_BROKER.to_string()],
            backend: "mock".into(),
            group_id: default_group_id(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unset_flag_enables_with_fallback_broker() {
        let cfg = MessagingConfig::resolve(None, None, None, None).unwrap();
        assert!(!cfg.disabled);
        assert_eq!(cfg.brokers, vec![DEFAULT_BROKER.to_string()]);
    }

    #[test]
    fn exact_true_disables() {
        let cfg = MessagingConfig::resolve(Some("true"), None, None, None).unwrap();
        assert!(cfg.disabled);
        assert!(cfg.brokers.is_empty());
    }

    #[test]
    fn only_exact_true_disables() {
        for v in &["false", "TRUE", "True", "", "1", "yes", " true"] {
            let cfg = MessagingConfig::resolve(Some(v), None, None, None).unwrap();
            assert!(!cfg.disabled, "'{v}' must not disable messaging");
        }
    }

    #[test]
    fn explicit_broker_replaces_fallback() {
        let cfg =
            MessagingConfig::resolve(Some("false"), Some("broker1:9092"), None, None).unwrap();
        assert_eq!(cfg.brokers, vec!["broker1:9092".to_string()]);
    }

    #[test]
    fn broker_list_splits_on_commas() {
        let cfg =
            MessagingConfig::resolve(None, Some("b1:9092, b2:9092"), None, None).unwrap();
        assert_eq!(cfg.brokers, vec!["b1:9092".to_string(), "b2:9092".to_string()]);
    }

    #[test]
    fn empty_broker_value_errors() {
        let result = MessagingConfig::resolve(None, Some(""), None, None);
        let msg = result.unwrap_err().to_string();
        assert!(msg.contains("config error"));
        assert!(msg.contains(ENV_BROKERS));
    }

    #[test]
    fn whitespace_broker_value_errors() {
        assert!(MessagingConfig::resolve(None, Some(" , "), None, None).is_err());
    }

    #[test]
    fn disabled_skips_broker_validation() {
        // Scenario B plus a malformed address: the flag wins, no error.
        let cfg = MessagingConfig::resolve(Some("true"), Some(""), None, None).unwrap();
        assert!(cfg.disabled);
    }

    #[test]
    fn backend_defaults_to_kafka() {
        let cfg = MessagingConfig::resolve(None, None, None, None).unwrap();
        assert_eq!(cfg.backend, "kafka");
        assert_eq!(cfg.group_id, "kafka-bootstrap");
    }

    #[test]
    fn backend_and_group_overrides() {
        let cfg =
            MessagingConfig::resolve(None, None, Some("mock"), Some("chat-workers")).unwrap();
        assert_eq!(cfg.backend, "mock");
        assert_eq!(cfg.group_id, "chat-workers");
    }
}

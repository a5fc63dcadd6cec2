//! Application-wide error types.

use thiserror::Error;

use crate::messaging::client::BrokerError;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("config error: {0}")]
    Config(String),

    #[error("logger error: {0}")]
    Logger(String),

    #[error("messaging error: {0}")]
    Messaging(#[from] BrokerError),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

// Library root — exposes internals for integration tests and crate consumers.
// The binary entry point is src/main.rs.

pub mod bootstrap;
pub mod config;
pub mod error;
pub mod messaging;

pub use config::MessagingConfig;
pub use error::AppError;
pub use messaging::{Messaging, global, init_global};

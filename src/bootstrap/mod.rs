//! Bootstrap layer — modules that run before anything else in the process.
//!
//! - **logger** — tracing-subscriber initialisation.

pub mod logger;

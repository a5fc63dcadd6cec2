//! kafka-bootstrap — messaging bootstrap entry point.
//!
//! Startup sequence:
//!   1. Load .env (if present)
//!   2. Init logger
//!   3. Resolve messaging config from env
//!   4. Publish the process-wide messaging handle
//!   5. Print status and exit

use tracing::info;

use kafka_bootstrap::bootstrap::logger;
use kafka_bootstrap::config::MessagingConfig;
use kafka_bootstrap::error::AppError;
use kafka_bootstrap::messaging;

fn main() {
    if let Err(e) = run() {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}

fn run() -> Result<(), AppError> {
    // Load .env if present — ignore errors (file is optional).
    let _ = dotenvy::dotenv();

    logger::init("info")?;

    let config = MessagingConfig::from_env()?;
    let handle = messaging::init_global(&config)?;

    match handle.client() {
        Some(client) => {
            info!(
                backend = client.backend_name(),
                brokers = ?client.brokers(),
                "messaging ready"
            );
            println!("✓ messaging enabled: {:?}", client.brokers());
        }
        None => {
            info!("messaging disabled by {}", kafka_bootstrap::config::ENV_DISABLED);
            println!("✓ messaging disabled");
        }
    }

    Ok(())
}

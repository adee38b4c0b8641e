//! Thin wrapper around the Redis-backed message broker.
//!
//! Everything queue-related goes through this crate so the rest of the
//! workspace never names `broccoli_queue` directly.

pub mod error;

pub use broccoli_queue::{
    brokers::broker::BrokerMessage,
    error::BroccoliError,
    queue::{BroccoliQueue, ConsumeOptions},
};
use tracing::info;

pub use error::MqError;

pub type Mq = BroccoliQueue;
pub type ConsumeConfig = ConsumeOptions;

/// Broker connection settings.
pub struct MqConfig {
    pub url: String,
    pub pool_size: u8,
}

/// Connect to the broker and build a queue handle.
///
/// The handle is cheap to clone and is constructed once at process start,
/// then injected into whatever consumes or publishes.
pub async fn connect(config: MqConfig) -> Result<Mq, MqError> {
    let queue = BroccoliQueue::builder(&config.url)
        .pool_connections(config.pool_size)
        .build()
        .await
        .map_err(MqError::from)?;

    info!(pool_size = config.pool_size, "MQ connected");
    Ok(queue)
}

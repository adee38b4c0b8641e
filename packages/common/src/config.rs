use serde::Deserialize;

/// Shared MQ configuration for processes that touch the status event queue.
#[derive(Debug, Deserialize, Clone)]
pub struct MqAppConfig {
    /// Redis connection URL. Default: "redis://localhost:6379".
    #[serde(default = "default_mq_url")]
    pub url: String,
    /// Connection pool size. Default: 5.
    #[serde(default = "default_mq_pool_size")]
    pub pool_size: u8,
    /// Queue carrying status events (scheduler publishes, worker consumes).
    /// Default: "contest-status".
    #[serde(default = "default_status_queue_name")]
    pub status_queue_name: String,
}

fn default_mq_url() -> String {
    "redis://localhost:6379".into()
}
fn default_mq_pool_size() -> u8 {
    5
}
fn default_status_queue_name() -> String {
    "contest-status".into()
}

impl Default for MqAppConfig {
    fn default() -> Self {
        Self {
            url: default_mq_url(),
            pool_size: default_mq_pool_size(),
            status_queue_name: default_status_queue_name(),
        }
    }
}

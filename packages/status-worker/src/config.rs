use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;

pub use common::config::MqAppConfig;

#[derive(Debug, Deserialize, Clone)]
pub struct DatabaseConfig {
    pub url: String,
}

/// Boundary scheduler settings.
#[derive(Debug, Deserialize, Clone)]
pub struct SchedulerConfig {
    /// Disable when an external system schedules boundary events.
    #[serde(default = "default_scheduler_enabled")]
    pub enabled: bool,
    /// Scan interval in seconds. Default: 15.
    #[serde(default = "default_scheduler_interval_secs")]
    pub interval_secs: u64,
}

fn default_scheduler_enabled() -> bool {
    true
}
fn default_scheduler_interval_secs() -> u64 {
    15
}

impl SchedulerConfig {
    /// Scan interval as a duration, never below one second.
    /// `tokio::time::interval` panics on a zero period.
    pub fn interval(&self) -> std::time::Duration {
        std::time::Duration::from_secs(self.interval_secs.max(1))
    }
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        Self {
            enabled: default_scheduler_enabled(),
            interval_secs: default_scheduler_interval_secs(),
        }
    }
}

/// Status worker application configuration.
#[derive(Debug, Deserialize, Clone)]
pub struct WorkerAppConfig {
    pub database: DatabaseConfig,
    #[serde(default)]
    pub mq: MqAppConfig,
    #[serde(default)]
    pub scheduler: SchedulerConfig,
}

impl WorkerAppConfig {
    pub fn load() -> Result<Self, ConfigError> {
        let config_path =
            std::env::var("PODIUM_CONFIG").unwrap_or_else(|_| "config/config".to_string());

        let s = Config::builder()
            .set_default("database.url", "postgres://localhost:5432/podium")?
            .set_default("mq.url", "redis://localhost:6379")?
            .set_default("mq.pool_size", 5_i64)?
            .set_default("mq.status_queue_name", "contest-status")?
            .set_default("scheduler.enabled", true)?
            .set_default("scheduler.interval_secs", 15_i64)?
            .add_source(File::with_name(&config_path).required(false))
            // Override from environment (e.g., PODIUM__DATABASE__URL)
            .add_source(Environment::with_prefix("PODIUM").separator("__"))
            .build()?;

        s.try_deserialize()
    }
}

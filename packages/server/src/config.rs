use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;

#[derive(Debug, Deserialize, Clone)]
pub struct CorsConfig {
    pub allow_origins: Vec<String>,
    pub max_age: u64,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub cors: CorsConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct DatabaseConfig {
    pub url: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct AuthConfig {
    pub jwt_secret: String,
    /// Lifetime of the magic-link login ticket.
    pub login_ticket_ttl_minutes: i64,
    /// Lifetime of the session token issued at callback.
    pub session_ttl_hours: i64,
    /// Base URL the callback redirects to after setting the session cookie.
    pub frontend_url: String,
    /// Base URL embedded in the emitted magic link.
    pub backend_url: String,
    /// Seeded admin account.
    pub admin_email: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub auth: AuthConfig,
}

impl AppConfig {
    pub fn load() -> Result<Self, ConfigError> {
        let s = Config::builder()
            .set_default("server.host", "127.0.0.1")?
            .set_default("server.port", 3000)?
            .set_default("server.cors.allow_origins", vec!["http://localhost:5173"])?
            .set_default("server.cors.max_age", 3600)?
            .set_default("auth.login_ticket_ttl_minutes", 15)?
            .set_default("auth.session_ttl_hours", 24)?
            .set_default("auth.frontend_url", "http://localhost:5173")?
            .set_default("auth.backend_url", "http://localhost:3000")?
            .set_default("auth.admin_email", "admin@podium.local")?
            // Load from config/config.toml
            .add_source(File::with_name("config/config").required(false))
            // Override from environment (e.g., PODIUM__AUTH__JWT_SECRET)
            .add_source(Environment::with_prefix("PODIUM").separator("__"))
            .build()?;

        s.try_deserialize()
    }
}

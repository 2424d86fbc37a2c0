//! Centralized configuration (environment variables + defaults).

pub const DEFAULT_DATABASE_URL: &str = "sqlite://plants.db";
pub const DEFAULT_BIND_ADDR: &str = "0.0.0.0:5555";
pub const DEFAULT_MAX_CONNECTIONS: u32 = 5;
pub const DEFAULT_LOG_FILTER: &str = "plant_catalog=info,tower_http=info";

/// Loads `.env` into the process environment if present.
pub fn load_dotenv() {
    dotenv::dotenv().ok();
}

/// SQLite connection string. The database file is created if it does not exist.
pub fn database_url() -> String {
    std::env::var("DATABASE_URL").unwrap_or_else(|_| DEFAULT_DATABASE_URL.to_string())
}

/// Address the HTTP server listens on.
pub fn bind_addr() -> String {
    std::env::var("BIND_ADDR").unwrap_or_else(|_| DEFAULT_BIND_ADDR.to_string())
}

/// Connection pool size (at least 1).
pub fn max_connections() -> u32 {
    std::env::var("DB_MAX_CONNECTIONS")
        .ok()
        .and_then(|v| v.parse::<u32>().ok())
        .unwrap_or(DEFAULT_MAX_CONNECTIONS)
        .max(1)
}

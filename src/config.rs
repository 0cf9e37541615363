use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;

pub const DEFAULT_DATABASE_PATH: &str = "notepad.db";
pub const DEFAULT_HOST: &str = "0.0.0.0";
pub const DEFAULT_PORT: u16 = 8000;
pub const DEFAULT_STATIC_DIR: &str = "static";
pub const DEFAULT_STARTUP_RETRIES: u32 = 10;
pub const DEFAULT_RETRY_DELAY_SECS: u64 = 3;

/// Configuration for `notepad serve`.
#[derive(Debug, Clone, PartialEq)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub database_path: PathBuf,
    /// Prebuilt frontend bundle served at `/` when the directory exists.
    pub static_dir: Option<PathBuf>,
    /// Schema initialisation attempts before giving up at startup.
    pub startup_retries: u32,
    pub retry_delay: Duration,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            database_path: PathBuf::from(DEFAULT_DATABASE_PATH),
            static_dir: Some(PathBuf::from(DEFAULT_STATIC_DIR)),
            startup_retries: DEFAULT_STARTUP_RETRIES,
            retry_delay: Duration::from_secs(DEFAULT_RETRY_DELAY_SECS),
        }
    }
}

impl ServerConfig {
    pub fn bind_address(&self) -> String {
        match self.host.parse::<std::net::IpAddr>() {
            Ok(ip) => SocketAddr::new(ip, self.port).to_string(),
            Err(_) => format!("{}:{}", self.host, self.port),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = ServerConfig::default();
        assert_eq!(config.port, 8000);
        assert_eq!(config.startup_retries, 10);
        assert_eq!(config.retry_delay, Duration::from_secs(3));
        assert_eq!(config.static_dir, Some(PathBuf::from("static")));
        assert_eq!(config.bind_address(), "0.0.0.0:8000");
    }

    #[test]
    fn test_bind_address_formats_ipv6_and_hostnames() {
        let mut config = ServerConfig {
            host: "::1".to_string(),
            port: 9000,
            ..ServerConfig::default()
        };
        assert_eq!(config.bind_address(), "[::1]:9000");

        config.host = "localhost".to_string();
        assert_eq!(config.bind_address(), "localhost:9000");
    }
}

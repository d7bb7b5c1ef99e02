use std::env;
use std::fmt;
use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;

pub const DEFAULT_VENDOR_SEARCH_URL: &str = "https://www.misumi.com/vona2/result/?SearchString=";
pub const DEFAULT_PROJECT_NAME: &str = "COTS-Selection";

/// Distinguishes runtime behavior for different stages of the service.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEnvironment {
    Development,
    Test,
    Production,
}

impl AppEnvironment {
    fn from_str(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "prod" | "production" => Self::Production,
            "test" | "ci" => Self::Test,
            _ => Self::Development,
        }
    }
}

/// Top-level configuration for the application.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub environment: AppEnvironment,
    pub server: ServerConfig,
    pub telemetry: TelemetryConfig,
    pub selector: SelectorConfig,
}

impl AppConfig {
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let environment = AppEnvironment::from_str(
            &env::var("APP_ENV").unwrap_or_else(|_| "development".to_string()),
        );

        let host = env::var("APP_HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
        let port = env::var("APP_PORT")
            .unwrap_or_else(|_| "3000".to_string())
            .parse::<u16>()
            .map_err(|_| ConfigError::InvalidPort)?;

        let log_level = env::var("APP_LOG_LEVEL").unwrap_or_else(|_| "info".to_string());

        Ok(Self {
            environment,
            server: ServerConfig { host, port },
            telemetry: TelemetryConfig { log_level },
            selector: SelectorConfig::from_env()?,
        })
    }
}

/// Settings controlling the HTTP server binding.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl ServerConfig {
    pub fn socket_addr(&self) -> Result<SocketAddr, ConfigError> {
        if self.host.eq_ignore_ascii_case("localhost") {
            return Ok(SocketAddr::new(IpAddr::from([127, 0, 0, 1]), self.port));
        }

        let ip: IpAddr = self
            .host
            .parse()
            .map_err(|source| ConfigError::InvalidHost { source })?;

        Ok(SocketAddr::new(ip, self.port))
    }
}

/// Tracing and metrics controls.
#[derive(Debug, Clone)]
pub struct TelemetryConfig {
    pub log_level: String,
}

/// Knobs for the recommendation pipeline and its exports.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectorConfig {
    /// Prefix for vendor links on records that do not carry their own URL.
    pub vendor_search_url: String,
    /// Optional JSON catalog replacing the built-in reference catalog.
    pub catalog_path: Option<PathBuf>,
    pub default_project_name: String,
}

impl SelectorConfig {
    fn from_env() -> Result<Self, ConfigError> {
        let vendor_search_url = env::var("SELECTOR_VENDOR_SEARCH_URL")
            .unwrap_or_else(|_| DEFAULT_VENDOR_SEARCH_URL.to_string());
        if !(vendor_search_url.starts_with("http://") || vendor_search_url.starts_with("https://"))
        {
            return Err(ConfigError::InvalidVendorSearchUrl(vendor_search_url));
        }

        let catalog_path = env::var("SELECTOR_CATALOG_PATH")
            .ok()
            .filter(|value| !value.trim().is_empty())
            .map(PathBuf::from);

        let default_project_name = env::var("SELECTOR_PROJECT_NAME")
            .ok()
            .filter(|value| !value.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_PROJECT_NAME.to_string());

        Ok(Self {
            vendor_search_url,
            catalog_path,
            default_project_name,
        })
    }
}

impl Default for SelectorConfig {
    fn default() -> Self {
        Self {
            vendor_search_url: DEFAULT_VENDOR_SEARCH_URL.to_string(),
            catalog_path: None,
            default_project_name: DEFAULT_PROJECT_NAME.to_string(),
        }
    }
}

#[derive(Debug)]
pub enum ConfigError {
    InvalidPort,
    InvalidHost { source: std::net::AddrParseError },
    InvalidVendorSearchUrl(String),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidPort => write!(f, "APP_PORT must be a valid u16"),
            ConfigError::InvalidHost { .. } => {
                write!(f, "APP_HOST must parse to an IPv4 or IPv6 address")
            }
            ConfigError::InvalidVendorSearchUrl(value) => write!(
                f,
                "SELECTOR_VENDOR_SEARCH_URL must be an http(s) URL, got '{}'",
                value
            ),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::InvalidPort | ConfigError::InvalidVendorSearchUrl(_) => None,
            ConfigError::InvalidHost { source } => Some(source),
        }
    }
}

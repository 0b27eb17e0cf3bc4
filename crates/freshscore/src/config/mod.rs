use crate::freshness::model::ScoringConfig;
use crate::freshness::presentation::Theme;
use std::env;
use std::fmt;
use std::net::{IpAddr, SocketAddr};
use std::time::Duration;

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
    pub dashboard: DashboardConfig,
    pub scoring: ScoringConfig,
    pub animation: AnimationConfig,
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

        let theme = match env::var("APP_THEME") {
            Ok(raw) => raw
                .parse::<Theme>()
                .map_err(|_| ConfigError::InvalidTheme { value: raw })?,
            Err(_) => Theme::default(),
        };

        let defaults = ScoringConfig::default();
        let scoring = ScoringConfig {
            trees: parse_var("APP_SCORING_TREES", defaults.trees)?,
            samples: parse_var("APP_SCORING_SAMPLES", defaults.samples)?,
            noise: parse_var("APP_SCORING_NOISE", defaults.noise)?,
            forest_seed: parse_seed("APP_SCORING_SEED", defaults.forest_seed)?,
            ..defaults
        };

        let animation = AnimationConfig {
            url: env::var("APP_ANIMATION_URL")
                .ok()
                .map(|raw| raw.trim().to_string())
                .filter(|raw| !raw.is_empty()),
            timeout: Duration::from_millis(parse_var("APP_ANIMATION_TIMEOUT_MS", 3000_u64)?),
        };

        Ok(Self {
            environment,
            server: ServerConfig { host, port },
            telemetry: TelemetryConfig {
                log_level,
                ansi: environment == AppEnvironment::Development,
            },
            dashboard: DashboardConfig {
                default_theme: theme,
            },
            scoring,
            animation,
        })
    }
}

fn parse_var<T: std::str::FromStr>(var: &'static str, default: T) -> Result<T, ConfigError> {
    match env::var(var) {
        Ok(raw) => raw
            .trim()
            .parse::<T>()
            .map_err(|_| ConfigError::InvalidNumber { var }),
        Err(_) => Ok(default),
    }
}

fn parse_seed(var: &'static str, default: Option<u64>) -> Result<Option<u64>, ConfigError> {
    match env::var(var) {
        Ok(raw) if raw.trim().eq_ignore_ascii_case("none") => Ok(None),
        Ok(raw) => raw
            .trim()
            .parse::<u64>()
            .map(Some)
            .map_err(|_| ConfigError::InvalidNumber { var }),
        Err(_) => Ok(default),
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

/// Tracing controls.
#[derive(Debug, Clone)]
pub struct TelemetryConfig {
    pub log_level: String,
    /// Colourised output, only enabled for local development.
    pub ansi: bool,
}

/// Presentation defaults applied when a request carries no theme.
#[derive(Debug, Clone, Copy)]
pub struct DashboardConfig {
    pub default_theme: Theme,
}

/// Where the decorative animation is fetched from, if anywhere.
#[derive(Debug, Clone)]
pub struct AnimationConfig {
    pub url: Option<String>,
    pub timeout: Duration,
}

#[derive(Debug)]
pub enum ConfigError {
    InvalidPort,
    InvalidHost { source: std::net::AddrParseError },
    InvalidNumber { var: &'static str },
    InvalidTheme { value: String },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidPort => write!(f, "APP_PORT must be a valid u16"),
            ConfigError::InvalidHost { .. } => {
                write!(f, "APP_HOST must parse to an IPv4 or IPv6 address")
            }
            ConfigError::InvalidNumber { var } => {
                write!(f, "{var} must be a valid number")
            }
            ConfigError::InvalidTheme { value } => {
                write!(f, "APP_THEME '{value}' is not one of: light, dark")
            }
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::InvalidHost { source } => Some(source),
            ConfigError::InvalidPort
            | ConfigError::InvalidNumber { .. }
            | ConfigError::InvalidTheme { .. } => None,
        }
    }
}

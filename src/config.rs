//! Application configuration loaded from environment variables.
//!
//! Only the Strava OAuth app credentials and the listen port come from the
//! environment in production. Service base URLs are fixed, but are kept on
//! the config so tests can point them at local mock servers.

use std::env;
use std::str::FromStr;
use std::time::Duration;

/// Strava OAuth token endpoint.
pub const STRAVA_OAUTH_TOKEN_URL: &str = "https://www.strava.com/oauth/token";
/// Strava REST API base.
pub const STRAVA_API_URL: &str = "https://www.strava.com/api/v3";
/// Runaway service base (token storage and data ingestion).
pub const RUNAWAY_URL: &str = "https://runaway-node-api-203308554831.us-central1.run.app";
/// Shared secret Strava echoes back during the subscription handshake.
pub const DEFAULT_WEBHOOK_VERIFY_TOKEN: &str = "at8rQqYOpROWL6HNgEXiiXb6ky2dhWcu";

const DEFAULT_PORT: u16 = 8080;
const DEFAULT_HTTP_TIMEOUT_SECS: u64 = 10;

/// How the four destination writes are joined.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DispatchPolicy {
    /// Wait for every write, then report all failures together.
    #[default]
    WaitAll,
    /// Return on the first failed write and cancel the ones still in flight.
    FailFast,
}

impl FromStr for DispatchPolicy {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "wait_all" | "wait-all" => Ok(DispatchPolicy::WaitAll),
            "fail_fast" | "fail-fast" => Ok(DispatchPolicy::FailFast),
            _ => Err(ConfigError::Invalid("DISPATCH_POLICY", s.to_string())),
        }
    }
}

/// Application configuration, loaded once at startup.
#[derive(Debug, Clone)]
pub struct Config {
    /// Strava OAuth client ID
    pub strava_client_id: String,
    /// Strava OAuth client secret
    pub strava_client_secret: String,
    /// Server port
    pub port: u16,
    /// Webhook verification token
    pub webhook_verify_token: String,
    /// Per-request timeout for every outbound call
    pub http_timeout: Duration,
    pub dispatch_policy: DispatchPolicy,

    pub strava_oauth_url: String,
    pub strava_api_url: String,
    pub runaway_url: String,
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok(); // Load .env file if present

        let http_timeout = match env::var("HTTP_TIMEOUT_SECS") {
            Ok(v) => parse_http_timeout(v)?,
            Err(_) => Duration::from_secs(DEFAULT_HTTP_TIMEOUT_SECS),
        };

        let dispatch_policy = match env::var("DISPATCH_POLICY") {
            Ok(v) => v.parse()?,
            Err(_) => DispatchPolicy::default(),
        };

        Ok(Self {
            strava_client_id: env::var("STRAVA_CLIENT_ID")
                .map(|v| v.trim().to_string())
                .map_err(|_| ConfigError::Missing("STRAVA_CLIENT_ID"))?,
            strava_client_secret: env::var("STRAVA_CLIENT_SECRET")
                .map(|v| v.trim().to_string())
                .map_err(|_| ConfigError::Missing("STRAVA_CLIENT_SECRET"))?,
            port: env::var("PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(DEFAULT_PORT),
            webhook_verify_token: env::var("WEBHOOK_VERIFY_TOKEN")
                .map(|v| v.trim().to_string())
                .unwrap_or_else(|_| DEFAULT_WEBHOOK_VERIFY_TOKEN.to_string()),
            http_timeout,
            dispatch_policy,
            strava_oauth_url: STRAVA_OAUTH_TOKEN_URL.to_string(),
            strava_api_url: STRAVA_API_URL.to_string(),
            runaway_url: RUNAWAY_URL.to_string(),
        })
    }

    /// Config for tests. All outbound traffic goes to `base_url`
    /// (typically a mock server): `/oauth/token`, `/api/v3/...` and
    /// `/runaway/...`.
    pub fn test_default(base_url: &str) -> Self {
        Self {
            strava_client_id: "test_client_id".to_string(),
            strava_client_secret: "test_secret".to_string(),
            port: DEFAULT_PORT,
            webhook_verify_token: "test_verify_token".to_string(),
            http_timeout: Duration::from_secs(2),
            dispatch_policy: DispatchPolicy::WaitAll,
            strava_oauth_url: format!("{base_url}/oauth/token"),
            strava_api_url: format!("{base_url}/api/v3"),
            runaway_url: format!("{base_url}/runaway"),
        }
    }
}

/// Whole seconds, at least one. A zero timeout would fail every call.
fn parse_http_timeout(v: String) -> Result<Duration, ConfigError> {
    match v.trim().parse::<u64>() {
        Ok(secs) if secs > 0 => Ok(Duration::from_secs(secs)),
        _ => Err(ConfigError::Invalid("HTTP_TIMEOUT_SECS", v)),
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    Missing(&'static str),

    #[error("Invalid value for {0}: {1:?}")]
    Invalid(&'static str, String),
}

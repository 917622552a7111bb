use std::env;
use std::fmt;
use std::time::Duration;

use anyhow::{bail, Context, Result};
use insure_agents::{DEFAULT_GEMINI_API_BASE, DEFAULT_GEMINI_MODEL, DEFAULT_LINE_API_BASE};

const DEFAULT_PORT: u16 = 3000;
const DEFAULT_BIND_HOST: &str = "0.0.0.0";
const DEFAULT_HTTP_TIMEOUT_SECONDS: u64 = 20;

#[derive(Clone)]
pub struct AppConfig {
    pub line_channel_token: String,
    pub line_channel_secret: String,
    pub gemini_api_key: String,
    pub gemini_model: String,
    pub bind_host: String,
    pub port: u16,
    pub line_api_base: String,
    pub gemini_api_base: String,
    pub http_timeout: Duration,
}

impl AppConfig {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let optional = |key: &str| {
            lookup(key)
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
        };
        let required = |key: &str| {
            optional(key)
                .with_context(|| format!("missing required environment variable {}", key))
        };

        let port = match optional("PORT") {
            Some(value) => value
                .parse::<u16>()
                .with_context(|| format!("PORT must be a valid port number, got {:?}", value))?,
            None => DEFAULT_PORT,
        };
        let http_timeout_seconds = match optional("INSURE_HTTP_TIMEOUT_SECONDS") {
            Some(value) => value.parse::<u64>().with_context(|| {
                format!(
                    "INSURE_HTTP_TIMEOUT_SECONDS must be a whole number of seconds, got {:?}",
                    value
                )
            })?,
            None => DEFAULT_HTTP_TIMEOUT_SECONDS,
        };
        if http_timeout_seconds == 0 {
            bail!("INSURE_HTTP_TIMEOUT_SECONDS must be greater than zero");
        }

        Ok(Self {
            line_channel_token: required("LINE_CHANNEL_TOKEN")?,
            line_channel_secret: required("LINE_CHANNEL_SECRET")?,
            gemini_api_key: required("GEMINI_API_KEY")?,
            gemini_model: optional("GEMINI_MODEL")
                .unwrap_or_else(|| DEFAULT_GEMINI_MODEL.to_string()),
            bind_host: optional("INSURE_BIND_HOST")
                .unwrap_or_else(|| DEFAULT_BIND_HOST.to_string()),
            port,
            line_api_base: optional("INSURE_LINE_API_BASE")
                .unwrap_or_else(|| DEFAULT_LINE_API_BASE.to_string()),
            gemini_api_base: optional("INSURE_GEMINI_API_BASE")
                .unwrap_or_else(|| DEFAULT_GEMINI_API_BASE.to_string()),
            http_timeout: Duration::from_secs(http_timeout_seconds),
        })
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.bind_host, self.port)
    }
}

impl fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AppConfig")
            .field("line_channel_token", &"[redacted]")
            .field("line_channel_secret", &"[redacted]")
            .field("gemini_api_key", &"[redacted]")
            .field("gemini_model", &self.gemini_model)
            .field("bind_host", &self.bind_host)
            .field("port", &self.port)
            .field("line_api_base", &self.line_api_base)
            .field("gemini_api_base", &self.gemini_api_base)
            .field("http_timeout", &self.http_timeout)
            .finish()
    }
}

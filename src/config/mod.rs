//! Application configuration
//!
//! Built once at process start from environment variables (plus CLI
//! overrides in `main`) and passed into the web layer through `AppState`.
//! Nothing reads the environment after startup.

use std::path::PathBuf;

use tracing::warn;
use url::Url;

#[derive(Debug, Clone)]
pub struct Config {
    pub web: WebConfig,
    pub proxy: ProxyConfig,
    pub channels_file: PathBuf,
}

#[derive(Debug, Clone)]
pub struct WebConfig {
    pub host: String,
    pub port: u16,
    /// Externally visible base URL (`RENDER_EXTERNAL_URL`). Informational
    /// only; no rendered output embeds it.
    pub base_url: String,
}

#[derive(Debug, Clone, Default)]
pub struct ProxyConfig {
    /// Validated proxy base URL, without trailing slash. `None` when
    /// `PROXY_URL` is unset or not URL-like.
    pub base_url: Option<String>,
}

impl ProxyConfig {
    /// Stream URL for a channel: `<base>/hls/<id>` behind the proxy,
    /// the channel's original URL otherwise.
    pub fn stream_url_for(&self, channel_id: &str, original_url: &str) -> String {
        match &self.base_url {
            Some(base) => format!("{base}/hls/{channel_id}"),
            None => original_url.to_string(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            web: WebConfig {
                host: "0.0.0.0".to_string(),
                port: 8080,
                base_url: "http://localhost:8080".to_string(),
            },
            proxy: ProxyConfig::default(),
            channels_file: PathBuf::from("channels.json"),
        }
    }
}

impl Config {
    /// Load configuration from the environment, falling back to defaults
    /// for anything unset or unparseable.
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Ok(port) = std::env::var("PORT") {
            match port.parse() {
                Ok(port) => config.web.port = port,
                Err(_) => warn!("Ignoring unparseable PORT value: {}", port),
            }
        }

        if let Ok(base_url) = std::env::var("RENDER_EXTERNAL_URL") {
            if !base_url.is_empty() {
                config.web.base_url = base_url;
            }
        }

        if let Ok(proxy_url) = std::env::var("PROXY_URL") {
            config.proxy.base_url = parse_proxy_url(&proxy_url);
        }

        config
    }
}

/// Validate a proxy base URL. Accepts absolute http(s) URLs and strips any
/// trailing slash; anything else is rejected so streams fall back to their
/// original URLs.
pub fn parse_proxy_url(value: &str) -> Option<String> {
    match Url::parse(value) {
        Ok(url) if url.scheme() == "http" || url.scheme() == "https" => {
            Some(value.trim_end_matches('/').to_string())
        }
        _ => {
            warn!("Ignoring non-URL PROXY_URL value: {}", value);
            None
        }
    }
}

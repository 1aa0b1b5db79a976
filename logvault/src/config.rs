//! Configuration management
//!
//! Loaded from a TOML file (default `logvault.toml`); every field has a
//! default so an empty or missing file is valid. Selected values can be
//! overridden from the environment, see [`Config::apply_env`].

use anyhow::{anyhow, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use std::time::Duration;

/// Main configuration
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct Config {
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub elasticsearch: ElasticsearchConfig,
    #[serde(default)]
    pub observability: ObservabilityConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ApiConfig {
    #[serde(default = "default_api_title")]
    pub title: String,
    #[serde(default = "default_api_version")]
    pub version: String,
}

fn default_api_title() -> String {
    "Log Management Platform API".to_string()
}

fn default_api_version() -> String {
    "1.0.0".to_string()
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            title: default_api_title(),
            version: default_api_version(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerConfig {
    #[serde(default = "default_bind_addr")]
    pub bind_addr: String,
    #[serde(default)]
    pub cors: CorsConfig,
}

fn default_bind_addr() -> String {
    "0.0.0.0:8000".to_string()
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: default_bind_addr(),
            cors: CorsConfig::default(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CorsConfig {
    #[serde(default = "default_true")]
    pub enabled: bool,
    /// Allowed origins. "*" allows any origin.
    #[serde(default = "default_any")]
    pub origins: Vec<String>,
    /// Allowed methods. "*" allows any method.
    #[serde(default = "default_any")]
    pub methods: Vec<String>,
    /// Allowed request headers. "*" allows any header.
    #[serde(default = "default_any")]
    pub headers: Vec<String>,
    #[serde(default = "default_true")]
    pub allow_credentials: bool,
}

fn default_true() -> bool {
    true
}

fn default_any() -> Vec<String> {
    vec!["*".to_string()]
}

impl Default for CorsConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            origins: default_any(),
            methods: default_any(),
            headers: default_any(),
            allow_credentials: true,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ElasticsearchConfig {
    #[serde(default = "default_es_url")]
    pub url: String,
    /// Applied to every backend request
    #[serde(default = "default_request_timeout")]
    pub request_timeout_secs: u64,
    /// First segment of every index name and pattern
    #[serde(default = "default_index_prefix")]
    pub index_prefix: String,
}

fn default_es_url() -> String {
    "http://localhost:9200".to_string()
}

fn default_request_timeout() -> u64 {
    30
}

fn default_index_prefix() -> String {
    "logs".to_string()
}

impl Default for ElasticsearchConfig {
    fn default() -> Self {
        Self {
            url: default_es_url(),
            request_timeout_secs: default_request_timeout(),
            index_prefix: default_index_prefix(),
        }
    }
}

impl ElasticsearchConfig {
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ObservabilityConfig {
    /// Log output format: "pretty" or "json"
    /// Override with LOG_FORMAT env var
    #[serde(default = "default_log_format")]
    pub log_format: String,

    /// Log level filter string
    /// Override with RUST_LOG env var
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Enable Prometheus metrics at GET /metrics
    #[serde(default = "default_true")]
    pub metrics_enabled: bool,
}

fn default_log_format() -> String {
    "pretty".to_string()
}

fn default_log_level() -> String {
    "info,logvault=debug".to_string()
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_format: default_log_format(),
            log_level: default_log_level(),
            metrics_enabled: true,
        }
    }
}

/// Split a comma-separated list; "*" stays a single wildcard entry.
pub fn parse_list(value: &str) -> Vec<String> {
    if value.trim() == "*" {
        return default_any();
    }
    value
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(String::from)
        .collect()
}

impl Config {
    /// Load config from file path, or create default
    pub fn load_or_create(config_path: &Path) -> Result<Self> {
        if config_path.exists() {
            let content = fs::read_to_string(config_path)?;
            let config: Config = toml::from_str(&content)?;
            config.validate()?;
            Ok(config)
        } else {
            let config = Config::default();
            // Try to save default config
            if let Some(parent) = config_path.parent() {
                let _ = fs::create_dir_all(parent);
            }
            let _ = config.save(config_path);
            Ok(config)
        }
    }

    /// Save config to file
    pub fn save(&self, path: &Path) -> Result<()> {
        let content = toml::to_string_pretty(self)?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, content)?;
        Ok(())
    }

    /// Apply environment overrides:
    ///
    /// | variable                         | field                                |
    /// |----------------------------------|--------------------------------------|
    /// | `ELASTICSEARCH_HOST`             | `elasticsearch.url`                  |
    /// | `ELASTICSEARCH_REQUEST_TIMEOUT`  | `elasticsearch.request_timeout_secs` |
    /// | `ELASTICSEARCH_INDEX_PREFIX`     | `elasticsearch.index_prefix`         |
    /// | `CORS_ALLOW_ORIGINS`             | `server.cors.origins`                |
    /// | `CORS_ALLOW_METHODS`             | `server.cors.methods`                |
    /// | `CORS_ALLOW_HEADERS`             | `server.cors.headers`                |
    /// | `CORS_ALLOW_CREDENTIALS`         | `server.cors.allow_credentials`      |
    /// | `LOG_FORMAT`                     | `observability.log_format`           |
    /// | `API_HOST` / `API_PORT`          | `server.bind_addr` host / port       |
    pub fn apply_env(&mut self) -> Result<()> {
        self.apply_vars(|key| std::env::var(key).ok())
    }

    fn apply_vars(&mut self, var: impl Fn(&str) -> Option<String>) -> Result<()> {
        if let Some(url) = var("ELASTICSEARCH_HOST") {
            self.elasticsearch.url = url;
        }
        if let Some(timeout) = var("ELASTICSEARCH_REQUEST_TIMEOUT") {
            self.elasticsearch.request_timeout_secs = timeout
                .parse()
                .map_err(|e| anyhow!("invalid ELASTICSEARCH_REQUEST_TIMEOUT: {}", e))?;
        }
        if let Some(prefix) = var("ELASTICSEARCH_INDEX_PREFIX") {
            self.elasticsearch.index_prefix = prefix;
        }
        if let Some(origins) = var("CORS_ALLOW_ORIGINS") {
            self.server.cors.origins = parse_list(&origins);
        }
        if let Some(methods) = var("CORS_ALLOW_METHODS") {
            self.server.cors.methods = parse_list(&methods);
        }
        if let Some(headers) = var("CORS_ALLOW_HEADERS") {
            self.server.cors.headers = parse_list(&headers);
        }
        if let Some(creds) = var("CORS_ALLOW_CREDENTIALS") {
            self.server.cors.allow_credentials = creds
                .parse()
                .map_err(|e| anyhow!("invalid CORS_ALLOW_CREDENTIALS: {}", e))?;
        }
        if let Some(format) = var("LOG_FORMAT") {
            self.observability.log_format = format;
        }

        let host = var("API_HOST");
        let port = var("API_PORT");
        if host.is_some() || port.is_some() {
            let (current_host, current_port) = self
                .server
                .bind_addr
                .rsplit_once(':')
                .unwrap_or((self.server.bind_addr.as_str(), "8000"));
            let host = host.unwrap_or_else(|| current_host.to_string());
            let port = port.unwrap_or_else(|| current_port.to_string());
            port.parse::<u16>()
                .map_err(|e| anyhow!("invalid API_PORT: {}", e))?;
            self.server.bind_addr = format!("{}:{}", host, port);
        }
        self.validate()
    }

    pub fn validate(&self) -> Result<()> {
        if self.elasticsearch.index_prefix.is_empty() {
            return Err(anyhow!("elasticsearch.index_prefix must not be empty"));
        }
        if self.elasticsearch.request_timeout_secs == 0 {
            return Err(anyhow!("elasticsearch.request_timeout_secs must be positive"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use tempfile::tempdir;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.server.bind_addr, "0.0.0.0:8000");
        assert_eq!(config.elasticsearch.url, "http://localhost:9200");
        assert_eq!(config.elasticsearch.request_timeout(), Duration::from_secs(30));
        assert_eq!(config.elasticsearch.index_prefix, "logs");
        assert_eq!(config.server.cors.origins, vec!["*"]);
        assert_eq!(config.api.title, "Log Management Platform API");
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config: Config = toml::from_str(
            r#"
            [elasticsearch]
            index_prefix = "prod-logs"
            "#,
        )
        .unwrap();
        assert_eq!(config.elasticsearch.index_prefix, "prod-logs");
        assert_eq!(config.elasticsearch.url, "http://localhost:9200");
        assert!(config.observability.metrics_enabled);
    }

    #[test]
    fn test_load_or_create_writes_default() {
        let temp = tempdir().unwrap();
        let path = temp.path().join("conf/logvault.toml");
        let config = Config::load_or_create(&path).unwrap();
        assert_eq!(config.elasticsearch.index_prefix, "logs");
        assert!(path.exists());

        let reloaded = Config::load_or_create(&path).unwrap();
        assert_eq!(reloaded.server.bind_addr, config.server.bind_addr);
    }

    #[test]
    fn test_load_rejects_empty_prefix() {
        let temp = tempdir().unwrap();
        let path = temp.path().join("logvault.toml");
        fs::write(&path, "[elasticsearch]\nindex_prefix = \"\"\n").unwrap();
        assert!(Config::load_or_create(&path).is_err());
    }

    #[test]
    fn test_env_overrides() {
        let vars = HashMap::from([
            ("ELASTICSEARCH_HOST", "http://es:9200"),
            ("ELASTICSEARCH_REQUEST_TIMEOUT", "5"),
            ("ELASTICSEARCH_INDEX_PREFIX", "app"),
            ("CORS_ALLOW_ORIGINS", "http://a.test, http://b.test"),
            ("CORS_ALLOW_CREDENTIALS", "false"),
        ]);
        let mut config = Config::default();
        config
            .apply_vars(|k| vars.get(k).map(|v| v.to_string()))
            .unwrap();

        assert_eq!(config.elasticsearch.url, "http://es:9200");
        assert_eq!(config.elasticsearch.request_timeout_secs, 5);
        assert_eq!(config.elasticsearch.index_prefix, "app");
        assert_eq!(config.server.cors.origins, vec!["http://a.test", "http://b.test"]);
        assert!(!config.server.cors.allow_credentials);
        assert_eq!(config.server.cors.methods, vec!["*"]);
    }

    #[test]
    fn test_env_bind_host_and_port() {
        let mut config = Config::default();
        config
            .apply_vars(|k| (k == "API_PORT").then(|| "9000".to_string()))
            .unwrap();
        assert_eq!(config.server.bind_addr, "0.0.0.0:9000");

        config
            .apply_vars(|k| (k == "API_HOST").then(|| "127.0.0.1".to_string()))
            .unwrap();
        assert_eq!(config.server.bind_addr, "127.0.0.1:9000");

        assert!(config
            .apply_vars(|k| (k == "API_PORT").then(|| "http".to_string()))
            .is_err());
    }

    #[test]
    fn test_env_invalid_timeout() {
        let mut config = Config::default();
        let err = config
            .apply_vars(|k| (k == "ELASTICSEARCH_REQUEST_TIMEOUT").then(|| "soon".to_string()))
            .unwrap_err();
        assert!(err.to_string().contains("ELASTICSEARCH_REQUEST_TIMEOUT"));
    }

    #[test]
    fn test_parse_list() {
        assert_eq!(parse_list("*"), vec!["*"]);
        assert_eq!(parse_list("GET, POST,,"), vec!["GET", "POST"]);
        assert!(parse_list("").is_empty());
    }
}

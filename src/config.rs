use anyhow::{Context, Result};
use secrecy::SecretString;
use serde::Deserialize;

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub rubrik: RubrikConfig,
    pub server: ServerConfig,
    pub metrics: MetricsConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct RubrikConfig {
    /// Base URL of the appliance, e.g. `https://rubrik.example.com`
    pub url: String,
    pub username: String,
    pub password: SecretString,
    /// Set to false to accept self-signed appliance certificates
    #[serde(default = "default_verify_ssl")]
    pub verify_ssl: bool,
    #[serde(default = "default_timeout")]
    pub timeout_seconds: u64,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    #[serde(default = "default_addr")]
    pub addr: String,
    #[serde(default = "default_port")]
    pub port: u16,
}

#[derive(Debug, Deserialize, Clone)]
pub struct MetricsConfig {
    #[serde(default = "default_scrape_interval")]
    pub scrape_interval_seconds: u64,
    #[serde(default = "default_true")]
    pub collect_vm_metrics: bool,
    #[serde(default = "default_true")]
    pub collect_archival_metrics: bool,
    #[serde(default = "default_archival_range")]
    pub archival_bandwidth_range: String,
}

fn default_addr() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    9477
}

fn default_verify_ssl() -> bool {
    true
}

fn default_timeout() -> u64 {
    30
}

fn default_scrape_interval() -> u64 {
    60
}

fn default_true() -> bool {
    true
}

fn default_archival_range() -> String {
    "-1h".to_string()
}

impl Config {
    pub fn load(path: &str) -> Result<Self> {
        // Load environment variables from .env if present
        dotenvy::dotenv().ok();

        let config = config::Config::builder()
            .add_source(config::File::with_name(path).required(false))
            .add_source(config::Environment::with_prefix("RUBRIK_EXPORTER").separator("__"))
            .build()
            .context("Failed to build configuration")?;

        config
            .try_deserialize()
            .context("Failed to deserialize configuration")
    }

    /// Apply command-line listen overrides; `None` keeps the loaded value
    pub fn override_listen(&mut self, addr: Option<String>, port: Option<u16>) {
        if let Some(addr) = addr {
            self.server.addr = addr;
        }
        if let Some(port) = port {
            self.server.port = port;
        }
    }
}

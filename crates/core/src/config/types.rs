use serde::{Deserialize, Serialize};
use std::net::IpAddr;
use std::path::PathBuf;

/// Root configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub remote: RemoteConfig,
    #[serde(default)]
    pub storage: StorageConfig,
    #[serde(default)]
    pub sync: SyncConfig,
    #[serde(default)]
    pub server: ServerConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            remote: RemoteConfig::default(),
            storage: StorageConfig::default(),
            sync: SyncConfig::default(),
            server: ServerConfig::default(),
        }
    }
}

/// Remote catalog endpoint configuration.
///
/// The defaults are the catalog the original deployment pointed at; they
/// exist so the core can run with zero configuration while still letting
/// the wiring externalize both values.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RemoteConfig {
    /// Base endpoint of the hosted catalog.
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Deployment tag inserted into the index path.
    #[serde(default = "default_deployment")]
    pub deployment: String,
    /// Request timeout in seconds (default: 30)
    #[serde(default = "default_timeout")]
    pub timeout_secs: u32,
}

impl Default for RemoteConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            deployment: default_deployment(),
            timeout_secs: default_timeout(),
        }
    }
}

fn default_base_url() -> String {
    "https://a1z1gsiiuf.execute-api.us-east-1.amazonaws.com".to_string()
}

fn default_deployment() -> String {
    "dev".to_string()
}

fn default_timeout() -> u32 {
    30
}

/// Local storage configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct StorageConfig {
    /// Directory holding downloaded videos, thumbnail sidecars and the
    /// catalog snapshot.
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
        }
    }
}

fn default_data_dir() -> PathBuf {
    PathBuf::from("data")
}

/// Sync engine configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SyncConfig {
    /// Maximum number of concurrent per-video download pipelines.
    #[serde(default = "default_max_parallel_downloads")]
    pub max_parallel_downloads: usize,
}

impl Default for SyncConfig {
    fn default() -> Self {
        Self {
            max_parallel_downloads: default_max_parallel_downloads(),
        }
    }
}

fn default_max_parallel_downloads() -> usize {
    4
}

/// Server configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: IpAddr,
    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

fn default_host() -> IpAddr {
    "0.0.0.0".parse().unwrap()
}

fn default_port() -> u16 {
    8080
}

/// Sanitized config for API responses
#[derive(Debug, Clone, Serialize)]
pub struct SanitizedConfig {
    pub remote: RemoteConfig,
    pub storage: StorageConfig,
    pub sync: SyncConfig,
    pub server: ServerConfig,
}

impl From<&Config> for SanitizedConfig {
    fn from(config: &Config) -> Self {
        Self {
            remote: config.remote.clone(),
            storage: config.storage.clone(),
            sync: config.sync.clone(),
            server: config.server.clone(),
        }
    }
}

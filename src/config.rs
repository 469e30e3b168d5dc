use std::collections::HashSet;
use std::path::Path;

use anyhow::{bail, Context};
use serde::Deserialize;

use crate::http::framer::{DEFAULT_MAX_BODY_BYTES, DEFAULT_MAX_HEADER_BYTES};
use crate::pot::PotKind;

/// Environment variable naming a YAML configuration file.
pub const CONFIG_ENV: &str = "HTCPCP_CONFIG";

/// Environment variable overriding `server.listen_addr`.
pub const LISTEN_ENV: &str = "LISTEN";

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default = "default_pots")]
    pub pots: Vec<PotConfig>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ServerConfig {
    #[serde(default = "default_listen_addr")]
    pub listen_addr: String,
    #[serde(default = "default_max_header_bytes")]
    pub max_header_bytes: usize,
    #[serde(default = "default_max_body_bytes")]
    pub max_body_bytes: usize,
    #[serde(default = "default_read_buffer_size")]
    pub read_buffer_size: usize,
}

/// One pot to register at startup.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PotConfig {
    pub path: String,
    pub kind: PotKind,
}

fn default_listen_addr() -> String {
    "127.0.0.1:8000".to_string()
}

fn default_max_header_bytes() -> usize {
    DEFAULT_MAX_HEADER_BYTES
}

fn default_max_body_bytes() -> usize {
    DEFAULT_MAX_BODY_BYTES
}

fn default_read_buffer_size() -> usize {
    1024
}

fn default_pots() -> Vec<PotConfig> {
    vec![
        PotConfig {
            path: "/pot-0".to_string(),
            kind: PotKind::Coffee,
        },
        PotConfig {
            path: "/pot-1".to_string(),
            kind: PotKind::Tea,
        },
    ]
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            listen_addr: default_listen_addr(),
            max_header_bytes: default_max_header_bytes(),
            max_body_bytes: default_max_body_bytes(),
            read_buffer_size: default_read_buffer_size(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server: ServerConfig::default(),
            pots: default_pots(),
        }
    }
}

impl Config {
    /// Loads the file named by `HTCPCP_CONFIG` (defaults if unset), then
    /// applies the `LISTEN` override.
    pub fn load() -> anyhow::Result<Self> {
        let file = std::env::var_os(CONFIG_ENV);
        let listen = std::env::var(LISTEN_ENV).ok();
        Self::resolve(file.as_deref().map(Path::new), listen)
    }

    pub fn resolve(file: Option<&Path>, listen_override: Option<String>) -> anyhow::Result<Self> {
        let mut cfg = match file {
            Some(path) => Self::from_file(path)?,
            None => Self::default(),
        };
        if let Some(addr) = listen_override {
            cfg.server.listen_addr = addr;
        }
        Ok(cfg)
    }

    pub fn from_file(path: &Path) -> anyhow::Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        Self::from_yaml(&text).with_context(|| format!("Invalid config file {}", path.display()))
    }

    pub fn from_yaml(text: &str) -> anyhow::Result<Self> {
        let cfg: Config = serde_yaml::from_str(text).context("Failed to parse YAML")?;
        cfg.validate()?;
        Ok(cfg)
    }

    fn validate(&self) -> anyhow::Result<()> {
        let mut seen = HashSet::new();
        for pot in &self.pots {
            if !pot.path.starts_with('/') {
                bail!("pot path {:?} must start with '/'", pot.path);
            }
            if !seen.insert(pot.path.as_str()) {
                bail!("pot path {:?} is configured twice", pot.path);
            }
        }
        if self.server.read_buffer_size == 0 {
            bail!("server.read_buffer_size must be positive");
        }
        Ok(())
    }
}

//! Path → pot lookup, built once at startup.

use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::Mutex;

use crate::config::PotConfig;
use crate::pot::state::Pot;

/// Shared handle to one pot.
///
/// The mutex serializes `start`/`stop` on the same path across connection
/// tasks.
pub type PotHandle = Arc<Mutex<Pot>>;

/// All pots the server knows about.
#[derive(Debug, Clone, Default)]
pub struct PotRegistry {
    pots: HashMap<String, PotHandle>,
}

impl PotRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a registry from configuration, rejecting duplicate paths.
    pub fn from_config(configs: &[PotConfig]) -> anyhow::Result<Self> {
        let mut registry = Self::new();
        for cfg in configs {
            registry.register(Pot::new(cfg.path.clone(), cfg.kind))?;
        }
        Ok(registry)
    }

    pub fn register(&mut self, pot: Pot) -> anyhow::Result<()> {
        let path = pot.path().to_string();
        if self.pots.contains_key(&path) {
            anyhow::bail!("a pot is already registered at {path}");
        }

        tracing::info!(path = %path, kind = pot.kind().name(), "Registered pot");
        self.pots.insert(path, Arc::new(Mutex::new(pot)));
        Ok(())
    }

    pub fn get(&self, path: &str) -> Option<PotHandle> {
        self.pots.get(path).cloned()
    }

    /// Registered paths, sorted.
    pub fn paths(&self) -> Vec<&str> {
        let mut paths: Vec<&str> = self.pots.keys().map(String::as_str).collect();
        paths.sort_unstable();
        paths
    }

    pub fn len(&self) -> usize {
        self.pots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pots.is_empty()
    }
}

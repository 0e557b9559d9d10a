use anyhow::{Context, Result};
use log::info;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::domain::{PlayerRegistry, TournamentState};
use crate::errors::storage_context;

/// Everything that outlives a single command
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PersistedState {
    #[serde(default)]
    pub players: PlayerRegistry,
    #[serde(default)]
    pub tournament: Option<TournamentState>,
}

/// Single JSON file holding the league state
pub struct StateStore {
    path: PathBuf,
}

impl StateStore {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// A missing or blank file is a first run and loads as empty state.
    pub fn load(&self) -> Result<PersistedState> {
        if !self.path.exists() {
            info!("No state at {}, starting fresh", self.path.display());
            return Ok(PersistedState::default());
        }

        let json = fs::read_to_string(&self.path)
            .with_context(|| storage_context("read", &self.path))?;
        if json.trim().is_empty() {
            return Ok(PersistedState::default());
        }

        let state: PersistedState = serde_json::from_str(&json).with_context(|| {
            format!(
                "{}. First 200 chars: {}",
                storage_context("parse", &self.path),
                json.chars().take(200).collect::<String>()
            )
        })?;

        info!(
            "Loaded {} players from {}",
            state.players.len(),
            self.path.display()
        );
        Ok(state)
    }

    /// Writes to a sibling temp file first, then swaps it in.
    pub fn save(&self, state: &PersistedState) -> Result<()> {
        let json = serde_json::to_string_pretty(state).context("Failed to serialize league state")?;
        let temp_path = self.temp_path();

        if let Some(dir) = self.path.parent().filter(|d| !d.as_os_str().is_empty()) {
            fs::create_dir_all(dir).with_context(|| storage_context("create directory for", &self.path))?;
        }
        fs::write(&temp_path, json).with_context(|| storage_context("write", &temp_path))?;
        fs::rename(&temp_path, &self.path).with_context(|| storage_context("replace", &self.path))?;

        info!("Saved league state to {}", self.path.display());
        Ok(())
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_default();
        name.push(".tmp");
        self.path.with_file_name(name)
    }
}

//! Persisted viewer preferences
//!
//! The dark-mode flag is an explicit value handed to the renderer. Where it is
//! stored is up to the [`PreferenceStore`] the caller injects.

use anyhow::{Context, Result};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Storage key used for the dark-mode flag
pub const DARK_MODE_KEY: &str = "darkMode";

/// Key/value storage for preferences, values kept as strings
pub trait PreferenceStore {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&mut self, key: &str, value: &str) -> Result<()>;
}

/// In-memory store, mostly for tests and embedding
#[derive(Debug, Default, Clone)]
pub struct MemoryPreferenceStore {
    values: BTreeMap<String, String>,
}

impl MemoryPreferenceStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl PreferenceStore for MemoryPreferenceStore {
    fn get(&self, key: &str) -> Option<String> {
        self.values.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        self.values.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// Store backed by a JSON object on disk
#[derive(Debug, Clone)]
pub struct FilePreferenceStore {
    path: PathBuf,
    values: BTreeMap<String, String>,
}

impl FilePreferenceStore {
    /// Open the store at `path`; a missing or unreadable file starts empty
    pub fn open(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let values = match fs::read_to_string(&path) {
            Ok(contents) => serde_json::from_str(&contents).unwrap_or_else(|e| {
                warn!("Ignoring malformed preferences at {}: {}", path.display(), e);
                BTreeMap::new()
            }),
            Err(_) => BTreeMap::new(),
        };
        Self { path, values }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn save(&self) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let contents = serde_json::to_string_pretty(&self.values)?;
        fs::write(&self.path, contents)
            .with_context(|| format!("Failed to write preferences to {}", self.path.display()))
    }
}

impl PreferenceStore for FilePreferenceStore {
    fn get(&self, key: &str) -> Option<String> {
        self.values.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        self.values.insert(key.to_string(), value.to_string());
        self.save()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ViewPreference {
    pub dark_mode: bool,
}

impl ViewPreference {
    /// Read the saved preference; only the exact value `"true"` enables dark mode
    pub fn load(store: &dyn PreferenceStore) -> Self {
        let dark_mode = store.get(DARK_MODE_KEY).as_deref() == Some("true");
        Self { dark_mode }
    }

    pub fn save(&self, store: &mut dyn PreferenceStore) -> Result<()> {
        store.set(DARK_MODE_KEY, if self.dark_mode { "true" } else { "false" })
    }

    /// Flip dark mode, persist it and return the new preference
    pub fn toggle_dark_mode(&mut self, store: &mut dyn PreferenceStore) -> Result<Self> {
        self.dark_mode = !self.dark_mode;
        debug!("Dark mode -> {}", self.dark_mode);
        self.save(store)?;
        Ok(*self)
    }
}

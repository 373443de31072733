use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::PathBuf;
use std::sync::Mutex;
use tracing::debug;

use crate::error::ClientError;

const THEME_KEY: &str = "theme";
const ADMIN_MODE_KEY: &str = "adminMode";

/// Small string key-value persistence with explicit load/save calls.
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>, ClientError>;
    fn set(&self, key: &str, value: &str) -> Result<(), ClientError>;
}

/// Key-value pairs kept as a single JSON object on disk.
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    fn read_all(&self) -> Result<BTreeMap<String, String>, ClientError> {
        match fs::read(&self.path) {
            Ok(bytes) => Ok(serde_json::from_slice(&bytes)?),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(BTreeMap::new()),
            Err(e) => Err(e.into()),
        }
    }
}

impl KeyValueStore for JsonFileStore {
    fn get(&self, key: &str) -> Result<Option<String>, ClientError> {
        Ok(self.read_all()?.remove(key))
    }

    fn set(&self, key: &str, value: &str) -> Result<(), ClientError> {
        let mut entries = self.read_all()?;
        entries.insert(key.to_string(), value.to_string());
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&self.path, serde_json::to_vec_pretty(&entries)?)?;
        debug!("Saved {} to {}", key, self.path.display());
        Ok(())
    }
}

#[derive(Default)]
pub struct MemoryStore {
    entries: Mutex<BTreeMap<String, String>>,
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, ClientError> {
        Ok(self.entries.lock().unwrap_or_else(|e| e.into_inner()).get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), ClientError> {
        self.entries
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .insert(key.to_string(), value.to_string());
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    pub fn toggled(self) -> Self {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }

    fn as_str(self) -> &'static str {
        match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
        }
    }

    fn parse(value: &str) -> Option<Self> {
        match value {
            "light" => Some(Theme::Light),
            "dark" => Some(Theme::Dark),
            _ => None,
        }
    }
}

/// Client preferences, passed explicitly to whatever needs them.
///
/// `admin_mode` only decides whether the editor is shown. It is not access control:
/// the server's admin routes are guarded by deployment configuration alone.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AppSettings {
    pub theme: Theme,
    pub admin_mode: bool,
}

impl AppSettings {
    /// Missing or unrecognised values fall back to defaults.
    pub fn load(store: &dyn KeyValueStore) -> Result<Self, ClientError> {
        let defaults = AppSettings::default();
        Ok(Self {
            theme: store
                .get(THEME_KEY)?
                .as_deref()
                .and_then(Theme::parse)
                .unwrap_or(defaults.theme),
            admin_mode: store
                .get(ADMIN_MODE_KEY)?
                .map(|v| v == "true")
                .unwrap_or(defaults.admin_mode),
        })
    }

    pub fn save(&self, store: &dyn KeyValueStore) -> Result<(), ClientError> {
        store.set(THEME_KEY, self.theme.as_str())?;
        store.set(ADMIN_MODE_KEY, if self.admin_mode { "true" } else { "false" })
    }
}

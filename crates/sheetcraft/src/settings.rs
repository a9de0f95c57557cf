//! Assistant settings: provider selection and API key
//!
//! Settings live behind [`SettingsStore`]. [`JsonFileStore`] keeps them in a
//! JSON file under the user's config directory; [`MemoryStore`] keeps them in
//! memory.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use log::debug;
use serde::{Deserialize, Serialize};

use crate::error::SettingsError;

/// Provider that answers locally without any network call
pub const SIMULATION_PROVIDER: &str = "simulation";

/// Persisted assistant settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Session {
    /// Response provider id
    pub provider: String,
    /// API key for non-simulation providers
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,
}

impl Default for Session {
    fn default() -> Self {
        Self {
            provider: SIMULATION_PROVIDER.to_string(),
            api_key: None,
        }
    }
}

impl Session {
    /// Check if responses are simulated locally
    pub fn is_simulation(&self) -> bool {
        self.provider == SIMULATION_PROVIDER
    }

    pub fn set_provider<S: Into<String>>(&mut self, provider: S) {
        self.provider = provider.into();
    }

    /// Set the API key; blank keys are ignored
    ///
    /// Returns whether the key was stored.
    pub fn set_api_key(&mut self, key: &str) -> bool {
        let key = key.trim();
        if key.is_empty() {
            return false;
        }
        self.api_key = Some(key.to_string());
        true
    }

    /// The key with all but its last four characters hidden
    pub fn masked_api_key(&self) -> Option<String> {
        self.api_key.as_deref().map(|key| {
            let chars: Vec<char> = key.chars().collect();
            let shown = chars.len().saturating_sub(4);
            std::iter::repeat('*')
                .take(shown)
                .chain(chars[shown..].iter().copied())
                .collect()
        })
    }

    /// Keep the previous key when this session carries none
    fn keeping_key_of(&self, previous: Option<Session>) -> Session {
        let mut merged = self.clone();
        if merged.api_key.as_deref().map_or(true, |k| k.trim().is_empty()) {
            merged.api_key = previous.and_then(|p| p.api_key);
        }
        merged
    }
}

/// Loads and saves a [`Session`]
pub trait SettingsStore {
    /// Load settings, falling back to defaults when none were saved
    fn load(&self) -> Result<Session, SettingsError>;

    /// Save settings
    ///
    /// A session without an API key keeps the stored key. Stored settings
    /// that cannot be read are left untouched and the error is returned.
    fn save(&mut self, session: &Session) -> Result<(), SettingsError>;
}

/// Settings stored as pretty-printed JSON in a file
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new<P: Into<PathBuf>>(path: P) -> Self {
        Self { path: path.into() }
    }

    /// `<config dir>/sheetcraft/settings.json`
    pub fn default_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("sheetcraft")
            .join("settings.json")
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Default for JsonFileStore {
    fn default() -> Self {
        Self::new(Self::default_path())
    }
}

impl SettingsStore for JsonFileStore {
    fn load(&self) -> Result<Session, SettingsError> {
        match fs::read_to_string(&self.path) {
            Ok(json) => Ok(serde_json::from_str(&json)?),
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!("no settings at {}, using defaults", self.path.display());
                Ok(Session::default())
            }
            Err(e) => Err(e.into()),
        }
    }

    fn save(&mut self, session: &Session) -> Result<(), SettingsError> {
        let session = session.keeping_key_of(Some(self.load()?));
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(&session)?;
        fs::write(&self.path, json)?;
        debug!("saved settings to {}", self.path.display());
        Ok(())
    }
}

/// Settings kept in memory
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    session: Option<Session>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from already-saved settings
    pub fn with_session(session: Session) -> Self {
        Self {
            session: Some(session),
        }
    }
}

impl SettingsStore for MemoryStore {
    fn load(&self) -> Result<Session, SettingsError> {
        Ok(self.session.clone().unwrap_or_default())
    }

    fn save(&mut self, session: &Session) -> Result<(), SettingsError> {
        self.session = Some(session.keeping_key_of(self.session.take()));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_defaults() {
        let session = Session::default();
        assert!(session.is_simulation());
        assert_eq!(session.api_key, None);
        assert_eq!(MemoryStore::new().load().unwrap(), session);
    }

    #[test]
    fn test_blank_key_is_ignored() {
        let mut session = Session::default();
        assert!(!session.set_api_key("   "));
        assert_eq!(session.api_key, None);
        assert!(session.set_api_key(" sk-test-1234 "));
        assert_eq!(session.api_key.as_deref(), Some("sk-test-1234"));
    }

    #[test]
    fn test_saving_without_key_keeps_stored_key() {
        let mut stored = Session::default();
        stored.set_api_key("sk-abc");
        let mut store = MemoryStore::with_session(stored);

        let mut update = Session::default();
        update.set_provider("openai");
        store.save(&update).unwrap();

        let loaded = store.load().unwrap();
        assert_eq!(loaded.provider, "openai");
        assert_eq!(loaded.api_key.as_deref(), Some("sk-abc"));
    }

    #[test]
    fn test_masked_key() {
        let mut session = Session::default();
        session.set_api_key("sk-abcdef");
        assert_eq!(session.masked_api_key().as_deref(), Some("*****cdef"));
        session.api_key = Some("abc".into());
        assert_eq!(session.masked_api_key().as_deref(), Some("abc"));
    }

    #[test]
    fn test_missing_fields_use_defaults() {
        let session: Session = serde_json::from_str(r#"{"api_key":"k"}"#).unwrap();
        assert_eq!(session.provider, SIMULATION_PROVIDER);
        assert_eq!(session.api_key.as_deref(), Some("k"));
    }
}

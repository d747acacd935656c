//! Settings stores the selected worker runtime is persisted to.
//!
//! The registry only needs flat string key/value access. Two stores ship
//! with the crate: an in-memory map and the `local.settings.json` file used
//! by function app projects.

use log::warn;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::SettingsError;

/// Key (and environment variable) naming the worker runtime.
pub const FUNCTIONS_WORKER_RUNTIME: &str = "FUNCTIONS_WORKER_RUNTIME";

/// File name of the project settings file.
pub const LOCAL_SETTINGS_FILE: &str = "local.settings.json";

/// Flat string key/value settings.
pub trait SettingsStore {
    /// Value stored under `key`, compared case-insensitively.
    fn get_value(&self, key: &str) -> Option<String>;

    fn set_value(&mut self, key: &str, value: &str) -> Result<(), SettingsError>;

    /// Where values are kept, for user-facing messages.
    fn location(&self) -> String;
}

#[derive(Debug, Default, Clone)]
pub struct MemorySettings {
    values: HashMap<String, String>,
}

impl MemorySettings {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SettingsStore for MemorySettings {
    fn get_value(&self, key: &str) -> Option<String> {
        self.values
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(key))
            .map(|(_, v)| v.clone())
    }

    fn set_value(&mut self, key: &str, value: &str) -> Result<(), SettingsError> {
        self.values.retain(|k, _| !k.eq_ignore_ascii_case(key));
        self.values.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn location(&self) -> String {
        "memory".to_string()
    }
}

/// On-disk shape of `local.settings.json`.
#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct LocalSettings {
    #[serde(default)]
    is_encrypted: bool,
    #[serde(default)]
    values: BTreeMap<String, String>,
    /// Sections this crate does not interpret (ConnectionStrings, Host, ...)
    #[serde(flatten)]
    other: serde_json::Map<String, serde_json::Value>,
}

/// `local.settings.json` in a project directory.
///
/// The file is re-read on every access; nothing is cached.
#[derive(Debug, Clone)]
pub struct LocalSettingsFile {
    path: PathBuf,
}

impl LocalSettingsFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// The settings file inside `project_dir`.
    pub fn in_dir(project_dir: &Path) -> Self {
        Self::new(project_dir.join(LOCAL_SETTINGS_FILE))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// A missing file reads as empty settings.
    fn load(&self) -> Result<LocalSettings, SettingsError> {
        if !self.path.exists() {
            return Ok(LocalSettings::default());
        }
        let contents = fs::read_to_string(&self.path)?;
        Ok(serde_json::from_str(&contents)?)
    }

    fn save(&self, settings: &LocalSettings) -> Result<(), SettingsError> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        let contents = serde_json::to_string_pretty(settings)?;
        fs::write(&self.path, contents)?;
        Ok(())
    }
}

impl SettingsStore for LocalSettingsFile {
    fn get_value(&self, key: &str) -> Option<String> {
        match self.load() {
            Ok(settings) => settings
                .values
                .into_iter()
                .find(|(k, _)| k.eq_ignore_ascii_case(key))
                .map(|(_, v)| v),
            Err(err) => {
                warn!(
                    target: "worker_runtime::settings",
                    "Failed to read {}: {}",
                    self.path.display(),
                    err
                );
                None
            }
        }
    }

    /// Refused with [`SettingsError::Encrypted`] when the file's values are encrypted.
    fn set_value(&mut self, key: &str, value: &str) -> Result<(), SettingsError> {
        let mut settings = self.load()?;
        if settings.is_encrypted {
            return Err(SettingsError::Encrypted {
                path: self.path.display().to_string(),
            });
        }
        settings.values.retain(|k, _| !k.eq_ignore_ascii_case(key));
        settings.values.insert(key.to_string(), value.to_string());
        self.save(&settings)
    }

    fn location(&self) -> String {
        self.path.display().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_memory_lookup_ignores_key_case() {
        let mut store = MemorySettings::new();
        store.set_value("functions_worker_runtime", "node").unwrap();
        assert_eq!(
            store.get_value(FUNCTIONS_WORKER_RUNTIME).as_deref(),
            Some("node")
        );

        store.set_value(FUNCTIONS_WORKER_RUNTIME, "python").unwrap();
        assert_eq!(
            store.get_value("Functions_Worker_Runtime").as_deref(),
            Some("python")
        );
    }

    #[test]
    fn test_missing_file_reads_as_empty() {
        let dir = TempDir::new().expect("failed to create temp dir");
        let store = LocalSettingsFile::in_dir(dir.path());
        assert!(store.get_value(FUNCTIONS_WORKER_RUNTIME).is_none());
    }

    #[test]
    fn test_set_value_creates_file_in_local_settings_shape() {
        let dir = TempDir::new().expect("failed to create temp dir");
        let mut store = LocalSettingsFile::in_dir(dir.path());

        store.set_value(FUNCTIONS_WORKER_RUNTIME, "python").unwrap();

        let written = fs::read_to_string(store.path()).unwrap();
        let json: serde_json::Value = serde_json::from_str(&written).unwrap();
        assert_eq!(json["IsEncrypted"], serde_json::Value::Bool(false));
        assert_eq!(json["Values"][FUNCTIONS_WORKER_RUNTIME], "python");
    }

    #[test]
    fn test_set_value_preserves_other_settings() {
        let dir = TempDir::new().expect("failed to create temp dir");
        let path = dir.path().join(LOCAL_SETTINGS_FILE);
        fs::write(
            &path,
            r#"{
                "IsEncrypted": false,
                "Values": {
                    "AzureWebJobsStorage": "UseDevelopmentStorage=true",
                    "functions_worker_runtime": "node"
                },
                "ConnectionStrings": { "Db": "Server=." }
            }"#,
        )
        .unwrap();
        let mut store = LocalSettingsFile::new(&path);

        store.set_value(FUNCTIONS_WORKER_RUNTIME, "dotnet-isolated").unwrap();

        let json: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
        let values = json["Values"].as_object().unwrap();
        assert_eq!(values.len(), 2, "differently-cased key should be replaced");
        assert_eq!(values[FUNCTIONS_WORKER_RUNTIME], "dotnet-isolated");
        assert_eq!(values["AzureWebJobsStorage"], "UseDevelopmentStorage=true");
        assert_eq!(json["ConnectionStrings"]["Db"], "Server=.");
    }

    #[test]
    fn test_encrypted_file_is_not_written() {
        let dir = TempDir::new().expect("failed to create temp dir");
        let path = dir.path().join(LOCAL_SETTINGS_FILE);
        let original = r#"{ "IsEncrypted": true, "Values": { "FUNCTIONS_WORKER_RUNTIME": "CfDJ8A==" } }"#;
        fs::write(&path, original).unwrap();
        let mut store = LocalSettingsFile::new(&path);

        let result = store.set_value(FUNCTIONS_WORKER_RUNTIME, "python");

        assert!(matches!(result, Err(SettingsError::Encrypted { .. })), "{result:?}");
        assert_eq!(fs::read_to_string(&path).unwrap(), original);
    }

    #[test]
    fn test_corrupt_file_reads_as_absent_but_fails_writes() {
        let dir = TempDir::new().expect("failed to create temp dir");
        let path = dir.path().join(LOCAL_SETTINGS_FILE);
        fs::write(&path, "{ not json").unwrap();
        let mut store = LocalSettingsFile::new(&path);

        assert!(store.get_value(FUNCTIONS_WORKER_RUNTIME).is_none());
        assert!(matches!(
            store.set_value(FUNCTIONS_WORKER_RUNTIME, "node"),
            Err(SettingsError::Parse(_))
        ));
    }
}

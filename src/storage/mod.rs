//! Flat-file JSON persistence
//!
//! Menu catalog and history log are each persisted as a single JSON file:
//! read whole-file at startup, rewrite whole-file on every change. No
//! incremental format; durability is best-effort only.

use std::fs;
use std::path::Path;

use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::utils::{AppError, AppResult};

/// Load a JSON file, initializing it to the default value when the file is
/// missing or unreadable.
///
/// A corrupt or absent file is replaced with the serialized default so the
/// next startup reads clean state. The failure is logged, never fatal.
pub fn load_or_init<T>(path: &Path) -> T
where
    T: DeserializeOwned + Serialize + Default,
{
    match fs::read_to_string(path) {
        Ok(raw) => match serde_json::from_str(&raw) {
            Ok(value) => value,
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "Corrupt data file, reinitializing");
                let value = T::default();
                if let Err(e) = save_json(path, &value) {
                    tracing::error!(path = %path.display(), error = %e, "Failed to reinitialize data file");
                }
                value
            }
        },
        Err(_) => {
            let value = T::default();
            if let Err(e) = save_json(path, &value) {
                tracing::error!(path = %path.display(), error = %e, "Failed to initialize data file");
            }
            value
        }
    }
}

/// Overwrite the file with pretty-printed JSON.
pub fn save_json<T: Serialize>(path: &Path, value: &T) -> AppResult<()> {
    let raw = serde_json::to_string_pretty(value)
        .map_err(|e| AppError::persistence(format!("serialize {}: {}", path.display(), e)))?;
    fs::write(path, raw)
        .map_err(|e| AppError::persistence(format!("write {}: {}", path.display(), e)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_initializes_to_default() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("menu.json");

        let loaded: Vec<String> = load_or_init(&path);
        assert!(loaded.is_empty());
        // file was created so the next startup reads clean state
        assert_eq!(fs::read_to_string(&path).unwrap().trim(), "[]");
    }

    #[test]
    fn corrupt_file_is_reinitialized() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("history.json");
        fs::write(&path, "{not json").unwrap();

        let loaded: Vec<String> = load_or_init(&path);
        assert!(loaded.is_empty());
    }

    #[test]
    fn save_then_load_round_trips() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("data.json");

        save_json(&path, &vec!["a".to_string(), "b".to_string()]).unwrap();
        let loaded: Vec<String> = load_or_init(&path);
        assert_eq!(loaded, vec!["a", "b"]);
    }
}

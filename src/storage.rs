use std::{
    collections::{BTreeMap, HashMap},
    env, fs,
    path::{Path, PathBuf},
};
use thiserror::Error;
use tracing::error;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("failed to encode store contents: {0}")]
    Encode(#[from] serde_json::Error),
    #[error("failed to write {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Durable string key-value store with synchronous access.
pub trait KvStore {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError>;

    /// Writes several keys as one flush.
    fn set_many(&mut self, entries: &[(&str, &str)]) -> Result<(), StoreError> {
        for (key, value) in entries {
            self.set(key, value)?;
        }
        Ok(())
    }
}

#[derive(Debug, Default, Clone)]
pub struct MemoryStore {
    entries: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_entries<I, K, V>(entries: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            entries: entries
                .into_iter()
                .map(|(key, value)| (key.into(), value.into()))
                .collect(),
        }
    }
}

impl KvStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// JSON file holding every key; rewritten in full on each `set`.
#[derive(Debug)]
pub struct FileStore {
    path: PathBuf,
    entries: BTreeMap<String, String>,
}

impl FileStore {
    pub fn open(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let entries = load_entries(&path);
        Self { path, entries }
    }
}

impl KvStore for FileStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        self.entries.insert(key.to_string(), value.to_string());
        persist_entries(&self.path, &self.entries)
    }

    fn set_many(&mut self, entries: &[(&str, &str)]) -> Result<(), StoreError> {
        for (key, value) in entries {
            self.entries.insert(key.to_string(), value.to_string());
        }
        persist_entries(&self.path, &self.entries)
    }
}

pub fn resolve_data_path() -> Result<PathBuf, std::io::Error> {
    if let Ok(path) = env::var("APP_DATA_PATH") {
        return Ok(PathBuf::from(path));
    }

    Ok(PathBuf::from("data/dashboard.json"))
}

fn load_entries(path: &Path) -> BTreeMap<String, String> {
    match fs::read(path) {
        Ok(bytes) => match serde_json::from_slice(&bytes) {
            Ok(entries) => entries,
            Err(err) => {
                error!("failed to parse data file: {err}");
                BTreeMap::new()
            }
        },
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => BTreeMap::new(),
        Err(err) => {
            error!("failed to read data file: {err}");
            BTreeMap::new()
        }
    }
}

/// Replaces the file via a sibling temp file so readers never see a partial write.
fn persist_entries(path: &Path, entries: &BTreeMap<String, String>) -> Result<(), StoreError> {
    let payload = serde_json::to_vec_pretty(entries)?;
    let tmp_path = temp_sibling(path);
    fs::write(&tmp_path, payload)
        .and_then(|()| fs::rename(&tmp_path, path))
        .map_err(|source| StoreError::Write {
            path: path.to_path_buf(),
            source,
        })
}

fn temp_sibling(path: &Path) -> PathBuf {
    let mut name = path.file_name().map(|name| name.to_os_string()).unwrap_or_default();
    name.push(".tmp");
    path.with_file_name(name)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_path(name: &str) -> PathBuf {
        let nanos = std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .unwrap()
            .as_nanos();
        let mut path = env::temp_dir();
        path.push(format!("life_dashboard_{name}_{}_{nanos}.json", std::process::id()));
        path
    }

    #[test]
    fn file_store_survives_reopen() {
        let path = temp_path("reopen");
        let mut store = FileStore::open(&path);
        store.set("waterCups", "3").unwrap();
        store.set("didExercise", "true").unwrap();

        let reopened = FileStore::open(&path);
        assert_eq!(reopened.get("waterCups").as_deref(), Some("3"));
        assert_eq!(reopened.get("didExercise").as_deref(), Some("true"));
        let _ = fs::remove_file(path);
    }

    #[test]
    fn file_store_set_many_flushes_once_without_leftovers() {
        let path = temp_path("batch");
        let mut store = FileStore::open(&path);
        store
            .set_many(&[("waterCups", "2"), ("sleepStart", "22:00"), ("todos", "[]")])
            .unwrap();

        assert!(!temp_sibling(&path).exists());
        let reopened = FileStore::open(&path);
        assert_eq!(reopened.get("waterCups").as_deref(), Some("2"));
        assert_eq!(reopened.get("sleepStart").as_deref(), Some("22:00"));
        assert_eq!(reopened.get("todos").as_deref(), Some("[]"));
        let _ = fs::remove_file(path);
    }

    #[test]
    fn file_store_missing_file_is_empty() {
        let store = FileStore::open(temp_path("missing"));
        assert_eq!(store.get("waterCups"), None);
    }

    #[test]
    fn file_store_corrupt_file_is_empty() {
        let path = temp_path("corrupt");
        fs::write(&path, b"{not json").unwrap();
        let store = FileStore::open(&path);
        assert_eq!(store.get("todos"), None);
        let _ = fs::remove_file(path);
    }

    #[test]
    fn file_store_reports_write_failure() {
        let mut path = temp_path("nodir");
        path.push("nested.json");
        let mut store = FileStore::open(&path);
        let err = store.set("waterCups", "1").unwrap_err();
        assert!(matches!(err, StoreError::Write { .. }));
        assert_eq!(store.get("waterCups").as_deref(), Some("1"));
    }
}

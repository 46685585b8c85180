//! File-backed blob store with freshness-window reads.

use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fs;
use std::path::PathBuf;
use std::time::{Duration, SystemTime};
use tracing::{debug, warn};

/// Persistent key/value byte store scoped to a single directory.
///
/// Each key is one file under the store root; the file's modification time is
/// the entry's write timestamp. Writes are whole-file overwrites, so
/// concurrent writers are last-writer-wins and stored data is never left in
/// a partial state that [`get`](FileStore::get) would misread as fresh.
///
/// If the root directory cannot be created the store degrades to an inert
/// one: every `get` misses and every `put` is a no-op. Callers must not
/// depend on persistence succeeding.
pub struct FileStore {
    /// Store root, or `None` when the store is disabled.
    root: Option<PathBuf>,
}

impl FileStore {
    /// Open a store rooted at `root`, creating the directory if needed.
    ///
    /// A root that cannot be created yields a disabled store rather than an
    /// error.
    pub fn open(root: PathBuf) -> Self {
        match fs::create_dir_all(&root) {
            Ok(()) => Self { root: Some(root) },
            Err(e) => {
                warn!(root = %root.display(), error = %e, "cache root unavailable, store disabled");
                Self::disabled()
            }
        }
    }

    /// A store that never persists anything.
    pub fn disabled() -> Self {
        Self { root: None }
    }

    /// Default store root under the platform cache directory.
    pub fn default_root() -> PathBuf {
        dirs::cache_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("surveywall")
    }

    /// Returns true if the store has a usable root directory.
    pub fn is_enabled(&self) -> bool {
        self.root.is_some()
    }

    /// Store `payload` under `key`, overwriting any prior entry.
    ///
    /// Best effort: write failures are logged and swallowed.
    pub fn put(&self, key: &str, payload: &[u8]) {
        let Some(root) = &self.root else { return };
        let path = root.join(key);
        if let Err(e) = fs::write(&path, payload) {
            debug!(key, error = %e, "cache write failed");
        }
    }

    /// Fetch the payload under `key` if it exists and was written no longer
    /// than `max_age` ago.
    ///
    /// A missing key is a normal miss, not an error. Stale entries are
    /// ignored in place; the next `put` overwrites them.
    pub fn get(&self, key: &str, max_age: Duration) -> Option<Vec<u8>> {
        let root = self.root.as_ref()?;
        let path = root.join(key);

        let modified = fs::metadata(&path).and_then(|m| m.modified()).ok()?;
        // A clock that reads the mtime as being in the future counts as fresh.
        if let Ok(age) = SystemTime::now().duration_since(modified) {
            if age > max_age {
                debug!(key, age_secs = age.as_secs(), "cache entry expired");
                return None;
            }
        }

        fs::read(&path).ok()
    }

    /// JSON-encode `value` and store it under `key`.
    pub fn put_json<T: Serialize>(&self, key: &str, value: &T) {
        match serde_json::to_vec(value) {
            Ok(bytes) => self.put(key, &bytes),
            Err(e) => debug!(key, error = %e, "cache JSON encode failed"),
        }
    }

    /// Fetch and decode a fresh JSON entry under `key`.
    ///
    /// Undecodable entries are treated as misses.
    pub fn get_json<T: DeserializeOwned>(&self, key: &str, max_age: Duration) -> Option<T> {
        let bytes = self.get(key, max_age)?;
        serde_json::from_slice(&bytes).ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;
    use tempfile::TempDir;

    fn create_temp_store() -> (FileStore, TempDir) {
        let temp_dir = TempDir::new().unwrap();
        let store = FileStore::open(temp_dir.path().to_path_buf());
        (store, temp_dir)
    }

    #[test]
    fn test_store_round_trip() {
        let (store, _temp) = create_temp_store();
        store.put("entry", b"payload");

        let fetched = store.get("entry", Duration::from_secs(3600));
        assert_eq!(fetched, Some(b"payload".to_vec()));
    }

    #[test]
    fn test_store_miss_on_absent_key() {
        let (store, _temp) = create_temp_store();
        assert_eq!(store.get("nope", Duration::from_secs(3600)), None);
    }

    #[test]
    fn test_store_overwrites() {
        let (store, _temp) = create_temp_store();
        store.put("entry", b"old");
        store.put("entry", b"new");

        let fetched = store.get("entry", Duration::from_secs(3600));
        assert_eq!(fetched, Some(b"new".to_vec()));
    }

    #[test]
    fn test_store_expiry() {
        let (store, _temp) = create_temp_store();
        store.put("entry", b"payload");

        // Give the entry a measurable age, then read with a zero window.
        thread::sleep(Duration::from_millis(50));
        assert_eq!(store.get("entry", Duration::ZERO), None);

        // Still present under a generous window.
        assert!(store.get("entry", Duration::from_secs(3600)).is_some());
    }

    #[test]
    fn test_store_persists_across_instances() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path().to_path_buf();

        {
            let store = FileStore::open(root.clone());
            store.put("entry", b"payload");
        }

        let store = FileStore::open(root);
        let fetched = store.get("entry", Duration::from_secs(3600));
        assert_eq!(fetched, Some(b"payload".to_vec()));
    }

    #[test]
    fn test_disabled_store_is_inert() {
        let store = FileStore::disabled();
        assert!(!store.is_enabled());

        store.put("entry", b"payload");
        assert_eq!(store.get("entry", Duration::from_secs(3600)), None);
    }

    #[test]
    fn test_open_invalid_root_degrades() {
        #[cfg(unix)]
        let store = FileStore::open(PathBuf::from("/dev/null/not-a-dir"));
        #[cfg(windows)]
        let store = FileStore::open(PathBuf::from("NUL\\not-a-dir"));

        assert!(!store.is_enabled());
        store.put("entry", b"payload");
        assert_eq!(store.get("entry", Duration::from_secs(3600)), None);
    }

    #[test]
    fn test_json_round_trip() {
        #[derive(serde::Serialize, serde::Deserialize, PartialEq, Debug)]
        struct Entry {
            name: String,
        }

        let (store, _temp) = create_temp_store();
        store.put_json(
            "entry",
            &Entry {
                name: "value".into(),
            },
        );

        let fetched: Option<Entry> = store.get_json("entry", Duration::from_secs(3600));
        assert_eq!(
            fetched,
            Some(Entry {
                name: "value".into()
            })
        );
    }

    #[test]
    fn test_json_garbage_is_a_miss() {
        let (store, _temp) = create_temp_store();
        store.put("entry", b"not json");

        let fetched: Option<serde_json::Map<String, serde_json::Value>> =
            store.get_json("entry", Duration::from_secs(3600));
        assert!(fetched.is_none());
    }

    #[test]
    fn test_default_root_ends_with_crate_name() {
        assert!(FileStore::default_root().ends_with("surveywall"));
    }
}

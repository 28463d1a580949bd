//! Persistent key-value state with change notifications.
//!
//! All draw inputs and the draw history live in a single JSON object file
//! (`<state_dir>/state.json`). Listeners subscribe per key and are called after
//! every `set`/`remove`, and after `reload` picks up changes written by another
//! process.

use std::collections::BTreeMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use thiserror::Error;

/// State file name inside the state directory.
pub const STATE_FILE: &str = "state.json";

/// Handle returned by [`Store::subscribe`].
pub type SubscriptionId = usize;

type Listener = Box<dyn FnMut(Option<&Value>)>;

/// Store errors.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("failed to access {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("malformed state file {path}: {source}")]
    Malformed {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("failed to encode value for {key}: {source}")]
    Encode {
        key: String,
        #[source]
        source: serde_json::Error,
    },
}

/// File-backed key-value store.
pub struct Store {
    path: PathBuf,
    values: BTreeMap<String, Value>,
    listeners: Vec<(SubscriptionId, String, Listener)>,
    next_id: SubscriptionId,
}

impl Store {
    /// Open the store at `path`. A missing file is an empty store.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, StoreError> {
        let path = path.as_ref().to_path_buf();
        let values = read_values(&path)?;
        Ok(Self {
            path,
            values,
            listeners: Vec::new(),
            next_id: 0,
        })
    }

    /// Open `state.json` inside `state_dir`.
    pub fn open_in<P: AsRef<Path>>(state_dir: P) -> Result<Self, StoreError> {
        Self::open(state_dir.as_ref().join(STATE_FILE))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read a value. Values that no longer match `T` are reported and treated
    /// as missing so callers fall back to their defaults.
    pub fn get<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        let value = self.values.get(key)?;
        match serde_json::from_value(value.clone()) {
            Ok(parsed) => Some(parsed),
            Err(e) => {
                eprintln!("warning: ignoring unreadable value for \"{}\": {}", key, e);
                None
            }
        }
    }

    /// Read a value or fall back to `default`.
    pub fn get_or<T: DeserializeOwned>(&self, key: &str, default: T) -> T {
        self.get(key).unwrap_or(default)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.values.contains_key(key)
    }

    /// Store a value, write the file, then notify listeners of `key`.
    pub fn set<T: Serialize + ?Sized>(&mut self, key: &str, value: &T) -> Result<(), StoreError> {
        let encoded = serde_json::to_value(value).map_err(|source| StoreError::Encode {
            key: key.to_string(),
            source,
        })?;
        if self.values.get(key) == Some(&encoded) {
            return Ok(());
        }
        self.values.insert(key.to_string(), encoded);
        self.save()?;
        self.notify(key);
        Ok(())
    }

    /// Remove a value, write the file, then notify listeners with `None`.
    pub fn remove(&mut self, key: &str) -> Result<(), StoreError> {
        if self.values.remove(key).is_none() {
            return Ok(());
        }
        self.save()?;
        self.notify(key);
        Ok(())
    }

    /// Call `listener` whenever `key` changes.
    pub fn subscribe<F>(&mut self, key: &str, listener: F) -> SubscriptionId
    where
        F: FnMut(Option<&Value>) + 'static,
    {
        let id = self.next_id;
        self.next_id += 1;
        self.listeners.push((id, key.to_string(), Box::new(listener)));
        id
    }

    /// Drop a listener. Unknown ids are ignored.
    pub fn unsubscribe(&mut self, id: SubscriptionId) {
        self.listeners.retain(|(listener_id, _, _)| *listener_id != id);
    }

    /// Re-read the file and notify listeners of every key whose value changed
    /// on disk. Returns the changed keys.
    pub fn reload(&mut self) -> Result<Vec<String>, StoreError> {
        let fresh = read_values(&self.path)?;
        let mut changed: Vec<String> = self
            .values
            .keys()
            .chain(fresh.keys())
            .filter(|key| self.values.get(*key) != fresh.get(*key))
            .cloned()
            .collect();
        changed.sort();
        changed.dedup();

        self.values = fresh;
        for key in &changed {
            self.notify(key);
        }
        Ok(changed)
    }

    fn save(&self) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).map_err(|source| StoreError::Io {
                    path: parent.to_path_buf(),
                    source,
                })?;
            }
        }
        let mut content = serde_json::to_string_pretty(&self.values).map_err(|source| StoreError::Encode {
            key: self.path.display().to_string(),
            source,
        })?;
        content.push('\n');
        fs::write(&self.path, content).map_err(|source| StoreError::Io {
            path: self.path.clone(),
            source,
        })
    }

    fn notify(&mut self, key: &str) {
        let value = self.values.get(key).cloned();
        for (_, listener_key, listener) in self.listeners.iter_mut() {
            if listener_key == key {
                listener(value.as_ref());
            }
        }
    }
}

fn read_values(path: &Path) -> Result<BTreeMap<String, Value>, StoreError> {
    if !path.exists() {
        return Ok(BTreeMap::new());
    }
    let content = fs::read_to_string(path).map_err(|source| StoreError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    if content.trim().is_empty() {
        return Ok(BTreeMap::new());
    }
    serde_json::from_str(&content).map_err(|source| StoreError::Malformed {
        path: path.to_path_buf(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    use tempfile::TempDir;

    #[test]
    fn test_open_missing_file_is_empty() {
        let temp = TempDir::new().unwrap();
        let store = Store::open_in(temp.path()).unwrap();
        assert!(!store.contains("anything"));
        assert_eq!(store.get::<String>("anything"), None);
        assert_eq!(store.path(), temp.path().join(STATE_FILE));
    }

    #[test]
    fn test_set_persists_across_open() {
        let temp = TempDir::new().unwrap();
        let mut store = Store::open_in(temp.path().join("nested")).unwrap();
        store.set("team_count", &3usize).unwrap();
        store.set("participants", "Ana\nBruno").unwrap();

        let reopened = Store::open_in(temp.path().join("nested")).unwrap();
        assert_eq!(reopened.get::<usize>("team_count"), Some(3));
        assert_eq!(reopened.get::<String>("participants").as_deref(), Some("Ana\nBruno"));
    }

    #[test]
    fn test_get_wrong_type_falls_back() {
        let temp = TempDir::new().unwrap();
        let mut store = Store::open_in(temp.path()).unwrap();
        store.set("team_count", "two").unwrap();
        assert_eq!(store.get::<usize>("team_count"), None);
        assert_eq!(store.get_or("team_count", 2usize), 2);
    }

    #[test]
    fn test_malformed_file_is_an_error() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join(STATE_FILE), "{not json").unwrap();
        assert!(matches!(Store::open_in(temp.path()), Err(StoreError::Malformed { .. })));
    }

    #[test]
    fn test_subscribe_set_and_remove() {
        let temp = TempDir::new().unwrap();
        let mut store = Store::open_in(temp.path()).unwrap();
        let seen: Rc<RefCell<Vec<Option<Value>>>> = Rc::default();

        let sink = Rc::clone(&seen);
        store.subscribe("team_count", move |value| sink.borrow_mut().push(value.cloned()));

        store.set("team_count", &2usize).unwrap();
        store.set("other", &1usize).unwrap();
        store.set("team_count", &2usize).unwrap(); // unchanged, no event
        store.remove("team_count").unwrap();

        assert_eq!(*seen.borrow(), vec![Some(Value::from(2)), None]);
    }

    #[test]
    fn test_unsubscribe_stops_events() {
        let temp = TempDir::new().unwrap();
        let mut store = Store::open_in(temp.path()).unwrap();
        let count = Rc::new(RefCell::new(0));

        let sink = Rc::clone(&count);
        let id = store.subscribe("key", move |_| *sink.borrow_mut() += 1);
        store.set("key", &1).unwrap();
        store.unsubscribe(id);
        store.set("key", &2).unwrap();

        assert_eq!(*count.borrow(), 1);
    }

    #[test]
    fn test_reload_notifies_changes_from_other_writer() {
        let temp = TempDir::new().unwrap();
        let mut mine = Store::open_in(temp.path()).unwrap();
        mine.set("a", &1).unwrap();
        mine.set("b", &1).unwrap();

        let mut theirs = Store::open_in(temp.path()).unwrap();
        theirs.set("a", &5).unwrap();
        theirs.remove("b").unwrap();
        theirs.set("c", &true).unwrap();

        let seen: Rc<RefCell<Vec<(String, Option<Value>)>>> = Rc::default();
        for key in ["a", "b", "c"] {
            let sink = Rc::clone(&seen);
            mine.subscribe(key, move |value| sink.borrow_mut().push((key.to_string(), value.cloned())));
        }

        let changed = mine.reload().unwrap();
        assert_eq!(changed, vec!["a", "b", "c"]);
        assert_eq!(mine.get::<i32>("a"), Some(5));
        assert!(!mine.contains("b"));
        assert_eq!(
            *seen.borrow(),
            vec![
                ("a".to_string(), Some(Value::from(5))),
                ("b".to_string(), None),
                ("c".to_string(), Some(Value::from(true))),
            ]
        );
    }
}

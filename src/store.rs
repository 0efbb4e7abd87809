//! Checkbox state persistence.
//!
//! Keys are `<namespace>::<slug>`; values are stored as `"1"` / `"0"` strings
//! so files written here stay readable by the browser frontend's storage dumps.

use std::collections::{BTreeMap, HashMap};
use std::fs;
use std::path::{Path, PathBuf};

use thiserror::Error;

/// Maximum slug length in characters.
pub const SLUG_MAX_LEN: usize = 60;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("store I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("store file is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("store unavailable: {0}")]
    Unavailable(String),
}

/// Boolean key/value storage for checkbox state.
pub trait CheckStore {
    fn get(&self, key: &str) -> Result<Option<bool>, StoreError>;
    fn set(&mut self, key: &str, checked: bool) -> Result<(), StoreError>;
}

/// Derive the namespace for a request topic.
///
/// 32-bit rolling hash over UTF-16 code units, so the same topic maps to the
/// same namespace the browser frontend uses.
pub fn namespace(topic: &str) -> String {
    let hash = topic
        .encode_utf16()
        .fold(0i32, |h, unit| h.wrapping_mul(31).wrapping_add(i32::from(unit)));
    format!("rdm_{}", hash.unsigned_abs())
}

/// Sanitize task content into a key fragment.
///
/// Distinct contents can produce the same slug and will then share state.
pub fn slug(content: &str) -> String {
    let mut out = String::with_capacity(content.len());
    let mut in_space = false;
    for ch in content.chars() {
        if ch.is_whitespace() {
            if !in_space {
                out.push('_');
            }
            in_space = true;
            continue;
        }
        in_space = false;
        if ch.is_ascii_alphanumeric() || ch == '_' || ch == '-' {
            out.push(ch);
        }
    }
    out.chars().take(SLUG_MAX_LEN).collect()
}

/// Full persistence key for a task.
pub fn check_key(namespace: &str, content: &str) -> String {
    format!("{}::{}", namespace, slug(content))
}

fn encode(checked: bool) -> &'static str {
    if checked { "1" } else { "0" }
}

/// In-process store; state is lost on drop.
#[derive(Debug, Default, Clone)]
pub struct MemoryStore {
    entries: HashMap<String, bool>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl CheckStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<bool>, StoreError> {
        Ok(self.entries.get(key).copied())
    }

    fn set(&mut self, key: &str, checked: bool) -> Result<(), StoreError> {
        self.entries.insert(key.to_string(), checked);
        Ok(())
    }
}

/// JSON-file backed store, rewritten on every `set`.
#[derive(Debug)]
pub struct FileStore {
    path: PathBuf,
    entries: BTreeMap<String, String>,
}

impl FileStore {
    /// Open the store at `path`. A missing file is an empty store.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let path = path.into();
        let entries = match fs::read_to_string(&path) {
            Ok(content) if content.trim().is_empty() => BTreeMap::new(),
            Ok(content) => serde_json::from_str(&content)?,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => BTreeMap::new(),
            Err(e) => return Err(e.into()),
        };
        tracing::debug!("opened check store {} ({} entries)", path.display(), entries.len());
        Ok(Self { path, entries })
    }

    /// Default location under the platform data directory.
    pub fn default_path() -> PathBuf {
        let base = dirs::data_local_dir().unwrap_or_else(|| PathBuf::from("."));
        base.join("roadmap").join("checklist.json")
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn flush(&self) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        let json = serde_json::to_string_pretty(&self.entries)?;
        fs::write(&self.path, json)?;
        Ok(())
    }
}

impl CheckStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<bool>, StoreError> {
        Ok(self.entries.get(key).map(|v| v == "1"))
    }

    fn set(&mut self, key: &str, checked: bool) -> Result<(), StoreError> {
        self.entries.insert(key.to_string(), encode(checked).to_string());
        self.flush()
    }
}

/// Read persisted state, falling back to `default` when absent or unreadable.
pub fn load_checked(store: &impl CheckStore, key: &str, default: bool) -> bool {
    match store.get(key) {
        Ok(Some(checked)) => checked,
        Ok(None) => default,
        Err(e) => {
            tracing::warn!("could not read checklist state for {key}: {e}");
            default
        }
    }
}

/// Persist a toggle. Failures are logged and otherwise ignored.
pub fn save_checked(store: &mut impl CheckStore, key: &str, checked: bool) {
    if let Err(e) = store.set(key, checked) {
        tracing::warn!("could not save checklist state for {key}: {e}");
    }
}

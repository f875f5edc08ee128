//! Key-value backends.
//!
//! The note store only needs `get`/`set` over JSON values, the same contract
//! a browser extension's local storage offers. `SledBackend` keeps the values
//! on disk; `MemoryBackend` keeps them in a map and can be switched offline
//! to exercise failure paths.

use crate::error::{Error, Result};
use async_trait::async_trait;
use serde_json::Value;
use std::collections::HashMap;
use std::path::Path;
use std::sync::atomic::{AtomicBool, Ordering};
use tokio::sync::RwLock;
use tracing::{debug, warn};

/// Tree holding one entry per page key
pub const NOTES_TREE: &str = "video_notes";

#[async_trait]
pub trait KeyValueBackend: Send + Sync {
    /// Fetch the given keys, or every entry when `keys` is `None`.
    /// Missing keys are simply absent from the result.
    async fn get(&self, keys: Option<&[String]>) -> Result<HashMap<String, Value>>;

    /// Write every entry in `entries`, replacing existing values.
    async fn set(&self, entries: HashMap<String, Value>) -> Result<()>;
}

// ============================================================================
// Sled
// ============================================================================

#[derive(Clone)]
pub struct SledBackend {
    tree: sled::Tree,
}

impl SledBackend {
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let db = sled::open(path)?;
        Self::from_db(&db)
    }

    pub fn from_db(db: &sled::Db) -> Result<Self> {
        let tree = db.open_tree(NOTES_TREE)?;
        Ok(Self { tree })
    }

    fn decode(key: &str, bytes: &[u8]) -> Result<Value> {
        serde_json::from_slice(bytes).map_err(|e| {
            Error::Serialization(format!("value under {} is not JSON: {}", key, e))
        })
    }
}

#[async_trait]
impl KeyValueBackend for SledBackend {
    async fn get(&self, keys: Option<&[String]>) -> Result<HashMap<String, Value>> {
        let mut out = HashMap::new();
        match keys {
            Some(keys) => {
                // A named key whose value does not decode is an error, not absent
                for key in keys {
                    if let Some(bytes) = self.tree.get(key.as_bytes())? {
                        out.insert(key.clone(), Self::decode(key, &bytes)?);
                    }
                }
            }
            None => {
                for entry in self.tree.iter() {
                    let (k, v) = entry?;
                    let key = match String::from_utf8(k.to_vec()) {
                        Ok(key) => key,
                        Err(_) => continue,
                    };
                    match Self::decode(&key, &v) {
                        Ok(value) => {
                            out.insert(key, value);
                        }
                        Err(e) => warn!(key = %key, error = %e, "skipping undecodable backend value"),
                    }
                }
            }
        }
        Ok(out)
    }

    async fn set(&self, entries: HashMap<String, Value>) -> Result<()> {
        for (key, value) in &entries {
            let bytes = serde_json::to_vec(value)?;
            self.tree.insert(key.as_bytes(), bytes)?;
        }
        self.tree.flush()?;
        debug!(count = entries.len(), "backend entries written");
        Ok(())
    }
}

// ============================================================================
// In-memory
// ============================================================================

#[derive(Default)]
pub struct MemoryBackend {
    entries: RwLock<HashMap<String, Value>>,
    offline: AtomicBool,
}

impl MemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every subsequent call fail with `BackendUnavailable`.
    pub fn set_offline(&self, offline: bool) {
        self.offline.store(offline, Ordering::SeqCst);
    }

    fn check_online(&self) -> Result<()> {
        if self.offline.load(Ordering::SeqCst) {
            Err(Error::BackendUnavailable("memory backend is offline".to_string()))
        } else {
            Ok(())
        }
    }
}

#[async_trait]
impl KeyValueBackend for MemoryBackend {
    async fn get(&self, keys: Option<&[String]>) -> Result<HashMap<String, Value>> {
        self.check_online()?;
        let entries = self.entries.read().await;
        Ok(match keys {
            Some(keys) => keys
                .iter()
                .filter_map(|k| entries.get(k).map(|v| (k.clone(), v.clone())))
                .collect(),
            None => entries.clone(),
        })
    }

    async fn set(&self, entries: HashMap<String, Value>) -> Result<()> {
        self.check_online()?;
        self.entries.write().await.extend(entries);
        Ok(())
    }
}

//! Note storage on top of a key-value backend.
//!
//! Each page key maps to one JSON array holding that page's notes. Every
//! mutation is a fresh read-modify-write of the whole array with no cache
//! and no transaction. Two tabs writing the same key at the same time can
//! lose an edit: the last whole-collection write wins.

use crate::backend::KeyValueBackend;
use crate::error::{Error, Result};
use crate::models::{Note, NoteCollection, NoteMeta, PageKey};
use chrono::{DateTime, Utc};
use serde_json::Value;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{debug, info};

#[derive(Clone)]
pub struct NoteStore {
    backend: Arc<dyn KeyValueBackend>,
}

impl NoteStore {
    pub fn new(backend: Arc<dyn KeyValueBackend>) -> Self {
        Self { backend }
    }

    // ========================================================================
    // Backend round trips
    // ========================================================================

    /// Read a collection in storage order. Absent keys read as empty.
    async fn load(&self, key: &PageKey) -> Result<NoteCollection> {
        let keys = [key.as_str().to_string()];
        let mut values = self.backend.get(Some(&keys)).await?;
        match values.remove(key.as_str()) {
            Some(value) => serde_json::from_value(value).map_err(|e| {
                Error::Serialization(format!("value under {} is not a note list: {}", key, e))
            }),
            None => Ok(NoteCollection::new()),
        }
    }

    async fn save(&self, key: &PageKey, notes: &NoteCollection) -> Result<()> {
        let mut entries = HashMap::new();
        entries.insert(key.as_str().to_string(), serde_json::to_value(notes)?);
        self.backend.set(entries).await
    }

    // ========================================================================
    // Operations
    // ========================================================================

    /// Record a new, empty note at `timestamp` seconds.
    pub async fn append(&self, key: &PageKey, timestamp: u64, meta: NoteMeta) -> Result<Note> {
        self.append_at(key, timestamp, meta, Utc::now()).await
    }

    /// `append` with an explicit creation instant.
    pub async fn append_at(
        &self,
        key: &PageKey,
        timestamp: u64,
        meta: NoteMeta,
        now: DateTime<Utc>,
    ) -> Result<Note> {
        let mut notes = self.load(key).await?;

        let note = Note {
            id: notes.next_id(now),
            timestamp,
            text: String::new(),
            created_at: now,
            page_title: meta.page_title.filter(|t| !t.trim().is_empty()),
            page_url: meta.page_url.filter(|u| !u.trim().is_empty()),
        };
        notes.push(note.clone());
        self.save(key, &notes).await?;

        info!(key = %key, id = %note.id, timestamp, "note added");
        Ok(note)
    }

    /// Replace a note's text. Returns `false` without writing if the id is gone.
    pub async fn update(&self, key: &PageKey, note_id: &str, text: &str) -> Result<bool> {
        let mut notes = self.load(key).await?;

        match notes.find_mut(note_id) {
            Some(note) => note.text = text.to_string(),
            None => {
                debug!(key = %key, id = %note_id, "update skipped, note not found");
                return Ok(false);
            }
        }

        self.save(key, &notes).await?;
        debug!(key = %key, id = %note_id, "note updated");
        Ok(true)
    }

    /// Delete a note and return what is left, in storage order. Nothing is
    /// written when the id is not there.
    pub async fn remove(&self, key: &PageKey, note_id: &str) -> Result<NoteCollection> {
        let mut notes = self.load(key).await?;
        if !notes.remove(note_id) {
            debug!(key = %key, id = %note_id, "delete skipped, note not found");
            return Ok(notes);
        }
        self.save(key, &notes).await?;
        info!(key = %key, id = %note_id, remaining = notes.len(), "note deleted");
        Ok(notes)
    }

    /// Notes for a page in display order.
    pub async fn list(&self, key: &PageKey) -> Result<NoteCollection> {
        Ok(self.load(key).await?.sorted())
    }

    pub async fn get(&self, key: &PageKey, note_id: &str) -> Result<Option<Note>> {
        Ok(self.load(key).await?.find(note_id).cloned())
    }

    /// Every stored collection, ordered by key. Entries that are not note
    /// lists are skipped and left untouched.
    pub async fn list_all_keys(&self) -> Result<Vec<(PageKey, NoteCollection)>> {
        let all = self.backend.get(None).await?;

        let mut collections: Vec<(PageKey, NoteCollection)> = all
            .into_iter()
            .filter_map(|(key, value)| parse_collection(&key, value).map(|c| (PageKey::new(key), c)))
            .collect();
        collections.sort_by(|a, b| a.0.cmp(&b.0));
        Ok(collections)
    }
}

fn parse_collection(key: &str, value: Value) -> Option<NoteCollection> {
    if !value.is_array() {
        debug!(key = %key, "skipping non-collection entry");
        return None;
    }
    match serde_json::from_value(value) {
        Ok(notes) => Some(notes),
        Err(e) => {
            debug!(key = %key, error = %e, "skipping malformed collection");
            None
        }
    }
}

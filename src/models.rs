//! Data models for the video notes core.
//!
//! Notes are grouped into one collection per video. Collections are stored
//! whole under their page key, so everything here serializes to the same
//! JSON layout the browser side reads and writes.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

// ============================================================================
// Page Key
// ============================================================================

/// Stable identity of a video resource, e.g. `yt_dQw4w9WgXcQ` or `url_3fa2...`.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PageKey(String);

impl PageKey {
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The site tag in front of the first underscore (`yt`, `vimeo`, `url`...).
    pub fn site_tag(&self) -> Option<&str> {
        self.0.split_once('_').map(|(tag, _)| tag)
    }

    /// The part after the site tag, e.g. the YouTube video id.
    pub fn resource_id(&self) -> Option<&str> {
        self.0.split_once('_').map(|(_, id)| id)
    }
}

impl fmt::Display for PageKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for PageKey {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for PageKey {
    fn from(s: String) -> Self {
        Self(s)
    }
}

// ============================================================================
// Notes
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Note {
    pub id: String,
    /// Whole seconds into the video
    pub timestamp: u64,
    #[serde(rename = "note", default)]
    pub text: String,
    pub created_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub page_title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub page_url: Option<String>,
}

/// Page details captured alongside a new note. Both fields are best-effort.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NoteMeta {
    #[serde(default)]
    pub page_title: Option<String>,
    #[serde(default)]
    pub page_url: Option<String>,
}

/// All notes for one page key, in creation order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NoteCollection {
    notes: Vec<Note>,
}

impl NoteCollection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.notes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.notes.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Note> {
        self.notes.iter()
    }

    pub fn as_slice(&self) -> &[Note] {
        &self.notes
    }

    pub fn into_vec(self) -> Vec<Note> {
        self.notes
    }

    pub fn push(&mut self, note: Note) {
        self.notes.push(note);
    }

    pub fn find(&self, id: &str) -> Option<&Note> {
        self.notes.iter().find(|n| n.id == id)
    }

    pub fn find_mut(&mut self, id: &str) -> Option<&mut Note> {
        self.notes.iter_mut().find(|n| n.id == id)
    }

    /// Remove the note with `id`. Returns whether anything was removed.
    pub fn remove(&mut self, id: &str) -> bool {
        let before = self.notes.len();
        self.notes.retain(|n| n.id != id);
        self.notes.len() != before
    }

    /// Copy of the collection in display order (ascending timestamp).
    pub fn sorted(&self) -> NoteCollection {
        NoteCollection::from(crate::format::sort_by_timestamp(&self.notes))
    }

    /// Allocate an id derived from `now` that no note in this collection uses.
    pub fn next_id(&self, now: DateTime<Utc>) -> String {
        let mut candidate = now.timestamp_millis();
        while self.find(&candidate.to_string()).is_some() {
            candidate += 1;
        }
        candidate.to_string()
    }

    pub fn last_modified(&self) -> Option<DateTime<Utc>> {
        self.notes.iter().map(|n| n.created_at).max()
    }

    /// Title from the first note that carries a non-blank one.
    pub fn first_title(&self) -> Option<&str> {
        self.notes
            .iter()
            .filter_map(|n| n.page_title.as_deref())
            .find(|t| !t.trim().is_empty())
    }

    pub fn first_url(&self) -> Option<&str> {
        self.notes
            .iter()
            .filter_map(|n| n.page_url.as_deref())
            .find(|u| !u.trim().is_empty())
    }
}

impl From<Vec<Note>> for NoteCollection {
    fn from(notes: Vec<Note>) -> Self {
        Self { notes }
    }
}

impl<'a> IntoIterator for &'a NoteCollection {
    type Item = &'a Note;
    type IntoIter = std::slice::Iter<'a, Note>;

    fn into_iter(self) -> Self::IntoIter {
        self.notes.iter()
    }
}

// ============================================================================
// Page Context
// ============================================================================

/// What the UI glue can tell us about the page in the active tab.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageContext {
    pub url: String,
    /// `document.title` of the tab
    #[serde(default)]
    pub document_title: Option<String>,
    /// Text of a site-specific title element, when the page has one
    #[serde(default)]
    pub title_hint: Option<String>,
    #[serde(default)]
    pub has_video: bool,
}

impl PageContext {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            ..Default::default()
        }
    }
}

/// Response to `getPageInfo`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageInfo {
    pub page_key: PageKey,
    pub page_title: String,
    pub page_url: String,
    pub has_video: bool,
}

// ============================================================================
// Dashboard
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "src", rename_all = "lowercase")]
pub enum Thumbnail {
    /// Remote image that can be built from the resource id
    Url(String),
    /// Branded Vimeo placeholder
    Vimeo,
    /// Generic "Video" placeholder
    Generic,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VideoSummary {
    pub page_key: PageKey,
    pub title: String,
    pub url: String,
    pub note_count: usize,
    pub last_modified: DateTime<Utc>,
    pub thumbnail: Thumbnail,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn note(id: &str, ts: u64) -> Note {
        Note {
            id: id.to_string(),
            timestamp: ts,
            text: String::new(),
            created_at: Utc.timestamp_opt(1_700_000_000, 0).unwrap(),
            page_title: None,
            page_url: None,
        }
    }

    #[test]
    fn test_page_key_parts() {
        let key = PageKey::from("yt_dQw4w9WgXcQ");
        assert_eq!(key.site_tag(), Some("yt"));
        assert_eq!(key.resource_id(), Some("dQw4w9WgXcQ"));

        let bare = PageKey::from("legacyid");
        assert_eq!(bare.site_tag(), None);
    }

    #[test]
    fn test_note_json_layout() {
        let mut n = note("1700000000000", 42);
        n.text = "intro ends".to_string();
        n.page_title = Some("Talk".to_string());
        let json = serde_json::to_value(&n).unwrap();

        assert_eq!(json["id"], "1700000000000");
        assert_eq!(json["timestamp"], 42);
        assert_eq!(json["note"], "intro ends");
        assert_eq!(json["pageTitle"], "Talk");
        assert!(json.get("pageUrl").is_none());
        assert!(json["createdAt"].as_str().unwrap().starts_with("2023-11-14T"));
    }

    #[test]
    fn test_note_reads_browser_written_record() {
        let raw = r#"{"id":"1712","timestamp":7,"note":"","createdAt":"2024-04-01T10:00:00.000Z"}"#;
        let n: Note = serde_json::from_str(raw).unwrap();
        assert_eq!(n.timestamp, 7);
        assert!(n.page_title.is_none());
    }

    #[test]
    fn test_negative_timestamp_is_rejected() {
        let raw = r#"{"id":"1","timestamp":-3,"note":"","createdAt":"2024-04-01T10:00:00Z"}"#;
        assert!(serde_json::from_str::<Note>(raw).is_err());
    }

    #[test]
    fn test_next_id_skips_taken_ids() {
        let now = Utc.timestamp_millis_opt(1_700_000_000_000).unwrap();
        let coll = NoteCollection::from(vec![
            note("1700000000000", 1),
            note("1700000000001", 2),
        ]);
        assert_eq!(coll.next_id(now), "1700000000002");
        assert_eq!(NoteCollection::new().next_id(now), "1700000000000");
    }

    #[test]
    fn test_first_title_skips_blank() {
        let mut a = note("1", 1);
        a.page_title = Some("  ".to_string());
        let mut b = note("2", 2);
        b.page_title = Some("Real title".to_string());
        let coll = NoteCollection::from(vec![a, b]);
        assert_eq!(coll.first_title(), Some("Real title"));
        assert_eq!(coll.first_url(), None);
    }

    #[test]
    fn test_remove_reports_change() {
        let mut coll = NoteCollection::from(vec![note("1", 1), note("2", 2)]);
        assert!(coll.remove("1"));
        assert!(!coll.remove("1"));
        assert_eq!(coll.len(), 1);
    }
}

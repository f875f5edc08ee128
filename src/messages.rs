//! Messages exchanged between the notes UI and the page being watched.
//!
//! The browser side speaks camelCase JSON; the `action` tag matches the
//! names its listeners switch on.

use crate::models::PageKey;
use serde::{Deserialize, Serialize};

/// Ask the active page to seek its player.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct JumpToTime {
    pub timestamp: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct JumpResponse {
    pub success: bool,
}

/// User actions the UI forwards to the core.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "camelCase")]
pub enum Command {
    /// Bookmark the current playback position of the active page
    #[serde(rename_all = "camelCase")]
    AddNote { timestamp: u64 },
    #[serde(rename_all = "camelCase")]
    EditNote { note_id: String, text: String },
    #[serde(rename_all = "camelCase")]
    DeleteNote { note_id: String },
    #[serde(rename_all = "camelCase")]
    SelectVideo { page_key: PageKey },
    Seek { seconds: u64 },
    ShowDashboard,
    ShowNotes,
}

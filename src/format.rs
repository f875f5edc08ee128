//! Display ordering and time formatting for notes.

use crate::models::Note;

/// Stable ascending sort on timestamp. Notes at the same second keep the
/// order they were created in.
pub fn sort_by_timestamp(notes: &[Note]) -> Vec<Note> {
    let mut sorted = notes.to_vec();
    sorted.sort_by_key(|n| n.timestamp);
    sorted
}

/// `M:SS` under an hour, `H:MM:SS` from an hour up.
pub fn format_duration(seconds: u64) -> String {
    let hours = seconds / 3600;
    let mins = (seconds % 3600) / 60;
    let secs = seconds % 60;

    if hours > 0 {
        format!("{}:{:02}:{:02}", hours, mins, secs)
    } else {
        format!("{}:{:02}", mins, secs)
    }
}

pub fn pluralize_notes(count: usize) -> String {
    if count == 1 {
        "1 note".to_string()
    } else {
        format!("{} notes", count)
    }
}

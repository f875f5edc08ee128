//! The two pages: notes of one video, and the dashboard of all videos.

use super::components::{base_html, html_escape, render_markdown};
use crate::format::{format_duration, pluralize_notes};
use crate::models::{NoteCollection, PageKey, VideoSummary};
use crate::page_info::canonical_url;
use crate::url_validator::validate_video_url;

/// Link that opens the video at `seconds`, when the site supports it. A
/// stored URL that is not an HTTPS link to a known video host is ignored in
/// favor of the key's canonical URL.
pub fn timestamped_url(key: &PageKey, url: &str, seconds: u64) -> Option<String> {
    let mut parsed = match validate_video_url(url) {
        Ok(parsed) => parsed,
        Err(_) => validate_video_url(&canonical_url(key)?).ok()?,
    };

    match key.site_tag() {
        Some("yt") => {
            let kept: Vec<(String, String)> = parsed
                .query_pairs()
                .filter(|(k, _)| k != "t")
                .map(|(k, v)| (k.into_owned(), v.into_owned()))
                .collect();
            parsed
                .query_pairs_mut()
                .clear()
                .extend_pairs(kept)
                .append_pair("t", &format!("{}s", seconds));
            Some(parsed.to_string())
        }
        Some("vimeo") => {
            parsed.set_fragment(Some(&format!("t={}s", seconds)));
            Some(parsed.to_string())
        }
        _ => None,
    }
}

// ============================================================================
// Notes Page
// ============================================================================

pub fn render_notes_page(key: &PageKey, title: &str, url: &str, notes: &NoteCollection) -> String {
    let mut html = format!("<h1>{}</h1>", html_escape(title));

    if notes.is_empty() {
        html.push_str(
            r#"<div class="empty-state">
                <p>No notes yet!</p>
                <p>Use the + button on the video player to add one.</p>
            </div>"#,
        );
        return base_html(title, &html, Some(key.as_str()));
    }

    html.push_str(r#"<ul class="notes-list">"#);
    for note in notes.sorted().iter() {
        let stamp = format_duration(note.timestamp);
        let stamp_html = match timestamped_url(key, url, note.timestamp) {
            Some(link) => format!(
                r#"<a class="timestamp" href="{}" target="_blank">{}</a>"#,
                html_escape(&link),
                stamp
            ),
            None => format!(r#"<span class="timestamp">{}</span>"#, stamp),
        };
        let text_html = if note.text.trim().is_empty() {
            r#"<div class="note-text placeholder">Click edit to add a note...</div>"#.to_string()
        } else {
            format!(r#"<div class="note-text">{}</div>"#, render_markdown(&note.text))
        };

        html.push_str(&format!(
            r#"<li class="note-item" id="note-{id}">
                <div class="note-header">
                    {stamp}
                    <span class="note-actions">
                        <button class="edit" data-id="{id}" onclick="editNote(this.dataset.id)">Edit</button>
                        <button class="delete" data-id="{id}" onclick="deleteNote(this.dataset.id)">Delete</button>
                    </span>
                </div>
                {text}
            </li>"#,
            id = html_escape(&note.id),
            stamp = stamp_html,
            text = text_html,
        ));
    }
    html.push_str("</ul>");

    html.push_str(&format!(
        r#"<script>
    const KEY = {key};
    async function editNote(id) {{
        const text = prompt('Note text:');
        if (text === null) return;
        const resp = await fetch('/api/notes/' + encodeURIComponent(KEY) + '/' + encodeURIComponent(id), {{
            method: 'PUT',
            headers: {{ 'Content-Type': 'application/json' }},
            body: JSON.stringify({{ text }})
        }});
        if (resp.ok) location.reload(); else alert('Failed to save: ' + await resp.text());
    }}
    async function deleteNote(id) {{
        if (!confirm('Delete this note?')) return;
        const resp = await fetch('/api/notes/' + encodeURIComponent(KEY) + '/' + encodeURIComponent(id), {{ method: 'DELETE' }});
        if (resp.ok) location.reload(); else alert('Failed to delete: ' + await resp.text());
    }}
    </script>"#,
        key = serde_json::to_string(key.as_str()).unwrap_or_else(|_| "\"\"".to_string()),
    ));

    base_html(title, &html, Some(key.as_str()))
}

// ============================================================================
// Dashboard Page
// ============================================================================

pub fn render_dashboard_page(videos: &[VideoSummary], current_key: Option<&str>) -> String {
    let mut html = String::from("<h1>All Videos</h1>");

    if videos.is_empty() {
        html.push_str(
            r#"<div class="empty-state">
                <p>No videos with notes yet</p>
                <p>Start watching videos and add notes!</p>
            </div>"#,
        );
        return base_html("All Videos", &html, current_key);
    }

    html.push_str(r#"<div class="dashboard">"#);
    for video in videos {
        html.push_str(&format!(
            r#"<a class="video-card" href="/video/{href}">
                <img class="video-thumbnail" src="{thumb}" alt="Thumbnail">
                <div class="video-info">
                    <div class="video-title-text">{title}</div>
                    <div class="video-meta">{count} · {modified}</div>
                </div>
            </a>"#,
            href = urlencoding::encode(video.page_key.as_str()),
            thumb = html_escape(video.thumbnail.src()),
            title = html_escape(&video.title),
            count = pluralize_notes(video.note_count),
            modified = video.last_modified.format("%Y-%m-%d %H:%M"),
        ));
    }
    html.push_str("</div>");

    base_html("All Videos", &html, current_key)
}

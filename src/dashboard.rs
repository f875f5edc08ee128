//! Cross-video dashboard.
//!
//! Scans every collection in the store and reduces each one to a
//! [`VideoSummary`], most recently touched first.

use crate::error::Result;
use crate::models::{NoteCollection, PageKey, Thumbnail, VideoSummary};
use crate::page_info::{lookup_title, PageInfoSource};
use crate::store::NoteStore;
use std::sync::Arc;
use tracing::debug;

const VIMEO_PLACEHOLDER: &str = r##"data:image/svg+xml,<svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 120 68"><rect fill="%2300adef" width="120" height="68"/><text x="50%" y="50%" dominant-baseline="middle" text-anchor="middle" font-family="Arial" font-size="24" fill="white">Vimeo</text></svg>"##;

const GENERIC_PLACEHOLDER: &str = r##"data:image/svg+xml,<svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 120 68"><rect fill="%23333" width="120" height="68"/><text x="50%" y="50%" dominant-baseline="middle" text-anchor="middle" font-family="Arial" font-size="20" fill="white">Video</text></svg>"##;

/// Thumbnail from the key's site tag alone; nothing is fetched.
pub fn thumbnail_for(key: &PageKey) -> Thumbnail {
    match (key.site_tag(), key.resource_id()) {
        (Some("yt"), Some(id)) if !id.is_empty() => {
            Thumbnail::Url(format!("https://img.youtube.com/vi/{}/mqdefault.jpg", id))
        }
        (Some("vimeo"), _) => Thumbnail::Vimeo,
        _ => Thumbnail::Generic,
    }
}

impl Thumbnail {
    /// Value for an `<img src>`.
    pub fn src(&self) -> &str {
        match self {
            Thumbnail::Url(url) => url,
            Thumbnail::Vimeo => VIMEO_PLACEHOLDER,
            Thumbnail::Generic => GENERIC_PLACEHOLDER,
        }
    }
}

/// Label for a video nobody has a title for.
pub fn placeholder_title(key: &PageKey) -> String {
    let short: String = key.as_str().chars().take(15).collect();
    format!("Video: {}...", short)
}

#[derive(Clone)]
pub struct DashboardAggregator {
    store: NoteStore,
    sources: Vec<Arc<dyn PageInfoSource>>,
}

impl DashboardAggregator {
    pub fn new(store: NoteStore, sources: Vec<Arc<dyn PageInfoSource>>) -> Self {
        Self { store, sources }
    }

    async fn summarize(&self, key: PageKey, notes: &NoteCollection) -> Option<VideoSummary> {
        let last_modified = notes.last_modified()?;
        let url = notes.first_url().map(str::to_string);

        let title = match notes.first_title() {
            Some(t) => t.to_string(),
            None => match lookup_title(&self.sources, &key, url.as_deref()).await {
                Some(t) => t,
                None => placeholder_title(&key),
            },
        };

        Some(VideoSummary {
            thumbnail: thumbnail_for(&key),
            title,
            url: url.unwrap_or_default(),
            note_count: notes.len(),
            last_modified,
            page_key: key,
        })
    }

    /// One summary per non-empty collection, newest first. Equal
    /// `last_modified` values fall back to key order.
    pub async fn build_summaries(&self) -> Result<Vec<VideoSummary>> {
        let collections = self.store.list_all_keys().await?;

        let mut summaries = Vec::new();
        for (key, notes) in collections {
            if notes.is_empty() {
                continue;
            }
            if let Some(summary) = self.summarize(key, &notes).await {
                summaries.push(summary);
            }
        }

        summaries.sort_by(|a, b| {
            b.last_modified
                .cmp(&a.last_modified)
                .then_with(|| a.page_key.cmp(&b.page_key))
        });

        debug!(videos = summaries.len(), "dashboard built");
        Ok(summaries)
    }
}

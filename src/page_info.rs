//! Title lookups for pages whose notes carry no stored title.
//!
//! The dashboard asks each source in turn. `LivePage` answers from whatever
//! page the browser side last reported; `OEmbedLookup` asks the hosting
//! site's oEmbed endpoint and is only wired in when enabled in config.

use crate::error::{Error, Result};
use crate::identity;
use crate::models::{PageContext, PageKey};
use crate::url_validator::validate_video_url;
use async_trait::async_trait;
use serde::Deserialize;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::RwLock;
use tracing::debug;

#[async_trait]
pub trait PageInfoSource: Send + Sync {
    /// Title for `key`, if this source knows one. `url` is the stored page URL.
    async fn title_for(&self, key: &PageKey, url: Option<&str>) -> Option<String>;
}

/// Ask each source in order and take the first non-blank answer.
pub async fn lookup_title(
    sources: &[Arc<dyn PageInfoSource>],
    key: &PageKey,
    url: Option<&str>,
) -> Option<String> {
    for source in sources {
        if let Some(title) = source.title_for(key, url).await {
            let title = title.trim();
            if !title.is_empty() {
                return Some(title.to_string());
            }
        }
    }
    None
}

// ============================================================================
// Live page
// ============================================================================

/// The page most recently reported by the browser side.
#[derive(Default)]
pub struct LivePage {
    current: RwLock<Option<PageContext>>,
}

impl LivePage {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn report(&self, context: PageContext) {
        *self.current.write().await = Some(context);
    }

    pub async fn current(&self) -> Option<PageContext> {
        self.current.read().await.clone()
    }

    pub async fn current_key(&self) -> Option<PageKey> {
        self.current.read().await.as_ref().map(identity::resolve)
    }
}

#[async_trait]
impl PageInfoSource for LivePage {
    async fn title_for(&self, key: &PageKey, _url: Option<&str>) -> Option<String> {
        let guard = self.current.read().await;
        let context = guard.as_ref()?;
        // Only answer for the page that is actually open
        if identity::resolve(context) != *key {
            return None;
        }
        let title = identity::resolve_title(context);
        (title != identity::PLACEHOLDER_TITLE).then_some(title)
    }
}

// ============================================================================
// oEmbed
// ============================================================================

#[derive(Debug, Deserialize)]
struct OEmbedResponse {
    title: Option<String>,
}

pub struct OEmbedLookup {
    client: reqwest::Client,
}

impl OEmbedLookup {
    pub fn new() -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(10))
            .user_agent("Mozilla/5.0 (compatible; VideoNotes/1.0)")
            .build()?;
        Ok(Self { client })
    }

    async fn fetch(&self, endpoint: &str) -> Result<Option<String>> {
        let response = self.client.get(endpoint).send().await?;
        if !response.status().is_success() {
            return Err(Error::Request(format!("oEmbed returned {}", response.status())));
        }
        let body: OEmbedResponse = response.json().await?;
        Ok(body.title)
    }
}

/// Canonical watch URL for a site key, used when no URL was stored.
pub fn canonical_url(key: &PageKey) -> Option<String> {
    let id = key.resource_id()?;
    match key.site_tag()? {
        "yt" => Some(format!("https://www.youtube.com/watch?v={}", id)),
        "vimeo" => Some(format!("https://vimeo.com/{}", id)),
        "dailymotion" => Some(format!("https://www.dailymotion.com/video/{}", id)),
        _ => None,
    }
}

/// oEmbed endpoint for a key's site with `page_url` as the target.
pub fn oembed_endpoint(key: &PageKey, page_url: &str) -> Option<String> {
    let encoded = urlencoding::encode(page_url);
    match key.site_tag()? {
        "yt" => Some(format!(
            "https://www.youtube.com/oembed?url={}&format=json",
            encoded
        )),
        "vimeo" => Some(format!("https://vimeo.com/api/oembed.json?url={}", encoded)),
        "dailymotion" => Some(format!(
            "https://www.dailymotion.com/services/oembed?url={}&format=json",
            encoded
        )),
        _ => None,
    }
}

#[async_trait]
impl PageInfoSource for OEmbedLookup {
    async fn title_for(&self, key: &PageKey, url: Option<&str>) -> Option<String> {
        let page_url = match url.filter(|u| !u.trim().is_empty()) {
            Some(u) => u.to_string(),
            None => canonical_url(key)?,
        };
        let page_url = match validate_video_url(&page_url) {
            Ok(u) => u,
            Err(e) => {
                debug!(key = %key, error = %e, "oEmbed lookup skipped");
                return None;
            }
        };
        let endpoint = oembed_endpoint(key, page_url.as_str())?;

        match self.fetch(&endpoint).await {
            Ok(title) => title,
            Err(e) => {
                debug!(key = %key, error = %e, "oEmbed lookup failed");
                None
            }
        }
    }
}

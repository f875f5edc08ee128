//! Page identification.
//!
//! Maps the page in the active tab to a stable [`PageKey`]. Known video
//! hosts are matched against an ordered table of site rules; the first rule
//! whose host and path pattern both match produces `<tag>_<resourceId>`.
//! Everything else falls back to a truncated SHA-256 of the URL.
//!
//! Two different URLs can in principle hash to the same `url_` key. With 96
//! bits of digest kept that is accepted as practically impossible.

use crate::models::{PageContext, PageInfo, PageKey};
use regex::Regex;
use sha2::{Digest, Sha256};
use std::sync::OnceLock;
use url::Url;

/// Hex characters of the digest kept for `url_` keys
pub const KEY_HASH_LEN: usize = 24;

/// Prefix for keys derived from a URL hash
pub const URL_KEY_PREFIX: &str = "url_";

/// Title used when nothing better is known
pub const PLACEHOLDER_TITLE: &str = "Video";

// ============================================================================
// Site Table
// ============================================================================

pub struct SiteRule {
    pub tag: &'static str,
    /// Host suffixes; `youtube.com` also covers `www.` and `m.` subdomains
    pub hosts: &'static [&'static str],
    /// Matched against `path` or `path?query`; capture group 1 is the id
    pub patterns: &'static [&'static str],
    /// Decorations the site appends to `document.title`
    pub title_suffixes: &'static [&'static str],
}

/// Known sites in priority order.
pub const SITE_RULES: &[SiteRule] = &[
    SiteRule {
        tag: "yt",
        hosts: &["youtube.com", "youtube-nocookie.com"],
        patterns: &[
            r"^/watch\?(?:.*&)?v=([A-Za-z0-9_-]{11})(?:&|$)",
            r"^/(?:shorts|embed|live|v)/([A-Za-z0-9_-]{11})(?:[/?]|$)",
        ],
        title_suffixes: &[" - YouTube Music", " - YouTube"],
    },
    SiteRule {
        tag: "yt",
        hosts: &["youtu.be"],
        patterns: &[r"^/([A-Za-z0-9_-]{11})(?:[/?]|$)"],
        title_suffixes: &[" - YouTube"],
    },
    SiteRule {
        tag: "vimeo",
        hosts: &["vimeo.com"],
        patterns: &[
            r"^/video/(\d+)(?:[/?]|$)",
            r"^/channels/[^/]+/(\d+)(?:[/?]|$)",
            r"^/groups/[^/]+/videos/(\d+)(?:[/?]|$)",
            r"^/(\d+)(?:[/?]|$)",
        ],
        title_suffixes: &[" on Vimeo"],
    },
    SiteRule {
        tag: "dailymotion",
        hosts: &["dailymotion.com"],
        patterns: &[r"^/(?:embed/)?video/([A-Za-z0-9]+)(?:[_/?]|$)"],
        title_suffixes: &[" - Dailymotion", " - Vidéo Dailymotion"],
    },
    SiteRule {
        tag: "dailymotion",
        hosts: &["dai.ly"],
        patterns: &[r"^/([A-Za-z0-9]+)(?:[/?]|$)"],
        title_suffixes: &[" - Dailymotion"],
    },
];

struct CompiledRule {
    rule: &'static SiteRule,
    patterns: Vec<Regex>,
}

fn compiled_rules() -> &'static [CompiledRule] {
    static RULES: OnceLock<Vec<CompiledRule>> = OnceLock::new();
    RULES.get_or_init(|| {
        SITE_RULES
            .iter()
            .map(|rule| CompiledRule {
                rule,
                patterns: rule
                    .patterns
                    .iter()
                    .filter_map(|p| Regex::new(p).ok())
                    .collect(),
            })
            .collect()
    })
}

fn host_matches(host: &str, allowed: &str) -> bool {
    host == allowed || host.ends_with(&format!(".{}", allowed))
}

impl SiteRule {
    pub fn matches_host(&self, host: &str) -> bool {
        let host = host.to_lowercase();
        self.hosts.iter().any(|allowed| host_matches(&host, allowed))
    }
}

impl CompiledRule {
    fn extract(&self, url: &Url) -> Option<String> {
        if !self.rule.matches_host(url.host_str()?) {
            return None;
        }
        let target = match url.query() {
            Some(q) => format!("{}?{}", url.path(), q),
            None => url.path().to_string(),
        };
        self.patterns.iter().find_map(|re| {
            re.captures(&target)
                .and_then(|caps| caps.get(1))
                .map(|m| m.as_str().to_string())
        })
    }
}

/// The first rule whose host and pattern match, with the extracted id.
pub fn match_site(url: &Url) -> Option<(&'static SiteRule, String)> {
    compiled_rules()
        .iter()
        .find_map(|compiled| compiled.extract(url).map(|id| (compiled.rule, id)))
}

// ============================================================================
// Key Resolution
// ============================================================================

/// Hash-based key for pages no site rule recognizes. The fragment is dropped
/// so in-page anchors do not split one page into several keys.
pub fn url_hash_key(raw: &str) -> PageKey {
    let canonical = match Url::parse(raw.trim()) {
        Ok(mut url) => {
            url.set_fragment(None);
            url.to_string()
        }
        Err(_) => raw.trim().to_string(),
    };

    let mut hasher = Sha256::new();
    hasher.update(canonical.as_bytes());
    let digest: String = hasher
        .finalize()
        .iter()
        .map(|b| format!("{:02x}", b))
        .collect();

    PageKey::new(format!("{}{}", URL_KEY_PREFIX, &digest[..KEY_HASH_LEN]))
}

/// Resolve a URL to its page key. Never fails.
pub fn resolve_url(raw: &str) -> PageKey {
    if let Ok(url) = Url::parse(raw.trim()) {
        if let Some((rule, id)) = match_site(&url) {
            return PageKey::new(format!("{}_{}", rule.tag, id));
        }
    }
    url_hash_key(raw)
}

pub fn resolve(context: &PageContext) -> PageKey {
    resolve_url(&context.url)
}

// ============================================================================
// Title Resolution
// ============================================================================

fn strip_badge(title: &str) -> &str {
    static BADGE: OnceLock<Option<Regex>> = OnceLock::new();
    let badge = BADGE.get_or_init(|| Regex::new(r"^\(\d+\+?\)\s*").ok());
    match badge.as_ref().and_then(|re| re.find(title)) {
        Some(m) => &title[m.end()..],
        None => title,
    }
}

/// Clean up a tab title: drop notification badges and the site's suffix.
pub fn clean_document_title(title: &str, rule: Option<&SiteRule>) -> String {
    let mut cleaned = strip_badge(title.trim());
    let suffixes = rule.map(|r| r.title_suffixes).unwrap_or(&[]);
    for suffix in suffixes {
        // "Title - YouTube" or a bare "- YouTube", but not "Salon Vimeo"
        if let Some(rest) = cleaned.strip_suffix(suffix.trim_start()) {
            if rest.is_empty() || rest.ends_with(char::is_whitespace) {
                cleaned = rest;
                break;
            }
        }
    }
    cleaned.trim().to_string()
}

/// Best-effort title: site title element, then tab title, then "Video".
pub fn resolve_title(context: &PageContext) -> String {
    if let Some(hint) = context.title_hint.as_deref() {
        let hint = hint.trim();
        if !hint.is_empty() {
            return hint.to_string();
        }
    }

    if let Some(doc_title) = context.document_title.as_deref() {
        let rule = Url::parse(context.url.trim())
            .ok()
            .and_then(|url| match_site(&url).map(|(rule, _)| rule));
        let cleaned = clean_document_title(doc_title, rule);
        if !cleaned.is_empty() {
            return cleaned;
        }
    }

    PLACEHOLDER_TITLE.to_string()
}

/// Build the `getPageInfo` response for a page.
pub fn page_info(context: &PageContext) -> PageInfo {
    PageInfo {
        page_key: resolve(context),
        page_title: resolve_title(context),
        page_url: context.url.clone(),
        has_video: context.has_video,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(url: &str) -> String {
        resolve_url(url).to_string()
    }

    #[test]
    fn test_youtube_watch() {
        assert_eq!(key("https://www.youtube.com/watch?v=dQw4w9WgXcQ"), "yt_dQw4w9WgXcQ");
        assert_eq!(
            key("https://www.youtube.com/watch?list=PL123&v=dQw4w9WgXcQ&t=42s"),
            "yt_dQw4w9WgXcQ"
        );
        assert_eq!(key("https://m.youtube.com/watch?v=dQw4w9WgXcQ"), "yt_dQw4w9WgXcQ");
        assert_eq!(key("https://music.youtube.com/watch?v=dQw4w9WgXcQ"), "yt_dQw4w9WgXcQ");
    }

    #[test]
    fn test_youtube_other_forms() {
        assert_eq!(key("https://youtu.be/dQw4w9WgXcQ?t=10"), "yt_dQw4w9WgXcQ");
        assert_eq!(key("https://www.youtube.com/shorts/abcdefghijk"), "yt_abcdefghijk");
        assert_eq!(key("https://www.youtube.com/embed/abcdefghijk"), "yt_abcdefghijk");
        assert_eq!(
            key("https://www.youtube-nocookie.com/embed/abcdefghijk"),
            "yt_abcdefghijk"
        );
    }

    #[test]
    fn test_youtube_without_video_falls_back() {
        assert!(key("https://www.youtube.com/feed/subscriptions").starts_with("url_"));
        assert!(key("https://www.youtube.com/watch?v=short").starts_with("url_"));
    }

    #[test]
    fn test_vimeo() {
        assert_eq!(key("https://vimeo.com/76979871"), "vimeo_76979871");
        assert_eq!(key("https://player.vimeo.com/video/76979871?h=abc"), "vimeo_76979871");
        assert_eq!(key("https://vimeo.com/channels/staffpicks/76979871"), "vimeo_76979871");
        assert!(key("https://vimeo.com/about").starts_with("url_"));
    }

    #[test]
    fn test_dailymotion() {
        assert_eq!(key("https://www.dailymotion.com/video/x8abcd1"), "dailymotion_x8abcd1");
        assert_eq!(key("https://dai.ly/x8abcd1"), "dailymotion_x8abcd1");
    }

    #[test]
    fn test_lookalike_host_is_not_a_site() {
        assert!(key("https://notyoutube.com/watch?v=dQw4w9WgXcQ").starts_with("url_"));
        assert!(key("https://youtube.com.evil.example/watch?v=dQw4w9WgXcQ").starts_with("url_"));
    }

    #[test]
    fn test_resolution_is_deterministic() {
        for url in [
            "https://www.youtube.com/watch?v=dQw4w9WgXcQ",
            "https://vimeo.com/76979871",
            "https://example.com/lectures/week-3.html",
            "not a url at all",
        ] {
            assert_eq!(resolve_url(url), resolve_url(url));
        }
    }

    #[test]
    fn test_hash_key_is_bounded() {
        let long = format!("https://example.com/{}", "segment/".repeat(2000));
        for url in ["https://example.com/a", long.as_str(), "", "::::"] {
            let k = key(url);
            assert!(k.starts_with(URL_KEY_PREFIX));
            assert_eq!(k.len(), URL_KEY_PREFIX.len() + KEY_HASH_LEN);
        }
    }

    #[test]
    fn test_hash_key_ignores_fragment_only() {
        assert_eq!(
            key("https://example.com/video.html#chapter-2"),
            key("https://example.com/video.html")
        );
        assert_ne!(
            key("https://example.com/video.html?part=1"),
            key("https://example.com/video.html?part=2")
        );
    }

    #[test]
    fn test_title_prefers_hint() {
        let ctx = PageContext {
            url: "https://www.youtube.com/watch?v=dQw4w9WgXcQ".to_string(),
            document_title: Some("(3) Never Gonna Give You Up - YouTube".to_string()),
            title_hint: Some("  Never Gonna Give You Up ".to_string()),
            has_video: true,
        };
        assert_eq!(resolve_title(&ctx), "Never Gonna Give You Up");
    }

    #[test]
    fn test_title_cleans_document_title() {
        let ctx = PageContext {
            url: "https://www.youtube.com/watch?v=dQw4w9WgXcQ".to_string(),
            document_title: Some("(3) Never Gonna Give You Up - YouTube".to_string()),
            title_hint: Some("".to_string()),
            has_video: true,
        };
        assert_eq!(resolve_title(&ctx), "Never Gonna Give You Up");

        let vimeo = PageContext {
            url: "https://vimeo.com/76979871".to_string(),
            document_title: Some("The New Vimeo Player on Vimeo".to_string()),
            ..Default::default()
        };
        assert_eq!(resolve_title(&vimeo), "The New Vimeo Player");
    }

    #[test]
    fn test_title_placeholder() {
        assert_eq!(resolve_title(&PageContext::new("https://example.com")), "Video");
        let only_suffix = PageContext {
            url: "https://www.youtube.com/watch?v=dQw4w9WgXcQ".to_string(),
            document_title: Some(" - YouTube".to_string()),
            ..Default::default()
        };
        assert_eq!(resolve_title(&only_suffix), "Video");
    }

    #[test]
    fn test_page_info() {
        let ctx = PageContext {
            url: "https://vimeo.com/76979871".to_string(),
            document_title: None,
            title_hint: Some("Clip".to_string()),
            has_video: true,
        };
        let info = page_info(&ctx);
        assert_eq!(info.page_key.as_str(), "vimeo_76979871");
        assert_eq!(info.page_title, "Clip");
        assert!(info.has_video);
    }
}

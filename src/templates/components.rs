//! Shared HTML pieces: escaping, note text rendering, nav bar, page shell.

use pulldown_cmark::Parser;

use super::styles::STYLE;

// ============================================================================
// Text Escaping
// ============================================================================

pub fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

// ============================================================================
// Markdown Rendering
// ============================================================================

/// Render note text as markdown. Raw HTML in the text is sanitized away.
pub fn render_markdown(content: &str) -> String {
    let parser = Parser::new(content);
    let mut html_output = String::new();
    pulldown_cmark::html::push_html(&mut html_output, parser);
    ammonia::clean(&html_output)
}

// ============================================================================
// Navigation Bar
// ============================================================================

pub fn nav_bar(current_key: Option<&str>) -> String {
    let notes_link = match current_key {
        Some(key) => format!(
            r#"<a href="/video/{}">Current video</a>"#,
            urlencoding::encode(key)
        ),
        None => String::new(),
    };

    format!(
        r#"<nav class="nav-bar">
            <a href="/">All videos</a>
            {}
        </nav>"#,
        notes_link
    )
}

// ============================================================================
// Base Template
// ============================================================================

pub fn base_html(title: &str, content: &str, current_key: Option<&str>) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>{title}</title>
    <style>{STYLE}</style>
</head>
<body>
    {nav}
    <div class="container">
        {content}
    </div>
</body>
</html>"#,
        title = html_escape(title),
        STYLE = STYLE,
        nav = nav_bar(current_key),
        content = content,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_html_escape() {
        assert_eq!(
            html_escape(r#"<b>"Tom" & 'Jerry'</b>"#),
            "&lt;b&gt;&quot;Tom&quot; &amp; &#39;Jerry&#39;&lt;/b&gt;"
        );
    }

    #[test]
    fn test_render_markdown_strips_script() {
        let html = render_markdown("**bold** <script>alert(1)</script>");
        assert!(html.contains("<strong>bold</strong>"));
        assert!(!html.contains("<script>"));
    }

    #[test]
    fn test_nav_bar_links_current_video() {
        assert!(nav_bar(Some("yt_abc")).contains(r#"href="/video/yt_abc""#));
        assert!(!nav_bar(None).contains("Current video"));
    }

    #[test]
    fn test_base_html_escapes_title() {
        let page = base_html("<Notes>", "<p>body</p>", None);
        assert!(page.contains("<title>&lt;Notes&gt;</title>"));
        assert!(page.contains("<p>body</p>"));
    }
}

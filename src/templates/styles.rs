//! CSS for the notes and dashboard pages.

// ============================================================================
// CSS Styles
// ============================================================================

pub const STYLE: &str = r#"
/* Solarized Light Theme */
:root {
    --base01: #586e75;
    --base00: #657b83;
    --base1: #93a1a1;
    --base2: #eee8d5;
    --base3: #fdf6e3;

    --red: #dc322f;
    --blue: #268bd2;
    --cyan: #2aa198;

    --bg: var(--base3);
    --fg: var(--base00);
    --muted: var(--base1);
    --border: var(--base2);
    --link: var(--blue);
    --link-hover: var(--cyan);
    --highlight: #f7f2e2;
}

* { box-sizing: border-box; margin: 0; padding: 0; }

body {
    font-family: -apple-system, BlinkMacSystemFont, "Segoe UI", Roboto, "Helvetica Neue", Arial, sans-serif;
    line-height: 1.6;
    color: var(--fg);
    background: var(--bg);
}

.container {
    max-width: 720px;
    margin: 0 auto;
    padding: 1rem;
}

a { color: var(--link); text-decoration: none; }
a:hover { color: var(--link-hover); text-decoration: underline; }

h1 { font-size: 1.5rem; font-weight: 600; margin: 1em 0 0.5em; }

.nav-bar {
    position: sticky;
    top: 0;
    background: var(--bg);
    border-bottom: 1px solid var(--border);
    padding: 0.5rem 1rem;
    display: flex;
    gap: 1rem;
    align-items: center;
    z-index: 100;
}

.empty-state { color: var(--muted); text-align: center; padding: 3rem 1rem; }

/* Notes of one video */
.notes-list { list-style: none; }
.note-item {
    padding: 0.75rem 0;
    border-bottom: 1px solid var(--border);
}
.note-item:last-child { border-bottom: none; }
.note-header { display: flex; justify-content: space-between; align-items: center; }
.timestamp {
    font-family: "SF Mono", "Consolas", "Liberation Mono", monospace;
    color: var(--link);
    cursor: pointer;
}
.note-text { margin-top: 0.25rem; }
.note-text.placeholder { color: var(--muted); font-style: italic; }
.note-actions button {
    background: none;
    border: 1px solid var(--border);
    border-radius: 4px;
    padding: 0.1rem 0.5rem;
    color: var(--fg);
    cursor: pointer;
}
.note-actions button.delete:hover { color: var(--red); border-color: var(--red); }

/* Dashboard */
.dashboard { display: flex; flex-direction: column; gap: 0.75rem; }
.video-card {
    display: flex;
    gap: 0.75rem;
    padding: 0.5rem;
    border: 1px solid var(--border);
    border-radius: 6px;
}
.video-card:hover { background: var(--highlight); }
.video-thumbnail { width: 120px; height: 68px; object-fit: cover; border-radius: 4px; }
.video-title-text { font-weight: 600; color: var(--base01); }
.video-meta { font-size: 0.8rem; color: var(--muted); }
"#;

//! HTML templates and styling for the notes pages.
//!
//! ## Module Structure
//!
//! - `styles` - CSS constants
//! - `components` - Escaping, markdown, nav bar, base template
//! - `pages` - Notes-of-one-video and dashboard pages

mod components;
mod pages;
mod styles;

pub use components::{base_html, html_escape, nav_bar, render_markdown};
pub use pages::{render_dashboard_page, render_notes_page, timestamped_url};
pub use styles::STYLE;

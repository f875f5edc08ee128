//! Video notes library - timestamped notes on videos, keyed per video.
//!
//! The core maps the page in a browser tab to a stable key, keeps each
//! video's notes under that key in a key-value backend, and aggregates all
//! videos into a dashboard. The binary serves the same operations over HTTP.

use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::info;

pub mod backend;
pub mod config;
pub mod dashboard;
pub mod error;
pub mod format;
pub mod handlers;
pub mod identity;
pub mod messages;
pub mod models;
pub mod page_info;
pub mod seek;
pub mod session;
pub mod store;
pub mod templates;
pub mod url_validator;

// ============================================================================
// Application State
// ============================================================================

pub struct AppState {
    pub config: Config,
    pub store: NoteStore,
    pub dashboard: DashboardAggregator,
    pub live_page: Arc<LivePage>,
    pub session: Mutex<Session>,
}

impl AppState {
    /// Open the on-disk backend named in `config`.
    pub fn new(config: Config) -> Result<Self> {
        let backend = SledBackend::open(&config.db_path)?;
        info!(path = %config.db_path.display(), "opened note database");
        Self::with_backend(config, Arc::new(backend))
    }

    pub fn with_backend(config: Config, backend: Arc<dyn KeyValueBackend>) -> Result<Self> {
        let store = NoteStore::new(backend);
        let live_page = Arc::new(LivePage::new());

        let mut sources = vec![live_page.clone() as Arc<dyn PageInfoSource>];
        if config.oembed {
            sources.push(Arc::new(OEmbedLookup::new()?));
        }

        let dashboard = DashboardAggregator::new(store.clone(), sources);
        let session = Session::new(store.clone(), dashboard.clone());

        Ok(Self {
            config,
            store,
            dashboard,
            live_page,
            session: Mutex::new(session),
        })
    }
}

// Re-export commonly used types
pub use backend::{KeyValueBackend, MemoryBackend, SledBackend};
pub use config::Config;
pub use dashboard::{placeholder_title, thumbnail_for, DashboardAggregator};
pub use error::{Error, Result};
pub use format::{format_duration, pluralize_notes, sort_by_timestamp};
pub use identity::{page_info, resolve, resolve_title, resolve_url};
pub use messages::{Command, JumpResponse, JumpToTime};
pub use models::{
    Note, NoteCollection, NoteMeta, PageContext, PageInfo, PageKey, Thumbnail, VideoSummary,
};
pub use page_info::{LivePage, OEmbedLookup, PageInfoSource};
pub use seek::{handle_jump, seek_to, MediaElement, MediaHost};
pub use session::{Outcome, Session, ViewState};
pub use store::NoteStore;

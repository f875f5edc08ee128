//! View state and command dispatch for one notes UI.
//!
//! The UI shows either the notes of one video or the dashboard of all
//! videos. Switching happens only through [`Command`]s; the session keeps
//! the current view and the page the browser last reported.

use crate::dashboard::DashboardAggregator;
use crate::error::Result;
use crate::identity;
use crate::messages::{Command, JumpToTime};
use crate::models::{Note, NoteCollection, NoteMeta, PageContext, PageKey, VideoSummary};
use crate::store::NoteStore;
use serde::Serialize;
use tracing::debug;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "view", rename_all = "camelCase")]
pub enum ViewState {
    /// Notes of one video; `key` is `None` when no video page is open
    #[serde(rename_all = "camelCase")]
    Notes { key: Option<PageKey> },
    Dashboard,
}

/// What a command produced, for the UI to render.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", content = "data", rename_all = "camelCase")]
pub enum Outcome {
    NoteAdded(Note),
    NoteUpdated(bool),
    Notes(NoteCollection),
    Dashboard(Vec<VideoSummary>),
    /// Forward to the page that is playing
    Jump(JumpToTime),
    /// The action needs a video page and none is open
    NoVideo,
}

pub struct Session {
    store: NoteStore,
    dashboard: DashboardAggregator,
    view: ViewState,
    page: Option<PageContext>,
}

impl Session {
    pub fn new(store: NoteStore, dashboard: DashboardAggregator) -> Self {
        Self {
            store,
            dashboard,
            view: ViewState::Notes { key: None },
            page: None,
        }
    }

    pub fn view(&self) -> &ViewState {
        &self.view
    }

    /// Record the page now open in the active tab. A notes view that had no
    /// video follows the new page.
    pub fn set_page(&mut self, context: PageContext) {
        if let ViewState::Notes { key: None } = self.view {
            if context.has_video {
                self.view = ViewState::Notes {
                    key: Some(identity::resolve(&context)),
                };
            }
        }
        self.page = Some(context);
    }

    fn page_key(&self) -> Option<PageKey> {
        self.page
            .as_ref()
            .filter(|p| p.has_video)
            .map(identity::resolve)
    }

    fn notes_key(&self) -> Option<PageKey> {
        match &self.view {
            ViewState::Notes { key: Some(key) } => Some(key.clone()),
            _ => self.page_key(),
        }
    }

    pub async fn dispatch(&mut self, command: Command) -> Result<Outcome> {
        debug!(?command, "dispatch");
        match command {
            Command::AddNote { timestamp } => {
                let (key, meta) = match self.page.as_ref().filter(|p| p.has_video) {
                    Some(page) => (
                        identity::resolve(page),
                        NoteMeta {
                            page_title: Some(identity::resolve_title(page)),
                            page_url: Some(page.url.clone()),
                        },
                    ),
                    None => return Ok(Outcome::NoVideo),
                };
                let note = self.store.append(&key, timestamp, meta).await?;
                Ok(Outcome::NoteAdded(note))
            }
            Command::EditNote { note_id, text } => match self.notes_key() {
                Some(key) => Ok(Outcome::NoteUpdated(
                    self.store.update(&key, &note_id, &text).await?,
                )),
                None => Ok(Outcome::NoVideo),
            },
            Command::DeleteNote { note_id } => match self.notes_key() {
                Some(key) => {
                    let remaining = self.store.remove(&key, &note_id).await?;
                    Ok(Outcome::Notes(remaining.sorted()))
                }
                None => Ok(Outcome::NoVideo),
            },
            Command::SelectVideo { page_key } => {
                let notes = self.store.list(&page_key).await?;
                self.view = ViewState::Notes {
                    key: Some(page_key),
                };
                Ok(Outcome::Notes(notes))
            }
            Command::Seek { seconds } => Ok(Outcome::Jump(JumpToTime { timestamp: seconds })),
            Command::ShowDashboard => {
                let summaries = self.dashboard.build_summaries().await?;
                self.view = ViewState::Dashboard;
                Ok(Outcome::Dashboard(summaries))
            }
            Command::ShowNotes => {
                let key = self.page_key();
                self.view = ViewState::Notes { key: key.clone() };
                match key {
                    Some(key) => Ok(Outcome::Notes(self.store.list(&key).await?)),
                    None => Ok(Outcome::NoVideo),
                }
            }
        }
    }
}

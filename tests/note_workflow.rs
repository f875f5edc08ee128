//! End-to-end flows through the public library API.

use std::sync::Arc;

use video_notes::{
    format_duration, handle_jump, resolve, AppState, Command, Config, DashboardAggregator,
    JumpToTime, KeyValueBackend, MediaElement, MediaHost, MemoryBackend, NoteMeta, NoteStore,
    Outcome, PageContext, SledBackend, Thumbnail,
};

fn watch_page(id: &str, title: &str) -> PageContext {
    PageContext {
        url: format!("https://www.youtube.com/watch?v={}", id),
        document_title: Some(format!("{} - YouTube", title)),
        title_hint: None,
        has_video: true,
    }
}

#[tokio::test]
async fn bookmark_edit_and_browse() {
    let backend: Arc<dyn KeyValueBackend> = Arc::new(MemoryBackend::new());
    let store = NoteStore::new(backend);

    let page = watch_page("dQw4w9WgXcQ", "Never Gonna Give You Up");
    let key = resolve(&page);
    assert_eq!(key.as_str(), "yt_dQw4w9WgXcQ");

    let meta = NoteMeta {
        page_title: Some("Never Gonna Give You Up".to_string()),
        page_url: Some(page.url.clone()),
    };
    let late = store.append(&key, 3661, meta.clone()).await.unwrap();
    let early = store.append(&key, 65, meta).await.unwrap();
    assert!(store.update(&key, &early.id, "chorus starts").await.unwrap());

    let listed = store.list(&key).await.unwrap();
    let rendered: Vec<String> = listed.iter().map(|n| format_duration(n.timestamp)).collect();
    assert_eq!(rendered, vec!["1:05", "1:01:01"]);
    assert_eq!(listed.find(&early.id).unwrap().text, "chorus starts");
    assert_eq!(listed.find(&late.id).unwrap().text, "");

    let dash = DashboardAggregator::new(store.clone(), vec![]);
    let summaries = dash.build_summaries().await.unwrap();
    assert_eq!(summaries.len(), 1);
    assert_eq!(summaries[0].title, "Never Gonna Give You Up");
    assert_eq!(summaries[0].note_count, 2);
    assert_eq!(
        summaries[0].thumbnail,
        Thumbnail::Url("https://img.youtube.com/vi/dQw4w9WgXcQ/mqdefault.jpg".to_string())
    );
}

#[tokio::test]
async fn sled_backend_survives_reopen() {
    let dir = std::env::temp_dir().join(format!("video-notes-reopen-{}", std::process::id()));
    let _ = std::fs::remove_dir_all(&dir);
    let key = resolve(&PageContext::new("https://example.com/lectures/week-3.html"));

    {
        let backend = Arc::new(SledBackend::open(&dir).unwrap());
        let store = NoteStore::new(backend);
        store.append(&key, 42, NoteMeta::default()).await.unwrap();
    }

    {
        let backend = Arc::new(SledBackend::open(&dir).unwrap());
        let store = NoteStore::new(backend);
        let notes = store.list(&key).await.unwrap();
        assert_eq!(notes.len(), 1);
        assert_eq!(notes.iter().next().unwrap().timestamp, 42);
        assert!(key.as_str().starts_with("url_"));
    }

    let _ = std::fs::remove_dir_all(&dir);
}

#[tokio::test]
async fn app_state_session_round_trip() {
    let backend: Arc<dyn KeyValueBackend> = Arc::new(MemoryBackend::new());
    let state = AppState::with_backend(Config::default(), backend).unwrap();

    let page = watch_page("abcdefghijk", "Rust in 100 Seconds");
    state.live_page.report(page.clone()).await;
    let mut session = state.session.lock().await;
    session.set_page(page);

    let added = session.dispatch(Command::AddNote { timestamp: 30 }).await.unwrap();
    assert!(matches!(added, Outcome::NoteAdded(_)));

    match session.dispatch(Command::ShowDashboard).await.unwrap() {
        Outcome::Dashboard(videos) => {
            assert_eq!(videos.len(), 1);
            assert_eq!(videos[0].title, "Rust in 100 Seconds");
        }
        other => panic!("unexpected outcome {:?}", other),
    }

    let jump = match session.dispatch(Command::Seek { seconds: 30 }).await.unwrap() {
        Outcome::Jump(jump) => jump,
        other => panic!("unexpected outcome {:?}", other),
    };
    assert_eq!(jump, JumpToTime { timestamp: 30 });
}

struct Player {
    area: f64,
    position: Option<f64>,
}

impl MediaElement for Player {
    fn rendered_area(&self) -> f64 {
        self.area
    }

    fn set_current_time(&mut self, seconds: f64) {
        self.position = Some(seconds);
    }

    fn play(&mut self) -> Result<(), String> {
        Ok(())
    }
}

struct Page(Vec<Player>);

impl MediaHost for Page {
    fn media_elements(&mut self) -> Vec<&mut dyn MediaElement> {
        self.0.iter_mut().map(|p| p as &mut dyn MediaElement).collect()
    }
}

#[test]
fn jump_targets_main_player() {
    let mut page = Page(vec![
        Player { area: 100.0, position: None },
        Player { area: 921_600.0, position: None },
        Player { area: 5_000.0, position: None },
    ]);
    let response = handle_jump(&mut page, &JumpToTime { timestamp: 65 });
    assert!(response.success);
    let positions: Vec<Option<f64>> = page.0.iter().map(|p| p.position).collect();
    assert_eq!(positions, vec![None, Some(65.0), None]);
}

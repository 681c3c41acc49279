pub mod actions;
pub mod artist;
pub mod catalog;
pub mod events;
pub mod lyrics;
pub mod navigator;
pub mod profile;
pub mod state;

use crate::api::{HttpApi, LyricsApi};
use crate::config::Config;
use crate::input;
use crate::player::MpvHandle;
use crate::storage::{RecentSearches, Storage};
use crate::tui::{self, TuiTerminal};
use actions::Action;
use anyhow::Context;
use artist::{ArtistSession, SearchOutcome, SearchPhase, SearchTicket};
use catalog::Catalog;
use events::{Event, NetworkEvent, PlayerEvent};
use lyrics::{AnnotationKind, AnnotationRequest, LyricsRequest};
use navigator::Navigator;
use profile::{PreviewCommand, ProfileTicket};
use state::{APP_TITLE, AppState, Focus, Toast};
use std::path::PathBuf;
use std::sync::Arc;
use tokio::sync::mpsc;

pub struct App {
    cfg: Config,
    config_path: Option<PathBuf>,
    state: AppState,
    api: Arc<dyn LyricsApi>,
    mpv: Option<MpvHandle>,
}

impl App {
    pub fn new(cfg: Config, config_path: PathBuf) -> anyhow::Result<Self> {
        let api = HttpApi::new(&cfg.api).context("build http client")?;
        let store = Storage::open(&cfg.database_path()).context("open storage")?;
        Ok(Self::with_parts(cfg, Some(config_path), Arc::new(api), store))
    }

    /// Assemble the app from its collaborators. `config_path = None` never
    /// writes the config back.
    pub fn with_parts(
        cfg: Config,
        config_path: Option<PathBuf>,
        api: Arc<dyn LyricsApi>,
        store: Storage,
    ) -> Self {
        let recent = RecentSearches::load(store, cfg.search.recent_limit);
        let artist = ArtistSession::new(recent, cfg.search.ordering);
        let nav = Navigator::new(artist, Catalog::new(cfg.ui.page_size));
        Self {
            state: AppState::new(nav),
            cfg,
            config_path,
            api,
            mpv: None,
        }
    }

    /// The artist to search on startup: the command line wins, then the
    /// remembered artist when restoring is enabled.
    pub fn startup_artist(&self, from_cli: Option<String>) -> Option<String> {
        from_cli
            .filter(|a| !a.trim().is_empty())
            .or_else(|| {
                self.cfg
                    .ui
                    .restore_last_artist
                    .then(|| self.cfg.ui.last_artist.clone())
                    .flatten()
            })
    }

    pub async fn run(
        &mut self,
        terminal: &mut TuiTerminal,
        initial_artist: Option<String>,
    ) -> anyhow::Result<()> {
        let (tx, mut rx) = mpsc::channel::<Event>(256);

        input::spawn_input_task(tx.clone(), self.cfg.input.mouse);
        spawn_ticker(tx.clone());

        let mpv_log = self.cfg.paths.data_dir.join("mpv.log");
        match MpvHandle::spawn(
            tx.clone(),
            self.cfg.player.audio_device.as_deref(),
            self.cfg.player.preview_volume,
            Some(&mpv_log),
        )
        .await
        {
            Ok(h) => self.mpv = Some(h),
            Err(e) => {
                tracing::warn!("previews disabled: {e:#}");
                self.state.toast = Some(Toast::error("mpv not available, previews disabled"));
            }
        }

        if let Some(artist) = initial_artist {
            let session = self.state.nav.artist_mut();
            *session.input_mut() = artist;
            let ticket = session.submit_input();
            self.start_search(ticket, &tx);
        }

        let mut applied_title = String::new();
        loop {
            if self.state.title != applied_title {
                if let Err(e) = tui::set_title(&self.state.title) {
                    tracing::debug!("set title: {e:#}");
                }
                applied_title = self.state.title.clone();
            }
            tui::draw(terminal, &mut self.state)?;

            let Some(ev) = rx.recv().await else {
                break;
            };
            self.handle_event(ev, &tx).await;
            if self.state.should_quit {
                break;
            }
        }

        self.save_state_on_quit();
        Ok(())
    }

    fn save_state_on_quit(&mut self) {
        let artist = self.state.nav.artist();
        if artist.phase() == SearchPhase::Success {
            self.cfg.ui.last_artist = Some(artist.term().to_string());
        }
        if let Some(path) = &self.config_path
            && let Err(e) = crate::config::save(&self.cfg, Some(path))
        {
            tracing::warn!("save config on quit: {e:#}");
        }
    }

    async fn handle_event(&mut self, ev: Event, tx: &mpsc::Sender<Event>) {
        match ev {
            Event::Input(ie) => {
                if let Some(action) = input::map_input_to_action(&self.state, ie) {
                    self.handle_action(action, tx).await;
                }
            }
            Event::Player(pe) => self.handle_player(pe),
            Event::Network(ne) => self.handle_network(ne, tx).await,
            Event::Tick => self.state.tick = self.state.tick.wrapping_add(1),
        }
    }

    async fn handle_action(&mut self, action: Action, tx: &mpsc::Sender<Event>) {
        match action {
            Action::SubmitSearch => {
                let ticket = self.state.nav.artist_mut().submit_input();
                self.start_search(ticket, tx);
            }
            Action::Activate => self.activate(tx).await,
            Action::LoadMore => {
                let (catalog, songs) = self.state.nav.catalog_mut();
                catalog.load_more(songs);
                self.check_images(tx);
            }
            Action::Translate => self.annotate(AnnotationKind::Translation, tx),
            Action::Explain => self.annotate(AnnotationKind::Explanation, tx),
            Action::InputChar(_) | Action::Backspace | Action::ClearInput
                if self.state.focus == Focus::Filter =>
            {
                self.reduce(action);
                self.check_images(tx);
            }
            Action::Quit => {
                self.stop_preview().await;
                self.reduce(Action::Quit);
            }
            _ => self.reduce(action),
        }
    }

    fn reduce(&mut self, action: Action) {
        let state = &mut self.state;
        match action {
            Action::Quit => state.should_quit = true,
            Action::ToggleHelp => state.show_help = !state.show_help,
            Action::FocusNext => state.focus = state.focus.next(),
            Action::FocusPrev => state.focus = state.focus.prev(),
            Action::SetFocus(f) => state.focus = f,
            Action::InputChar(c) => match state.focus {
                Focus::Filter => state.nav.catalog_mut().0.push_query_char(c),
                _ => state.nav.artist_mut().input_mut().push(c),
            },
            Action::Backspace => match state.focus {
                Focus::Filter => state.nav.catalog_mut().0.pop_query_char(),
                _ => {
                    state.nav.artist_mut().input_mut().pop();
                }
            },
            Action::ClearInput => match state.focus {
                Focus::Filter => state.nav.catalog_mut().0.set_query(""),
                _ => state.nav.artist_mut().input_mut().clear(),
            },
            Action::ListUp => match state.focus {
                Focus::Recent => state.recent_up(),
                Focus::TopTracks => state.profile.select_prev(),
                _ => state.nav.catalog_mut().0.select_prev(),
            },
            Action::ListDown => match state.focus {
                Focus::Recent => state.recent_down(),
                Focus::TopTracks => state.profile.select_next(),
                _ => {
                    let (catalog, songs) = state.nav.catalog_mut();
                    catalog.select_next(songs);
                }
            },
            Action::GoTop => state.nav.catalog_mut().0.select_first(),
            Action::GoBottom => {
                let (catalog, songs) = state.nav.catalog_mut();
                catalog.select_last(songs);
            }
            Action::Back => state.nav.back(),
            Action::ScrollLyrics(delta) => {
                if let Some(s) = state.nav.lyrics_mut() {
                    s.scroll = s.scroll.saturating_add_signed(delta);
                }
            }
            Action::ScrollAnnotation(delta) => {
                if let Some(s) = state.nav.lyrics_mut() {
                    s.annotation_scroll = s.annotation_scroll.saturating_add_signed(delta);
                }
            }
            Action::Resize => {}
            // Side effects live in handle_action.
            Action::SubmitSearch
            | Action::Activate
            | Action::LoadMore
            | Action::Translate
            | Action::Explain => {}
        }
    }

    async fn activate(&mut self, tx: &mpsc::Sender<Event>) {
        match self.state.focus {
            Focus::SearchInput => {
                let ticket = self.state.nav.artist_mut().submit_input();
                self.start_search(ticket, tx);
            }
            Focus::Recent => {
                let Some(term) = self.state.selected_recent() else {
                    return;
                };
                let ticket = self.state.nav.artist_mut().select_recent(&term);
                self.start_search(ticket, tx);
            }
            Focus::Filter | Focus::Songs => {
                if let Some(request) = self.state.nav.open_selected() {
                    self.spawn_lyrics(request, tx);
                }
            }
            Focus::TopTracks => self.toggle_preview().await,
        }
    }

    fn start_search(&mut self, ticket: Option<SearchTicket>, tx: &mpsc::Sender<Event>) {
        let Some(ticket) = ticket else {
            self.state.status = "Type an artist name first".into();
            return;
        };
        self.state.title = format!("{APP_TITLE} · {}", ticket.term);
        self.state.status = format!("Searching for {}...", ticket.term);

        let api = Arc::clone(&self.api);
        let tx = tx.clone();
        tokio::spawn(async move {
            let result = api.search_artist(&ticket.term).await;
            let _ = tx
                .send(Event::Network(NetworkEvent::SearchFinished { ticket, result }))
                .await;
        });
    }

    fn spawn_profile(&self, ticket: ProfileTicket, tx: &mpsc::Sender<Event>) {
        let api = Arc::clone(&self.api);
        let tx = tx.clone();
        tokio::spawn(async move {
            let result = api.enhanced_search(&ticket.artist).await;
            let _ = tx
                .send(Event::Network(NetworkEvent::ProfileFinished { ticket, result }))
                .await;
        });
    }

    fn spawn_lyrics(&mut self, request: LyricsRequest, tx: &mpsc::Sender<Event>) {
        self.state.status = "Loading lyrics...".into();
        let api = Arc::clone(&self.api);
        let tx = tx.clone();
        tokio::spawn(async move {
            let result = api.fetch_lyrics(&request.song_url).await;
            let _ = tx
                .send(Event::Network(NetworkEvent::LyricsFinished {
                    session: request.session,
                    result,
                }))
                .await;
        });
    }

    fn spawn_annotation(&self, request: AnnotationRequest, tx: &mpsc::Sender<Event>) {
        let api = Arc::clone(&self.api);
        let tx = tx.clone();
        tokio::spawn(async move {
            let result = match request.kind {
                AnnotationKind::Translation => api.translate(&request.lyrics).await,
                AnnotationKind::Explanation => api.explain(&request.lyrics).await,
            };
            let _ = tx
                .send(Event::Network(NetworkEvent::AnnotationFinished {
                    session: request.session,
                    kind: request.kind,
                    result,
                }))
                .await;
        });
    }

    /// Check the images of cards that just became visible.
    fn check_images(&mut self, tx: &mpsc::Sender<Event>) {
        let (catalog, songs) = self.state.nav.catalog_mut();
        let generation = catalog.generation();
        for (index, url) in catalog.take_unchecked_images(songs) {
            let api = Arc::clone(&self.api);
            let tx = tx.clone();
            tokio::spawn(async move {
                let ok = api.check_image(&url).await;
                if !ok {
                    tracing::debug!(%url, "card image unavailable");
                }
                let _ = tx
                    .send(Event::Network(NetworkEvent::ImageChecked { generation, index, ok }))
                    .await;
            });
        }
    }

    fn annotate(&mut self, kind: AnnotationKind, tx: &mpsc::Sender<Event>) {
        let Some(session) = self.state.nav.lyrics_mut() else {
            return;
        };
        let busy = session.annotation().is_pending();
        match session.annotate(kind) {
            Some(request) => {
                self.state.status = format!("{} requested...", kind.label());
                self.spawn_annotation(request, tx);
            }
            None if busy => {
                self.state.status = "Wait for the current request to finish".into();
            }
            None => {
                self.state.status = "Lyrics are not loaded yet".into();
            }
        }
    }

    async fn toggle_preview(&mut self) {
        let Some(track_id) = self.state.profile.selected_track().map(|t| t.id.clone()) else {
            return;
        };
        let Some(mpv) = &self.mpv else {
            self.state.status = "Previews need mpv".into();
            return;
        };

        match self.state.profile.toggle_preview(&track_id) {
            PreviewCommand::Play { url, .. } => {
                if let Err(e) = mpv.load_url(&url).await {
                    tracing::warn!("preview load: {e:#}");
                    self.state.profile.preview_finished();
                    self.state.status = "Preview playback failed".into();
                }
            }
            PreviewCommand::Stop => {
                if let Err(e) = mpv.stop().await {
                    tracing::warn!("preview stop: {e:#}");
                }
            }
            PreviewCommand::Unavailable => {
                self.state.status = "No preview for this track".into();
            }
        }
    }

    async fn stop_preview(&mut self) {
        if self.state.profile.playing().is_none() {
            return;
        }
        self.state.profile.preview_finished();
        if let Some(mpv) = &self.mpv
            && let Err(e) = mpv.stop().await
        {
            tracing::warn!("preview stop: {e:#}");
        }
    }

    fn handle_player(&mut self, pe: PlayerEvent) {
        match pe {
            PlayerEvent::Ended => self.state.profile.preview_finished(),
            PlayerEvent::Error(e) => {
                tracing::warn!("{e}");
                self.state.profile.preview_finished();
                self.state.status = "Preview playback failed".into();
            }
        }
    }

    async fn handle_network(&mut self, ne: NetworkEvent, tx: &mpsc::Sender<Event>) {
        match ne {
            NetworkEvent::SearchFinished { ticket, result } => {
                if self.state.nav.apply_search(&ticket, result) == SearchOutcome::Stale {
                    return;
                }
                let (phase, count, error) = {
                    let a = self.state.nav.artist();
                    (a.phase(), a.songs().len(), a.error())
                };

                self.stop_preview().await;
                match phase {
                    SearchPhase::Success => {
                        self.state.status = format!("{count} songs for {}", ticket.term);
                        self.state.focus = Focus::Songs;
                        self.state.recent_selected = 0;
                        let profile_ticket = self.state.profile.begin(&ticket.term);
                        self.spawn_profile(profile_ticket, tx);
                        self.check_images(tx);
                    }
                    _ => {
                        let message = error.unwrap_or(artist::SEARCH_FAILED);
                        self.state.status = message.to_string();
                        self.state.toast = Some(Toast::error(message));
                        self.state.profile.clear();
                    }
                }
            }
            NetworkEvent::ProfileFinished { ticket, result } => {
                self.state.profile.finish(&ticket, result);
            }
            NetworkEvent::LyricsFinished { session, result } => {
                match self.state.nav.session_mut(session) {
                    Some(s) => {
                        s.finish_lyrics(result);
                        self.state.status = match s.error() {
                            Some(message) => message.to_string(),
                            None => "t translate · e explain · Esc back".to_string(),
                        };
                    }
                    None => tracing::debug!(session, "lyrics for a closed session dropped"),
                }
            }
            NetworkEvent::AnnotationFinished { session, kind, result } => {
                match self.state.nav.session_mut(session) {
                    Some(s) => {
                        s.finish_annotation(kind, result);
                        match s.annotation() {
                            lyrics::Annotation::Failure(_) => {
                                self.state.status =
                                    s.annotation().text().unwrap_or_default().to_string();
                            }
                            _ => {
                                let message = format!("{} ready", kind.label());
                                self.state.toast = Some(Toast::info(message.clone()));
                                self.state.status = message;
                            }
                        }
                    }
                    None => tracing::debug!(session, ?kind, "annotation for a closed session dropped"),
                }
            }
            NetworkEvent::ImageChecked { generation, index, ok } => {
                let (catalog, _) = self.state.nav.catalog_mut();
                if !ok && catalog.generation() == generation {
                    catalog.mark_image_failed(index);
                }
            }
        }
    }
}

fn spawn_ticker(tx: mpsc::Sender<Event>) {
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(std::time::Duration::from_millis(250));
        loop {
            interval.tick().await;
            if tx.send(Event::Tick).await.is_err() {
                break;
            }
        }
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::fake::FakeApi;
    use crate::api::{ArtistMetadata, EnrichedArtist, Song, TrackPreview};
    use crate::app::lyrics::{Annotation, LyricsPhase};
    use crate::app::profile::ProfilePhase;
    use crate::app::state::ToastKind;
    use std::time::Duration;

    fn songs(artist: &str, titles: &[&str]) -> Vec<Song> {
        titles
            .iter()
            .map(|t| Song {
                title: format!("{artist} - {t}"),
                url: format!("https://genius.com/{artist}-{}-lyrics", t.to_lowercase()),
                image_url: None,
            })
            .collect()
    }

    fn enriched(artist: &str) -> EnrichedArtist {
        EnrichedArtist {
            metadata: Some(ArtistMetadata {
                id: "4dpARuHxo51G3z768sgnrY".into(),
                name: artist.into(),
                image_url: None,
                genres: vec!["pop".into()],
                popularity: 83,
                followers: 56_000_000,
            }),
            top_tracks: vec![TrackPreview {
                id: "t1".into(),
                name: "Hello".into(),
                album_name: "25".into(),
                album_image_url: None,
                preview_url: Some("https://p.scdn.co/mp3-preview/hello".into()),
                external_url: "https://open.spotify.com/track/t1".into(),
                release_date: None,
            }],
        }
    }

    fn adele_api() -> FakeApi {
        FakeApi::new()
            .with_songs("Adele", songs("Adele", &["Hello", "Skyfall", "Someone"]))
            .with_enriched("Adele", enriched("Adele"))
    }

    fn app_with(api: FakeApi) -> (App, Arc<FakeApi>, mpsc::Sender<Event>, mpsc::Receiver<Event>) {
        let api = Arc::new(api);
        let app = App::with_parts(
            Config::default(),
            None,
            api.clone(),
            Storage::open_in_memory().unwrap(),
        );
        let (tx, rx) = mpsc::channel(64);
        (app, api, tx, rx)
    }

    /// Feed back every fetch result until the tasks go quiet.
    async fn drain(app: &mut App, tx: &mpsc::Sender<Event>, rx: &mut mpsc::Receiver<Event>) {
        while let Ok(Some(ev)) = tokio::time::timeout(Duration::from_millis(200), rx.recv()).await {
            app.handle_event(ev, tx).await;
        }
    }

    async fn search(app: &mut App, tx: &mpsc::Sender<Event>, term: &str) {
        app.handle_action(Action::SetFocus(Focus::SearchInput), tx).await;
        app.handle_action(Action::ClearInput, tx).await;
        for c in term.chars() {
            app.handle_action(Action::InputChar(c), tx).await;
        }
        app.handle_action(Action::SubmitSearch, tx).await;
    }

    #[tokio::test]
    async fn test_search_fills_catalog_profile_and_title() {
        let (mut app, api, tx, mut rx) = app_with(adele_api());
        search(&mut app, &tx, "Adele").await;
        assert_eq!(app.state.title, "lyrebird · Adele");
        drain(&mut app, &tx, &mut rx).await;

        let artist = app.state.nav.artist();
        assert_eq!(artist.phase(), SearchPhase::Success);
        assert_eq!(artist.songs().len(), 3);
        assert_eq!(artist.recent().terms(), ["Adele"]);
        assert_eq!(app.state.focus, Focus::Songs);
        assert_eq!(app.state.profile.phase(), ProfilePhase::Ready);
        assert_eq!(api.calls(), ["search:Adele", "enhanced:Adele"]);
    }

    #[tokio::test]
    async fn test_failed_search_skips_profile() {
        let (mut app, api, tx, mut rx) = app_with(FakeApi::new());
        search(&mut app, &tx, "Nobody").await;
        drain(&mut app, &tx, &mut rx).await;

        assert_eq!(app.state.nav.artist().phase(), SearchPhase::Failure);
        assert_eq!(app.state.status, artist::SEARCH_FAILED);
        assert_eq!(app.state.profile.phase(), ProfilePhase::Idle);
        assert!(app.state.nav.artist().recent().is_empty());
        assert_eq!(api.calls(), ["search:Nobody"]);
    }

    #[tokio::test]
    async fn test_closed_lyrics_session_ignores_pending_fetch() {
        let url = "https://genius.com/Adele-hello-lyrics";
        let (mut app, _api, tx, mut rx) = app_with(adele_api().with_lyrics(url, "Hello, it's me"));
        search(&mut app, &tx, "Adele").await;
        drain(&mut app, &tx, &mut rx).await;

        app.handle_action(Action::Activate, &tx).await;
        assert!(!app.state.nav.is_browsing());
        app.handle_action(Action::Back, &tx).await;
        drain(&mut app, &tx, &mut rx).await;
        assert!(app.state.nav.is_browsing());
        assert!(app.state.nav.lyrics().is_none());

        app.handle_action(Action::Activate, &tx).await;
        drain(&mut app, &tx, &mut rx).await;
        let s = app.state.nav.lyrics().unwrap();
        assert_eq!(s.phase(), LyricsPhase::Ready);
        assert_eq!(s.text(), "Hello, it's me");
        assert_eq!((s.artist(), s.title()), ("Adele", "Hello"));
    }

    #[tokio::test]
    async fn test_one_annotation_at_a_time() {
        let url = "https://genius.com/Adele-hello-lyrics";
        let api = adele_api()
            .with_lyrics(url, "Hello, it's me")
            .with_translation("Olá, sou eu")
            .with_explanation("## Theme\nRegret.");
        let (mut app, api, tx, mut rx) = app_with(api);
        search(&mut app, &tx, "Adele").await;
        drain(&mut app, &tx, &mut rx).await;
        app.handle_action(Action::Activate, &tx).await;
        drain(&mut app, &tx, &mut rx).await;

        app.handle_action(Action::Translate, &tx).await;
        app.handle_action(Action::Explain, &tx).await;
        assert_eq!(app.state.status, "Wait for the current request to finish");
        drain(&mut app, &tx, &mut rx).await;

        let s = app.state.nav.lyrics().unwrap();
        assert_eq!(
            s.annotation(),
            &Annotation::Ready { kind: AnnotationKind::Translation, text: "Olá, sou eu".into() }
        );
        assert_eq!(api.calls().iter().filter(|c| *c == "translate").count(), 1);
        assert!(!api.calls().iter().any(|c| c == "explain"));

        app.handle_action(Action::Explain, &tx).await;
        drain(&mut app, &tx, &mut rx).await;
        let s = app.state.nav.lyrics().unwrap();
        assert_eq!(s.annotation().kind(), Some(AnnotationKind::Explanation));
        assert_eq!(s.annotation().text(), Some("## Theme\nRegret."));
        let toast = app.state.toast.as_ref().unwrap();
        assert_eq!((toast.kind, toast.message.as_str()), (ToastKind::Info, "Explanation ready"));
    }

    #[tokio::test]
    async fn test_broken_card_image_uses_placeholder() {
        let mut list = songs("Adele", &["Hello", "Skyfall"]);
        list[0].image_url = Some("https://images.genius.com/hello.jpg".into());
        list[1].image_url = Some("https://images.genius.com/broken.jpg".into());
        let api = FakeApi::new()
            .with_songs("Adele", list)
            .with_broken_image("https://images.genius.com/broken.jpg");
        let (mut app, _api, tx, mut rx) = app_with(api);
        search(&mut app, &tx, "Adele").await;
        drain(&mut app, &tx, &mut rx).await;

        let catalog = app.state.nav.catalog();
        assert!(!catalog.image_failed(0));
        assert!(catalog.image_failed(1));
    }

    #[tokio::test]
    async fn test_image_check_from_previous_result_set_is_ignored() {
        let (mut app, _api, tx, mut rx) = app_with(adele_api());
        search(&mut app, &tx, "Adele").await;
        drain(&mut app, &tx, &mut rx).await;
        let old = app.state.nav.catalog().generation();

        search(&mut app, &tx, "Adele").await;
        drain(&mut app, &tx, &mut rx).await;
        app.handle_network(NetworkEvent::ImageChecked { generation: old, index: 0, ok: false }, &tx)
            .await;
        assert!(!app.state.nav.catalog().image_failed(0));
    }

    #[tokio::test]
    async fn test_recent_entry_reruns_search_and_fills_input() {
        let api = adele_api().with_songs("Coldplay", songs("Coldplay", &["Yellow"]));
        let (mut app, api, tx, mut rx) = app_with(api);
        search(&mut app, &tx, "Adele").await;
        drain(&mut app, &tx, &mut rx).await;
        search(&mut app, &tx, "Coldplay").await;
        drain(&mut app, &tx, &mut rx).await;
        assert_eq!(app.state.nav.artist().recent().terms(), ["Coldplay", "Adele"]);

        app.handle_action(Action::SetFocus(Focus::Recent), &tx).await;
        app.handle_action(Action::ListDown, &tx).await;
        app.handle_action(Action::Activate, &tx).await;
        assert_eq!(app.state.nav.artist().input(), "Adele");
        drain(&mut app, &tx, &mut rx).await;

        assert_eq!(app.state.nav.artist().term(), "Adele");
        assert_eq!(app.state.nav.artist().recent().terms(), ["Coldplay", "Adele"]);
        assert_eq!(api.calls().iter().filter(|c| *c == "search:Adele").count(), 2);
    }

    #[tokio::test]
    async fn test_filter_keys_edit_catalog_query() {
        let (mut app, _api, tx, mut rx) = app_with(adele_api());
        search(&mut app, &tx, "Adele").await;
        drain(&mut app, &tx, &mut rx).await;

        app.handle_action(Action::SetFocus(Focus::Filter), &tx).await;
        for c in "sky".chars() {
            app.handle_action(Action::InputChar(c), &tx).await;
        }
        assert_eq!(app.state.nav.catalog().query(), "sky");
        assert_eq!(app.state.nav.artist().input(), "Adele");

        app.handle_action(Action::Activate, &tx).await;
        assert_eq!(app.state.nav.lyrics().unwrap().title(), "Skyfall");
    }

    #[tokio::test]
    async fn test_preview_without_player_reports_status() {
        let (mut app, _api, tx, mut rx) = app_with(adele_api());
        search(&mut app, &tx, "Adele").await;
        drain(&mut app, &tx, &mut rx).await;

        app.handle_action(Action::SetFocus(Focus::TopTracks), &tx).await;
        app.handle_action(Action::Activate, &tx).await;
        assert_eq!(app.state.status, "Previews need mpv");
        assert_eq!(app.state.profile.playing(), None);
    }

    #[tokio::test]
    async fn test_quit_remembers_only_a_found_artist() {
        let (mut app, _api, tx, mut rx) = app_with(adele_api());
        app.cfg.ui.last_artist = Some("Muse".into());

        search(&mut app, &tx, "adlee").await;
        drain(&mut app, &tx, &mut rx).await;
        app.save_state_on_quit();
        assert_eq!(app.cfg.ui.last_artist.as_deref(), Some("Muse"));

        search(&mut app, &tx, "Adele").await;
        drain(&mut app, &tx, &mut rx).await;
        app.save_state_on_quit();
        assert_eq!(app.cfg.ui.last_artist.as_deref(), Some("Adele"));

        search(&mut app, &tx, "qeeun").await;
        app.save_state_on_quit();
        assert_eq!(app.cfg.ui.last_artist.as_deref(), Some("Adele"));
        drain(&mut app, &tx, &mut rx).await;
    }

    #[test]
    fn test_startup_artist_precedence() {
        let mut cfg = Config::default();
        cfg.ui.last_artist = Some("Muse".into());
        let api: Arc<dyn LyricsApi> = Arc::new(FakeApi::new());
        let store = || Storage::open_in_memory().unwrap();

        let app = App::with_parts(cfg.clone(), None, api.clone(), store());
        assert_eq!(app.startup_artist(None), None);
        assert_eq!(app.startup_artist(Some("Adele".into())).as_deref(), Some("Adele"));

        cfg.ui.restore_last_artist = true;
        let app = App::with_parts(cfg, None, api, store());
        assert_eq!(app.startup_artist(None).as_deref(), Some("Muse"));
        assert_eq!(app.startup_artist(Some("  ".into())).as_deref(), Some("Muse"));
    }
}

// App state and main event loop.
// Owns the URL input, the lookup history, and the in-flight summary request.

use std::io;
use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Local};
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use ratatui::prelude::*;
use ratatui::widgets::ListState;
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};
use tracing::{debug, info};

use crate::error::Result;
use crate::history::{ArticleStore, History};
use crate::state::{LookupState, Resolution, lookup};
use crate::summarizer::Summarize;
use crate::ui;

/// Which pane receives key presses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Focus {
    #[default]
    Input,
    History,
}

impl Focus {
    pub fn toggle(self) -> Self {
        match self {
            Focus::Input => Focus::History,
            Focus::History => Focus::Input,
        }
    }
}

/// A one-line message for the status bar.
#[derive(Debug, Clone)]
pub struct StatusMessage {
    pub text: String,
    pub at: DateTime<Local>,
}

/// A finished summary request, sent back to the event loop.
#[derive(Debug)]
struct Completion {
    url: String,
    result: Result<String>,
}

/// Main application state.
pub struct App<S, C> {
    /// Text in the URL input.
    pub input: String,
    /// Pane with keyboard focus.
    pub focus: Focus,
    /// Past lookups, newest first.
    pub history: History<S>,
    /// Selection in the history list.
    pub history_state: ListState,
    /// What the result panel shows.
    pub lookup: LookupState,
    /// Last status bar message.
    pub status: Option<StatusMessage>,
    /// Whether the app should exit.
    pub should_quit: bool,
    client: Arc<C>,
    completions_tx: UnboundedSender<Completion>,
    completions_rx: UnboundedReceiver<Completion>,
}

impl<S, C> App<S, C>
where
    S: ArticleStore,
    C: Summarize + Send + Sync + 'static,
{
    pub fn new(history: History<S>, client: C) -> Self {
        let (completions_tx, completions_rx) = mpsc::unbounded_channel();
        let mut history_state = ListState::default();
        if !history.is_empty() {
            history_state.select(Some(0));
        }

        Self {
            input: String::new(),
            focus: Focus::default(),
            history,
            history_state,
            lookup: LookupState::default(),
            status: None,
            should_quit: false,
            client: Arc::new(client),
            completions_tx,
            completions_rx,
        }
    }

    /// Main event loop.
    pub fn run(&mut self, terminal: &mut Terminal<impl Backend>) -> io::Result<()> {
        while !self.should_quit {
            self.drain_completions();
            terminal.draw(|frame| ui::draw(frame, self))?;
            self.handle_events()?;
        }
        Ok(())
    }

    /// Handle keyboard and other events.
    #[allow(clippy::collapsible_if)]
    fn handle_events(&mut self) -> io::Result<()> {
        if event::poll(Duration::from_millis(100))? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    self.handle_key(key);
                }
            }
        }
        Ok(())
    }

    pub fn handle_key(&mut self, key: KeyEvent) {
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);

        match key.code {
            KeyCode::Char('c') if ctrl => self.should_quit = true,
            KeyCode::Esc => self.should_quit = true,
            KeyCode::Tab | KeyCode::BackTab => self.focus = self.focus.toggle(),
            _ => match self.focus {
                Focus::Input => self.handle_input_key(key.code, ctrl),
                Focus::History => self.handle_history_key(key.code),
            },
        }
    }

    fn handle_input_key(&mut self, code: KeyCode, ctrl: bool) {
        match code {
            KeyCode::Enter => self.submit(),
            KeyCode::Backspace => {
                self.input.pop();
            }
            KeyCode::Char('u') if ctrl => self.input.clear(),
            KeyCode::Char(c) if !ctrl => self.input.push(c),
            _ => {}
        }
    }

    fn handle_history_key(&mut self, code: KeyCode) {
        match code {
            KeyCode::Char('q') => self.should_quit = true,
            KeyCode::Down | KeyCode::Char('j') => self.select_next(),
            KeyCode::Up | KeyCode::Char('k') => self.select_prev(),
            KeyCode::Enter => self.show_selected(),
            _ => {}
        }
    }

    /// Look up the URL in the input.
    ///
    /// Only one request may be in flight; further submissions are refused until it resolves.
    pub fn submit(&mut self) {
        if let LookupState::Requesting { url } = &self.lookup {
            let text = format!("Still summarizing {}, please wait", url);
            self.set_status(text);
            return;
        }

        match lookup::begin(&self.history, &self.input) {
            Ok(Resolution::Cached(article)) => {
                self.lookup = LookupState::Success(article);
                self.set_status("Loaded from history");
            }
            Ok(Resolution::Fetch(url)) => self.spawn_request(url),
            Err(e) => self.lookup = LookupState::Failed(e.display_message()),
        }
    }

    fn spawn_request(&mut self, url: String) {
        info!(%url, "Starting summary request");
        self.lookup = LookupState::Requesting { url: url.clone() };

        let client = Arc::clone(&self.client);
        let tx = self.completions_tx.clone();
        tokio::spawn(async move {
            let result = client.summarize(&url).await;
            // Receiver only goes away when the app is shutting down
            let _ = tx.send(Completion { url, result });
        });
    }

    /// Apply any finished requests.
    pub fn drain_completions(&mut self) {
        while let Ok(completion) = self.completions_rx.try_recv() {
            self.apply_completion(completion);
        }
    }

    fn apply_completion(&mut self, completion: Completion) {
        let in_flight = matches!(&self.lookup, LookupState::Requesting { url } if *url == completion.url);
        if !in_flight {
            debug!(url = %completion.url, "Ignoring completion for a request no longer shown");
            return;
        }

        let succeeded = completion.result.is_ok();
        self.lookup = lookup::complete(&mut self.history, completion.url, completion.result);

        if succeeded {
            self.history_state.select(Some(0));
            self.set_status("Summary saved to history");
        }
    }

    /// Show the selected history entry in the result panel.
    pub fn show_selected(&mut self) {
        if self.lookup.is_requesting() {
            self.set_status("Wait for the current lookup to finish");
            return;
        }

        let Some(article) = self
            .history_state
            .selected()
            .and_then(|i| self.history.get(i))
            .cloned()
        else {
            return;
        };

        self.input = article.url.clone();
        self.lookup = LookupState::Success(article);
    }

    /// Select the next history entry.
    pub fn select_next(&mut self) {
        let len = self.history.len();
        if len == 0 {
            return;
        }
        let i = match self.history_state.selected() {
            Some(i) if i >= len - 1 => i, // Stay at end
            Some(i) => i + 1,
            None => 0,
        };
        self.history_state.select(Some(i));
    }

    /// Select the previous history entry.
    pub fn select_prev(&mut self) {
        if self.history.is_empty() {
            return;
        }
        let i = match self.history_state.selected() {
            Some(i) => i.saturating_sub(1),
            None => 0,
        };
        self.history_state.select(Some(i));
    }

    fn set_status(&mut self, text: impl Into<String>) {
        self.status = Some(StatusMessage {
            text: text.into(),
            at: Local::now(),
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::history::{Article, FileStore};
    use crate::summarizer::fake::Scripted;
    use tempfile::TempDir;

    fn app(dir: &TempDir, client: Scripted) -> App<FileStore, Scripted> {
        let history = History::load(FileStore::new(dir.path().join("articles.json")));
        App::new(history, client)
    }

    fn type_text<S: ArticleStore, C: Summarize + Send + Sync + 'static>(
        app: &mut App<S, C>,
        text: &str,
    ) {
        for c in text.chars() {
            app.handle_key(KeyEvent::from(KeyCode::Char(c)));
        }
    }

    async fn wait_for_completion(app: &mut App<FileStore, Scripted>) {
        let completion = app.completions_rx.recv().await.unwrap();
        app.apply_completion(completion);
    }

    #[tokio::test]
    async fn test_submit_fetches_and_records() {
        let temp_dir = TempDir::new().unwrap();
        let mut app = app(&temp_dir, Scripted::ok("S1"));

        type_text(&mut app, "https://a.test/1");
        app.handle_key(KeyEvent::from(KeyCode::Enter));
        assert_eq!(
            app.lookup,
            LookupState::Requesting {
                url: "https://a.test/1".to_string()
            }
        );

        wait_for_completion(&mut app).await;

        assert_eq!(
            app.lookup,
            LookupState::Success(Article::new("https://a.test/1", "S1"))
        );
        assert_eq!(app.history.len(), 1);
        assert_eq!(app.history_state.selected(), Some(0));
    }

    #[tokio::test]
    async fn test_second_submit_while_requesting_is_refused() {
        let temp_dir = TempDir::new().unwrap();
        let mut app = app(&temp_dir, Scripted::ok("S1"));

        app.input = "https://a.test/1".to_string();
        app.submit();
        app.input = "https://a.test/2".to_string();
        app.submit();

        assert!(app.status.as_ref().unwrap().text.contains("https://a.test/1"));

        wait_for_completion(&mut app).await;

        assert_eq!(app.client.calls(), 1);
        assert_eq!(app.history.len(), 1);
        assert_eq!(app.history.articles()[0].url, "https://a.test/1");
    }

    #[tokio::test]
    async fn test_stale_completion_is_ignored() {
        let temp_dir = TempDir::new().unwrap();
        let mut app = app(&temp_dir, Scripted::ok("S1"));

        app.apply_completion(Completion {
            url: "https://a.test/other".to_string(),
            result: Ok("late".to_string()),
        });

        assert_eq!(app.lookup, LookupState::Idle);
        assert!(app.history.is_empty());
    }

    #[tokio::test]
    async fn test_cached_submit_skips_request() {
        let temp_dir = TempDir::new().unwrap();
        let mut app = app(&temp_dir, Scripted::ok("fresh"));
        app.history
            .prepend_and_persist(Article::new("https://a.test/1", "S1"))
            .unwrap();

        type_text(&mut app, "https://a.test/1");
        app.submit();

        assert_eq!(
            app.lookup,
            LookupState::Success(Article::new("https://a.test/1", "S1"))
        );
        assert_eq!(app.client.calls(), 0);
        assert_eq!(app.history.len(), 1);
    }

    #[tokio::test]
    async fn test_failed_request_shows_message() {
        let temp_dir = TempDir::new().unwrap();
        let mut app = app(&temp_dir, Scripted::failing("Unable to fetch article"));

        app.input = "https://a.test/1".to_string();
        app.submit();
        wait_for_completion(&mut app).await;

        assert_eq!(
            app.lookup,
            LookupState::Failed("Unable to fetch article".to_string())
        );
        assert!(app.history.is_empty());
    }

    #[test]
    fn test_history_navigation_and_selection() {
        let temp_dir = TempDir::new().unwrap();
        let mut app = app(&temp_dir, Scripted::ok("unused"));
        app.history
            .prepend_and_persist(Article::new("https://a.test/1", "S1"))
            .unwrap();
        app.history
            .prepend_and_persist(Article::new("https://a.test/2", "S2"))
            .unwrap();

        app.handle_key(KeyEvent::from(KeyCode::Tab));
        assert_eq!(app.focus, Focus::History);

        app.handle_key(KeyEvent::from(KeyCode::Char('j')));
        app.handle_key(KeyEvent::from(KeyCode::Char('j')));
        assert_eq!(app.history_state.selected(), Some(1));

        app.handle_key(KeyEvent::from(KeyCode::Enter));
        assert_eq!(
            app.lookup,
            LookupState::Success(Article::new("https://a.test/1", "S1"))
        );
        assert_eq!(app.input, "https://a.test/1");

        app.handle_key(KeyEvent::from(KeyCode::Char('k')));
        app.handle_key(KeyEvent::from(KeyCode::Char('k')));
        assert_eq!(app.history_state.selected(), Some(0));
        assert_eq!(app.client.calls(), 0);
    }

    #[test]
    fn test_input_editing_and_quit() {
        let temp_dir = TempDir::new().unwrap();
        let mut app = app(&temp_dir, Scripted::ok("unused"));

        type_text(&mut app, "https://a.tesx");
        app.handle_key(KeyEvent::from(KeyCode::Backspace));
        type_text(&mut app, "t");
        assert_eq!(app.input, "https://a.test");

        app.handle_key(KeyEvent::new(KeyCode::Char('u'), KeyModifiers::CONTROL));
        assert!(app.input.is_empty());

        // 'q' is text while the input has focus
        type_text(&mut app, "q");
        assert!(!app.should_quit);

        app.handle_key(KeyEvent::from(KeyCode::Esc));
        assert!(app.should_quit);
    }
}

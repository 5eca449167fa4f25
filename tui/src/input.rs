//! Input handling for the modguide TUI.

use anyhow::{Result, anyhow};
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use std::{
    sync::{
        Arc,
        atomic::{AtomicBool, Ordering},
    },
    time::Duration,
};
use tokio::sync::mpsc;

use modguide_engine::App;

const INPUT_POLL_TIMEOUT: Duration = Duration::from_millis(25); // shutdown responsiveness
const INPUT_CHANNEL_CAPACITY: usize = 256; // bounded: no OOM
const MAX_EVENTS_PER_FRAME: usize = 64; // never starve rendering

enum InputMsg {
    Event(Event),
    Error(String),
}

/// Reads terminal events on a blocking task and hands them to the frame loop.
pub struct InputPump {
    rx: mpsc::Receiver<InputMsg>,
    stop: Arc<AtomicBool>,
    join: Option<tokio::task::JoinHandle<()>>,
}

impl InputPump {
    #[must_use]
    pub fn new() -> Self {
        let (tx, rx) = mpsc::channel(INPUT_CHANNEL_CAPACITY);
        let stop = Arc::new(AtomicBool::new(false));
        let stop2 = stop.clone();

        let join = tokio::task::spawn_blocking(move || input_loop(stop2, tx));
        Self {
            rx,
            stop,
            join: Some(join),
        }
    }

    pub async fn shutdown(&mut self) {
        // Unblock the reader if it is waiting on channel capacity.
        self.rx.close();

        self.stop.store(true, Ordering::Release);
        if let Some(join) = self.join.take() {
            let _ = tokio::time::timeout(Duration::from_secs(2), join).await;
        }
    }
}

impl Default for InputPump {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for InputPump {
    fn drop(&mut self) {
        // Best-effort stop if caller exits early; do not block in Drop.
        self.rx.close();
        self.stop.store(true, Ordering::Release);
    }
}

fn input_loop(stop: Arc<AtomicBool>, tx: mpsc::Sender<InputMsg>) {
    while !stop.load(Ordering::Acquire) {
        match event::poll(INPUT_POLL_TIMEOUT) {
            Ok(true) => match event::read() {
                Ok(ev) => {
                    if tx.blocking_send(InputMsg::Event(ev)).is_err() {
                        break;
                    }
                }
                Err(e) => {
                    let _ = tx.blocking_send(InputMsg::Error(e.to_string()));
                    break;
                }
            },
            Ok(false) => {}
            Err(e) => {
                let _ = tx.blocking_send(InputMsg::Error(e.to_string()));
                break;
            }
        }
    }
}

/// Drain pending events into `app`. Returns `true` once the app should quit.
pub fn handle_events(app: &mut App, input: &mut InputPump) -> Result<bool> {
    let mut processed = 0;
    while processed < MAX_EVENTS_PER_FRAME {
        let ev = match input.rx.try_recv() {
            Ok(InputMsg::Event(ev)) => ev,
            Ok(InputMsg::Error(msg)) => return Err(anyhow!("input error: {msg}")),
            Err(mpsc::error::TryRecvError::Empty) => break,
            Err(mpsc::error::TryRecvError::Disconnected) => {
                return Err(anyhow!("input pump disconnected"));
            }
        };

        if let Event::Key(key) = ev {
            apply_key(app, key);
        }
        if app.should_quit() {
            return Ok(true);
        }
        processed += 1;
    }
    Ok(app.should_quit())
}

/// Apply one key press to the app.
pub fn apply_key(app: &mut App, key: KeyEvent) {
    if matches!(key.kind, KeyEventKind::Release) {
        return;
    }
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        app.request_quit();
        return;
    }

    let page = i32::from(app.page_rows());
    match key.code {
        KeyCode::Char('q') | KeyCode::Esc => app.request_quit(),
        KeyCode::Char('j') | KeyCode::Down | KeyCode::Tab => app.focus_next(),
        KeyCode::Char('k') | KeyCode::Up | KeyCode::BackTab => app.focus_prev(),
        KeyCode::Enter | KeyCode::Char(' ') => {
            if let Some(expanded) = app.toggle_focused() {
                tracing::trace!(expanded, "toggled focused entry");
            }
        }
        KeyCode::PageDown => app.scroll_by(page),
        KeyCode::PageUp => app.scroll_by(-page),
        KeyCode::Char('g') | KeyCode::Home => {
            app.focus_first();
            app.scroll_to_top();
        }
        KeyCode::Char('G') | KeyCode::End => {
            app.focus_last();
            app.scroll_to_bottom();
        }
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
    use modguide_engine::{
        App, BucketId, CatalogDocument, CatalogSource, ExpansionKey, UiOptions, load_catalog,
    };

    use super::apply_key;

    fn app() -> App {
        App::new(
            load_catalog(&CatalogSource::Builtin).unwrap(),
            UiOptions::default(),
        )
    }

    fn press(app: &mut App, code: KeyCode) {
        apply_key(app, KeyEvent::new(code, KeyModifiers::NONE));
    }

    #[test]
    fn enter_toggles_focused_entry() {
        let mut app = app();
        press(&mut app, KeyCode::Enter);
        let key = ExpansionKey::summary(BucketId::Open, "ExchangeOnlineManagement");
        assert!(app.expansion().is_expanded(&key));

        press(&mut app, KeyCode::Char(' '));
        assert!(!app.expansion().is_expanded(&key));
    }

    #[test]
    fn navigation_keys_move_focus() {
        let mut app = app();
        press(&mut app, KeyCode::Char('j'));
        press(&mut app, KeyCode::Down);
        press(&mut app, KeyCode::Tab);
        assert_eq!(app.focus_index(), Some(3));
        press(&mut app, KeyCode::Char('k'));
        press(&mut app, KeyCode::BackTab);
        assert_eq!(app.focus_index(), Some(1));
        press(&mut app, KeyCode::Char('G'));
        assert_eq!(
            app.focused_key().map(ToString::to_string).as_deref(),
            Some("grid:Microsoft.Online.SharePoint.PowerShell")
        );
        press(&mut app, KeyCode::Home);
        assert_eq!(app.focus_index(), Some(0));
    }

    #[test]
    fn release_events_are_ignored() {
        let mut app = app();
        let mut key = KeyEvent::new(KeyCode::Char('j'), KeyModifiers::NONE);
        key.kind = KeyEventKind::Release;
        apply_key(&mut app, key);
        assert_eq!(app.focus_index(), Some(0));
    }

    #[test]
    fn quit_keys() {
        for code in [KeyCode::Char('q'), KeyCode::Esc] {
            let mut app = app();
            press(&mut app, code);
            assert!(app.should_quit());
        }
        let mut app = app();
        apply_key(
            &mut app,
            KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL),
        );
        assert!(app.should_quit());
    }

    #[test]
    fn page_keys_scroll_by_viewport() {
        let mut app = App::new(CatalogDocument::default(), UiOptions::default());
        app.clamp_scroll(100, 11);
        press(&mut app, KeyCode::PageDown);
        assert_eq!(app.scroll_offset(), 10);
        press(&mut app, KeyCode::PageUp);
        assert_eq!(app.scroll_offset(), 0);
        press(&mut app, KeyCode::End);
        assert_eq!(app.scroll_offset(), 89);
    }
}

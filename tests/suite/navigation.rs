use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{Terminal, backend::TestBackend};

use modguide_engine::{App, BucketId, CatalogSource, ExpansionKey, UiOptions, load_catalog};
use modguide_tui::{apply_key, draw};

fn app() -> App {
    App::new(
        load_catalog(&CatalogSource::Builtin).unwrap(),
        UiOptions {
            ascii_only: true,
            high_contrast: false,
        },
    )
}

fn press(app: &mut App, code: KeyCode) {
    apply_key(app, KeyEvent::new(code, KeyModifiers::NONE));
}

fn screen(terminal: &Terminal<TestBackend>) -> String {
    let buffer = terminal.backend().buffer();
    let mut out = String::new();
    for y in 0..buffer.area.height {
        for x in 0..buffer.area.width {
            out.push_str(buffer[(x, y)].symbol());
        }
        out.push('\n');
    }
    out
}

#[test]
fn keyboard_toggles_the_focused_row() {
    let mut app = app();
    let mut terminal = Terminal::new(TestBackend::new(100, 30)).unwrap();
    terminal.draw(|frame| draw(frame, &mut app)).unwrap();
    assert!(screen(&terminal).contains("> ExchangeOnlineManagement"));

    press(&mut app, KeyCode::Char('j'));
    press(&mut app, KeyCode::Enter);
    terminal.draw(|frame| draw(frame, &mut app)).unwrap();

    let text = screen(&terminal);
    assert!(text.contains("> MicrosoftTeams"));
    assert!(text.contains("Install-Module -Name MicrosoftTeams"));
    assert!(
        app.expansion()
            .is_expanded(&ExpansionKey::summary(BucketId::Open, "MicrosoftTeams"))
    );
    // Only the toggled entry opened.
    assert!(!text.contains("Connect-ExchangeOnline"));
}

#[test]
fn jumping_to_the_end_keeps_focus_on_screen() {
    let mut app = app();
    let mut terminal = Terminal::new(TestBackend::new(80, 16)).unwrap();
    terminal.draw(|frame| draw(frame, &mut app)).unwrap();

    press(&mut app, KeyCode::Char('G'));
    terminal.draw(|frame| draw(frame, &mut app)).unwrap();
    assert!(app.scroll_offset() > 0);
    assert!(screen(&terminal).contains("> [+] Installation & Authentication"));

    press(&mut app, KeyCode::Enter);
    terminal.draw(|frame| draw(frame, &mut app)).unwrap();
    assert!(
        app.expansion()
            .is_expanded(&ExpansionKey::grid("Microsoft.Online.SharePoint.PowerShell"))
    );

    press(&mut app, KeyCode::Char('g'));
    terminal.draw(|frame| draw(frame, &mut app)).unwrap();
    assert_eq!(app.scroll_offset(), 0);
    assert!(screen(&terminal).contains("> ExchangeOnlineManagement"));
}

#[test]
fn quitting_from_the_keyboard() {
    let mut app = app();
    apply_key(
        &mut app,
        KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL),
    );
    assert!(app.should_quit());
}

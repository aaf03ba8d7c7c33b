//! End-to-end tests for the search flow
//!
//! Drives the application the way the event loop does: key events in,
//! view-model events folded back in, frames rendered to a TestBackend.

use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use libreposcout::api::mock::MockGithubApi;
use libreposcout::connectivity::{AlwaysOffline, AlwaysOnline, ConnectivityCheck};
use libreposcout::{ApiError, ReposcoutService, Repository, SearchSettings, User};
use ratatui::{backend::TestBackend, Terminal};
use reposcout_tui::app::event::{EventHandler, TuiEvent};
use reposcout_tui::services::ServiceHandle;
use reposcout_tui::{App, AppState, Screen};

fn octocat_repos() -> Vec<Repository> {
    vec![Repository {
        id: 1,
        name: "Hello-World".to_string(),
        description: None,
        updated_at: "2024-11-04T10:00:00Z".to_string(),
        stargazers_count: 100,
        forks: 6000,
    }]
}

fn setup(api: MockGithubApi, connectivity: Arc<dyn ConnectivityCheck>) -> (App<'static>, EventHandler) {
    let service = ReposcoutService::with_parts(
        Arc::new(api),
        connectivity,
        SearchSettings {
            stagger_delay: Duration::ZERO,
            skip_connectivity_check: false,
        },
    );
    let services = ServiceHandle::new(service).unwrap();
    let mut state = AppState::new();
    state.config.unicode_enabled = false;

    let app = App::new(services, state);
    let events = EventHandler::new(10).with_service_events(app.services().subscribe());
    (app, events)
}

fn press(app: &mut App, code: KeyCode) {
    app.handle_event(TuiEvent::Key(KeyEvent::new(code, KeyModifiers::NONE)));
}

fn type_text(app: &mut App, text: &str) {
    for c in text.chars() {
        press(app, KeyCode::Char(c));
    }
}

/// Fold service events into the app until `condition` holds
fn wait_for<F>(app: &mut App, events: &EventHandler, condition: F) -> bool
where
    F: Fn(&AppState) -> bool,
{
    let start = Instant::now();
    while start.elapsed() < Duration::from_secs(5) {
        while let Some(event) = events.next_service_event() {
            app.handle_event(event);
        }
        if condition(&app.state) {
            return true;
        }
        thread::sleep(Duration::from_millis(10));
    }
    false
}

fn draw(app: &mut App) -> String {
    let mut terminal = Terminal::new(TestBackend::new(80, 24)).unwrap();
    terminal.draw(|frame| app.render(frame)).unwrap();

    let buffer = terminal.backend().buffer();
    buffer
        .content
        .chunks(buffer.area.width as usize)
        .map(|row| row.iter().map(|cell| cell.symbol()).collect::<String>())
        .collect::<Vec<_>>()
        .join("\n")
}

#[test]
fn test_octocat_search_to_detail() {
    let api = MockGithubApi::success(User::new("Oct O Cat", None), octocat_repos());
    let (mut app, events) = setup(api.clone(), Arc::new(AlwaysOnline));

    type_text(&mut app, "octocat");
    assert_eq!(app.state.search.input, "octocat");
    press(&mut app, KeyCode::Enter);

    assert!(wait_for(&mut app, &events, |s| s.search.show_list && !s.search.is_loading));

    let screen = draw(&mut app);
    assert!(screen.contains("Oct O Cat"));
    assert!(screen.contains("Hello-World"));
    assert!(screen.contains("[Popular]"));

    // Same query again: no second request
    press(&mut app, KeyCode::Enter);
    thread::sleep(Duration::from_millis(50));
    assert_eq!(api.user_call_count(), 1);

    // Open the detail view
    press(&mut app, KeyCode::Tab);
    press(&mut app, KeyCode::Enter);
    assert_eq!(app.state.current_screen, Screen::Detail(octocat_repos().remove(0)));

    let screen = draw(&mut app);
    assert!(screen.contains("No description available"));
    assert!(screen.contains("Forks: 6,000"));
    assert!(screen.contains("Last updated: Nov 04, 2024"));

    press(&mut app, KeyCode::Esc);
    assert_eq!(app.state.current_screen, Screen::List);
}

#[test]
fn test_start_search_prefills_field() {
    let api = MockGithubApi::success(User::new("Oct O Cat", None), octocat_repos());
    let (mut app, events) = setup(api, Arc::new(AlwaysOnline));

    app.start_search("octocat");

    assert!(wait_for(&mut app, &events, |s| s.search.show_profile));
    assert!(draw(&mut app).contains("octocat"));
}

#[test]
fn test_failed_user_fetch_shows_toast() {
    let api = MockGithubApi::user_failure(ApiError::NotFound("user ghost".to_string()));
    let (mut app, events) = setup(api, Arc::new(AlwaysOnline));

    type_text(&mut app, "ghost");
    press(&mut app, KeyCode::Enter);

    assert!(wait_for(&mut app, &events, |s| s.toast.is_some()));
    let toast = app.state.toast.clone().unwrap();
    assert_eq!(toast.message, "Failed to fetch user: Not found: user ghost");
    assert!(!app.state.search.show_profile);
}

#[test]
fn test_offline_search_shows_toast() {
    let api = MockGithubApi::success(User::new("Oct O Cat", None), octocat_repos());
    let (mut app, events) = setup(api.clone(), Arc::new(AlwaysOffline));

    type_text(&mut app, "octocat");
    press(&mut app, KeyCode::Enter);

    assert!(wait_for(&mut app, &events, |s| s.toast.is_some()));
    assert_eq!(
        app.state.toast.as_ref().map(|t| t.message.as_str()),
        Some("Internet is not available!")
    );
    assert_eq!(api.user_call_count(), 0);
    assert!(draw(&mut app).contains("Internet is not available!"));
}

#[test]
fn test_newer_search_supersedes_older() {
    let api = MockGithubApi::success(User::new("Oct O Cat", None), octocat_repos())
        .with_delay(Duration::from_millis(200));
    let (mut app, events) = setup(api.clone(), Arc::new(AlwaysOnline));

    type_text(&mut app, "first");
    press(&mut app, KeyCode::Enter);
    thread::sleep(Duration::from_millis(50));

    press(&mut app, KeyCode::Backspace);
    type_text(&mut app, "x");
    press(&mut app, KeyCode::Enter);

    assert!(wait_for(&mut app, &events, |s| s.search.show_list && !s.search.is_loading));

    // The aborted unit never reached the repository endpoint
    assert_eq!(api.repos_call_count(), 1);
    assert_eq!(api.requested_ids().last().map(String::as_str), Some("firsx"));
}

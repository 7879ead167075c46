//! Tests for the interactive picker
//!
//! These tests verify:
//! - Key flows in browse, search and output modes
//! - Theme persistence and config download
//! - Rendering into a test backend

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use omniset::app::{App, AppMode, Focus};
use omniset::catalog;
use omniset::output::{OutputKind, CONFIG_FILE_NAME};
use omniset::{AppContext, OutputGenerator, ThemeMode, ThemeStore};
use pretty_assertions::assert_eq;
use ratatui::{backend::TestBackend, Terminal};
use std::fs;

const CATALOG: &str = r#"{
  "categories": [
    {
      "id": "cli",
      "name": "CLI",
      "modules": [
        { "id": "git", "name": "Git", "description": "Version control", "arch": ["x86_64"], "size_mb": 5, "tags": ["vcs"] },
        { "id": "nodejs", "name": "Node.js", "description": "JavaScript runtime", "arch": ["x86_64"], "size_mb": 50 }
      ]
    },
    {
      "id": "development",
      "name": "Development",
      "modules": [
        { "id": "docker", "name": "Docker", "description": "Containers", "arch": ["x86_64"], "size_mb": 120 },
        { "id": "vscode", "name": "VS Code", "description": "Editor", "arch": ["x86_64"], "size_mb": 95, "requires": ["git"] }
      ]
    }
  ],
  "presets": [
    { "id": "dev", "name": "Developer", "description": "Dev tools", "icon": "code", "modules": ["git", "docker"] }
  ]
}"#;

// Rows: [cli], git, nodejs, [development], docker, vscode
const VSCODE_ROW: usize = 5;

fn app() -> App {
    let catalog = catalog::parse(CATALOG).unwrap();
    let ctx = AppContext::in_memory(catalog, OutputGenerator::default()).unwrap();
    App::new(ctx, ThemeMode::Dark)
}

fn press(app: &mut App, code: KeyCode) -> bool {
    app.handle_key_event(KeyEvent::new(code, KeyModifiers::NONE))
        .unwrap()
}

fn type_text(app: &mut App, text: &str) {
    for c in text.chars() {
        press(app, KeyCode::Char(c));
    }
}

fn screen(app: &App, width: u16, height: u16) -> String {
    let mut terminal = Terminal::new(TestBackend::new(width, height)).unwrap();
    terminal.draw(|f| app.draw(f)).unwrap();
    let buffer = terminal.backend().buffer().clone();
    buffer
        .content()
        .chunks(width as usize)
        .map(|row| row.iter().map(|cell| cell.symbol()).collect::<String>())
        .collect::<Vec<_>>()
        .join("\n")
}

// =============================================================================
// Browse Mode
// =============================================================================

#[test]
fn test_select_module_with_requirement() {
    let mut app = app();
    for _ in 0..VSCODE_ROW {
        press(&mut app, KeyCode::Down);
    }
    press(&mut app, KeyCode::Char(' '));

    assert_eq!(app.context().store().selection().to_csv(), "vscode,git");
    assert_eq!(app.state().status_message, "Added VS Code (+ git)");
    assert_eq!(
        app.context().location().as_str(),
        "https://omniset.io/builder?m=vscode%2Cgit"
    );

    press(&mut app, KeyCode::Enter);
    assert_eq!(app.context().store().selection().to_csv(), "git");
    assert_eq!(app.state().status_message, "Removed VS Code");
}

#[test]
fn test_cursor_stays_in_bounds() {
    let mut app = app();
    press(&mut app, KeyCode::Up);
    assert_eq!(app.state().module_cursor, 0);

    press(&mut app, KeyCode::PageDown);
    assert_eq!(app.state().module_cursor, VSCODE_ROW);

    press(&mut app, KeyCode::Home);
    assert_eq!(app.state().module_cursor, 0);
    press(&mut app, KeyCode::End);
    assert_eq!(app.state().module_cursor, VSCODE_ROW);
}

#[test]
fn test_apply_preset_from_preset_pane() {
    let mut app = app();
    press(&mut app, KeyCode::Tab);
    assert_eq!(app.state().focus, Focus::Presets);

    press(&mut app, KeyCode::Enter);
    assert_eq!(app.context().store().selection().to_csv(), "git,docker");
    assert_eq!(app.context().view().summary.total_size_mb, 125.0);
    assert!(app.context().view().presets[0].active);
    assert_eq!(app.state().status_message, "Applied preset Developer (2 modules)");

    press(&mut app, KeyCode::Char('c'));
    assert_eq!(app.context().store().count(), 0);
    assert!(!app.context().view().presets[0].active);
    assert_eq!(app.context().location().query(), None);
}

#[test]
fn test_collapse_category() {
    let mut app = app();
    press(&mut app, KeyCode::Enter);
    let view = app.context().view();
    assert!(view.categories[0].collapsed);
    assert_eq!(view.rows().len(), 4);

    press(&mut app, KeyCode::Enter);
    assert!(!app.context().view().categories[0].collapsed);
}

#[test]
fn test_generate_and_clear_need_a_selection() {
    let mut app = app();
    press(&mut app, KeyCode::Char('g'));
    assert_eq!(app.state().mode, AppMode::Browse);
    assert_eq!(app.state().status_message, "Select at least one module first");

    let before = app.state().status_message.clone();
    press(&mut app, KeyCode::Char('c'));
    assert_eq!(app.state().status_message, before);
}

// =============================================================================
// Search Mode
// =============================================================================

#[test]
fn test_search_filters_live_and_keeps_filter() {
    let mut app = app();
    press(&mut app, KeyCode::Char('/'));
    assert_eq!(app.state().mode, AppMode::Search);

    // Letters bound in browse mode are plain input here
    type_text(&mut app, "dock");
    let view = app.context().view();
    assert_eq!(view.categories.len(), 1);
    assert_eq!(view.categories[0].modules[0].id, "docker");
    assert_eq!(app.context().store().count(), 0);

    press(&mut app, KeyCode::Enter);
    assert_eq!(app.state().mode, AppMode::Browse);
    assert_eq!(app.context().view_state().filter, "dock");

    press(&mut app, KeyCode::Down);
    press(&mut app, KeyCode::Char(' '));
    assert_eq!(app.context().store().selection().to_csv(), "docker");
}

#[test]
fn test_search_escape_clears_filter() {
    let mut app = app();
    press(&mut app, KeyCode::Char('/'));
    type_text(&mut app, "vcsx");
    assert!(app.context().view().categories.is_empty());

    press(&mut app, KeyCode::Backspace);
    assert_eq!(app.context().view().categories[0].modules[0].id, "git");

    press(&mut app, KeyCode::Esc);
    assert_eq!(app.state().mode, AppMode::Browse);
    assert_eq!(app.context().view_state().filter, "");
    assert_eq!(app.context().view().categories.len(), 2);
}

#[test]
fn test_ctrl_c_quits_from_search() {
    let mut app = app();
    press(&mut app, KeyCode::Char('/'));
    let quit = app
        .handle_key_event(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL))
        .unwrap();
    assert!(quit);
}

// =============================================================================
// Output Mode
// =============================================================================

#[test]
fn test_output_modal_and_download() {
    let dir = tempfile::tempdir().unwrap();
    let mut app = app().with_download_dir(dir.path());
    press(&mut app, KeyCode::Tab);
    press(&mut app, KeyCode::Enter);

    press(&mut app, KeyCode::Char('g'));
    assert_eq!(app.state().mode, AppMode::Output);
    assert_eq!(app.state().output_tab, OutputKind::Command);
    let snapshot = app.state().output.clone().unwrap();
    assert_eq!(
        snapshot.command,
        "curl -sL https://omniset.io/i | bash -s -- git,docker"
    );
    assert_eq!(snapshot.share_url, "https://omniset.io/builder?m=git%2Cdocker");

    press(&mut app, KeyCode::Tab);
    assert_eq!(app.state().output_tab, OutputKind::Config);
    press(&mut app, KeyCode::Left);
    press(&mut app, KeyCode::Left);
    assert_eq!(app.state().output_tab, OutputKind::Share);

    press(&mut app, KeyCode::Char('d'));
    let written = fs::read_to_string(dir.path().join(CONFIG_FILE_NAME)).unwrap();
    assert_eq!(written, snapshot.config);
    assert!(written.starts_with("# OmniSet Configuration\n# Generated: "));
    assert!(written.ends_with("modules:\n  - git\n  - docker\n"));

    press(&mut app, KeyCode::Esc);
    assert_eq!(app.state().mode, AppMode::Browse);
    assert!(app.state().output.is_none());
}

// =============================================================================
// Theme, Help and Quit
// =============================================================================

#[test]
fn test_theme_toggle_is_saved() {
    let dir = tempfile::tempdir().unwrap();
    let store = ThemeStore::new(dir.path().join("theme"));
    let mut app = app().with_theme_store(Some(store.clone()));

    press(&mut app, KeyCode::Char('t'));
    assert_eq!(app.state().theme, ThemeMode::Light);
    assert_eq!(store.load(), Some(ThemeMode::Light));

    press(&mut app, KeyCode::Char('t'));
    assert_eq!(store.load(), Some(ThemeMode::Dark));
}

#[test]
fn test_help_overlay_swallows_keys() {
    let mut app = app();
    press(&mut app, KeyCode::Char('?'));
    assert!(app.state().help_visible);

    // q closes nothing and quits nothing while help is open
    assert!(!press(&mut app, KeyCode::Char('q')));
    assert!(app.state().help_visible);

    press(&mut app, KeyCode::Esc);
    assert!(!app.state().help_visible);
    assert!(press(&mut app, KeyCode::Char('q')));
}

// =============================================================================
// Rendering
// =============================================================================

#[test]
fn test_render_main_screen() {
    let mut app = app();
    press(&mut app, KeyCode::Tab);
    press(&mut app, KeyCode::Enter);

    let text = screen(&app, 100, 30);
    assert!(text.contains("OmniSet"));
    assert!(text.contains("Quick Start"));
    assert!(text.contains("Developer"));
    assert!(text.contains("Docker"));
    assert!(text.contains("modules selected"));
    assert!(text.contains("Press / to search"));
}

#[test]
fn test_render_output_and_help() {
    let mut app = app();
    for _ in 0..VSCODE_ROW {
        press(&mut app, KeyCode::Down);
    }
    press(&mut app, KeyCode::Char(' '));
    press(&mut app, KeyCode::Char('g'));

    let text = screen(&app, 100, 30);
    assert!(text.contains("Install Command"));
    assert!(text.contains("bash -s -- vscode,git"));

    press(&mut app, KeyCode::Char('?'));
    let text = screen(&app, 100, 30);
    assert!(text.contains("Download config"));
}

#[test]
fn test_render_too_small() {
    let text = screen(&app(), 40, 10);
    assert!(text.contains("Terminal too small"));
}

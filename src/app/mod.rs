//! Application module
//!
//! Contains the interactive picker: key handling and the event loop.
//!
//! # Module Structure
//! - `state` - Application state types (AppState, AppMode, Focus, OutputSnapshot)
//! - Main module - App struct and event loop

mod state;

// Re-export state types for external use
pub use state::{AppMode, AppState, Focus, OutputSnapshot};

use crate::components::keybindings::{KeyAction, KeybindingContext};
use crate::context::AppContext;
use crate::error::Result;
use crate::output::{OutputKind, CONFIG_FILE_NAME};
use crate::theme::{ThemeMode, ThemeStore};
use crate::ui::UiRenderer;
use crate::view::Row;
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use ratatui::{backend::Backend, Frame, Terminal};
use std::fs;
use std::path::PathBuf;
use std::time::Duration;
use strum::IntoEnumIterator;
use tracing::{debug, info, warn};

/// Rows moved by PageUp / PageDown.
const PAGE_SIZE: usize = 10;

/// Main application struct
pub struct App {
    ctx: AppContext,
    state: AppState,
    /// Resolves keys and feeds the nav bar and help overlay
    keybinding_context: KeybindingContext,
    ui_renderer: UiRenderer,
    /// Where theme changes are persisted, if anywhere
    theme_store: Option<ThemeStore>,
    /// Directory the config document is downloaded into
    download_dir: PathBuf,
}

impl App {
    /// Create a new application instance
    pub fn new(ctx: AppContext, theme: ThemeMode) -> Self {
        info!("Creating picker with {} modules", ctx.catalog().module_count());
        let mut app = Self {
            ctx,
            state: AppState {
                theme,
                ..AppState::default()
            },
            keybinding_context: KeybindingContext::new(),
            ui_renderer: UiRenderer::new(),
            theme_store: None,
            download_dir: PathBuf::from("."),
        };
        app.clamp_cursors();
        app
    }

    pub fn with_theme_store(mut self, store: Option<ThemeStore>) -> Self {
        self.theme_store = store;
        self
    }

    pub fn with_download_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.download_dir = dir.into();
        self
    }

    pub fn context(&self) -> &AppContext {
        &self.ctx
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    /// Consume the app, keeping the session context.
    pub fn into_context(self) -> AppContext {
        self.ctx
    }

    /// Run the event loop until the user quits.
    pub fn run<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> Result<()> {
        info!("Starting main application loop");

        loop {
            terminal.draw(|f| self.draw(f))?;

            if event::poll(Duration::from_millis(250))? {
                if let Event::Key(key_event) = event::read()? {
                    if self.handle_key_event(key_event)? {
                        break;
                    }
                }
            }
        }

        info!("Picker closed with {} modules selected", self.ctx.store().count());
        Ok(())
    }

    /// Render one frame
    pub fn draw(&self, f: &mut Frame) {
        self.ui_renderer
            .render(f, &self.ctx, &self.state, &self.keybinding_context);
    }

    /// Handle a key press. Returns `true` when the picker should exit.
    pub fn handle_key_event(&mut self, key: KeyEvent) -> Result<bool> {
        // Release/repeat events arrive on some platforms
        if key.kind != KeyEventKind::Press {
            return Ok(false);
        }

        let quit = if self.state.help_visible {
            self.handle_help_key(key)
        } else if self.state.mode == AppMode::Search {
            self.handle_search_key(key)
        } else {
            match self.keybinding_context.action_for(&self.state.mode, &key) {
                Some(action) => {
                    debug!("Key {:?} -> {:?} in {:?}", key.code, action, self.state.mode);
                    match self.state.mode {
                        AppMode::Output => self.handle_output_action(action),
                        _ => self.handle_browse_action(action),
                    }
                }
                None => false,
            }
        };

        self.clamp_cursors();
        Ok(quit)
    }

    fn handle_help_key(&mut self, key: KeyEvent) -> bool {
        match self.keybinding_context.action_for(&self.state.mode, &key) {
            Some(KeyAction::Quit) if key.modifiers.contains(KeyModifiers::CONTROL) => true,
            Some(KeyAction::Help | KeyAction::Close) => {
                self.state.help_visible = false;
                false
            }
            _ if key.code == KeyCode::Esc => {
                self.state.help_visible = false;
                false
            }
            _ => false,
        }
    }

    fn handle_search_key(&mut self, key: KeyEvent) -> bool {
        if key.modifiers.contains(KeyModifiers::CONTROL) {
            return key.code == KeyCode::Char('c');
        }

        match self.keybinding_context.action_for(&AppMode::Search, &key) {
            Some(KeyAction::Select) => {
                self.state.mode = AppMode::Browse;
                self.state.status_message = if self.state.search_input.trim().is_empty() {
                    "Showing all modules".to_string()
                } else {
                    format!("Filtered by '{}'", self.state.search_input.trim())
                };
                return false;
            }
            Some(KeyAction::Close) => {
                self.state.search_input.clear();
                self.ctx.set_filter("");
                self.state.mode = AppMode::Browse;
                self.state.status_message = "Filter cleared".to_string();
                return false;
            }
            _ => {}
        }

        match key.code {
            KeyCode::Char(c) => self.state.search_input.push(c),
            KeyCode::Backspace => {
                if self.state.search_input.pop().is_none() {
                    return false;
                }
            }
            _ => return false,
        }

        let query = self.state.search_input.clone();
        self.ctx.set_filter(&query);
        self.state.module_cursor = 0;
        false
    }

    fn handle_browse_action(&mut self, action: KeyAction) -> bool {
        match action {
            KeyAction::NavigateUp => self.move_cursor(|c, _| c.saturating_sub(1)),
            KeyAction::NavigateDown => self.move_cursor(|c, _| c.saturating_add(1)),
            KeyAction::PageUp => self.move_cursor(|c, _| c.saturating_sub(PAGE_SIZE)),
            KeyAction::PageDown => self.move_cursor(|c, _| c.saturating_add(PAGE_SIZE)),
            KeyAction::Home => self.move_cursor(|_, _| 0),
            KeyAction::End => self.move_cursor(|_, len| len.saturating_sub(1)),
            KeyAction::SwitchFocus => self.state.focus = self.state.focus.toggled(),
            KeyAction::Select => self.select_under_cursor(),
            KeyAction::Search => {
                self.state.search_input = self.ctx.view_state().filter.clone();
                self.state.mode = AppMode::Search;
            }
            KeyAction::Generate => self.open_output(),
            KeyAction::Clear => {
                if self.ctx.view().summary.actions_enabled {
                    self.ctx.clear();
                    self.state.status_message = "Selection cleared".to_string();
                }
            }
            KeyAction::ToggleTheme => self.toggle_theme(),
            KeyAction::Help => self.state.help_visible = true,
            KeyAction::Quit => return true,
            _ => {}
        }
        false
    }

    fn handle_output_action(&mut self, action: KeyAction) -> bool {
        match action {
            KeyAction::NextTab => self.cycle_tab(1),
            KeyAction::PrevTab => self.cycle_tab(-1),
            KeyAction::Download => self.download_config(),
            KeyAction::Close => {
                self.state.mode = AppMode::Browse;
                self.state.output = None;
            }
            KeyAction::Help => self.state.help_visible = true,
            KeyAction::Quit => return true,
            _ => {}
        }
        false
    }

    fn move_cursor(&mut self, step: impl Fn(usize, usize) -> usize) {
        match self.state.focus {
            Focus::Presets => {
                let len = self.ctx.view().presets.len();
                self.state.preset_cursor = step(self.state.preset_cursor, len);
            }
            Focus::Modules => {
                let len = self.ctx.view().rows().len();
                self.state.module_cursor = step(self.state.module_cursor, len);
            }
        }
    }

    fn select_under_cursor(&mut self) {
        match self.state.focus {
            Focus::Presets => {
                let Some(preset) = self.ctx.view().presets.get(self.state.preset_cursor) else {
                    return;
                };
                let (id, name) = (preset.id.clone(), preset.name.clone());
                if self.ctx.apply_preset(&id) {
                    self.state.status_message = format!(
                        "Applied preset {} ({} modules)",
                        name,
                        self.ctx.store().count()
                    );
                }
            }
            Focus::Modules => {
                let view = self.ctx.view();
                let Some(&row) = view.rows().get(self.state.module_cursor) else {
                    return;
                };
                match row {
                    Row::Category(_) => {
                        if let Some(category) = view.category_at(row) {
                            let id = category.id.clone();
                            self.ctx.toggle_category(&id);
                        }
                    }
                    Row::Module(..) => {
                        let Some(module) = view.module_at(row) else {
                            return;
                        };
                        if module.disabled {
                            self.state.status_message =
                                format!("{} is not available on this system", module.name);
                            return;
                        }
                        let (id, name) = (module.id.clone(), module.name.clone());
                        let changed = self.ctx.toggle(&id);
                        let selected = self.ctx.store().is_selected(&id);
                        self.state.status_message = toggle_message(&name, &changed, selected);
                    }
                }
            }
        }
    }

    fn open_output(&mut self) {
        if !self.ctx.view().summary.actions_enabled {
            self.state.status_message = "Select at least one module first".to_string();
            return;
        }
        self.state.output = Some(OutputSnapshot {
            command: self.ctx.install_command(),
            config: self.ctx.config_document(),
            share_url: self.ctx.share_url(),
        });
        self.state.output_tab = OutputKind::Command;
        self.state.mode = AppMode::Output;
    }

    fn cycle_tab(&mut self, delta: isize) {
        let kinds: Vec<OutputKind> = OutputKind::iter().collect();
        let current = kinds
            .iter()
            .position(|k| *k == self.state.output_tab)
            .unwrap_or(0) as isize;
        let next = (current + delta).rem_euclid(kinds.len() as isize) as usize;
        self.state.output_tab = kinds[next];
    }

    fn download_config(&mut self) {
        let Some(snapshot) = &self.state.output else {
            return;
        };
        let path = self.download_dir.join(CONFIG_FILE_NAME);
        match fs::write(&path, &snapshot.config) {
            Ok(()) => {
                info!("Wrote config to {:?}", path);
                self.state.status_message = format!("Saved {}", path.display());
            }
            Err(e) => {
                warn!("Failed to write {:?}: {}", path, e);
                self.state.status_message = format!("Could not save {}: {}", path.display(), e);
            }
        }
    }

    fn toggle_theme(&mut self) {
        self.state.theme = self.state.theme.toggled();
        self.state.status_message = format!("{} theme", self.state.theme);
        if let Some(store) = &self.theme_store {
            if let Err(e) = store.save(self.state.theme) {
                warn!("Failed to save theme: {}", e);
            }
        }
    }

    fn clamp_cursors(&mut self) {
        let view = self.ctx.view();
        let (presets, rows) = (view.presets.len(), view.rows().len());
        self.state.clamp_cursors(presets, rows);
    }
}

fn toggle_message(name: &str, changed: &[String], selected: bool) -> String {
    if !selected {
        return format!("Removed {}", name);
    }
    match changed.get(1..) {
        Some(deps) if !deps.is_empty() => format!("Added {} (+ {})", name, deps.join(", ")),
        _ => format!("Added {}", name),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::fixtures::sample_catalog;
    use crate::output::OutputGenerator;

    fn app() -> App {
        let ctx = AppContext::in_memory(sample_catalog(), OutputGenerator::default()).unwrap();
        App::new(ctx, ThemeMode::Light)
    }

    fn press(app: &mut App, code: KeyCode) -> bool {
        app.handle_key_event(KeyEvent::new(code, KeyModifiers::NONE)).unwrap()
    }

    #[test]
    fn test_toggle_message() {
        assert_eq!(toggle_message("Git", &["git".into()], true), "Added Git");
        assert_eq!(
            toggle_message("VS Code", &["vscode".into(), "git".into()], true),
            "Added VS Code (+ git)"
        );
        assert_eq!(toggle_message("Git", &["git".into()], false), "Removed Git");
    }

    #[test]
    fn test_select_module_row() {
        let mut app = app();
        // Rows: cli, git, development, docker, vscode, stack
        press(&mut app, KeyCode::Down);
        press(&mut app, KeyCode::Char(' '));
        assert!(app.context().store().is_selected("git"));
        assert_eq!(app.state().status_message, "Added git");
    }

    #[test]
    fn test_release_events_are_ignored() {
        let mut app = app();
        let mut release = KeyEvent::new(KeyCode::Char('q'), KeyModifiers::NONE);
        release.kind = KeyEventKind::Release;
        assert!(!app.handle_key_event(release).unwrap());
    }

    #[test]
    fn test_cycle_tab_wraps() {
        let mut app = app();
        app.cycle_tab(-1);
        assert_eq!(app.state.output_tab, OutputKind::Share);
        app.cycle_tab(1);
        assert_eq!(app.state.output_tab, OutputKind::Command);
    }
}

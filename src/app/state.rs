//! Application state definitions
//!
//! Contains the interactive picker's own state: mode, focus, cursors, the
//! search input and the output modal. Selection state lives in
//! [`crate::context::AppContext`].

use crate::output::OutputKind;
use crate::theme::ThemeMode;

/// Application operating modes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AppMode {
    /// Browsing presets and modules
    Browse,
    /// Typing a search query
    Search,
    /// Output modal with command, config and share link
    Output,
}

/// Which pane receives navigation keys in [`AppMode::Browse`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Focus {
    Presets,
    #[default]
    Modules,
}

impl Focus {
    pub fn toggled(self) -> Self {
        match self {
            Self::Presets => Self::Modules,
            Self::Modules => Self::Presets,
        }
    }
}

/// Artifacts captured when the output modal opens.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputSnapshot {
    pub command: String,
    pub config: String,
    pub share_url: String,
}

impl OutputSnapshot {
    pub fn get(&self, kind: OutputKind) -> &str {
        match kind {
            OutputKind::Command => &self.command,
            OutputKind::Config => &self.config,
            OutputKind::Share => &self.share_url,
        }
    }
}

/// Main application state
#[derive(Debug, Clone)]
pub struct AppState {
    /// Current application mode
    pub mode: AppMode,
    /// Focused pane
    pub focus: Focus,
    /// Cursor in the preset list
    pub preset_cursor: usize,
    /// Cursor in the module rows
    pub module_cursor: usize,
    /// Search text being edited
    pub search_input: String,
    /// Active tab of the output modal
    pub output_tab: OutputKind,
    /// Output captured when the modal opened
    pub output: Option<OutputSnapshot>,
    /// Whether help overlay is visible
    pub help_visible: bool,
    /// Status message for user feedback
    pub status_message: String,
    /// Current theme
    pub theme: ThemeMode,
}

impl Default for AppState {
    fn default() -> Self {
        Self {
            mode: AppMode::Browse,
            focus: Focus::default(),
            preset_cursor: 0,
            module_cursor: 0,
            search_input: String::new(),
            output_tab: OutputKind::default(),
            output: None,
            help_visible: false,
            status_message: "Space to select a module, Enter on a preset to apply it".to_string(),
            theme: ThemeMode::default(),
        }
    }
}

impl AppState {
    /// Keep cursors inside lists of the given lengths.
    pub fn clamp_cursors(&mut self, preset_count: usize, row_count: usize) {
        self.preset_cursor = self.preset_cursor.min(preset_count.saturating_sub(1));
        self.module_cursor = self.module_cursor.min(row_count.saturating_sub(1));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_state() {
        let state = AppState::default();
        assert_eq!(state.mode, AppMode::Browse);
        assert_eq!(state.focus, Focus::Modules);
        assert!(state.output.is_none());
        assert!(!state.help_visible);
    }

    #[test]
    fn test_clamp_cursors() {
        let mut state = AppState {
            preset_cursor: 5,
            module_cursor: 10,
            ..Default::default()
        };
        state.clamp_cursors(2, 4);
        assert_eq!(state.preset_cursor, 1);
        assert_eq!(state.module_cursor, 3);

        state.clamp_cursors(0, 0);
        assert_eq!(state.preset_cursor, 0);
        assert_eq!(state.module_cursor, 0);
    }

    #[test]
    fn test_snapshot_lookup() {
        let snapshot = OutputSnapshot {
            command: "cmd".to_string(),
            config: "cfg".to_string(),
            share_url: "url".to_string(),
        };
        assert_eq!(snapshot.get(OutputKind::Config), "cfg");
        assert_eq!(snapshot.get(OutputKind::Share), "url");
        assert_eq!(Focus::Modules.toggled(), Focus::Presets);
    }
}

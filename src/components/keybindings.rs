//! Keybinding system for context-aware keyboard shortcuts
//!
//! Provides a registry of keybindings that change based on the current
//! application mode. The registry both resolves key events to actions and
//! feeds the footer hints and the help overlay.

use crate::app::AppMode;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use std::collections::HashMap;

/// Actions that can be triggered by keybindings
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyAction {
    NavigateUp,
    NavigateDown,
    PageUp,
    PageDown,
    Home,
    End,
    SwitchFocus,
    Select,
    Search,
    Generate,
    Clear,
    ToggleTheme,
    NextTab,
    PrevTab,
    Download,
    Close,
    Help,
    Quit,
}

/// A keybinding definition
#[derive(Debug, Clone)]
pub struct Keybinding {
    pub key: KeyCode,
    pub modifiers: KeyModifiers,
    pub action: KeyAction,
    pub display: String,
    pub description: String,
}

impl Keybinding {
    /// Create a new keybinding with no modifiers
    pub fn new(key: KeyCode, action: KeyAction, display: &str, description: &str) -> Self {
        Self {
            key,
            modifiers: KeyModifiers::NONE,
            action,
            display: display.to_string(),
            description: description.to_string(),
        }
    }

    /// Create a keybinding with modifiers
    pub fn with_modifiers(
        key: KeyCode,
        modifiers: KeyModifiers,
        action: KeyAction,
        display: &str,
        description: &str,
    ) -> Self {
        Self {
            key,
            modifiers,
            action,
            display: display.to_string(),
            description: description.to_string(),
        }
    }

    fn matches(&self, event: &KeyEvent) -> bool {
        // SHIFT is implied by upper-case characters and BackTab
        let modifiers = event.modifiers.difference(KeyModifiers::SHIFT);
        // Letters are registered lower-case
        let code = match event.code {
            KeyCode::Char(c) => KeyCode::Char(c.to_ascii_lowercase()),
            other => other,
        };
        self.key == code && self.modifiers.difference(KeyModifiers::SHIFT) == modifiers
    }
}

/// Context-aware keybinding registry
pub struct KeybindingContext {
    /// Mode-specific keybindings
    mode_bindings: HashMap<AppMode, Vec<Keybinding>>,
    /// Global keybindings (available in all modes except Search)
    global_bindings: Vec<Keybinding>,
}

impl Default for KeybindingContext {
    fn default() -> Self {
        Self::new()
    }
}

impl KeybindingContext {
    /// Create a new keybinding context with default bindings
    pub fn new() -> Self {
        let mut ctx = Self {
            mode_bindings: HashMap::new(),
            global_bindings: Vec::new(),
        };
        ctx.register_defaults();
        ctx
    }

    /// Register default keybindings for all modes
    fn register_defaults(&mut self) {
        self.global_bindings = vec![
            Keybinding::new(KeyCode::Char('?'), KeyAction::Help, "?", "Help"),
            Keybinding::with_modifiers(
                KeyCode::Char('c'),
                KeyModifiers::CONTROL,
                KeyAction::Quit,
                "Ctrl+C",
                "Quit",
            ),
        ];

        self.mode_bindings.insert(
            AppMode::Browse,
            vec![
                Keybinding::new(KeyCode::Up, KeyAction::NavigateUp, "Up", "Navigate up"),
                Keybinding::new(KeyCode::Char('k'), KeyAction::NavigateUp, "k", "Navigate up"),
                Keybinding::new(KeyCode::Down, KeyAction::NavigateDown, "Down", "Navigate down"),
                Keybinding::new(KeyCode::Char('j'), KeyAction::NavigateDown, "j", "Navigate down"),
                Keybinding::new(KeyCode::PageUp, KeyAction::PageUp, "PgUp", "Page up"),
                Keybinding::new(KeyCode::PageDown, KeyAction::PageDown, "PgDn", "Page down"),
                Keybinding::new(KeyCode::Home, KeyAction::Home, "Home", "First item"),
                Keybinding::new(KeyCode::End, KeyAction::End, "End", "Last item"),
                Keybinding::new(KeyCode::Tab, KeyAction::SwitchFocus, "Tab", "Presets / modules"),
                Keybinding::new(KeyCode::Enter, KeyAction::Select, "Enter", "Select"),
                Keybinding::new(KeyCode::Char(' '), KeyAction::Select, "Space", "Select"),
                Keybinding::new(KeyCode::Char('/'), KeyAction::Search, "/", "Search"),
                Keybinding::new(KeyCode::Char('g'), KeyAction::Generate, "g", "Generate"),
                Keybinding::new(KeyCode::Char('c'), KeyAction::Clear, "c", "Clear selection"),
                Keybinding::new(KeyCode::Char('t'), KeyAction::ToggleTheme, "t", "Toggle theme"),
                Keybinding::new(KeyCode::Char('q'), KeyAction::Quit, "q", "Quit"),
            ],
        );

        self.mode_bindings.insert(
            AppMode::Search,
            vec![
                Keybinding::new(KeyCode::Enter, KeyAction::Select, "Enter", "Keep filter"),
                Keybinding::new(KeyCode::Esc, KeyAction::Close, "Esc", "Clear filter"),
            ],
        );

        self.mode_bindings.insert(
            AppMode::Output,
            vec![
                Keybinding::new(KeyCode::Tab, KeyAction::NextTab, "Tab", "Next tab"),
                Keybinding::new(KeyCode::Right, KeyAction::NextTab, "Right", "Next tab"),
                Keybinding::new(KeyCode::BackTab, KeyAction::PrevTab, "S-Tab", "Previous tab"),
                Keybinding::new(KeyCode::Left, KeyAction::PrevTab, "Left", "Previous tab"),
                Keybinding::new(KeyCode::Char('d'), KeyAction::Download, "d", "Download config"),
                Keybinding::new(KeyCode::Esc, KeyAction::Close, "Esc", "Close"),
                Keybinding::new(KeyCode::Char('q'), KeyAction::Close, "q", "Close"),
            ],
        );
    }

    /// Get keybindings for a specific mode (includes global bindings)
    pub fn get_bindings(&self, mode: &AppMode) -> Vec<&Keybinding> {
        let mut bindings: Vec<&Keybinding> = Vec::new();

        if let Some(mode_bindings) = self.mode_bindings.get(mode) {
            bindings.extend(mode_bindings.iter());
        }

        // Search mode takes every printable key as input
        if *mode != AppMode::Search {
            bindings.extend(self.global_bindings.iter());
        }

        bindings
    }

    /// Resolve a key event to an action in `mode`.
    pub fn action_for(&self, mode: &AppMode, event: &KeyEvent) -> Option<KeyAction> {
        self.get_bindings(mode)
            .into_iter()
            .find(|b| b.matches(event))
            .map(|b| b.action)
    }

    /// Get navigation bar items for display
    pub fn get_nav_items(&self, mode: &AppMode) -> Vec<NavBarItem> {
        let bindings = self.get_bindings(mode);

        let priority_actions = match mode {
            AppMode::Browse => vec![
                KeyAction::NavigateUp,
                KeyAction::Select,
                KeyAction::SwitchFocus,
                KeyAction::Search,
                KeyAction::Generate,
                KeyAction::Clear,
                KeyAction::Help,
                KeyAction::Quit,
            ],
            AppMode::Search => vec![KeyAction::Select, KeyAction::Close],
            AppMode::Output => vec![KeyAction::NextTab, KeyAction::Download, KeyAction::Close],
        };

        let mut items = Vec::new();
        for action in priority_actions {
            if action == KeyAction::NavigateUp {
                items.push(NavBarItem {
                    key_display: "Up/Dn".to_string(),
                    action_label: "Navigate".to_string(),
                });
                continue;
            }
            if let Some(binding) = bindings.iter().find(|b| b.action == action) {
                items.push(NavBarItem {
                    key_display: binding.display.clone(),
                    action_label: binding.description.clone(),
                });
            }
        }

        items
    }

    /// Get full help content for a mode (for help overlay)
    pub fn get_help_content(&self, mode: &AppMode) -> Vec<HelpSection> {
        let groups: [(&str, fn(KeyAction) -> bool); 3] = [
            ("Navigation", |a| {
                matches!(
                    a,
                    KeyAction::NavigateUp
                        | KeyAction::NavigateDown
                        | KeyAction::PageUp
                        | KeyAction::PageDown
                        | KeyAction::Home
                        | KeyAction::End
                        | KeyAction::SwitchFocus
                        | KeyAction::NextTab
                        | KeyAction::PrevTab
                )
            }),
            ("Actions", |a| {
                matches!(
                    a,
                    KeyAction::Select
                        | KeyAction::Search
                        | KeyAction::Generate
                        | KeyAction::Clear
                        | KeyAction::ToggleTheme
                        | KeyAction::Download
                )
            }),
            ("General", |a| {
                matches!(a, KeyAction::Close | KeyAction::Help | KeyAction::Quit)
            }),
        ];

        let bindings = self.get_bindings(mode);
        groups
            .iter()
            .filter_map(|(title, belongs)| {
                let items: Vec<(String, String)> = bindings
                    .iter()
                    .filter(|b| belongs(b.action))
                    .map(|b| (b.display.clone(), b.description.clone()))
                    .collect();
                (!items.is_empty()).then(|| HelpSection {
                    title: title.to_string(),
                    items,
                })
            })
            .collect()
    }
}

/// Navigation bar item for display
#[derive(Debug, Clone)]
pub struct NavBarItem {
    pub key_display: String,
    pub action_label: String,
}

/// Help section for the help overlay
#[derive(Debug, Clone)]
pub struct HelpSection {
    pub title: String,
    pub items: Vec<(String, String)>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn test_browse_actions() {
        let ctx = KeybindingContext::new();
        let mode = AppMode::Browse;
        assert_eq!(ctx.action_for(&mode, &key(KeyCode::Char(' '))), Some(KeyAction::Select));
        assert_eq!(ctx.action_for(&mode, &key(KeyCode::Char('j'))), Some(KeyAction::NavigateDown));
        assert_eq!(ctx.action_for(&mode, &key(KeyCode::Char('?'))), Some(KeyAction::Help));
        assert_eq!(ctx.action_for(&mode, &key(KeyCode::Char('x'))), None);
    }

    #[test]
    fn test_control_modifier_required() {
        let ctx = KeybindingContext::new();
        let ctrl_c = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
        assert_eq!(ctx.action_for(&AppMode::Browse, &ctrl_c), Some(KeyAction::Quit));
        assert_eq!(
            ctx.action_for(&AppMode::Browse, &key(KeyCode::Char('c'))),
            Some(KeyAction::Clear)
        );
    }

    #[test]
    fn test_shift_is_ignored() {
        let ctx = KeybindingContext::new();
        let back_tab = KeyEvent::new(KeyCode::BackTab, KeyModifiers::SHIFT);
        assert_eq!(ctx.action_for(&AppMode::Output, &back_tab), Some(KeyAction::PrevTab));
        let question = KeyEvent::new(KeyCode::Char('?'), KeyModifiers::SHIFT);
        assert_eq!(ctx.action_for(&AppMode::Browse, &question), Some(KeyAction::Help));
    }

    #[test]
    fn test_upper_case_letters_match() {
        let ctx = KeybindingContext::new();
        let shift_g = KeyEvent::new(KeyCode::Char('G'), KeyModifiers::SHIFT);
        assert_eq!(ctx.action_for(&AppMode::Browse, &shift_g), Some(KeyAction::Generate));
        let shift_d = KeyEvent::new(KeyCode::Char('D'), KeyModifiers::SHIFT);
        assert_eq!(ctx.action_for(&AppMode::Output, &shift_d), Some(KeyAction::Download));
    }

    #[test]
    fn test_labels_match_bound_keys() {
        let ctx = KeybindingContext::new();
        for mode in [AppMode::Browse, AppMode::Output] {
            for binding in ctx.get_bindings(&mode) {
                if let KeyCode::Char(c) = binding.key {
                    if binding.modifiers.is_empty() && c.is_ascii_alphabetic() {
                        assert_eq!(binding.display, c.to_string());
                    }
                }
            }
        }
    }

    #[test]
    fn test_search_mode_has_no_globals() {
        let ctx = KeybindingContext::new();
        assert_eq!(ctx.action_for(&AppMode::Search, &key(KeyCode::Char('?'))), None);
        assert_eq!(ctx.action_for(&AppMode::Search, &key(KeyCode::Esc)), Some(KeyAction::Close));
    }

    #[test]
    fn test_nav_items() {
        let ctx = KeybindingContext::new();
        let items = ctx.get_nav_items(&AppMode::Output);
        assert_eq!(items.len(), 3);
        assert_eq!(items[1].action_label, "Download config");
    }

    #[test]
    fn test_help_sections() {
        let ctx = KeybindingContext::new();
        let sections = ctx.get_help_content(&AppMode::Browse);
        let titles: Vec<_> = sections.iter().map(|s| s.title.as_str()).collect();
        assert_eq!(titles, vec!["Navigation", "Actions", "General"]);
    }
}

//! Centralized theme and styling for the TUI
//!
//! This module provides the dark and light palettes, the pre-built styles
//! derived from them, and the persisted theme flag.
//!
//! # Theme Flag
//!
//! A single word (`dark` or `light`) stored in `<config dir>/omniset/theme`.
//! When no flag is stored, the terminal's colour-scheme hint (`COLORFGBG`)
//! decides, and light is the final fallback.

use crate::error::Result;
use ratatui::style::{Color, Modifier, Style};
use std::fs;
use std::path::{Path, PathBuf};
use strum::{Display, EnumIter, EnumString};
use tracing::{debug, warn};

/// Theme selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Display, EnumString, EnumIter)]
#[strum(serialize_all = "lowercase")]
pub enum ThemeMode {
    #[default]
    Light,
    Dark,
}

impl ThemeMode {
    pub fn toggled(self) -> Self {
        match self {
            Self::Light => Self::Dark,
            Self::Dark => Self::Light,
        }
    }

    /// Pick the startup theme: a stored flag wins, then the terminal hint.
    pub fn resolve(saved: Option<ThemeMode>, colorfgbg: Option<&str>) -> Self {
        match saved {
            Some(mode) => mode,
            None if prefers_dark(colorfgbg) => Self::Dark,
            None => Self::Light,
        }
    }

    pub fn palette(self) -> &'static Palette {
        match self {
            Self::Light => &Palette::LIGHT,
            Self::Dark => &Palette::DARK,
        }
    }

    /// Glyph shown on the theme toggle (the mode it switches to).
    pub fn toggle_icon(self) -> &'static str {
        match self {
            Self::Light => "🌙",
            Self::Dark => "☀️",
        }
    }
}

/// Whether a `COLORFGBG` value ("fg;bg" or "fg;default;bg") names a dark
/// background.
pub fn prefers_dark(colorfgbg: Option<&str>) -> bool {
    let Some(bg) = colorfgbg.and_then(|v| v.rsplit(';').next()) else {
        return false;
    };
    match bg.trim().parse::<u8>() {
        Ok(index) => index <= 6 || index == 8,
        Err(_) => false,
    }
}

// =============================================================================
// COLOR PALETTE
// =============================================================================

/// Color palette for one theme mode.
/// All colors should come from here rather than being hardcoded in widgets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    /// Panel background
    pub bg: Color,
    /// Default foreground text color
    pub fg: Color,
    /// Secondary/muted text color
    pub fg_muted: Color,
    /// Primary accent - borders, titles
    pub primary: Color,
    /// Secondary accent - highlights, active preset
    pub secondary: Color,
    /// Selected module marker
    pub selected: Color,
    /// Disabled module text
    pub disabled: Color,
    /// Architecture tag text
    pub tag: Color,
    /// Cursor row background
    pub cursor_bg: Color,
    /// Cursor row foreground
    pub cursor_fg: Color,
    /// Error feedback
    pub error: Color,
    /// Active border color
    pub border_active: Color,
    /// Inactive/unfocused border color
    pub border_inactive: Color,
}

impl Palette {
    pub const DARK: Self = Self {
        bg: Color::Rgb(20, 20, 30),
        fg: Color::White,
        fg_muted: Color::Gray,
        primary: Color::Cyan,
        secondary: Color::Yellow,
        selected: Color::Green,
        disabled: Color::DarkGray,
        tag: Color::LightBlue,
        cursor_bg: Color::Rgb(40, 40, 60),
        cursor_fg: Color::White,
        error: Color::LightRed,
        border_active: Color::Cyan,
        border_inactive: Color::DarkGray,
    };

    pub const LIGHT: Self = Self {
        bg: Color::Rgb(250, 250, 252),
        fg: Color::Black,
        fg_muted: Color::DarkGray,
        primary: Color::Blue,
        secondary: Color::Magenta,
        selected: Color::Rgb(0, 130, 60),
        disabled: Color::Gray,
        tag: Color::Rgb(30, 80, 160),
        cursor_bg: Color::Rgb(215, 225, 245),
        cursor_fg: Color::Black,
        error: Color::Red,
        border_active: Color::Blue,
        border_inactive: Color::Gray,
    };

    // -------------------------------------------------------------------------
    // Pre-built styles
    // -------------------------------------------------------------------------

    pub fn base(&self) -> Style {
        Style::default().fg(self.fg).bg(self.bg)
    }

    pub fn text(&self) -> Style {
        Style::default().fg(self.fg)
    }

    pub fn text_muted(&self) -> Style {
        Style::default().fg(self.fg_muted)
    }

    /// Main title style (bold primary)
    pub fn title(&self) -> Style {
        Style::default()
            .fg(self.primary)
            .add_modifier(Modifier::BOLD)
    }

    /// Category header
    pub fn category(&self) -> Style {
        Style::default()
            .fg(self.secondary)
            .add_modifier(Modifier::BOLD)
    }

    pub fn selected(&self) -> Style {
        Style::default()
            .fg(self.selected)
            .add_modifier(Modifier::BOLD)
    }

    pub fn disabled(&self) -> Style {
        Style::default()
            .fg(self.disabled)
            .add_modifier(Modifier::DIM)
    }

    pub fn tag(&self) -> Style {
        Style::default().fg(self.tag)
    }

    pub fn cursor(&self) -> Style {
        Style::default()
            .fg(self.cursor_fg)
            .bg(self.cursor_bg)
            .add_modifier(Modifier::BOLD)
    }

    pub fn active_preset(&self) -> Style {
        Style::default()
            .fg(self.secondary)
            .add_modifier(Modifier::BOLD | Modifier::UNDERLINED)
    }

    pub fn error(&self) -> Style {
        Style::default()
            .fg(self.error)
            .add_modifier(Modifier::BOLD)
    }

    pub fn border(&self, focused: bool) -> Style {
        if focused {
            Style::default().fg(self.border_active)
        } else {
            Style::default().fg(self.border_inactive)
        }
    }
}

// =============================================================================
// PERSISTED FLAG
// =============================================================================

/// Reads and writes the stored theme flag.
#[derive(Debug, Clone)]
pub struct ThemeStore {
    path: PathBuf,
}

impl ThemeStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// `<config dir>/omniset/theme`, if the platform has a config directory.
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("omniset").join("theme"))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// The stored mode, if any. Unreadable or unknown values count as unset.
    pub fn load(&self) -> Option<ThemeMode> {
        let content = fs::read_to_string(&self.path).ok()?;
        match content.trim().parse::<ThemeMode>() {
            Ok(mode) => Some(mode),
            Err(_) => {
                warn!("Ignoring unknown theme flag '{}' in {:?}", content.trim(), self.path);
                None
            }
        }
    }

    pub fn save(&self, mode: ThemeMode) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&self.path, mode.to_string())?;
        debug!("Saved theme '{}' to {:?}", mode, self.path);
        Ok(())
    }

    /// Startup theme for this store and the given terminal hint.
    pub fn startup_mode(&self, colorfgbg: Option<&str>) -> ThemeMode {
        ThemeMode::resolve(self.load(), colorfgbg)
    }
}

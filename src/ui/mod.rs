//! User interface rendering module
//!
//! This module is organized into submodules:
//! - `header` - Title bar, search bar, summary bar and key hints
//! - `catalog` - Preset list, module list and details panel
//! - `output` - Output modal with the generated artifacts
//!
//! Rendering reads the [`View`](crate::view::View) held by the context and
//! never touches the catalog or selection directly.

mod catalog;
mod header;
mod output;

pub use catalog::{category_icon, preset_icon};

use crate::app::{AppMode, AppState};
use crate::components::help_overlay::HelpOverlay;
use crate::components::keybindings::KeybindingContext;
use crate::context::AppContext;
use ratatui::{
    layout::{Constraint, Direction, Layout},
    widgets::Block,
    Frame,
};

/// Smallest terminal the picker renders in.
pub const MIN_WIDTH: u16 = 60;
pub const MIN_HEIGHT: u16 = 20;

/// UI renderer for the application
#[derive(Debug, Default)]
pub struct UiRenderer;

impl UiRenderer {
    pub fn new() -> Self {
        Self
    }

    /// Render the complete UI
    pub fn render(
        &self,
        f: &mut Frame,
        ctx: &AppContext,
        state: &AppState,
        keybinding_ctx: &KeybindingContext,
    ) {
        let area = f.area();
        let palette = state.theme.palette();

        if area.width < MIN_WIDTH || area.height < MIN_HEIGHT {
            header::render_too_small(f, area, palette);
            return;
        }

        f.render_widget(Block::default().style(palette.base()), area);

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(2), // Header
                Constraint::Length(3), // Search
                Constraint::Min(6),    // Presets + modules
                Constraint::Length(5), // Details
                Constraint::Length(2), // Summary
                Constraint::Length(1), // Navigation bar
            ])
            .split(area);

        let body = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(32), Constraint::Percentage(68)])
            .split(chunks[2]);

        let view = ctx.view();
        header::render_header(f, state, chunks[0], palette);
        header::render_search_bar(f, ctx, state, chunks[1], palette);
        catalog::render_presets(f, view, state, body[0], palette);
        catalog::render_modules(f, view, state, &ctx.view_state().filter, body[1], palette);
        catalog::render_details(f, view, state, chunks[3], palette);
        header::render_summary(f, ctx, state, chunks[4], palette);
        header::render_nav_bar(f, state, keybinding_ctx, chunks[5], palette);

        if state.mode == AppMode::Output {
            if let Some(snapshot) = &state.output {
                output::render_output_modal(f, state, snapshot, area, palette);
            }
        }

        // Help overlay sits on top of everything
        if state.help_visible {
            HelpOverlay::new(&state.mode, keybinding_ctx, palette).render(f, area, palette);
        }
    }
}

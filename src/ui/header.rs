//! Header, search bar and footer rendering

use crate::app::{AppMode, AppState};
use crate::components::keybindings::KeybindingContext;
use crate::context::AppContext;
use crate::theme::Palette;
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

/// Title bar with the theme toggle hint.
pub fn render_header(f: &mut Frame, state: &AppState, area: Rect, palette: &Palette) {
    if area.width == 0 || area.height == 0 {
        return;
    }

    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Min(10), Constraint::Length(16)])
        .split(area);

    let title = Paragraph::new(Line::from(vec![
        Span::styled(" ⚡ OmniSet ", palette.title()),
        Span::styled("Build your setup, one module at a time", palette.text_muted()),
    ]))
    .block(
        Block::default()
            .borders(Borders::BOTTOM)
            .border_style(palette.border(false)),
    );
    f.render_widget(title, chunks[0]);

    let toggle = Paragraph::new(Line::from(vec![
        Span::styled("[t] ", palette.text_muted()),
        Span::styled(state.theme.toggle_icon(), palette.text()),
        Span::styled(format!(" {}", state.theme.toggled()), palette.text_muted()),
    ]))
    .alignment(Alignment::Right)
    .block(
        Block::default()
            .borders(Borders::BOTTOM)
            .border_style(palette.border(false)),
    );
    f.render_widget(toggle, chunks[1]);
}

/// Search input. Shows the live input while typing, else the applied filter.
pub fn render_search_bar(
    f: &mut Frame,
    ctx: &AppContext,
    state: &AppState,
    area: Rect,
    palette: &Palette,
) {
    if area.width == 0 || area.height == 0 {
        return;
    }

    let editing = state.mode == AppMode::Search;
    let line = if editing {
        Line::from(vec![
            Span::styled("🔍 ", palette.text()),
            Span::styled(state.search_input.clone(), palette.text()),
            Span::styled("▏", palette.title()),
        ])
    } else if ctx.view_state().filter.trim().is_empty() {
        Line::from(Span::styled(
            "🔍 Press / to search modules...",
            palette.text_muted(),
        ))
    } else {
        Line::from(vec![
            Span::styled("🔍 ", palette.text()),
            Span::styled(ctx.view_state().filter.clone(), palette.category()),
        ])
    };

    let search = Paragraph::new(line).block(
        Block::default()
            .borders(Borders::ALL)
            .title(" Search ")
            .border_style(palette.border(editing)),
    );
    f.render_widget(search, area);
}

/// Summary bar: selection count, total size, status and action hints.
pub fn render_summary(
    f: &mut Frame,
    ctx: &AppContext,
    state: &AppState,
    area: Rect,
    palette: &Palette,
) {
    if area.width == 0 || area.height == 0 {
        return;
    }

    let summary = &ctx.view().summary;
    let action_style = if summary.actions_enabled {
        palette.selected()
    } else {
        palette.disabled()
    };

    let line = Line::from(vec![
        Span::styled(format!(" {} ", summary.count), palette.title()),
        Span::styled("modules selected", palette.text()),
        Span::styled("  ·  ", palette.text_muted()),
        Span::styled(format!("{}", summary.total_size_mb), palette.title()),
        Span::styled(" MB", palette.text()),
        Span::styled("   [g] Generate", action_style),
        Span::styled("  [c] Clear", action_style),
        Span::styled(format!("   {}", state.status_message), palette.text_muted()),
    ]);

    let bar = Paragraph::new(line).block(
        Block::default()
            .borders(Borders::TOP)
            .border_style(palette.border(false)),
    );
    f.render_widget(bar, area);
}

/// Key hints for the current mode.
pub fn render_nav_bar(
    f: &mut Frame,
    state: &AppState,
    keybinding_ctx: &KeybindingContext,
    area: Rect,
    palette: &Palette,
) {
    if area.width == 0 || area.height == 0 {
        return;
    }

    let mut spans = Vec::new();
    for item in keybinding_ctx.get_nav_items(&state.mode) {
        spans.push(Span::styled(format!(" {} ", item.key_display), palette.cursor()));
        spans.push(Span::styled(format!(" {}  ", item.action_label), palette.text_muted()));
    }

    f.render_widget(Paragraph::new(Line::from(spans)), area);
}

/// Shown instead of the picker when the terminal cannot fit it.
pub fn render_too_small(f: &mut Frame, area: Rect, palette: &Palette) {
    let message = Paragraph::new(vec![
        Line::from(Span::styled("Terminal too small", palette.error())),
        Line::from(Span::styled(
            format!("Need at least {}x{}", super::MIN_WIDTH, super::MIN_HEIGHT),
            palette.text_muted(),
        )),
    ])
    .alignment(Alignment::Center)
    .style(palette.base());
    f.render_widget(message, area);
}

//! Output modal: install command, config document and share link

use crate::app::{AppState, OutputSnapshot};
use crate::components::centered_rect;
use crate::output::{OutputKind, CONFIG_FILE_NAME};
use crate::theme::Palette;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Tabs, Wrap},
    Frame,
};
use strum::IntoEnumIterator;

fn tab_title(kind: OutputKind) -> &'static str {
    match kind {
        OutputKind::Command => "Install Command",
        OutputKind::Config => "Config File",
        OutputKind::Share => "Share Link",
    }
}

pub fn render_output_modal(
    f: &mut Frame,
    state: &AppState,
    snapshot: &OutputSnapshot,
    parent: Rect,
    palette: &Palette,
) {
    if parent.width == 0 || parent.height == 0 {
        return;
    }

    let area = centered_rect(80, 70, 40, 12, parent);
    f.render_widget(Clear, area);

    let block = Block::default()
        .borders(Borders::ALL)
        .title(" Your Setup ")
        .border_style(palette.border(true))
        .style(palette.base());
    let inner = block.inner(area);
    f.render_widget(block, area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(2), // Tabs
            Constraint::Min(3),    // Content
            Constraint::Length(1), // Hint
        ])
        .split(inner);

    let kinds: Vec<OutputKind> = OutputKind::iter().collect();
    let selected = kinds.iter().position(|k| *k == state.output_tab).unwrap_or(0);
    let tabs = Tabs::new(kinds.iter().map(|k| tab_title(*k)))
        .select(selected)
        .style(palette.text_muted())
        .highlight_style(palette.title())
        .block(
            Block::default()
                .borders(Borders::BOTTOM)
                .border_style(palette.border(false)),
        );
    f.render_widget(tabs, chunks[0]);

    let content: Vec<Line> = snapshot
        .get(state.output_tab)
        .lines()
        .map(|line| Line::from(Span::styled(line.to_string(), palette.text())))
        .collect();
    f.render_widget(Paragraph::new(content).wrap(Wrap { trim: false }), chunks[1]);

    let hint = match state.output_tab {
        OutputKind::Command => "Run this in a terminal on the target machine".to_string(),
        OutputKind::Config => format!("Press d to save as {}", CONFIG_FILE_NAME),
        OutputKind::Share => "Anyone opening this link gets the same selection".to_string(),
    };
    f.render_widget(
        Paragraph::new(Line::from(Span::styled(hint, palette.text_muted()))),
        chunks[2],
    );
}

//! Help overlay component
//!
//! Displays context-sensitive help in a floating window.

use super::centered_rect;
use super::keybindings::{HelpSection, KeybindingContext};
use crate::app::AppMode;
use crate::theme::Palette;
use ratatui::{
    layout::Rect,
    style::Modifier,
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

/// Help overlay component
pub struct HelpOverlay {
    content: Vec<Line<'static>>,
}

impl HelpOverlay {
    /// Create a new help overlay for the given mode
    pub fn new(mode: &AppMode, keybinding_ctx: &KeybindingContext, palette: &Palette) -> Self {
        let sections = keybinding_ctx.get_help_content(mode);
        Self {
            content: Self::build_content(&sections, mode, palette),
        }
    }

    /// Build the help content from sections
    fn build_content(
        sections: &[HelpSection],
        mode: &AppMode,
        palette: &Palette,
    ) -> Vec<Line<'static>> {
        let mut lines: Vec<Line<'static>> = Vec::new();

        lines.push(Line::from(Span::styled(
            "  OmniSet Module Picker Help  ",
            palette.title(),
        )));
        lines.push(Line::from(""));

        let mode_name = match mode {
            AppMode::Browse => "Browsing",
            AppMode::Search => "Search",
            AppMode::Output => "Output",
        };
        lines.push(Line::from(vec![
            Span::styled("Current: ", palette.text_muted()),
            Span::styled(mode_name.to_string(), palette.category()),
        ]));
        lines.push(Line::from(""));

        for section in sections {
            lines.push(Line::from(Span::styled(
                format!("  {}  ", section.title),
                palette.selected(),
            )));

            for (key, description) in &section.items {
                lines.push(Line::from(vec![
                    Span::raw("    "),
                    Span::styled(
                        format!("{:<10}", key),
                        palette.text().add_modifier(Modifier::BOLD),
                    ),
                    Span::styled(description.clone(), palette.text()),
                ]));
            }
            lines.push(Line::from(""));
        }

        lines.push(Line::from(Span::styled(
            "Press ? or Esc to close",
            palette.text_muted(),
        )));

        lines
    }

    pub fn line_count(&self) -> usize {
        self.content.len()
    }

    /// Render the help overlay
    pub fn render(&self, f: &mut Frame, parent: Rect, palette: &Palette) {
        if parent.width == 0 || parent.height == 0 {
            return;
        }

        let area = centered_rect(60, 70, 50, 15, parent);
        let help = Paragraph::new(self.content.clone())
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .title(" Help ")
                    .border_style(palette.border(true)),
            )
            .style(palette.base())
            .wrap(Wrap { trim: false });

        f.render_widget(Clear, area);
        f.render_widget(help, area);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::theme::ThemeMode;

    #[test]
    fn test_help_content_lists_bindings() {
        let ctx = KeybindingContext::new();
        let overlay = HelpOverlay::new(&AppMode::Browse, &ctx, ThemeMode::Dark.palette());
        let text: String = overlay
            .content
            .iter()
            .flat_map(|line| line.spans.iter().map(|s| s.content.to_string()))
            .collect();
        assert!(text.contains("Browsing"));
        assert!(text.contains("Clear selection"));
        assert!(text.contains("Toggle theme"));
    }

    #[test]
    fn test_output_help_is_shorter() {
        let ctx = KeybindingContext::new();
        let palette = ThemeMode::Light.palette();
        let browse = HelpOverlay::new(&AppMode::Browse, &ctx, palette);
        let output = HelpOverlay::new(&AppMode::Output, &ctx, palette);
        assert!(output.line_count() < browse.line_count());
    }
}

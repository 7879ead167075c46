//! Preset, category and module list rendering

use crate::app::{AppState, Focus};
use crate::theme::Palette;
use crate::view::{Row, View};
use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph, Wrap},
    Frame,
};

/// Glyph for a preset's `icon` key.
pub fn preset_icon(icon: &str) -> &'static str {
    match icon {
        "code" => "💻",
        "server" => "🖥️",
        "palette" => "🎨",
        "box" => "📦",
        _ => "🚀",
    }
}

/// Glyph for a category id.
pub fn category_icon(category_id: &str) -> &'static str {
    match category_id {
        "cli" => "💻",
        "development" => "🔧",
        "browsers" => "🌐",
        "communication" => "💬",
        "creative" => "🎨",
        "media" => "▶️",
        "databases" => "🗄️",
        "gaming" => "🎮",
        "system" => "⚙️",
        _ => "📁",
    }
}

pub fn render_presets(f: &mut Frame, view: &View, state: &AppState, area: Rect, palette: &Palette) {
    if area.width == 0 || area.height == 0 {
        return;
    }

    let focused = state.focus == Focus::Presets;
    let items: Vec<ListItem> = view
        .presets
        .iter()
        .map(|preset| {
            let name_style = if preset.active {
                palette.active_preset()
            } else {
                palette.text()
            };
            ListItem::new(vec![
                Line::from(vec![
                    Span::raw(format!("{} ", preset_icon(&preset.icon))),
                    Span::styled(preset.name.clone(), name_style),
                    Span::styled(format!(" ({})", preset.module_count), palette.text_muted()),
                ]),
                Line::from(Span::styled(
                    format!("   {}", preset.description),
                    palette.text_muted(),
                )),
            ])
        })
        .collect();

    let list = List::new(items)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(" Quick Start ")
                .border_style(palette.border(focused)),
        )
        .highlight_style(palette.cursor());

    let mut list_state = ListState::default();
    if focused && !view.presets.is_empty() {
        list_state.select(Some(state.preset_cursor));
    }
    f.render_stateful_widget(list, area, &mut list_state);
}

pub fn render_modules(
    f: &mut Frame,
    view: &View,
    state: &AppState,
    filter: &str,
    area: Rect,
    palette: &Palette,
) {
    if area.width == 0 || area.height == 0 {
        return;
    }

    let focused = state.focus == Focus::Modules;
    let block = Block::default()
        .borders(Borders::ALL)
        .title(" Modules ")
        .border_style(palette.border(focused));

    if view.categories.is_empty() {
        let empty = Paragraph::new(Line::from(Span::styled(
            format!("No modules match '{}'", filter.trim()),
            palette.text_muted(),
        )))
        .block(block);
        f.render_widget(empty, area);
        return;
    }

    let rows = view.rows();
    let items: Vec<ListItem> = rows
        .iter()
        .filter_map(|&row| row_item(view, row, palette))
        .collect();

    let list = List::new(items)
        .block(block)
        .highlight_style(palette.cursor());

    let mut list_state = ListState::default();
    if focused && !rows.is_empty() {
        list_state.select(Some(state.module_cursor));
    }
    f.render_stateful_widget(list, area, &mut list_state);
}

fn row_item(view: &View, row: Row, palette: &Palette) -> Option<ListItem<'static>> {
    match row {
        Row::Category(idx) => {
            let category = view.categories.get(idx)?;
            let marker = if category.collapsed { "▸" } else { "▾" };
            Some(ListItem::new(Line::from(vec![
                Span::styled(format!("{} ", marker), palette.text_muted()),
                Span::raw(format!("{} ", category_icon(&category.id))),
                Span::styled(category.name.clone(), palette.category()),
                Span::styled(
                    format!("  {}/{}", category.selected_count, category.module_count),
                    palette.text_muted(),
                ),
            ])))
        }
        Row::Module(..) => {
            let module = view.module_at(row)?;
            let (check, name_style) = if module.disabled {
                ("[-]", palette.disabled())
            } else if module.selected {
                ("[x]", palette.selected())
            } else {
                ("[ ]", palette.text())
            };

            let mut spans = vec![
                Span::raw("    "),
                Span::styled(format!("{} ", check), name_style),
                Span::styled(module.name.clone(), name_style),
                Span::styled(format!("  {}", module.size_label), palette.text_muted()),
            ];
            for arch in &module.arch {
                spans.push(Span::styled(format!(" {}", arch), palette.tag()));
            }
            Some(ListItem::new(Line::from(spans)))
        }
    }
}

/// Details of whatever sits under the cursor.
pub fn render_details(f: &mut Frame, view: &View, state: &AppState, area: Rect, palette: &Palette) {
    if area.width == 0 || area.height == 0 {
        return;
    }

    let lines: Vec<Line> = match state.focus {
        Focus::Presets => match view.presets.get(state.preset_cursor) {
            Some(preset) => vec![
                Line::from(Span::styled(preset.name.clone(), palette.title())),
                Line::from(Span::styled(preset.description.clone(), palette.text())),
                Line::from(Span::styled(
                    format!("Replaces the selection with {} modules", preset.module_count),
                    palette.text_muted(),
                )),
            ],
            None => vec![Line::from(Span::styled("No presets", palette.text_muted()))],
        },
        Focus::Modules => {
            let row = view.rows().get(state.module_cursor).copied();
            match row {
                Some(row @ Row::Module(..)) => match view.module_at(row) {
                    Some(module) => {
                        let mut lines = vec![
                            Line::from(vec![
                                Span::styled(module.name.clone(), palette.title()),
                                Span::styled(format!("  {}", module.id), palette.text_muted()),
                            ]),
                            Line::from(Span::styled(module.description.clone(), palette.text())),
                        ];
                        if !module.requires.is_empty() {
                            lines.push(Line::from(vec![
                                Span::styled("Requires: ", palette.text_muted()),
                                Span::styled(module.requires.join(", "), palette.tag()),
                            ]));
                        }
                        lines
                    }
                    None => Vec::new(),
                },
                Some(row @ Row::Category(_)) => match view.category_at(row) {
                    Some(category) => vec![
                        Line::from(Span::styled(category.name.clone(), palette.category())),
                        Line::from(Span::styled(
                            format!(
                                "{} of {} selected · Enter to {}",
                                category.selected_count,
                                category.module_count,
                                if category.collapsed { "expand" } else { "collapse" }
                            ),
                            palette.text_muted(),
                        )),
                    ],
                    None => Vec::new(),
                },
                None => Vec::new(),
            }
        }
    };

    let details = Paragraph::new(lines)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(" Details ")
                .border_style(palette.border(false)),
        )
        .wrap(Wrap { trim: true });
    f.render_widget(details, area);
}

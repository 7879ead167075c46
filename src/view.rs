//! View model
//!
//! A pure projection from (catalog, selection, presentation state) to a
//! description of what the picker shows. The terminal UI draws this
//! description; it never reads the catalog or the selection directly.
//!
//! # Search
//!
//! The query is trimmed and lower-cased. A module matches when its
//! lower-cased name or description contains the query, or when one of its
//! tags contains it. Categories without a matching module are hidden.

use crate::catalog::{Catalog, Module};
use crate::selection::SelectionStore;
use std::collections::HashSet;

/// Presentation state that is not part of the selection.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ViewState {
    /// Current search query, as typed
    pub filter: String,
    /// Ids of collapsed categories
    pub collapsed: HashSet<String>,
    /// Preset applied most recently (cleared by "clear")
    pub active_preset: Option<String>,
}

impl ViewState {
    pub fn toggle_category(&mut self, category_id: &str) {
        if !self.collapsed.remove(category_id) {
            self.collapsed.insert(category_id.to_string());
        }
    }

    pub fn is_collapsed(&self, category_id: &str) -> bool {
        self.collapsed.contains(category_id)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct PresetCard {
    pub id: String,
    pub name: String,
    pub description: String,
    pub icon: String,
    pub module_count: usize,
    pub active: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ModuleCard {
    pub id: String,
    pub name: String,
    pub description: String,
    pub arch: Vec<String>,
    /// e.g. `120MB`
    pub size_label: String,
    pub requires: Vec<String>,
    pub selected: bool,
    pub disabled: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CategoryView {
    pub id: String,
    pub name: String,
    /// Total modules in the category, independent of the filter
    pub module_count: usize,
    pub selected_count: usize,
    pub collapsed: bool,
    /// Modules matching the filter
    pub modules: Vec<ModuleCard>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Summary {
    pub count: usize,
    pub total_size_mb: f64,
    /// Generate and clear are only offered for a non-empty selection
    pub actions_enabled: bool,
}

/// One line of the module list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Row {
    /// Index into [`View::categories`]
    Category(usize),
    /// Category index and module index within it
    Module(usize, usize),
}

/// Everything the picker displays.
#[derive(Debug, Clone, PartialEq)]
pub struct View {
    pub presets: Vec<PresetCard>,
    pub categories: Vec<CategoryView>,
    pub summary: Summary,
}

impl View {
    /// Visible list rows: each category header followed by its modules
    /// unless the category is collapsed.
    pub fn rows(&self) -> Vec<Row> {
        let mut rows = Vec::new();
        for (cat_idx, category) in self.categories.iter().enumerate() {
            rows.push(Row::Category(cat_idx));
            if !category.collapsed {
                rows.extend((0..category.modules.len()).map(|m| Row::Module(cat_idx, m)));
            }
        }
        rows
    }

    pub fn module_at(&self, row: Row) -> Option<&ModuleCard> {
        match row {
            Row::Module(cat, module) => self.categories.get(cat)?.modules.get(module),
            Row::Category(_) => None,
        }
    }

    pub fn category_at(&self, row: Row) -> Option<&CategoryView> {
        match row {
            Row::Category(cat) | Row::Module(cat, _) => self.categories.get(cat),
        }
    }

    /// Find the row showing module `id`.
    pub fn find_module_row(&self, id: &str) -> Option<usize> {
        self.rows()
            .iter()
            .position(|&row| self.module_at(row).is_some_and(|m| m.id == id))
    }
}

/// Whether `module` matches an already normalized query.
pub fn matches_query(module: &Module, query: &str) -> bool {
    if query.is_empty() {
        return true;
    }
    module.name.to_lowercase().contains(query)
        || module.description.to_lowercase().contains(query)
        || module.tags.iter().any(|t| t.contains(query))
}

/// Normalize a raw search query.
pub fn normalize_query(query: &str) -> String {
    query.trim().to_lowercase()
}

/// Project the store and presentation state into a [`View`].
pub fn render(store: &SelectionStore, state: &ViewState) -> View {
    let catalog: &Catalog = store.catalog();
    let query = normalize_query(&state.filter);

    let presets = catalog
        .presets()
        .iter()
        .map(|preset| PresetCard {
            id: preset.id.clone(),
            name: preset.name.clone(),
            description: preset.description.clone(),
            icon: preset.icon.clone(),
            module_count: preset.modules.len(),
            active: state.active_preset.as_deref() == Some(preset.id.as_str()),
        })
        .collect();

    let categories = catalog
        .categories()
        .iter()
        .filter_map(|category| {
            let modules: Vec<ModuleCard> = category
                .modules
                .iter()
                .filter(|m| matches_query(m, &query))
                .map(|m| module_card(store, m))
                .collect();

            if modules.is_empty() {
                return None;
            }

            Some(CategoryView {
                id: category.id.clone(),
                name: category.name.clone(),
                module_count: category.modules.len(),
                selected_count: category
                    .modules
                    .iter()
                    .filter(|m| store.is_selected(&m.id))
                    .count(),
                collapsed: state.is_collapsed(&category.id),
                modules,
            })
        })
        .collect();

    let count = store.count();
    View {
        presets,
        categories,
        summary: Summary {
            count,
            total_size_mb: store.total_size(),
            actions_enabled: count > 0,
        },
    }
}

fn module_card(store: &SelectionStore, module: &Module) -> ModuleCard {
    ModuleCard {
        id: module.id.clone(),
        name: module.name.clone(),
        description: module.description.clone(),
        arch: module.arch.clone(),
        size_label: format!("{}MB", module.size_mb),
        requires: module.requires.clone(),
        selected: store.is_selected(&module.id),
        disabled: store.is_disabled(module),
    }
}

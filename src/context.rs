//! Application context
//!
//! Owns the catalog, the selection store, the location and the presentation
//! state for one session. Every mutating operation follows the same order:
//!
//! ```text
//! mutate selection -> rebuild view -> write location
//! ```
//!
//! so the displayed state and the URL never lag the selection.

use crate::catalog::Catalog;
use crate::output::OutputGenerator;
use crate::selection::SelectionStore;
use crate::url_sync::{self, Location, MemoryLocation};
use crate::view::{self, View, ViewState};
use std::sync::Arc;
use tracing::{debug, info};

/// Session state shared by the CLI and the interactive picker.
pub struct AppContext {
    store: SelectionStore,
    location: Box<dyn Location>,
    output: OutputGenerator,
    view_state: ViewState,
    view: View,
}

impl AppContext {
    /// Build a context and restore the selection from `location`.
    pub fn new(catalog: Catalog, location: Box<dyn Location>, output: OutputGenerator) -> Self {
        let store = SelectionStore::new(Arc::new(catalog));
        let view_state = ViewState::default();
        let view = view::render(&store, &view_state);
        let mut ctx = Self {
            store,
            location,
            output,
            view_state,
            view,
        };
        ctx.restore_from_location();
        ctx
    }

    /// Context over an in-memory location rooted at the generator's builder page.
    pub fn in_memory(catalog: Catalog, output: OutputGenerator) -> crate::Result<Self> {
        let location = MemoryLocation::parse(&format!("{}/builder", output.base_url()))?;
        Ok(Self::new(catalog, Box::new(location), output))
    }

    fn restore_from_location(&mut self) {
        let catalog = self.store.shared_catalog();
        let added = url_sync::deserialize(
            self.location.as_ref(),
            &catalog,
            self.store.selection_mut(),
        );
        if added > 0 {
            info!("Restored {} modules from location", added);
        }
        self.refresh();
    }

    /// Rebuild the view model from current state.
    fn refresh(&mut self) {
        self.view = view::render(&self.store, &self.view_state);
    }

    fn persist(&mut self) {
        url_sync::serialize(self.store.selection(), self.location.as_mut());
    }

    /// Toggle a module. Returns the ids whose state changed.
    pub fn toggle(&mut self, module_id: &str) -> Vec<String> {
        let changed = self.store.toggle(module_id);
        if changed.is_empty() {
            return changed;
        }
        self.refresh();
        self.persist();
        changed
    }

    /// Select a module and its requirements without deselecting anything.
    pub fn select(&mut self, module_id: &str) -> Vec<String> {
        let changed = self.store.select(module_id);
        if changed.is_empty() {
            return changed;
        }
        self.refresh();
        self.persist();
        changed
    }

    /// Apply a preset. Unknown presets change nothing.
    pub fn apply_preset(&mut self, preset_id: &str) -> bool {
        if !self.store.apply_preset(preset_id) {
            return false;
        }
        self.view_state.active_preset = Some(preset_id.to_string());
        self.refresh();
        self.persist();
        true
    }

    pub fn clear(&mut self) {
        self.store.clear();
        self.view_state.active_preset = None;
        self.refresh();
        self.persist();
    }

    /// Update the search query.
    pub fn set_filter(&mut self, query: &str) {
        if self.view_state.filter == query {
            return;
        }
        debug!("Filter set to '{}'", query);
        self.view_state.filter = query.to_string();
        self.refresh();
    }

    pub fn toggle_category(&mut self, category_id: &str) {
        self.view_state.toggle_category(category_id);
        self.refresh();
    }

    pub fn view(&self) -> &View {
        &self.view
    }

    pub fn view_state(&self) -> &ViewState {
        &self.view_state
    }

    pub fn store(&self) -> &SelectionStore {
        &self.store
    }

    pub fn catalog(&self) -> &Catalog {
        self.store.catalog()
    }

    pub fn location(&self) -> url::Url {
        self.location.href()
    }

    pub fn install_command(&self) -> String {
        self.output.install_command(self.store.selection())
    }

    pub fn config_document(&self) -> String {
        self.output.config_document(self.store.selection())
    }

    pub fn share_url(&self) -> String {
        self.output.share_url(self.store.selection())
    }

    pub fn output(&self) -> &OutputGenerator {
        &self.output
    }
}

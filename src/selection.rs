//! Selection state
//!
//! Holds the set of chosen module ids and the operations that change it.
//!
//! # Dependency Handling
//!
//! Selecting a module also selects every module listed in its `requires`
//! field that is not already selected. This is a single-level lookup:
//!
//! - A required module's own requirements are NOT pulled in.
//! - Deselecting a module never removes what it pulled in.
//! - There is no reference counting between dependents.
//!
//! # Stale Identifiers
//!
//! Presets are applied verbatim, so the selection may hold ids the catalog
//! does not know. Such ids are skipped by [`SelectionStore::total_size`] and
//! by rendering.

use crate::catalog::{Catalog, Module};
use std::collections::HashMap;
use std::sync::Arc;
use tracing::debug;

/// Per-module options. Reserved for future per-module configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ModuleOptions {}

/// Ordered mapping from module id to its options.
///
/// Keys are unique; iteration follows insertion order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selection {
    order: Vec<String>,
    options: HashMap<String, ModuleOptions>,
}

impl Selection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert `id` with empty options. Returns false if it was already present.
    pub fn insert(&mut self, id: &str) -> bool {
        if self.options.contains_key(id) {
            return false;
        }
        self.options.insert(id.to_string(), ModuleOptions::default());
        self.order.push(id.to_string());
        true
    }

    /// Remove `id`. Returns false if it was not present.
    pub fn remove(&mut self, id: &str) -> bool {
        if self.options.remove(id).is_none() {
            return false;
        }
        self.order.retain(|existing| existing != id);
        true
    }

    pub fn contains(&self, id: &str) -> bool {
        self.options.contains_key(id)
    }

    pub fn options(&self, id: &str) -> Option<&ModuleOptions> {
        self.options.get(id)
    }

    pub fn clear(&mut self) {
        self.order.clear();
        self.options.clear();
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Selected ids in insertion order.
    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.order.iter().map(String::as_str)
    }

    /// Selected ids joined with `,`.
    pub fn to_csv(&self) -> String {
        self.order.join(",")
    }
}

/// Decides whether a module may be selected.
///
/// Architecture compatibility is not checked yet; implementors can hook
/// host detection in here.
pub trait ModulePolicy {
    fn is_disabled(&self, module: &Module) -> bool;
}

/// Allows every module regardless of its `arch` list.
#[derive(Debug, Clone, Copy, Default)]
pub struct AnyArchitecture;

impl ModulePolicy for AnyArchitecture {
    fn is_disabled(&self, _module: &Module) -> bool {
        false
    }
}

/// Owns the selection and applies catalog-aware operations to it.
pub struct SelectionStore {
    catalog: Arc<Catalog>,
    policy: Box<dyn ModulePolicy>,
    selection: Selection,
}

impl std::fmt::Debug for SelectionStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SelectionStore")
            .field("selection", &self.selection)
            .finish_non_exhaustive()
    }
}

impl SelectionStore {
    /// Create an empty store using the [`AnyArchitecture`] policy.
    pub fn new(catalog: Arc<Catalog>) -> Self {
        Self::with_policy(catalog, Box::new(AnyArchitecture))
    }

    pub fn with_policy(catalog: Arc<Catalog>, policy: Box<dyn ModulePolicy>) -> Self {
        Self {
            catalog,
            policy,
            selection: Selection::new(),
        }
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// A shared handle to the catalog.
    pub fn shared_catalog(&self) -> Arc<Catalog> {
        Arc::clone(&self.catalog)
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    pub(crate) fn selection_mut(&mut self) -> &mut Selection {
        &mut self.selection
    }

    pub fn is_selected(&self, id: &str) -> bool {
        self.selection.contains(id)
    }

    pub fn is_disabled(&self, module: &Module) -> bool {
        self.policy.is_disabled(module)
    }

    /// Select or deselect a module.
    ///
    /// Returns the ids whose selected state changed, so views of those
    /// modules can be refreshed. Unknown or disabled modules change nothing
    /// and yield an empty list.
    pub fn toggle(&mut self, id: &str) -> Vec<String> {
        let Some(module) = self.catalog.module(id) else {
            debug!("Ignoring toggle of unknown module '{}'", id);
            return Vec::new();
        };
        if self.policy.is_disabled(module) {
            debug!("Ignoring toggle of disabled module '{}'", id);
            return Vec::new();
        }

        if self.selection.remove(id) {
            debug!("Deselected '{}'", id);
            return vec![id.to_string()];
        }

        self.select(id)
    }

    /// Select a module and its requirements, never deselecting anything.
    ///
    /// Returns the ids that were newly selected. Requirements missing from
    /// the selection are added even when the module itself was already
    /// selected.
    pub fn select(&mut self, id: &str) -> Vec<String> {
        let Some(module) = self.catalog.module(id) else {
            debug!("Ignoring selection of unknown module '{}'", id);
            return Vec::new();
        };
        if self.policy.is_disabled(module) {
            debug!("Ignoring selection of disabled module '{}'", id);
            return Vec::new();
        }

        let mut changed = Vec::new();
        if self.selection.insert(id) {
            debug!("Selected '{}'", id);
            changed.push(id.to_string());
        }
        for dep in &module.requires {
            if self.selection.insert(dep) {
                debug!("Auto-selected '{}' required by '{}'", dep, id);
                changed.push(dep.clone());
            }
        }

        changed
    }

    /// Replace the selection with exactly the preset's module list.
    ///
    /// Returns false (and leaves the selection alone) for an unknown preset.
    pub fn apply_preset(&mut self, preset_id: &str) -> bool {
        let Some(preset) = self.catalog.preset(preset_id) else {
            debug!("Ignoring unknown preset '{}'", preset_id);
            return false;
        };

        self.selection.clear();
        for id in &preset.modules {
            self.selection.insert(id);
        }
        debug!(
            "Applied preset '{}' ({} modules)",
            preset_id,
            self.selection.len()
        );
        true
    }

    pub fn clear(&mut self) {
        self.selection.clear();
    }

    pub fn count(&self) -> usize {
        self.selection.len()
    }

    /// Sum of `size_mb` over selected modules still present in the catalog.
    pub fn total_size(&self) -> f64 {
        self.selection
            .ids()
            .filter_map(|id| self.catalog.module(id))
            .map(|m| m.size_mb)
            .sum()
    }
}

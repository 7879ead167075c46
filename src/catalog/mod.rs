//! Module catalog
//!
//! The catalog is the read-only set of categories, modules and presets the
//! picker offers. It is loaded once at startup (see [`loader`]) and shared
//! behind an `Arc` for the rest of the session.
//!
//! # Document Shape
//!
//! ```json
//! {
//!   "categories": [
//!     { "id": "cli", "name": "CLI", "modules": [
//!       { "id": "git", "name": "Git", "description": "...",
//!         "arch": ["x86_64"], "size_mb": 5, "requires": [], "tags": [] }
//!     ]}
//!   ],
//!   "presets": [
//!     { "id": "dev", "name": "Developer", "description": "...",
//!       "icon": "code", "modules": ["git"] }
//!   ]
//! }
//! ```

pub mod loader;

pub use loader::{CatalogSource, load, parse};

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// A single installable module.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Module {
    pub id: String,
    pub name: String,
    pub description: String,
    /// Owning category, assigned while the catalog is flattened.
    #[serde(skip)]
    pub category_id: String,
    /// Supported architecture tags (display only).
    #[serde(default)]
    pub arch: Vec<String>,
    pub size_mb: f64,
    /// Modules pulled in when this one is selected (one level, no recursion).
    #[serde(default)]
    pub requires: Vec<String>,
    /// Extra search terms.
    #[serde(default)]
    pub tags: Vec<String>,
}

/// A named group of modules shown together.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Category {
    pub id: String,
    pub name: String,
    pub modules: Vec<Module>,
}

/// A fixed set of modules applied in one action.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Preset {
    pub id: String,
    pub name: String,
    pub description: String,
    #[serde(default)]
    pub icon: String,
    /// Module ids, not validated against the catalog.
    pub modules: Vec<String>,
}

/// Raw catalog document as served.
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct CatalogDocument {
    pub categories: Vec<Category>,
    #[serde(default)]
    pub presets: Vec<Preset>,
}

/// The complete, read-only catalog with a flattened module lookup.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    categories: Vec<Category>,
    presets: Vec<Preset>,
    /// module id -> (category index, module index)
    lookup: HashMap<String, (usize, usize)>,
}

impl Catalog {
    /// Build a catalog from categories and presets, tagging every module
    /// with its owning category and indexing it by id.
    ///
    /// When the same module id appears more than once, the first occurrence
    /// is the one returned by [`Catalog::module`].
    pub fn new(mut categories: Vec<Category>, presets: Vec<Preset>) -> Self {
        let mut lookup = HashMap::new();

        for (cat_idx, category) in categories.iter_mut().enumerate() {
            for (mod_idx, module) in category.modules.iter_mut().enumerate() {
                module.category_id = category.id.clone();
                if lookup.contains_key(&module.id) {
                    tracing::warn!(
                        module = %module.id,
                        category = %category.id,
                        "Duplicate module id in catalog, keeping first occurrence"
                    );
                    continue;
                }
                lookup.insert(module.id.clone(), (cat_idx, mod_idx));
            }
        }

        Self {
            categories,
            presets,
            lookup,
        }
    }

    /// Look up a module by id.
    pub fn module(&self, id: &str) -> Option<&Module> {
        self.lookup
            .get(id)
            .map(|&(cat, module)| &self.categories[cat].modules[module])
    }

    pub fn contains(&self, id: &str) -> bool {
        self.lookup.contains_key(id)
    }

    pub fn preset(&self, id: &str) -> Option<&Preset> {
        self.presets.iter().find(|p| p.id == id)
    }

    pub fn category(&self, id: &str) -> Option<&Category> {
        self.categories.iter().find(|c| c.id == id)
    }

    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    pub fn presets(&self) -> &[Preset] {
        &self.presets
    }

    /// All modules in category order.
    pub fn modules(&self) -> impl Iterator<Item = &Module> {
        self.categories.iter().flat_map(|c| c.modules.iter())
    }

    /// Number of distinct module ids.
    pub fn module_count(&self) -> usize {
        self.lookup.len()
    }

    /// An empty catalog offers nothing to select.
    pub fn is_empty(&self) -> bool {
        self.lookup.is_empty()
    }
}

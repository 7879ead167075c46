//! OmniSet module picker library
//!
//! This library provides the catalog model, selection state, URL
//! synchronisation and artifact generation behind the `omniset` picker, plus
//! the terminal UI built on top of them.

pub mod app;
pub mod catalog;
pub mod cli;
pub mod components;
pub mod config;
pub mod context;
pub mod error;
pub mod output;
pub mod selection;
pub mod theme;
pub mod ui;
pub mod url_sync;
pub mod view;

// Re-export main types for convenience
pub use catalog::{Catalog, CatalogSource, Category, Module, Preset};
pub use context::AppContext;
pub use error::{OmniSetError, Result};
pub use output::{OutputGenerator, OutputKind};
pub use selection::{AnyArchitecture, ModuleOptions, ModulePolicy, Selection, SelectionStore};
pub use theme::{ThemeMode, ThemeStore};
pub use url_sync::{Location, MemoryLocation};
pub use view::{View, ViewState};

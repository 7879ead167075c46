//! Tests for the shipped catalog and catalog loading
//!
//! These tests verify:
//! - data/modules.json parses and is internally consistent
//! - Load failures surface as errors, never as a partial catalog

use omniset::catalog::{self, CatalogSource};
use omniset::view::{self, ViewState};
use omniset::{OmniSetError, SelectionStore};
use pretty_assertions::assert_eq;
use std::collections::HashSet;
use std::io::Write;
use std::path::PathBuf;
use std::sync::Arc;

fn shipped_source() -> CatalogSource {
    CatalogSource::File(PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("data/modules.json"))
}

#[test]
fn test_shipped_catalog_loads() {
    let catalog = catalog::load(&shipped_source()).unwrap();

    let categories: Vec<&str> = catalog.categories().iter().map(|c| c.id.as_str()).collect();
    assert_eq!(
        categories,
        vec![
            "cli",
            "development",
            "browsers",
            "communication",
            "creative",
            "media",
            "databases",
            "gaming",
            "system"
        ]
    );
    assert_eq!(catalog.module("vscode").unwrap().requires, vec!["git"]);
    assert_eq!(catalog.module("docker").unwrap().category_id, "development");
}

#[test]
fn test_shipped_ids_are_unique_and_references_resolve() {
    let catalog = catalog::load(&shipped_source()).unwrap();

    let mut seen = HashSet::new();
    for module in catalog.modules() {
        assert!(seen.insert(module.id.clone()), "duplicate id {}", module.id);
        for dep in &module.requires {
            assert!(catalog.contains(dep), "{} requires unknown {}", module.id, dep);
        }
    }
    for preset in catalog.presets() {
        for id in &preset.modules {
            assert!(catalog.contains(id), "preset {} lists unknown {}", preset.id, id);
        }
    }
}

#[test]
fn test_shipped_dev_preset() {
    let catalog = catalog::load(&shipped_source()).unwrap();
    let mut store = SelectionStore::new(Arc::new(catalog));
    store.apply_preset("dev");

    assert_eq!(
        store.selection().to_csv(),
        "git,docker,vscode,nodejs,python"
    );
    assert_eq!(store.total_size(), 315.0);
}

#[test]
fn test_shipped_search_by_tag() {
    let catalog = catalog::load(&shipped_source()).unwrap();
    let store = SelectionStore::new(Arc::new(catalog));
    let state = ViewState {
        filter: "nosql".to_string(),
        ..Default::default()
    };

    let view = view::render(&store, &state);
    assert_eq!(view.categories.len(), 1);
    let ids: Vec<&str> = view.categories[0].modules.iter().map(|m| m.id.as_str()).collect();
    assert_eq!(ids, vec!["redis", "mongodb"]);
}

#[test]
fn test_missing_file_is_io_error() {
    let source = CatalogSource::File(PathBuf::from("/nonexistent/omniset/modules.json"));
    assert!(matches!(catalog::load(&source), Err(OmniSetError::Io(_))));
}

#[test]
fn test_malformed_file_is_json_error() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    write!(file, r#"{{ "categories": [ {{ "id": "cli" }} ] }}"#).unwrap();

    let source = CatalogSource::File(file.path().to_path_buf());
    assert!(matches!(catalog::load(&source), Err(OmniSetError::Json(_))));
}

#[test]
fn test_presets_are_optional() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    write!(
        file,
        r#"{{ "categories": [ {{ "id": "cli", "name": "CLI", "modules": [] }} ] }}"#
    )
    .unwrap();

    let catalog = catalog::load(&CatalogSource::File(file.path().to_path_buf())).unwrap();
    assert!(catalog.presets().is_empty());
    assert!(catalog.is_empty());
}

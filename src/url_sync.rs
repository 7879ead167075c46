//! Selection <-> location query string
//!
//! The selection is mirrored into a single query parameter (`m`) holding the
//! comma-joined module ids. Writes replace the current history entry in
//! place; an empty selection removes the parameter instead of writing an
//! empty value.

use crate::catalog::Catalog;
use crate::selection::Selection;
use tracing::debug;
use url::Url;

/// Query parameter carrying the selection.
pub const SELECTION_PARAM: &str = "m";

/// The current location, as a browser address bar would expose it.
pub trait Location {
    fn href(&self) -> Url;

    /// Replace the current entry without adding history.
    fn replace_state(&mut self, url: Url);

    /// Navigate to `url`, adding a history entry.
    fn push_state(&mut self, url: Url);
}

/// Location backed by an in-memory history stack.
#[derive(Debug, Clone)]
pub struct MemoryLocation {
    history: Vec<Url>,
}

impl MemoryLocation {
    pub fn new(url: Url) -> Self {
        Self { history: vec![url] }
    }

    pub fn parse(url: &str) -> crate::Result<Self> {
        Ok(Self::new(Url::parse(url)?))
    }

    /// Number of history entries.
    pub fn history_len(&self) -> usize {
        self.history.len()
    }
}

impl Location for MemoryLocation {
    fn href(&self) -> Url {
        // history always holds at least the initial entry
        self.history[self.history.len() - 1].clone()
    }

    fn replace_state(&mut self, url: Url) {
        if let Some(current) = self.history.last_mut() {
            *current = url;
        }
    }

    fn push_state(&mut self, url: Url) {
        self.history.push(url);
    }
}

/// Write `selection` into the location's query string.
pub fn serialize(selection: &Selection, location: &mut dyn Location) {
    let mut url = location.href();
    let value = (!selection.is_empty()).then(|| selection.to_csv());
    set_param(&mut url, SELECTION_PARAM, value.as_deref());
    debug!("Location updated to {}", url);
    location.replace_state(url);
}

/// Read the selection parameter and insert every id the catalog knows.
///
/// Unknown ids are dropped. Returns the number of modules inserted.
pub fn deserialize(location: &dyn Location, catalog: &Catalog, selection: &mut Selection) -> usize {
    let Some(value) = selection_param(&location.href()) else {
        return 0;
    };

    let mut added = 0;
    for token in value.split(',') {
        if !catalog.contains(token) {
            debug!("Dropping unknown module '{}' from location", token);
            continue;
        }
        if selection.insert(token) {
            added += 1;
        }
    }
    added
}

/// The non-empty value of the selection parameter, if any.
pub fn selection_param(url: &Url) -> Option<String> {
    url.query_pairs()
        .find(|(key, _)| key == SELECTION_PARAM)
        .map(|(_, value)| value.into_owned())
        .filter(|value| !value.is_empty())
}

/// Set (or with `None`, remove) `key`, keeping the other parameters in order.
fn set_param(url: &mut Url, key: &str, value: Option<&str>) {
    let mut pairs: Vec<(String, String)> = url
        .query_pairs()
        .map(|(k, v)| (k.into_owned(), v.into_owned()))
        .collect();

    match value {
        Some(value) => {
            if let Some(pos) = pairs.iter().position(|(k, _)| k == key) {
                pairs[pos].1 = value.to_string();
                let mut seen = false;
                pairs.retain(|(k, _)| {
                    if k != key {
                        return true;
                    }
                    let keep = !seen;
                    seen = true;
                    keep
                });
            } else {
                pairs.push((key.to_string(), value.to_string()));
            }
        }
        None => pairs.retain(|(k, _)| k != key),
    }

    if pairs.is_empty() {
        url.set_query(None);
    } else {
        url.query_pairs_mut().clear().extend_pairs(pairs);
    }
}

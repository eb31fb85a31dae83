use serde::Serialize;
use serde::ser::{SerializeMap, Serializer};

use super::key::ReservedKey;

pub const DEFAULT_PAGE: u32 = 1;

/// Structured projection of an address: search term, page and the selected
/// values of every facet key.
///
/// Reserved keys never appear among the facet values, `page` is always at
/// least 1 and a value is stored at most once per key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FilterModel {
    search_term: Option<String>,
    page: u32,
    values: FacetSelections,
}

impl Default for FilterModel {
    fn default() -> Self {
        Self {
            search_term: None,
            page: DEFAULT_PAGE,
            values: FacetSelections::default(),
        }
    }
}

impl FilterModel {
    pub fn search_term(&self) -> Option<&str> {
        self.search_term.as_deref()
    }

    pub fn page(&self) -> u32 {
        self.page
    }

    pub fn values(&self) -> &FacetSelections {
        &self.values
    }

    /// Selected values for `key`, in selection order.
    pub fn selected(&self, key: &str) -> &[String] {
        self.values.get(key)
    }

    pub fn with_search_term(mut self, term: impl Into<String>) -> Self {
        self.set_search_term(Some(term.into()));
        self
    }

    pub fn with_page(mut self, page: u32) -> Self {
        self.set_page(page);
        self
    }

    pub fn with_value(mut self, key: &str, value: impl Into<String>) -> Self {
        self.insert_value(key, value);
        self
    }

    pub fn set_search_term(&mut self, term: Option<String>) {
        self.search_term = term.filter(|term| !term.is_empty());
    }

    pub fn set_page(&mut self, page: u32) {
        self.page = page.max(DEFAULT_PAGE);
    }

    /// Adds `value` under a facet key. Reserved keys, empty input and
    /// duplicates are ignored; returns whether the model changed.
    pub fn insert_value(&mut self, key: &str, value: impl Into<String>) -> bool {
        if key.is_empty() || ReservedKey::parse(key).is_some() {
            return false;
        }
        let value = value.into();
        if value.is_empty() {
            return false;
        }
        self.values.insert(key, value)
    }
}

/// Facet key → ordered selected values, keys in first-appearance order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FacetSelections {
    entries: Vec<(String, Vec<String>)>,
}

impl FacetSelections {
    pub fn get(&self, key: &str) -> &[String] {
        self.entries
            .iter()
            .find(|(candidate, _)| candidate == key)
            .map(|(_, values)| values.as_slice())
            .unwrap_or(&[])
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.entries
            .iter()
            .map(|(key, values)| (key.as_str(), values.as_slice()))
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(key, _)| key.as_str())
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    fn insert(&mut self, key: &str, value: String) -> bool {
        match self.entries.iter_mut().find(|(candidate, _)| candidate == key) {
            Some((_, values)) if values.contains(&value) => false,
            Some((_, values)) => {
                values.push(value);
                true
            }
            None => {
                self.entries.push((key.to_string(), vec![value]));
                true
            }
        }
    }
}

impl Serialize for FacetSelections {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (key, values) in &self.entries {
            map.serialize_entry(key, values)?;
        }
        map.end()
    }
}

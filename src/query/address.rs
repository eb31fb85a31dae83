use serde::Serialize;

/// A navigable location: path plus query string (without `?`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NavigableAddress {
    pub path: String,
    pub query: String,
}

impl Default for NavigableAddress {
    fn default() -> Self {
        Self {
            path: "/".to_string(),
            query: String::new(),
        }
    }
}

impl NavigableAddress {
    pub fn new(path: impl Into<String>, query: impl Into<String>) -> Self {
        let path = path.into();
        let query = query.into();
        Self {
            path: if path.is_empty() { "/".to_string() } else { path },
            query: query.strip_prefix('?').map(str::to_string).unwrap_or(query),
        }
    }

    /// Accepts `/path`, `/path?query`, `?query` or a full URL; fragments are dropped.
    pub fn parse(raw: &str) -> Self {
        let raw = raw.trim();
        let raw = raw.split_once('#').map_or(raw, |(head, _)| head);
        let raw = strip_origin(raw);
        match raw.split_once('?') {
            Some((path, query)) => Self::new(path, query),
            None => Self::new(raw, ""),
        }
    }

    pub fn with_query(&self, query: impl Into<String>) -> Self {
        Self::new(self.path.clone(), query)
    }
}

fn strip_origin(raw: &str) -> &str {
    let Some((_, rest)) = raw.split_once("://") else {
        return raw;
    };
    match rest.find(['/', '?']) {
        Some(index) => &rest[index..],
        None => "",
    }
}

impl std::fmt::Display for NavigableAddress {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.query.is_empty() {
            f.write_str(&self.path)
        } else {
            write!(f, "{}?{}", self.path, self.query)
        }
    }
}

use url::form_urlencoded;

/// Ordered multi-map over `key=value&key=value` pairs.
///
/// Behaves like a browser `URLSearchParams`: repeated keys are kept in place,
/// `set` rewrites the first occurrence and drops the rest, `append` always
/// goes to the end.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryParams {
    pairs: Vec<(String, String)>,
}

impl QueryParams {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses a query string, with or without the leading `?`.
    pub fn parse(query: &str) -> Self {
        let query = query.strip_prefix('?').unwrap_or(query);
        let pairs = form_urlencoded::parse(query.as_bytes())
            .map(|(key, value)| (key.into_owned(), value.into_owned()))
            .collect();
        Self { pairs }
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.pairs
            .iter()
            .map(|(key, value)| (key.as_str(), value.as_str()))
    }

    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.pairs
            .iter()
            .find(|(candidate, _)| candidate == key)
            .map(|(_, value)| value.as_str())
    }

    pub fn get_all(&self, key: &str) -> Vec<&str> {
        self.pairs
            .iter()
            .filter(|(candidate, _)| candidate == key)
            .map(|(_, value)| value.as_str())
            .collect()
    }

    pub fn contains(&self, key: &str, value: &str) -> bool {
        self.pairs
            .iter()
            .any(|(candidate, existing)| candidate == key && existing == value)
    }

    pub fn set(&mut self, key: &str, value: impl Into<String>) {
        let value = value.into();
        let Some(first) = self.pairs.iter().position(|(candidate, _)| candidate == key) else {
            self.pairs.push((key.to_string(), value));
            return;
        };

        self.pairs[first].1 = value;
        let mut index = 0;
        self.pairs.retain(|(candidate, _)| {
            let keep = index <= first || candidate != key;
            index += 1;
            keep
        });
    }

    pub fn append(&mut self, key: &str, value: impl Into<String>) {
        self.pairs.push((key.to_string(), value.into()));
    }

    /// Removes every occurrence of `key`. Returns whether anything was removed.
    pub fn delete(&mut self, key: &str) -> bool {
        let before = self.pairs.len();
        self.pairs.retain(|(candidate, _)| candidate != key);
        self.pairs.len() != before
    }

    /// Removes every `key=value` pair matching both. Returns whether anything was removed.
    pub fn delete_value(&mut self, key: &str, value: &str) -> bool {
        let before = self.pairs.len();
        self.pairs
            .retain(|(candidate, existing)| candidate != key || existing != value);
        self.pairs.len() != before
    }

    /// Serializes without the leading `?`; empty params give an empty string.
    pub fn to_query_string(&self) -> String {
        let mut serializer = form_urlencoded::Serializer::new(String::new());
        for (key, value) in &self.pairs {
            serializer.append_pair(key, value);
        }
        serializer.finish()
    }
}

impl std::fmt::Display for QueryParams {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.to_query_string())
    }
}

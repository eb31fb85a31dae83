use crate::query::{FilterKey, ReservedKey};

/// Candidate value handed to a routing intent by a UI affordance.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IntentValue {
    Text(String),
    Flag(bool),
    Number(i64),
    Absent,
}

impl IntentValue {
    /// Query representation for truthy values; `None` for absent, empty
    /// text, `false` and `0`.
    pub fn as_query_value(&self) -> Option<String> {
        match self {
            Self::Text(text) if !text.is_empty() => Some(text.clone()),
            Self::Flag(true) => Some("true".to_string()),
            Self::Number(number) if *number != 0 => Some(number.to_string()),
            _ => None,
        }
    }
}

impl From<&str> for IntentValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for IntentValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<bool> for IntentValue {
    fn from(value: bool) -> Self {
        Self::Flag(value)
    }
}

impl From<i64> for IntentValue {
    fn from(value: i64) -> Self {
        Self::Number(value)
    }
}

impl From<u32> for IntentValue {
    fn from(value: u32) -> Self {
        Self::Number(i64::from(value))
    }
}

impl<T: Into<IntentValue>> From<Option<T>> for IntentValue {
    fn from(value: Option<T>) -> Self {
        value.map_or(Self::Absent, Into::into)
    }
}

/// A bound routing handler: which key it edits and how.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoutingIntent {
    pub key: FilterKey,
    pub reset_page: bool,
    /// Position within the current values of `key`, for removal by index.
    pub position: Option<usize>,
}

impl RoutingIntent {
    pub fn new(key: FilterKey) -> Self {
        Self {
            key,
            reset_page: false,
            position: None,
        }
    }

    pub fn facet(name: impl Into<String>) -> Self {
        Self::new(FilterKey::facet(name))
    }

    pub fn reserved(key: ReservedKey) -> Self {
        Self::new(FilterKey::Reserved(key))
    }

    pub fn resetting_page(mut self) -> Self {
        self.reset_page = true;
        self
    }

    pub fn at_position(mut self, position: usize) -> Self {
        self.position = Some(position);
        self
    }

    /// Completes the handler with the value supplied by the UI.
    pub fn with_value(self, value: impl Into<IntentValue>) -> RoutingRequest {
        RoutingRequest {
            intent: self,
            value: value.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoutingRequest {
    pub intent: RoutingIntent,
    pub value: IntentValue,
}

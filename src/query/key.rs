/// Query parameter names with single-valued, engine-defined meaning.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ReservedKey {
    Search,
    Page,
    PageSize,
}

impl ReservedKey {
    pub const ALL: [ReservedKey; 3] = [Self::Search, Self::Page, Self::PageSize];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Search => "search",
            Self::Page => "page",
            Self::PageSize => "pageSize",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "search" => Some(Self::Search),
            "page" => Some(Self::Page),
            "pageSize" => Some(Self::PageSize),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum FilterKey {
    Reserved(ReservedKey),
    /// Arbitrary facet/attribute key; holds zero or more values.
    Facet(String),
}

impl FilterKey {
    pub fn parse(value: &str) -> Self {
        match ReservedKey::parse(value) {
            Some(reserved) => Self::Reserved(reserved),
            None => Self::Facet(value.to_string()),
        }
    }

    pub fn facet(name: impl Into<String>) -> Self {
        let name = name.into();
        match ReservedKey::parse(&name) {
            Some(reserved) => Self::Reserved(reserved),
            None => Self::Facet(name),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Self::Reserved(reserved) => reserved.as_str(),
            Self::Facet(name) => name,
        }
    }

    pub fn is_reserved(&self) -> bool {
        matches!(self, Self::Reserved(_))
    }
}

impl From<ReservedKey> for FilterKey {
    fn from(value: ReservedKey) -> Self {
        Self::Reserved(value)
    }
}

impl std::fmt::Display for FilterKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Search { term: String },
    ClearSearch,
    Page { page: u32 },
    Toggle { key: String, value: String },
    Remove { key: String, index: Option<usize> },
    Clear { key: String },
    Refresh,
    Back,
    Forward,
    OpenDrawer,
    CloseDrawer,
    Retry,
    Show,
    Help,
    Quit,
}

impl Command {
    pub fn id(&self) -> &'static str {
        match self {
            Self::Search { .. } => "search",
            Self::ClearSearch => "clear-search",
            Self::Page { .. } => "page",
            Self::Toggle { .. } => "toggle",
            Self::Remove { .. } => "remove",
            Self::Clear { .. } => "clear",
            Self::Refresh => "refresh",
            Self::Back => "back",
            Self::Forward => "forward",
            Self::OpenDrawer => "open-drawer",
            Self::CloseDrawer => "close-drawer",
            Self::Retry => "retry",
            Self::Show => "show",
            Self::Help => "help",
            Self::Quit => "quit",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArgKind {
    U32,
    String,
    Text,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ArgSpec {
    pub name: &'static str,
    pub kind: ArgKind,
    pub required: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CommandSpec {
    pub id: &'static str,
    pub title: &'static str,
    pub args: &'static [ArgSpec],
}

impl CommandSpec {
    pub fn usage(&self) -> String {
        let mut usage = self.id.to_string();
        for arg in self.args {
            let name = match arg.kind {
                ArgKind::Text => format!("{}...", arg.name),
                ArgKind::U32 | ArgKind::String => arg.name.to_string(),
            };
            if arg.required {
                usage.push_str(&format!(" <{name}>"));
            } else {
                usage.push_str(&format!(" [{name}]"));
            }
        }
        usage
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandOutcome {
    Applied,
    Noop,
    QuitRequested,
}

mod parse;
mod spec;
mod types;

pub use parse::parse_command_text;
pub use spec::{command_registry, help_text};
pub use types::{ArgKind, ArgSpec, Command, CommandOutcome, CommandSpec};

use super::types::{ArgKind, ArgSpec, CommandSpec};

const NO_ARGS: [ArgSpec; 0] = [];
const ARGS_SEARCH: [ArgSpec; 1] = [ArgSpec {
    name: "term",
    kind: ArgKind::Text,
    required: true,
}];
const ARGS_PAGE: [ArgSpec; 1] = [ArgSpec {
    name: "page",
    kind: ArgKind::U32,
    required: true,
}];
const ARGS_TOGGLE: [ArgSpec; 2] = [
    ArgSpec {
        name: "key",
        kind: ArgKind::String,
        required: true,
    },
    ArgSpec {
        name: "value",
        kind: ArgKind::Text,
        required: true,
    },
];
const ARGS_REMOVE: [ArgSpec; 2] = [
    ArgSpec {
        name: "key",
        kind: ArgKind::String,
        required: true,
    },
    ArgSpec {
        name: "index",
        kind: ArgKind::U32,
        required: false,
    },
];
const ARGS_CLEAR: [ArgSpec; 1] = [ArgSpec {
    name: "key",
    kind: ArgKind::String,
    required: true,
}];

const COMMAND_SPECS: [CommandSpec; 15] = [
    CommandSpec {
        id: "search",
        title: "Search Products",
        args: &ARGS_SEARCH,
    },
    CommandSpec {
        id: "clear-search",
        title: "Clear Search",
        args: &NO_ARGS,
    },
    CommandSpec {
        id: "page",
        title: "Go to Page",
        args: &ARGS_PAGE,
    },
    CommandSpec {
        id: "toggle",
        title: "Toggle Facet Value",
        args: &ARGS_TOGGLE,
    },
    CommandSpec {
        id: "remove",
        title: "Remove Selected Value",
        args: &ARGS_REMOVE,
    },
    CommandSpec {
        id: "clear",
        title: "Clear Facet",
        args: &ARGS_CLEAR,
    },
    CommandSpec {
        id: "refresh",
        title: "Reload Listing",
        args: &NO_ARGS,
    },
    CommandSpec {
        id: "back",
        title: "History Back",
        args: &NO_ARGS,
    },
    CommandSpec {
        id: "forward",
        title: "History Forward",
        args: &NO_ARGS,
    },
    CommandSpec {
        id: "open-drawer",
        title: "Open Filter Drawer",
        args: &NO_ARGS,
    },
    CommandSpec {
        id: "close-drawer",
        title: "Close Filter Drawer",
        args: &NO_ARGS,
    },
    CommandSpec {
        id: "retry",
        title: "Retry Listing",
        args: &NO_ARGS,
    },
    CommandSpec {
        id: "show",
        title: "Show Listing",
        args: &NO_ARGS,
    },
    CommandSpec {
        id: "help",
        title: "Help",
        args: &NO_ARGS,
    },
    CommandSpec {
        id: "quit",
        title: "Quit",
        args: &NO_ARGS,
    },
];

pub fn command_registry() -> &'static [CommandSpec] {
    &COMMAND_SPECS
}

pub fn help_text() -> String {
    command_registry()
        .iter()
        .map(|spec| format!("{:<24} {}", spec.usage(), spec.title))
        .collect::<Vec<_>>()
        .join("\n")
}

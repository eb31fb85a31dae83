use crate::error::{AppError, AppResult};

use super::spec::command_registry;
use super::types::Command;

pub fn parse_command_text(input: &str) -> AppResult<Command> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(AppError::invalid_argument("command must not be empty"));
    }

    let (id, args_text) = split_first_token(trimmed);

    if !command_registry().iter().any(|spec| spec.id == id) {
        return Err(AppError::invalid_argument(format!(
            "unknown command: {id}"
        )));
    }

    match id {
        "search" => parse_search(args_text),
        "clear-search" => parse_no_args(id, args_text, Command::ClearSearch),
        "page" => parse_page(args_text),
        "toggle" => parse_toggle(args_text),
        "remove" => parse_remove(args_text),
        "clear" => parse_clear(args_text),
        "refresh" => parse_no_args(id, args_text, Command::Refresh),
        "back" => parse_no_args(id, args_text, Command::Back),
        "forward" => parse_no_args(id, args_text, Command::Forward),
        "open-drawer" => parse_no_args(id, args_text, Command::OpenDrawer),
        "close-drawer" => parse_no_args(id, args_text, Command::CloseDrawer),
        "retry" => parse_no_args(id, args_text, Command::Retry),
        "show" => parse_no_args(id, args_text, Command::Show),
        "help" => parse_no_args(id, args_text, Command::Help),
        "quit" => parse_no_args(id, args_text, Command::Quit),
        _ => Err(AppError::unsupported(
            "command parser is out of sync with registry",
        )),
    }
}

fn parse_no_args(id: &str, args_text: &str, cmd: Command) -> AppResult<Command> {
    if args_text.is_empty() {
        return Ok(cmd);
    }

    Err(AppError::invalid_argument(format!(
        "{id} does not accept arguments"
    )))
}

fn parse_search(args_text: &str) -> AppResult<Command> {
    if args_text.is_empty() {
        return Err(AppError::invalid_argument(
            "search requires 1 argument: term",
        ));
    }

    Ok(Command::Search {
        term: args_text.to_string(),
    })
}

fn parse_page(args_text: &str) -> AppResult<Command> {
    let mut parts = args_text.split_whitespace();
    let Some(page_text) = parts.next() else {
        return Err(AppError::invalid_argument("page requires 1 argument: page"));
    };
    if parts.next().is_some() {
        return Err(AppError::invalid_argument("page accepts exactly 1 argument"));
    }

    let page = page_text
        .parse::<u32>()
        .map_err(|_| AppError::invalid_argument("page must be a positive integer"))?;
    if page < 1 {
        return Err(AppError::invalid_argument("page number must be >= 1"));
    }

    Ok(Command::Page { page })
}

fn parse_toggle(args_text: &str) -> AppResult<Command> {
    let (key, value) = split_first_token(args_text);
    if key.is_empty() || value.is_empty() {
        return Err(AppError::invalid_argument(
            "toggle requires 2 arguments: key value",
        ));
    }

    Ok(Command::Toggle {
        key: key.to_string(),
        value: value.to_string(),
    })
}

fn parse_remove(args_text: &str) -> AppResult<Command> {
    let mut parts = args_text.split_whitespace();
    let Some(key) = parts.next() else {
        return Err(AppError::invalid_argument(
            "remove requires at least 1 argument: key",
        ));
    };
    let index = parts
        .next()
        .map(|raw| {
            raw.parse::<usize>()
                .map_err(|_| AppError::invalid_argument("remove index must be an integer"))
        })
        .transpose()?;
    if parts.next().is_some() {
        return Err(AppError::invalid_argument(
            "remove accepts at most 2 arguments",
        ));
    }

    Ok(Command::Remove {
        key: key.to_string(),
        index,
    })
}

fn parse_clear(args_text: &str) -> AppResult<Command> {
    let mut parts = args_text.split_whitespace();
    let Some(key) = parts.next() else {
        return Err(AppError::invalid_argument("clear requires 1 argument: key"));
    };
    if parts.next().is_some() {
        return Err(AppError::invalid_argument("clear accepts exactly 1 argument"));
    }

    Ok(Command::Clear {
        key: key.to_string(),
    })
}

fn split_first_token(input: &str) -> (&str, &str) {
    let input = input.trim();
    match input.find(char::is_whitespace) {
        Some(index) => (&input[..index], input[index..].trim_start()),
        None => (input, ""),
    }
}

use std::path::PathBuf;
use std::sync::Arc;

use clap::{Parser, Subcommand};
use serde::Serialize;
use tokio::io::BufReader;

use storefront::app::{Storefront, run_session};
use storefront::catalog::{
    CatalogService, HttpCatalogService, ListingEvent, ListingRequest, ListingResult, ListingState,
};
use storefront::config::Config;
use storefront::dispatch::{IntentValue, RoutingIntent, next_query};
use storefront::error::{AppError, AppResult};
use storefront::query::{FilterKey, FilterModel, ListingScope, NavigableAddress, decode};
use storefront::surface::render_listing;

#[derive(Parser, Debug)]
#[command(version, about = "Query-string driven product listing", long_about = None)]
struct Cli {
    /// Config file; defaults to the per-user location.
    #[arg(long, global = true, value_hint = clap::ValueHint::FilePath)]
    config: Option<PathBuf>,

    /// Print machine-readable JSON.
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: CliCommand,
}

#[derive(Subcommand, Debug)]
enum CliCommand {
    /// Show the filter model an address decodes to.
    Decode { address: String },
    /// Apply one routing change to an address and print the result.
    Route {
        address: String,
        #[arg(long)]
        key: String,
        /// Omit to remove the current value(s).
        #[arg(long)]
        value: Option<String>,
        #[arg(long)]
        reset_page: bool,
        /// Position of the value to remove under `key`.
        #[arg(long)]
        index: Option<usize>,
    },
    /// Fetch one listing page for an address.
    List { address: String },
    /// Interactive session reading commands from stdin.
    Session { address: String },
}

#[derive(Serialize)]
struct DecodedView<'a> {
    address: &'a NavigableAddress,
    listing_route: bool,
    model: &'a FilterModel,
}

#[derive(Serialize)]
struct RoutedView {
    address: NavigableAddress,
    changed: bool,
}

#[tokio::main(flavor = "multi_thread")]
async fn main() {
    if let Err(err) = run().await {
        eprintln!("{err}");
        std::process::exit(1);
    }
}

async fn run() -> AppResult<()> {
    let cli = Cli::parse();
    let config = match &cli.config {
        Some(path) => Config::load_from_path(path)?,
        None => Config::load()?,
    };
    storefront::logging::init(&config.log);

    match cli.command {
        CliCommand::Decode { address } => decode_address(&address, cli.json),
        CliCommand::Route {
            address,
            key,
            value,
            reset_page,
            index,
        } => route_address(&address, &key, value, reset_page, index, cli.json),
        CliCommand::List { address } => list_address(&config, &address, cli.json).await,
        CliCommand::Session { address } => {
            let service = Arc::new(HttpCatalogService::new(&config.catalog)?);
            let mut storefront =
                Storefront::new(&config, service, NavigableAddress::parse(&address))?;
            run_session(
                &mut storefront,
                BufReader::new(tokio::io::stdin()),
                tokio::io::stdout(),
            )
            .await
        }
    }
}

fn decode_address(raw: &str, json: bool) -> AppResult<()> {
    let address = NavigableAddress::parse(raw);
    let model = decode(&address.query);
    let listing_route = ListingScope::from_path(&address.path).is_some();

    if json {
        let view = DecodedView {
            address: &address,
            listing_route,
            model: &model,
        };
        return print_json(&view);
    }

    println!("path: {}", address.path);
    println!("listing route: {listing_route}");
    println!("search: {}", model.search_term().unwrap_or("-"));
    println!("page: {}", model.page());
    for (key, values) in model.values().iter() {
        println!("{key}: {}", values.join(", "));
    }
    Ok(())
}

fn route_address(
    raw: &str,
    key: &str,
    value: Option<String>,
    reset_page: bool,
    index: Option<usize>,
    json: bool,
) -> AppResult<()> {
    if key.is_empty() {
        return Err(AppError::invalid_argument("--key must not be empty"));
    }

    let address = NavigableAddress::parse(raw);
    let mut intent = RoutingIntent::new(FilterKey::parse(key));
    if reset_page {
        intent = intent.resetting_page();
    }
    if let Some(index) = index {
        intent = intent.at_position(index);
    }
    let request = intent.with_value(IntentValue::from(value));

    let next = next_query(&address.query, &request);
    let view = RoutedView {
        changed: next.is_some(),
        address: next.map_or_else(|| address.clone(), |query| address.with_query(query)),
    };

    if json {
        return print_json(&view);
    }
    if view.changed {
        println!("{}", view.address);
    } else {
        println!("{} (no change)", view.address);
    }
    Ok(())
}

async fn list_address(config: &Config, raw: &str, json: bool) -> AppResult<()> {
    let address = NavigableAddress::parse(raw);
    let Some(scope) = ListingScope::from_path(&address.path) else {
        return Err(AppError::invalid_argument(format!(
            "not a listing route: {}",
            address.path
        )));
    };
    let model = decode(&address.query);
    let request = ListingRequest::from_model(&model, &scope, config.catalog.page_size);

    let service = HttpCatalogService::new(&config.catalog)?;
    let result: ListingResult = service.list_products(request.clone()).await?;

    if json {
        return print_json(&result);
    }

    let mut listing = ListingState::default();
    listing.begin(1, request);
    listing.apply(ListingEvent::Completed {
        generation: 1,
        result,
    });
    println!("{}", render_listing(&listing, &model));
    Ok(())
}

fn print_json<T: Serialize>(value: &T) -> AppResult<()> {
    let text = serde_json::to_string_pretty(value)
        .map_err(|err| AppError::decode(format!("failed to serialize output: {err}")))?;
    println!("{text}");
    Ok(())
}

#[cfg(test)]
mod tests {
    use clap::Parser;

    use super::{Cli, CliCommand};

    #[test]
    fn route_flags_parse() {
        let cli = Cli::try_parse_from([
            "storefront",
            "--json",
            "route",
            "/products?color=red",
            "--key",
            "color",
            "--index",
            "0",
        ])
        .expect("cli should parse");

        assert!(cli.json);
        match cli.command {
            CliCommand::Route {
                key, value, index, ..
            } => {
                assert_eq!(key, "color");
                assert_eq!(value, None);
                assert_eq!(index, Some(0));
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn address_is_required() {
        assert!(Cli::try_parse_from(["storefront", "decode"]).is_err());
    }
}

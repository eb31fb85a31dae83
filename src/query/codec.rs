use super::key::{FilterKey, ReservedKey};
use super::model::{DEFAULT_PAGE, FilterModel};
use super::params::QueryParams;

/// Projects a query string onto a [`FilterModel`]. Never fails: anything
/// unparsable falls back to defaults or is skipped.
pub fn decode(query: &str) -> FilterModel {
    decode_params(&QueryParams::parse(query))
}

pub fn decode_params(params: &QueryParams) -> FilterModel {
    let mut model = FilterModel::default();

    let search = params
        .get_all(ReservedKey::Search.as_str())
        .into_iter()
        .find(|term| !term.is_empty());
    model.set_search_term(search.map(str::to_string));
    model.set_page(parse_page(params.get(ReservedKey::Page.as_str())));

    for (key, value) in params.iter() {
        if key.is_empty() || value.is_empty() {
            continue;
        }
        if let FilterKey::Facet(_) = FilterKey::parse(key) {
            model.insert_value(key, value);
        }
    }

    model
}

/// Canonical query string: `search` first, facet values in model order,
/// `page` last and only when it is not the first page.
pub fn encode(model: &FilterModel) -> String {
    encode_params(model).to_query_string()
}

pub fn encode_params(model: &FilterModel) -> QueryParams {
    let mut params = QueryParams::new();
    if let Some(term) = model.search_term() {
        params.append(ReservedKey::Search.as_str(), term);
    }
    for (key, values) in model.values().iter() {
        for value in values {
            params.append(key, value.as_str());
        }
    }
    if model.page() != DEFAULT_PAGE {
        params.append(ReservedKey::Page.as_str(), model.page().to_string());
    }
    params
}

fn parse_page(raw: Option<&str>) -> u32 {
    raw.and_then(|raw| raw.trim().parse::<u32>().ok())
        .filter(|page| *page >= DEFAULT_PAGE)
        .unwrap_or(DEFAULT_PAGE)
}

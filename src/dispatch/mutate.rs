use crate::query::{FilterKey, QueryParams, ReservedKey, decode_params};

use super::intent::RoutingRequest;

/// Computes the query that `request` leads to from the live `query`.
///
/// Returns `None` when nothing would change, so callers never record a
/// redundant history entry.
pub fn next_query(query: &str, request: &RoutingRequest) -> Option<String> {
    let mut params = QueryParams::parse(query);
    let intent = &request.intent;
    let key = intent.key.as_str();
    let page_key = ReservedKey::Page.as_str();
    let has_page = params.get(page_key).is_some_and(|page| !page.is_empty());

    let changed = match request.value.as_query_value() {
        Some(value) => {
            let mut changed = match &intent.key {
                FilterKey::Reserved(_) => set_single(&mut params, key, value),
                FilterKey::Facet(_) => toggle(&mut params, key, value),
            };
            if has_page && intent.reset_page {
                changed |= params.delete(page_key);
            }
            changed
        }
        None => match &intent.key {
            FilterKey::Reserved(_) => {
                let present = params.get(key).is_some_and(|current| !current.is_empty());
                present && params.delete(key)
            }
            FilterKey::Facet(_) => remove_facet(&mut params, key, intent.position),
        },
    };

    if !changed {
        return None;
    }
    let next = params.to_query_string();
    (next != query.strip_prefix('?').unwrap_or(query)).then_some(next)
}

fn set_single(params: &mut QueryParams, key: &str, value: String) -> bool {
    if params.get(key) == Some(value.as_str()) {
        return false;
    }
    params.set(key, value);
    true
}

fn toggle(params: &mut QueryParams, key: &str, value: String) -> bool {
    if params.contains(key, &value) {
        params.delete_value(key, &value)
    } else {
        params.append(key, value);
        true
    }
}

/// Positions and presence follow the decoded selection (non-empty values,
/// first occurrence wins), the same sequence the chips are rendered from.
fn remove_facet(params: &mut QueryParams, key: &str, position: Option<usize>) -> bool {
    let selected = decode_params(params).selected(key).to_vec();
    if selected.is_empty() {
        return false;
    }
    match position {
        Some(index) => {
            let Some(target) = selected.get(index) else {
                return false;
            };
            params.delete_value(key, target)
        }
        None => params.delete(key),
    }
}

#[cfg(test)]
mod tests {
    use super::next_query;
    use crate::dispatch::{IntentValue, RoutingIntent};
    use crate::query::{ReservedKey, decode};

    fn facet(name: &str) -> RoutingIntent {
        RoutingIntent::facet(name).resetting_page()
    }

    #[test]
    fn toggling_a_new_facet_value_appends_and_drops_page() {
        let next = next_query(
            "search=shoe&color=red&page=2",
            &facet("color").with_value("blue"),
        );
        assert_eq!(next.as_deref(), Some("search=shoe&color=red&color=blue"));
    }

    #[test]
    fn toggling_an_existing_value_removes_it() {
        let next = next_query("color=red&color=blue", &facet("color").with_value("red"));
        assert_eq!(next.as_deref(), Some("color=blue"));
    }

    #[test]
    fn toggling_twice_restores_the_original_model() {
        let original = "search=shoe&color=red";
        let request = facet("color").with_value("blue");
        let once = next_query(original, &request).expect("first toggle changes");
        let twice = next_query(&once, &request).expect("second toggle changes");
        assert_eq!(decode(&twice), decode(original));
    }

    #[test]
    fn page_is_kept_when_reset_is_not_requested() {
        let request = RoutingIntent::facet("color").with_value("blue");
        assert_eq!(
            next_query("page=3&color=red", &request).as_deref(),
            Some("page=3&color=red&color=blue")
        );
    }

    #[test]
    fn reserved_keys_are_set_in_place() {
        let page = RoutingIntent::reserved(ReservedKey::Page).with_value(3_u32);
        assert_eq!(
            next_query("search=shoe&color=red&color=blue", &page).as_deref(),
            Some("search=shoe&color=red&color=blue&page=3")
        );
        assert_eq!(
            next_query("page=2&color=red", &page).as_deref(),
            Some("page=3&color=red")
        );
    }

    #[test]
    fn setting_a_reserved_key_to_its_current_value_is_a_noop() {
        let page = RoutingIntent::reserved(ReservedKey::Page).with_value(3_u32);
        assert_eq!(next_query("page=3", &page), None);
    }

    #[test]
    fn search_change_with_reset_drops_page() {
        let search = RoutingIntent::reserved(ReservedKey::Search)
            .resetting_page()
            .with_value("boot");
        assert_eq!(
            next_query("search=shoe&page=4", &search).as_deref(),
            Some("search=boot")
        );
    }

    #[test]
    fn absent_value_without_existing_value_is_a_noop() {
        let size = facet("size").with_value(IntentValue::Absent);
        assert_eq!(next_query("color=red", &size), None);
        let search = RoutingIntent::reserved(ReservedKey::Search).with_value("");
        assert_eq!(next_query("color=red", &search), None);
        assert_eq!(next_query("search=&color=red", &search), None);
    }

    #[test]
    fn absent_value_clears_a_reserved_key() {
        let search = RoutingIntent::reserved(ReservedKey::Search).with_value(IntentValue::Absent);
        assert_eq!(
            next_query("search=shoe&page=2", &search).as_deref(),
            Some("page=2")
        );
    }

    #[test]
    fn absent_value_removes_by_position() {
        let request = facet("color").at_position(1).with_value(IntentValue::Absent);
        let next = next_query("color=red&color=blue&color=green", &request);
        assert_eq!(next.as_deref(), Some("color=red&color=green"));
        assert_eq!(
            decode(next.as_deref().unwrap_or_default()).selected("color"),
            ["red".to_string(), "green".to_string()]
        );
    }

    #[test]
    fn position_counts_only_distinct_non_empty_values() {
        let request = facet("color").at_position(1).with_value(IntentValue::Absent);
        let next = next_query("color=red&color=red&color=blue", &request);
        assert_eq!(next.as_deref(), Some("color=red&color=red"));
        assert_eq!(
            decode(next.as_deref().unwrap_or_default()).selected("color"),
            ["red".to_string()]
        );

        let first = facet("color").at_position(0).with_value(IntentValue::Absent);
        let next = next_query("color=&color=red", &first);
        assert_eq!(next.as_deref(), Some("color="));
        assert!(decode(next.as_deref().unwrap_or_default()).selected("color").is_empty());
    }

    #[test]
    fn empty_facet_values_count_as_absent() {
        let clear = facet("color").with_value(IntentValue::Absent);
        assert_eq!(next_query("color=", &clear), None);
        assert_eq!(next_query("color=&size=9", &clear), None);
        let chip = facet("color").at_position(0).with_value(IntentValue::Absent);
        assert_eq!(next_query("color=", &chip), None);
    }

    #[test]
    fn out_of_range_position_is_a_noop() {
        let request = facet("color").at_position(5).with_value(IntentValue::Absent);
        assert_eq!(next_query("color=red", &request), None);
    }

    #[test]
    fn absent_value_without_position_clears_the_facet() {
        let request = facet("color").with_value(false);
        assert_eq!(
            next_query("color=red&size=9&color=blue", &request).as_deref(),
            Some("size=9")
        );
    }

    #[test]
    fn boolean_facets_toggle_as_true() {
        let request = facet("inStock").with_value(true);
        let on = next_query("", &request).expect("toggle on");
        assert_eq!(on, "inStock=true");
        assert_eq!(next_query(&on, &request).as_deref(), Some(""));
    }
}

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::query::{FilterModel, ListingScope};

/// Filter value at the service boundary: one selection or several.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum FilterValue {
    One(String),
    Many(Vec<String>),
}

impl FilterValue {
    fn from_selected(values: &[String]) -> Option<Self> {
        match values {
            [] => None,
            [single] => Some(Self::One(single.clone())),
            many => Some(Self::Many(many.to_vec())),
        }
    }

    pub fn values(&self) -> &[String] {
        match self {
            Self::One(value) => std::slice::from_ref(value),
            Self::Many(values) => values,
        }
    }
}

/// Parameters of one product listing call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ListingRequest {
    #[serde(rename = "catalogID", skip_serializing_if = "Option::is_none")]
    pub catalog_id: Option<String>,
    #[serde(rename = "categoryID", skip_serializing_if = "Option::is_none")]
    pub category_id: Option<String>,
    pub filters: BTreeMap<String, FilterValue>,
    pub page: u32,
    pub page_size: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub search: Option<String>,
}

impl ListingRequest {
    pub fn from_model(model: &FilterModel, scope: &ListingScope, page_size: u32) -> Self {
        let filters = model
            .values()
            .iter()
            .filter_map(|(key, values)| {
                FilterValue::from_selected(values).map(|value| (key.to_string(), value))
            })
            .collect();

        Self {
            catalog_id: scope.catalog_id.clone(),
            category_id: scope.category_id.clone(),
            filters,
            page: model.page(),
            page_size: page_size.max(1),
            search: model.search_term().map(str::to_string),
        }
    }

    /// Flattened `key=value` pairs as sent on the wire; filters repeat their key.
    pub fn query_pairs(&self) -> Vec<(String, String)> {
        let mut pairs = Vec::new();
        if let Some(catalog_id) = &self.catalog_id {
            pairs.push(("catalogID".to_string(), catalog_id.clone()));
        }
        if let Some(category_id) = &self.category_id {
            pairs.push(("categoryID".to_string(), category_id.clone()));
        }
        if let Some(search) = &self.search {
            pairs.push(("search".to_string(), search.clone()));
        }
        pairs.push(("page".to_string(), self.page.to_string()));
        pairs.push(("pageSize".to_string(), self.page_size.to_string()));
        for (key, value) in &self.filters {
            for value in value.values() {
                pairs.push((key.clone(), value.clone()));
            }
        }
        pairs
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct Product {
    #[serde(rename = "ID")]
    pub id: String,
    #[serde(rename = "Name", default)]
    pub name: String,
    #[serde(rename = "Description", default)]
    pub description: Option<String>,
    #[serde(default)]
    pub xp: serde_json::Value,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct FacetValue {
    #[serde(rename = "Value")]
    pub value: String,
    #[serde(rename = "Count", default)]
    pub count: u64,
}

/// Service-reported facet for the current result set. Passed through to
/// rendering untouched.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct FacetSummary {
    #[serde(rename = "Name")]
    pub name: String,
    #[serde(rename = "XpPath", default)]
    pub xp_path: Option<String>,
    #[serde(rename = "Values", default)]
    pub values: Vec<FacetValue>,
}

impl FacetSummary {
    /// Query key used when one of this facet's values is selected.
    pub fn filter_key(&self) -> &str {
        self.xp_path.as_deref().unwrap_or(&self.name)
    }
}

#[derive(Debug, Clone, PartialEq, Default, Deserialize, Serialize)]
pub struct ListingMeta {
    #[serde(rename = "Facets", default)]
    pub facets: Vec<FacetSummary>,
    #[serde(rename = "TotalPages", default)]
    pub total_pages: u32,
    #[serde(rename = "TotalCount", default)]
    pub total_count: u64,
    #[serde(rename = "Page", default)]
    pub page: u32,
}

/// One page of products plus the facets that describe the whole result set.
#[derive(Debug, Clone, PartialEq, Default, Deserialize, Serialize)]
pub struct ListingResult {
    #[serde(rename = "Items", default)]
    pub items: Vec<Product>,
    #[serde(rename = "Meta", default)]
    pub meta: ListingMeta,
}

impl ListingResult {
    pub fn facets(&self) -> &[FacetSummary] {
        &self.meta.facets
    }

    pub fn total_pages(&self) -> u32 {
        self.meta.total_pages
    }
}

#[cfg(test)]
mod tests {
    use super::{FilterValue, ListingRequest, ListingResult};
    use crate::query::{FilterModel, ListingScope, decode};

    #[test]
    fn request_maps_model_scope_and_page_size() {
        let model = decode("search=shoe&color=red&color=blue&size=9&page=2");
        let scope = ListingScope {
            catalog_id: Some("main".to_string()),
            category_id: Some("boots".to_string()),
        };

        let request = ListingRequest::from_model(&model, &scope, 20);
        assert_eq!(request.catalog_id.as_deref(), Some("main"));
        assert_eq!(request.category_id.as_deref(), Some("boots"));
        assert_eq!(request.page, 2);
        assert_eq!(request.page_size, 20);
        assert_eq!(request.search.as_deref(), Some("shoe"));
        assert_eq!(
            request.filters.get("color"),
            Some(&FilterValue::Many(vec!["red".to_string(), "blue".to_string()]))
        );
        assert_eq!(
            request.filters.get("size"),
            Some(&FilterValue::One("9".to_string()))
        );
    }

    #[test]
    fn request_serializes_with_service_field_names() {
        let model = FilterModel::default().with_value("color", "red");
        let request = ListingRequest::from_model(&model, &ListingScope::default(), 20);
        let json = serde_json::to_value(&request).expect("request should serialize");
        assert_eq!(
            json,
            serde_json::json!({
                "filters": { "color": "red" },
                "page": 1,
                "pageSize": 20
            })
        );
    }

    #[test]
    fn query_pairs_repeat_multi_valued_filters() {
        let model = decode("color=red&color=blue&search=boot");
        let request = ListingRequest::from_model(&model, &ListingScope::default(), 10);
        let pairs = request.query_pairs();
        let as_refs: Vec<(&str, &str)> = pairs
            .iter()
            .map(|(k, v)| (k.as_str(), v.as_str()))
            .collect();
        assert_eq!(
            as_refs,
            vec![
                ("search", "boot"),
                ("page", "1"),
                ("pageSize", "10"),
                ("color", "red"),
                ("color", "blue"),
            ]
        );
    }

    #[test]
    fn result_deserializes_service_payload() {
        let raw = r#"{
            "Meta": {
                "Page": 1,
                "PageSize": 20,
                "TotalCount": 2,
                "TotalPages": 1,
                "ItemRange": [1, 2],
                "Facets": [
                    { "Name": "Color", "XpPath": "xp.Color",
                      "Values": [ { "Value": "red", "Count": 2 } ] }
                ]
            },
            "Items": [
                { "ID": "p1", "Name": "Trail Shoe", "Description": null, "xp": { "Color": "red" } },
                { "ID": "p2", "Name": "Road Shoe" }
            ]
        }"#;

        let result: ListingResult = serde_json::from_str(raw).expect("payload should parse");
        assert_eq!(result.items.len(), 2);
        assert_eq!(result.items[1].description, None);
        assert_eq!(result.total_pages(), 1);
        assert_eq!(result.facets()[0].filter_key(), "xp.Color");
        assert_eq!(result.facets()[0].values[0].count, 2);
    }
}

use percent_encoding::percent_decode_str;

const PRODUCTS_ROUTE: &str = "products";
const PRODUCT_LIST_ROUTE: &str = "product-list";

/// Catalog/category narrowing carried by the address path.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListingScope {
    pub catalog_id: Option<String>,
    pub category_id: Option<String>,
}

impl ListingScope {
    /// `/products` lists everything visible; `/product-list/{catalog}/{category}`
    /// narrows the listing. Other paths are not listing routes.
    pub fn from_path(path: &str) -> Option<Self> {
        let segments: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();
        match segments.as_slice() {
            [PRODUCTS_ROUTE] => Some(Self::default()),
            [PRODUCT_LIST_ROUTE, catalog, category] => Some(Self {
                catalog_id: Some(decode_segment(catalog)),
                category_id: Some(decode_segment(category)),
            }),
            _ => None,
        }
    }
}

fn decode_segment(segment: &str) -> String {
    percent_decode_str(segment).decode_utf8_lossy().into_owned()
}

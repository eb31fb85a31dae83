use futures_util::future::BoxFuture;

use crate::error::AppResult;

use super::types::{ListingRequest, ListingResult};

/// Remote commerce catalog, seen as a query service.
///
/// Instances are constructed by the caller and injected; nothing here is
/// process-global.
pub trait CatalogService: Send + Sync {
    fn list_products(
        &self,
        request: ListingRequest,
    ) -> BoxFuture<'static, AppResult<ListingResult>>;
}

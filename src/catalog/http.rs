use futures_util::FutureExt;
use futures_util::future::BoxFuture;
use reqwest::StatusCode;
use reqwest::header::{ACCEPT, HeaderMap, HeaderValue};

use crate::config::CatalogConfig;
use crate::error::{AppError, AppResult};

use super::service::CatalogService;
use super::types::{ListingRequest, ListingResult};

const PRODUCTS_ENDPOINT: &str = "me/products";

/// Catalog service over the commerce REST API.
#[derive(Clone)]
pub struct HttpCatalogService {
    http: reqwest::Client,
    base_url: String,
    access_token: Option<String>,
}

impl HttpCatalogService {
    pub fn new(config: &CatalogConfig) -> AppResult<Self> {
        let http = reqwest::Client::builder()
            .timeout(config.timeout())
            .build()?;
        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            access_token: config.access_token.clone(),
        })
    }

    fn headers(&self) -> AppResult<HeaderMap> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        if let Some(token) = &self.access_token {
            let value = HeaderValue::from_str(&format!("Bearer {token}"))
                .map_err(|_| AppError::invalid_argument("access token is not a valid header"))?;
            headers.insert(reqwest::header::AUTHORIZATION, value);
        }
        Ok(headers)
    }
}

impl CatalogService for HttpCatalogService {
    fn list_products(
        &self,
        request: ListingRequest,
    ) -> BoxFuture<'static, AppResult<ListingResult>> {
        let http = self.http.clone();
        let url = format!("{}/{PRODUCTS_ENDPOINT}", self.base_url);
        let headers = self.headers();

        async move {
            let headers = headers?;
            let pairs = request.query_pairs();
            tracing::debug!(%url, page = request.page, "listing products");
            let response = http.get(&url).headers(headers).query(&pairs).send().await?;
            let status = response.status();
            if !status.is_success() {
                let body = response.text().await.unwrap_or_default();
                return Err(status_error(status, &body));
            }
            let result = response.json::<ListingResult>().await?;
            Ok(result)
        }
        .boxed()
    }
}

fn status_error(status: StatusCode, body: &str) -> AppError {
    match status {
        StatusCode::UNAUTHORIZED => AppError::Unauthorized,
        StatusCode::FORBIDDEN => AppError::PermissionDenied,
        _ => AppError::service(status.as_u16(), service_message(status, body)),
    }
}

/// Pulls the first error message out of an API error body, falling back to
/// the status reason.
fn service_message(status: StatusCode, body: &str) -> String {
    let parsed = serde_json::from_str::<serde_json::Value>(body).ok();
    let message = parsed.as_ref().and_then(|value| {
        value
            .pointer("/Errors/0/Message")
            .or_else(|| value.get("message"))
            .and_then(serde_json::Value::as_str)
    });
    match message {
        Some(message) => message.to_string(),
        None => status
            .canonical_reason()
            .unwrap_or("unexpected status")
            .to_string(),
    }
}

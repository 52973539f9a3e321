use std::time::Duration;

use reqwest::StatusCode;

use super::{FoodItem, LookupError, ProductResponse};

/// Public Open Food Facts instance.
pub const DEFAULT_BASE_URL: &str = "https://world.openfoodfacts.org";

/// HTTP client for product lookups.
///
/// Each lookup issues a single `GET {base_url}/api/v0/product/{id}.json`.
/// Requests are never retried.
#[derive(Debug, Clone)]
pub struct LookupClient {
    base_url: String,
    http: reqwest::Client,
}

impl LookupClient {
    /// Creates a client for `base_url`. Without a timeout a stalled request
    /// waits indefinitely.
    pub fn new(
        base_url: impl Into<String>,
        timeout: Option<Duration>,
    ) -> Result<Self, LookupError> {
        let mut builder = reqwest::Client::builder()
            .user_agent(concat!("caltrack/", env!("CARGO_PKG_VERSION")));
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let http = builder
            .build()
            .map_err(|e| LookupError::Network(e.to_string()))?;

        Ok(Self::with_http(base_url, http))
    }

    /// Creates a client that sends its requests through `http`.
    pub fn with_http(base_url: impl Into<String>, http: reqwest::Client) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            http,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// URL of the product record for `product_id`.
    pub fn product_url(&self, product_id: &str) -> String {
        format!(
            "{}/api/v0/product/{}.json",
            self.base_url,
            urlencoding::encode(product_id)
        )
    }

    /// Fetches the product and derives the calories of a `portion_grams` serving.
    pub async fn lookup(
        &self,
        product_id: &str,
        portion_grams: f64,
    ) -> Result<FoodItem, LookupError> {
        let product_id = product_id.trim();
        if product_id.is_empty() {
            return Err(LookupError::InvalidProductId(product_id.to_string()));
        }

        let url = self.product_url(product_id);
        tracing::debug!("Looking up product {} at {}", product_id, url);

        let response = self
            .http
            .get(&url)
            .send()
            .await
            .map_err(|e| LookupError::Network(e.to_string()))?;

        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            return Err(LookupError::NotFound);
        }
        if !status.is_success() {
            return Err(LookupError::Network(format!(
                "Server returned status {}",
                status
            )));
        }

        let body: ProductResponse = response
            .json()
            .await
            .map_err(|e| LookupError::InvalidResponse(e.to_string()))?;

        let food = body.into_food(portion_grams)?;
        tracing::debug!(
            "Product {} resolved to '{}' ({} kcal)",
            product_id,
            food.name,
            food.total_calories
        );
        Ok(food)
    }
}

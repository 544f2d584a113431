//! HTTP client for the warehouse inventory endpoint.
//!
//! One GET per search, authenticated with a static bearer token. No retry,
//! caching or request timeout is applied; a failed search is terminal.

use reqwest::{Client, Url};
use stockmap_core::InventoryResponse;

use crate::error::InventoryError;

/// Client for the inventory search endpoint.
///
/// Use [`InventoryClient::new`] with the configured endpoint; tests point it
/// at a wiremock server.
pub struct InventoryClient {
    client: Client,
    endpoint: Url,
    token: String,
}

impl InventoryClient {
    /// Creates a client for `endpoint`, sending `token` as a bearer credential.
    ///
    /// # Errors
    ///
    /// Returns [`InventoryError::InvalidEndpoint`] if `endpoint` is not a
    /// valid URL, or [`InventoryError::Http`] if the underlying
    /// `reqwest::Client` cannot be constructed.
    pub fn new(endpoint: &str, token: &str) -> Result<Self, InventoryError> {
        let endpoint = Url::parse(endpoint).map_err(|e| InventoryError::InvalidEndpoint {
            endpoint: endpoint.to_string(),
            reason: e.to_string(),
        })?;

        let client = Client::builder()
            .user_agent("stockmap/0.1 (warehouse-search)")
            .build()?;

        Ok(Self {
            client,
            endpoint,
            token: token.to_owned(),
        })
    }

    /// Fetches warehouses within `radius` miles for the given access
    /// identifier.
    ///
    /// # Errors
    ///
    /// - [`InventoryError::Http`] on network failure.
    /// - [`InventoryError::UnexpectedStatus`] on any non-2xx status.
    /// - [`InventoryError::Deserialize`] if the body does not match the
    ///   expected shape.
    pub async fn fetch_inventory(
        &self,
        identifier: &str,
        radius: u32,
    ) -> Result<InventoryResponse, InventoryError> {
        let url = self.build_url(identifier, radius);
        tracing::debug!(radius, "requesting inventory");

        let response = self
            .client
            .get(url)
            .bearer_auth(&self.token)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            tracing::warn!(status = status.as_u16(), "inventory request failed");
            return Err(InventoryError::UnexpectedStatus {
                status: status.as_u16(),
            });
        }

        let body = response.text().await?;
        let parsed: InventoryResponse =
            serde_json::from_str(&body).map_err(|e| InventoryError::Deserialize {
                context: format!("inventory(radius={radius})"),
                source: e,
            })?;

        tracing::info!(
            warehouses = parsed.warehouses.len(),
            total_products = parsed.total_products,
            "inventory fetched"
        );
        Ok(parsed)
    }

    /// Builds the request URL with `radius` and `user` query parameters,
    /// keeping any parameters already present on the endpoint.
    fn build_url(&self, identifier: &str, radius: u32) -> Url {
        let mut url = self.endpoint.clone();
        url.query_pairs_mut()
            .append_pair("radius", &radius.to_string())
            .append_pair("user", identifier);
        url
    }
}

#[cfg(test)]
#[path = "client_test.rs"]
mod tests;

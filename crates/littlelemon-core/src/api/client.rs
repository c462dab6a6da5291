//! HTTP client for the remote menu resource.

use std::time::Duration;

use reqwest::Client;
use tracing::{debug, info};

use crate::cache::MenuSource;
use crate::config::Config;
use crate::models::{MenuItem, MenuResponse};
use crate::Result;

use super::ApiError;

/// HTTP request timeout in seconds.
const REQUEST_TIMEOUT_SECS: u64 = 30;

/// Client for the static menu document.
/// Clone is cheap - reqwest::Client uses Arc internally for connection pooling.
#[derive(Clone)]
pub struct MenuClient {
    client: Client,
    menu_url: String,
    image_base_url: String,
}

impl MenuClient {
    pub fn new(config: &Config) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()?;

        Ok(Self {
            client,
            menu_url: config.menu_url.clone(),
            image_base_url: config.image_base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn menu_url(&self) -> &str {
        &self.menu_url
    }

    /// Resolve an item's image filename to a fetchable URL.
    pub fn image_url(&self, image: &str) -> String {
        format!("{}/{}?raw=true", self.image_base_url, image)
    }

    /// Check if response is successful, returning an error with body if not.
    async fn check_response(response: reqwest::Response) -> Result<reqwest::Response> {
        if response.status().is_success() {
            Ok(response)
        } else {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            Err(ApiError::from_status(status, &body).into())
        }
    }

    /// GET the menu document and parse its `menu` field.
    pub async fn fetch_menu(&self) -> Result<Vec<MenuItem>> {
        debug!(url = %self.menu_url, "Fetching remote menu");
        let response = self.client.get(&self.menu_url).send().await?;
        let response = Self::check_response(response).await?;

        // The host serves text/plain, so decode the body ourselves.
        let body = response.text().await?;
        let parsed: MenuResponse = serde_json::from_str(&body)?;
        let items = parsed.into_items();

        info!(count = items.len(), "Remote menu fetched");
        Ok(items)
    }
}

impl MenuSource for MenuClient {
    async fn fetch_menu(&self) -> Result<Vec<MenuItem>> {
        MenuClient::fetch_menu(self).await
    }
}

use std::time::Duration;

use tracing::info;

const USER_AGENT: &str = "filament-catalog/0.1";

/// HTTP client for one-shot product page fetches. No retries.
pub struct ImportHttpClient {
    client: reqwest::Client,
}

impl ImportHttpClient {
    /// Create a client with a fixed user agent and a 30 second timeout.
    pub fn new() -> Result<Self, String> {
        let client = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(Duration::from_secs(30))
            .build()
            .map_err(|e| format!("Failed to build HTTP client: {}", e))?;
        Ok(Self { client })
    }

    /// Fetch a page's HTML content. Non-success statuses are errors.
    pub async fn fetch_page(&self, url: &str) -> Result<String, String> {
        info!("Fetching page: {}", url);
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| format!("Failed to fetch '{}': {}", url, e))?;

        if !response.status().is_success() {
            let status = response.status();
            return Err(format!(
                "HTTP error fetching '{}': {} {}",
                url,
                status.as_u16(),
                status.canonical_reason().unwrap_or("Unknown")
            ));
        }

        response
            .text()
            .await
            .map_err(|e| format!("Failed to read response body from '{}': {}", url, e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_fetch_page_rejects_invalid_url() {
        let client = ImportHttpClient::new().unwrap();
        let err = client.fetch_page("not a url").await.unwrap_err();
        assert!(err.starts_with("Failed to fetch 'not a url'"), "{}", err);
    }
}

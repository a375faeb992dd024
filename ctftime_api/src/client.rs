//! HTTP client for public CTFtime pages.

use std::time::Duration;

use url::Url;

use crate::{user_agent::get_user_agent, Error};

/// HTTP client for public CTFtime pages.
///
/// Sends requests with browser-like headers and a randomized user agent.
/// Each request builds a fresh `reqwest::Client` with a 30-second timeout,
/// so every request goes out under a newly picked user agent.
pub struct Client {
    /// Base URL for the site. Defaults to `https://ctftime.org`.
    base_url: String,
}

impl Default for Client {
    fn default() -> Self {
        Self::new()
    }
}

impl Client {
    /// Creates a new client pointing at the production CTFtime site.
    pub fn new() -> Self {
        Self {
            base_url: "https://ctftime.org".to_string(),
        }
    }

    /// Creates a new client with a custom base URL. Used for testing with wiremock.
    pub fn with_base_url(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    /// Returns the URL of the profile page for `team_id`.
    pub fn team_url(&self, team_id: &str) -> Result<Url, Error> {
        let base = Url::parse(&self.base_url).map_err(|e| {
            tracing::error!("Invalid base URL {}: {}", self.base_url, e);
            Error::RequestFailed
        })?;
        let mut url = base.clone();
        url.path_segments_mut()
            .map_err(|_| {
                tracing::error!("Base URL cannot carry a path: {}", base);
                Error::RequestFailed
            })?
            .pop_if_empty()
            .push("team")
            .push(team_id);
        Ok(url)
    }

    async fn get_html(&self, url: Url) -> Result<String, Error> {
        let client = reqwest::Client::builder()
            .user_agent(get_user_agent())
            .timeout(Duration::from_secs(30))
            .build()
            .map_err(|e| {
                tracing::error!("Failed to build HTTP client: {}", e);
                Error::RequestFailed
            })?;

        tracing::info!("Scraping {}", url);
        let resp = client
            .get(url)
            .header("accept", "text/html,application/xhtml+xml")
            .header("accept-language", "en-US,en;q=0.9")
            .header("upgrade-insecure-requests", "1")
            .send()
            .await
            .map_err(|e| {
                tracing::error!("Failed to get page: {}", e);
                Error::RequestFailed
            })?;

        let status = resp.status();
        tracing::info!("Response received {}", status.as_u16());
        let body = resp.text().await.map_err(|e| {
            tracing::error!("Failed to read response body: {}", e);
            Error::RequestFailed
        })?;

        if !status.is_success() {
            let snippet = truncate_body(&body);
            tracing::error!("Request failed with status {}: {}", status, snippet);
            return Err(Error::HttpStatus {
                status: status.as_u16(),
                body: snippet,
            });
        }

        Ok(body)
    }

    /// Fetches the raw HTML of a team's profile page.
    pub async fn get_team_page(&self, team_id: &str) -> Result<String, Error> {
        let url = self.team_url(team_id)?;
        self.get_html(url).await
    }
}

fn truncate_body(body: &str) -> String {
    const MAX: usize = 2000;
    if body.len() <= MAX {
        return body.to_string();
    }
    let mut end = MAX;
    while !body.is_char_boundary(end) {
        end -= 1;
    }
    format!("{}...[truncated]", &body[..end])
}

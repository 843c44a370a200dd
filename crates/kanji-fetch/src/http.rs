//! Blocking HTTP asset source.

use reqwest::blocking::Client;
use reqwest::header::USER_AGENT;

use crate::config::FetchConfig;
use crate::error::{FetchError, Result};
use crate::fetch::AssetSource;

/// Asset source backed by a blocking `reqwest` client.
pub struct HttpAssetSource {
    client: Client,
    user_agent: String,
}

impl HttpAssetSource {
    pub fn new(config: &FetchConfig) -> Result<Self> {
        let client = Client::builder().timeout(config.timeout).build()?;
        Ok(Self {
            client,
            user_agent: config.user_agent.clone(),
        })
    }
}

impl AssetSource for HttpAssetSource {
    /// `Ok(None)` means the remote host has no asset under this name (404);
    /// any other non-success status is an error worth retrying.
    fn get(&self, url: &str) -> Result<Option<String>> {
        let response = self
            .client
            .get(url)
            .header(USER_AGENT, self.user_agent.as_str())
            .send()?;
        let status = response.status();
        if status == reqwest::StatusCode::NOT_FOUND {
            return Ok(None);
        }
        if !status.is_success() {
            return Err(FetchError::Status {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }
        Ok(Some(response.text()?))
    }
}

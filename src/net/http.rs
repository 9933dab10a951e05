//! HTTP client for the authority's Flask-style endpoint

use super::authority::{Authority, AuthorityResult};
use super::protocol::{MoveRequest, MoveResponse};
use async_trait::async_trait;
use tracing::debug;
use url::Url;

/// Authority reached over HTTP (`POST {base}/move`, `GET {base}/health`)
#[derive(Debug, Clone)]
pub struct HttpAuthority {
    client: reqwest::Client,
    base: Url,
}

impl HttpAuthority {
    pub fn new(base: Url) -> Self {
        Self {
            client: reqwest::Client::new(),
            base,
        }
    }

    /// Startup probe; cheap way to surface a bad endpoint before play starts
    pub async fn health(&self) -> AuthorityResult<()> {
        let url = self.base.join("health")?;
        self.client.get(url).send().await?.error_for_status()?;
        Ok(())
    }
}

#[async_trait]
impl Authority for HttpAuthority {
    async fn submit_move(&self, request: MoveRequest) -> AuthorityResult<MoveResponse> {
        let url = self.base.join("move")?;
        debug!(
            "[HTTP] POST {url} ({},{}) -> ({},{})",
            request.from_row, request.from_col, request.to_row, request.to_col
        );
        let response = self
            .client
            .post(url)
            .json(&request)
            .send()
            .await?
            .error_for_status()?;
        let verdict = response.json::<MoveResponse>().await?;
        debug!("[HTTP] verdict valid={}", verdict.valid);
        Ok(verdict)
    }
}

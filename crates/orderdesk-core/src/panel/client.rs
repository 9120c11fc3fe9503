use super::{PanelApi, PanelError, PanelRequest, PanelResponse};
use crate::config::PanelSettings;
use async_trait::async_trait;
use reqwest::Client as HttpClient;
use tracing::{debug, instrument, warn};

/// Panel client over a single fixed endpoint.
///
/// No retries are attempted: a failed call is reported to the user once.
#[derive(Clone)]
pub struct PanelClient {
    http: HttpClient,
    endpoint: String,
}

impl PanelClient {
    /// Create a client from settings.
    ///
    /// Falls back to a default `reqwest` client if the configured one cannot
    /// be built.
    #[must_use]
    pub fn new(settings: &PanelSettings) -> Self {
        let http = HttpClient::builder()
            .timeout(settings.http_timeout())
            .build()
            .unwrap_or_else(|_| HttpClient::new());

        Self {
            http,
            endpoint: settings.panel_api_url.clone(),
        }
    }

    /// Endpoint all requests are posted to.
    #[must_use]
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl PanelApi for PanelClient {
    #[instrument(skip_all, fields(action = %request.action))]
    async fn call(&self, request: PanelRequest) -> Result<PanelResponse, PanelError> {
        let response = self
            .http
            .post(&self.endpoint)
            .form(&request.form())
            .send()
            .await
            .map_err(|e| PanelError::Network(e.without_url().to_string()))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| PanelError::Network(e.without_url().to_string()))?;

        // The body decides the outcome, whatever the status.
        if !status.is_success() {
            warn!(%status, "Panel replied with non-success status");
        }
        debug!(bytes = body.len(), "Panel reply received");

        PanelResponse::parse(&body)
    }
}

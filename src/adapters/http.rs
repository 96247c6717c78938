use crate::config::ContactConfig;
use crate::domain::model::ContactPayload;
use crate::domain::ports::ContactTransport;
use crate::utils::error::{Result, SiteError};
use async_trait::async_trait;
use reqwest::header::CONTENT_TYPE;
use reqwest::Client;

/// 以 JSON POST 送出聯絡表單；不設逾時，交由底層連線決定
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: Client,
    endpoint: String,
}

impl HttpTransport {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            endpoint: endpoint.into(),
        }
    }

    pub fn from_config(config: &ContactConfig) -> Self {
        Self::new(config.endpoint.clone())
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl ContactTransport for HttpTransport {
    async fn deliver(&self, payload: &ContactPayload) -> Result<()> {
        let body = serde_json::to_vec(payload)?;
        tracing::debug!("POST {} ({} bytes)", self.endpoint, body.len());

        let response = self
            .client
            .post(&self.endpoint)
            .header(CONTENT_TYPE, "application/json")
            .body(body)
            .send()
            .await?;

        let status = response.status();
        tracing::debug!("Contact endpoint responded with {}", status);

        if !status.is_success() {
            return Err(SiteError::DeliveryRejected {
                status: status.as_u16(),
            });
        }
        Ok(())
    }
}

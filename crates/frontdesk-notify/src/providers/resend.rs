//! Transactional email over Resend's HTTP API.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use frontdesk_domain::channel::Channel;

use super::error_for_status;
use crate::provider::{Provider, ProviderError};

#[derive(Serialize)]
struct SendEmailRequest<'a> {
    from: &'a str,
    to: [&'a str; 1],
    subject: &'a str,
    text: &'a str,
}

#[derive(Deserialize)]
struct SendEmailResponse {
    id: Option<String>,
}

pub struct ResendEmail {
    http: reqwest::Client,
    api_url: String,
    api_key: String,
    from: String,
}

impl ResendEmail {
    pub fn new(http: reqwest::Client, api_url: String, api_key: String, from: String) -> Self {
        Self {
            http,
            api_url,
            api_key,
            from,
        }
    }
}

#[async_trait]
impl Provider for ResendEmail {
    fn name(&self) -> &'static str {
        "resend"
    }

    fn channel(&self) -> Channel {
        Channel::Email
    }

    async fn send(&self, to: &str, subject: &str, body: &str) -> Result<String, ProviderError> {
        let payload = SendEmailRequest {
            from: &self.from,
            to: [to],
            subject,
            text: body,
        };

        let response = self
            .http
            .post(&self.api_url)
            .bearer_auth(&self.api_key)
            .json(&payload)
            .send()
            .await?;
        let response = error_for_status(response).await?;

        // A 2xx is the success signal; the id is informational.
        let id = response
            .json::<SendEmailResponse>()
            .await
            .ok()
            .and_then(|r| r.id);
        Ok(id.unwrap_or_else(|| "sent".to_owned()))
    }
}

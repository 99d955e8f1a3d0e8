//! Transactional email over Brevo's HTTP API.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use frontdesk_domain::channel::Channel;

use super::{error_for_status, split_mailbox};
use crate::provider::{Provider, ProviderError};

#[derive(Serialize)]
struct Party<'a> {
    email: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    name: Option<&'a str>,
}

/// Brevo's transactional API names the plain-text body `textContent`, not `text`.
#[derive(Serialize)]
struct SendEmailRequest<'a> {
    sender: Party<'a>,
    to: Vec<Party<'a>>,
    subject: &'a str,
    #[serde(rename = "textContent")]
    text: &'a str,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct SendEmailResponse {
    message_id: Option<String>,
}

pub struct BrevoEmail {
    http: reqwest::Client,
    api_url: String,
    api_key: String,
    from: String,
}

impl BrevoEmail {
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
impl Provider for BrevoEmail {
    fn name(&self) -> &'static str {
        "brevo"
    }

    fn channel(&self) -> Channel {
        Channel::Email
    }

    async fn send(&self, to: &str, subject: &str, body: &str) -> Result<String, ProviderError> {
        let (sender_name, sender_email) = split_mailbox(&self.from);
        let payload = SendEmailRequest {
            sender: Party {
                email: sender_email,
                name: sender_name,
            },
            to: vec![Party {
                email: to,
                name: None,
            }],
            subject,
            text: body,
        };

        let response = self
            .http
            .post(&self.api_url)
            .header("api-key", &self.api_key)
            .header("accept", "application/json")
            .json(&payload)
            .send()
            .await?;
        let response = error_for_status(response).await?;

        let parsed: SendEmailResponse = response
            .json()
            .await
            .map_err(|e| ProviderError::Malformed(e.to_string()))?;
        parsed
            .message_id
            .ok_or_else(|| ProviderError::Malformed("missing messageId".to_owned()))
    }
}

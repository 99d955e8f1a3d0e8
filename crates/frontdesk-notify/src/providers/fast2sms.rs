//! SMS and WhatsApp delivery over the Fast2SMS bulk API.
//!
//! Both routes share one endpoint and response shape: `{"return": bool, ...}`.
//! SMS numbers go out without the Indian country code, WhatsApp numbers without
//! the leading `+` only.

use async_trait::async_trait;
use serde::Serialize;
use serde_json::Value;

use frontdesk_domain::channel::Channel;

use super::error_for_status;
use crate::provider::{Provider, ProviderError};

const LANGUAGE: &str = "english";
const WHATSAPP_SENDER_ID: &str = "WHATSAPP";

#[derive(Serialize)]
struct BulkRequest<'a> {
    route: &'a str,
    sender_id: &'a str,
    message: &'a str,
    language: &'a str,
    flash: u8,
    numbers: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    instance_id: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    token: Option<&'a str>,
}

/// `+91XXXXXXXXXX` → `XXXXXXXXXX`; any other `+<digits>` → `<digits>`.
fn sms_number(canonical: &str) -> Result<String, ProviderError> {
    let stripped = canonical
        .strip_prefix("+91")
        .or_else(|| canonical.strip_prefix('+'))
        .unwrap_or(canonical);
    digits_only(stripped, canonical)
}

/// `+<digits>` → `<digits>`.
fn whatsapp_number(canonical: &str) -> Result<String, ProviderError> {
    let stripped = canonical.strip_prefix('+').unwrap_or(canonical);
    digits_only(stripped, canonical)
}

fn digits_only(candidate: &str, original: &str) -> Result<String, ProviderError> {
    if !candidate.is_empty() && candidate.chars().all(|c| c.is_ascii_digit()) {
        Ok(candidate.to_owned())
    } else {
        Err(ProviderError::InvalidRecipient(original.to_owned()))
    }
}

async fn post_bulk(
    http: &reqwest::Client,
    api_url: &str,
    api_key: &str,
    payload: &BulkRequest<'_>,
) -> Result<String, ProviderError> {
    let response = http
        .post(api_url)
        .header("authorization", api_key)
        .json(payload)
        .send()
        .await?;
    let response = error_for_status(response).await?;
    let body: Value = response
        .json()
        .await
        .map_err(|e| ProviderError::Malformed(e.to_string()))?;
    acknowledgement(&body)
}

/// Success is `"return": true`; the id is `request_id`, else the first message line.
fn acknowledgement(body: &Value) -> Result<String, ProviderError> {
    if body.get("return").and_then(Value::as_bool) != Some(true) {
        return Err(ProviderError::Rejected(body.to_string()));
    }
    let id = body
        .get("request_id")
        .and_then(Value::as_str)
        .or_else(|| match body.get("message") {
            Some(Value::String(s)) => Some(s.as_str()),
            Some(Value::Array(lines)) => lines.first().and_then(Value::as_str),
            _ => None,
        })
        .unwrap_or("ok");
    Ok(id.to_owned())
}

pub struct Fast2Sms {
    http: reqwest::Client,
    api_url: String,
    api_key: String,
    sender_id: String,
}

impl Fast2Sms {
    pub fn new(http: reqwest::Client, api_url: String, api_key: String, sender_id: String) -> Self {
        Self {
            http,
            api_url,
            api_key,
            sender_id,
        }
    }
}

#[async_trait]
impl Provider for Fast2Sms {
    fn name(&self) -> &'static str {
        "fast2sms"
    }

    fn channel(&self) -> Channel {
        Channel::Sms
    }

    async fn send(&self, to: &str, _subject: &str, body: &str) -> Result<String, ProviderError> {
        let numbers = sms_number(to)?;
        let payload = BulkRequest {
            route: "v3",
            sender_id: &self.sender_id,
            message: body,
            language: LANGUAGE,
            flash: 0,
            numbers: &numbers,
            instance_id: None,
            token: None,
        };
        post_bulk(&self.http, &self.api_url, &self.api_key, &payload).await
    }
}

pub struct Fast2SmsWhatsapp {
    http: reqwest::Client,
    api_url: String,
    api_key: String,
    instance_id: String,
    token: String,
}

impl Fast2SmsWhatsapp {
    pub fn new(
        http: reqwest::Client,
        api_url: String,
        api_key: String,
        instance_id: String,
        token: String,
    ) -> Self {
        Self {
            http,
            api_url,
            api_key,
            instance_id,
            token,
        }
    }
}

#[async_trait]
impl Provider for Fast2SmsWhatsapp {
    fn name(&self) -> &'static str {
        "fast2sms-whatsapp"
    }

    fn channel(&self) -> Channel {
        Channel::Whatsapp
    }

    async fn send(&self, to: &str, _subject: &str, body: &str) -> Result<String, ProviderError> {
        let numbers = whatsapp_number(to)?;
        let payload = BulkRequest {
            route: "whatsapp",
            sender_id: WHATSAPP_SENDER_ID,
            message: body,
            language: LANGUAGE,
            flash: 0,
            numbers: &numbers,
            instance_id: Some(&self.instance_id),
            token: Some(&self.token),
        };
        post_bulk(&self.http, &self.api_url, &self.api_key, &payload).await
    }
}

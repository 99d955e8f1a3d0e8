use serde::Deserialize;

use frontdesk_core::config::Config;
use frontdesk_domain::phone::DEFAULT_REGION;

/// Email vendor forced via `EMAIL_PROVIDER`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EmailProviderKind {
    Smtp,
    Brevo,
    Resend,
}

/// Notification settings loaded from environment variables.
///
/// Every vendor block is optional; a vendor whose required settings are absent
/// (or empty) is simply not registered.
#[derive(Debug, Clone, Deserialize)]
pub struct NotifyConfig {
    /// Force a single email vendor. Env var: `EMAIL_PROVIDER`.
    pub email_provider: Option<EmailProviderKind>,
    /// Sender for every email vendor, `addr` or `Name <addr>`. Env var: `DEFAULT_FROM_EMAIL`.
    #[serde(default = "default_from_email")]
    pub default_from_email: String,

    /// SMTP relay host. Env var: `EMAIL_HOST`.
    pub email_host: Option<String>,
    /// SMTP port (default 587). Env var: `EMAIL_PORT`.
    #[serde(default = "default_email_port")]
    pub email_port: u16,
    pub email_host_user: Option<String>,
    pub email_host_password: Option<String>,
    /// STARTTLS on connect (default true). Env var: `EMAIL_USE_TLS`.
    #[serde(default = "default_true")]
    pub email_use_tls: bool,

    pub brevo_api_key: Option<String>,
    #[serde(default = "default_brevo_api_url")]
    pub brevo_api_url: String,

    pub resend_api_key: Option<String>,
    #[serde(default = "default_resend_api_url")]
    pub resend_api_url: String,

    pub fast2sms_api_key: Option<String>,
    #[serde(default = "default_fast2sms_sender_id")]
    pub fast2sms_sender_id: String,
    /// Shared by the SMS and WhatsApp vendors. Env var: `FAST2SMS_API_URL`.
    #[serde(default = "default_fast2sms_api_url")]
    pub fast2sms_api_url: String,

    pub whatsapp_api_key: Option<String>,
    pub whatsapp_instance_id: Option<String>,
    pub whatsapp_token: Option<String>,

    /// Region assumed for numbers without a country code. Env var: `PHONE_DEFAULT_REGION`.
    #[serde(default = "default_region")]
    pub phone_default_region: String,
    /// Concurrent deliveries cap. Env var: `NOTIFY_MAX_IN_FLIGHT`.
    #[serde(default = "default_max_in_flight")]
    pub notify_max_in_flight: usize,
    /// Pending deliveries cap. Env var: `NOTIFY_QUEUE_CAPACITY`.
    #[serde(default = "default_queue_capacity")]
    pub notify_queue_capacity: usize,
}

impl Config for NotifyConfig {}

impl Default for NotifyConfig {
    fn default() -> Self {
        Self {
            email_provider: None,
            default_from_email: default_from_email(),
            email_host: None,
            email_port: default_email_port(),
            email_host_user: None,
            email_host_password: None,
            email_use_tls: true,
            brevo_api_key: None,
            brevo_api_url: default_brevo_api_url(),
            resend_api_key: None,
            resend_api_url: default_resend_api_url(),
            fast2sms_api_key: None,
            fast2sms_sender_id: default_fast2sms_sender_id(),
            fast2sms_api_url: default_fast2sms_api_url(),
            whatsapp_api_key: None,
            whatsapp_instance_id: None,
            whatsapp_token: None,
            phone_default_region: default_region(),
            notify_max_in_flight: default_max_in_flight(),
            notify_queue_capacity: default_queue_capacity(),
        }
    }
}

/// Treat unset and blank settings alike.
pub(crate) fn present(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}

fn default_from_email() -> String {
    "Front Desk <noreply@localhost>".to_owned()
}

fn default_email_port() -> u16 {
    587
}

fn default_true() -> bool {
    true
}

fn default_brevo_api_url() -> String {
    "https://api.brevo.com/v3/smtp/email".to_owned()
}

fn default_resend_api_url() -> String {
    "https://api.resend.com/emails".to_owned()
}

fn default_fast2sms_sender_id() -> String {
    "TXTIND".to_owned()
}

fn default_fast2sms_api_url() -> String {
    "https://www.fast2sms.com/dev/bulkV2".to_owned()
}

fn default_region() -> String {
    DEFAULT_REGION.to_owned()
}

fn default_max_in_flight() -> usize {
    8
}

fn default_queue_capacity() -> usize {
    256
}

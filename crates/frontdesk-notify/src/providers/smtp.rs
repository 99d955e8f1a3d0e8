//! Email over an authenticated SMTP relay.

use async_trait::async_trait;
use lettre::message::header::ContentType;
use lettre::message::Mailbox;
use lettre::transport::smtp::authentication::Credentials;
use lettre::{Address, AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};

use frontdesk_domain::channel::Channel;

use crate::provider::{Provider, ProviderError, SEND_TIMEOUT};

/// Consumer webmail domains that refuse to relay mail whose From domain differs
/// from the authenticated mailbox.
const WEBMAIL_DOMAINS: &[&str] = &[
    "gmail.com",
    "googlemail.com",
    "yahoo.com",
    "outlook.com",
    "hotmail.com",
    "live.com",
];

pub struct SmtpSettings {
    pub host: String,
    pub port: u16,
    pub username: String,
    pub password: String,
    pub starttls: bool,
    pub default_from: String,
}

pub struct SmtpEmail {
    transport: AsyncSmtpTransport<Tokio1Executor>,
    from: Mailbox,
}

impl SmtpEmail {
    pub fn new(settings: SmtpSettings) -> Result<Self, ProviderError> {
        let configured: Mailbox = settings
            .default_from
            .parse()
            .map_err(|e| ProviderError::Config(format!("DEFAULT_FROM_EMAIL: {e}")))?;
        let from = effective_from(configured, &settings.username);

        let builder = if settings.starttls {
            AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&settings.host)
                .map_err(|e| ProviderError::Config(format!("EMAIL_HOST: {e}")))?
        } else {
            AsyncSmtpTransport::<Tokio1Executor>::builder_dangerous(settings.host.as_str())
        };
        let transport = builder
            .port(settings.port)
            .credentials(Credentials::new(settings.username, settings.password))
            .timeout(Some(SEND_TIMEOUT))
            .build();

        Ok(Self { transport, from })
    }
}

/// Webmail relays reject a From domain that differs from the login mailbox, so
/// the sender address is replaced by the login (the display name is kept).
fn effective_from(configured: Mailbox, username: &str) -> Mailbox {
    let Ok(login) = username.trim().parse::<Address>() else {
        return configured;
    };
    let login_domain = login.domain().to_ascii_lowercase();
    let is_webmail = WEBMAIL_DOMAINS.contains(&login_domain.as_str());
    if is_webmail && !configured.email.domain().eq_ignore_ascii_case(&login_domain) {
        tracing::debug!(domain = %login_domain, "rewriting From to the SMTP login mailbox");
        Mailbox::new(configured.name, login)
    } else {
        configured
    }
}

#[async_trait]
impl Provider for SmtpEmail {
    fn name(&self) -> &'static str {
        "smtp"
    }

    fn channel(&self) -> Channel {
        Channel::Email
    }

    async fn send(&self, to: &str, subject: &str, body: &str) -> Result<String, ProviderError> {
        let recipient: Mailbox = to
            .trim()
            .parse()
            .map_err(|_| ProviderError::InvalidRecipient(to.to_owned()))?;
        let message = Message::builder()
            .from(self.from.clone())
            .to(recipient)
            .subject(subject)
            .header(ContentType::TEXT_PLAIN)
            .body(body.to_owned())
            .map_err(|e| ProviderError::Smtp(e.to_string()))?;

        let response = self
            .transport
            .send(message)
            .await
            .map_err(|e| ProviderError::Smtp(e.to_string()))?;
        Ok(response
            .message()
            .next()
            .map(str::to_owned)
            .unwrap_or_else(|| "sent".to_owned()))
    }
}

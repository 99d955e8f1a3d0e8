use std::sync::Arc;

use frontdesk_domain::channel::Channel;

use crate::config::{EmailProviderKind, NotifyConfig, present};
use crate::provider::{Provider, ProviderError, SEND_TIMEOUT};
use crate::providers::brevo::BrevoEmail;
use crate::providers::fast2sms::{Fast2Sms, Fast2SmsWhatsapp};
use crate::providers::resend::ResendEmail;
use crate::providers::smtp::{SmtpEmail, SmtpSettings};

/// At most one provider per channel, chosen at startup from configuration.
#[derive(Clone, Default)]
pub struct ProviderRegistry {
    email: Option<Arc<dyn Provider>>,
    sms: Option<Arc<dyn Provider>>,
    whatsapp: Option<Arc<dyn Provider>>,
}

impl ProviderRegistry {
    /// A registry with no channel configured.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Register `provider` for its channel, replacing any previous one.
    pub fn with(mut self, provider: Arc<dyn Provider>) -> Self {
        let slot = match provider.channel() {
            Channel::Email => &mut self.email,
            Channel::Sms => &mut self.sms,
            Channel::Whatsapp => &mut self.whatsapp,
        };
        *slot = Some(provider);
        self
    }

    pub fn for_channel(&self, channel: Channel) -> Option<&Arc<dyn Provider>> {
        match channel {
            Channel::Email => self.email.as_ref(),
            Channel::Sms => self.sms.as_ref(),
            Channel::Whatsapp => self.whatsapp.as_ref(),
        }
    }

    /// `(channel, provider name)` for every configured channel.
    pub fn describe(&self) -> Vec<(Channel, &'static str)> {
        [Channel::Email, Channel::Sms, Channel::Whatsapp]
            .into_iter()
            .filter_map(|c| self.for_channel(c).map(|p| (c, p.name())))
            .collect()
    }

    /// Build from settings. Vendors with missing credentials are skipped;
    /// settings that are present but unusable are an error.
    pub fn from_config(config: &NotifyConfig) -> Result<Self, ProviderError> {
        let http = reqwest::Client::builder()
            .timeout(SEND_TIMEOUT)
            .build()
            .map_err(|e| ProviderError::Config(e.to_string()))?;

        let mut registry = Self::empty();

        if let Some(email) = select_email(config, &http)? {
            registry = registry.with(email);
        }

        if let Some(api_key) = present(&config.fast2sms_api_key) {
            registry = registry.with(Arc::new(Fast2Sms::new(
                http.clone(),
                config.fast2sms_api_url.clone(),
                api_key.to_owned(),
                config.fast2sms_sender_id.clone(),
            )));
        }

        if let (Some(api_key), Some(instance_id), Some(token)) = (
            present(&config.whatsapp_api_key),
            present(&config.whatsapp_instance_id),
            present(&config.whatsapp_token),
        ) {
            registry = registry.with(Arc::new(Fast2SmsWhatsapp::new(
                http.clone(),
                config.fast2sms_api_url.clone(),
                api_key.to_owned(),
                instance_id.to_owned(),
                token.to_owned(),
            )));
        }

        for (channel, name) in registry.describe() {
            tracing::info!(%channel, provider = name, "notification provider registered");
        }
        Ok(registry)
    }
}

/// `EMAIL_PROVIDER` wins when set; otherwise the first fully configured of
/// brevo, resend, smtp.
fn select_email(
    config: &NotifyConfig,
    http: &reqwest::Client,
) -> Result<Option<Arc<dyn Provider>>, ProviderError> {
    let order = match config.email_provider {
        Some(kind) => vec![kind],
        None => vec![
            EmailProviderKind::Brevo,
            EmailProviderKind::Resend,
            EmailProviderKind::Smtp,
        ],
    };

    for kind in order {
        if let Some(provider) = build_email(kind, config, http)? {
            return Ok(Some(provider));
        }
    }

    if let Some(kind) = config.email_provider {
        tracing::warn!(?kind, "EMAIL_PROVIDER is set but its credentials are missing");
    }
    Ok(None)
}

fn build_email(
    kind: EmailProviderKind,
    config: &NotifyConfig,
    http: &reqwest::Client,
) -> Result<Option<Arc<dyn Provider>>, ProviderError> {
    let from = config.default_from_email.clone();
    let provider: Option<Arc<dyn Provider>> = match kind {
        EmailProviderKind::Brevo => present(&config.brevo_api_key).map(|key| {
            Arc::new(BrevoEmail::new(
                http.clone(),
                config.brevo_api_url.clone(),
                key.to_owned(),
                from,
            )) as Arc<dyn Provider>
        }),
        EmailProviderKind::Resend => present(&config.resend_api_key).map(|key| {
            Arc::new(ResendEmail::new(
                http.clone(),
                config.resend_api_url.clone(),
                key.to_owned(),
                from,
            )) as Arc<dyn Provider>
        }),
        EmailProviderKind::Smtp => match (
            present(&config.email_host),
            present(&config.email_host_user),
            present(&config.email_host_password),
        ) {
            (Some(host), Some(username), Some(password)) => {
                Some(Arc::new(SmtpEmail::new(SmtpSettings {
                    host: host.to_owned(),
                    port: config.email_port,
                    username: username.to_owned(),
                    password: password.to_owned(),
                    starttls: config.email_use_tls,
                    default_from: from,
                })?) as Arc<dyn Provider>)
            }
            _ => None,
        },
    };
    Ok(provider)
}

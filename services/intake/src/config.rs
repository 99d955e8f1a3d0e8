use serde::{Deserialize, Deserializer};

use frontdesk_core::config::Config;
use frontdesk_domain::channel::Channel;
use frontdesk_session::cookie::DEFAULT_SESSION_TTL_SECS;

/// Intake service configuration loaded from environment variables.
///
/// Notification vendors are configured separately through
/// [`frontdesk_notify::config::NotifyConfig`].
#[derive(Debug, Clone, Deserialize)]
pub struct IntakeConfig {
    /// PostgreSQL connection URL.
    pub database_url: String,
    /// Redis URL for session state.
    pub redis_url: String,
    /// Domain attribute of the session cookie.
    pub cookie_domain: String,
    /// TCP port for the HTTP server (default 3120). Env var: `INTAKE_PORT`.
    #[serde(default = "default_port")]
    pub intake_port: u16,
    /// Lifetime of session state and of the session cookie. Env var: `SESSION_TTL_SECS`.
    #[serde(default = "default_session_ttl")]
    pub session_ttl_secs: u64,
    /// Channels used to alert a host about an arrival, comma separated
    /// (default `email`). Env var: `HOST_ALERT_CHANNELS`.
    #[serde(default = "default_alert_channels", deserialize_with = "channel_list")]
    pub host_alert_channels: Vec<Channel>,
}

impl Config for IntakeConfig {}

fn default_port() -> u16 {
    3120
}

fn default_session_ttl() -> u64 {
    DEFAULT_SESSION_TTL_SECS
}

fn default_alert_channels() -> Vec<Channel> {
    vec![Channel::Email]
}

fn channel_list<'de, D>(deserializer: D) -> Result<Vec<Channel>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    let mut channels = Vec::new();
    for part in raw.split(',').map(str::trim).filter(|p| !p.is_empty()) {
        let channel: Channel = part.parse().map_err(serde::de::Error::custom)?;
        if !channels.contains(&channel) {
            channels.push(channel);
        }
    }
    if channels.is_empty() {
        return Err(serde::de::Error::custom(
            "HOST_ALERT_CHANNELS must name at least one channel",
        ));
    }
    Ok(channels)
}

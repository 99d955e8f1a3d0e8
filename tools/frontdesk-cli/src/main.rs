//! Operator tooling for the front desk notification stack.
//!
//! # Usage
//!
//! ```bash
//! # Which vendor serves each channel with the current environment
//! cargo run -p frontdesk-cli -- providers
//!
//! # Send a test message through the configured provider
//! cargo run -p frontdesk-cli -- send --channel sms --to "98765 43210" --message "hello"
//!
//! # Show the canonical form of a phone number
//! cargo run -p frontdesk-cli -- normalize "098765 43210"
//! ```
//!
//! Settings are read from the environment, after loading `.env` if present.

use anyhow::{Context as _, Result};
use clap::{Parser, Subcommand};

use frontdesk_core::config::Config;
use frontdesk_domain::channel::Channel;
use frontdesk_domain::phone::{self, DEFAULT_REGION};
use frontdesk_notify::config::NotifyConfig;
use frontdesk_notify::{Dispatcher, ProviderRegistry};

#[derive(Parser)]
#[command(about = "Front desk notification tooling")]
struct Args {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// List the provider registered for each channel
    Providers,

    /// Deliver one message synchronously and print the provider message id
    Send {
        /// email, sms or whatsapp
        #[arg(long)]
        channel: Channel,

        /// Email address or phone number
        #[arg(long)]
        to: String,

        /// Email subject (ignored for phone channels)
        #[arg(long, default_value = "Front desk test message")]
        subject: String,

        #[arg(long)]
        message: String,
    },

    /// Print the canonical `+<digits>` form of a phone number
    Normalize {
        raw: String,

        /// Region used when the number has no country code
        #[arg(long, default_value = DEFAULT_REGION)]
        region: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenv::dotenv().ok();
    frontdesk_core::tracing::init_tracing_pretty();

    let args = Args::parse();
    match args.command {
        Command::Providers => {
            let registry = ProviderRegistry::from_config(&notify_config()?)
                .context("failed to build provider registry")?;
            print_providers(&registry);
        }
        Command::Send {
            channel,
            to,
            subject,
            message,
        } => {
            let dispatcher = Dispatcher::from_config(&notify_config()?)
                .context("failed to build dispatcher")?;
            let id = dispatcher
                .send_now(channel, &to, &subject, &message)
                .await
                .with_context(|| format!("{channel} delivery to {to} failed"))?;
            tracing::info!(%channel, message_id = %id, "message delivered");
            println!("{id}");
        }
        Command::Normalize { raw, region } => {
            let canonical = phone::normalize(&raw, &region)
                .with_context(|| format!("cannot normalize {raw:?}"))?;
            println!("{canonical}");
        }
    }
    Ok(())
}

fn notify_config() -> Result<NotifyConfig> {
    NotifyConfig::try_from_env().context("failed to load notification settings")
}

fn print_providers(registry: &ProviderRegistry) {
    for channel in [Channel::Email, Channel::Sms, Channel::Whatsapp] {
        let vendor = registry
            .describe()
            .into_iter()
            .find_map(|(c, name)| (c == channel).then_some(name))
            .unwrap_or("-");
        println!("{:<10} {vendor}", channel.as_str());
    }
}

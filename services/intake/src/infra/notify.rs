use frontdesk_domain::channel::Channel;
use frontdesk_notify::{DispatchOutcome, Dispatcher};

use crate::domain::repository::NotificationPort;

/// Hands notifications to the shared background dispatcher.
#[derive(Clone)]
pub struct DispatcherNotifier {
    pub dispatcher: Dispatcher,
}

impl NotificationPort for DispatcherNotifier {
    fn send(&self, channel: Channel, recipient: &str, subject: &str, body: &str) -> DispatchOutcome {
        self.dispatcher.send(channel, recipient, subject, body)
    }
}

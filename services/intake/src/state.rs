use deadpool_redis::Pool as RedisPool;
use sea_orm::DatabaseConnection;

use frontdesk_domain::channel::Channel;
use frontdesk_notify::Dispatcher;

use crate::infra::db::{DbHostDirectory, DbVisitRepository};
use crate::infra::notify::DispatcherNotifier;
use crate::infra::session::RedisSessionStore;

/// Shared application state passed to every handler via axum `State`.
#[derive(Clone)]
pub struct AppState {
    pub db: DatabaseConnection,
    pub redis: RedisPool,
    pub dispatcher: Dispatcher,
    pub cookie_domain: String,
    pub session_ttl_secs: u64,
    pub alert_channels: Vec<Channel>,
    pub phone_region: String,
}

impl AppState {
    pub fn host_directory(&self) -> DbHostDirectory {
        DbHostDirectory {
            db: self.db.clone(),
        }
    }

    pub fn visit_repo(&self) -> DbVisitRepository {
        DbVisitRepository {
            db: self.db.clone(),
        }
    }

    pub fn session_store(&self) -> RedisSessionStore {
        RedisSessionStore {
            pool: self.redis.clone(),
            ttl_secs: self.session_ttl_secs,
        }
    }

    pub fn notifier(&self) -> DispatcherNotifier {
        DispatcherNotifier {
            dispatcher: self.dispatcher.clone(),
        }
    }
}

use sea_orm::Database;
use tracing::info;

use frontdesk_core::config::Config;
use frontdesk_core::tracing::init_tracing;
use frontdesk_notify::Dispatcher;
use frontdesk_notify::config::NotifyConfig;

use frontdesk_intake::config::IntakeConfig;
use frontdesk_intake::router::build_router;
use frontdesk_intake::state::AppState;

#[tokio::main]
async fn main() {
    init_tracing();

    let config = IntakeConfig::from_env();
    let notify_config = NotifyConfig::from_env();

    let db = Database::connect(&config.database_url)
        .await
        .expect("failed to connect to database");

    let redis_cfg = deadpool_redis::Config::from_url(&config.redis_url);
    let redis = redis_cfg
        .create_pool(Some(deadpool_redis::Runtime::Tokio1))
        .expect("failed to create Redis pool");

    let dispatcher =
        Dispatcher::from_config(&notify_config).expect("invalid notification provider settings");

    let state = AppState {
        db,
        redis,
        dispatcher,
        cookie_domain: config.cookie_domain,
        session_ttl_secs: config.session_ttl_secs,
        alert_channels: config.host_alert_channels,
        phone_region: notify_config.phone_default_region,
    };

    let router = build_router(state);
    let addr = format!("0.0.0.0:{}", config.intake_port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .expect("failed to bind");

    info!("intake service listening on {addr}");
    axum::serve(listener, router).await.expect("server error");
}

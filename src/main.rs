use forest_monitor::config::AppConfig;
use forest_monitor::services::notice::NoticeBoard;
use forest_monitor::{earthengine, routes, state};

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt::init();

    let config = AppConfig::from_env().expect("invalid configuration");

    // Missing credentials are non-fatal: every analysis falls back to demo data.
    let source = earthengine::source_from_env();
    let state = state::AppState::new(source, NoticeBoard::new(config.notice_capacity));

    let app = routes::app(state);
    let listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{}", config.port))
        .await
        .expect("failed to bind");

    tracing::info!(port = config.port, "forest-monitor listening");
    axum::serve(listener, app).await.expect("server failed");
}

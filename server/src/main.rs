mod db;
mod routes;
mod services;
mod state;

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt::init();

    let database_url = std::env::var("DATABASE_URL").expect("DATABASE_URL required");
    let port: u16 = std::env::var("PORT")
        .unwrap_or_else(|_| "3000".into())
        .parse()
        .expect("invalid PORT");

    let pool = db::init_pool(&database_url)
        .await
        .expect("database init failed");

    // Mailer is non-fatal: email dispatch endpoints return 500 until configured.
    let mailer = match services::mailer::MailerConfig::from_env() {
        Some(config) => {
            tracing::info!(from = config.from_addr(), "mailer configured");
            Some(config)
        }
        None => {
            tracing::warn!("RESEND_API_KEY/RESEND_FROM not set; email dispatch disabled");
            None
        }
    };

    let allowlist = services::allowlist::Allowlist::from_env();
    if allowlist.is_empty() {
        tracing::warn!("ADMIN_EMAILS not set; all email dispatch requests will be refused");
    }

    let state = state::AppState::new(pool, mailer, allowlist);

    let app = routes::leptos_app(state).expect("router init failed");
    let listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{port}"))
        .await
        .expect("failed to bind");

    tracing::info!(%port, "mainstreet listening");
    axum::serve(listener, app).await.expect("server failed");
}

use actix_web::web;
use mock_api::{
    Config, bootstrap_admin, build,
    store::CrmStore,
    telemetry::{get_subscriber, init_subscriber},
};

/// ProCRM mock API server
///
/// Environment variables can be set directly or loaded from a .env file in
/// the project root.
///
/// - IP_ADDRESS: bind address (default 127.0.0.1)
/// - PORT: server port (default 8000, 0 for an OS-assigned port)
/// - ALLOWED_ORIGINS: "*" or a comma-separated list of origins
/// - ADMIN_EMAIL / ADMIN_PASSWORD: the initial super-administrator
///   (default admin@procrm.uz / admin123)
///
/// Example:
/// IP_ADDRESS=127.0.0.1 PORT=8000 ALLOWED_ORIGINS=* cargo run -p mock-api
#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    // Silently ignored if the file doesn't exist
    let _ = dotenvy::dotenv();

    let subscriber = get_subscriber("info".into());
    init_subscriber(subscriber)?;

    let mut config = Config::from_env()?;

    let store = web::Data::new(CrmStore::new());
    let email = std::env::var("ADMIN_EMAIL")
        .unwrap_or_else(|_| "admin@procrm.uz".to_string());
    let password =
        std::env::var("ADMIN_PASSWORD").unwrap_or_else(|_| "admin123".to_string());
    bootstrap_admin(&store, &email, &password);

    let server = build(&mut config, store)?;
    tracing::info!("listening on http://{}:{}", config.ip, config.port);
    server.await?;
    Ok(())
}

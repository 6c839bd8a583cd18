//! Development server for ProCRM UI development
//!
//! This binary starts the mock API on a fixed port with the seeded fixtures
//! plus a development dataset, so the console has something to show.
//!
//! Usage: cargo run -p dev-server
//!
//! Set FAULTS to make chosen routes fail, e.g.
//! FAULTS="DELETE /api/v1/company/delete/2 500,GET /api/v1/user/all/rop 502"

use actix_web::http::{Method, StatusCode};
use anyhow::{Context, Result};
use mock_api::store::CrmStore;
use test_helpers::mock::DevDataset;
use tracing::info;

#[tokio::main]
async fn main() -> Result<()> {
    let _ = dotenvy::dotenv();

    let subscriber = mock_api::telemetry::get_subscriber("info".into());
    mock_api::telemetry::init_subscriber(subscriber)?;

    info!("🚀 Starting ProCRM development server");

    let port = std::env::var("PORT")
        .ok()
        .map(|port| port.parse())
        .transpose()
        .context("PORT must be a number")?
        .unwrap_or(8000);
    let app = test_helpers::spawn_app_on_port(port).await;
    info!("✅ API server running on http://127.0.0.1:{}", app.port);

    info!("📊 Setting up development data...");
    let dataset = DevDataset::create(&app).await?;

    if let Ok(faults) = std::env::var("FAULTS") {
        inject_faults(&app.store, &faults)?;
    }

    info!("🎯 Development server ready!");
    info!("   API: http://127.0.0.1:{}", app.port);
    info!(
        "   UI:  cd ui && BACKEND_URL=http://127.0.0.1:{} trunk serve",
        app.port
    );
    info!("");
    dataset.print_summary();
    info!("");
    info!("👋 Press Ctrl+C to shutdown");

    tokio::signal::ctrl_c().await?;
    info!("🛑 Shutting down development server");
    Ok(())
}

/// Parse `METHOD PATH STATUS` entries separated by commas.
fn inject_faults(store: &CrmStore, faults: &str) -> Result<()> {
    for entry in faults.split(',').map(str::trim).filter(|e| !e.is_empty()) {
        let parts: Vec<&str> = entry.split_whitespace().collect();
        let [method, path, status] = parts.as_slice() else {
            anyhow::bail!("fault `{entry}` should look like `METHOD PATH STATUS`");
        };
        let method: Method = method
            .to_uppercase()
            .parse()
            .with_context(|| format!("bad method in `{entry}`"))?;
        let status = StatusCode::from_u16(status.parse()?)
            .with_context(|| format!("bad status in `{entry}`"))?;
        store.inject_fault(method, *path, status);
        info!("💥 {entry}");
    }
    Ok(())
}

mod company;
mod login;
mod store;
mod users;

use std::cell::RefCell;

use resources::{Notice, Notifier};
use test_helpers::spawn_app;

#[tokio::test]
async fn health_check() -> anyhow::Result<()> {
    let app = spawn_app().await;

    let response =
        reqwest::get(format!("{}/api/v1/health_check", app.address())).await?;
    assert!(response.status().is_success());

    Ok(())
}

/// Collects notices instead of showing them.
#[derive(Default)]
pub struct Recorder(pub RefCell<Vec<Notice>>);

impl Notifier for Recorder {
    fn notify(&self, notice: Notice) {
        self.0.borrow_mut().push(notice);
    }
}

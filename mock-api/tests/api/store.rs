//! Resource stores driven against the mock backend over HTTP.

use std::rc::Rc;

use actix_web::http::{Method, StatusCode as ServerStatus};
use payloads::requests::NewManagedUser;
use payloads::{SalesManagerScope, UserFamily};
use resources::{
    Companies, ManagedUsers, NoticeLevel, ResourceStore, company_name, filter_view,
};
use test_helpers::{PASSWORD, spawn_app};

use crate::Recorder;

#[tokio::test]
async fn remove_rolls_back_when_the_server_refuses() -> anyhow::Result<()> {
    let app = spawn_app().await;
    let admin = Rc::new(app.login_admin().await?);
    let notices = Rc::new(Recorder::default());
    let store = ResourceStore::new(Companies::new(admin), notices.clone());

    store.refresh(String::new()).await;
    let before = store.items();
    assert_eq!(before.len(), 3);

    // Acme has accounts attached
    assert!(!store.remove(app.fixtures.acme).await);
    assert_eq!(store.items(), before);
    let recorded = notices.0.borrow();
    assert_eq!(recorded.len(), 1);
    assert_eq!(recorded[0].level, NoticeLevel::Error);
    assert!(recorded[0].message.starts_with("O'chirib bo'lmadi!"));

    Ok(())
}

#[tokio::test]
async fn toggle_rolls_back_on_an_injected_fault() -> anyhow::Result<()> {
    let app = spawn_app().await;
    let admin = Rc::new(app.login_admin().await?);
    let notices = Rc::new(Recorder::default());
    let store = ResourceStore::new(Companies::new(admin.clone()), notices.clone());
    store.refresh(String::new()).await;
    let before = store.items();

    app.store.inject_fault(
        Method::PATCH,
        format!("/api/v1/company/status/{}", app.fixtures.globex),
        ServerStatus::SERVICE_UNAVAILABLE,
    );
    assert!(!store.toggle_status(app.fixtures.globex).await);
    assert_eq!(store.items(), before);
    assert!(notices.0.borrow()[0].message.contains("(Kod: 503)"));

    app.store.clear_faults();
    assert!(store.toggle_status(app.fixtures.globex).await);
    let globex = store
        .get(app.fixtures.globex)
        .ok_or_else(|| anyhow::anyhow!("Globex missing"))?;
    assert!(!globex.status);
    assert!(!admin.get_company(app.fixtures.globex).await?.status);

    Ok(())
}

#[tokio::test]
async fn remote_search_refetches() -> anyhow::Result<()> {
    let app = spawn_app().await;
    let admin = Rc::new(app.login_admin().await?);
    let store = ResourceStore::new(Companies::new(admin), Rc::new(Recorder::default()));
    store.refresh(String::new()).await;

    store.search(" acme ", std::future::ready(())).await;
    assert_eq!(store.last_query(), "acme");
    let names: Vec<_> = store.items().into_iter().map(|c| c.name).collect();
    assert_eq!(names, vec!["Acme".to_string()]);

    Ok(())
}

#[tokio::test]
async fn created_users_are_prepended() -> anyhow::Result<()> {
    let app = spawn_app().await;
    let admin = Rc::new(app.login_admin().await?);
    let notices = Rc::new(Recorder::default());
    let store = ResourceStore::new(
        ManagedUsers::new(admin, UserFamily::SalesManager),
        notices.clone(),
    );
    store.refresh(SalesManagerScope::AllCompanies).await;
    let before = store.items().len();

    let details =
        NewManagedUser::new("new@globex.uz".into(), PASSWORD.into(), app.fixtures.globex);
    let created = store
        .add(details.clone())
        .await
        .ok_or_else(|| anyhow::anyhow!("create failed"))?;
    let items = store.items();
    assert_eq!(items.len(), before + 1);
    assert_eq!(items[0], created);
    assert_eq!(created.company_id, Some(app.fixtures.globex));
    assert_eq!(notices.0.borrow().len(), 1);
    assert!(notices.0.borrow()[0].message.contains("new@globex.uz"));

    // the same email again leaves the list as it was
    assert!(store.add(details).await.is_none());
    assert_eq!(store.items(), items);
    assert_eq!(notices.0.borrow()[1].level, NoticeLevel::Error);

    Ok(())
}

#[tokio::test]
async fn local_filter_matches_company_names() -> anyhow::Result<()> {
    let app = spawn_app().await;
    let admin = Rc::new(app.login_admin().await?);
    let notices = Rc::new(Recorder::default());
    let companies = ResourceStore::new(Companies::new(admin.clone()), notices.clone());
    let users = ResourceStore::new(
        ManagedUsers::new(admin, UserFamily::SalesManager),
        notices.clone(),
    );
    companies.refresh(String::new()).await;
    users.refresh(SalesManagerScope::AllCompanies).await;

    let companies = companies.items();
    let users = users.items();
    let view = filter_view(&users, &companies, "GLOBEX");
    assert_eq!(view.len(), 1);
    assert_eq!(
        company_name(&companies, view[0].company_id),
        Some("Globex")
    );
    assert!(notices.0.borrow().is_empty());

    Ok(())
}

#[tokio::test]
async fn an_expired_session_surfaces_as_a_load_error() -> anyhow::Result<()> {
    let app = spawn_app().await;
    let admin = Rc::new(app.login_admin().await?);
    let notices = Rc::new(Recorder::default());
    let store = ResourceStore::new(Companies::new(admin), notices.clone());
    app.store.expire_sessions();

    store.refresh(String::new()).await;
    assert!(store.items().is_empty());
    assert_eq!(
        store.last_error().as_deref(),
        Some(resources::messages::SESSION_EXPIRED)
    );
    assert_eq!(notices.0.borrow().len(), 1);

    Ok(())
}

#[tokio::test]
async fn a_store_without_credential_stays_quiet() -> anyhow::Result<()> {
    let app = spawn_app().await;
    let anonymous = Rc::new(payloads::APIClient::new(app.address()));
    let notices = Rc::new(Recorder::default());
    let store = ResourceStore::new(Companies::new(anonymous), notices.clone());

    store.refresh(String::new()).await;
    assert!(store.items().is_empty());
    assert!(store.last_error().is_none());
    assert!(notices.0.borrow().is_empty());

    Ok(())
}

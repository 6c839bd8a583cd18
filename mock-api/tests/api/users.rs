use payloads::requests::{NewManagedUser, UpdateManagedUser};
use payloads::{ClientError, SalesManagerScope, StatusCode, UserFamily, UserId};
use test_helpers::{
    BUSY_SALES_MANAGER_EMAIL, PASSWORD, ROP_EMAIL, SALES_MANAGER_EMAIL,
    assert_client_error, credentials, spawn_app,
};

#[tokio::test]
async fn list_rops() -> anyhow::Result<()> {
    let app = spawn_app().await;
    let admin = app.login_admin().await?;

    let rops = admin.list_users(UserFamily::Rop, SalesManagerScope::Own).await?;
    assert_eq!(rops.len(), 3);
    let rop = rops
        .iter()
        .find(|user| user.email == ROP_EMAIL)
        .ok_or_else(|| anyhow::anyhow!("seeded ROP missing"))?;
    assert_eq!(rop.company_id, Some(app.fixtures.acme));
    assert_eq!(rop.permissions, vec!["CRM".to_string()]);

    Ok(())
}

#[tokio::test]
async fn created_rop_gets_its_company_from_the_misspelled_field() -> anyhow::Result<()> {
    let app = spawn_app().await;
    let admin = app.login_admin().await?;

    let details = NewManagedUser::new(
        "new.rop@globex.uz".into(),
        PASSWORD.into(),
        app.fixtures.globex,
    );
    let created = admin
        .create_user(UserFamily::Rop, &details)
        .await?
        .ok_or_else(|| anyhow::anyhow!("record not echoed"))?;
    assert_eq!(created.email, "new.rop@globex.uz");
    assert_eq!(created.company_id, Some(app.fixtures.globex));

    Ok(())
}

#[tokio::test]
async fn created_sales_manager_inherits_the_requested_company() -> anyhow::Result<()> {
    let app = spawn_app().await;
    let admin = app.login_admin().await?;

    let details = NewManagedUser::new(
        "new.sm@globex.uz".into(),
        PASSWORD.into(),
        app.fixtures.globex,
    );
    let created = admin
        .create_user(UserFamily::SalesManager, &details)
        .await?
        .ok_or_else(|| anyhow::anyhow!("record not echoed"))?;
    assert_eq!(created.company_id, Some(app.fixtures.globex));

    let listed = admin
        .list_users(
            UserFamily::SalesManager,
            SalesManagerScope::Company(app.fixtures.globex),
        )
        .await?;
    assert!(listed.iter().any(|user| user.id == created.id));

    Ok(())
}

#[tokio::test]
async fn create_user_refused() -> anyhow::Result<()> {
    let app = spawn_app().await;
    let admin = app.login_admin().await?;

    let taken = NewManagedUser::new(
        SALES_MANAGER_EMAIL.into(),
        PASSWORD.into(),
        app.fixtures.acme,
    );
    assert_client_error(admin.create_user(UserFamily::Rop, &taken).await, |e| {
        matches!(e, ClientError::DuplicateEmail)
    });

    let malformed =
        NewManagedUser::new("not-an-email".into(), "123".into(), app.fixtures.acme);
    assert_client_error(
        admin.create_user(UserFamily::SalesManager, &malformed).await,
        |e| {
            matches!(e, ClientError::InvalidPayload(m)
                if m.contains("email must be an email") && m.contains("password"))
        },
    );

    // ROPs are managed by the super-administrator only
    let rop = app.login_rop().await?;
    let details =
        NewManagedUser::new("other@acme.uz".into(), PASSWORD.into(), app.fixtures.acme);
    assert_client_error(rop.create_user(UserFamily::Rop, &details).await, |e| {
        matches!(e, ClientError::Forbidden)
    });

    Ok(())
}

#[tokio::test]
async fn rop_works_within_its_own_company() -> anyhow::Result<()> {
    let app = spawn_app().await;
    let rop = app.login_rop().await?;

    let mut listed = rop
        .list_users(UserFamily::SalesManager, SalesManagerScope::Own)
        .await?;
    listed.sort_by_key(|user| user.id);
    assert_eq!(
        listed.iter().map(|user| user.id).collect::<Vec<_>>(),
        vec![app.fixtures.sales_manager, app.fixtures.busy_sales_manager]
    );

    // the requested company is overridden by the ROP's own
    let details = NewManagedUser::new(
        "fresh@acme.uz".into(),
        PASSWORD.into(),
        app.fixtures.globex,
    );
    rop.create_user(UserFamily::SalesManager, &details).await?;
    let admin = app.login_admin().await?;
    let acme = admin
        .list_users(
            UserFamily::SalesManager,
            SalesManagerScope::Company(app.fixtures.acme),
        )
        .await?;
    assert!(acme.iter().any(|user| user.email == "fresh@acme.uz"));

    assert_client_error(
        rop.delete_user(UserFamily::SalesManager, app.fixtures.globex_sales_manager)
            .await,
        |e| matches!(e, ClientError::Forbidden),
    );
    assert_client_error(
        rop.list_users(UserFamily::SalesManager, SalesManagerScope::AllCompanies)
            .await,
        |e| matches!(e, ClientError::FetchFailure(s, _) if *s == StatusCode::FORBIDDEN),
    );

    Ok(())
}

#[tokio::test]
async fn admin_scopes_for_sales_managers() -> anyhow::Result<()> {
    let app = spawn_app().await;
    let admin = app.login_admin().await?;

    let all = admin
        .list_users(UserFamily::SalesManager, SalesManagerScope::AllCompanies)
        .await?;
    assert_eq!(all.len(), 3);

    let globex = admin
        .list_users(
            UserFamily::SalesManager,
            SalesManagerScope::Company(app.fixtures.globex),
        )
        .await?;
    assert_eq!(globex.len(), 1);
    assert_eq!(globex[0].id, app.fixtures.globex_sales_manager);

    Ok(())
}

#[tokio::test]
async fn sales_managers_cannot_manage_accounts() -> anyhow::Result<()> {
    let app = spawn_app().await;
    let sales_manager = app.login_sales_manager().await?;

    assert_client_error(
        sales_manager
            .list_users(UserFamily::SalesManager, SalesManagerScope::Own)
            .await,
        |e| matches!(e, ClientError::FetchFailure(s, _) if *s == StatusCode::FORBIDDEN),
    );

    Ok(())
}

#[tokio::test]
async fn update_user_email() -> anyhow::Result<()> {
    let app = spawn_app().await;
    let admin = app.login_admin().await?;

    let updated = admin
        .update_user(
            UserFamily::SalesManager,
            app.fixtures.sales_manager,
            &UpdateManagedUser::new("renamed@acme.uz".into()),
        )
        .await?
        .ok_or_else(|| anyhow::anyhow!("record not echoed"))?;
    assert_eq!(updated.email, "renamed@acme.uz");

    assert_client_error(
        admin
            .update_user(
                UserFamily::Rop,
                app.fixtures.rop,
                &UpdateManagedUser::new(BUSY_SALES_MANAGER_EMAIL.into()),
            )
            .await,
        |e| matches!(e, ClientError::DuplicateEmail),
    );
    assert_client_error(
        admin
            .update_user(
                UserFamily::Rop,
                UserId(9999),
                &UpdateManagedUser::new(BUSY_SALES_MANAGER_EMAIL.into()),
            )
            .await,
        |e| matches!(e, ClientError::NotFound),
    );

    Ok(())
}

#[tokio::test]
async fn delete_users() -> anyhow::Result<()> {
    let app = spawn_app().await;
    let admin = app.login_admin().await?;

    assert_client_error(
        admin
            .delete_user(UserFamily::SalesManager, app.fixtures.busy_sales_manager)
            .await,
        |e| matches!(e, ClientError::HasDependentRecords),
    );

    admin
        .delete_user(UserFamily::SalesManager, app.fixtures.sales_manager)
        .await?;
    let left = admin
        .list_users(UserFamily::SalesManager, SalesManagerScope::AllCompanies)
        .await?;
    assert!(left.iter().all(|user| user.id != app.fixtures.sales_manager));

    assert_client_error(
        app.client.login(&credentials(SALES_MANAGER_EMAIL)).await,
        |e| matches!(e, ClientError::InvalidCredentials),
    );

    admin.delete_user(UserFamily::Rop, app.fixtures.rop).await?;

    Ok(())
}

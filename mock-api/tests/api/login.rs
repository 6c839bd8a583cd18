use payloads::requests::LoginCredentials;
use payloads::{ClientError, Role};
use resources::{AuthState, MemoryStorage, SessionService};
use test_helpers::{
    ADMIN_EMAIL, INACTIVE_ROP_EMAIL, PASSWORD, ROP_EMAIL, assert_client_error,
    credentials, spawn_app,
};

#[tokio::test]
async fn login_creates_an_authenticated_session() -> anyhow::Result<()> {
    let app = spawn_app().await;
    let service = SessionService::new(MemoryStorage::default());

    let session = service.login(&app.client, &credentials(ROP_EMAIL)).await?;

    match session.auth_state() {
        AuthState::Authenticated(user) => {
            assert_eq!(user.email, ROP_EMAIL);
            assert_eq!(user.role, Role::Rop);
            assert_eq!(user.company_id, Some(app.fixtures.acme));
        }
        AuthState::Anonymous => panic!("expected an authenticated session"),
    }
    // the session survives a reload, and its token authorizes requests
    let restored = service.restore();
    assert_eq!(restored, session);
    let client = service.client(app.address(), &restored);
    assert!(client.has_token());
    client
        .list_users(payloads::UserFamily::SalesManager, Default::default())
        .await?;

    Ok(())
}

#[tokio::test]
async fn login_refused() -> anyhow::Result<()> {
    let app = spawn_app().await;

    let wrong_password = LoginCredentials {
        email: ADMIN_EMAIL.into(),
        password: "not-the-password".into(),
    };
    assert_client_error(app.client.login(&wrong_password).await, |e| {
        matches!(e, ClientError::InvalidCredentials)
    });

    let unknown = LoginCredentials {
        email: "nobody@procrm.uz".into(),
        password: PASSWORD.into(),
    };
    assert_client_error(app.client.login(&unknown).await, |e| {
        matches!(e, ClientError::InvalidCredentials)
    });

    Ok(())
}

#[tokio::test]
async fn inactive_accounts_are_told_so() -> anyhow::Result<()> {
    let app = spawn_app().await;

    assert_client_error(
        app.client.login(&credentials(INACTIVE_ROP_EMAIL)).await,
        |e| matches!(e, ClientError::AccountInactive),
    );

    app.store.set_account_active(app.fixtures.sales_manager, false);
    assert_client_error(
        app.client.login(&credentials(test_helpers::SALES_MANAGER_EMAIL)).await,
        |e| matches!(e, ClientError::AccountInactive),
    );

    Ok(())
}

#[tokio::test]
async fn requests_without_a_token_never_leave_the_client() -> anyhow::Result<()> {
    let app = spawn_app().await;

    assert_client_error(app.client.list_companies("").await, |e| {
        matches!(e, ClientError::NoCredential)
    });

    Ok(())
}

#[tokio::test]
async fn expired_tokens_are_reported() -> anyhow::Result<()> {
    let app = spawn_app().await;
    let admin = app.login_admin().await?;
    app.store.expire_sessions();

    assert_client_error(admin.list_companies("").await, |e| {
        matches!(e, ClientError::AuthExpired)
    });
    assert_client_error(admin.delete_company(app.fixtures.globex).await, |e| {
        matches!(e, ClientError::AuthExpired)
    });

    Ok(())
}

#[tokio::test]
async fn password_change() -> anyhow::Result<()> {
    let app = spawn_app().await;
    let service = SessionService::new(MemoryStorage::default());
    let session = service.login(&app.client, &credentials(ROP_EMAIL)).await?;
    let client = service.client(app.address(), &session);

    let wrong_old = service
        .change_password(&client, &session, "wrong-old".into(), "new-secret".into())
        .await;
    assert_client_error(wrong_old, |e| matches!(e, ClientError::WrongCurrentPassword));

    let too_short = service
        .change_password(&client, &session, PASSWORD.into(), "123".into())
        .await;
    assert_client_error(too_short, |e| matches!(e, ClientError::InvalidPayload(_)));

    service
        .change_password(&client, &session, PASSWORD.into(), "new-secret".into())
        .await?;

    assert_client_error(app.client.login(&credentials(ROP_EMAIL)).await, |e| {
        matches!(e, ClientError::InvalidCredentials)
    });
    app.client
        .login(&LoginCredentials {
            email: ROP_EMAIL.into(),
            password: "new-secret".into(),
        })
        .await?;

    Ok(())
}

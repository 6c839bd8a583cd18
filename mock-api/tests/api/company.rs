use actix_web::http::{Method, StatusCode as ServerStatus};
use payloads::requests::{CompanyForm, LogoUpload};
use payloads::{ClientError, CompanyId, StatusCode};
use test_helpers::{assert_client_error, spawn_app};

fn form(name: &str) -> CompanyForm {
    CompanyForm {
        name: Some(name.to_string()),
        manager_name: Some("Kamola Nazarova".to_string()),
        phone_number: Some("+998901112233".to_string()),
        description: Some("Ma'lumot mavjud emas".to_string()),
        logo: LogoUpload::Keep,
    }
}

fn png(bytes: usize) -> LogoUpload {
    LogoUpload::Replace {
        file_name: "logo.png".to_string(),
        content_type: "image/png".to_string(),
        bytes: vec![0x89; bytes],
    }
}

#[tokio::test]
async fn list_and_search_companies() -> anyhow::Result<()> {
    let app = spawn_app().await;
    let admin = app.login_admin().await?;

    let all = admin.list_companies("").await?;
    assert_eq!(all.len(), 3);

    let found = admin.list_companies("  glo ").await?;
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].id, app.fixtures.globex);

    assert!(admin.list_companies("nonexistent").await?.is_empty());

    Ok(())
}

#[tokio::test]
async fn only_the_admin_sees_companies() -> anyhow::Result<()> {
    let app = spawn_app().await;
    let rop = app.login_rop().await?;

    assert_client_error(rop.list_companies("").await, |e| {
        matches!(e, ClientError::FetchFailure(s, _) if *s == StatusCode::FORBIDDEN)
    });
    assert_client_error(rop.get_company(app.fixtures.acme).await, |e| {
        matches!(e, ClientError::Forbidden)
    });

    Ok(())
}

#[tokio::test]
async fn get_company_details() -> anyhow::Result<()> {
    let app = spawn_app().await;
    let admin = app.login_admin().await?;

    let acme = admin.get_company(app.fixtures.acme).await?;
    assert_eq!(acme.name, "Acme");
    assert_eq!(acme.manager_name, "Aziz Karimov");
    assert!(acme.status);

    assert_client_error(admin.get_company(CompanyId(9999)).await, |e| {
        matches!(e, ClientError::NotFound)
    });

    Ok(())
}

#[tokio::test]
async fn create_company() -> anyhow::Result<()> {
    let app = spawn_app().await;
    let admin = app.login_admin().await?;

    let created = admin
        .create_company(&form("Umbrella"))
        .await?
        .ok_or_else(|| anyhow::anyhow!("record not echoed"))?;
    assert_eq!(created.name, "Umbrella");
    assert_eq!(created.description, "Ma'lumot mavjud emas");
    assert!(created.status);
    assert!(created.logo.is_none());

    // newest first
    let all = admin.list_companies("").await?;
    assert_eq!(all[0].id, created.id);

    Ok(())
}

#[tokio::test]
async fn create_company_with_an_untyped_logo() -> anyhow::Result<()> {
    let app = spawn_app().await;
    let admin = app.login_admin().await?;

    let untyped = CompanyForm {
        logo: LogoUpload::Replace {
            file_name: "logo".to_string(),
            content_type: String::new(),
            bytes: vec![0x89; 16],
        },
        ..form("Initech")
    };
    let created = admin
        .create_company(&untyped)
        .await?
        .ok_or_else(|| anyhow::anyhow!("record not echoed"))?;
    let url = created
        .logo_url(app.address())
        .ok_or_else(|| anyhow::anyhow!("logo not stored"))?;

    let response = reqwest::get(&url).await?;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response
            .headers()
            .get(reqwest::header::CONTENT_TYPE)
            .and_then(|value| value.to_str().ok()),
        Some("application/octet-stream")
    );

    Ok(())
}

#[tokio::test]
async fn create_company_refused() -> anyhow::Result<()> {
    let app = spawn_app().await;
    let admin = app.login_admin().await?;

    assert_client_error(admin.create_company(&form("Acme")).await, |e| {
        matches!(e, ClientError::DuplicateEmail)
    });

    let missing = CompanyForm {
        manager_name: None,
        ..form("Hooli")
    };
    assert_client_error(admin.create_company(&missing).await, |e| {
        matches!(e, ClientError::InvalidPayload(m) if m.contains("managerName"))
    });

    assert_client_error(app.client.create_company(&form("Hooli")).await, |e| {
        matches!(e, ClientError::NoCredential)
    });
    assert!(admin.list_companies("Hooli").await?.is_empty());

    Ok(())
}

#[tokio::test]
async fn upload_replace_and_clear_a_logo() -> anyhow::Result<()> {
    let app = spawn_app().await;
    let admin = app.login_admin().await?;

    let with_logo = CompanyForm {
        logo: png(64),
        ..CompanyForm::default()
    };
    let updated = admin
        .update_company(app.fixtures.globex, &with_logo)
        .await?
        .ok_or_else(|| anyhow::anyhow!("record not echoed"))?;
    // a partial update leaves the other fields alone
    assert_eq!(updated.name, "Globex");
    let url = updated
        .logo_url(app.address())
        .ok_or_else(|| anyhow::anyhow!("logo not stored"))?;

    let response = reqwest::get(&url).await?;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response.bytes().await?.len(), 64);

    let cleared = CompanyForm {
        logo: LogoUpload::Remove,
        ..CompanyForm::default()
    };
    let updated = admin
        .update_company(app.fixtures.globex, &cleared)
        .await?
        .ok_or_else(|| anyhow::anyhow!("record not echoed"))?;
    assert!(updated.logo.is_none());

    Ok(())
}

#[tokio::test]
async fn oversized_logos_are_rejected() -> anyhow::Result<()> {
    let app = spawn_app().await;
    let admin = app.login_admin().await?;

    let too_big = CompanyForm {
        logo: png(2 * 1024 * 1024 + 1),
        ..CompanyForm::default()
    };
    assert_client_error(admin.update_company(app.fixtures.globex, &too_big).await, |e| {
        matches!(e, ClientError::InvalidPayload(_))
    });

    Ok(())
}

#[tokio::test]
async fn rename_to_a_taken_name() -> anyhow::Result<()> {
    let app = spawn_app().await;
    let admin = app.login_admin().await?;

    let rename = CompanyForm {
        name: Some("Acme".to_string()),
        ..CompanyForm::default()
    };
    assert_client_error(admin.update_company(app.fixtures.globex, &rename).await, |e| {
        matches!(e, ClientError::DuplicateEmail)
    });
    assert_client_error(admin.update_company(CompanyId(9999), &rename).await, |e| {
        matches!(e, ClientError::NotFound)
    });

    Ok(())
}

#[tokio::test]
async fn delete_company() -> anyhow::Result<()> {
    let app = spawn_app().await;
    let admin = app.login_admin().await?;

    // Acme still has accounts
    assert_client_error(admin.delete_company(app.fixtures.acme).await, |e| {
        matches!(e, ClientError::HasDependentRecords)
    });

    let lonely = admin
        .create_company(&form("Lonely"))
        .await?
        .ok_or_else(|| anyhow::anyhow!("record not echoed"))?;
    admin.delete_company(lonely.id).await?;
    assert!(admin.list_companies("Lonely").await?.is_empty());

    assert_client_error(admin.delete_company(lonely.id).await, |e| {
        matches!(e, ClientError::NotFound)
    });

    Ok(())
}

#[tokio::test]
async fn toggling_twice_restores_the_status() -> anyhow::Result<()> {
    let app = spawn_app().await;
    let admin = app.login_admin().await?;
    let id = app.fixtures.globex;

    admin.toggle_company_status(id).await?;
    assert!(!admin.get_company(id).await?.status);

    admin.toggle_company_status(id).await?;
    assert!(admin.get_company(id).await?.status);

    Ok(())
}

#[tokio::test]
async fn injected_faults_are_classified() -> anyhow::Result<()> {
    let app = spawn_app().await;
    let admin = app.login_admin().await?;
    let path = format!("/api/v1/company/delete/{}", app.fixtures.globex);

    app.store
        .inject_fault(Method::DELETE, path.clone(), ServerStatus::BAD_GATEWAY);
    assert_client_error(admin.delete_company(app.fixtures.globex).await, |e| {
        matches!(e, ClientError::UnknownFailure(s, _) if *s == StatusCode::BAD_GATEWAY)
    });

    app.store
        .inject_fault(Method::DELETE, path, ServerStatus::INTERNAL_SERVER_ERROR);
    assert_client_error(admin.delete_company(app.fixtures.globex).await, |e| {
        matches!(e, ClientError::HasDependentRecords)
    });

    // without the fault the real answer comes through: Globex has accounts
    app.store.clear_faults();
    assert_client_error(admin.delete_company(app.fixtures.globex).await, |e| {
        matches!(e, ClientError::HasDependentRecords)
    });

    Ok(())
}

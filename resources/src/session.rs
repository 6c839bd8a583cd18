//! Signed-in state and its persistence.
//!
//! The session lives in the application context; storage is reached only
//! through [`SessionStorage`] so the browser adapter and the in-memory test
//! double are interchangeable.

use std::cell::RefCell;

use payloads::requests::{LoginCredentials, ResetPassword};
use payloads::responses::LoginResponse;
use payloads::{APIClient, ClientError, CompanyId, Role, UserRecord};
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};

/// What survives a reload, minus the token.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Session {
    pub user: Option<UserRecord>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthState {
    Authenticated(UserRecord),
    Anonymous,
}

impl Session {
    pub fn auth_state(&self) -> AuthState {
        match &self.user {
            Some(user) => AuthState::Authenticated(user.clone()),
            None => AuthState::Anonymous,
        }
    }

    pub fn is_authenticated(&self) -> bool {
        self.user.is_some()
    }

    pub fn role(&self) -> Option<Role> {
        self.user.as_ref().map(|user| user.role)
    }

    pub fn company_id(&self) -> Option<CompanyId> {
        self.user.as_ref().and_then(|user| user.company_id)
    }

    pub fn email(&self) -> Option<&str> {
        self.user.as_ref().map(|user| user.email.as_str())
    }
}

#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("storage is not available")]
    Unavailable,
    #[error("could not write `{0}` to storage")]
    Write(&'static str),
    #[error(transparent)]
    Serialize(#[from] serde_json::Error),
}

/// Persistence port for the session and the bearer token.
pub trait SessionStorage {
    fn load(&self) -> Option<Session>;
    fn save(&self, session: &Session) -> Result<(), StorageError>;
    fn clear(&self) -> Result<(), StorageError>;

    fn load_token(&self) -> Option<SecretString>;
    fn save_token(&self, token: &SecretString) -> Result<(), StorageError>;
    fn clear_token(&self) -> Result<(), StorageError>;
}

/// Storage that forgets everything on drop.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    session: RefCell<Option<String>>,
    token: RefCell<Option<SecretString>>,
}

impl SessionStorage for MemoryStorage {
    fn load(&self) -> Option<Session> {
        let raw = self.session.borrow();
        serde_json::from_str(raw.as_deref()?).ok()
    }

    fn save(&self, session: &Session) -> Result<(), StorageError> {
        *self.session.borrow_mut() = Some(serde_json::to_string(session)?);
        Ok(())
    }

    fn clear(&self) -> Result<(), StorageError> {
        *self.session.borrow_mut() = None;
        Ok(())
    }

    fn load_token(&self) -> Option<SecretString> {
        self.token.borrow().clone()
    }

    fn save_token(&self, token: &SecretString) -> Result<(), StorageError> {
        *self.token.borrow_mut() = Some(token.clone());
        Ok(())
    }

    fn clear_token(&self) -> Result<(), StorageError> {
        *self.token.borrow_mut() = None;
        Ok(())
    }
}

#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    #[error(transparent)]
    Client(#[from] ClientError),
    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// Login, logout and credential lookup over a storage backend.
pub struct SessionService<S> {
    storage: S,
}

impl<S: SessionStorage> SessionService<S> {
    pub fn new(storage: S) -> Self {
        Self { storage }
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    /// The persisted session, or an anonymous one.
    pub fn restore(&self) -> Session {
        self.storage.load().unwrap_or_default()
    }

    /// The bearer credential: the stored token, else one carried on the
    /// in-memory user.
    pub fn credential(&self, session: &Session) -> Option<SecretString> {
        self.storage.load_token().or_else(|| {
            session
                .user
                .as_ref()
                .and_then(|user| user.access_token.clone())
                .map(SecretString::from)
        })
    }

    /// A client for `address` carrying the session's credential, if any.
    pub fn client(&self, address: &str, session: &Session) -> APIClient {
        let client = APIClient::new(address);
        match self.credential(session) {
            Some(token) => client.with_token(token.expose_secret()),
            None => client,
        }
    }

    /// Exchange credentials for a session and persist it.
    pub async fn login(
        &self,
        client: &APIClient,
        credentials: &LoginCredentials,
    ) -> Result<Session, SessionError> {
        let response = client.login(credentials).await?;
        Ok(self.establish(response)?)
    }

    /// Persist a successful login. A response without a token drops any
    /// token left over from an earlier session.
    pub fn establish(&self, response: LoginResponse) -> Result<Session, StorageError> {
        if let Some(token) = response.token() {
            self.storage.save_token(&SecretString::from(token))?;
        } else {
            tracing::warn!("login response carried no access token");
            self.storage.clear_token()?;
        }
        let session = Session {
            user: Some(response.user),
        };
        self.storage.save(&session)?;
        tracing::info!(role = ?session.role(), "logged in");
        Ok(session)
    }

    /// Forget the session and the token.
    pub fn logout(&self) -> Result<Session, StorageError> {
        self.storage.clear()?;
        self.storage.clear_token()?;
        Ok(Session::default())
    }

    /// Change the signed-in account's password.
    pub async fn change_password(
        &self,
        client: &APIClient,
        session: &Session,
        old_password: String,
        new_password: String,
    ) -> Result<(), ClientError> {
        let email = session.email().ok_or(ClientError::NoCredential)?;
        client
            .reset_password(&ResetPassword {
                old_password,
                new_password,
                email: email.to_string(),
            })
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use payloads::UserId;

    fn admin() -> UserRecord {
        UserRecord {
            id: UserId(1),
            email: "admin@procrm.uz".into(),
            role: Role::SuperAdmin,
            company_id: None,
            access_token: None,
        }
    }

    #[test]
    fn restore_defaults_to_anonymous() {
        let service = SessionService::new(MemoryStorage::default());
        assert_eq!(service.restore().auth_state(), AuthState::Anonymous);
    }

    #[test]
    fn saved_sessions_survive_a_restore() {
        let service = SessionService::new(MemoryStorage::default());
        let session = Session {
            user: Some(admin()),
        };
        service.storage().save(&session).unwrap();
        assert_eq!(
            service.restore().auth_state(),
            AuthState::Authenticated(admin())
        );
    }

    #[test]
    fn the_token_is_not_part_of_the_persisted_session() {
        let storage = MemoryStorage::default();
        let mut user = admin();
        user.access_token = Some("secret".into());
        storage.save(&Session { user: Some(user) }).unwrap();

        let raw = storage.session.borrow().clone().unwrap();
        assert!(!raw.contains("secret"));
    }

    #[test]
    fn credential_prefers_storage_then_the_user() {
        let service = SessionService::new(MemoryStorage::default());
        let mut user = admin();
        user.access_token = Some("from-user".into());
        let session = Session { user: Some(user) };

        assert_eq!(
            service
                .credential(&session)
                .map(|t| t.expose_secret().to_string()),
            Some("from-user".to_string())
        );

        service
            .storage()
            .save_token(&SecretString::from("from-storage"))
            .unwrap();
        assert_eq!(
            service
                .credential(&session)
                .map(|t| t.expose_secret().to_string()),
            Some("from-storage".to_string())
        );
        assert!(service.client("http://localhost", &session).has_token());
    }

    #[test]
    fn a_login_without_a_token_drops_the_previous_one() {
        let service = SessionService::new(MemoryStorage::default());
        service
            .storage()
            .save_token(&SecretString::from("stale"))
            .unwrap();

        let session = service
            .establish(LoginResponse {
                user: admin(),
                access_token: None,
            })
            .unwrap();
        assert!(session.is_authenticated());
        assert!(service.credential(&session).is_none());
    }

    #[test]
    fn a_login_token_replaces_the_previous_one() {
        let service = SessionService::new(MemoryStorage::default());
        service
            .storage()
            .save_token(&SecretString::from("stale"))
            .unwrap();

        let session = service
            .establish(LoginResponse {
                user: admin(),
                access_token: Some("fresh".into()),
            })
            .unwrap();
        assert_eq!(
            service
                .credential(&session)
                .map(|t| t.expose_secret().to_string()),
            Some("fresh".to_string())
        );
    }

    #[test]
    fn logout_clears_everything() {
        let service = SessionService::new(MemoryStorage::default());
        service
            .storage()
            .save(&Session {
                user: Some(admin()),
            })
            .unwrap();
        service
            .storage()
            .save_token(&SecretString::from("t"))
            .unwrap();

        let session = service.logout().unwrap();
        assert!(!session.is_authenticated());
        assert!(service.storage().load().is_none());
        assert!(service.credential(&session).is_none());
        assert!(!service.client("http://localhost", &session).has_token());
    }

    #[tokio::test]
    async fn changing_the_password_needs_a_signed_in_user() {
        let service = SessionService::new(MemoryStorage::default());
        let client = APIClient::new("http://localhost");
        let result = service
            .change_password(&client, &Session::default(), "a".into(), "b".into())
            .await;
        assert!(matches!(result, Err(ClientError::NoCredential)));
    }
}

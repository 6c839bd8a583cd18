pub mod mock;

use actix_web::web;
use mock_api::store::CrmStore;
use mock_api::{Config, telemetry};
use payloads::requests::LoginCredentials;
use payloads::{APIClient, ClientError, CompanyId, Role, UserId};
use tracing_log::LogTracer;
use tracing_subscriber::util::SubscriberInitExt;

pub const ADMIN_EMAIL: &str = "admin@procrm.uz";
pub const ROP_EMAIL: &str = "rop@acme.uz";
pub const SALES_MANAGER_EMAIL: &str = "sm@acme.uz";
/// A sales manager with clients attached; deleting it fails with a 500.
pub const BUSY_SALES_MANAGER_EMAIL: &str = "busy@acme.uz";
/// ROP of a deactivated company.
pub const INACTIVE_ROP_EMAIL: &str = "rop@initech.uz";
pub const PASSWORD: &str = "secret123";

pub struct TestApp {
    #[allow(unused)]
    pub port: u16,
    /// Client without a credential.
    pub client: APIClient,
    pub store: web::Data<CrmStore>,
    pub fixtures: Fixtures,
}

/// Ids of the seeded records.
#[derive(Debug, Clone, Copy)]
pub struct Fixtures {
    pub acme: CompanyId,
    pub globex: CompanyId,
    pub initech: CompanyId,
    pub admin: UserId,
    pub rop: UserId,
    pub sales_manager: UserId,
    pub busy_sales_manager: UserId,
    pub globex_sales_manager: UserId,
}

impl Fixtures {
    /// Two active companies, one inactive, and one account of each role.
    pub fn seed(store: &CrmStore) -> Self {
        let acme = store.insert_company("Acme", "Aziz Karimov", "+998901234567", true);
        let globex = store.insert_company("Globex", "Dilnoza Rahimova", "+998907654321", true);
        let initech = store.insert_company("Initech", "Bobur Aliyev", "+998935551122", false);

        let admin = store.insert_account(ADMIN_EMAIL, PASSWORD, Role::SuperAdmin, None);
        let rop = store.insert_account(ROP_EMAIL, PASSWORD, Role::Rop, Some(acme));
        store.insert_account("rop@globex.uz", PASSWORD, Role::Rop, Some(globex));
        store.insert_account(INACTIVE_ROP_EMAIL, PASSWORD, Role::Rop, Some(initech));
        let sales_manager =
            store.insert_account(SALES_MANAGER_EMAIL, PASSWORD, Role::SalesManager, Some(acme));
        let busy_sales_manager = store.insert_account(
            BUSY_SALES_MANAGER_EMAIL,
            PASSWORD,
            Role::SalesManager,
            Some(acme),
        );
        store.set_clients(busy_sales_manager, 3);
        let globex_sales_manager =
            store.insert_account("sm@globex.uz", PASSWORD, Role::SalesManager, Some(globex));

        Self {
            acme,
            globex,
            initech,
            admin,
            rop,
            sales_manager,
            busy_sales_manager,
            globex_sales_manager,
        }
    }
}

/// Functions to sign in as the seeded accounts
///
/// Using anyhow::Result lets us get a backtrace from when the error was fist
/// converted to anyhow::Result. Run with RUST_BACKTRACE=1 to view.
impl TestApp {
    pub fn address(&self) -> &str {
        &self.client.address
    }

    /// Log in and return a client carrying the issued token.
    pub async fn login_as(&self, email: &str) -> anyhow::Result<APIClient> {
        let response = self.client.login(&credentials(email)).await?;
        let token = response
            .token()
            .ok_or_else(|| anyhow::anyhow!("login returned no token"))?;
        Ok(APIClient::new(self.address()).with_token(token))
    }

    pub async fn login_admin(&self) -> anyhow::Result<APIClient> {
        self.login_as(ADMIN_EMAIL).await
    }

    pub async fn login_rop(&self) -> anyhow::Result<APIClient> {
        self.login_as(ROP_EMAIL).await
    }

    pub async fn login_sales_manager(&self) -> anyhow::Result<APIClient> {
        self.login_as(SALES_MANAGER_EMAIL).await
    }
}

pub fn credentials(email: &str) -> LoginCredentials {
    LoginCredentials {
        email: email.to_string(),
        password: PASSWORD.to_string(),
    }
}

pub async fn spawn_app_on_port(port: u16) -> TestApp {
    let subscriber = telemetry::get_subscriber("error".into());
    let _ = LogTracer::init();
    let _ = subscriber.try_init();

    let store = web::Data::new(CrmStore::new());
    let fixtures = Fixtures::seed(&store);

    let mut config = Config {
        ip: "127.0.0.1".into(),
        port,
        allowed_origins: vec!["*".to_string()],
    };
    let server = mock_api::build(&mut config, store.clone()).unwrap();
    tokio::spawn(server);

    TestApp {
        port: config.port,
        client: APIClient::new(format!("http://127.0.0.1:{}", config.port)),
        store,
        fixtures,
    }
}

/// Use OS-assigned port for parallel testing.
pub async fn spawn_app() -> TestApp {
    spawn_app_on_port(0).await
}

/// Assert that an API action failed with a specific classified error.
pub fn assert_client_error<T: std::fmt::Debug>(
    result: Result<T, ClientError>,
    expected: impl Fn(&ClientError) -> bool,
) {
    match result {
        Err(e) if expected(&e) => {}
        other => panic!("unexpected result: {other:?}"),
    }
}

//! # Common Test Utilities
//!
//! This module centralizes test harnesses and helper functions used across the
//! `adforge-server` integration tests. It includes:
//!
//! - `TestApp`: A full application harness that spawns a real server on a random port,
//!   configured with mock external services. This is ideal for E2E tests of API endpoints.
//! - `build_mock_state`: A lighter-weight setup that wires the campaign pipeline
//!   against in-process mock providers instead of HTTP mocks.
//! - Helper functions for JWTs and roster fixtures.

// Allow unused code because this is a test utility module, and not all
// functions might be used by every test file that includes it.
#![allow(unused)]

use adforge::{
    providers::db::sqlite::SqliteProvider, PlanClient, PlanClientBuilder,
};
use adforge_server::{
    auth::middleware::Claims,
    config::{self, AppConfig, GenerationConfig, RosterConfig},
    router,
    state::{build_app_state, AppState},
};
use adforge_test_utils::{MockChatProvider, MockImageProvider, MockRosterProvider};
use anyhow::Result;
use httpmock::MockServer;
use jsonwebtoken::{encode, EncodingKey, Header};
use reqwest::Client;
use std::{
    collections::HashMap,
    fs::File,
    io::Write,
    net::SocketAddr,
    path::PathBuf,
    sync::Arc,
    time::{SystemTime, UNIX_EPOCH},
};
use tempfile::{tempdir, NamedTempFile, TempDir};
use tokio::{net::TcpListener, task::JoinHandle};

/// A two-row roster sheet in the column layout the parser expects.
pub const ROSTER_CSV: &str = "\
Name,Username,Platform,Location,Followers,Engagement Rate
Ada Lovelace,@ada,Instagram,London,120000,7.9%
Grace Hopper,@grace,TikTok,New York,88000,5.4%
";

// --- Full Application Test Harness ---

/// A harness for end-to-end testing of the Axum server.
///
/// This struct spawns the server on a random available port, sets up a temporary
/// SQLite database, and configures the `AppState` to use mock AI providers
/// pointed at an `httpmock::MockServer` instance.
pub struct TestApp {
    pub address: String,
    pub client: Client,
    pub mock_server: MockServer,
    pub db_path: PathBuf,
    pub app_state: AppState,
    _db_file: Option<NamedTempFile>,
    _config_dir: Option<TempDir>,
    _server_handle: JoinHandle<()>,
    shutdown_tx: Option<tokio::sync::oneshot::Sender<()>>,
}

impl TestApp {
    /// Spawns the application server and returns a `TestApp` instance.
    pub async fn spawn() -> Result<Self> {
        let mock_server = MockServer::start();
        let db_file = NamedTempFile::new()?;
        let db_path = db_file.path().to_path_buf();

        let config_dir = tempdir()?;
        let config_path = config_dir.path().join("config.yml");
        let config_content = format!(
            r#"
port: 0
db_url: "{}"
roster:
  sheet_url: "{}"
providers:
  chat_default:
    provider: "local"
    api_url: "{}"
    api_key: null
    model_name: "mock-chat-model"
  image_default:
    provider: "local"
    api_url: "{}"
    api_key: null
    model_name: "mock-image-model"
generation:
  chat_provider: "chat_default"
  image_provider: "image_default"
"#,
            db_path.to_str().unwrap(),
            mock_server.url("/spreadsheets/d/test-roster-sheet"),
            mock_server.url("/v1/chat/completions"),
            mock_server.url("/v1/images/generations"),
        );
        let mut file = File::create(&config_path)?;
        file.write_all(config_content.as_bytes())?;

        let config = config::get_config(Some(config_path.to_str().unwrap()))?;
        let app_state = build_app_state(config).await?;

        let mut app = TestApp::spawn_with_state(app_state, mock_server).await?;
        app._db_file = Some(db_file);
        app._config_dir = Some(config_dir);
        Ok(app)
    }

    /// Spawns the server around an already-built `AppState`.
    pub async fn spawn_with_state(app_state: AppState, mock_server: MockServer) -> Result<Self> {
        dotenvy::dotenv().ok();
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .compact()
            .try_init();

        let db_path = PathBuf::from(&app_state.config.db_url);
        let app_state_for_harness = app_state.clone();

        let listener = TcpListener::bind("127.0.0.1:0").await?;
        let addr: SocketAddr = listener.local_addr()?;
        let address = format!("http://{addr}");

        let (shutdown_tx, shutdown_rx) = tokio::sync::oneshot::channel();
        let server_handle = tokio::spawn(async move {
            let app = router::create_router(app_state);
            let server = axum::serve(listener, app).with_graceful_shutdown(async {
                shutdown_rx.await.ok();
            });
            if let Err(e) = server.await {
                tracing::error!("[TestApp] Server error: {}", e);
            }
        });

        tokio::time::sleep(tokio::time::Duration::from_millis(100)).await;

        Ok(Self {
            address,
            client: Client::new(),
            mock_server,
            db_path,
            app_state: app_state_for_harness,
            _db_file: None,
            _config_dir: None,
            _server_handle: server_handle,
            shutdown_tx: Some(shutdown_tx),
        })
    }

    /// Mounts a mock for the roster sheet CSV export on this app's mock server.
    pub fn mount_roster_sheet<'a>(&'a self, csv: &str) -> httpmock::Mock<'a> {
        self.mock_server.mock(|when, then| {
            when.method(httpmock::Method::GET)
                .path("/spreadsheets/d/test-roster-sheet/export")
                .query_param("format", "csv");
            then.status(200).body(csv);
        })
    }
}

impl Drop for TestApp {
    fn drop(&mut self) {
        if let Some(tx) = self.shutdown_tx.take() {
            let _ = tx.send(());
        }
    }
}

// --- Mock-Provider State Builder ---

/// Handles onto the in-process mock providers wired into an `AppState` by
/// `build_mock_state`, for programming responses and asserting on calls.
pub struct MockProviders {
    pub chat: MockChatProvider,
    pub image: MockImageProvider,
    pub roster: MockRosterProvider,
}

/// Builds an `AppState` whose pipeline runs against in-process mock providers.
///
/// The returned `MockProviders` share state with the providers inside the
/// `AppState`, so responses programmed after spawn still take effect.
pub async fn build_mock_state(db_path: &str) -> Result<(AppState, MockProviders)> {
    let chat = MockChatProvider::new();
    let image = MockImageProvider::new();
    let roster = MockRosterProvider::new(Vec::new());

    let plan_client = PlanClientBuilder::new()
        .chat_provider(Box::new(chat.clone()))
        .image_provider(Box::new(image.clone()))
        .roster_provider(Box::new(roster.clone()))
        .build()?;

    let sqlite_provider = SqliteProvider::new(db_path).await?;
    sqlite_provider.initialize_schema().await?;

    let config = AppConfig {
        port: 0,
        db_url: db_path.to_string(),
        roster: RosterConfig {
            sheet_url: "https://docs.google.com/spreadsheets/d/unused".to_string(),
            gid: None,
        },
        providers: HashMap::new(),
        generation: GenerationConfig {
            chat_provider: "mock".to_string(),
            image_provider: "mock".to_string(),
        },
    };

    let app_state = AppState {
        config: Arc::new(config),
        sqlite_provider: Arc::new(sqlite_provider),
        plan_client: Arc::new(plan_client),
    };

    Ok((app_state, MockProviders { chat, image, roster }))
}

// --- JWT Helpers ---

/// Generates a valid JWT for a given user identifier (subject) and role.
pub fn generate_jwt(sub: &str, role: &str) -> Result<String> {
    generate_jwt_with_expiry(sub, role, 3600)
}

/// Generates a JWT with a custom expiration offset. A negative offset
/// produces an already-expired token.
pub fn generate_jwt_with_expiry(sub: &str, role: &str, expires_in_secs: i64) -> Result<String> {
    let now = SystemTime::now().duration_since(UNIX_EPOCH)?.as_secs() as i64;
    let expiration = (now + expires_in_secs).max(0);
    let claims = Claims {
        sub: sub.to_string(),
        exp: expiration as usize,
        role: role.to_string(),
        user_id: String::new(),
    };
    let secret = std::env::var("JWT_SECRET").unwrap_or_else(|_| "a-secure-secret-key".to_string());
    let token = encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_ref()),
    )?;
    Ok(token)
}

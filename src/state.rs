use std::sync::Arc;

use metrics_exporter_prometheus::PrometheusHandle;
use tracing::{info, warn};

use rollcall_config::{CorsConfig, DatabaseConfig, JwtConfig, PasswordConfig, ServerConfig};
use rollcall_core::DummyHash;
use rollcall_db::{MemoryUserStore, PgUserStore, UserStore, init_db_pool};

/// Shared, read-only state handed to every handler.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn UserStore>,
    pub jwt_config: JwtConfig,
    pub password_config: PasswordConfig,
    /// Checked in place of a stored hash when a login names no account.
    pub dummy_hash: Arc<DummyHash>,
    pub cors_config: CorsConfig,
    pub server_config: ServerConfig,
    pub metrics: Option<PrometheusHandle>,
}

impl AppState {
    /// Builds state around `store` with default settings for everything but
    /// the signing key.
    pub fn new(store: Arc<dyn UserStore>, jwt_config: JwtConfig) -> Self {
        let password_config = PasswordConfig::default();
        Self {
            store,
            jwt_config,
            dummy_hash: Arc::new(DummyHash::new(password_config.cost)),
            password_config,
            cors_config: CorsConfig::from_lookup(|_| None),
            server_config: ServerConfig::from_lookup(|_| None),
            metrics: None,
        }
    }

    pub fn with_password_config(mut self, password_config: PasswordConfig) -> Self {
        self.dummy_hash = Arc::new(DummyHash::new(password_config.cost));
        self.password_config = password_config;
        self
    }

    pub fn with_metrics(mut self, handle: Option<PrometheusHandle>) -> Self {
        self.metrics = handle;
        self
    }
}

/// Loads configuration from the environment and connects the user store.
///
/// Without `DATABASE_URL` the service runs on an in-memory store that is
/// lost on restart.
pub async fn init_app_state() -> anyhow::Result<AppState> {
    let jwt_config = JwtConfig::from_env();
    if jwt_config.uses_default_secret() {
        warn!("JWT_SECRET is not set; using the development default signing key");
    }

    let database_config = DatabaseConfig::from_env();
    let store: Arc<dyn UserStore> = match database_config.url.as_deref() {
        Some(_) => {
            let pool = init_db_pool(&database_config).await?;
            info!("Connected to PostgreSQL user store");
            Arc::new(PgUserStore::new(pool))
        }
        None => {
            warn!("DATABASE_URL is not set; using the in-memory user store");
            Arc::new(MemoryUserStore::new())
        }
    };

    let password_config = PasswordConfig::from_env();
    let dummy_hash = DummyHash::new(password_config.cost);
    dummy_hash
        .prime()
        .map_err(|e| anyhow::anyhow!("Failed to prepare login hash: {}", e))?;

    Ok(AppState {
        store,
        jwt_config,
        password_config,
        dummy_hash: Arc::new(dummy_hash),
        cors_config: CorsConfig::from_env(),
        server_config: ServerConfig::from_env(),
        metrics: None,
    })
}

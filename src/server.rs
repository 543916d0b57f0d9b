//! Reusable server runtime.
//!
//! [`ServerHandle`] owns the full lifecycle: store selection, migrations,
//! default admin, REST API and graceful shutdown. Both binaries start the
//! service through it.

use std::net::SocketAddr;
use std::sync::{Arc, OnceLock};

use sea_orm::DatabaseConnection;
use sea_orm_migration::MigratorTrait;
use tracing::{error, info, warn};

use crate::application::{PasswordHasher, Services};
use crate::config::AppConfig;
use crate::domain::RepositoryProvider;
use crate::infrastructure::crypto::jwt::JwtConfig;
use crate::infrastructure::crypto::password::BcryptHasher;
use crate::infrastructure::database::migrator::Migrator;
use crate::infrastructure::{init_database, DatabaseConfig, InMemoryStorage, SeaOrmRepositoryProvider};
use crate::interfaces::http::modules::metrics::MetricsState;
use crate::interfaces::http::{create_api_router, AppState};
use crate::shared::i18n::MessageCatalog;
use crate::shared::shutdown::{ShutdownCoordinator, ShutdownSignal};

// ── Options ────────────────────────────────────────────────────────

pub struct ServerOptions {
    pub config: AppConfig,
    /// Run database migrations on startup (default: true).
    pub auto_migrate: bool,
    /// Create the configured admin when the store has no clients (default: true).
    pub create_default_admin: bool,
}

impl Default for ServerOptions {
    fn default() -> Self {
        Self {
            config: AppConfig::default(),
            auto_migrate: true,
            create_default_admin: true,
        }
    }
}

// ── ServerHandle ───────────────────────────────────────────────────

/// Handle to a running service.
///
/// ```rust,no_run
/// use hotel_booking::server::{ServerHandle, ServerOptions};
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let handle = ServerHandle::start(ServerOptions::default()).await?;
///     handle.install_signal_handler();
///     handle.wait().await;
///     Ok(())
/// }
/// ```
pub struct ServerHandle {
    pub services: Services,
    pub config: AppConfig,
    /// Address the API is bound to; differs from the config when port 0
    /// was requested.
    pub local_addr: SocketAddr,

    db: Option<DatabaseConnection>,
    shutdown: ShutdownCoordinator,
    api_task: tokio::task::JoinHandle<()>,
}

impl ServerHandle {
    /// Start the service with the given options.
    ///
    /// 1. Install the Prometheus recorder
    /// 2. Open the store and run migrations
    /// 3. Create the default admin (if enabled)
    /// 4. Serve the REST API (with Swagger UI)
    pub async fn start(opts: ServerOptions) -> Result<Self, Box<dyn std::error::Error>> {
        let app_cfg = opts.config;
        app_cfg.validate()?;

        info!("Starting hotel booking service...");

        let metrics = metrics_state()?;

        let messages = MessageCatalog::embedded(&app_cfg.i18n.locale)?;
        if !messages.has_locale(&app_cfg.i18n.locale) {
            warn!(
                locale = %app_cfg.i18n.locale,
                "No catalog for configured locale, falling back to its primary language or the message key"
            );
        }
        let messages = Arc::new(messages);

        let jwt_config = JwtConfig {
            secret: app_cfg.security.jwt_secret.clone(),
            expiration_hours: app_cfg.security.jwt_expiration_hours,
            ..JwtConfig::default()
        };
        info!(
            "JWT configured with {}h token expiration",
            jwt_config.expiration_hours
        );

        // ── Store ──────────────────────────────────────────────
        let (repos, db): (Arc<dyn RepositoryProvider>, Option<DatabaseConnection>) =
            if app_cfg.database.is_memory() {
                warn!("Using the in-memory store, data is lost on exit");
                (Arc::new(InMemoryStorage::new()), None)
            } else {
                let db_config = DatabaseConfig {
                    url: app_cfg.database.url.clone(),
                    max_connections: app_cfg.database.max_connections,
                };
                let db = init_database(&db_config).await?;

                if opts.auto_migrate {
                    info!("Running database migrations...");
                    Migrator::up(&db, None).await?;
                    info!("Migrations completed");
                }
                (Arc::new(SeaOrmRepositoryProvider::new(db.clone())), Some(db))
            };

        let hasher: Arc<dyn PasswordHasher> =
            Arc::new(BcryptHasher::new(app_cfg.security.bcrypt_cost));
        let services = Services::new(repos, messages, hasher, jwt_config);

        if opts.create_default_admin {
            let admin = &app_cfg.admin;
            match services
                .clients
                .ensure_admin(&admin.login, &admin.name, &admin.password)
                .await
            {
                Ok(Some(_)) => warn!(login = %admin.login, "Default admin created, change its password"),
                Ok(None) => {}
                Err(e) => error!("Failed to create default admin: {}", e),
            }
        }

        // ── REST API server ────────────────────────────────────
        let shutdown = ShutdownCoordinator::new(app_cfg.server.shutdown_timeout);
        let router = create_api_router(AppState::new(services.clone(), metrics));

        let listener = tokio::net::TcpListener::bind(app_cfg.server.address()).await?;
        let local_addr = listener.local_addr()?;
        info!("REST API server listening on http://{}", local_addr);
        info!("Swagger UI available at http://{}/docs/", local_addr);

        let api_shutdown = shutdown.signal();
        let api_server = axum::serve(
            listener,
            router.into_make_service_with_connect_info::<SocketAddr>(),
        )
        .with_graceful_shutdown(async move {
            api_shutdown.wait().await;
            info!("REST API server received shutdown signal");
        });

        let api_task = tokio::spawn(async move {
            if let Err(e) = api_server.await {
                error!("REST API server error: {}", e);
            }
        });

        Ok(Self {
            services,
            config: app_cfg,
            local_addr,
            db,
            shutdown,
            api_task,
        })
    }

    pub fn shutdown_signal(&self) -> ShutdownSignal {
        self.shutdown.signal()
    }

    /// Install OS signal listeners (SIGTERM, SIGINT) that trigger shutdown.
    pub fn install_signal_handler(&self) {
        self.shutdown.start_signal_listener();
    }

    /// Trigger graceful shutdown without waiting for it.
    pub fn trigger_shutdown(&self) {
        self.shutdown.signal().trigger();
    }

    /// Wait for the server to stop, then close the database. In-flight
    /// requests get `server.shutdown_timeout` seconds once shutdown has
    /// been triggered.
    pub async fn wait(self) {
        let Self {
            db,
            shutdown,
            mut api_task,
            ..
        } = self;

        let signal = shutdown.signal();
        tokio::select! {
            result = &mut api_task => report(result),
            _ = signal.wait() => {
                info!("Waiting for in-flight requests...");
                if !shutdown.drain(async { report((&mut api_task).await) }).await {
                    api_task.abort();
                }
            }
        }

        if let Some(db) = db {
            match db.close().await {
                Ok(()) => info!("Database connection closed"),
                Err(e) => warn!("Error closing database connection: {}", e),
            }
        }

        info!("Hotel booking service shutdown complete");
    }

    /// Trigger shutdown and wait for completion.
    pub async fn shutdown(self) {
        info!("Shutting down hotel booking service...");
        self.trigger_shutdown();
        self.wait().await;
    }

    pub fn is_running(&self) -> bool {
        !self.api_task.is_finished()
    }
}

fn report(result: Result<(), tokio::task::JoinError>) {
    match result {
        Ok(()) => info!("REST API server stopped"),
        Err(e) => error!("REST API server task failed: {}", e),
    }
}

/// The global recorder can only be installed once per process; later
/// starts in the same process reuse it.
fn metrics_state() -> Result<MetricsState, metrics_exporter_prometheus::BuildError> {
    static METRICS: OnceLock<MetricsState> = OnceLock::new();

    if let Some(state) = METRICS.get() {
        return Ok(state.clone());
    }
    let state = MetricsState::install()?;
    info!("Prometheus metrics recorder installed");
    Ok(METRICS.get_or_init(|| state).clone())
}

/// Initialize tracing (logging) from the application config.
///
/// Call this once at process startup (before [`ServerHandle::start`]).
pub fn init_tracing(config: &AppConfig) {
    use tracing_subscriber::layer::SubscriberExt;
    use tracing_subscriber::util::SubscriberInitExt;

    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&config.logging.level));

    let registry = tracing_subscriber::registry().with(env_filter);
    match config.logging.format.to_lowercase().as_str() {
        "json" => registry.with(tracing_subscriber::fmt::layer().json()).init(),
        "compact" => registry.with(tracing_subscriber::fmt::layer().compact()).init(),
        _ => registry.with(tracing_subscriber::fmt::layer().pretty()).init(),
    }
}

#[cfg(test)]
mod tests {
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpStream;

    use super::*;

    fn options(url: &str) -> ServerOptions {
        let mut config = AppConfig::default();
        config.server.host = "127.0.0.1".into();
        config.server.port = 0;
        config.server.shutdown_timeout = 5;
        config.database.url = url.into();
        config.database.max_connections = 1;
        config.security.bcrypt_cost = 4;
        ServerOptions {
            config,
            ..ServerOptions::default()
        }
    }

    async fn get(addr: SocketAddr, path: &str) -> String {
        let mut stream = TcpStream::connect(addr).await.unwrap();
        let request = format!(
            "GET {} HTTP/1.1\r\nHost: localhost\r\nConnection: close\r\n\r\n",
            path
        );
        stream.write_all(request.as_bytes()).await.unwrap();
        let mut response = String::new();
        stream.read_to_string(&mut response).await.unwrap();
        response
    }

    #[tokio::test]
    async fn serves_health_on_memory_store_and_stops() {
        let handle = ServerHandle::start(options("memory")).await.unwrap();
        assert!(handle.is_running());

        let response = get(handle.local_addr, "/health").await;
        assert!(response.starts_with("HTTP/1.1 200"), "{}", response);

        let admins = handle.services.clients.get(1).await.unwrap();
        assert!(admins.is_some_and(|c| c.login == "admin"));

        handle.shutdown().await;
    }

    #[tokio::test]
    async fn migrates_sqlite_and_creates_admin_once() {
        let handle = ServerHandle::start(options("sqlite::memory:")).await.unwrap();

        let created = handle
            .services
            .clients
            .ensure_admin("other", "Other", "secret")
            .await
            .unwrap();
        assert!(created.is_none());

        let response = get(handle.local_addr, "/metrics").await;
        assert!(response.starts_with("HTTP/1.1 200"), "{}", response);

        handle.shutdown().await;
    }

    #[tokio::test]
    async fn invalid_config_is_refused() {
        let mut opts = options("memory");
        opts.config.security.jwt_secret.clear();
        assert!(ServerHandle::start(opts).await.is_err());
    }
}

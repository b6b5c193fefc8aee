//! Wiring: settings and adapters in, a hydrated client out.

use std::ffi::OsString;
use std::path::PathBuf;
use std::sync::Arc;

use ortho_config::OrthoConfig;
use thiserror::Error;
use tracing::info;

use crate::admin::AdminConsole;
use crate::api::ApiClient;
use crate::config::{ClientSettings, ConfigError};
use crate::domain::ports::{HttpTransport, InMemorySessionStorage, Notifier, SessionStorage};
use crate::domain::{ClientResult, DashboardSummary, initial_organization};
use crate::outbound::http::ReqwestTransport;
use crate::outbound::notifier::TracingNotifier;
use crate::outbound::storage::FileSessionStorage;
use crate::session::SessionStore;

/// Failures raised while assembling the client.
#[derive(Debug, Error)]
pub enum BootstrapError {
    /// Settings were missing or invalid.
    #[error(transparent)]
    Config(#[from] ConfigError),
    /// The reqwest client could not be built.
    #[error("failed to build HTTP client: {message}")]
    Http {
        /// Builder error text.
        message: String,
    },
    /// The session directory could not be opened.
    #[error("failed to open session directory {path:?}: {message}")]
    Storage {
        /// Configured directory.
        path: PathBuf,
        /// Open error text.
        message: String,
    },
}

/// Fully wired client: access layer, a hydrated session store, and the
/// admin console.
pub struct StatusPageClient {
    settings: ClientSettings,
    store: Arc<SessionStore>,
    admin: AdminConsole,
}

impl StatusPageClient {
    /// Load settings from `STATUSPAGE_*` variables and configuration files,
    /// then build the client with the default adapters.
    ///
    /// # Errors
    ///
    /// See [`StatusPageClient::from_settings`]; configuration loading
    /// failures are reported as [`ConfigError::Load`].
    pub fn from_env() -> Result<Self, BootstrapError> {
        let settings = ClientSettings::load_from_iter([OsString::from("status-client")])
            .map_err(|error| ConfigError::Load {
                message: error.to_string(),
            })?;
        Self::from_settings(settings)
    }

    /// Build the client with the reqwest transport, file or in-memory
    /// storage, and the tracing notifier.
    ///
    /// # Errors
    ///
    /// Returns an error when the API URL is invalid, the HTTP client cannot
    /// be built, or the session directory cannot be opened.
    pub fn from_settings(settings: ClientSettings) -> Result<Self, BootstrapError> {
        let transport = ReqwestTransport::new().map_err(|error| BootstrapError::Http {
            message: error.to_string(),
        })?;
        let storage: Arc<dyn SessionStorage> = match settings.session_dir.as_deref() {
            Some(path) => Arc::new(FileSessionStorage::open(path).map_err(|error| {
                BootstrapError::Storage {
                    path: path.to_path_buf(),
                    message: error.to_string(),
                }
            })?),
            None => Arc::new(InMemorySessionStorage::new()),
        };
        Self::with_adapters(settings, Arc::new(transport), storage, Arc::new(TracingNotifier))
    }

    /// Build the client around caller-supplied adapters and hydrate the
    /// session.
    ///
    /// # Errors
    ///
    /// Returns [`BootstrapError::Config`] when the API URL is invalid.
    pub fn with_adapters(
        settings: ClientSettings,
        transport: Arc<dyn HttpTransport>,
        storage: Arc<dyn SessionStorage>,
        notifier: Arc<dyn Notifier>,
    ) -> Result<Self, BootstrapError> {
        let base_url = settings.api_base_url()?;
        let api = Arc::new(ApiClient::new(base_url, transport));
        let admin = AdminConsole::new(Arc::clone(&api), Arc::clone(&notifier));
        let store = Arc::new(SessionStore::new(api, storage, notifier));
        let session = store.hydrate();
        info!(
            base_url = store.api().base_url(),
            authenticated = session.is_authenticated(),
            "status page client ready"
        );
        Ok(Self {
            settings,
            store,
            admin,
        })
    }

    /// Settings the client was built from.
    pub fn settings(&self) -> &ClientSettings {
        &self.settings
    }

    /// Session store, already hydrated.
    pub fn session_store(&self) -> &Arc<SessionStore> {
        &self.store
    }

    /// Shared access layer.
    pub fn api(&self) -> &Arc<ApiClient> {
        self.store.api()
    }

    /// Service and incident management.
    pub fn admin(&self) -> &AdminConsole {
        &self.admin
    }

    /// Organization the public view should open with.
    ///
    /// The configured default wins without a request; otherwise the public
    /// organization list is fetched and its first entry used.
    pub async fn initial_organization(&self) -> ClientResult<Option<String>> {
        if let Some(configured) = self.settings.default_organization() {
            return Ok(Some(configured.to_owned()));
        }
        let organizations = self.api().public().organizations().await?;
        Ok(initial_organization(None, &organizations))
    }

    /// Fetch services and incidents together and summarise them.
    pub async fn dashboard_summary(&self) -> ClientResult<DashboardSummary> {
        let api = self.api();
        let services_api = api.services();
        let incidents_api = api.incidents();
        let (services, incidents) = tokio::try_join!(services_api.list(), incidents_api.list())?;
        Ok(DashboardSummary::from_records(&services, &incidents))
    }
}

use std::net::SocketAddr;
use std::path::PathBuf;
use thiserror::Error;

const UNKNOWN: &str = "???";
const DEFAULT_PORT: u16 = 8080;
const DEFAULT_PROJECT_ID: &str = "peezme";
const DEFAULT_DATABASE_URL: &str = "https://peezme-default-rtdb.firebaseio.com/";
const DEFAULT_TEMPLATE: &str = "index.html";
const DEFAULT_ASSETS_DIR: &str = "./assets";

/// How the realtime database client authenticates when no static token is set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CredentialsMode {
    /// Application Default Credentials of the runtime environment.
    Ambient,
    /// No credentials; only works against open database rules or an emulator.
    Anonymous,
}

#[derive(Error, Debug, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Invalid value for {name}: {value}")]
    InvalidValue { name: &'static str, value: String },
}

/// Process configuration, read once at startup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Deployment service name (`K_SERVICE`).
    pub service: String,
    /// Deployment revision (`K_REVISION`).
    pub revision: String,
    pub port: u16,
    pub project_id: String,
    pub database_url: String,
    /// Static OAuth2 access token; overrides `credentials` when set.
    pub auth_token: Option<String>,
    pub credentials: CredentialsMode,
    pub template_path: PathBuf,
    pub assets_dir: PathBuf,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Builds the config through `lookup`. Empty values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |name: &str| lookup(name).filter(|value| !value.is_empty());

        let port = match var("PORT") {
            Some(value) => value.parse::<u16>().map_err(|_| ConfigError::InvalidValue {
                name: "PORT",
                value,
            })?,
            None => DEFAULT_PORT,
        };

        let credentials = match var("FIREBASE_AUTH").as_deref() {
            None | Some("ambient") => CredentialsMode::Ambient,
            Some("none") => CredentialsMode::Anonymous,
            Some(other) => {
                return Err(ConfigError::InvalidValue {
                    name: "FIREBASE_AUTH",
                    value: other.to_string(),
                })
            }
        };

        Ok(Self {
            service: var("K_SERVICE").unwrap_or_else(|| UNKNOWN.to_string()),
            revision: var("K_REVISION").unwrap_or_else(|| UNKNOWN.to_string()),
            port,
            project_id: var("FIREBASE_PROJECT_ID")
                .unwrap_or_else(|| DEFAULT_PROJECT_ID.to_string()),
            database_url: var("FIREBASE_DATABASE_URL")
                .unwrap_or_else(|| DEFAULT_DATABASE_URL.to_string()),
            auth_token: var("FIREBASE_AUTH_TOKEN"),
            credentials,
            template_path: var("LOBBY_TEMPLATE")
                .unwrap_or_else(|| DEFAULT_TEMPLATE.to_string())
                .into(),
            assets_dir: var("LOBBY_ASSETS_DIR")
                .unwrap_or_else(|| DEFAULT_ASSETS_DIR.to_string())
                .into(),
        })
    }

    pub fn listen_addr(&self) -> SocketAddr {
        SocketAddr::from(([0, 0, 0, 0], self.port))
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            service: UNKNOWN.to_string(),
            revision: UNKNOWN.to_string(),
            port: DEFAULT_PORT,
            project_id: DEFAULT_PROJECT_ID.to_string(),
            database_url: DEFAULT_DATABASE_URL.to_string(),
            auth_token: None,
            credentials: CredentialsMode::Ambient,
            template_path: DEFAULT_TEMPLATE.into(),
            assets_dir: DEFAULT_ASSETS_DIR.into(),
        }
    }
}

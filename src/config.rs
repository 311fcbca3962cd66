use std::{env, path::PathBuf};

use crate::error::ConfigError;

pub const HOST_VAR: &str = "REVIEWBOX_HOST";
pub const PORT_VAR: &str = "REVIEWBOX_PORT";
pub const STORE_URL_VAR: &str = "SUPABASE_URL";
pub const STORE_KEY_VAR: &str = "SUPABASE_ANON_KEY";
pub const LEGACY_STORE_URL_VAR: &str = "REACT_APP_SUPABASE_URL";
pub const LEGACY_STORE_KEY_VAR: &str = "REACT_APP_SUPABASE_ANON_KEY";
pub const SQLITE_PATH_VAR: &str = "REVIEWBOX_SQLITE_PATH";
pub const TITLE_VAR: &str = "REVIEWBOX_TITLE";
pub const STATIC_DIR_VAR: &str = "REVIEWBOX_STATIC_DIR";
pub const PROFILE_PHOTO_VAR: &str = "REVIEWBOX_PROFILE_PHOTO";
pub const DEBUG_VAR: &str = "REVIEWBOX_DEBUG";

pub const DEFAULT_HOST: &str = "127.0.0.1";
pub const DEFAULT_PORT: u16 = 5000;
pub const DEFAULT_TITLE: &str = "Rate My Flirt";
pub const DEFAULT_STATIC_DIR: &str = "static";

/// Where reviews are kept. Both `url` and `key` are needed for the hosted store.
#[derive(Debug, Clone, Default)]
pub struct StoreConfig {
    pub url: Option<String>,
    pub key: Option<String>,
    pub sqlite_path: Option<PathBuf>,
}

#[derive(Debug, Clone)]
pub struct SiteConfig {
    pub title: String,
    pub static_dir: PathBuf,
    pub profile_photo: Option<PathBuf>,
}

#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub debug: bool,
    pub store: StoreConfig,
    pub site: SiteConfig,
}

impl Config {
    /// Reads the process environment, after loading `.env` if one exists.
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds a config from an arbitrary key lookup. Blank values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let value = |key: &str| {
            lookup(key)
                .map(|raw| raw.trim().to_string())
                .filter(|raw| !raw.is_empty())
        };

        let port = match value(PORT_VAR) {
            Some(raw) => raw.parse::<u16>().map_err(|_| ConfigError::Invalid {
                key: PORT_VAR,
                value: raw.clone(),
            })?,
            None => DEFAULT_PORT,
        };

        let debug = value(DEBUG_VAR).is_some_and(|raw| {
            matches!(
                raw.to_ascii_lowercase().as_str(),
                "1" | "true" | "yes" | "on"
            )
        });

        Ok(Self {
            host: value(HOST_VAR).unwrap_or_else(|| DEFAULT_HOST.to_string()),
            port,
            debug,
            store: StoreConfig {
                url: value(STORE_URL_VAR).or_else(|| value(LEGACY_STORE_URL_VAR)),
                key: value(STORE_KEY_VAR).or_else(|| value(LEGACY_STORE_KEY_VAR)),
                sqlite_path: value(SQLITE_PATH_VAR).map(PathBuf::from),
            },
            site: SiteConfig {
                title: value(TITLE_VAR).unwrap_or_else(|| DEFAULT_TITLE.to_string()),
                static_dir: value(STATIC_DIR_VAR)
                    .map(PathBuf::from)
                    .unwrap_or_else(|| PathBuf::from(DEFAULT_STATIC_DIR)),
                profile_photo: value(PROFILE_PHOTO_VAR).map(PathBuf::from),
            },
        })
    }

    /// Default tracing filter when `RUST_LOG` is not set.
    pub fn log_filter(&self) -> &'static str {
        if self.debug {
            "reviewbox=debug,actix_web=debug"
        } else {
            "reviewbox=info,actix_web=info"
        }
    }
}

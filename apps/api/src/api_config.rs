use std::env;
use std::fs;
use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;
use std::str::FromStr;

use iamview_application::CatalogTranslator;
use iamview_core::AppError;
use iamview_domain::{FULL_ACCESS_FALLBACK, FallbackPolicy};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Clone)]
pub struct ApiConfig {
    pub api_host: String,
    pub api_port: u16,
    pub frontend_url: String,
    pub navigation_fallback: FallbackPolicy,
    pub translations_path: Option<PathBuf>,
}

impl ApiConfig {
    pub fn load() -> Result<Self, AppError> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, AppError> {
        let setting = |name: &str| lookup(name).filter(|value| !value.trim().is_empty());

        let api_host = setting("API_HOST").unwrap_or_else(|| "127.0.0.1".to_owned());
        let api_port = match setting("API_PORT") {
            Some(value) => value.trim().parse::<u16>().map_err(|error| {
                AppError::Validation(format!("API_PORT must be a port number, got '{value}': {error}"))
            })?,
            None => 3002,
        };
        let frontend_url =
            setting("FRONTEND_URL").unwrap_or_else(|| "http://localhost:3000".to_owned());

        let navigation_fallback = match setting("NAVIGATION_FALLBACK") {
            Some(value) => FallbackPolicy::parse(value.as_str()).ok_or_else(|| {
                AppError::Validation(format!(
                    "NAVIGATION_FALLBACK must be either 'full_access' or 'deny', got '{value}'"
                ))
            })?,
            None => FULL_ACCESS_FALLBACK,
        };

        let translations_path = setting("TRANSLATIONS_PATH").map(PathBuf::from);

        Ok(Self {
            api_host,
            api_port,
            frontend_url,
            navigation_fallback,
            translations_path,
        })
    }

    pub fn socket_address(&self) -> Result<SocketAddr, AppError> {
        let host = IpAddr::from_str(&self.api_host).map_err(|error| {
            AppError::Internal(format!("invalid API_HOST '{}': {error}", self.api_host))
        })?;
        Ok(SocketAddr::from((host, self.api_port)))
    }

    pub fn load_translator(&self) -> Result<CatalogTranslator, AppError> {
        let mut translator = CatalogTranslator::new();
        let Some(path) = self.translations_path.as_ref() else {
            return Ok(translator);
        };

        let document = fs::read_to_string(path).map_err(|error| {
            AppError::Validation(format!(
                "failed to read TRANSLATIONS_PATH '{}': {error}",
                path.display()
            ))
        })?;
        let merged = translator.merge_json(document.as_str())?;
        info!(path = %path.display(), merged, "loaded translation catalogue");

        Ok(translator)
    }
}

pub fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .compact()
        .init();
}

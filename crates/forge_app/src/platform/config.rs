//! Page configuration, persisted as RON next to the binary's working directory.
use std::fs;
use std::path::{Path, PathBuf};

use forge_logging::{forge_info, forge_warn};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use url::Url;

use super::persist::{write_atomically, PersistError};

pub const CONFIG_FILENAME: &str = "slide_forge.ron";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum FormMethod {
    Get,
    #[default]
    Post,
}

impl FormMethod {
    pub fn as_str(self) -> &'static str {
        match self {
            FormMethod::Get => "GET",
            FormMethod::Post => "POST",
        }
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid base url {url:?}: {source}")]
    BaseUrl {
        url: String,
        source: url::ParseError,
    },
    #[error("invalid form action {action:?}: {source}")]
    Action {
        action: String,
        source: url::ParseError,
    },
    #[error("failed to serialize config: {0}")]
    Serialize(#[from] ron::Error),
    #[error("failed to write config: {0}")]
    Persist(#[from] PersistError),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FormConfig {
    /// Address the page was served from; relative actions resolve against it.
    pub base_url: String,
    pub action: String,
    pub method: FormMethod,
    /// Label of the submit control before any submission.
    pub submit_label: String,
}

impl Default for FormConfig {
    fn default() -> Self {
        Self {
            base_url: "http://127.0.0.1:5000/".to_string(),
            action: "/generate".to_string(),
            method: FormMethod::Post,
            submit_label: "Generate Presentation".to_string(),
        }
    }
}

impl FormConfig {
    pub fn base(&self) -> Result<Url, ConfigError> {
        Url::parse(&self.base_url).map_err(|source| ConfigError::BaseUrl {
            url: self.base_url.clone(),
            source,
        })
    }

    /// Absolute URL the form submits to.
    pub fn resolve_action(&self) -> Result<Url, ConfigError> {
        resolve_action(&self.base()?, &self.action)
    }
}

pub fn resolve_action(base: &Url, action: &str) -> Result<Url, ConfigError> {
    base.join(action).map_err(|source| ConfigError::Action {
        action: action.to_string(),
        source,
    })
}

pub fn default_config_path() -> PathBuf {
    PathBuf::from(CONFIG_FILENAME)
}

/// Loads the config at `path`. A missing or unreadable file yields the defaults.
pub fn load(path: &Path) -> FormConfig {
    let content = match fs::read_to_string(path) {
        Ok(text) => text,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
            return FormConfig::default();
        }
        Err(err) => {
            forge_warn!("Failed to read config from {:?}: {}", path, err);
            return FormConfig::default();
        }
    };

    match ron::from_str(&content) {
        Ok(config) => {
            forge_info!("Loaded config from {:?}", path);
            config
        }
        Err(err) => {
            forge_warn!("Failed to parse config from {:?}: {}", path, err);
            FormConfig::default()
        }
    }
}

pub fn save(path: &Path, config: &FormConfig) -> Result<PathBuf, ConfigError> {
    let pretty = ron::ser::PrettyConfig::new();
    let content = ron::ser::to_string_pretty(config, pretty)?;
    Ok(write_atomically(path, &content)?)
}

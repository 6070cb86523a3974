//! `widget.toml` read by the native host.
//!
//! Every key is optional. The `[widget]` table mirrors the component's host
//! attributes; `[host]` carries details reported with each submission.

use std::path::{Path, PathBuf};

use serde::{Deserialize, de::Error as SerdeDeError};
use thiserror::Error;

use crate::app_dirs;
use crate::support_api::SubmitContext;
use crate::widget::SessionAttributes;

/// File name looked up inside the app directory.
pub const CONFIG_FILE_NAME: &str = "widget.toml";

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct HostConfig {
    #[serde(default)]
    pub widget: WidgetSection,
    #[serde(default)]
    pub host: HostSection,
}

/// Attribute values handed to the component; absent keys keep its defaults.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct WidgetSection {
    #[serde(default)]
    pub app_id: Option<String>,
    #[serde(default)]
    pub api_url: Option<String>,
    #[serde(default)]
    pub position: Option<String>,
    #[serde(default)]
    pub user_email: Option<String>,
    #[serde(default)]
    pub user_name: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct HostSection {
    /// Reported as the submission's page URL.
    #[serde(default)]
    pub page_url: Option<String>,
    #[serde(default)]
    pub app_version: Option<String>,
}

#[derive(Debug, Error)]
pub enum HostConfigError {
    #[error("Unable to resolve config directory: {0}")]
    Directory(#[from] app_dirs::AppDirError),
    #[error("Failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Invalid config at {path}: {source}")]
    ParseToml {
        path: PathBuf,
        source: toml::de::Error,
    },
}

impl HostConfig {
    /// `(attribute, value)` pairs for [`SessionAttributes::from_attributes`].
    pub fn attributes(&self) -> Vec<(&'static str, &str)> {
        let widget = &self.widget;
        [
            ("app-id", widget.app_id.as_deref()),
            ("api-url", widget.api_url.as_deref()),
            ("position", widget.position.as_deref()),
            ("user-email", widget.user_email.as_deref()),
            ("user-name", widget.user_name.as_deref()),
        ]
        .into_iter()
        .filter_map(|(name, value)| value.map(|value| (name, value)))
        .collect()
    }

    pub fn session(&self) -> SessionAttributes {
        SessionAttributes::from_attributes(self.attributes())
    }

    /// Submission context for this host; `browser` names the host itself.
    pub fn submit_context(&self) -> SubmitContext {
        SubmitContext {
            url: self.host.page_url.clone(),
            browser: Some(format!("support-widget/{}", env!("CARGO_PKG_VERSION"))),
            screen_resolution: None,
            os: Some(std::env::consts::OS.to_string()),
            app_version: self.host.app_version.clone(),
        }
    }
}

/// Resolve `widget.toml` inside the app directory.
pub fn config_path() -> Result<PathBuf, HostConfigError> {
    Ok(app_dirs::app_root_dir()?.join(CONFIG_FILE_NAME))
}

/// Load the host config, returning defaults when the file is missing.
pub fn load_or_default() -> Result<HostConfig, HostConfigError> {
    load_from(&config_path()?)
}

pub fn load_from(path: &Path) -> Result<HostConfig, HostConfigError> {
    if !path.exists() {
        return Ok(HostConfig::default());
    }
    let bytes = std::fs::read(path).map_err(|source| HostConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let text = String::from_utf8(bytes).map_err(|source| HostConfigError::ParseToml {
        path: path.to_path_buf(),
        source: SerdeDeError::custom(source),
    })?;
    toml::from_str(&text).map_err(|source| HostConfigError::ParseToml {
        path: path.to_path_buf(),
        source,
    })
}

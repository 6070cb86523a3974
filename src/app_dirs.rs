//! Where the native host keeps `widget.toml` and its launch logs.
//!
//! Everything lives under one `.support-widget` folder in the OS config
//! directory. Setting `SUPPORT_WIDGET_CONFIG_HOME` moves that folder's parent,
//! which tests and portable installs rely on.

use std::path::PathBuf;

use directories::BaseDirs;
use thiserror::Error;

pub const APP_DIR_NAME: &str = ".support-widget";
/// Environment variable replacing the OS config directory.
pub const CONFIG_HOME_ENV: &str = "SUPPORT_WIDGET_CONFIG_HOME";
const LOGS_DIR_NAME: &str = "logs";

#[derive(Debug, Error)]
pub enum AppDirError {
    #[error("No config directory could be determined for this user")]
    NoBaseDir,
    #[error("Could not create {path}: {source}")]
    CreateDir {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// `<config>/.support-widget`, created on first use.
pub fn app_root_dir() -> Result<PathBuf, AppDirError> {
    ensure_dir(base_dir()?.join(APP_DIR_NAME))
}

/// `<config>/.support-widget/logs`, created on first use.
pub fn logs_dir() -> Result<PathBuf, AppDirError> {
    ensure_dir(app_root_dir()?.join(LOGS_DIR_NAME))
}

fn base_dir() -> Result<PathBuf, AppDirError> {
    if let Some(path) = base_override() {
        return Ok(path);
    }
    std::env::var_os(CONFIG_HOME_ENV)
        .filter(|value| !value.is_empty())
        .map(PathBuf::from)
        .or_else(|| BaseDirs::new().map(|dirs| dirs.config_dir().to_path_buf()))
        .ok_or(AppDirError::NoBaseDir)
}

#[cfg(test)]
fn base_override() -> Option<PathBuf> {
    tests::base_override()
}

#[cfg(not(test))]
fn base_override() -> Option<PathBuf> {
    None
}

fn ensure_dir(path: PathBuf) -> Result<PathBuf, AppDirError> {
    match std::fs::create_dir_all(&path) {
        Ok(()) => Ok(path),
        Err(source) => Err(AppDirError::CreateDir { path, source }),
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use std::cell::RefCell;
    use tempfile::tempdir;

    thread_local! {
        static BASE_OVERRIDE: RefCell<Option<PathBuf>> = const { RefCell::new(None) };
    }

    pub(crate) fn base_override() -> Option<PathBuf> {
        BASE_OVERRIDE.with(|slot| slot.borrow().clone())
    }

    /// Redirects the current test thread's base directory until dropped.
    pub(crate) struct BaseOverride;

    impl BaseOverride {
        pub(crate) fn set(path: PathBuf) -> Self {
            BASE_OVERRIDE.with(|slot| *slot.borrow_mut() = Some(path));
            Self
        }
    }

    impl Drop for BaseOverride {
        fn drop(&mut self) {
            BASE_OVERRIDE.with(|slot| *slot.borrow_mut() = None);
        }
    }

    #[test]
    fn dirs_are_created_under_the_base() {
        let base = tempdir().unwrap();
        let _guard = BaseOverride::set(base.path().to_path_buf());

        let logs = logs_dir().unwrap();
        assert_eq!(logs, base.path().join(".support-widget").join("logs"));
        assert!(logs.is_dir());
        assert_eq!(app_root_dir().unwrap(), base.path().join(APP_DIR_NAME));
    }

    #[test]
    fn creation_failure_names_the_path() {
        let base = tempdir().unwrap();
        let blocker = base.path().join("not-a-dir");
        std::fs::write(&blocker, "").unwrap();
        let _guard = BaseOverride::set(blocker.clone());

        let err = app_root_dir().unwrap_err();
        assert!(matches!(err, AppDirError::CreateDir { ref path, .. } if path == &blocker.join(APP_DIR_NAME)));
    }
}

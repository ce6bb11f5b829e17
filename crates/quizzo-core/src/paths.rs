//! Filesystem locations for Quizzo data

use std::path::PathBuf;

use crate::constants::ui::{CONFIG_DIR_NAME, LOGS_DIR_NAME};

/// Root config directory (`~/.quizzo`)
///
/// Falls back to the current directory when no home directory can be found.
pub fn config_dir() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(CONFIG_DIR_NAME)
}

/// Directory for log files
pub fn logs_dir() -> PathBuf {
    config_dir().join(LOGS_DIR_NAME)
}

mod config;

pub use config::{Config, PowerConfig, SoundConfig, WorkoutSection};

use std::path::PathBuf;

use crate::error::ConfigError;

/// Returns the directory holding `config.toml`.
///
/// `INTERVALROOM_CONFIG_DIR` wins when set. Otherwise
/// `~/.config/intervalroom[-dev]/`, with `INTERVALROOM_ENV=dev` selecting
/// the development directory.
///
/// # Errors
/// Returns an error if creating the directory fails.
pub fn data_dir() -> Result<PathBuf, ConfigError> {
    let dir = match std::env::var_os("INTERVALROOM_CONFIG_DIR") {
        Some(custom) => PathBuf::from(custom),
        None => {
            let base_dir = dirs::home_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join(".config");
            let env =
                std::env::var("INTERVALROOM_ENV").unwrap_or_else(|_| "production".to_string());
            if env == "dev" {
                base_dir.join("intervalroom-dev")
            } else {
                base_dir.join("intervalroom")
            }
        }
    };

    std::fs::create_dir_all(&dir).map_err(|source| ConfigError::DataDir {
        path: dir.clone(),
        source,
    })?;
    Ok(dir)
}

use std::path::PathBuf;

use super::schema::HbscConfig;
use crate::error::Result;

/// Get the path to the user config file.
fn config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("hbsc").join("config.toml"))
}

/// Load user-level defaults from `~/.config/hbsc/config.toml`.
///
/// A relative `post_parse` script is resolved against that directory.
/// Returns `Ok(None)` if the config file does not exist.
/// Returns `Err` if the file exists but cannot be read or parsed.
pub fn load_user_config() -> Result<Option<HbscConfig>> {
    let path = match config_path() {
        Some(p) => p,
        None => return Ok(None),
    };

    if !path.exists() {
        return Ok(None);
    }

    super::load_layer(&path).map(Some)
}

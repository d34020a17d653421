pub mod schema;
pub mod user;

use std::path::{Path, PathBuf};

use crate::error::{HbscError, Result};

pub use schema::{CompileConfig, EngineConfig, HbscConfig};
pub use user::load_user_config;

pub const CONFIG_FILE: &str = "hbsc.toml";

/// Load and validate an `hbsc.toml`.
///
/// `path` may name the file itself or the directory holding it. A relative
/// `post_parse` script is resolved against the config file's directory.
pub fn load_config(path: &Path) -> Result<HbscConfig> {
    let config_path = if path.is_dir() {
        path.join(CONFIG_FILE)
    } else {
        path.to_path_buf()
    };

    if !config_path.exists() {
        return Err(HbscError::ConfigNotFound { path: config_path });
    }

    load_layer(&config_path)
}

/// Load `hbsc.toml` from `dir` if there is one.
pub fn discover_config(dir: &Path) -> Result<Option<HbscConfig>> {
    let config_path = dir.join(CONFIG_FILE);
    if !config_path.is_file() {
        return Ok(None);
    }
    load_config(&config_path).map(Some)
}

/// Resolve the effective configuration: user config, overlaid by the explicit
/// `--config` file or, failing that, an `hbsc.toml` in `cwd`.
pub fn resolve_config(explicit: Option<&Path>, cwd: &Path) -> Result<HbscConfig> {
    let user = load_user_config()?.unwrap_or_default();
    let project = match explicit {
        Some(path) => Some(load_config(path)?),
        None => discover_config(cwd)?,
    };

    Ok(match project {
        Some(project) => user.merge(project),
        None => user,
    })
}

/// Read one config file, resolve its relative `post_parse` script against the
/// file's directory, and validate it.
pub(crate) fn load_layer(path: &Path) -> Result<HbscConfig> {
    let mut config = read_config(path)?;
    if let Some(base) = path.parent() {
        config.compile.post_parse = config
            .compile
            .post_parse
            .map(|script| relative_to(base, script));
    }

    config.validate()?;

    Ok(config)
}

fn read_config(path: &Path) -> Result<HbscConfig> {
    let content = std::fs::read_to_string(path).map_err(|e| HbscError::Io {
        context: format!("reading {}", path.display()),
        source: e,
    })?;

    toml::from_str(&content).map_err(|e| HbscError::ConfigParse {
        path: path.to_path_buf(),
        source: e,
    })
}

fn relative_to(base: &Path, path: PathBuf) -> PathBuf {
    if path.is_absolute() || base.as_os_str().is_empty() {
        path
    } else {
        base.join(path)
    }
}

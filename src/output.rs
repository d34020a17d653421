use std::io::Write;
use std::path::Path;

use console::style;
use tempfile::NamedTempFile;

use crate::charset::Charset;
use crate::error::{HbscError, Result};

/// Encode `text` and replace `path` with it atomically.
///
/// The parent directory is created if needed; the content is written to a
/// temporary file beside the target and renamed over it.
pub fn write_output(path: &Path, text: &str, charset: Charset) -> Result<()> {
    let bytes = charset.encode(text, path)?;

    let parent = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    std::fs::create_dir_all(parent).map_err(|e| HbscError::Io {
        context: format!("creating directory {}", parent.display()),
        source: e,
    })?;

    let mut file = NamedTempFile::new_in(parent).map_err(|e| HbscError::Io {
        context: format!("creating temporary file in {}", parent.display()),
        source: e,
    })?;
    file.write_all(&bytes).map_err(|e| HbscError::Io {
        context: format!("writing {}", path.display()),
        source: e,
    })?;
    file.persist(path).map_err(|e| HbscError::Io {
        context: format!("writing {}", path.display()),
        source: e.error,
    })?;

    Ok(())
}

/// The `<input> > <output>` line printed for every written file.
pub fn log_written(input: &Path, output: &Path) {
    println!(
        "{} {} {}",
        input.display(),
        style(">").dim(),
        style(output.display()).cyan()
    );
}

use std::path::{is_separator, Path, PathBuf};

use globset::{Glob, GlobSet, GlobSetBuilder};
use walkdir::WalkDir;

use crate::error::{HbscError, Result};
use crate::naming::ExtensionPattern;

/// Facts about the source list as given on the command line.
///
/// They describe the whole run and are computed once, before directories are
/// expanded; AMD output uses them to decide what each module returns.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct InputFacts {
    count: usize,
    single_is_directory: bool,
}

impl InputFacts {
    pub fn new(count: usize, single_is_directory: bool) -> Self {
        Self {
            count,
            single_is_directory: count == 1 && single_is_directory,
        }
    }

    pub fn from_sources(sources: &[PathBuf]) -> Self {
        let single_is_directory = matches!(sources, [only] if only.is_dir());
        Self::new(sources.len(), single_is_directory)
    }

    pub fn count(&self) -> usize {
        self.count
    }

    /// Exactly one source, and it is a file.
    pub fn is_single_file(&self) -> bool {
        self.count == 1 && !self.single_is_directory
    }

    /// Several sources, or a single directory.
    pub fn is_bulk(&self) -> bool {
        self.count > 1 || (self.count == 1 && self.single_is_directory)
    }
}

/// Expand the source list into the template files to compile, in order.
///
/// Files are taken as given. Directories are walked recursively, sorted by
/// name, keeping files that carry a template extension and are not excluded.
pub fn collect_inputs(
    sources: &[PathBuf],
    extension: &ExtensionPattern,
    exclude: &[String],
) -> Result<Vec<PathBuf>> {
    let exclude_set = build_glob_set(exclude)?;
    let mut inputs = Vec::new();

    for source in sources {
        if !source.exists() {
            return Err(HbscError::SourceNotFound {
                path: source.clone(),
            });
        }

        if !source.is_dir() {
            inputs.push(source.clone());
            continue;
        }

        for entry in WalkDir::new(source).min_depth(1).sort_by_file_name() {
            let entry = entry.map_err(|e| HbscError::Io {
                context: format!("walking {}", source.display()),
                source: e.into(),
            })?;
            if !entry.file_type().is_file() {
                continue;
            }

            let path = entry.path();
            let file_name = entry.file_name().to_string_lossy();
            if !extension.is_match(&file_name) {
                continue;
            }

            let rel_path = path.strip_prefix(source).unwrap_or(path);
            if exclude_set.is_match(rel_path) {
                tracing::debug!(path = %path.display(), "excluded");
                continue;
            }

            inputs.push(path.to_path_buf());
        }
    }

    Ok(inputs)
}

fn build_glob_set(patterns: &[String]) -> Result<GlobSet> {
    let mut builder = GlobSetBuilder::new();
    for pattern in patterns {
        let glob = Glob::new(pattern).map_err(|e| HbscError::GlobPattern {
            pattern: pattern.clone(),
            source: e,
        })?;
        builder.add(glob);
    }
    builder.build().map_err(|e| HbscError::GlobPattern {
        pattern: "<combined>".into(),
        source: e,
    })
}

/// Where compiled output goes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Destination {
    /// `<dir>/<basename>` with the extension replaced by `.js`.
    Directory(PathBuf),
    /// One file for every input.
    File(PathBuf),
    /// Next to each input, extension replaced by `.js`.
    BesideInput,
    /// Nothing is written.
    Discard,
}

impl Destination {
    /// Interpret a `--dest` value against the raw source list.
    ///
    /// Without a value the destination is the source itself: a single source
    /// directory collects every output flat inside it, anything else writes
    /// beside each input so a source file is never overwritten.
    pub fn resolve(dest: Option<&Path>, sources: &[PathBuf]) -> Self {
        match dest {
            None => match sources {
                [only] if only.is_dir() => Destination::Directory(only.clone()),
                _ => Destination::BesideInput,
            },
            Some(path) if is_dir_format(path) => Destination::Directory(path.to_path_buf()),
            Some(path) => Destination::File(path.to_path_buf()),
        }
    }

    pub fn output_path(&self, input: &Path, extension: &ExtensionPattern) -> Option<PathBuf> {
        let js_name = || {
            let file_name = input
                .file_name()
                .map(|name| name.to_string_lossy().to_string())
                .unwrap_or_default();
            extension.replace(&file_name, ".js")
        };

        match self {
            Destination::Directory(dir) => Some(dir.join(js_name())),
            Destination::File(file) => Some(file.clone()),
            Destination::BesideInput => Some(input.with_file_name(js_name())),
            Destination::Discard => None,
        }
    }
}

/// An existing directory, a path ending in a separator, or a path without an
/// extension.
pub fn is_dir_format(path: &Path) -> bool {
    path.is_dir()
        || path.as_os_str().to_string_lossy().ends_with(is_separator)
        || path.extension().is_none()
}

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::charset::Charset;
use crate::compiler::node::{DEFAULT_HANDLEBARS_MODULE, DEFAULT_NODE};
use crate::error::Result;
use crate::naming::ExtensionPattern;

/// Contents of an `hbsc.toml` (project) or user-level `config.toml`.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct HbscConfig {
    #[serde(default)]
    pub compile: CompileConfig,

    #[serde(default)]
    pub engine: EngineConfig,
}

/// Defaults for the compile options. Every field is optional so that layers
/// can be merged; command-line flags win over all of them.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct CompileConfig {
    pub dest: Option<PathBuf>,
    pub amd: Option<bool>,
    pub commonjs: Option<String>,
    pub handlebar_path: Option<String>,
    pub known: Option<Vec<String>>,
    pub known_only: Option<bool>,
    pub namespace: Option<String>,
    pub simple: Option<bool>,
    pub root: Option<String>,
    pub partial: Option<bool>,
    pub extension: Option<String>,
    pub charset: Option<String>,
    /// Rhai script applied to each template AST before precompiling.
    pub post_parse: Option<PathBuf>,

    /// Globs (relative to a source directory) skipped while walking it.
    #[serde(default)]
    pub exclude: Vec<String>,
}

/// Where to find the JavaScript template engine.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct EngineConfig {
    pub node: Option<String>,
    pub handlebars_module: Option<String>,
}

impl EngineConfig {
    pub fn node(&self) -> &str {
        self.node.as_deref().unwrap_or(DEFAULT_NODE)
    }

    pub fn handlebars_module(&self) -> &str {
        self.handlebars_module
            .as_deref()
            .unwrap_or(DEFAULT_HANDLEBARS_MODULE)
    }
}

impl HbscConfig {
    pub fn validate(&self) -> Result<()> {
        if let Some(extension) = &self.compile.extension {
            ExtensionPattern::new(extension)?;
        }
        if let Some(charset) = &self.compile.charset {
            charset.parse::<Charset>()?;
        }
        Ok(())
    }

    /// Layer `overlay` on top of `self`; values set in `overlay` win.
    pub fn merge(self, overlay: HbscConfig) -> HbscConfig {
        let base = self.compile;
        let top = overlay.compile;

        let mut exclude = base.exclude;
        exclude.extend(top.exclude);

        let compile = CompileConfig {
            dest: top.dest.or(base.dest),
            amd: top.amd.or(base.amd),
            commonjs: top.commonjs.or(base.commonjs),
            handlebar_path: top.handlebar_path.or(base.handlebar_path),
            known: top.known.or(base.known),
            known_only: top.known_only.or(base.known_only),
            namespace: top.namespace.or(base.namespace),
            simple: top.simple.or(base.simple),
            root: top.root.or(base.root),
            partial: top.partial.or(base.partial),
            extension: top.extension.or(base.extension),
            charset: top.charset.or(base.charset),
            post_parse: top.post_parse.or(base.post_parse),
            exclude,
        };

        let engine = EngineConfig {
            node: overlay.engine.node.or(self.engine.node),
            handlebars_module: overlay
                .engine
                .handlebars_module
                .or(self.engine.handlebars_module),
        };

        HbscConfig { compile, engine }
    }
}

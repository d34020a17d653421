use crate::charset::Charset;
use crate::compiler::{script_post_parse, CompilerOptions, PostParse};
use crate::config::CompileConfig;
use crate::error::Result;
use crate::naming::ExtensionPattern;

pub const DEFAULT_NAMESPACE: &str = "Handlebars.templates";
pub const DEFAULT_EXTENSION: &str = "handlebars|hbs";

/// The option set for one run. Built once and passed explicitly to every step.
#[derive(Debug, Clone)]
pub struct CompileOptions {
    /// Wrap each template in an AMD `define`.
    pub amd: bool,
    /// Module id of the Handlebars runtime for a CommonJS wrapper.
    pub commonjs: Option<String>,
    /// Prefix of the `handlebars` module id in the AMD dependency list.
    pub handlebar_path: String,
    pub known: Vec<String>,
    pub known_only: bool,
    /// Global the default and AMD wrappers register templates under.
    pub namespace: String,
    /// Emit the bare payload only.
    pub simple: bool,
    /// Prefix stripped from template names.
    pub root: Option<String>,
    /// Register under `Handlebars.partials` instead of the namespace.
    pub partial: bool,
    /// `|`-separated template file extensions.
    pub extension: String,
    pub charset: Charset,
    pub post_parse: Option<PostParse>,
}

impl Default for CompileOptions {
    fn default() -> Self {
        Self {
            amd: false,
            commonjs: None,
            handlebar_path: String::new(),
            known: Vec::new(),
            known_only: false,
            namespace: DEFAULT_NAMESPACE.to_string(),
            simple: false,
            root: None,
            partial: false,
            extension: DEFAULT_EXTENSION.to_string(),
            charset: Charset::Utf8,
            post_parse: None,
        }
    }
}

impl CompileOptions {
    /// Build options from a (merged) config layer, loading any post-parse script.
    pub fn from_config(config: &CompileConfig) -> Result<Self> {
        let defaults = Self::default();
        let charset = match &config.charset {
            Some(name) => name.parse()?,
            None => defaults.charset,
        };
        let post_parse = match &config.post_parse {
            Some(path) => Some(script_post_parse(path)?),
            None => None,
        };

        Ok(Self {
            amd: config.amd.unwrap_or(defaults.amd),
            commonjs: config.commonjs.clone(),
            handlebar_path: config
                .handlebar_path
                .clone()
                .unwrap_or(defaults.handlebar_path),
            known: config.known.clone().unwrap_or_default(),
            known_only: config.known_only.unwrap_or(defaults.known_only),
            namespace: config.namespace.clone().unwrap_or(defaults.namespace),
            simple: config.simple.unwrap_or(defaults.simple),
            root: config.root.clone(),
            partial: config.partial.unwrap_or(defaults.partial),
            extension: config.extension.clone().unwrap_or(defaults.extension),
            charset,
            post_parse,
        })
    }

    /// The CommonJS module id, treating an empty string as unset.
    pub fn commonjs_module(&self) -> Option<&str> {
        self.commonjs.as_deref().filter(|module| !module.is_empty())
    }

    pub fn extension_pattern(&self) -> Result<ExtensionPattern> {
        ExtensionPattern::new(&self.extension)
    }

    pub fn compiler_options(&self) -> CompilerOptions {
        CompilerOptions::new(&self.known, self.known_only)
    }

    /// Both module styles requested; AMD takes precedence.
    pub fn has_conflicting_wrappers(&self) -> bool {
        self.amd && self.commonjs_module().is_some()
    }
}

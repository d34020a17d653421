//! The template engine seam.
//!
//! `hbsc` never parses Handlebars itself. A [`TemplateCompiler`] turns source
//! text into the engine's AST and the AST into an opaque precompiled payload;
//! an optional [`PostParse`] hook may rewrite the AST in between.

pub mod node;
pub mod script;

use std::collections::BTreeMap;
use std::fmt;
use std::path::Path;
use std::sync::Arc;

use serde::Serialize;

use crate::error::{HbscError, Result};

pub use node::NodeCompiler;
pub use script::script_post_parse;

/// The engine's AST, kept in its JSON form.
pub type Ast = serde_json::Value;

/// Options forwarded verbatim to the engine's `precompile`.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CompilerOptions {
    pub known_helpers: BTreeMap<String, bool>,
    pub known_helpers_only: bool,
}

impl CompilerOptions {
    pub fn new(known: &[String], known_only: bool) -> Self {
        Self {
            known_helpers: known.iter().map(|name| (name.clone(), true)).collect(),
            known_helpers_only: known_only,
        }
    }
}

pub trait TemplateCompiler {
    fn parse(&self, source: &str) -> Result<Ast>;

    fn precompile(&self, ast: &Ast, options: &CompilerOptions) -> Result<String>;
}

type PostParseFn = dyn Fn(Ast) -> Result<Ast> + Send + Sync;

/// A pure `Ast -> Ast` rewrite applied between parsing and precompiling.
#[derive(Clone)]
pub struct PostParse {
    label: String,
    hook: Arc<PostParseFn>,
}

impl PostParse {
    pub fn new<F>(label: impl Into<String>, hook: F) -> Self
    where
        F: Fn(Ast) -> Result<Ast> + Send + Sync + 'static,
    {
        Self {
            label: label.into(),
            hook: Arc::new(hook),
        }
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn apply(&self, ast: Ast) -> Result<Ast> {
        (self.hook)(ast)
    }
}

impl fmt::Debug for PostParse {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PostParse")
            .field("label", &self.label)
            .finish_non_exhaustive()
    }
}

/// Run `parse`, the optional post-parse hook, then `precompile`.
///
/// Compilation errors are attributed to `file`.
pub fn compile_source(
    compiler: &dyn TemplateCompiler,
    file: &Path,
    source: &str,
    post_parse: Option<&PostParse>,
    options: &CompilerOptions,
) -> Result<String> {
    let attribute = |e: HbscError| match e {
        HbscError::Compile { message, .. } => HbscError::Compile {
            file: file.display().to_string(),
            message,
        },
        other => other,
    };

    let mut ast = compiler.parse(source).map_err(attribute)?;
    if let Some(hook) = post_parse {
        tracing::debug!(hook = hook.label(), file = %file.display(), "applying post-parse hook");
        ast = hook.apply(ast)?;
    }
    compiler.precompile(&ast, options).map_err(attribute)
}

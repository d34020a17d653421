//! Output assembly: the module wrapper and registration statement placed
//! around a compiled payload.
//!
//! Text is built as preamble, registration and closer, always in that order.

use crate::input::InputFacts;
use crate::options::CompileOptions;

/// How the compiled template is exposed to the page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WrapperStyle<'a> {
    /// The bare payload, nothing registered.
    Simple,
    /// `define([...], function(Handlebars) { ... });`
    Amd { handlebar_path: &'a str },
    /// `var Handlebars = require("...");` with no closer.
    CommonJs { module: &'a str },
    /// An immediately-invoked function.
    Default,
}

impl<'a> WrapperStyle<'a> {
    /// Pick the style; `simple` beats `amd`, which beats `commonjs`.
    pub fn from_options(options: &'a CompileOptions) -> Self {
        if options.simple {
            WrapperStyle::Simple
        } else if options.amd {
            WrapperStyle::Amd {
                handlebar_path: &options.handlebar_path,
            }
        } else if let Some(module) = options.commonjs_module() {
            WrapperStyle::CommonJs { module }
        } else {
            WrapperStyle::Default
        }
    }
}

/// Produce the final text of one output file.
pub fn assemble(name: &str, payload: &str, options: &CompileOptions, facts: &InputFacts) -> String {
    let style = WrapperStyle::from_options(options);
    if style == WrapperStyle::Simple {
        return format!("{payload}\n");
    }

    let returns_template = matches!(style, WrapperStyle::Amd { .. }) && facts.is_single_file();

    [
        preamble(style, &options.namespace),
        registration(name, payload, options.partial, returns_template),
        closer(style, options.partial, facts),
    ]
    .concat()
}

pub fn preamble(style: WrapperStyle<'_>, namespace: &str) -> String {
    match style {
        WrapperStyle::Simple => String::new(),
        WrapperStyle::Amd { handlebar_path } => format!(
            "define(['{handlebar_path}handlebars'], function(Handlebars) {{\n{}",
            namespace_binding(namespace)
        ),
        WrapperStyle::CommonJs { module } => format!("var Handlebars = require(\"{module}\");"),
        WrapperStyle::Default => format!("(function() {{\n{}", namespace_binding(namespace)),
    }
}

fn namespace_binding(namespace: &str) -> String {
    format!("  var template = Handlebars.template, templates = {namespace} = {namespace} || {{}};\n")
}

/// The statement storing the template under `name`, optionally returned from
/// the enclosing module.
pub fn registration(name: &str, payload: &str, partial: bool, returns_template: bool) -> String {
    let target = if partial {
        "Handlebars.partials"
    } else {
        "templates"
    };
    let prefix = if returns_template { "return " } else { "" };
    format!("{prefix}{target}['{name}'] = template({payload});\n")
}

pub fn closer(style: WrapperStyle<'_>, partial: bool, facts: &InputFacts) -> String {
    match style {
        WrapperStyle::Simple | WrapperStyle::CommonJs { .. } => String::new(),
        WrapperStyle::Default => "})();".to_string(),
        WrapperStyle::Amd { .. } => {
            let mut text = String::new();
            if facts.is_bulk() {
                text.push_str(if partial {
                    "return Handlebars.partials;\n"
                } else {
                    "return templates;\n"
                });
            }
            text.push_str("});");
            text
        }
    }
}

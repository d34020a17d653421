#![allow(unused_assignments)]

use std::path::PathBuf;

use miette::Diagnostic;
use thiserror::Error;

#[derive(Debug, Error, Diagnostic)]
pub enum HbscError {
    #[error("Config file not found at {path}")]
    #[diagnostic(help("Pass an existing file to --config or drop the flag"))]
    ConfigNotFound { path: PathBuf },

    #[error("Failed to parse {path}")]
    #[diagnostic(help("Check the TOML syntax of the config file"))]
    ConfigParse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("Invalid extension list '{extension}': {reason}")]
    #[diagnostic(help("Use a '|'-separated list of suffixes, e.g. handlebars|hbs"))]
    InvalidExtension { extension: String, reason: String },

    #[error("Glob pattern error: {pattern}")]
    GlobPattern {
        pattern: String,
        #[source]
        source: globset::Error,
    },

    #[error("Source not found: {path}")]
    SourceNotFound { path: PathBuf },

    #[error("Unsupported charset '{name}'")]
    #[diagnostic(help("Supported charsets: utf-8, latin1"))]
    UnsupportedCharset { name: String },

    #[error("Cannot {action} {path} as {charset}")]
    Encoding {
        action: &'static str,
        path: PathBuf,
        charset: &'static str,
    },

    #[error("IO error: {context}")]
    Io {
        context: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Required tool '{name}' was not found")]
    #[diagnostic(help("Install Node.js and run `npm install {install}`, or pass --node"))]
    MissingTool { name: String, install: String },

    #[error("Template compilation failed for {file}: {message}")]
    #[diagnostic(help("Check the Handlebars syntax of the template"))]
    Compile { file: String, message: String },

    #[error("Unexpected response from the template engine: {message}")]
    EngineProtocol { message: String },

    #[error("Post-parse hook '{hook}' failed: {message}")]
    #[diagnostic(help("Check the Rhai script; its last expression must be the AST"))]
    PostParse { hook: String, message: String },
}

pub type Result<T> = std::result::Result<T, HbscError>;

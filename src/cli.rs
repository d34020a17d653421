use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "hbsc",
    about = "Compile Handlebars templates into JavaScript template modules",
    version,
    propagate_version = true
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Path to a config file (default: ./hbsc.toml when present)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Verbosity level (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Compile Handlebars templates to a JavaScript templates file
    Compile(CompileArgs),
}

#[derive(Args)]
pub struct CompileArgs {
    /// Template files or directories
    #[arg(required = true, value_name = "SRC")]
    pub src: Vec<PathBuf>,

    /// Destination file or directory (default: a single source directory, else next to each source)
    #[arg(short, long)]
    pub dest: Option<PathBuf>,

    /// Export AMD style (require.js)
    #[arg(long)]
    pub amd: bool,

    /// Export CommonJS style, path to the Handlebars module
    #[arg(long, value_name = "MODULE")]
    pub commonjs: Option<String>,

    /// Path to handlebars.js (only valid for AMD style)
    #[arg(long = "handlebar-path", alias = "handlebarPath", value_name = "PATH")]
    pub handlebar_path: Option<String>,

    /// Known helpers (can be repeated)
    #[arg(long, value_name = "NAME")]
    pub known: Vec<String>,

    /// Known helpers only
    #[arg(long = "known-only", alias = "knownOnly")]
    pub known_only: bool,

    /// Template namespace
    #[arg(long, value_name = "NS")]
    pub namespace: Option<String>,

    /// Output the template function only
    #[arg(long)]
    pub simple: bool,

    /// Template root, stripped from template names
    #[arg(long, value_name = "PATH")]
    pub root: Option<String>,

    /// Compile partial templates
    #[arg(long)]
    pub partial: bool,

    /// Template extensions, separated by '|'
    #[arg(long, value_name = "EXTLIST")]
    pub extension: Option<String>,

    /// File encoding
    #[arg(short, long, value_name = "ENCODING")]
    pub charset: Option<String>,

    /// Rhai script that rewrites each parsed template AST
    #[arg(long = "post-parse", value_name = "SCRIPT")]
    pub post_parse: Option<PathBuf>,

    /// Skip files matching this glob inside source directories (can be repeated)
    #[arg(long, value_name = "GLOB")]
    pub exclude: Vec<String>,

    /// Node.js executable used to run the Handlebars compiler
    #[arg(long, value_name = "BIN")]
    pub node: Option<String>,

    /// Print the compiled output instead of writing files
    #[arg(long)]
    pub dry_run: bool,
}

use std::path::PathBuf;

use console::style;
use hbsc::compiler::NodeCompiler;
use hbsc::config::{resolve_config, CompileConfig, EngineConfig, HbscConfig};
use hbsc::error::HbscError;
use hbsc::options::CompileOptions;
use hbsc::CompileBatch;
use miette::Result;

use crate::cli::CompileArgs;

pub fn run(args: CompileArgs, config_path: Option<PathBuf>) -> Result<()> {
    let cwd = std::env::current_dir().map_err(|e| HbscError::Io {
        context: "getting current directory".into(),
        source: e,
    })?;

    let config = resolve_config(config_path.as_deref(), &cwd)?.merge(cli_layer(&args));
    let options = CompileOptions::from_config(&config.compile)?;
    let compiler = NodeCompiler::new(config.engine.node(), config.engine.handlebars_module());

    let batch = CompileBatch {
        sources: args.src,
        dest: config.compile.dest.clone(),
        exclude: config.compile.exclude.clone(),
        dry_run: args.dry_run,
    };

    let compiled = hbsc::compile_batch(&compiler, &batch, &options)?;

    if batch.dry_run {
        for template in &compiled {
            println!(
                "{} {} {}",
                style("==>").cyan().bold(),
                template.input.display(),
                style(format!("[{}]", template.name)).dim()
            );
            println!("{}", template.text);
            println!();
        }
        eprintln!(
            "{} Dry run \u{2014} {} templates compiled, no files written.",
            style("\u{2139}").blue().bold(),
            compiled.len()
        );
    } else {
        eprintln!(
            "{} {} templates compiled",
            style("\u{2713}").green().bold(),
            compiled.len()
        );
    }

    Ok(())
}

/// Command-line flags as the topmost config layer.
fn cli_layer(args: &CompileArgs) -> HbscConfig {
    HbscConfig {
        compile: CompileConfig {
            dest: args.dest.clone(),
            amd: args.amd.then_some(true),
            commonjs: args.commonjs.clone(),
            handlebar_path: args.handlebar_path.clone(),
            known: (!args.known.is_empty()).then(|| args.known.clone()),
            known_only: args.known_only.then_some(true),
            namespace: args.namespace.clone(),
            simple: args.simple.then_some(true),
            root: args.root.clone(),
            partial: args.partial.then_some(true),
            extension: args.extension.clone(),
            charset: args.charset.clone(),
            post_parse: args.post_parse.clone(),
            exclude: args.exclude.clone(),
        },
        engine: EngineConfig {
            node: args.node.clone(),
            handlebars_module: None,
        },
    }
}

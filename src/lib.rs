pub mod assemble;
pub mod charset;
pub mod compiler;
pub mod config;
pub mod error;
pub mod input;
pub mod naming;
pub mod options;
pub mod output;

use std::path::{Path, PathBuf};

use console::style;

use crate::assemble::assemble;
use crate::compiler::{compile_source, TemplateCompiler};
use crate::error::Result;
use crate::input::{collect_inputs, Destination, InputFacts};
use crate::naming::{resolve_name, ExtensionPattern};
use crate::options::CompileOptions;
use crate::output::{log_written, write_output};

/// One input file to compile and, optionally, where to write it.
pub struct CompileRequest<'a> {
    pub input: &'a Path,
    pub output: Option<&'a Path>,
    pub options: &'a CompileOptions,
}

/// State shared read-only by every file of a run.
pub struct CompileRun {
    pub extension: ExtensionPattern,
    pub facts: InputFacts,
}

impl CompileRun {
    pub fn new(options: &CompileOptions, sources: &[PathBuf]) -> Result<Self> {
        Ok(Self {
            extension: options.extension_pattern()?,
            facts: InputFacts::from_sources(sources),
        })
    }
}

/// The result of compiling one template.
#[derive(Debug, Clone)]
pub struct CompiledTemplate {
    pub input: PathBuf,
    pub output: Option<PathBuf>,
    pub name: String,
    pub text: String,
}

/// Compile one template: name it, precompile it, wrap it and write it.
///
/// Nothing is written, and nothing logged, when the request has no output path.
pub fn compile_template(
    compiler: &dyn TemplateCompiler,
    request: &CompileRequest<'_>,
    run: &CompileRun,
) -> Result<CompiledTemplate> {
    let options = request.options;
    let input_str = request.input.to_string_lossy();
    let name = resolve_name(&input_str, options.root.as_deref(), &run.extension);
    tracing::debug!(input = %input_str, name = %name, "compiling template");

    let source = options.charset.read(request.input)?;
    let payload = compile_source(
        compiler,
        request.input,
        &source,
        options.post_parse.as_ref(),
        &options.compiler_options(),
    )?;

    let text = assemble(&name, &payload, options, &run.facts);

    if let Some(output) = request.output {
        write_output(output, &text, options.charset)?;
        log_written(request.input, output);
    }

    Ok(CompiledTemplate {
        input: request.input.to_path_buf(),
        output: request.output.map(Path::to_path_buf),
        name,
        text,
    })
}

/// A batch as requested on the command line.
pub struct CompileBatch {
    pub sources: Vec<PathBuf>,
    pub dest: Option<PathBuf>,
    pub exclude: Vec<String>,
    /// Assemble everything but write nothing.
    pub dry_run: bool,
}

/// Compile every template named by `batch`, one at a time.
///
/// The first failure stops the batch; files already written stay written.
pub fn compile_batch(
    compiler: &dyn TemplateCompiler,
    batch: &CompileBatch,
    options: &CompileOptions,
) -> Result<Vec<CompiledTemplate>> {
    if options.has_conflicting_wrappers() {
        eprintln!(
            "{} {}",
            style("warning:").yellow().bold(),
            style("both --amd and --commonjs given; using AMD").yellow()
        );
    }

    let run = CompileRun::new(options, &batch.sources)?;
    let inputs = collect_inputs(&batch.sources, &run.extension, &batch.exclude)?;
    let destination = if batch.dry_run {
        Destination::Discard
    } else {
        Destination::resolve(batch.dest.as_deref(), &batch.sources)
    };
    tracing::debug!(
        sources = run.facts.count(),
        inputs = inputs.len(),
        destination = ?destination,
        "starting batch"
    );

    let mut compiled = Vec::with_capacity(inputs.len());
    for input in &inputs {
        let output = destination.output_path(input, &run.extension);
        let request = CompileRequest {
            input,
            output: output.as_deref(),
            options,
        };
        compiled.push(compile_template(compiler, &request, &run)?);
    }

    Ok(compiled)
}

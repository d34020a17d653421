use std::io::Write;
use std::process::{Command, Stdio};

use serde::Deserialize;
use serde_json::json;

use super::{Ast, CompilerOptions, TemplateCompiler};
use crate::error::{HbscError, Result};

pub const DEFAULT_NODE: &str = "node";
pub const DEFAULT_HANDLEBARS_MODULE: &str = "handlebars";

/// Reads one JSON request from stdin and answers with one JSON response.
const DRIVER: &str = r#"
const handlebars = require(process.env.HBSC_HANDLEBARS_MODULE || 'handlebars');
let input = '';
process.stdin.setEncoding('utf8');
process.stdin.on('data', (chunk) => { input += chunk; });
process.stdin.on('end', () => {
  let response;
  try {
    const request = JSON.parse(input);
    let result;
    if (request.op === 'parse') {
      result = handlebars.parse(request.source);
    } else if (request.op === 'precompile') {
      result = handlebars.precompile(request.ast, request.options);
    } else {
      throw new Error('unknown operation ' + request.op);
    }
    response = { ok: true, result: result };
  } catch (err) {
    response = { ok: false, error: String((err && err.message) || err) };
  }
  process.stdout.write(JSON.stringify(response));
});
"#;

#[derive(Debug, Deserialize)]
struct EngineResponse {
    ok: bool,
    #[serde(default)]
    result: Option<serde_json::Value>,
    #[serde(default)]
    error: Option<String>,
}

/// Drives the JavaScript Handlebars engine through a `node` subprocess.
///
/// Every call spawns a fresh process; inputs are handled one at a time.
#[derive(Debug, Clone)]
pub struct NodeCompiler {
    node: String,
    handlebars_module: String,
}

impl NodeCompiler {
    pub fn new(node: impl Into<String>, handlebars_module: impl Into<String>) -> Self {
        Self {
            node: node.into(),
            handlebars_module: handlebars_module.into(),
        }
    }

    fn request(&self, request: &serde_json::Value) -> Result<serde_json::Value> {
        let body = serde_json::to_vec(request).map_err(|e| HbscError::EngineProtocol {
            message: format!("encoding request: {e}"),
        })?;

        tracing::trace!(node = %self.node, bytes = body.len(), "spawning template engine");
        let mut child = Command::new(&self.node)
            .arg("-e")
            .arg(DRIVER)
            .env("HBSC_HANDLEBARS_MODULE", &self.handlebars_module)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|e| self.spawn_error(e))?;

        // An engine that dies early closes its stdin; its stderr says why.
        let written = match child.stdin.take() {
            Some(mut stdin) => stdin.write_all(&body),
            None => Ok(()),
        };

        let output = child.wait_with_output().map_err(|e| HbscError::Io {
            context: "waiting for the template engine".into(),
            source: e,
        })?;

        if !output.status.success() {
            return Err(self.exit_error(&String::from_utf8_lossy(&output.stderr)));
        }

        written.map_err(|e| HbscError::Io {
            context: "writing request to the template engine".into(),
            source: e,
        })?;

        let response: EngineResponse =
            serde_json::from_slice(&output.stdout).map_err(|e| HbscError::EngineProtocol {
                message: format!("decoding response: {e}"),
            })?;

        match response {
            EngineResponse {
                ok: true,
                result: Some(result),
                ..
            } => Ok(result),
            EngineResponse { ok: true, .. } => Err(HbscError::EngineProtocol {
                message: "response carried no result".into(),
            }),
            EngineResponse { error, .. } => Err(HbscError::Compile {
                file: String::new(),
                message: error.unwrap_or_else(|| "unknown engine error".into()),
            }),
        }
    }

    fn spawn_error(&self, e: std::io::Error) -> HbscError {
        if e.kind() == std::io::ErrorKind::NotFound {
            HbscError::MissingTool {
                name: self.node.clone(),
                install: self.handlebars_module.clone(),
            }
        } else {
            HbscError::Io {
                context: format!("running {}", self.node),
                source: e,
            }
        }
    }

    fn exit_error(&self, stderr: &str) -> HbscError {
        if stderr.contains("Cannot find module") {
            return self.missing_module();
        }
        HbscError::Compile {
            file: String::new(),
            message: stderr.trim().to_string(),
        }
    }

    fn missing_module(&self) -> HbscError {
        HbscError::MissingTool {
            name: self.handlebars_module.clone(),
            install: self.handlebars_module.clone(),
        }
    }
}

impl Default for NodeCompiler {
    fn default() -> Self {
        Self::new(DEFAULT_NODE, DEFAULT_HANDLEBARS_MODULE)
    }
}

impl TemplateCompiler for NodeCompiler {
    fn parse(&self, source: &str) -> Result<Ast> {
        self.request(&json!({ "op": "parse", "source": source }))
    }

    fn precompile(&self, ast: &Ast, options: &CompilerOptions) -> Result<String> {
        let result = self.request(&json!({
            "op": "precompile",
            "ast": ast,
            "options": options,
        }))?;

        match result {
            serde_json::Value::String(payload) => Ok(payload),
            other => Err(HbscError::EngineProtocol {
                message: format!("expected precompiled source, got {other}"),
            }),
        }
    }
}

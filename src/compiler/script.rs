use std::path::Path;

use rhai::{Dynamic, Engine, Scope, AST};

use super::{Ast, PostParse};
use crate::error::{HbscError, Result};

/// Create a sandboxed Rhai engine for post-parse scripts.
pub fn create_engine() -> Engine {
    let mut engine = Engine::new();

    engine.set_max_call_levels(64);
    engine.set_max_operations(1_000_000);
    engine.set_max_string_size(10 * 1024 * 1024); // 10MB

    engine
}

/// Load a Rhai script as a post-parse hook.
///
/// The template AST is visible to the script as `ast`; the value of the
/// script's last expression becomes the new AST.
pub fn script_post_parse(path: &Path) -> Result<PostParse> {
    let label = path.display().to_string();
    let source = std::fs::read_to_string(path).map_err(|e| HbscError::Io {
        context: format!("reading post-parse hook {label}"),
        source: e,
    })?;

    let engine = create_engine();
    let script = engine.compile(&source).map_err(|e| HbscError::PostParse {
        hook: label.clone(),
        message: e.to_string(),
    })?;

    let hook_label = label.clone();
    Ok(PostParse::new(label, move |tree| {
        run_script(&engine, &script, &hook_label, tree)
    }))
}

fn run_script(engine: &Engine, script: &AST, label: &str, tree: Ast) -> Result<Ast> {
    let hook_error = |message: String| HbscError::PostParse {
        hook: label.to_string(),
        message,
    };

    let value = rhai::serde::to_dynamic(&tree).map_err(|e| hook_error(e.to_string()))?;
    let mut scope = Scope::new();
    scope.push_dynamic("ast", value);

    let result: Dynamic = engine
        .eval_ast_with_scope(&mut scope, script)
        .map_err(|e| hook_error(e.to_string()))?;

    if result.is_unit() {
        return Err(hook_error("script did not return an AST".into()));
    }

    rhai::serde::from_dynamic(&result).map_err(|e| hook_error(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::fs;

    fn write_script(dir: &Path, body: &str) -> std::path::PathBuf {
        let path = dir.join("hook.rhai");
        fs::write(&path, body).unwrap();
        path
    }

    #[test]
    fn test_script_rewrites_ast() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_script(
            dir.path(),
            r#"
            ast.body = ast.body.filter(|node| node["type"] != "CommentStatement");
            ast
            "#,
        );

        let hook = script_post_parse(&path).unwrap();
        let tree = json!({
            "type": "Program",
            "body": [
                { "type": "CommentStatement", "value": "drop me" },
                { "type": "ContentStatement", "value": "keep me" }
            ]
        });

        let rewritten = hook.apply(tree).unwrap();
        assert_eq!(rewritten["body"].as_array().unwrap().len(), 1);
        assert_eq!(rewritten["body"][0]["value"], json!("keep me"));
    }

    #[test]
    fn test_script_must_return_ast() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_script(dir.path(), "let x = 1;");

        let hook = script_post_parse(&path).unwrap();
        let result = hook.apply(json!({ "type": "Program", "body": [] }));
        assert!(matches!(result, Err(HbscError::PostParse { .. })));
    }

    #[test]
    fn test_script_syntax_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_script(dir.path(), "ast.body = ");

        let result = script_post_parse(&path);
        assert!(matches!(result, Err(HbscError::PostParse { .. })));
    }

    #[test]
    fn test_engine_max_operations() {
        let engine = create_engine();
        let result = engine.run("let x = 0; while true { x += 1; }");
        assert!(result.is_err());
    }
}

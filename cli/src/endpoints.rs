//! # Endpoints Command
//!
//! Prints a one-line-per-endpoint overview of a document.

use apidoc_core::ApiDocumentation;

use crate::error::CliResult;
use crate::inspect::DocArgs;

/// Arguments for the endpoints command.
#[derive(clap::Args, Debug, Clone)]
pub struct EndpointsArgs {
    #[clap(flatten)]
    pub doc: DocArgs,
}

/// Formats `METHOD path  [section / module]` lines, grouped as in the model.
pub fn list_lines(model: &ApiDocumentation) -> Vec<String> {
    model
        .sections
        .iter()
        .flat_map(|section| {
            section.modules.iter().flat_map(move |module| {
                module.endpoints.iter().map(move |endpoint| {
                    format!(
                        "{} {}  [{} / {}]",
                        endpoint.method, endpoint.path, section.name, module.name
                    )
                })
            })
        })
        .collect()
}

/// Executes the endpoints command.
pub fn execute(args: &EndpointsArgs) -> CliResult<()> {
    let model = args.doc.build()?;
    for line in list_lines(&model) {
        println!("{}", line);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use apidoc_core::{build_documentation, DocConfig};
    use serde_json::json;

    #[test]
    fn test_list_lines() {
        let raw = json!({
            "openapi": "3.0.0",
            "paths": {
                "/users": {
                    "get": {"tags": ["Users"], "responses": {}},
                    "post": {"tags": ["Users"], "summary": "Sign up", "responses": {}}
                },
                "/health": {"head": {"responses": {}}}
            }
        });
        let model = build_documentation(&raw, &DocConfig::default());
        assert_eq!(
            list_lines(&model),
            vec![
                "GET /users  [Users / List users]",
                "POST /users  [Users / Sign up]",
                "HEAD /health  [Default / Head health]",
            ]
        );
    }
}

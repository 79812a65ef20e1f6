#![deny(missing_docs)]

//! # Inspect Command
//!
//! Builds the documentation model of a document and prints it as JSON.

use std::path::PathBuf;

use apidoc_core::{build_documentation, ApiDocumentation, DocConfig, IdCollisionPolicy};

use crate::error::CliResult;
use crate::loader::load_document;

/// Options shared by every command that builds the documentation model.
#[derive(clap::Args, Debug, Clone)]
pub struct DocArgs {
    /// Path to the OpenAPI / Swagger document (JSON or YAML).
    pub file: PathBuf,

    /// Section name for operations without tags.
    #[clap(long, env = "APIDOC_DEFAULT_TAG", default_value = apidoc_core::DEFAULT_TAG)]
    pub default_tag: String,

    /// Leave out operations marked `deprecated: true`.
    #[clap(long)]
    pub skip_deprecated: bool,

    /// How to handle names that sanitize to the same id (`suffix` or `merge`).
    #[clap(long, default_value = "suffix")]
    pub id_collisions: IdCollisionPolicy,
}

impl DocArgs {
    /// The grouping configuration described by these flags.
    pub fn config(&self) -> DocConfig {
        DocConfig {
            default_tag: self.default_tag.clone(),
            include_deprecated: !self.skip_deprecated,
            id_collisions: self.id_collisions,
        }
    }

    /// Loads the document and builds its documentation model.
    pub fn build(&self) -> CliResult<ApiDocumentation> {
        let raw = load_document(&self.file)?;
        let model = build_documentation(&raw, &self.config());
        log::info!(
            "{}: {} sections, {} endpoints",
            model.spec_version,
            model.sections.len(),
            model.endpoint_count()
        );
        Ok(model)
    }
}

/// Arguments for the inspect command.
#[derive(clap::Args, Debug, Clone)]
pub struct InspectArgs {
    #[clap(flatten)]
    pub doc: DocArgs,

    /// Print single-line JSON instead of pretty-printed output.
    #[clap(long)]
    pub compact: bool,
}

/// Renders the documentation model as JSON text.
pub fn render(args: &InspectArgs) -> CliResult<String> {
    let model = args.doc.build()?;
    let text = if args.compact {
        serde_json::to_string(&model)?
    } else {
        serde_json::to_string_pretty(&model)?
    };
    Ok(text)
}

/// Executes the inspect command.
pub fn execute(args: &InspectArgs) -> CliResult<()> {
    println!("{}", render(args)?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{json, Value};
    use std::fs;

    const PETSTORE: &str = r#"
openapi: 3.0.0
info: {title: Pets, version: 1.0.0}
paths:
  /pets:
    get:
      responses:
        '200':
          description: ok
          content:
            application/json:
              schema: {type: array, items: {type: string}}
  /pets/{id}:
    delete:
      deprecated: true
      tags: [Pets]
      responses:
        '204': {description: gone}
"#;

    fn args(dir: &tempfile::TempDir) -> InspectArgs {
        let file = dir.path().join("pets.yaml");
        fs::write(&file, PETSTORE).unwrap();
        InspectArgs {
            doc: DocArgs {
                file,
                default_tag: "General".into(),
                skip_deprecated: false,
                id_collisions: IdCollisionPolicy::Suffix,
            },
            compact: false,
        }
    }

    #[test]
    fn test_render_pretty_json() {
        let dir = tempfile::tempdir().unwrap();
        let text = render(&args(&dir)).unwrap();
        assert!(text.contains('\n'));

        let value: Value = serde_json::from_str(&text).unwrap();
        assert_eq!(value["title"], json!("Pets"));
        assert_eq!(value["sections"][0]["name"], json!("General"));
        assert_eq!(
            value["sections"][0]["modules"][0]["endpoints"][0]["successExample"],
            json!(["string"])
        );
        assert_eq!(value["sections"][1]["name"], json!("Pets"));
    }

    #[test]
    fn test_render_compact_skipping_deprecated() {
        let dir = tempfile::tempdir().unwrap();
        let mut args = args(&dir);
        args.compact = true;
        args.doc.skip_deprecated = true;

        let text = render(&args).unwrap();
        assert!(!text.contains('\n'));

        let value: Value = serde_json::from_str(&text).unwrap();
        assert_eq!(value["sections"].as_array().map(Vec::len), Some(1));
    }
}

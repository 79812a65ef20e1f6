//! # Document Loader
//!
//! Reads an OpenAPI / Swagger file from disk into a `serde_json::Value`.

use std::fs;
use std::path::Path;

use serde_json::Value;

use crate::error::{CliError, CliResult};

/// Loads `path` as JSON, or as YAML for `.yaml`/`.yml` files.
///
/// Files with any other extension are tried as JSON first and then as YAML;
/// when both fail the JSON error is reported.
pub fn load_document(path: &Path) -> CliResult<Value> {
    if !path.exists() {
        return Err(CliError::General(format!(
            "OpenAPI file not found: {:?}",
            path
        )));
    }
    let content = fs::read_to_string(path)?;

    let is_yaml = path
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("yaml") || ext.eq_ignore_ascii_case("yml"));

    if is_yaml {
        return Ok(serde_yaml::from_str(&content)?);
    }

    match serde_json::from_str(&content) {
        Ok(value) => Ok(value),
        Err(json_err) => {
            log::debug!("{:?} is not JSON ({}); trying YAML", path, json_err);
            serde_yaml::from_str(&content).map_err(|_| CliError::Json(json_err))
        }
    }
}

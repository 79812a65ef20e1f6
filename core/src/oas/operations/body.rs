#![deny(missing_docs)]

//! # Body Resolution
//!
//! Media-type selection and request body extraction.
//! Only `application/json` content is documented; media-type parameters
//! (`; charset=utf-8`) are ignored when matching.

use crate::oas::document::Document;
use crate::oas::examples::ExampleSynthesizer;
use crate::oas::models::{ParamLocation, Parameter, RequestBody};
use crate::oas::schema::Schema;
use serde_json::{Map, Value};

/// The media type whose examples end up in the documentation.
pub(crate) const JSON_MEDIA_TYPE: &str = "application/json";

/// Finds the `application/json` entry of a `content` map.
pub(crate) fn select_json_media(content: &Map<String, Value>) -> Option<(&String, &Value)> {
    content.iter().find(|(key, _)| is_json_media_type(key))
}

fn is_json_media_type(key: &str) -> bool {
    key.split(';')
        .next()
        .map(|essence| essence.trim().eq_ignore_ascii_case(JSON_MEDIA_TYPE))
        .unwrap_or(false)
}

/// Picks the example for a Media Type object.
///
/// Priority: `example`, then the `value` of the first `examples` entry, then the schema.
pub(crate) fn media_example(
    media: &Value,
    document: &Document<'_>,
    synthesizer: &ExampleSynthesizer<'_, '_>,
) -> Option<Value> {
    if let Some(example) = media.get("example") {
        return Some(example.clone());
    }

    if let Some(value) = first_named_example(media, document) {
        return Some(value);
    }

    media
        .get("schema")
        .map(|raw| synthesizer.example_for(&Schema::from_value(raw)))
}

fn first_named_example(media: &Value, document: &Document<'_>) -> Option<Value> {
    let (name, entry) = media.get("examples")?.as_object()?.iter().next()?;
    match document.deref_node(entry) {
        Ok(example) => example.get("value").cloned(),
        Err(err) => {
            log::warn!("{}; ignoring example '{}'", err, name);
            None
        }
    }
}

/// Extracts the JSON request body of an operation.
///
/// OpenAPI 3 `requestBody` wins; otherwise a Swagger 2.0 `in: body` parameter is used.
pub(crate) fn extract_request_body(
    operation: &Value,
    parameters: &[Parameter],
    document: &Document<'_>,
    synthesizer: &ExampleSynthesizer<'_, '_>,
) -> Option<RequestBody> {
    if let Some(raw) = operation.get("requestBody") {
        let body = match document.deref_node(raw) {
            Ok(body) => body,
            Err(err) => {
                log::warn!("{}; request body omitted", err);
                return None;
            }
        };
        let (content_type, media) = body
            .get("content")
            .and_then(Value::as_object)
            .and_then(select_json_media)?;

        return Some(RequestBody {
            content_type: content_type.clone(),
            required: body.get("required").and_then(Value::as_bool).unwrap_or(false),
            description: body
                .get("description")
                .and_then(Value::as_str)
                .map(str::to_string),
            example: media_example(media, document, synthesizer),
        });
    }

    parameters
        .iter()
        .find(|p| p.location == ParamLocation::Body)
        .map(|p| RequestBody {
            content_type: JSON_MEDIA_TYPE.to_string(),
            required: p.required,
            description: p.description.clone(),
            example: Some(p.example.clone()),
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::oas::resolver::SchemaResolver;
    use serde_json::json;

    fn run(raw_doc: &Value, operation: &Value) -> Option<RequestBody> {
        let document = Document::new(raw_doc);
        let resolver = SchemaResolver::new(document.clone());
        let synthesizer = ExampleSynthesizer::new(&resolver);
        extract_request_body(operation, &[], &document, &synthesizer)
    }

    #[test]
    fn test_media_type_matching_ignores_parameters() {
        assert!(is_json_media_type("application/json"));
        assert!(is_json_media_type("application/json; charset=utf-8"));
        assert!(is_json_media_type("Application/JSON"));
        assert!(!is_json_media_type("application/xml"));
        assert!(!is_json_media_type("application/vnd.api+json"));
    }

    #[test]
    fn test_schema_driven_body() {
        let doc = json!({
            "openapi": "3.0.0",
            "components": {"schemas": {"NewUser": {
                "type": "object",
                "properties": {"email": {"type": "string", "format": "email"}}
            }}}
        });
        let op = json!({
            "requestBody": {
                "required": true,
                "content": {
                    "application/xml": {"schema": {"type": "string"}},
                    "application/json": {"schema": {"$ref": "#/components/schemas/NewUser"}}
                }
            }
        });
        let body = run(&doc, &op).unwrap();
        assert_eq!(body.content_type, "application/json");
        assert!(body.required);
        assert_eq!(body.example, Some(json!({"email": "user@example.com"})));
    }

    #[test]
    fn test_media_example_beats_schema() {
        let doc = json!({"openapi": "3.0.0"});
        let op = json!({
            "requestBody": {"content": {"application/json": {
                "schema": {"type": "object", "properties": {"a": {"type": "string"}}},
                "example": {"a": "explicit"}
            }}}
        });
        assert_eq!(run(&doc, &op).unwrap().example, Some(json!({"a": "explicit"})));
    }

    #[test]
    fn test_named_examples_first_entry_with_ref() {
        let doc = json!({
            "openapi": "3.0.0",
            "components": {"examples": {"Alice": {"value": {"name": "alice"}}}}
        });
        let op = json!({
            "requestBody": {"content": {"application/json": {
                "schema": {"type": "object"},
                "examples": {
                    "first": {"$ref": "#/components/examples/Alice"},
                    "second": {"value": {"name": "bob"}}
                }
            }}}
        });
        assert_eq!(run(&doc, &op).unwrap().example, Some(json!({"name": "alice"})));
    }

    #[test]
    fn test_request_body_ref() {
        let doc = json!({
            "openapi": "3.0.0",
            "components": {"requestBodies": {"Flag": {
                "content": {"application/json": {"schema": {"type": "boolean"}}}
            }}}
        });
        let op = json!({"requestBody": {"$ref": "#/components/requestBodies/Flag"}});
        assert_eq!(run(&doc, &op).unwrap().example, Some(json!(true)));
    }

    #[test]
    fn test_non_json_body_is_ignored() {
        let doc = json!({"openapi": "3.0.0"});
        let op = json!({
            "requestBody": {"content": {"multipart/form-data": {"schema": {"type": "object"}}}}
        });
        assert!(run(&doc, &op).is_none());
    }

    #[test]
    fn test_swagger2_body_parameter() {
        let doc = json!({"swagger": "2.0"});
        let document = Document::new(&doc);
        let resolver = SchemaResolver::new(document.clone());
        let synthesizer = ExampleSynthesizer::new(&resolver);
        let params = vec![Parameter {
            name: "payload".into(),
            location: ParamLocation::Body,
            required: true,
            description: Some("The pet".into()),
            schema: Schema::empty_object(),
            example: json!({"name": "rex"}),
        }];
        let body = extract_request_body(&json!({}), &params, &document, &synthesizer).unwrap();
        assert_eq!(body.content_type, "application/json");
        assert_eq!(body.example, Some(json!({"name": "rex"})));
        assert_eq!(body.description.as_deref(), Some("The pet"));
    }
}

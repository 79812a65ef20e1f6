#![deny(missing_docs)]

//! # Response Resolution
//!
//! Selects the success response of an operation and turns every declared
//! failure status (>= 400) into an [`ErrorDescriptor`].

use crate::oas::document::Document;
use crate::oas::examples::ExampleSynthesizer;
use crate::oas::models::ErrorDescriptor;
use crate::oas::operations::body::{media_example, select_json_media, JSON_MEDIA_TYPE};
use crate::oas::schema::Schema;
use serde_json::{Map, Value};

/// Status reported when no success response is declared.
pub(crate) const DEFAULT_SUCCESS_STATUS: u16 = 200;

/// Success codes checked before falling back to any other `2xx`.
const PREFERRED_SUCCESS: [&str; 4] = ["200", "201", "202", "204"];

/// The chosen success response.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct SuccessResponse {
    pub status: u16,
    pub description: Option<String>,
    pub example: Option<Value>,
}

impl Default for SuccessResponse {
    fn default() -> Self {
        Self {
            status: DEFAULT_SUCCESS_STATUS,
            description: None,
            example: None,
        }
    }
}

/// Selects the success response.
///
/// Preference order:
/// 1. `200`, `201`, `202`, `204`
/// 2. Any other concrete `2xx` code, lowest first
/// 3. The `2XX` range key, reported as `200`
///
/// Without a match the status defaults to `200` with no example.
pub(crate) fn extract_success(
    responses: Option<&Map<String, Value>>,
    document: &Document<'_>,
    synthesizer: &ExampleSynthesizer<'_, '_>,
) -> SuccessResponse {
    let Some(responses) = responses else {
        return SuccessResponse::default();
    };

    let chosen = PREFERRED_SUCCESS
        .iter()
        .find_map(|code| responses.get(*code).map(|r| (*code, r)))
        .or_else(|| {
            responses
                .iter()
                .filter_map(|(key, r)| success_code(key).map(|code| (code, key.as_str(), r)))
                .min_by_key(|(code, _, _)| *code)
                .map(|(_, key, r)| (key, r))
        })
        .or_else(|| {
            responses
                .iter()
                .find(|(key, _)| range_status(key) == Some(200))
                .map(|(key, r)| (key.as_str(), r))
        });

    let Some((key, raw)) = chosen else {
        return SuccessResponse::default();
    };

    let response = match document.deref_node(raw) {
        Ok(response) => response,
        Err(err) => {
            log::warn!("{}; success response '{}' treated as empty", err, key);
            return SuccessResponse {
                status: status_of(key),
                ..SuccessResponse::default()
            };
        }
    };

    SuccessResponse {
        status: status_of(key),
        description: non_empty_description(response),
        example: response_example(response, document, synthesizer),
    }
}

/// Builds one descriptor per numeric status >= 400, in ascending order.
///
/// `4XX` / `5XX` range keys are reported as `400` / `500` unless that exact
/// code is also declared.
pub(crate) fn extract_errors(
    responses: Option<&Map<String, Value>>,
    document: &Document<'_>,
    synthesizer: &ExampleSynthesizer<'_, '_>,
) -> Vec<ErrorDescriptor> {
    let Some(responses) = responses else {
        return Vec::new();
    };

    let mut failures: Vec<(u16, &Value)> = responses
        .iter()
        .filter_map(|(key, r)| key.parse::<u16>().ok().map(|code| (code, r)))
        .filter(|(code, _)| *code >= 400)
        .collect();
    for (key, r) in responses {
        if let Some(base) = range_status(key).filter(|base| *base >= 400) {
            if !failures.iter().any(|(code, _)| *code == base) {
                failures.push((base, r));
            }
        }
    }
    failures.sort_by_key(|(code, _)| *code);

    failures
        .into_iter()
        .map(|(status, raw)| {
            let response = match document.deref_node(raw) {
                Ok(response) => Some(response),
                Err(err) => {
                    log::warn!("{}; error response {} documented without body", err, status);
                    None
                }
            };
            let description = response.and_then(non_empty_description);
            let example =
                response.and_then(|r| response_example(r, document, synthesizer));
            let message = example
                .as_ref()
                .and_then(|payload| payload.get("message"))
                .and_then(Value::as_str)
                .map(str::to_string)
                .or_else(|| description.clone())
                .unwrap_or_else(|| format!("Error {}", status));

            ErrorDescriptor {
                status,
                description,
                message,
                example,
            }
        })
        .collect()
}

/// A concrete `2xx` code (`"200"`..`"299"`).
fn success_code(key: &str) -> Option<u16> {
    if key.len() == 3 && key.starts_with('2') && key.chars().all(|c| c.is_ascii_digit()) {
        key.parse().ok()
    } else {
        None
    }
}

/// A range key (`2XX`, `4xx`) as the lowest status of its class.
fn range_status(key: &str) -> Option<u16> {
    let mut chars = key.chars();
    let class = chars.next()?.to_digit(10)?;
    let rest = chars.as_str();
    if (1..=5).contains(&class) && rest.eq_ignore_ascii_case("xx") {
        u16::try_from(class * 100).ok()
    } else {
        None
    }
}

fn status_of(key: &str) -> u16 {
    key.parse()
        .ok()
        .or_else(|| range_status(key))
        .unwrap_or(DEFAULT_SUCCESS_STATUS)
}

fn non_empty_description(response: &Value) -> Option<String> {
    response
        .get("description")
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|d| !d.is_empty())
        .map(str::to_string)
}

/// OpenAPI 3 `content`; Swagger 2.0 `examples` / `schema` directly on the response.
fn response_example(
    response: &Value,
    document: &Document<'_>,
    synthesizer: &ExampleSynthesizer<'_, '_>,
) -> Option<Value> {
    if let Some(content) = response.get("content").and_then(Value::as_object) {
        let (_, media) = select_json_media(content)?;
        return media_example(media, document, synthesizer);
    }

    if let Some(example) = response
        .get("examples")
        .and_then(|examples| examples.get(JSON_MEDIA_TYPE))
    {
        return Some(example.clone());
    }

    response
        .get("schema")
        .map(|raw| synthesizer.example_for(&Schema::from_value(raw)))
}

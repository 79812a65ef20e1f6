#![deny(missing_docs)]

//! # Naming Utilities
//!
//! Helpers for deriving module names from HTTP method + path, and for turning
//! display names into stable, URL-safe ids.

use crate::oas::models::HttpMethod;
use regex::Regex;
use std::collections::HashSet;
use std::sync::OnceLock;

/// Resource name used when a path has no literal segment (e.g. `/` or `/{id}`).
const ROOT_RESOURCE: &str = "root";

/// Id used when a name contains no slug-safe characters at all.
const FALLBACK_ID: &str = "untitled";

/// Picks the module name of an operation: its trimmed summary, else a name
/// derived from method and path.
pub fn module_name(summary: Option<&str>, method: HttpMethod, path: &str) -> String {
    match summary.map(str::trim).filter(|s| !s.is_empty()) {
        Some(summary) => summary.to_string(),
        None => derive_module_name(method, path),
    }
}

/// Derives a module name from the HTTP Method and URL path when no summary exists.
///
/// e.g. `GET /users/{id}` -> `Get users`, `GET /users` -> `List users`,
/// `POST /users` -> `Create users`.
pub fn derive_module_name(method: HttpMethod, path: &str) -> String {
    let segments: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();
    let has_param = segments.iter().any(|s| is_path_param(s));
    let resource = segments
        .iter()
        .rev()
        .find(|s| !is_path_param(s))
        .copied()
        .unwrap_or(ROOT_RESOURCE);

    let verb = match method {
        HttpMethod::Get if has_param => "Get",
        HttpMethod::Get => "List",
        HttpMethod::Post => "Create",
        HttpMethod::Put | HttpMethod::Patch => "Update",
        HttpMethod::Delete => "Delete",
        HttpMethod::Options => "Options",
        HttpMethod::Head => "Head",
    };
    format!("{} {}", verb, resource)
}

fn is_path_param(segment: &str) -> bool {
    segment.starts_with('{') && segment.ends_with('}')
}

/// Converts a display name into a lowercase, hyphenated slug.
///
/// Strips everything but `[a-z0-9\s-]`, turns whitespace runs into a single
/// hyphen, collapses repeated hyphens and trims hyphens at both ends.
/// A name with nothing left becomes `untitled`.
pub fn sanitize_id(name: &str) -> String {
    static NON_SLUG_RE: OnceLock<Regex> = OnceLock::new();
    let non_slug_re =
        NON_SLUG_RE.get_or_init(|| Regex::new(r"[^a-z0-9\s-]").expect("Invalid regex"));

    static WHITESPACE_RE: OnceLock<Regex> = OnceLock::new();
    let whitespace_re = WHITESPACE_RE.get_or_init(|| Regex::new(r"\s+").expect("Invalid regex"));

    static HYPHENS_RE: OnceLock<Regex> = OnceLock::new();
    let hyphens_re = HYPHENS_RE.get_or_init(|| Regex::new(r"-{2,}").expect("Invalid regex"));

    let lower = name.to_lowercase();
    let stripped = non_slug_re.replace_all(&lower, "");
    let hyphenated = whitespace_re.replace_all(&stripped, "-");
    let collapsed = hyphens_re.replace_all(&hyphenated, "-");
    let id = collapsed.trim_matches('-');
    if id.is_empty() {
        FALLBACK_ID.to_string()
    } else {
        id.to_string()
    }
}

/// Hands out ids that are unique within one scope by appending `-2`, `-3`, ...
#[derive(Debug, Default)]
pub struct IdAllocator {
    taken: HashSet<String>,
}

impl IdAllocator {
    /// Creates an empty scope.
    pub fn new() -> Self {
        Self::default()
    }

    /// Reserves `base`, or the first free `base-N` (N >= 2).
    pub fn allocate(&mut self, base: &str) -> String {
        if self.taken.insert(base.to_string()) {
            return base.to_string();
        }
        let mut n = 2;
        loop {
            let candidate = format!("{}-{}", base, n);
            if self.taken.insert(candidate.clone()) {
                return candidate;
            }
            n += 1;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_derive_module_name() {
        assert_eq!(derive_module_name(HttpMethod::Get, "/users"), "List users");
        assert_eq!(derive_module_name(HttpMethod::Get, "/users/{id}"), "Get users");
        assert_eq!(
            derive_module_name(HttpMethod::Get, "/users/{id}/posts"),
            "Get posts"
        );
        assert_eq!(derive_module_name(HttpMethod::Post, "/users"), "Create users");
        assert_eq!(derive_module_name(HttpMethod::Put, "/users/{id}"), "Update users");
        assert_eq!(derive_module_name(HttpMethod::Patch, "/users/{id}"), "Update users");
        assert_eq!(derive_module_name(HttpMethod::Delete, "/users/{id}"), "Delete users");
        assert_eq!(derive_module_name(HttpMethod::Head, "/"), "Head root");
        assert_eq!(derive_module_name(HttpMethod::Get, "/{id}"), "Get root");
    }

    #[test]
    fn test_module_name_prefers_summary() {
        assert_eq!(
            module_name(Some("  Find pets  "), HttpMethod::Get, "/pets"),
            "Find pets"
        );
        assert_eq!(module_name(Some("   "), HttpMethod::Get, "/pets"), "List pets");
        assert_eq!(module_name(None, HttpMethod::Delete, "/pets/{id}"), "Delete pets");
    }

    #[test]
    fn test_sanitize_id() {
        assert_eq!(sanitize_id("Users"), "users");
        assert_eq!(sanitize_id("List users"), "list-users");
        assert_eq!(sanitize_id("  Pet   Store -- v2!  "), "pet-store-v2");
        assert_eq!(sanitize_id("user_profile"), "userprofile");
        assert_eq!(sanitize_id("--a--b--"), "a-b");
        assert_eq!(sanitize_id("Ünïcode Tag"), "ncode-tag");
        assert_eq!(sanitize_id("!!!"), "untitled");
    }

    #[test]
    fn test_id_allocator_suffixes() {
        let mut ids = IdAllocator::new();
        assert_eq!(ids.allocate("users"), "users");
        assert_eq!(ids.allocate("users"), "users-2");
        assert_eq!(ids.allocate("users-2"), "users-2-2");
        assert_eq!(ids.allocate("users"), "users-3");
    }
}

#![deny(missing_docs)]

//! # Grouping Engine
//!
//! Entry point of the pipeline. Walks `paths`, extracts every operation and
//! arranges the resulting endpoints into sections (one per tag) and modules
//! (one per inferred operation name within a section).
//!
//! Operations with several tags are copied into each of their sections.

pub mod naming;

use crate::config::{DocConfig, IdCollisionPolicy};
use crate::oas::document::Document;
use crate::oas::grouping::naming::{module_name, sanitize_id, IdAllocator};
use crate::oas::models::{ApiDocumentation, EndpointDescriptor, HttpMethod, Module, Section};
use crate::oas::operations::OperationExtractor;
use indexmap::IndexMap;
use serde_json::Value;

/// Endpoints grouped by module name, in first-appearance order.
type ModuleDrafts = IndexMap<String, Vec<EndpointDescriptor>>;

/// Groups operations of a document into sections and modules.
#[derive(Debug, Clone, Default)]
pub struct GroupingEngine {
    config: DocConfig,
}

impl GroupingEngine {
    /// Creates an engine with the given configuration.
    pub fn new(config: DocConfig) -> Self {
        Self { config }
    }

    /// The active configuration.
    pub fn config(&self) -> &DocConfig {
        &self.config
    }

    /// Builds the section tree of `document`.
    ///
    /// A missing or malformed `paths` object yields an empty list.
    pub fn group(&self, document: &Document<'_>) -> Vec<Section> {
        let Some(paths) = document.paths() else {
            log::debug!("Document has no 'paths' object; nothing to group");
            return Vec::new();
        };

        let extractor = OperationExtractor::new(document.clone());
        let mut drafts: IndexMap<String, ModuleDrafts> = IndexMap::new();
        let mut operations = 0usize;

        for (path, path_item) in paths {
            if path.starts_with("x-") {
                continue;
            }
            let Some(item) = path_item.as_object() else {
                log::warn!("Path item '{}' is not an object; skipped", path);
                continue;
            };

            for (key, operation) in item {
                let Some(method) = HttpMethod::from_key(key) else {
                    continue;
                };
                if !operation.is_object() {
                    log::warn!("Operation {} {} is not an object; skipped", method, path);
                    continue;
                }

                let endpoint = extractor.extract(method, path, operation, path_item);
                if endpoint.deprecated && !self.config.include_deprecated {
                    log::debug!("Skipping deprecated operation {} {}", method, path);
                    continue;
                }
                operations += 1;

                let name = module_name(endpoint.summary.as_deref(), method, path);
                for tag in self.section_tags(&endpoint) {
                    drafts
                        .entry(tag)
                        .or_default()
                        .entry(name.clone())
                        .or_default()
                        .push(endpoint.clone());
                }
            }
        }

        log::debug!(
            "Grouped {} operations into {} sections",
            operations,
            drafts.len()
        );

        let policy = self.config.id_collisions;
        assign_ids(drafts, policy, merge_module_drafts)
            .into_iter()
            .map(|(id, name, modules)| Section {
                id,
                description: document.tag_description(&name).map(str::to_string),
                name,
                modules: build_modules(modules, policy),
            })
            .collect()
    }

    /// Builds the full documentation model (metadata + sections) for a raw document.
    pub fn build(&self, raw: &Value) -> ApiDocumentation {
        let document = Document::new(raw);
        let info = document.info();
        ApiDocumentation {
            title: info.title,
            version: info.version,
            description: info.description,
            spec_version: document.version().clone(),
            sections: self.group(&document),
        }
    }

    /// Deduplicated, non-blank tags of an endpoint, or the default tag.
    fn section_tags(&self, endpoint: &EndpointDescriptor) -> Vec<String> {
        let mut tags: Vec<String> = Vec::new();
        for tag in &endpoint.tags {
            let tag = tag.trim();
            if !tag.is_empty() && !tags.iter().any(|t| t == tag) {
                tags.push(tag.to_string());
            }
        }
        if tags.is_empty() {
            tags.push(self.config.default_tag.clone());
        }
        tags
    }
}

fn build_modules(drafts: ModuleDrafts, policy: IdCollisionPolicy) -> Vec<Module> {
    assign_ids(drafts, policy, |into, more| into.extend(more))
        .into_iter()
        .map(|(id, name, endpoints)| Module {
            id,
            description: endpoints
                .iter()
                .filter_map(|e| e.description.as_deref())
                .map(str::trim)
                .find(|d| !d.is_empty())
                .map(str::to_string),
            name,
            endpoints,
        })
        .collect()
}

fn merge_module_drafts(into: &mut ModuleDrafts, more: ModuleDrafts) {
    for (name, endpoints) in more {
        into.entry(name).or_default().extend(endpoints);
    }
}

/// Gives every named group an id derived from its name.
///
/// Groups keep their first-appearance order. Under [`IdCollisionPolicy::Merge`]
/// a group whose slug is already taken is folded into the earlier group.
fn assign_ids<T>(
    groups: IndexMap<String, T>,
    policy: IdCollisionPolicy,
    merge: impl Fn(&mut T, T),
) -> Vec<(String, String, T)> {
    match policy {
        IdCollisionPolicy::Suffix => {
            let mut ids = IdAllocator::new();
            groups
                .into_iter()
                .map(|(name, group)| (ids.allocate(&sanitize_id(&name)), name, group))
                .collect()
        }
        IdCollisionPolicy::Merge => {
            let mut by_id: IndexMap<String, (String, T)> = IndexMap::new();
            for (name, group) in groups {
                let id = sanitize_id(&name);
                match by_id.get_mut(&id) {
                    Some((_, existing)) => {
                        log::debug!("'{}' shares id '{}' with an earlier group; merged", name, id);
                        merge(existing, group);
                    }
                    None => {
                        by_id.insert(id, (name, group));
                    }
                }
            }
            by_id
                .into_iter()
                .map(|(id, (name, group))| (id, name, group))
                .collect()
        }
    }
}

/// Builds the section tree of a raw document with the default configuration.
pub fn group(raw: &Value) -> Vec<Section> {
    GroupingEngine::default().group(&Document::new(raw))
}

/// Builds the full documentation model of a raw document.
pub fn build_documentation(raw: &Value, config: &DocConfig) -> ApiDocumentation {
    GroupingEngine::new(config.clone()).build(raw)
}

// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::observability::messages::registry::DuplicateEngineName;
use crate::observability::messages::StructuredLog;

/// An engine declaration as authored in a descriptor table.
///
/// # Example
/// ```yaml
/// name: moustache
/// syntax: "render(input, options)"
/// modules: [moustache]
/// ext: [mustache, tpl]
/// ```
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct RawDescriptor {
    pub name: String,
    /// Call template; empty means identity.
    #[serde(default)]
    pub syntax: String,
    /// Primary module first, then secondary dependencies.
    #[serde(default)]
    pub modules: Vec<String>,
    pub ext: Extensions,
    /// Declared call shape; derived from the template when omitted.
    #[serde(default, rename = "async", skip_serializing_if = "Option::is_none")]
    pub is_async: Option<bool>,
}

impl RawDescriptor {
    pub fn new(name: &str, syntax: &str, modules: &[&str], ext: &[&str]) -> Self {
        Self {
            name: name.to_string(),
            syntax: syntax.to_string(),
            modules: modules.iter().map(|m| m.to_string()).collect(),
            ext: Extensions::Many(ext.iter().map(|e| e.to_string()).collect()),
            is_async: None,
        }
    }

    pub fn synchronous(mut self) -> Self {
        self.is_async = Some(false);
        self
    }

    pub fn asynchronous(mut self) -> Self {
        self.is_async = Some(true);
        self
    }
}

/// `ext` may be declared as a single value or a list.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(untagged)]
pub enum Extensions {
    One(String),
    Many(Vec<String>),
}

impl Extensions {
    pub fn into_vec(self) -> Vec<String> {
        match self {
            Extensions::One(ext) => vec![ext],
            Extensions::Many(exts) => exts,
        }
    }
}

/// A normalized engine descriptor.
#[derive(Debug, Clone, PartialEq)]
pub struct EngineDescriptor {
    pub name: String,
    pub call_template: String,
    /// Module bound to `$0`.
    pub primary: Option<String>,
    /// `dependencies[i]` is bound to `$(i+1)`.
    pub dependencies: Vec<String>,
    pub extensions: Vec<String>,
    pub is_async: Option<bool>,
}

impl EngineDescriptor {
    /// Module identifiers in placeholder order.
    pub fn modules(&self) -> impl Iterator<Item = &str> {
        self.primary
            .iter()
            .chain(self.dependencies.iter())
            .map(String::as_str)
    }

    pub fn is_identity(&self) -> bool {
        self.call_template.trim().is_empty()
    }
}

impl From<RawDescriptor> for EngineDescriptor {
    fn from(raw: RawDescriptor) -> Self {
        let mut modules = raw.modules.into_iter();
        let primary = modules.next();
        let extensions = raw
            .ext
            .into_vec()
            .into_iter()
            .map(|ext| strip_leading_dot(&ext).to_string())
            .collect();

        Self {
            name: raw.name,
            call_template: raw.syntax,
            primary,
            dependencies: modules.collect(),
            extensions,
            is_async: raw.is_async,
        }
    }
}

fn strip_leading_dot(ext: &str) -> &str {
    ext.strip_prefix('.').unwrap_or(ext)
}

/// Engine descriptors by name, plus the default engine for each extension.
///
/// Read-only once built. For extensions, the first descriptor to declare one keeps it.
#[derive(Debug, Clone, Default)]
pub struct DescriptorTable {
    by_name: HashMap<String, EngineDescriptor>,
    by_extension: HashMap<String, String>,
}

impl DescriptorTable {
    pub fn normalize<I>(raw: I) -> Self
    where
        I: IntoIterator<Item = RawDescriptor>,
    {
        let mut table = Self::default();

        for descriptor in raw.into_iter().map(EngineDescriptor::from) {
            for ext in &descriptor.extensions {
                table
                    .by_extension
                    .entry(ext.clone())
                    .or_insert_with(|| descriptor.name.clone());
            }

            if let Some(previous) = table.by_name.insert(descriptor.name.clone(), descriptor) {
                DuplicateEngineName {
                    engine: &previous.name,
                }
                .log();
            }
        }

        table
    }

    pub fn get(&self, name: &str) -> Option<&EngineDescriptor> {
        self.by_name.get(name)
    }

    /// Default engine for `ext`; a single leading `.` is ignored.
    pub fn default_engine_for_extension(&self, ext: &str) -> Option<&str> {
        self.by_extension
            .get(strip_leading_dot(ext))
            .map(String::as_str)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.by_name.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.by_name.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_name.is_empty()
    }

    pub fn extension_count(&self) -> usize {
        self.by_extension.len()
    }
}

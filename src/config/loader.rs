// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

use super::builtin::builtin_descriptors;
use super::consts::DEFAULT_INSTALL_DIR;
use super::RawDescriptor;
use crate::errors::ConfigError;

/// Switchboard configuration, typically loaded from a YAML or TOML file.
///
/// # Fields
/// * `fetch` - Install missing modules on demand (defaults to false)
/// * `dir` - Install directory for fetched modules (defaults to `engine_modules`)
/// * `include_builtins` - Register the built-in engines first (defaults to true)
/// * `engines` - Additional engine descriptors
///
/// # Example
/// ```yaml
/// fetch: true
/// dir: /var/lib/switchboard/modules
/// engines:
///   - name: letter
///     syntax: "render(input, options)"
///     modules: [moustache]
///     ext: letter
/// ```
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub fetch: bool,
    #[serde(default = "default_install_dir")]
    pub dir: PathBuf,
    #[serde(default = "default_include_builtins")]
    pub include_builtins: bool,
    #[serde(default)]
    pub engines: Vec<RawDescriptor>,
}

fn default_install_dir() -> PathBuf {
    PathBuf::from(DEFAULT_INSTALL_DIR)
}

fn default_include_builtins() -> bool {
    true
}

impl Default for Config {
    fn default() -> Self {
        Self {
            fetch: false,
            dir: default_install_dir(),
            include_builtins: default_include_builtins(),
            engines: Vec::new(),
        }
    }
}

impl Config {
    /// Descriptors in registration order: built-ins (when enabled), then configured engines.
    pub fn descriptors(&self) -> Vec<RawDescriptor> {
        let mut descriptors = if self.include_builtins {
            builtin_descriptors()
        } else {
            Vec::new()
        };
        descriptors.extend(self.engines.iter().cloned());
        descriptors
    }

    pub fn resolve_config(&self) -> ResolveConfig {
        ResolveConfig {
            fetch: self.fetch,
            dir: self.dir.clone(),
        }
    }
}

/// Per-request dependency resolution settings for `Registry::get_processor`.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolveConfig {
    pub fetch: bool,
    pub dir: PathBuf,
}

impl Default for ResolveConfig {
    fn default() -> Self {
        Self {
            fetch: false,
            dir: default_install_dir(),
        }
    }
}

impl ResolveConfig {
    /// Fetch missing modules into `dir`.
    pub fn fetching(dir: impl Into<PathBuf>) -> Self {
        Self {
            fetch: true,
            dir: dir.into(),
        }
    }
}

/// Load a config from a `.yaml`, `.yml` or `.toml` file.
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<Config, ConfigError> {
    let path = path.as_ref();
    let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    match path.extension().and_then(|ext| ext.to_str()) {
        Some("yaml") | Some("yml") => Ok(serde_yaml::from_str(&content)?),
        Some("toml") => Ok(toml::from_str(&content)?),
        _ => Err(ConfigError::UnsupportedFormat(path.to_path_buf())),
    }
}

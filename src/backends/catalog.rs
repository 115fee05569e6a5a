// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! The default dependency loader.
//!
//! A catalog knows two sets of modules: those already installed (loadable with
//! `require`) and those it can fetch. Fetching a module installs it into the requested
//! directory by writing a small JSON manifest, after which it is served like any
//! installed module. Loaded modules are cached by identifier, so two engines naming the
//! same module share one instance.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Arc, RwLock};

use super::local::*;
use crate::config::consts::MANIFEST_EXTENSION;
use crate::errors::LoadError;
use crate::observability::messages::loader::ModuleInstalled;
use crate::observability::messages::StructuredLog;
use crate::traits::{DependencyLoader, Module};

/// Builds a fresh module instance when it is installed.
pub type ModuleFactory = fn() -> Arc<dyn Module>;

/// Written to `<dir>/<module>.json` when a module is fetched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InstallManifest {
    pub module: String,
    pub version: String,
}

pub struct ModuleCatalog {
    installed: RwLock<HashMap<String, Arc<dyn Module>>>,
    available: HashMap<String, ModuleFactory>,
}

fn factory<M: Module + Default + 'static>() -> Arc<dyn Module> {
    Arc::new(M::default())
}

/// Every built-in module, by identifier.
pub fn builtin_modules() -> Vec<(&'static str, ModuleFactory)> {
    vec![
        ("moustache", factory::<MoustacheModule> as ModuleFactory),
        ("base64", factory::<Base64Module> as ModuleFactory),
        ("minifier", factory::<WhitespaceMinifierModule> as ModuleFactory),
        ("case", factory::<TextCaseModule> as ModuleFactory),
        ("reverse", factory::<ReverseTextModule> as ModuleFactory),
        ("token-counter", factory::<TokenCounterModule> as ModuleFactory),
        ("frame", factory::<PrefixSuffixModule> as ModuleFactory),
    ]
}

impl ModuleCatalog {
    pub fn new() -> Self {
        Self {
            installed: RwLock::new(HashMap::new()),
            available: HashMap::new(),
        }
    }

    /// All built-in modules installed.
    pub fn builtin() -> Self {
        builtin_modules()
            .into_iter()
            .fold(Self::new(), |catalog, (id, factory)| catalog.with_installed(id, factory()))
    }

    /// All built-in modules fetchable but none installed.
    pub fn builtin_uninstalled() -> Self {
        builtin_modules()
            .into_iter()
            .fold(Self::new(), |catalog, (id, factory)| catalog.with_available(id, factory))
    }

    /// Built-in modules fetchable into `dir`; those whose manifest is already present
    /// there count as installed.
    pub fn from_install_dir(dir: &Path) -> Self {
        builtin_modules()
            .into_iter()
            .fold(Self::new(), |catalog, (id, factory)| {
                if Self::manifest_path(dir, id).is_file() {
                    catalog.with_installed(id, factory())
                } else {
                    catalog.with_available(id, factory)
                }
            })
    }

    pub fn with_installed(self, id: &str, module: Arc<dyn Module>) -> Self {
        self.write_installed().insert(id.to_string(), module);
        self
    }

    pub fn with_available(mut self, id: &str, factory: ModuleFactory) -> Self {
        self.available.insert(id.to_string(), factory);
        self
    }

    pub fn is_installed(&self, id: &str) -> bool {
        self.read_installed().contains_key(id)
    }

    /// Path of the install manifest for `id` inside `dir`.
    pub fn manifest_path(dir: &Path, id: &str) -> PathBuf {
        dir.join(format!("{id}.{MANIFEST_EXTENSION}"))
    }

    fn read_installed(&self) -> std::sync::RwLockReadGuard<'_, HashMap<String, Arc<dyn Module>>> {
        self.installed
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn write_installed(&self) -> std::sync::RwLockWriteGuard<'_, HashMap<String, Arc<dyn Module>>> {
        self.installed
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn install(&self, id: &str, factory: ModuleFactory, dir: &Path) -> Result<Arc<dyn Module>, LoadError> {
        let install_failed = |source: std::io::Error| LoadError::InstallFailed {
            module: id.to_string(),
            dir: dir.to_path_buf(),
            source,
        };

        fs::create_dir_all(dir).map_err(install_failed)?;
        let manifest = InstallManifest {
            module: id.to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        };
        let body = serde_json::to_vec_pretty(&manifest).map_err(|e| install_failed(e.into()))?;
        fs::write(Self::manifest_path(dir, id), body).map_err(install_failed)?;

        ModuleInstalled { module: id, dir }.log();

        // Another resolver may have finished first; keep whichever instance landed.
        let module = Arc::clone(
            self.write_installed()
                .entry(id.to_string())
                .or_insert_with(factory),
        );
        Ok(module)
    }
}

impl Default for ModuleCatalog {
    fn default() -> Self {
        Self::new()
    }
}

impl DependencyLoader for ModuleCatalog {
    fn require(&self, id: &str) -> Result<Arc<dyn Module>, LoadError> {
        if let Some(module) = self.read_installed().get(id) {
            return Ok(Arc::clone(module));
        }
        if self.available.contains_key(id) {
            Err(LoadError::NotInstalled(id.to_string()))
        } else {
            Err(LoadError::NotFound(id.to_string()))
        }
    }

    fn resolve(&self, id: &str, dir: &Path) -> Result<Arc<dyn Module>, LoadError> {
        if let Some(module) = self.read_installed().get(id) {
            return Ok(Arc::clone(module));
        }
        let factory = *self
            .available
            .get(id)
            .ok_or_else(|| LoadError::NotFound(id.to_string()))?;
        self.install(id, factory, dir)
    }
}

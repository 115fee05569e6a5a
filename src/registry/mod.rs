// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! The public lookup surface: engine name in, compiled processor out.

mod processor_cache;


use processor_cache::ProcessorCache;

use std::path::Path;
use std::sync::Arc;
use std::time::Instant;

use crate::backends::ModuleCatalog;
use crate::compiler::{self, CompiledProcessor};
use crate::config::{builtin_descriptors, Config, DescriptorTable, EngineDescriptor, RawDescriptor, ResolveConfig};
use crate::errors::RegistryError;
use crate::observability::messages::loader::{ModuleResolutionFailed, ModuleResolved};
use crate::observability::messages::registry::{
    ProcessorCacheHit, ProcessorCompilationFailed, ProcessorCompiled, RegistryInitialized,
    UnknownEngineRequested,
};
use crate::observability::messages::StructuredLog;
use crate::traits::{DependencyLoader, Module};

/// Owns the descriptor table, the dependency loader and the processor cache.
///
/// Processors are compiled on first request and cached for the registry's lifetime.
///
/// # Example
/// ```
/// use the_switchboard::Registry;
///
/// let registry = Registry::builtin();
/// assert_eq!(registry.default_engine_for_extension(".b64"), Some("base64"));
///
/// let processor = registry.processor("base64").unwrap();
/// processor.process_default("hello", |outcome| {
///     assert_eq!(outcome.unwrap().as_deref(), Some("aGVsbG8="));
/// });
/// ```
pub struct Registry {
    table: DescriptorTable,
    loader: Arc<dyn DependencyLoader>,
    cache: ProcessorCache,
}

impl Registry {
    pub fn new(table: DescriptorTable, loader: Arc<dyn DependencyLoader>) -> Self {
        RegistryInitialized {
            engine_count: table.len(),
            extension_count: table.extension_count(),
        }
        .log();

        Self {
            table,
            loader,
            cache: ProcessorCache::new(),
        }
    }

    pub fn from_descriptors<I>(raw: I, loader: Arc<dyn DependencyLoader>) -> Self
    where
        I: IntoIterator<Item = RawDescriptor>,
    {
        Self::new(DescriptorTable::normalize(raw), loader)
    }

    /// Built-in engines backed by the built-in module catalog.
    pub fn builtin() -> Self {
        Self::from_descriptors(builtin_descriptors(), Arc::new(ModuleCatalog::builtin()))
    }

    /// Engines declared by `cfg`, resolved through `loader`.
    pub fn from_config(cfg: &Config, loader: Arc<dyn DependencyLoader>) -> Self {
        Self::from_descriptors(cfg.descriptors(), loader)
    }

    /// Return the processor for `name`, compiling and caching it on first use.
    pub fn get_processor(
        &self,
        name: &str,
        config: &ResolveConfig,
    ) -> Result<Arc<CompiledProcessor>, RegistryError> {
        if let Some(processor) = self.cache.get(name) {
            ProcessorCacheHit { engine: name }.log();
            return Ok(processor);
        }

        let descriptor = self.table.get(name).ok_or_else(|| {
            UnknownEngineRequested { engine: name }.log();
            RegistryError::UnknownEngine(name.to_string())
        })?;

        let started = Instant::now();
        let modules = self.resolve_modules(descriptor, config)?;
        let compiled = compiler::compile(descriptor, &modules).map_err(|source| {
            let error = RegistryError::InvalidTemplate {
                engine: name.to_string(),
                source,
            };
            ProcessorCompilationFailed {
                engine: name,
                error: &error,
            }
            .log();
            error
        })?;

        ProcessorCompiled {
            engine: name,
            shape: compiled.shape().kind(),
            module_count: modules.len(),
            duration: started.elapsed(),
        }
        .log();

        Ok(self.cache.insert_if_absent(name, compiled))
    }

    /// `get_processor` with the default resolve settings (no fetching).
    pub fn processor(&self, name: &str) -> Result<Arc<CompiledProcessor>, RegistryError> {
        self.get_processor(name, &ResolveConfig::default())
    }

    /// Processor for the default engine of `path`'s extension.
    pub fn processor_for_path(
        &self,
        path: &Path,
        config: &ResolveConfig,
    ) -> Result<Arc<CompiledProcessor>, RegistryError> {
        let ext = path
            .extension()
            .and_then(|ext| ext.to_str())
            .unwrap_or_default();
        let engine = self
            .default_engine_for_extension(ext)
            .ok_or_else(|| RegistryError::NoEngineForExtension(ext.to_string()))?;
        self.get_processor(engine, config)
    }

    /// Default engine for `ext`; a single leading `.` is ignored.
    pub fn default_engine_for_extension(&self, ext: &str) -> Option<&str> {
        self.table.default_engine_for_extension(ext)
    }

    pub fn descriptor(&self, name: &str) -> Option<&EngineDescriptor> {
        self.table.get(name)
    }

    /// Registered engine names, sorted.
    pub fn engine_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.table.names().collect();
        names.sort_unstable();
        names
    }

    pub fn cached_count(&self) -> usize {
        self.cache.len()
    }

    fn resolve_modules(
        &self,
        descriptor: &EngineDescriptor,
        config: &ResolveConfig,
    ) -> Result<Vec<Arc<dyn Module>>, RegistryError> {
        descriptor
            .modules()
            .map(|module| {
                let resolved = if config.fetch {
                    self.loader.resolve(module, &config.dir)
                } else {
                    self.loader.require(module)
                };

                match resolved {
                    Ok(loaded) => {
                        ModuleResolved {
                            engine: &descriptor.name,
                            module,
                            fetched: config.fetch,
                        }
                        .log();
                        Ok(loaded)
                    }
                    Err(source) => {
                        ModuleResolutionFailed {
                            engine: &descriptor.name,
                            module,
                            error: &source,
                        }
                        .log();
                        Err(RegistryError::DependencyResolution {
                            engine: descriptor.name.clone(),
                            module: module.to_string(),
                            source,
                        })
                    }
                }
            })
            .collect()
    }
}

impl std::fmt::Debug for Registry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Registry")
            .field("engine_count", &self.table.len())
            .field("cache", &self.cache)
            .finish()
    }
}

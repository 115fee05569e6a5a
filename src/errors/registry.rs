// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Errors for processor lookup and compilation.

use super::{LoadError, TemplateError};
use thiserror::Error;

/// Synchronous failures of `Registry::get_processor`.
#[derive(Error, Debug)]
pub enum RegistryError {
    /// No descriptor is registered under the requested name.
    #[error("Unknown engine '{0}'")]
    UnknownEngine(String),

    /// A module required by the engine could not be loaded or installed.
    #[error("Failed to resolve module '{module}' for engine '{engine}': {source}")]
    DependencyResolution {
        engine: String,
        module: String,
        #[source]
        source: LoadError,
    },

    /// The engine's call template could not be compiled.
    #[error("Invalid call template for engine '{engine}': {source}")]
    InvalidTemplate {
        engine: String,
        #[source]
        source: TemplateError,
    },

    /// No engine is registered as the default for this extension.
    #[error("No default engine for extension '{0}'")]
    NoEngineForExtension(String),
}

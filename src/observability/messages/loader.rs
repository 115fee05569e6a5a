// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Message types for module resolution and installation.

use std::fmt::{Display, Formatter};
use std::path::Path;

use tracing::Span;

use super::StructuredLog;

/// A missing module was installed on demand.
///
/// # Log Level
/// `info!` - Filesystem side effect
pub struct ModuleInstalled<'a> {
    pub module: &'a str,
    pub dir: &'a Path,
}

impl Display for ModuleInstalled<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(f, "Installed module '{}' into '{}'", self.module, self.dir.display())
    }
}

impl StructuredLog for ModuleInstalled<'_> {
    fn log(&self) {
        tracing::info!(
            module = self.module,
            dir = %self.dir.display(),
            "{}", self
        );
    }

    fn span(&self, name: &str) -> Span {
        tracing::info_span!("loader", span_name = name, module = self.module)
    }
}

/// A module was resolved for an engine.
///
/// # Log Level
/// `debug!` - Diagnostic
pub struct ModuleResolved<'a> {
    pub engine: &'a str,
    pub module: &'a str,
    pub fetched: bool,
}

impl Display for ModuleResolved<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Resolved module '{}' for engine '{}' (fetch={})",
            self.module, self.engine, self.fetched
        )
    }
}

impl StructuredLog for ModuleResolved<'_> {
    fn log(&self) {
        tracing::debug!(
            engine = self.engine,
            module = self.module,
            fetched = self.fetched,
            "{}", self
        );
    }

    fn span(&self, name: &str) -> Span {
        tracing::debug_span!("loader", span_name = name, module = self.module)
    }
}

/// A module could not be resolved.
///
/// # Log Level
/// `error!` - Fatal for the requesting engine
pub struct ModuleResolutionFailed<'a> {
    pub engine: &'a str,
    pub module: &'a str,
    pub error: &'a dyn std::error::Error,
}

impl Display for ModuleResolutionFailed<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Failed to resolve module '{}' for engine '{}': {}",
            self.module, self.engine, self.error
        )
    }
}

impl StructuredLog for ModuleResolutionFailed<'_> {
    fn log(&self) {
        tracing::error!(
            engine = self.engine,
            module = self.module,
            error = %self.error,
            "{}", self
        );
    }

    fn span(&self, name: &str) -> Span {
        tracing::error_span!("loader", span_name = name, module = self.module)
    }
}

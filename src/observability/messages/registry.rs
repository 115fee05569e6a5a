// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Message types for processor lookup, caching and compilation.

use std::fmt::{Display, Formatter};
use std::time::Duration;

use tracing::Span;

use super::StructuredLog;

/// Registry built from a descriptor table.
///
/// # Log Level
/// `info!` - Startup event
pub struct RegistryInitialized {
    pub engine_count: usize,
    pub extension_count: usize,
}

impl Display for RegistryInitialized {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Registry initialized: {} engines, {} default extensions",
            self.engine_count, self.extension_count
        )
    }
}

impl StructuredLog for RegistryInitialized {
    fn log(&self) {
        tracing::info!(
            engine_count = self.engine_count,
            extension_count = self.extension_count,
            "{}", self
        );
    }

    fn span(&self, name: &str) -> Span {
        tracing::info_span!("registry", span_name = name, engine_count = self.engine_count)
    }
}

/// A descriptor name was declared more than once; the later declaration replaced it.
///
/// # Log Level
/// `warn!` - Accepted, but usually a mistake in the descriptor table
pub struct DuplicateEngineName<'a> {
    pub engine: &'a str,
}

impl Display for DuplicateEngineName<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Engine '{}' declared more than once; the last declaration wins",
            self.engine
        )
    }
}

impl StructuredLog for DuplicateEngineName<'_> {
    fn log(&self) {
        tracing::warn!(engine = self.engine, "{}", self);
    }

    fn span(&self, name: &str) -> Span {
        tracing::warn_span!("registry", span_name = name, engine = self.engine)
    }
}

/// Processor served from the cache.
///
/// # Log Level
/// `trace!` - Hot path
pub struct ProcessorCacheHit<'a> {
    pub engine: &'a str,
}

impl Display for ProcessorCacheHit<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(f, "Processor '{}' served from cache", self.engine)
    }
}

impl StructuredLog for ProcessorCacheHit<'_> {
    fn log(&self) {
        tracing::trace!(engine = self.engine, "{}", self);
    }

    fn span(&self, name: &str) -> Span {
        tracing::trace_span!("registry", span_name = name, engine = self.engine)
    }
}

/// Processor compiled on first request.
///
/// # Log Level
/// `info!` - Happens once per engine
///
/// # Example
/// ```
/// use the_switchboard::observability::messages::registry::ProcessorCompiled;
/// use std::time::Duration;
///
/// let msg = ProcessorCompiled {
///     engine: "shout",
///     shape: "sync",
///     module_count: 2,
///     duration: Duration::from_micros(40),
/// };
///
/// assert!(msg.to_string().starts_with("Compiled processor 'shout'"));
/// ```
pub struct ProcessorCompiled<'a> {
    pub engine: &'a str,
    pub shape: &'a str,
    pub module_count: usize,
    pub duration: Duration,
}

impl Display for ProcessorCompiled<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Compiled processor '{}': shape={}, modules={}, duration={:?}",
            self.engine, self.shape, self.module_count, self.duration
        )
    }
}

impl StructuredLog for ProcessorCompiled<'_> {
    fn log(&self) {
        tracing::info!(
            engine = self.engine,
            shape = self.shape,
            module_count = self.module_count,
            duration_us = self.duration.as_micros() as u64,
            "{}", self
        );
    }

    fn span(&self, name: &str) -> Span {
        tracing::info_span!(
            "registry",
            span_name = name,
            engine = self.engine,
            shape = self.shape,
        )
    }
}

/// A processor was requested for a name with no descriptor.
///
/// # Log Level
/// `error!` - Caller bug or missing configuration
pub struct UnknownEngineRequested<'a> {
    pub engine: &'a str,
}

impl Display for UnknownEngineRequested<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(f, "Requested unknown engine '{}'", self.engine)
    }
}

impl StructuredLog for UnknownEngineRequested<'_> {
    fn log(&self) {
        tracing::error!(engine = self.engine, "{}", self);
    }

    fn span(&self, name: &str) -> Span {
        tracing::error_span!("registry", span_name = name, engine = self.engine)
    }
}

/// Compiling a processor failed; the engine stays unregistered.
///
/// # Log Level
/// `error!` - Failure requiring attention
pub struct ProcessorCompilationFailed<'a> {
    pub engine: &'a str,
    pub error: &'a dyn std::error::Error,
}

impl Display for ProcessorCompilationFailed<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(f, "Failed to compile processor '{}': {}", self.engine, self.error)
    }
}

impl StructuredLog for ProcessorCompilationFailed<'_> {
    fn log(&self) {
        tracing::error!(engine = self.engine, error = %self.error, "{}", self);
    }

    fn span(&self, name: &str) -> Span {
        tracing::error_span!("registry", span_name = name, engine = self.engine)
    }
}

// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Message types for compiled processor invocations.

use std::fmt::{Display, Formatter};

use tracing::Span;

use super::StructuredLog;

/// A compiled processor was invoked.
///
/// # Log Level
/// `debug!` - High-volume per-invocation event
///
/// # Example
/// ```
/// use the_switchboard::observability::messages::processor::ProcessorInvocationStarted;
///
/// let msg = ProcessorInvocationStarted {
///     engine: "moustache",
///     shape: "sync",
///     input_size: 128,
/// };
///
/// assert!(msg.to_string().contains("moustache"));
/// ```
pub struct ProcessorInvocationStarted<'a> {
    pub engine: &'a str,
    pub shape: &'a str,
    pub input_size: usize,
}

impl Display for ProcessorInvocationStarted<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Processor '{}' invoked ({} call): input_size={} bytes",
            self.engine, self.shape, self.input_size
        )
    }
}

impl StructuredLog for ProcessorInvocationStarted<'_> {
    fn log(&self) {
        tracing::debug!(
            engine = self.engine,
            shape = self.shape,
            input_size = self.input_size,
            "{}", self
        );
    }

    fn span(&self, name: &str) -> Span {
        tracing::debug_span!(
            "processor",
            span_name = name,
            engine = self.engine,
            shape = self.shape,
        )
    }
}

/// The engine failed before or while producing its result.
///
/// # Log Level
/// `warn!` - The failure is recovered and handed to the caller's callback
pub struct ProcessorInvocationFailed<'a> {
    pub engine: &'a str,
    pub error: &'a dyn std::error::Error,
}

impl Display for ProcessorInvocationFailed<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(f, "Processor '{}' invocation failed: {}", self.engine, self.error)
    }
}

impl StructuredLog for ProcessorInvocationFailed<'_> {
    fn log(&self) {
        tracing::warn!(
            engine = self.engine,
            error = %self.error,
            "{}", self
        );
    }

    fn span(&self, name: &str) -> Span {
        tracing::warn_span!("processor", span_name = name, engine = self.engine)
    }
}

// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use async_trait::async_trait;

use crate::errors::EngineError;
use crate::traits::Options;

/// Awaitable view of a compiled processor.
///
/// The callback form on `CompiledProcessor` is the primitive; this trait adapts it for
/// callers that live inside a tokio runtime.
#[async_trait]
pub trait Processor: Send + Sync {
    /// Transform `input`, resolving to the engine's output (or `None` when the engine
    /// produced no result).
    async fn execute(&self, input: String, options: Options) -> Result<Option<String>, EngineError>;

    /// The engine name this processor was compiled for.
    fn name(&self) -> &str;
}

// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Turns an engine descriptor plus its resolved modules into a [`CompiledProcessor`].

pub mod call_shape;
mod completion;
mod processor;
pub mod template;

use std::sync::Arc;

pub use call_shape::CallShape;
pub use completion::Completion;
pub use processor::{CompiledProcessor, ProcessorOutcome};

use crate::config::EngineDescriptor;
use crate::errors::TemplateError;
use crate::traits::Module;

/// Compile `descriptor` against `modules`, which must be ordered primary first and then
/// secondary dependencies in declaration order.
pub fn compile(
    descriptor: &EngineDescriptor,
    modules: &[Arc<dyn Module>],
) -> Result<CompiledProcessor, TemplateError> {
    let shape = CallShape::build(&descriptor.call_template, descriptor.is_async, modules)?;
    Ok(CompiledProcessor::new(descriptor.name.clone(), shape))
}

// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

pub mod backends;   // engine modules + dependency loader
pub mod compiler;   // call templates -> processors
pub mod config;     // descriptor tables + settings
pub mod errors;     // error handling
pub mod observability;
pub mod registry;   // processor lookup + cache
pub mod traits;     // unified abstractions

pub use compiler::{CompiledProcessor, ProcessorOutcome};
pub use config::{Config, ResolveConfig};
pub use registry::Registry;
pub use traits::{Options, Processor};

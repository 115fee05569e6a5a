// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

pub mod loader;
pub mod module;
pub mod processor;

pub use loader::DependencyLoader;
pub use module::{Module, Options, Value};
pub use processor::Processor;

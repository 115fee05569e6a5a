// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

mod config;
mod engine;
mod loader;
mod registry;
mod template;

pub use config::ConfigError;
pub use engine::EngineError;
pub use loader::LoadError;
pub use registry::RegistryError;
pub use template::TemplateError;

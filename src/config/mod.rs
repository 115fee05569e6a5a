// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

mod builtin;
mod descriptor;
mod loader;
pub mod consts;

pub use builtin::builtin_descriptors;
pub use descriptor::{DescriptorTable, EngineDescriptor, Extensions, RawDescriptor};
pub use loader::{load_config, Config, ResolveConfig};

// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Module backends for The Switchboard.
//!
//! # Available Backends
//!
//! ## Module Catalog
//! The default [`DependencyLoader`](crate::traits::DependencyLoader): serves installed
//! modules and installs fetchable ones into an install directory on demand.
//!
//! ## Local Modules
//! In-process Rust engines that back the built-in descriptor table:
//! - **Templating**: moustache-style rendering, sync and async
//! - **Codecs / minification**: base64, whitespace collapsing
//! - **Text shaping**: case conversion, reversal, prefix/suffix framing
//! - **Analysis**: character, word and line counts
//!
//! ## Stub Modules (Test-Only)
//! Modules that fail, panic, call back twice or never call back, used to test the
//! processor's failure boundary. Not available in production builds.
//!
//! # Example
//! ```rust
//! use the_switchboard::backends::ModuleCatalog;
//! use the_switchboard::traits::{DependencyLoader, Module};
//!
//! let catalog = ModuleCatalog::builtin();
//! let module = catalog.require("moustache").unwrap();
//! assert_eq!(module.id(), "moustache");
//! ```

pub mod catalog;
pub mod local;
#[cfg(test)]
pub mod stub;

pub use catalog::{builtin_modules, InstallManifest, ModuleCatalog, ModuleFactory};

// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use std::path::PathBuf;
use thiserror::Error;

/// Errors produced by a dependency loader.
#[derive(Error, Debug)]
pub enum LoadError {
    /// The module exists but is not installed, and fetching was not requested.
    #[error("Module '{0}' is not installed (enable fetch to install it)")]
    NotInstalled(String),

    /// No module with this identifier is known to the loader at all.
    #[error("Module '{0}' was not found")]
    NotFound(String),

    #[error("Failed to install module '{module}' into '{dir}': {source}")]
    InstallFailed {
        module: String,
        dir: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use std::path::Path;
use std::sync::Arc;

use crate::errors::LoadError;
use crate::traits::Module;

/// Turns a dependency identifier into a loaded module.
///
/// The registry calls `require` when fetching is disabled and `resolve` when it is
/// enabled. Implementations may cache by identifier; the registry does not assume it.
pub trait DependencyLoader: Send + Sync {
    /// Load an already-available module without any installation side effects.
    fn require(&self, id: &str) -> Result<Arc<dyn Module>, LoadError>;

    /// Load a module, installing it into `dir` first if it is missing.
    fn resolve(&self, id: &str, dir: &Path) -> Result<Arc<dyn Module>, LoadError>;
}

// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};

use crate::compiler::CompiledProcessor;

/// Append-only map of compiled processors by engine name.
///
/// Entries are never replaced or evicted. When two callers compile the same engine
/// concurrently, the first insert is kept and both receive it.
#[derive(Default)]
pub struct ProcessorCache {
    entries: Mutex<HashMap<String, Arc<CompiledProcessor>>>,
}

impl ProcessorCache {
    pub fn new() -> Self {
        Self::default()
    }

    fn entries(&self) -> MutexGuard<'_, HashMap<String, Arc<CompiledProcessor>>> {
        self.entries
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    pub fn get(&self, name: &str) -> Option<Arc<CompiledProcessor>> {
        self.entries().get(name).cloned()
    }

    /// Store `processor` unless an entry already exists; return the cached entry.
    pub fn insert_if_absent(&self, name: &str, processor: CompiledProcessor) -> Arc<CompiledProcessor> {
        Arc::clone(
            self.entries()
                .entry(name.to_string())
                .or_insert_with(|| Arc::new(processor)),
        )
    }

    pub fn len(&self) -> usize {
        self.entries().len()
    }
}

impl std::fmt::Debug for ProcessorCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let entries = self.entries();
        f.debug_struct("ProcessorCache")
            .field("processor_count", &entries.len())
            .field("engines", &entries.keys().collect::<Vec<_>>())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_insert_wins() {
        let cache = ProcessorCache::new();
        assert_eq!(cache.len(), 0);

        let first = cache.insert_if_absent("noop", CompiledProcessor::identity("noop"));
        let second = cache.insert_if_absent("noop", CompiledProcessor::identity("noop"));

        assert!(Arc::ptr_eq(&first, &second));
        assert!(Arc::ptr_eq(&first, &cache.get("noop").unwrap()));
        assert_eq!(cache.len(), 1);
        assert!(cache.get("other").is_none());
    }
}

// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use std::fmt;
use std::sync::{Arc, Mutex};

use crate::errors::EngineError;
use crate::traits::Value;

type Deliver = Box<dyn FnOnce(Result<Value, EngineError>) + Send>;

/// The completion callback handed to engines, delivered at most once.
///
/// Clones share the same slot: whichever clone completes first wins and every later
/// attempt is ignored. Dropping every clone without completing drops the callback.
#[derive(Clone)]
pub struct Completion {
    slot: Arc<Mutex<Option<Deliver>>>,
}

impl Completion {
    pub fn new<F>(deliver: F) -> Self
    where
        F: FnOnce(Result<Value, EngineError>) + Send + 'static,
    {
        Self {
            slot: Arc::new(Mutex::new(Some(Box::new(deliver)))),
        }
    }

    /// Deliver `result`. Returns `false` if the completion had already been used.
    pub fn complete(&self, result: Result<Value, EngineError>) -> bool {
        let deliver = match self.slot.lock() {
            Ok(mut slot) => slot.take(),
            Err(poisoned) => poisoned.into_inner().take(),
        };

        // The lock is released before the callback runs so it may re-enter freely.
        match deliver {
            Some(deliver) => {
                deliver(result);
                true
            }
            None => false,
        }
    }

    pub fn succeed(&self, value: impl Into<Value>) -> bool {
        self.complete(Ok(value.into()))
    }

    pub fn fail(&self, error: EngineError) -> bool {
        self.complete(Err(error))
    }

    fn is_settled(&self) -> bool {
        match self.slot.lock() {
            Ok(slot) => slot.is_none(),
            Err(poisoned) => poisoned.into_inner().is_none(),
        }
    }
}

impl fmt::Debug for Completion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Completion")
            .field("settled", &self.is_settled())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::mpsc;

    #[test]
    fn test_delivers_only_once() {
        let (tx, rx) = mpsc::channel();
        let completion = Completion::new(move |result| tx.send(result).unwrap());
        let twin = completion.clone();

        assert!(!completion.is_settled());
        assert!(twin.succeed("first"));
        assert!(!completion.succeed("second"));
        assert!(!completion.fail(EngineError::failed("test", "late")));
        assert!(completion.is_settled());

        let delivered: Vec<_> = rx.try_iter().collect();
        assert_eq!(delivered.len(), 1);
        assert_eq!(delivered[0].as_ref().unwrap().as_str(), Some("first"));
    }

    #[test]
    fn test_dropping_all_clones_drops_callback() {
        let (tx, rx) = mpsc::channel::<Result<Value, EngineError>>();
        let completion = Completion::new(move |result| {
            let _ = tx.send(result);
        });
        let twin = completion.clone();
        drop(completion);
        drop(twin);

        assert!(rx.recv().is_err(), "sender should be dropped with the callback");
    }
}

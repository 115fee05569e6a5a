// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Invocation-time failures of a compiled processor.
//!
//! These never escape a processor as a panic or an early return; they are always
//! delivered through the callback's error channel.

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum EngineError {
    /// The underlying engine reported a failure.
    #[error("Engine '{module}' failed: {message}")]
    Failed { module: String, message: String },

    /// A value that is not a module or method was called.
    #[error("Value of kind '{kind}' is not callable")]
    NotCallable { kind: &'static str },

    /// A member that the target does not provide was accessed.
    #[error("'{target}' has no member '{member}'")]
    UnknownMember { target: String, member: String },

    /// An engine received an argument of the wrong shape.
    #[error("Invalid argument {index} for '{function}': expected {expected}")]
    InvalidArgument {
        function: String,
        index: usize,
        expected: &'static str,
    },

    /// The engine returned something that cannot be turned into output text.
    #[error("Engine returned a {kind} value where text was expected")]
    InvalidOutput { kind: &'static str },

    /// The engine panicked; the payload message is preserved when it is a string.
    #[error("Engine panicked: {0}")]
    Panicked(String),

    /// An asynchronous engine dropped its completion without ever calling it.
    #[error("Engine '{0}' completed without delivering a result")]
    Abandoned(String),
}

impl EngineError {
    pub fn failed(module: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Failed {
            module: module.into(),
            message: message.into(),
        }
    }
}

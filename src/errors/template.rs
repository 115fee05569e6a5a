// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use thiserror::Error;

/// Errors raised while parsing or binding a call template.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum TemplateError {
    #[error("Parse error at offset {position}: {message}")]
    Parse { position: usize, message: String },

    /// `$index` has no matching module (only `available` were resolved).
    #[error("Placeholder ${index} has no module (engine declares {available})")]
    DanglingPlaceholder { index: usize, available: usize },

    /// The template is non-empty but the engine declares no modules.
    #[error("Template requires a primary module but none is declared")]
    MissingPrimary,

    /// The declared async flag disagrees with the template's use of `callback`.
    #[error(
        "Engine declared async={declared_async} but its template {} the callback",
        callback_usage(.references_callback)
    )]
    ShapeMismatch {
        declared_async: bool,
        references_callback: bool,
    },
}

fn callback_usage(references_callback: &bool) -> &'static str {
    if *references_callback {
        "references"
    } else {
        "never references"
    }
}

// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Observability module for structured logging and tracing.
//!
//! Message types follow a struct-based pattern with a `Display` implementation so that
//! log text lives in one place instead of being scattered through the codebase, and so
//! every event carries the same structured fields wherever it is emitted.
//!
//! # Architecture
//!
//! Messages are organized by subsystem:
//! * `messages::registry` - processor lookup, caching and compilation
//! * `messages::processor` - processor invocation events
//! * `messages::loader` - module resolution and installation
//!
//! # Usage
//!
//! ```rust
//! use the_switchboard::observability::messages::registry::UnknownEngineRequested;
//! use the_switchboard::observability::messages::StructuredLog;
//!
//! let msg = UnknownEngineRequested { engine: "coffeescript" };
//! msg.log();
//! ```

pub mod messages;

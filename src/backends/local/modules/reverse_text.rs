// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use crate::errors::EngineError;
use crate::traits::module::text_arg;
use crate::traits::{Module, Value};

/// Reverse text module - callable directly (`$0(input)`) or via `reverse(input)`
pub struct ReverseTextModule;

impl ReverseTextModule {
    pub fn new() -> Self {
        Self
    }

    fn reverse(args: &[Value]) -> Result<Value, EngineError> {
        let input = text_arg("reverse", args, 0)?;
        Ok(Value::Text(input.chars().rev().collect()))
    }
}

impl Default for ReverseTextModule {
    fn default() -> Self {
        Self::new()
    }
}

impl Module for ReverseTextModule {
    fn id(&self) -> &str {
        "reverse"
    }

    fn has_method(&self, name: &str) -> bool {
        name == "reverse"
    }

    fn call_method(&self, _name: &str, args: Vec<Value>) -> Result<Value, EngineError> {
        Self::reverse(&args)
    }

    fn call(&self, args: Vec<Value>) -> Result<Value, EngineError> {
        Self::reverse(&args)
    }
}

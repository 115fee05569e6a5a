// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use crate::errors::EngineError;
use crate::traits::module::text_arg;
use crate::traits::{Module, Value};

/// Whitespace minifier - `collapse(input)` squeezes every whitespace run to one space
pub struct WhitespaceMinifierModule;

impl WhitespaceMinifierModule {
    pub fn new() -> Self {
        Self
    }
}

impl Default for WhitespaceMinifierModule {
    fn default() -> Self {
        Self::new()
    }
}

impl Module for WhitespaceMinifierModule {
    fn id(&self) -> &str {
        "minifier"
    }

    fn has_method(&self, name: &str) -> bool {
        name == "collapse"
    }

    fn call_method(&self, _name: &str, args: Vec<Value>) -> Result<Value, EngineError> {
        let input = text_arg("minifier.collapse", &args, 0)?;
        Ok(Value::Text(input.split_whitespace().collect::<Vec<_>>().join(" ")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_collapse() {
        let result = WhitespaceMinifierModule::new()
            .call_method("collapse", vec![Value::from("  body {\n\tcolor:  red;\n}  ")])
            .unwrap();
        assert_eq!(result.as_str(), Some("body { color: red; }"));
    }
}

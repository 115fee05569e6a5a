// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use serde::Serialize;

use crate::errors::EngineError;
use crate::traits::module::text_arg;
use crate::traits::{Module, Value};

/// Token counter module - `analyze(input)` returns character, word and line counts
pub struct TokenCounterModule;

impl TokenCounterModule {
    pub fn new() -> Self {
        Self
    }
}

impl Default for TokenCounterModule {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Serialize)]
struct TokenCountResult {
    char_count: usize,
    word_count: usize,
    line_count: usize,
}

impl Module for TokenCounterModule {
    fn id(&self) -> &str {
        "token-counter"
    }

    fn has_method(&self, name: &str) -> bool {
        name == "analyze"
    }

    fn call_method(&self, _name: &str, args: Vec<Value>) -> Result<Value, EngineError> {
        let input = text_arg("token-counter.analyze", &args, 0)?;

        let result = TokenCountResult {
            char_count: input.chars().count(),
            word_count: input.split_whitespace().count(),
            line_count: input.lines().count().max(1), // At least 1 line even if empty
        };

        serde_json::to_value(&result)
            .map(Value::Json)
            .map_err(|e| EngineError::failed(self.id(), format!("Failed to serialize result: {e}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_analyze_counts() {
        let module = TokenCounterModule::new();
        let result = module
            .call_method("analyze", vec![Value::from("hello world\nsecond line")])
            .unwrap();

        match result {
            Value::Json(json) => assert_eq!(
                json,
                json!({"char_count": 23, "word_count": 4, "line_count": 2})
            ),
            other => panic!("expected JSON result, got {:?}", other),
        }
    }

    #[test]
    fn test_empty_input_has_one_line() {
        let result = TokenCounterModule::new()
            .call_method("analyze", vec![Value::from("")])
            .unwrap();
        assert_eq!(result.member("line_count").unwrap().into_output().unwrap(), Some("1".to_string()));
    }
}

// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use crate::errors::EngineError;
use crate::traits::module::text_arg;
use crate::traits::{Module, Value};

const METHODS: &[&str] = &["upper", "lower", "proper", "title"];

const SMALL_WORDS: &[&str] = &[
    "a", "an", "the", "and", "or", "but", "in", "on", "at", "to", "for", "of", "with", "by",
];

/// Text case module - `upper`, `lower`, `proper` and `title` case conversion
pub struct TextCaseModule;

impl TextCaseModule {
    pub fn new() -> Self {
        Self
    }
}

impl Default for TextCaseModule {
    fn default() -> Self {
        Self::new()
    }
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        None => String::new(),
        Some(first) => first.to_uppercase().collect::<String>() + &chars.as_str().to_lowercase(),
    }
}

fn proper_case(input: &str) -> String {
    input
        .split_whitespace()
        .map(capitalize)
        .collect::<Vec<_>>()
        .join(" ")
}

fn title_case(input: &str) -> String {
    input
        .split_whitespace()
        .enumerate()
        .map(|(i, word)| {
            let lower_word = word.to_lowercase();
            // First word is always capitalized
            if i == 0 || !SMALL_WORDS.contains(&lower_word.as_str()) {
                capitalize(word)
            } else {
                lower_word
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

impl Module for TextCaseModule {
    fn id(&self) -> &str {
        "case"
    }

    fn has_method(&self, name: &str) -> bool {
        METHODS.contains(&name)
    }

    fn call_method(&self, name: &str, args: Vec<Value>) -> Result<Value, EngineError> {
        let input = text_arg(&format!("case.{name}"), &args, 0)?;
        let result = match name {
            "upper" => input.to_uppercase(),
            "lower" => input.to_lowercase(),
            "proper" => proper_case(input),
            "title" => title_case(input),
            _ => {
                return Err(EngineError::UnknownMember {
                    target: self.id().to_string(),
                    member: name.to_string(),
                })
            }
        };
        Ok(Value::Text(result))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_case_conversions() {
        let test_cases = vec![
            ("upper", "hello", "HELLO"),
            ("lower", "HELLO", "hello"),
            ("proper", "hello world", "Hello World"),
            ("title", "the quick brown fox", "The Quick Brown Fox"),
            ("title", "war and peace of mind", "War and Peace of Mind"),
        ];

        let module = TextCaseModule::new();
        for (method, input, expected) in test_cases {
            let result = module.call_method(method, vec![Value::from(input)]).unwrap();
            assert_eq!(result.as_str(), Some(expected), "Failed for method: {}", method);
        }
    }

    #[test]
    fn test_missing_argument() {
        let error = TextCaseModule::new().call_method("upper", vec![]).unwrap_err();
        assert_eq!(
            error,
            EngineError::InvalidArgument {
                function: "case.upper".to_string(),
                index: 0,
                expected: "text",
            }
        );
    }
}

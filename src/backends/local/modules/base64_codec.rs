// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use base64::{engine::general_purpose::STANDARD, Engine as _};

use crate::errors::EngineError;
use crate::traits::module::text_arg;
use crate::traits::{Module, Value};

/// Base64 module - standard alphabet `encode` and `decode`
pub struct Base64Module;

impl Base64Module {
    pub fn new() -> Self {
        Self
    }
}

impl Default for Base64Module {
    fn default() -> Self {
        Self::new()
    }
}

impl Module for Base64Module {
    fn id(&self) -> &str {
        "base64"
    }

    fn has_method(&self, name: &str) -> bool {
        matches!(name, "encode" | "decode")
    }

    fn call_method(&self, name: &str, args: Vec<Value>) -> Result<Value, EngineError> {
        let input = text_arg(&format!("base64.{name}"), &args, 0)?;
        match name {
            "encode" => Ok(Value::Text(STANDARD.encode(input.as_bytes()))),
            "decode" => {
                let bytes = STANDARD
                    .decode(input.trim())
                    .map_err(|e| EngineError::failed(self.id(), format!("Invalid base64 input: {e}")))?;
                String::from_utf8(bytes)
                    .map(Value::Text)
                    .map_err(|e| EngineError::failed(self.id(), format!("Decoded bytes are not UTF-8: {e}")))
            }
            _ => Err(EngineError::UnknownMember {
                target: self.id().to_string(),
                member: name.to_string(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode_and_decode() {
        let module = Base64Module::new();
        let encoded = module.call_method("encode", vec![Value::from("hello")]).unwrap();
        assert_eq!(encoded.as_str(), Some("aGVsbG8="));

        let decoded = module.call_method("decode", vec![Value::from("aGVsbG8=\n")]).unwrap();
        assert_eq!(decoded.as_str(), Some("hello"));
    }

    #[test]
    fn test_decode_rejects_garbage() {
        let error = Base64Module::new()
            .call_method("decode", vec![Value::from("not base64!")])
            .unwrap_err();
        assert!(error.to_string().contains("Invalid base64 input"));
    }
}

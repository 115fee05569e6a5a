// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use serde::{Deserialize, Serialize};

use crate::errors::EngineError;
use crate::traits::module::{options_arg, text_arg};
use crate::traits::{Module, Value};

/// Default framing for the prefix/suffix module
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct PrefixSuffixConfig {
    pub prefix: String,
    pub suffix: String,
}

impl Default for PrefixSuffixConfig {
    fn default() -> Self {
        Self {
            prefix: "[".to_string(),
            suffix: "]".to_string(),
        }
    }
}

/// Prefix/suffix module - `wrap(text, options)` frames text
///
/// `options.prefix` and `options.suffix` override the configured framing per call.
pub struct PrefixSuffixModule {
    config: PrefixSuffixConfig,
}

impl PrefixSuffixModule {
    pub fn new() -> Self {
        Self::with_config(PrefixSuffixConfig::default())
    }

    pub fn with_config(config: PrefixSuffixConfig) -> Self {
        Self { config }
    }
}

impl Default for PrefixSuffixModule {
    fn default() -> Self {
        Self::new()
    }
}

impl Module for PrefixSuffixModule {
    fn id(&self) -> &str {
        "frame"
    }

    fn has_method(&self, name: &str) -> bool {
        name == "wrap"
    }

    fn call_method(&self, _name: &str, args: Vec<Value>) -> Result<Value, EngineError> {
        let input = text_arg("frame.wrap", &args, 0)?;
        let options = options_arg(&args, 1);
        let lookup = |key: &str, fallback: &str| -> String {
            options
                .and_then(|options| options.get(key))
                .and_then(|value| value.as_str())
                .unwrap_or(fallback)
                .to_string()
        };

        let prefix = lookup("prefix", self.config.prefix.as_str());
        let suffix = lookup("suffix", self.config.suffix.as_str());
        Ok(Value::Text(format!("{prefix}{input}{suffix}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_wrap_with_defaults_and_overrides() {
        let module = PrefixSuffixModule::new();

        let result = module.call_method("wrap", vec![Value::from("x")]).unwrap();
        assert_eq!(result.as_str(), Some("[x]"));

        let options = Value::Json(json!({"prefix": "<<", "suffix": ">>"}));
        let result = module.call_method("wrap", vec![Value::from("x"), options]).unwrap();
        assert_eq!(result.as_str(), Some("<<x>>"));

        let options = Value::Json(json!({"prefix": "("}));
        let result = module.call_method("wrap", vec![Value::from("x"), options]).unwrap();
        assert_eq!(result.as_str(), Some("(x]"));
    }
}

// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Loaded dependency modules and the values that flow between template steps.

use std::fmt;
use std::sync::Arc;

use crate::compiler::Completion;
use crate::errors::EngineError;

/// The options object handed to every processor invocation.
pub type Options = serde_json::Map<String, serde_json::Value>;

/// A loaded dependency: the primary engine or one of its secondary modules.
///
/// A module may be callable itself (`$0(input)`), expose named methods
/// (`$0.render(input, options)`), and expose plain properties (`$0.version`).
/// Implementations must be reentrant if the same processor is invoked concurrently.
pub trait Module: Send + Sync {
    fn id(&self) -> &str;

    fn has_method(&self, _name: &str) -> bool {
        false
    }

    fn call_method(&self, name: &str, _args: Vec<Value>) -> Result<Value, EngineError> {
        Err(EngineError::UnknownMember {
            target: self.id().to_string(),
            member: name.to_string(),
        })
    }

    fn property(&self, _name: &str) -> Option<Value> {
        None
    }

    fn call(&self, _args: Vec<Value>) -> Result<Value, EngineError> {
        Err(EngineError::NotCallable { kind: "module" })
    }
}

/// A dynamically typed value produced while evaluating a call template.
#[derive(Clone)]
pub enum Value {
    Null,
    Text(String),
    Json(serde_json::Value),
    Module(Arc<dyn Module>),
    /// A method looked up on a module but not yet called.
    Method {
        receiver: Arc<dyn Module>,
        name: Arc<str>,
    },
    Callback(Completion),
}

impl Value {
    pub fn kind(&self) -> &'static str {
        match self {
            Value::Null => "null",
            Value::Text(_) => "text",
            Value::Json(serde_json::Value::Null) => "null",
            Value::Json(serde_json::Value::Bool(_)) => "boolean",
            Value::Json(serde_json::Value::Number(_)) => "number",
            Value::Json(serde_json::Value::String(_)) => "text",
            Value::Json(serde_json::Value::Array(_)) => "array",
            Value::Json(serde_json::Value::Object(_)) => "object",
            Value::Module(_) => "module",
            Value::Method { .. } => "method",
            Value::Callback(_) => "callback",
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Text(text) => Some(text),
            Value::Json(serde_json::Value::String(text)) => Some(text),
            _ => None,
        }
    }

    pub fn as_object(&self) -> Option<&Options> {
        match self {
            Value::Json(serde_json::Value::Object(map)) => Some(map),
            _ => None,
        }
    }

    /// `.name` or `["name"]` access.
    pub fn member(&self, name: &str) -> Result<Value, EngineError> {
        match self {
            Value::Module(module) => {
                if module.has_method(name) {
                    Ok(Value::Method {
                        receiver: Arc::clone(module),
                        name: Arc::from(name),
                    })
                } else {
                    module.property(name).ok_or_else(|| EngineError::UnknownMember {
                        target: module.id().to_string(),
                        member: name.to_string(),
                    })
                }
            }
            Value::Json(serde_json::Value::Object(map)) => map
                .get(name)
                .cloned()
                .map(Value::Json)
                .ok_or_else(|| EngineError::UnknownMember {
                    target: "object".to_string(),
                    member: name.to_string(),
                }),
            other => Err(EngineError::UnknownMember {
                target: other.kind().to_string(),
                member: name.to_string(),
            }),
        }
    }

    /// `[index]` access on a JSON array.
    pub fn index(&self, index: usize) -> Result<Value, EngineError> {
        match self {
            Value::Json(serde_json::Value::Array(items)) => items
                .get(index)
                .cloned()
                .map(Value::Json)
                .ok_or_else(|| EngineError::UnknownMember {
                    target: "array".to_string(),
                    member: index.to_string(),
                }),
            other => Err(EngineError::UnknownMember {
                target: other.kind().to_string(),
                member: index.to_string(),
            }),
        }
    }

    pub fn call(&self, args: Vec<Value>) -> Result<Value, EngineError> {
        match self {
            Value::Module(module) => module.call(args),
            Value::Method { receiver, name } => receiver.call_method(name, args),
            other => Err(EngineError::NotCallable { kind: other.kind() }),
        }
    }

    /// Convert an engine's return value into processor output.
    pub fn into_output(self) -> Result<Option<String>, EngineError> {
        match self {
            Value::Null | Value::Json(serde_json::Value::Null) => Ok(None),
            Value::Text(text) | Value::Json(serde_json::Value::String(text)) => Ok(Some(text)),
            Value::Json(other) => Ok(Some(other.to_string())),
            other => Err(EngineError::InvalidOutput { kind: other.kind() }),
        }
    }
}

impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => write!(f, "Null"),
            Value::Text(text) => f.debug_tuple("Text").field(text).finish(),
            Value::Json(json) => f.debug_tuple("Json").field(json).finish(),
            Value::Module(module) => f.debug_tuple("Module").field(&module.id()).finish(),
            Value::Method { receiver, name } => write!(f, "Method({}.{})", receiver.id(), name),
            Value::Callback(completion) => f.debug_tuple("Callback").field(completion).finish(),
        }
    }
}

impl From<String> for Value {
    fn from(text: String) -> Self {
        Value::Text(text)
    }
}

impl From<&str> for Value {
    fn from(text: &str) -> Self {
        Value::Text(text.to_string())
    }
}

impl From<serde_json::Value> for Value {
    fn from(json: serde_json::Value) -> Self {
        Value::Json(json)
    }
}

/// Fetch argument `index` as text.
pub fn text_arg<'a>(function: &str, args: &'a [Value], index: usize) -> Result<&'a str, EngineError> {
    args.get(index)
        .and_then(Value::as_str)
        .ok_or_else(|| EngineError::InvalidArgument {
            function: function.to_string(),
            index,
            expected: "text",
        })
}

/// Fetch argument `index` as an options object; missing or non-object arguments read as absent.
pub fn options_arg(args: &[Value], index: usize) -> Option<&Options> {
    args.get(index).and_then(Value::as_object)
}

/// Fetch argument `index` as the completion callback.
pub fn callback_arg<'a>(
    function: &str,
    args: &'a [Value],
    index: usize,
) -> Result<&'a Completion, EngineError> {
    match args.get(index) {
        Some(Value::Callback(completion)) => Ok(completion),
        _ => Err(EngineError::InvalidArgument {
            function: function.to_string(),
            index,
            expected: "callback",
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    struct Greeter;

    impl Module for Greeter {
        fn id(&self) -> &str {
            "greeter"
        }

        fn has_method(&self, name: &str) -> bool {
            name == "greet"
        }

        fn call_method(&self, name: &str, args: Vec<Value>) -> Result<Value, EngineError> {
            match name {
                "greet" => Ok(Value::Text(format!("hi {}", text_arg("greeter.greet", &args, 0)?))),
                _ => Err(EngineError::UnknownMember {
                    target: self.id().to_string(),
                    member: name.to_string(),
                }),
            }
        }

        fn property(&self, name: &str) -> Option<Value> {
            (name == "version").then(|| Value::Json(json!("1.0")))
        }
    }

    #[test]
    fn test_member_resolves_method_then_property() {
        let module = Value::Module(Arc::new(Greeter));

        let greet = module.member("greet").unwrap();
        assert_eq!(greet.kind(), "method");
        let result = greet.call(vec![Value::from("bob")]).unwrap();
        assert_eq!(result.as_str(), Some("hi bob"));

        let version = module.member("version").unwrap();
        assert_eq!(version.as_str(), Some("1.0"));

        let missing = module.member("nope").unwrap_err();
        assert_eq!(
            missing,
            EngineError::UnknownMember {
                target: "greeter".to_string(),
                member: "nope".to_string()
            }
        );
    }

    #[test]
    fn test_module_without_call_is_not_callable() {
        let module = Value::Module(Arc::new(Greeter));
        assert_eq!(module.call(vec![]).unwrap_err(), EngineError::NotCallable { kind: "module" });
        assert_eq!(
            Value::from("text").call(vec![]).unwrap_err(),
            EngineError::NotCallable { kind: "text" }
        );
    }

    #[test]
    fn test_json_member_and_index() {
        let value = Value::Json(json!({"items": ["a", "b"], "count": 2}));
        assert_eq!(value.member("count").unwrap().into_output().unwrap(), Some("2".to_string()));
        let items = value.member("items").unwrap();
        assert_eq!(items.index(1).unwrap().as_str(), Some("b"));
        assert!(items.index(5).is_err());
        assert!(value.member("missing").is_err());
    }

    #[test]
    fn test_into_output_conversions() {
        struct TestCase {
            name: &'static str,
            value: Value,
            expected: Result<Option<String>, EngineError>,
        }

        let test_cases = vec![
            TestCase {
                name: "text",
                value: Value::from("abc"),
                expected: Ok(Some("abc".to_string())),
            },
            TestCase {
                name: "json string",
                value: Value::Json(json!("abc")),
                expected: Ok(Some("abc".to_string())),
            },
            TestCase {
                name: "null",
                value: Value::Null,
                expected: Ok(None),
            },
            TestCase {
                name: "json object",
                value: Value::Json(json!({"a": 1})),
                expected: Ok(Some("{\"a\":1}".to_string())),
            },
            TestCase {
                name: "module",
                value: Value::Module(Arc::new(Greeter)),
                expected: Err(EngineError::InvalidOutput { kind: "module" }),
            },
        ];

        for test_case in test_cases {
            assert_eq!(
                test_case.value.into_output(),
                test_case.expected,
                "Test case '{}' failed",
                test_case.name
            );
        }
    }
}

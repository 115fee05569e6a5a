// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Moustache-style template rendering backed by `handlebars`.
//!
//! `{{ key }}` is replaced with `options.key`; dotted keys (`{{ user.name }}`) walk nested
//! objects. Missing keys render as empty text and `{{{ key }}}` skips HTML escaping.
//! `render_async` does the same work on a background thread and reports through the
//! completion callback.

use handlebars::Handlebars;
use std::sync::Arc;
use std::thread;

use crate::errors::EngineError;
use crate::traits::module::{callback_arg, options_arg, text_arg};
use crate::traits::{Module, Options, Value};

#[derive(Clone)]
pub struct MoustacheModule {
    handlebars: Arc<Handlebars<'static>>,
}

impl MoustacheModule {
    pub fn new() -> Self {
        let mut handlebars = Handlebars::new();
        handlebars.set_strict_mode(false);
        handlebars.set_dev_mode(false);

        Self {
            handlebars: Arc::new(handlebars),
        }
    }

    pub fn render(&self, template: &str, context: &Options) -> Result<String, EngineError> {
        render_with(&self.handlebars, template, context)
    }
}

impl Default for MoustacheModule {
    fn default() -> Self {
        Self::new()
    }
}

fn render_with(handlebars: &Handlebars<'_>, template: &str, context: &Options) -> Result<String, EngineError> {
    let data = serde_json::Value::Object(context.clone());
    handlebars
        .render_template(template, &data)
        .map_err(|e| EngineError::failed("moustache", e.to_string()))
}

impl Module for MoustacheModule {
    fn id(&self) -> &str {
        "moustache"
    }

    fn has_method(&self, name: &str) -> bool {
        matches!(name, "render" | "render_async")
    }

    fn call_method(&self, name: &str, args: Vec<Value>) -> Result<Value, EngineError> {
        let template = text_arg(&format!("moustache.{name}"), &args, 0)?;
        let context = options_arg(&args, 1).cloned().unwrap_or_default();

        match name {
            "render" => self.render(template, &context).map(Value::Text),
            "render_async" => {
                let completion = callback_arg("moustache.render_async", &args, 2)?.clone();
                let handlebars = Arc::clone(&self.handlebars);
                let template = template.to_string();
                thread::spawn(move || {
                    completion.complete(render_with(&handlebars, &template, &context).map(Value::Text));
                });
                Ok(Value::Null)
            }
            _ => Err(EngineError::UnknownMember {
                target: self.id().to_string(),
                member: name.to_string(),
            }),
        }
    }

    fn property(&self, name: &str) -> Option<Value> {
        (name == "version").then(|| Value::from(env!("CARGO_PKG_VERSION")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compiler::Completion;
    use serde_json::json;
    use std::sync::mpsc;
    use std::time::Duration;

    fn context() -> Options {
        match json!({"name": "Ada", "count": 3, "user": {"role": "admin"}, "none": null, "html": "<b>"}) {
            serde_json::Value::Object(map) => map,
            _ => unreachable!(),
        }
    }

    #[test]
    fn test_render() {
        let test_cases = vec![
            ("Hello {{name}}!", "Hello Ada!"),
            ("{{ name }} has {{count}} items", "Ada has 3 items"),
            ("role={{user.role}}", "role=admin"),
            ("missing=[{{nope}}] null=[{{none}}]", "missing=[] null=[]"),
            ("no tags", "no tags"),
            ("{{html}} {{{html}}}", "&lt;b&gt; <b>"),
        ];

        let module = MoustacheModule::new();
        for (template, expected) in test_cases {
            assert_eq!(
                module.render(template, &context()).unwrap(),
                expected,
                "template: {}",
                template
            );
        }
    }

    #[test]
    fn test_unclosed_tag() {
        let error = MoustacheModule::new().render("ok {{ broken", &context()).unwrap_err();
        assert!(matches!(error, EngineError::Failed { ref module, .. } if module == "moustache"));
    }

    #[test]
    fn test_render_async_completes_on_background_thread() {
        let (tx, rx) = mpsc::channel();
        let completion = Completion::new(move |result| tx.send(result).unwrap());

        let immediate = MoustacheModule::new()
            .call_method(
                "render_async",
                vec![
                    Value::from("Hi {{name}}"),
                    Value::Json(serde_json::Value::Object(context())),
                    Value::Callback(completion),
                ],
            )
            .unwrap();
        assert_eq!(immediate.kind(), "null");

        let result = rx.recv_timeout(Duration::from_secs(5)).unwrap().unwrap();
        assert_eq!(result.as_str(), Some("Hi Ada"));
    }

    #[test]
    fn test_render_async_requires_callback() {
        let error = MoustacheModule::new()
            .call_method("render_async", vec![Value::from("x")])
            .unwrap_err();
        assert!(matches!(error, EngineError::InvalidArgument { index: 2, .. }));
    }
}

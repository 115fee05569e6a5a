// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Binding a parsed template to resolved modules.
//!
//! Each [`Expr`] node becomes a closure that captures the modules it needs, so
//! placeholder substitution happens once, when the processor is compiled.

use std::fmt;
use std::sync::Arc;

use super::template::{self, Expr};
use super::Completion;
use crate::errors::{EngineError, TemplateError};
use crate::traits::{Module, Options, Value};

/// Per-invocation bindings for the template's parameters.
pub struct Scope<'a> {
    pub input: &'a str,
    pub options: &'a Options,
    pub completion: &'a Completion,
}

pub type Evaluator = Arc<dyn Fn(&Scope<'_>) -> Result<Value, EngineError> + Send + Sync>;

fn evaluator<F>(f: F) -> Evaluator
where
    F: Fn(&Scope<'_>) -> Result<Value, EngineError> + Send + Sync + 'static,
{
    Arc::new(f)
}

/// How a compiled processor reaches its engine.
#[derive(Clone)]
pub enum CallShape {
    /// Pass the input through unchanged.
    Identity,
    /// The expression's value is the result.
    SyncCall(Evaluator),
    /// The engine receives the callback and completes it itself.
    AsyncCall(Evaluator),
}

impl CallShape {
    /// Build the call shape for `template`.
    ///
    /// `modules[0]` is the primary engine and `modules[i]` binds `$i`. When `declared_async`
    /// is `None` the shape follows from whether the template references `callback`.
    pub fn build(
        template: &str,
        declared_async: Option<bool>,
        modules: &[Arc<dyn Module>],
    ) -> Result<Self, TemplateError> {
        if template.trim().is_empty() {
            return Ok(CallShape::Identity);
        }
        if modules.is_empty() {
            return Err(TemplateError::MissingPrimary);
        }

        let expr = template::parse(&template::anchor_to_primary(template))?;
        let references_callback = expr.references_callback();
        let is_async = match declared_async {
            Some(declared) if declared != references_callback => {
                return Err(TemplateError::ShapeMismatch {
                    declared_async: declared,
                    references_callback,
                })
            }
            Some(declared) => declared,
            None => references_callback,
        };

        if let Some(index) = expr.max_placeholder().filter(|&index| index >= modules.len()) {
            return Err(TemplateError::DanglingPlaceholder {
                index,
                available: modules.len(),
            });
        }

        let evaluate = bind(&expr, modules)?;
        Ok(if is_async {
            CallShape::AsyncCall(evaluate)
        } else {
            CallShape::SyncCall(evaluate)
        })
    }

    pub fn is_async(&self) -> bool {
        matches!(self, CallShape::AsyncCall(_))
    }

    pub fn kind(&self) -> &'static str {
        match self {
            CallShape::Identity => "identity",
            CallShape::SyncCall(_) => "sync",
            CallShape::AsyncCall(_) => "async",
        }
    }
}

impl fmt::Debug for CallShape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "CallShape::{}", self.kind())
    }
}

fn bind(expr: &Expr, modules: &[Arc<dyn Module>]) -> Result<Evaluator, TemplateError> {
    let bound = match expr {
        Expr::Placeholder(index) => {
            let module = modules
                .get(*index)
                .cloned()
                .ok_or(TemplateError::DanglingPlaceholder {
                    index: *index,
                    available: modules.len(),
                })?;
            evaluator(move |_: &Scope<'_>| Ok(Value::Module(Arc::clone(&module))))
        }
        Expr::Input => evaluator(|scope: &Scope<'_>| Ok(Value::Text(scope.input.to_string()))),
        Expr::Options => evaluator(|scope: &Scope<'_>| {
            Ok(Value::Json(serde_json::Value::Object(scope.options.clone())))
        }),
        Expr::Callback => evaluator(|scope: &Scope<'_>| Ok(Value::Callback(scope.completion.clone()))),
        Expr::Literal(literal) => {
            let literal = literal.clone();
            evaluator(move |_: &Scope<'_>| Ok(Value::Json(literal.clone())))
        }
        Expr::Member { target, name } => {
            let target = bind(target, modules)?;
            let name = name.clone();
            evaluator(move |scope: &Scope<'_>| target(scope)?.member(&name))
        }
        Expr::Index { target, index } => {
            let target = bind(target, modules)?;
            let index = *index;
            evaluator(move |scope: &Scope<'_>| target(scope)?.index(index))
        }
        Expr::Call { target, args } => {
            let target = bind(target, modules)?;
            let args = args
                .iter()
                .map(|arg| bind(arg, modules))
                .collect::<Result<Vec<_>, _>>()?;
            evaluator(move |scope: &Scope<'_>| {
                let callee = target(scope)?;
                let values = args
                    .iter()
                    .map(|arg| arg(scope))
                    .collect::<Result<Vec<_>, _>>()?;
                callee.call(values)
            })
        }
    };
    Ok(bound)
}

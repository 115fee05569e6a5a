// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Test modules for exercising processor failure and completion paths.

use std::thread;
use std::time::Duration;

use crate::errors::EngineError;
use crate::traits::module::{callback_arg, text_arg};
use crate::traits::{Module, Value};

/// Returns its input: `echo(input)`
pub struct EchoModule;

impl Module for EchoModule {
    fn id(&self) -> &str {
        "echo"
    }

    fn has_method(&self, name: &str) -> bool {
        name == "echo"
    }

    fn call_method(&self, _name: &str, args: Vec<Value>) -> Result<Value, EngineError> {
        Ok(Value::from(text_arg("echo", &args, 0)?))
    }
}

/// Completes `echo(input, options, callback)` from a background thread
pub struct ThreadedEchoModule;

impl Module for ThreadedEchoModule {
    fn id(&self) -> &str {
        "threaded-echo"
    }

    fn has_method(&self, name: &str) -> bool {
        name == "echo"
    }

    fn call_method(&self, _name: &str, args: Vec<Value>) -> Result<Value, EngineError> {
        let input = text_arg("echo", &args, 0)?.to_string();
        let completion = callback_arg("echo", &args, 2)?.clone();
        thread::spawn(move || {
            thread::sleep(Duration::from_millis(10));
            completion.succeed(input);
        });
        Ok(Value::Null)
    }
}

/// Always fails: `run(...)`
pub struct FailingModule;

impl Module for FailingModule {
    fn id(&self) -> &str {
        "failing"
    }

    fn has_method(&self, name: &str) -> bool {
        name == "run"
    }

    fn call_method(&self, _name: &str, _args: Vec<Value>) -> Result<Value, EngineError> {
        Err(EngineError::failed("failing", "simulated engine failure"))
    }
}

/// Panics: `run(...)`
pub struct PanickingModule;

impl Module for PanickingModule {
    fn id(&self) -> &str {
        "panicking"
    }

    fn has_method(&self, name: &str) -> bool {
        name == "run"
    }

    fn call_method(&self, _name: &str, _args: Vec<Value>) -> Result<Value, EngineError> {
        panic!("engine exploded")
    }
}

/// Calls back twice: `twice(input, callback)`
pub struct CallbackTwiceModule;

impl Module for CallbackTwiceModule {
    fn id(&self) -> &str {
        "twice"
    }

    fn has_method(&self, name: &str) -> bool {
        name == "twice"
    }

    fn call_method(&self, _name: &str, args: Vec<Value>) -> Result<Value, EngineError> {
        let input = text_arg("twice", &args, 0)?;
        let completion = callback_arg("twice", &args, 1)?;
        completion.succeed(input);
        completion.succeed("second delivery");
        Ok(Value::Null)
    }
}

/// Calls back, then reports a failure anyway: `run(input, callback)`
pub struct LateFailureModule;

impl Module for LateFailureModule {
    fn id(&self) -> &str {
        "late-failure"
    }

    fn has_method(&self, name: &str) -> bool {
        name == "run"
    }

    fn call_method(&self, _name: &str, args: Vec<Value>) -> Result<Value, EngineError> {
        let input = text_arg("run", &args, 0)?;
        callback_arg("run", &args, 1)?.succeed(input);
        Err(EngineError::failed("late-failure", "failed after completing"))
    }
}

/// Drops its callback without calling it: `run(input, callback)`
pub struct SilentModule;

impl Module for SilentModule {
    fn id(&self) -> &str {
        "silent"
    }

    fn has_method(&self, name: &str) -> bool {
        name == "run"
    }

    fn call_method(&self, _name: &str, _args: Vec<Value>) -> Result<Value, EngineError> {
        Ok(Value::Null)
    }
}

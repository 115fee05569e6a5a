// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use std::any::Any;
use std::fmt;
use std::panic::{self, AssertUnwindSafe};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use std::thread;

use async_trait::async_trait;
use tokio::sync::oneshot;

use super::call_shape::{CallShape, Scope};
use super::Completion;
use crate::errors::EngineError;
use crate::observability::messages::processor::{ProcessorInvocationFailed, ProcessorInvocationStarted};
use crate::observability::messages::StructuredLog;
use crate::traits::{Options, Processor, Value};

/// What a processor's callback receives: the output text, `None` when the engine
/// produced no result, or the invocation's error.
pub type ProcessorOutcome = Result<Option<String>, EngineError>;

/// The normalized processing function for one engine.
///
/// Holds no mutable state: repeated and concurrent invocations are safe as long as the
/// underlying modules are reentrant. The callback is invoked at most once per call, and
/// no engine failure (including a panic) escapes `process`. A panic raised by the
/// callback itself is not an engine failure and propagates to the caller.
pub struct CompiledProcessor {
    engine: String,
    shape: CallShape,
}

impl CompiledProcessor {
    pub fn new(engine: impl Into<String>, shape: CallShape) -> Self {
        Self {
            engine: engine.into(),
            shape,
        }
    }

    pub fn identity(engine: impl Into<String>) -> Self {
        Self::new(engine, CallShape::Identity)
    }

    pub fn engine(&self) -> &str {
        &self.engine
    }

    pub fn shape(&self) -> &CallShape {
        &self.shape
    }

    pub fn is_async(&self) -> bool {
        self.shape.is_async()
    }

    /// Run the engine over `input`, reporting through `callback`.
    pub fn process<F>(&self, input: &str, options: &Options, callback: F)
    where
        F: FnOnce(ProcessorOutcome) + Send + 'static,
    {
        let started = ProcessorInvocationStarted {
            engine: &self.engine,
            shape: self.shape.kind(),
            input_size: input.len(),
        };
        let span = started.span("processor_invocation");
        let _guard = span.enter();
        started.log();

        let evaluate = match &self.shape {
            CallShape::Identity => return callback(Ok(Some(input.to_string()))),
            CallShape::SyncCall(evaluate) | CallShape::AsyncCall(evaluate) => evaluate,
        };

        let caller_panic = CallerPanic::new();
        let completion = {
            let caller_panic = Arc::clone(&caller_panic);
            Completion::new(move |result: Result<Value, EngineError>| {
                let outcome = result.and_then(Value::into_output);
                caller_panic.run(move || callback(outcome));
            })
        };
        let scope = Scope {
            input,
            options,
            completion: &completion,
        };
        let result = guarded(|| evaluate(&scope));
        caller_panic.disarm();

        if let Err(error) = &result {
            ProcessorInvocationFailed {
                engine: &self.engine,
                error,
            }
            .log();
        }

        match &self.shape {
            CallShape::AsyncCall(_) => {
                // The engine owns completion; only a synchronous failure is reported here,
                // and it is dropped if the engine already delivered a result.
                if let Err(error) = result {
                    completion.fail(error);
                }
            }
            _ => {
                completion.complete(result);
            }
        }
    }

    /// `process` with an empty options object.
    pub fn process_default<F>(&self, input: &str, callback: F)
    where
        F: FnOnce(ProcessorOutcome) + Send + 'static,
    {
        self.process(input, &Options::new(), callback)
    }
}

type PanicPayload = Box<dyn Any + Send>;

/// Keeps a panic raised by the caller's callback out of the engine's panic boundary.
///
/// While armed, a callback run on the invoking thread (an engine completing synchronously
/// inside `evaluate`) has its panic held here and re-raised once the engine returns.
/// Anywhere else the callback runs unguarded.
struct CallerPanic {
    owner: thread::ThreadId,
    armed: AtomicBool,
    payload: Mutex<Option<PanicPayload>>,
}

impl CallerPanic {
    fn new() -> Arc<Self> {
        Arc::new(Self {
            owner: thread::current().id(),
            armed: AtomicBool::new(true),
            payload: Mutex::new(None),
        })
    }

    fn run<F: FnOnce()>(&self, callback: F) {
        if !self.armed.load(Ordering::SeqCst) || thread::current().id() != self.owner {
            return callback();
        }
        if let Err(payload) = panic::catch_unwind(AssertUnwindSafe(callback)) {
            let mut slot = self.payload.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
            *slot = Some(payload);
        }
    }

    /// Stop holding panics and re-raise one caught while armed.
    fn disarm(&self) {
        self.armed.store(false, Ordering::SeqCst);
        let held = self
            .payload
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .take();
        if let Some(payload) = held {
            panic::resume_unwind(payload);
        }
    }
}

fn guarded<F>(evaluate: F) -> Result<Value, EngineError>
where
    F: FnOnce() -> Result<Value, EngineError>,
{
    panic::catch_unwind(AssertUnwindSafe(evaluate))
        .unwrap_or_else(|payload| Err(EngineError::Panicked(panic_message(payload.as_ref()))))
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        message.to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "non-string panic payload".to_string()
    }
}

#[async_trait]
impl Processor for CompiledProcessor {
    async fn execute(&self, input: String, options: Options) -> ProcessorOutcome {
        let (tx, rx) = oneshot::channel();
        self.process(&input, &options, move |outcome| {
            let _ = tx.send(outcome);
        });
        rx.await
            .unwrap_or_else(|_| Err(EngineError::Abandoned(self.engine.clone())))
    }

    fn name(&self) -> &str {
        &self.engine
    }
}

impl fmt::Debug for CompiledProcessor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CompiledProcessor")
            .field("engine", &self.engine)
            .field("shape", &self.shape.kind())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backends::stub::{
        CallbackTwiceModule, EchoModule, FailingModule, LateFailureModule, PanickingModule,
        SilentModule, ThreadedEchoModule,
    };
    use crate::traits::Module;
    use std::sync::mpsc;
    use std::time::Duration;

    fn compile(template: &str, module: Arc<dyn Module>) -> CompiledProcessor {
        let shape = CallShape::build(template, None, &[module]).unwrap();
        CompiledProcessor::new("test", shape)
    }

    /// Invoke and collect every callback delivery that arrives within a short window.
    fn deliveries(processor: &CompiledProcessor, input: &str, options: &Options) -> Vec<ProcessorOutcome> {
        let (tx, rx) = mpsc::channel();
        processor.process(input, options, move |outcome| {
            let _ = tx.send(outcome);
        });
        let mut collected = Vec::new();
        while let Ok(outcome) = rx.recv_timeout(Duration::from_millis(200)) {
            collected.push(outcome);
        }
        collected
    }

    #[test]
    fn test_identity_passes_input_through() {
        let processor = CompiledProcessor::identity("noop");
        let mut options = Options::new();
        options.insert("ignored".to_string(), serde_json::json!(true));

        let outcomes = deliveries(&processor, "hello", &options);
        assert_eq!(outcomes, vec![Ok(Some("hello".to_string()))]);
    }

    #[test]
    fn test_sync_call_returns_value() {
        let processor = compile("echo(input)", Arc::new(EchoModule));
        assert!(!processor.is_async());
        let outcomes = deliveries(&processor, "abc", &Options::new());
        assert_eq!(outcomes, vec![Ok(Some("abc".to_string()))]);
    }

    #[test]
    fn test_sync_failures_reported_once() {
        struct TestCase {
            name: &'static str,
            template: &'static str,
            module: Arc<dyn Module>,
            expected: EngineError,
        }

        let test_cases = vec![
            TestCase {
                name: "engine error",
                template: "run(input)",
                module: Arc::new(FailingModule),
                expected: EngineError::failed("failing", "simulated engine failure"),
            },
            TestCase {
                name: "engine panic",
                template: "run(input)",
                module: Arc::new(PanickingModule),
                expected: EngineError::Panicked("engine exploded".to_string()),
            },
            TestCase {
                name: "unknown member",
                template: "missing(input)",
                module: Arc::new(EchoModule),
                expected: EngineError::UnknownMember {
                    target: "echo".to_string(),
                    member: "missing".to_string(),
                },
            },
            TestCase {
                name: "module returned as output",
                template: "$0",
                module: Arc::new(EchoModule),
                expected: EngineError::InvalidOutput { kind: "module" },
            },
        ];

        for test_case in test_cases {
            let processor = compile(test_case.template, test_case.module);
            let outcomes = deliveries(&processor, "abc", &Options::new());
            assert_eq!(
                outcomes,
                vec![Err(test_case.expected.clone())],
                "Test case '{}' failed",
                test_case.name
            );
        }
    }

    #[test]
    fn test_async_engine_completes_from_another_thread() {
        let processor = compile("echo(input, options, callback)", Arc::new(ThreadedEchoModule));
        assert!(processor.is_async());
        let outcomes = deliveries(&processor, "later", &Options::new());
        assert_eq!(outcomes, vec![Ok(Some("later".to_string()))]);
    }

    #[test]
    fn test_async_synchronous_throw_reported_once() {
        let processor = compile("run(input, callback)", Arc::new(FailingModule));
        let outcomes = deliveries(&processor, "abc", &Options::new());
        assert_eq!(
            outcomes,
            vec![Err(EngineError::failed("failing", "simulated engine failure"))]
        );
    }

    #[test]
    fn test_async_callback_is_never_delivered_twice() {
        let processor = compile("twice(input, callback)", Arc::new(CallbackTwiceModule));
        let outcomes = deliveries(&processor, "abc", &Options::new());
        assert_eq!(outcomes, vec![Ok(Some("abc".to_string()))]);

        let processor = compile("run(input, callback)", Arc::new(LateFailureModule));
        let outcomes = deliveries(&processor, "abc", &Options::new());
        assert_eq!(outcomes, vec![Ok(Some("abc".to_string()))]);
    }

    #[test]
    fn test_callback_panic_reaches_caller() {
        struct TestCase {
            name: &'static str,
            template: &'static str,
            module: Arc<dyn Module>,
        }

        let test_cases = vec![
            TestCase {
                name: "sync engine",
                template: "echo(input)",
                module: Arc::new(EchoModule),
            },
            TestCase {
                name: "async engine completing synchronously",
                template: "twice(input, callback)",
                module: Arc::new(CallbackTwiceModule),
            },
        ];

        for test_case in test_cases {
            let processor = compile(test_case.template, test_case.module);
            let raised = panic::catch_unwind(AssertUnwindSafe(|| {
                processor.process_default("abc", |_| panic!("callback bug"));
            }));

            let payload = match raised {
                Err(payload) => payload,
                Ok(()) => panic!("Test case '{}': callback panic was swallowed", test_case.name),
            };
            assert_eq!(
                panic_message(payload.as_ref()),
                "callback bug",
                "Test case '{}' failed",
                test_case.name
            );
        }
    }

    #[test]
    fn test_polymorphic_call_matches_explicit_options() {
        let processor = compile("echo(input)", Arc::new(EchoModule));
        let (tx, rx) = mpsc::channel();
        let tx_default = tx.clone();

        processor.process_default("same", move |outcome| tx_default.send(outcome).unwrap());
        processor.process("same", &Options::new(), move |outcome| tx.send(outcome).unwrap());

        let first = rx.recv().unwrap();
        let second = rx.recv().unwrap();
        assert_eq!(first, second);
    }

    #[tokio::test]
    async fn test_execute_awaits_async_engine() {
        let processor = compile("echo(input, options, callback)", Arc::new(ThreadedEchoModule));
        let output = processor
            .execute("awaited".to_string(), Options::new())
            .await
            .unwrap();
        assert_eq!(output, Some("awaited".to_string()));
        assert_eq!(processor.name(), "test");
    }

    #[tokio::test]
    async fn test_execute_reports_abandoned_completion() {
        let processor = compile("run(input, callback)", Arc::new(SilentModule));
        let result = processor.execute("abc".to_string(), Options::new()).await;
        assert_eq!(result, Err(EngineError::Abandoned("test".to_string())));
    }
}

// SPDX-FileCopyrightText: © 2026 fnbridge contributors
// SPDX-License-Identifier: MIT

use crate::environment::Environment;
use crate::error::RuntimeError;
use crate::event::Event;
use crate::handler::Handler;
use crate::protocol;
use crate::runtime::Runtime;

/// Options of the invocation loop.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoopSettings {
    /// Stop cleanly after this many invocations. Unlimited if `None`.
    pub max_invocations: Option<usize>,
    /// Set `_X_AMZN_TRACE_ID` to the trace id of each invocation before
    /// dispatching it.
    pub export_trace_id: bool,
}

/// Serve invocations with `handler` until a fatal error occurs, using the
/// process environment.
pub fn run<H: Handler>(handler: H) -> Result<(), RuntimeError> {
    run_with_settings(|key| std::env::var(key).ok(), handler, &LoopSettings::default())
}

/// Like `run()`, with the configuration read through `lookup`.
pub fn run_with_settings<F, H>(lookup: F, handler: H, settings: &LoopSettings) -> Result<(), RuntimeError>
where
    F: Fn(&str) -> Option<String>,
    H: Handler,
{
    let runtime = Runtime::new(resolve(lookup)?)?;
    runtime.serve(handler, settings)
}

/// Like `run_with_settings()`, with the handler built by `init` once the
/// configuration is known.
///
/// A failing `init` is reported to the control plane as an initialization
/// error and no invocation is requested.
pub fn run_with_init<F, I, H>(lookup: F, init: I, settings: &LoopSettings) -> Result<(), RuntimeError>
where
    F: Fn(&str) -> Option<String>,
    I: FnOnce(&Environment) -> anyhow::Result<H>,
    H: Handler,
{
    let runtime = Runtime::new(resolve(lookup)?)?;
    let handler = match init(runtime.environment()) {
        Ok(handler) => handler,
        Err(err) => {
            if let Err(report_err) = runtime.init_error(&err) {
                log::error!("{}", report_err);
            }
            return Err(RuntimeError::Startup(format!("handler initialization failed: {}", err)));
        }
    };
    runtime.serve(handler, settings)
}

fn resolve<F>(lookup: F) -> Result<Environment, RuntimeError>
where
    F: Fn(&str) -> Option<String>,
{
    Environment::resolve_with(lookup).map_err(|err| {
        log::error!("{}", err);
        err
    })
}

impl Runtime {
    /// Poll, dispatch, report and release, one invocation at a time.
    ///
    /// Returns an error only when the next invocation cannot be obtained;
    /// handler and reporting failures are confined to their invocation.
    pub fn serve<H: Handler>(&self, handler: H, settings: &LoopSettings) -> Result<(), RuntimeError> {
        let mut handler = handler;
        let mut events = match settings.max_invocations {
            Some(max_invocations) => self.events_limited(max_invocations),
            None => self.events(),
        };

        let mut served: usize = 0;
        loop {
            let mut event = match events.next() {
                Ok(Some(event)) => event,
                Ok(None) => {
                    log::info!("served {} invocations, terminating", served);
                    return Ok(());
                }
                Err(err) => {
                    log::error!("{}: terminating after {} invocations", err, served);
                    return Err(err);
                }
            };
            dispatch(&mut handler, &mut event, settings);
            event.release();
            served += 1;
        }
    }
}

fn dispatch<H: Handler + ?Sized>(handler: &mut H, event: &mut Event<'_>, settings: &LoopSettings) {
    if settings.export_trace_id {
        std::env::set_var(protocol::TRACE_ID_ENV_VAR, event.context().trace_id);
    }

    let started = std::time::Instant::now();
    let outcome = {
        let ctx = event.context();
        let data = event.data();
        match std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| handler.handle(&ctx, data))) {
            Ok(res) => res,
            Err(panic) => Err(anyhow::anyhow!("handler panicked: {}", panic_message(panic.as_ref()))),
        }
    };

    let report = match outcome {
        Ok(payload) => {
            log::debug!("invocation {} handled in {:?}", event.request_id(), started.elapsed());
            event.response(&payload)
        }
        Err(err) => {
            log::warn!("invocation {} failed in {:?}: {:#}", event.request_id(), started.elapsed(), err);
            event.err(&err)
        }
    };
    if let Err(err) = report {
        log::error!("invocation {} lost: {}", event.request_id(), err);
    }
}

fn panic_message(payload: &(dyn std::any::Any + Send)) -> String {
    if let Some(msg) = payload.downcast_ref::<&str>() {
        msg.to_string()
    } else if let Some(msg) = payload.downcast_ref::<String>() {
        msg.clone()
    } else {
        String::from("unknown panic payload")
    }
}

// SPDX-FileCopyrightText: © 2026 fnbridge contributors
// SPDX-License-Identifier: MIT

use fnbridge_runtime::{Context, Handler};

pub const HANDLER_NAMES: [&str; 5] = ["echo", "uppercase", "fail", "counter", "deadline"];
pub const DEFAULT_HANDLER: &str = "echo";

/// Name of the handler to serve: `explicit` if given, else the handler
/// configured in `environment`, else `echo`.
pub fn handler_name<'a>(explicit: Option<&'a str>, environment: &'a fnbridge_runtime::Environment) -> &'a str {
    explicit.or(environment.handler.as_deref()).unwrap_or(DEFAULT_HANDLER)
}

/// Return the handler selected by `handler_name()`.
pub fn select(explicit: Option<&str>, environment: &fnbridge_runtime::Environment) -> anyhow::Result<Box<dyn Handler>> {
    let name = handler_name(explicit, environment);
    log::info!("starting handler '{}' of function {}", name, environment.function_name);
    by_name(name)
}

/// Return the handler called `name`.
pub fn by_name(name: &str) -> anyhow::Result<Box<dyn Handler>> {
    Ok(match name {
        "echo" => Box::new(fnbridge_runtime::wrap(echo)),
        "uppercase" => Box::new(fnbridge_runtime::wrap(uppercase)),
        "fail" => Box::new(fnbridge_runtime::wrap(fail)),
        "counter" => Box::new(Counter::default()),
        "deadline" => Box::new(fnbridge_runtime::wrap(deadline)),
        _ => {
            anyhow::bail!(
                "no handler named '{}' available, available handlers are: {}",
                name,
                HANDLER_NAMES.join(", ")
            );
        }
    })
}

pub fn echo(_ctx: &Context<'_>, event: &[u8]) -> anyhow::Result<Vec<u8>> {
    Ok(event.to_vec())
}

pub fn uppercase(_ctx: &Context<'_>, event: &[u8]) -> anyhow::Result<Vec<u8>> {
    let text = std::str::from_utf8(event).map_err(|err| anyhow::anyhow!("InvalidUtf8: {}", err))?;
    Ok(text.to_uppercase().into_bytes())
}

/// Always fails, to exercise the error path of the runtime.
pub fn fail(_ctx: &Context<'_>, _event: &[u8]) -> anyhow::Result<Vec<u8>> {
    anyhow::bail!("Demo")
}

#[derive(serde::Serialize)]
struct DeadlineReply<'a> {
    request_id: &'a str,
    deadline_ms: u64,
    remaining_ms: u128,
}

pub fn deadline(ctx: &Context<'_>, _event: &[u8]) -> anyhow::Result<Vec<u8>> {
    Ok(serde_json::to_vec(&DeadlineReply {
        request_id: ctx.request_id,
        deadline_ms: ctx.deadline_ms,
        remaining_ms: ctx.remaining_time().as_millis(),
    })?)
}

#[derive(serde::Serialize)]
struct CounterReply<'a> {
    function_name: &'a str,
    request_id: &'a str,
    invocations: u64,
    bytes: u64,
}

/// Counts the invocations and bytes served by this execution environment.
#[derive(Debug, Default)]
pub struct Counter {
    invocations: u64,
    bytes: u64,
}

impl Handler for Counter {
    fn handle(&mut self, ctx: &Context<'_>, event: &[u8]) -> anyhow::Result<Vec<u8>> {
        self.invocations += 1;
        self.bytes += event.len() as u64;
        Ok(serde_json::to_vec(&CounterReply {
            function_name: ctx.function_name(),
            request_id: ctx.request_id,
            invocations: self.invocations,
            bytes: self.bytes,
        })?)
    }
}

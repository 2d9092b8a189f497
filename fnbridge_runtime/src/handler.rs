// SPDX-FileCopyrightText: © 2026 fnbridge contributors
// SPDX-License-Identifier: MIT

use crate::context::Context;

/// User logic invoked once per invocation.
///
/// The payload is passed as raw bytes: decoding it is up to the
/// implementation. Returning an error fails only the current invocation.
pub trait Handler {
    fn handle(&mut self, ctx: &Context<'_>, event: &[u8]) -> anyhow::Result<Vec<u8>>;
}

/// Adapter turning a plain function or closure into a `Handler`.
pub struct FnHandler<F> {
    fun: F,
}

impl<F> Handler for FnHandler<F>
where
    F: for<'a, 'b> FnMut(&'a Context<'b>, &'a [u8]) -> anyhow::Result<Vec<u8>>,
{
    fn handle(&mut self, ctx: &Context<'_>, event: &[u8]) -> anyhow::Result<Vec<u8>> {
        (self.fun)(ctx, event)
    }
}

/// Wrap `fun` so that it can be passed wherever a `Handler` is expected.
///
/// ```
/// let echo = fnbridge_runtime::wrap(|_ctx, event| Ok(event.to_vec()));
/// # let _ = echo;
/// ```
pub fn wrap<F>(fun: F) -> FnHandler<F>
where
    F: for<'a, 'b> FnMut(&'a Context<'b>, &'a [u8]) -> anyhow::Result<Vec<u8>>,
{
    FnHandler { fun }
}

impl<H: Handler + ?Sized> Handler for Box<H> {
    fn handle(&mut self, ctx: &Context<'_>, event: &[u8]) -> anyhow::Result<Vec<u8>> {
        (**self).handle(ctx, event)
    }
}

impl<H: Handler + ?Sized> Handler for &mut H {
    fn handle(&mut self, ctx: &Context<'_>, event: &[u8]) -> anyhow::Result<Vec<u8>> {
        (**self).handle(ctx, event)
    }
}

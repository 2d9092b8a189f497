// SPDX-FileCopyrightText: © 2026 fnbridge contributors
// SPDX-License-Identifier: MIT

//! Client of the serverless runtime API.
//!
//! The runtime long-polls the control plane for invocations, passes each
//! one to a user [`Handler`], and reports the result back, strictly one
//! invocation at a time:
//!
//! ```no_run
//! fn main() -> anyhow::Result<()> {
//!     fnbridge_runtime::run(fnbridge_runtime::wrap(|_ctx, event| Ok(event.to_vec())))?;
//!     Ok(())
//! }
//! ```

/// Per-invocation metadata handed to handlers.
pub mod context;
pub use context::Context;

/// Resolution of the process configuration.
pub mod environment;
pub use environment::Environment;

pub mod error;
pub use error::RuntimeError;

/// A single invocation and the reporting of its outcome.
pub mod event;
pub use event::Event;

pub mod event_iterator;
pub use event_iterator::EventIterator;

/// The contract implemented by user code.
pub mod handler;
pub use handler::{wrap, FnHandler, Handler};

/// The invocation loop and its entry points.
pub mod main_loop;
pub use main_loop::{run, run_with_init, run_with_settings, LoopSettings};

pub mod protocol;

pub mod runtime;
pub use runtime::Runtime;

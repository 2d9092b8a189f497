// SPDX-FileCopyrightText: © 2026 fnbridge contributors
// SPDX-License-Identifier: MIT

/// Failures of the runtime itself, as opposed to errors returned by handlers.
///
/// `Startup` and `Protocol` terminate the invocation loop: the execution
/// environment must be recycled. `Reporting` is confined to a single
/// invocation and the loop keeps serving.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RuntimeError {
    /// Missing or malformed configuration, or a handler that could not be
    /// constructed.
    Startup(String),
    /// The next-invocation call failed or returned something unusable.
    Protocol(String),
    /// The response or error report of one invocation was not delivered.
    Reporting(String),
}

impl RuntimeError {
    pub fn is_fatal(&self) -> bool {
        match self {
            RuntimeError::Startup(_) | RuntimeError::Protocol(_) => true,
            RuntimeError::Reporting(_) => false,
        }
    }
}

impl std::fmt::Display for RuntimeError {
    fn fmt(&self, fmt: &mut std::fmt::Formatter<'_>) -> Result<(), std::fmt::Error> {
        match self {
            RuntimeError::Startup(msg) => write!(fmt, "startup error: {}", msg),
            RuntimeError::Protocol(msg) => write!(fmt, "protocol error: {}", msg),
            RuntimeError::Reporting(msg) => write!(fmt, "reporting error: {}", msg),
        }
    }
}

impl std::error::Error for RuntimeError {}

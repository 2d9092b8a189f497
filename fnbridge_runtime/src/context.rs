// SPDX-FileCopyrightText: © 2026 fnbridge contributors
// SPDX-License-Identifier: MIT

/// Read-only view of the metadata of one invocation.
///
/// All references point into the buffers of the `Event` that produced the
/// context, so a context cannot outlive its event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Context<'a> {
    pub request_id: &'a str,
    /// Epoch milliseconds by which the invocation should complete.
    pub deadline_ms: u64,
    pub invoked_function_arn: &'a str,
    pub trace_id: &'a str,
    /// Raw JSON of the mobile client context, if the caller sent one.
    pub client_context: Option<&'a str>,
    /// Raw JSON of the caller identity, if any.
    pub identity: Option<&'a str>,
    pub environment: &'a crate::environment::Environment,
}

impl<'a> Context<'a> {
    pub fn deadline(&self) -> std::time::SystemTime {
        std::time::UNIX_EPOCH + std::time::Duration::from_millis(self.deadline_ms)
    }

    /// Time left until the deadline, zero if already past.
    pub fn remaining_time(&self) -> std::time::Duration {
        self.deadline()
            .duration_since(std::time::SystemTime::now())
            .unwrap_or(std::time::Duration::ZERO)
    }

    pub fn function_name(&self) -> &'a str {
        &self.environment.function_name
    }

    pub fn memory_size(&self) -> u32 {
        self.environment.memory_size
    }

    pub fn function_version(&self) -> &'a str {
        &self.environment.function_version
    }
}

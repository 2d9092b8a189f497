// SPDX-FileCopyrightText: © 2026 fnbridge contributors
// SPDX-License-Identifier: MIT

use crate::environment::Environment;
use crate::error::RuntimeError;
use crate::event_iterator::EventIterator;
use crate::protocol;

/// Client of the runtime API of one execution environment.
///
/// Holds the HTTP client and the base URL for the whole life of the
/// process; both are released when the runtime is dropped.
#[derive(Debug)]
pub struct Runtime {
    client: reqwest::blocking::Client,
    base_url: String,
    environment: Environment,
}

impl Runtime {
    /// Create a runtime with a client suited to long polling: a single
    /// pooled connection and no request timeout.
    pub fn new(environment: Environment) -> Result<Self, RuntimeError> {
        let client = reqwest::blocking::Client::builder()
            .timeout(None::<std::time::Duration>)
            .pool_max_idle_per_host(1)
            .user_agent(protocol::user_agent())
            .build()
            .map_err(|err| RuntimeError::Startup(format!("cannot create the HTTP client: {}", err)))?;
        Ok(Self::with_client(environment, client))
    }

    pub fn with_client(environment: Environment, client: reqwest::blocking::Client) -> Self {
        let base_url = environment.base_url();
        log::info!(
            "runtime API at {}, function {} ({} MB, version {})",
            base_url,
            environment.function_name,
            environment.memory_size,
            environment.function_version
        );
        Self {
            client,
            base_url,
            environment,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn environment(&self) -> &Environment {
        &self.environment
    }

    pub(crate) fn client(&self) -> &reqwest::blocking::Client {
        &self.client
    }

    /// Iterate over the invocations, without end.
    pub fn events(&self) -> EventIterator<'_> {
        EventIterator::new(self, None)
    }

    /// Iterate over at most `max_invocations` invocations.
    pub fn events_limited(&self, max_invocations: usize) -> EventIterator<'_> {
        EventIterator::new(self, Some(max_invocations))
    }

    /// Report a failure that occurred before the first invocation was
    /// requested, e.g., while constructing the handler.
    pub fn init_error<E>(&self, error: &E) -> Result<(), RuntimeError>
    where
        E: std::fmt::Display + ?Sized,
    {
        let url = protocol::init_error_url(&self.base_url);
        log::error!("initialization failed: {}", error);
        let body = protocol::ErrorReport::unknown_reason(error).to_json()?;
        crate::event::send_report(crate::event::error_request(&self.client, &url, body), &url)
    }
}

impl Drop for Runtime {
    fn drop(&mut self) {
        log::debug!("runtime for {} released", self.base_url);
    }
}

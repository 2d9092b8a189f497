// SPDX-FileCopyrightText: © 2026 fnbridge contributors
// SPDX-License-Identifier: MIT

use crate::context::Context;
use crate::error::RuntimeError;
use crate::protocol;

/// One invocation received from the control plane.
///
/// The event owns its payload and a copy of every metadata header, and it
/// borrows the `Runtime` to report the outcome. It must be reported once,
/// with either `response()` or `err()`, then released.
#[derive(Debug)]
pub struct Event<'a> {
    runtime: &'a crate::runtime::Runtime,
    request_id: String,
    deadline_ms: u64,
    invoked_function_arn: String,
    trace_id: String,
    client_context: Option<String>,
    identity: Option<String>,
    data: Vec<u8>,
    reported: bool,
}

/// Metadata copied out of the next-invocation response headers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventMetadata {
    pub request_id: String,
    pub deadline_ms: u64,
    pub invoked_function_arn: String,
    pub trace_id: String,
    pub client_context: Option<String>,
    pub identity: Option<String>,
}

impl<'a> Event<'a> {
    pub(crate) fn new(runtime: &'a crate::runtime::Runtime, metadata: EventMetadata, data: Vec<u8>) -> Self {
        log::debug!("invocation {} acquired, {} bytes", metadata.request_id, data.len());
        Self {
            runtime,
            request_id: metadata.request_id,
            deadline_ms: metadata.deadline_ms,
            invoked_function_arn: metadata.invoked_function_arn,
            trace_id: metadata.trace_id,
            client_context: metadata.client_context,
            identity: metadata.identity,
            data,
            reported: false,
        }
    }

    pub fn context(&self) -> Context<'_> {
        Context {
            request_id: &self.request_id,
            deadline_ms: self.deadline_ms,
            invoked_function_arn: &self.invoked_function_arn,
            trace_id: &self.trace_id,
            client_context: self.client_context.as_deref(),
            identity: self.identity.as_deref(),
            environment: self.runtime.environment(),
        }
    }

    pub fn data(&self) -> &[u8] {
        &self.data
    }

    pub fn request_id(&self) -> &str {
        &self.request_id
    }

    /// Whether `response()` or `err()` has already been called.
    pub fn is_reported(&self) -> bool {
        self.reported
    }

    /// Report the successful result of the invocation.
    pub fn response(&mut self, payload: &[u8]) -> Result<(), RuntimeError> {
        self.mark_reported()?;
        let url = protocol::response_url(self.runtime.base_url(), &self.request_id)?;
        log::debug!("invocation {} succeeded, posting {} bytes", self.request_id, payload.len());
        let request = self.runtime.client().post(url.clone()).body(payload.to_vec());
        send_report(request, url.as_str())
    }

    /// Report the failure of the invocation.
    ///
    /// The displayed `error` becomes the error message; the type is always
    /// `Runtime.UnknownReason`.
    pub fn err<E>(&mut self, error: &E) -> Result<(), RuntimeError>
    where
        E: std::fmt::Display + ?Sized,
    {
        self.mark_reported()?;
        let url = protocol::error_url(self.runtime.base_url(), &self.request_id)?;
        log::debug!("invocation {} failed: {}", self.request_id, error);
        let body = protocol::ErrorReport::unknown_reason(error).to_json()?;
        send_report(error_request(self.runtime.client(), url.as_str(), body), url.as_str())
    }

    /// Release the payload and metadata buffers.
    pub fn release(self) {
        drop(self)
    }

    fn mark_reported(&mut self) -> Result<(), RuntimeError> {
        if self.reported {
            return Err(RuntimeError::Reporting(format!("invocation {} has already been reported", self.request_id)));
        }
        self.reported = true;
        Ok(())
    }
}

impl Drop for Event<'_> {
    fn drop(&mut self) {
        if !self.reported {
            log::warn!("invocation {} released without being reported", self.request_id);
        }
        log::debug!("invocation {} released", self.request_id);
    }
}

pub(crate) fn error_request(client: &reqwest::blocking::Client, url: &str, body: String) -> reqwest::blocking::RequestBuilder {
    client
        .post(url)
        .header(protocol::FUNCTION_ERROR_TYPE_HEADER, protocol::UNKNOWN_REASON_ERROR_TYPE)
        .header(reqwest::header::CONTENT_TYPE, "application/json")
        .body(body)
}

pub(crate) fn send_report(request: reqwest::blocking::RequestBuilder, url: &str) -> Result<(), RuntimeError> {
    match request.send() {
        Ok(response) => {
            let status = response.status();
            if status.is_success() {
                Ok(())
            } else {
                Err(RuntimeError::Reporting(format!(
                    "POST {} returned status {}: {}",
                    url,
                    status,
                    response.text().unwrap_or_default()
                )))
            }
        }
        Err(err) => Err(RuntimeError::Reporting(format!("POST {} failed: {}", url, err))),
    }
}

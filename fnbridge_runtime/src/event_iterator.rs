// SPDX-FileCopyrightText: © 2026 fnbridge contributors
// SPDX-License-Identifier: MIT

use crate::error::RuntimeError;
use crate::event::{Event, EventMetadata};
use crate::protocol;

/// Source of invocations, one at a time.
///
/// `next()` lends the event it returns: the iterator stays borrowed until
/// the event is released, so at most one event is alive.
pub struct EventIterator<'r> {
    runtime: &'r crate::runtime::Runtime,
    remaining: Option<usize>,
}

impl<'r> EventIterator<'r> {
    pub(crate) fn new(runtime: &'r crate::runtime::Runtime, remaining: Option<usize>) -> Self {
        Self { runtime, remaining }
    }

    /// Wait for the next invocation.
    ///
    /// This is a long poll: the call blocks until the control plane hands
    /// out an invocation. `Ok(None)` is only returned by a limited iterator
    /// that has been exhausted. Every error is fatal.
    pub fn next(&mut self) -> Result<Option<Event<'_>>, RuntimeError> {
        if let Some(remaining) = self.remaining.as_mut() {
            if *remaining == 0 {
                log::info!("invocation limit reached");
                return Ok(None);
            }
            *remaining -= 1;
        }

        let url = protocol::next_invocation_url(self.runtime.base_url());
        let response = self
            .runtime
            .client()
            .get(&url)
            .send()
            .map_err(|err| RuntimeError::Protocol(format!("GET {} failed: {}", url, err)))?;

        let status = response.status();
        if !status.is_success() {
            return Err(RuntimeError::Protocol(format!("GET {} returned status {}", url, status)));
        }

        let metadata = parse_metadata(response.headers())?;
        let declared_length = response.content_length();
        let body = response
            .bytes()
            .map_err(|err| RuntimeError::Protocol(format!("cannot read the payload of invocation {}: {}", metadata.request_id, err)))?;
        if let Some(declared_length) = declared_length {
            if declared_length != body.len() as u64 {
                return Err(RuntimeError::Protocol(format!(
                    "invocation {} declared {} bytes but {} were received",
                    metadata.request_id,
                    declared_length,
                    body.len()
                )));
            }
        }

        Ok(Some(Event::new(self.runtime, metadata, body.to_vec())))
    }
}

/// Copy the invocation metadata out of the next-invocation headers.
///
/// Header names are matched case-insensitively.
pub fn parse_metadata(headers: &reqwest::header::HeaderMap) -> Result<EventMetadata, RuntimeError> {
    let request_id = required_header(headers, protocol::REQUEST_ID_HEADER)?;
    if request_id.is_empty() {
        return Err(RuntimeError::Protocol(format!("empty {} header", protocol::REQUEST_ID_HEADER)));
    }

    let deadline = required_header(headers, protocol::DEADLINE_MS_HEADER)?;
    let deadline_ms = deadline
        .trim()
        .parse::<u64>()
        .map_err(|err| RuntimeError::Protocol(format!("invalid {} header '{}': {}", protocol::DEADLINE_MS_HEADER, deadline, err)))?;

    Ok(EventMetadata {
        request_id,
        deadline_ms,
        invoked_function_arn: required_header(headers, protocol::INVOKED_FUNCTION_ARN_HEADER)?,
        trace_id: required_header(headers, protocol::TRACE_ID_HEADER)?,
        client_context: optional_header(headers, protocol::CLIENT_CONTEXT_HEADER)?,
        identity: optional_header(headers, protocol::COGNITO_IDENTITY_HEADER)?,
    })
}

fn required_header(headers: &reqwest::header::HeaderMap, name: &str) -> Result<String, RuntimeError> {
    match optional_header(headers, name)? {
        Some(val) => Ok(val),
        None => Err(RuntimeError::Protocol(format!("missing {} header", name))),
    }
}

fn optional_header(headers: &reqwest::header::HeaderMap, name: &str) -> Result<Option<String>, RuntimeError> {
    match headers.get(name) {
        Some(val) => match val.to_str() {
            Ok(val) => Ok(Some(val.to_string())),
            Err(err) => Err(RuntimeError::Protocol(format!("invalid {} header: {}", name, err))),
        },
        None => Ok(None),
    }
}

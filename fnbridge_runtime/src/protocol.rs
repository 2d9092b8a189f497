// SPDX-FileCopyrightText: © 2026 fnbridge contributors
// SPDX-License-Identifier: MIT

//! Wire-level constants and documents of the runtime API.

pub const API_PREFIX: &str = "2018-06-01/runtime";

pub const REQUEST_ID_HEADER: &str = "Lambda-Runtime-Aws-Request-Id";
pub const DEADLINE_MS_HEADER: &str = "Lambda-Runtime-Deadline-Ms";
pub const INVOKED_FUNCTION_ARN_HEADER: &str = "Lambda-Runtime-Invoked-Function-Arn";
pub const TRACE_ID_HEADER: &str = "Lambda-Runtime-Trace-Id";
pub const CLIENT_CONTEXT_HEADER: &str = "Lambda-Runtime-Client-Context";
pub const COGNITO_IDENTITY_HEADER: &str = "Lambda-Runtime-Cognito-Identity";
pub const FUNCTION_ERROR_TYPE_HEADER: &str = "Lambda-Runtime-Function-Error-Type";

pub const UNKNOWN_REASON_ERROR_TYPE: &str = "Runtime.UnknownReason";

/// Process variable read by tracing SDKs to find the current trace.
pub const TRACE_ID_ENV_VAR: &str = "_X_AMZN_TRACE_ID";

pub fn next_invocation_url(base_url: &str) -> String {
    format!("{}/invocation/next", base_url)
}

pub fn response_url(base_url: &str, request_id: &str) -> Result<reqwest::Url, crate::error::RuntimeError> {
    invocation_url(base_url, request_id, "response")
}

pub fn error_url(base_url: &str, request_id: &str) -> Result<reqwest::Url, crate::error::RuntimeError> {
    invocation_url(base_url, request_id, "error")
}

/// The request id is appended as a single, percent-encoded path segment.
fn invocation_url(base_url: &str, request_id: &str, action: &str) -> Result<reqwest::Url, crate::error::RuntimeError> {
    let invalid = |detail: String| crate::error::RuntimeError::Reporting(format!("invalid base URL '{}': {}", base_url, detail));
    let mut url = reqwest::Url::parse(base_url).map_err(|err| invalid(err.to_string()))?;
    url.path_segments_mut()
        .map_err(|_| invalid(String::from("cannot be a base")))?
        .pop_if_empty()
        .push("invocation")
        .push(request_id)
        .push(action);
    Ok(url)
}

pub fn init_error_url(base_url: &str) -> String {
    format!("{}/init/error", base_url)
}

pub fn user_agent() -> String {
    format!("fnbridge/{}", env!("CARGO_PKG_VERSION"))
}

/// Body of the error and init-error calls.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorReport {
    pub error_message: String,
    pub error_type: String,
    pub stack_trace: Vec<String>,
}

impl ErrorReport {
    /// Build the report of `error`. No call stack is captured: the trace is
    /// always empty.
    pub fn unknown_reason<E>(error: &E) -> Self
    where
        E: std::fmt::Display + ?Sized,
    {
        Self {
            error_message: error.to_string(),
            error_type: UNKNOWN_REASON_ERROR_TYPE.to_string(),
            stack_trace: vec![],
        }
    }

    pub fn to_json(&self) -> Result<String, crate::error::RuntimeError> {
        serde_json::to_string(self).map_err(|err| crate::error::RuntimeError::Reporting(format!("cannot serialize error report: {}", err)))
    }
}

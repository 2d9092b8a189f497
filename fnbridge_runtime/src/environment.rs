// SPDX-FileCopyrightText: © 2026 fnbridge contributors
// SPDX-License-Identifier: MIT

use crate::error::RuntimeError;

pub const RUNTIME_API_VAR: &str = "AWS_LAMBDA_RUNTIME_API";
pub const FUNCTION_NAME_VAR: &str = "AWS_LAMBDA_FUNCTION_NAME";
pub const FUNCTION_MEMORY_SIZE_VAR: &str = "AWS_LAMBDA_FUNCTION_MEMORY_SIZE";
pub const FUNCTION_VERSION_VAR: &str = "AWS_LAMBDA_FUNCTION_VERSION";
pub const LOG_GROUP_NAME_VAR: &str = "AWS_LAMBDA_LOG_GROUP_NAME";
pub const LOG_STREAM_NAME_VAR: &str = "AWS_LAMBDA_LOG_STREAM_NAME";
pub const HANDLER_VAR: &str = "_HANDLER";

pub const DEFAULT_FUNCTION_NAME: &str = "unknown";
pub const DEFAULT_MEMORY_SIZE: u32 = 128;
pub const DEFAULT_FUNCTION_VERSION: &str = "$LATEST";

/// Process configuration needed to address the control plane.
///
/// Resolved once at startup and never modified afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Environment {
    /// Control plane address as `host:port`.
    pub runtime_api: String,
    pub function_name: String,
    /// Memory available to the function, in MB.
    pub memory_size: u32,
    pub function_version: String,
    pub log_group_name: Option<String>,
    pub log_stream_name: Option<String>,
    /// Handler selector, as configured for the function.
    pub handler: Option<String>,
}

impl Environment {
    /// Read the configuration from the process environment.
    pub fn resolve() -> Result<Self, RuntimeError> {
        Self::resolve_with(|key| std::env::var(key).ok())
    }

    /// Read the configuration through `lookup`, which maps a variable name
    /// to its value, if set.
    pub fn resolve_with<F>(lookup: F) -> Result<Self, RuntimeError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        let runtime_api = match non_empty(RUNTIME_API_VAR) {
            Some(val) => val.trim().to_string(),
            None => {
                return Err(RuntimeError::Startup(format!("{} is not set", RUNTIME_API_VAR)));
            }
        };

        // Present but empty is malformed, not absent.
        let memory_size = match lookup(FUNCTION_MEMORY_SIZE_VAR) {
            Some(val) => match val.trim().parse::<u32>() {
                Ok(size) => size,
                Err(err) => {
                    return Err(RuntimeError::Startup(format!(
                        "invalid {} '{}': {}",
                        FUNCTION_MEMORY_SIZE_VAR, val, err
                    )));
                }
            },
            None => DEFAULT_MEMORY_SIZE,
        };

        Ok(Self {
            runtime_api,
            function_name: non_empty(FUNCTION_NAME_VAR).unwrap_or_else(|| DEFAULT_FUNCTION_NAME.to_string()),
            memory_size,
            function_version: non_empty(FUNCTION_VERSION_VAR).unwrap_or_else(|| DEFAULT_FUNCTION_VERSION.to_string()),
            log_group_name: non_empty(LOG_GROUP_NAME_VAR),
            log_stream_name: non_empty(LOG_STREAM_NAME_VAR),
            handler: non_empty(HANDLER_VAR),
        })
    }

    /// Base URL of the runtime API on the control plane.
    pub fn base_url(&self) -> String {
        format!("http://{}/{}", self.runtime_api, crate::protocol::API_PREFIX)
    }
}

#[cfg(test)]
impl Default for Environment {
    fn default() -> Self {
        Self {
            runtime_api: String::from("127.0.0.1:9001"),
            function_name: DEFAULT_FUNCTION_NAME.to_string(),
            memory_size: DEFAULT_MEMORY_SIZE,
            function_version: DEFAULT_FUNCTION_VERSION.to_string(),
            log_group_name: None,
            log_stream_name: None,
            handler: None,
        }
    }
}

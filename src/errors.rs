// Copyright 2026 BadCompany
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

// Error types - credentials never end up in messages

use crate::constants::SESSION_ERRORS;
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Main error type for the client
#[derive(Error, Debug)]
pub enum ZabbixError {
    /// Transport failure: DNS, refused connection, timeout, TLS, truncated body
    #[error("HTTP connection problem: {0}")]
    Connection(String),

    /// Non-success HTTP status without a body to decode
    #[error("HTTP error {status}")]
    Http { status: u16 },

    /// Response body does not follow the JSON-RPC contract
    #[error("Protocol error: {0}")]
    Protocol(String),

    /// The server answered with an `error` envelope
    #[error("{0}")]
    Api(#[from] ApiError),

    /// Missing or rejected session
    #[error("Authentication error: {0}")]
    Authentication(#[from] AuthError),

    /// Invalid client construction parameters
    #[error("Configuration error: {0}")]
    Configuration(String),
}

/// Session and login errors
#[derive(Error, Debug)]
pub enum AuthError {
    /// A call that needs a token was attempted before `login`
    #[error("Not logged in.")]
    NotLoggedIn,

    /// `relogin` without previously saved credentials
    #[error("No authentication information available.")]
    MissingCredentials,

    /// The server refused `user.login`
    #[error("login rejected: {0}")]
    Rejected(#[source] ApiError),

    /// `user.login` answered with an empty session id
    #[error("Empty session token returned by user.login.")]
    EmptyToken,
}

/// Structured Zabbix API error, carried verbatim from the response.
///
/// Common codes:
/// * `-32602` - Invalid params (eg already exists)
/// * `-32500` - no permissions
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiError {
    pub code: i32,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<serde_json::Value>,
}

impl ApiError {
    /// Server detail text, if `data` is a string.
    pub fn data_text(&self) -> Option<&str> {
        self.data.as_ref().and_then(|d| d.as_str())
    }

    /// True when the server reports that the session token is no longer valid.
    pub fn is_session_expired(&self) -> bool {
        let haystacks = [Some(self.message.as_str()), self.data_text()];
        haystacks
            .iter()
            .flatten()
            .any(|text| SESSION_ERRORS.iter().any(|needle| text.contains(needle)))
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.data {
            Some(serde_json::Value::String(s)) => write!(f, "{} {} [{}]", self.message, s, self.code),
            Some(other) => write!(f, "{} {} [{}]", self.message, other, self.code),
            None => write!(f, "{} [{}]", self.message, self.code),
        }
    }
}

impl std::error::Error for ApiError {}

impl ZabbixError {
    /// The server-side error, whether it came from a regular call or from login.
    pub fn api_error(&self) -> Option<&ApiError> {
        match self {
            ZabbixError::Api(e) => Some(e),
            ZabbixError::Authentication(AuthError::Rejected(e)) => Some(e),
            _ => None,
        }
    }

    pub fn is_authentication(&self) -> bool {
        matches!(self, ZabbixError::Authentication(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::jsonrpc;
    use serde_json::json;

    fn api_error(message: &str, data: Option<serde_json::Value>) -> ApiError {
        ApiError {
            code: jsonrpc::ERROR_INVALID_PARAMS,
            message: message.to_string(),
            data,
        }
    }

    #[test]
    fn test_api_error_display_with_data() {
        let err = api_error("Invalid params.", Some(json!("Host \"web01\" already exists.")));
        assert_eq!(
            err.to_string(),
            "Invalid params. Host \"web01\" already exists. [-32602]"
        );
    }

    #[test]
    fn test_api_error_display_without_data() {
        let err = api_error("Invalid params", None);
        assert_eq!(err.to_string(), "Invalid params [-32602]");
    }

    #[test]
    fn test_error_conversion() {
        let err: ZabbixError = AuthError::EmptyToken.into();
        assert!(err.is_authentication());
        assert!(err.api_error().is_none());

        let err: ZabbixError = AuthError::NotLoggedIn.into();
        assert!(err.is_authentication());
        assert_eq!(err.to_string(), "Authentication error: Not logged in.");

        let err: ZabbixError = api_error("Invalid params", None).into();
        assert!(!err.is_authentication());
        assert_eq!(err.api_error().map(|e| e.code), Some(jsonrpc::ERROR_INVALID_PARAMS));
    }

    #[test]
    fn test_rejected_login_exposes_api_error() {
        let rejected = ApiError {
            code: jsonrpc::ERROR_INTERNAL,
            message: "Incorrect user name or password".to_string(),
            data: None,
        };
        let err: ZabbixError = AuthError::Rejected(rejected).into();
        assert!(err.is_authentication());
        assert_eq!(err.api_error().map(|e| e.code), Some(jsonrpc::ERROR_INTERNAL));
        assert_eq!(
            err.api_error().map(|e| e.message.as_str()),
            Some("Incorrect user name or password")
        );
    }

    #[test]
    fn test_session_expired_detection() {
        let expired = api_error("Invalid params.", Some(json!("Session terminated, re-login, please.")));
        assert!(expired.is_session_expired());

        let in_message = api_error("Not authorized.", None);
        assert!(in_message.is_session_expired());

        let other = api_error("Invalid params.", Some(json!("No permissions to referred object.")));
        assert!(!other.is_session_expired());
    }
}

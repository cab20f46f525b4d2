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

//! Wire models for the Zabbix JSON-RPC API.
//!
//! Pure data structures: request and response envelopes and the server
//! API version. Nothing here performs I/O.

use crate::constants::{defaults, jsonrpc};
use crate::errors::{ApiError, ZabbixError};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::fmt;
use std::str::FromStr;

/// Request envelope, built fresh for every call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JsonRpcRequest {
    pub jsonrpc: String,
    pub method: String,
    pub params: Value,
    pub id: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub auth: Option<String>,
}

impl JsonRpcRequest {
    pub fn new(id: u64, method: impl Into<String>, params: Value) -> Self {
        Self {
            jsonrpc: jsonrpc::VERSION.to_string(),
            method: method.into(),
            params,
            id,
            auth: None,
        }
    }

    pub fn with_auth(mut self, token: impl Into<String>) -> Self {
        self.auth = Some(token.into());
        self
    }
}

/// Response envelope as received.
///
/// `result` distinguishes a missing field (`None`) from an explicit JSON
/// `null` (`Some(Value::Null)`), since both are legal answers.
#[derive(Debug, Clone, Deserialize)]
pub struct JsonRpcResponse {
    #[serde(default)]
    pub jsonrpc: Option<String>,
    #[serde(default, deserialize_with = "present")]
    pub result: Option<Value>,
    #[serde(default)]
    pub error: Option<Value>,
    #[serde(default)]
    pub id: Value,
}

fn present<'de, D>(deserializer: D) -> Result<Option<Value>, D::Error>
where
    D: Deserializer<'de>,
{
    Value::deserialize(deserializer).map(Some)
}

impl JsonRpcResponse {
    /// Decode a raw response body.
    pub fn from_slice(body: &[u8]) -> Result<Self, ZabbixError> {
        serde_json::from_slice(body)
            .map_err(|e| ZabbixError::Protocol(format!("Unable to decode response: {}", e)))
    }

    /// Check the envelope against the request it answers and unwrap it.
    ///
    /// An `error` envelope with a `null` id is accepted: the server could
    /// not read the request id in that case.
    pub fn into_result(self, expected_id: u64) -> Result<Value, ZabbixError> {
        let id_matches = self.id.as_u64() == Some(expected_id);
        let unidentified_error = self.id.is_null() && self.error.is_some();

        if !id_matches && !unidentified_error {
            return Err(ZabbixError::Protocol(format!(
                "Response id {} does not match request id {}",
                self.id, expected_id
            )));
        }

        if let Some(error) = self.error {
            let api_error: ApiError = serde_json::from_value(error).map_err(|e| {
                ZabbixError::Protocol(format!("Malformed error object in response: {}", e))
            })?;
            return Err(ZabbixError::Api(api_error));
        }

        self.result
            .ok_or_else(|| ZabbixError::Protocol("Missing result in API response".to_string()))
    }
}

/// Zabbix API version as reported by `apiinfo.version`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ApiVersion {
    pub major: u32,
    pub minor: u32,
    pub patch: u32,
}

impl ApiVersion {
    pub const fn new(major: u32, minor: u32, patch: u32) -> Self {
        Self {
            major,
            minor,
            patch,
        }
    }

    /// `user.login` takes `username` from 5.4 on, `user` before that.
    pub fn login_user_key(&self) -> &'static str {
        if (self.major, self.minor) >= defaults::USERNAME_PARAM_SINCE {
            "username"
        } else {
            "user"
        }
    }
}

impl FromStr for ApiVersion {
    type Err = ZabbixError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || ZabbixError::Protocol(format!("Invalid API version: {:?}", s));

        // Pre-release suffixes ("7.0.0alpha1", "6.4.0rc2") only affect the last component.
        let mut parts = s.trim().split('.').map(|part| {
            let digits: String = part.chars().take_while(|c| c.is_ascii_digit()).collect();
            digits.parse::<u32>()
        });

        let major = parts.next().and_then(|p| p.ok()).ok_or_else(invalid)?;
        let minor = match parts.next() {
            Some(p) => p.map_err(|_| invalid())?,
            None => 0,
        };
        let patch = match parts.next() {
            Some(p) => p.map_err(|_| invalid())?,
            None => 0,
        };

        Ok(Self::new(major, minor, patch))
    }
}

impl TryFrom<String> for ApiVersion {
    type Error = ZabbixError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl From<ApiVersion> for String {
    fn from(v: ApiVersion) -> Self {
        v.to_string()
    }
}

impl fmt::Display for ApiVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.major, self.minor, self.patch)
    }
}

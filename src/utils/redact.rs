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

//! Credential redaction for log output and query history.

use serde_json::Value;
use sha2::{Digest, Sha256};

/// Keys whose string values are replaced before a body is logged or recorded.
pub const SENSITIVE_KEYS: &[&str] = &["auth", "password", "passwd"];

const MASK: &str = "***";

/// Copy of `value` with every sensitive string replaced by `***`, at any depth.
pub fn redact(value: &Value) -> Value {
    match value {
        Value::Object(map) => Value::Object(
            map.iter()
                .map(|(k, v)| {
                    let masked = match v {
                        Value::String(_) if SENSITIVE_KEYS.contains(&k.as_str()) => {
                            Value::String(MASK.to_string())
                        }
                        other => redact(other),
                    };
                    (k.clone(), masked)
                })
                .collect(),
        ),
        Value::Array(items) => Value::Array(items.iter().map(redact).collect()),
        other => other.clone(),
    }
}

/// Serialized, redacted form of `value` for logs.
pub fn redact_to_string(value: &Value) -> String {
    redact(value).to_string()
}

/// Short SHA-256 fingerprint, so logs can tell passwords apart without showing them.
pub fn fingerprint(secret: &str) -> String {
    let digest = Sha256::digest(secret.as_bytes());
    format!("sha256({})", &hex::encode(digest)[..12])
}

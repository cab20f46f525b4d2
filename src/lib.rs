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

//! zabbix-api: A blocking client for the Zabbix JSON-RPC API.
//!
//! The library logs in to a Zabbix server, wraps method calls in JSON-RPC
//! envelopes, and hands back the `result` of each response untouched.
//!
//! ```no_run
//! use serde_json::json;
//! use zabbix_api::{ClientConfig, ZabbixApi};
//!
//! # fn main() -> Result<(), zabbix_api::ZabbixError> {
//! let mut api = ZabbixApi::new(ClientConfig::new("https://zabbix.example.com/zabbix"))?;
//! api.login("Admin", "zabbix")?;
//!
//! let hosts = api.object("host").call("get", json!({"output": "extend"}))?;
//! let same = api.call("host.get", json!({"output": "extend"}))?;
//! assert_eq!(hosts, same);
//!
//! api.logout()?;
//! # Ok(())
//! # }
//! ```

pub mod client;
pub mod config;
pub mod constants;
pub mod dispatch;
pub mod errors;
pub mod logging;
pub mod models;
pub mod transport;
pub mod utils;

pub use client::ZabbixApi;
pub use config::ClientConfig;
pub use dispatch::{ApiMethod, ApiObject};
pub use errors::{ApiError, AuthError, ZabbixError};
pub use models::ApiVersion;
pub use transport::{HttpTransport, Transport, TransportResponse};

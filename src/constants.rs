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

//! zabbix-api Constants - Single source of truth for protocol and configuration values.

/// JSON-RPC 2.0 wire values
pub mod jsonrpc {
    /// Protocol version marker sent in every request
    pub const VERSION: &str = "2.0";
    /// Invalid params (standard JSON-RPC, also used by Zabbix for "already exists")
    pub const ERROR_INVALID_PARAMS: i32 = -32602;
    /// Internal error (Zabbix uses it for permission failures)
    pub const ERROR_INTERNAL: i32 = -32500;
    /// Method not found (standard JSON-RPC)
    pub const ERROR_METHOD_NOT_FOUND: i32 = -32601;
    /// Parse error (standard JSON-RPC)
    pub const ERROR_PARSE: i32 = -32700;
}

/// HTTP endpoint and headers
pub mod http {
    /// Path of the JSON-RPC endpoint below the frontend URL
    pub const API_PATH: &str = "api_jsonrpc.php";
    pub const CONTENT_TYPE: &str = "application/json-rpc";
    pub const ACCEPT: &str = "application/json";
    pub const USER_AGENT: &str = concat!("zabbix-api-rs/", env!("CARGO_PKG_VERSION"));
}

/// Zabbix API methods the client issues on its own
pub mod methods {
    pub const USER_LOGIN: &str = "user.login";
    pub const USER_LOGOUT: &str = "user.logout";
    pub const API_VERSION: &str = "apiinfo.version";
}

/// Server error texts that mean the session token is no longer valid
pub const SESSION_ERRORS: &[&str] = &["Not authorized", "Session terminated", "re-login, please"];

/// Common `output`/`countOutput` and sort values
pub mod query {
    pub const QUERY_EXTEND: &str = "extend";
    pub const QUERY_COUNT: &str = "count";
    pub const SORT_ASC: &str = "ASC";
    pub const SORT_DESC: &str = "DESC";
}

/// Client defaults
pub mod defaults {
    pub const SERVER: &str = "http://localhost/zabbix";
    pub const TIMEOUT_SECS: u64 = 10;
    pub const RECENT_QUERY_LEN: usize = 10;
    pub const LOG_LEVEL: &str = "warn";
    pub const LOG_FORMAT: &str = "text";
    /// First API version whose `user.login` takes `username` instead of `user`
    pub const USERNAME_PARAM_SINCE: (u32, u32) = (5, 4);
}

/// Configuration Environment Variables
pub mod config {
    pub const ENV_SERVER: &str = "ZABBIX_API_SERVER";
    pub const ENV_TIMEOUT_SECS: &str = "ZABBIX_API_TIMEOUT_SECS";
    pub const ENV_SSL_VERIFY: &str = "ZABBIX_API_SSL_VERIFY";
    pub const ENV_PROXY: &str = "ZABBIX_API_PROXY";
    pub const ENV_HTTP_USER: &str = "ZABBIX_API_HTTP_USER";
    pub const ENV_HTTP_PASSWORD: &str = "ZABBIX_API_HTTP_PASSWORD";
    pub const ENV_API_VERSION: &str = "ZABBIX_API_VERSION";
    pub const ENV_RECENT_QUERY_LEN: &str = "ZABBIX_API_RECENT_QUERY_LEN";
    pub const ENV_LOG_LEVEL: &str = "LOG_LEVEL";
    pub const ENV_LOG_FORMAT: &str = "LOG_FORMAT";
}

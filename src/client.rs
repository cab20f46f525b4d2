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

//! The Zabbix API façade.
//!
//! `ZabbixApi` owns the session: the token obtained by `login`, the request
//! id counter, and the negotiated API version. Every call is one blocking
//! round trip through the configured [`Transport`].
//!
//! The session has two states. It starts unauthenticated, where any call
//! that needs a token fails before touching the network. A successful
//! `login` authenticates it; `logout` drops the token again.

use crate::config::ClientConfig;
use crate::constants::methods;
use crate::dispatch::ApiObject;
use crate::errors::{AuthError, ZabbixError};
use crate::models::{ApiVersion, JsonRpcRequest, JsonRpcResponse};
use crate::transport::{request_headers, HttpTransport, Transport};
use crate::utils::redact::{fingerprint, redact_to_string};
use chrono::{DateTime, Utc};
use reqwest::header::HeaderMap;
use serde::Serialize;
use serde_json::{json, Map, Value};
use std::collections::VecDeque;
use std::fmt;
use std::time::Instant;
use tracing::{debug, error, info, warn};

#[derive(Clone)]
struct Credentials {
    user: String,
    password: String,
}

#[derive(Default)]
struct Session {
    auth: Option<String>,
    last_id: u64,
    api_version: Option<ApiVersion>,
    credentials: Option<Credentials>,
    last_login: Option<DateTime<Utc>>,
    recent: VecDeque<String>,
}

/// Login and access any Zabbix API method.
pub struct ZabbixApi<T: Transport = HttpTransport> {
    config: ClientConfig,
    api_url: String,
    headers: HeaderMap,
    transport: T,
    session: Session,
}

impl ZabbixApi<HttpTransport> {
    /// Client over HTTP(S) for `config.server`. No request is sent yet.
    pub fn new(config: ClientConfig) -> Result<Self, ZabbixError> {
        let transport = HttpTransport::new(&config)?;
        Self::with_transport(config, transport)
    }
}

impl<T: Transport> ZabbixApi<T> {
    /// Client over any transport, e.g. a recording double in tests.
    pub fn with_transport(config: ClientConfig, transport: T) -> Result<Self, ZabbixError> {
        let api_url = config.api_url()?;
        let headers = request_headers(config.http_auth.as_ref())?;
        let session = Session {
            api_version: config.api_version,
            recent: VecDeque::with_capacity(config.recent_query_len),
            ..Session::default()
        };

        debug!(url = %api_url, "Initialized Zabbix API client");

        Ok(Self {
            config,
            api_url,
            headers,
            transport,
            session,
        })
    }

    pub fn server(&self) -> &str {
        &self.config.server
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    pub fn is_logged_in(&self) -> bool {
        self.session.auth.is_some()
    }

    pub fn session_token(&self) -> Option<&str> {
        self.session.auth.as_deref()
    }

    pub fn last_login(&self) -> Option<DateTime<Utc>> {
        self.session.last_login
    }

    /// Most recent request bodies, oldest first, with credentials masked.
    pub fn recent_queries(&self) -> Vec<String> {
        self.session.recent.iter().cloned().collect()
    }

    /// Proxy for the `noun.*` methods, e.g. `api.object("host").call("get", params)`.
    pub fn object(&mut self, noun: impl Into<String>) -> ApiObject<'_, T> {
        ApiObject::new(self, noun.into())
    }

    /// Call a method that requires a logged-in session.
    pub fn call<P: Serialize>(&mut self, method: &str, params: P) -> Result<Value, ZabbixError> {
        self.call_with(method, params, true)
    }

    /// Call `method`, attaching the session token when `need_auth` is set.
    ///
    /// Returns the response `result` exactly as the server sent it.
    pub fn call_with<P: Serialize>(
        &mut self,
        method: &str,
        params: P,
        need_auth: bool,
    ) -> Result<Value, ZabbixError> {
        let start = Instant::now();
        let id = self.next_id();

        let params = serde_json::to_value(params)
            .map_err(|e| ZabbixError::Protocol(format!("Unable to encode params: {}", e)))?;
        let mut request = JsonRpcRequest::new(id, method, params);

        if need_auth {
            match &self.session.auth {
                Some(token) => request = request.with_auth(token.as_str()),
                None => {
                    warn!(id, method = %method, "Zabbix API call attempted without login");
                    return Err(AuthError::NotLoggedIn.into());
                }
            }
        }

        info!(id, method = %method, "Calling Zabbix API method");
        let result = self.do_request(&request);
        info!(
            id,
            method = %method,
            elapsed_secs = start.elapsed().as_secs_f64(),
            "Zabbix API method finished"
        );

        result
    }

    /// Perform a `user.login` request and keep the returned token.
    pub fn login(&mut self, user: &str, password: &str) -> Result<(), ZabbixError> {
        // A server error from the version lookup fails the login as well.
        let version = self.api_version().map_err(|e| match e {
            ZabbixError::Api(e) => {
                warn!(error = %e, "Zabbix API version lookup failed during login");
                ZabbixError::from(AuthError::Rejected(e))
            }
            other => other,
        })?;

        debug!(user = %user, password = %fingerprint(password), "Trying to login");

        let mut params = Map::new();
        params.insert(version.login_user_key().to_string(), json!(user));
        params.insert("password".to_string(), json!(password));

        match self.call_with(methods::USER_LOGIN, Value::Object(params), false) {
            Ok(Value::String(token)) if token.is_empty() => {
                warn!(user = %user, "Zabbix API login returned an empty token");
                Err(AuthError::EmptyToken.into())
            }
            Ok(Value::String(token)) => {
                self.session.auth = Some(token);
                self.session.credentials = Some(Credentials {
                    user: user.to_string(),
                    password: password.to_string(),
                });
                self.session.last_login = Some(Utc::now());
                info!(user = %user, "Logged in to Zabbix API");
                Ok(())
            }
            Ok(other) => Err(ZabbixError::Protocol(format!(
                "Unexpected user.login result type: {}",
                json_type(&other)
            ))),
            Err(ZabbixError::Api(e)) => {
                warn!(user = %user, error = %e, "Zabbix API login rejected");
                Err(AuthError::Rejected(e).into())
            }
            Err(e) => Err(e),
        }
    }

    /// Log in again with the credentials of the last successful `login`.
    pub fn relogin(&mut self) -> Result<(), ZabbixError> {
        let credentials = self
            .session
            .credentials
            .clone()
            .ok_or(AuthError::MissingCredentials)?;

        self.session.auth = None;
        self.login(&credentials.user, &credentials.password)
            .map_err(|e| {
                error!(error = %e, "Zabbix API relogin error");
                e
            })
    }

    /// Issue `user.logout` and forget the session, whatever the server answered.
    pub fn logout(&mut self) -> Result<Value, ZabbixError> {
        let result = self.call(methods::USER_LOGOUT, json!([]));
        self.session.auth = None;
        self.session.credentials = None;
        info!("Logged out of Zabbix API");
        result
    }

    /// Server API version; asked once with `apiinfo.version`, then cached.
    pub fn api_version(&mut self) -> Result<ApiVersion, ZabbixError> {
        if let Some(version) = self.session.api_version {
            return Ok(version);
        }

        let version = match self.call_with(methods::API_VERSION, json!([]), false)? {
            Value::String(s) => s.parse::<ApiVersion>()?,
            other => {
                return Err(ZabbixError::Protocol(format!(
                    "Unexpected apiinfo.version result type: {}",
                    json_type(&other)
                )))
            }
        };

        debug!(version = %version, "Resolved Zabbix API version");
        self.session.api_version = Some(version);
        Ok(version)
    }

    fn next_id(&mut self) -> u64 {
        self.session.last_id += 1;
        self.session.last_id
    }

    fn remember(&mut self, body: String) {
        let limit = self.config.recent_query_len;
        if limit == 0 {
            return;
        }
        while self.session.recent.len() >= limit {
            self.session.recent.pop_front();
        }
        self.session.recent.push_back(body);
    }

    fn do_request(&mut self, request: &JsonRpcRequest) -> Result<Value, ZabbixError> {
        let body = serde_json::to_vec(request)
            .map_err(|e| ZabbixError::Protocol(format!("Unable to encode request: {}", e)))?;

        let logged = serde_json::to_value(request)
            .map(|v| redact_to_string(&v))
            .unwrap_or_default();
        debug!(url = %self.api_url, body = %logged, "Request");
        self.remember(logged);

        let response = self.transport.send(&self.api_url, &self.headers, body)?;

        if response.body.is_empty() {
            return Err(ZabbixError::Protocol("Received zero answer".to_string()));
        }

        let envelope = JsonRpcResponse::from_slice(&response.body).map_err(|e| {
            error!(
                status = response.status,
                body = %String::from_utf8_lossy(&response.body),
                "Unable to decode response"
            );
            match e {
                ZabbixError::Protocol(msg) if !(200..300).contains(&response.status) => {
                    ZabbixError::Protocol(format!("HTTP {}: {}", response.status, msg))
                }
                other => other,
            }
        })?;

        // The login result is the session token.
        if request.method == methods::USER_LOGIN {
            debug!(status = response.status, "Response: body=<redacted>");
        } else {
            debug!(
                status = response.status,
                body = %String::from_utf8_lossy(&response.body),
                "Response"
            );
        }

        envelope.into_result(request.id).map_err(|e| {
            match &e {
                ZabbixError::Api(api) => {
                    warn!(id = request.id, method = %request.method, error = %api, "Zabbix API error")
                }
                other => {
                    error!(id = request.id, method = %request.method, error = %other, "Invalid Zabbix API response")
                }
            }
            e
        })
    }
}

impl<T: Transport> fmt::Debug for ZabbixApi<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ZabbixApi")
            .field("server", &self.config.server)
            .field("logged_in", &self.is_logged_in())
            .field("last_id", &self.session.last_id)
            .finish()
    }
}

fn json_type(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

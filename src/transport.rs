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

//! HTTP transport for the Zabbix JSON-RPC endpoint.
//!
//! A transport performs exactly one POST per `send` and hands back the raw
//! body. Decoding the JSON-RPC envelope is the caller's job.

use crate::config::{ClientConfig, HttpAuth};
use crate::constants::http;
use crate::errors::ZabbixError;
use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use reqwest::blocking::Client;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, AUTHORIZATION, CONTENT_TYPE, USER_AGENT};
use reqwest::Proxy;
use std::time::Duration;
use tracing::{debug, error};

/// Raw answer from the server.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransportResponse {
    pub status: u16,
    pub body: Vec<u8>,
}

/// One request, one response, no retries.
pub trait Transport {
    /// POST `body` to `url`.
    ///
    /// Returns the body for any status that carries one. Fails with
    /// `Connection` on network errors (including a body cut short) and with
    /// `Http` on a non-success status with an empty body.
    fn send(
        &self,
        url: &str,
        headers: &HeaderMap,
        body: Vec<u8>,
    ) -> Result<TransportResponse, ZabbixError>;
}

/// Headers sent with every API request.
pub fn request_headers(http_auth: Option<&HttpAuth>) -> Result<HeaderMap, ZabbixError> {
    let mut headers = HeaderMap::new();
    headers.insert(CONTENT_TYPE, HeaderValue::from_static(http::CONTENT_TYPE));
    headers.insert(ACCEPT, HeaderValue::from_static(http::ACCEPT));
    headers.insert(USER_AGENT, HeaderValue::from_static(http::USER_AGENT));

    if let Some(auth) = http_auth {
        debug!("HTTP authentication enabled");
        let credentials = STANDARD.encode(format!("{}:{}", auth.user, auth.password));
        let mut value = HeaderValue::from_str(&format!("Basic {}", credentials)).map_err(|_| {
            ZabbixError::Configuration("HTTP credentials are not valid header text".to_string())
        })?;
        value.set_sensitive(true);
        headers.insert(AUTHORIZATION, value);
    }

    Ok(headers)
}

/// Blocking reqwest transport.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    http_client: Client,
    timeout: Duration,
}

impl HttpTransport {
    /// Build the HTTP client from timeout, TLS and proxy settings.
    pub fn new(config: &ClientConfig) -> Result<Self, ZabbixError> {
        let timeout = config.timeout();

        let mut builder = Client::builder()
            .timeout(timeout)
            .connect_timeout(timeout)
            .danger_accept_invalid_certs(!config.ssl_verify);

        if let Some(proxy) = &config.proxy {
            let proxy = Proxy::all(proxy.as_str()).map_err(|e| {
                ZabbixError::Configuration(format!("Invalid proxy {:?}: {}", proxy, e))
            })?;
            builder = builder.proxy(proxy);
        }

        let http_client = builder.build().map_err(|e| {
            ZabbixError::Configuration(format!("Failed to create HTTP client: {}", e))
        })?;

        Ok(Self {
            http_client,
            timeout,
        })
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    fn map_send_error(&self, e: reqwest::Error) -> ZabbixError {
        if e.is_timeout() {
            ZabbixError::Connection(format!(
                "Request timeout after {:?}",
                self.timeout
            ))
        } else if e.is_connect() {
            ZabbixError::Connection(format!("Connection failed: {}", e))
        } else {
            ZabbixError::Connection(format!("HTTP request failed: {}", e))
        }
    }
}

impl Transport for HttpTransport {
    fn send(
        &self,
        url: &str,
        headers: &HeaderMap,
        body: Vec<u8>,
    ) -> Result<TransportResponse, ZabbixError> {
        let response = self
            .http_client
            .post(url)
            .headers(headers.clone())
            .body(body)
            .send()
            .map_err(|e| self.map_send_error(e))?;

        let status = response.status();
        debug!(status = %status, url = %url, "Response received");

        // A body that stops early surfaces here, before any decoding.
        let bytes = response.bytes().map_err(|e| {
            error!(error = %e, url = %url, "Failed to read response body");
            ZabbixError::Connection(format!("Failed to read response body: {}", e))
        })?;

        if !status.is_success() && bytes.is_empty() {
            error!(status = %status, url = %url, "Server returned HTTP error without body");
            return Err(ZabbixError::Http {
                status: status.as_u16(),
            });
        }

        Ok(TransportResponse {
            status: status.as_u16(),
            body: bytes.to_vec(),
        })
    }
}

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

use crate::constants::{config as env_keys, defaults, http};
use crate::errors::ZabbixError;
use crate::models::ApiVersion;
use serde::{Deserialize, Serialize};
use std::env;
use std::time::Duration;
use url::Url;

/// HTTP basic credentials for web servers that front the Zabbix frontend.
#[derive(Clone, Serialize, Deserialize)]
pub struct HttpAuth {
    pub user: String,
    pub password: String,
}

impl std::fmt::Debug for HttpAuth {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpAuth")
            .field("user", &self.user)
            .field("password", &"***")
            .finish()
    }
}

/// Client construction parameters.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClientConfig {
    /// Frontend URL, e.g. `https://zabbix.example.com/zabbix`
    pub server: String,
    /// Whole-request timeout handed to the HTTP client as is
    pub timeout: Duration,
    pub ssl_verify: bool,
    pub proxy: Option<String>,
    pub http_auth: Option<HttpAuth>,
    /// Skips the `apiinfo.version` lookup when set
    pub api_version: Option<ApiVersion>,
    pub recent_query_len: usize,
    pub log_level: String,
    pub log_format: String, // "json" or "text"
}

impl ClientConfig {
    pub fn new(server: impl Into<String>) -> Self {
        Self {
            server: server.into(),
            ..Self::default()
        }
    }

    /// Load configuration from environment variables.
    ///
    /// Unset variables fall back to the defaults; malformed values are errors.
    pub fn from_env() -> Result<Self, ZabbixError> {
        let base = Self::default();

        let http_auth = match (
            Self::get_optional_env(env_keys::ENV_HTTP_USER),
            Self::get_optional_env(env_keys::ENV_HTTP_PASSWORD),
        ) {
            (Some(user), password) => Some(HttpAuth {
                user,
                password: password.unwrap_or_default(),
            }),
            (None, _) => None,
        };

        let config = Self {
            server: env::var(env_keys::ENV_SERVER).unwrap_or(base.server),
            timeout: Self::parse_or_default(env_keys::ENV_TIMEOUT_SECS, base.timeout.as_secs())
                .map(Duration::from_secs)?,
            ssl_verify: Self::parse_bool_or_default(env_keys::ENV_SSL_VERIFY, base.ssl_verify)?,
            proxy: Self::get_optional_env(env_keys::ENV_PROXY),
            http_auth,
            api_version: Self::get_optional_env(env_keys::ENV_API_VERSION)
                .map(|v| v.parse::<ApiVersion>())
                .transpose()?,
            recent_query_len: Self::parse_or_default(
                env_keys::ENV_RECENT_QUERY_LEN,
                base.recent_query_len,
            )?,
            log_level: env::var(env_keys::ENV_LOG_LEVEL).unwrap_or(base.log_level),
            log_format: env::var(env_keys::ENV_LOG_FORMAT).unwrap_or(base.log_format),
        };

        config.validate()?;
        Ok(config)
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_ssl_verify(mut self, verify: bool) -> Self {
        self.ssl_verify = verify;
        self
    }

    pub fn with_proxy(mut self, proxy: impl Into<String>) -> Self {
        self.proxy = Some(proxy.into());
        self
    }

    pub fn with_http_auth(mut self, user: impl Into<String>, password: impl Into<String>) -> Self {
        self.http_auth = Some(HttpAuth {
            user: user.into(),
            password: password.into(),
        });
        self
    }

    pub fn with_api_version(mut self, version: ApiVersion) -> Self {
        self.api_version = Some(version);
        self
    }

    pub fn with_recent_query_len(mut self, len: usize) -> Self {
        self.recent_query_len = len;
        self
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Check the server URL scheme and the proxy URL.
    pub fn validate(&self) -> Result<(), ZabbixError> {
        let server = Url::parse(&self.server).map_err(|e| {
            ZabbixError::Configuration(format!("Invalid server URL {:?}: {}", self.server, e))
        })?;

        match server.scheme() {
            "http" | "https" => {}
            other => {
                return Err(ZabbixError::Configuration(format!(
                    "Invalid protocol {}",
                    other
                )))
            }
        }

        if let Some(proxy) = &self.proxy {
            Url::parse(proxy).map_err(|e| {
                ZabbixError::Configuration(format!("Invalid proxy URL {:?}: {}", proxy, e))
            })?;
        }

        if self.timeout.is_zero() {
            return Err(ZabbixError::Configuration(
                "timeout must be greater than zero".to_string(),
            ));
        }

        Ok(())
    }

    /// Full URL of the JSON-RPC endpoint.
    pub fn api_url(&self) -> Result<String, ZabbixError> {
        self.validate()?;
        Ok(format!(
            "{}/{}",
            self.server.trim_end_matches('/'),
            http::API_PATH
        ))
    }

    fn get_optional_env(key: &str) -> Option<String> {
        match env::var(key) {
            Ok(value) if !value.is_empty() => Some(value),
            _ => None,
        }
    }

    fn parse_or_default<T: std::str::FromStr>(key: &str, default: T) -> Result<T, ZabbixError> {
        match Self::get_optional_env(key) {
            Some(value) => value.trim().parse().map_err(|_| {
                ZabbixError::Configuration(format!("{} has an invalid value: {}", key, value))
            }),
            None => Ok(default),
        }
    }

    fn parse_bool_or_default(key: &str, default: bool) -> Result<bool, ZabbixError> {
        match Self::get_optional_env(key).map(|v| v.to_lowercase()) {
            Some(v) if v == "true" || v == "1" || v == "yes" => Ok(true),
            Some(v) if v == "false" || v == "0" || v == "no" => Ok(false),
            Some(v) => Err(ZabbixError::Configuration(format!(
                "{} has an invalid value: {}",
                key, v
            ))),
            None => Ok(default),
        }
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            server: defaults::SERVER.to_string(),
            timeout: Duration::from_secs(defaults::TIMEOUT_SECS),
            ssl_verify: true,
            proxy: None,
            http_auth: None,
            api_version: None,
            recent_query_len: defaults::RECENT_QUERY_LEN,
            log_level: defaults::LOG_LEVEL.to_string(),
            log_format: defaults::LOG_FORMAT.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ClientConfig::default();
        assert_eq!(config.server, "http://localhost/zabbix");
        assert_eq!(config.timeout(), Duration::from_secs(10));
        assert!(config.ssl_verify);
        assert_eq!(config.recent_query_len, 10);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_api_url() {
        let config = ClientConfig::new("https://zabbix.example.com/zabbix/");
        assert_eq!(
            config.api_url().unwrap(),
            "https://zabbix.example.com/zabbix/api_jsonrpc.php"
        );

        let config = ClientConfig::new("http://10.0.0.5");
        assert_eq!(config.api_url().unwrap(), "http://10.0.0.5/api_jsonrpc.php");
    }

    #[test]
    fn test_invalid_scheme_rejected() {
        let err = ClientConfig::new("ftp://zabbix.example.com").validate().unwrap_err();
        assert!(matches!(err, ZabbixError::Configuration(ref m) if m.contains("ftp")));

        let err = ClientConfig::new("zabbix.example.com").validate().unwrap_err();
        assert!(matches!(err, ZabbixError::Configuration(_)));
    }

    #[test]
    fn test_invalid_proxy_rejected() {
        let config = ClientConfig::new("http://localhost/zabbix").with_proxy("not a url");
        assert!(matches!(
            config.validate(),
            Err(ZabbixError::Configuration(_))
        ));
    }

    #[test]
    fn test_zero_timeout_rejected() {
        let config = ClientConfig::new("http://localhost").with_timeout(Duration::ZERO);
        assert!(matches!(
            config.validate(),
            Err(ZabbixError::Configuration(ref m)) if m.contains("timeout")
        ));
    }

    #[test]
    fn test_sub_second_timeout_kept() {
        let config =
            ClientConfig::new("http://localhost").with_timeout(Duration::from_millis(1500));
        assert_eq!(config.timeout(), Duration::from_millis(1500));

        let config = ClientConfig::new("http://localhost").with_timeout(Duration::from_millis(500));
        assert_eq!(config.timeout(), Duration::from_millis(500));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_from_env() {
        env::set_var(env_keys::ENV_SERVER, "https://monitor.example.org/zabbix");
        env::set_var(env_keys::ENV_TIMEOUT_SECS, "30");
        env::set_var(env_keys::ENV_SSL_VERIFY, "false");
        env::set_var(env_keys::ENV_API_VERSION, "6.0.0");
        env::set_var(env_keys::ENV_HTTP_USER, "web");

        let config = ClientConfig::from_env().unwrap();
        assert_eq!(config.server, "https://monitor.example.org/zabbix");
        assert_eq!(config.timeout(), Duration::from_secs(30));
        assert!(!config.ssl_verify);
        assert_eq!(config.api_version, Some(ApiVersion::new(6, 0, 0)));
        assert_eq!(config.http_auth.as_ref().map(|a| a.user.as_str()), Some("web"));

        env::set_var(env_keys::ENV_TIMEOUT_SECS, "soon");
        assert!(matches!(
            ClientConfig::from_env(),
            Err(ZabbixError::Configuration(_))
        ));

        for key in [
            env_keys::ENV_SERVER,
            env_keys::ENV_TIMEOUT_SECS,
            env_keys::ENV_SSL_VERIFY,
            env_keys::ENV_API_VERSION,
            env_keys::ENV_HTTP_USER,
        ] {
            env::remove_var(key);
        }
    }

    #[test]
    fn test_http_auth_debug_hides_password() {
        let config = ClientConfig::new("http://localhost").with_http_auth("web", "hunter2");
        let rendered = format!("{:?}", config);
        assert!(rendered.contains("web"));
        assert!(!rendered.contains("hunter2"));
    }
}

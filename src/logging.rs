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

//! Optional tracing setup for applications embedding the client.
//!
//! The library only emits `tracing` events. Applications that do not
//! install their own subscriber can call [`init`] once at startup.

use crate::config::ClientConfig;
use crate::errors::ZabbixError;
use tracing_subscriber::fmt;
use tracing_subscriber::EnvFilter;

/// `RUST_LOG` wins; otherwise the configured level applies to this crate.
pub fn env_filter(config: &ClientConfig) -> EnvFilter {
    EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(format!("zabbix_api={}", config.log_level)))
        .unwrap_or_else(|_| EnvFilter::new("zabbix_api=warn"))
}

/// Install a stderr subscriber in `json` or `text` format.
pub fn init(config: &ClientConfig) -> Result<(), ZabbixError> {
    let subscriber = fmt()
        .with_env_filter(env_filter(config))
        .with_target(false)
        .with_thread_ids(false)
        .with_writer(std::io::stderr);

    let installed = if config.log_format == "json" {
        subscriber.json().try_init()
    } else {
        subscriber.try_init()
    };

    installed.map_err(|e| ZabbixError::Configuration(format!("Failed to install logger: {}", e)))
}

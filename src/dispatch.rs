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

//! Two-level method proxy.
//!
//! Zabbix method names are always `object.action`. `ApiObject` captures the
//! object, `ApiMethod` the action, and both forward to [`ZabbixApi::call`].
//! Names are passed through verbatim; the server decides what exists.

use crate::client::ZabbixApi;
use crate::errors::ZabbixError;
use crate::transport::Transport;
use serde::Serialize;
use serde_json::Value;
use tracing::debug;

/// Proxy bound to an API object such as `host` or `user`.
pub struct ApiObject<'a, T: Transport> {
    api: &'a mut ZabbixApi<T>,
    noun: String,
}

impl<'a, T: Transport> ApiObject<'a, T> {
    pub(crate) fn new(api: &'a mut ZabbixApi<T>, noun: String) -> Self {
        debug!(object = %noun, "Creating ApiObject");
        Self { api, noun }
    }

    pub fn noun(&self) -> &str {
        &self.noun
    }

    /// Full method name for `verb`, e.g. `host.get`.
    pub fn method_name(&self, verb: &str) -> String {
        format!("{}.{}", self.noun, verb)
    }

    /// Same as `api.call("<noun>.<verb>", params)`.
    pub fn call<P: Serialize>(&mut self, verb: &str, params: P) -> Result<Value, ZabbixError> {
        let method = self.method_name(verb);
        self.api.call(&method, params)
    }

    pub fn method(&mut self, verb: &str) -> ApiMethod<'_, T> {
        ApiMethod {
            name: self.method_name(verb),
            api: &mut *self.api,
        }
    }
}

/// A resolved `object.action` ready to be invoked.
pub struct ApiMethod<'a, T: Transport> {
    api: &'a mut ZabbixApi<T>,
    name: String,
}

impl<T: Transport> ApiMethod<'_, T> {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn invoke<P: Serialize>(&mut self, params: P) -> Result<Value, ZabbixError> {
        self.api.call(&self.name, params)
    }
}

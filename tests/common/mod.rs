// Shared test doubles for the Zabbix API client

#![allow(dead_code)]

use reqwest::header::HeaderMap;
use serde_json::{json, Value};
use std::cell::RefCell;
use zabbix_api::{ApiVersion, ClientConfig, Transport, TransportResponse, ZabbixApi, ZabbixError};

type Responder = Box<dyn Fn(&Value) -> Result<TransportResponse, ZabbixError>>;

/// In-process transport that records every request and answers from a closure.
pub struct ScriptedTransport {
    responder: Responder,
    pub requests: RefCell<Vec<Value>>,
}

impl ScriptedTransport {
    pub fn new<F>(responder: F) -> Self
    where
        F: Fn(&Value) -> Result<TransportResponse, ZabbixError> + 'static,
    {
        Self {
            responder: Box::new(responder),
            requests: RefCell::new(Vec::new()),
        }
    }

    /// Answers `user.login` with `token` and anything else with `result`.
    pub fn zabbix(token: &'static str, result: Value) -> Self {
        Self::new(move |req| {
            let answer = match req["method"].as_str() {
                Some("user.login") => json!(token),
                Some("apiinfo.version") => json!("6.0.0"),
                _ => result.clone(),
            };
            Ok(reply(json!({"jsonrpc": "2.0", "result": answer, "id": req["id"]})))
        })
    }

    /// Always answers with the same raw body, whatever the request id.
    pub fn fixed(body: &'static str) -> Self {
        Self::new(move |_| Ok(reply_raw(200, body)))
    }

    pub fn call_count(&self) -> usize {
        self.requests.borrow().len()
    }

    pub fn last_request(&self) -> Value {
        self.requests.borrow().last().cloned().unwrap_or(Value::Null)
    }
}

impl Transport for ScriptedTransport {
    fn send(
        &self,
        _url: &str,
        _headers: &HeaderMap,
        body: Vec<u8>,
    ) -> Result<TransportResponse, ZabbixError> {
        let request: Value = serde_json::from_slice(&body).expect("request body must be JSON");
        self.requests.borrow_mut().push(request.clone());
        (self.responder)(&request)
    }
}

pub fn reply(body: Value) -> TransportResponse {
    TransportResponse {
        status: 200,
        body: body.to_string().into_bytes(),
    }
}

pub fn reply_raw(status: u16, body: &str) -> TransportResponse {
    TransportResponse {
        status,
        body: body.as_bytes().to_vec(),
    }
}

pub fn test_config() -> ClientConfig {
    ClientConfig::new("http://zabbix.test/zabbix").with_api_version(ApiVersion::new(6, 0, 0))
}

pub fn client(transport: ScriptedTransport) -> ZabbixApi<ScriptedTransport> {
    ZabbixApi::with_transport(test_config(), transport).expect("client construction")
}

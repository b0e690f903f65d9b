#![allow(dead_code)]

use async_trait::async_trait;
use reqwest::StatusCode;
use serde_json::{json, Value};
use std::{
    collections::{HashMap, VecDeque},
    sync::{
        atomic::{AtomicUsize, Ordering},
        Mutex,
    },
    time::Duration,
};
use url::Url;
use verifier::{
    api::{ExplorerClient, Params, RawResponse, Transport, TransportError},
    config::Timeouts,
    network::{NetworkId, NetworkRegistry},
};

pub const ADDRESS: &str = "0x5FbDB2315678afecb367f032d93F642f64180aa3";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SentRequest {
    pub method: &'static str,
    pub url: Url,
    pub params: HashMap<String, String>,
    pub timeout: Duration,
}

/// Answers requests from a queue and remembers what was sent.
/// Once the queue is empty the last answer keeps being repeated.
#[derive(Default)]
pub struct ScriptedTransport {
    replies: Mutex<VecDeque<Result<RawResponse, TransportError>>>,
    last: Mutex<Option<RawResponse>>,
    sent: Mutex<Vec<SentRequest>>,
    calls: AtomicUsize,
}

impl ScriptedTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn reply(self, response: RawResponse) -> Self {
        self.replies.lock().unwrap().push_back(Ok(response));
        self
    }

    pub fn reply_json(self, body: Value) -> Self {
        self.reply(RawResponse::ok(body.to_string()))
    }

    pub fn fail(self, err: TransportError) -> Self {
        self.replies.lock().unwrap().push_back(Err(err));
        self
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn sent(&self) -> Vec<SentRequest> {
        self.sent.lock().unwrap().clone()
    }

    fn answer(
        &self,
        method: &'static str,
        url: &Url,
        params: &Params,
        timeout: Duration,
    ) -> Result<RawResponse, TransportError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.sent.lock().unwrap().push(SentRequest {
            method,
            url: url.clone(),
            params: params
                .iter()
                .map(|(k, v)| ((*k).to_string(), v.clone()))
                .collect(),
            timeout,
        });

        match self.replies.lock().unwrap().pop_front() {
            Some(Ok(response)) => {
                *self.last.lock().unwrap() = Some(response.clone());
                Ok(response)
            }
            Some(Err(err)) => Err(err),
            None => self
                .last
                .lock()
                .unwrap()
                .clone()
                .ok_or_else(|| TransportError::Connect("no scripted reply".to_string())),
        }
    }
}

#[async_trait]
impl Transport for ScriptedTransport {
    async fn post_form(
        &self,
        url: &Url,
        form: &Params,
        timeout: Duration,
    ) -> Result<RawResponse, TransportError> {
        self.answer("POST", url, form, timeout)
    }

    async fn get(
        &self,
        url: &Url,
        query: &Params,
        timeout: Duration,
    ) -> Result<RawResponse, TransportError> {
        self.answer("GET", url, query, timeout)
    }
}

pub fn registry_with_keys(keys: &[(&str, &str)]) -> NetworkRegistry {
    let vars: HashMap<String, String> = keys
        .iter()
        .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
        .collect();
    NetworkRegistry::from_lookup(|key| vars.get(key).cloned()).unwrap()
}

pub fn client(transport: ScriptedTransport) -> ExplorerClient<ScriptedTransport> {
    let registry = registry_with_keys(&[("ETHERSCAN_API_KEY", "test-key")]);
    ExplorerClient::with_transport(registry, transport, Timeouts::default())
}

pub fn status_reply(status: &str, message: &str, result: &str) -> Value {
    json!({ "status": status, "message": message, "result": result })
}

pub fn http_error(status: StatusCode, body: &str) -> RawResponse {
    RawResponse::new(status, body)
}

pub fn mainnet() -> NetworkId {
    NetworkId::Ethereum
}

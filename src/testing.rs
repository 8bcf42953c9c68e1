//! In-memory `CardRepository` used by bridge, tool and router tests.

use std::sync::Mutex;

use rmcp::model::{CallToolResult, RawContent};
use serde_json::Value;

use crate::trello::{CardRepository, TrelloError, TrelloResult};

/// One upstream call as seen by the fake.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedCall {
    pub method: &'static str,
    pub path: String,
    pub params: Vec<(String, String)>,
}

impl RecordedCall {
    pub fn param(&self, name: &str) -> Option<&str> {
        self.params
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
    }
}

type Responder = Box<dyn Fn(&RecordedCall) -> TrelloResult<Value> + Send + Sync>;

/// Answers every call through a closure and records what was asked.
pub struct FakeRepository {
    responder: Responder,
    calls: Mutex<Vec<RecordedCall>>,
}

impl FakeRepository {
    pub fn new<F>(responder: F) -> Self
    where
        F: Fn(&RecordedCall) -> TrelloResult<Value> + Send + Sync + 'static,
    {
        Self {
            responder: Box::new(responder),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn calls(&self) -> Vec<RecordedCall> {
        self.calls.lock().unwrap().clone()
    }

    pub fn paths(&self) -> Vec<String> {
        self.calls().into_iter().map(|c| c.path).collect()
    }

    fn record(&self, method: &'static str, path: &str, params: &[(&str, &str)]) -> TrelloResult<Value> {
        let call = RecordedCall {
            method,
            path: path.to_string(),
            params: params
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
        };
        let response = (self.responder)(&call);
        self.calls.lock().unwrap().push(call);
        response
    }
}

impl CardRepository for FakeRepository {
    async fn get(&self, path: &str, params: &[(&str, &str)]) -> TrelloResult<Value> {
        self.record("GET", path, params)
    }

    async fn post(&self, path: &str, fields: &[(&str, &str)]) -> TrelloResult<Value> {
        self.record("POST", path, fields)
    }

    async fn put(&self, path: &str, fields: &[(&str, &str)]) -> TrelloResult<Value> {
        self.record("PUT", path, fields)
    }
}

pub fn not_found(path: &str) -> TrelloError {
    TrelloError::Status {
        path: path.to_string(),
        status: 404,
        message: "The requested resource was not found.".to_string(),
    }
}

pub fn timeout(path: &str) -> TrelloError {
    TrelloError::Timeout {
        path: path.to_string(),
    }
}

/// First text block of a tool result, parsed back into JSON.
pub fn result_json(result: &CallToolResult) -> Value {
    match &result.content[0].raw {
        RawContent::Text(text) => serde_json::from_str(&text.text).unwrap(),
        _ => panic!("Expected text content"),
    }
}

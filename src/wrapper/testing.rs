//! Scripted transport for wrapper tests

use crate::{
    Error, Result,
    session::PapiTransport,
    types::{ApiRequest, JsonObject},
};
use serde_json::Value;
use std::collections::VecDeque;

/// Replays canned responses in order and records every request
#[derive(Debug, Default)]
pub struct ScriptedTransport {
    responses: VecDeque<Result<Option<JsonObject>>>,
    requests: Vec<ApiRequest>,
}

impl ScriptedTransport {
    pub fn new(responses: Vec<Result<Option<Value>>>) -> Self {
        let responses = responses
            .into_iter()
            .map(|r| {
                r.map(|body| {
                    body.map(|v| match v {
                        Value::Object(map) => map,
                        _ => panic!("scripted response must be a JSON object"),
                    })
                })
            })
            .collect();
        Self {
            responses,
            requests: Vec::new(),
        }
    }

    pub fn requests(&self) -> &[ApiRequest] {
        &self.requests
    }
}

#[async_trait::async_trait]
impl PapiTransport for ScriptedTransport {
    async fn send(&mut self, request: &ApiRequest) -> Result<Option<JsonObject>> {
        self.requests.push(request.clone());
        self.responses
            .pop_front()
            .unwrap_or_else(|| Err(Error::internal("no scripted response left")))
    }
}

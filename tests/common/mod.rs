//! Scripted authority for deterministic round-trip tests
#![allow(dead_code)]

use async_trait::async_trait;
use chess_client::net::{Authority, AuthorityError, AuthorityResult, MoveRequest, MoveResponse};
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use std::time::Duration;

/// One scripted round-trip outcome
pub enum Scripted {
    Reply(MoveResponse),
    /// Verdict delivered only after a delay (drives the thinking indicator)
    ReplyAfter(Duration, MoveResponse),
    Fail(String),
}

/// Authority that replays a fixed script and records every request it saw
#[derive(Default)]
pub struct ScriptedAuthority {
    replies: Mutex<VecDeque<Scripted>>,
    requests: Mutex<Vec<MoveRequest>>,
}

impl ScriptedAuthority {
    pub fn with(replies: impl IntoIterator<Item = Scripted>) -> Arc<Self> {
        Arc::new(Self {
            replies: Mutex::new(replies.into_iter().collect()),
            requests: Mutex::new(Vec::new()),
        })
    }

    pub fn requests(&self) -> Vec<MoveRequest> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl Authority for ScriptedAuthority {
    async fn submit_move(&self, request: MoveRequest) -> AuthorityResult<MoveResponse> {
        self.requests.lock().unwrap().push(request);
        let scripted = self.replies.lock().unwrap().pop_front();
        match scripted {
            Some(Scripted::Reply(response)) => Ok(response),
            Some(Scripted::ReplyAfter(delay, response)) => {
                tokio::time::sleep(delay).await;
                Ok(response)
            }
            Some(Scripted::Fail(reason)) => Err(AuthorityError::Unreachable(reason)),
            None => Err(AuthorityError::Unreachable("script exhausted".to_string())),
        }
    }
}

/// Bare accepting verdict, no opponent reply
pub fn accepted() -> MoveResponse {
    MoveResponse {
        valid: true,
        ..MoveResponse::default()
    }
}

/// Rejecting verdict with the given message
pub fn rejected(message: &str) -> MoveResponse {
    MoveResponse {
        valid: false,
        message: Some(message.to_string()),
        ..MoveResponse::default()
    }
}

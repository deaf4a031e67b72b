use std::sync::Mutex;

use async_trait::async_trait;

use crate::api::{AnalysisBackend, AnalysisResult, AnalyzeRequest, ChatRequest, ChatResponse};
use crate::error::ApiFailure;

/// In-process backend returning canned outcomes and recording every call.
pub struct FakeBackend {
    analyze_outcome: Result<AnalysisResult, ApiFailure>,
    chat_outcome: Result<ChatResponse, ApiFailure>,
    pub analyze_calls: Mutex<Vec<AnalyzeRequest>>,
    pub chat_calls: Mutex<Vec<ChatRequest>>,
}

impl FakeBackend {
    pub fn analyzing(outcome: Result<AnalysisResult, ApiFailure>) -> Self {
        FakeBackend {
            analyze_outcome: outcome,
            chat_outcome: Err(ApiFailure::transport("chat not configured")),
            analyze_calls: Mutex::new(Vec::new()),
            chat_calls: Mutex::new(Vec::new()),
        }
    }

    pub fn chatting(outcome: Result<ChatResponse, ApiFailure>) -> Self {
        FakeBackend {
            analyze_outcome: Err(ApiFailure::transport("analyze not configured")),
            chat_outcome: outcome,
            analyze_calls: Mutex::new(Vec::new()),
            chat_calls: Mutex::new(Vec::new()),
        }
    }

    pub fn analyze_count(&self) -> usize {
        self.analyze_calls.lock().unwrap().len()
    }

    pub fn chat_count(&self) -> usize {
        self.chat_calls.lock().unwrap().len()
    }
}

#[async_trait]
impl AnalysisBackend for FakeBackend {
    async fn analyze(&self, request: &AnalyzeRequest) -> Result<AnalysisResult, ApiFailure> {
        self.analyze_calls.lock().unwrap().push(request.clone());
        self.analyze_outcome.clone()
    }

    async fn chat(&self, request: &ChatRequest) -> Result<ChatResponse, ApiFailure> {
        self.chat_calls.lock().unwrap().push(request.clone());
        self.chat_outcome.clone()
    }
}

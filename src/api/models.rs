use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalyzeRequest {
    pub text: Option<String>,
    pub url: Option<String>,
}

impl AnalyzeRequest {
    /// Trim both inputs; an empty input is sent as `null`.
    pub fn from_inputs(text: &str, url: &str) -> Self {
        AnalyzeRequest {
            text: non_empty(text),
            url: non_empty(url),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_none() && self.url.is_none()
    }
}

fn non_empty(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

/// Payload returned by `/analyze`.
///
/// Kept as raw JSON so fields this client does not know about survive the
/// round trip to the renderer. The accessors read the fields the service is
/// known to send and return `None` when they are absent or mistyped.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AnalysisResult(pub Value);

impl AnalysisResult {
    pub fn new(value: Value) -> Self {
        AnalysisResult(value)
    }

    pub fn as_value(&self) -> &Value {
        &self.0
    }

    pub fn summary(&self) -> Option<&str> {
        self.0.get("summary").and_then(Value::as_str)
    }

    pub fn risk_score(&self) -> Option<&str> {
        self.0.get("risk_score").and_then(Value::as_str)
    }

    /// Alert entries; non-string entries are skipped.
    pub fn alerts(&self) -> Vec<&str> {
        self.0
            .get("alerts")
            .and_then(Value::as_array)
            .map(|items| items.iter().filter_map(Value::as_str).collect())
            .unwrap_or_default()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatRequest {
    pub question: String,
    pub context: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatResponse {
    pub answer: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct HealthResponse {
    pub status: String,
}

/// Error body of a failed request. Only a string `detail` is meaningful;
/// validation errors that carry a list of issues are ignored.
#[derive(Debug, Deserialize)]
pub struct ErrorBody {
    #[serde(default)]
    pub detail: Value,
}

impl ErrorBody {
    pub fn detail_text(body: &str) -> Option<String> {
        serde_json::from_str::<ErrorBody>(body)
            .ok()
            .and_then(|b| b.detail.as_str().map(str::to_string))
    }
}

#[cfg(test)]
#[path = "models_test.rs"]
mod models_test;

//! Form controller: owns the analysis form state and its request lifecycle.
//!
//! Every request is tagged with the generation current at issue time.
//! Clearing the form or starting another request advances the generation,
//! so a completion that arrives afterwards is dropped instead of
//! overwriting state the user has already moved past.

use crate::api::{AnalysisBackend, AnalysisResult, AnalyzeRequest};
use crate::error::ApiFailure;

pub const VALIDATION_MESSAGE: &str = "Please provide either text or URL";

pub const GENERIC_FAILURE_MESSAGE: &str =
    "Failed to analyze. Please check your connection and try again.";

pub const BLOCKED_ACCESS_MESSAGE: &str = "We could not directly access this website's Terms & Conditions from your browser. \
The site may not allow this kind of automated access or there may be network restrictions. \
Permission to read the page may not be granted, so please copy and paste the Terms & Conditions text \
manually and proceed with caution before accepting.";

/// Mutable state of the analysis form. Empty strings mean "no value".
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FormState {
    pub text: String,
    pub url: String,
    pub loading: bool,
    pub error: String,
    pub analysis_result: Option<AnalysisResult>,
    pub chat_context: String,
}

impl FormState {
    pub fn has_input(&self) -> bool {
        !self.text.trim().is_empty() || !self.url.trim().is_empty()
    }
}

/// A request that has been issued but not yet completed.
#[derive(Debug, Clone, PartialEq)]
pub struct PendingAnalysis {
    generation: u64,
    pub request: AnalyzeRequest,
}

impl PendingAnalysis {
    pub fn generation(&self) -> u64 {
        self.generation
    }
}

/// What the view should show for the current state.
#[derive(Debug, Clone, PartialEq)]
pub struct FormView<'a> {
    pub text: &'a str,
    pub url: &'a str,
    pub inputs_enabled: bool,
    pub analyze_label: &'static str,
    pub analyze_enabled: bool,
    pub clear_enabled: bool,
    pub error: Option<&'a str>,
    pub result: Option<&'a AnalysisResult>,
    /// Set only alongside a result, and only when the summary is non-empty.
    pub chat_context: Option<&'a str>,
}

pub struct Controller<B> {
    backend: B,
    state: FormState,
    generation: u64,
}

impl<B: AnalysisBackend> Controller<B> {
    pub fn new(backend: B) -> Self {
        Controller {
            backend,
            state: FormState::default(),
            generation: 0,
        }
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn state(&self) -> &FormState {
        &self.state
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Replace the text input. Ignored while a request is in flight.
    pub fn set_text(&mut self, text: impl Into<String>) {
        if self.state.loading {
            tracing::debug!("text edit ignored while loading");
            return;
        }
        self.state.text = text.into();
    }

    /// Replace the URL input. Ignored while a request is in flight.
    pub fn set_url(&mut self, url: impl Into<String>) {
        if self.state.loading {
            tracing::debug!("url edit ignored while loading");
            return;
        }
        self.state.url = url.into();
    }

    pub fn can_analyze(&self) -> bool {
        !self.state.loading && self.state.has_input()
    }

    pub fn can_clear(&self) -> bool {
        !self.state.loading
    }

    /// Validate the inputs and move into the loading state.
    ///
    /// Returns `None` without touching the network when both inputs are
    /// blank (the validation message is set) or a request is already in
    /// flight.
    pub fn begin_analyze(&mut self) -> Option<PendingAnalysis> {
        if self.state.loading {
            tracing::debug!(generation = self.generation, "analysis already in flight");
            return None;
        }

        let request = AnalyzeRequest::from_inputs(&self.state.text, &self.state.url);
        if request.is_empty() {
            self.state.error = VALIDATION_MESSAGE.to_string();
            return None;
        }

        self.generation += 1;
        self.state.loading = true;
        self.state.error.clear();
        self.state.analysis_result = None;
        self.state.chat_context.clear();

        tracing::info!(
            generation = self.generation,
            has_text = request.text.is_some(),
            url = request.url.as_deref().unwrap_or(""),
            "analysis started"
        );

        Some(PendingAnalysis {
            generation: self.generation,
            request,
        })
    }

    /// Apply the outcome of a request issued by [`Controller::begin_analyze`].
    ///
    /// Returns `false` when the request is stale and the outcome was dropped.
    pub fn finish_analyze(
        &mut self,
        pending: PendingAnalysis,
        outcome: Result<AnalysisResult, ApiFailure>,
    ) -> bool {
        if pending.generation != self.generation {
            tracing::debug!(
                issued = pending.generation,
                current = self.generation,
                "discarding stale analysis response"
            );
            return false;
        }

        match outcome {
            Ok(result) => {
                self.state.chat_context = result.summary().unwrap_or_default().to_string();
                self.state.analysis_result = Some(result);
                tracing::info!(generation = pending.generation, "analysis completed");
            }
            Err(failure) => {
                let message = failure_message(&failure, &pending.request);
                tracing::warn!(generation = pending.generation, error = %failure, "analysis failed");
                self.state.error = message;
            }
        }
        self.state.loading = false;
        true
    }

    /// Run one full analysis round trip. Returns `true` when a result was stored.
    pub async fn analyze(&mut self) -> bool {
        let Some(pending) = self.begin_analyze() else {
            return false;
        };
        let outcome = self.backend.analyze(&pending.request).await;
        let succeeded = outcome.is_ok();
        self.finish_analyze(pending, outcome) && succeeded
    }

    /// Reset every field. Any request still in flight becomes stale.
    pub fn clear(&mut self) {
        if self.state.loading {
            tracing::debug!(generation = self.generation, "clearing with a request in flight");
        }
        self.generation += 1;
        self.state = FormState::default();
    }

    pub fn view(&self) -> FormView<'_> {
        let state = &self.state;
        let result = state.analysis_result.as_ref();
        FormView {
            text: &state.text,
            url: &state.url,
            inputs_enabled: !state.loading,
            analyze_label: if state.loading { "Analyzing..." } else { "Analyze" },
            analyze_enabled: self.can_analyze(),
            clear_enabled: self.can_clear(),
            error: (!state.error.is_empty()).then_some(state.error.as_str()),
            result,
            chat_context: result
                .and(Some(state.chat_context.as_str()))
                .filter(|c| !c.is_empty()),
        }
    }
}

/// User-facing message for a failed analysis.
///
/// Prefers the server's `detail`, then the transport message, then a
/// generic fallback. A URL-only request that died with a network error is
/// explained as the site refusing automated access.
pub fn failure_message(failure: &ApiFailure, request: &AnalyzeRequest) -> String {
    let url_only = request.text.is_none() && request.url.is_some();
    let network_error = !failure.has_response()
        && failure
            .transport_message()
            .unwrap_or_default()
            .to_lowercase()
            .contains("network error");

    if url_only && network_error {
        return BLOCKED_ACCESS_MESSAGE.to_string();
    }

    failure
        .detail()
        .or_else(|| failure.transport_message())
        .unwrap_or(GENERIC_FAILURE_MESSAGE)
        .to_string()
}

#[cfg(test)]
#[path = "controller_test.rs"]
mod controller_test;

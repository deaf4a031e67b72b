pub mod client;
pub mod models;

pub use client::{AnalysisBackend, HttpClient};
pub use models::{AnalysisResult, AnalyzeRequest, ChatRequest, ChatResponse};

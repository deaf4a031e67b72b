pub mod api;
pub mod chat;
pub mod config;
pub mod controller;
pub mod error;
pub mod extract;
pub mod render;

#[cfg(test)]
mod test_support;

pub use api::{AnalysisBackend, AnalysisResult, HttpClient};
pub use chat::ChatPanel;
pub use config::Config;
pub use controller::{Controller, FormState, FormView};
pub use error::{ApiFailure, AppError, Result};

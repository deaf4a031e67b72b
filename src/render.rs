use serde_json::Value;

use crate::api::AnalysisResult;

/// Fields rendered in their own sections.
const KNOWN_FIELDS: [&str; 3] = ["summary", "risk_score", "alerts"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RiskLevel {
    Low,
    Medium,
    High,
}

impl RiskLevel {
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "low" => Some(RiskLevel::Low),
            "medium" => Some(RiskLevel::Medium),
            "high" => Some(RiskLevel::High),
            _ => None,
        }
    }

    pub fn badge(self) -> &'static str {
        match self {
            RiskLevel::Low => "[LOW RISK]",
            RiskLevel::Medium => "[MEDIUM RISK]",
            RiskLevel::High => "[HIGH RISK]",
        }
    }
}

/// Plain-text report of an analysis payload.
///
/// Never fails: missing or mistyped fields produce empty sections, and a
/// payload that is not an object is shown as pretty-printed JSON.
pub fn render_analysis(result: &AnalysisResult) -> String {
    let Some(fields) = result.as_value().as_object() else {
        return serde_json::to_string_pretty(result.as_value()).unwrap_or_default();
    };

    let mut out = String::new();

    out.push_str("## Summary\n\n");
    match result.summary().map(str::trim).filter(|s| !s.is_empty()) {
        Some(summary) => push_line(&mut out, summary),
        None => push_line(&mut out, "(no summary provided)"),
    }

    out.push_str("\n## Risk score\n\n");
    match result.risk_score() {
        Some(raw) => match RiskLevel::parse(raw) {
            Some(level) => push_line(&mut out, &format!("{} {}", level.badge(), raw.trim())),
            None => push_line(&mut out, raw),
        },
        None => push_line(&mut out, "(not rated)"),
    }

    out.push_str("\n## Alerts\n\n");
    let alerts = result.alerts();
    if alerts.is_empty() {
        push_line(&mut out, "No alerts.");
    } else {
        for alert in alerts {
            push_line(&mut out, &format!("- {}", alert));
        }
    }

    let extras: Vec<(&String, &Value)> = fields
        .iter()
        .filter(|(key, _)| !KNOWN_FIELDS.contains(&key.as_str()))
        .collect();
    if !extras.is_empty() {
        out.push_str("\n## Additional details\n\n");
        for (key, value) in extras {
            push_line(&mut out, &format!("- {}: {}", key, display_value(value)));
        }
    }

    out
}

fn push_line(out: &mut String, line: &str) {
    out.push_str(line);
    out.push('\n');
}

fn display_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => "(none)".to_string(),
        other => other.to_string(),
    }
}

#[cfg(test)]
#[path = "render_test.rs"]
mod render_test;

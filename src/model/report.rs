//! Analysis report returned by the resume analysis service

use ratatui::style::Color;
use serde::{Deserialize, Deserializer, Serialize};

/// Top-level response body: `{ "analysis": { ... } }`
#[derive(Debug, Clone, Deserialize)]
pub struct AnalyzeResponse {
    pub analysis: AnalysisReport,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisReport {
    pub summary: String,
    pub ats_score: i64,
    #[serde(default)]
    pub skills: Vec<String>,
    #[serde(default)]
    pub industry_focus: Vec<String>,
    #[serde(default)]
    pub recommendations: Vec<Recommendation>,
}

impl AnalysisReport {
    pub fn score_band(&self) -> ScoreBand {
        ScoreBand::from_score(self.ats_score)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recommendation {
    pub message: String,
    #[serde(default)]
    pub suggestion: Option<String>,
    #[serde(default)]
    pub example: Option<String>,
    #[serde(default, deserialize_with = "severity_or_unknown")]
    pub severity: Severity,
}

/// Null, non-string and unrecognized tags all become `Unknown`
fn severity_or_unknown<'de, D>(deserializer: D) -> Result<Severity, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(match value.as_ref().and_then(serde_json::Value::as_str) {
        Some("high") => Severity::High,
        Some("medium") => Severity::Medium,
        Some("low") => Severity::Low,
        _ => Severity::Unknown,
    })
}

/// Urgency tag on a recommendation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    High,
    Medium,
    Low,
    /// Missing or unrecognized tag
    #[default]
    #[serde(other)]
    Unknown,
}

impl Severity {
    /// Indicator dot color
    pub fn color(&self) -> Color {
        match self {
            Severity::High => Color::Red,
            Severity::Medium => Color::Yellow,
            Severity::Low => Color::Green,
            Severity::Unknown => Color::Gray,
        }
    }
}

/// Qualitative bucket for an ATS score
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScoreBand {
    /// 70 and above
    Positive,
    /// 40 to 69
    Warning,
    /// Below 40
    Critical,
}

impl ScoreBand {
    pub fn from_score(score: i64) -> ScoreBand {
        if score >= 70 {
            ScoreBand::Positive
        } else if score >= 40 {
            ScoreBand::Warning
        } else {
            ScoreBand::Critical
        }
    }

    pub fn color(&self) -> Color {
        match self {
            ScoreBand::Positive => Color::Rgb(16, 185, 129),
            ScoreBand::Warning => Color::Rgb(245, 158, 11),
            ScoreBand::Critical => Color::Rgb(239, 68, 68),
        }
    }

    pub fn message(&self) -> &'static str {
        match self {
            ScoreBand::Positive => "Great job! Your resume is well-optimized for ATS systems.",
            ScoreBand::Warning => "Your resume needs some improvements to be more ATS-friendly.",
            ScoreBand::Critical => {
                "Your resume needs significant improvements to pass ATS screening."
            }
        }
    }
}

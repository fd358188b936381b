//! Check result data shapes
//!
//! These mirror the JSON body returned by the checking API:
//! `{ "documentStructure": Paragraph[], "aiSuggestions": AiSuggestion[] }`.

use serde::{Deserialize, Serialize};

/// A single rule violation attached to a run or a paragraph
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorDetail {
    /// Error category reported by the API (e.g. `FontError`, `IndentError`)
    #[serde(rename = "type")]
    pub kind: String,

    /// Human-readable description
    pub message: String,
}

impl ErrorDetail {
    pub fn new(kind: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            kind: kind.into(),
            message: message.into(),
        }
    }
}

/// A contiguous span of text within a paragraph sharing formatting
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Run {
    pub text: String,

    /// Font the API evaluated this run against
    #[serde(default)]
    pub font: String,

    #[serde(default)]
    pub errors: Vec<ErrorDetail>,
}

impl Run {
    /// True when this run carries at least one error
    pub fn is_flagged(&self) -> bool {
        !self.errors.is_empty()
    }
}

/// Block kind tag. The API only ever emits paragraphs.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BlockKind {
    #[default]
    Paragraph,
}

/// An ordered sequence of runs plus paragraph-level style and errors
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Paragraph {
    #[serde(rename = "type")]
    pub kind: BlockKind,

    pub text: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub style: Option<String>,

    #[serde(default)]
    pub errors: Vec<ErrorDetail>,

    #[serde(default)]
    pub runs: Vec<Run>,
}

impl Paragraph {
    /// True when the paragraph itself (not its runs) carries errors
    pub fn is_flagged(&self) -> bool {
        !self.errors.is_empty()
    }

    pub fn has_flagged_runs(&self) -> bool {
        self.runs.iter().any(Run::is_flagged)
    }

    /// Errors on the paragraph and all of its runs
    pub fn error_count(&self) -> usize {
        self.errors.len() + self.runs.iter().map(|r| r.errors.len()).sum::<usize>()
    }
}

/// A content suggestion produced by the API's AI reviewer
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AiSuggestion {
    pub message: String,
}

/// The full API response
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckResult {
    pub document_structure: Vec<Paragraph>,

    #[serde(default, deserialize_with = "null_as_empty")]
    pub ai_suggestions: Vec<AiSuggestion>,
}

impl CheckResult {
    pub fn has_suggestions(&self) -> bool {
        !self.ai_suggestions.is_empty()
    }

    /// Aggregate counts over the whole document
    pub fn summary(&self) -> CheckSummary {
        let mut summary = CheckSummary {
            paragraphs: self.document_structure.len(),
            suggestions: self.ai_suggestions.len(),
            ..CheckSummary::default()
        };

        for paragraph in &self.document_structure {
            if paragraph.is_flagged() {
                summary.flagged_paragraphs += 1;
            }
            summary.flagged_runs += paragraph.runs.iter().filter(|r| r.is_flagged()).count();
            summary.total_errors += paragraph.error_count();
        }

        summary
    }
}

/// Counts shown in the result summary line
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct CheckSummary {
    pub paragraphs: usize,
    pub flagged_paragraphs: usize,
    pub flagged_runs: usize,
    pub total_errors: usize,
    pub suggestions: usize,
}

impl CheckSummary {
    pub fn is_clean(&self) -> bool {
        self.total_errors == 0
    }
}

fn null_as_empty<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: serde::Deserializer<'de>,
    T: Deserialize<'de>,
{
    Ok(Option::<Vec<T>>::deserialize(deserializer)?.unwrap_or_default())
}

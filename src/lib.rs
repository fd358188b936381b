// doccheck - Document checker front-end
// Uploads .docx files to a checking API and renders flagged paragraphs, runs and AI suggestions

pub mod cli;
pub mod models;
pub mod services;
pub mod ui;

pub use anyhow::{Context, Result};
pub use colored::Colorize;

// Re-export commonly used types
pub use models::{CheckResult, CheckSummary, DocCheckConfig};
pub use services::{CheckError, CheckerClient, DocumentChecker, DocumentFile, Locale, Session};

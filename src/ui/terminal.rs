//! Terminal rendering of check results
//!
//! Flagged runs are highlighted inline and numbered; the numbered notes under
//! each paragraph carry the error details a browser would show on hover.

use crate::models::{CheckResult, ErrorDetail, Paragraph};
use crate::services::messages::{Locale, Message};
use colored::Colorize;
use std::fmt::Write;

#[derive(Debug, Clone, Copy)]
pub struct TerminalRenderer {
    locale: Locale,
    color: bool,
}

impl TerminalRenderer {
    pub fn new(locale: Locale, color: bool) -> Self {
        Self { locale, color }
    }

    /// Color is on unless disabled explicitly, via `NO_COLOR`, or stdout is not a terminal
    pub fn auto(locale: Locale, no_color: bool) -> Self {
        use std::io::IsTerminal;
        let color = !no_color
            && std::env::var_os("NO_COLOR").is_none()
            && std::io::stdout().is_terminal();
        Self::new(locale, color)
    }

    pub fn render(&self, result: &CheckResult) -> String {
        let mut out = String::new();

        if result.has_suggestions() {
            let heading = format!("✨ {}", Message::SuggestionsHeading.text(self.locale));
            let _ = writeln!(out, "{}", self.heading(&heading));
            for suggestion in &result.ai_suggestions {
                let _ = writeln!(out, "  • {}", self.paint_suggestion(&suggestion.message));
            }
            out.push('\n');
        }

        let heading = format!("📄 {}", Message::DetailsHeading.text(self.locale));
        let _ = writeln!(out, "{}", self.heading(&heading));
        for (index, paragraph) in result.document_structure.iter().enumerate() {
            self.render_paragraph(&mut out, index + 1, paragraph);
        }

        out.push('\n');
        let _ = writeln!(out, "{}", self.summary_line(result));
        out
    }

    fn render_paragraph(&self, out: &mut String, number: usize, paragraph: &Paragraph) {
        let mut line = String::new();
        let mut notes: Vec<(usize, &ErrorDetail)> = Vec::new();
        let mut marker = 0;

        for run in &paragraph.runs {
            if run.is_flagged() {
                marker += 1;
                line.push_str(&self.paint_flagged(&run.text, marker));
                notes.extend(run.errors.iter().map(|e| (marker, e)));
            } else {
                line.push_str(&run.text);
            }
        }

        // Paragraphs without run data still show their text
        if paragraph.runs.is_empty() {
            line.push_str(&paragraph.text);
        }

        let label = format!("[{}]", number);
        let label = if paragraph.is_flagged() {
            self.paint(&label, |s| s.red().bold().to_string())
        } else {
            self.paint(&label, |s| s.bright_black().to_string())
        };
        let style = paragraph
            .style
            .as_deref()
            .map(|s| self.paint(&format!(" ({})", s), |s| s.bright_black().to_string()))
            .unwrap_or_default();

        let _ = writeln!(out, "{}{} {}", label, style, line);

        for (marker, error) in notes {
            let note = format!("    ^{} {}: {}", marker, error.kind, error.message);
            let _ = writeln!(out, "{}", self.paint(&note, |s| s.yellow().to_string()));
        }
        for error in &paragraph.errors {
            let note = format!("    ! {}: {}", error.kind, error.message);
            let _ = writeln!(out, "{}", self.paint(&note, |s| s.red().to_string()));
        }
    }

    fn summary_line(&self, result: &CheckResult) -> String {
        let summary = result.summary();
        let text = match self.locale {
            Locale::Ja => format!(
                "段落 {} 件 / 指摘のある段落 {} 件 / 指摘のあるラン {} 件 / エラー合計 {} 件 / AI提案 {} 件",
                summary.paragraphs,
                summary.flagged_paragraphs,
                summary.flagged_runs,
                summary.total_errors,
                summary.suggestions
            ),
            Locale::En => format!(
                "{} paragraphs, {} flagged paragraphs, {} flagged runs, {} errors, {} suggestions",
                summary.paragraphs,
                summary.flagged_paragraphs,
                summary.flagged_runs,
                summary.total_errors,
                summary.suggestions
            ),
        };
        if summary.is_clean() {
            self.paint(&format!("✓ {}", text), |s| s.green().to_string())
        } else {
            self.paint(&format!("⚠ {}", text), |s| s.yellow().to_string())
        }
    }

    fn heading(&self, text: &str) -> String {
        self.paint(text, |s| s.cyan().bold().to_string())
    }

    fn paint_suggestion(&self, text: &str) -> String {
        self.paint(text, |s| s.blue().to_string())
    }

    fn paint_flagged(&self, text: &str, marker: usize) -> String {
        if self.color {
            format!(
                "{}{}",
                text.black().on_yellow().underline(),
                format!("^{}", marker).red()
            )
        } else {
            format!("[[{}]]^{}", text, marker)
        }
    }

    fn paint(&self, text: &str, f: impl Fn(&str) -> String) -> String {
        if self.color {
            f(text)
        } else {
            text.to_string()
        }
    }
}

/// Render an error line the way `main` reports failures
pub fn render_error(message: &str, locale: Locale, color: bool) -> String {
    let text = format!("{} {}", Message::ErrorLabel.text(locale), message);
    if color {
        text.red().to_string()
    } else {
        text
    }
}

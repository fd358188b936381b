//! HTML rendering for the web front-end
//!
//! Produces the result pane fragment returned by `POST /check` and the page
//! shell served at `/`. All document text is escaped.

use crate::models::{CheckResult, ErrorDetail, Paragraph, Run};
use crate::services::document_file::DOCX_MIME;
use crate::services::messages::{Locale, Message};
use crate::services::session::SessionView;
use serde::Serialize;
use std::fmt::Write;

const PAGE_TEMPLATE: &str = include_str!("web/assets/index.html");

/// Values the page script needs, injected as JSON
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InjectedConfig {
    pub check_url: String,
    pub accepted_mime: String,
    pub invalid_file_type: String,
    pub no_file_selected: String,
    pub unknown_error: String,
    pub analyzing: String,
    pub checking: String,
    pub check_button: String,
    pub error_label: String,
}

impl InjectedConfig {
    pub fn new(locale: Locale) -> Self {
        Self {
            check_url: "/check".to_string(),
            accepted_mime: DOCX_MIME.to_string(),
            invalid_file_type: Message::InvalidFileType.text(locale),
            no_file_selected: Message::NoFileSelected.text(locale),
            unknown_error: Message::UnknownError.text(locale),
            analyzing: Message::Analyzing.text(locale),
            checking: Message::Checking.text(locale),
            check_button: Message::CheckButton.text(locale),
            error_label: Message::ErrorLabel.text(locale),
        }
    }
}

/// Escape text for HTML element content and attribute values
pub fn html_escape(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

/// Render the full page shell
pub fn render_page(locale: Locale, year: i32) -> String {
    let config = InjectedConfig::new(locale);
    // `</` cannot appear inside the JSON script element
    let config_json = serde_json::to_string(&config)
        .unwrap_or_else(|_| "{}".to_string())
        .replace("</", "<\\/");

    let replacements = [
        ("{{lang}}", locale.code().to_string()),
        ("{{title}}", html_escape(&Message::AppTitle.text(locale))),
        ("{{subtitle}}", html_escape(&Message::AppSubtitle.text(locale))),
        ("{{step_select}}", html_escape(&Message::StepSelectFile.text(locale))),
        ("{{step_results}}", html_escape(&Message::StepResults.text(locale))),
        ("{{drop_click}}", html_escape(&Message::DropHintClick.text(locale))),
        ("{{drop_drag}}", html_escape(&Message::DropHintDrag.text(locale))),
        ("{{docx_only}}", html_escape(&Message::DocxOnly.text(locale))),
        ("{{remove_file}}", html_escape(&Message::RemoveFile.text(locale))),
        ("{{check_button}}", html_escape(&Message::CheckButton.text(locale))),
        ("{{result_pane}}", render_state(SessionView::Idle, locale)),
        ("{{year}}", year.to_string()),
        ("{{config}}", config_json),
    ];

    replacements
        .iter()
        .fold(PAGE_TEMPLATE.to_string(), |page, (token, value)| {
            page.replace(token, value)
        })
}

/// Render the result pane for a session state
pub fn render_state(view: SessionView<'_>, locale: Locale) -> String {
    match view {
        SessionView::Idle => format!(
            r#"<div class="pane-message idle"><p>{}</p></div>"#,
            html_escape(&Message::IdleHint.text(locale))
        ),
        SessionView::Loading => format!(
            r#"<div class="pane-message loading"><span class="spinner large"></span><span>{}</span></div>"#,
            html_escape(&Message::Analyzing.text(locale))
        ),
        SessionView::Failed(message) => render_error(message, locale),
        SessionView::Completed(result) => render_result(result, locale),
    }
}

pub fn render_error(message: &str, locale: Locale) -> String {
    format!(
        r#"<div class="pane-message error" role="alert"><p><strong>{}</strong> {}</p></div>"#,
        html_escape(&Message::ErrorLabel.text(locale)),
        html_escape(message)
    )
}

/// Render a check result
pub fn render_result(result: &CheckResult, locale: Locale) -> String {
    let mut out = String::from(r#"<div class="result">"#);

    if result.has_suggestions() {
        let _ = write!(
            out,
            r#"<section class="suggestions"><h3><span class="icon">✨</span>{}</h3><ul>"#,
            html_escape(&Message::SuggestionsHeading.text(locale))
        );
        for suggestion in &result.ai_suggestions {
            let _ = write!(
                out,
                r#"<li><span class="icon">✨</span><p>{}</p></li>"#,
                html_escape(&suggestion.message)
            );
        }
        out.push_str("</ul></section>");
    }

    let _ = write!(
        out,
        r#"<section class="details"><h3><span class="icon">📄</span>{}</h3><div class="paragraphs">"#,
        html_escape(&Message::DetailsHeading.text(locale))
    );
    for paragraph in &result.document_structure {
        render_paragraph(&mut out, paragraph);
    }
    out.push_str("</div></section></div>");
    out
}

fn render_paragraph(out: &mut String, paragraph: &Paragraph) {
    let class = if paragraph.is_flagged() {
        "paragraph flagged"
    } else {
        "paragraph"
    };
    let style_attr = paragraph
        .style
        .as_deref()
        .map(|s| format!(r#" data-style="{}""#, html_escape(s)))
        .unwrap_or_default();

    let _ = write!(out, r#"<div class="{}"{}><p class="text">"#, class, style_attr);
    if paragraph.runs.is_empty() {
        out.push_str(&html_escape(&paragraph.text));
    }
    for run in &paragraph.runs {
        render_run(out, run);
    }
    out.push_str("</p>");

    if paragraph.is_flagged() {
        out.push_str(r#"<div class="paragraph-errors">"#);
        for error in &paragraph.errors {
            let _ = write!(
                out,
                r#"<div class="paragraph-error"><span class="icon">⚠</span><p>{}</p></div>"#,
                error_line(error)
            );
        }
        out.push_str("</div>");
    }
    out.push_str("</div>");
}

fn render_run(out: &mut String, run: &Run) {
    if !run.is_flagged() {
        let _ = write!(out, r#"<span class="run">{}</span>"#, html_escape(&run.text));
        return;
    }

    let _ = write!(
        out,
        r#"<span class="run flagged" tabindex="0"><span class="run-text">{}</span><span class="tooltip" role="tooltip">"#,
        html_escape(&run.text)
    );
    for error in &run.errors {
        let _ = write!(out, "<p>{}</p>", error_line(error));
    }
    out.push_str("</span></span>");
}

fn error_line(error: &ErrorDetail) -> String {
    format!(
        "<strong>{}:</strong> {}",
        html_escape(&error.kind),
        html_escape(&error.message)
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{AiSuggestion, BlockKind};

    fn paragraph(runs: Vec<Run>, errors: Vec<ErrorDetail>) -> Paragraph {
        Paragraph {
            kind: BlockKind::Paragraph,
            text: runs.iter().map(|r| r.text.as_str()).collect(),
            style: Some("本文".into()),
            errors,
            runs,
        }
    }

    fn run(text: &str, errors: Vec<ErrorDetail>) -> Run {
        Run {
            text: text.into(),
            font: "MS明朝".into(),
            errors,
        }
    }

    #[test]
    fn test_html_escape() {
        assert_eq!(
            html_escape(r#"<a href="x">'&'</a>"#),
            "&lt;a href=&quot;x&quot;&gt;&#39;&amp;&#39;&lt;/a&gt;"
        );
    }

    #[test]
    fn test_flagged_run_has_tooltip() {
        let result = CheckResult {
            document_structure: vec![paragraph(
                vec![
                    run("ok", vec![]),
                    run("<bad>", vec![ErrorDetail::new("FontError", "not 'Century'")]),
                ],
                vec![],
            )],
            ai_suggestions: vec![],
        };
        let html = render_result(&result, Locale::Ja);

        assert!(html.contains(r#"<span class="run">ok</span>"#));
        assert!(html.contains(r#"<span class="run-text">&lt;bad&gt;</span>"#));
        assert!(html.contains("<p><strong>FontError:</strong> not &#39;Century&#39;</p>"));
        assert!(html.contains(r#"<div class="paragraph" data-style="本文">"#));
        assert!(!html.contains("suggestions"));
    }

    #[test]
    fn test_flagged_paragraph_lists_errors() {
        let result = CheckResult {
            document_structure: vec![paragraph(
                vec![run("本文", vec![])],
                vec![ErrorDetail::new("IndentError", "インデントが不正です")],
            )],
            ai_suggestions: vec![AiSuggestion {
                message: "敬語を確認してください".into(),
            }],
        };
        let html = render_result(&result, Locale::Ja);

        assert!(html.contains(r#"<div class="paragraph flagged""#));
        assert!(html.contains("<strong>IndentError:</strong> インデントが不正です"));
        assert!(html.contains("AIからの提案"));
        assert!(html.contains("<p>敬語を確認してください</p>"));
    }

    #[test]
    fn test_render_states() {
        assert!(render_state(SessionView::Idle, Locale::Ja).contains("「ドキュメントをチェック」"));
        assert!(render_state(SessionView::Loading, Locale::Ja).contains("解析しています..."));

        let error = render_state(SessionView::Failed("<oops>"), Locale::Ja);
        assert!(error.contains("<strong>エラー:</strong> &lt;oops&gt;"));
    }

    #[test]
    fn test_render_page_injects_labels_and_config() {
        let page = render_page(Locale::Ja, 2026);

        assert!(page.contains(r#"<html lang="ja">"#));
        assert!(page.contains("自動書類チェッカー"));
        assert!(page.contains("&copy; 2026"));
        assert!(page.contains(r#""checkUrl":"/check""#));
        assert!(page.contains(DOCX_MIME));
        assert!(!page.contains("{{"));
    }
}

//! Check session state
//!
//! Tracks the selected file, whether a check is in flight, and the last
//! result or error. Both the CLI and the web front-end drive a check through
//! this type so they share the same transitions.

use crate::models::CheckResult;
use crate::services::checker_client::{CheckError, DocumentChecker};
use crate::services::document_file::DocumentFile;
use crate::services::messages::{Locale, Message};

/// What the result pane should show
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionView<'a> {
    Idle,
    Loading,
    Failed(&'a str),
    Completed(&'a CheckResult),
}

#[derive(Debug, Default)]
pub struct Session {
    locale: Locale,
    selected_file: Option<DocumentFile>,
    is_loading: bool,
    result: Option<CheckResult>,
    error: Option<String>,
}

impl Session {
    pub fn new(locale: Locale) -> Self {
        Self {
            locale,
            ..Self::default()
        }
    }

    pub fn selected_file(&self) -> Option<&DocumentFile> {
        self.selected_file.as_ref()
    }

    pub fn is_loading(&self) -> bool {
        self.is_loading
    }

    pub fn result(&self) -> Option<&CheckResult> {
        self.result.as_ref()
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Replace (or clear) the selected file. Any previous outcome is discarded.
    pub fn select_file(&mut self, file: Option<DocumentFile>) {
        self.selected_file = file;
        self.result = None;
        self.error = None;
    }

    /// Record a failure that happened outside the checker, such as a rejected upload
    pub fn fail(&mut self, message: impl Into<String>) {
        self.is_loading = false;
        self.result = None;
        self.error = Some(message.into());
    }

    /// Check button enabled state
    pub fn can_check(&self) -> bool {
        self.selected_file.is_some() && !self.is_loading
    }

    /// Enter the loading state for the selected file
    pub fn begin_check(&mut self) -> Result<&DocumentFile, String> {
        let Some(file) = self.selected_file.as_ref() else {
            let message = Message::NoFileSelected.text(self.locale);
            self.error = Some(message.clone());
            return Err(message);
        };

        self.is_loading = true;
        self.result = None;
        self.error = None;
        Ok(file)
    }

    /// Leave the loading state with the checker's outcome
    pub fn finish(&mut self, outcome: Result<CheckResult, CheckError>) {
        self.is_loading = false;
        match outcome {
            Ok(result) => {
                self.result = Some(result);
                self.error = None;
            }
            Err(e) => {
                let message = e.user_message(self.locale);
                self.error = Some(if message.trim().is_empty() {
                    Message::UnknownError.text(self.locale)
                } else {
                    message
                });
                self.result = None;
            }
        }
    }

    /// Run one check against `checker` for the selected file
    pub async fn run(&mut self, checker: &dyn DocumentChecker) {
        let outcome = match self.begin_check() {
            Ok(file) => checker.check(file).await,
            Err(_) => return,
        };
        self.finish(outcome);
    }

    /// Error takes precedence over loading, loading over result
    pub fn view(&self) -> SessionView<'_> {
        if let Some(error) = &self.error {
            SessionView::Failed(error)
        } else if self.is_loading {
            SessionView::Loading
        } else if let Some(result) = &self.result {
            SessionView::Completed(result)
        } else {
            SessionView::Idle
        }
    }
}

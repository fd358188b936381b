//! `doccheck check` - upload one document and render the result

use crate::models::{CheckResult, DocCheckConfig};
use crate::services::{CheckerClient, DocumentFile, Locale, Message, Session, SessionView};
use crate::ui::TerminalRenderer;
use crate::Result;
use clap::Args;
use indicatif::{ProgressBar, ProgressStyle};
use std::io::IsTerminal;
use std::path::PathBuf;
use std::time::Duration;

#[derive(Args, Debug)]
pub struct CheckArgs {
    /// The .docx file to check
    pub file: PathBuf,

    /// Checking API URL (overrides config and DOCCHECK_ENDPOINT)
    #[arg(long)]
    pub endpoint: Option<String>,

    /// Print the raw result as JSON
    #[arg(long)]
    pub json: bool,

    /// Disable colored output
    #[arg(long)]
    pub no_color: bool,

    /// Exit with status 2 when the document has any errors
    #[arg(long)]
    pub fail_on_errors: bool,

    /// Message language (ja, en)
    #[arg(long)]
    pub locale: Option<Locale>,
}

/// Whether the checked document came back clean
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CheckOutcome {
    Clean,
    Flagged,
}

impl CheckOutcome {
    pub fn from_result(result: &CheckResult) -> Self {
        if result.summary().is_clean() {
            CheckOutcome::Clean
        } else {
            CheckOutcome::Flagged
        }
    }
}

/// Exit status for any failed command
pub const EXIT_FAILURE: i32 = 1;

/// Exit status when `--fail-on-errors` is set and the document has errors
pub const EXIT_FLAGGED: i32 = 2;

/// Process exit status for a finished `check`
pub fn exit_code(outcome: &Result<CheckOutcome>, fail_on_errors: bool) -> i32 {
    match outcome {
        Ok(CheckOutcome::Flagged) if fail_on_errors => EXIT_FLAGGED,
        Ok(_) => 0,
        Err(_) => EXIT_FAILURE,
    }
}

/// Apply command-line overrides on top of the loaded config
pub fn resolve_config(args: &CheckArgs, mut config: DocCheckConfig) -> DocCheckConfig {
    if let Some(endpoint) = &args.endpoint {
        config.endpoint = endpoint.clone();
    }
    if let Some(locale) = args.locale {
        config.locale = locale;
    }
    config
}

pub async fn run(args: CheckArgs, config: DocCheckConfig) -> Result<CheckOutcome> {
    let config = resolve_config(&args, config);
    let locale = config.locale;

    let file = DocumentFile::from_path(&args.file)
        .map_err(|e| anyhow::anyhow!(e.user_message(locale)))?;
    if let Err(e) = file.validate() {
        tracing::info!(file = %file.name, error = %e, "file rejected before upload");
        anyhow::bail!(e.user_message(locale));
    }

    if !args.json {
        eprintln!("📄 {} ({})", file.name, file.size_kb());
    }

    let client = CheckerClient::from_config(&config)?;
    let mut session = Session::new(locale);
    session.select_file(Some(file));

    let spinner = (!args.json && std::io::stderr().is_terminal())
        .then(|| start_spinner(&Message::Checking.text(locale)));
    session.run(&client).await;
    if let Some(spinner) = spinner {
        spinner.finish_and_clear();
    }

    match session.view() {
        SessionView::Completed(result) => {
            if args.json {
                println!("{}", serde_json::to_string_pretty(result)?);
            } else {
                print!("{}", TerminalRenderer::auto(locale, args.no_color).render(result));
            }
            Ok(CheckOutcome::from_result(result))
        }
        SessionView::Failed(message) => Err(anyhow::anyhow!(message.to_string())),
        SessionView::Idle | SessionView::Loading => {
            Err(anyhow::anyhow!(Message::UnknownError.text(locale)))
        }
    }
}

fn start_spinner(message: &str) -> ProgressBar {
    let spinner = ProgressBar::new_spinner();
    spinner.set_style(
        ProgressStyle::with_template("{spinner:.cyan} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );
    spinner.set_message(message.to_string());
    spinner.enable_steady_tick(Duration::from_millis(100));
    spinner
}

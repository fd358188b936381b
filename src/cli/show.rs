//! `doccheck show` - render a saved JSON result

use crate::models::{CheckResult, DocCheckConfig};
use crate::services::Locale;
use crate::ui::TerminalRenderer;
use crate::Result;
use anyhow::Context;
use clap::Args;
use std::path::{Path, PathBuf};

#[derive(Args, Debug)]
pub struct ShowArgs {
    /// JSON file previously written by `doccheck check --json` or returned by the API
    pub result_file: PathBuf,

    /// Disable colored output
    #[arg(long)]
    pub no_color: bool,

    /// Message language (ja, en)
    #[arg(long)]
    pub locale: Option<Locale>,
}

pub fn load_result(path: &Path) -> Result<CheckResult> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    let result = serde_json::from_str(&content)
        .with_context(|| format!("{} is not a check result", path.display()))?;
    Ok(result)
}

pub fn run(args: ShowArgs, config: DocCheckConfig) -> Result<()> {
    let locale = args.locale.unwrap_or(config.locale);
    let result = load_result(&args.result_file)?;
    print!("{}", TerminalRenderer::auto(locale, args.no_color).render(&result));
    Ok(())
}

use clap::{ArgAction, CommandFactory, Parser, Subcommand};
use clap_complete::{generate, Shell};
use doccheck::cli::check::{exit_code, CheckArgs, EXIT_FAILURE};
use doccheck::cli::config::ConfigCommands;
use doccheck::cli::serve::ServeArgs;
use doccheck::cli::show::ShowArgs;
use doccheck::ui::render_error;
use doccheck::{DocCheckConfig, Locale, Result};
use std::io::{self, IsTerminal};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "doccheck")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Check Word (.docx) documents against a document-checking API", long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace). RUST_LOG takes precedence.
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Upload a .docx file and show the flagged paragraphs, runs and AI suggestions
    Check(CheckArgs),

    /// Render a saved JSON check result
    Show(ShowArgs),

    /// Run the browser front-end
    Serve(ServeArgs),

    /// Configuration operations
    #[command(subcommand)]
    Config(ConfigCommands),

    /// Generate shell completions
    Completions {
        /// Shell type (bash, zsh, fish, powershell)
        #[arg(value_enum)]
        shell: Shell,
    },
}

impl Commands {
    /// Language requested with `--locale`, if the command takes one
    fn locale_flag(&self) -> Option<Locale> {
        match self {
            Commands::Check(args) => args.locale,
            Commands::Show(args) => args.locale,
            Commands::Serve(args) => args.locale,
            Commands::Config(_) | Commands::Completions { .. } => None,
        }
    }
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .expect("Failed to create tokio runtime");

    match runtime.block_on(run_async(cli)) {
        Ok(code) => std::process::exit(code),
        Err((e, locale)) => {
            eprintln!("{}", render_error(&e.to_string(), locale, stderr_color()));
            std::process::exit(EXIT_FAILURE);
        }
    }
}

fn stderr_color() -> bool {
    io::stderr().is_terminal() && std::env::var_os("NO_COLOR").is_none()
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("doccheck={level},tower_http={level}")));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_ansi(stderr_color())
        .with_target(false)
        .init();
}

async fn run_async(cli: Cli) -> std::result::Result<i32, (anyhow::Error, Locale)> {
    let flag = cli.command.locale_flag();
    let project_root = std::env::current_dir()
        .map_err(|e| (anyhow::Error::from(e), flag.unwrap_or_default()))?;
    let config = DocCheckConfig::load(&project_root)
        .map_err(|e| (anyhow::Error::from(e), flag.unwrap_or_default()))?;
    let locale = flag.unwrap_or(config.locale);

    dispatch(cli.command, config, &project_root)
        .await
        .map_err(|e| (e, locale))
}

async fn dispatch(
    command: Commands,
    config: DocCheckConfig,
    project_root: &std::path::Path,
) -> Result<i32> {
    match command {
        Commands::Check(args) => {
            let fail_on_errors = args.fail_on_errors;
            let outcome = doccheck::cli::check::run(args, config).await;
            let code = exit_code(&outcome, fail_on_errors);
            return outcome.map(|_| code);
        }

        Commands::Show(args) => {
            doccheck::cli::show::run(args, config)?;
        }

        Commands::Serve(args) => {
            doccheck::cli::serve::run(args, config).await?;
        }

        Commands::Config(cmd) => {
            doccheck::cli::config::run(cmd, config, project_root)?;
        }

        Commands::Completions { shell } => {
            generate(shell, &mut Cli::command(), "doccheck", &mut io::stdout());
        }
    }

    Ok(0)
}

//! `doccheck serve` - run the web front-end

use crate::models::DocCheckConfig;
use crate::services::{CheckerClient, Locale};
use crate::ui::web;
use crate::Result;
use clap::Args;
use std::sync::Arc;

#[derive(Args, Debug)]
pub struct ServeArgs {
    /// Bind host
    #[arg(long)]
    pub host: Option<String>,

    /// HTTP port (default: 3000)
    #[arg(short, long)]
    pub port: Option<u16>,

    /// Checking API URL uploads are forwarded to
    #[arg(long)]
    pub endpoint: Option<String>,

    /// Message language (ja, en)
    #[arg(long)]
    pub locale: Option<Locale>,

    /// Open the page in the default browser (requires the `ui` feature)
    #[arg(long)]
    pub open: bool,
}

pub fn resolve_config(args: &ServeArgs, mut config: DocCheckConfig) -> DocCheckConfig {
    if let Some(host) = &args.host {
        config.server.host = host.clone();
    }
    if let Some(port) = args.port {
        config.server.port = port;
    }
    if let Some(endpoint) = &args.endpoint {
        config.endpoint = endpoint.clone();
    }
    if let Some(locale) = args.locale {
        config.locale = locale;
    }
    config
}

pub async fn run(args: ServeArgs, config: DocCheckConfig) -> Result<()> {
    let config = resolve_config(&args, config);
    let client = CheckerClient::from_config(&config)?;
    web::serve(&config, Arc::new(client), args.open).await
}

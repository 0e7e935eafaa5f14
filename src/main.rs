//! Herald - a localized marketing site server.

mod cli;
mod config;
mod content;
mod i18n;
mod inspect;
mod logger;
mod render;
mod router;
mod serve;
mod site;
mod watch;

use anyhow::Result;
use clap::Parser;
use cli::{Cli, Commands};
use config::SiteConfig;
use inspect::{check_site, resolve_url};
use serve::serve_site;

fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = SiteConfig::load(&cli)?;

    match &cli.command {
        Commands::Serve { .. } => serve_site(config),
        Commands::Resolve { url, locale } => resolve_url(config, url, locale.as_deref()),
        Commands::Check => check_site(config),
    }
}

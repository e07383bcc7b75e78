mod archive;
mod cli;
mod commands;
mod config;
mod constants;
mod error;
mod http;
mod installer;
mod platform;
mod release;
mod ui;

use clap::Parser;
use cli::{Cli, Commands};
use release::catalog::ReleaseCatalog;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();

    // The catalog is built once here and handed down by reference.
    let catalog = ReleaseCatalog::builtin()?;

    match cli.command {
        Commands::Url {
            major_version,
            os,
            arch,
            checksum,
        } => commands::url::print_url(&catalog, major_version, os, arch, checksum),
        Commands::Install {
            major_version,
            os,
            arch,
            if_not_exists,
        } => commands::install::install(&catalog, major_version, os, arch, if_not_exists).await,
        Commands::List { major_version } => commands::list::list(&catalog, major_version),
        Commands::UpdateTags { repo, output } => {
            commands::update::update_tags(&repo, &output).await
        }
    }
}

// CLI module for handling the command-line interface

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "tcfetch")]
#[command(about = "Deterministic resolver and installer for pre-built toolchain release archives")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Print the download URL of the best matching release
    Url {
        /// Toolchain major version of interest
        #[arg(long)]
        major_version: u32,
        /// Target OS name and version (e.g. ubuntu22.04); detected when omitted
        #[arg(long)]
        os: Option<String>,
        /// Target architecture (x86_64, aarch64 or arm64); detected when omitted
        #[arg(long)]
        arch: Option<String>,
        /// Also print the sha256 checksum companion URL
        #[arg(long)]
        checksum: bool,
    },
    /// Download, verify and extract the best matching release
    Install {
        /// Toolchain major version of interest
        #[arg(long)]
        major_version: u32,
        /// Target OS name and version (e.g. ubuntu22.04); detected when omitted
        #[arg(long)]
        os: Option<String>,
        /// Target architecture (x86_64, aarch64 or arm64); detected when omitted
        #[arg(long)]
        arch: Option<String>,
        /// Skip the install when the completion marker is already present
        #[arg(long)]
        if_not_exists: bool,
    },
    /// List the releases in the built-in catalog
    List {
        /// Only show releases of this major version
        #[arg(long)]
        major_version: Option<u32>,
    },
    /// Rebuild the release dataset from the GitHub Releases API
    UpdateTags {
        /// GitHub repository in OWNER/REPO form
        #[arg(long)]
        repo: String,
        /// Where to write the regenerated dataset
        #[arg(long, default_value = "release_tags.json")]
        output: String,
    },
}

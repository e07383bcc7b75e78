// UpdateTags command: regenerate the release dataset from GitHub releases

use crate::config;
use crate::constants::{CHECKSUM_URL_SUFFIX, OLDEST_SUPPORTED_BUILD_TIMESTAMP};
use crate::http;
use crate::release::catalog::TagDataset;
use crate::release::tag::ParsedTag;
use crate::ui;
use anyhow::{Context, Result};
use log::{info, warn};
use serde::Deserialize;

#[derive(Debug, Deserialize)]
struct Release {
    tag_name: String,
    assets: Vec<Asset>,
}

#[derive(Debug, Deserialize)]
struct Asset {
    name: String,
}

/// Fetches the repository's releases and writes the dataset of every tag
/// that parses, postdates the checksum-companion cutoff, and has both the
/// archive and `.sha256` assets published. Unlike the runtime lookup path,
/// this path skips bad entries with a warning instead of failing.
pub async fn update_tags(repo: &str, output: &str) -> Result<()> {
    let parts: Vec<&str> = repo.split('/').collect();
    if parts.len() != 2 {
        anyhow::bail!(
            "Invalid GitHub repository format. Expected 'owner/repo', got '{}'",
            repo
        );
    }

    let url = format!(
        "https://api.github.com/repos/{}/{}/releases?per_page=100",
        parts[0], parts[1]
    );
    let releases: Vec<Release> =
        http::fetch_json(&url, config::github_token().as_deref()).await?;

    let name_prefix = config::package_name_prefix();
    let name_suffix = config::package_name_suffix();

    let mut tags = Vec::new();
    for release in &releases {
        let parsed = match ParsedTag::parse(&release.tag_name) {
            Ok(parsed) => parsed,
            Err(err) => {
                warn!("Skipping release '{}': {}", release.tag_name, err);
                continue;
            }
        };

        if parsed.build_timestamp < OLDEST_SUPPORTED_BUILD_TIMESTAMP {
            warn!(
                "Skipping release '{}': build predates checksum companions",
                release.tag_name
            );
            continue;
        }

        let package_name = format!("{}{}{}", name_prefix, release.tag_name, name_suffix);
        let checksum_name = format!("{package_name}{CHECKSUM_URL_SUFFIX}");
        let has_asset = |name: &str| release.assets.iter().any(|asset| asset.name == name);
        if !has_asset(&package_name) || !has_asset(&checksum_name) {
            warn!(
                "Skipping release '{}': expected assets '{}' and '{}' not found",
                release.tag_name, package_name, checksum_name
            );
            continue;
        }

        info!("Found release: {}", release.tag_name);
        tags.push(parsed);
    }

    tags.sort_by(|a, b| a.catalog_key().cmp(&b.catalog_key()));
    let dataset = TagDataset { tags };

    let json = serde_json::to_string_pretty(&dataset)?;
    std::fs::write(output, json).with_context(|| format!("Failed to write {}", output))?;

    ui::success(&format!(
        "Wrote {} release tag(s) to {}",
        dataset.tags.len(),
        output
    ));
    Ok(())
}

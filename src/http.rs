// Shared HTTP client utilities

use anyhow::{Context, Result};
use futures::StreamExt;
use indicatif::ProgressBar;
use reqwest::{Client, Response, StatusCode};
use serde::de::DeserializeOwned;
use std::path::Path;
use tokio::io::AsyncWriteExt;

/// User-Agent string for all HTTP requests
const USER_AGENT: &str = concat!("tcfetch/", env!("CARGO_PKG_VERSION"));

lazy_static::lazy_static! {
    /// Shared HTTP client with proper User-Agent
    static ref CLIENT: Client = Client::builder()
        .user_agent(USER_AGENT)
        .build()
        .expect("Failed to create HTTP client");
}

/// Fetch JSON from a URL and deserialize it, optionally with a bearer token.
pub async fn fetch_json<T: DeserializeOwned>(url: &str, bearer_token: Option<&str>) -> Result<T> {
    let mut request = CLIENT.get(url);
    if let Some(token) = bearer_token {
        request = request.bearer_auth(token);
    }
    let response: Response = request.send().await?;

    if response.status() == StatusCode::NOT_FOUND {
        anyhow::bail!("Resource not found: {}", url);
    }

    if !response.status().is_success() {
        anyhow::bail!("HTTP request failed: {} ({})", url, response.status());
    }

    let result = response.json().await?;
    Ok(result)
}

/// Fetch a small text document (e.g. a checksum companion file).
pub async fn fetch_text(url: &str) -> Result<String> {
    let response: Response = CLIENT.get(url).send().await?;

    if !response.status().is_success() {
        anyhow::bail!("HTTP request failed: {} ({})", url, response.status());
    }

    Ok(response.text().await?)
}

/// Stream a URL to a file, reporting progress through the given bar.
pub async fn download_to_file(url: &str, dest: &Path, bar: &ProgressBar) -> Result<()> {
    let response: Response = CLIENT.get(url).send().await?;

    if !response.status().is_success() {
        anyhow::bail!("Download failed: {} ({})", url, response.status());
    }

    if let Some(total) = response.content_length() {
        bar.set_length(total);
    }

    let mut file = tokio::fs::File::create(dest)
        .await
        .with_context(|| format!("Failed to create file: {}", dest.display()))?;

    let mut stream = response.bytes_stream();
    while let Some(chunk) = stream.next().await {
        let chunk = chunk.with_context(|| format!("Failed to read chunk from {url}"))?;
        file.write_all(&chunk)
            .await
            .with_context(|| format!("Failed to write to {}", dest.display()))?;
        bar.inc(chunk.len() as u64);
    }

    file.flush()
        .await
        .with_context(|| format!("Failed to flush {}", dest.display()))?;

    Ok(())
}

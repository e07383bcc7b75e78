// Config module for environment-backed settings

use crate::constants;
use std::env;

pub fn install_dir() -> String {
    env::var("TCFETCH_DIR").unwrap_or_else(|_| constants::DEFAULT_INSTALL_DIR.to_string())
}

pub fn release_url_prefix() -> String {
    env::var("TCFETCH_RELEASE_URL")
        .unwrap_or_else(|_| constants::DEFAULT_RELEASE_URL_PREFIX.to_string())
}

pub fn package_name_prefix() -> String {
    env::var("TCFETCH_NAME_PREFIX")
        .unwrap_or_else(|_| constants::DEFAULT_PACKAGE_NAME_PREFIX.to_string())
}

pub fn package_name_suffix() -> String {
    env::var("TCFETCH_NAME_SUFFIX")
        .unwrap_or_else(|_| constants::DEFAULT_PACKAGE_NAME_SUFFIX.to_string())
}

/// Token used for authenticated GitHub API requests in `update-tags`.
pub fn github_token() -> Option<String> {
    env::var("GITHUB_TOKEN").ok().filter(|token| !token.is_empty())
}

// Local platform detection for release filtering

use anyhow::Result;

/// The OS name-and-version and architecture tokens of the machine we are
/// running on, in the same spelling the release tags use.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocalPlatform {
    pub os_name_and_version: String,
    pub architecture: String,
}

impl LocalPlatform {
    pub fn detect() -> Result<Self> {
        Ok(Self {
            os_name_and_version: detect_os_name_and_version()?,
            architecture: detect_architecture(),
        })
    }
}

fn detect_architecture() -> String {
    // Release tags for macOS use the arm64 spelling; Linux tags use aarch64.
    if cfg!(target_os = "macos") && std::env::consts::ARCH == "aarch64" {
        "arm64".to_string()
    } else {
        std::env::consts::ARCH.to_string()
    }
}

#[cfg(target_os = "linux")]
fn detect_os_name_and_version() -> Result<String> {
    use anyhow::Context;
    let text = std::fs::read_to_string("/etc/os-release")
        .context("Failed to read /etc/os-release; pass --os explicitly")?;
    os_name_and_version_from_release(&text)
}

#[cfg(target_os = "macos")]
fn detect_os_name_and_version() -> Result<String> {
    Ok("macos".to_string())
}

#[cfg(not(any(target_os = "linux", target_os = "macos")))]
fn detect_os_name_and_version() -> Result<String> {
    anyhow::bail!(
        "Unsupported operating system '{}'; pass --os explicitly",
        std::env::consts::OS
    )
}

#[cfg_attr(not(target_os = "linux"), allow(dead_code))]
fn os_name_and_version_from_release(text: &str) -> Result<String> {
    let id = os_release_field(text, "ID")
        .ok_or_else(|| anyhow::anyhow!("/etc/os-release has no ID field"))?;
    let version = os_release_field(text, "VERSION_ID").unwrap_or_default();
    Ok(format!("{id}{version}"))
}

#[cfg_attr(not(target_os = "linux"), allow(dead_code))]
fn os_release_field(text: &str, key: &str) -> Option<String> {
    text.lines().find_map(|line| {
        let value = line.strip_prefix(key)?.strip_prefix('=')?;
        Some(value.trim().trim_matches('"').to_string())
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_os_release_ubuntu() {
        let text = concat!(
            "NAME=\"Ubuntu\"\n",
            "ID=ubuntu\n",
            "ID_LIKE=debian\n",
            "VERSION_ID=\"22.04\"\n",
        );
        assert_eq!(os_name_and_version_from_release(text).unwrap(), "ubuntu22.04");
    }

    #[test]
    fn test_os_release_centos() {
        let text = "ID=\"centos\"\nVERSION_ID=\"7\"\n";
        assert_eq!(os_name_and_version_from_release(text).unwrap(), "centos7");
    }

    #[test]
    fn test_os_release_without_version() {
        let text = "ID=arch\n";
        assert_eq!(os_name_and_version_from_release(text).unwrap(), "arch");
    }

    #[test]
    fn test_os_release_missing_id() {
        assert!(os_name_and_version_from_release("NAME=Something\n").is_err());
    }
}

// Command implementations for the tcfetch CLI

use crate::installer::Installer;
use crate::platform::LocalPlatform;
use anyhow::Result;

pub mod install;
pub mod list;
pub mod update;
pub mod url;

/// Builds an Installer from explicit `--os`/`--arch` values, filling in
/// whatever was omitted from local platform detection.
pub(crate) fn installer_for(os: Option<String>, arch: Option<String>) -> Result<Installer> {
    let (os, arch) = match (os, arch) {
        (Some(os), Some(arch)) => (os, arch),
        (os, arch) => {
            let local = LocalPlatform::detect()?;
            (
                os.unwrap_or(local.os_name_and_version),
                arch.unwrap_or(local.architecture),
            )
        }
    };
    Ok(Installer::new(os, arch))
}

// Url command for printing the resolved release URL

use crate::commands::installer_for;
use crate::release::catalog::ReleaseCatalog;
use crate::ui;
use anyhow::Result;
use log::debug;

pub fn print_url(
    catalog: &ReleaseCatalog,
    major_version: u32,
    os: Option<String>,
    arch: Option<String>,
    checksum: bool,
) -> Result<()> {
    let installer = installer_for(os, arch)?;
    debug!(
        "Resolving major version {} for {}/{}",
        major_version,
        installer.os_name_and_version(),
        installer.architecture()
    );

    let resolved = installer.resolve(catalog, major_version)?;
    ui::line(&installer.url_for_tag(&resolved.tag));
    if checksum {
        ui::line(&installer.checksum_url_for_tag(&resolved.tag));
    }
    Ok(())
}

// List command for inspecting the built-in catalog

use crate::release::catalog::ReleaseCatalog;
use crate::ui;
use anyhow::Result;

pub fn list(catalog: &ReleaseCatalog, major_version: Option<u32>) -> Result<()> {
    let mut shown = 0;
    for tag in catalog.tags() {
        if let Some(major) = major_version
            && tag.major_version != major
        {
            continue;
        }
        ui::line(&tag.to_string());
        shown += 1;
    }
    if shown == 0
        && let Some(major) = major_version
    {
        anyhow::bail!("No releases with major version {} in the catalog", major);
    }
    Ok(())
}

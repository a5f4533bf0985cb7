use super::{convert_files, report, OutputTarget};
use crate::conversion::Tool;
use crate::tools::ToolKind;
use anyhow::{anyhow, Result};
use std::path::PathBuf;

/// Run any catalog tool by its slug.
pub fn run(
    slug: &str,
    inputs: &[PathBuf],
    pages: Option<String>,
    target: &OutputTarget,
) -> Result<()> {
    let kind: ToolKind = slug.parse().map_err(|e: String| anyhow!(e))?;
    let tool = Tool::from_kind(kind, pages)?;

    let written = convert_files(tool, inputs, target)?;
    report(&written);

    Ok(())
}

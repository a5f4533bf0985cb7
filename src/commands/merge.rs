use super::{convert_files, report, OutputTarget};
use crate::conversion::Tool;
use anyhow::Result;
use std::path::Path;

pub fn run<P: AsRef<Path>>(inputs: &[P], target: &OutputTarget) -> Result<()> {
    if inputs.is_empty() {
        anyhow::bail!("No input files specified");
    }

    let written = convert_files(Tool::MergePdf, inputs, target)?;
    report(&written);

    Ok(())
}

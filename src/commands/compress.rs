use super::{convert_files, report, OutputTarget};
use crate::conversion::Tool;
use anyhow::Result;
use std::path::Path;

pub fn run<P: AsRef<Path>>(input: P, target: &OutputTarget) -> Result<()> {
    let written = convert_files(Tool::CompressPdf, &[input], target)?;
    report(&written);
    Ok(())
}

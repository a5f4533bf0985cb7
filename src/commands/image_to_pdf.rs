use super::{convert_files, report, OutputTarget};
use crate::conversion::Tool;
use anyhow::Result;
use std::path::Path;

/// `jpeg_only` restricts input to JPEG, like the "JPG to PDF" tool.
pub fn run<P: AsRef<Path>>(input: P, jpeg_only: bool, target: &OutputTarget) -> Result<()> {
    let tool = if jpeg_only {
        Tool::JpgToPdf
    } else {
        Tool::ImageToPdf
    };

    let written = convert_files(tool, &[input], target)?;
    report(&written);
    Ok(())
}

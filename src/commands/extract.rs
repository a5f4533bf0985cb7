use super::{convert_files, report, OutputTarget};
use crate::conversion::Tool;
use anyhow::Result;
use std::path::Path;

pub fn run<P: AsRef<Path>>(input: P, pages: &str, target: &OutputTarget) -> Result<()> {
    let tool = Tool::SplitPdf {
        pages: pages.to_string(),
    };
    let written = convert_files(tool, &[input], target)?;

    report(&written);

    Ok(())
}

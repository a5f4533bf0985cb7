use super::{convert_files, convert_inputs, report, OutputTarget};
use crate::conversion::Tool;
use anyhow::Result;
use std::path::Path;

/// Write the text to a file, or print it per page when `stdout` is set.
pub fn run<P: AsRef<Path>>(
    input: P,
    pages: Option<String>,
    stdout: bool,
    target: &OutputTarget,
) -> Result<()> {
    let tool = Tool::PdfToText { pages };

    if stdout {
        for output in convert_inputs(tool, &[input])? {
            print!("{}", String::from_utf8_lossy(&output.bytes));
        }
        return Ok(());
    }

    let written = convert_files(tool, &[input], target)?;
    report(&written);
    Ok(())
}

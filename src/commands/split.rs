use super::{convert_files, OutputTarget};
use crate::conversion::Tool;
use anyhow::Result;
use std::path::Path;

pub fn run<P: AsRef<Path>, Q: AsRef<Path>>(input: P, output_dir: Q) -> Result<()> {
    let output_dir = output_dir.as_ref();
    let target = OutputTarget::new(None, output_dir);
    let written = convert_files(Tool::BurstPdf, &[input], &target)?;

    println!(
        "Split {} pages into {}",
        written.len(),
        output_dir.display()
    );

    Ok(())
}

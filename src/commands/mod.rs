pub mod compress;
pub mod extract;
pub mod image_to_pdf;
pub mod info;
pub mod merge;
pub mod run;
pub mod split;
pub mod to_text;
pub mod tools;

use crate::conversion::{Conversion, Tool};
use crate::input::{InputFile, OutputFile};
use anyhow::{anyhow, bail, Context, Result};
use serde::Serialize;
use std::path::{Path, PathBuf};

/// Where a command writes its results.
pub struct OutputTarget {
    /// Explicit output file, only meaningful for single-output tools.
    pub file: Option<PathBuf>,
    pub dir: PathBuf,
}

impl OutputTarget {
    pub fn new(file: Option<PathBuf>, dir: &Path) -> Self {
        OutputTarget {
            file,
            dir: dir.to_path_buf(),
        }
    }

    fn path_for(&self, output: &OutputFile) -> PathBuf {
        match &self.file {
            Some(file) => file.clone(),
            None => self.dir.join(&output.name),
        }
    }
}

/// A file written by [`convert_files`].
#[derive(Debug, Clone, Serialize)]
pub struct WrittenFile {
    pub path: PathBuf,
    pub summary: Option<String>,
}

/// Read the inputs and run one conversion, keeping the outputs in memory.
pub fn convert_inputs<P: AsRef<Path>>(tool: Tool, inputs: &[P]) -> Result<Vec<OutputFile>> {
    let files = inputs
        .iter()
        .map(InputFile::read)
        .collect::<Result<Vec<_>>>()?;

    let mut conversion = Conversion::new(tool);
    let outputs = conversion
        .run(&files)
        .map_err(|e| anyhow!("Conversion failed: {}", e.user_message()))?;
    Ok(outputs.to_vec())
}

/// Read the inputs, run one conversion, and write every output.
///
/// Nothing is printed here; the MCP server shares this path and owns stdout.
pub fn convert_files<P: AsRef<Path>>(
    tool: Tool,
    inputs: &[P],
    target: &OutputTarget,
) -> Result<Vec<WrittenFile>> {
    let outputs = convert_inputs(tool, inputs)?;

    if let Some(file) = &target.file {
        if outputs.len() > 1 {
            bail!(
                "{} names a single file, but this tool produced {} files; \
                 choose a directory with --output-dir instead",
                file.display(),
                outputs.len()
            );
        }
    }

    std::fs::create_dir_all(&target.dir)
        .with_context(|| format!("Failed to create directory: {}", target.dir.display()))?;

    let mut written = Vec::with_capacity(outputs.len());
    for output in &outputs {
        let path = target.path_for(output);
        output.write_to(&path)?;
        written.push(WrittenFile {
            path,
            summary: output.summary.clone(),
        });
    }
    Ok(written)
}

/// Print what a command produced.
pub fn report(written: &[WrittenFile]) {
    for file in written {
        if let Some(summary) = &file.summary {
            println!("{}", summary);
        }
        println!("Wrote {}", file.path.display());
    }
}

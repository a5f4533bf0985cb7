use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "pdftoolbox")]
#[command(about = "Merge, split, compress and convert PDFs, with MCP server support")]
#[command(version)]
pub struct Cli {
    /// Enable debug logging
    #[arg(short, long, global = true, env = "PDFTOOLBOX_VERBOSE")]
    pub verbose: bool,

    /// Only log errors
    #[arg(short, long, global = true, env = "PDFTOOLBOX_QUIET", conflicts_with = "verbose")]
    pub quiet: bool,

    /// Directory for outputs written under their default names
    #[arg(
        long,
        global = true,
        env = "PDFTOOLBOX_OUTPUT_DIR",
        default_value = "."
    )]
    pub output_dir: PathBuf,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run as MCP server
    Mcp,

    /// List the available tools
    Tools {
        /// Print the catalog as JSON
        #[arg(long)]
        json: bool,
    },

    /// Run a tool by its slug (see `tools`)
    Run {
        /// Tool slug, e.g. "split-pdf"
        tool: String,

        /// Input files
        #[arg(required = true)]
        inputs: Vec<PathBuf>,

        /// Page ranges for tools that take them (e.g., "1-3, 5, 8")
        #[arg(short, long)]
        pages: Option<String>,

        /// Output file (single-output tools only)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Display PDF metadata
    Info {
        /// PDF file to inspect
        path: PathBuf,

        /// Print as JSON
        #[arg(long)]
        json: bool,
    },

    /// Extract page ranges to a new PDF
    #[command(alias = "split-range")]
    Extract {
        /// PDF file to extract from
        path: PathBuf,

        /// Page ranges (e.g., "1-3, 5, 8"); out-of-range pages are skipped
        pages: String,

        /// Output file
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Combine multiple PDFs into one
    Merge {
        /// PDF files to merge
        #[arg(required = true)]
        inputs: Vec<PathBuf>,

        /// Output file
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Split PDF into individual pages
    #[command(alias = "burst")]
    Split {
        /// PDF file to split
        path: PathBuf,

        /// Output directory
        #[arg(short = 'd', long = "into")]
        into: Option<PathBuf>,
    },

    /// Re-save a PDF with unused objects removed and streams compressed
    Compress {
        /// PDF file to compress
        path: PathBuf,

        /// Output file
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Convert a PNG or JPEG image to a one-page PDF
    ImageToPdf {
        /// Image file
        path: PathBuf,

        /// Reject anything but JPEG
        #[arg(long)]
        jpeg_only: bool,

        /// Output file
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Extract text from a PDF
    ToText {
        /// PDF file to read
        path: PathBuf,

        /// Page ranges (e.g., "1-5,10"); all pages by default
        #[arg(short, long)]
        pages: Option<String>,

        /// Print to stdout instead of writing a .txt file
        #[arg(long)]
        stdout: bool,

        /// Output file
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

mod cli;
mod commands;
mod conversion;
mod error;
mod input;
mod mcp;
mod page_range;
mod pdf;
mod tools;

use anyhow::Result;
use clap::Parser;
use cli::{Cli, Commands};
use commands::OutputTarget;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(&cli);

    let output_dir = cli.output_dir;

    match cli.command {
        Commands::Mcp => {
            mcp::run_server().await?;
        }
        Commands::Tools { json } => {
            commands::tools::run(json)?;
        }
        Commands::Run {
            tool,
            inputs,
            pages,
            output,
        } => {
            let target = OutputTarget::new(output, &output_dir);
            commands::run::run(&tool, &inputs, pages, &target)?;
        }
        Commands::Info { path, json } => {
            commands::info::run(&path, json)?;
        }
        Commands::Extract {
            path,
            pages,
            output,
        } => {
            let target = OutputTarget::new(output, &output_dir);
            commands::extract::run(&path, &pages, &target)?;
        }
        Commands::Merge { inputs, output } => {
            let target = OutputTarget::new(output, &output_dir);
            commands::merge::run(&inputs, &target)?;
        }
        Commands::Split { path, into } => {
            commands::split::run(&path, into.unwrap_or(output_dir))?;
        }
        Commands::Compress { path, output } => {
            let target = OutputTarget::new(output, &output_dir);
            commands::compress::run(&path, &target)?;
        }
        Commands::ImageToPdf {
            path,
            jpeg_only,
            output,
        } => {
            let target = OutputTarget::new(output, &output_dir);
            commands::image_to_pdf::run(&path, jpeg_only, &target)?;
        }
        Commands::ToText {
            path,
            pages,
            stdout,
            output,
        } => {
            let target = OutputTarget::new(output, &output_dir);
            commands::to_text::run(&path, pages, stdout, &target)?;
        }
    }

    Ok(())
}

/// Logs go to stderr; stdout carries results and the MCP transport.
fn init_logging(cli: &Cli) {
    let filter = if cli.verbose {
        "debug"
    } else if cli.quiet {
        "error"
    } else {
        "info"
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)),
        )
        .with_writer(std::io::stderr)
        .init();
}

use anyhow::Result;
use rmcp::{
    ServerHandler, ServiceExt,
    handler::server::{router::tool::ToolRouter, wrapper::Parameters},
    model::{ServerCapabilities, ServerInfo},
    schemars, tool, tool_router,
};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::commands::{convert_files, convert_inputs, OutputTarget, WrittenFile};
use crate::conversion::Tool;
use crate::input::InputFile;
use crate::pdf::PdfDocument;
use crate::tools::{ToolDescription, ToolKind};

// Request structs for tools

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct PathRequest {
    #[schemars(description = "Path to the PDF file")]
    pub path: String,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct PdfExtractRequest {
    #[schemars(description = "Path to the source PDF file")]
    pub path: String,
    #[schemars(
        description = "Page ranges (e.g., '1-3, 5, 8'). Out-of-range pages are skipped; pages are always written in ascending order"
    )]
    pub pages: String,
    #[schemars(description = "Output file path (default: '<name>-pages.pdf' next to the source)")]
    pub output: Option<String>,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct PdfSplitRequest {
    #[schemars(description = "Path to the PDF file")]
    pub path: String,
    #[schemars(description = "Directory for the per-page files (default: next to the source)")]
    pub output_dir: Option<String>,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct PdfMergeRequest {
    #[schemars(description = "PDF files to merge, in order")]
    pub paths: Vec<String>,
    #[schemars(description = "Output file path")]
    pub output: String,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct ConvertRequest {
    #[schemars(description = "Path to the input file")]
    pub path: String,
    #[schemars(description = "Output file path (default: next to the input)")]
    pub output: Option<String>,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct PdfToTextRequest {
    #[schemars(description = "Path to the PDF file")]
    pub path: String,
    #[schemars(description = "Page ranges (e.g., '1-5,10'); all pages when omitted")]
    pub pages: Option<String>,
}

#[derive(Debug, Clone)]
pub struct PdfServer {
    #[allow(dead_code)]
    tool_router: ToolRouter<Self>,
}

impl PdfServer {
    pub fn new() -> Self {
        Self {
            tool_router: Self::tool_router(),
        }
    }
}

impl Default for PdfServer {
    fn default() -> Self {
        Self::new()
    }
}

/// Outputs default to the directory holding the first input.
fn target_for(input: &str, output: Option<String>, output_dir: Option<String>) -> OutputTarget {
    let dir = output_dir.map(PathBuf::from).unwrap_or_else(|| {
        Path::new(input)
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .map(Path::to_path_buf)
            .unwrap_or_else(|| PathBuf::from("."))
    });
    OutputTarget::new(output.map(PathBuf::from), &dir)
}

fn run_tool(tool: Tool, inputs: &[String], target: &OutputTarget) -> String {
    match convert_files(tool, inputs, target) {
        Ok(written) => {
            let result = ConversionResult { outputs: written };
            serde_json::to_string_pretty(&result).unwrap_or_else(|e| format!("Error: {}", e))
        }
        Err(e) => format!("Error: {}", e),
    }
}

#[tool_router]
impl PdfServer {
    #[tool(description = "List the available tools with the file kinds each accepts")]
    fn list_tools(&self) -> String {
        let result: Vec<ToolDescription> = ToolKind::ALL.iter().map(|k| k.describe()).collect();
        serde_json::to_string_pretty(&result).unwrap_or_else(|e| format!("Error: {}", e))
    }

    #[tool(description = "Get PDF metadata including title, author, creator, producer, creation date, and page count")]
    fn pdf_info(&self, Parameters(PathRequest { path }): Parameters<PathRequest>) -> String {
        let file = match InputFile::read(&path) {
            Ok(f) => f,
            Err(e) => return format!("Error: {}", e),
        };
        match PdfDocument::load(&file) {
            Ok(doc) => serde_json::to_string_pretty(&doc.get_info())
                .unwrap_or_else(|e| format!("Error: {}", e)),
            Err(e) => format!("Error: {}", e.user_message()),
        }
    }

    #[tool(description = "Extract specific pages from a PDF and save them to a new file. Use page range syntax like '1-3, 5, 8'.")]
    fn pdf_extract(&self, Parameters(req): Parameters<PdfExtractRequest>) -> String {
        let target = target_for(&req.path, req.output, None);
        run_tool(Tool::SplitPdf { pages: req.pages }, &[req.path], &target)
    }

    #[tool(description = "Split a PDF into one file per page")]
    fn pdf_split(&self, Parameters(req): Parameters<PdfSplitRequest>) -> String {
        let target = target_for(&req.path, None, req.output_dir);
        run_tool(Tool::BurstPdf, &[req.path], &target)
    }

    #[tool(description = "Combine several PDFs, in the given order, into one file")]
    fn pdf_merge(&self, Parameters(req): Parameters<PdfMergeRequest>) -> String {
        let Some(first) = req.paths.first() else {
            return "Error: No input files specified".to_string();
        };
        let target = target_for(first, Some(req.output), None);
        run_tool(Tool::MergePdf, &req.paths, &target)
    }

    #[tool(description = "Shrink a PDF by dropping unused objects and compressing streams")]
    fn pdf_compress(&self, Parameters(req): Parameters<ConvertRequest>) -> String {
        let target = target_for(&req.path, req.output, None);
        run_tool(Tool::CompressPdf, &[req.path], &target)
    }

    #[tool(description = "Convert a PNG or JPEG image into a one-page PDF")]
    fn image_to_pdf(&self, Parameters(req): Parameters<ConvertRequest>) -> String {
        let target = target_for(&req.path, req.output, None);
        run_tool(Tool::ImageToPdf, &[req.path], &target)
    }

    #[tool(description = "Extract text content from a PDF, optionally limited to page ranges like '1-5,10'. Each page starts with a '--- Page N ---' header")]
    fn pdf_to_text(&self, Parameters(req): Parameters<PdfToTextRequest>) -> String {
        let tool = Tool::PdfToText { pages: req.pages };
        match convert_inputs(tool, &[req.path]) {
            Ok(outputs) => outputs
                .iter()
                .map(|o| String::from_utf8_lossy(&o.bytes).into_owned())
                .collect(),
            Err(e) => format!("Error: {}", e),
        }
    }
}

// Result types for MCP tools

#[derive(Debug, Serialize)]
pub struct ConversionResult {
    pub outputs: Vec<WrittenFile>,
}

impl ServerHandler for PdfServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            instructions: Some(
                "PDF conversion tools. Use list_tools to see what is available, pdf_info for \
                 metadata and page count, pdf_extract to copy page ranges into a new PDF, \
                 pdf_split to write one file per page, pdf_merge to combine files, pdf_compress \
                 to shrink a file, image_to_pdf to wrap an image in a PDF, and pdf_to_text to \
                 read text."
                    .to_string(),
            ),
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            ..Default::default()
        }
    }
}

pub async fn run_server() -> Result<()> {
    let server = PdfServer::new();
    tracing::info!("starting MCP server on stdio");

    // Serve using stdin/stdout as a tuple
    let service = server.serve((tokio::io::stdin(), tokio::io::stdout())).await?;

    service.waiting().await?;

    Ok(())
}

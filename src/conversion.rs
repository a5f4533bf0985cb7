use crate::error::ToolError;
use crate::input::{InputFile, OutputFile};
use crate::page_range::{select_or_all, select_pages, PageSelection};
use crate::pdf::compress::compress;
use crate::pdf::document::save_to_bytes;
use crate::pdf::embed::image_to_pdf;
use crate::pdf::merge::merge_documents;
use crate::pdf::text::{extract_text_pages, render_pages};
use crate::pdf::PdfDocument;
use crate::tools::ToolKind;
use tracing::{error, info, warn};

/// A tool together with the options it was invoked with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Tool {
    MergePdf,
    SplitPdf { pages: String },
    BurstPdf,
    CompressPdf,
    JpgToPdf,
    ImageToPdf,
    PdfToText { pages: Option<String> },
    PdfInfo,
}

impl Tool {
    /// Build a tool from its catalog entry. `pages` is required by
    /// `split-pdf`, optional for `pdf-to-text`, and rejected by the rest.
    pub fn from_kind(kind: ToolKind, pages: Option<String>) -> Result<Self, ToolError> {
        if pages.is_some() && !matches!(kind, ToolKind::SplitPdf | ToolKind::PdfToText) {
            return Err(ToolError::InputRejected(format!(
                "{} works on whole documents and takes no page range.",
                kind.name()
            )));
        }

        Ok(match kind {
            ToolKind::MergePdf => Tool::MergePdf,
            ToolKind::SplitPdf => match pages {
                Some(pages) => Tool::SplitPdf { pages },
                None => {
                    return Err(ToolError::InputRejected(
                        "Split PDF needs a page range, e.g. \"1-3, 5, 8\".".to_string(),
                    ))
                }
            },
            ToolKind::BurstPdf => Tool::BurstPdf,
            ToolKind::CompressPdf => Tool::CompressPdf,
            ToolKind::JpgToPdf => Tool::JpgToPdf,
            ToolKind::ImageToPdf => Tool::ImageToPdf,
            ToolKind::PdfToText => Tool::PdfToText { pages },
            ToolKind::PdfInfo => Tool::PdfInfo,
        })
    }

    pub fn kind(&self) -> ToolKind {
        match self {
            Tool::MergePdf => ToolKind::MergePdf,
            Tool::SplitPdf { .. } => ToolKind::SplitPdf,
            Tool::BurstPdf => ToolKind::BurstPdf,
            Tool::CompressPdf => ToolKind::CompressPdf,
            Tool::JpgToPdf => ToolKind::JpgToPdf,
            Tool::ImageToPdf => ToolKind::ImageToPdf,
            Tool::PdfToText { .. } => ToolKind::PdfToText,
            Tool::PdfInfo => ToolKind::PdfInfo,
        }
    }

    /// Run the tool over `inputs`.
    pub fn convert(&self, inputs: &[InputFile]) -> Result<Vec<OutputFile>, ToolError> {
        validate_inputs(self.kind(), inputs)?;

        match self {
            Tool::MergePdf => merge(inputs).map(|out| vec![out]),
            Tool::SplitPdf { pages } => split(&inputs[0], pages).map(|out| vec![out]),
            Tool::BurstPdf => burst(&inputs[0]),
            Tool::CompressPdf => compress_pdf(&inputs[0]).map(|out| vec![out]),
            Tool::JpgToPdf | Tool::ImageToPdf => embed_image(&inputs[0]).map(|out| vec![out]),
            Tool::PdfToText { pages } => to_text(&inputs[0], pages.as_deref()).map(|out| vec![out]),
            Tool::PdfInfo => info(&inputs[0]).map(|out| vec![out]),
        }
    }
}

fn validate_inputs(kind: ToolKind, inputs: &[InputFile]) -> Result<(), ToolError> {
    if inputs.is_empty() {
        return Err(ToolError::InputRejected(
            "Please select at least one file.".to_string(),
        ));
    }

    if !kind.multi_file() && inputs.len() > 1 {
        return Err(ToolError::InputRejected(format!(
            "{} takes a single file, but {} were given.",
            kind.name(),
            inputs.len()
        )));
    }

    for input in inputs {
        let found = input.kind();
        if !kind.accepts(found) {
            let accepted: Vec<String> = kind.accepted().iter().map(|k| k.to_string()).collect();
            return Err(ToolError::InputRejected(format!(
                "'{}' was detected as: {}. {} accepts: {}.",
                input.name,
                found,
                kind.name(),
                accepted.join(", ")
            )));
        }
    }

    Ok(())
}

fn merge(inputs: &[InputFile]) -> Result<OutputFile, ToolError> {
    if let [single] = inputs {
        // Nothing to combine; still make sure it is a readable PDF.
        PdfDocument::load(single)?;
        return Ok(OutputFile::new("merged.pdf", single.bytes.clone())
            .with_summary("Only one file given; copied unchanged."));
    }

    let documents = inputs
        .iter()
        .map(PdfDocument::load)
        .collect::<Result<Vec<_>, _>>()?;
    let mut merged = merge_documents(documents)?;
    let pages = merged.get_pages().len();
    let bytes = save_to_bytes(&mut merged)?;

    Ok(OutputFile::new("merged.pdf", bytes).with_summary(format!(
        "Merged {} files ({} pages).",
        inputs.len(),
        pages
    )))
}

fn split(input: &InputFile, pages: &str) -> Result<OutputFile, ToolError> {
    let doc = PdfDocument::load(input)?;
    let selection = select_pages(pages, doc.page_count())?;
    let mut extracted = doc.extract_pages(&selection)?;
    let bytes = save_to_bytes(&mut extracted)?;

    Ok(
        OutputFile::new(format!("{}-pages.pdf", input.stem()), bytes).with_summary(format!(
            "Extracted {} of {} page(s).",
            selection.len(),
            doc.page_count()
        )),
    )
}

fn burst(input: &InputFile) -> Result<Vec<OutputFile>, ToolError> {
    let doc = PdfDocument::load(input)?;
    let total_pages = doc.page_count();
    if total_pages == 0 {
        return Err(ToolError::InputRejected(format!(
            "'{}' has no pages to split.",
            input.name
        )));
    }

    let mut outputs = Vec::with_capacity(total_pages as usize);
    for index in 0..total_pages {
        let mut page_doc = doc.extract_pages(&PageSelection::single(index))?;
        let bytes = save_to_bytes(&mut page_doc)?;
        outputs.push(OutputFile::new(
            format!("{}_{:04}.pdf", input.stem(), index + 1),
            bytes,
        ));
    }
    Ok(outputs)
}

fn compress_pdf(input: &InputFile) -> Result<OutputFile, ToolError> {
    let doc = PdfDocument::load(input)?;
    let (bytes, report) = compress(doc, input.bytes.len())?;
    Ok(OutputFile::new(format!("compressed-{}", input.name), bytes).with_summary(report.summary()))
}

fn embed_image(input: &InputFile) -> Result<OutputFile, ToolError> {
    let mut doc = image_to_pdf(input)?;
    let bytes = save_to_bytes(&mut doc)?;
    Ok(OutputFile::new(format!("converted-{}.pdf", input.stem()), bytes))
}

fn to_text(input: &InputFile, pages: Option<&str>) -> Result<OutputFile, ToolError> {
    let doc = PdfDocument::load(input)?;
    let selection = select_or_all(pages, doc.page_count())?;
    let texts = extract_text_pages(input, &selection)?;

    Ok(
        OutputFile::new(format!("{}.txt", input.stem()), render_pages(&texts).into_bytes())
            .with_summary(format!("Extracted text from {} page(s).", texts.len())),
    )
}

fn info(input: &InputFile) -> Result<OutputFile, ToolError> {
    let doc = PdfDocument::load(input)?;
    let bytes = serde_json::to_vec_pretty(&doc.get_info())
        .map_err(|e| ToolError::unexpected("Failed to serialize metadata", e))?;
    Ok(OutputFile::new(format!("{}.info.json", input.stem()), bytes))
}

#[derive(Debug, Clone)]
pub enum ConversionState {
    Idle,
    Processing,
    Success(Vec<OutputFile>),
    /// Holds the message shown to the user.
    Failure(String),
}

/// One conversion request and its progress through
/// `Idle -> Processing -> Success | Failure`.
#[derive(Debug)]
pub struct Conversion {
    tool: Tool,
    state: ConversionState,
}

impl Conversion {
    pub fn new(tool: Tool) -> Self {
        Conversion {
            tool,
            state: ConversionState::Idle,
        }
    }

    pub fn tool(&self) -> &Tool {
        &self.tool
    }

    pub fn state(&self) -> &ConversionState {
        &self.state
    }

    /// Outputs of a successful run; empty in every other state.
    pub fn outputs(&self) -> &[OutputFile] {
        match &self.state {
            ConversionState::Success(outputs) => outputs,
            _ => &[],
        }
    }

    /// Convert `inputs`. Only valid from `Idle`; call [`Conversion::reset`]
    /// to try again after a run.
    pub fn run(&mut self, inputs: &[InputFile]) -> Result<&[OutputFile], ToolError> {
        if !matches!(self.state, ConversionState::Idle) {
            return Err(ToolError::InputRejected(
                "This conversion has already run; reset it before converting again.".to_string(),
            ));
        }

        let kind = self.tool().kind();
        self.state = ConversionState::Processing;
        info!(tool = %kind, files = inputs.len(), "conversion started");

        match self.tool.convert(inputs) {
            Ok(outputs) => {
                info!(tool = %kind, outputs = outputs.len(), "conversion succeeded");
                self.state = ConversionState::Success(outputs);
                Ok(self.outputs())
            }
            Err(err) => {
                match &err {
                    ToolError::Unexpected(detail) => {
                        error!(tool = %kind, error = %detail, "conversion failed unexpectedly")
                    }
                    other => warn!(tool = %kind, error = %other, "conversion failed"),
                }
                self.state = ConversionState::Failure(err.user_message());
                Err(err)
            }
        }
    }

    pub fn reset(&mut self) {
        self.state = ConversionState::Idle;
    }
}

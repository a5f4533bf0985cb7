use crate::error::ToolError;
use crate::input::InputFile;
use crate::page_range::PageSelection;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;

static BLANK_RUNS: Lazy<Regex> = Lazy::new(|| Regex::new(r"\n[ \t]*(?:\n[ \t]*){2,}").unwrap());

#[derive(Debug, Clone, Serialize)]
pub struct PageText {
    /// 1-based page number
    pub page: u32,
    pub text: String,
}

/// Extract the text of the selected pages.
///
/// A selected page pdf-extract returns nothing for comes back empty rather
/// than failing the whole document.
pub fn extract_text_pages(
    input: &InputFile,
    selection: &PageSelection,
) -> Result<Vec<PageText>, ToolError> {
    let pages = pdf_extract::extract_text_from_mem_by_pages(&input.bytes)
        .map_err(|e| ToolError::document_load(&input.name, e))?;

    Ok(selection
        .ascending()
        .map(|index| PageText {
            page: index + 1,
            text: pages
                .get(index as usize)
                .map(|t| tidy(t))
                .unwrap_or_default(),
        })
        .collect())
}

/// Collapse runs of blank lines and trim the page.
fn tidy(text: &str) -> String {
    BLANK_RUNS.replace_all(text, "\n\n").trim().to_string()
}

/// Join pages into one plain-text document with page headers.
pub fn render_pages(pages: &[PageText]) -> String {
    let mut out = String::new();
    for page in pages {
        out.push_str(&format!("--- Page {} ---\n", page.page));
        out.push_str(&page.text);
        out.push_str("\n\n");
    }
    out
}

use crate::error::ToolError;
use crate::input::InputFile;
use crate::page_range::PageSelection;
use lopdf::{Document, Object, ObjectId};
use serde::Serialize;
use tracing::debug;

pub struct PdfDocument {
    pub doc: Document,
    pub name: String,
}

impl PdfDocument {
    pub fn load(input: &InputFile) -> Result<Self, ToolError> {
        let doc = Document::load_mem(&input.bytes)
            .map_err(|e| ToolError::document_load(&input.name, e))?;
        debug!(name = %input.name, pages = doc.get_pages().len(), "loaded PDF");
        Ok(PdfDocument {
            doc,
            name: input.name.clone(),
        })
    }

    pub fn page_count(&self) -> u32 {
        self.doc.get_pages().len() as u32
    }

    /// Get 1-indexed page object IDs
    pub fn page_ids(&self) -> Vec<(u32, ObjectId)> {
        // get_pages is keyed by page number, so this is already in page order.
        self.doc.get_pages().into_iter().collect()
    }

    /// Get metadata from the document info dictionary
    pub fn get_info(&self) -> PdfInfo {
        let mut info = PdfInfo::default();

        if let Ok(Object::Reference(info_ref)) = self.doc.trailer.get(b"Info") {
            if let Ok(Object::Dictionary(dict)) = self.doc.get_object(*info_ref) {
                info.title = get_string_from_dict(dict, b"Title");
                info.author = get_string_from_dict(dict, b"Author");
                info.creator = get_string_from_dict(dict, b"Creator");
                info.producer = get_string_from_dict(dict, b"Producer");
                info.creation_date = get_string_from_dict(dict, b"CreationDate");
                info.mod_date = get_string_from_dict(dict, b"ModDate");
                info.subject = get_string_from_dict(dict, b"Subject");
                info.keywords = get_string_from_dict(dict, b"Keywords");
            }
        }

        info.page_count = self.page_count();
        info.version = self.doc.version.clone();
        info
    }

    /// Build a new document holding the selected pages in ascending order.
    ///
    /// Fails if the source cannot supply one of the indices; nothing is
    /// returned in that case.
    pub fn extract_pages(&self, selection: &PageSelection) -> Result<Document, ToolError> {
        let all_pages = self.page_ids();
        let total = all_pages.len() as u32;

        for index in selection.ascending() {
            if index >= total {
                return Err(ToolError::Unexpected(format!(
                    "page index {} is not present in '{}' ({} pages)",
                    index, self.name, total
                )));
            }
        }

        let mut new_doc = self.doc.clone();

        // Page numbers are 1-based, selection indices 0-based.
        let pages_to_delete: Vec<u32> = all_pages
            .iter()
            .map(|(num, _)| *num)
            .filter(|num| !selection.contains(num - 1))
            .collect();

        if !pages_to_delete.is_empty() {
            new_doc.delete_pages(&pages_to_delete);
        }
        new_doc.prune_objects();
        new_doc.compress();

        let kept = new_doc.get_pages().len();
        if kept != selection.len() {
            return Err(ToolError::Unexpected(format!(
                "expected {} page(s) after extraction from '{}', got {}",
                selection.len(),
                self.name,
                kept
            )));
        }

        Ok(new_doc)
    }
}

/// Serialize a document into a byte buffer.
pub fn save_to_bytes(doc: &mut Document) -> Result<Vec<u8>, ToolError> {
    let mut buffer = Vec::new();
    doc.save_to(&mut buffer)
        .map_err(|e| ToolError::unexpected("Failed to save PDF", e))?;
    Ok(buffer)
}

#[derive(Debug, Default, Clone, Serialize)]
pub struct PdfInfo {
    pub title: Option<String>,
    pub author: Option<String>,
    pub creator: Option<String>,
    pub producer: Option<String>,
    pub creation_date: Option<String>,
    pub mod_date: Option<String>,
    pub subject: Option<String>,
    pub keywords: Option<String>,
    pub version: String,
    pub page_count: u32,
}

fn get_string_from_dict(dict: &lopdf::Dictionary, key: &[u8]) -> Option<String> {
    dict.get(key).ok().and_then(|obj| match obj {
        Object::String(bytes, _) => decode_pdf_string(bytes),
        _ => None,
    })
}

fn decode_pdf_string(bytes: &[u8]) -> Option<String> {
    if bytes.len() >= 2 && bytes[0] == 0xFE && bytes[1] == 0xFF {
        // UTF-16 BE
        let u16_chars: Vec<u16> = bytes[2..]
            .chunks_exact(2)
            .map(|chunk| u16::from_be_bytes([chunk[0], chunk[1]]))
            .collect();
        String::from_utf16(&u16_chars).ok()
    } else {
        // Latin-1 is close enough to PDFDocEncoding for metadata
        Some(bytes.iter().map(|&b| b as char).collect())
    }
}

/// Human-readable form of a PDF date (`D:YYYYMMDDHHmmSS...`).
pub fn format_pdf_date(date: &str) -> String {
    let digits = |d: &str, n: usize| d.len() >= n && d.bytes().take(n).all(|b| b.is_ascii_digit());

    if let Some(d) = date.strip_prefix("D:") {
        if digits(d, 8) {
            let time = if digits(d, 14) {
                format!(" {}:{}:{}", &d[8..10], &d[10..12], &d[12..14])
            } else {
                String::new()
            };
            return format!("{}-{}-{}{}", &d[0..4], &d[4..6], &d[6..8], time);
        }
    }
    date.to_string()
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::page_range::select_pages;
    use lopdf::content::{Content, Operation};
    use lopdf::{dictionary, Stream, StringFormat};

    /// A PDF with `num_pages` pages, each drawing the text "Page N".
    pub(crate) fn create_test_pdf(num_pages: u32) -> Vec<u8> {
        let mut doc = Document::with_version("1.7");
        let pages_id = doc.new_object_id();
        let font_id = doc.add_object(dictionary! {
            "Type" => "Font",
            "Subtype" => "Type1",
            "BaseFont" => "Helvetica",
        });
        let resources_id = doc.add_object(dictionary! {
            "Font" => dictionary! { "F1" => font_id },
        });

        let mut kids = Vec::new();
        for i in 1..=num_pages {
            let content = Content {
                operations: vec![
                    Operation::new("BT", vec![]),
                    Operation::new("Tf", vec!["F1".into(), 24.into()]),
                    Operation::new("Td", vec![100.into(), 600.into()]),
                    Operation::new(
                        "Tj",
                        vec![Object::String(
                            format!("Page {}", i).into_bytes(),
                            StringFormat::Literal,
                        )],
                    ),
                    Operation::new("ET", vec![]),
                ],
            };
            let content_id = doc.add_object(Stream::new(
                lopdf::Dictionary::new(),
                content.encode().unwrap(),
            ));
            let page_id = doc.add_object(dictionary! {
                "Type" => "Page",
                "Parent" => pages_id,
                "Contents" => content_id,
            });
            kids.push(Object::Reference(page_id));
        }

        doc.objects.insert(
            pages_id,
            Object::Dictionary(dictionary! {
                "Type" => "Pages",
                "Kids" => kids,
                "Count" => num_pages as i64,
                "Resources" => resources_id,
                "MediaBox" => vec![
                    Object::Integer(0),
                    Object::Integer(0),
                    Object::Integer(612),
                    Object::Integer(792),
                ],
            }),
        );
        let catalog_id = doc.add_object(dictionary! {
            "Type" => "Catalog",
            "Pages" => pages_id,
        });
        doc.trailer.set("Root", catalog_id);

        let mut buffer = Vec::new();
        doc.save_to(&mut buffer).unwrap();
        buffer
    }

    /// The text drawn on each page, in page order.
    pub(crate) fn page_texts(doc: &Document) -> Vec<String> {
        doc.get_pages()
            .values()
            .map(|&page_id| {
                let raw = doc.get_page_content(page_id).unwrap();
                let content = Content::decode(&raw).unwrap();
                content
                    .operations
                    .iter()
                    .filter(|op| op.operator == "Tj")
                    .filter_map(|op| match op.operands.first() {
                        Some(Object::String(bytes, _)) => {
                            Some(String::from_utf8_lossy(bytes).into_owned())
                        }
                        _ => None,
                    })
                    .collect::<Vec<_>>()
                    .join(" ")
            })
            .collect()
    }

    fn load(num_pages: u32) -> PdfDocument {
        PdfDocument::load(&InputFile::new("test.pdf", create_test_pdf(num_pages))).unwrap()
    }

    #[test]
    fn test_page_count() {
        assert_eq!(load(5).page_count(), 5);
    }

    #[test]
    fn test_load_garbage_fails() {
        let err = PdfDocument::load(&InputFile::new("junk.pdf", b"not a pdf".to_vec()));
        assert!(matches!(err, Err(ToolError::DocumentLoad { .. })));
    }

    #[test]
    fn test_extract_preserves_ascending_order() {
        let doc = load(5);
        let selection = select_pages("4,2", doc.page_count()).unwrap();
        let mut extracted = doc.extract_pages(&selection).unwrap();

        let bytes = save_to_bytes(&mut extracted).unwrap();
        let reloaded = Document::load_mem(&bytes).unwrap();
        assert_eq!(reloaded.get_pages().len(), 2);
        assert_eq!(page_texts(&reloaded), vec!["Page 2", "Page 4"]);
    }

    #[test]
    fn test_extract_pages_match_source() {
        let doc = load(5);
        let source_texts = page_texts(&doc.doc);
        let selection = select_pages("2,4", 5).unwrap();
        let extracted = doc.extract_pages(&selection).unwrap();

        let texts = page_texts(&extracted);
        assert_eq!(texts[0], source_texts[1]);
        assert_eq!(texts[1], source_texts[3]);
    }

    #[test]
    fn test_extract_all() {
        let doc = load(3);
        let extracted = doc.extract_pages(&PageSelection::all(3)).unwrap();
        assert_eq!(page_texts(&extracted), vec!["Page 1", "Page 2", "Page 3"]);
    }

    #[test]
    fn test_extract_index_beyond_document_fails() {
        let doc = load(2);
        let err = doc.extract_pages(&PageSelection::single(5));
        assert!(matches!(err, Err(ToolError::Unexpected(_))));
    }

    #[test]
    fn test_info_defaults() {
        let info = load(4).get_info();
        assert_eq!(info.page_count, 4);
        assert_eq!(info.version, "1.7");
        assert!(info.title.is_none());
    }

    #[test]
    fn test_decode_utf16() {
        let bytes = [0xFE, 0xFF, 0x00, b'H', 0x00, b'i'];
        assert_eq!(decode_pdf_string(&bytes).as_deref(), Some("Hi"));
    }

    #[test]
    fn test_format_pdf_date() {
        assert_eq!(format_pdf_date("D:20240102030405Z"), "2024-01-02 03:04:05");
        assert_eq!(format_pdf_date("D:20240102"), "2024-01-02");
        assert_eq!(format_pdf_date("yesterday"), "yesterday");
        assert_eq!(format_pdf_date("D:202\u{e9}5678"), "D:202\u{e9}5678");
        assert_eq!(format_pdf_date("D:20240102\u{e9}30405"), "2024-01-02");
    }
}

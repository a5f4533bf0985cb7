use crate::input::InputKind;
use serde::Serialize;
use std::fmt;
use std::str::FromStr;

/// The tools this application offers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ToolKind {
    MergePdf,
    SplitPdf,
    BurstPdf,
    CompressPdf,
    JpgToPdf,
    ImageToPdf,
    PdfToText,
    PdfInfo,
}

impl ToolKind {
    pub const ALL: [ToolKind; 8] = [
        ToolKind::MergePdf,
        ToolKind::SplitPdf,
        ToolKind::BurstPdf,
        ToolKind::CompressPdf,
        ToolKind::JpgToPdf,
        ToolKind::ImageToPdf,
        ToolKind::PdfToText,
        ToolKind::PdfInfo,
    ];

    pub fn slug(self) -> &'static str {
        match self {
            ToolKind::MergePdf => "merge-pdf",
            ToolKind::SplitPdf => "split-pdf",
            ToolKind::BurstPdf => "burst-pdf",
            ToolKind::CompressPdf => "compress-pdf",
            ToolKind::JpgToPdf => "jpg-to-pdf",
            ToolKind::ImageToPdf => "image-to-pdf",
            ToolKind::PdfToText => "pdf-to-text",
            ToolKind::PdfInfo => "pdf-info",
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            ToolKind::MergePdf => "Merge PDF",
            ToolKind::SplitPdf => "Split PDF",
            ToolKind::BurstPdf => "Burst PDF",
            ToolKind::CompressPdf => "Compress PDF",
            ToolKind::JpgToPdf => "JPG to PDF",
            ToolKind::ImageToPdf => "Image to PDF",
            ToolKind::PdfToText => "PDF to Text",
            ToolKind::PdfInfo => "PDF Info",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            ToolKind::MergePdf => "Combine multiple PDFs into one single document.",
            ToolKind::SplitPdf => "Extract one or more pages from your PDF.",
            ToolKind::BurstPdf => "Split a PDF into one document per page.",
            ToolKind::CompressPdf => "Reduce the size of your PDF without losing quality.",
            ToolKind::JpgToPdf => "Convert JPG images to PDF documents.",
            ToolKind::ImageToPdf => "Convert PNG and JPG images to PDF.",
            ToolKind::PdfToText => "Convert a PDF to an editable text file.",
            ToolKind::PdfInfo => "Show a PDF's metadata and page count.",
        }
    }

    /// Input kinds this tool takes.
    pub fn accepted(self) -> &'static [InputKind] {
        match self {
            ToolKind::JpgToPdf => &[InputKind::Jpeg],
            ToolKind::ImageToPdf => &[InputKind::Jpeg, InputKind::Png],
            _ => &[InputKind::Pdf],
        }
    }

    pub fn accepts(self, kind: InputKind) -> bool {
        self.accepted().contains(&kind)
    }

    /// Whether the tool works on several files at once.
    pub fn multi_file(self) -> bool {
        matches!(self, ToolKind::MergePdf)
    }

    pub fn describe(self) -> ToolDescription {
        ToolDescription {
            slug: self.slug(),
            name: self.name(),
            description: self.description(),
            accepts: self.accepted().iter().map(|k| k.to_string()).collect(),
            multi_file: self.multi_file(),
        }
    }
}

impl fmt::Display for ToolKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.slug())
    }
}

impl FromStr for ToolKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ToolKind::ALL
            .into_iter()
            .find(|kind| kind.slug() == s)
            .ok_or_else(|| {
                let known: Vec<_> = ToolKind::ALL.iter().map(|k| k.slug()).collect();
                format!("Unknown tool '{}'. Available: {}", s, known.join(", "))
            })
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ToolDescription {
    pub slug: &'static str,
    pub name: &'static str,
    pub description: &'static str,
    pub accepts: Vec<String>,
    pub multi_file: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slug_round_trip() {
        for kind in ToolKind::ALL {
            assert_eq!(kind.slug().parse::<ToolKind>().unwrap(), kind);
        }
    }

    #[test]
    fn test_unknown_slug() {
        let err = "url-to-pdf".parse::<ToolKind>().unwrap_err();
        assert!(err.contains("url-to-pdf"));
        assert!(err.contains("merge-pdf"));
    }

    #[test]
    fn test_only_merge_is_multi_file() {
        let multi: Vec<_> = ToolKind::ALL.into_iter().filter(|k| k.multi_file()).collect();
        assert_eq!(multi, vec![ToolKind::MergePdf]);
    }

    #[test]
    fn test_accepts() {
        assert!(ToolKind::SplitPdf.accepts(InputKind::Pdf));
        assert!(!ToolKind::SplitPdf.accepts(InputKind::Png));
        assert!(ToolKind::ImageToPdf.accepts(InputKind::Png));
        assert!(!ToolKind::JpgToPdf.accepts(InputKind::Png));
    }

    #[test]
    fn test_describe_serializes() {
        let json = serde_json::to_value(ToolKind::JpgToPdf.describe()).unwrap();
        assert_eq!(json["slug"], "jpg-to-pdf");
        assert_eq!(json["accepts"][0], "JPEG image");
        assert_eq!(json["multi_file"], false);
    }
}

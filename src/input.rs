use anyhow::{Context, Result};
use std::fmt;
use std::path::Path;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputKind {
    Pdf,
    Jpeg,
    Png,
    Other,
}

impl InputKind {
    /// Identify a file by its leading bytes.
    pub fn sniff(bytes: &[u8]) -> Self {
        if bytes.starts_with(b"%PDF-") {
            return InputKind::Pdf;
        }
        match image::guess_format(bytes) {
            Ok(image::ImageFormat::Jpeg) => InputKind::Jpeg,
            Ok(image::ImageFormat::Png) => InputKind::Png,
            _ => InputKind::Other,
        }
    }
}

impl fmt::Display for InputKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            InputKind::Pdf => "PDF",
            InputKind::Jpeg => "JPEG image",
            InputKind::Png => "PNG image",
            InputKind::Other => "unrecognized file",
        };
        f.write_str(s)
    }
}

/// An uploaded file held in memory.
#[derive(Debug, Clone)]
pub struct InputFile {
    pub name: String,
    pub bytes: Vec<u8>,
}

impl InputFile {
    pub fn new(name: impl Into<String>, bytes: Vec<u8>) -> Self {
        InputFile {
            name: name.into(),
            bytes,
        }
    }

    pub fn read<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let bytes =
            std::fs::read(path).with_context(|| format!("Failed to read {}", path.display()))?;
        let name = path
            .file_name()
            .and_then(|s| s.to_str())
            .unwrap_or("file")
            .to_string();
        Ok(InputFile { name, bytes })
    }

    pub fn kind(&self) -> InputKind {
        InputKind::sniff(&self.bytes)
    }

    /// File name without its final extension.
    pub fn stem(&self) -> &str {
        Path::new(&self.name)
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or(&self.name)
    }
}

/// A conversion result ready to be written out.
#[derive(Debug, Clone)]
pub struct OutputFile {
    pub name: String,
    pub bytes: Vec<u8>,
    pub summary: Option<String>,
}

impl OutputFile {
    pub fn new(name: impl Into<String>, bytes: Vec<u8>) -> Self {
        OutputFile {
            name: name.into(),
            bytes,
            summary: None,
        }
    }

    pub fn with_summary(mut self, summary: impl Into<String>) -> Self {
        self.summary = Some(summary.into());
        self
    }

    pub fn write_to<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        std::fs::write(path, &self.bytes)
            .with_context(|| format!("Failed to write {}", path.display()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sniff_pdf() {
        assert_eq!(InputKind::sniff(b"%PDF-1.7\n..."), InputKind::Pdf);
    }

    #[test]
    fn test_sniff_images() {
        assert_eq!(
            InputKind::sniff(&[0xFF, 0xD8, 0xFF, 0xE0, 0, 0x10]),
            InputKind::Jpeg
        );
        assert_eq!(
            InputKind::sniff(&[0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A]),
            InputKind::Png
        );
    }

    #[test]
    fn test_sniff_other() {
        assert_eq!(InputKind::sniff(b"hello world"), InputKind::Other);
        assert_eq!(InputKind::sniff(b""), InputKind::Other);
    }

    #[test]
    fn test_stem() {
        assert_eq!(InputFile::new("report.pdf", vec![]).stem(), "report");
        assert_eq!(InputFile::new("photo.final.jpg", vec![]).stem(), "photo.final");
        assert_eq!(InputFile::new("noext", vec![]).stem(), "noext");
    }

    #[test]
    fn test_read_and_write_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("doc.pdf");
        OutputFile::new("doc.pdf", b"%PDF-1.4".to_vec())
            .write_to(&path)
            .unwrap();

        let input = InputFile::read(&path).unwrap();
        assert_eq!(input.name, "doc.pdf");
        assert_eq!(input.kind(), InputKind::Pdf);
    }
}

use crate::error::ToolError;
use crate::pdf::document::save_to_bytes;
use crate::pdf::PdfDocument;
use serde::Serialize;
use tracing::info;

#[derive(Debug, Clone, Serialize)]
pub struct CompressionReport {
    pub original_bytes: usize,
    pub compressed_bytes: usize,
    pub pruned_objects: usize,
}

impl CompressionReport {
    /// Percentage saved, negative if the output grew.
    pub fn savings_percent(&self) -> f64 {
        if self.original_bytes == 0 {
            return 0.0;
        }
        (1.0 - self.compressed_bytes as f64 / self.original_bytes as f64) * 100.0
    }

    pub fn summary(&self) -> String {
        format!(
            "Reduced from {} to {} bytes ({:.1}% smaller, {} unused object(s) removed).",
            self.original_bytes,
            self.compressed_bytes,
            self.savings_percent(),
            self.pruned_objects
        )
    }
}

/// Re-save a document with lopdf's size reductions applied: unreferenced
/// objects and empty streams are dropped and uncompressed streams deflated.
/// Images are not re-encoded.
pub fn compress(
    mut pdf: PdfDocument,
    original_bytes: usize,
) -> Result<(Vec<u8>, CompressionReport), ToolError> {
    let mut pruned = pdf.doc.prune_objects().len();
    pruned += pdf.doc.delete_zero_length_streams().len();
    pdf.doc.compress();

    let bytes = save_to_bytes(&mut pdf.doc)?;
    let report = CompressionReport {
        original_bytes,
        compressed_bytes: bytes.len(),
        pruned_objects: pruned,
    };
    info!(
        name = %pdf.name,
        before = report.original_bytes,
        after = report.compressed_bytes,
        "compressed document"
    );
    Ok((bytes, report))
}

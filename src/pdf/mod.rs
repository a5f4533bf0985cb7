pub mod compress;
pub mod document;
pub mod embed;
pub mod merge;
pub mod text;

pub use document::PdfDocument;

use crate::input::InputFile;
use crate::pdf::document::format_pdf_date;
use crate::pdf::PdfDocument;
use anyhow::Result;
use std::path::Path;

pub fn run<P: AsRef<Path>>(path: P, json: bool) -> Result<()> {
    let file = InputFile::read(&path)?;
    let doc = PdfDocument::load(&file)?;
    let info = doc.get_info();

    if json {
        println!("{}", serde_json::to_string_pretty(&info)?);
        return Ok(());
    }

    println!("File: {}", path.as_ref().display());
    println!("Pages: {}", info.page_count);
    println!("PDF version: {}", info.version);

    let fields = [
        ("Title", &info.title),
        ("Author", &info.author),
        ("Subject", &info.subject),
        ("Keywords", &info.keywords),
        ("Creator", &info.creator),
        ("Producer", &info.producer),
    ];
    for (label, value) in fields {
        if let Some(value) = value {
            println!("{}: {}", label, value);
        }
    }

    if let Some(creation_date) = &info.creation_date {
        println!("Created: {}", format_pdf_date(creation_date));
    }
    if let Some(mod_date) = &info.mod_date {
        println!("Modified: {}", format_pdf_date(mod_date));
    }

    Ok(())
}

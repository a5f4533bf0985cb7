use crate::error::ToolError;
use crate::pdf::PdfDocument;
use lopdf::{dictionary, Dictionary, Document, Object, ObjectId};
use std::collections::BTreeMap;
use tracing::{debug, info};

/// Page attributes a page may inherit from its ancestors in the page tree.
const INHERITABLE: [&[u8]; 4] = [b"Resources", b"MediaBox", b"CropBox", b"Rotate"];

/// Concatenate documents in the given order into a single document.
///
/// Every page keeps its own attributes (inherited ones are copied onto the
/// page), so the source page trees can be replaced by one flat `Pages` node.
pub fn merge_documents(documents: Vec<PdfDocument>) -> Result<Document, ToolError> {
    if documents.is_empty() {
        return Err(ToolError::InputRejected(
            "Please select at least one file.".to_string(),
        ));
    }

    let source_count = documents.len();
    let mut max_id = 1;
    let mut pages: Vec<(ObjectId, Dictionary)> = Vec::new();
    let mut objects: BTreeMap<ObjectId, Object> = BTreeMap::new();

    for PdfDocument { mut doc, name } in documents {
        doc.renumber_objects_with(max_id);
        max_id = doc.max_id + 1;

        for (_, page_id) in doc.get_pages() {
            let page = flatten_page(&doc, page_id).map_err(|e| {
                ToolError::unexpected(&format!("Failed to read page of '{}'", name), e)
            })?;
            pages.push((page_id, page));
        }
        debug!(name = %name, collected = pages.len(), "collected pages");

        objects.extend(doc.objects);
    }

    let mut merged = Document::with_version("1.5");
    for (object_id, object) in objects {
        match object.type_name().unwrap_or(b"") {
            // Rebuilt below.
            b"Catalog" | b"Pages" | b"Page" | b"Outlines" | b"Outline" => {}
            _ => {
                merged.objects.insert(object_id, object);
            }
        }
    }
    merged.max_id = max_id;

    let pages_id = merged.new_object_id();
    let mut kids = Vec::with_capacity(pages.len());
    for (page_id, mut page) in pages {
        page.set("Parent", pages_id);
        merged.objects.insert(page_id, Object::Dictionary(page));
        kids.push(Object::Reference(page_id));
    }

    let page_count = kids.len();
    merged.objects.insert(
        pages_id,
        Object::Dictionary(dictionary! {
            "Type" => "Pages",
            "Count" => page_count as i64,
            "Kids" => kids,
        }),
    );

    let catalog_id = merged.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    merged.trailer.set("Root", catalog_id);

    merged.renumber_objects();
    merged.prune_objects();
    merged.compress();

    info!(documents = source_count, pages = page_count, "merged documents");
    Ok(merged)
}

/// A copy of the page dictionary with inherited attributes filled in.
fn flatten_page(doc: &Document, page_id: ObjectId) -> lopdf::Result<Dictionary> {
    let mut page = doc.get_dictionary(page_id)?.clone();

    let mut parent = page.get(b"Parent").and_then(Object::as_reference).ok();
    while let Some(parent_id) = parent {
        let node = doc.get_dictionary(parent_id)?;
        for key in INHERITABLE {
            if !page.has(key) {
                if let Ok(value) = node.get(key) {
                    page.set(key, value.clone());
                }
            }
        }
        parent = node.get(b"Parent").and_then(Object::as_reference).ok();
    }

    Ok(page)
}

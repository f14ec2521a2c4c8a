pub mod aggregate;
pub mod error;
pub mod extraction;
pub mod model;
pub mod parsing;
pub mod report;

use aggregate::BatchResult;
use error::ExtratoError;
use extraction::PdfExtractor;
use model::{DocumentRecords, SkippedFile};

/// One uploaded document: its display name and raw PDF bytes.
#[derive(Debug, Clone)]
pub struct DocumentInput {
    pub filename: String,
    pub bytes: Vec<u8>,
}

/// Extract all four section records from a single document.
pub fn extract_document(
    pdf_bytes: &[u8],
    filename: &str,
    extractor: &dyn PdfExtractor,
) -> Result<DocumentRecords, ExtratoError> {
    let pages = extractor.extract_pages(pdf_bytes)?;
    let text = extraction::full_text(&pages);
    Ok(parsing::parse_document(&text, filename))
}

/// Run the full pipeline over a batch of documents.
///
/// Documents are processed strictly in input order. A file whose text cannot
/// be extracted is skipped and recorded, never aborting the batch; a batch
/// where every file was skipped yields empty tables with zero totals.
pub fn process_batch(inputs: &[DocumentInput], extractor: &dyn PdfExtractor) -> BatchResult {
    let mut docs = Vec::with_capacity(inputs.len());
    let mut skipped = Vec::new();

    for input in inputs {
        match extract_document(&input.bytes, &input.filename, extractor) {
            Ok(doc) => docs.push(doc),
            Err(e) => {
                tracing::warn!(arquivo = %input.filename, error = %e, "skipping unreadable file");
                skipped.push(SkippedFile {
                    arquivo: input.filename.clone(),
                    motivo: e.to_string(),
                });
            }
        }
    }

    aggregate::aggregate_batch(docs, skipped)
}

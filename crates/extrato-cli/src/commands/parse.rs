use extrato_core::extraction::pdftotext::PdftotextExtractor;
use extrato_core::model::DocumentRecords;
use std::path::PathBuf;

use crate::commands::display_name;
use crate::output;

pub fn run(
    inputs: Vec<PathBuf>,
    output_format: &str,
    output_file: Option<PathBuf>,
) -> Result<(), extrato_core::error::ExtratoError> {
    let extractor = PdftotextExtractor::new();

    let mut parsed: Vec<DocumentRecords> = Vec::new();
    for path in &inputs {
        let bytes = std::fs::read(path)?;
        let doc = extrato_core::extract_document(&bytes, &display_name(path), &extractor)?;
        parsed.push(doc);
    }

    match output_file {
        Some(path) => {
            // Always write JSON when saving to file
            let json = serde_json::to_string_pretty(&parsed)?;
            std::fs::write(&path, json)?;
            eprintln!(
                "Parsed {} document(s), written to {}",
                parsed.len(),
                path.display()
            );
        }
        None => match output_format {
            "json" => output::json::print(&parsed)?,
            _ => println!("{}", output::table::format_documents(&parsed)),
        },
    }

    Ok(())
}

use extrato_core::error::ExtratoError;
use extrato_core::model::DocumentRecords;

pub fn print(docs: &[DocumentRecords]) -> Result<(), ExtratoError> {
    let json = serde_json::to_string_pretty(docs)?;
    println!("{json}");
    Ok(())
}

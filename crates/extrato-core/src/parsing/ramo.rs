use crate::model::{RamoContagem, RamoRecord};
use crate::parsing::locator;
use regex::Regex;
use std::sync::LazyLock;

static IDENTIFICACAO: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?si)04\s*-\s*Identificação.*?(?:05\s*-|\z)").unwrap());

// [ \t]* keeps the capture on the label's own line: an empty value must not
// swallow the following line.
static RAMO_ATIVIDADE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)Ramo\s*Atividade\s*:[ \t]*([^\n]*)").unwrap());

/// Extract every labeled activity-branch value from the identification
/// section, tallied by exact string match in first-seen order.
pub fn extract_ramo_atividade(text: &str, filename: &str) -> RamoRecord {
    let mut rec = RamoRecord {
        arquivo: filename.to_string(),
        ..Default::default()
    };

    let Some(secao) = locator::span(&IDENTIFICACAO, text) else {
        return rec;
    };

    for c in RAMO_ATIVIDADE.captures_iter(secao) {
        let valor = c[1].trim();
        if valor.is_empty() {
            continue;
        }
        match rec.ramos.iter_mut().find(|r| r.nome == valor) {
            Some(existente) => existente.quantidade += 1,
            None => rec.ramos.push(RamoContagem {
                nome: valor.to_string(),
                quantidade: 1,
            }),
        }
    }

    rec
}

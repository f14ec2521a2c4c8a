use crate::model::ProcessoRecord;
use crate::parsing::locator;
use regex::Regex;
use std::sync::LazyLock;

static FISCAL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"Agente\s+de\s+Fiscalização\s*:[ \t]*([^\n]+)").unwrap());

// Protocol number inside the "Fato Gerador" field, recognized only when
// marked by the PROCESSO/PROTOCOLO token.
static PROTOCOLO: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)Fato\s+Gerador\s*:\s*.*?(PROCESSO/PROTOCOLO[\s\-]*\d+[/\-]?\d*)").unwrap()
});

static DOCUMENTOS_RECEBIDOS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?si)06\s*-\s*Documentos\s*Recebidos(.*?)(?:\n\s*07|\z)").unwrap()
});

static OUTROS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)OUTROS\s*[:\-][ \t]*([^\n]*)").unwrap());

static DATA_RELATORIO: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"Data\s+Relatório\s*:[ \t]*([^\n]+)").unwrap());

/// Extract process/protocol fields from one document's text.
pub fn extract_processo_protocolo(text: &str, filename: &str) -> ProcessoRecord {
    let mut rec = ProcessoRecord {
        arquivo: filename.to_string(),
        ..Default::default()
    };

    if let Some(fiscal) = locator::captured(&FISCAL, text) {
        rec.fiscal = fiscal.to_string();
    }

    if let Some(c) = PROTOCOLO.captures(text) {
        let digitos: String = c[1].chars().filter(|ch| ch.is_ascii_digit()).collect();
        rec.qtd_protocolo = u32::from(!digitos.is_empty());
        rec.protocolo = digitos;
    }

    if let Some(secao) = locator::captured(&DOCUMENTOS_RECEBIDOS, text) {
        if let Some(outros) = locator::captured(&OUTROS, secao) {
            let texto = locator::normalize_ws(outros);
            if !texto.is_empty() {
                rec.legalizacao = texto;
                rec.qtd_legalizacao = 1;
            }
        }
    }

    if let Some(data) = locator::captured(&DATA_RELATORIO, text) {
        rec.data_relatorio = locator::formatted_date(data);
    }

    rec
}

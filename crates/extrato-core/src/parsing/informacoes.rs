use crate::model::InformacoesRecord;
use regex::Regex;
use std::sync::LazyLock;

// "Informações Complementares" value inside the "07 - Outras Informações"
// section, bounded by the next enumerated marker or end of text.
static INFORMACOES_COMPLEMENTARES: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?si)07\s*-\s*Outras\s+Informações.*?Informações\s+Complementares\s*:\s*(.*?)(?:\n\s*(?:08\s*-|\d{2}\s*-)|\z)",
    )
    .unwrap()
});

// Non-greedy, may span newlines.
static PARENTESES: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?s)\((.*?)\)").unwrap());

/// Extract every parenthesized snippet from the complementary-information
/// field. Absent section, absent field, or no parentheses all yield an empty
/// string, never an error.
pub fn extract_informacoes_complementares(text: &str, filename: &str) -> InformacoesRecord {
    let mut rec = InformacoesRecord {
        arquivo: filename.to_string(),
        ..Default::default()
    };

    let Some(campo) = INFORMACOES_COMPLEMENTARES
        .captures(text)
        .and_then(|c| c.get(1))
        .map(|m| m.as_str())
    else {
        return rec;
    };

    let notas: Vec<String> = PARENTESES
        .captures_iter(campo)
        .map(|c| c[1].trim().replace('\n', " "))
        .filter(|nota| !nota.is_empty())
        .collect();

    rec.informacoes = notas.join(", ");
    rec
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_two_notes_joined() {
        let text =
            "07 - Outras Informações\nInformações Complementares: texto (nota1) mais texto (nota2)\n08 - Fim";
        let rec = extract_informacoes_complementares(text, "a.pdf");
        assert_eq!(rec.informacoes, "nota1, nota2");
    }

    #[test]
    fn test_note_spanning_newline_flattened() {
        let text = "07 - Outras Informações\nInformações Complementares: (obra\nembargada) fim\n08 -";
        let rec = extract_informacoes_complementares(text, "a.pdf");
        assert_eq!(rec.informacoes, "obra embargada");
    }

    #[test]
    fn test_field_bounded_by_numbered_marker() {
        let text = "07 - Outras Informações\nInformações Complementares: (dentro)\n09 - Assinaturas\n(fora)";
        let rec = extract_informacoes_complementares(text, "a.pdf");
        assert_eq!(rec.informacoes, "dentro");
    }

    #[test]
    fn test_no_parentheses_empty() {
        let text = "07 - Outras Informações\nInformações Complementares: nada relevante\n08 -";
        let rec = extract_informacoes_complementares(text, "a.pdf");
        assert_eq!(rec.informacoes, "");
    }

    #[test]
    fn test_missing_section_empty() {
        let rec = extract_informacoes_complementares("(nota solta)", "a.pdf");
        assert_eq!(rec.informacoes, "");
    }

    #[test]
    fn test_blank_parentheses_dropped() {
        let text = "07 - Outras Informações\nInformações Complementares: ( ) (útil)\n08 -";
        let rec = extract_informacoes_complementares(text, "a.pdf");
        assert_eq!(rec.informacoes, "útil");
    }
}

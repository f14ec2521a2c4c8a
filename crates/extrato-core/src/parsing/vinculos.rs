use crate::model::VinculosRecord;
use crate::parsing::locator;
use regex::Regex;
use std::sync::LazyLock;

// Latitude and Longitude are printed on the same line of the form.
static COORDENADAS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"Latitude\s*:\s*([-\d,.]+).*?Longitude\s*:\s*([-\d,.]+)").unwrap()
});

// Address block: from the "01" marker to the next enumerated marker,
// the "Descritivo:" field, or end of text.
static ENDERECO: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?s)01\s*-\s*Endereço\s*Empreendimento\s*(.*?)\s*(?:02\s*-|Descritivo:|\z)")
        .unwrap()
});

static IDENTIFICACAO: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)04\s*-\s*Identificação.*?(?:05\s*-|\z)").unwrap());

static CONTRATADO: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"CONTRATADO\s*:").unwrap());

static RESPONSAVEL_TECNICO: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"RESPONSAVEL\s*TECNICO\s*:").unwrap());

// Official-notice lines: a number followed by the GFIS keyword, up to line
// end, optionally preceded by an "OFÍCIO Nº"-style prefix.
static OFICIOS_GFIS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)(?:OF[IÍ]CIO\s*[Nnº°]*\s*[.:-]*\s*)?(\d+.*?GFIS.*?)(?:\n|\z)").unwrap()
});

/// Extract linkage and official-notice fields from one document's text.
///
/// Missing sections contribute zero counts and `None` fields; a coordinate
/// pair that does not parse as numeric yields null coordinates.
pub fn extract_vinculos(text: &str, filename: &str) -> VinculosRecord {
    let mut rec = VinculosRecord {
        arquivo: filename.to_string(),
        ..Default::default()
    };

    if let Some(c) = COORDENADAS.captures(text) {
        if let (Some(lat), Some(lon)) = (
            locator::parse_decimal_flex(&c[1]),
            locator::parse_decimal_flex(&c[2]),
        ) {
            rec.latitude = Some(lat);
            rec.longitude = Some(lon);
        }
    }

    rec.endereco = locator::captured(&ENDERECO, text).map(locator::normalize_ws);

    if let Some(secao) = locator::span(&IDENTIFICACAO, text) {
        rec.contratado = CONTRATADO.find_iter(secao).count() as u32;
        rec.responsavel_tecnico = RESPONSAVEL_TECNICO.find_iter(secao).count() as u32;
        rec.vinculos = rec.contratado + rec.responsavel_tecnico;
    }

    let oficios: Vec<String> = OFICIOS_GFIS
        .captures_iter(text)
        .map(|c| c[1].trim().to_string())
        .collect();
    rec.si = oficios.len() as u32;
    rec.oficios_gfis = oficios.join("; ");

    rec
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_coordinates_comma_decimal() {
        let rec = extract_vinculos("Latitude: -22,90 Longitude: -43,20", "a.pdf");
        assert_eq!(rec.latitude, Some(-22.90));
        assert_eq!(rec.longitude, Some(-43.20));
    }

    #[test]
    fn test_coordinates_missing_labels() {
        let rec = extract_vinculos("sem coordenadas aqui", "a.pdf");
        assert_eq!(rec.latitude, None);
        assert_eq!(rec.longitude, None);
    }

    #[test]
    fn test_coordinates_malformed_numeric() {
        // Two commas cannot parse as a number: null, not coerced.
        let rec = extract_vinculos("Latitude: -22,90,18 Longitude: -43,20", "a.pdf");
        assert_eq!(rec.latitude, None);
        assert_eq!(rec.longitude, None);
    }

    #[test]
    fn test_endereco_bounded_by_next_section() {
        let text = "01 - Endereço Empreendimento\nRua  das  Flores,\n100\n02 - Outro";
        let rec = extract_vinculos(text, "a.pdf");
        assert_eq!(rec.endereco.as_deref(), Some("Rua das Flores, 100"));
    }

    #[test]
    fn test_endereco_bounded_by_descritivo() {
        let text = "01 - Endereço Empreendimento Av. Brasil 500 Descritivo: obra";
        let rec = extract_vinculos(text, "a.pdf");
        assert_eq!(rec.endereco.as_deref(), Some("Av. Brasil 500"));
    }

    #[test]
    fn test_vinculos_counted_inside_identificacao() {
        let text = "04 - Identificação\nCONTRATADO: X\nRESPONSAVEL TECNICO: Y\nCONTRATADO : Z\n05 - Próxima\nCONTRATADO: fora";
        let rec = extract_vinculos(text, "a.pdf");
        assert_eq!(rec.contratado, 2);
        assert_eq!(rec.responsavel_tecnico, 1);
        assert_eq!(rec.vinculos, 3);
    }

    #[test]
    fn test_vinculos_zero_without_section() {
        let rec = extract_vinculos("CONTRATADO: X", "a.pdf");
        assert_eq!(rec.vinculos, 0);
    }

    #[test]
    fn test_oficios_gfis_counted_and_joined() {
        let text = "OFÍCIO Nº 123/2024-GFIS\ntexto\n456-GFIS urgente\n";
        let rec = extract_vinculos(text, "a.pdf");
        assert_eq!(rec.si, 2);
        assert_eq!(rec.oficios_gfis, "123/2024-GFIS; 456-GFIS urgente");
    }

    #[test]
    fn test_oficios_case_insensitive() {
        let rec = extract_vinculos("oficio 77-gfis\n", "a.pdf");
        assert_eq!(rec.si, 1);
        assert_eq!(rec.oficios_gfis, "77-gfis");
    }

    #[test]
    fn test_no_oficios_empty_string() {
        let rec = extract_vinculos("nada por aqui", "a.pdf");
        assert_eq!(rec.si, 0);
        assert_eq!(rec.oficios_gfis, "");
    }
}

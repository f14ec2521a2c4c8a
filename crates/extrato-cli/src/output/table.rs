use extrato_core::model::DocumentRecords;
use std::fmt::Write;

/// Human-readable console rendering of parsed documents.
pub fn format_documents(docs: &[DocumentRecords]) -> String {
    let mut out = String::new();

    for (i, doc) in docs.iter().enumerate() {
        if i > 0 {
            out.push('\n');
        }
        let _ = writeln!(out, "--- Arquivo: {} ---", doc.vinculos.arquivo);

        let coordenadas = match (doc.vinculos.latitude, doc.vinculos.longitude) {
            (Some(lat), Some(lon)) => format!("{lat}, {lon}"),
            _ => "-".to_string(),
        };
        let _ = writeln!(out, "  {:<16}{}", "Coordenadas:", coordenadas);
        let _ = writeln!(
            out,
            "  {:<16}{}",
            "Endereço:",
            doc.vinculos.endereco.as_deref().unwrap_or("-")
        );
        let _ = writeln!(
            out,
            "  {:<16}{} (CONTRATADO: {}, RESPONSAVEL TECNICO: {})",
            "Vínculos:",
            doc.vinculos.vinculos,
            doc.vinculos.contratado,
            doc.vinculos.responsavel_tecnico
        );
        let _ = writeln!(out, "  {:<16}{}", "S.I:", doc.vinculos.si);
        if !doc.vinculos.oficios_gfis.is_empty() {
            let _ = writeln!(out, "  {:<16}{}", "Ofícios GFIS:", doc.vinculos.oficios_gfis);
        }

        let ramos = doc
            .ramo
            .ramos
            .iter()
            .map(|r| format!("{} ({})", r.nome, r.quantidade))
            .collect::<Vec<_>>()
            .join(", ");
        let _ = writeln!(out, "  {:<16}{}", "Ramos:", if ramos.is_empty() { "-".to_string() } else { ramos });

        let _ = writeln!(
            out,
            "  {:<16}{}",
            "Fiscal:",
            if doc.processo.fiscal.is_empty() {
                "-"
            } else {
                &doc.processo.fiscal
            }
        );
        let _ = writeln!(
            out,
            "  {:<16}{} (qtd: {})",
            "Protocolo:",
            if doc.processo.protocolo.is_empty() {
                "-"
            } else {
                &doc.processo.protocolo
            },
            doc.processo.qtd_protocolo
        );
        let _ = writeln!(
            out,
            "  {:<16}{} (qtd: {})",
            "Legalização:",
            if doc.processo.legalizacao.is_empty() {
                "-"
            } else {
                &doc.processo.legalizacao
            },
            doc.processo.qtd_legalizacao
        );
        let _ = writeln!(
            out,
            "  {:<16}{}",
            "Data Relatório:",
            if doc.processo.data_relatorio.is_empty() {
                "-"
            } else {
                &doc.processo.data_relatorio
            }
        );
        let _ = writeln!(
            out,
            "  {:<16}{}",
            "Informações:",
            if doc.informacoes.informacoes.is_empty() {
                "-"
            } else {
                &doc.informacoes.informacoes
            }
        );
    }

    out
}

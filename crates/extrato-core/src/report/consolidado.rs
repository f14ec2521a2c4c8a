//! Consolidated productivity extract: the single required output of a batch
//! run, combining the scalar totals of all four section tables with the
//! complementary-information listing.

use crate::aggregate::BatchResult;
use crate::error::ExtratoError;
use crate::report::composer::{Align, FontStyle, PageComposer, CONTENT_W};
use crate::report::ReportOptions;

pub fn extrato_consolidado(
    batch: &BatchResult,
    opts: &ReportOptions,
) -> Result<Vec<u8>, ExtratoError> {
    let mut pdf = PageComposer::new();

    if let Some(logo) = opts.load_logo() {
        pdf.draw_logo(&logo, 10.0, 8.0, 40.0);
    }

    pdf.set_font(FontStyle::Bold, 16.0);
    pdf.cell(
        CONTENT_W,
        30.0,
        "EXTRATO CONSOLIDADO PRODUTIVIDADE",
        false,
        Align::Center,
    );
    pdf.ln(30.0);

    let fiscal = batch
        .contexto
        .fiscal_principal()
        .unwrap_or("Não identificado");
    let periodo = match batch.contexto.periodo() {
        Some((inicio, fim)) => format!(
            "{} a {}",
            inicio.format("%d/%m/%Y"),
            fim.format("%d/%m/%Y")
        ),
        None => "Não disponível".to_string(),
    };

    pdf.set_font(FontStyle::Regular, 12.0);
    pdf.cell(
        CONTENT_W,
        10.0,
        &format!("Agente de Fiscalização: {fiscal}"),
        false,
        Align::Left,
    );
    pdf.ln(10.0);
    pdf.cell(CONTENT_W, 10.0, &format!("Período: {periodo}"), false, Align::Left);
    pdf.ln(10.0);
    pdf.ln(10.0);

    pdf.set_font(FontStyle::Bold, 14.0);
    pdf.cell(CONTENT_W, 10.0, "RESUMO GERAL", false, Align::Center);
    pdf.ln(10.0);
    pdf.ln(5.0);

    pdf.set_font(FontStyle::Bold, 12.0);
    let resumo = [
        format!("TOTAL AÇÕES: {}", batch.total_acoes()),
        format!("TOTAL VÍNCULOS: {}", batch.vinculos.total_vinculos),
        format!("TOTAL S.I: {}", batch.vinculos.total_si),
        format!(
            "TOTAL DE RAMO DE ATIVIDADE: {}",
            batch.ramo.total_quantidade
        ),
        format!("TOTAL PROTOCOLO: {}", batch.processo.total_protocolos),
        format!("TOTAL LEGALIZAÇÃO: {}", batch.processo.total_legalizacoes),
    ];
    for linha in &resumo {
        pdf.cell(CONTENT_W, 10.0, linha, false, Align::Left);
        pdf.ln(10.0);
    }
    pdf.ln(15.0);

    if batch.informacoes.com_informacoes().next().is_some() {
        if pdf.page_break_needed(25.0) {
            pdf.add_page();
        }
        pdf.set_font(FontStyle::Bold, 14.0);
        pdf.cell(
            CONTENT_W,
            10.0,
            "INFORMAÇÕES COMPLEMENTARES:",
            false,
            Align::Left,
        );
        pdf.ln(10.0);
        pdf.ln(5.0);

        for row in batch.informacoes.com_informacoes() {
            if pdf.page_break_needed(24.0) {
                pdf.add_page();
            }
            pdf.set_font(FontStyle::Bold, 10.0);
            pdf.cell(
                CONTENT_W,
                8.0,
                &format!("Arquivo: {}", row.arquivo),
                false,
                Align::Left,
            );
            pdf.ln(8.0);
            pdf.set_font(FontStyle::Regular, 10.0);
            pdf.multi_line(CONTENT_W, 8.0, &row.informacoes, Align::Left);
            pdf.ln(5.0);
        }
    }

    pdf.ln(10.0);
    if pdf.page_break_needed(10.0) {
        pdf.add_page();
    }
    pdf.set_font(FontStyle::Italic, 10.0);
    pdf.cell(
        CONTENT_W,
        10.0,
        &format!("Gerado em: {}", opts.timestamp()),
        false,
        Align::Center,
    );

    pdf.finish()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aggregate::aggregate_batch;
    use crate::model::DocumentRecords;

    fn opts() -> ReportOptions {
        ReportOptions {
            logo: None,
            gerado_em: chrono::NaiveDate::from_ymd_opt(2024, 3, 5)
                .unwrap()
                .and_hms_opt(12, 0, 0),
        }
    }

    #[test]
    fn test_consolidado_renders_empty_batch() {
        let batch = aggregate_batch(vec![], vec![]);
        let bytes = extrato_consolidado(&batch, &opts()).unwrap();
        assert!(bytes.starts_with(b"%PDF-"));
        lopdf::Document::load_mem(&bytes).unwrap();
    }

    #[test]
    fn test_consolidado_renders_full_batch() {
        let mut doc = DocumentRecords::default();
        doc.vinculos.arquivo = "a.pdf".into();
        doc.vinculos.vinculos = 2;
        doc.vinculos.si = 1;
        doc.processo.fiscal = "Maria Souza".into();
        doc.processo.data_relatorio = "05/03/2024".into();
        doc.informacoes.arquivo = "a.pdf".into();
        doc.informacoes.informacoes = "obra embargada, notificação entregue".into();
        let batch = aggregate_batch(vec![doc], vec![]);

        let bytes = extrato_consolidado(&batch, &opts()).unwrap();
        assert!(bytes.starts_with(b"%PDF-"));
        lopdf::Document::load_mem(&bytes).unwrap();
    }
}

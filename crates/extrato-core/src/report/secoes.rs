//! Per-section PDF reports. Layout geometry (column widths, font sizes,
//! pagination thresholds) follows the printed form's established reports.

use crate::aggregate::{InformacoesTable, ProcessoTable, RamoTable, VinculosTable};
use crate::error::ExtratoError;
use crate::report::composer::{fit_text, Align, FontStyle, PageComposer, CONTENT_W};
use crate::report::ReportOptions;

/// "Relatório Vínculos e S.I": one row per document plus the TOTAL row.
pub fn relatorio_vinculos_si(
    table: &VinculosTable,
    opts: &ReportOptions,
) -> Result<Vec<u8>, ExtratoError> {
    const WIDTHS: [f32; 3] = [80.0, 30.0, 30.0];

    fn cabecalho(pdf: &mut PageComposer) {
        pdf.set_font(FontStyle::Bold, 12.0);
        for (w, titulo) in WIDTHS.iter().zip(["Arquivo", "Vínculos", "S.I"]) {
            pdf.cell(*w, 10.0, titulo, true, Align::Center);
        }
        pdf.ln(10.0);
    }

    let mut pdf = PageComposer::new();

    pdf.set_font(FontStyle::Bold, 16.0);
    pdf.cell(CONTENT_W, 10.0, "Relatório Vínculos e S.I", false, Align::Center);
    pdf.ln(10.0);
    pdf.set_font(FontStyle::Regular, 10.0);
    pdf.cell(
        CONTENT_W,
        10.0,
        &format!("Gerado em: {}", opts.timestamp()),
        false,
        Align::Left,
    );
    pdf.ln(10.0);
    pdf.ln(10.0);

    cabecalho(&mut pdf);

    for row in &table.rows {
        if pdf.page_break_needed(10.0) {
            pdf.add_page();
            cabecalho(&mut pdf);
        }
        pdf.set_font(FontStyle::Regular, 10.0);
        pdf.cell(
            WIDTHS[0],
            10.0,
            &fit_text(&row.arquivo, WIDTHS[0], 10.0),
            true,
            Align::Left,
        );
        pdf.cell(WIDTHS[1], 10.0, &row.vinculos.to_string(), true, Align::Center);
        pdf.cell(WIDTHS[2], 10.0, &row.si.to_string(), true, Align::Center);
        pdf.ln(10.0);
    }

    if pdf.page_break_needed(10.0) {
        pdf.add_page();
        cabecalho(&mut pdf);
    }
    pdf.set_font(FontStyle::Bold, 10.0);
    pdf.cell(WIDTHS[0], 10.0, "TOTAL GERAL", true, Align::Left);
    pdf.cell(
        WIDTHS[1],
        10.0,
        &table.total_vinculos.to_string(),
        true,
        Align::Center,
    );
    pdf.cell(WIDTHS[2], 10.0, &table.total_si.to_string(), true, Align::Center);

    pdf.finish()
}

/// "Relatório de Ramos de Atividade": cross-document tally in descending
/// count order, with a percentage column and the TOTAL GERAL (100%) row.
pub fn relatorio_ramo_atividade(
    table: &RamoTable,
    opts: &ReportOptions,
) -> Result<Vec<u8>, ExtratoError> {
    const WIDTHS: [f32; 3] = [120.0, 30.0, 30.0];

    fn cabecalho(pdf: &mut PageComposer) {
        pdf.set_font(FontStyle::Bold, 10.0);
        for (w, titulo) in WIDTHS
            .iter()
            .zip(["RAMO DE ATIVIDADE", "QUANTIDADE", "PORCENTAGEM"])
        {
            pdf.cell(*w, 8.0, titulo, true, Align::Center);
        }
        pdf.ln(8.0);
    }

    let mut pdf = PageComposer::new();

    pdf.set_font(FontStyle::Bold, 16.0);
    pdf.cell(
        CONTENT_W,
        10.0,
        "RELATÓRIO DE RAMOS DE ATIVIDADE",
        false,
        Align::Center,
    );
    pdf.ln(10.0);
    pdf.ln(10.0);

    cabecalho(&mut pdf);

    let total = table.total_quantidade;
    for contagem in table.contagem_ordenada() {
        if pdf.page_break_needed(8.0) {
            pdf.add_page();
            cabecalho(&mut pdf);
        }
        pdf.set_font(FontStyle::Regular, 9.0);
        pdf.cell(
            WIDTHS[0],
            8.0,
            &fit_text(&contagem.nome, WIDTHS[0], 9.0),
            true,
            Align::Left,
        );
        pdf.cell(
            WIDTHS[1],
            8.0,
            &contagem.quantidade.to_string(),
            true,
            Align::Center,
        );
        let pct = if total > 0 {
            format!("{:.1}%", contagem.quantidade as f64 / total as f64 * 100.0)
        } else {
            "0%".to_string()
        };
        pdf.cell(WIDTHS[2], 8.0, &pct, true, Align::Center);
        pdf.ln(8.0);
    }

    if pdf.page_break_needed(8.0) {
        pdf.add_page();
        cabecalho(&mut pdf);
    }
    pdf.set_font(FontStyle::Bold, 10.0);
    pdf.cell(WIDTHS[0], 8.0, "TOTAL GERAL", true, Align::Left);
    pdf.cell(WIDTHS[1], 8.0, &total.to_string(), true, Align::Center);
    pdf.cell(WIDTHS[2], 8.0, "100%", true, Align::Center);

    pdf.ln(8.0);
    pdf.ln(10.0);
    pdf.set_font(FontStyle::Italic, 8.0);
    pdf.cell(
        CONTENT_W,
        10.0,
        &format!("Gerado em: {}", opts.timestamp()),
        false,
        Align::Center,
    );

    pdf.finish()
}

/// "Relatório de Processos/Protocolos": six columns, with the Arquivo and
/// Legalização cells wrapping and the row expanding to the taller of the
/// two. The header row is re-emitted after every page break.
pub fn relatorio_processo_protocolo(
    table: &ProcessoTable,
    opts: &ReportOptions,
) -> Result<Vec<u8>, ExtratoError> {
    const WIDTHS: [f32; 6] = [35.0, 30.0, 40.0, 40.0, 20.0, 20.0];
    const LINHA: f32 = 5.0;

    fn cabecalho(pdf: &mut PageComposer) {
        let titulos = [
            "Arquivo",
            "Fiscal",
            "Protocolo",
            "Legalização",
            "Protocolo",
            "Legalização",
        ];
        pdf.set_font(FontStyle::Bold, 8.0);
        for (w, titulo) in WIDTHS.iter().zip(titulos) {
            pdf.cell(*w, 8.0, titulo, true, Align::Center);
        }
        pdf.ln(8.0);
    }

    let mut pdf = PageComposer::new();

    pdf.set_font(FontStyle::Bold, 12.0);
    pdf.cell(
        CONTENT_W,
        10.0,
        "RELATÓRIO DE PROCESSOS/PROTOCOLOS",
        false,
        Align::Center,
    );
    pdf.ln(10.0);
    pdf.ln(8.0);

    cabecalho(&mut pdf);

    for row in &table.rows {
        pdf.set_font(FontStyle::Regular, 8.0);
        let linhas_arquivo = pdf.wrap(&row.arquivo, WIDTHS[0]);
        let linhas_legalizacao = pdf.wrap(&row.legalizacao, WIDTHS[3]);
        let linhas = linhas_arquivo.len().max(linhas_legalizacao.len()).max(1) as u32;
        let altura = LINHA * linhas as f32;

        if pdf.page_break_needed(altura) {
            pdf.add_page();
            cabecalho(&mut pdf);
            pdf.set_font(FontStyle::Regular, 8.0);
        }

        pdf.box_cell(WIDTHS[0], LINHA, linhas, &linhas_arquivo, true, Align::Left);
        pdf.cell(
            WIDTHS[1],
            altura,
            &fit_text(&row.fiscal, WIDTHS[1], 8.0),
            true,
            Align::Center,
        );
        pdf.cell(WIDTHS[2], altura, &row.protocolo, true, Align::Center);
        pdf.box_cell(
            WIDTHS[3],
            LINHA,
            linhas,
            &linhas_legalizacao,
            true,
            Align::Left,
        );
        pdf.cell(
            WIDTHS[4],
            altura,
            &row.qtd_protocolo.to_string(),
            true,
            Align::Center,
        );
        pdf.cell(
            WIDTHS[5],
            altura,
            &row.qtd_legalizacao.to_string(),
            true,
            Align::Center,
        );
        pdf.ln(altura);
    }

    if pdf.page_break_needed(LINHA) {
        pdf.add_page();
        cabecalho(&mut pdf);
    }
    pdf.set_font(FontStyle::Bold, 8.0);
    let rotulo_w: f32 = WIDTHS[..4].iter().sum();
    pdf.cell(rotulo_w, LINHA, "TOTAL GERAL", true, Align::Right);
    pdf.cell(
        WIDTHS[4],
        LINHA,
        &table.total_protocolos.to_string(),
        true,
        Align::Center,
    );
    pdf.cell(
        WIDTHS[5],
        LINHA,
        &table.total_legalizacoes.to_string(),
        true,
        Align::Center,
    );

    pdf.ln(LINHA);
    pdf.ln(12.0);
    pdf.set_font(FontStyle::Italic, 8.0);
    pdf.cell(
        CONTENT_W,
        10.0,
        &format!("Gerado em: {}", opts.timestamp()),
        false,
        Align::Center,
    );

    pdf.finish()
}

/// "Relatório de Informações Complementares": free-text listing for only the
/// documents that carry parenthesized notes.
pub fn relatorio_informacoes_complementares(
    table: &InformacoesTable,
    opts: &ReportOptions,
) -> Result<Vec<u8>, ExtratoError> {
    const LINHA: f32 = 6.0;

    let mut pdf = PageComposer::new();

    pdf.set_font(FontStyle::Bold, 14.0);
    pdf.cell(
        CONTENT_W,
        10.0,
        "RELATÓRIO DE INFORMAÇÕES COMPLEMENTARES",
        false,
        Align::Center,
    );
    pdf.ln(10.0);
    pdf.ln(5.0);
    pdf.set_font(FontStyle::Regular, 10.0);
    pdf.cell(
        CONTENT_W,
        10.0,
        &format!("Gerado em: {}", opts.timestamp()),
        false,
        Align::Left,
    );
    pdf.ln(10.0);
    pdf.ln(10.0);

    for row in table.com_informacoes() {
        if pdf.page_break_needed(3.0 * LINHA) {
            pdf.add_page();
        }
        pdf.set_font(FontStyle::Bold, 10.0);
        pdf.cell(
            CONTENT_W,
            LINHA,
            &format!("Arquivo: {}", row.arquivo),
            false,
            Align::Left,
        );
        pdf.ln(LINHA);
        pdf.set_font(FontStyle::Regular, 10.0);
        pdf.multi_line(CONTENT_W, LINHA, &row.informacoes, Align::Left);
        pdf.ln(LINHA);
    }

    pdf.finish()
}

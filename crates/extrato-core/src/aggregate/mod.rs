//! Batch aggregation: folds per-document records into section tables with
//! synthetic totals, plus the batch context used by the consolidated report.
//!
//! Totals are recomputed from scratch by each `build`; nothing is mutated
//! incrementally, so reprocessing the same rows always yields the same table.

use crate::model::{
    DocumentRecords, InformacoesRecord, ProcessoRecord, RamoContagem, RamoRecord, SkippedFile,
    VinculosRecord,
};
use chrono::NaiveDate;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;

static DATA_EXATA: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d{2}/\d{2}/\d{4}$").unwrap());

/// Linkage/official-notice rows plus the TOTAL row sums.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct VinculosTable {
    pub rows: Vec<VinculosRecord>,
    pub total_vinculos: u32,
    pub total_si: u32,
}

impl VinculosTable {
    pub fn build(rows: Vec<VinculosRecord>) -> Self {
        let total_vinculos = rows.iter().map(|r| r.vinculos).sum();
        let total_si = rows.iter().map(|r| r.si).sum();
        VinculosTable {
            rows,
            total_vinculos,
            total_si,
        }
    }
}

/// Activity-branch rows plus the grand total of all per-document counts.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RamoTable {
    pub rows: Vec<RamoRecord>,
    pub total_quantidade: u32,
}

impl RamoTable {
    pub fn build(rows: Vec<RamoRecord>) -> Self {
        let total_quantidade = rows.iter().map(|r| r.total()).sum();
        RamoTable {
            rows,
            total_quantidade,
        }
    }

    /// Cross-document tally keyed by exact value, in first-seen order.
    pub fn contagem_geral(&self) -> Vec<RamoContagem> {
        let mut tally: Vec<RamoContagem> = Vec::new();
        for row in &self.rows {
            for ramo in &row.ramos {
                match tally.iter_mut().find(|t| t.nome == ramo.nome) {
                    Some(existente) => existente.quantidade += ramo.quantidade,
                    None => tally.push(ramo.clone()),
                }
            }
        }
        tally
    }

    /// Cross-document tally in descending count order; ties keep first-seen
    /// order (stable sort). This is the ordering the activity report prints.
    pub fn contagem_ordenada(&self) -> Vec<RamoContagem> {
        let mut tally = self.contagem_geral();
        tally.sort_by(|a, b| b.quantidade.cmp(&a.quantidade));
        tally
    }
}

/// Process/protocol rows plus the TOTAL row sums of the 0/1 flags.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProcessoTable {
    pub rows: Vec<ProcessoRecord>,
    pub total_protocolos: u32,
    pub total_legalizacoes: u32,
}

impl ProcessoTable {
    pub fn build(rows: Vec<ProcessoRecord>) -> Self {
        let total_protocolos = rows.iter().map(|r| r.qtd_protocolo).sum();
        let total_legalizacoes = rows.iter().map(|r| r.qtd_legalizacao).sum();
        ProcessoTable {
            rows,
            total_protocolos,
            total_legalizacoes,
        }
    }
}

/// Complementary-information rows. No total row; consumers filter to rows
/// that actually carry information.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct InformacoesTable {
    pub rows: Vec<InformacoesRecord>,
}

impl InformacoesTable {
    pub fn build(rows: Vec<InformacoesRecord>) -> Self {
        InformacoesTable { rows }
    }

    pub fn com_informacoes(&self) -> impl Iterator<Item = &InformacoesRecord> {
        self.rows.iter().filter(|r| !r.informacoes.is_empty())
    }
}

/// Batch-level context for the consolidated report header.
///
/// Fiscal agents are kept append-if-absent in first-seen order, so the
/// representative agent is deterministic for a fixed input ordering. Dates
/// that do not match dd/mm/yyyy (or are not valid calendar dates) are
/// excluded from the range.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BatchContext {
    pub fiscais: Vec<String>,
    pub datas: Vec<NaiveDate>,
}

impl BatchContext {
    pub fn add_fiscal(&mut self, fiscal: &str) {
        if fiscal.is_empty() {
            return;
        }
        if !self.fiscais.iter().any(|f| f == fiscal) {
            self.fiscais.push(fiscal.to_string());
        }
    }

    pub fn add_data(&mut self, data: &str) {
        if !DATA_EXATA.is_match(data) {
            return;
        }
        if let Ok(parsed) = NaiveDate::parse_from_str(data, "%d/%m/%Y") {
            self.datas.push(parsed);
        }
    }

    /// Representative agent for the consolidated header: first seen.
    pub fn fiscal_principal(&self) -> Option<&str> {
        self.fiscais.first().map(|s| s.as_str())
    }

    /// Earliest and latest report dates, chronological.
    pub fn periodo(&self) -> Option<(NaiveDate, NaiveDate)> {
        let inicio = self.datas.iter().min()?;
        let fim = self.datas.iter().max()?;
        Some((*inicio, *fim))
    }
}

/// All four section tables plus context and skipped-file accounting for one
/// batch run.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BatchResult {
    pub vinculos: VinculosTable,
    pub ramo: RamoTable,
    pub processo: ProcessoTable,
    pub informacoes: InformacoesTable,
    pub contexto: BatchContext,
    pub skipped: Vec<SkippedFile>,
}

impl BatchResult {
    /// Number of documents that contributed to the batch.
    pub fn total_acoes(&self) -> usize {
        self.vinculos.rows.len()
    }
}

/// Fold per-document records into the batch result.
pub fn aggregate_batch(docs: Vec<DocumentRecords>, skipped: Vec<SkippedFile>) -> BatchResult {
    let mut contexto = BatchContext::default();
    let mut vinculos = Vec::with_capacity(docs.len());
    let mut ramos = Vec::with_capacity(docs.len());
    let mut processos = Vec::with_capacity(docs.len());
    let mut informacoes = Vec::with_capacity(docs.len());

    for doc in docs {
        contexto.add_fiscal(&doc.processo.fiscal);
        if !doc.processo.data_relatorio.is_empty() {
            contexto.add_data(&doc.processo.data_relatorio);
        }
        vinculos.push(doc.vinculos);
        ramos.push(doc.ramo);
        processos.push(doc.processo);
        informacoes.push(doc.informacoes);
    }

    BatchResult {
        vinculos: VinculosTable::build(vinculos),
        ramo: RamoTable::build(ramos),
        processo: ProcessoTable::build(processos),
        informacoes: InformacoesTable::build(informacoes),
        contexto,
        skipped,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn vinculos_row(arquivo: &str, vinculos: u32, si: u32) -> VinculosRecord {
        VinculosRecord {
            arquivo: arquivo.to_string(),
            vinculos,
            si,
            ..Default::default()
        }
    }

    fn ramo_row(arquivo: &str, ramos: &[(&str, u32)]) -> RamoRecord {
        RamoRecord {
            arquivo: arquivo.to_string(),
            ramos: ramos
                .iter()
                .map(|(nome, quantidade)| RamoContagem {
                    nome: nome.to_string(),
                    quantidade: *quantidade,
                })
                .collect(),
        }
    }

    #[test]
    fn test_vinculos_total_is_arithmetic_sum() {
        let table = VinculosTable::build(vec![
            vinculos_row("a.pdf", 2, 1),
            vinculos_row("b.pdf", 0, 0),
            vinculos_row("c.pdf", 3, 2),
        ]);
        assert_eq!(table.total_vinculos, 5);
        assert_eq!(table.total_si, 3);
    }

    #[test]
    fn test_empty_batch_totals_are_zero() {
        let result = aggregate_batch(vec![], vec![]);
        assert_eq!(result.total_acoes(), 0);
        assert_eq!(result.vinculos.total_vinculos, 0);
        assert_eq!(result.ramo.total_quantidade, 0);
        assert_eq!(result.processo.total_protocolos, 0);
        assert_eq!(result.contexto.periodo(), None);
    }

    #[test]
    fn test_ramo_tally_first_seen_then_descending() {
        let table = RamoTable::build(vec![
            ramo_row("a.pdf", &[("Obra", 1), ("Reforma", 2)]),
            ramo_row("b.pdf", &[("Demolição", 1), ("Obra", 1)]),
        ]);
        assert_eq!(table.total_quantidade, 5);

        let geral = table.contagem_geral();
        let nomes: Vec<&str> = geral.iter().map(|t| t.nome.as_str()).collect();
        assert_eq!(nomes, vec!["Obra", "Reforma", "Demolição"]);

        let ordenada = table.contagem_ordenada();
        let nomes: Vec<&str> = ordenada.iter().map(|t| t.nome.as_str()).collect();
        // Obra and Reforma tie at 2; first-seen order breaks the tie.
        assert_eq!(nomes, vec!["Obra", "Reforma", "Demolição"]);
        assert_eq!(ordenada[0].quantidade, 2);
        assert_eq!(ordenada[2].quantidade, 1);
    }

    #[test]
    fn test_processo_totals_sum_flags() {
        let rows = vec![
            ProcessoRecord {
                arquivo: "a.pdf".into(),
                qtd_protocolo: 1,
                qtd_legalizacao: 0,
                ..Default::default()
            },
            ProcessoRecord {
                arquivo: "b.pdf".into(),
                qtd_protocolo: 1,
                qtd_legalizacao: 1,
                ..Default::default()
            },
        ];
        let table = ProcessoTable::build(rows);
        assert_eq!(table.total_protocolos, 2);
        assert_eq!(table.total_legalizacoes, 1);
    }

    #[test]
    fn test_fiscal_first_seen_and_deduplicated() {
        let mut ctx = BatchContext::default();
        ctx.add_fiscal("Maria");
        ctx.add_fiscal("João");
        ctx.add_fiscal("Maria");
        ctx.add_fiscal("");
        assert_eq!(ctx.fiscais, vec!["Maria", "João"]);
        assert_eq!(ctx.fiscal_principal(), Some("Maria"));
    }

    #[test]
    fn test_periodo_chronological_across_months() {
        let mut ctx = BatchContext::default();
        ctx.add_data("02/12/2023");
        ctx.add_data("15/01/2024");
        ctx.add_data("20/12/2023");
        let (inicio, fim) = ctx.periodo().unwrap();
        assert_eq!(inicio, NaiveDate::from_ymd_opt(2023, 12, 2).unwrap());
        assert_eq!(fim, NaiveDate::from_ymd_opt(2024, 1, 15).unwrap());
    }

    #[test]
    fn test_periodo_excludes_unparseable_dates() {
        let mut ctx = BatchContext::default();
        ctx.add_data("março de 2024");
        ctx.add_data("5/3/2024");
        ctx.add_data("99/99/2024");
        assert_eq!(ctx.periodo(), None);

        ctx.add_data("10/03/2024");
        let (inicio, fim) = ctx.periodo().unwrap();
        assert_eq!(inicio, fim);
    }

    #[test]
    fn test_informacoes_filter() {
        let table = InformacoesTable::build(vec![
            InformacoesRecord {
                arquivo: "a.pdf".into(),
                informacoes: "nota".into(),
            },
            InformacoesRecord {
                arquivo: "b.pdf".into(),
                informacoes: String::new(),
            },
        ]);
        let com: Vec<&str> = table.com_informacoes().map(|r| r.arquivo.as_str()).collect();
        assert_eq!(com, vec!["a.pdf"]);
    }

    #[test]
    fn test_aggregate_batch_fills_context() {
        let mut doc = DocumentRecords::default();
        doc.processo.fiscal = "Maria".into();
        doc.processo.data_relatorio = "01/02/2024".into();
        let result = aggregate_batch(vec![doc], vec![]);
        assert_eq!(result.contexto.fiscal_principal(), Some("Maria"));
        assert_eq!(result.total_acoes(), 1);
    }
}

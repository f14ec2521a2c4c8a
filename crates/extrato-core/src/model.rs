use serde::{Deserialize, Serialize};

/// Fields extracted for the "Vínculos e S.I." section of one document.
///
/// Absent sections leave counts at zero and optional fields at `None`;
/// a latitude/longitude pair that is present but not numeric becomes `None`
/// rather than being coerced.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct VinculosRecord {
    pub arquivo: String,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub endereco: Option<String>,
    pub contratado: u32,
    pub responsavel_tecnico: u32,
    /// Sum of the two label counts above.
    pub vinculos: u32,
    /// Official-notice (GFIS) lines found anywhere in the text, "; "-joined.
    pub oficios_gfis: String,
    /// Number of official-notice lines.
    pub si: u32,
}

/// One distinct activity-branch value and how often it appeared.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RamoContagem {
    pub nome: String,
    pub quantidade: u32,
}

/// Activity branches extracted from the identification section of one
/// document, in first-seen order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RamoRecord {
    pub arquivo: String,
    pub ramos: Vec<RamoContagem>,
}

impl RamoRecord {
    /// Distinct values as a comma-joined display list.
    pub fn nomes_joined(&self) -> String {
        self.ramos
            .iter()
            .map(|r| r.nome.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    }

    /// Per-value counts as a comma-joined display list, parallel to
    /// [`nomes_joined`](Self::nomes_joined).
    pub fn quantidades_joined(&self) -> String {
        self.ramos
            .iter()
            .map(|r| r.quantidade.to_string())
            .collect::<Vec<_>>()
            .join(", ")
    }

    pub fn total(&self) -> u32 {
        self.ramos.iter().map(|r| r.quantidade).sum()
    }
}

/// Process/protocol fields of one document.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProcessoRecord {
    pub arquivo: String,
    /// Inspection agent, verbatim as printed on the form (trimmed only).
    pub fiscal: String,
    /// Protocol number with separators stripped (digits only).
    pub protocolo: String,
    /// Free text following the "OUTROS:" label, whitespace-collapsed.
    pub legalizacao: String,
    pub qtd_protocolo: u32,
    pub qtd_legalizacao: u32,
    /// Report date normalized to dd/mm/yyyy when date-shaped, raw otherwise.
    pub data_relatorio: String,
}

/// Parenthesized notes from the "Informações Complementares" field.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct InformacoesRecord {
    pub arquivo: String,
    /// ", "-joined parenthesized snippets; empty when the field is absent.
    pub informacoes: String,
}

/// All four section records extracted from a single document.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DocumentRecords {
    pub vinculos: VinculosRecord,
    pub ramo: RamoRecord,
    pub processo: ProcessoRecord,
    pub informacoes: InformacoesRecord,
}

/// A file excluded from the batch, with the reason it was skipped.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkippedFile {
    pub arquivo: String,
    pub motivo: String,
}

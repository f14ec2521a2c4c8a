use extrato_core::extraction::pdftotext::PdftotextExtractor;
use extrato_core::model::SkippedFile;
use extrato_core::report::{self, ReportOptions};
use extrato_core::{process_batch, DocumentInput};
use std::path::PathBuf;

use crate::commands::display_name;

pub fn run(
    inputs: Vec<PathBuf>,
    out_dir: PathBuf,
    logo: Option<PathBuf>,
    secoes: bool,
) -> Result<(), extrato_core::error::ExtratoError> {
    let extractor = PdftotextExtractor::new();

    // A file that cannot be read joins the same skip accounting as a file
    // whose text cannot be extracted; neither aborts the batch.
    let mut lidos: Vec<DocumentInput> = Vec::new();
    let mut nao_lidos: Vec<SkippedFile> = Vec::new();
    for path in &inputs {
        let filename = display_name(path);
        match std::fs::read(path) {
            Ok(bytes) => lidos.push(DocumentInput { filename, bytes }),
            Err(e) => {
                tracing::warn!(arquivo = %filename, error = %e, "skipping unreadable file");
                nao_lidos.push(SkippedFile {
                    arquivo: filename,
                    motivo: e.to_string(),
                });
            }
        }
    }

    let mut batch = process_batch(&lidos, &extractor);
    let extraidos = std::mem::take(&mut batch.skipped);
    batch.skipped = nao_lidos.into_iter().chain(extraidos).collect();

    std::fs::create_dir_all(&out_dir)?;
    let opts = ReportOptions {
        logo,
        gerado_em: None,
    };

    let consolidado = report::extrato_consolidado(&batch, &opts)?;
    let destino = out_dir.join("extrato_consolidado.pdf");
    std::fs::write(&destino, consolidado)?;
    println!("Extrato consolidado: {}", destino.display());

    if secoes {
        let artefatos: [(&str, Vec<u8>); 4] = [
            (
                "relatorio_vinculos_si.pdf",
                report::relatorio_vinculos_si(&batch.vinculos, &opts)?,
            ),
            (
                "relatorio_ramo_atividade.pdf",
                report::relatorio_ramo_atividade(&batch.ramo, &opts)?,
            ),
            (
                "relatorio_processo_protocolo.pdf",
                report::relatorio_processo_protocolo(&batch.processo, &opts)?,
            ),
            (
                "relatorio_informacoes_complementares.pdf",
                report::relatorio_informacoes_complementares(&batch.informacoes, &opts)?,
            ),
        ];
        for (nome, bytes) in artefatos {
            let destino = out_dir.join(nome);
            std::fs::write(&destino, bytes)?;
            println!("Relatório de seção: {}", destino.display());
        }
    }

    println!(
        "{} documento(s) processados, {} ignorado(s)",
        batch.total_acoes(),
        batch.skipped.len()
    );
    for skip in &batch.skipped {
        eprintln!("  ignorado: {} ({})", skip.arquivo, skip.motivo);
    }

    Ok(())
}

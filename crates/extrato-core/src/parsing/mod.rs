pub mod informacoes;
pub mod locator;
pub mod processo;
pub mod ramo;
pub mod vinculos;

use crate::model::DocumentRecords;

pub use informacoes::extract_informacoes_complementares;
pub use processo::extract_processo_protocolo;
pub use ramo::extract_ramo_atividade;
pub use vinculos::extract_vinculos;

/// Run all four section parsers over one document's text.
///
/// Pure and infallible: documents missing any section produce default
/// (empty/zero/null) values for just the missing pieces.
pub fn parse_document(text: &str, filename: &str) -> DocumentRecords {
    DocumentRecords {
        vinculos: extract_vinculos(text, filename),
        ramo: extract_ramo_atividade(text, filename),
        processo: extract_processo_protocolo(text, filename),
        informacoes: extract_informacoes_complementares(text, filename),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const FORM: &str = "\
RELATÓRIO DE FISCALIZAÇÃO
Agente de Fiscalização: Maria Souza
Data Relatório: 12/03/2024
Latitude: -22,90 Longitude: -43,20
01 - Endereço Empreendimento
Rua A, 10 - Centro
02 - Dados
Fato Gerador: denúncia PROCESSO/PROTOCOLO-556677
04 - Identificação
CONTRATADO: Empresa X
Ramo Atividade: Construção
RESPONSAVEL TECNICO: Eng. Y
Ramo Atividade: Construção
05 - Vistoria
06 - Documentos Recebidos
OUTROS: alvará
07 - Outras Informações
Informações Complementares: vistoria (sem pendências)
08 - Assinaturas
OFÍCIO Nº 10/2024-GFIS
";

    #[test]
    fn test_parse_document_all_sections() {
        let doc = parse_document(FORM, "form.pdf");

        assert_eq!(doc.vinculos.arquivo, "form.pdf");
        assert_eq!(doc.vinculos.latitude, Some(-22.90));
        assert_eq!(doc.vinculos.longitude, Some(-43.20));
        assert_eq!(doc.vinculos.endereco.as_deref(), Some("Rua A, 10 - Centro"));
        assert_eq!(doc.vinculos.vinculos, 2);
        assert_eq!(doc.vinculos.si, 1);

        assert_eq!(doc.ramo.nomes_joined(), "Construção");
        assert_eq!(doc.ramo.quantidades_joined(), "2");

        assert_eq!(doc.processo.fiscal, "Maria Souza");
        assert_eq!(doc.processo.protocolo, "556677");
        assert_eq!(doc.processo.qtd_protocolo, 1);
        assert_eq!(doc.processo.legalizacao, "alvará");
        assert_eq!(doc.processo.qtd_legalizacao, 1);
        assert_eq!(doc.processo.data_relatorio, "12/03/2024");

        assert_eq!(doc.informacoes.informacoes, "sem pendências");
    }

    #[test]
    fn test_parse_document_blank_text() {
        let doc = parse_document("", "vazio.pdf");
        assert_eq!(doc.vinculos.vinculos, 0);
        assert_eq!(doc.vinculos.latitude, None);
        assert!(doc.ramo.ramos.is_empty());
        assert_eq!(doc.processo.qtd_protocolo, 0);
        assert_eq!(doc.informacoes.informacoes, "");
    }
}

pub mod composer;
pub mod consolidado;
pub mod secoes;

pub use composer::{fit_text, Align, FontStyle, LogoImage, PageComposer};
pub use consolidado::extrato_consolidado;
pub use secoes::{
    relatorio_informacoes_complementares, relatorio_processo_protocolo,
    relatorio_ramo_atividade, relatorio_vinculos_si,
};

use chrono::NaiveDateTime;
use std::path::PathBuf;

/// Explicit rendering configuration, replacing any process-wide page setup.
#[derive(Debug, Clone, Default)]
pub struct ReportOptions {
    /// Optional logo file; a missing or undecodable file renders without a
    /// logo.
    pub logo: Option<PathBuf>,
    /// Generation timestamp override; `None` stamps the current local time.
    pub gerado_em: Option<NaiveDateTime>,
}

impl ReportOptions {
    pub(crate) fn timestamp(&self) -> String {
        let quando = self
            .gerado_em
            .unwrap_or_else(|| chrono::Local::now().naive_local());
        quando.format("%d/%m/%Y %H:%M").to_string()
    }

    pub(crate) fn load_logo(&self) -> Option<LogoImage> {
        let path = self.logo.as_ref()?;
        match image::open(path) {
            Ok(img) => {
                let rgb = img.to_rgb8();
                let (width, height) = rgb.dimensions();
                Some(LogoImage {
                    width,
                    height,
                    rgb: rgb.into_raw(),
                })
            }
            Err(e) => {
                tracing::warn!(logo = %path.display(), error = %e, "logo unavailable, rendering without it");
                None
            }
        }
    }
}

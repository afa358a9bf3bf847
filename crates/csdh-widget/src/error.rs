use std::path::PathBuf;

use thiserror::Error;

use csdh_core::error::CoreError;

#[derive(Debug, Error)]
pub enum WidgetError {
    #[error("unknown risk factor: {0}")]
    UnknownFactor(String),

    #[error(transparent)]
    Core(#[from] CoreError),

    #[error("display maximum {configured} is below the highest attainable score {required}")]
    DisplayMaxTooSmall { configured: u32, required: u32 },

    #[error("template parse error: {0}")]
    TemplateParse(String),

    #[error("template rendering failed: {0}")]
    TemplateRender(String),

    #[error("DOCX generation failed: {0}")]
    Docx(String),

    #[error("no config directory found")]
    NoConfigDir,

    #[error("failed to read config at {}: {source}", .path.display())]
    ConfigRead {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("config_version {found} is newer than this build supports ({supported})")]
    UnsupportedConfigVersion { found: u64, supported: u32 },

    #[error("invalid config: {0}")]
    InvalidConfig(String),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl From<tera::Error> for WidgetError {
    fn from(e: tera::Error) -> Self {
        WidgetError::TemplateRender(e.to_string())
    }
}

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("failed to write KML: {0}")]
    Xml(String),

    #[error("failed to read styles file {path}: {source}")]
    StylesFileIo {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse styles file: {0}")]
    StylesFileParse(#[from] serde_yaml::Error),

    #[error("invalid style table: {0}")]
    Validation(String),
}

use std::path::PathBuf;

#[derive(thiserror::Error, Debug)]
pub enum TxcError {
    #[error("invalid txc-metrics configuration: {0}")]
    ConfigurationError(String),
    #[error("invalid user input: {0}")]
    InvalidUserInput(String),
    #[error("failure reading file {path:?}: {source}")]
    FileReadError {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failure reading stop table {0}: {1}")]
    StopTableError(String, String),
    #[error("failure opening schedule archive {path:?}: {source}")]
    ArchiveReadError {
        path: PathBuf,
        source: zip::result::ZipError,
    },
    #[error("failure reading entry '{0}' from schedule archive: {1}")]
    ArchiveEntryError(String, String),
    #[error("failure parsing schedule document '{0}': {1}")]
    XmlParseError(String, roxmltree::Error),
    #[error("schedule document '{0}' is missing expected element {1}")]
    MissingElement(String, String),
    #[error("failure writing to file {0}: {1}")]
    CsvWriteError(String, csv::Error),
    #[error("failure writing to file {0}: {1}")]
    FileWriteError(String, String),
    #[error("{0}")]
    InternalError(String),
}

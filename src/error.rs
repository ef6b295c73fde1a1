use miette::Diagnostic;
use thiserror::Error;

#[derive(Debug, Error, Diagnostic)]
pub enum MetaError {
    #[error("invalid work id: {0}")]
    InvalidWorkId(String),

    #[error("invalid pecha id: {0}")]
    InvalidPechaId(String),

    #[error("BDRC request failed: {0}")]
    CatalogHttp(String),

    #[error("BDRC returned status {status}: {message}")]
    CatalogStatus { status: u16, message: String },

    #[error("OpenPecha request failed: {0}")]
    MetadataHttp(String),

    #[error("OpenPecha returned status {status}: {message}")]
    MetadataStatus { status: u16, message: String },

    #[error("failed to parse meta.yml for {pecha_id}: {message}")]
    MetadataParse { pecha_id: String, message: String },

    #[error("turtle graph contains bad syntax: {0}")]
    GraphSyntax(String),

    #[error("volume {image_group_id} in work {work_id} has no volume number")]
    MissingVolumeNumber {
        image_group_id: String,
        work_id: String,
    },

    #[error("volume {image_group_id} in work {work_id} has a non-numeric volume number: {value}")]
    InvalidVolumeNumber {
        image_group_id: String,
        work_id: String,
        value: String,
    },

    #[error("failed to serialize meta.yml: {0}")]
    Serialize(String),

    #[error("filesystem error: {0}")]
    Filesystem(String),
}

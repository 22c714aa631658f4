//! Error types for linch-doc-rs

use thiserror::Error;

/// Main error type
#[derive(Debug, Error)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("ZIP error: {0}")]
    Zip(#[from] zip::result::ZipError),

    #[error("XML error: {0}")]
    Xml(#[from] quick_xml::Error),

    #[error("XML encoding error: {0}")]
    XmlEncoding(#[from] quick_xml::encoding::EncodingError),

    #[error("XML attribute error: {0}")]
    XmlAttr(#[from] quick_xml::events::attributes::AttrError),

    #[error("UTF-8 error: {0}")]
    Utf8(#[from] std::str::Utf8Error),

    #[error("Unreadable package: {0}")]
    UnreadablePackage(String),

    #[error("Missing required part: {0}")]
    MissingPart(String),

    #[error("Invalid part URI: {0}")]
    InvalidPartUri(String),

    #[error("Missing attribute '{attr}' on element '{element}'")]
    MissingAttribute { element: String, attr: String },

    #[error("Invalid document: {0}")]
    InvalidDocument(String),

    #[error("Invalid color: {0}")]
    InvalidColor(String),

    #[error("Invalid length: {0}")]
    InvalidLength(String),

    #[error("Style inheritance cycle involving '{0}'")]
    StyleCycle(String),

    #[error("Invalid field: {0}")]
    InvalidField(String),

    #[error("Image error: {0}")]
    Image(String),
}

/// Result type alias
pub type Result<T> = std::result::Result<T, Error>;

//! Open Packaging Convention (OPC) implementation
//!
//! This module handles the ZIP-based package format used by DOCX files.

mod content_types;
mod package;
mod part;
mod part_uri;
mod relationships;

pub use content_types::ContentTypes;
pub(crate) use package::entry_options;
pub use package::Package;
pub use part::Part;
pub use part_uri::{well_known, PartUri};
pub use relationships::{rel_types, Relationship, Relationships, TargetMode};

/// Well-known content types
pub mod content_type {
    pub use super::content_types::{
        CORE_PROPERTIES, CUSTOM_PROPERTIES, ENDNOTES, EXTENDED_PROPERTIES, FOOTER, FOOTNOTES,
        HEADER, MAIN_DOCUMENT, NUMBERING, RELATIONSHIPS, SETTINGS, STYLES, XML,
    };
}

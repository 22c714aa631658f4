//! Serialization of a [`Document`] to DOCX, ODT or RTF

pub mod dispatch;
pub mod odf;
pub mod rtf;
pub mod word;

use crate::error::{Error, Result};
use crate::model::Document;
use crate::style::{FontStyle, Overlay, ParagraphStyle, StyleRef, StyleRegistry};
use crate::xml::{OutputBuffer, XmlEmitter};
use std::path::PathBuf;
use std::str::FromStr;

/// Output format
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Format {
    /// Office Open XML word-processing package (`.docx`)
    Word2007,
    /// OpenDocument text package (`.odt`)
    OdText,
    /// Rich Text Format stream (`.rtf`)
    Rtf,
}

impl Format {
    pub fn extension(self) -> &'static str {
        match self {
            Format::Word2007 => "docx",
            Format::OdText => "odt",
            Format::Rtf => "rtf",
        }
    }

    pub fn mime_type(self) -> &'static str {
        match self {
            Format::Word2007 => {
                "application/vnd.openxmlformats-officedocument.wordprocessingml.document"
            }
            Format::OdText => "application/vnd.oasis.opendocument.text",
            Format::Rtf => "application/rtf",
        }
    }
}

impl FromStr for Format {
    type Err = Error;

    /// Accepts writer names (`Word2007`, `ODText`, `RTF`) and extensions
    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "word2007" | "docx" => Ok(Format::Word2007),
            "odtext" | "odt" => Ok(Format::OdText),
            "rtf" => Ok(Format::Rtf),
            _ => Err(Error::InvalidDocument(format!("unknown output format '{}'", s))),
        }
    }
}

/// Writer configuration
#[derive(Clone, Debug)]
pub struct WriterOptions {
    /// Buffer each generated part in a temporary file instead of memory
    pub use_disk_caching: bool,
    /// Directory for temporary files (system default when `None`)
    pub temp_dir: Option<PathBuf>,
    /// Deflate zip entries
    pub compression: bool,
}

impl Default for WriterOptions {
    fn default() -> Self {
        WriterOptions {
            use_disk_caching: false,
            temp_dir: None,
            compression: true,
        }
    }
}

impl WriterOptions {
    pub fn with_disk_caching(mut self, dir: Option<PathBuf>) -> Self {
        self.use_disk_caching = true;
        self.temp_dir = dir;
        self
    }

    /// Fresh output buffer for one part or stream
    pub(crate) fn buffer(&self) -> OutputBuffer {
        OutputBuffer::new(self.use_disk_caching, self.temp_dir.as_deref())
    }

    /// Fresh XML emitter for one part
    pub(crate) fn emitter(&self) -> XmlEmitter {
        XmlEmitter::new(self.buffer())
    }
}

/// Serialize `doc` in the given format.
///
/// The document is only read. Style chains are validated first, so a
/// cycle fails the whole write instead of producing partial output.
pub fn write(doc: &Document, format: Format, options: &WriterOptions) -> Result<Vec<u8>> {
    log::debug!(
        "writing {:?} ({} sections, disk caching: {})",
        format,
        doc.sections.len(),
        options.use_disk_caching
    );
    doc.validate()?;

    match format {
        Format::Word2007 => word::write(doc, options),
        Format::OdText => odf::write(doc, options),
        Format::Rtf => rtf::write(doc, options),
    }
}

/// Shortest decimal form of `value` with at most `decimals` fraction digits
pub(crate) fn format_number(value: f64, decimals: usize) -> String {
    let s = format!("{:.*}", decimals, value);
    let s = if s.contains('.') {
        s.trim_end_matches('0').trim_end_matches('.').to_string()
    } else {
        s
    };
    if s == "-0" {
        "0".to_string()
    } else {
        s
    }
}

/// Character and paragraph halves of a font style reference. The
/// paragraph half comes from the named chain plus any inline paragraph
/// part.
pub(crate) fn resolve_combined(
    registry: &StyleRegistry,
    style: Option<&StyleRef<FontStyle>>,
) -> Result<(FontStyle, ParagraphStyle)> {
    let font = registry.resolve_opt(style)?.font_only();
    let mut paragraph = match style.and_then(|s| s.name.as_deref()) {
        Some(name) => registry.resolve_named::<ParagraphStyle>(name)?,
        None => ParagraphStyle::default(),
    };
    if let Some(inline) = style
        .and_then(|s| s.inline.as_ref())
        .and_then(|f| f.paragraph_part())
    {
        paragraph.overlay(inline);
    }
    Ok((font, paragraph))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_from_str() {
        assert_eq!("ODText".parse::<Format>().unwrap(), Format::OdText);
        assert_eq!("docx".parse::<Format>().unwrap(), Format::Word2007);
        assert!("pdf".parse::<Format>().is_err());
    }

    #[test]
    fn test_format_number() {
        assert_eq!(format_number(0.2, 2), "0.2");
        assert_eq!(format_number(17.6 / 3.0, 2), "5.87");
        assert_eq!(format_number(12.0, 3), "12");
        assert_eq!(format_number(-0.0001, 2), "0");
    }

    #[test]
    fn test_cycle_fails_every_format() {
        let mut doc = Document::new();
        doc.styles.define("A", crate::style::ParagraphStyle::new(), Some("B"), None);
        doc.styles.define("B", crate::style::ParagraphStyle::new(), Some("A"), None);
        for format in [Format::Word2007, Format::OdText, Format::Rtf] {
            assert!(matches!(
                write(&doc, format, &WriterOptions::default()),
                Err(Error::StyleCycle(_))
            ));
        }
    }
}

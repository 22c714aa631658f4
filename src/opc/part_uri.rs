//! Part URI handling for OPC packages

use crate::error::{Error, Result};
use std::fmt;

/// Represents a URI to a part within an OPC package.
///
/// Part URIs are always absolute paths starting with '/'.
/// Example: `/word/document.xml`
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PartUri {
    path: String,
}

impl PartUri {
    /// Create a new PartUri from a string.
    ///
    /// The path will be normalized (leading '/' ensured, no trailing '/').
    pub fn new(path: &str) -> Result<Self> {
        let path = path.trim();

        if path.is_empty() {
            return Err(Error::InvalidPartUri("empty path".into()));
        }

        // Normalize: ensure leading '/', remove trailing '/'
        let normalized = if path.starts_with('/') {
            path.to_string()
        } else {
            format!("/{}", path)
        };

        let normalized = normalized.trim_end_matches('/').to_string();

        // Validate: no double slashes, no '..' for now
        if normalized.contains("//") {
            return Err(Error::InvalidPartUri(format!(
                "invalid path '{}': contains double slashes",
                path
            )));
        }

        Ok(Self { path: normalized })
    }

    /// Create PartUri without validation (for internal use)
    pub(crate) fn from_string_unchecked(path: String) -> Self {
        Self { path }
    }

    /// Get the path as a string slice
    pub fn as_str(&self) -> &str {
        &self.path
    }

    /// Get the file name portion
    pub fn file_name(&self) -> Option<&str> {
        self.path.rsplit('/').next()
    }

    /// Get the file extension
    pub fn extension(&self) -> Option<&str> {
        self.file_name()
            .and_then(|name| name.rsplit('.').next())
            .filter(|ext| !ext.is_empty() && !ext.contains('/'))
    }

    /// Get the parent directory URI
    pub fn parent(&self) -> Option<PartUri> {
        let pos = self.path.rfind('/')?;
        if pos == 0 {
            None
        } else {
            Some(PartUri {
                path: self.path[..pos].to_string(),
            })
        }
    }

    /// Get the relationships URI for this part.
    ///
    /// For `/word/document.xml`, returns `/word/_rels/document.xml.rels`
    pub fn relationships_uri(&self) -> PartUri {
        let file_name = self.file_name().unwrap_or("");
        let parent = self.parent().map(|p| p.path).unwrap_or_default();

        let rels_path = format!("{}/_rels/{}.rels", parent, file_name);
        PartUri { path: rels_path }
    }

    /// Resolve a relative path against this URI.
    ///
    /// For `/word/document.xml` and `../media/image1.png`, returns `/media/image1.png`
    pub fn resolve(&self, relative: &str) -> Result<PartUri> {
        if relative.starts_with('/') {
            // Absolute path
            return PartUri::new(relative);
        }

        let base_dir = self.parent().map(|p| p.path).unwrap_or_default();
        let mut parts: Vec<&str> = base_dir.split('/').filter(|s| !s.is_empty()).collect();

        for segment in relative.split('/') {
            match segment {
                "" | "." => continue,
                ".." => {
                    parts.pop();
                }
                s => parts.push(s),
            }
        }

        let resolved = format!("/{}", parts.join("/"));
        PartUri::new(&resolved)
    }

    /// Relationship target for this part as seen from `source`: a path
    /// relative to the source's directory when this part lies below it,
    /// otherwise the package-absolute path without the leading '/'
    pub fn target_from(&self, source: &PartUri) -> String {
        let dir = source.parent().map(|p| p.path).unwrap_or_default();
        match self.path.strip_prefix(&format!("{}/", dir)) {
            Some(rest) if !dir.is_empty() => rest.to_string(),
            _ => self.path[1..].to_string(),
        }
    }
}

impl fmt::Display for PartUri {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.path)
    }
}

impl std::str::FromStr for PartUri {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        PartUri::new(s)
    }
}

/// Well-known part URIs of a word-processing package
pub mod well_known {
    use super::PartUri;

    pub fn document() -> PartUri {
        PartUri::from_string_unchecked("/word/document.xml".into())
    }

    pub fn styles() -> PartUri {
        PartUri::from_string_unchecked("/word/styles.xml".into())
    }

    pub fn numbering() -> PartUri {
        PartUri::from_string_unchecked("/word/numbering.xml".into())
    }

    pub fn settings() -> PartUri {
        PartUri::from_string_unchecked("/word/settings.xml".into())
    }

    pub fn footnotes() -> PartUri {
        PartUri::from_string_unchecked("/word/footnotes.xml".into())
    }

    pub fn endnotes() -> PartUri {
        PartUri::from_string_unchecked("/word/endnotes.xml".into())
    }

    pub fn header(n: usize) -> PartUri {
        PartUri::from_string_unchecked(format!("/word/header{}.xml", n))
    }

    pub fn footer(n: usize) -> PartUri {
        PartUri::from_string_unchecked(format!("/word/footer{}.xml", n))
    }

    /// `/word/media/sectionImage{n}.{ext}`
    pub fn media(n: usize, ext: &str) -> PartUri {
        PartUri::from_string_unchecked(format!("/word/media/sectionImage{}.{}", n, ext))
    }

    pub fn core_props() -> PartUri {
        PartUri::from_string_unchecked("/docProps/core.xml".into())
    }

    pub fn app_props() -> PartUri {
        PartUri::from_string_unchecked("/docProps/app.xml".into())
    }

    pub fn custom_props() -> PartUri {
        PartUri::from_string_unchecked("/docProps/custom.xml".into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_with_leading_slash() {
        let uri = PartUri::new("/word/document.xml").unwrap();
        assert_eq!(uri.as_str(), "/word/document.xml");
    }

    #[test]
    fn test_new_without_leading_slash() {
        let uri = PartUri::new("word/document.xml").unwrap();
        assert_eq!(uri.as_str(), "/word/document.xml");
    }

    #[test]
    fn test_file_name() {
        let uri = PartUri::new("/word/document.xml").unwrap();
        assert_eq!(uri.file_name(), Some("document.xml"));
    }

    #[test]
    fn test_extension() {
        let uri = PartUri::new("/word/document.xml").unwrap();
        assert_eq!(uri.extension(), Some("xml"));
    }

    #[test]
    fn test_parent() {
        let uri = PartUri::new("/word/document.xml").unwrap();
        assert_eq!(uri.parent().unwrap().as_str(), "/word");
    }

    #[test]
    fn test_relationships_uri() {
        let uri = PartUri::new("/word/document.xml").unwrap();
        assert_eq!(uri.relationships_uri().as_str(), "/word/_rels/document.xml.rels");
    }

    #[test]
    fn test_resolve_relative() {
        let uri = PartUri::new("/word/document.xml").unwrap();
        let resolved = uri.resolve("../media/image1.png").unwrap();
        assert_eq!(resolved.as_str(), "/media/image1.png");
    }

    #[test]
    fn test_resolve_same_dir() {
        let uri = PartUri::new("/word/document.xml").unwrap();
        let resolved = uri.resolve("styles.xml").unwrap();
        assert_eq!(resolved.as_str(), "/word/styles.xml");
    }

    #[test]
    fn test_target_from() {
        let doc = well_known::document();
        assert_eq!(well_known::media(1, "png").target_from(&doc), "media/sectionImage1.png");
        assert_eq!(well_known::core_props().target_from(&doc), "docProps/core.xml");
    }

    #[test]
    fn test_media_names() {
        assert_eq!(
            well_known::media(3, "png").as_str(),
            "/word/media/sectionImage3.png"
        );
        assert_eq!(
            well_known::header(1).relationships_uri().as_str(),
            "/word/_rels/header1.xml.rels"
        );
    }
}

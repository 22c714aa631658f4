//! Inline images

use crate::error::{Error, Result};
use crate::image::{sniff, ImageType};
use crate::style::Alignment;
use crate::units::Length;
use std::path::PathBuf;

/// Where image data comes from
#[derive(Clone, Debug, PartialEq)]
pub enum ImageSource {
    /// Read from disk at write time
    File(PathBuf),
    /// Embedded bytes
    Bytes(Vec<u8>),
}

/// Text wrapping around an image
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Wrapping {
    #[default]
    Inline,
    Square,
    Tight,
    Behind,
    Infront,
}

/// Image size and placement
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ImageStyle {
    pub width: Option<Length>,
    pub height: Option<Length>,
    pub alignment: Option<Alignment>,
    pub wrapping: Wrapping,
}

impl ImageStyle {
    /// Width and height in EMU, defaulting unset or relative sizes to one
    /// inch
    pub fn extent_emu(&self) -> (i64, i64) {
        let emu = |l: &Option<Length>| {
            l.as_ref()
                .and_then(|l| l.to_unit(crate::units::Unit::Emu))
                .map(|v| v.round() as i64)
                .unwrap_or(914_400)
        };
        (emu(&self.width), emu(&self.height))
    }

    /// Extent in EMU where an unset side takes the image's natural pixel
    /// size before falling back to one inch
    pub fn extent_emu_for(&self, natural: Option<(u32, u32)>) -> (i64, i64) {
        let emu = |l: &Option<Length>, px: Option<u32>| {
            l.as_ref()
                .and_then(|l| l.to_unit(crate::units::Unit::Emu))
                .or_else(|| px.map(|p| crate::units::pixel_to_emu(f64::from(p))))
                .map(|v| v.round() as i64)
                .unwrap_or(914_400)
        };
        (
            emu(&self.width, natural.map(|n| n.0)),
            emu(&self.height, natural.map(|n| n.1)),
        )
    }
}

/// An image element
#[derive(Clone, Debug, PartialEq)]
pub struct Image {
    pub source: ImageSource,
    pub style: ImageStyle,
}

impl Image {
    pub fn from_file(path: impl Into<PathBuf>) -> Self {
        Image {
            source: ImageSource::File(path.into()),
            style: ImageStyle::default(),
        }
    }

    pub fn from_bytes(data: Vec<u8>) -> Self {
        Image {
            source: ImageSource::Bytes(data),
            style: ImageStyle::default(),
        }
    }

    pub fn with_size(mut self, width: Length, height: Length) -> Self {
        self.style.width = Some(width);
        self.style.height = Some(height);
        self
    }

    /// Image bytes (reads the file for file sources)
    pub fn data(&self) -> Result<Vec<u8>> {
        match &self.source {
            ImageSource::Bytes(data) => Ok(data.clone()),
            ImageSource::File(path) => std::fs::read(path)
                .map_err(|e| Error::Image(format!("{}: {}", path.display(), e))),
        }
    }

    /// Bytes and detected type; unknown types are an error
    pub fn load(&self) -> Result<(Vec<u8>, ImageType)> {
        let data = self.data()?;
        match sniff(&data) {
            ImageType::Unknown => Err(Error::Image("unrecognized image data".to_string())),
            kind => Ok((data, kind)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extent_defaults() {
        let style = ImageStyle {
            width: Some(Length::pixel(96.0)),
            ..Default::default()
        };
        assert_eq!(style.extent_emu(), (914_400, 914_400));
    }

    #[test]
    fn test_extent_prefers_natural_size() {
        let style = ImageStyle {
            height: Some(Length::inch(2.0)),
            ..Default::default()
        };
        assert_eq!(style.extent_emu_for(Some((96, 48))), (914_400, 1_828_800));
        assert_eq!(style.extent_emu_for(None), (914_400, 1_828_800));
    }

    #[test]
    fn test_load_rejects_unknown() {
        let image = Image::from_bytes(b"not an image".to_vec());
        assert!(matches!(image.load(), Err(Error::Image(_))));
    }

    #[test]
    fn test_missing_file() {
        let image = Image::from_file("/nonexistent/picture.png");
        assert!(image.data().is_err());
    }
}

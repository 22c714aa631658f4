//! Image type detection from magic bytes

/// Detected image format
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ImageType {
    Jpeg,
    Png,
    Gif,
    Bmp,
    Tiff,
    Unknown,
}

impl ImageType {
    /// File extension used for package part names
    pub fn extension(self) -> &'static str {
        match self {
            ImageType::Jpeg => "jpg",
            ImageType::Png => "png",
            ImageType::Gif => "gif",
            ImageType::Bmp => "bmp",
            ImageType::Tiff => "tiff",
            ImageType::Unknown => "bin",
        }
    }

    pub fn mime_type(self) -> &'static str {
        match self {
            ImageType::Jpeg => "image/jpeg",
            ImageType::Png => "image/png",
            ImageType::Gif => "image/gif",
            ImageType::Bmp => "image/bmp",
            ImageType::Tiff => "image/tiff",
            ImageType::Unknown => "application/octet-stream",
        }
    }

    /// Guess from a file extension (case-insensitive)
    pub fn from_extension(ext: &str) -> Self {
        match ext.to_ascii_lowercase().as_str() {
            "jpg" | "jpeg" | "jpe" => ImageType::Jpeg,
            "png" => ImageType::Png,
            "gif" => ImageType::Gif,
            "bmp" => ImageType::Bmp,
            "tif" | "tiff" => ImageType::Tiff,
            _ => ImageType::Unknown,
        }
    }
}

/// Detect the image type from the first bytes of `data`
pub fn sniff(data: &[u8]) -> ImageType {
    if data.starts_with(&[0xFF, 0xD8, 0xFF]) {
        ImageType::Jpeg
    } else if data.starts_with(b"\x89PNG\r\n\x1a\n") {
        ImageType::Png
    } else if data.starts_with(b"GIF87a") || data.starts_with(b"GIF89a") {
        ImageType::Gif
    } else if data.starts_with(b"BM") {
        ImageType::Bmp
    } else if data.starts_with(b"II*\0") || data.starts_with(b"MM\0*") {
        ImageType::Tiff
    } else {
        ImageType::Unknown
    }
}

/// Pixel size read from the image header, for PNG, GIF, BMP and JPEG
pub fn dimensions(data: &[u8]) -> Option<(u32, u32)> {
    let be32 = |i: usize| -> Option<u32> {
        Some(u32::from_be_bytes(data.get(i..i + 4)?.try_into().ok()?))
    };
    let le16 = |i: usize| -> Option<u32> {
        Some(u32::from(u16::from_le_bytes(data.get(i..i + 2)?.try_into().ok()?)))
    };
    let le32 = |i: usize| -> Option<u32> {
        Some(i32::from_le_bytes(data.get(i..i + 4)?.try_into().ok()?).unsigned_abs())
    };

    match sniff(data) {
        ImageType::Png => Some((be32(16)?, be32(20)?)),
        ImageType::Gif => Some((le16(6)?, le16(8)?)),
        ImageType::Bmp => Some((le32(18)?, le32(22)?)),
        ImageType::Jpeg => jpeg_dimensions(data),
        _ => None,
    }
}

/// Walk JPEG segments up to the first start-of-frame marker
fn jpeg_dimensions(data: &[u8]) -> Option<(u32, u32)> {
    let mut i = 2;
    while i + 9 < data.len() {
        if data[i] != 0xFF {
            return None;
        }
        let marker = data[i + 1];
        let len = usize::from(u16::from_be_bytes([data[i + 2], data[i + 3]]));
        if matches!(marker, 0xC0..=0xC3 | 0xC5..=0xC7 | 0xC9..=0xCB | 0xCD..=0xCF) {
            let h = u16::from_be_bytes([data[i + 5], data[i + 6]]);
            let w = u16::from_be_bytes([data[i + 7], data[i + 8]]);
            return Some((u32::from(w), u32::from(h)));
        }
        i += 2 + len;
    }
    None
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    /// A valid 1x1 PNG
    pub(crate) const TINY_PNG: &[u8] = &[
        0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A, 0x00, 0x00, 0x00, 0x0D, 0x49, 0x48, 0x44,
        0x52, 0x00, 0x00, 0x00, 0x01, 0x00, 0x00, 0x00, 0x01, 0x08, 0x06, 0x00, 0x00, 0x00, 0x1F,
        0x15, 0xC4, 0x89, 0x00, 0x00, 0x00, 0x0D, 0x49, 0x44, 0x41, 0x54, 0x78, 0x9C, 0x63, 0x00,
        0x01, 0x00, 0x00, 0x05, 0x00, 0x01, 0x0D, 0x0A, 0x2D, 0xB4, 0x00, 0x00, 0x00, 0x00, 0x49,
        0x45, 0x4E, 0x44, 0xAE, 0x42, 0x60, 0x82,
    ];

    #[test]
    fn test_sniff() {
        assert_eq!(sniff(TINY_PNG), ImageType::Png);
        assert_eq!(sniff(&[0xFF, 0xD8, 0xFF, 0xE0]), ImageType::Jpeg);
        assert_eq!(sniff(b"GIF89a...."), ImageType::Gif);
        assert_eq!(sniff(b"MM\0*rest"), ImageType::Tiff);
        assert_eq!(sniff(b"hello"), ImageType::Unknown);
        assert_eq!(sniff(&[]), ImageType::Unknown);
    }

    #[test]
    fn test_png_dimensions() {
        assert_eq!(dimensions(TINY_PNG), Some((1, 1)));
        assert_eq!(dimensions(b"hello"), None);
    }

    #[test]
    fn test_extensions() {
        assert_eq!(ImageType::from_extension("JPEG"), ImageType::Jpeg);
        assert_eq!(ImageType::Png.extension(), "png");
        assert_eq!(ImageType::Gif.mime_type(), "image/gif");
    }
}

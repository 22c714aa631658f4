//! Color values
//!
//! Six representations are supported: hex, RGB triple, theme slot, system
//! color, highlight name and "unspecified". Backends normalize them into
//! their own notation (`RRGGBB` for OOXML, `#rrggbb` for ODF, a color table
//! index for RTF).

use crate::error::{Error, Result};
use std::fmt;
use std::str::FromStr;

/// Six uppercase hex digits, no leading `#`
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct HexColor(String);

impl HexColor {
    /// Validate 3 or 6 hex digits (leading `#` allowed).
    ///
    /// A 3-digit form doubles each digit: `d8e` becomes `DD88EE`.
    pub fn new(value: &str) -> Result<Self> {
        let digits = value.trim().trim_start_matches('#');
        if !digits.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(Error::InvalidColor(value.to_string()));
        }
        let expanded = match digits.len() {
            3 => digits.chars().flat_map(|c| [c, c]).collect::<String>(),
            6 => digits.to_string(),
            _ => return Err(Error::InvalidColor(value.to_string())),
        };
        Ok(HexColor(expanded.to_ascii_uppercase()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    fn channels(&self) -> Option<(u8, u8, u8)> {
        let channel = |i: usize| {
            self.0
                .get(i..i + 2)
                .and_then(|c| u8::from_str_radix(c, 16).ok())
        };
        Some((channel(0)?, channel(2)?, channel(4)?))
    }
}

impl fmt::Display for HexColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A color value
#[derive(Clone, Debug, PartialEq, Eq, Hash, Default)]
pub enum Color {
    Hex(HexColor),
    /// RGB channels
    Rgb(u8, u8, u8),
    /// Theme slot
    Theme(ThemeColor),
    /// System color with the last resolved value, if known
    System {
        name: SystemColor,
        last: Option<HexColor>,
    },
    /// One of the fixed highlight names
    Highlight(HighlightColor),
    /// No color
    #[default]
    Unspecified,
}

impl Color {
    /// Build a hex color from 3 or 6 hex digits (leading `#` allowed).
    ///
    /// A 3-digit form doubles each digit: `d8e` becomes `DD88EE`.
    pub fn hex(value: &str) -> Result<Self> {
        HexColor::new(value).map(Color::Hex)
    }

    /// Build an RGB color; channels outside `0..=255` are rejected
    pub fn rgb(r: i32, g: i32, b: i32) -> Result<Self> {
        let channel = |v: i32| {
            u8::try_from(v).map_err(|_| Error::InvalidColor(format!("rgb({}, {}, {})", r, g, b)))
        };
        Ok(Color::Rgb(channel(r)?, channel(g)?, channel(b)?))
    }

    /// Strict parse of any supported notation.
    ///
    /// Accepts `#abc`/`abc`/`aabbcc`, `rgb(r, g, b)` or `r,g,b`, theme slot
    /// names, system color names, highlight names, and `auto`/`none`/`""`
    /// for [`Color::Unspecified`].
    pub fn parse(value: &str) -> Result<Self> {
        let trimmed = value.trim();
        if trimmed.is_empty()
            || trimmed.eq_ignore_ascii_case("auto")
            || trimmed.eq_ignore_ascii_case("none")
        {
            return Ok(Color::Unspecified);
        }

        if let Some(channels) = parse_rgb_triple(trimmed) {
            let (r, g, b) = channels?;
            return Color::rgb(r, g, b);
        }

        if let Ok(hex) = Color::hex(trimmed) {
            return Ok(hex);
        }

        if let Some(h) = HighlightColor::from_name(trimmed) {
            return Ok(Color::Highlight(h));
        }
        if let Some(t) = ThemeColor::from_name(trimmed) {
            return Ok(Color::Theme(t));
        }
        if let Some(s) = SystemColor::from_name(trimmed) {
            return Ok(Color::System {
                name: s,
                last: None,
            });
        }

        Err(Error::InvalidColor(value.to_string()))
    }

    /// Lenient parse: unrecognized input yields [`Color::Unspecified`] and
    /// a warning instead of an error.
    pub fn from_mixed(value: &str) -> Self {
        match Color::parse(value) {
            Ok(color) => color,
            Err(e) => {
                log::warn!("{}, using unspecified color", e);
                Color::Unspecified
            }
        }
    }

    pub fn is_unspecified(&self) -> bool {
        matches!(self, Color::Unspecified)
    }

    /// Canonical 6-digit uppercase hex, when this color has one.
    ///
    /// Theme colors and unspecified colors have none; system colors only
    /// when a last resolved value is known.
    pub fn to_hex(&self) -> Option<String> {
        match self {
            Color::Hex(h) => Some(h.as_str().to_string()),
            Color::Rgb(r, g, b) => Some(format!("{:02X}{:02X}{:02X}", r, g, b)),
            Color::Highlight(h) => Some(h.hex().to_string()),
            Color::System { last, .. } => last.as_ref().map(|h| h.as_str().to_string()),
            Color::Theme(_) | Color::Unspecified => None,
        }
    }

    /// Hex form when available, otherwise the symbolic name
    pub fn to_hex_or_name(&self) -> Option<String> {
        match self {
            Color::Theme(t) => Some(t.name().to_string()),
            Color::System { name, last: None } => Some(name.name().to_string()),
            other => other.to_hex(),
        }
    }

    /// RGB channels, when the color has a hex form
    pub fn to_rgb(&self) -> Option<(u8, u8, u8)> {
        match self {
            Color::Hex(h) => h.channels(),
            Color::Rgb(r, g, b) => Some((*r, *g, *b)),
            Color::Highlight(h) => HexColor::new(h.hex()).ok()?.channels(),
            Color::System { last, .. } => last.as_ref()?.channels(),
            Color::Theme(_) | Color::Unspecified => None,
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.to_hex_or_name() {
            Some(s) => f.write_str(&s),
            None => f.write_str("auto"),
        }
    }
}

impl FromStr for Color {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Color::parse(s)
    }
}

/// `rgb(r, g, b)` or `r,g,b`; `None` when the input is not a triple at all
fn parse_rgb_triple(value: &str) -> Option<Result<(i32, i32, i32)>> {
    let inner = value
        .strip_prefix("rgb(")
        .and_then(|v| v.strip_suffix(')'))
        .unwrap_or(value);
    if !inner.contains(',') {
        return None;
    }
    let parts: Vec<&str> = inner.split(',').map(str::trim).collect();
    if parts.len() != 3 {
        return Some(Err(Error::InvalidColor(value.to_string())));
    }
    let mut channels = [0i32; 3];
    for (slot, part) in channels.iter_mut().zip(&parts) {
        match part.parse::<i32>() {
            Ok(v) => *slot = v,
            Err(_) => return Some(Err(Error::InvalidColor(value.to_string()))),
        }
    }
    Some(Ok((channels[0], channels[1], channels[2])))
}

/// Highlight colors (closed set of 15 names)
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum HighlightColor {
    Yellow,
    Green,
    Cyan,
    Magenta,
    Blue,
    Red,
    DarkBlue,
    DarkCyan,
    DarkGreen,
    DarkMagenta,
    DarkRed,
    DarkYellow,
    DarkGray,
    LightGray,
    Black,
}

impl HighlightColor {
    pub const ALL: [HighlightColor; 15] = [
        HighlightColor::Yellow,
        HighlightColor::Green,
        HighlightColor::Cyan,
        HighlightColor::Magenta,
        HighlightColor::Blue,
        HighlightColor::Red,
        HighlightColor::DarkBlue,
        HighlightColor::DarkCyan,
        HighlightColor::DarkGreen,
        HighlightColor::DarkMagenta,
        HighlightColor::DarkRed,
        HighlightColor::DarkYellow,
        HighlightColor::DarkGray,
        HighlightColor::LightGray,
        HighlightColor::Black,
    ];

    /// OOXML `w:highlight` value
    pub fn name(self) -> &'static str {
        match self {
            HighlightColor::Yellow => "yellow",
            HighlightColor::Green => "green",
            HighlightColor::Cyan => "cyan",
            HighlightColor::Magenta => "magenta",
            HighlightColor::Blue => "blue",
            HighlightColor::Red => "red",
            HighlightColor::DarkBlue => "darkBlue",
            HighlightColor::DarkCyan => "darkCyan",
            HighlightColor::DarkGreen => "darkGreen",
            HighlightColor::DarkMagenta => "darkMagenta",
            HighlightColor::DarkRed => "darkRed",
            HighlightColor::DarkYellow => "darkYellow",
            HighlightColor::DarkGray => "darkGray",
            HighlightColor::LightGray => "lightGray",
            HighlightColor::Black => "black",
        }
    }

    pub fn hex(self) -> &'static str {
        match self {
            HighlightColor::Yellow => "FFFF00",
            HighlightColor::Green => "00FF00",
            HighlightColor::Cyan => "00FFFF",
            HighlightColor::Magenta => "FF00FF",
            HighlightColor::Blue => "0000FF",
            HighlightColor::Red => "FF0000",
            HighlightColor::DarkBlue => "000080",
            HighlightColor::DarkCyan => "008080",
            HighlightColor::DarkGreen => "008000",
            HighlightColor::DarkMagenta => "800080",
            HighlightColor::DarkRed => "800000",
            HighlightColor::DarkYellow => "808000",
            HighlightColor::DarkGray => "808080",
            HighlightColor::LightGray => "C0C0C0",
            HighlightColor::Black => "000000",
        }
    }

    /// Case-insensitive lookup
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL
            .iter()
            .copied()
            .find(|h| h.name().eq_ignore_ascii_case(name))
    }

    /// Highlight whose hex value matches exactly
    pub fn from_hex(hex: &str) -> Option<Self> {
        Self::ALL
            .iter()
            .copied()
            .find(|h| h.hex().eq_ignore_ascii_case(hex))
    }
}

/// Theme color slots
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ThemeColor {
    Dark1,
    Light1,
    Dark2,
    Light2,
    Accent1,
    Accent2,
    Accent3,
    Accent4,
    Accent5,
    Accent6,
    Hyperlink,
    FollowedHyperlink,
    Background1,
    Text1,
    Background2,
    Text2,
}

impl ThemeColor {
    pub const ALL: [ThemeColor; 16] = [
        ThemeColor::Dark1,
        ThemeColor::Light1,
        ThemeColor::Dark2,
        ThemeColor::Light2,
        ThemeColor::Accent1,
        ThemeColor::Accent2,
        ThemeColor::Accent3,
        ThemeColor::Accent4,
        ThemeColor::Accent5,
        ThemeColor::Accent6,
        ThemeColor::Hyperlink,
        ThemeColor::FollowedHyperlink,
        ThemeColor::Background1,
        ThemeColor::Text1,
        ThemeColor::Background2,
        ThemeColor::Text2,
    ];

    /// OOXML `w:themeColor` value
    pub fn name(self) -> &'static str {
        match self {
            ThemeColor::Dark1 => "dark1",
            ThemeColor::Light1 => "light1",
            ThemeColor::Dark2 => "dark2",
            ThemeColor::Light2 => "light2",
            ThemeColor::Accent1 => "accent1",
            ThemeColor::Accent2 => "accent2",
            ThemeColor::Accent3 => "accent3",
            ThemeColor::Accent4 => "accent4",
            ThemeColor::Accent5 => "accent5",
            ThemeColor::Accent6 => "accent6",
            ThemeColor::Hyperlink => "hyperlink",
            ThemeColor::FollowedHyperlink => "followedHyperlink",
            ThemeColor::Background1 => "background1",
            ThemeColor::Text1 => "text1",
            ThemeColor::Background2 => "background2",
            ThemeColor::Text2 => "text2",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL
            .iter()
            .copied()
            .find(|t| t.name().eq_ignore_ascii_case(name))
    }
}

/// System color names
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SystemColor {
    ScrollBar,
    Background,
    ActiveCaption,
    InactiveCaption,
    Menu,
    Window,
    WindowFrame,
    MenuText,
    WindowText,
    CaptionText,
    ActiveBorder,
    InactiveBorder,
    AppWorkspace,
    Highlight,
    HighlightText,
    BtnFace,
    BtnShadow,
    GrayText,
    BtnText,
    InactiveCaptionText,
    BtnHighlight,
    DkShadow3d,
    Light3d,
    InfoText,
    InfoBk,
    HotLight,
    GradientActiveCaption,
    GradientInactiveCaption,
    MenuHighlight,
    MenuBar,
}

impl SystemColor {
    pub const ALL: [SystemColor; 30] = [
        SystemColor::ScrollBar,
        SystemColor::Background,
        SystemColor::ActiveCaption,
        SystemColor::InactiveCaption,
        SystemColor::Menu,
        SystemColor::Window,
        SystemColor::WindowFrame,
        SystemColor::MenuText,
        SystemColor::WindowText,
        SystemColor::CaptionText,
        SystemColor::ActiveBorder,
        SystemColor::InactiveBorder,
        SystemColor::AppWorkspace,
        SystemColor::Highlight,
        SystemColor::HighlightText,
        SystemColor::BtnFace,
        SystemColor::BtnShadow,
        SystemColor::GrayText,
        SystemColor::BtnText,
        SystemColor::InactiveCaptionText,
        SystemColor::BtnHighlight,
        SystemColor::DkShadow3d,
        SystemColor::Light3d,
        SystemColor::InfoText,
        SystemColor::InfoBk,
        SystemColor::HotLight,
        SystemColor::GradientActiveCaption,
        SystemColor::GradientInactiveCaption,
        SystemColor::MenuHighlight,
        SystemColor::MenuBar,
    ];

    /// DrawingML `a:sysClr/@val` value
    pub fn name(self) -> &'static str {
        match self {
            SystemColor::ScrollBar => "scrollBar",
            SystemColor::Background => "background",
            SystemColor::ActiveCaption => "activeCaption",
            SystemColor::InactiveCaption => "inactiveCaption",
            SystemColor::Menu => "menu",
            SystemColor::Window => "window",
            SystemColor::WindowFrame => "windowFrame",
            SystemColor::MenuText => "menuText",
            SystemColor::WindowText => "windowText",
            SystemColor::CaptionText => "captionText",
            SystemColor::ActiveBorder => "activeBorder",
            SystemColor::InactiveBorder => "inactiveBorder",
            SystemColor::AppWorkspace => "appWorkspace",
            SystemColor::Highlight => "highlight",
            SystemColor::HighlightText => "highlightText",
            SystemColor::BtnFace => "btnFace",
            SystemColor::BtnShadow => "btnShadow",
            SystemColor::GrayText => "grayText",
            SystemColor::BtnText => "btnText",
            SystemColor::InactiveCaptionText => "inactiveCaptionText",
            SystemColor::BtnHighlight => "btnHighlight",
            SystemColor::DkShadow3d => "3dDkShadow",
            SystemColor::Light3d => "3dLight",
            SystemColor::InfoText => "infoText",
            SystemColor::InfoBk => "infoBk",
            SystemColor::HotLight => "hotLight",
            SystemColor::GradientActiveCaption => "gradientActiveCaption",
            SystemColor::GradientInactiveCaption => "gradientInactiveCaption",
            SystemColor::MenuHighlight => "menuHighlight",
            SystemColor::MenuBar => "menuBar",
        }
    }

    /// Lookup by name; names outside the closed set are an error
    pub fn parse(name: &str) -> Result<Self> {
        Self::from_name(name).ok_or_else(|| Error::InvalidColor(name.to_string()))
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL
            .iter()
            .copied()
            .find(|s| s.name().eq_ignore_ascii_case(name))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_short_hex_expands() {
        let Color::Hex(expanded) = Color::hex("d8e").unwrap() else {
            panic!("expected a hex color");
        };
        assert_eq!(expanded.as_str(), "DD88EE");
        assert_eq!(Color::hex("#abc").unwrap().to_hex_or_name().unwrap(), "AABBCC");
        for digits in ["123", "fff", "0a9"] {
            let expected: String = digits
                .to_ascii_uppercase()
                .chars()
                .flat_map(|c| [c, c])
                .collect();
            assert_eq!(Color::hex(digits).unwrap().to_hex_or_name().unwrap(), expected);
        }
    }

    #[test]
    fn test_short_hex_channels() {
        assert_eq!(Color::hex("F00").unwrap().to_rgb(), Some((255, 0, 0)));
        assert_eq!(
            Color::Highlight(HighlightColor::Yellow).to_rgb(),
            Some((255, 255, 0))
        );
        assert!(HexColor::new("F0").is_err());
    }

    #[test]
    fn test_invalid_hex() {
        assert!(Color::hex("12").is_err());
        assert!(Color::hex("ggg").is_err());
        assert!(Color::hex("1234567").is_err());
    }

    #[test]
    fn test_rgb_bounds() {
        assert!(Color::rgb(256, 0, 0).is_err());
        assert!(Color::rgb(0, -1, 0).is_err());
        assert_eq!(Color::rgb(0, 0, 0).unwrap().to_hex().unwrap(), "000000");
        assert_eq!(Color::rgb(255, 255, 255).unwrap().to_hex().unwrap(), "FFFFFF");
        assert_eq!(Color::rgb(18, 52, 86).unwrap().to_rgb(), Some((18, 52, 86)));
    }

    #[test]
    fn test_parse_names() {
        assert_eq!(
            Color::parse("darkBlue").unwrap(),
            Color::Highlight(HighlightColor::DarkBlue)
        );
        assert_eq!(Color::parse("accent1").unwrap(), Color::Theme(ThemeColor::Accent1));
        assert_eq!(
            Color::parse("windowText").unwrap(),
            Color::System {
                name: SystemColor::WindowText,
                last: None
            }
        );
        assert_eq!(Color::parse("auto").unwrap(), Color::Unspecified);
        assert_eq!(Color::parse("rgb(1, 2, 3)").unwrap(), Color::Rgb(1, 2, 3));
        assert!(Color::parse("300,0,0").is_err());
        assert!(SystemColor::parse("notAColor").is_err());
    }

    #[test]
    fn test_from_mixed_falls_back() {
        assert_eq!(Color::from_mixed("chartreuse-ish"), Color::Unspecified);
        assert_eq!(Color::from_mixed("FF0000"), Color::hex("FF0000").unwrap());
    }

    #[test]
    fn test_hex_or_name() {
        assert_eq!(Color::Theme(ThemeColor::Text1).to_hex(), None);
        assert_eq!(
            Color::Theme(ThemeColor::Text1).to_hex_or_name().as_deref(),
            Some("text1")
        );
        assert_eq!(
            Color::Highlight(HighlightColor::Yellow).to_hex().as_deref(),
            Some("FFFF00")
        );
        assert_eq!(Color::Unspecified.to_hex_or_name(), None);
        assert_eq!(HighlightColor::ALL.len(), 15);
    }
}

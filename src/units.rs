//! Length units and conversions
//!
//! Twip (1/20 of a point, 1/1440 of an inch) is the canonical internal unit.
//! All absolute units are related through their count per inch:
//! 1 inch = 1440 twip = 72 pt = 96 px = 2.54 cm = 914400 EMU.

use crate::error::{Error, Result};
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

/// Absolute length unit
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Unit {
    Twip,
    Point,
    Pixel,
    Centimeter,
    Emu,
    Inch,
}

impl Unit {
    /// Number of units in one inch
    pub fn per_inch(self) -> f64 {
        match self {
            Unit::Twip => TWIPS_PER_INCH,
            Unit::Point => POINTS_PER_INCH,
            Unit::Pixel => PIXELS_PER_INCH,
            Unit::Centimeter => CM_PER_INCH,
            Unit::Emu => EMUS_PER_INCH,
            Unit::Inch => 1.0,
        }
    }

    /// Suffix used when parsing/printing lengths
    pub fn suffix(self) -> &'static str {
        match self {
            Unit::Twip => "tw",
            Unit::Point => "pt",
            Unit::Pixel => "px",
            Unit::Centimeter => "cm",
            Unit::Emu => "emu",
            Unit::Inch => "in",
        }
    }
}

pub const TWIPS_PER_INCH: f64 = 1440.0;
pub const POINTS_PER_INCH: f64 = 72.0;
pub const PIXELS_PER_INCH: f64 = 96.0;
pub const CM_PER_INCH: f64 = 2.54;
pub const EMUS_PER_INCH: f64 = 914_400.0;

/// Convert a value between two absolute units
pub fn convert(value: f64, from: Unit, to: Unit) -> f64 {
    if from == to {
        return value;
    }
    value / from.per_inch() * to.per_inch()
}

pub fn twip_to_point(twip: f64) -> f64 {
    twip / 20.0
}

pub fn point_to_twip(point: f64) -> f64 {
    point * 20.0
}

pub fn pixel_to_twip(pixel: f64) -> f64 {
    convert(pixel, Unit::Pixel, Unit::Twip)
}

pub fn twip_to_pixel(twip: f64) -> f64 {
    convert(twip, Unit::Twip, Unit::Pixel)
}

pub fn cm_to_twip(cm: f64) -> f64 {
    convert(cm, Unit::Centimeter, Unit::Twip)
}

pub fn twip_to_cm(twip: f64) -> f64 {
    convert(twip, Unit::Twip, Unit::Centimeter)
}

pub fn emu_to_twip(emu: f64) -> f64 {
    convert(emu, Unit::Emu, Unit::Twip)
}

pub fn twip_to_emu(twip: f64) -> f64 {
    convert(twip, Unit::Twip, Unit::Emu)
}

pub fn inch_to_pixel(inch: f64) -> f64 {
    inch * PIXELS_PER_INCH
}

pub fn pixel_to_emu(pixel: f64) -> f64 {
    convert(pixel, Unit::Pixel, Unit::Emu)
}

pub fn emu_to_pixel(emu: f64) -> f64 {
    convert(emu, Unit::Emu, Unit::Pixel)
}

pub fn pixel_to_cm(pixel: f64) -> f64 {
    convert(pixel, Unit::Pixel, Unit::Centimeter)
}

/// Pixel estimate for a font size given in points.
///
/// Uses the 16/12 ratio historically applied to font sizes. This is an
/// estimate for sizing, not a unit law.
pub fn font_points_to_pixels(points: f64) -> f64 {
    points * 16.0 / 12.0
}

/// Length value: absolute with a unit, a percentage, or automatic.
///
/// `PartialEq` is structural: `Length::twip(1440.0) != Length::inch(1.0)`.
/// Use [`Length::same_as`] or [`Length::compare`] to compare magnitudes.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Length {
    Absolute { value: f64, unit: Unit },
    Percent(f64),
    Auto,
}

impl Length {
    /// Absolute length; rejects non-finite values
    pub fn absolute(value: f64, unit: Unit) -> Result<Self> {
        if !value.is_finite() {
            return Err(Error::InvalidLength(format!("{} {}", value, unit.suffix())));
        }
        Ok(Length::Absolute { value, unit })
    }

    /// Percentage of the available width; rejects negative or non-finite values
    pub fn percent(value: f64) -> Result<Self> {
        if !value.is_finite() || value < 0.0 {
            return Err(Error::InvalidLength(format!("{}%", value)));
        }
        Ok(Length::Percent(value))
    }

    pub fn twip(value: f64) -> Self {
        Length::Absolute { value, unit: Unit::Twip }
    }

    pub fn point(value: f64) -> Self {
        Length::Absolute { value, unit: Unit::Point }
    }

    pub fn pixel(value: f64) -> Self {
        Length::Absolute { value, unit: Unit::Pixel }
    }

    pub fn cm(value: f64) -> Self {
        Length::Absolute { value, unit: Unit::Centimeter }
    }

    pub fn emu(value: f64) -> Self {
        Length::Absolute { value, unit: Unit::Emu }
    }

    pub fn inch(value: f64) -> Self {
        Length::Absolute { value, unit: Unit::Inch }
    }

    pub fn is_auto(&self) -> bool {
        matches!(self, Length::Auto)
    }

    /// Value in twips, `None` for percent and auto
    pub fn to_twip(&self) -> Option<f64> {
        self.to_unit(Unit::Twip)
    }

    /// Value in the given unit, `None` for percent and auto
    pub fn to_unit(&self, target: Unit) -> Option<f64> {
        match *self {
            Length::Absolute { value, unit } => Some(convert(value, unit, target)),
            _ => None,
        }
    }

    /// Rounded twips, `None` for percent and auto
    pub fn twips_rounded(&self) -> Option<i64> {
        self.to_twip().map(|t| t.round() as i64)
    }

    /// Compare two lengths after normalizing to twips.
    ///
    /// Percentages compare with percentages; `Auto` is incomparable.
    pub fn compare(&self, other: &Length) -> Option<Ordering> {
        match (self, other) {
            (Length::Percent(a), Length::Percent(b)) => a.partial_cmp(b),
            (Length::Auto, _) | (_, Length::Auto) => None,
            _ => {
                let a = self.to_twip()?;
                let b = other.to_twip()?;
                if (a - b).abs() < 1e-6 {
                    Some(Ordering::Equal)
                } else {
                    a.partial_cmp(&b)
                }
            }
        }
    }

    /// Magnitude equality after normalization
    pub fn same_as(&self, other: &Length) -> bool {
        self.compare(other) == Some(Ordering::Equal)
    }

    /// Parse an OOXML width (`w:w` + `w:type`, as on `w:tblW`/`w:tcW`).
    ///
    /// `pct` values are fiftieths of a percent unless they carry a `%` suffix.
    pub fn from_ooxml(value: Option<&str>, kind: Option<&str>) -> Length {
        match kind.unwrap_or("dxa") {
            "auto" | "nil" => Length::Auto,
            "pct" => {
                let value = value.unwrap_or("0");
                let pct = match value.strip_suffix('%') {
                    Some(v) => v.trim().parse::<f64>().ok(),
                    None => value.trim().parse::<f64>().ok().map(|v| v / 50.0),
                };
                pct.map(Length::Percent).unwrap_or(Length::Auto)
            }
            _ => value
                .and_then(|v| v.trim().parse::<f64>().ok())
                .map(Length::twip)
                .unwrap_or(Length::Auto),
        }
    }

    /// OOXML `(w:w, w:type)` pair
    pub fn to_ooxml(&self) -> (String, &'static str) {
        match self {
            Length::Auto => ("0".to_string(), "auto"),
            Length::Percent(p) => (((p * 50.0).round() as i64).to_string(), "pct"),
            Length::Absolute { .. } => (
                self.twips_rounded().unwrap_or_default().to_string(),
                "dxa",
            ),
        }
    }
}

impl Default for Length {
    fn default() -> Self {
        Length::Auto
    }
}

impl fmt::Display for Length {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Length::Absolute { value, unit } => write!(f, "{}{}", value, unit.suffix()),
            Length::Percent(p) => write!(f, "{}%", p),
            Length::Auto => write!(f, "auto"),
        }
    }
}

impl FromStr for Length {
    type Err = Error;

    /// Parses `auto`, `50%`, `12pt`, `2.5cm`, `96px`, `1in`, `914400emu`,
    /// `720tw`; a bare number is taken as twips.
    fn from_str(s: &str) -> Result<Self> {
        let s = s.trim();
        if s.eq_ignore_ascii_case("auto") {
            return Ok(Length::Auto);
        }
        if let Some(p) = s.strip_suffix('%') {
            let value = p
                .trim()
                .parse::<f64>()
                .map_err(|_| Error::InvalidLength(s.to_string()))?;
            return Length::percent(value);
        }

        const UNITS: [Unit; 6] = [
            Unit::Emu,
            Unit::Twip,
            Unit::Point,
            Unit::Pixel,
            Unit::Centimeter,
            Unit::Inch,
        ];
        let (number, unit) = UNITS
            .iter()
            .find_map(|u| s.strip_suffix(u.suffix()).map(|n| (n, *u)))
            .unwrap_or((s, Unit::Twip));

        let value = number
            .trim()
            .parse::<f64>()
            .map_err(|_| Error::InvalidLength(s.to_string()))?;
        Length::absolute(value, unit)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-9;

    #[test]
    fn test_canonical_ratios() {
        assert!((pixel_to_twip(inch_to_pixel(1.0)) - 1440.0).abs() < EPS);
        assert!((cm_to_twip(2.54) - 1440.0).abs() < EPS);
        assert!((emu_to_twip(914_400.0) - 1440.0).abs() < EPS);
        assert!((twip_to_point(1440.0) - 72.0).abs() < EPS);
        assert!((point_to_twip(1.0) - 20.0).abs() < EPS);
    }

    #[test]
    fn test_roundtrip_all_units() {
        let units = [
            Unit::Twip,
            Unit::Point,
            Unit::Pixel,
            Unit::Centimeter,
            Unit::Emu,
            Unit::Inch,
        ];
        for unit in units {
            for value in [0.0, 1.0, 12.5, 720.0, 12345.678] {
                let twip = convert(value, unit, Unit::Twip);
                let back = convert(twip, Unit::Twip, unit);
                assert!((back - value).abs() < 1e-6, "{:?} {}", unit, value);
            }
        }
    }

    #[test]
    fn test_font_pixel_estimate() {
        assert!((font_points_to_pixels(12.0) - 16.0).abs() < EPS);
    }

    #[test]
    fn test_length_compare_normalizes() {
        assert!(Length::twip(1440.0).same_as(&Length::inch(1.0)));
        assert!(Length::pixel(96.0).same_as(&Length::cm(2.54)));
        assert_eq!(
            Length::point(10.0).compare(&Length::twip(100.0)),
            Some(Ordering::Greater)
        );
        assert_eq!(Length::Auto.compare(&Length::Auto), None);
        assert_eq!(Length::Percent(10.0).compare(&Length::twip(1.0)), None);
    }

    #[test]
    fn test_length_rejects_invalid() {
        assert!(Length::percent(-1.0).is_err());
        assert!(Length::absolute(f64::NAN, Unit::Point).is_err());
    }

    #[test]
    fn test_ooxml_widths() {
        assert_eq!(Length::from_ooxml(Some("2500"), Some("pct")), Length::Percent(50.0));
        assert_eq!(Length::from_ooxml(Some("50%"), Some("pct")), Length::Percent(50.0));
        assert_eq!(Length::from_ooxml(Some("720"), Some("dxa")), Length::twip(720.0));
        assert_eq!(Length::from_ooxml(Some("0"), Some("auto")), Length::Auto);
        assert_eq!(Length::Percent(100.0).to_ooxml(), ("5000".to_string(), "pct"));
        assert_eq!(Length::cm(2.54).to_ooxml(), ("1440".to_string(), "dxa"));
    }

    #[test]
    fn test_parse_length() {
        assert_eq!("12pt".parse::<Length>().unwrap(), Length::point(12.0));
        assert_eq!("720".parse::<Length>().unwrap(), Length::twip(720.0));
        assert_eq!("914400emu".parse::<Length>().unwrap(), Length::emu(914400.0));
        assert_eq!("auto".parse::<Length>().unwrap(), Length::Auto);
        assert_eq!("25%".parse::<Length>().unwrap(), Length::Percent(25.0));
        assert!("wide".parse::<Length>().is_err());
    }
}

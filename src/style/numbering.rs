//! Numbering (list) definitions

use super::{Overlay, FontStyle};

/// Number format
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum NumberFormat {
    /// 1, 2, 3
    Decimal,
    /// I, II, III
    UpperRoman,
    /// i, ii, iii
    LowerRoman,
    /// A, B, C
    UpperLetter,
    /// a, b, c
    LowerLetter,
    /// •
    Bullet,
    /// 01, 02, 03 (decimalZero)
    DecimalZero,
    /// 一, 二, 三 (chineseCounting)
    ChineseCounting,
    /// None (no number)
    None,
    /// Other format (preserved as string)
    Other(String),
}

impl std::str::FromStr for NumberFormat {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Ok(match s {
            "decimal" => NumberFormat::Decimal,
            "upperRoman" => NumberFormat::UpperRoman,
            "lowerRoman" => NumberFormat::LowerRoman,
            "upperLetter" => NumberFormat::UpperLetter,
            "lowerLetter" => NumberFormat::LowerLetter,
            "bullet" => NumberFormat::Bullet,
            "decimalZero" => NumberFormat::DecimalZero,
            "chineseCounting" => NumberFormat::ChineseCounting,
            "none" => NumberFormat::None,
            other => NumberFormat::Other(other.to_string()),
        })
    }
}

impl NumberFormat {
    /// Convert to OOXML string
    pub fn as_str(&self) -> &str {
        match self {
            NumberFormat::Decimal => "decimal",
            NumberFormat::UpperRoman => "upperRoman",
            NumberFormat::LowerRoman => "lowerRoman",
            NumberFormat::UpperLetter => "upperLetter",
            NumberFormat::LowerLetter => "lowerLetter",
            NumberFormat::Bullet => "bullet",
            NumberFormat::DecimalZero => "decimalZero",
            NumberFormat::ChineseCounting => "chineseCounting",
            NumberFormat::None => "none",
            NumberFormat::Other(s) => s,
        }
    }

    /// ODF `style:num-format`; bullets and unknown formats have none
    pub fn as_odf(&self) -> Option<&'static str> {
        match self {
            NumberFormat::Decimal | NumberFormat::DecimalZero => Some("1"),
            NumberFormat::UpperRoman => Some("I"),
            NumberFormat::LowerRoman => Some("i"),
            NumberFormat::UpperLetter => Some("A"),
            NumberFormat::LowerLetter => Some("a"),
            _ => None,
        }
    }

    /// Check if this is a bullet format
    pub fn is_bullet(&self) -> bool {
        matches!(self, NumberFormat::Bullet)
    }

    /// Render a counter value in this format (bullets render as `•`)
    pub fn render(&self, n: u32) -> String {
        match self {
            NumberFormat::Bullet => "\u{2022}".to_string(),
            NumberFormat::None => String::new(),
            NumberFormat::DecimalZero => format!("{:02}", n),
            NumberFormat::UpperRoman => to_roman(n),
            NumberFormat::LowerRoman => to_roman(n).to_lowercase(),
            NumberFormat::UpperLetter => to_letters(n),
            NumberFormat::LowerLetter => to_letters(n).to_lowercase(),
            _ => n.to_string(),
        }
    }
}

fn to_roman(mut n: u32) -> String {
    const TABLE: [(u32, &str); 13] = [
        (1000, "M"),
        (900, "CM"),
        (500, "D"),
        (400, "CD"),
        (100, "C"),
        (90, "XC"),
        (50, "L"),
        (40, "XL"),
        (10, "X"),
        (9, "IX"),
        (5, "V"),
        (4, "IV"),
        (1, "I"),
    ];
    let mut out = String::new();
    for (value, digits) in TABLE {
        while n >= value {
            out.push_str(digits);
            n -= value;
        }
    }
    out
}

/// 1 → A, 26 → Z, 27 → AA
fn to_letters(n: u32) -> String {
    if n == 0 {
        return String::new();
    }
    let letter = char::from(b'A' + ((n - 1) % 26) as u8);
    letter.to_string().repeat(((n - 1) / 26 + 1) as usize)
}

/// Level justification
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum LevelAlignment {
    #[default]
    Left,
    Center,
    Right,
}

impl LevelAlignment {
    pub fn as_str(self) -> &'static str {
        match self {
            LevelAlignment::Left => "left",
            LevelAlignment::Center => "center",
            LevelAlignment::Right => "right",
        }
    }

    pub fn parse(s: &str) -> Self {
        match s {
            "center" => LevelAlignment::Center,
            "right" | "end" => LevelAlignment::Right,
            _ => LevelAlignment::Left,
        }
    }
}

/// Level definition
#[derive(Clone, Debug, PartialEq)]
pub struct NumberingLevel {
    /// Level index (0-8)
    pub level: u8,
    pub start: u32,
    pub format: NumberFormat,
    /// Level text (e.g., "%1.", "%1.%2.")
    pub text: String,
    pub alignment: LevelAlignment,
    /// Left indentation (twips)
    pub indent_left: Option<i32>,
    /// Hanging indentation (twips)
    pub hanging: Option<i32>,
    /// Bullet or number font
    pub font: Option<FontStyle>,
}

impl NumberingLevel {
    /// Create a new level with the given index
    pub fn new(level: u8) -> Self {
        NumberingLevel {
            level,
            start: 1,
            format: NumberFormat::Decimal,
            text: format!("%{}.", u32::from(level) + 1),
            alignment: LevelAlignment::Left,
            indent_left: Some(720 * (i32::from(level) + 1)),
            hanging: Some(360),
            font: None,
        }
    }

    /// Set the number format
    pub fn with_format(mut self, format: NumberFormat) -> Self {
        self.format = format;
        self
    }

    /// Set the level text
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = text.into();
        self
    }

    /// Set the start value
    pub fn with_start(mut self, start: u32) -> Self {
        self.start = start;
        self
    }

    /// Label for the `n`-th item (1-based) of this level.
    ///
    /// `%k` placeholders for other levels are rendered with this level's
    /// start value.
    pub fn label(&self, n: u32) -> String {
        if self.format.is_bullet() {
            return if self.text.is_empty() {
                "\u{2022}".to_string()
            } else {
                self.text.clone()
            };
        }
        let own = format!("%{}", u32::from(self.level) + 1);
        let mut out = self.text.replace(&own, &self.format.render(n));
        for k in 1..=9 {
            out = out.replace(&format!("%{}", k), &self.start.to_string());
        }
        out
    }
}

/// Numbering style: a list definition with up to nine levels
#[derive(Clone, Debug, Default, PartialEq)]
pub struct NumberingStyle {
    pub levels: Vec<NumberingLevel>,
}

impl NumberingStyle {
    /// Bulleted list, nine levels
    pub fn bullet() -> Self {
        NumberingStyle {
            levels: (0..9)
                .map(|l| {
                    NumberingLevel::new(l)
                        .with_format(NumberFormat::Bullet)
                        .with_text("\u{2022}")
                })
                .collect(),
        }
    }

    /// Decimal list `1.`, `1.1.`, ...
    pub fn decimal() -> Self {
        NumberingStyle {
            levels: (0..9)
                .map(|l| {
                    let text: String = (1..=u32::from(l) + 1).map(|k| format!("%{}.", k)).collect();
                    NumberingLevel::new(l).with_text(text)
                })
                .collect(),
        }
    }

    /// Level definition by index
    pub fn level(&self, level: u8) -> Option<&NumberingLevel> {
        self.levels.iter().find(|l| l.level == level)
    }
}

impl Overlay for NumberingStyle {
    /// Levels present in `top` replace levels with the same index
    fn overlay(&mut self, top: &Self) {
        for lvl in &top.levels {
            match self.levels.iter_mut().find(|l| l.level == lvl.level) {
                Some(existing) => *existing = lvl.clone(),
                None => self.levels.push(lvl.clone()),
            }
        }
        self.levels.sort_by_key(|l| l.level);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_number_format_parse() {
        assert_eq!("decimal".parse::<NumberFormat>().unwrap(), NumberFormat::Decimal);
        assert_eq!(
            "ordinal".parse::<NumberFormat>().unwrap(),
            NumberFormat::Other("ordinal".into())
        );
        assert!(NumberFormat::Bullet.is_bullet());
    }

    #[test]
    fn test_render() {
        assert_eq!(NumberFormat::UpperRoman.render(14), "XIV");
        assert_eq!(NumberFormat::LowerLetter.render(28), "bb");
        assert_eq!(NumberFormat::DecimalZero.render(7), "07");
    }

    #[test]
    fn test_labels() {
        let list = NumberingStyle::decimal();
        assert_eq!(list.level(0).unwrap().label(3), "3.");
        assert_eq!(list.level(1).unwrap().label(2), "1.2.");
        assert_eq!(NumberingStyle::bullet().level(0).unwrap().label(5), "\u{2022}");
    }
}

//! Fields (computed content such as page numbers and dates)

use crate::error::{Error, Result};
use std::fmt;
use std::str::FromStr;

/// Field type
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum FieldKind {
    Page,
    NumPages,
    SectionPages,
    Date,
    Time,
    CreateDate,
    SaveDate,
    FileName,
    Author,
    Title,
    /// Index entry
    Xe,
    Index,
    /// Bookmark reference
    Ref,
}

impl FieldKind {
    /// Field instruction keyword
    pub fn as_str(self) -> &'static str {
        match self {
            FieldKind::Page => "PAGE",
            FieldKind::NumPages => "NUMPAGES",
            FieldKind::SectionPages => "SECTIONPAGES",
            FieldKind::Date => "DATE",
            FieldKind::Time => "TIME",
            FieldKind::CreateDate => "CREATEDATE",
            FieldKind::SaveDate => "SAVEDATE",
            FieldKind::FileName => "FILENAME",
            FieldKind::Author => "AUTHOR",
            FieldKind::Title => "TITLE",
            FieldKind::Xe => "XE",
            FieldKind::Index => "INDEX",
            FieldKind::Ref => "REF",
        }
    }

    fn is_date(self) -> bool {
        matches!(
            self,
            FieldKind::Date | FieldKind::Time | FieldKind::CreateDate | FieldKind::SaveDate
        )
    }

    /// Allowed `\*` format values; `None` means the field takes no format
    fn formats(self) -> Option<&'static [&'static str]> {
        const NUMERIC: &[&str] = &["Arabic", "ArabicDash", "alphabetic", "ALPHABETIC", "roman", "ROMAN"];
        const COUNTS: &[&str] = &[
            "Arabic", "ArabicDash", "CardText", "DollarText", "Ordinal", "OrdText", "alphabetic",
            "ALPHABETIC", "roman", "ROMAN", "Caps", "FirstCap", "Lower", "Upper",
        ];
        const CASE: &[&str] = &["Caps", "FirstCap", "Lower", "Upper"];
        match self {
            FieldKind::Page => Some(NUMERIC),
            FieldKind::NumPages | FieldKind::SectionPages => Some(COUNTS),
            FieldKind::FileName | FieldKind::Author | FieldKind::Title => Some(CASE),
            _ => None,
        }
    }

    fn options(self) -> &'static [FieldOption] {
        use FieldOption::*;
        match self {
            FieldKind::Page
            | FieldKind::NumPages
            | FieldKind::SectionPages
            | FieldKind::Author
            | FieldKind::Title
            | FieldKind::Index => &[PreserveFormat],
            FieldKind::Date | FieldKind::Time | FieldKind::CreateDate | FieldKind::SaveDate => {
                &[PreserveFormat, LunarCalendar, SakaEraCalendar, LastUsedFormat]
            }
            FieldKind::FileName => &[PreserveFormat, Path],
            FieldKind::Xe => &[Bold, Italic],
            FieldKind::Ref => &[PreserveFormat, Hyperlink],
        }
    }

    fn needs_target(self) -> bool {
        matches!(self, FieldKind::Xe | FieldKind::Ref)
    }
}

impl FromStr for FieldKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Ok(match s.to_ascii_uppercase().as_str() {
            "PAGE" => FieldKind::Page,
            "NUMPAGES" => FieldKind::NumPages,
            "SECTIONPAGES" => FieldKind::SectionPages,
            "DATE" => FieldKind::Date,
            "TIME" => FieldKind::Time,
            "CREATEDATE" => FieldKind::CreateDate,
            "SAVEDATE" => FieldKind::SaveDate,
            "FILENAME" => FieldKind::FileName,
            "AUTHOR" => FieldKind::Author,
            "TITLE" => FieldKind::Title,
            "XE" => FieldKind::Xe,
            "INDEX" => FieldKind::Index,
            "REF" => FieldKind::Ref,
            _ => return Err(Error::InvalidField(format!("unknown field type '{}'", s))),
        })
    }
}

/// Field switches without a value
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum FieldOption {
    /// `\* MERGEFORMAT`
    PreserveFormat,
    /// `\h` on date fields
    LunarCalendar,
    /// `\s`
    SakaEraCalendar,
    /// `\l`
    LastUsedFormat,
    /// `\p` on FILENAME
    Path,
    /// `\h` on REF
    Hyperlink,
    /// `\b` on XE
    Bold,
    /// `\i` on XE
    Italic,
}

impl FieldOption {
    fn switch(self) -> &'static str {
        match self {
            FieldOption::PreserveFormat => "\\* MERGEFORMAT",
            FieldOption::LunarCalendar | FieldOption::Hyperlink => "\\h",
            FieldOption::SakaEraCalendar => "\\s",
            FieldOption::LastUsedFormat => "\\l",
            FieldOption::Path => "\\p",
            FieldOption::Bold => "\\b",
            FieldOption::Italic => "\\i",
        }
    }
}

/// Field switches with a value
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FieldProperties {
    /// `\*` general format, e.g. `ROMAN`
    pub format: Option<String>,
    /// `\#` numeric picture
    pub num_format: Option<String>,
    /// `\@` date picture, e.g. `d-M-yyyy`
    pub date_format: Option<String>,
    /// Bookmark name (REF) or entry text (XE)
    pub target: Option<String>,
}

/// A field
#[derive(Clone, Debug, PartialEq)]
pub struct Field {
    pub kind: FieldKind,
    pub properties: FieldProperties,
    pub options: Vec<FieldOption>,
    /// Cached result text
    pub text: Option<String>,
}

impl Field {
    /// Build a field, checking that the properties and options are
    /// meaningful for its kind
    pub fn new(
        kind: FieldKind,
        properties: FieldProperties,
        options: Vec<FieldOption>,
    ) -> Result<Self> {
        let field = Field {
            kind,
            properties,
            options,
            text: None,
        };
        field.validate()?;
        Ok(field)
    }

    /// Field of the given kind without switches
    pub fn simple(kind: FieldKind) -> Result<Self> {
        Self::new(kind, FieldProperties::default(), Vec::new())
    }

    pub fn page() -> Self {
        Field {
            kind: FieldKind::Page,
            properties: FieldProperties::default(),
            options: Vec::new(),
            text: None,
        }
    }

    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    pub fn validate(&self) -> Result<()> {
        let kind = self.kind;
        let invalid = |what: String| Err(Error::InvalidField(format!("{}: {}", kind.as_str(), what)));

        if let Some(format) = &self.properties.format {
            match kind.formats() {
                Some(allowed) if allowed.contains(&format.as_str()) => {}
                _ => return invalid(format!("format '{}' is not supported", format)),
            }
        }
        if self.properties.num_format.is_some()
            && !matches!(kind, FieldKind::NumPages | FieldKind::SectionPages)
        {
            return invalid("numeric format is not supported".to_string());
        }
        if self.properties.date_format.is_some() && !kind.is_date() {
            return invalid("date format is not supported".to_string());
        }
        match (&self.properties.target, kind.needs_target()) {
            (None, true) => return invalid("a target is required".to_string()),
            (Some(_), false) => return invalid("a target is not supported".to_string()),
            _ => {}
        }
        for option in &self.options {
            if !kind.options().contains(option) {
                return invalid(format!("option {:?} is not supported", option));
            }
        }
        Ok(())
    }

    /// Field instruction, e.g. `PAGE \* ROMAN \* MERGEFORMAT`
    pub fn instruction(&self) -> String {
        let mut parts = vec![self.kind.as_str().to_string()];
        if let Some(target) = &self.properties.target {
            match self.kind {
                FieldKind::Xe => parts.push(format!("\"{}\"", target)),
                _ => parts.push(target.clone()),
            }
        }
        if let Some(format) = &self.properties.format {
            parts.push(format!("\\* {}", format));
        }
        if let Some(num) = &self.properties.num_format {
            parts.push(format!("\\# {}", num));
        }
        if let Some(date) = &self.properties.date_format {
            parts.push(format!("\\@ \"{}\"", date));
        }
        for option in &self.options {
            parts.push(option.switch().to_string());
        }
        parts.join(" ")
    }

    /// Parse a field instruction such as `DATE \@ "d-M-yyyy" \* MERGEFORMAT`
    pub fn parse_instruction(instruction: &str) -> Result<Self> {
        let tokens = tokenize(instruction);
        let mut iter = tokens.into_iter().peekable();
        let kind: FieldKind = iter
            .next()
            .ok_or_else(|| Error::InvalidField("empty instruction".to_string()))?
            .parse()?;

        let mut properties = FieldProperties::default();
        let mut options = Vec::new();

        while let Some(token) = iter.next() {
            match token.as_str() {
                "\\*" => match iter.next() {
                    Some(v) if v.eq_ignore_ascii_case("MERGEFORMAT") => {
                        options.push(FieldOption::PreserveFormat)
                    }
                    Some(v) => properties.format = Some(v),
                    None => {}
                },
                "\\#" => properties.num_format = iter.next(),
                "\\@" => properties.date_format = iter.next(),
                "\\h" if kind == FieldKind::Ref => options.push(FieldOption::Hyperlink),
                "\\h" => options.push(FieldOption::LunarCalendar),
                "\\s" => options.push(FieldOption::SakaEraCalendar),
                "\\l" => options.push(FieldOption::LastUsedFormat),
                "\\p" => options.push(FieldOption::Path),
                "\\b" => options.push(FieldOption::Bold),
                "\\i" => options.push(FieldOption::Italic),
                other if !other.starts_with('\\') && properties.target.is_none() => {
                    properties.target = Some(other.to_string())
                }
                other => log::debug!("Ignoring field switch '{}' in {}", other, kind.as_str()),
            }
        }

        Field::new(kind, properties, options)
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.instruction())
    }
}

/// Split on whitespace, keeping double-quoted strings together (quotes
/// removed)
fn tokenize(s: &str) -> Vec<String> {
    let mut tokens = Vec::new();
    let mut current = String::new();
    let mut quoted = false;
    for c in s.chars() {
        match c {
            '"' => {
                if quoted {
                    tokens.push(std::mem::take(&mut current));
                }
                quoted = !quoted;
            }
            c if c.is_whitespace() && !quoted => {
                if !current.is_empty() {
                    tokens.push(std::mem::take(&mut current));
                }
            }
            c => current.push(c),
        }
    }
    if !current.is_empty() {
        tokens.push(current);
    }
    tokens
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_instruction() {
        let field = Field::new(
            FieldKind::Page,
            FieldProperties {
                format: Some("ROMAN".into()),
                ..Default::default()
            },
            vec![FieldOption::PreserveFormat],
        )
        .unwrap();
        assert_eq!(field.instruction(), "PAGE \\* ROMAN \\* MERGEFORMAT");
    }

    #[test]
    fn test_invalid_combinations() {
        let bad_format = Field::new(
            FieldKind::Page,
            FieldProperties {
                format: Some("CardText".into()),
                ..Default::default()
            },
            vec![],
        );
        assert!(matches!(bad_format, Err(Error::InvalidField(_))));

        let bad_option = Field::new(
            FieldKind::Page,
            FieldProperties::default(),
            vec![FieldOption::LunarCalendar],
        );
        assert!(bad_option.is_err());

        assert!(Field::simple(FieldKind::Ref).is_err());
        assert!(Field::simple(FieldKind::Date).is_ok());
    }

    #[test]
    fn test_parse_instruction() {
        let field = Field::parse_instruction(" DATE \\@ \"d-M-yyyy\" \\* MERGEFORMAT ").unwrap();
        assert_eq!(field.kind, FieldKind::Date);
        assert_eq!(field.properties.date_format.as_deref(), Some("d-M-yyyy"));
        assert_eq!(field.options, vec![FieldOption::PreserveFormat]);

        let xe = Field::parse_instruction("XE \"Rust language\" \\b").unwrap();
        assert_eq!(xe.properties.target.as_deref(), Some("Rust language"));
        assert_eq!(xe.instruction(), "XE \"Rust language\" \\b");

        assert!(Field::parse_instruction("HYPERLINK \"x\"").is_err());
    }
}

//! Document-wide settings

use crate::style::{FontStyle, ParagraphStyle};

/// Document settings, owned by the [`Document`](super::Document)
#[derive(Clone, Debug, PartialEq)]
pub struct DocumentSettings {
    pub default_font_name: String,
    /// Default font size in points
    pub default_font_size: f64,
    /// Paragraph defaults applied under every paragraph style
    pub default_paragraph: ParagraphStyle,
    /// Zoom percentage
    pub zoom: u32,
    pub even_and_odd_headers: bool,
    pub track_revisions: bool,
    pub hide_spelling_errors: bool,
    pub hide_grammatical_errors: bool,
    pub decimal_symbol: String,
    /// Theme font language, e.g. `en-US`
    pub theme_font_lang: Option<String>,
}

impl Default for DocumentSettings {
    fn default() -> Self {
        DocumentSettings {
            default_font_name: "Arial".to_string(),
            default_font_size: 10.0,
            default_paragraph: ParagraphStyle::default(),
            zoom: 100,
            even_and_odd_headers: false,
            track_revisions: false,
            hide_spelling_errors: false,
            hide_grammatical_errors: false,
            decimal_symbol: ".".to_string(),
            theme_font_lang: None,
        }
    }
}

impl DocumentSettings {
    /// Font defaults as a style, the base under every resolved font
    pub fn default_font(&self) -> FontStyle {
        FontStyle::new()
            .with_name(self.default_font_name.clone())
            .with_size(self.default_font_size)
    }
}

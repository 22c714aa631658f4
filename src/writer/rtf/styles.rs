//! Control words for character and paragraph properties, and the
//! `\stylesheet` group

use super::{escape, Resources, RtfWriter};
use crate::color::Color;
use crate::error::Result;
use crate::model::{title_style_name, Document, Element};
use crate::style::{
    FontStyle, LineSpacing, ParagraphStyle, Style, StyleDefinition, StyleFamily, TabKind,
    TabLeader, Underline, VerticalAlign,
};
use crate::writer::dispatch::{self, StyleWriterFn, StyleWriters};
use std::collections::BTreeSet;
use std::fmt::Write as _;

/// Stylesheet numbers: `Normal` is 0, registered font and paragraph styles
/// follow in registry order, then the default headings the body uses
pub(super) fn number_styles(doc: &Document) -> Vec<(String, usize)> {
    let mut numbers = vec![("Normal".to_string(), 0)];
    let named = doc
        .styles
        .iter()
        .filter(|d| matches!(d.family(), StyleFamily::Font | StyleFamily::Paragraph))
        .map(|d| d.name.clone());
    for name in named.chain(default_headings(doc).into_iter().map(title_style_name)) {
        if !numbers.iter().any(|(n, _)| *n == name) {
            let next = numbers.len();
            numbers.push((name, next));
        }
    }
    numbers
}

/// Heading depths used in the document without a registered style
fn default_headings(doc: &Document) -> BTreeSet<u8> {
    let mut depths = BTreeSet::new();
    doc.for_each_element(|e| {
        if let Element::Title(title) = e {
            if !doc.styles.contains(&title.style_name()) {
                depths.insert(title.depth);
            }
        }
    });
    depths
}

/// Properties of a heading that has no registered style
pub(super) fn default_heading(depth: u8) -> (FontStyle, ParagraphStyle) {
    let mut font = FontStyle::new().bold();
    if depth == 0 {
        font.size = Some(20.0);
    }
    let paragraph = ParagraphStyle {
        keep_next: Some(true),
        outline_level: depth.checked_sub(1),
        ..Default::default()
    };
    (font, paragraph)
}

/// Character formatting words, e.g. `\f1\fs24\b`
pub(super) fn char_words(font: &FontStyle, res: &Resources) -> String {
    let mut w = String::new();
    if let Some(name) = &font.name {
        let _ = write!(w, "\\f{}", res.font_index(name));
    }
    if let Some(name) = &font.east_asia_name {
        let _ = write!(w, "\\af{}", res.font_index(name));
    }
    if let Some(half) = font.half_points() {
        let _ = write!(w, "\\fs{}", half);
    }
    toggle(&mut w, "\\b", font.bold);
    toggle(&mut w, "\\i", font.italic);
    if let Some(underline) = font.underline {
        w.push_str(match underline {
            Underline::Single => "\\ul",
            Underline::Double => "\\uldb",
            Underline::Thick => "\\ulth",
            Underline::Dotted => "\\uld",
            Underline::Dash => "\\uldash",
            Underline::Wave => "\\ulwave",
            Underline::Words => "\\ulw",
            Underline::None => "\\ulnone",
        });
    }
    toggle(&mut w, "\\strike", font.strike);
    if font.double_strike == Some(true) {
        w.push_str("\\striked1");
    }
    if let Some(align) = font.vertical_align {
        w.push_str(match align {
            VerticalAlign::Superscript => "\\super",
            VerticalAlign::Subscript => "\\sub",
            VerticalAlign::Baseline => "\\nosupersub",
        });
    }
    if let Some(index) = font.color.as_ref().and_then(|c| res.color_index(c)) {
        let _ = write!(w, "\\cf{}", index);
    }
    if let Some(index) = font
        .highlight
        .and_then(|h| res.color_index(&Color::Highlight(h)))
    {
        let _ = write!(w, "\\highlight{}", index);
    }
    if let Some(index) = font.shading.as_ref().and_then(|c| res.color_index(c)) {
        let _ = write!(w, "\\chcbpat{}", index);
    }
    toggle(&mut w, "\\scaps", font.small_caps);
    toggle(&mut w, "\\caps", font.all_caps);
    toggle(&mut w, "\\v", font.hidden);
    if let Some(spacing) = font.spacing {
        let _ = write!(w, "\\expndtw{}", spacing);
    }
    if let Some(kerning) = font.kerning {
        let _ = write!(w, "\\kerning{}", (kerning * 2.0).round() as i64);
    }
    if font.rtl == Some(true) {
        w.push_str("\\rtlch");
    }
    w
}

/// `\b` for true, `\b0` for an explicit false
fn toggle(w: &mut String, word: &str, value: Option<bool>) {
    match value {
        Some(true) => w.push_str(word),
        Some(false) => {
            w.push_str(word);
            w.push('0');
        }
        None => {}
    }
}

/// Paragraph formatting words, e.g. `\qc\sb120\sa120`
pub(super) fn paragraph_words(props: &ParagraphStyle, res: &Resources) -> String {
    let mut w = String::new();
    if let Some(alignment) = props.alignment {
        w.push_str(alignment.as_rtf());
    }
    if let Some(before) = props.space_before {
        let _ = write!(w, "\\sb{}", before);
    }
    if let Some(after) = props.space_after {
        let _ = write!(w, "\\sa{}", after);
    }
    match props.line_spacing {
        Some(LineSpacing::Multiple(m)) => {
            let _ = write!(w, "\\sl{}\\slmult1", (m * 240.0).round() as i64);
        }
        Some(LineSpacing::Exact(t)) => {
            let _ = write!(w, "\\sl-{}\\slmult0", t);
        }
        Some(LineSpacing::AtLeast(t)) => {
            let _ = write!(w, "\\sl{}\\slmult0", t);
        }
        None => {}
    }
    if let Some(left) = props.indent_left {
        let _ = write!(w, "\\li{}", left);
    }
    if let Some(right) = props.indent_right {
        let _ = write!(w, "\\ri{}", right);
    }
    if let Some(first) = props.indent_first_line {
        let _ = write!(w, "\\fi{}", first);
    }
    if props.keep_next == Some(true) {
        w.push_str("\\keepn");
    }
    if props.keep_lines == Some(true) {
        w.push_str("\\keep");
    }
    if props.page_break_before == Some(true) {
        w.push_str("\\pagebb");
    }
    match props.widow_control {
        Some(true) => w.push_str("\\widctlpar"),
        Some(false) => w.push_str("\\nowidctlpar"),
        None => {}
    }
    if let Some(level) = props.outline_level {
        let _ = write!(w, "\\outlinelevel{}", level);
    }
    if let Some(index) = props.shading.as_ref().and_then(|c| res.color_index(c)) {
        let _ = write!(w, "\\cbpat{}", index);
    }
    if props.bidi == Some(true) {
        w.push_str("\\rtlpar");
    }
    for tab in props.tabs.iter().flatten() {
        if tab.kind == TabKind::Clear {
            continue;
        }
        w.push_str(match tab.kind {
            TabKind::Center => "\\tqc",
            TabKind::Right => "\\tqr",
            TabKind::Decimal => "\\tqdec",
            _ => "",
        });
        w.push_str(match tab.leader {
            TabLeader::Dot => "\\tldot",
            TabLeader::Hyphen => "\\tlhyph",
            TabLeader::Underscore => "\\tlul",
            TabLeader::Heavy => "\\tlth",
            TabLeader::MiddleDot => "\\tlmdot",
            TabLeader::None => "",
        });
        let word = if tab.kind == TabKind::Bar { "\\tb" } else { "\\tx" };
        let _ = write!(w, "{}{}", word, tab.position);
    }
    w
}

impl RtfWriter<'_> {
    /// Stylesheet number of a named style
    pub(super) fn style_number(&self, name: &str) -> Option<usize> {
        self.style_numbers
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, number)| *number)
    }

    /// `\sbasedonN\snextN` for a definition
    fn links(&self, def: &StyleDefinition) -> String {
        let mut w = String::new();
        if let Some(parent) = def.based_on.as_deref().and_then(|p| self.style_number(p)) {
            let _ = write!(w, "\\sbasedon{}", parent);
        }
        if let Some(next) = def.next.as_deref().and_then(|n| self.style_number(n)) {
            let _ = write!(w, "\\snext{}", next);
        }
        w
    }
}

impl StyleWriters for RtfWriter<'_> {
    const BACKEND: &'static str = "RTF";

    fn style_writer(family: StyleFamily) -> Option<StyleWriterFn<Self>> {
        let writer: StyleWriterFn<Self> = match family {
            StyleFamily::Font => write_font_style as StyleWriterFn<Self>,
            StyleFamily::Paragraph => write_paragraph_style as StyleWriterFn<Self>,
            StyleFamily::Table | StyleFamily::Section | StyleFamily::Numbering => return None,
        };
        Some(writer)
    }
}

fn write_paragraph_style(w: &mut RtfWriter<'_>, def: &StyleDefinition) -> Result<()> {
    let Style::Paragraph(props) = &def.style else {
        return Ok(());
    };
    let Some(number) = w.style_number(&def.name) else {
        return Ok(());
    };
    let entry = format!(
        "{{\\s{}{}{} {};}}\n",
        number,
        w.links(def),
        paragraph_words(props, &w.res),
        escape(&def.name)
    );
    w.raw(&entry)
}

/// A font style with a paragraph half is a paragraph style in RTF; a
/// plain one is an additive character style
fn write_font_style(w: &mut RtfWriter<'_>, def: &StyleDefinition) -> Result<()> {
    let Style::Font(font) = &def.style else {
        return Ok(());
    };
    let Some(number) = w.style_number(&def.name) else {
        return Ok(());
    };
    let chars = char_words(&font.font_only(), &w.res);
    let entry = match font.paragraph_part() {
        Some(paragraph) => format!(
            "{{\\s{}{}{}{} {};}}\n",
            number,
            w.links(def),
            paragraph_words(paragraph, &w.res),
            chars,
            escape(&def.name)
        ),
        None => format!(
            "{{\\*\\cs{}\\additive{}{} {};}}\n",
            number,
            w.links(def),
            chars,
            escape(&def.name)
        ),
    };
    w.raw(&entry)
}

/// `{\stylesheet}` and the document default character formatting
pub(super) fn write_stylesheet(w: &mut RtfWriter<'_>) -> Result<()> {
    let doc = w.doc;
    let default_font = doc.settings.default_font();
    let defaults = char_words(&default_font, &w.res);
    w.raw(&format!("{{\\*\\defchp{}}}\n", defaults))?;

    w.raw("{\\stylesheet\n")?;
    let normal = format!(
        "{{\\s0{}{} Normal;}}\n",
        paragraph_words(&doc.settings.default_paragraph, &w.res),
        defaults
    );
    w.raw(&normal)?;
    for def in doc.styles.iter() {
        dispatch::write_style(w, def)?;
    }
    for depth in default_headings(doc) {
        let name = title_style_name(depth);
        let Some(number) = w.style_number(&name) else {
            continue;
        };
        let (font, paragraph) = default_heading(depth);
        let entry = format!(
            "{{\\s{}\\sbasedon0\\snext0{}{} {};}}\n",
            number,
            paragraph_words(&paragraph, &w.res),
            char_words(&font, &w.res),
            name
        );
        w.raw(&entry)?;
    }
    w.raw("}\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::style::{Alignment, SectionStyle, TabStop};

    #[test]
    fn test_char_words() {
        let mut doc = Document::new();
        let red = Color::hex("FF0000").unwrap();
        doc.add_section(SectionStyle::default());
        doc.styles.define(
            "Red",
            FontStyle::new().with_color(red.clone()),
            None,
            None,
        );
        let res = Resources::collect(&doc).unwrap();

        let font = FontStyle {
            bold: Some(true),
            italic: Some(false),
            size: Some(12.0),
            underline: Some(Underline::Double),
            color: Some(red),
            ..Default::default()
        };
        assert_eq!(char_words(&font, &res), "\\fs24\\b\\i0\\uldb\\cf1");
        assert_eq!(char_words(&FontStyle::new(), &res), "");
    }

    #[test]
    fn test_paragraph_words() {
        let res = Resources::default();
        let props = ParagraphStyle {
            alignment: Some(Alignment::Center),
            space_before: Some(120),
            line_spacing: Some(LineSpacing::Multiple(1.5)),
            keep_next: Some(true),
            tabs: Some(vec![TabStop {
                kind: TabKind::Right,
                position: 9000,
                leader: TabLeader::Dot,
            }]),
            ..Default::default()
        };
        assert_eq!(
            paragraph_words(&props, &res),
            "\\qc\\sb120\\sl360\\slmult1\\keepn\\tqr\\tldot\\tx9000"
        );
    }

    #[test]
    fn test_style_numbers() {
        let mut doc = Document::new();
        doc.styles.define("Quote", ParagraphStyle::new(), None, None);
        doc.styles.define("Table Grid", crate::style::TableStyle::new(), None, None);
        doc.add_section(SectionStyle::default()).add_title("Intro", 1);
        assert_eq!(
            number_styles(&doc),
            vec![
                ("Normal".to_string(), 0),
                ("Quote".to_string(), 1),
                ("Heading1".to_string(), 2)
            ]
        );
    }
}

//! Rich Text Format backend
//!
//! RTF is a single control-word stream. Styled runs refer to the font and
//! color tables by index, so [`Resources`] collects both tables in a first
//! pass before the header is written. Every paragraph and run carries its
//! fully resolved properties; the stylesheet only names them.

mod elements;
mod resources;
mod styles;

use crate::error::Result;
use crate::model::{format_w3c_date, CustomValue, Document, HeaderFooterKind, Section};
use crate::style::{FontStyle, Orientation, SectionStyle};
use crate::writer::dispatch;
use crate::writer::WriterOptions;
use crate::xml::OutputBuffer;
use chrono::{DateTime, Datelike, Timelike, Utc};
use std::io::Write;

pub(crate) use resources::Resources;

/// Serialize `doc` as an RTF stream
pub fn write(doc: &Document, options: &WriterOptions) -> Result<Vec<u8>> {
    let mut writer = RtfWriter::new(doc, options)?;
    writer.write_document()?;
    writer.out.into_bytes()
}

/// Writer context for one document
pub struct RtfWriter<'a> {
    doc: &'a Document,
    out: OutputBuffer,
    res: Resources,
    /// Stylesheet numbers (`\s`, `\cs`) by style name
    style_numbers: Vec<(String, usize)>,
    /// Control words of the previous paragraph, re-emitted only on change
    last_paragraph: Option<String>,
    in_paragraph: bool,
    in_table: bool,
    /// The next paragraph end closes the current table cell
    cell_end_pending: bool,
    cell_closed: bool,
    /// Character properties applied beneath inline ones (table first row)
    region_font: Option<FontStyle>,
    /// Item counters per list and level
    list_counters: Vec<(String, [u32; 9])>,
}

impl<'a> RtfWriter<'a> {
    fn new(doc: &'a Document, options: &WriterOptions) -> Result<Self> {
        Ok(RtfWriter {
            doc,
            out: options.buffer(),
            res: Resources::collect(doc)?,
            style_numbers: styles::number_styles(doc),
            last_paragraph: None,
            in_paragraph: false,
            in_table: false,
            cell_end_pending: false,
            cell_closed: false,
            region_font: None,
            list_counters: Vec::new(),
        })
    }

    fn raw(&mut self, s: &str) -> Result<()> {
        self.out.write_all(s.as_bytes())?;
        Ok(())
    }

    /// Escaped text
    fn text(&mut self, text: &str) -> Result<()> {
        let escaped = escape(text);
        self.raw(&escaped)
    }

    fn write_document(&mut self) -> Result<()> {
        let doc = self.doc;
        self.raw("{\\rtf1\\ansi\\ansicpg1252\\deff0\\uc1\n")?;
        self.write_font_table()?;
        self.write_color_table()?;
        styles::write_stylesheet(self)?;
        self.write_info()?;

        let first = doc.sections.first().map(|s| s.style.clone()).unwrap_or_default();
        let mut words = format!(
            "\\deftab720\\paperw{}\\paperh{}\\margl{}\\margr{}\\margt{}\\margb{}",
            first.page_width(),
            first.page_height(),
            first.margin_left(),
            first.margin_right(),
            first.margin_top(),
            first.margin_bottom()
        );
        if first.orientation() == Orientation::Landscape {
            words.push_str("\\landscape");
        }
        if doc.settings.even_and_odd_headers {
            words.push_str("\\facingp");
        }
        self.raw(&words)?;
        self.raw("\n")?;

        for (i, section) in doc.sections.iter().enumerate() {
            if i > 0 {
                self.raw("\\sect")?;
            }
            let words = section_words(section);
            self.raw(&words)?;
            self.raw("\n")?;
            self.write_headers_footers(section)?;
            dispatch::write_elements(self, &section.elements)?;
        }

        self.raw("}")
    }

    fn write_font_table(&mut self) -> Result<()> {
        let mut table = String::from("{\\fonttbl");
        for (i, name) in self.res.fonts().iter().enumerate() {
            table.push_str(&format!("{{\\f{}\\fnil\\fcharset0 {};}}", i, escape(name)));
        }
        table.push_str("}\n");
        self.raw(&table)
    }

    fn write_color_table(&mut self) -> Result<()> {
        // The empty first entry is the "auto" color
        let mut table = String::from("{\\colortbl;");
        for (r, g, b) in self.res.colors() {
            table.push_str(&format!("\\red{}\\green{}\\blue{};", r, g, b));
        }
        table.push_str("}\n");
        self.raw(&table)
    }

    /// `{\info}` and `{\*\userprops}`; only fields the model carries
    fn write_info(&mut self) -> Result<()> {
        let doc = self.doc;
        let info = &doc.info;
        let mut group = String::from("{\\info");
        let fields = [
            ("title", &info.title),
            ("subject", &info.subject),
            ("author", &info.creator),
            ("keywords", &info.keywords),
            ("doccomm", &info.description),
            ("operator", &info.last_modified_by),
            ("category", &info.category),
            ("company", &info.company),
            ("manager", &info.manager),
        ];
        for (word, value) in fields {
            if let Some(value) = value {
                group.push_str(&format!("{{\\{} {}}}", word, escape(value)));
            }
        }
        for (word, date) in [("creatim", &info.created), ("revtim", &info.modified)] {
            if let Some(date) = date {
                group.push_str(&format!("{{\\{}{}}}", word, date_words(date)));
            }
        }
        group.push_str("}\n");

        if !info.custom.is_empty() {
            group.push_str("{\\*\\userprops");
            for (name, value) in &info.custom {
                let (kind, shown) = match value {
                    CustomValue::Integer(i) => (3, i.to_string()),
                    CustomValue::Number(n) => (5, n.to_string()),
                    CustomValue::Bool(b) => (11, if *b { "1" } else { "0" }.to_string()),
                    CustomValue::Date(d) => (64, format_w3c_date(d)),
                    CustomValue::Text(s) => (30, s.clone()),
                };
                group.push_str(&format!(
                    "{{\\propname {}}}\\proptype{}{{\\staticval {}}}",
                    escape(name),
                    kind,
                    escape(&shown)
                ));
            }
            group.push_str("}\n");
        }
        self.raw(&group)
    }

    fn write_headers_footers(&mut self, section: &Section) -> Result<()> {
        let facing = self.doc.settings.even_and_odd_headers;
        for header in [true, false] {
            let list = if header {
                &section.headers
            } else {
                &section.footers
            };
            for hf in list {
                let suffix = match hf.kind {
                    HeaderFooterKind::Default if facing => "r",
                    HeaderFooterKind::Default => "",
                    HeaderFooterKind::First => "f",
                    HeaderFooterKind::Even => "l",
                };
                let destination = if header { "header" } else { "footer" };
                self.raw(&format!("{{\\{}{} ", destination, suffix))?;
                self.group(|w| dispatch::write_elements(w, &hf.elements))?;
                self.raw("}\n")?;
            }
        }
        Ok(())
    }

    /// Run `f` inside a destination group: paragraph state starts fresh and
    /// is restored when the group closes
    fn group<F>(&mut self, f: F) -> Result<()>
    where
        F: FnOnce(&mut Self) -> Result<()>,
    {
        let last = self.last_paragraph.take();
        let in_paragraph = std::mem::replace(&mut self.in_paragraph, false);
        let in_table = std::mem::replace(&mut self.in_table, false);
        let cell_end = std::mem::replace(&mut self.cell_end_pending, false);
        let cell_closed = std::mem::replace(&mut self.cell_closed, false);
        let region = self.region_font.take();

        let result = f(self);

        self.last_paragraph = last;
        self.in_paragraph = in_paragraph;
        self.in_table = in_table;
        self.cell_end_pending = cell_end;
        self.cell_closed = cell_closed;
        self.region_font = region;
        result
    }
}

/// `\sectd` and the page layout of one section
fn section_words(section: &Section) -> String {
    let style: &SectionStyle = &section.style;
    let mut words = format!(
        "\\sectd\\pgwsxn{}\\pghsxn{}\\marglsxn{}\\margrsxn{}\\margtsxn{}\\margbsxn{}\\headery{}\\footery{}",
        style.page_width(),
        style.page_height(),
        style.margin_left(),
        style.margin_right(),
        style.margin_top(),
        style.margin_bottom(),
        style.header_distance(),
        style.footer_distance()
    );
    if style.orientation() == Orientation::Landscape {
        words.push_str("\\lndscpsxn");
    }
    if style.gutter() > 0 {
        words.push_str(&format!("\\guttersxn{}", style.gutter()));
    }
    if style.columns() > 1 {
        words.push_str(&format!("\\cols{}\\colsx{}", style.columns(), style.column_spacing()));
    }
    if let Some(start) = style.page_number_start {
        words.push_str(&format!("\\pgnstarts{}\\pgnrestart", start));
    }
    words.push_str(style.break_type().as_rtf());
    let has_first = section
        .headers
        .iter()
        .chain(section.footers.iter())
        .any(|hf| hf.kind == HeaderFooterKind::First);
    if style.title_page == Some(true) || has_first {
        words.push_str("\\titlepg");
    }
    words
}

/// `\yr2024\mo3\dy1\hr9\min30`
fn date_words(date: &DateTime<Utc>) -> String {
    format!(
        "\\yr{}\\mo{}\\dy{}\\hr{}\\min{}",
        date.year(),
        date.month(),
        date.day(),
        date.hour(),
        date.minute()
    )
}

/// Escape text for the RTF stream. Characters outside ASCII become `\u`
/// with one `?` fallback per UTF-16 unit (`\uc1`).
pub(crate) fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '{' => out.push_str("\\{"),
            '}' => out.push_str("\\}"),
            '\n' => out.push_str("\\line "),
            '\t' => out.push_str("\\tab "),
            c if c.is_ascii_control() => {}
            c if c.is_ascii() => out.push(c),
            c => {
                let mut units = [0u16; 2];
                for unit in c.encode_utf16(&mut units) {
                    out.push_str(&format!("\\u{}?", *unit as i16));
                }
            }
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Text;
    use chrono::TimeZone;

    pub(super) fn rtf_of(doc: &Document) -> String {
        String::from_utf8(write(doc, &WriterOptions::default()).unwrap()).unwrap()
    }

    #[test]
    fn test_escape() {
        assert_eq!(escape("a{b}\\c"), "a\\{b\\}\\\\c");
        assert_eq!(escape("x\ty\nz"), "x\\tab y\\line z");
        assert_eq!(escape("é"), "\\u233?");
        assert_eq!(escape("中"), "\\u20013?");
        // Outside the BMP: a surrogate pair, each unit signed
        assert_eq!(escape("😀"), "\\u-10179?\\u-8704?");
    }

    #[test]
    fn test_header_tables_and_info() {
        let mut doc = Document::new();
        doc.info.title = Some("Plan".into());
        doc.info.created = Some(Utc.with_ymd_and_hms(2024, 3, 1, 9, 30, 0).unwrap());
        doc.add_section(SectionStyle::default()).add_text("Hello");
        let rtf = rtf_of(&doc);

        assert!(rtf.starts_with("{\\rtf1\\ansi"));
        assert!(rtf.contains("{\\fonttbl{\\f0\\fnil\\fcharset0 Arial;}}"));
        assert!(rtf.contains("{\\colortbl;}"));
        assert!(rtf.contains("{\\info{\\title Plan}{\\creatim\\yr2024\\mo3\\dy1\\hr9\\min30}}"));
        assert!(rtf.contains("Hello\\par"));
        assert!(rtf.ends_with('}'));
    }

    #[test]
    fn test_sections_and_headers() {
        let mut doc = Document::new();
        doc.add_section(SectionStyle::default()).add_text("one");
        let section = doc.add_section(SectionStyle::landscape());
        section
            .header_mut(HeaderFooterKind::First)
            .push(Text::new("Cover"));
        section.add_text("two");
        let rtf = rtf_of(&doc);

        assert!(rtf.contains("\\sect\\sectd\\pgwsxn16838\\pghsxn11906"));
        assert!(rtf.contains("\\lndscpsxn"));
        assert!(rtf.contains("\\titlepg"));
        assert!(rtf.contains("{\\headerf \\pard"));
        assert!(rtf.contains("Cover\\par"));
    }

    #[test]
    fn test_custom_properties() {
        let mut doc = Document::new();
        doc.info.set_custom("Approved", CustomValue::Bool(true));
        assert!(rtf_of(&doc)
            .contains("{\\*\\userprops{\\propname Approved}\\proptype11{\\staticval 1}}"));
    }
}

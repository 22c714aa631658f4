//! Element serializers for the RTF body, headers, footers and notes

use super::styles::{char_words, default_heading, paragraph_words};
use super::{escape, RtfWriter};
use crate::color::Color;
use crate::error::Result;
use crate::image::{dimensions, ImageType};
use crate::model::{Cell, Element, ElementKind, Image, NoteReference, Row, Table};
use crate::style::{
    Borders, FontStyle, NumberingLevel, NumberingStyle, Overlay, ParagraphStyle, Style, StyleRef,
    TableAlignment, TableStyle, VerticalMerge, VerticalPosition,
};
use crate::writer::dispatch::{self, ElementWriterFn, ElementWriters};
use crate::writer::resolve_combined;
use std::fmt::Write as _;

/// Cell width when a cell has no absolute width
const DEFAULT_CELL_WIDTH: i64 = 720;

const EMU_PER_TWIP: i64 = 635;

impl ElementWriters for RtfWriter<'_> {
    const BACKEND: &'static str = "RTF";

    fn element_writer(kind: ElementKind) -> Option<ElementWriterFn<Self>> {
        let writer: ElementWriterFn<Self> = match kind {
            ElementKind::Text => write_text as ElementWriterFn<Self>,
            ElementKind::TextRun => write_text_run as ElementWriterFn<Self>,
            ElementKind::Table => write_table as ElementWriterFn<Self>,
            ElementKind::Image => write_image as ElementWriterFn<Self>,
            ElementKind::Field => write_field as ElementWriterFn<Self>,
            ElementKind::Link => write_link as ElementWriterFn<Self>,
            ElementKind::Title => write_title as ElementWriterFn<Self>,
            ElementKind::ListItem => write_list_item as ElementWriterFn<Self>,
            ElementKind::PageBreak => write_page_break as ElementWriterFn<Self>,
            ElementKind::TextBreak => write_text_break as ElementWriterFn<Self>,
            ElementKind::Bookmark => write_bookmark as ElementWriterFn<Self>,
            ElementKind::Footnote => write_footnote as ElementWriterFn<Self>,
            ElementKind::Endnote => write_endnote as ElementWriterFn<Self>,
            ElementKind::Tracked => write_tracked as ElementWriterFn<Self>,
            ElementKind::Toc => return None,
        };
        Some(writer)
    }
}

fn write_text(w: &mut RtfWriter<'_>, element: &Element) -> Result<()> {
    let Element::Text(text) = element else {
        return Ok(());
    };
    let font = w.doc.styles.resolve_opt(text.font.as_ref())?;
    let cs = w.char_style(text.font.as_ref());
    if w.in_paragraph {
        return w.run(cs, &font, &text.text);
    }
    let (style, props) = w.paragraph_props(text.paragraph.as_ref())?;
    w.paragraph_with(style, &props, |w| w.run(cs, &font, &text.text))
}

fn write_text_run(w: &mut RtfWriter<'_>, element: &Element) -> Result<()> {
    let Element::TextRun(run) = element else {
        return Ok(());
    };
    if w.in_paragraph {
        return dispatch::write_elements(w, &run.elements);
    }
    let (style, props) = w.paragraph_props(run.paragraph.as_ref())?;
    w.paragraph_with(style, &props, |w| dispatch::write_elements(w, &run.elements))
}

fn write_table(w: &mut RtfWriter<'_>, element: &Element) -> Result<()> {
    let Element::Table(table) = element else {
        return Ok(());
    };
    if w.in_table {
        log::warn!("rtf: nested table dropped ({} rows)", table.rows.len());
        return Ok(());
    }
    if w.in_paragraph {
        log::warn!("rtf: table inside a paragraph is not supported, skipped");
        return Ok(());
    }
    w.table(table)
}

fn write_image(w: &mut RtfWriter<'_>, element: &Element) -> Result<()> {
    let Element::Image(image) = element else {
        return Ok(());
    };
    if w.in_paragraph {
        return w.picture(image);
    }
    let mut props = w.doc.settings.default_paragraph.clone();
    props.alignment = image.style.alignment.or(props.alignment);
    w.paragraph_with(None, &props, |w| w.picture(image))
}

fn write_field(w: &mut RtfWriter<'_>, element: &Element) -> Result<()> {
    let Element::Field(field) = element else {
        return Ok(());
    };
    let shown = field.text.clone().unwrap_or_default();
    let instruction = field.instruction();
    w.inline(|w| w.field(&instruction, None, &shown))
}

fn write_link(w: &mut RtfWriter<'_>, element: &Element) -> Result<()> {
    let Element::Link(link) = element else {
        return Ok(());
    };
    let instruction = if link.internal {
        format!("HYPERLINK \\l \"{}\"", link.target)
    } else {
        format!("HYPERLINK \"{}\"", link.target)
    };
    let mut font = w.doc.styles.resolve_opt(link.font.as_ref())?;
    if font.is_empty() {
        font.underline = Some(crate::style::Underline::Single);
    }
    w.inline(|w| w.field(&instruction, Some(&font), &link.text))
}

fn write_title(w: &mut RtfWriter<'_>, element: &Element) -> Result<()> {
    let Element::Title(title) = element else {
        return Ok(());
    };
    let doc = w.doc;
    let name = title.style_name();
    let (mut font, mut paragraph) = if doc.styles.contains(&name) {
        resolve_combined(&doc.styles, Some(&StyleRef::<FontStyle>::named(name.clone())))?
    } else {
        default_heading(title.depth)
    };
    let (top_font, top_paragraph) = resolve_combined(&doc.styles, title.style.as_ref())?;
    font.overlay(&top_font);
    if w.in_paragraph {
        return w.run(None, &font, &title.text);
    }

    paragraph.overlay(&top_paragraph);
    if title.depth > 0 && paragraph.outline_level.is_none() {
        paragraph.outline_level = Some(title.depth - 1);
    }
    let mut props = doc.settings.default_paragraph.clone();
    props.overlay(&paragraph);
    let style = w.style_number(&name);
    w.paragraph_with(style, &props, |w| w.run(None, &font, &title.text))
}

fn write_list_item(w: &mut RtfWriter<'_>, element: &Element) -> Result<()> {
    let Element::ListItem(item) = element else {
        return Ok(());
    };
    if w.in_paragraph {
        return dispatch::write_elements(w, &item.elements);
    }

    let doc = w.doc;
    let numbering = match item.numbering.as_deref().map(|n| (n, doc.styles.get(n))) {
        Some((_, Some(def))) => match &def.style {
            Style::Numbering(numbering) => numbering.clone(),
            _ => NumberingStyle::bullet(),
        },
        Some((name, None)) => {
            log::warn!("rtf: numbering style '{}' is not defined, using bullets", name);
            NumberingStyle::bullet()
        }
        None => NumberingStyle::bullet(),
    };
    let depth = item.depth.min(8);
    let key = item.numbering.clone().unwrap_or_default();
    let label = w.list_label(&key, &numbering, depth);
    let level = numbering
        .level(depth)
        .cloned()
        .unwrap_or_else(|| NumberingLevel::new(depth));

    let (style, mut props) = w.paragraph_props(item.paragraph.as_ref())?;
    let from_item = doc.styles.resolve_opt(item.paragraph.as_ref())?;
    if from_item.indent_left.is_none() {
        props.indent_left = level.indent_left;
    }
    if from_item.indent_first_line.is_none() {
        props.indent_first_line = level.hanging.map(|h| -h);
    }
    let marker = match &level.font {
        Some(font) => char_words(font, &w.res),
        None => String::new(),
    };
    w.paragraph_with(style, &props, |w| {
        w.raw(&format!("{{\\listtext{} {}\\tab}}", marker, escape(&label)))?;
        dispatch::write_elements(w, &item.elements)
    })
}

fn write_page_break(w: &mut RtfWriter<'_>, _: &Element) -> Result<()> {
    if w.in_paragraph {
        return w.raw("\\page ");
    }
    w.raw("\\page\n")
}

fn write_text_break(w: &mut RtfWriter<'_>, _: &Element) -> Result<()> {
    if w.in_paragraph {
        return w.raw("\\line ");
    }
    let props = w.doc.settings.default_paragraph.clone();
    w.paragraph_with(None, &props, |_| Ok(()))
}

fn write_bookmark(w: &mut RtfWriter<'_>, element: &Element) -> Result<()> {
    let Element::Bookmark(bookmark) = element else {
        return Ok(());
    };
    let name = escape(&bookmark.name);
    w.inline(|w| {
        w.raw(&format!(
            "{{\\*\\bkmkstart {}}}{{\\*\\bkmkend {}}}",
            name, name
        ))
    })
}

fn write_footnote(w: &mut RtfWriter<'_>, element: &Element) -> Result<()> {
    let Element::Footnote(reference) = element else {
        return Ok(());
    };
    w.inline(|w| w.note(false, reference))
}

fn write_endnote(w: &mut RtfWriter<'_>, element: &Element) -> Result<()> {
    let Element::Endnote(reference) = element else {
        return Ok(());
    };
    w.inline(|w| w.note(true, reference))
}

/// Revision marks are not carried over; the element is written as is
fn write_tracked(w: &mut RtfWriter<'_>, element: &Element) -> Result<()> {
    let Element::Tracked(tracked) = element else {
        return Ok(());
    };
    dispatch::write_element(w, &tracked.element).map(|_| ())
}

impl RtfWriter<'_> {
    /// Stylesheet number and resolved properties of a paragraph style
    /// reference, over the document defaults
    fn paragraph_props(
        &self,
        style: Option<&StyleRef<ParagraphStyle>>,
    ) -> Result<(Option<usize>, ParagraphStyle)> {
        let mut props = self.doc.settings.default_paragraph.clone();
        props.overlay(&self.doc.styles.resolve_opt(style)?);
        let number = style
            .and_then(|s| s.name.as_deref())
            .and_then(|name| self.style_number(name));
        Ok((number, props))
    }

    /// `\cs` number of a plain character style
    fn char_style(&self, font: Option<&StyleRef<FontStyle>>) -> Option<usize> {
        let name = font.and_then(|f| f.name.as_deref())?;
        match self.doc.styles.get(name).map(|def| &def.style) {
            Some(Style::Font(f)) if f.paragraph_part().is_none() => self.style_number(name),
            _ => None,
        }
    }

    /// Paragraph. The `\pard` group is written only when it differs from
    /// the previous paragraph's.
    fn paragraph_with<F>(
        &mut self,
        style: Option<usize>,
        props: &ParagraphStyle,
        content: F,
    ) -> Result<()>
    where
        F: FnOnce(&mut Self) -> Result<()>,
    {
        let mut words = String::from("\\pard");
        if self.in_table {
            words.push_str("\\intbl");
        }
        if let Some(number) = style {
            let _ = write!(words, "\\s{}", number);
        }
        words.push_str(&paragraph_words(props, &self.res));
        if self.last_paragraph.as_deref() != Some(words.as_str()) {
            self.raw(&words)?;
            self.raw(" ")?;
            self.last_paragraph = Some(words);
        }

        let outer = std::mem::replace(&mut self.in_paragraph, true);
        let result = content(self);
        self.in_paragraph = outer;
        result?;

        self.end_paragraph()
    }

    /// `\par`, or `\cell` for the last paragraph of a table cell
    fn end_paragraph(&mut self) -> Result<()> {
        if self.cell_end_pending {
            self.cell_end_pending = false;
            self.cell_closed = true;
            return self.raw("\\cell\n");
        }
        self.raw("\\par\n")
    }

    /// Inline content; at block level it gets a paragraph of its own
    fn inline<F>(&mut self, content: F) -> Result<()>
    where
        F: FnOnce(&mut Self) -> Result<()>,
    {
        if self.in_paragraph {
            return content(self);
        }
        let props = self.doc.settings.default_paragraph.clone();
        self.paragraph_with(None, &props, content)
    }

    /// Text in a group carrying its character formatting
    fn run(&mut self, cs: Option<usize>, font: &FontStyle, text: &str) -> Result<()> {
        let font = match &self.region_font {
            Some(region) => {
                let mut merged = region.clone();
                merged.overlay(font);
                merged
            }
            None => font.clone(),
        };
        let mut words = String::new();
        if let Some(number) = cs {
            let _ = write!(words, "\\cs{}", number);
        }
        words.push_str(&char_words(&font.font_only(), &self.res));
        if words.is_empty() {
            return self.text(text);
        }
        self.raw(&format!("{{{} ", words))?;
        self.text(text)?;
        self.raw("}")
    }

    /// `{\field}` with an instruction and a cached result
    fn field(&mut self, instruction: &str, font: Option<&FontStyle>, shown: &str) -> Result<()> {
        self.raw(&format!("{{\\field{{\\*\\fldinst {}}}{{\\fldrslt ", escape(instruction)))?;
        match font {
            Some(font) => self.run(None, font, shown)?,
            None => self.text(shown)?,
        }
        self.raw("}}")
    }

    fn note(&mut self, endnote: bool, reference: &NoteReference) -> Result<()> {
        let doc = self.doc;
        let notes = if endnote { &doc.endnotes } else { &doc.footnotes };
        let Some(note) = notes.get(reference.id) else {
            log::warn!("rtf: note {} is not defined, skipped", reference.id);
            return Ok(());
        };
        let alt = if endnote { "\\ftnalt" } else { "" };
        self.raw(&format!("{{\\super\\chftn}}{{\\footnote{}", alt))?;
        self.group(|w| {
            w.raw("\\pard\\plain {\\super\\chftn} ")?;
            w.last_paragraph = Some("\\pard".to_string());
            dispatch::write_elements(w, &note.elements)
        })?;
        self.raw("}")
    }

    /// PNG and JPEG data as a hex `\pict` group
    fn picture(&mut self, image: &Image) -> Result<()> {
        let (data, kind) = image.load()?;
        let blip = match kind {
            ImageType::Png => "\\pngblip",
            ImageType::Jpeg => "\\jpegblip",
            other => {
                log::warn!("rtf: {:?} images are not supported, skipped", other);
                return Ok(());
            }
        };
        let natural = dimensions(&data);
        let (cx, cy) = image.style.extent_emu_for(natural);
        let (px, py) = natural.unwrap_or_else(|| {
            let px = |emu: i64| crate::units::emu_to_pixel(emu as f64).round() as u32;
            (px(cx), px(cy))
        });

        let mut group = format!(
            "{{\\pict{}\\picw{}\\pich{}\\picwgoal{}\\pichgoal{}\n",
            blip,
            px,
            py,
            cx / EMU_PER_TWIP,
            cy / EMU_PER_TWIP
        );
        for chunk in data.chunks(64) {
            for byte in chunk {
                let _ = write!(group, "{:02x}", byte);
            }
            group.push('\n');
        }
        group.push('}');
        self.raw(&group)
    }

    /// Label of the next item of a list, advancing its counters
    fn list_label(&mut self, key: &str, numbering: &NumberingStyle, depth: u8) -> String {
        let index = match self.list_counters.iter().position(|(k, _)| k == key) {
            Some(index) => index,
            None => {
                self.list_counters.push((key.to_string(), [0; 9]));
                self.list_counters.len() - 1
            }
        };
        let start = |l: u8| numbering.level(l).map_or(1, |level| level.start);
        let counters = &mut self.list_counters[index].1;
        let d = usize::from(depth);
        counters[d] = if counters[d] == 0 {
            start(depth)
        } else {
            counters[d] + 1
        };
        for deeper in counters.iter_mut().skip(d + 1) {
            *deeper = 0;
        }
        let counters = *counters;

        let Some(level) = numbering.level(depth) else {
            return "\u{2022}".to_string();
        };
        if level.format.is_bullet() {
            return level.label(counters[d]);
        }
        let mut label = level.text.clone();
        for l in 0..=depth {
            let value = match counters[usize::from(l)] {
                0 => start(l),
                n => n,
            };
            let rendered = match numbering.level(l) {
                Some(other) => other.format.render(value),
                None => value.to_string(),
            };
            label = label.replace(&format!("%{}", l + 1), &rendered);
        }
        label
    }

    fn table(&mut self, table: &Table) -> Result<()> {
        let doc = self.doc;
        let style = doc.styles.resolve_opt(table.style.as_ref())?;
        let rows = table.rows.len();
        let columns = table.column_count();

        self.in_table = true;
        let result = table
            .rows
            .iter()
            .enumerate()
            .try_for_each(|(index, row)| self.row(&style, row, index, rows, columns));
        self.in_table = false;
        self.region_font = None;
        self.last_paragraph = None;
        result
    }

    /// Row definition (`\trowd` through the last `\cellx`), the cells,
    /// then `\row`
    fn row(
        &mut self,
        style: &TableStyle,
        row: &Row,
        index: usize,
        rows: usize,
        columns: usize,
    ) -> Result<()> {
        let region = if index == 0 {
            style.first_row.as_ref()
        } else {
            None
        };
        let indent = i64::from(style.indent.unwrap_or(0));

        let mut words = String::from("\\trowd\\trgaph108");
        if indent != 0 {
            let _ = write!(words, "\\trleft{}", indent);
        }
        match style.alignment {
            Some(TableAlignment::Center) => words.push_str("\\trqc"),
            Some(TableAlignment::Right) => words.push_str("\\trqr"),
            _ => {}
        }
        let row_style = row.style.clone().unwrap_or_default();
        if let Some(height) = row.height {
            if row_style.exact_height == Some(true) {
                let _ = write!(words, "\\trrh-{}", height);
            } else {
                let _ = write!(words, "\\trrh{}", height);
            }
        }
        if row_style.header == Some(true) {
            words.push_str("\\trhdr");
        }
        if row_style.cant_split == Some(true) {
            words.push_str("\\trkeep");
        }

        let bg = region
            .and_then(|r| r.bg_color.as_ref())
            .or(style.bg_color.as_ref());
        let borders = region
            .and_then(|r| r.borders.as_ref())
            .or(style.borders.as_ref());
        let mut right = indent;
        let mut column = 0;
        for cell in &row.cells {
            let span = cell.span() as usize;
            let fallback =
                borders.map(|b| b.for_cell(index, rows, column, column + span - 1, columns));
            words.push_str(&self.cell_words(cell, bg, fallback));
            right += cell.width.twips_rounded().unwrap_or(DEFAULT_CELL_WIDTH);
            let _ = write!(words, "\\cellx{}", right);
            column += span;
        }
        words.push('\n');
        self.raw(&words)?;

        self.region_font = region.and_then(|r| r.font.clone());
        for cell in &row.cells {
            self.cell(cell)?;
        }
        self.region_font = None;
        self.last_paragraph = None;
        self.raw("\\row\n")
    }

    fn cell_words(&self, cell: &Cell, bg: Option<&Color>, fallback: Option<Borders>) -> String {
        let style = cell.style.clone().unwrap_or_default();
        let mut words = String::new();
        if let Some(v_align) = style.v_align {
            words.push_str(match v_align {
                VerticalPosition::Top => "\\clvertalt",
                VerticalPosition::Center => "\\clvertalc",
                VerticalPosition::Bottom => "\\clvertalb",
            });
        }
        match style.v_merge {
            Some(VerticalMerge::Restart) => words.push_str("\\clvmgf"),
            Some(VerticalMerge::Continue) => words.push_str("\\clvmrg"),
            None => {}
        }
        if style.no_wrap == Some(true) {
            words.push_str("\\clNoWrap");
        }
        let borders = style.borders.clone().or(fallback).unwrap_or_default();
        let edges = [
            ("\\clbrdrt", &borders.top),
            ("\\clbrdrl", &borders.left),
            ("\\clbrdrb", &borders.bottom),
            ("\\clbrdrr", &borders.right),
        ];
        for (word, border) in edges {
            let Some(border) = border else {
                continue;
            };
            let _ = write!(
                words,
                "{}{}\\brdrw{}",
                word,
                border.style.as_rtf(),
                border.width_twips()
            );
            if let Some(index) = self.res.color_index(&border.color) {
                let _ = write!(words, "\\brdrcf{}", index);
            }
        }
        if let Some(index) = style
            .bg_color
            .as_ref()
            .or(bg)
            .and_then(|c| self.res.color_index(c))
        {
            let _ = write!(words, "\\clcbpat{}", index);
        }
        words
    }

    /// Cell content; the last paragraph ends with `\cell`. A cell without
    /// a closing paragraph gets an empty one.
    fn cell(&mut self, cell: &Cell) -> Result<()> {
        self.cell_closed = false;
        let count = cell.elements.len();
        for (i, element) in cell.elements.iter().enumerate() {
            self.cell_end_pending = i + 1 == count;
            dispatch::write_element(self, element)?;
        }
        if !self.cell_closed {
            self.cell_end_pending = true;
            let props = self.doc.settings.default_paragraph.clone();
            self.paragraph_with(None, &props, |_| Ok(()))?;
        }
        self.cell_end_pending = false;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::super::tests::rtf_of;
    use crate::model::{
        Bookmark, Document, Field, FieldKind, Link, ListItem, Table, Text, TextRun,
    };
    use crate::style::{
        Alignment, NumberingStyle, ParagraphStyle, SectionStyle, StyleRef,
    };
    use crate::units::Length;
    use pretty_assertions::assert_eq;

    fn one_section(elements: Vec<crate::model::Element>) -> Document {
        let mut doc = Document::new();
        let section = doc.add_section(SectionStyle::default());
        for e in elements {
            section.push(e);
        }
        doc
    }

    #[test]
    fn test_cell_boundaries_accumulate() {
        let mut table = Table::new();
        let row = table.add_row(None);
        row.add_cell(Length::twip(100.0)).push(Text::new("a"));
        row.add_cell(Length::twip(200.0)).push(Text::new("b"));
        row.add_cell(Length::Auto);
        let rtf = rtf_of(&one_section(vec![table.into()]));

        assert!(rtf.contains("\\trowd\\trgaph108\\cellx100\\cellx300\\cellx1020\n"));
        assert!(rtf.contains("\\pard\\intbl a\\cell\nb\\cell\n\\cell\n\\row\n"));
    }

    #[test]
    fn test_nested_table_dropped() {
        let mut inner = Table::new();
        inner.add_row(None).add_cell(Length::twip(500.0)).push(Text::new("inner"));
        let mut outer = Table::new();
        outer
            .add_row(None)
            .add_cell(Length::twip(1000.0))
            .push(Text::new("outer"))
            .push(inner);
        let rtf = rtf_of(&one_section(vec![outer.into()]));

        assert!(!rtf.contains("inner"));
        assert_eq!(rtf.matches("\\row").count(), 1);
        assert!(rtf.contains("outer\\par\n\\cell\n\\row"));
    }

    #[test]
    fn test_paragraph_words_only_on_change() {
        let centered = ParagraphStyle::new().with_alignment(Alignment::Center);
        let rtf = rtf_of(&one_section(vec![
            Text::new("one").into(),
            Text::new("two").into(),
            Text::new("three")
                .with_paragraph(StyleRef::inline(centered))
                .into(),
        ]));

        assert_eq!(rtf.matches("\\pard ").count(), 1);
        assert!(rtf.contains("\\pard one\\par\ntwo\\par\n\\pard\\qc three\\par\n"));
    }

    #[test]
    fn test_unicode_and_run_groups() {
        let font = crate::style::FontStyle::new().bold();
        let mut run = TextRun::new();
        run.push(Text::new("Grüße "))
            .push(Text::new("{bold}").with_font(StyleRef::inline(font)));
        let rtf = rtf_of(&one_section(vec![run.into()]));
        assert!(rtf.contains("Gr\\u252?\\u223?e {\\b \\{bold\\}}\\par"));
    }

    #[test]
    fn test_fields_links_and_bookmarks() {
        let mut run = TextRun::new();
        run.push(Bookmark::new("top"));
        run.push(Field::page().with_text("1"));
        run.push(Link::internal("top", "back"));
        let mut doc = one_section(vec![run.into()]);
        doc.sections[0].push(Field::simple(FieldKind::NumPages).unwrap());
        let rtf = rtf_of(&doc);

        assert!(rtf.contains("{\\*\\bkmkstart top}{\\*\\bkmkend top}"));
        assert!(rtf.contains("{\\field{\\*\\fldinst PAGE}{\\fldrslt 1}}"));
        assert!(rtf.contains("{\\field{\\*\\fldinst HYPERLINK \\\\l \"top\"}{\\fldrslt {\\ul back}}}"));
        assert!(rtf.contains("{\\field{\\*\\fldinst NUMPAGES}{\\fldrslt }}\\par"));
    }

    #[test]
    fn test_list_labels() {
        let mut doc = one_section(vec![
            ListItem::new("a", 0).with_numbering("Steps").into(),
            ListItem::new("b", 0).with_numbering("Steps").into(),
            ListItem::new("b.1", 1).with_numbering("Steps").into(),
            ListItem::new("dot", 0).into(),
        ]);
        doc.styles.define("Steps", NumberingStyle::decimal(), None, None);
        let rtf = rtf_of(&doc);

        assert!(rtf.contains("\\pard\\li720\\fi-360 {\\listtext 1.\\tab}a\\par"));
        assert!(rtf.contains("{\\listtext 2.\\tab}b\\par"));
        assert!(rtf.contains("\\pard\\li1440\\fi-360 {\\listtext 2.1.\\tab}b.1\\par"));
        assert!(rtf.contains("{\\listtext \\u8226?\\tab}dot"));
    }

    #[test]
    fn test_footnote_group() {
        let mut doc = Document::new();
        let reference = doc.add_footnote(vec![Text::new("See above").into()]);
        let mut run = TextRun::new();
        run.push(Text::new("Claim"));
        run.push(reference);
        doc.add_section(SectionStyle::default()).push(run);
        let rtf = rtf_of(&doc);

        assert!(rtf.contains(
            "Claim{\\super\\chftn}{\\footnote\\pard\\plain {\\super\\chftn} See above\\par\n}\\par"
        ));
    }

    #[test]
    fn test_png_picture() {
        let image = crate::model::Image::from_bytes(crate::image::tests::TINY_PNG.to_vec());
        let rtf = rtf_of(&one_section(vec![image.into()]));
        assert!(rtf.contains("{\\pict\\pngblip\\picw1\\pich1\\picwgoal15\\pichgoal15\n89504e47"));
    }
}

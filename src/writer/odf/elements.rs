//! Element serializers for `content.xml` and master-page content

use super::styles::{style_name, AutoStyle, DEFAULT_LIST_STYLE};
use super::{OdfWriter, Picture};
use crate::error::Result;
use crate::model::{
    Cell, Element, ElementKind, Field, FieldKind, Image, Link, NoteReference, Row, Table,
};
use crate::style::{
    CellStyle, FontStyle, Overlay, ParagraphStyle, Style, StyleRef, VerticalMerge,
};
use crate::writer::dispatch::{self, ElementWriterFn, ElementWriters};
use crate::writer::resolve_combined;

impl ElementWriters for OdfWriter<'_> {
    const BACKEND: &'static str = "ODText";

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

fn write_text(w: &mut OdfWriter<'_>, element: &Element) -> Result<()> {
    let Element::Text(text) = element else {
        return Ok(());
    };
    if w.in_paragraph {
        return w.span(text.font.as_ref(), &text.text);
    }
    w.paragraph(text.paragraph.as_ref(), |w| w.span(text.font.as_ref(), &text.text))
}

fn write_text_run(w: &mut OdfWriter<'_>, element: &Element) -> Result<()> {
    let Element::TextRun(run) = element else {
        return Ok(());
    };
    if w.in_paragraph {
        return dispatch::write_elements(w, &run.elements);
    }
    w.paragraph(run.paragraph.as_ref(), |w| dispatch::write_elements(w, &run.elements))
}

fn write_table(w: &mut OdfWriter<'_>, element: &Element) -> Result<()> {
    let Element::Table(table) = element else {
        return Ok(());
    };
    if w.in_paragraph {
        log::warn!("odt: table inside a paragraph is not supported, skipped");
        return Ok(());
    }
    w.table(table)
}

fn write_image(w: &mut OdfWriter<'_>, element: &Element) -> Result<()> {
    let Element::Image(image) = element else {
        return Ok(());
    };
    if w.in_paragraph {
        return w.frame(image);
    }
    let props = image
        .style
        .alignment
        .map(|a| ParagraphStyle::new().with_alignment(a));
    w.write_paragraph_with(None, props.as_ref(), |w| w.frame(image))
}

fn write_field(w: &mut OdfWriter<'_>, element: &Element) -> Result<()> {
    let Element::Field(field) = element else {
        return Ok(());
    };
    if !matches!(
        field.kind,
        FieldKind::Date | FieldKind::Page | FieldKind::NumPages
    ) {
        log::trace!("odt: no {} field, skipped", field.kind.as_str());
        return Ok(());
    }
    if w.in_paragraph {
        return w.field(field);
    }
    w.write_paragraph_with(None, None, |w| w.field(field))
}

fn write_link(w: &mut OdfWriter<'_>, element: &Element) -> Result<()> {
    let Element::Link(link) = element else {
        return Ok(());
    };
    if w.in_paragraph {
        return w.hyperlink(link);
    }
    w.write_paragraph_with(None, None, |w| w.hyperlink(link))
}

fn write_title(w: &mut OdfWriter<'_>, element: &Element) -> Result<()> {
    let Element::Title(title) = element else {
        return Ok(());
    };
    let (font, paragraph) = resolve_combined(&w.doc.styles, title.style.as_ref())?;
    if w.in_paragraph {
        return w.span_with(None, Some(font), &title.text);
    }

    let name = style_name(&title.style_name());
    // Depth 0 is the document title, a plain paragraph
    let (tag, level) = if title.depth == 0 {
        ("text:p", None)
    } else {
        ("text:h", Some(title.depth))
    };
    w.block(tag, level, Some(&name), Some(&paragraph), |w| {
        w.span_with(None, Some(font), &title.text)
    })
}

fn write_list_item(w: &mut OdfWriter<'_>, element: &Element) -> Result<()> {
    let Element::ListItem(item) = element else {
        return Ok(());
    };
    if w.in_paragraph {
        return dispatch::write_elements(w, &item.elements);
    }

    let list_style = match item.numbering.as_deref() {
        Some(name) if w.is_numbering(name) => style_name(name),
        Some(name) => {
            log::warn!("odt: numbering style '{}' is not defined, using bullets", name);
            DEFAULT_LIST_STYLE.to_string()
        }
        None => DEFAULT_LIST_STYLE.to_string(),
    };

    // Each item is its own list continuing the previous one; deeper items
    // nest one list per level
    w.x.start_element("text:list")?;
    w.x.write_attribute("text:style-name", &list_style)?;
    w.x.write_attribute("text:continue-numbering", "true")?;
    for _ in 0..item.depth {
        w.x.start_element("text:list-item")?;
        w.x.start_element("text:list")?;
    }
    w.x.start_element("text:list-item")?;
    w.paragraph(item.paragraph.as_ref(), |w| {
        dispatch::write_elements(w, &item.elements)
    })?;
    for _ in 0..(2 + 2 * usize::from(item.depth)) {
        w.x.end_element()?;
    }
    Ok(())
}

fn write_page_break(w: &mut OdfWriter<'_>, _: &Element) -> Result<()> {
    if w.in_paragraph {
        log::debug!("odt: page break inside a paragraph written as a line break");
        return w.x.write_element("text:line-break", &[]);
    }
    let props = ParagraphStyle {
        page_break_before: Some(true),
        ..Default::default()
    };
    w.write_paragraph_with(None, Some(&props), |_| Ok(()))
}

fn write_text_break(w: &mut OdfWriter<'_>, _: &Element) -> Result<()> {
    if w.in_paragraph {
        return w.x.write_element("text:line-break", &[]);
    }
    w.write_paragraph_with(None, None, |_| Ok(()))
}

fn write_bookmark(w: &mut OdfWriter<'_>, element: &Element) -> Result<()> {
    let Element::Bookmark(bookmark) = element else {
        return Ok(());
    };
    if w.in_paragraph {
        return w.x.write_element("text:bookmark", &[("text:name", bookmark.name.as_str())]);
    }
    w.write_paragraph_with(None, None, |w| {
        w.x.write_element("text:bookmark", &[("text:name", bookmark.name.as_str())])
    })
}

fn write_footnote(w: &mut OdfWriter<'_>, element: &Element) -> Result<()> {
    let Element::Footnote(reference) = element else {
        return Ok(());
    };
    w.note("footnote", reference)
}

fn write_endnote(w: &mut OdfWriter<'_>, element: &Element) -> Result<()> {
    let Element::Endnote(reference) = element else {
        return Ok(());
    };
    w.note("endnote", reference)
}

/// Revision marks are not carried over; the element is written as is
fn write_tracked(w: &mut OdfWriter<'_>, element: &Element) -> Result<()> {
    let Element::Tracked(tracked) = element else {
        return Ok(());
    };
    dispatch::write_element(w, &tracked.element).map(|_| ())
}

/// Cell covering grid column `column` of `row`
fn cell_at(row: &Row, column: usize) -> Option<&Cell> {
    let mut start = 0;
    for cell in &row.cells {
        let span = cell.span() as usize;
        if column < start + span {
            return (column == start).then_some(cell);
        }
        start += span;
    }
    None
}

fn is_continued(cell: Option<&Cell>) -> bool {
    cell.and_then(|c| c.style.as_ref())
        .and_then(|s| s.v_merge)
        == Some(VerticalMerge::Continue)
}

impl OdfWriter<'_> {
    /// Paragraph from a style reference. The name must denote a paragraph
    /// style or a font style with a paragraph part.
    pub(super) fn paragraph<F>(
        &mut self,
        style: Option<&StyleRef<ParagraphStyle>>,
        content: F,
    ) -> Result<()>
    where
        F: FnOnce(&mut Self) -> Result<()>,
    {
        let named = style
            .and_then(|s| s.name.as_deref())
            .and_then(|name| self.paragraph_style_name(name));
        let inline = style.and_then(|s| s.inline.as_ref());
        self.write_paragraph_with(named.as_deref(), inline, content)
    }

    pub(super) fn write_paragraph_with<F>(
        &mut self,
        named: Option<&str>,
        props: Option<&ParagraphStyle>,
        content: F,
    ) -> Result<()>
    where
        F: FnOnce(&mut Self) -> Result<()>,
    {
        self.block("text:p", None, named, props, content)
    }

    /// `text:p` or `text:h`. Inline properties and a pending master-page
    /// switch go into an automatic style derived from `named`.
    fn block<F>(
        &mut self,
        tag: &str,
        outline_level: Option<u8>,
        named: Option<&str>,
        props: Option<&ParagraphStyle>,
        content: F,
    ) -> Result<()>
    where
        F: FnOnce(&mut Self) -> Result<()>,
    {
        let props = props.filter(|p| !p.is_empty());
        let style = if props.is_some() || self.pending_master.is_some() {
            Some(self.auto.add(AutoStyle::Paragraph {
                parent: named.map(str::to_string),
                master_page: self.pending_master.take(),
                outline_level,
                paragraph: props.cloned().unwrap_or_default(),
                text: FontStyle::default(),
            }))
        } else {
            named.map(str::to_string)
        };

        self.x.start_element(tag)?;
        if let Some(style) = style {
            self.x.write_attribute("text:style-name", style)?;
        }
        if let Some(level) = outline_level {
            self.x.write_attribute("text:outline-level", level)?;
        }

        let outer = std::mem::replace(&mut self.in_paragraph, true);
        let result = content(self);
        self.in_paragraph = outer;
        result?;

        self.x.end_element()
    }

    fn paragraph_style_name(&self, name: &str) -> Option<String> {
        match self.doc.styles.get(name).map(|def| &def.style) {
            Some(Style::Paragraph(_)) => Some(style_name(name)),
            Some(Style::Font(font)) if font.paragraph_part().is_some() => Some(style_name(name)),
            _ => {
                log::warn!("odt: '{}' is not a paragraph style", name);
                None
            }
        }
    }

    fn text_style_name(&self, name: &str) -> Option<String> {
        match self.doc.styles.get(name).map(|def| &def.style) {
            Some(Style::Font(_)) => Some(style_name(name)),
            _ => {
                log::warn!("odt: '{}' is not a character style", name);
                None
            }
        }
    }

    /// Text with a font style reference
    fn span(&mut self, font: Option<&StyleRef<FontStyle>>, text: &str) -> Result<()> {
        let named = font
            .and_then(|f| f.name.as_deref())
            .and_then(|name| self.text_style_name(name));
        let inline = font.and_then(|f| f.inline.clone());
        self.span_with(named, inline, text)
    }

    /// Text, wrapped in `text:span` when it carries a style
    fn span_with(&mut self, named: Option<String>, font: Option<FontStyle>, text: &str) -> Result<()> {
        let font = match (&self.region_font, font) {
            (Some(region), Some(font)) => {
                let mut merged = region.clone();
                merged.overlay(&font);
                Some(merged)
            }
            (Some(region), None) => Some(region.clone()),
            (None, font) => font,
        };
        let font = font.map(|f| f.font_only()).filter(|f| !f.is_empty());

        let style = match font {
            Some(text_props) => Some(self.auto.add(AutoStyle::Text {
                parent: named,
                text: text_props,
            })),
            None => named,
        };
        match style {
            Some(style) => {
                self.x.start_element("text:span")?;
                self.x.write_attribute("text:style-name", style)?;
                self.write_text_content(text)?;
                self.x.end_element()
            }
            None => self.write_text_content(text),
        }
    }

    /// Character data. ODF collapses white space, so tabs, newlines and
    /// repeated spaces need elements of their own.
    fn write_text_content(&mut self, text: &str) -> Result<()> {
        for (i, line) in text.split('\n').enumerate() {
            if i > 0 {
                self.x.write_element("text:line-break", &[])?;
            }
            for (j, segment) in line.split('\t').enumerate() {
                if j > 0 {
                    self.x.write_element("text:tab", &[])?;
                }
                self.write_spaced(segment)?;
            }
        }
        Ok(())
    }

    fn write_spaced(&mut self, segment: &str) -> Result<()> {
        let mut buf = String::new();
        let mut extra = 0usize;
        // Leading spaces are always encoded
        let mut after_space = true;
        for c in segment.chars() {
            if c == ' ' {
                if after_space {
                    extra += 1;
                } else {
                    buf.push(' ');
                }
                after_space = true;
                continue;
            }
            if extra > 0 {
                self.flush_text(&mut buf)?;
                self.write_spaces(extra)?;
                extra = 0;
            }
            buf.push(c);
            after_space = false;
        }
        self.flush_text(&mut buf)?;
        if extra > 0 {
            self.write_spaces(extra)?;
        }
        Ok(())
    }

    fn flush_text(&mut self, buf: &mut String) -> Result<()> {
        if !buf.is_empty() {
            self.x.write_text(buf)?;
            buf.clear();
        }
        Ok(())
    }

    fn write_spaces(&mut self, count: usize) -> Result<()> {
        if count == 1 {
            self.x.write_element("text:s", &[])
        } else {
            self.x
                .write_element("text:s", &[("text:c", count.to_string().as_str())])
        }
    }

    fn field(&mut self, field: &Field) -> Result<()> {
        let shown = field.text.as_deref();
        match field.kind {
            FieldKind::Date => {
                self.x.start_element("text:date")?;
                self.x.write_text(shown.unwrap_or(""))?;
            }
            FieldKind::Page => {
                self.x.start_element("text:page-number")?;
                self.x.write_attribute("text:select-page", "current")?;
                self.x.write_text(shown.unwrap_or("1"))?;
            }
            FieldKind::NumPages => {
                self.x.start_element("text:page-count")?;
                self.x.write_text(shown.unwrap_or("1"))?;
            }
            _ => return Ok(()),
        }
        self.x.end_element()
    }

    fn hyperlink(&mut self, link: &Link) -> Result<()> {
        let href = if link.internal {
            format!("#{}", link.target)
        } else {
            link.target.clone()
        };
        self.x.start_element("text:a")?;
        self.x.write_attribute("xlink:type", "simple")?;
        self.x.write_attribute("xlink:href", &href)?;
        self.span(link.font.as_ref(), &link.text)?;
        self.x.end_element()
    }

    fn note(&mut self, class: &str, reference: &NoteReference) -> Result<()> {
        if !self.in_paragraph {
            return self.write_paragraph_with(None, None, |w| w.note(class, reference));
        }
        let doc = self.doc;
        let notes = if class == "footnote" {
            &doc.footnotes
        } else {
            &doc.endnotes
        };
        let Some(note) = notes.get(reference.id) else {
            log::warn!("odt: {} {} is not defined, skipped", class, reference.id);
            return Ok(());
        };

        let prefix = if class == "footnote" { "ftn" } else { "edn" };
        self.x.start_element("text:note")?;
        self.x.write_attribute("text:id", format!("{}{}", prefix, reference.id))?;
        self.x.write_attribute("text:note-class", class)?;
        self.x
            .write_element_text("text:note-citation", &reference.id.to_string())?;
        self.x.start_element("text:note-body")?;
        self.write_block_container(&note.elements)?;
        self.x.end_element()?;
        self.x.end_element()
    }

    /// Image as a character-anchored frame; the data goes to `Pictures/`
    fn frame(&mut self, image: &Image) -> Result<()> {
        let (data, kind) = image.load()?;
        let (cx, cy) = image
            .style
            .extent_emu_for(crate::image::dimensions(&data));
        let n = self.pictures.len() + 1;
        let path = format!("Pictures/image{}.{}", n, kind.extension());
        let cm = |emu: i64| format!("{}cm", crate::writer::format_number(emu as f64 / 360_000.0, 3));

        self.x.start_element("draw:frame")?;
        self.x.write_attribute("draw:name", format!("Image{}", n))?;
        self.x.write_attribute("text:anchor-type", "as-char")?;
        self.x.write_attribute("svg:width", cm(cx))?;
        self.x.write_attribute("svg:height", cm(cy))?;
        self.x.write_attribute("draw:z-index", 0)?;
        self.x.start_element("draw:image")?;
        self.x.write_attribute("xlink:href", &path)?;
        self.x.write_attribute("xlink:type", "simple")?;
        self.x.write_attribute("xlink:show", "embed")?;
        self.x.write_attribute("xlink:actuate", "onLoad")?;
        self.x.end_element()?;
        self.x.end_element()?;

        self.pictures.push(Picture {
            path,
            media_type: kind.mime_type(),
            data,
        });
        Ok(())
    }

    fn table(&mut self, table: &Table) -> Result<()> {
        if table.rows.is_empty() {
            log::debug!("odt: empty table skipped");
            return Ok(());
        }
        // A table cannot carry the master page switch itself
        if self.pending_master.is_some() {
            self.write_paragraph_with(None, None, |_| Ok(()))?;
        }

        let mut props = self.doc.styles.resolve_opt(table.style.as_ref())?;
        let first_row = props.first_row.take();
        let widths = table.grid_widths(self.content_width);
        let columns = widths.len();
        let rows = table.rows.len();

        self.table_count += 1;
        let table_style = self.auto.add(AutoStyle::Table {
            width: widths.iter().sum(),
            style: props.clone(),
        });

        self.x.start_element("table:table")?;
        self.x
            .write_attribute("table:name", format!("Table{}", self.table_count))?;
        self.x.write_attribute("table:style-name", &table_style)?;
        for width in &widths {
            let column = self.auto.add(AutoStyle::Column { width: *width });
            self.x
                .write_element("table:table-column", &[("table:style-name", column.as_str())])?;
        }

        for (index, row) in table.rows.iter().enumerate() {
            let region = first_row.as_ref().filter(|_| index == 0);
            let outer_font = std::mem::replace(
                &mut self.region_font,
                region.and_then(|r| r.font.clone()),
            );

            self.x.start_element("table:table-row")?;
            let mut column = 0;
            for cell in &row.cells {
                let span = cell.span() as usize;
                let mut style = cell.style.clone().unwrap_or_default();

                if style.v_merge == Some(VerticalMerge::Continue) {
                    for _ in 0..span {
                        self.x.write_element("table:covered-table-cell", &[])?;
                    }
                    column += span;
                    continue;
                }

                // The cell's own properties win over the header row's,
                // which win over the table's
                if let Some(region) = region {
                    if style.bg_color.is_none() {
                        style.bg_color = region.bg_color.clone();
                    }
                    if style.borders.is_none() {
                        style.borders = region.borders.clone();
                    }
                }
                if style.borders.is_none() {
                    style.borders = props
                        .borders
                        .as_ref()
                        .map(|b| b.for_cell(index, rows, column, column + span - 1, columns));
                }
                style.v_merge = None;
                style.grid_span = None;

                let merged_rows = if cell.style.as_ref().and_then(|s| s.v_merge)
                    == Some(VerticalMerge::Restart)
                {
                    1 + table.rows[index + 1..]
                        .iter()
                        .take_while(|r| is_continued(cell_at(r, column)))
                        .count()
                } else {
                    1
                };

                self.x.start_element("table:table-cell")?;
                if style != CellStyle::default() {
                    let name = self.auto.add(AutoStyle::Cell(style));
                    self.x.write_attribute("table:style-name", name)?;
                }
                if span > 1 {
                    self.x.write_attribute("table:number-columns-spanned", span)?;
                }
                if merged_rows > 1 {
                    self.x
                        .write_attribute("table:number-rows-spanned", merged_rows)?;
                }
                self.x.write_attribute("office:value-type", "string")?;
                self.write_block_container(&cell.elements)?;
                self.x.end_element()?;

                for _ in 1..span {
                    self.x.write_element("table:covered-table-cell", &[])?;
                }
                column += span;
            }
            self.x.end_element()?;

            self.region_font = outer_font;
        }

        self.x.end_element()
    }
}

#[cfg(test)]
mod tests {
    use super::super::tests::entry;
    use crate::image::tests::TINY_PNG;
    use crate::model::{Document, Field, FieldKind, Image, ListItem, Table, Text};
    use crate::style::{CellStyle, FontStyle, SectionStyle, StyleRef};
    use crate::units::Length;
    use crate::writer::{odf, WriterOptions};

    fn content_of(doc: &Document) -> String {
        entry(&odf::write(doc, &WriterOptions::default()).unwrap(), "content.xml")
    }

    #[test]
    fn test_inline_font_becomes_automatic_span() {
        let mut doc = Document::new();
        doc.add_section(SectionStyle::default())
            .push(Text::new("bold").with_font(FontStyle::new().bold()));
        let content = content_of(&doc);
        assert!(content.contains(r#"<style:style style:name="T1" style:family="text">"#));
        assert!(content.contains(r#"<text:p><text:span text:style-name="T1">bold</text:span></text:p>"#));
    }

    #[test]
    fn test_named_font_style_span() {
        let mut doc = Document::new();
        doc.styles.define("Strong", FontStyle::new().bold(), None, None);
        doc.add_section(SectionStyle::default())
            .push(Text::new("named").with_font(StyleRef::<FontStyle>::named("Strong")));
        assert!(content_of(&doc).contains(r#"<text:span text:style-name="Strong">named</text:span>"#));
    }

    #[test]
    fn test_white_space_elements() {
        let mut doc = Document::new();
        doc.add_section(SectionStyle::default())
            .add_text("a  b\tc\nd   e");
        assert!(content_of(&doc).contains(
            r#"<text:p>a <text:s/>b<text:tab/>c<text:line-break/>d <text:s text:c="2"/>e</text:p>"#
        ));
    }

    #[test]
    fn test_table_columns_and_spans() {
        let mut table = Table::new();
        let row = table.add_row(None);
        let wide = row.add_cell(Length::twip(2000.0));
        wide.style = Some(CellStyle {
            grid_span: Some(2),
            ..Default::default()
        });
        wide.push(Text::new("wide"));
        let row = table.add_row(None);
        row.add_cell(Length::twip(1000.0));
        row.add_cell(Length::twip(1000.0));

        let mut doc = Document::new();
        doc.add_section(SectionStyle::default()).add_table(table);
        let content = content_of(&doc);

        assert!(content.contains(r#"<table:table table:name="Table1" table:style-name="Table1">"#));
        assert!(content.contains(r#"<table:table-column table:style-name="Co1"/><table:table-column table:style-name="Co1"/>"#));
        assert!(content.contains(r#"table:number-columns-spanned="2""#));
        assert!(content.contains("</table:table-cell><table:covered-table-cell/></table:table-row>"));
        // Empty cells still hold a paragraph
        assert!(content.contains(r#"<table:table-cell office:value-type="string"><text:p/></table:table-cell>"#));
    }

    #[test]
    fn test_only_date_and_page_fields() {
        let mut doc = Document::new();
        doc.add_section(SectionStyle::default())
            .push(Field::simple(FieldKind::Author).unwrap())
            .push(Field::page());
        let content = content_of(&doc);
        assert!(content.contains(
            r#"<text:p><text:page-number text:select-page="current">1</text:page-number></text:p>"#
        ));
        assert!(!content.contains("AUTHOR"));
        assert_eq!(content.matches("<text:p>").count(), 1);
    }

    #[test]
    fn test_list_items_use_default_bullets() {
        let mut doc = Document::new();
        doc.add_section(SectionStyle::default())
            .push(ListItem::new("first", 0))
            .push(ListItem::new("nested", 1));
        let bytes = odf::write(&doc, &WriterOptions::default()).unwrap();

        let content = entry(&bytes, "content.xml");
        assert!(content.contains(
            r#"<text:list text:style-name="DefaultBullet" text:continue-numbering="true"><text:list-item><text:p>first</text:p></text:list-item></text:list>"#
        ));
        assert!(content.contains(
            "<text:list-item><text:list><text:list-item><text:p>nested</text:p></text:list-item></text:list></text:list-item>"
        ));
        assert!(entry(&bytes, "styles.xml").contains(r#"<text:list-style style:name="DefaultBullet">"#));
    }

    #[test]
    fn test_image_goes_to_pictures() {
        let mut doc = Document::new();
        doc.add_section(SectionStyle::default())
            .push(Image::from_bytes(TINY_PNG.to_vec()));
        let bytes = odf::write(&doc, &WriterOptions::default()).unwrap();

        let content = entry(&bytes, "content.xml");
        assert!(content.contains(r#"<draw:image xlink:href="Pictures/image1.png""#));
        let manifest = entry(&bytes, "META-INF/manifest.xml");
        assert!(manifest.contains(
            r#"manifest:full-path="Pictures/image1.png" manifest:media-type="image/png""#
        ));
    }

    #[test]
    fn test_footnote_body_inline() {
        let mut doc = Document::new();
        let reference = doc.add_footnote(vec![Text::new("Source").into()]);
        doc.add_section(SectionStyle::default()).push(reference);
        let content = content_of(&doc);
        assert!(content.contains(r#"<text:note text:id="ftn1" text:note-class="footnote">"#));
        assert!(content.contains("<text:note-body><text:p>Source</text:p></text:note-body>"));
    }
}

//! Element serializers for the document, header, footer and note parts

use super::properties::{self, NumberingPr};
use super::styles::{char_style_id, paragraph_style_id, style_id};
use super::{PartKind, WordWriter};
use crate::error::Result;
use crate::model::{
    format_w3c_date, ChangeKind, Element, ElementKind, Field, FieldKind, Image, Link,
    NoteReference, Title, Toc, TrackChange,
};
use crate::opc::{rel_types, well_known, Part};
use crate::style::{FontStyle, Overlay, ParagraphStyle, StyleRef, TabKind, TabStop};
use crate::writer::dispatch::{self, ElementWriterFn, ElementWriters};
use crate::writer::resolve_combined;

impl ElementWriters for WordWriter<'_> {
    const BACKEND: &'static str = "Word2007";

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
            ElementKind::Toc => write_toc as ElementWriterFn<Self>,
            ElementKind::Tracked => write_tracked as ElementWriterFn<Self>,
        };
        Some(writer)
    }
}

fn write_text(w: &mut WordWriter<'_>, element: &Element) -> Result<()> {
    let Element::Text(text) = element else {
        return Ok(());
    };
    if w.in_paragraph {
        return w.run(text.font.as_ref(), &text.text);
    }
    w.paragraph(text.paragraph.as_ref(), None, |w| {
        w.run(text.font.as_ref(), &text.text)
    })
}

fn write_text_run(w: &mut WordWriter<'_>, element: &Element) -> Result<()> {
    let Element::TextRun(run) = element else {
        return Ok(());
    };
    if w.in_paragraph {
        return dispatch::write_elements(w, &run.elements);
    }
    w.paragraph(run.paragraph.as_ref(), None, |w| {
        dispatch::write_elements(w, &run.elements)
    })
}

fn write_table(w: &mut WordWriter<'_>, element: &Element) -> Result<()> {
    let Element::Table(table) = element else {
        return Ok(());
    };
    if w.in_paragraph {
        log::warn!("docx: table inside a paragraph is not supported, skipped");
        return Ok(());
    }
    w.write_table(table)
}

fn write_image(w: &mut WordWriter<'_>, element: &Element) -> Result<()> {
    let Element::Image(image) = element else {
        return Ok(());
    };
    if w.in_paragraph {
        return w.drawing(image);
    }
    let paragraph = image
        .style
        .alignment
        .map(|a| StyleRef::inline(ParagraphStyle::new().with_alignment(a)));
    w.paragraph(paragraph.as_ref(), None, |w| w.drawing(image))
}

fn write_field(w: &mut WordWriter<'_>, element: &Element) -> Result<()> {
    let Element::Field(field) = element else {
        return Ok(());
    };
    if w.in_paragraph {
        return w.field(field);
    }
    w.paragraph(None, None, |w| w.field(field))
}

fn write_link(w: &mut WordWriter<'_>, element: &Element) -> Result<()> {
    let Element::Link(link) = element else {
        return Ok(());
    };
    if w.in_paragraph {
        return w.hyperlink(link);
    }
    w.paragraph(None, None, |w| w.hyperlink(link))
}

fn write_title(w: &mut WordWriter<'_>, element: &Element) -> Result<()> {
    let Element::Title(title) = element else {
        return Ok(());
    };
    let (font, paragraph) = resolve_combined(&w.doc.styles, title.style.as_ref())?;
    let font = (!font.is_empty()).then_some(font);
    if w.in_paragraph {
        return w.run_with(None, font.as_ref(), &title.text);
    }
    w.title_paragraph(title, font.as_ref(), &paragraph)
}

fn write_list_item(w: &mut WordWriter<'_>, element: &Element) -> Result<()> {
    let Element::ListItem(item) = element else {
        return Ok(());
    };
    if w.in_paragraph {
        return dispatch::write_elements(w, &item.elements);
    }
    let numbering = w
        .numbering
        .id(item.numbering.as_deref())
        .map(|id| (id, item.depth));
    w.paragraph(item.paragraph.as_ref(), numbering, |w| {
        dispatch::write_elements(w, &item.elements)
    })
}

fn write_page_break(w: &mut WordWriter<'_>, _: &Element) -> Result<()> {
    if w.in_paragraph {
        return w.break_run(Some("page"));
    }
    w.x.start_element("w:p")?;
    w.break_run(Some("page"))?;
    w.x.end_element()
}

fn write_text_break(w: &mut WordWriter<'_>, _: &Element) -> Result<()> {
    if w.in_paragraph {
        return w.break_run(None);
    }
    w.x.write_element("w:p", &[])
}

fn write_bookmark(w: &mut WordWriter<'_>, element: &Element) -> Result<()> {
    let Element::Bookmark(bookmark) = element else {
        return Ok(());
    };
    w.bookmark(&bookmark.name, |_| Ok(()))
}

fn write_footnote(w: &mut WordWriter<'_>, element: &Element) -> Result<()> {
    let Element::Footnote(reference) = element else {
        return Ok(());
    };
    w.note_reference("w:footnoteReference", reference)
}

fn write_endnote(w: &mut WordWriter<'_>, element: &Element) -> Result<()> {
    let Element::Endnote(reference) = element else {
        return Ok(());
    };
    w.note_reference("w:endnoteReference", reference)
}

fn write_toc(w: &mut WordWriter<'_>, element: &Element) -> Result<()> {
    let Element::Toc(toc) = element else {
        return Ok(());
    };
    if w.in_paragraph {
        log::warn!("docx: table of contents inside a paragraph is not supported, skipped");
        return Ok(());
    }
    w.toc(toc)
}

/// Runs written while the inner element is dispatched are wrapped in
/// `w:ins` or `w:del`
fn write_tracked(w: &mut WordWriter<'_>, element: &Element) -> Result<()> {
    let Element::Tracked(tracked) = element else {
        return Ok(());
    };
    let outer = w.revision.replace(tracked.change.clone());
    let result = dispatch::write_element(w, &tracked.element);
    w.revision = outer;
    result.map(|_| ())
}

/// Display text Word shows before fields are updated
fn placeholder(kind: FieldKind) -> &'static str {
    match kind {
        FieldKind::Page | FieldKind::NumPages | FieldKind::SectionPages => "1",
        _ => "",
    }
}

impl WordWriter<'_> {
    /// Open a `w:p` with resolved paragraph properties and write its
    /// content with the paragraph flag set
    pub(super) fn paragraph<F>(
        &mut self,
        style: Option<&StyleRef<ParagraphStyle>>,
        numbering: Option<NumberingPr>,
        content: F,
    ) -> Result<()>
    where
        F: FnOnce(&mut Self) -> Result<()>,
    {
        let style_id = style
            .and_then(|s| s.name.as_deref())
            .and_then(|name| paragraph_style_id(&self.doc.styles, name));
        let inline = style.and_then(|s| s.inline.as_ref());
        let numbering = numbering.or_else(|| {
            let reference = inline?.numbering.as_ref()?;
            self.numbering
                .exact(&reference.style)
                .map(|id| (id, reference.level))
        });
        self.paragraph_with(style_id.as_deref(), inline, numbering, content)
    }

    pub(super) fn paragraph_with<F>(
        &mut self,
        style_id: Option<&str>,
        props: Option<&ParagraphStyle>,
        numbering: Option<NumberingPr>,
        content: F,
    ) -> Result<()>
    where
        F: FnOnce(&mut Self) -> Result<()>,
    {
        self.x.start_element("w:p")?;
        properties::write_paragraph_properties(&mut self.x, style_id, props, numbering)?;

        let outer = std::mem::replace(&mut self.in_paragraph, true);
        let result = content(self);
        self.in_paragraph = outer;
        result?;

        self.x.end_element()
    }

    /// Text run from a font style reference
    fn run(&mut self, font: Option<&StyleRef<FontStyle>>, text: &str) -> Result<()> {
        let style_id = font
            .and_then(|f| f.name.as_deref())
            .and_then(|name| char_style_id(&self.doc.styles, name));
        let inline = font.and_then(|f| f.inline.as_ref());
        self.run_with(style_id.as_deref(), inline, text)
    }

    /// Text run with explicit properties. Tabs and newlines inside `text`
    /// become `w:tab` and `w:br`.
    fn run_with(&mut self, style_id: Option<&str>, font: Option<&FontStyle>, text: &str) -> Result<()> {
        let font = match (&self.region_font, font) {
            (Some(region), Some(font)) => {
                let mut merged = region.clone();
                merged.overlay(font);
                Some(merged)
            }
            (Some(region), None) => Some(region.clone()),
            (None, font) => font.cloned(),
        };

        let revision = self.revision.clone();
        if let Some(change) = &revision {
            self.open_revision(change)?;
        }
        let deleted = matches!(&revision, Some(c) if c.kind == ChangeKind::Delete);

        self.x.start_element("w:r")?;
        properties::write_run_properties(&mut self.x, style_id, font.as_ref())?;
        self.run_text(text, deleted)?;
        self.x.end_element()?;

        if revision.is_some() {
            self.x.end_element()?;
        }
        Ok(())
    }

    fn run_text(&mut self, text: &str, deleted: bool) -> Result<()> {
        let tag = if deleted { "w:delText" } else { "w:t" };
        for (i, line) in text.split('\n').enumerate() {
            if i > 0 {
                self.x.write_element("w:br", &[])?;
            }
            for (j, segment) in line.split('\t').enumerate() {
                if j > 0 {
                    self.x.write_element("w:tab", &[])?;
                }
                if segment.is_empty() {
                    continue;
                }
                self.x.start_element(tag)?;
                // Preserve space if text has leading/trailing whitespace
                if segment.starts_with(' ') || segment.ends_with(' ') || segment.contains("  ") {
                    self.x.write_attribute("xml:space", "preserve")?;
                }
                self.x.write_text(segment)?;
                self.x.end_element()?;
            }
        }
        Ok(())
    }

    /// Start `w:ins` / `w:del`; the caller closes it
    fn open_revision(&mut self, change: &TrackChange) -> Result<()> {
        let tag = match change.kind {
            ChangeKind::Insert => "w:ins",
            ChangeKind::Delete => "w:del",
        };
        self.revision_id += 1;
        self.x.start_element(tag)?;
        self.x.write_attribute("w:id", self.revision_id)?;
        self.x.write_attribute("w:author", &change.author)?;
        if let Some(date) = &change.date {
            self.x.write_attribute("w:date", format_w3c_date(date))?;
        }
        Ok(())
    }

    fn break_run(&mut self, kind: Option<&str>) -> Result<()> {
        self.x.start_element("w:r")?;
        self.x.start_element("w:br")?;
        if let Some(kind) = kind {
            self.x.write_attribute("w:type", kind)?;
        }
        self.x.end_element()?;
        self.x.end_element()
    }

    fn fld_char(&mut self, kind: &str) -> Result<()> {
        self.x.start_element("w:r")?;
        self.x.write_val("w:fldChar", "w:fldCharType", kind)?;
        self.x.end_element()
    }

    fn instr_text(&mut self, instruction: &str) -> Result<()> {
        self.x.start_element("w:r")?;
        self.x.start_element("w:instrText")?;
        self.x.write_attribute("xml:space", "preserve")?;
        self.x.write_text(instruction)?;
        self.x.end_element()?;
        self.x.end_element()
    }

    /// Complex field: begin, instruction, separate, cached result, end
    fn field(&mut self, field: &Field) -> Result<()> {
        let display = field
            .text
            .clone()
            .unwrap_or_else(|| placeholder(field.kind).to_string());
        self.fld_char("begin")?;
        self.instr_text(&format!(" {} ", field.instruction()))?;
        self.fld_char("separate")?;
        if !display.is_empty() {
            self.run_with(None, None, &display)?;
        }
        self.fld_char("end")
    }

    fn hyperlink(&mut self, link: &Link) -> Result<()> {
        self.x.start_element("w:hyperlink")?;
        if link.internal {
            self.x.write_attribute("w:anchor", &link.target)?;
        } else {
            let rel_id = self.rels.add_external(rel_types::HYPERLINK, &link.target);
            self.x.write_attribute("r:id", rel_id)?;
        }
        self.x.write_attribute("w:history", 1)?;
        self.run(link.font.as_ref(), &link.text)?;
        self.x.end_element()
    }

    fn bookmark<F>(&mut self, name: &str, content: F) -> Result<()>
    where
        F: FnOnce(&mut Self) -> Result<()>,
    {
        let id = self.bookmark_id;
        self.bookmark_id += 1;

        self.x.start_element("w:bookmarkStart")?;
        self.x.write_attribute("w:id", id)?;
        self.x.write_attribute("w:name", name)?;
        self.x.end_element()?;
        content(self)?;
        self.x.write_val("w:bookmarkEnd", "w:id", id)
    }

    fn note_reference(&mut self, tag: &str, reference: &NoteReference) -> Result<()> {
        if !self.in_paragraph {
            return self.paragraph(None, None, |w| w.note_reference(tag, reference));
        }
        self.x.start_element("w:r")?;
        self.x.start_element("w:rPr")?;
        self.x.write_val("w:vertAlign", "w:val", "superscript")?;
        self.x.end_element()?;
        self.x.write_val(tag, "w:id", reference.id)?;
        self.x.end_element()
    }

    /// Heading paragraph. Body titles get a `_Toc{n}` bookmark when the
    /// document has a table of contents.
    fn title_paragraph(
        &mut self,
        title: &Title,
        font: Option<&FontStyle>,
        paragraph: &ParagraphStyle,
    ) -> Result<()> {
        let bookmark = if self.has_toc && self.part == PartKind::Body {
            self.title_count += 1;
            Some(format!("_Toc{}", self.title_count))
        } else {
            None
        };
        let id = style_id(&title.style_name());
        let props = (!paragraph.is_empty()).then_some(paragraph);

        self.paragraph_with(Some(&id), props, None, |w| match &bookmark {
            Some(name) => w.bookmark(name, |w| w.run_with(None, font, &title.text)),
            None => w.run_with(None, font, &title.text),
        })
    }

    /// Table of contents as a `TOC` field whose cached result lists one
    /// hyperlinked paragraph per included title
    fn toc(&mut self, toc: &Toc) -> Result<()> {
        let doc = self.doc;
        let font = doc.styles.resolve_opt(toc.font.as_ref())?.font_only();
        let font = (!font.is_empty()).then_some(font);
        let entries: Vec<(usize, &Title)> = doc
            .titles()
            .into_iter()
            .enumerate()
            .map(|(i, t)| (i + 1, t))
            .filter(|(_, t)| toc.includes(t.depth))
            .collect();
        let instruction = format!(
            " TOC \\o \"{}-{}\" \\h \\z \\u ",
            toc.min_depth, toc.max_depth
        );

        if entries.is_empty() {
            return self.paragraph(None, None, |w| {
                w.fld_char("begin")?;
                w.instr_text(&instruction)?;
                w.fld_char("separate")?;
                w.fld_char("end")
            });
        }

        let last = entries.len() - 1;
        for (i, (number, title)) in entries.iter().enumerate() {
            let props = ParagraphStyle {
                tabs: Some(vec![TabStop {
                    kind: TabKind::Right,
                    position: toc.tab_position,
                    leader: toc.tab_leader,
                }]),
                indent_left: Some(toc.indent * (i32::from(title.depth.max(1)) - 1)),
                ..Default::default()
            };
            let anchor = format!("_Toc{}", number);

            self.paragraph_with(None, Some(&props), None, |w| {
                if i == 0 {
                    w.fld_char("begin")?;
                    w.instr_text(&instruction)?;
                    w.fld_char("separate")?;
                }
                w.x.start_element("w:hyperlink")?;
                w.x.write_attribute("w:anchor", &anchor)?;
                w.x.write_attribute("w:history", 1)?;
                w.run_with(None, font.as_ref(), &title.text)?;
                w.x.start_element("w:r")?;
                w.x.write_element("w:tab", &[])?;
                w.x.end_element()?;
                w.fld_char("begin")?;
                w.instr_text(&format!(" PAGEREF {} \\h ", anchor))?;
                w.fld_char("separate")?;
                w.run_with(None, font.as_ref(), "1")?;
                w.fld_char("end")?;
                w.x.end_element()?;
                if i == last {
                    w.fld_char("end")?;
                }
                Ok(())
            })?;
        }
        Ok(())
    }

    /// Inline picture: media part, image relationship and `w:drawing`
    fn drawing(&mut self, image: &Image) -> Result<()> {
        let (data, kind) = image.load()?;
        let (cx, cy) = image
            .style
            .extent_emu_for(crate::image::dimensions(&data));

        self.image_count += 1;
        let n = self.image_count;
        let uri = well_known::media(n, kind.extension());
        let target = uri.target_from(&well_known::document());
        let file_name = uri.file_name().unwrap_or_default().to_string();
        self.package
            .add_media_part(Part::new(uri, kind.mime_type(), data));
        let rel_id = self.rels.add(rel_types::IMAGE, &target);

        let x = &mut self.x;
        x.start_element("w:r")?;
        x.start_element("w:drawing")?;
        x.start_element("wp:inline")?;
        for side in ["distT", "distB", "distL", "distR"] {
            x.write_attribute(side, 0)?;
        }
        x.start_element("wp:extent")?;
        x.write_attribute("cx", cx)?;
        x.write_attribute("cy", cy)?;
        x.end_element()?;
        x.start_element("wp:docPr")?;
        x.write_attribute("id", n)?;
        x.write_attribute("name", format!("Picture {}", n))?;
        x.end_element()?;

        x.start_element("a:graphic")?;
        x.start_element("a:graphicData")?;
        x.write_attribute("uri", crate::xml::PIC)?;
        x.start_element("pic:pic")?;

        x.start_element("pic:nvPicPr")?;
        x.start_element("pic:cNvPr")?;
        x.write_attribute("id", 0)?;
        x.write_attribute("name", &file_name)?;
        x.end_element()?;
        x.write_element("pic:cNvPicPr", &[])?;
        x.end_element()?;

        x.start_element("pic:blipFill")?;
        x.write_element("a:blip", &[("r:embed", rel_id.as_str())])?;
        x.start_element("a:stretch")?;
        x.write_element("a:fillRect", &[])?;
        x.end_element()?;
        x.end_element()?;

        x.start_element("pic:spPr")?;
        x.start_element("a:xfrm")?;
        x.write_element("a:off", &[("x", "0"), ("y", "0")])?;
        x.start_element("a:ext")?;
        x.write_attribute("cx", cx)?;
        x.write_attribute("cy", cy)?;
        x.end_element()?;
        x.end_element()?;
        x.start_element("a:prstGeom")?;
        x.write_attribute("prst", "rect")?;
        x.write_element("a:avLst", &[])?;
        x.end_element()?;
        x.end_element()?;

        // pic:pic, a:graphicData, a:graphic, wp:inline, w:drawing, w:r
        for _ in 0..6 {
            x.end_element()?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use crate::model::{
        ChangeKind, Document, Element, Field, Image, Link, ListItem, Text, TextRun, TrackChange,
        Tracked,
    };
    use crate::opc::{well_known, Package};
    use crate::style::{FontStyle, NumberingStyle, SectionStyle};
    use crate::writer::{word, WriterOptions};

    fn body_of(doc: &Document) -> String {
        let bytes = word::write(doc, &WriterOptions::default()).unwrap();
        let package = Package::from_bytes(&bytes).unwrap();
        package
            .part(&well_known::document())
            .unwrap()
            .data_as_str()
            .unwrap()
            .to_string()
    }

    fn doc_with(elements: Vec<Element>) -> Document {
        let mut doc = Document::new();
        let section = doc.add_section(SectionStyle::default());
        for e in elements {
            section.push(e);
        }
        doc
    }

    #[test]
    fn test_text_with_inline_font() {
        let doc = doc_with(vec![Text::new("Bold").with_font(FontStyle::new().bold()).into()]);
        assert!(body_of(&doc).contains("<w:p><w:r><w:rPr><w:b/></w:rPr><w:t>Bold</w:t></w:r></w:p>"));
    }

    #[test]
    fn test_named_character_style() {
        let mut doc = doc_with(vec![
            Text::new("x").with_font(crate::style::StyleRef::<FontStyle>::named("Strong")).into(),
        ]);
        doc.styles.define("Strong", FontStyle::new().bold(), None, None);
        assert!(body_of(&doc).contains(r#"<w:rStyle w:val="Strong"/>"#));
    }

    #[test]
    fn test_text_run_children_share_paragraph() {
        let mut run = TextRun::new();
        run.push(Text::new("a"))
            .push(Element::TextBreak)
            .push(Link::new("https://example.com", "b"));
        let body = body_of(&doc_with(vec![run.into()]));
        assert_eq!(body.matches("<w:p>").count(), 1);
        assert!(body.contains("<w:r><w:br/></w:r>"));
        assert!(body.contains("<w:hyperlink r:id=\"rId"));
    }

    #[test]
    fn test_breaks_at_block_level() {
        let body = body_of(&doc_with(vec![Element::PageBreak, Element::TextBreak]));
        assert!(body.contains(r#"<w:p><w:r><w:br w:type="page"/></w:r></w:p><w:p/>"#));
    }

    #[test]
    fn test_field_runs() {
        let body = body_of(&doc_with(vec![Field::page().into()]));
        assert!(body.contains(r#"<w:fldChar w:fldCharType="begin"/>"#));
        assert!(body.contains("> PAGE </w:instrText>"));
        assert!(body.contains(r#"<w:fldChar w:fldCharType="end"/>"#));
    }

    #[test]
    fn test_tracked_deletion_uses_del_text() {
        let change = TrackChange::new(ChangeKind::Delete, "Reviewer");
        let body = body_of(&doc_with(vec![Tracked::new(change, Text::new("gone")).into()]));
        assert!(body.contains(r#"<w:del w:id="1" w:author="Reviewer">"#));
        assert!(body.contains("<w:delText>gone</w:delText>"));
    }

    #[test]
    fn test_list_item_numbering() {
        let mut doc = doc_with(vec![
            ListItem::new("first", 0).with_numbering("Numbers").into(),
            ListItem::new("bullet", 1).into(),
        ]);
        doc.styles.define("Numbers", NumberingStyle::decimal(), None, None);
        let body = body_of(&doc);
        assert!(body.contains(r#"<w:ilvl w:val="0"/><w:numId w:val="1"/>"#));
        assert!(body.contains(r#"<w:ilvl w:val="1"/><w:numId w:val="2"/>"#));
    }

    #[test]
    fn test_image_part_and_relationship() {
        let image = Image::from_bytes(crate::image::tests::TINY_PNG.to_vec());
        let doc = doc_with(vec![image.into()]);
        let bytes = word::write(&doc, &WriterOptions::default()).unwrap();
        let package = Package::from_bytes(&bytes).unwrap();

        assert!(package.part(&well_known::media(1, "png")).is_some());
        let main = package.main_document_part().unwrap();
        let rels = main.relationships().unwrap();
        assert!(rels.iter().any(|r| r.target == "media/sectionImage1.png"));
        let body = main.data_as_str().unwrap();
        assert!(body.contains("<wp:inline"));
        assert!(body.contains(r#"name="sectionImage1.png""#));
    }
}

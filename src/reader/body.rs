//! Body content: sections, paragraphs, runs and tables

use super::properties::{self, PartReference};
use super::{parse_part, DocxReader};
use crate::error::Result;
use crate::model::{
    Bookmark, ChangeKind, Element, Field, HeaderFooter, HeaderFooterKind, Image, Link, ListItem,
    NoteReference, Section, Table, Text, TextRun, Title, Toc, TrackChange, Tracked, Wrapping,
};
use crate::model::{parse_w3c_date, Cell, Row};
use crate::opc::{Part, TargetMode};
use crate::style::{FontStyle, ParagraphStyle, StyleRef};
use crate::units::Length;
use crate::xml::XmlElement;

/// Style reference from an optional name and inline properties that may be
/// empty
fn style_ref<P: PartialEq + Default>(name: Option<String>, inline: P) -> Option<StyleRef<P>> {
    let inline = (inline != P::default()).then_some(inline);
    (name.is_some() || inline.is_some()).then_some(StyleRef { name, inline })
}

/// Heading depth for a `Title` / `Heading{n}` style id
fn heading_depth(style_id: &str) -> Option<u8> {
    if style_id.eq_ignore_ascii_case("Title") {
        return Some(0);
    }
    let prefix = style_id.get(..7)?;
    if !prefix.eq_ignore_ascii_case("heading") {
        return None;
    }
    style_id[7..]
        .trim()
        .parse::<u8>()
        .ok()
        .filter(|d| (1..=9).contains(d))
}

/// Net `fldChar` begin/end count of an element and its descendants
fn field_balance(e: &XmlElement) -> i32 {
    e.elements()
        .map(|c| match (c.local_name(), c.attr("fldCharType")) {
            ("fldChar", Some("begin")) => 1,
            ("fldChar", Some("end")) => -1,
            _ => field_balance(c),
        })
        .sum()
}

/// A paragraph that opens a table of contents field
fn toc_start(p: &XmlElement) -> Option<Toc> {
    let instruction = match p.find("instrText") {
        Some(instr) => instr.text(),
        None => p.find("fldSimple")?.attr("instr")?.to_string(),
    };
    let instruction = instruction.trim();
    if !instruction.to_ascii_uppercase().starts_with("TOC") {
        return None;
    }

    let mut toc = Toc::default();
    let mut tokens = instruction.split_whitespace();
    while let Some(token) = tokens.next() {
        if token != "\\o" {
            continue;
        }
        let range = tokens.next().unwrap_or_default().trim_matches('"');
        if let Some((min, max)) = range.split_once('-') {
            if let (Ok(min), Ok(max)) = (min.parse(), max.parse()) {
                toc.min_depth = min;
                toc.max_depth = max;
            }
        }
    }
    let tab = p
        .child("pPr")
        .and_then(|ppr| properties::paragraph(ppr).tabs)
        .and_then(|tabs| tabs.into_iter().last());
    if let Some(tab) = tab {
        toc.tab_position = tab.position;
        toc.tab_leader = tab.leader;
    }
    Some(toc)
}

/// Drop the empty paragraph Word keeps after a trailing table or bookmark,
/// or as the only content of a container
fn trim_padding(elements: &mut Vec<Element>) {
    if !matches!(elements.last(), Some(Element::TextBreak)) {
        return;
    }
    let padding = match elements.len() {
        1 => true,
        n => matches!(elements[n - 2], Element::Table(_) | Element::Bookmark(_)),
    };
    if padding {
        elements.pop();
    }
}

/// Complex field being collected across runs
#[derive(Debug, Default)]
struct ComplexField {
    depth: u32,
    instruction: String,
    result: String,
    separated: bool,
}

/// Inline content of one paragraph
#[derive(Debug, Default)]
struct Inlines {
    elements: Vec<Element>,
    field: Option<ComplexField>,
}

impl Inlines {
    fn push(&mut self, element: Element, change: Option<&TrackChange>) {
        match change {
            Some(change) => self
                .elements
                .push(Element::Tracked(Tracked::new(change.clone(), element))),
            None => self.elements.push(element),
        }
    }

    /// Run text; inside a field only the result counts
    fn text(&mut self, text: String, font: Option<&StyleRef<FontStyle>>, change: Option<&TrackChange>) {
        if text.is_empty() {
            return;
        }
        if let Some(field) = &mut self.field {
            if field.separated {
                field.result.push_str(&text);
            }
            return;
        }
        self.push(
            Element::Text(Text {
                text,
                font: font.cloned(),
                paragraph: None,
            }),
            change,
        );
    }

    fn field_char(&mut self, kind: Option<&str>) {
        match kind {
            Some("begin") => match &mut self.field {
                Some(field) => field.depth += 1,
                None => {
                    self.field = Some(ComplexField {
                        depth: 1,
                        ..Default::default()
                    })
                }
            },
            Some("separate") => {
                if let Some(field) = self.field.as_mut().filter(|f| f.depth == 1) {
                    field.separated = true;
                }
            }
            Some("end") => {
                let done = match &mut self.field {
                    Some(field) => {
                        field.depth = field.depth.saturating_sub(1);
                        field.depth == 0
                    }
                    None => false,
                };
                if done {
                    self.finish_field();
                }
            }
            _ => {}
        }
    }

    fn instruction(&mut self, text: &str) {
        if let Some(field) = self.field.as_mut().filter(|f| f.depth == 1 && !f.separated) {
            field.instruction.push_str(text);
        }
    }

    /// A field whose instruction cannot be parsed keeps its result text
    fn finish_field(&mut self) {
        let Some(field) = self.field.take() else {
            return;
        };
        match Field::parse_instruction(field.instruction.trim()) {
            Ok(parsed) => {
                let parsed = if field.result.is_empty() {
                    parsed
                } else {
                    parsed.with_text(field.result)
                };
                self.elements.push(Element::Field(parsed));
            }
            Err(e) => {
                log::warn!("docx reader: {}, keeping the field result as text", e);
                self.text(field.result, None, None);
            }
        }
    }

    fn finish(mut self) -> Vec<Element> {
        if self.field.is_some() {
            log::warn!("docx reader: field not closed within its paragraph");
            self.finish_field();
        }
        self.elements
    }
}

impl DocxReader<'_> {
    /// Walk `w:body`, closing a section at every `w:sectPr`
    pub(super) fn read_body(&mut self, body: &XmlElement, part: &Part) -> Result<()> {
        let mut section = Section::default();
        let mut toc_depth = 0;

        for child in body.elements() {
            if child.is("sectPr") {
                self.close_section(&mut section, Some(child), part)?;
                continue;
            }
            self.read_block(child, part, &mut section.elements, &mut toc_depth)?;
            let sect_pr = child
                .is("p")
                .then(|| child.child("pPr").and_then(|ppr| ppr.child("sectPr")))
                .flatten();
            if let Some(sect_pr) = sect_pr {
                self.close_section(&mut section, Some(sect_pr), part)?;
            }
        }

        if !section.elements.is_empty() || self.doc.sections.is_empty() {
            self.close_section(&mut section, None, part)?;
        }
        log::debug!("docx reader: {} sections", self.doc.sections.len());
        Ok(())
    }

    fn close_section(
        &mut self,
        section: &mut Section,
        sect_pr: Option<&XmlElement>,
        part: &Part,
    ) -> Result<()> {
        let mut done = std::mem::take(section);
        trim_padding(&mut done.elements);
        if let Some(sect_pr) = sect_pr {
            let (style, references) = properties::section(sect_pr);
            done.style = style;
            for reference in references {
                self.read_header_footer(&mut done, &reference, part)?;
            }
        }
        self.doc.sections.push(done);
        Ok(())
    }

    fn read_header_footer(
        &mut self,
        section: &mut Section,
        reference: &PartReference,
        part: &Part,
    ) -> Result<()> {
        let Some(target) = self.related(part, &reference.rel_id) else {
            return Ok(());
        };
        let root = parse_part(target)?;
        let content = HeaderFooter {
            kind: HeaderFooterKind::parse(&reference.kind),
            elements: self.read_blocks(&root, target)?,
        };
        if reference.footer {
            section.footers.push(content);
        } else {
            section.headers.push(content);
        }
        Ok(())
    }

    /// Block content of a cell, header, footer or note
    pub(super) fn read_blocks(&mut self, container: &XmlElement, part: &Part) -> Result<Vec<Element>> {
        let mut elements = Vec::new();
        let mut toc_depth = 0;
        for child in container.elements() {
            self.read_block(child, part, &mut elements, &mut toc_depth)?;
        }
        trim_padding(&mut elements);
        Ok(elements)
    }

    /// One block-level child. Paragraphs belonging to a table of contents
    /// field are folded into a single [`Toc`] element; `toc_depth` tracks
    /// the field nesting while they are skipped.
    fn read_block(
        &mut self,
        child: &XmlElement,
        part: &Part,
        out: &mut Vec<Element>,
        toc_depth: &mut i32,
    ) -> Result<()> {
        match child.local_name() {
            "p" => {
                if *toc_depth > 0 {
                    *toc_depth = (*toc_depth + field_balance(child)).max(0);
                    return Ok(());
                }
                if let Some(toc) = toc_start(child) {
                    out.push(Element::Toc(toc));
                    *toc_depth = field_balance(child).max(0);
                    return Ok(());
                }
                if let Some(element) = self.read_paragraph(child, part)? {
                    out.push(element);
                }
            }
            "tbl" => out.push(Element::Table(self.read_table(child, part)?)),
            "bookmarkStart" => {
                if let Some(name) = child.attr("name").filter(|n| *n != "_GoBack") {
                    out.push(Element::Bookmark(Bookmark::new(name)));
                }
            }
            "sdt" => {
                if let Some(content) = child.child("sdtContent") {
                    for inner in content.elements() {
                        self.read_block(inner, part, out, toc_depth)?;
                    }
                }
            }
            "customXml" => {
                for inner in child.elements() {
                    self.read_block(inner, part, out, toc_depth)?;
                }
            }
            "bookmarkEnd" | "proofErr" | "permStart" | "permEnd" | "commentRangeStart"
            | "commentRangeEnd" | "sectPr" | "tblPr" | "tcPr" => {}
            other => log::warn!("docx reader: skipping unsupported body element '{}'", other),
        }
        Ok(())
    }

    /// A paragraph becomes a list item, a title, a single element or a
    /// [`TextRun`]; an empty one is a [`Element::TextBreak`] unless it only
    /// carries section properties.
    fn read_paragraph(&mut self, p: &XmlElement, part: &Part) -> Result<Option<Element>> {
        let ppr = p.child("pPr");
        let style_id = ppr.and_then(|ppr| ppr.child_val("pStyle"));
        let props = ppr.map(properties::paragraph).unwrap_or_default();
        let numbering = ppr.and_then(properties::numbering);

        let mut inlines = Inlines::default();
        self.read_inlines(p, part, &mut inlines, None)?;
        let mut elements = inlines.finish();

        if let Some((num_id, depth)) = numbering {
            let list = self.lists.get(&num_id).cloned();
            if list.is_none() {
                log::warn!("docx reader: paragraph uses undefined numbering {}", num_id);
            }
            return Ok(Some(Element::ListItem(ListItem {
                elements,
                depth,
                numbering: list,
                paragraph: style_ref(style_id.map(str::to_string), props),
            })));
        }

        // Revisions have no place in a title; tracked headings stay runs
        let tracked = elements.iter().any(|e| matches!(e, Element::Tracked(_)));
        let depth = style_id.and_then(|id| {
            heading_depth(id).or_else(|| self.style_ids.name(id).and_then(heading_depth))
        });
        if let (Some(depth), false) = (depth, tracked) {
            let text: String = elements
                .iter()
                .filter(|e| matches!(e, Element::Text(_)))
                .map(Element::text)
                .collect();
            let mut font = elements
                .iter()
                .find_map(|e| match e {
                    Element::Text(t) => t.font.as_ref().and_then(|f| f.inline.clone()),
                    _ => None,
                })
                .unwrap_or_default();
            if !props.is_empty() {
                font = font.with_paragraph(props);
            }
            let style = (!font.is_empty()).then(|| StyleRef::inline(font));
            return Ok(Some(Element::Title(Title { text, depth, style })));
        }

        let paragraph = style_ref(style_id.map(str::to_string), props);
        if elements.len() > 1 {
            return Ok(Some(Element::TextRun(TextRun { elements, paragraph })));
        }
        let Some(single) = elements.pop() else {
            let section_only = ppr.map_or(false, |ppr| ppr.child("sectPr").is_some());
            return Ok((!section_only).then_some(Element::TextBreak));
        };

        Ok(Some(match (single, paragraph) {
            (Element::Text(mut text), paragraph) => {
                text.paragraph = paragraph;
                Element::Text(text)
            }
            (Element::Image(mut image), Some(style)) if image_alignment_only(&style) => {
                image.style.alignment = style.inline.and_then(|p| p.alignment);
                Element::Image(image)
            }
            (single, None) => single,
            (single, paragraph) => Element::TextRun(TextRun {
                elements: vec![single],
                paragraph,
            }),
        }))
    }

    fn read_inlines(
        &mut self,
        container: &XmlElement,
        part: &Part,
        out: &mut Inlines,
        change: Option<&TrackChange>,
    ) -> Result<()> {
        for child in container.elements() {
            match child.local_name() {
                "r" => self.read_run(child, part, out, change)?,
                "hyperlink" => self.read_hyperlink(child, part, out, change)?,
                "fldSimple" => self.read_simple_field(child, part, out, change)?,
                "ins" | "del" => {
                    let kind = if child.is("ins") {
                        ChangeKind::Insert
                    } else {
                        ChangeKind::Delete
                    };
                    let tracked = TrackChange {
                        kind,
                        author: child.attr("author").unwrap_or_default().to_string(),
                        date: child.attr("date").and_then(parse_w3c_date),
                    };
                    self.read_inlines(child, part, out, Some(&tracked))?;
                }
                "bookmarkStart" => {
                    if let Some(name) = child.attr("name").filter(|n| *n != "_GoBack") {
                        out.push(Element::Bookmark(Bookmark::new(name)), None);
                    }
                }
                "smartTag" | "customXml" => self.read_inlines(child, part, out, change)?,
                "sdt" => {
                    if let Some(content) = child.child("sdtContent") {
                        self.read_inlines(content, part, out, change)?;
                    }
                }
                "pPr" | "bookmarkEnd" | "proofErr" | "commentRangeStart" | "commentRangeEnd"
                | "permStart" | "permEnd" => {}
                other => log::debug!("docx reader: skipping inline element '{}'", other),
            }
        }
        Ok(())
    }

    /// Font reference of a run: `w:rStyle` mapped to its registry name plus
    /// the direct properties
    fn run_font(&self, r: &XmlElement) -> Option<StyleRef<FontStyle>> {
        let rpr = r.child("rPr")?;
        let name = rpr
            .child_val("rStyle")
            .map(|id| self.style_ids.char_style(id));
        style_ref(name, properties::font(rpr))
    }

    fn read_run(
        &mut self,
        r: &XmlElement,
        part: &Part,
        out: &mut Inlines,
        change: Option<&TrackChange>,
    ) -> Result<()> {
        let font = self.run_font(r);
        let mut text = String::new();

        for child in r.elements() {
            match child.local_name() {
                "t" | "delText" => text.push_str(&child.text()),
                "tab" => text.push('\t'),
                "cr" => text.push('\n'),
                "br" if child.attr("type") == Some("page") => {
                    out.text(std::mem::take(&mut text), font.as_ref(), change);
                    out.push(Element::PageBreak, change);
                }
                "br" => text.push('\n'),
                "noBreakHyphen" => text.push('-'),
                "sym" => {
                    let symbol = child
                        .attr("char")
                        .and_then(|c| u32::from_str_radix(c, 16).ok())
                        .and_then(char::from_u32);
                    if let Some(symbol) = symbol {
                        text.push(symbol);
                    }
                }
                "fldChar" => {
                    out.text(std::mem::take(&mut text), font.as_ref(), change);
                    out.field_char(child.attr("fldCharType"));
                }
                "instrText" => out.instruction(&child.text()),
                "drawing" => {
                    out.text(std::mem::take(&mut text), font.as_ref(), change);
                    if let Some(image) = self.read_drawing(child, part) {
                        out.push(Element::Image(image), change);
                    }
                }
                "footnoteReference" | "endnoteReference" => {
                    out.text(std::mem::take(&mut text), font.as_ref(), change);
                    let Some(id) = child.attr_parse::<u32>("id") else {
                        continue;
                    };
                    let reference = NoteReference { id };
                    let element = if child.is("footnoteReference") {
                        Element::Footnote(reference)
                    } else {
                        Element::Endnote(reference)
                    };
                    out.push(element, change);
                }
                "rPr" | "footnoteRef" | "endnoteRef" | "lastRenderedPageBreak" | "softHyphen" => {}
                other => log::debug!("docx reader: skipping run content '{}'", other),
            }
        }
        out.text(text, font.as_ref(), change);
        Ok(())
    }

    fn read_hyperlink(
        &mut self,
        link: &XmlElement,
        part: &Part,
        out: &mut Inlines,
        change: Option<&TrackChange>,
    ) -> Result<()> {
        let external = link.attr_exact("r:id").or_else(|| link.attr("id")).and_then(|id| {
            let rel = part.relationships()?.get(id)?;
            if rel.target_mode != TargetMode::External {
                log::debug!("docx reader: hyperlink {} targets an internal part", id);
            }
            Some(rel.target.clone())
        });
        let (target, internal) = match (external, link.attr("anchor")) {
            (Some(url), _) => (url, false),
            (None, Some(anchor)) => (anchor.to_string(), true),
            (None, None) => return self.read_inlines(link, part, out, change),
        };

        let mut inner = Inlines::default();
        self.read_inlines(link, part, &mut inner, None)?;
        let inner = inner.finish();
        let font = inner.iter().find_map(|e| match e {
            Element::Text(t) => t.font.clone(),
            _ => None,
        });
        let text = inner.iter().map(Element::text).collect();

        out.push(
            Element::Link(Link {
                target,
                text,
                internal,
                font,
            }),
            change,
        );
        Ok(())
    }

    fn read_simple_field(
        &mut self,
        fld: &XmlElement,
        part: &Part,
        out: &mut Inlines,
        change: Option<&TrackChange>,
    ) -> Result<()> {
        let instruction = fld.attr("instr").unwrap_or_default();
        match Field::parse_instruction(instruction.trim()) {
            Ok(field) => {
                let result = fld.text();
                let field = if result.is_empty() {
                    field
                } else {
                    field.with_text(result)
                };
                out.push(Element::Field(field), change);
                Ok(())
            }
            Err(e) => {
                log::warn!("docx reader: {}, keeping the field result as text", e);
                self.read_inlines(fld, part, out, change)
            }
        }
    }

    /// `w:drawing` → image bytes from the related media part, size from
    /// `wp:extent`
    fn read_drawing(&self, drawing: &XmlElement, part: &Part) -> Option<Image> {
        let Some(rel_id) = drawing.find("blip").and_then(|b| b.attr("embed")) else {
            log::warn!("docx reader: drawing without an embedded picture skipped");
            return None;
        };
        let media = self.related(part, rel_id)?;
        let mut image = Image::from_bytes(media.data().to_vec());

        if let Some(extent) = drawing.find("extent") {
            image.style.width = extent.attr_parse::<f64>("cx").map(Length::emu);
            image.style.height = extent.attr_parse::<f64>("cy").map(Length::emu);
        }
        if let Some(anchor) = drawing.child("anchor") {
            image.style.wrapping = if anchor.child("wrapSquare").is_some() {
                Wrapping::Square
            } else if anchor.child("wrapTight").is_some() || anchor.child("wrapThrough").is_some() {
                Wrapping::Tight
            } else if anchor.attr("behindDoc") == Some("1") {
                Wrapping::Behind
            } else {
                Wrapping::Infront
            };
        }
        Some(image)
    }

    fn read_table(&mut self, tbl: &XmlElement, part: &Part) -> Result<Table> {
        let (style_id, props) = tbl.child("tblPr").map(properties::table).unwrap_or_default();
        let grid: Vec<f64> = tbl
            .child("tblGrid")
            .map(|g| {
                g.children_named("gridCol")
                    .filter_map(|c| c.attr_parse::<f64>("w"))
                    .collect()
            })
            .unwrap_or_default();

        let mut table = Table {
            rows: Vec::new(),
            style: style_ref(style_id, props),
        };
        for tr in tbl.children_named("tr") {
            let (height, row_style) = tr.child("trPr").map(properties::row).unwrap_or_default();
            let mut row = Row {
                cells: Vec::new(),
                height,
                style: (row_style != Default::default()).then_some(row_style),
            };

            let mut column = 0;
            for tc in tr.children_named("tc") {
                let (mut width, cell_style) =
                    tc.child("tcPr").map(properties::cell).unwrap_or_default();
                let span = cell_style.grid_span.unwrap_or(1).max(1) as usize;
                if width.is_auto() && column + span <= grid.len() {
                    width = Length::twip(grid[column..column + span].iter().sum());
                }
                column += span;

                row.cells.push(Cell {
                    elements: self.read_blocks(tc, part)?,
                    width,
                    style: (cell_style != Default::default()).then_some(cell_style),
                });
            }
            table.rows.push(row);
        }
        Ok(table)
    }
}

/// True when a paragraph reference only sets an alignment, as written
/// around a block-level image
fn image_alignment_only(style: &StyleRef<ParagraphStyle>) -> bool {
    style.name.is_none()
        && style.inline.as_ref().map_or(false, |p| {
            p.alignment.is_some()
                && *p
                    == ParagraphStyle {
                        alignment: p.alignment,
                        ..Default::default()
                    }
        })
}

#[cfg(test)]
mod tests {
    use super::super::tests::package_with;
    use super::*;
    use crate::model::{Document, FieldKind};
    use crate::opc::rel_types;
    use crate::style::{Alignment, VerticalMerge};
    use pretty_assertions::assert_eq;

    fn body_of(xml: &str) -> Document {
        crate::reader::load(&package_with(xml, &[])).unwrap()
    }

    fn elements_of(xml: &str) -> Vec<Element> {
        let mut doc = body_of(xml);
        doc.sections.remove(0).elements
    }

    #[test]
    fn test_heading_depth() {
        assert_eq!(heading_depth("Title"), Some(0));
        assert_eq!(heading_depth("Heading2"), Some(2));
        assert_eq!(heading_depth("heading 3"), Some(3));
        assert_eq!(heading_depth("Heading10"), None);
        assert_eq!(heading_depth("Head"), None);
        assert_eq!(heading_depth("Normal"), None);
    }

    #[test]
    fn test_runs_keep_font_properties() {
        let elements = elements_of(
            r#"<w:p><w:r><w:rPr><w:b/></w:rPr><w:t>Bold</w:t></w:r>
            <w:r><w:t xml:space="preserve"> and </w:t></w:r>
            <w:r><w:rPr><w:i/></w:rPr><w:t>italic</w:t></w:r></w:p>"#,
        );
        let Element::TextRun(run) = &elements[0] else {
            panic!("expected a text run, got {:?}", elements);
        };
        assert_eq!(run.elements.len(), 3);
        let Element::Text(bold) = &run.elements[0] else {
            panic!("expected text");
        };
        assert_eq!(bold.font.as_ref().and_then(|f| f.inline.as_ref()).and_then(|f| f.bold), Some(true));
        let Element::Text(plain) = &run.elements[1] else {
            panic!("expected text");
        };
        assert_eq!(plain.text, " and ");
        assert!(plain.font.is_none());
    }

    #[test]
    fn test_empty_paragraph_is_text_break() {
        let elements = elements_of(r#"<w:p><w:r><w:t>a</w:t></w:r></w:p><w:p/><w:p><w:r><w:t>b</w:t></w:r></w:p>"#);
        assert_eq!(elements[1], Element::TextBreak);
        assert_eq!(elements.len(), 3);
    }

    #[test]
    fn test_titles_and_list_items() {
        let elements = elements_of(
            r#"<w:p><w:pPr><w:pStyle w:val="Heading2"/></w:pPr><w:r><w:t>Scope</w:t></w:r></w:p>
            <w:p><w:pPr><w:numPr><w:ilvl w:val="1"/><w:numId w:val="7"/></w:numPr></w:pPr><w:r><w:t>item</w:t></w:r></w:p>"#,
        );
        assert_eq!(elements[0], Element::Title(Title::new("Scope", 2)));
        let Element::ListItem(item) = &elements[1] else {
            panic!("expected a list item");
        };
        assert_eq!(item.depth, 1);
        assert_eq!(item.numbering, None);
        assert_eq!(item.text(), "item");
    }

    #[test]
    fn test_localized_heading_found_by_style_name() {
        let styles = format!(
            r#"<w:styles xmlns:w="{}"><w:style w:type="paragraph" w:styleId="berschrift1">
                <w:name w:val="heading 1"/><w:pPr><w:outlineLvl w:val="0"/></w:pPr></w:style></w:styles>"#,
            "http://schemas.openxmlformats.org/wordprocessingml/2006/main"
        );
        let bytes = package_with(
            r#"<w:p><w:pPr><w:pStyle w:val="berschrift1"/></w:pPr><w:r><w:t>Einleitung</w:t></w:r></w:p>"#,
            &[(rel_types::STYLES, "styles.xml", &styles)],
        );
        let doc = crate::reader::load(&bytes).unwrap();
        assert_eq!(doc.sections[0].elements, vec![Element::Title(Title::new("Einleitung", 1))]);
    }

    #[test]
    fn test_tracked_heading_keeps_revisions() {
        let elements = elements_of(
            r#"<w:p><w:pPr><w:pStyle w:val="Heading1"/></w:pPr>
            <w:del w:id="1" w:author="Ann"><w:r><w:delText>Old </w:delText></w:r></w:del>
            <w:r><w:t>Report</w:t></w:r></w:p>"#,
        );
        let Element::TextRun(run) = &elements[0] else {
            panic!("expected a text run, got {:?}", elements);
        };
        assert_eq!(
            run.paragraph.as_ref().and_then(|p| p.name.as_deref()),
            Some("Heading1")
        );
        let Element::Tracked(del) = &run.elements[0] else {
            panic!("expected a tracked deletion");
        };
        assert_eq!(del.change.kind, ChangeKind::Delete);
        assert_eq!(del.element.text(), "Old ");
        assert_eq!(run.elements[1], Element::Text(Text::new("Report")));
    }

    #[test]
    fn test_section_breaks() {
        let doc = body_of(
            r#"<w:p><w:r><w:t>first</w:t></w:r></w:p>
            <w:p><w:pPr><w:sectPr><w:pgSz w:w="16838" w:h="11906" w:orient="landscape"/></w:sectPr></w:pPr></w:p>
            <w:p><w:r><w:t>second</w:t></w:r></w:p>
            <w:sectPr><w:pgSz w:w="11906" w:h="16838"/></w:sectPr>"#,
        );
        assert_eq!(doc.sections.len(), 2);
        assert_eq!(doc.sections[0].elements.len(), 1);
        assert_eq!(doc.sections[0].style.page_width, Some(16838));
        assert_eq!(doc.sections[1].elements[0].text(), "second");
        assert_eq!(doc.sections[1].style.page_width, Some(11906));
    }

    #[test]
    fn test_missing_section_properties_use_defaults() {
        let doc = body_of(r#"<w:p><w:r><w:t>x</w:t></w:r></w:p>"#);
        assert_eq!(doc.sections.len(), 1);
        assert_eq!(doc.sections[0].style.page_width(), 11906);
        assert_eq!(doc.sections[0].style.columns(), 1);
    }

    #[test]
    fn test_unknown_body_elements_are_skipped() {
        let elements = elements_of(
            r#"<w:altChunk r:id="rId9"/><w:p><w:r><w:t>kept</w:t></w:r></w:p><w:sectPr/>"#,
        );
        assert_eq!(elements, vec![Element::Text(Text::new("kept"))]);
    }

    #[test]
    fn test_breaks_and_tabs() {
        let elements = elements_of(
            r#"<w:p><w:r><w:t>a</w:t><w:tab/><w:t>b</w:t><w:br/><w:t>c</w:t></w:r></w:p>
            <w:p><w:r><w:br w:type="page"/></w:r></w:p>"#,
        );
        assert_eq!(elements[0], Element::Text(Text::new("a\tb\nc")));
        assert_eq!(elements[1], Element::PageBreak);
    }

    #[test]
    fn test_complex_and_simple_fields() {
        let elements = elements_of(
            r#"<w:p><w:r><w:t xml:space="preserve">Page </w:t></w:r>
            <w:r><w:fldChar w:fldCharType="begin"/></w:r>
            <w:r><w:instrText xml:space="preserve"> PAGE \* ROMAN </w:instrText></w:r>
            <w:r><w:fldChar w:fldCharType="separate"/></w:r>
            <w:r><w:t>iv</w:t></w:r>
            <w:r><w:fldChar w:fldCharType="end"/></w:r></w:p>
            <w:p><w:fldSimple w:instr=" NUMPAGES "><w:r><w:t>12</w:t></w:r></w:fldSimple></w:p>"#,
        );
        let Element::TextRun(run) = &elements[0] else {
            panic!("expected a text run");
        };
        let Element::Field(page) = &run.elements[1] else {
            panic!("expected a field");
        };
        assert_eq!(page.kind, FieldKind::Page);
        assert_eq!(page.properties.format.as_deref(), Some("ROMAN"));
        assert_eq!(page.text.as_deref(), Some("iv"));

        let Element::Field(pages) = &elements[1] else {
            panic!("expected a block field");
        };
        assert_eq!(pages.kind, FieldKind::NumPages);
        assert_eq!(pages.text.as_deref(), Some("12"));
    }

    #[test]
    fn test_unknown_field_keeps_result() {
        let elements = elements_of(
            r#"<w:p><w:r><w:fldChar w:fldCharType="begin"/></w:r><w:r><w:instrText>MERGEFIELD Name</w:instrText></w:r>
            <w:r><w:fldChar w:fldCharType="separate"/></w:r><w:r><w:t>Ada</w:t></w:r>
            <w:r><w:fldChar w:fldCharType="end"/></w:r></w:p>"#,
        );
        assert_eq!(elements, vec![Element::Text(Text::new("Ada"))]);
    }

    #[test]
    fn test_tracked_changes() {
        let elements = elements_of(
            r#"<w:p><w:ins w:id="1" w:author="Ann" w:date="2024-05-01T10:00:00Z"><w:r><w:t>new</w:t></w:r></w:ins>
            <w:del w:id="2" w:author="Bob"><w:r><w:delText>old</w:delText></w:r></w:del></w:p>"#,
        );
        let Element::TextRun(run) = &elements[0] else {
            panic!("expected a text run");
        };
        let Element::Tracked(ins) = &run.elements[0] else {
            panic!("expected a tracked element");
        };
        assert_eq!(ins.change.kind, ChangeKind::Insert);
        assert_eq!(ins.change.author, "Ann");
        assert!(ins.change.date.is_some());
        assert_eq!(ins.element.text(), "new");
        let Element::Tracked(del) = &run.elements[1] else {
            panic!("expected a tracked element");
        };
        assert_eq!(del.change.kind, ChangeKind::Delete);
        assert_eq!(del.element.text(), "old");
    }

    #[test]
    fn test_hyperlinks_and_bookmarks() {
        let elements = elements_of(
            r#"<w:p><w:bookmarkStart w:id="0" w:name="intro"/><w:bookmarkEnd w:id="0"/>
            <w:hyperlink w:anchor="intro"><w:r><w:t>back</w:t></w:r></w:hyperlink></w:p>"#,
        );
        let Element::TextRun(run) = &elements[0] else {
            panic!("expected a text run");
        };
        assert_eq!(run.elements[0], Element::Bookmark(Bookmark::new("intro")));
        assert_eq!(run.elements[1], Element::Link(Link::internal("intro", "back")));
    }

    #[test]
    fn test_table_cells() {
        let elements = elements_of(
            r#"<w:tbl><w:tblPr><w:tblW w:w="0" w:type="auto"/></w:tblPr>
            <w:tblGrid><w:gridCol w:w="1000"/><w:gridCol w:w="2000"/></w:tblGrid>
            <w:tr><w:trPr><w:trHeight w:val="300"/></w:trPr>
              <w:tc><w:tcPr><w:tcW w:w="1000" w:type="dxa"/><w:vMerge w:val="restart"/></w:tcPr><w:p><w:r><w:t>a</w:t></w:r></w:p></w:tc>
              <w:tc><w:p><w:r><w:t>b</w:t></w:r></w:p></w:tc></w:tr>
            <w:tr><w:tc><w:tcPr><w:tcW w:w="3000" w:type="dxa"/><w:gridSpan w:val="2"/></w:tcPr><w:p/></w:tc></w:tr>
            </w:tbl><w:p/><w:sectPr/>"#,
        );
        assert_eq!(elements.len(), 1, "padding paragraph after the table is dropped");
        let Element::Table(table) = &elements[0] else {
            panic!("expected a table");
        };
        assert!(table.style.is_none());
        assert_eq!(table.rows[0].height, Some(300));
        let first = &table.rows[0].cells[0];
        assert_eq!(first.text(), "a");
        assert_eq!(first.style.as_ref().and_then(|s| s.v_merge), Some(VerticalMerge::Restart));
        assert_eq!(table.rows[0].cells[1].width.to_twip(), Some(2000.0));
        assert_eq!(table.rows[1].cells[0].span(), 2);
        assert!(table.rows[1].cells[0].elements.is_empty());
        assert_eq!(table.column_count(), 2);
    }

    #[test]
    fn test_block_image_with_alignment() {
        let png = crate::image::tests::TINY_PNG;
        let mut package = crate::opc::Package::from_bytes(&package_with(
            r#"<w:p><w:pPr><w:jc w:val="center"/></w:pPr><w:r><w:drawing><wp:inline xmlns:wp="wp">
            <wp:extent cx="914400" cy="457200"/><a:graphic xmlns:a="a"><a:graphicData><pic:pic xmlns:pic="pic">
            <pic:blipFill><a:blip r:embed="rIdImg"/></pic:blipFill></pic:pic></a:graphicData></a:graphic>
            </wp:inline></w:drawing></w:r></w:p>"#,
            &[],
        ))
        .unwrap();

        let uri = crate::opc::well_known::media(1, "png");
        package.add_media_part(Part::new(uri, "image/png", png.to_vec()));
        let document = crate::opc::well_known::document();
        let mut main = package.part(&document).unwrap().clone();
        main.ensure_relationships()
            .add_with_id("rIdImg", rel_types::IMAGE, "media/sectionImage1.png", TargetMode::Internal);
        package.add_part(main);

        let doc = crate::reader::load(&package.to_bytes(true).unwrap()).unwrap();
        let Element::Image(image) = &doc.sections[0].elements[0] else {
            panic!("expected an image, got {:?}", doc.sections[0].elements);
        };
        assert_eq!(image.style.alignment, Some(Alignment::Center));
        assert_eq!(image.style.width.as_ref().and_then(|w| w.to_twip()), Some(1440.0));
        assert_eq!(image.data().unwrap(), png.to_vec());
    }

    #[test]
    fn test_table_of_contents_paragraphs_fold() {
        let elements = elements_of(
            r#"<w:p><w:pPr><w:tabs><w:tab w:val="right" w:leader="dot" w:pos="9000"/></w:tabs></w:pPr>
              <w:r><w:fldChar w:fldCharType="begin"/></w:r><w:r><w:instrText> TOC \o "1-3" \h \z \u </w:instrText></w:r>
              <w:r><w:fldChar w:fldCharType="separate"/></w:r>
              <w:hyperlink w:anchor="_Toc1"><w:r><w:t>One</w:t></w:r></w:hyperlink></w:p>
            <w:p><w:hyperlink w:anchor="_Toc2"><w:r><w:t>Two</w:t></w:r></w:hyperlink><w:r><w:fldChar w:fldCharType="end"/></w:r></w:p>
            <w:p><w:pPr><w:pStyle w:val="Heading1"/></w:pPr><w:bookmarkStart w:id="0" w:name="_Toc1"/><w:r><w:t>One</w:t></w:r><w:bookmarkEnd w:id="0"/></w:p>"#,
        );
        assert_eq!(elements.len(), 2);
        let Element::Toc(toc) = &elements[0] else {
            panic!("expected a table of contents");
        };
        assert_eq!((toc.min_depth, toc.max_depth), (1, 3));
        assert_eq!(toc.tab_position, 9000);
        assert_eq!(elements[1], Element::Title(Title::new("One", 1)));
    }
}

//! ODF style grammar: `style:text-properties`, `style:paragraph-properties`
//! and friends, the automatic style table of a part, and `styles.xml`.

use super::{master_page_name, OdfWriter};
use crate::color::Color;
use crate::error::Result;
use crate::model::{title_style_name, Element};
use crate::style::{
    Borders, CellStyle, FontStyle, LineSpacing, NumberingLevel, NumberingStyle, ParagraphStyle,
    SectionStyle, Style, StyleDefinition, StyleFamily, TabKind, TabLeader, TableAlignment,
    TableStyle, Underline, VerticalAlign,
};
use crate::units::twip_to_cm;
use crate::writer::dispatch::{self, StyleWriterFn, StyleWriters};
use crate::writer::format_number;
use crate::xml::{odf, XmlEmitter};
use std::collections::BTreeSet;

/// List style used by list items without a registered numbering style
pub(super) const DEFAULT_LIST_STYLE: &str = "DefaultBullet";

/// Paragraph spacing as written by ODF consumers this output has to match:
/// `17.6 / value` centimetres, two decimals.
pub(super) fn odf_spacing(twips: u32) -> String {
    if twips == 0 {
        return "0cm".to_string();
    }
    format!("{}cm", format_number(17.6 / f64::from(twips), 2))
}

/// Twips as a centimetre length
pub(super) fn length_cm(twips: f64) -> String {
    format!("{}cm", format_number(twip_to_cm(twips), 3))
}

/// `#rrggbb`, `None` for colors without a hex form
pub(super) fn color_value(color: &Color) -> Option<String> {
    color
        .to_hex()
        .map(|hex| format!("#{}", hex.to_ascii_lowercase()))
}

/// Style name for a registry name. Spaces are encoded the way ODF
/// producers do; the original name goes into `style:display-name`.
pub(super) fn style_name(name: &str) -> String {
    name.replace(' ', "_20_")
}

/// Open a `style:style`, naming it after a registry entry
fn start_named(
    x: &mut XmlEmitter,
    name: &str,
    family: &str,
    parent: Option<&str>,
) -> Result<()> {
    let encoded = style_name(name);
    x.start_element("style:style")?;
    x.write_attribute("style:name", &encoded)?;
    if encoded != name {
        x.write_attribute("style:display-name", name)?;
    }
    x.write_attribute("style:family", family)?;
    if let Some(parent) = parent {
        x.write_attribute("style:parent-style-name", style_name(parent))?;
    }
    Ok(())
}

fn on_off(value: bool, on: &'static str, off: &'static str) -> &'static str {
    if value {
        on
    } else {
        off
    }
}

/// `style:text-properties`; nothing for an empty style
pub(super) fn write_text_properties(x: &mut XmlEmitter, font: &FontStyle) -> Result<()> {
    let font = font.font_only();
    if font.is_empty() {
        return Ok(());
    }

    x.start_element("style:text-properties")?;
    if let Some(name) = &font.name {
        if name.contains(' ') {
            x.write_attribute("fo:font-family", format!("'{}'", name))?;
        } else {
            x.write_attribute("fo:font-family", name)?;
        }
    }
    if let Some(name) = &font.east_asia_name {
        x.write_attribute("style:font-family-asian", name)?;
    }
    if let Some(size) = font.size {
        let size = format!("{}pt", format_number(size, 2));
        x.write_attribute("fo:font-size", &size)?;
        x.write_attribute("style:font-size-asian", &size)?;
        x.write_attribute("style:font-size-complex", &size)?;
    }
    if let Some(bold) = font.bold {
        x.write_attribute("fo:font-weight", on_off(bold, "bold", "normal"))?;
    }
    if let Some(italic) = font.italic {
        x.write_attribute("fo:font-style", on_off(italic, "italic", "normal"))?;
    }
    if let Some(underline) = font.underline {
        let style = match underline {
            Underline::None => "none",
            Underline::Dotted => "dotted",
            Underline::Dash => "dash",
            Underline::Wave => "wave",
            _ => "solid",
        };
        x.write_attribute("style:text-underline-style", style)?;
        if underline == Underline::Double {
            x.write_attribute("style:text-underline-type", "double")?;
        }
        if underline == Underline::Thick {
            x.write_attribute("style:text-underline-width", "bold")?;
        }
        if underline == Underline::Words {
            x.write_attribute("style:text-underline-mode", "skip-white-space")?;
        }
    }
    if font.double_strike == Some(true) {
        x.write_attribute("style:text-line-through-style", "solid")?;
        x.write_attribute("style:text-line-through-type", "double")?;
    } else if let Some(strike) = font.strike {
        x.write_attribute("style:text-line-through-style", on_off(strike, "solid", "none"))?;
    }
    if let Some(align) = font.vertical_align {
        let position = match align {
            VerticalAlign::Superscript => "super 58%",
            VerticalAlign::Subscript => "sub 58%",
            VerticalAlign::Baseline => "0% 100%",
        };
        x.write_attribute("style:text-position", position)?;
    }
    if let Some(color) = font.color.as_ref().and_then(color_value) {
        x.write_attribute("fo:color", color)?;
    }
    let background = font
        .highlight
        .map(|h| format!("#{}", h.hex().to_ascii_lowercase()))
        .or_else(|| font.shading.as_ref().and_then(color_value));
    if let Some(background) = background {
        x.write_attribute("fo:background-color", background)?;
    }
    if let Some(small_caps) = font.small_caps {
        x.write_attribute("fo:font-variant", on_off(small_caps, "small-caps", "normal"))?;
    }
    if let Some(caps) = font.all_caps {
        x.write_attribute("fo:text-transform", on_off(caps, "uppercase", "none"))?;
    }
    if font.hidden == Some(true) {
        x.write_attribute("text:display", "none")?;
    }
    if let Some(spacing) = font.spacing {
        let points = f64::from(spacing) / 20.0;
        x.write_attribute("fo:letter-spacing", format!("{}pt", format_number(points, 2)))?;
    }
    if font.kerning.is_some() {
        x.write_attribute("style:letter-kerning", "true")?;
    }
    if let Some(lang) = &font.lang {
        let mut parts = lang.splitn(2, '-');
        if let Some(language) = parts.next().filter(|l| !l.is_empty()) {
            x.write_attribute("fo:language", language)?;
        }
        if let Some(country) = parts.next() {
            x.write_attribute("fo:country", country)?;
        }
    }
    x.end_element()
}

/// `style:paragraph-properties`; nothing for an empty style
pub(super) fn write_paragraph_properties(x: &mut XmlEmitter, props: &ParagraphStyle) -> Result<()> {
    if props_without_odf_form(props) {
        return Ok(());
    }

    x.start_element("style:paragraph-properties")?;
    if let Some(alignment) = props.alignment {
        x.write_attribute("fo:text-align", alignment.as_odf())?;
    }
    if let Some(before) = props.space_before {
        x.write_attribute("fo:margin-top", odf_spacing(before))?;
    }
    if let Some(after) = props.space_after {
        x.write_attribute("fo:margin-bottom", odf_spacing(after))?;
    }
    if let Some(left) = props.indent_left {
        x.write_attribute("fo:margin-left", length_cm(f64::from(left)))?;
    }
    if let Some(right) = props.indent_right {
        x.write_attribute("fo:margin-right", length_cm(f64::from(right)))?;
    }
    if let Some(first) = props.indent_first_line {
        x.write_attribute("fo:text-indent", length_cm(f64::from(first)))?;
    }
    match props.line_spacing {
        Some(LineSpacing::Multiple(m)) => {
            x.write_attribute("fo:line-height", format!("{}%", format_number(m * 100.0, 0)))?
        }
        Some(LineSpacing::Exact(t)) => {
            x.write_attribute("fo:line-height", length_cm(f64::from(t)))?
        }
        Some(LineSpacing::AtLeast(t)) => {
            x.write_attribute("style:line-height-at-least", length_cm(f64::from(t)))?
        }
        None => {}
    }
    if let Some(keep) = props.keep_next {
        x.write_attribute("fo:keep-with-next", on_off(keep, "always", "auto"))?;
    }
    if let Some(keep) = props.keep_lines {
        x.write_attribute("fo:keep-together", on_off(keep, "always", "auto"))?;
    }
    if props.page_break_before == Some(true) {
        x.write_attribute("fo:break-before", "page")?;
    }
    if let Some(widow) = props.widow_control {
        let lines = if widow { 2 } else { 0 };
        x.write_attribute("fo:widows", lines)?;
        x.write_attribute("fo:orphans", lines)?;
    }
    if let Some(fill) = props.shading.as_ref().and_then(color_value) {
        x.write_attribute("fo:background-color", fill)?;
    }
    if props.bidi == Some(true) {
        x.write_attribute("style:writing-mode", "rl-tb")?;
    }

    if let Some(tabs) = props.tabs.as_ref().filter(|t| !t.is_empty()) {
        x.start_element("style:tab-stops")?;
        for tab in tabs.iter().filter(|t| t.kind != TabKind::Clear) {
            x.start_element("style:tab-stop")?;
            x.write_attribute("style:position", length_cm(f64::from(tab.position)))?;
            let kind = match tab.kind {
                TabKind::Center => "center",
                TabKind::Right => "right",
                TabKind::Decimal => "char",
                _ => "left",
            };
            x.write_attribute("style:type", kind)?;
            if let Some(leader) = leader_text(tab.leader) {
                x.write_attribute("style:leader-style", "dotted")?;
                x.write_attribute("style:leader-text", leader)?;
            }
            x.end_element()?;
        }
        x.end_element()?;
    }
    x.end_element()
}

/// Paragraph properties that only carry data ODF expresses elsewhere
/// (outline level, numbering)
fn props_without_odf_form(props: &ParagraphStyle) -> bool {
    let mut rest = props.clone();
    rest.outline_level = None;
    rest.numbering = None;
    rest.is_empty()
}

fn leader_text(leader: TabLeader) -> Option<&'static str> {
    match leader {
        TabLeader::None => None,
        TabLeader::Dot | TabLeader::MiddleDot => Some("."),
        TabLeader::Hyphen => Some("-"),
        TabLeader::Underscore | TabLeader::Heavy => Some("_"),
    }
}

fn write_border_attributes(x: &mut XmlEmitter, borders: &Borders) -> Result<()> {
    for (edge, border) in [
        ("fo:border-top", &borders.top),
        ("fo:border-bottom", &borders.bottom),
        ("fo:border-left", &borders.left),
        ("fo:border-right", &borders.right),
    ] {
        if let Some(border) = border {
            x.write_attribute(edge, border.to_odf())?;
        }
    }
    Ok(())
}

/// `style:table-properties`
fn write_table_properties(x: &mut XmlEmitter, table: &TableStyle, width: Option<u32>) -> Result<()> {
    x.start_element("style:table-properties")?;
    if let Some(width) = width {
        x.write_attribute("style:width", length_cm(f64::from(width)))?;
    }
    let align = match table.alignment {
        Some(TableAlignment::Center) => Some("center"),
        Some(TableAlignment::Right) => Some("right"),
        Some(_) => Some("left"),
        None => width.map(|_| "left"),
    };
    if let Some(align) = align {
        x.write_attribute("table:align", align)?;
    }
    if let Some(indent) = table.indent {
        x.write_attribute("fo:margin-left", length_cm(f64::from(indent)))?;
    }
    if let Some(fill) = table.bg_color.as_ref().and_then(color_value) {
        x.write_attribute("fo:background-color", fill)?;
    }
    x.end_element()
}

/// An automatic style: an anonymous property set referenced by name from
/// content in the same part
#[derive(Clone, Debug, PartialEq)]
pub(super) enum AutoStyle {
    Paragraph {
        parent: Option<String>,
        master_page: Option<String>,
        outline_level: Option<u8>,
        paragraph: ParagraphStyle,
        text: FontStyle,
    },
    Text {
        parent: Option<String>,
        text: FontStyle,
    },
    Table {
        width: u32,
        style: TableStyle,
    },
    Column {
        width: u32,
    },
    Cell(CellStyle),
}

impl AutoStyle {
    fn family(&self) -> &'static str {
        match self {
            AutoStyle::Paragraph { .. } => "paragraph",
            AutoStyle::Text { .. } => "text",
            AutoStyle::Table { .. } => "table",
            AutoStyle::Column { .. } => "table-column",
            AutoStyle::Cell(_) => "table-cell",
        }
    }

    fn name_prefix(&self) -> &'static str {
        match self {
            AutoStyle::Paragraph { .. } => "P",
            AutoStyle::Text { .. } => "T",
            AutoStyle::Table { .. } => "Table",
            AutoStyle::Column { .. } => "Co",
            AutoStyle::Cell(_) => "Ce",
        }
    }
}

/// Automatic styles of one part, deduplicated and named in first-use
/// order (`P1`, `T1`, ...; prefixed for `styles.xml`)
#[derive(Debug, Default)]
pub(super) struct AutoStyles {
    prefix: &'static str,
    entries: Vec<(String, AutoStyle)>,
}

impl AutoStyles {
    pub(super) fn new(prefix: &'static str) -> Self {
        AutoStyles {
            prefix,
            entries: Vec::new(),
        }
    }

    /// Name of the entry equal to `style`, registering it if new
    pub(super) fn add(&mut self, style: AutoStyle) -> String {
        if let Some((name, _)) = self.entries.iter().find(|(_, s)| *s == style) {
            return name.clone();
        }
        let family = style.family();
        let n = self
            .entries
            .iter()
            .filter(|(_, s)| s.family() == family)
            .count()
            + 1;
        let name = format!("{}{}{}", self.prefix, style.name_prefix(), n);
        self.entries.push((name.clone(), style));
        name
    }

    pub(super) fn len(&self) -> usize {
        self.entries.len()
    }

    /// `office:automatic-styles` holding every entry
    pub(super) fn write(&self, x: &mut XmlEmitter) -> Result<()> {
        x.start_element("office:automatic-styles")?;
        self.write_entries(x)?;
        x.end_element()
    }

    pub(super) fn write_entries(&self, x: &mut XmlEmitter) -> Result<()> {
        for (name, style) in &self.entries {
            x.start_element("style:style")?;
            x.write_attribute("style:name", name)?;
            x.write_attribute("style:family", style.family())?;
            match style {
                AutoStyle::Paragraph {
                    parent,
                    master_page,
                    outline_level,
                    paragraph,
                    text,
                } => {
                    if let Some(parent) = parent {
                        x.write_attribute("style:parent-style-name", parent)?;
                    }
                    if let Some(master) = master_page {
                        x.write_attribute("style:master-page-name", master)?;
                    }
                    if let Some(level) = outline_level {
                        x.write_attribute("style:default-outline-level", level)?;
                    }
                    write_paragraph_properties(x, paragraph)?;
                    write_text_properties(x, text)?;
                }
                AutoStyle::Text { parent, text } => {
                    if let Some(parent) = parent {
                        x.write_attribute("style:parent-style-name", parent)?;
                    }
                    write_text_properties(x, text)?;
                }
                AutoStyle::Table { width, style } => {
                    write_table_properties(x, style, Some(*width))?;
                }
                AutoStyle::Column { width } => {
                    x.start_element("style:table-column-properties")?;
                    x.write_attribute("style:column-width", length_cm(f64::from(*width)))?;
                    x.end_element()?;
                }
                AutoStyle::Cell(cell) => {
                    x.start_element("style:table-cell-properties")?;
                    if let Some(fill) = cell.bg_color.as_ref().and_then(color_value) {
                        x.write_attribute("fo:background-color", fill)?;
                    }
                    if let Some(borders) = &cell.borders {
                        write_border_attributes(x, borders)?;
                    }
                    if let Some(v_align) = cell.v_align {
                        x.write_attribute("style:vertical-align", v_align.as_odf())?;
                    }
                    if cell.no_wrap == Some(true) {
                        x.write_attribute("fo:wrap-option", "no-wrap")?;
                    }
                    x.end_element()?;
                }
            }
            x.end_element()?;
        }
        Ok(())
    }
}

impl StyleWriters for OdfWriter<'_> {
    const BACKEND: &'static str = "ODText";

    fn style_writer(family: StyleFamily) -> Option<StyleWriterFn<Self>> {
        let writer: StyleWriterFn<Self> = match family {
            StyleFamily::Font => write_font_style as StyleWriterFn<Self>,
            StyleFamily::Paragraph => write_paragraph_style as StyleWriterFn<Self>,
            StyleFamily::Table => write_table_style as StyleWriterFn<Self>,
            StyleFamily::Numbering => write_numbering_style as StyleWriterFn<Self>,
            // page layouts come from the sections themselves
            StyleFamily::Section => return None,
        };
        Some(writer)
    }
}

fn parent_of(w: &OdfWriter<'_>, def: &StyleDefinition) -> Option<String> {
    def.based_on
        .as_deref()
        .filter(|p| w.doc.styles.contains(p))
        .map(str::to_string)
}

/// Text family, plus a paragraph family style of the same name when the
/// font style carries paragraph properties
fn write_font_style(w: &mut OdfWriter<'_>, def: &StyleDefinition) -> Result<()> {
    let Style::Font(font) = &def.style else {
        return Ok(());
    };
    let parent = parent_of(w, def);

    start_named(&mut w.x, &def.name, "text", parent.as_deref())?;
    write_text_properties(&mut w.x, font)?;
    w.x.end_element()?;

    if let Some(paragraph) = font.paragraph_part() {
        start_named(&mut w.x, &def.name, "paragraph", parent.as_deref())?;
        if let Some(level) = paragraph.outline_level {
            w.x.write_attribute("style:default-outline-level", level + 1)?;
        }
        write_paragraph_properties(&mut w.x, paragraph)?;
        write_text_properties(&mut w.x, font)?;
        w.x.end_element()?;
    }
    Ok(())
}

fn write_paragraph_style(w: &mut OdfWriter<'_>, def: &StyleDefinition) -> Result<()> {
    let Style::Paragraph(paragraph) = &def.style else {
        return Ok(());
    };
    let parent = parent_of(w, def);

    start_named(&mut w.x, &def.name, "paragraph", parent.as_deref())?;
    if let Some(next) = &def.next {
        w.x.write_attribute("style:next-style-name", style_name(next))?;
    }
    if let Some(level) = paragraph.outline_level {
        w.x.write_attribute("style:default-outline-level", level + 1)?;
    }
    write_paragraph_properties(&mut w.x, paragraph)?;
    w.x.end_element()
}

fn write_table_style(w: &mut OdfWriter<'_>, def: &StyleDefinition) -> Result<()> {
    let Style::Table(table) = &def.style else {
        return Ok(());
    };
    let parent = parent_of(w, def);

    start_named(&mut w.x, &def.name, "table", parent.as_deref())?;
    write_table_properties(&mut w.x, table, None)?;
    w.x.end_element()
}

fn write_numbering_style(w: &mut OdfWriter<'_>, def: &StyleDefinition) -> Result<()> {
    let Style::Numbering(numbering) = &def.style else {
        return Ok(());
    };
    write_list_style(&mut w.x, &def.name, numbering)
}

/// `text:list-style` with one level style per numbering level
fn write_list_style(x: &mut XmlEmitter, name: &str, numbering: &NumberingStyle) -> Result<()> {
    x.start_element("text:list-style")?;
    x.write_attribute("style:name", style_name(name))?;
    for level in &numbering.levels {
        write_list_level(x, level)?;
    }
    x.end_element()
}

fn write_list_level(x: &mut XmlEmitter, level: &NumberingLevel) -> Result<()> {
    match level.format.as_odf() {
        Some(format) => {
            // "%1.%2." -> prefix "", suffix ".", two levels shown
            let prefix: String = level.text.chars().take_while(|c| *c != '%').collect();
            let suffix = level
                .text
                .rfind('%')
                .map(|i| level.text[i + 1..].trim_start_matches(|c: char| c.is_ascii_digit()))
                .unwrap_or("");
            let shown = level.text.matches('%').count().max(1);

            x.start_element("text:list-level-style-number")?;
            x.write_attribute("text:level", level.level + 1)?;
            if !prefix.is_empty() {
                x.write_attribute("style:num-prefix", &prefix)?;
            }
            if !suffix.is_empty() {
                x.write_attribute("style:num-suffix", suffix)?;
            }
            x.write_attribute("style:num-format", format)?;
            if level.start != 1 {
                x.write_attribute("text:start-value", level.start)?;
            }
            if shown > 1 {
                x.write_attribute("text:display-levels", shown)?;
            }
        }
        None => {
            let bullet = if level.text.is_empty() {
                "\u{2022}"
            } else {
                level.text.as_str()
            };
            x.start_element("text:list-level-style-bullet")?;
            x.write_attribute("text:level", level.level + 1)?;
            x.write_attribute("text:bullet-char", bullet)?;
        }
    }

    let hanging = level.hanging.unwrap_or(360);
    let left = level
        .indent_left
        .unwrap_or(720 * (i32::from(level.level) + 1));
    x.start_element("style:list-level-properties")?;
    x.write_attribute("text:list-level-position-and-space-mode", "label-alignment")?;
    x.start_element("style:list-level-label-alignment")?;
    x.write_attribute("text:label-followed-by", "listtab")?;
    x.write_attribute("fo:text-indent", length_cm(f64::from(-hanging)))?;
    x.write_attribute("fo:margin-left", length_cm(f64::from(left)))?;
    x.end_element()?;
    x.end_element()?;

    if let Some(font) = &level.font {
        write_text_properties(x, font)?;
    }
    x.end_element()
}

/// `style:page-layout` for one section
fn write_page_layout(x: &mut XmlEmitter, name: &str, section: &SectionStyle) -> Result<()> {
    x.start_element("style:page-layout")?;
    x.write_attribute("style:name", name)?;
    x.start_element("style:page-layout-properties")?;
    x.write_attribute("fo:page-width", length_cm(f64::from(section.page_width())))?;
    x.write_attribute("fo:page-height", length_cm(f64::from(section.page_height())))?;
    x.write_attribute("style:print-orientation", section.orientation().as_str())?;
    x.write_attribute("fo:margin-top", length_cm(f64::from(section.margin_top())))?;
    x.write_attribute("fo:margin-bottom", length_cm(f64::from(section.margin_bottom())))?;
    x.write_attribute("fo:margin-left", length_cm(f64::from(section.margin_left())))?;
    x.write_attribute("fo:margin-right", length_cm(f64::from(section.margin_right())))?;
    if let Some(start) = section.page_number_start {
        x.write_attribute("style:first-page-number", start)?;
    }
    if section.columns() > 1 {
        x.start_element("style:columns")?;
        x.write_attribute("fo:column-count", section.columns())?;
        x.write_attribute("fo:column-gap", length_cm(f64::from(section.column_spacing())))?;
        x.end_element()?;
    }
    x.end_element()?;
    x.end_element()
}

impl OdfWriter<'_> {
    /// `styles.xml`
    pub(super) fn write_styles(&mut self) -> Result<Vec<u8>> {
        let doc = self.doc;
        let default_section = [SectionStyle::default()];
        let layouts: Vec<&SectionStyle> = if doc.sections.is_empty() {
            default_section.iter().collect()
        } else {
            doc.sections.iter().map(|s| &s.style).collect()
        };

        let (masters, auto) = self.render("M", |w| {
            for i in 0..layouts.len() {
                w.x.start_element("style:master-page")?;
                w.x.write_attribute("style:name", master_page_name(i))?;
                w.x.write_attribute("style:page-layout-name", format!("pm{}", i + 1))?;
                if let Some(section) = doc.sections.get(i) {
                    w.write_master_content(section)?;
                }
                w.x.end_element()?;
            }
            Ok(())
        })?;
        let (named, _) = self.render("", |w| w.write_named_styles())?;

        let mut x = self.options.emitter();
        x.start_document()?;
        x.start_element("office:document-styles")?;
        for (key, ns) in odf::document_namespaces() {
            x.write_attribute(key, ns)?;
        }
        x.write_attribute("office:version", "1.2")?;

        x.start_element("office:styles")?;
        x.write_raw(&named)?;
        x.end_element()?;

        x.start_element("office:automatic-styles")?;
        for (i, layout) in layouts.iter().enumerate() {
            write_page_layout(&mut x, &format!("pm{}", i + 1), layout)?;
        }
        auto.write_entries(&mut x)?;
        x.end_element()?;

        x.start_element("office:master-styles")?;
        x.write_raw(&masters)?;
        x.end_element()?;

        x.end_element()?;
        x.get_data()
    }

    /// Contents of `office:styles`
    fn write_named_styles(&mut self) -> Result<()> {
        let doc = self.doc;

        self.x.start_element("style:default-style")?;
        self.x.write_attribute("style:family", "paragraph")?;
        write_paragraph_properties(&mut self.x, &doc.settings.default_paragraph)?;
        write_text_properties(&mut self.x, &doc.settings.default_font())?;
        self.x.end_element()?;

        for def in doc.styles.iter() {
            dispatch::write_style(self, def)?;
        }

        let mut depths = BTreeSet::new();
        let mut needs_default_list = false;
        doc.for_each_element(|e| match e {
            Element::Title(title) => {
                depths.insert(title.depth);
            }
            Element::ListItem(item) => {
                let known = item
                    .numbering
                    .as_deref()
                    .map_or(false, |n| self.is_numbering(n));
                needs_default_list |= !known;
            }
            _ => {}
        });

        for depth in depths {
            let name = title_style_name(depth);
            if doc.styles.contains(&name) {
                continue;
            }
            start_named(&mut self.x, &name, "paragraph", None)?;
            if depth > 0 {
                self.x.write_attribute("style:default-outline-level", depth)?;
            }
            let paragraph = ParagraphStyle {
                keep_next: Some(true),
                ..Default::default()
            };
            write_paragraph_properties(&mut self.x, &paragraph)?;
            let mut font = FontStyle::new().bold();
            if depth == 0 {
                font.size = Some(20.0);
            }
            write_text_properties(&mut self.x, &font)?;
            self.x.end_element()?;
        }

        if needs_default_list {
            write_list_style(&mut self.x, DEFAULT_LIST_STYLE, &NumberingStyle::bullet())?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn emit(f: impl FnOnce(&mut XmlEmitter) -> Result<()>) -> String {
        let mut x = XmlEmitter::memory();
        f(&mut x).unwrap();
        String::from_utf8(x.get_data().unwrap()).unwrap()
    }

    #[test]
    fn test_spacing_constant() {
        assert_eq!(odf_spacing(88), "0.2cm");
        assert_eq!(odf_spacing(3), "5.87cm");
        assert_eq!(odf_spacing(0), "0cm");
    }

    #[test]
    fn test_style_name_encoding() {
        assert_eq!(style_name("Body Text"), "Body_20_Text");
        assert_eq!(style_name("Heading1"), "Heading1");
    }

    #[test]
    fn test_text_properties() {
        let font = FontStyle::new()
            .bold()
            .with_size(12.0)
            .with_name("Times New Roman")
            .with_color(Color::hex("FF0000").unwrap());
        let xml = emit(|x| write_text_properties(x, &font));
        assert!(xml.starts_with("<style:text-properties "));
        assert!(xml.contains(r#"fo:font-family="&apos;Times New Roman&apos;""#));
        assert!(xml.contains(r#"fo:font-size="12pt""#));
        assert!(xml.contains(r#"fo:font-weight="bold""#));
        assert!(xml.contains(r##"fo:color="#ff0000""##));
    }

    #[test]
    fn test_empty_properties_write_nothing() {
        assert_eq!(emit(|x| write_text_properties(x, &FontStyle::new())), "");
        let outline_only = ParagraphStyle {
            outline_level: Some(1),
            ..Default::default()
        };
        assert_eq!(emit(|x| write_paragraph_properties(x, &outline_only)), "");
    }

    #[test]
    fn test_auto_styles_dedupe_and_name_per_family() {
        let mut auto = AutoStyles::new("");
        let bold = AutoStyle::Text {
            parent: None,
            text: FontStyle::new().bold(),
        };
        assert_eq!(auto.add(bold.clone()), "T1");
        assert_eq!(auto.add(AutoStyle::Column { width: 1000 }), "Co1");
        assert_eq!(auto.add(bold), "T1");
        assert_eq!(auto.len(), 2);

        let mut master = AutoStyles::new("M");
        assert_eq!(master.add(AutoStyle::Column { width: 1 }), "MCo1");
    }

    #[test]
    fn test_numbered_list_level() {
        let xml = emit(|x| write_list_style(x, "Steps", &NumberingStyle::decimal()));
        assert!(xml.contains(
            r#"<text:list-level-style-number text:level="1" style:num-suffix="." style:num-format="1">"#
        ));
        assert!(xml.contains(r#"text:level="2" style:num-suffix="." style:num-format="1" text:display-levels="2""#));
    }
}

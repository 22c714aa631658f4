//! Property elements shared by document parts and styles.xml:
//! `w:rPr`, `w:pPr`, `w:tblPr`, `w:trPr`, `w:tcPr` and `w:sectPr`.

use crate::color::Color;
use crate::error::Result;
use crate::style::{
    Border, Borders, CellStyle, FontStyle, ParagraphStyle, RowStyle, SectionStyle, TableStyle,
    VerticalMerge,
};
use crate::units::Length;
use crate::xml::XmlEmitter;

/// Header/footer reference inside a `w:sectPr`
pub(crate) struct HeaderFooterRef {
    pub element: &'static str,
    pub kind: &'static str,
    pub rel_id: String,
}

/// `<w:name/>` or `<w:name w:val="0"/>`
fn toggle(x: &mut XmlEmitter, name: &str, value: Option<bool>) -> Result<()> {
    if let Some(on) = value {
        x.start_element(name)?;
        if !on {
            x.write_attribute("w:val", "0")?;
        }
        x.end_element()?;
    }
    Ok(())
}

/// OOXML color attribute value: hex, or `auto` for colors without one
pub(crate) fn color_value(color: &Color) -> String {
    color.to_hex().unwrap_or_else(|| "auto".to_string())
}

/// `<w:color>`, carrying `w:themeColor` for theme slots
fn write_color(x: &mut XmlEmitter, color: &Color) -> Result<()> {
    x.start_element("w:color")?;
    x.write_attribute("w:val", color_value(color))?;
    if let Color::Theme(theme) = color {
        x.write_attribute("w:themeColor", theme.name())?;
    }
    x.end_element()
}

/// `<w:shd w:val="clear" w:color="auto" w:fill="..."/>`
pub(crate) fn write_shading(x: &mut XmlEmitter, fill: &Color) -> Result<()> {
    x.start_element("w:shd")?;
    x.write_attribute("w:val", "clear")?;
    x.write_attribute("w:color", "auto")?;
    x.write_attribute("w:fill", color_value(fill))?;
    x.end_element()
}

pub(crate) fn write_border(x: &mut XmlEmitter, edge: &str, border: &Border) -> Result<()> {
    x.start_element(&format!("w:{}", edge))?;
    x.write_attribute("w:val", border.style.as_ooxml())?;
    x.write_attribute("w:sz", border.size)?;
    x.write_attribute("w:space", border.space)?;
    x.write_attribute("w:color", color_value(&border.color))?;
    x.end_element()
}

/// Border container such as `w:tblBorders`; cells take the four outer
/// edges only
pub(crate) fn write_borders(
    x: &mut XmlEmitter,
    container: &str,
    borders: &Borders,
    inside: bool,
) -> Result<()> {
    if borders.is_empty() {
        return Ok(());
    }
    x.start_element(container)?;
    for (edge, border) in borders.edges() {
        if !inside && edge.starts_with("inside") {
            continue;
        }
        if let Some(border) = border {
            write_border(x, edge, border)?;
        }
    }
    x.end_element()
}

/// `w:tblW`, `w:tcW` and friends
pub(crate) fn write_width(x: &mut XmlEmitter, name: &str, width: &Length) -> Result<()> {
    let (w, kind) = width.to_ooxml();
    x.start_element(name)?;
    x.write_attribute("w:w", w)?;
    x.write_attribute("w:type", kind)?;
    x.end_element()
}

/// Write a `w:rPr`; nothing when there is neither a style reference nor a
/// property
pub(crate) fn write_run_properties(
    x: &mut XmlEmitter,
    style_id: Option<&str>,
    font: Option<&FontStyle>,
) -> Result<()> {
    let empty = FontStyle::default();
    let font = font.unwrap_or(&empty);
    if style_id.is_none() && font.is_empty() {
        return Ok(());
    }

    x.start_element("w:rPr")?;
    write_run_property_list(x, style_id, font)?;
    x.end_element()
}

/// Contents of a `w:rPr`, in schema order
pub(crate) fn write_run_property_list(
    x: &mut XmlEmitter,
    style_id: Option<&str>,
    font: &FontStyle,
) -> Result<()> {
    if let Some(id) = style_id {
        x.write_val("w:rStyle", "w:val", id)?;
    }

    // Fonts
    if font.name.is_some() || font.east_asia_name.is_some() {
        x.start_element("w:rFonts")?;
        if let Some(name) = &font.name {
            x.write_attribute("w:ascii", name)?;
            x.write_attribute("w:hAnsi", name)?;
            x.write_attribute("w:cs", name)?;
        }
        if let Some(name) = &font.east_asia_name {
            x.write_attribute("w:eastAsia", name)?;
        }
        x.end_element()?;
    }

    toggle(x, "w:b", font.bold)?;
    toggle(x, "w:i", font.italic)?;
    toggle(x, "w:caps", font.all_caps)?;
    toggle(x, "w:smallCaps", font.small_caps)?;
    toggle(x, "w:strike", font.strike)?;
    toggle(x, "w:dstrike", font.double_strike)?;
    toggle(x, "w:vanish", font.hidden)?;

    if let Some(color) = &font.color {
        write_color(x, color)?;
    }
    if let Some(spacing) = font.spacing {
        x.write_val("w:spacing", "w:val", spacing)?;
    }
    if let Some(kerning) = font.kerning {
        x.write_val("w:kern", "w:val", (kerning * 2.0).round() as i64)?;
    }
    if let Some(half_points) = font.half_points() {
        x.write_val("w:sz", "w:val", half_points)?;
        x.write_val("w:szCs", "w:val", half_points)?;
    }
    if let Some(highlight) = font.highlight {
        x.write_val("w:highlight", "w:val", highlight.name())?;
    }
    if let Some(underline) = font.underline {
        x.write_val("w:u", "w:val", underline.as_str())?;
    }
    if let Some(fill) = &font.shading {
        write_shading(x, fill)?;
    }
    if let Some(va) = font.vertical_align {
        x.write_val("w:vertAlign", "w:val", va.as_str())?;
    }
    toggle(x, "w:rtl", font.rtl)?;
    if let Some(lang) = &font.lang {
        x.write_val("w:lang", "w:val", lang)?;
    }
    Ok(())
}

/// Paragraph numbering as `(numId, ilvl)`
pub(crate) type NumberingPr = (u32, u8);

/// Write a `w:pPr`; nothing when it would be empty
pub(crate) fn write_paragraph_properties(
    x: &mut XmlEmitter,
    style_id: Option<&str>,
    props: Option<&ParagraphStyle>,
    numbering: Option<NumberingPr>,
) -> Result<()> {
    let empty = ParagraphStyle::default();
    let props = props.unwrap_or(&empty);
    if style_id.is_none() && numbering.is_none() && props.is_empty() {
        return Ok(());
    }

    x.start_element("w:pPr")?;
    write_paragraph_property_list(x, style_id, props, numbering)?;
    x.end_element()
}

/// Contents of a `w:pPr`, in schema order
pub(crate) fn write_paragraph_property_list(
    x: &mut XmlEmitter,
    style_id: Option<&str>,
    props: &ParagraphStyle,
    numbering: Option<NumberingPr>,
) -> Result<()> {
    if let Some(id) = style_id {
        x.write_val("w:pStyle", "w:val", id)?;
    }
    toggle(x, "w:keepNext", props.keep_next)?;
    toggle(x, "w:keepLines", props.keep_lines)?;
    toggle(x, "w:pageBreakBefore", props.page_break_before)?;
    toggle(x, "w:widowControl", props.widow_control)?;

    if let Some((num_id, level)) = numbering {
        x.start_element("w:numPr")?;
        x.write_val("w:ilvl", "w:val", level)?;
        x.write_val("w:numId", "w:val", num_id)?;
        x.end_element()?;
    }

    if let Some(fill) = &props.shading {
        write_shading(x, fill)?;
    }

    if let Some(tabs) = props.tabs.as_ref().filter(|t| !t.is_empty()) {
        x.start_element("w:tabs")?;
        for tab in tabs {
            x.start_element("w:tab")?;
            x.write_attribute("w:val", tab.kind.as_str())?;
            if tab.leader != crate::style::TabLeader::None {
                x.write_attribute("w:leader", tab.leader.as_str())?;
            }
            x.write_attribute("w:pos", tab.position)?;
            x.end_element()?;
        }
        x.end_element()?;
    }

    toggle(x, "w:bidi", props.bidi)?;

    if props.space_before.is_some() || props.space_after.is_some() || props.line_spacing.is_some()
    {
        x.start_element("w:spacing")?;
        if let Some(before) = props.space_before {
            x.write_attribute("w:before", before)?;
        }
        if let Some(after) = props.space_after {
            x.write_attribute("w:after", after)?;
        }
        if let Some(line) = props.line_spacing {
            let (value, rule) = line.to_ooxml();
            x.write_attribute("w:line", value)?;
            x.write_attribute("w:lineRule", rule)?;
        }
        x.end_element()?;
    }

    if props.indent_left.is_some()
        || props.indent_right.is_some()
        || props.indent_first_line.is_some()
    {
        x.start_element("w:ind")?;
        if let Some(left) = props.indent_left {
            x.write_attribute("w:left", left)?;
        }
        if let Some(right) = props.indent_right {
            x.write_attribute("w:right", right)?;
        }
        match (props.indent_first_line, props.hanging()) {
            (_, Some(hanging)) => x.write_attribute("w:hanging", hanging)?,
            (Some(first), None) => x.write_attribute("w:firstLine", first)?,
            (None, None) => {}
        }
        x.end_element()?;
    }

    if let Some(alignment) = props.alignment {
        x.write_val("w:jc", "w:val", alignment.as_ooxml())?;
    }
    if let Some(level) = props.outline_level {
        x.write_val("w:outlineLvl", "w:val", level)?;
    }
    Ok(())
}

/// Contents of a `w:tblPr`, in schema order
pub(crate) fn write_table_property_list(
    x: &mut XmlEmitter,
    style_id: Option<&str>,
    table: &TableStyle,
) -> Result<()> {
    if let Some(id) = style_id {
        x.write_val("w:tblStyle", "w:val", id)?;
    }
    if let Some(width) = &table.width {
        write_width(x, "w:tblW", width)?;
    }
    if let Some(alignment) = table.alignment {
        x.write_val("w:jc", "w:val", alignment.as_str())?;
    }
    if let Some(spacing) = table.cell_spacing {
        write_width(x, "w:tblCellSpacing", &Length::twip(f64::from(spacing)))?;
    }
    if let Some(indent) = table.indent {
        write_width(x, "w:tblInd", &Length::twip(f64::from(indent)))?;
    }
    if let Some(borders) = &table.borders {
        write_borders(x, "w:tblBorders", borders, true)?;
    }
    if let Some(fill) = &table.bg_color {
        write_shading(x, fill)?;
    }
    if let Some(layout) = table.layout {
        x.write_val("w:tblLayout", "w:type", layout.as_str())?;
    }
    if let Some(margins) = &table.cell_margins {
        x.start_element("w:tblCellMar")?;
        for (edge, value) in [
            ("w:top", margins.top),
            ("w:left", margins.left),
            ("w:bottom", margins.bottom),
            ("w:right", margins.right),
        ] {
            write_width(x, edge, &Length::twip(f64::from(value)))?;
        }
        x.end_element()?;
    }
    Ok(())
}

pub(crate) fn write_table_properties(
    x: &mut XmlEmitter,
    style_id: Option<&str>,
    table: &TableStyle,
) -> Result<()> {
    x.start_element("w:tblPr")?;
    write_table_property_list(x, style_id, table)?;
    x.end_element()
}

/// `w:trPr`; height in twips
pub(crate) fn write_row_properties(
    x: &mut XmlEmitter,
    height: Option<u32>,
    style: Option<&RowStyle>,
) -> Result<()> {
    let style = style.cloned().unwrap_or_default();
    if height.is_none() && style.cant_split.is_none() && style.header.is_none() {
        return Ok(());
    }

    x.start_element("w:trPr")?;
    toggle(x, "w:cantSplit", style.cant_split)?;
    if let Some(h) = height {
        x.start_element("w:trHeight")?;
        x.write_attribute("w:val", h)?;
        let rule = if style.exact_height == Some(true) {
            "exact"
        } else {
            "atLeast"
        };
        x.write_attribute("w:hRule", rule)?;
        x.end_element()?;
    }
    toggle(x, "w:tblHeader", style.header)?;
    x.end_element()
}

/// `w:tcPr` with the cell width in twips, or the cell's own width
pub(crate) fn write_cell_properties(
    x: &mut XmlEmitter,
    width: &Length,
    style: Option<&CellStyle>,
) -> Result<()> {
    let style = style.cloned().unwrap_or_default();

    x.start_element("w:tcPr")?;
    write_width(x, "w:tcW", width)?;
    if let Some(span) = style.grid_span.filter(|s| *s > 1) {
        x.write_val("w:gridSpan", "w:val", span)?;
    }
    match style.v_merge {
        Some(VerticalMerge::Restart) => x.write_val("w:vMerge", "w:val", "restart")?,
        Some(VerticalMerge::Continue) => x.write_element("w:vMerge", &[])?,
        None => {}
    }
    if let Some(borders) = &style.borders {
        write_borders(x, "w:tcBorders", borders, false)?;
    }
    if let Some(fill) = &style.bg_color {
        write_shading(x, fill)?;
    }
    toggle(x, "w:noWrap", style.no_wrap)?;
    if let Some(v_align) = style.v_align {
        x.write_val("w:vAlign", "w:val", v_align.as_str())?;
    }
    x.end_element()
}

/// `w:sectPr`
pub(crate) fn write_section_properties(
    x: &mut XmlEmitter,
    style: &SectionStyle,
    references: &[HeaderFooterRef],
) -> Result<()> {
    x.start_element("w:sectPr")?;

    for reference in references {
        x.start_element(reference.element)?;
        x.write_attribute("w:type", reference.kind)?;
        x.write_attribute("r:id", &reference.rel_id)?;
        x.end_element()?;
    }

    if let Some(break_type) = style.break_type {
        x.write_val("w:type", "w:val", break_type.as_ooxml())?;
    }

    x.start_element("w:pgSz")?;
    x.write_attribute("w:w", style.page_width())?;
    x.write_attribute("w:h", style.page_height())?;
    if style.orientation.is_some() {
        x.write_attribute("w:orient", style.orientation().as_str())?;
    }
    x.end_element()?;

    x.start_element("w:pgMar")?;
    x.write_attribute("w:top", style.margin_top())?;
    x.write_attribute("w:right", style.margin_right())?;
    x.write_attribute("w:bottom", style.margin_bottom())?;
    x.write_attribute("w:left", style.margin_left())?;
    x.write_attribute("w:header", style.header_distance())?;
    x.write_attribute("w:footer", style.footer_distance())?;
    x.write_attribute("w:gutter", style.gutter())?;
    x.end_element()?;

    if let Some(start) = style.page_number_start {
        x.write_val("w:pgNumType", "w:start", start)?;
    }

    x.start_element("w:cols")?;
    x.write_attribute("w:space", style.column_spacing())?;
    if style.columns() > 1 {
        x.write_attribute("w:num", style.columns())?;
    }
    x.end_element()?;

    toggle(x, "w:titlePg", style.title_page)?;
    x.end_element()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::style::{Alignment, Underline};

    fn emit(f: impl FnOnce(&mut XmlEmitter) -> Result<()>) -> String {
        let mut x = XmlEmitter::memory();
        f(&mut x).unwrap();
        String::from_utf8(x.get_data().unwrap()).unwrap()
    }

    #[test]
    fn test_run_properties_order() {
        let font = FontStyle::new()
            .bold()
            .with_size(20.0)
            .with_name("Arial")
            .with_underline(Underline::Single)
            .with_color(Color::hex("ff0000").unwrap());
        let xml = emit(|x| write_run_properties(x, Some("Strong"), Some(&font)));
        assert_eq!(
            xml,
            concat!(
                r#"<w:rPr><w:rStyle w:val="Strong"/>"#,
                r#"<w:rFonts w:ascii="Arial" w:hAnsi="Arial" w:cs="Arial"/>"#,
                r#"<w:b/><w:color w:val="FF0000"/><w:sz w:val="40"/><w:szCs w:val="40"/>"#,
                r#"<w:u w:val="single"/></w:rPr>"#
            )
        );
    }

    #[test]
    fn test_empty_properties_are_omitted() {
        assert_eq!(emit(|x| write_run_properties(x, None, None)), "");
        assert_eq!(emit(|x| write_paragraph_properties(x, None, None, None)), "");
    }

    #[test]
    fn test_false_toggle() {
        let font = FontStyle {
            italic: Some(false),
            ..Default::default()
        };
        assert_eq!(
            emit(|x| write_run_properties(x, None, Some(&font))),
            r#"<w:rPr><w:i w:val="0"/></w:rPr>"#
        );
    }

    #[test]
    fn test_paragraph_properties() {
        let props = ParagraphStyle::new()
            .with_alignment(Alignment::Center)
            .with_spacing(240, 120);
        let xml = emit(|x| write_paragraph_properties(x, Some("Heading1"), Some(&props), Some((3, 1))));
        assert_eq!(
            xml,
            concat!(
                r#"<w:pPr><w:pStyle w:val="Heading1"/>"#,
                r#"<w:numPr><w:ilvl w:val="1"/><w:numId w:val="3"/></w:numPr>"#,
                r#"<w:spacing w:before="240" w:after="120"/><w:jc w:val="center"/></w:pPr>"#
            )
        );
    }

    #[test]
    fn test_section_defaults() {
        let xml = emit(|x| write_section_properties(x, &SectionStyle::default(), &[]));
        assert!(xml.contains(r#"<w:pgSz w:w="11906" w:h="16838"/>"#));
        assert!(xml.contains(r#"w:top="1440""#));
        assert!(xml.contains(r#"w:header="720""#));
    }

    #[test]
    fn test_cell_borders_skip_inside_edges() {
        let style = CellStyle {
            borders: Some(Borders::all(Border::single(4, Color::hex("000000").unwrap()))),
            ..Default::default()
        };
        let xml = emit(|x| write_cell_properties(x, &Length::twip(100.0), Some(&style)));
        assert!(xml.contains(r#"<w:tcW w:w="100" w:type="dxa"/>"#));
        assert!(xml.contains("<w:tcBorders><w:top "));
        assert!(!xml.contains("insideH"));
    }
}

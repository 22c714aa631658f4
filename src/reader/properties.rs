//! Property groups: `w:rPr`, `w:pPr`, `w:tblPr`, `w:trPr`, `w:tcPr` and
//! `w:sectPr`, parsed into style structs

use crate::color::{Color, HighlightColor, ThemeColor};
use crate::style::{
    Alignment, Border, BorderStyle, Borders, BreakType, CellMargins, CellStyle, FontStyle,
    LineSpacing, Orientation, ParagraphStyle, RowStyle, SectionStyle, TabKind, TabLeader, TabStop,
    TableAlignment, TableLayout, TableStyle, Underline, VerticalAlign, VerticalMerge,
    VerticalPosition,
};
use crate::units::Length;
use crate::xml::XmlElement;

/// Color from a `w:val`/`w:fill`-style attribute; `auto` and unknown values
/// are `None`
fn color_attr(value: Option<&str>) -> Option<Color> {
    let color = Color::from_mixed(value?);
    (!color.is_unspecified()).then_some(color)
}

/// `w:shd/@w:fill`
fn shading(parent: &XmlElement) -> Option<Color> {
    color_attr(parent.child("shd")?.attr("fill"))
}

fn twips<T: std::str::FromStr>(e: &XmlElement, attr: &str) -> Option<T> {
    e.attr_parse(attr)
}

/// Run properties
pub(crate) fn font(rpr: &XmlElement) -> FontStyle {
    let mut font = FontStyle::new();

    if let Some(fonts) = rpr.child("rFonts") {
        font.name = fonts
            .attr("ascii")
            .or_else(|| fonts.attr("hAnsi"))
            .map(str::to_string);
        font.east_asia_name = fonts.attr("eastAsia").map(str::to_string);
    }

    font.bold = rpr.toggle("b");
    font.italic = rpr.toggle("i");
    font.all_caps = rpr.toggle("caps");
    font.small_caps = rpr.toggle("smallCaps");
    font.strike = rpr.toggle("strike");
    font.double_strike = rpr.toggle("dstrike");
    font.hidden = rpr.toggle("vanish");
    font.rtl = rpr.toggle("rtl");

    if let Some(color) = rpr.child("color") {
        font.color = match color.attr("themeColor").and_then(ThemeColor::from_name) {
            Some(theme) => Some(Color::Theme(theme)),
            None => color_attr(color.val()),
        };
    }
    font.spacing = rpr.child("spacing").and_then(|s| s.attr_parse("val"));
    font.kerning = rpr
        .child("kern")
        .and_then(|k| k.attr_parse::<f64>("val"))
        .map(|half| half / 2.0);
    font.size = rpr
        .child("sz")
        .or_else(|| rpr.child("szCs"))
        .and_then(|s| s.attr_parse::<f64>("val"))
        .map(|half| half / 2.0);
    font.highlight = rpr.child_val("highlight").and_then(HighlightColor::from_name);
    font.underline = rpr.child_val("u").and_then(Underline::parse);
    font.shading = shading(rpr);
    font.vertical_align = rpr.child_val("vertAlign").and_then(VerticalAlign::parse);
    font.lang = rpr.child_val("lang").map(str::to_string);
    font
}

/// Paragraph properties, without the style reference and numbering
pub(crate) fn paragraph(ppr: &XmlElement) -> ParagraphStyle {
    let mut props = ParagraphStyle::new();

    props.keep_next = ppr.toggle("keepNext");
    props.keep_lines = ppr.toggle("keepLines");
    props.page_break_before = ppr.toggle("pageBreakBefore");
    props.widow_control = ppr.toggle("widowControl");
    props.bidi = ppr.toggle("bidi");
    props.shading = shading(ppr);

    if let Some(tabs) = ppr.child("tabs") {
        let stops: Vec<TabStop> = tabs
            .children_named("tab")
            .filter(|t| t.val() != Some("clear"))
            .filter_map(|t| {
                Some(TabStop {
                    kind: TabKind::parse(t.val().unwrap_or("left")),
                    position: t.attr_parse("pos")?,
                    leader: t.attr("leader").map_or(TabLeader::None, TabLeader::parse),
                })
            })
            .collect();
        if !stops.is_empty() {
            props.tabs = Some(stops);
        }
    }

    if let Some(spacing) = ppr.child("spacing") {
        props.space_before = twips(spacing, "before");
        props.space_after = twips(spacing, "after");
        props.line_spacing = spacing
            .attr("line")
            .and_then(|line| LineSpacing::from_ooxml(line, spacing.attr("lineRule")));
    }

    if let Some(ind) = ppr.child("ind") {
        props.indent_left = twips(ind, "left").or_else(|| twips(ind, "start"));
        props.indent_right = twips(ind, "right").or_else(|| twips(ind, "end"));
        props.indent_first_line = match twips::<i32>(ind, "hanging") {
            Some(hanging) => Some(-hanging),
            None => twips(ind, "firstLine"),
        };
    }

    props.alignment = ppr.child_val("jc").and_then(Alignment::from_ooxml);
    props.outline_level = ppr.child("outlineLvl").and_then(|o| o.attr_parse("val"));
    props
}

/// `w:numPr` as `(numId, ilvl)`; `numId` 0 removes numbering
pub(crate) fn numbering(ppr: &XmlElement) -> Option<(String, u8)> {
    let num_pr = ppr.child("numPr")?;
    let num_id = num_pr.child_val("numId")?;
    if num_id == "0" {
        return None;
    }
    let level = num_pr
        .child("ilvl")
        .and_then(|l| l.attr_parse("val"))
        .unwrap_or(0);
    Some((num_id.to_string(), level))
}

fn border(e: &XmlElement) -> Border {
    Border {
        style: e.val().map_or(BorderStyle::Single, BorderStyle::from_ooxml),
        size: e.attr_parse("sz").unwrap_or(4),
        color: color_attr(e.attr("color")).unwrap_or_default(),
        space: e.attr_parse("space").unwrap_or(0),
    }
}

/// `w:tblBorders` / `w:tcBorders`
pub(crate) fn borders(container: &XmlElement) -> Option<Borders> {
    let mut borders = Borders::default();
    for e in container.elements() {
        let slot = match e.local_name() {
            "top" => &mut borders.top,
            "left" | "start" => &mut borders.left,
            "bottom" => &mut borders.bottom,
            "right" | "end" => &mut borders.right,
            "insideH" => &mut borders.inside_h,
            "insideV" => &mut borders.inside_v,
            _ => continue,
        };
        *slot = Some(border(e));
    }
    (!borders.is_empty()).then_some(borders)
}

/// `w:tblW` style width; `None` when absent or `auto`
fn width(e: Option<&XmlElement>) -> Option<Length> {
    let e = e?;
    let length = Length::from_ooxml(e.attr("w"), e.attr("type"));
    (!length.is_auto()).then_some(length)
}

/// Table properties and the `w:tblStyle` id
pub(crate) fn table(tbl_pr: &XmlElement) -> (Option<String>, TableStyle) {
    let mut table = TableStyle::new();
    table.width = width(tbl_pr.child("tblW"));
    table.alignment = tbl_pr.child_val("jc").map(TableAlignment::parse);
    table.cell_spacing = tbl_pr
        .child("tblCellSpacing")
        .and_then(|s| s.attr_parse::<f64>("w"))
        .map(|w| w.max(0.0) as u32);
    table.indent = tbl_pr
        .child("tblInd")
        .and_then(|s| s.attr_parse::<f64>("w"))
        .map(|w| w as i32);
    table.borders = tbl_pr.child("tblBorders").and_then(borders);
    table.bg_color = shading(tbl_pr);
    table.layout = tbl_pr
        .child("tblLayout")
        .and_then(|l| l.attr("type"))
        .map(|t| match t {
            "fixed" => TableLayout::Fixed,
            _ => TableLayout::Autofit,
        });
    if let Some(mar) = tbl_pr.child("tblCellMar") {
        let side = |names: &[&str]| {
            names
                .iter()
                .find_map(|n| mar.child(n))
                .and_then(|e| e.attr_parse::<f64>("w"))
                .map_or(0, |w| w.max(0.0) as u32)
        };
        table.cell_margins = Some(CellMargins {
            top: side(&["top"]),
            left: side(&["left", "start"]),
            bottom: side(&["bottom"]),
            right: side(&["right", "end"]),
        });
    }
    let style_id = tbl_pr.child_val("tblStyle").map(str::to_string);
    (style_id, table)
}

/// Row height in twips and row properties
pub(crate) fn row(tr_pr: &XmlElement) -> (Option<u32>, RowStyle) {
    let mut style = RowStyle {
        cant_split: tr_pr.toggle("cantSplit"),
        header: tr_pr.toggle("tblHeader"),
        exact_height: None,
    };
    let height = tr_pr.child("trHeight").and_then(|h| {
        if h.attr("hRule") == Some("exact") {
            style.exact_height = Some(true);
        }
        h.attr_parse::<f64>("val").map(|v| v.max(0.0) as u32)
    });
    (height, style)
}

/// Cell width and properties
pub(crate) fn cell(tc_pr: &XmlElement) -> (Length, CellStyle) {
    let width = width(tc_pr.child("tcW")).unwrap_or_default();
    let style = CellStyle {
        v_align: tc_pr.child_val("vAlign").map(VerticalPosition::parse),
        bg_color: shading(tc_pr),
        borders: tc_pr.child("tcBorders").and_then(borders),
        grid_span: tc_pr
            .child("gridSpan")
            .and_then(|g| g.attr_parse::<u32>("val"))
            .filter(|s| *s > 1),
        v_merge: tc_pr.child("vMerge").map(|m| match m.val() {
            Some("restart") => VerticalMerge::Restart,
            _ => VerticalMerge::Continue,
        }),
        no_wrap: tc_pr.toggle("noWrap"),
    };
    (width, style)
}

/// Header or footer reference of a `w:sectPr`
#[derive(Clone, Debug, PartialEq)]
pub(crate) struct PartReference {
    pub footer: bool,
    pub kind: String,
    pub rel_id: String,
}

/// Section properties and the header/footer references they carry
pub(crate) fn section(sect_pr: &XmlElement) -> (SectionStyle, Vec<PartReference>) {
    let mut style = SectionStyle::new();

    if let Some(size) = sect_pr.child("pgSz") {
        style.page_width = twips(size, "w");
        style.page_height = twips(size, "h");
        style.orientation = size.attr("orient").map(|o| match o {
            "landscape" => Orientation::Landscape,
            _ => Orientation::Portrait,
        });
    }
    if let Some(mar) = sect_pr.child("pgMar") {
        // Negative top/bottom margins mean "do not grow"; keep the distance
        let abs = |attr: &str| twips::<i64>(mar, attr).map(|v| v.unsigned_abs() as u32);
        style.margin_top = abs("top");
        style.margin_right = abs("right");
        style.margin_bottom = abs("bottom");
        style.margin_left = abs("left");
        style.header_distance = abs("header");
        style.footer_distance = abs("footer");
        style.gutter = abs("gutter").filter(|g| *g > 0);
    }
    if let Some(cols) = sect_pr.child("cols") {
        style.columns = twips::<u32>(cols, "num").filter(|n| *n > 0);
        style.column_spacing = twips(cols, "space");
    }
    style.break_type = sect_pr.child_val("type").map(BreakType::from_ooxml);
    style.page_number_start = sect_pr.child("pgNumType").and_then(|p| twips(p, "start"));
    style.title_page = sect_pr.toggle("titlePg");

    let references = sect_pr
        .elements()
        .filter_map(|e| {
            let footer = match e.local_name() {
                "headerReference" => false,
                "footerReference" => true,
                _ => return None,
            };
            Some(PartReference {
                footer,
                kind: e.attr("type").unwrap_or("default").to_string(),
                rel_id: e.attr("id")?.to_string(),
            })
        })
        .collect();

    (style, references)
}

//! `word/styles.xml` into the style registry.
//!
//! Styles are registered under their style id. The family follows the
//! property groups a definition declares: a paragraph style with run
//! properties becomes a combined font style, one without stays a
//! paragraph style. Character styles linked to a paragraph style (the
//! `{id}Char` half of a linked pair) are not registered; runs that use them
//! are mapped back to the paragraph style.

use super::numbering::list_name;
use super::properties;
use crate::model::DocumentSettings;
use crate::style::{NumberingRef, Style, StyleDefinition, StyleRegistry, TableRegionStyle};
use crate::xml::XmlElement;
use std::collections::{HashMap, HashSet};

/// Maps run style ids to registry names
#[derive(Clone, Debug, Default)]
pub(crate) struct StyleIds {
    linked: HashMap<String, String>,
    /// Paragraph style id to its `w:name`
    names: HashMap<String, String>,
}

impl StyleIds {
    /// Display name of a paragraph style id
    pub(crate) fn name(&self, id: &str) -> Option<&str> {
        self.names.get(id).map(String::as_str)
    }

    /// Registry name for a `w:rStyle` value
    pub(crate) fn char_style(&self, id: &str) -> String {
        self.linked.get(id).cloned().unwrap_or_else(|| id.to_string())
    }
}

/// Paragraph style ids declared in the part
fn paragraph_ids(root: &XmlElement) -> HashSet<&str> {
    root.children_named("style")
        .filter(|s| s.attr("type") == Some("paragraph"))
        .filter_map(|s| s.attr("styleId"))
        .collect()
}

/// The paragraph style a character style is linked to, if any
fn linked_paragraph<'a>(
    style: &'a XmlElement,
    id: &'a str,
    paragraphs: &HashSet<&str>,
) -> Option<&'a str> {
    if let Some(link) = style.child_val("link") {
        if paragraphs.contains(link) {
            return Some(link);
        }
    }
    id.strip_suffix("Char").filter(|p| paragraphs.contains(p))
}

fn numbering_ref(ppr: &XmlElement, lists: &HashMap<String, String>) -> Option<NumberingRef> {
    let (num_id, level) = properties::numbering(ppr)?;
    let style = lists
        .get(&num_id)
        .cloned()
        .unwrap_or_else(|| list_name(&num_id));
    Some(NumberingRef { style, level })
}

fn definition(
    style: &XmlElement,
    id: &str,
    lists: &HashMap<String, String>,
) -> Option<Style> {
    let rpr = style.child("rPr").map(properties::font);
    match style.attr("type").unwrap_or("paragraph") {
        "paragraph" => {
            let mut paragraph = style
                .child("pPr")
                .map(properties::paragraph)
                .unwrap_or_default();
            paragraph.numbering = style.child("pPr").and_then(|p| numbering_ref(p, lists));
            Some(match rpr {
                Some(font) => Style::Font(font.with_paragraph(paragraph)),
                None => Style::Paragraph(paragraph),
            })
        }
        "character" => Some(Style::Font(rpr.unwrap_or_default())),
        "table" => {
            let mut table = style
                .child("tblPr")
                .map(|t| properties::table(t).1)
                .unwrap_or_default();
            let first_row = style
                .children_named("tblStylePr")
                .find(|p| p.attr("type") == Some("firstRow"));
            if let Some(region) = first_row {
                let tc_pr = region.child("tcPr");
                table.first_row = Some(TableRegionStyle {
                    borders: tc_pr
                        .and_then(|t| t.child("tcBorders"))
                        .and_then(properties::borders),
                    bg_color: tc_pr
                        .and_then(|t| t.child("shd"))
                        .and_then(|s| s.attr("fill"))
                        .map(crate::color::Color::from_mixed)
                        .filter(|c| !c.is_unspecified()),
                    font: region
                        .child("rPr")
                        .map(properties::font)
                        .filter(|f| !f.is_empty()),
                });
            }
            Some(Style::Table(table))
        }
        other => {
            log::debug!("docx reader: skipping {} style '{}'", other, id);
            None
        }
    }
}

/// Read document defaults into `settings` and style definitions into
/// `registry`, in document order
pub(crate) fn read_styles(
    root: &XmlElement,
    registry: &mut StyleRegistry,
    settings: &mut DocumentSettings,
    lists: &HashMap<String, String>,
) -> StyleIds {
    if let Some(defaults) = root.child("docDefaults") {
        let rpr = defaults.child("rPrDefault").and_then(|d| d.child("rPr"));
        if let Some(font) = rpr.map(properties::font) {
            if let Some(name) = font.name {
                settings.default_font_name = name;
            }
            if let Some(size) = font.size {
                settings.default_font_size = size;
            }
        }
        if let Some(ppr) = defaults.child("pPrDefault").and_then(|d| d.child("pPr")) {
            settings.default_paragraph = properties::paragraph(ppr);
        }
    }

    let paragraphs = paragraph_ids(root);
    let mut ids = StyleIds::default();

    for style in root.children_named("style") {
        let Some(id) = style.attr("styleId") else {
            continue;
        };
        if style.attr("type") == Some("character") {
            if let Some(paragraph) = linked_paragraph(style, id, &paragraphs) {
                ids.linked.insert(id.to_string(), paragraph.to_string());
                continue;
            }
        }
        if style.attr("type").unwrap_or("paragraph") == "paragraph" {
            if let Some(name) = style.child_val("name") {
                ids.names.insert(id.to_string(), name.to_string());
            }
        }
        let Some(definition) = definition(style, id, lists) else {
            continue;
        };
        registry.insert(StyleDefinition {
            name: id.to_string(),
            style: definition,
            based_on: style.child_val("basedOn").map(str::to_string),
            next: style
                .child_val("next")
                .filter(|n| *n != id)
                .map(str::to_string),
        });
    }

    log::debug!(
        "docx reader: {} styles, {} linked character styles",
        registry.len(),
        ids.linked.len()
    );
    ids
}

//! `word/numbering.xml`: `w:abstractNum` definitions referenced by `w:num`

use super::properties;
use crate::style::{LevelAlignment, NumberFormat, NumberingLevel, NumberingStyle, StyleRegistry};
use crate::xml::XmlElement;
use std::collections::HashMap;

/// Registry name of the numbering style read for a `w:num`
pub(crate) fn list_name(num_id: &str) -> String {
    format!("NumberingList{}", num_id)
}

fn level(lvl: &XmlElement) -> Option<NumberingLevel> {
    let index: u8 = lvl.attr_parse("ilvl")?;
    let mut level = NumberingLevel::new(index);

    if let Some(start) = lvl.child("start").and_then(|s| s.attr_parse("val")) {
        level.start = start;
    }
    if let Some(format) = lvl.child_val("numFmt") {
        level.format = format.parse().unwrap_or(NumberFormat::Decimal);
    }
    if let Some(text) = lvl.child("lvlText") {
        level.text = text.val().unwrap_or_default().to_string();
    }
    if let Some(jc) = lvl.child_val("lvlJc") {
        level.alignment = LevelAlignment::parse(jc);
    }
    if let Some(ind) = lvl.child("pPr").and_then(|p| p.child("ind")) {
        level.indent_left = ind.attr_parse("left").or_else(|| ind.attr_parse("start"));
        level.hanging = ind.attr_parse("hanging");
    }
    if let Some(rpr) = lvl.child("rPr") {
        let font = properties::font(rpr);
        level.font = (!font.is_empty()).then_some(font);
    }
    Some(level)
}

fn abstract_num(def: &XmlElement) -> NumberingStyle {
    let mut levels: Vec<NumberingLevel> = def.children_named("lvl").filter_map(level).collect();
    levels.sort_by_key(|l| l.level);
    levels.dedup_by_key(|l| l.level);
    NumberingStyle { levels }
}

/// Register one numbering style per `w:num` and return the `numId` to
/// registry name map. Level overrides of a `w:num` replace the abstract
/// definition's level.
pub(crate) fn read_numbering(
    root: &XmlElement,
    registry: &mut StyleRegistry,
) -> HashMap<String, String> {
    let abstracts: HashMap<&str, NumberingStyle> = root
        .children_named("abstractNum")
        .filter_map(|def| Some((def.attr("abstractNumId")?, abstract_num(def))))
        .collect();

    let mut names = HashMap::new();
    for num in root.children_named("num") {
        let Some(num_id) = num.attr("numId") else {
            continue;
        };
        let Some(abstract_id) = num.child_val("abstractNumId") else {
            log::warn!("docx reader: w:num {} has no abstractNumId", num_id);
            continue;
        };
        let Some(base) = abstracts.get(abstract_id) else {
            log::warn!(
                "docx reader: w:num {} references missing abstractNum {}",
                num_id,
                abstract_id
            );
            continue;
        };

        let mut style = base.clone();
        for over in num.children_named("lvlOverride") {
            let Some(replacement) = over.child("lvl").and_then(level) else {
                if let (Some(index), Some(start)) = (
                    over.attr_parse::<u8>("ilvl"),
                    over.child("startOverride").and_then(|s| s.attr_parse("val")),
                ) {
                    if let Some(l) = style.levels.iter_mut().find(|l| l.level == index) {
                        l.start = start;
                    }
                }
                continue;
            };
            match style.levels.iter_mut().find(|l| l.level == replacement.level) {
                Some(existing) => *existing = replacement,
                None => style.levels.push(replacement),
            }
        }

        let name = list_name(num_id);
        registry.define(name.clone(), style, None, None);
        names.insert(num_id.to_string(), name);
    }
    log::debug!("docx reader: {} numbering definitions", names.len());
    names
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::style::Style;
    use pretty_assertions::assert_eq;

    const NUMBERING: &str = r#"<w:numbering xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main">
        <w:abstractNum w:abstractNumId="1">
            <w:lvl w:ilvl="0"><w:start w:val="1"/><w:numFmt w:val="decimal"/><w:lvlText w:val="%1."/>
                <w:lvlJc w:val="left"/><w:pPr><w:ind w:left="720" w:hanging="360"/></w:pPr></w:lvl>
            <w:lvl w:ilvl="1"><w:start w:val="1"/><w:numFmt w:val="lowerLetter"/><w:lvlText w:val="%2)"/></w:lvl>
        </w:abstractNum>
        <w:num w:numId="4"><w:abstractNumId w:val="1"/>
            <w:lvlOverride w:ilvl="0"><w:startOverride w:val="5"/></w:lvlOverride></w:num>
        <w:num w:numId="9"><w:abstractNumId w:val="42"/></w:num>
    </w:numbering>"#;

    #[test]
    fn test_num_becomes_named_list() {
        let root = XmlElement::parse(NUMBERING.as_bytes()).unwrap();
        let mut registry = StyleRegistry::new();
        let names = read_numbering(&root, &mut registry);

        assert_eq!(names.get("4").map(String::as_str), Some("NumberingList4"));
        assert!(!names.contains_key("9"));

        let Some(Style::Numbering(list)) = registry.get("NumberingList4").map(|d| &d.style) else {
            panic!("numbering style not registered");
        };
        assert_eq!(list.levels.len(), 2);
        assert_eq!(list.levels[0].start, 5);
        assert_eq!(list.levels[0].indent_left, Some(720));
        assert_eq!(list.levels[0].hanging, Some(360));
        assert_eq!(list.levels[1].format, NumberFormat::LowerLetter);
        assert_eq!(list.levels[1].label(2), "b)");
    }
}

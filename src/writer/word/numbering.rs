//! `word/numbering.xml`

use super::properties;
use crate::error::Result;
use crate::model::{Document, Element};
use crate::style::{NumberingLevel, NumberingStyle, StyleFamily};
use crate::xml::{self, XmlEmitter};

/// `w:numId` assignment for the document's numbering styles.
///
/// Registered numbering styles are numbered from 1 in registry order. A
/// bullet definition is appended when some list item names no numbering
/// style, or one the registry does not have.
#[derive(Clone, Debug, Default)]
pub(crate) struct NumberingIds {
    entries: Vec<(String, u32)>,
    default_bullet: Option<u32>,
}

impl NumberingIds {
    pub(crate) fn collect(doc: &Document) -> Self {
        let entries: Vec<(String, u32)> = doc
            .styles
            .of_family(StyleFamily::Numbering)
            .zip(1..)
            .map(|(def, id)| (def.name.clone(), id))
            .collect();

        let known = |name: &str| entries.iter().any(|(n, _)| n == name);
        let needs_default = doc.contains_element(|e| match e {
            Element::ListItem(item) => item.numbering.as_deref().map_or(true, |n| !known(n)),
            _ => false,
        });
        let default_bullet = needs_default.then(|| entries.len() as u32 + 1);

        NumberingIds {
            entries,
            default_bullet,
        }
    }

    /// Id of a registered numbering style
    pub(crate) fn exact(&self, name: &str) -> Option<u32> {
        self.entries
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, id)| *id)
    }

    /// Id for a list item, falling back to the default bullet list
    pub(crate) fn id(&self, name: Option<&str>) -> Option<u32> {
        match name {
            Some(name) => match self.exact(name) {
                Some(id) => Some(id),
                None => {
                    log::warn!("docx: numbering style '{}' is not defined, using bullets", name);
                    self.default_bullet
                }
            },
            None => self.default_bullet,
        }
    }
}

pub(crate) fn write_numbering_part(
    x: &mut XmlEmitter,
    doc: &Document,
    ids: &NumberingIds,
) -> Result<()> {
    let mut definitions: Vec<(u32, NumberingStyle)> = Vec::new();
    for (name, id) in &ids.entries {
        definitions.push((*id, doc.styles.resolve_named(name)?));
    }
    if let Some(id) = ids.default_bullet {
        definitions.push((id, NumberingStyle::bullet()));
    }

    x.start_document()?;
    x.start_element("w:numbering")?;
    for (key, ns) in xml::minimal_document_namespaces() {
        x.write_attribute(key, ns)?;
    }

    // All w:abstractNum must precede the w:num elements
    for (id, style) in &definitions {
        x.start_element("w:abstractNum")?;
        x.write_attribute("w:abstractNumId", id)?;
        x.write_val("w:multiLevelType", "w:val", "hybridMultilevel")?;
        for level in &style.levels {
            write_level(x, level)?;
        }
        x.end_element()?;
    }
    for (id, _) in &definitions {
        x.start_element("w:num")?;
        x.write_attribute("w:numId", id)?;
        x.write_val("w:abstractNumId", "w:val", id)?;
        x.end_element()?;
    }

    x.end_element()
}

fn write_level(x: &mut XmlEmitter, level: &NumberingLevel) -> Result<()> {
    x.start_element("w:lvl")?;
    x.write_attribute("w:ilvl", level.level)?;
    x.write_val("w:start", "w:val", level.start)?;
    x.write_val("w:numFmt", "w:val", level.format.as_str())?;
    x.write_val("w:lvlText", "w:val", &level.text)?;
    x.write_val("w:lvlJc", "w:val", level.alignment.as_str())?;

    if level.indent_left.is_some() || level.hanging.is_some() {
        x.start_element("w:pPr")?;
        x.start_element("w:ind")?;
        if let Some(left) = level.indent_left {
            x.write_attribute("w:left", left)?;
        }
        if let Some(hanging) = level.hanging {
            x.write_attribute("w:hanging", hanging)?;
        }
        x.end_element()?;
        x.end_element()?;
    }
    properties::write_run_properties(x, None, level.font.as_ref())?;
    x.end_element()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::ListItem;
    use crate::style::SectionStyle;

    fn numbering_xml(doc: &Document) -> String {
        let ids = NumberingIds::collect(doc);
        let mut x = XmlEmitter::memory();
        write_numbering_part(&mut x, doc, &ids).unwrap();
        String::from_utf8(x.get_data().unwrap()).unwrap()
    }

    #[test]
    fn test_no_lists_empty_numbering_part() {
        let mut doc = Document::new();
        doc.add_section(SectionStyle::default()).add_text("plain");
        let ids = NumberingIds::collect(&doc);
        assert_eq!(ids.id(None), None);
        let xml = numbering_xml(&doc);
        assert!(xml.contains("<w:numbering "));
        assert!(!xml.contains("<w:num "));
    }

    #[test]
    fn test_registered_then_default_bullet() {
        let mut doc = Document::new();
        doc.styles
            .define("Steps", NumberingStyle::decimal(), None, None);
        doc.add_section(SectionStyle::default())
            .push(ListItem::new("a", 0).with_numbering("Steps"))
            .push(ListItem::new("b", 0).with_numbering("Missing"));

        let ids = NumberingIds::collect(&doc);
        assert_eq!(ids.exact("Steps"), Some(1));
        assert_eq!(ids.id(Some("Missing")), Some(2));
        assert_eq!(ids.id(None), Some(2));
    }

    #[test]
    fn test_abstract_nums_before_nums() {
        let mut doc = Document::new();
        doc.add_section(SectionStyle::default())
            .push(ListItem::new("a", 0));
        let xml = numbering_xml(&doc);

        let last_abstract = xml.rfind("<w:abstractNum ").unwrap();
        let first_num = xml.find("<w:num ").unwrap();
        assert!(last_abstract < first_num);
        assert!(xml.contains(r#"<w:num w:numId="1"><w:abstractNumId w:val="1"/></w:num>"#));
        assert!(xml.contains(r#"<w:numFmt w:val="bullet"/>"#));
    }
}

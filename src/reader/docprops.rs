//! Package metadata (`docProps/core.xml`, `app.xml`, `custom.xml`) and
//! `word/settings.xml`

use crate::model::{parse_w3c_date, CustomValue, DocInfo, DocumentSettings};
use crate::xml::XmlElement;

fn text(root: &XmlElement, local_name: &str) -> Option<String> {
    let value = root.child(local_name)?.text();
    let value = value.trim();
    (!value.is_empty()).then(|| value.to_string())
}

/// `cp:coreProperties`
pub(crate) fn read_core(root: &XmlElement, info: &mut DocInfo) {
    info.title = text(root, "title");
    info.subject = text(root, "subject");
    info.creator = text(root, "creator");
    info.keywords = text(root, "keywords");
    info.description = text(root, "description");
    info.last_modified_by = text(root, "lastModifiedBy");
    info.category = text(root, "category");
    info.created = text(root, "created").and_then(|d| parse_w3c_date(&d));
    info.modified = text(root, "modified").and_then(|d| parse_w3c_date(&d));
}

/// Extended properties: company and manager
pub(crate) fn read_app(root: &XmlElement, info: &mut DocInfo) {
    info.company = text(root, "Company");
    info.manager = text(root, "Manager");
}

/// Custom properties; values of unknown variant types are skipped
pub(crate) fn read_custom(root: &XmlElement, info: &mut DocInfo) {
    for property in root.children_named("property") {
        let Some(name) = property.attr("name") else {
            continue;
        };
        let Some(value) = property.elements().next() else {
            continue;
        };
        match CustomValue::from_vt(&value.name, &value.text()) {
            Some(v) => info.set_custom(name, v),
            None => log::warn!(
                "docx reader: custom property '{}' has unsupported type {}",
                name,
                value.name
            ),
        }
    }
}

/// `w:settings`
pub(crate) fn read_settings(root: &XmlElement, settings: &mut DocumentSettings) {
    if let Some(zoom) = root.child("zoom").and_then(|z| z.attr_parse("percent")) {
        settings.zoom = zoom;
    }
    settings.even_and_odd_headers = root.toggle("evenAndOddHeaders").unwrap_or(false);
    settings.track_revisions = root.toggle("trackRevisions").unwrap_or(false);
    settings.hide_spelling_errors = root.toggle("hideSpellingErrors").unwrap_or(false);
    settings.hide_grammatical_errors = root.toggle("hideGrammaticalErrors").unwrap_or(false);
    if let Some(symbol) = root.child_val("decimalSymbol") {
        settings.decimal_symbol = symbol.to_string();
    }
    settings.theme_font_lang = root.child_val("themeFontLang").map(str::to_string);
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    #[test]
    fn test_core_properties() {
        let xml = r#"<cp:coreProperties xmlns:cp="x" xmlns:dc="y" xmlns:dcterms="z" xmlns:xsi="w">
            <dc:title>Quarterly report</dc:title><dc:creator>Finance</dc:creator>
            <cp:keywords></cp:keywords>
            <dcterms:created xsi:type="dcterms:W3CDTF">2024-03-01T12:30:00Z</dcterms:created>
        </cp:coreProperties>"#;
        let root = XmlElement::parse(xml.as_bytes()).unwrap();
        let mut info = DocInfo::default();
        read_core(&root, &mut info);
        assert_eq!(info.title.as_deref(), Some("Quarterly report"));
        assert_eq!(info.creator.as_deref(), Some("Finance"));
        assert_eq!(info.keywords, None);
        assert_eq!(
            info.created,
            Some(Utc.with_ymd_and_hms(2024, 3, 1, 12, 30, 0).unwrap())
        );
    }

    #[test]
    fn test_custom_properties() {
        let xml = r#"<Properties xmlns:vt="v">
            <property fmtid="{D5CDD505-2E9C-101B-9397-08002B2CF9AE}" pid="2" name="Reviewed"><vt:bool>true</vt:bool></property>
            <property fmtid="{D5CDD505-2E9C-101B-9397-08002B2CF9AE}" pid="3" name="Pages"><vt:i4>12</vt:i4></property>
            <property fmtid="{D5CDD505-2E9C-101B-9397-08002B2CF9AE}" pid="4" name="Blob"><vt:blob>AA==</vt:blob></property>
        </Properties>"#;
        let root = XmlElement::parse(xml.as_bytes()).unwrap();
        let mut info = DocInfo::default();
        read_custom(&root, &mut info);
        assert_eq!(info.custom.get("Reviewed"), Some(&CustomValue::Bool(true)));
        assert_eq!(info.custom.get("Pages"), Some(&CustomValue::Integer(12)));
        assert!(!info.custom.contains_key("Blob"));
    }

    #[test]
    fn test_settings() {
        let xml = r#"<w:settings xmlns:w="x"><w:zoom w:percent="120"/><w:trackRevisions/>
            <w:evenAndOddHeaders/><w:decimalSymbol w:val=","/></w:settings>"#;
        let root = XmlElement::parse(xml.as_bytes()).unwrap();
        let mut settings = DocumentSettings::default();
        read_settings(&root, &mut settings);
        assert_eq!(settings.zoom, 120);
        assert!(settings.track_revisions);
        assert!(settings.even_and_odd_headers);
        assert!(!settings.hide_spelling_errors);
        assert_eq!(settings.decimal_symbol, ",");
    }
}

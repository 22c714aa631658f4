//! `docProps/core.xml`, `app.xml` and `custom.xml`

use super::WordWriter;
use crate::error::Result;
use crate::model::{format_w3c_date, DocInfo};
use crate::opc::{content_type, rel_types, well_known, Relationships};
use crate::xml::{self, XmlEmitter};

/// Format id Office uses for user-defined properties
const CUSTOM_FMTID: &str = "{D5CDD505-2E9C-101B-9397-08002B2CF9AE}";

pub(super) fn write_docprops(w: &mut WordWriter<'_>) -> Result<()> {
    let doc = w.doc;
    let info = &doc.info;

    let mut x = w.options.emitter();
    write_core(&mut x, info)?;
    let core = x.get_data()?;

    let mut x = w.options.emitter();
    write_app(&mut x, info)?;
    let app = x.get_data()?;

    let custom = if info.custom.is_empty() {
        None
    } else {
        let mut x = w.options.emitter();
        write_custom(&mut x, info)?;
        Some(x.get_data()?)
    };

    w.add_part(well_known::core_props(), content_type::CORE_PROPERTIES, core, Relationships::new());
    w.package
        .add_relationship(rel_types::CORE_PROPERTIES, "docProps/core.xml");
    w.add_part(well_known::app_props(), content_type::EXTENDED_PROPERTIES, app, Relationships::new());
    w.package
        .add_relationship(rel_types::EXTENDED_PROPERTIES, "docProps/app.xml");
    if let Some(custom) = custom {
        w.add_part(
            well_known::custom_props(),
            content_type::CUSTOM_PROPERTIES,
            custom,
            Relationships::new(),
        );
        w.package
            .add_relationship(rel_types::CUSTOM_PROPERTIES, "docProps/custom.xml");
    }
    Ok(())
}

fn write_core(x: &mut XmlEmitter, info: &DocInfo) -> Result<()> {
    x.start_document()?;
    x.start_element("cp:coreProperties")?;
    x.write_attribute("xmlns:cp", xml::CP)?;
    x.write_attribute("xmlns:dc", xml::DC)?;
    x.write_attribute("xmlns:dcterms", xml::DCTERMS)?;
    x.write_attribute("xmlns:dcmitype", xml::DCMITYPE)?;
    x.write_attribute("xmlns:xsi", xml::XSI)?;

    let fields = [
        ("dc:title", &info.title),
        ("dc:subject", &info.subject),
        ("dc:creator", &info.creator),
        ("cp:keywords", &info.keywords),
        ("dc:description", &info.description),
        ("cp:lastModifiedBy", &info.last_modified_by),
        ("cp:category", &info.category),
    ];
    for (name, value) in fields {
        if let Some(value) = value {
            x.write_element_text(name, value)?;
        }
    }

    for (name, date) in [("dcterms:created", &info.created), ("dcterms:modified", &info.modified)] {
        if let Some(date) = date {
            x.start_element(name)?;
            x.write_attribute("xsi:type", "dcterms:W3CDTF")?;
            x.write_text(&format_w3c_date(date))?;
            x.end_element()?;
        }
    }

    x.end_element()
}

fn write_app(x: &mut XmlEmitter, info: &DocInfo) -> Result<()> {
    x.start_document()?;
    x.start_element("Properties")?;
    x.write_attribute("xmlns", xml::EP)?;
    x.write_attribute("xmlns:vt", xml::VT)?;
    x.write_element_text("Application", env!("CARGO_PKG_NAME"))?;
    if let Some(company) = &info.company {
        x.write_element_text("Company", company)?;
    }
    if let Some(manager) = &info.manager {
        x.write_element_text("Manager", manager)?;
    }
    x.end_element()
}

fn write_custom(x: &mut XmlEmitter, info: &DocInfo) -> Result<()> {
    x.start_document()?;
    x.start_element("Properties")?;
    x.write_attribute("xmlns", xml::CUSTOM)?;
    x.write_attribute("xmlns:vt", xml::VT)?;

    // pid 0 and 1 are reserved
    for (pid, (name, value)) in (2..).zip(&info.custom) {
        x.start_element("property")?;
        x.write_attribute("fmtid", CUSTOM_FMTID)?;
        x.write_attribute("pid", pid)?;
        x.write_attribute("name", name)?;
        x.write_element_text(value.vt_name(), &value.to_string())?;
        x.end_element()?;
    }

    x.end_element()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::CustomValue;
    use chrono::{TimeZone, Utc};

    fn emit(f: impl FnOnce(&mut XmlEmitter) -> Result<()>) -> String {
        let mut x = XmlEmitter::memory();
        f(&mut x).unwrap();
        String::from_utf8(x.get_data().unwrap()).unwrap()
    }

    #[test]
    fn test_core_writes_only_set_fields() {
        let info = DocInfo {
            title: Some("Quarterly Report".into()),
            created: Some(Utc.with_ymd_and_hms(2024, 3, 1, 9, 30, 0).unwrap()),
            ..Default::default()
        };
        let xml = emit(|x| write_core(x, &info));
        assert!(xml.contains("<dc:title>Quarterly Report</dc:title>"));
        assert!(xml.contains(
            r#"<dcterms:created xsi:type="dcterms:W3CDTF">2024-03-01T09:30:00Z</dcterms:created>"#
        ));
        assert!(!xml.contains("dc:creator"));
        assert!(!xml.contains("dcterms:modified"));
    }

    #[test]
    fn test_custom_properties_numbered_from_two() {
        let mut info = DocInfo::default();
        info.set_custom("Approved", CustomValue::Bool(true));
        info.set_custom("Revision", CustomValue::Integer(3));
        let xml = emit(|x| write_custom(x, &info));
        assert!(xml.contains(r#"pid="2" name="Approved"><vt:bool>true</vt:bool>"#));
        assert!(xml.contains(r#"pid="3" name="Revision"><vt:i4>3</vt:i4>"#));
    }
}

//! `meta.xml`

use crate::error::Result;
use crate::model::{format_w3c_date, Document};
use crate::xml::{odf, XmlEmitter};

pub(super) fn write_meta(mut x: XmlEmitter, doc: &Document) -> Result<Vec<u8>> {
    let info = &doc.info;

    x.start_document()?;
    x.start_element("office:document-meta")?;
    x.write_attribute("xmlns:office", odf::OFFICE)?;
    x.write_attribute("xmlns:meta", odf::META)?;
    x.write_attribute("xmlns:dc", odf::DC)?;
    x.write_attribute("xmlns:xlink", odf::XLINK)?;
    x.write_attribute("office:version", "1.2")?;
    x.start_element("office:meta")?;

    x.write_element_text("meta:generator", env!("CARGO_PKG_NAME"))?;
    let fields = [
        ("dc:title", &info.title),
        ("dc:description", &info.description),
        ("dc:subject", &info.subject),
        ("meta:keyword", &info.keywords),
        ("meta:initial-creator", &info.creator),
        ("dc:creator", &info.last_modified_by),
    ];
    for (name, value) in fields {
        if let Some(value) = value {
            x.write_element_text(name, value)?;
        }
    }
    if let Some(created) = &info.created {
        x.write_element_text("meta:creation-date", &format_w3c_date(created))?;
    }
    if let Some(modified) = &info.modified {
        x.write_element_text("dc:date", &format_w3c_date(modified))?;
    }

    // Extended properties without an ODF element become user fields
    let extended = [
        ("Category", &info.category),
        ("Company", &info.company),
        ("Manager", &info.manager),
    ];
    for (name, value) in extended {
        if let Some(value) = value {
            x.start_element("meta:user-defined")?;
            x.write_attribute("meta:name", name)?;
            x.write_text(value)?;
            x.end_element()?;
        }
    }
    for (name, value) in &info.custom {
        x.start_element("meta:user-defined")?;
        x.write_attribute("meta:name", name)?;
        x.write_attribute("meta:value-type", value.odf_type())?;
        x.write_text(&value.to_string())?;
        x.end_element()?;
    }

    x.end_element()?;
    x.end_element()?;
    x.get_data()
}

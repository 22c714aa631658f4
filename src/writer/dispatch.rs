//! Element and style dispatch shared by the backends.
//!
//! Every backend context declares a table from [`ElementKind`] (and
//! [`StyleFamily`]) to a serializer function. Dispatch is a lookup in that
//! table; a kind the backend has no serializer for is written as nothing.

use crate::error::Result;
use crate::model::{Element, ElementKind};
use crate::style::{StyleDefinition, StyleFamily};

/// Serializer for one element kind
pub type ElementWriterFn<C> = fn(&mut C, &Element) -> Result<()>;

/// Serializer for one style family
pub type StyleWriterFn<C> = fn(&mut C, &StyleDefinition) -> Result<()>;

/// A backend context that serializes elements
pub trait ElementWriters: Sized {
    /// Backend name used in diagnostics
    const BACKEND: &'static str;

    /// Serializer registered for `kind`, if the backend supports it
    fn element_writer(kind: ElementKind) -> Option<ElementWriterFn<Self>>;
}

/// A backend context that serializes named style definitions
pub trait StyleWriters: Sized {
    const BACKEND: &'static str;

    fn style_writer(family: StyleFamily) -> Option<StyleWriterFn<Self>>;
}

/// Write one element through the backend's table.
///
/// Returns whether a serializer was found.
pub fn write_element<C: ElementWriters>(ctx: &mut C, element: &Element) -> Result<bool> {
    match C::element_writer(element.kind()) {
        Some(writer) => {
            writer(ctx, element)?;
            Ok(true)
        }
        None => {
            log::trace!("{}: no writer for {:?}, skipped", C::BACKEND, element.kind());
            Ok(false)
        }
    }
}

/// Write a sequence of elements in order
pub fn write_elements<C: ElementWriters>(ctx: &mut C, elements: &[Element]) -> Result<()> {
    for element in elements {
        write_element(ctx, element)?;
    }
    Ok(())
}

/// Write one style definition through the backend's table
pub fn write_style<C: StyleWriters>(ctx: &mut C, def: &StyleDefinition) -> Result<bool> {
    match C::style_writer(def.family()) {
        Some(writer) => {
            writer(ctx, def)?;
            Ok(true)
        }
        None => {
            log::trace!("{}: no writer for {:?} style '{}'", C::BACKEND, def.family(), def.name);
            Ok(false)
        }
    }
}

/// Element kinds the backend serializes
pub fn supported_kinds<C: ElementWriters>() -> Vec<ElementKind> {
    ElementKind::ALL
        .into_iter()
        .filter(|k| C::element_writer(*k).is_some())
        .collect()
}

/// Style families the backend serializes
pub fn supported_families<C: StyleWriters>() -> Vec<StyleFamily> {
    StyleFamily::ALL
        .into_iter()
        .filter(|f| C::style_writer(*f).is_some())
        .collect()
}

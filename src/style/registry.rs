//! Per-document style registry and resolver

use super::{
    FontStyle, NumberingStyle, Overlay, ParagraphStyle, SectionStyle, Style, StyleFamily,
    StyleRef, TableStyle,
};
use crate::error::{Error, Result};
use std::collections::{HashMap, HashSet};

/// A registered (named) style
#[derive(Clone, Debug, PartialEq)]
pub struct StyleDefinition {
    pub name: String,
    pub style: Style,
    /// Parent style of the same family
    pub based_on: Option<String>,
    /// Style applied to the paragraph following this one
    pub next: Option<String>,
}

impl StyleDefinition {
    pub fn family(&self) -> StyleFamily {
        self.style.family()
    }
}

/// Fully resolved properties of one family
#[derive(Clone, Debug, PartialEq)]
pub enum ConcreteProperties {
    Font(FontStyle),
    Paragraph(ParagraphStyle),
    Table(TableStyle),
    Section(SectionStyle),
    Numbering(NumberingStyle),
}

/// Property types that can be resolved through the registry
pub trait StyleProperties: Overlay + Default + Clone {
    const FAMILY: StyleFamily;

    /// Properties of this family carried by `style`, if any.
    ///
    /// A combined font style contributes its paragraph half when resolving
    /// paragraph properties, and only its character half when resolving
    /// font properties.
    fn extract(style: &Style) -> Option<Self>;
}

impl StyleProperties for FontStyle {
    const FAMILY: StyleFamily = StyleFamily::Font;

    fn extract(style: &Style) -> Option<Self> {
        match style {
            Style::Font(f) => Some(f.font_only()),
            _ => None,
        }
    }
}

impl StyleProperties for ParagraphStyle {
    const FAMILY: StyleFamily = StyleFamily::Paragraph;

    fn extract(style: &Style) -> Option<Self> {
        match style {
            Style::Paragraph(p) => Some(p.clone()),
            Style::Font(f) => f.paragraph_part().cloned(),
            _ => None,
        }
    }
}

impl StyleProperties for TableStyle {
    const FAMILY: StyleFamily = StyleFamily::Table;

    fn extract(style: &Style) -> Option<Self> {
        match style {
            Style::Table(t) => Some(t.clone()),
            _ => None,
        }
    }
}

impl StyleProperties for SectionStyle {
    const FAMILY: StyleFamily = StyleFamily::Section;

    fn extract(style: &Style) -> Option<Self> {
        match style {
            Style::Section(s) => Some(s.clone()),
            _ => None,
        }
    }
}

impl StyleProperties for NumberingStyle {
    const FAMILY: StyleFamily = StyleFamily::Numbering;

    fn extract(style: &Style) -> Option<Self> {
        match style {
            Style::Numbering(n) => Some(n.clone()),
            _ => None,
        }
    }
}

/// Named styles of one document, in definition order
#[derive(Clone, Debug, Default)]
pub struct StyleRegistry {
    styles: Vec<StyleDefinition>,
    index: HashMap<String, usize>,
}

impl StyleRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a style, replacing any existing style with the same name
    /// (the replacement keeps the original position).
    pub fn define(
        &mut self,
        name: impl Into<String>,
        style: impl Into<Style>,
        based_on: Option<&str>,
        next: Option<&str>,
    ) {
        let def = StyleDefinition {
            name: name.into(),
            style: style.into(),
            based_on: based_on.map(str::to_string),
            next: next.map(str::to_string),
        };
        self.insert(def);
    }

    /// Register a complete definition
    pub fn insert(&mut self, def: StyleDefinition) {
        match self.index.get(&def.name) {
            Some(&i) => self.styles[i] = def,
            None => {
                self.index.insert(def.name.clone(), self.styles.len());
                self.styles.push(def);
            }
        }
    }

    pub fn get(&self, name: &str) -> Option<&StyleDefinition> {
        self.index.get(name).map(|&i| &self.styles[i])
    }

    pub fn contains(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.styles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.styles.is_empty()
    }

    /// All definitions in definition order
    pub fn iter(&self) -> impl Iterator<Item = &StyleDefinition> {
        self.styles.iter()
    }

    /// Definitions of one family, in definition order
    pub fn of_family(&self, family: StyleFamily) -> impl Iterator<Item = &StyleDefinition> {
        self.styles.iter().filter(move |d| d.family() == family)
    }

    /// The `basedOn` chain starting at `name`, child first.
    ///
    /// A name that is not registered ends the chain (with a warning when it
    /// is a parent reference). A name seen twice is a cycle.
    pub fn chain(&self, name: &str) -> Result<Vec<&StyleDefinition>> {
        let mut chain = Vec::new();
        let mut seen = HashSet::new();
        let mut current = Some(name);

        while let Some(n) = current {
            if !seen.insert(n) || chain.len() > self.styles.len() {
                return Err(Error::StyleCycle(n.to_string()));
            }
            let Some(def) = self.get(n) else {
                if n != name {
                    log::warn!("Style '{}' is based on unknown style '{}'", name, n);
                }
                break;
            };
            chain.push(def);
            current = def.based_on.as_deref();
        }

        Ok(chain)
    }

    /// Resolve a registered style into concrete properties of family `P`.
    ///
    /// Unknown names resolve to the default properties with a warning.
    pub fn resolve_named<P: StyleProperties>(&self, name: &str) -> Result<P> {
        let chain = self.chain(name)?;
        if chain.is_empty() {
            log::warn!("Style '{}' is not defined, using defaults", name);
        }

        let mut props = P::default();
        for def in chain.iter().rev() {
            if let Some(level) = P::extract(&def.style) {
                props.overlay(&level);
            }
        }
        Ok(props)
    }

    /// Resolve a style reference: the named style first, then the inline
    /// properties on top.
    pub fn resolve<P: StyleProperties>(&self, style: &StyleRef<P>) -> Result<P> {
        let mut props = match &style.name {
            Some(name) => self.resolve_named::<P>(name)?,
            None => P::default(),
        };
        if let Some(inline) = &style.inline {
            props.overlay(inline);
        }
        Ok(props)
    }

    /// Like [`resolve`](Self::resolve) for an optional reference
    pub fn resolve_opt<P: StyleProperties>(&self, style: Option<&StyleRef<P>>) -> Result<P> {
        match style {
            Some(s) => self.resolve(s),
            None => Ok(P::default()),
        }
    }

    /// Resolve a named style as the given family
    pub fn resolve_family(&self, name: &str, family: StyleFamily) -> Result<ConcreteProperties> {
        Ok(match family {
            StyleFamily::Font => ConcreteProperties::Font(self.resolve_named(name)?),
            StyleFamily::Paragraph => ConcreteProperties::Paragraph(self.resolve_named(name)?),
            StyleFamily::Table => ConcreteProperties::Table(self.resolve_named(name)?),
            StyleFamily::Section => ConcreteProperties::Section(self.resolve_named(name)?),
            StyleFamily::Numbering => ConcreteProperties::Numbering(self.resolve_named(name)?),
        })
    }

    /// Check every `basedOn` chain for cycles
    pub fn validate(&self) -> Result<()> {
        for def in &self.styles {
            self.chain(&def.name)?;
        }
        Ok(())
    }
}

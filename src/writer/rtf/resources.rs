//! Font and color tables, collected in one pass over the document before
//! anything is written

use crate::color::Color;
use crate::error::Result;
use crate::model::{Document, Element};
use crate::style::{Borders, FontStyle, ParagraphStyle, Style, StyleRegistry, TableStyle};
use crate::writer::resolve_combined;

/// `\fonttbl` and `\colortbl` contents
#[derive(Clone, Debug, Default, PartialEq)]
pub(crate) struct Resources {
    /// Font names; the position is the `\f` index
    fonts: Vec<String>,
    /// Colors; the position plus one is the `\cf` index, 0 being "auto"
    colors: Vec<(u8, u8, u8)>,
}

impl Resources {
    pub(crate) fn collect(doc: &Document) -> Result<Self> {
        let mut res = Resources::default();
        res.add_font(&doc.settings.default_font_name);

        let registry = &doc.styles;
        for def in registry.iter() {
            match &def.style {
                Style::Font(font) => {
                    res.add_font_style(font);
                    if let Some(paragraph) = font.paragraph_part() {
                        res.add_paragraph(paragraph);
                    }
                }
                Style::Paragraph(paragraph) => res.add_paragraph(paragraph),
                Style::Table(table) => res.add_table(table),
                Style::Numbering(numbering) => {
                    for font in numbering.levels.iter().filter_map(|l| l.font.as_ref()) {
                        res.add_font_style(font);
                    }
                }
                Style::Section(_) => {}
            }
        }

        for section in &doc.sections {
            res.visit(registry, &section.elements)?;
            for hf in section.headers.iter().chain(section.footers.iter()) {
                res.visit(registry, &hf.elements)?;
            }
        }
        for (_, note) in doc.footnotes.iter().chain(doc.endnotes.iter()) {
            res.visit(registry, &note.elements)?;
        }

        log::debug!(
            "rtf: {} fonts, {} colors",
            res.fonts.len(),
            res.colors.len()
        );
        Ok(res)
    }

    fn visit(&mut self, registry: &StyleRegistry, elements: &[Element]) -> Result<()> {
        for element in elements {
            match element {
                Element::Text(text) => {
                    self.add_font_style(&registry.resolve_opt(text.font.as_ref())?);
                    let paragraph = registry.resolve_opt(text.paragraph.as_ref())?;
                    self.add_paragraph(&paragraph);
                }
                Element::TextRun(run) => {
                    let paragraph = registry.resolve_opt(run.paragraph.as_ref())?;
                    self.add_paragraph(&paragraph);
                    self.visit(registry, &run.elements)?;
                }
                Element::Title(title) => {
                    let (font, paragraph) = resolve_combined(registry, title.style.as_ref())?;
                    self.add_font_style(&font);
                    self.add_paragraph(&paragraph);
                }
                Element::Link(link) => {
                    self.add_font_style(&registry.resolve_opt(link.font.as_ref())?);
                }
                Element::ListItem(item) => {
                    let paragraph = registry.resolve_opt(item.paragraph.as_ref())?;
                    self.add_paragraph(&paragraph);
                    self.visit(registry, &item.elements)?;
                }
                Element::Table(table) => {
                    let style = registry.resolve_opt(table.style.as_ref())?;
                    self.add_table(&style);
                    for cell in table.rows.iter().flat_map(|r| r.cells.iter()) {
                        if let Some(cell_style) = &cell.style {
                            self.add_optional_color(cell_style.bg_color.as_ref());
                            self.add_borders(cell_style.borders.as_ref());
                        }
                        self.visit(registry, &cell.elements)?;
                    }
                }
                Element::Tracked(tracked) => {
                    self.visit(registry, std::slice::from_ref(tracked.element.as_ref()))?;
                }
                _ => {}
            }
        }
        Ok(())
    }

    fn add_font(&mut self, name: &str) {
        if !self.fonts.iter().any(|f| f == name) {
            self.fonts.push(name.to_string());
        }
    }

    fn add_color(&mut self, color: &Color) {
        if let Some(rgb) = color.to_rgb() {
            if !self.colors.contains(&rgb) {
                self.colors.push(rgb);
            }
        }
    }

    fn add_optional_color(&mut self, color: Option<&Color>) {
        if let Some(color) = color {
            self.add_color(color);
        }
    }

    fn add_font_style(&mut self, font: &FontStyle) {
        if let Some(name) = &font.name {
            self.add_font(name);
        }
        if let Some(name) = &font.east_asia_name {
            self.add_font(name);
        }
        self.add_optional_color(font.color.as_ref());
        self.add_optional_color(font.shading.as_ref());
        if let Some(highlight) = font.highlight {
            self.add_color(&Color::Highlight(highlight));
        }
    }

    fn add_paragraph(&mut self, paragraph: &ParagraphStyle) {
        self.add_optional_color(paragraph.shading.as_ref());
    }

    fn add_borders(&mut self, borders: Option<&Borders>) {
        for (_, border) in borders.into_iter().flat_map(|b| b.edges()) {
            if let Some(border) = border {
                self.add_color(&border.color);
            }
        }
    }

    fn add_table(&mut self, table: &TableStyle) {
        self.add_optional_color(table.bg_color.as_ref());
        self.add_borders(table.borders.as_ref());
        if let Some(region) = &table.first_row {
            self.add_optional_color(region.bg_color.as_ref());
            self.add_borders(region.borders.as_ref());
            if let Some(font) = &region.font {
                self.add_font_style(font);
            }
        }
    }

    /// `\f` index of a font; unknown names fall back to the default font
    pub(crate) fn font_index(&self, name: &str) -> usize {
        self.fonts.iter().position(|f| f == name).unwrap_or(0)
    }

    /// `\cf` index of a color, if it has an RGB form
    pub(crate) fn color_index(&self, color: &Color) -> Option<usize> {
        let rgb = color.to_rgb()?;
        self.colors.iter().position(|c| *c == rgb).map(|i| i + 1)
    }

    pub(crate) fn fonts(&self) -> &[String] {
        &self.fonts
    }

    pub(crate) fn colors(&self) -> &[(u8, u8, u8)] {
        &self.colors
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Text;
    use crate::style::SectionStyle;

    #[test]
    fn test_default_font_first_and_colors_deduplicated() {
        let mut doc = Document::new();
        let red = Color::hex("FF0000").unwrap();
        doc.styles.define(
            "Alert",
            FontStyle::new().with_name("Courier New").with_color(red.clone()),
            None,
            None,
        );
        doc.add_section(SectionStyle::default())
            .push(Text::new("a").with_font(FontStyle::new().with_color(red.clone())))
            .push(Text::new("b").with_font(FontStyle::new().with_name("Georgia")));

        let res = Resources::collect(&doc).unwrap();
        assert_eq!(res.fonts(), ["Arial", "Courier New", "Georgia"]);
        assert_eq!(res.colors(), [(255, 0, 0)]);
        assert_eq!(res.color_index(&red), Some(1));
        assert_eq!(res.font_index("Georgia"), 2);
        assert_eq!(res.font_index("Missing"), 0);
    }
}

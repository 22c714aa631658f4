//! `w:tbl`

use super::properties;
use super::styles::table_style_id;
use super::WordWriter;
use crate::error::Result;
use crate::model::Table;
use crate::units::Length;

impl WordWriter<'_> {
    pub(super) fn write_table(&mut self, table: &Table) -> Result<()> {
        if table.rows.is_empty() {
            log::debug!("docx: empty table skipped");
            return Ok(());
        }

        let doc = self.doc;
        let style = table.style.as_ref();
        let style_id = style
            .and_then(|s| s.name.as_deref())
            .and_then(|name| table_style_id(&doc.styles, name));
        let mut props = style.and_then(|s| s.inline.clone()).unwrap_or_default();
        if props.width.is_none() {
            props.width = Some(Length::Auto);
        }
        let first_row = props.first_row.take();
        let widths = table.grid_widths(self.content_width);

        self.x.start_element("w:tbl")?;
        properties::write_table_properties(&mut self.x, style_id.as_deref(), &props)?;

        self.x.start_element("w:tblGrid")?;
        for width in &widths {
            self.x.write_val("w:gridCol", "w:w", width)?;
        }
        self.x.end_element()?;

        for (index, row) in table.rows.iter().enumerate() {
            let region = first_row.as_ref().filter(|_| index == 0);

            self.x.start_element("w:tr")?;
            properties::write_row_properties(&mut self.x, row.height, row.style.as_ref())?;

            let outer_font = std::mem::replace(
                &mut self.region_font,
                region.and_then(|r| r.font.clone()),
            );
            let mut column = 0;
            for cell in &row.cells {
                let span = cell.span() as usize;
                let width = if cell.width.is_auto() {
                    let sum: u32 = widths.iter().skip(column).take(span).sum();
                    Length::twip(f64::from(sum))
                } else {
                    cell.width.clone()
                };

                // The cell's own properties win over the header row's
                let mut cell_style = cell.style.clone().unwrap_or_default();
                if let Some(region) = region {
                    if cell_style.bg_color.is_none() {
                        cell_style.bg_color = region.bg_color.clone();
                    }
                    if cell_style.borders.is_none() {
                        cell_style.borders = region.borders.clone();
                    }
                }

                self.x.start_element("w:tc")?;
                properties::write_cell_properties(&mut self.x, &width, Some(&cell_style))?;
                let outer = std::mem::replace(&mut self.in_paragraph, false);
                let result = self.write_block_container(&cell.elements);
                self.in_paragraph = outer;
                result?;
                self.x.end_element()?;

                column += span;
            }
            self.region_font = outer_font;

            self.x.end_element()?;
        }

        self.x.end_element()
    }
}

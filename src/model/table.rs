//! Table → Row → Cell

use super::element::Element;
use crate::style::{CellStyle, RowStyle, StyleRef, TableStyle};
use crate::units::Length;

/// Table
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Table {
    pub rows: Vec<Row>,
    pub style: Option<StyleRef<TableStyle>>,
}

impl Table {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_style(mut self, style: impl Into<StyleRef<TableStyle>>) -> Self {
        self.style = Some(style.into());
        self
    }

    /// Append a row and return it
    pub fn add_row(&mut self, height: Option<u32>) -> &mut Row {
        self.rows.push(Row {
            height,
            ..Default::default()
        });
        let last = self.rows.len() - 1;
        &mut self.rows[last]
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Number of columns (the widest row, counting spans)
    pub fn column_count(&self) -> usize {
        self.rows.iter().map(Row::span_count).max().unwrap_or(0)
    }

    /// Deepest table nesting inside this table's cells; 0 when no cell
    /// contains a table.
    pub fn nesting_depth(&self) -> usize {
        self.rows
            .iter()
            .flat_map(|r| r.cells.iter())
            .flat_map(|c| c.elements.iter())
            .map(|e| match e {
                Element::Table(t) => 1 + t.nesting_depth(),
                _ => 0,
            })
            .max()
            .unwrap_or(0)
    }

    /// Grid column widths in twips, taken from the first row with absolute
    /// widths; other cells share `available` evenly.
    pub fn grid_widths(&self, available: u32) -> Vec<u32> {
        let columns = self.column_count();
        if columns == 0 {
            return Vec::new();
        }
        let even = available / columns as u32;
        let mut widths = vec![even; columns];
        if let Some(row) = self.rows.iter().find(|r| r.span_count() == columns) {
            let mut col = 0;
            for cell in &row.cells {
                let span = cell.span() as usize;
                let per = cell
                    .width
                    .to_twip()
                    .map(|w| (w.max(0.0) as u32) / span as u32)
                    .unwrap_or(even);
                for w in widths.iter_mut().skip(col).take(span) {
                    *w = per;
                }
                col += span;
            }
        }
        widths
    }
}

/// Table row
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Row {
    pub cells: Vec<Cell>,
    /// Height in twips
    pub height: Option<u32>,
    pub style: Option<RowStyle>,
}

impl Row {
    /// Append a cell and return it
    pub fn add_cell(&mut self, width: Length) -> &mut Cell {
        self.cells.push(Cell {
            width,
            ..Default::default()
        });
        let last = self.cells.len() - 1;
        &mut self.cells[last]
    }

    /// Grid columns covered by this row
    pub fn span_count(&self) -> usize {
        self.cells.iter().map(|c| c.span() as usize).sum()
    }
}

/// Table cell
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Cell {
    pub elements: Vec<Element>,
    pub width: Length,
    pub style: Option<CellStyle>,
}

impl Cell {
    pub fn push(&mut self, element: impl Into<Element>) -> &mut Self {
        self.elements.push(element.into());
        self
    }

    pub fn span(&self) -> u32 {
        self.style
            .as_ref()
            .and_then(|s| s.grid_span)
            .unwrap_or(1)
            .max(1)
    }

    pub fn text(&self) -> String {
        self.elements
            .iter()
            .map(Element::text)
            .collect::<Vec<_>>()
            .join("\n")
    }
}

//! Section (page layout) properties

use super::{pick, Overlay};

/// A4 portrait width in twips
pub const DEFAULT_PAGE_WIDTH: u32 = 11906;
/// A4 portrait height in twips
pub const DEFAULT_PAGE_HEIGHT: u32 = 16838;
pub const DEFAULT_MARGIN: u32 = 1440;
pub const DEFAULT_HEADER_DISTANCE: u32 = 720;
pub const DEFAULT_COLUMN_SPACING: u32 = 720;

/// Section style. Unset values fall back to the built-in defaults
/// returned by the accessor methods (A4 portrait, 1 inch margins, one
/// column).
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SectionStyle {
    pub page_width: Option<u32>,
    pub page_height: Option<u32>,
    pub orientation: Option<Orientation>,
    pub margin_top: Option<u32>,
    pub margin_bottom: Option<u32>,
    pub margin_left: Option<u32>,
    pub margin_right: Option<u32>,
    pub header_distance: Option<u32>,
    pub footer_distance: Option<u32>,
    pub gutter: Option<u32>,
    pub columns: Option<u32>,
    pub column_spacing: Option<u32>,
    pub break_type: Option<BreakType>,
    /// Restart page numbering at this value
    pub page_number_start: Option<u32>,
    /// Distinct first-page header/footer
    pub title_page: Option<bool>,
}

impl SectionStyle {
    pub fn new() -> Self {
        Self::default()
    }

    /// Landscape page with width and height swapped
    pub fn landscape() -> Self {
        SectionStyle {
            orientation: Some(Orientation::Landscape),
            page_width: Some(DEFAULT_PAGE_HEIGHT),
            page_height: Some(DEFAULT_PAGE_WIDTH),
            ..Default::default()
        }
    }

    pub fn page_width(&self) -> u32 {
        self.page_width.unwrap_or(DEFAULT_PAGE_WIDTH)
    }

    pub fn page_height(&self) -> u32 {
        self.page_height.unwrap_or(DEFAULT_PAGE_HEIGHT)
    }

    pub fn orientation(&self) -> Orientation {
        self.orientation.unwrap_or_default()
    }

    pub fn margin_top(&self) -> u32 {
        self.margin_top.unwrap_or(DEFAULT_MARGIN)
    }

    pub fn margin_bottom(&self) -> u32 {
        self.margin_bottom.unwrap_or(DEFAULT_MARGIN)
    }

    pub fn margin_left(&self) -> u32 {
        self.margin_left.unwrap_or(DEFAULT_MARGIN)
    }

    pub fn margin_right(&self) -> u32 {
        self.margin_right.unwrap_or(DEFAULT_MARGIN)
    }

    pub fn header_distance(&self) -> u32 {
        self.header_distance.unwrap_or(DEFAULT_HEADER_DISTANCE)
    }

    pub fn footer_distance(&self) -> u32 {
        self.footer_distance.unwrap_or(DEFAULT_HEADER_DISTANCE)
    }

    pub fn gutter(&self) -> u32 {
        self.gutter.unwrap_or(0)
    }

    pub fn columns(&self) -> u32 {
        self.columns.unwrap_or(1).max(1)
    }

    pub fn column_spacing(&self) -> u32 {
        self.column_spacing.unwrap_or(DEFAULT_COLUMN_SPACING)
    }

    pub fn break_type(&self) -> BreakType {
        self.break_type.unwrap_or_default()
    }

    /// Width available to content between the side margins
    pub fn content_width(&self) -> u32 {
        self.page_width()
            .saturating_sub(self.margin_left() + self.margin_right() + self.gutter())
    }
}

impl Overlay for SectionStyle {
    fn overlay(&mut self, top: &Self) {
        pick(&mut self.page_width, &top.page_width);
        pick(&mut self.page_height, &top.page_height);
        pick(&mut self.orientation, &top.orientation);
        pick(&mut self.margin_top, &top.margin_top);
        pick(&mut self.margin_bottom, &top.margin_bottom);
        pick(&mut self.margin_left, &top.margin_left);
        pick(&mut self.margin_right, &top.margin_right);
        pick(&mut self.header_distance, &top.header_distance);
        pick(&mut self.footer_distance, &top.footer_distance);
        pick(&mut self.gutter, &top.gutter);
        pick(&mut self.columns, &top.columns);
        pick(&mut self.column_spacing, &top.column_spacing);
        pick(&mut self.break_type, &top.break_type);
        pick(&mut self.page_number_start, &top.page_number_start);
        pick(&mut self.title_page, &top.title_page);
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Orientation {
    #[default]
    Portrait,
    Landscape,
}

impl Orientation {
    pub fn as_str(self) -> &'static str {
        match self {
            Orientation::Portrait => "portrait",
            Orientation::Landscape => "landscape",
        }
    }
}

/// How a section starts
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum BreakType {
    #[default]
    NextPage,
    Continuous,
    EvenPage,
    OddPage,
    NextColumn,
}

impl BreakType {
    /// OOXML `w:type/@w:val`
    pub fn as_ooxml(self) -> &'static str {
        match self {
            BreakType::NextPage => "nextPage",
            BreakType::Continuous => "continuous",
            BreakType::EvenPage => "evenPage",
            BreakType::OddPage => "oddPage",
            BreakType::NextColumn => "nextColumn",
        }
    }

    /// RTF section break control word
    pub fn as_rtf(self) -> &'static str {
        match self {
            BreakType::NextPage => "\\sbkpage",
            BreakType::Continuous => "\\sbknone",
            BreakType::EvenPage => "\\sbkeven",
            BreakType::OddPage => "\\sbkodd",
            BreakType::NextColumn => "\\sbkcol",
        }
    }

    pub fn from_ooxml(value: &str) -> Self {
        match value {
            "continuous" => BreakType::Continuous,
            "evenPage" => BreakType::EvenPage,
            "oddPage" => BreakType::OddPage,
            "nextColumn" => BreakType::NextColumn,
            _ => BreakType::NextPage,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let s = SectionStyle::default();
        assert_eq!(s.page_width(), 11906);
        assert_eq!(s.page_height(), 16838);
        assert_eq!(s.margin_left(), 1440);
        assert_eq!(s.columns(), 1);
        assert_eq!(s.content_width(), 11906 - 2880);
    }

    #[test]
    fn test_landscape() {
        let s = SectionStyle::landscape();
        assert_eq!(s.orientation(), Orientation::Landscape);
        assert!(s.page_width() > s.page_height());
    }
}

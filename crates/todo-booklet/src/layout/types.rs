//! Layout data types for booklet generation
//!
//! These types hold the fully resolved page geometry (in points) that every
//! page builder reads, plus the small rectangle/point helpers the builders
//! use for link regions.

use crate::options::{FontSizes, GuideLines, Palette, Structure, TitlePage};
use crate::types::{Color, IndexSpacing, NumberPlacement, Orientation};

/// A rectangular area in points
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect {
    /// X position (left edge)
    pub x: f32,
    /// Y position (bottom edge)
    pub y: f32,
    /// Width
    pub width: f32,
    /// Height
    pub height: f32,
}

impl Rect {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Build from two opposite corners, in any order
    pub fn from_corners(x1: f32, y1: f32, x2: f32, y2: f32) -> Self {
        Self {
            x: x1.min(x2),
            y: y1.min(y2),
            width: (x2 - x1).abs(),
            height: (y2 - y1).abs(),
        }
    }

    /// Right edge x coordinate
    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    /// Top edge y coordinate
    pub fn top(&self) -> f32 {
        self.y + self.height
    }

    /// Center x coordinate
    pub fn center_x(&self) -> f32 {
        self.x + self.width / 2.0
    }
}

/// A point in page space (origin bottom-left)
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// Page margins in points
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PageMargins {
    pub left: f32,
    pub right: f32,
    pub top: f32,
    pub bottom: f32,
}

/// Dot grid in points
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DotGrid {
    /// Distance between neighbouring dot centers
    pub spacing: f32,
    pub radius: f32,
    pub color: Color,
}

/// Item number placement with offsets in points
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NumberStyle {
    pub placement: NumberPlacement,
    /// Horizontal offset for numbers of the left column
    pub offset_left: f32,
    /// Horizontal offset for numbers of the right column
    pub offset_right: f32,
    /// Vertical offset applied to every number
    pub offset_y: f32,
}

impl NumberStyle {
    /// Horizontal offset belonging to `column`
    pub fn column_offset(&self, column: usize) -> f32 {
        if column == 0 {
            self.offset_left
        } else {
            self.offset_right
        }
    }
}

/// Validated, fully resolved settings for one generation run.
///
/// Built by [`crate::BookletOptions::resolve`]; all lengths are in points.
#[derive(Debug, Clone, PartialEq)]
pub struct LayoutParameters {
    pub page_width: f32,
    pub page_height: f32,
    pub orientation: Orientation,
    pub margins: PageMargins,
    pub grid: DotGrid,
    pub structure: Structure,
    pub fonts: FontSizes,
    pub colors: Palette,
    pub numbers: NumberStyle,
    pub guides: GuideLines,
    pub title: TitlePage,
    pub index_spacing: IndexSpacing,
}

impl LayoutParameters {
    /// Width between the left and right margins
    pub fn usable_width(&self) -> f32 {
        self.page_width - self.margins.left - self.margins.right
    }

    /// Height between the top and bottom margins
    pub fn usable_height(&self) -> f32 {
        self.page_height - self.margins.top - self.margins.bottom
    }

    /// Todo items on one list page
    pub fn items_per_page(&self) -> usize {
        self.structure.items_per_column * self.structure.columns
    }

    /// Todo items in the whole booklet
    pub fn total_items(&self) -> usize {
        self.items_per_page() * self.structure.list_pages
    }

    /// Detail pages in the whole booklet
    pub fn total_detail_pages(&self) -> usize {
        self.total_items() * self.structure.detail_pages_per_item
    }

    /// Pages in the finished document:
    /// title (optional) + index + list pages + detail pages
    pub fn page_count(&self) -> usize {
        usize::from(self.title.enabled) + 1 + self.structure.list_pages + self.total_detail_pages()
    }
}

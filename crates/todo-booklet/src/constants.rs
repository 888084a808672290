//! Shared constants for booklet layout
//!
//! This module centralizes the fixed insets, offsets and sizes that every
//! page builder agrees on. Lengths are in points unless the name says `_MM`.

// =============================================================================
// Unit Conversion
// =============================================================================

pub const MM_PER_INCH: f32 = 25.4;

/// Points per millimeter (1 inch = 72 points, 1 inch = 25.4mm)
pub const POINTS_PER_MM: f32 = 72.0 / MM_PER_INCH; // ≈ 2.83465

/// Convert millimeters to points
#[inline]
pub fn mm_to_pt(mm: f32) -> f32 {
    mm * POINTS_PER_MM
}

// =============================================================================
// Structure Limits
// =============================================================================

/// Largest accepted number of todo rows in one column
pub const MAX_ITEMS_PER_COLUMN: usize = 100;

/// Largest accepted number of list pages
pub const MAX_LIST_PAGES: usize = 1000;

/// Largest accepted detail chain length
pub const MAX_DETAIL_PAGES_PER_ITEM: usize = 20;

// =============================================================================
// Strokes and Colors
// =============================================================================

/// Width of todo lines, index rules and decorations
pub const RULE_WIDTH: f32 = 0.5;

/// Gray level of the ">" detail icon (#555555)
pub const ICON_GRAY: f32 = 0x55 as f32 / 255.0;

/// Gray level of the detail page header and navigation
pub const DETAIL_HEADER_GRAY: f32 = 0.6;

/// Gray level of the Prev/Next links
pub const DETAIL_NAV_GRAY: f32 = 0.5;

/// Gray level of the preview margin guides
pub const PREVIEW_GUIDE_GRAY: f32 = 0.9;

// =============================================================================
// Index Page
// =============================================================================

/// Columns of the index table
pub const INDEX_COLUMNS: usize = 2;

/// Font size of the index entries
pub const INDEX_ENTRY_FONT_SIZE: f32 = 12.0;

/// The "Index" title is this much larger than list page headers
pub const INDEX_TITLE_SIZE_BOOST: f32 = 2.0;

/// Distance from the top margin down to the first index entry
pub const INDEX_TOP_OFFSET: f32 = 40.0;

/// Gap between an index label and its trailing rule
pub const INDEX_RULE_GAP_MM: f32 = 3.0;

/// Space kept free at the right end of each index column
pub const INDEX_RULE_RIGHT_INSET_MM: f32 = 10.0;

/// Width of the clickable region over an index label
pub const INDEX_LINK_WIDTH: f32 = 50.0;

// =============================================================================
// List Pages
// =============================================================================

/// Header baseline sits this far above the top margin
pub const HEADER_RAISE: f32 = 15.0;

/// Distance from the top margin down to the first todo line
pub const LIST_TOP_OFFSET: f32 = 30.0;

/// Vertical band reserved for the header when spreading rows
pub const LIST_HEADER_BAND_MM: f32 = 12.0;

/// Todo lines stop this far before the column end
pub const LINE_RIGHT_INSET_MM: f32 = 16.0;

/// The icon box starts this far before the column end
pub const ICON_BOX_INSET_MM: f32 = 14.0;

/// Width of the clickable icon box
pub const ICON_BOX_WIDTH_MM: f32 = 10.0;

/// Half height of the clickable icon box
pub const ICON_BOX_HALF_HEIGHT_MM: f32 = 2.8;

/// Horizontal nudge of the ">" glyph from the box center
pub const ICON_GLYPH_SHIFT_MM: f32 = 1.6;

/// Number gap left of the margin for the outside placement, left column
pub const NUMBER_OUTSIDE_LEFT_GAP_MM: f32 = 3.0;

/// Number gap right of the margin for the outside placement, right column
pub const NUMBER_OUTSIDE_RIGHT_GAP_MM: f32 = 1.0;

/// Number inset from the line start for the inside-left placement
pub const NUMBER_INSIDE_LEFT_INSET_MM: f32 = 2.0;

/// Number inset from the column end for the inside-right placement
pub const NUMBER_INSIDE_RIGHT_INSET_MM: f32 = 20.0;

// =============================================================================
// Detail Pages
// =============================================================================

/// The back arrow sits this far left of the left margin
pub const DETAIL_ARROW_INSET_MM: f32 = 4.0;

/// Header raise above the top margin as a fraction of page height
pub const DETAIL_HEADER_RAISE_RATIO: f32 = 0.034;

/// Bounds of the header raise
pub const DETAIL_HEADER_RAISE_MIN_MM: f32 = 5.0;
pub const DETAIL_HEADER_RAISE_MAX_MM: f32 = 15.0;

/// Font size of the Prev/Next links
pub const DETAIL_NAV_FONT_SIZE: f32 = 10.0;

/// Prev/Next baseline sits this far below the bottom margin
pub const DETAIL_NAV_DROP: f32 = 12.0;

// =============================================================================
// Link Regions
// =============================================================================

/// Header link regions extend this far below / above the baseline
pub const HEADER_LINK_BELOW: f32 = 5.0;
pub const HEADER_LINK_ABOVE: f32 = 15.0;

/// Index and navigation link regions extend this far below / above the baseline
pub const ENTRY_LINK_BELOW: f32 = 3.0;
pub const ENTRY_LINK_ABOVE: f32 = 12.0;
pub const NAV_LINK_ABOVE: f32 = 10.0;

// =============================================================================
// Title Page
// =============================================================================

/// Line height multiplier for wrapped description text
pub const TITLE_LINE_SPACING: f32 = 1.4;

/// Gap between the title block and its decoration
pub const TITLE_DECORATION_GAP: f32 = 20.0;

/// Decoration width as a fraction of the usable width
pub const TITLE_DECORATION_WIDTH_RATIO: f32 = 0.4;

/// Spacing between the two strokes of a double line
pub const TITLE_DOUBLE_LINE_GAP: f32 = 3.0;

/// Dot row decoration
pub const TITLE_DOT_COUNT: usize = 5;
pub const TITLE_DOT_SPACING: f32 = 8.0;
pub const TITLE_DOT_RADIUS: f32 = 1.5;

// =============================================================================
// Bezier Curve Constants
// =============================================================================

/// Control point factor for approximating circles with Bezier curves.
/// This magic number comes from: 4 * (sqrt(2) - 1) / 3 ≈ 0.552284749831
/// Using 4 cubic Bezier curves with this factor gives a very close circle approximation.
pub const BEZIER_CIRCLE_FACTOR: f32 = 0.552284749831;

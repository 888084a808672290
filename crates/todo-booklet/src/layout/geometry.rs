//! Page geometry calculation
//!
//! Everything here is a pure function of [`LayoutParameters`]: item
//! numbering, row/column positions on list pages, item number placement,
//! index table slots and detail page header positions. The page builders
//! only turn these numbers into canvas calls.

use crate::constants::*;
use crate::metrics::text_width;
use crate::types::{NumberPlacement, StandardFont};

use super::{LayoutParameters, Point, Rect};

/// Font of the item numbers
pub const NUMBER_FONT: StandardFont = StandardFont::Helvetica;

// =============================================================================
// Item Numbering
// =============================================================================

/// 1-based index of the item at (`page`, `column`, `row`), all 0-based.
///
/// Dense and unique over `1..=total_items`.
pub fn global_index(params: &LayoutParameters, page: usize, column: usize, row: usize) -> usize {
    let per_column = params.structure.items_per_column;
    page * params.items_per_page() + column * per_column + row + 1
}

/// Number printed next to an item: its position within its own list page.
pub fn page_relative_number(params: &LayoutParameters, global_index: usize) -> usize {
    (global_index - 1) % params.items_per_page() + 1
}

/// Where an item lives: its 1-based list page and 1-based position on it
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ItemLocation {
    pub list_page: usize,
    pub position: usize,
}

/// Inverse of [`global_index`]
pub fn item_location(params: &LayoutParameters, global_index: usize) -> ItemLocation {
    let per_page = params.items_per_page();
    ItemLocation {
        list_page: global_index.div_ceil(per_page),
        position: (global_index - 1) % per_page + 1,
    }
}

// =============================================================================
// List Pages
// =============================================================================

/// Row and column grid of a list page
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ListGeometry {
    pub column_width: f32,
    /// Vertical distance between todo lines
    pub row_gap: f32,
    /// Baseline of the first todo line
    pub top_y: f32,
    /// Baseline of the "Page N" header
    pub header_baseline: f32,
}

pub fn list_geometry(params: &LayoutParameters) -> ListGeometry {
    let inner_height = params.usable_height() - mm_to_pt(LIST_HEADER_BAND_MM);
    ListGeometry {
        column_width: params.usable_width() / params.structure.columns as f32,
        row_gap: inner_height / params.structure.items_per_column as f32,
        top_y: params.page_height - params.margins.top - LIST_TOP_OFFSET,
        header_baseline: params.page_height - params.margins.top + HEADER_RAISE,
    }
}

/// Everything needed to draw one todo line
#[derive(Debug, Clone, PartialEq)]
pub struct ItemSlot {
    pub global_index: usize,
    /// Page-relative number shown next to the line
    pub number: usize,
    pub column: usize,
    pub row: usize,
    /// Left end of the todo line; `y` is the line's baseline
    pub line_start: Point,
    pub line_end_x: f32,
    /// Clickable region around the ">" icon
    pub icon_box: Rect,
    /// Baseline origin of the ">" glyph
    pub icon_origin: Point,
    /// Baseline origin of the number, `None` when numbers are hidden
    pub number_origin: Option<Point>,
}

/// Left edge of `column`
pub fn column_origin(params: &LayoutParameters, geometry: &ListGeometry, column: usize) -> f32 {
    params.margins.left + column as f32 * geometry.column_width
}

/// Horizontal position of an item number.
///
/// Both inside placements shift by the offset of the number's own column.
pub fn number_x(
    params: &LayoutParameters,
    geometry: &ListGeometry,
    column: usize,
    number_width: f32,
) -> Option<f32> {
    let numbers = &params.numbers;
    let x0 = column_origin(params, geometry, column);
    match numbers.placement {
        NumberPlacement::Hidden => None,
        NumberPlacement::Outside if column == 0 => Some(
            params.margins.left - mm_to_pt(NUMBER_OUTSIDE_LEFT_GAP_MM) - number_width
                + numbers.offset_left,
        ),
        NumberPlacement::Outside => Some(
            params.page_width - params.margins.right
                + mm_to_pt(NUMBER_OUTSIDE_RIGHT_GAP_MM)
                + numbers.offset_right,
        ),
        NumberPlacement::InsideLeft => Some(
            x0 + mm_to_pt(NUMBER_INSIDE_LEFT_INSET_MM) + numbers.column_offset(column),
        ),
        NumberPlacement::InsideRight => Some(
            x0 + geometry.column_width - mm_to_pt(NUMBER_INSIDE_RIGHT_INSET_MM) - number_width
                + numbers.column_offset(column),
        ),
    }
}

/// Slot of the item at (`page`, `column`, `row`), all 0-based
pub fn item_slot(
    params: &LayoutParameters,
    geometry: &ListGeometry,
    page: usize,
    column: usize,
    row: usize,
) -> ItemSlot {
    let global_index = global_index(params, page, column, row);
    let number = page_relative_number(params, global_index);

    let x0 = column_origin(params, geometry, column);
    let y = geometry.top_y - row as f32 * geometry.row_gap;
    let column_end = x0 + geometry.column_width;

    let box_x1 = column_end - mm_to_pt(ICON_BOX_INSET_MM);
    let box_x2 = box_x1 + mm_to_pt(ICON_BOX_WIDTH_MM);
    let half_height = mm_to_pt(ICON_BOX_HALF_HEIGHT_MM);
    let icon_box = Rect::from_corners(box_x1, y - half_height, box_x2, y + half_height);

    // The glyph sits 2pt left of the nudged box center, raised to the line
    let icon_origin = Point::new(
        icon_box.center_x() - mm_to_pt(ICON_GLYPH_SHIFT_MM) - 2.0,
        y - mm_to_pt(2.0) + 6.0,
    );

    let number_width = text_width(&number.to_string(), NUMBER_FONT, params.fonts.item_number);
    let number_origin = number_x(params, geometry, column, number_width)
        .map(|x| Point::new(x, y + params.numbers.offset_y));

    ItemSlot {
        global_index,
        number,
        column,
        row,
        line_start: Point::new(x0, y),
        line_end_x: column_end - mm_to_pt(LINE_RIGHT_INSET_MM),
        icon_box,
        icon_origin,
        number_origin,
    }
}

/// All slots of list page `page` (0-based), column by column
pub fn list_page_slots(params: &LayoutParameters, page: usize) -> Vec<ItemSlot> {
    let geometry = list_geometry(params);
    let mut slots = Vec::with_capacity(params.items_per_page());
    for column in 0..params.structure.columns {
        for row in 0..params.structure.items_per_column {
            slots.push(item_slot(params, &geometry, page, column, row));
        }
    }
    slots
}

// =============================================================================
// Index Page
// =============================================================================

/// Table of list page links on the index page
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IndexGeometry {
    pub columns: usize,
    pub entries_per_column: usize,
    pub column_width: f32,
    /// Baseline of the first entry in each column
    pub top_y: f32,
    pub line_height: f32,
    /// Baseline of the "Index" title
    pub title_baseline: f32,
}

pub fn index_geometry(params: &LayoutParameters) -> IndexGeometry {
    let list_pages = params.structure.list_pages;
    let entries_per_column = list_pages.div_ceil(INDEX_COLUMNS).max(1);
    let top_y = params.page_height - params.margins.top - INDEX_TOP_OFFSET;
    let available = (top_y - params.margins.bottom) * params.index_spacing.height_fraction(list_pages);

    IndexGeometry {
        columns: INDEX_COLUMNS,
        entries_per_column,
        column_width: params.usable_width() / INDEX_COLUMNS as f32,
        top_y,
        line_height: available / entries_per_column as f32,
        title_baseline: params.page_height - params.margins.top + HEADER_RAISE,
    }
}

/// Baseline origin of the entry for list page `page_number` (1-based)
pub fn index_entry_origin(
    params: &LayoutParameters,
    geometry: &IndexGeometry,
    page_number: usize,
) -> Point {
    let slot = page_number - 1;
    let column = slot / geometry.entries_per_column;
    let row = slot % geometry.entries_per_column;
    Point::new(
        params.margins.left + column as f32 * geometry.column_width,
        geometry.top_y - row as f32 * geometry.line_height,
    )
}

// =============================================================================
// Detail Pages
// =============================================================================

/// Baseline of the detail page header.
///
/// The raise above the top margin follows the page height within bounds.
pub fn detail_header_baseline(params: &LayoutParameters) -> f32 {
    let raise = (params.page_height * DETAIL_HEADER_RAISE_RATIO).clamp(
        mm_to_pt(DETAIL_HEADER_RAISE_MIN_MM),
        mm_to_pt(DETAIL_HEADER_RAISE_MAX_MM),
    );
    params.page_height - params.margins.top + raise
}

/// Baseline of the Prev/Next links
pub fn detail_nav_baseline(params: &LayoutParameters) -> f32 {
    params.margins.bottom - DETAIL_NAV_DROP
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::BookletOptions;

    fn params_with(items_per_column: usize, columns: usize, list_pages: usize) -> LayoutParameters {
        let mut options = BookletOptions::default();
        options.structure.items_per_column = items_per_column;
        options.structure.columns = columns;
        options.structure.list_pages = list_pages;
        options.resolve().unwrap()
    }

    #[test]
    fn test_global_index_is_dense() {
        let params = params_with(20, 2, 3);
        let mut seen = Vec::new();
        for page in 0..3 {
            for column in 0..2 {
                for row in 0..20 {
                    seen.push(global_index(&params, page, column, row));
                }
            }
        }
        seen.sort_unstable();
        assert_eq!(seen, (1..=120).collect::<Vec<_>>());
    }

    #[test]
    fn test_page_relative_number_wraps() {
        let params = params_with(20, 2, 3);
        assert_eq!(page_relative_number(&params, 1), 1);
        assert_eq!(page_relative_number(&params, 40), 40);
        assert_eq!(page_relative_number(&params, 41), 1);
        assert_eq!(page_relative_number(&params, 120), 40);
    }

    #[test]
    fn test_item_location_inverts_global_index() {
        let params = params_with(2, 1, 2);
        assert_eq!(
            item_location(&params, 3),
            ItemLocation {
                list_page: 2,
                position: 1
            }
        );
        for page in 0..2 {
            for row in 0..2 {
                let idx = global_index(&params, page, 0, row);
                let location = item_location(&params, idx);
                assert_eq!(location.list_page, page + 1);
                assert_eq!(location.position, row + 1);
            }
        }
    }

    #[test]
    fn test_rows_step_down_by_row_gap() {
        let params = params_with(20, 2, 1);
        let geometry = list_geometry(&params);
        let first = item_slot(&params, &geometry, 0, 0, 0);
        let second = item_slot(&params, &geometry, 0, 0, 1);
        assert_eq!(first.line_start.y, geometry.top_y);
        assert!((first.line_start.y - second.line_start.y - geometry.row_gap).abs() < 1e-3);
        assert!(first.line_end_x < first.icon_box.x + first.icon_box.width);
    }

    #[test]
    fn test_columns_start_at_column_width() {
        let params = params_with(20, 2, 1);
        let geometry = list_geometry(&params);
        let right = item_slot(&params, &geometry, 0, 1, 0);
        assert!((right.line_start.x - (params.margins.left + geometry.column_width)).abs() < 1e-3);
        assert_eq!(right.global_index, 21);
    }

    #[test]
    fn test_inside_right_numbers_end_before_column_end() {
        let mut options = BookletOptions::default();
        options.numbers.placement = NumberPlacement::InsideRight;
        options.numbers.offset_left_mm = -1.5;
        options.numbers.offset_right_mm = 2.5;
        let params = options.resolve().unwrap();
        let geometry = list_geometry(&params);

        for (column, offset_mm) in [(0, -1.5), (1, 2.5)] {
            let column_end = column_origin(&params, &geometry, column) + geometry.column_width;
            for row in [0, 9] {
                let slot = item_slot(&params, &geometry, 0, column, row);
                let width =
                    text_width(&slot.number.to_string(), NUMBER_FONT, params.fonts.item_number);
                let end = slot.number_origin.unwrap().x + width;
                let expected = column_end - mm_to_pt(NUMBER_INSIDE_RIGHT_INSET_MM) + mm_to_pt(offset_mm);
                assert!((end - expected).abs() < 1e-3, "column {column} row {row}");
            }
        }
    }

    #[test]
    fn test_hidden_numbers_have_no_origin() {
        let mut options = BookletOptions::default();
        options.numbers.placement = NumberPlacement::Hidden;
        let params = options.resolve().unwrap();
        assert!(list_page_slots(&params, 0).iter().all(|s| s.number_origin.is_none()));
    }

    #[test]
    fn test_index_geometry_half_height_for_small_booklets() {
        let small = params_with(20, 2, 30);
        let large = params_with(20, 2, 31);

        let small_geometry = index_geometry(&small);
        let large_geometry = index_geometry(&large);
        assert_eq!(small_geometry.entries_per_column, 15);
        assert_eq!(large_geometry.entries_per_column, 16);

        let span = small_geometry.top_y - small.margins.bottom;
        assert!((small_geometry.line_height - span * 0.5 / 15.0).abs() < 1e-3);
        assert!((large_geometry.line_height - span / 16.0).abs() < 1e-3);
    }

    #[test]
    fn test_index_entries_fill_left_column_first() {
        let params = params_with(20, 2, 5);
        let geometry = index_geometry(&params);
        assert_eq!(geometry.entries_per_column, 3);

        let first = index_entry_origin(&params, &geometry, 1);
        let third = index_entry_origin(&params, &geometry, 3);
        let fourth = index_entry_origin(&params, &geometry, 4);
        assert_eq!(first.x, third.x);
        assert!(third.y < first.y);
        assert!((fourth.x - first.x - geometry.column_width).abs() < 1e-3);
        assert_eq!(fourth.y, first.y);
    }

    #[test]
    fn test_detail_header_raise_is_bounded() {
        let params = params_with(20, 2, 1);
        let raise = detail_header_baseline(&params) - (params.page_height - params.margins.top);
        assert!(raise >= mm_to_pt(5.0) - 1e-3);
        assert!(raise <= mm_to_pt(15.0) + 1e-3);
    }
}

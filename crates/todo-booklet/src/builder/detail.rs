//! Detail page chains
//!
//! Every item gets `detail_pages_per_item` pages in a row. Each page shows
//! the shared dot grid, links back to its list page and to the index, and
//! links to its neighbours in the chain. The chain does not wrap around.

use crate::canvas::{BlockHandle, Canvas};
use crate::constants::*;
use crate::layout::{
    LayoutParameters, Point, Rect, detail_header_baseline, detail_nav_baseline, item_location,
};
use crate::registry::{INDEX_BOOKMARK, detail_bookmark, list_page_bookmark};
use crate::types::{Color, Result, StandardFont};

/// Header text of detail page `detail_number` of the item at `list_page`/`position`
pub fn detail_header(list_page: usize, position: usize, detail_number: usize, total: usize) -> String {
    format!("Details — Page {list_page} — #{position} — {detail_number}/{total}")
}

/// Emit all detail pages of `item` (1-based)
pub fn build_detail_chain<C: Canvas>(
    canvas: &mut C,
    params: &LayoutParameters,
    tile: &BlockHandle,
    item: usize,
) -> Result<()> {
    for detail_number in 1..=params.structure.detail_pages_per_item {
        build_detail_page(canvas, params, tile, item, detail_number)?;
    }
    Ok(())
}

/// Emit detail page `detail_number` (1-based) of `item` (1-based)
pub fn build_detail_page<C: Canvas>(
    canvas: &mut C,
    params: &LayoutParameters,
    tile: &BlockHandle,
    item: usize,
    detail_number: usize,
) -> Result<()> {
    let total = params.structure.detail_pages_per_item;
    let location = item_location(params, item);

    canvas.place_reusable_block(tile)?;
    canvas.register_bookmark(&detail_bookmark(item, detail_number))?;

    // Header row: "<" back arrow, header text, "Index" on the right
    let font = StandardFont::HelveticaBold;
    let size = params.fonts.detail;
    let header_y = detail_header_baseline(params);
    let arrow_x = params.margins.left - mm_to_pt(DETAIL_ARROW_INSET_MM);

    canvas.set_fill_color(Color::gray(DETAIL_HEADER_GRAY));
    canvas.draw_text("<", Point::new(arrow_x, header_y), font, size);

    let header = detail_header(location.list_page, location.position, detail_number, total);
    let header_width = canvas.measure_text_width(&header, font, size);
    canvas.draw_text(&header, Point::new(params.margins.left, header_y), font, size);

    let index_width = canvas.measure_text_width("Index", font, size);
    let index_x = params.page_width - params.margins.right - index_width;
    canvas.draw_text("Index", Point::new(index_x, header_y), font, size);

    canvas.add_link(
        Rect::from_corners(
            arrow_x,
            header_y - HEADER_LINK_BELOW,
            params.margins.left + header_width,
            header_y + HEADER_LINK_ABOVE,
        ),
        &list_page_bookmark(location.list_page),
    );
    canvas.add_link(
        Rect::from_corners(
            index_x,
            header_y - HEADER_LINK_BELOW,
            index_x + index_width,
            header_y + HEADER_LINK_ABOVE,
        ),
        INDEX_BOOKMARK,
    );

    // Chain navigation below the bottom margin
    let nav_y = detail_nav_baseline(params);
    let nav_font = StandardFont::Helvetica;
    canvas.set_fill_color(Color::gray(DETAIL_NAV_GRAY));

    if detail_number < total {
        let text = "Next >";
        let width = canvas.measure_text_width(text, nav_font, DETAIL_NAV_FONT_SIZE);
        let right = params.page_width - params.margins.right;
        let x = right - width;
        canvas.draw_text(text, Point::new(x, nav_y), nav_font, DETAIL_NAV_FONT_SIZE);
        canvas.add_link(
            Rect::from_corners(x, nav_y - ENTRY_LINK_BELOW, right, nav_y + NAV_LINK_ABOVE),
            &detail_bookmark(item, detail_number + 1),
        );
    }

    if detail_number > 1 {
        let text = "< Prev";
        let width = canvas.measure_text_width(text, nav_font, DETAIL_NAV_FONT_SIZE);
        let x = params.margins.left;
        canvas.draw_text(text, Point::new(x, nav_y), nav_font, DETAIL_NAV_FONT_SIZE);
        canvas.add_link(
            Rect::from_corners(x, nav_y - ENTRY_LINK_BELOW, x + width, nav_y + NAV_LINK_ABOVE),
            &detail_bookmark(item, detail_number - 1),
        );
    }

    canvas.finish_page()
}

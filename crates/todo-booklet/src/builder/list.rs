//! List pages: numbered todo lines, each linking to its first detail page

use crate::canvas::Canvas;
use crate::constants::*;
use crate::layout::{ItemSlot, LayoutParameters, NUMBER_FONT, Point, Rect, list_geometry, list_page_slots};
use crate::registry::{INDEX_BOOKMARK, detail_bookmark, list_page_bookmark};
use crate::types::{Color, Result, StandardFont};
use log::debug;

/// What a drawn list page exposes for linking
#[derive(Debug, Clone)]
pub struct ListPageLayout {
    /// Clickable region over the "Page N" header
    pub header_link: Rect,
    pub slots: Vec<ItemSlot>,
}

/// Draw, bookmark and link list page `page` (0-based), then close it.
///
/// Returns the number of items linked to a detail chain.
pub fn build_list_page<C: Canvas>(
    canvas: &mut C,
    params: &LayoutParameters,
    page: usize,
) -> Result<usize> {
    canvas.register_bookmark(&list_page_bookmark(page + 1))?;

    let layout = draw_list_page(canvas, params, page);

    canvas.add_link(layout.header_link, INDEX_BOOKMARK);
    for slot in &layout.slots {
        canvas.add_link(slot.icon_box, &detail_bookmark(slot.global_index, 1));
    }

    canvas.finish_page()?;
    debug!(
        "List page {} written with items {}..={}",
        page + 1,
        layout.slots.first().map_or(0, |s| s.global_index),
        layout.slots.last().map_or(0, |s| s.global_index)
    );
    Ok(layout.slots.len())
}

/// Draw the content of list page `page` (0-based) without links
pub fn draw_list_page<C: Canvas>(
    canvas: &mut C,
    params: &LayoutParameters,
    page: usize,
) -> ListPageLayout {
    let geometry = list_geometry(params);

    // Header, right aligned inside the margins
    let header = format!("Page {}", page + 1);
    let header_width =
        canvas.measure_text_width(&header, StandardFont::HelveticaBold, params.fonts.header);
    let header_origin = Point::new(
        params.page_width - params.margins.right - header_width,
        geometry.header_baseline,
    );
    canvas.set_fill_color(params.colors.text);
    canvas.draw_text(&header, header_origin, StandardFont::HelveticaBold, params.fonts.header);

    let slots = list_page_slots(params, page);
    canvas.set_line_width(RULE_WIDTH);
    for slot in &slots {
        draw_item(canvas, params, slot);
    }

    ListPageLayout {
        header_link: Rect::from_corners(
            header_origin.x,
            header_origin.y - HEADER_LINK_BELOW,
            header_origin.x + header_width,
            header_origin.y + HEADER_LINK_ABOVE,
        ),
        slots,
    }
}

fn draw_item<C: Canvas>(canvas: &mut C, params: &LayoutParameters, slot: &ItemSlot) {
    if let Some(origin) = slot.number_origin {
        canvas.set_fill_color(params.colors.item_number);
        canvas.draw_text(
            &slot.number.to_string(),
            origin,
            NUMBER_FONT,
            params.fonts.item_number,
        );
    }

    canvas.set_stroke_color(params.colors.line);
    canvas.draw_line(
        slot.line_start,
        Point::new(slot.line_end_x, slot.line_start.y),
    );

    canvas.set_fill_color(Color::gray(ICON_GRAY));
    canvas.draw_text(">", slot.icon_origin, StandardFont::HelveticaBold, params.fonts.icon);
}

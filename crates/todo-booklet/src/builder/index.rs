//! Index page: one link per list page

use crate::canvas::Canvas;
use crate::constants::*;
use crate::layout::{LayoutParameters, Point, Rect, index_entry_origin, index_geometry};
use crate::registry::{INDEX_BOOKMARK, list_page_bookmark};
use crate::types::{Result, StandardFont};
use log::info;

/// Draw the index page and link every `P{n}` entry to list page `n`
pub fn build_index_page<C: Canvas>(canvas: &mut C, params: &LayoutParameters) -> Result<()> {
    canvas.register_bookmark(INDEX_BOOKMARK)?;

    let geometry = index_geometry(params);

    canvas.set_fill_color(params.colors.text);
    canvas.draw_text(
        "Index",
        Point::new(params.margins.left, geometry.title_baseline),
        StandardFont::HelveticaBold,
        params.fonts.header + INDEX_TITLE_SIZE_BOOST,
    );

    canvas.set_fill_color(params.colors.line);
    canvas.set_stroke_color(params.colors.line);
    canvas.set_line_width(RULE_WIDTH);

    for page_number in 1..=params.structure.list_pages {
        let origin = index_entry_origin(params, &geometry, page_number);
        let label = format!("P{page_number}");
        let label_width =
            canvas.measure_text_width(&label, StandardFont::Helvetica, INDEX_ENTRY_FONT_SIZE);

        canvas.draw_text(&label, origin, StandardFont::Helvetica, INDEX_ENTRY_FONT_SIZE);

        let rule_start = origin.x + label_width + mm_to_pt(INDEX_RULE_GAP_MM);
        let rule_end = origin.x + geometry.column_width - mm_to_pt(INDEX_RULE_RIGHT_INSET_MM);
        if rule_end > rule_start {
            canvas.draw_line(Point::new(rule_start, origin.y), Point::new(rule_end, origin.y));
        }

        canvas.add_link(
            Rect::from_corners(
                origin.x,
                origin.y - ENTRY_LINK_BELOW,
                origin.x + INDEX_LINK_WIDTH,
                origin.y + ENTRY_LINK_ABOVE,
            ),
            &list_page_bookmark(page_number),
        );
    }

    canvas.finish_page()?;
    info!(
        "Index page written: {} entries in {} columns",
        params.structure.list_pages, geometry.columns
    );
    Ok(())
}

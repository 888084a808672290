use crate::builder::draw_list_page;
use crate::canvas::{Canvas, PdfCanvas};
use crate::constants::{PREVIEW_GUIDE_GRAY, RULE_WIDTH};
use crate::layout::{LayoutParameters, Point};
use crate::types::*;
use lopdf::Document;

const GUIDE_DASH: [f32; 2] = [2.0, 2.0];
const FOOTER_FONT_SIZE: f32 = 8.0;
const FOOTER_GRAY: f32 = 0.6;
/// Footer baseline sits this far above the bottom margin
const FOOTER_RAISE: f32 = 10.0;

/// Generate a one-page preview of the first list page.
///
/// Margins are outlined with dashed guides and a footer summarizes the full
/// booklet. The preview carries no links.
pub async fn generate_preview(params: &LayoutParameters) -> Result<Document> {
    let params = params.clone();
    tokio::task::spawn_blocking(move || build_preview(&params)).await?
}

/// Synchronous form of [`generate_preview`]
pub fn build_preview(params: &LayoutParameters) -> Result<Document> {
    let mut canvas = PdfCanvas::new(params.page_width, params.page_height);
    canvas.set_title("Todo Booklet preview");

    draw_margin_guides(&mut canvas, params);
    draw_list_page(&mut canvas, params, 0);

    canvas.set_fill_color(Color::gray(FOOTER_GRAY));
    canvas.draw_text(
        &preview_footer(params),
        Point::new(params.margins.left, params.margins.bottom + FOOTER_RAISE),
        StandardFont::Helvetica,
        FOOTER_FONT_SIZE,
    );

    canvas.finish_page()?;
    canvas.finish()
}

/// Footer line summarizing the booklet the preview belongs to
pub fn preview_footer(params: &LayoutParameters) -> String {
    format!(
        "Preview: Todo page 1/{} | {} items × {} cols | Total: {} pages",
        params.structure.list_pages,
        params.structure.items_per_column,
        params.structure.columns,
        group_thousands(params.page_count())
    )
}

fn draw_margin_guides(canvas: &mut PdfCanvas, params: &LayoutParameters) {
    let (w, h) = (params.page_width, params.page_height);
    let left = params.margins.left;
    let right = w - params.margins.right;
    let top = h - params.margins.top;
    let bottom = params.margins.bottom;

    canvas.set_stroke_color(Color::gray(PREVIEW_GUIDE_GRAY));
    canvas.set_line_width(RULE_WIDTH);
    canvas.set_dash(&GUIDE_DASH);
    canvas.draw_line(Point::new(left, 0.0), Point::new(left, h));
    canvas.draw_line(Point::new(right, 0.0), Point::new(right, h));
    canvas.draw_line(Point::new(0.0, top), Point::new(w, top));
    canvas.draw_line(Point::new(0.0, bottom), Point::new(w, bottom));
    canvas.set_dash(&[]);
}

/// `12345` -> `"12,345"`
fn group_thousands(value: usize) -> String {
    let digits = value.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    grouped
}

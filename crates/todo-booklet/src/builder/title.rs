//! Optional cover page

use crate::canvas::Canvas;
use crate::constants::*;
use crate::layout::{LayoutParameters, Point};
use crate::metrics::wrap_text;
use crate::types::{Result, TitleAlignment, TitleDecoration};
use chrono::NaiveDate;
use log::debug;

/// Share of the text size taken by descenders, for the frame bottom
const DESCENT_RATIO: f32 = 0.25;

/// Bounding box of the drawn text, grown line by line
struct TextBlock {
    left: f32,
    right: f32,
    top: f32,
    bottom: f32,
}

impl TextBlock {
    fn include(&mut self, x: f32, width: f32, baseline: f32, size: f32) {
        self.left = self.left.min(x);
        self.right = self.right.max(x + width);
        self.bottom = self.bottom.min(baseline - size * DESCENT_RATIO);
    }
}

/// Left edge of a run of `width` points under `alignment`
fn aligned_x(params: &LayoutParameters, alignment: TitleAlignment, width: f32) -> f32 {
    match alignment {
        TitleAlignment::Left => params.margins.left,
        TitleAlignment::Right => params.page_width - params.margins.right - width,
        TitleAlignment::Center => (params.page_width - width) / 2.0,
    }
}

/// Draw the cover page: title, wrapped description, date and decoration.
///
/// `date` is printed only when the title page asks for it.
pub fn build_title_page<C: Canvas>(
    canvas: &mut C,
    params: &LayoutParameters,
    date: NaiveDate,
) -> Result<()> {
    let title = &params.title;
    let alignment = title.alignment;

    // Title line
    let title_y = params.page_height * title.position.fraction();
    let title_width = canvas.measure_text_width(&title.text, title.font, title.size);
    let title_x = aligned_x(params, alignment, title_width);
    canvas.set_fill_color(title.color);
    canvas.draw_text(&title.text, Point::new(title_x, title_y), title.font, title.size);

    let mut block = TextBlock {
        left: title_x,
        right: title_x + title_width,
        top: title_y + title.size,
        bottom: title_y,
    };
    block.include(title_x, title_width, title_y, title.size);

    // Description and date below it
    let line_height = title.description_size * TITLE_LINE_SPACING;
    let mut cursor = title_y - title.size * 0.5;

    let lines = wrap_text(
        &title.description,
        title.description_font,
        title.description_size,
        params.usable_width(),
    );
    canvas.set_fill_color(title.description_color);
    for line in &lines {
        cursor -= line_height;
        let width = canvas.measure_text_width(line, title.description_font, title.description_size);
        let x = aligned_x(params, alignment, width);
        canvas.draw_text(line, Point::new(x, cursor), title.description_font, title.description_size);
        block.include(x, width, cursor, title.description_size);
    }

    if title.add_date {
        let text = date.format("%B %-d, %Y").to_string();
        let size = title.description_size * 0.8;
        cursor -= line_height;
        let width = canvas.measure_text_width(&text, title.description_font, size);
        let x = aligned_x(params, alignment, width);
        canvas.draw_text(&text, Point::new(x, cursor), title.description_font, size);
        block.include(x, width, cursor, size);
    }

    draw_decoration(canvas, params, &block);

    canvas.finish_page()?;
    debug!(
        "Title page written: '{}' with {} description lines",
        title.text,
        lines.len()
    );
    Ok(())
}

fn draw_decoration<C: Canvas>(canvas: &mut C, params: &LayoutParameters, block: &TextBlock) {
    let title = &params.title;
    if title.decoration == TitleDecoration::None {
        return;
    }

    canvas.set_stroke_color(title.color);
    canvas.set_fill_color(title.color);
    canvas.set_line_width(RULE_WIDTH);

    let width = params.usable_width() * TITLE_DECORATION_WIDTH_RATIO;
    let left = aligned_x(params, title.alignment, width);
    let right = left + width;
    let y = block.bottom - TITLE_DECORATION_GAP;

    match title.decoration {
        TitleDecoration::None => {}
        TitleDecoration::SimpleLine => {
            canvas.draw_line(Point::new(left, y), Point::new(right, y));
        }
        TitleDecoration::DoubleLine => {
            canvas.draw_line(Point::new(left, y), Point::new(right, y));
            let lower = y - TITLE_DOUBLE_LINE_GAP;
            canvas.draw_line(Point::new(left, lower), Point::new(right, lower));
        }
        TitleDecoration::Dots => {
            let span = (TITLE_DOT_COUNT - 1) as f32 * TITLE_DOT_SPACING;
            let start = (left + right - span) / 2.0;
            for i in 0..TITLE_DOT_COUNT {
                let center = Point::new(start + i as f32 * TITLE_DOT_SPACING, y);
                canvas.draw_filled_circle(center, TITLE_DOT_RADIUS);
            }
        }
        TitleDecoration::Frame => {
            let gap = TITLE_DECORATION_GAP;
            let x1 = (block.left - gap).max(params.margins.left);
            let x2 = (block.right + gap).min(params.page_width - params.margins.right);
            let y1 = (block.bottom - gap).max(params.margins.bottom);
            let y2 = (block.top + gap).min(params.page_height - params.margins.top);
            let corners = [
                Point::new(x1, y1),
                Point::new(x2, y1),
                Point::new(x2, y2),
                Point::new(x1, y2),
            ];
            for (i, &corner) in corners.iter().enumerate() {
                canvas.draw_line(corner, corners[(i + 1) % corners.len()]);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::BookletOptions;
    use crate::canvas::{DrawOp, RecordingCanvas};

    fn title_params(configure: impl FnOnce(&mut BookletOptions)) -> LayoutParameters {
        let mut options = BookletOptions::default();
        options.title_page.enabled = true;
        configure(&mut options);
        options.resolve().unwrap()
    }

    fn record(params: &LayoutParameters) -> crate::canvas::RecordedPage {
        let mut canvas = RecordingCanvas::new();
        let date = NaiveDate::from_ymd_opt(2024, 3, 5).unwrap();
        build_title_page(&mut canvas, params, date).unwrap();
        canvas.finish().unwrap().pages.remove(0)
    }

    #[test]
    fn test_golden_ratio_baseline() {
        let params = title_params(|_| {});
        let page = record(&params);
        let origin = page.text_origin("My Todo List").unwrap();
        assert!((origin.y - params.page_height * 0.618).abs() < 1e-3);
    }

    #[test]
    fn test_alignment() {
        let left = record(&title_params(|o| o.title_page.alignment = TitleAlignment::Left));
        let params = title_params(|o| o.title_page.alignment = TitleAlignment::Left);
        assert_eq!(left.text_origin("My Todo List").unwrap().x, params.margins.left);

        let params = title_params(|_| {});
        let centered = record(&params);
        let width = crate::metrics::text_width("My Todo List", params.title.font, params.title.size);
        let x = centered.text_origin("My Todo List").unwrap().x;
        assert!((x + width / 2.0 - params.page_width / 2.0).abs() < 1e-3);
    }

    #[test]
    fn test_date_and_description() {
        let params = title_params(|o| {
            o.title_page.add_date = true;
            o.title_page.description = "Things to do".to_string();
        });
        let page = record(&params);
        assert_eq!(page.texts(), vec!["My Todo List", "Things to do", "March 5, 2024"]);
        let description = page.text_origin("Things to do").unwrap();
        let date = page.text_origin("March 5, 2024").unwrap();
        assert!(date.y < description.y);
    }

    #[test]
    fn test_decorations() {
        let lines = |decoration| {
            record(&title_params(|o| o.title_page.decoration = decoration))
                .lines()
                .len()
        };
        assert_eq!(lines(TitleDecoration::None), 0);
        assert_eq!(lines(TitleDecoration::SimpleLine), 1);
        assert_eq!(lines(TitleDecoration::DoubleLine), 2);
        assert_eq!(lines(TitleDecoration::Frame), 4);

        let dots = record(&title_params(|o| o.title_page.decoration = TitleDecoration::Dots));
        let circles = dots
            .ops
            .iter()
            .filter(|op| matches!(op, DrawOp::Circle { .. }))
            .count();
        assert_eq!(circles, TITLE_DOT_COUNT);
    }
}

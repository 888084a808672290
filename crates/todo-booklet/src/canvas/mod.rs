//! Drawing surface used by the page builders
//!
//! The builders only talk to the [`Canvas`] trait:
//! - [`PdfCanvas`] writes a real PDF with lopdf
//! - [`RecordingCanvas`] records every call, for inspecting layouts in tests
//!
//! Pages are implicit: drawing goes to the current page until
//! [`Canvas::finish_page`] closes it. Coordinates are PDF points with the
//! origin at the bottom-left corner.

mod pdf;
mod recording;

pub use pdf::PdfCanvas;
pub use recording::{BlockRecord, DrawOp, Recording, RecordedPage, RecordingCanvas};

use crate::layout::{Point, Rect};
use crate::metrics;
use crate::types::{Color, Result, StandardFont};

/// Reference to a finished reusable drawing block.
///
/// Only the canvas that created it can place it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlockHandle {
    pub(crate) index: usize,
    pub(crate) name: String,
}

pub trait Canvas {
    /// What [`Canvas::finish`] produces
    type Output;

    fn set_stroke_color(&mut self, color: Color);
    fn set_fill_color(&mut self, color: Color);
    fn set_line_width(&mut self, width: f32);
    /// Dash pattern for strokes; an empty pattern draws solid lines
    fn set_dash(&mut self, pattern: &[f32]);

    fn draw_line(&mut self, from: Point, to: Point);
    /// Draw `text` with its baseline starting at `origin`, in the fill color
    fn draw_text(&mut self, text: &str, origin: Point, font: StandardFont, size: f32);
    fn draw_filled_circle(&mut self, center: Point, radius: f32);

    fn measure_text_width(&self, text: &str, font: StandardFont, size: f32) -> f32 {
        metrics::text_width(text, font, size)
    }

    /// Start recording a reusable block of `width` × `height` points.
    ///
    /// Drawing calls go into the block until [`Canvas::end_reusable_block`].
    fn begin_reusable_block(&mut self, name: &str, width: f32, height: f32) -> Result<()>;
    fn end_reusable_block(&mut self) -> Result<BlockHandle>;
    /// Draw a finished block onto the current page, by reference
    fn place_reusable_block(&mut self, block: &BlockHandle) -> Result<()>;

    /// Name the current page as a link target
    fn register_bookmark(&mut self, name: &str) -> Result<()>;
    /// Add a clickable region on the current page.
    ///
    /// The target may be registered later; it is resolved by [`Canvas::finish`].
    fn add_link(&mut self, rect: Rect, target: &str);

    /// Close the current page
    fn finish_page(&mut self) -> Result<()>;

    /// Resolve links and produce the document
    fn finish(self) -> Result<Self::Output>;
}

//! Dot grid tile shared by every detail page
//!
//! The dot set is enumerated once per document and stored as a reusable
//! block; detail pages only place the block.

use crate::canvas::{BlockHandle, Canvas};
use crate::layout::{DotGrid, LayoutParameters, Point};
use crate::options::GuideLines;
use crate::types::Result;
use log::info;

/// Name of the reusable block holding the dot grid
pub const TILE_BLOCK_NAME: &str = "DotGrid";

/// Slack for the inclusive far boundary, absorbs float error in the step count
const BOUNDARY_EPSILON: f32 = 1e-3;

/// Dot grid geometry for one page size
#[derive(Debug, Clone, PartialEq)]
pub struct TilePattern {
    width: f32,
    height: f32,
    grid: DotGrid,
    guides: GuideLines,
    /// Dot column positions, left to right
    columns: Vec<f32>,
    /// Dot row positions, bottom to top
    rows: Vec<f32>,
}

/// Positions `start, start + step, ...` up to and including `end`
fn steps(start: f32, end: f32, step: f32) -> Vec<f32> {
    if end < start {
        return Vec::new();
    }
    let count = ((end - start) / step + BOUNDARY_EPSILON).floor() as usize;
    (0..=count).map(|i| start + i as f32 * step).collect()
}

impl TilePattern {
    /// Enumerate dot rows and columns inside the margins
    pub fn compute(params: &LayoutParameters) -> Self {
        let margins = &params.margins;
        let spacing = params.grid.spacing;
        Self {
            width: params.page_width,
            height: params.page_height,
            grid: params.grid,
            guides: params.guides,
            columns: steps(margins.left, params.page_width - margins.right, spacing),
            rows: steps(margins.bottom, params.page_height - margins.top, spacing),
        }
    }

    pub fn dot_count(&self) -> usize {
        self.columns.len() * self.rows.len()
    }

    /// Dot centers, column by column from the left, bottom to top within a column
    pub fn dots(&self) -> impl Iterator<Item = Point> + '_ {
        self.columns
            .iter()
            .flat_map(move |&x| self.rows.iter().map(move |&y| Point::new(x, y)))
    }

    pub fn columns(&self) -> &[f32] {
        &self.columns
    }

    pub fn rows(&self) -> &[f32] {
        &self.rows
    }

    /// Draw the pattern into a new reusable block on `canvas`
    pub fn register<C: Canvas>(&self, canvas: &mut C) -> Result<BlockHandle> {
        canvas.begin_reusable_block(TILE_BLOCK_NAME, self.width, self.height)?;

        if self.guides.enabled {
            self.draw_guides(canvas);
        }

        canvas.set_fill_color(self.grid.color);
        for dot in self.dots() {
            canvas.draw_filled_circle(dot, self.grid.radius);
        }

        let handle = canvas.end_reusable_block()?;
        info!(
            "Dot grid tile built once with {} dots ({} × {})",
            self.dot_count(),
            self.columns.len(),
            self.rows.len()
        );
        Ok(handle)
    }

    /// Rules through every dot row and column, under the dots
    fn draw_guides<C: Canvas>(&self, canvas: &mut C) {
        let (Some(&left), Some(&right)) = (self.columns.first(), self.columns.last()) else {
            return;
        };
        let (Some(&bottom), Some(&top)) = (self.rows.first(), self.rows.last()) else {
            return;
        };

        canvas.set_stroke_color(self.guides.horizontal_color);
        canvas.set_line_width(self.guides.horizontal_width);
        for &y in &self.rows {
            canvas.draw_line(Point::new(left, y), Point::new(right, y));
        }

        canvas.set_stroke_color(self.guides.vertical_color);
        canvas.set_line_width(self.guides.vertical_width);
        for &x in &self.columns {
            canvas.draw_line(Point::new(x, bottom), Point::new(x, top));
        }
    }
}

//! Canvas that records calls instead of drawing

use super::{BlockHandle, Canvas};
use crate::layout::{Point, Rect};
use crate::registry::{BookmarkRegistry, ResolvedLink};
use crate::types::{BookletError, Color, Result, StandardFont};
use std::collections::BTreeMap;

/// One recorded drawing call
#[derive(Debug, Clone, PartialEq)]
pub enum DrawOp {
    StrokeColor(Color),
    FillColor(Color),
    LineWidth(f32),
    Dash(Vec<f32>),
    Line {
        from: Point,
        to: Point,
    },
    Text {
        text: String,
        origin: Point,
        font: StandardFont,
        size: f32,
    },
    Circle {
        center: Point,
        radius: f32,
    },
    PlaceBlock(usize),
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct RecordedPage {
    pub ops: Vec<DrawOp>,
    /// Bookmarks registered while this page was current
    pub bookmarks: Vec<String>,
}

impl RecordedPage {
    /// All text drawn on the page, in drawing order
    pub fn texts(&self) -> Vec<&str> {
        self.ops
            .iter()
            .filter_map(|op| match op {
                DrawOp::Text { text, .. } => Some(text.as_str()),
                _ => None,
            })
            .collect()
    }

    /// Origin of the first text equal to `text`
    pub fn text_origin(&self, text: &str) -> Option<Point> {
        self.ops.iter().find_map(|op| match op {
            DrawOp::Text { text: t, origin, .. } if t == text => Some(*origin),
            _ => None,
        })
    }

    pub fn lines(&self) -> Vec<(Point, Point)> {
        self.ops
            .iter()
            .filter_map(|op| match op {
                DrawOp::Line { from, to } => Some((*from, *to)),
                _ => None,
            })
            .collect()
    }

    /// Indices of the blocks placed on this page
    pub fn placed_blocks(&self) -> Vec<usize> {
        self.ops
            .iter()
            .filter_map(|op| match op {
                DrawOp::PlaceBlock(index) => Some(*index),
                _ => None,
            })
            .collect()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct BlockRecord {
    pub name: String,
    pub width: f32,
    pub height: f32,
    pub ops: Vec<DrawOp>,
}

impl BlockRecord {
    /// Centers of every circle in the block, in drawing order
    pub fn circle_centers(&self) -> Vec<Point> {
        self.ops
            .iter()
            .filter_map(|op| match op {
                DrawOp::Circle { center, .. } => Some(*center),
                _ => None,
            })
            .collect()
    }
}

/// Everything a [`RecordingCanvas`] saw
#[derive(Debug, Clone, Default)]
pub struct Recording {
    pub pages: Vec<RecordedPage>,
    pub blocks: Vec<BlockRecord>,
    pub bookmarks: BTreeMap<String, usize>,
    pub links: Vec<ResolvedLink>,
    /// Calls to `begin_reusable_block`
    pub blocks_begun: usize,
    /// Calls to `place_reusable_block`
    pub blocks_placed: usize,
}

impl Recording {
    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    /// 0-based page of a bookmark
    pub fn page_of(&self, bookmark: &str) -> Option<usize> {
        self.bookmarks.get(bookmark).copied()
    }

    /// Links placed on 0-based `page`
    pub fn links_on(&self, page: usize) -> Vec<&ResolvedLink> {
        self.links.iter().filter(|link| link.page == page).collect()
    }

    /// Link targets on the page carrying `bookmark`
    pub fn targets_from(&self, bookmark: &str) -> Vec<&str> {
        self.page_of(bookmark)
            .map(|page| {
                self.links_on(page)
                    .into_iter()
                    .map(|link| link.target.as_str())
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Links anywhere in the document pointing at `bookmark`
    pub fn links_to(&self, bookmark: &str) -> Vec<&ResolvedLink> {
        self.links
            .iter()
            .filter(|link| link.target == bookmark)
            .collect()
    }
}

/// A [`Canvas`] that keeps every call for later inspection
#[derive(Debug, Default)]
pub struct RecordingCanvas {
    recording: Recording,
    current: RecordedPage,
    open_block: Option<BlockRecord>,
    registry: BookmarkRegistry,
}

impl RecordingCanvas {
    pub fn new() -> Self {
        Self::default()
    }

    fn push(&mut self, op: DrawOp) {
        match self.open_block.as_mut() {
            Some(block) => block.ops.push(op),
            None => self.current.ops.push(op),
        }
    }

    fn page_index(&self) -> usize {
        self.recording.pages.len()
    }
}

impl Canvas for RecordingCanvas {
    type Output = Recording;

    fn set_stroke_color(&mut self, color: Color) {
        self.push(DrawOp::StrokeColor(color));
    }

    fn set_fill_color(&mut self, color: Color) {
        self.push(DrawOp::FillColor(color));
    }

    fn set_line_width(&mut self, width: f32) {
        self.push(DrawOp::LineWidth(width));
    }

    fn set_dash(&mut self, pattern: &[f32]) {
        self.push(DrawOp::Dash(pattern.to_vec()));
    }

    fn draw_line(&mut self, from: Point, to: Point) {
        self.push(DrawOp::Line { from, to });
    }

    fn draw_text(&mut self, text: &str, origin: Point, font: StandardFont, size: f32) {
        self.push(DrawOp::Text {
            text: text.to_string(),
            origin,
            font,
            size,
        });
    }

    fn draw_filled_circle(&mut self, center: Point, radius: f32) {
        self.push(DrawOp::Circle { center, radius });
    }

    fn begin_reusable_block(&mut self, name: &str, width: f32, height: f32) -> Result<()> {
        if self.open_block.is_some() {
            return Err(BookletError::Canvas(format!(
                "cannot begin block '{name}' while another block is open"
            )));
        }
        self.recording.blocks_begun += 1;
        self.open_block = Some(BlockRecord {
            name: name.to_string(),
            width,
            height,
            ops: Vec::new(),
        });
        Ok(())
    }

    fn end_reusable_block(&mut self) -> Result<BlockHandle> {
        let block = self
            .open_block
            .take()
            .ok_or_else(|| BookletError::Canvas("no reusable block is open".to_string()))?;
        let handle = BlockHandle {
            index: self.recording.blocks.len(),
            name: block.name.clone(),
        };
        self.recording.blocks.push(block);
        Ok(handle)
    }

    fn place_reusable_block(&mut self, block: &BlockHandle) -> Result<()> {
        if block.index >= self.recording.blocks.len() {
            return Err(BookletError::Canvas(format!(
                "block '{}' was not created by this canvas",
                block.name
            )));
        }
        self.recording.blocks_placed += 1;
        self.current.ops.push(DrawOp::PlaceBlock(block.index));
        Ok(())
    }

    fn register_bookmark(&mut self, name: &str) -> Result<()> {
        let page = self.page_index();
        self.registry.register(name, page)?;
        self.current.bookmarks.push(name.to_string());
        Ok(())
    }

    fn add_link(&mut self, rect: Rect, target: &str) {
        let page = self.page_index();
        self.registry.add_link(page, rect, target);
    }

    fn finish_page(&mut self) -> Result<()> {
        if self.open_block.is_some() {
            return Err(BookletError::Canvas(
                "cannot finish a page while a block is open".to_string(),
            ));
        }
        let page = std::mem::take(&mut self.current);
        self.recording.pages.push(page);
        Ok(())
    }

    fn finish(mut self) -> Result<Recording> {
        if self.open_block.is_some() {
            return Err(BookletError::Canvas(
                "document finished with an open block".to_string(),
            ));
        }
        if !self.current.ops.is_empty() || !self.current.bookmarks.is_empty() {
            self.finish_page()?;
        }
        let (bookmarks, links) = self.registry.resolve()?;
        self.recording.bookmarks = bookmarks;
        self.recording.links = links;
        Ok(self.recording)
    }
}

//! lopdf implementation of the canvas
//!
//! Page content is written as raw content stream operators. Page
//! dictionaries stay in memory until [`Canvas::finish`], because their link
//! annotations can only be built once every bookmark is known. All pages and
//! blocks share one resource dictionary holding the fonts and Form XObjects.

use super::{BlockHandle, Canvas};
use crate::constants::BEZIER_CIRCLE_FACTOR;
use crate::layout::{Point, Rect};
use crate::metrics::encode_win_ansi;
use crate::registry::BookmarkRegistry;
use crate::types::{BookletError, Color, Result, StandardFont};
use log::debug;
use lopdf::{Dictionary, Document, Object, ObjectId, Stream, StringFormat};
use std::collections::BTreeSet;

/// Producer entry of the document info dictionary
const PRODUCER: &str = "todo-booklet";

struct OpenBlock {
    name: String,
    width: f32,
    height: f32,
    content: Vec<u8>,
}

/// Canvas writing a PDF document
pub struct PdfCanvas {
    doc: Document,
    width: f32,
    height: f32,
    pages_tree_id: ObjectId,
    resources_id: ObjectId,
    /// Finished pages: reserved object id and dictionary without annotations
    pages: Vec<(ObjectId, Dictionary)>,
    current: Vec<u8>,
    open_block: Option<OpenBlock>,
    /// Resource name and object id of every finished block
    blocks: Vec<(String, ObjectId)>,
    fonts: BTreeSet<StandardFont>,
    registry: BookmarkRegistry,
    title: Option<String>,
}

impl PdfCanvas {
    /// Canvas whose pages are all `width` × `height` points
    pub fn new(width: f32, height: f32) -> Self {
        let mut doc = Document::with_version("1.7");
        let pages_tree_id = doc.new_object_id();
        let resources_id = doc.new_object_id();
        Self {
            doc,
            width,
            height,
            pages_tree_id,
            resources_id,
            pages: Vec::new(),
            current: Vec::new(),
            open_block: None,
            blocks: Vec::new(),
            fonts: BTreeSet::new(),
            registry: BookmarkRegistry::new(),
            title: None,
        }
    }

    /// Title written to the document info dictionary
    pub fn set_title(&mut self, title: impl Into<String>) {
        self.title = Some(title.into());
    }

    fn out(&mut self) -> &mut Vec<u8> {
        match self.open_block.as_mut() {
            Some(block) => &mut block.content,
            None => &mut self.current,
        }
    }

    fn emit(&mut self, ops: &str) {
        self.out().extend_from_slice(ops.as_bytes());
    }

    fn page_ref(&self, page: usize) -> Result<Object> {
        self.pages
            .get(page)
            .map(|(id, _)| Object::Reference(*id))
            .ok_or_else(|| BookletError::Canvas(format!("page {} does not exist", page + 1)))
    }

    fn font_dictionary(&mut self) -> Dictionary {
        let mut fonts = Dictionary::new();
        for font in self.fonts.clone() {
            let font_id = self.doc.add_object(Dictionary::from_iter(vec![
                ("Type", Object::Name(b"Font".to_vec())),
                ("Subtype", Object::Name(b"Type1".to_vec())),
                ("BaseFont", Object::Name(font.base_font().as_bytes().to_vec())),
                ("Encoding", Object::Name(b"WinAnsiEncoding".to_vec())),
            ]));
            fonts.set(font_resource(font), Object::Reference(font_id));
        }
        fonts
    }

    fn write_info(&mut self) {
        let mut info = Dictionary::new();
        if let Some(title) = &self.title {
            info.set("Title", text_string(title));
        }
        info.set("Producer", Object::string_literal(PRODUCER));
        info.set(
            "CreationDate",
            Object::string_literal(chrono::Local::now().format("D:%Y%m%d%H%M%S").to_string()),
        );
        let info_id = self.doc.add_object(info);
        self.doc.trailer.set("Info", info_id);
    }
}

impl Canvas for PdfCanvas {
    type Output = Document;

    fn set_stroke_color(&mut self, color: Color) {
        self.emit(&format!("{} {} {} RG\n", num(color.r), num(color.g), num(color.b)));
    }

    fn set_fill_color(&mut self, color: Color) {
        self.emit(&format!("{} {} {} rg\n", num(color.r), num(color.g), num(color.b)));
    }

    fn set_line_width(&mut self, width: f32) {
        self.emit(&format!("{} w\n", num(width)));
    }

    fn set_dash(&mut self, pattern: &[f32]) {
        let lengths: Vec<String> = pattern.iter().map(|&len| num(len)).collect();
        self.emit(&format!("[{}] 0 d\n", lengths.join(" ")));
    }

    fn draw_line(&mut self, from: Point, to: Point) {
        self.emit(&format!(
            "{} {} m {} {} l S\n",
            num(from.x),
            num(from.y),
            num(to.x),
            num(to.y)
        ));
    }

    fn draw_text(&mut self, text: &str, origin: Point, font: StandardFont, size: f32) {
        self.fonts.insert(font);
        let head = format!(
            "BT /{} {} Tf {} {} Td (",
            font_resource(font),
            num(size),
            num(origin.x),
            num(origin.y)
        );
        let body = escape_string(&encode_win_ansi(text));
        let out = self.out();
        out.extend_from_slice(head.as_bytes());
        out.extend_from_slice(&body);
        out.extend_from_slice(b") Tj ET\n");
    }

    fn draw_filled_circle(&mut self, center: Point, radius: f32) {
        let (cx, cy, r) = (center.x, center.y, radius);
        let k = r * BEZIER_CIRCLE_FACTOR;
        let mut ops = format!("{} {} m\n", num(cx + r), num(cy));
        let curves = [
            [(cx + r, cy + k), (cx + k, cy + r), (cx, cy + r)],
            [(cx - k, cy + r), (cx - r, cy + k), (cx - r, cy)],
            [(cx - r, cy - k), (cx - k, cy - r), (cx, cy - r)],
            [(cx + k, cy - r), (cx + r, cy - k), (cx + r, cy)],
        ];
        for [(x1, y1), (x2, y2), (x3, y3)] in curves {
            ops.push_str(&format!(
                "{} {} {} {} {} {} c\n",
                num(x1),
                num(y1),
                num(x2),
                num(y2),
                num(x3),
                num(y3)
            ));
        }
        ops.push_str("f\n");
        self.emit(&ops);
    }

    fn begin_reusable_block(&mut self, name: &str, width: f32, height: f32) -> Result<()> {
        if self.open_block.is_some() {
            return Err(BookletError::Canvas(format!(
                "cannot begin block '{name}' while another block is open"
            )));
        }
        if name.is_empty() || !name.bytes().all(|b| b.is_ascii_alphanumeric() || b == b'_') {
            return Err(BookletError::Canvas(format!(
                "block name '{name}' must be non-empty ASCII letters, digits or '_'"
            )));
        }
        if self.blocks.iter().any(|(existing, _)| existing == name) {
            return Err(BookletError::Canvas(format!("block '{name}' already exists")));
        }
        self.open_block = Some(OpenBlock {
            name: name.to_string(),
            width,
            height,
            content: Vec::new(),
        });
        Ok(())
    }

    fn end_reusable_block(&mut self) -> Result<BlockHandle> {
        let block = self
            .open_block
            .take()
            .ok_or_else(|| BookletError::Canvas("no reusable block is open".to_string()))?;

        let mut xobject_dict = Dictionary::new();
        xobject_dict.set("Type", Object::Name(b"XObject".to_vec()));
        xobject_dict.set("Subtype", Object::Name(b"Form".to_vec()));
        xobject_dict.set("FormType", Object::Integer(1));
        xobject_dict.set(
            "BBox",
            Object::Array(vec![
                Object::Integer(0),
                Object::Integer(0),
                Object::Real(block.width),
                Object::Real(block.height),
            ]),
        );
        xobject_dict.set("Resources", Object::Reference(self.resources_id));
        let xobject_id = self.doc.add_object(Stream::new(xobject_dict, block.content));

        debug!("Reusable block '{}' stored as {:?}", block.name, xobject_id);
        let handle = BlockHandle {
            index: self.blocks.len(),
            name: block.name.clone(),
        };
        self.blocks.push((block.name, xobject_id));
        Ok(handle)
    }

    fn place_reusable_block(&mut self, block: &BlockHandle) -> Result<()> {
        match self.blocks.get(block.index) {
            Some((name, _)) if *name == block.name => {
                let ops = format!("q /{name} Do Q\n");
                self.current.extend_from_slice(ops.as_bytes());
                Ok(())
            }
            _ => Err(BookletError::Canvas(format!(
                "block '{}' was not created by this canvas",
                block.name
            ))),
        }
    }

    fn register_bookmark(&mut self, name: &str) -> Result<()> {
        self.registry.register(name, self.pages.len())
    }

    fn add_link(&mut self, rect: Rect, target: &str) {
        self.registry.add_link(self.pages.len(), rect, target);
    }

    fn finish_page(&mut self) -> Result<()> {
        if self.open_block.is_some() {
            return Err(BookletError::Canvas(
                "cannot finish a page while a block is open".to_string(),
            ));
        }

        let content = std::mem::take(&mut self.current);
        let content_id = self.doc.add_object(Stream::new(Dictionary::new(), content));
        let page_id = self.doc.new_object_id();

        let mut page_dict = Dictionary::new();
        page_dict.set("Type", Object::Name(b"Page".to_vec()));
        page_dict.set("Parent", Object::Reference(self.pages_tree_id));
        page_dict.set(
            "MediaBox",
            Object::Array(vec![
                Object::Integer(0),
                Object::Integer(0),
                Object::Real(self.width),
                Object::Real(self.height),
            ]),
        );
        page_dict.set("Contents", Object::Reference(content_id));
        page_dict.set("Resources", Object::Reference(self.resources_id));

        self.pages.push((page_id, page_dict));
        Ok(())
    }

    fn finish(mut self) -> Result<Document> {
        if self.open_block.is_some() {
            return Err(BookletError::Canvas(
                "document finished with an open block".to_string(),
            ));
        }
        if !self.current.is_empty() {
            self.finish_page()?;
        }
        if self.pages.is_empty() {
            return Err(BookletError::Canvas("document has no pages".to_string()));
        }

        let pending = self.registry.pending_count();
        let registry = std::mem::take(&mut self.registry);
        let (bookmarks, links) = registry.resolve()?;
        debug!(
            "Resolved {} links ({} forward) against {} bookmarks",
            links.len(),
            pending,
            bookmarks.len()
        );

        // Shared resources
        let mut resources = Dictionary::new();
        let fonts = self.font_dictionary();
        if !fonts.is_empty() {
            resources.set("Font", Object::Dictionary(fonts));
        }
        if !self.blocks.is_empty() {
            let mut xobjects = Dictionary::new();
            for (name, id) in &self.blocks {
                xobjects.set(name.as_bytes(), Object::Reference(*id));
            }
            resources.set("XObject", Object::Dictionary(xobjects));
        }
        self.doc
            .objects
            .insert(self.resources_id, Object::Dictionary(resources));

        // Link annotations
        let mut annotations: Vec<Vec<Object>> = vec![Vec::new(); self.pages.len()];
        for link in &links {
            let destination = self.page_ref(link.target_page)?;
            let annotation = Dictionary::from_iter(vec![
                ("Type", Object::Name(b"Annot".to_vec())),
                ("Subtype", Object::Name(b"Link".to_vec())),
                (
                    "Rect",
                    Object::Array(vec![
                        Object::Real(link.rect.x),
                        Object::Real(link.rect.y),
                        Object::Real(link.rect.right()),
                        Object::Real(link.rect.top()),
                    ]),
                ),
                (
                    "Border",
                    Object::Array(vec![
                        Object::Integer(0),
                        Object::Integer(0),
                        Object::Integer(0),
                    ]),
                ),
                ("Dest", xyz_destination(destination)),
            ]);
            let annotation_id = self.doc.add_object(annotation);
            let page_annotations = annotations.get_mut(link.page).ok_or_else(|| {
                BookletError::Canvas(format!("link on missing page {}", link.page + 1))
            })?;
            page_annotations.push(Object::Reference(annotation_id));
        }

        // Pages
        let pages = std::mem::take(&mut self.pages);
        let mut kids = Vec::with_capacity(pages.len());
        for ((page_id, mut page_dict), page_annotations) in pages.iter().cloned().zip(annotations) {
            if !page_annotations.is_empty() {
                page_dict.set("Annots", Object::Array(page_annotations));
            }
            self.doc.objects.insert(page_id, Object::Dictionary(page_dict));
            kids.push(Object::Reference(page_id));
        }
        let count = kids.len() as i64;
        self.doc.objects.insert(
            self.pages_tree_id,
            Object::Dictionary(Dictionary::from_iter(vec![
                ("Type", Object::Name(b"Pages".to_vec())),
                ("Kids", Object::Array(kids)),
                ("Count", Object::Integer(count)),
            ])),
        );

        // Named destinations
        let mut dests = Dictionary::new();
        for (name, page) in &bookmarks {
            let (page_id, _) = pages.get(*page).ok_or_else(|| {
                BookletError::Canvas(format!(
                    "bookmark '{name}' is on page {}, which was never finished",
                    page + 1
                ))
            })?;
            dests.set(name.as_bytes(), xyz_destination(Object::Reference(*page_id)));
        }
        let dests_id = self.doc.add_object(dests);

        let catalog_id = self.doc.add_object(Dictionary::from_iter(vec![
            ("Type", Object::Name(b"Catalog".to_vec())),
            ("Pages", Object::Reference(self.pages_tree_id)),
            ("Dests", Object::Reference(dests_id)),
        ]));
        self.doc.trailer.set("Root", catalog_id);

        self.write_info();
        self.doc.compress();
        Ok(self.doc)
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Resource name of a font, stable across documents
fn font_resource(font: StandardFont) -> String {
    let index = StandardFont::ALL
        .iter()
        .position(|candidate| *candidate == font)
        .unwrap_or(0);
    format!("F{}", index + 1)
}

/// `[page /XYZ null null null]`: go to the page, keep position and zoom
fn xyz_destination(page: Object) -> Object {
    Object::Array(vec![
        page,
        Object::Name(b"XYZ".to_vec()),
        Object::Null,
        Object::Null,
        Object::Null,
    ])
}

/// Info dictionary text: plain literal for ASCII, UTF-16BE otherwise
fn text_string(text: &str) -> Object {
    if text.is_ascii() {
        return Object::string_literal(text);
    }
    let mut bytes = vec![0xFE, 0xFF];
    for unit in text.encode_utf16() {
        bytes.extend_from_slice(&unit.to_be_bytes());
    }
    Object::String(bytes, StringFormat::Hexadecimal)
}

/// Escape bytes for a content stream literal string
fn escape_string(bytes: &[u8]) -> Vec<u8> {
    let mut escaped = Vec::with_capacity(bytes.len());
    for &byte in bytes {
        match byte {
            b'(' | b')' | b'\\' => {
                escaped.push(b'\\');
                escaped.push(byte);
            }
            b'\n' => escaped.extend_from_slice(b"\\n"),
            b'\r' => escaped.extend_from_slice(b"\\r"),
            _ => escaped.push(byte),
        }
    }
    escaped
}

/// Compact number formatting for content streams
fn num(value: f32) -> String {
    let formatted = format!("{value:.3}");
    let trimmed = formatted.trim_end_matches('0').trim_end_matches('.');
    match trimmed {
        "-0" | "" => "0".to_string(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_num_formatting() {
        assert_eq!(num(1.0), "1");
        assert_eq!(num(0.5), "0.5");
        assert_eq!(num(12.3456), "12.346");
        assert_eq!(num(-0.0001), "0");
        assert_eq!(num(100.0), "100");
    }

    #[test]
    fn test_escape_string() {
        assert_eq!(escape_string(b"a(b)c\\"), b"a\\(b\\)c\\\\".to_vec());
        assert_eq!(escape_string(&[0x97]), vec![0x97]);
    }

    #[test]
    fn test_font_resource_names() {
        assert_eq!(font_resource(StandardFont::Helvetica), "F1");
        assert_eq!(font_resource(StandardFont::HelveticaBold), "F2");
        assert_eq!(font_resource(StandardFont::CourierBold), "F6");
    }

    #[test]
    fn test_block_name_must_be_a_pdf_name() {
        let mut canvas = PdfCanvas::new(100.0, 100.0);
        assert!(canvas.begin_reusable_block("dot grid", 100.0, 100.0).is_err());
        assert!(canvas.begin_reusable_block("DotGrid", 100.0, 100.0).is_ok());
        assert!(canvas.begin_reusable_block("Other", 100.0, 100.0).is_err());
    }

    #[test]
    fn test_bookmark_on_unfinished_page_rejected() {
        let mut canvas = PdfCanvas::new(100.0, 100.0);
        canvas.draw_line(Point::new(0.0, 0.0), Point::new(10.0, 10.0));
        canvas.finish_page().unwrap();
        canvas.register_bookmark("dangling").unwrap();

        match canvas.finish() {
            Err(BookletError::Canvas(message)) => assert!(message.contains("dangling")),
            other => panic!("expected a canvas error, got {:?}", other.map(|_| ())),
        }
    }

    #[test]
    fn test_empty_document_rejected() {
        let canvas = PdfCanvas::new(100.0, 100.0);
        assert!(matches!(canvas.finish(), Err(BookletError::Canvas(_))));
    }

    #[test]
    fn test_text_is_win_ansi_encoded() {
        let mut canvas = PdfCanvas::new(100.0, 100.0);
        canvas.draw_text("a—(b)", Point::new(1.0, 2.0), StandardFont::Helvetica, 10.0);
        let expected = b"BT /F1 10 Tf 1 2 Td (a\x97\\(b\\)) Tj ET\n";
        assert_eq!(canvas.current, expected.to_vec());
    }
}

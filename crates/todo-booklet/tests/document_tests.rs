use lopdf::{Dictionary, Document, Object, ObjectId};
use tempfile::tempdir;
use todo_booklet::*;

fn small_params() -> LayoutParameters {
    let mut options = BookletOptions::default();
    options.structure.items_per_column = 2;
    options.structure.columns = 1;
    options.structure.list_pages = 2;
    options.structure.detail_pages_per_item = 2;
    options.resolve().unwrap()
}

/// Page object ids in document order (0-based)
fn page_ids(doc: &Document) -> Vec<ObjectId> {
    doc.get_pages().into_values().collect()
}

fn annotations<'a>(doc: &'a Document, page: ObjectId) -> Vec<&'a Dictionary> {
    let Ok(annots) = doc.get_dictionary(page).unwrap().get(b"Annots") else {
        return Vec::new();
    };
    annots
        .as_array()
        .unwrap()
        .iter()
        .map(|annot| doc.get_dictionary(annot.as_reference().unwrap()).unwrap())
        .collect()
}

/// Page object each link annotation on `page` jumps to
fn link_destinations(doc: &Document, page: ObjectId) -> Vec<ObjectId> {
    annotations(doc, page)
        .into_iter()
        .map(|annot| {
            let dest = annot.get(b"Dest").unwrap().as_array().unwrap();
            assert_eq!(dest[1].as_name().unwrap(), b"XYZ");
            dest[0].as_reference().unwrap()
        })
        .collect()
}

fn catalog(doc: &Document) -> &Dictionary {
    let root = doc.trailer.get(b"Root").unwrap().as_reference().unwrap();
    doc.get_dictionary(root).unwrap()
}

#[test]
fn test_document_page_count() {
    let params = small_params();
    let doc = build_document(&params).unwrap();
    assert_eq!(doc.get_pages().len(), 11);
}

#[test]
fn test_links_point_at_page_objects() {
    let doc = build_document(&small_params()).unwrap();
    let pages = page_ids(&doc);

    // Index: P1 and P2
    assert_eq!(link_destinations(&doc, pages[0]), vec![pages[1], pages[2]]);

    // List page 1: header back to the index, then items 1 and 2
    assert_eq!(
        link_destinations(&doc, pages[1]),
        vec![pages[0], pages[3], pages[5]]
    );

    // First detail page of item 3: back, index, next
    assert_eq!(
        link_destinations(&doc, pages[7]),
        vec![pages[2], pages[0], pages[8]]
    );
    // Last one: back, index, prev
    assert_eq!(
        link_destinations(&doc, pages[8]),
        vec![pages[2], pages[0], pages[7]]
    );
}

#[test]
fn test_link_annotations_are_borderless() {
    let doc = build_document(&small_params()).unwrap();
    let pages = page_ids(&doc);
    for annot in annotations(&doc, pages[1]) {
        assert_eq!(annot.get(b"Subtype").unwrap().as_name().unwrap(), b"Link");
        let border = annot.get(b"Border").unwrap().as_array().unwrap();
        assert!(border.iter().all(|w| w.as_i64().unwrap() == 0));
    }
}

#[test]
fn test_single_grid_xobject_shared_by_detail_pages() {
    let doc = build_document(&small_params()).unwrap();
    let pages = page_ids(&doc);

    let resources_of = |page: ObjectId| {
        doc.get_dictionary(page)
            .unwrap()
            .get(b"Resources")
            .unwrap()
            .as_reference()
            .unwrap()
    };
    let shared = resources_of(pages[0]);
    assert!(pages.iter().all(|page| resources_of(*page) == shared));

    let resources = doc.get_dictionary(shared).unwrap();
    let xobjects = resources.get(b"XObject").unwrap().as_dict().unwrap();
    assert_eq!(xobjects.len(), 1);
    let grid_id = xobjects.get(b"DotGrid").unwrap().as_reference().unwrap();
    let grid = doc.get_object(grid_id).unwrap().as_stream().unwrap();
    assert_eq!(grid.dict.get(b"Subtype").unwrap().as_name().unwrap(), b"Form");

    let fonts = resources.get(b"Font").unwrap().as_dict().unwrap();
    assert!(!fonts.is_empty());
}

#[test]
fn test_detail_pages_invoke_grid() {
    let doc = build_document(&small_params()).unwrap();
    let pages = page_ids(&doc);

    for (i, page) in pages.iter().enumerate() {
        let content = doc.get_page_content(*page).unwrap();
        let text = String::from_utf8_lossy(&content);
        assert_eq!(text.contains("/DotGrid Do"), i >= 3, "page {i}");
    }
}

#[test]
fn test_named_destinations() {
    let doc = build_document(&small_params()).unwrap();
    let pages = page_ids(&doc);

    let dests_id = catalog(&doc).get(b"Dests").unwrap().as_reference().unwrap();
    let dests = doc.get_dictionary(dests_id).unwrap();

    // index + 2 list pages + 4 items × 2 detail pages
    assert_eq!(dests.len(), 11);
    let page_of = |name: &[u8]| {
        dests.get(name).unwrap().as_array().unwrap()[0]
            .as_reference()
            .unwrap()
    };
    assert_eq!(page_of(b"index"), pages[0]);
    assert_eq!(page_of(b"page_2"), pages[2]);
    assert_eq!(page_of(b"detail_3_2"), pages[8]);
}

#[test]
fn test_document_info() {
    let doc = build_document(&small_params()).unwrap();
    let info_id = doc.trailer.get(b"Info").unwrap().as_reference().unwrap();
    let info = doc.get_dictionary(info_id).unwrap();

    // Non-ASCII title: UTF-16BE with a byte order mark
    let raw = info.get(b"Title").unwrap().as_str().unwrap();
    assert_eq!(&raw[..2], &[0xFE, 0xFF]);
    let units: Vec<u16> = raw[2..]
        .chunks(2)
        .map(|pair| u16::from_be_bytes([pair[0], pair[1]]))
        .collect();
    assert_eq!(String::from_utf16(&units).unwrap(), "Todo Booklet — 11 pages");

    let producer = info.get(b"Producer").unwrap().as_str().unwrap();
    assert_eq!(producer, b"todo-booklet");
    assert!(info.has(b"CreationDate"));
}

#[test]
fn test_title_page_comes_first() {
    let mut options = BookletOptions::default();
    options.structure.items_per_column = 2;
    options.structure.columns = 1;
    options.structure.list_pages = 1;
    options.structure.detail_pages_per_item = 1;
    options.title_page.enabled = true;
    let params = options.resolve().unwrap();

    let doc = build_document(&params).unwrap();
    let pages = page_ids(&doc);
    assert_eq!(pages.len(), 1 + 1 + 1 + 2);
    assert!(link_destinations(&doc, pages[0]).is_empty());
    assert_eq!(link_destinations(&doc, pages[1]), vec![pages[2]]);
}

#[tokio::test]
async fn test_generate_booklet_writes_file() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("booklet.pdf");
    let params = small_params();

    let stats = generate_booklet(&params, &path).await.unwrap();
    assert_eq!(stats.total_pages, 11);
    assert_eq!(stats.items, 4);

    let doc = Document::load(&path).unwrap();
    assert_eq!(doc.get_pages().len(), 11);
}

#[tokio::test]
async fn test_preview_is_one_page_without_links() {
    let params = BookletOptions::default().resolve().unwrap();
    let doc = generate_preview(&params).await.unwrap();

    let pages = page_ids(&doc);
    assert_eq!(pages.len(), 1);
    assert!(annotations(&doc, pages[0]).is_empty());

    let content = doc.get_page_content(pages[0]).unwrap();
    let text = String::from_utf8_lossy(&content);
    assert!(text.contains("[2 2] 0 d"));
    assert!(text.contains("(Page 1)"));
    assert!(text.contains("Total: 2,431 pages"));
}

#[tokio::test]
async fn test_preview_saves_and_reloads() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("preview.pdf");
    let params = small_params();

    let doc = generate_preview(&params).await.unwrap();
    save_pdf(doc, &path).await.unwrap();

    let loaded = Document::load(&path).unwrap();
    assert_eq!(loaded.get_pages().len(), 1);
    let catalog = catalog(&loaded);
    assert!(matches!(catalog.get(b"Type"), Ok(Object::Name(name)) if name == b"Catalog"));
}

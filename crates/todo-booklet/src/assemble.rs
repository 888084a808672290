//! Document assembly
//!
//! Fixed page order: optional title page, index page, list pages, then the
//! detail chain of every item. Links to pages that do not exist yet are
//! resolved by the canvas when the document is finished.

use crate::builder::{
    TilePattern, build_detail_chain, build_index_page, build_list_page, build_title_page,
};
use crate::canvas::{Canvas, PdfCanvas};
use crate::layout::LayoutParameters;
use crate::stats::statistics_with_tile;
use crate::types::*;
use chrono::NaiveDate;
use log::info;
use lopdf::Document;
use std::path::Path;

/// Log list page progress every this many pages
const LIST_PROGRESS_INTERVAL: usize = 10;
/// Log detail page progress every this many items
const DETAIL_PROGRESS_INTERVAL: usize = 400;

/// Draw a whole booklet onto `canvas` and finish it.
///
/// `date` is used by the title page when it shows a date.
pub fn assemble<C: Canvas>(
    canvas: C,
    params: &LayoutParameters,
    date: NaiveDate,
) -> Result<C::Output> {
    assemble_counted(canvas, params, date).map(|(output, _)| output)
}

/// [`assemble`], also returning the number of dots in the grid tile
fn assemble_counted<C: Canvas>(
    mut canvas: C,
    params: &LayoutParameters,
    date: NaiveDate,
) -> Result<(C::Output, usize)> {
    let total_items = params.total_items();
    let list_pages = params.structure.list_pages;

    let pattern = TilePattern::compute(params);
    let dots_per_tile = pattern.dot_count();
    let tile = pattern.register(&mut canvas)?;

    if params.title.enabled {
        build_title_page(&mut canvas, params, date)?;
    }

    build_index_page(&mut canvas, params)?;

    let mut linked = 0;
    for page in 0..list_pages {
        linked += build_list_page(&mut canvas, params, page)?;
        let done = page + 1;
        if done % LIST_PROGRESS_INTERVAL == 0 || done == list_pages {
            info!("List pages: {done}/{list_pages}");
        }
    }
    check_linked_items(linked, total_items)?;

    for item in 1..=total_items {
        build_detail_chain(&mut canvas, params, &tile, item)?;
        if item % DETAIL_PROGRESS_INTERVAL == 0 || item == total_items {
            info!(
                "Detail pages: {}/{} items ({} pages)",
                item,
                total_items,
                item * params.structure.detail_pages_per_item
            );
        }
    }

    Ok((canvas.finish()?, dots_per_tile))
}

/// Every item needs exactly one link from a list page
fn check_linked_items(linked: usize, total_items: usize) -> Result<()> {
    if linked != total_items {
        return Err(BookletError::InvalidLayout(format!(
            "list pages link {linked} items but the booklet has {total_items}"
        )));
    }
    Ok(())
}

/// Build the booklet as a PDF document
pub fn build_document(params: &LayoutParameters) -> Result<Document> {
    build_document_counted(params).map(|(doc, _)| doc)
}

fn build_document_counted(params: &LayoutParameters) -> Result<(Document, usize)> {
    let page_count = params.page_count();
    info!(
        "Generating booklet: {} list pages, {} items, {} pages total",
        params.structure.list_pages,
        params.total_items(),
        page_count
    );

    let mut canvas = PdfCanvas::new(params.page_width, params.page_height);
    canvas.set_title(format!("Todo Booklet — {page_count} pages"));

    let today = chrono::Local::now().date_naive();
    let (doc, dots_per_tile) = assemble_counted(canvas, params, today)?;

    info!("Booklet finished with {} pages", doc.get_pages().len());
    Ok((doc, dots_per_tile))
}

/// Build the booklet and write it to `path`
pub async fn generate_booklet(
    params: &LayoutParameters,
    path: impl AsRef<Path>,
) -> Result<BookletStatistics> {
    let owned = params.clone();
    let (doc, dots_per_tile) =
        tokio::task::spawn_blocking(move || build_document_counted(&owned)).await??;
    save_pdf(doc, path).await?;
    Ok(statistics_with_tile(params, dots_per_tile))
}

/// Save a finished document
pub async fn save_pdf(mut doc: Document, path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref().to_owned();
    let bytes = tokio::task::spawn_blocking(move || {
        let mut writer = Vec::new();
        doc.save_to(&mut writer)?;
        Ok::<_, BookletError>(writer)
    })
    .await??;
    tokio::fs::write(&path, bytes).await?;
    info!("Saved {}", path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::canvas::RecordingCanvas;
    use crate::options::BookletOptions;
    use crate::stats::calculate_statistics;

    fn small_params() -> LayoutParameters {
        let mut options = BookletOptions::default();
        options.structure.items_per_column = 3;
        options.structure.list_pages = 2;
        options.structure.detail_pages_per_item = 1;
        options.resolve().unwrap()
    }

    #[test]
    fn test_list_pages_link_every_item() {
        let params = small_params();
        let mut canvas = RecordingCanvas::new();
        let linked: usize = (0..params.structure.list_pages)
            .map(|page| build_list_page(&mut canvas, &params, page).unwrap())
            .sum();
        assert_eq!(linked, params.total_items());
    }

    #[test]
    fn test_linked_item_mismatch_rejected() {
        assert!(check_linked_items(12, 12).is_ok());
        assert!(matches!(
            check_linked_items(11, 12),
            Err(BookletError::InvalidLayout(_))
        ));
    }

    #[test]
    fn test_assembly_reports_tile_dots() {
        let params = small_params();
        let date = NaiveDate::from_ymd_opt(2025, 1, 1).unwrap();
        let (recording, dots) = assemble_counted(RecordingCanvas::new(), &params, date).unwrap();

        assert_eq!(recording.blocks_begun, 1);
        assert_eq!(dots, calculate_statistics(&params).dots_per_tile);
    }

    #[tokio::test]
    async fn test_generated_statistics_match_calculated() {
        let dir = tempfile::tempdir().unwrap();
        let params = small_params();
        let stats = generate_booklet(&params, dir.path().join("booklet.pdf"))
            .await
            .unwrap();
        assert_eq!(stats, calculate_statistics(&params));
    }
}

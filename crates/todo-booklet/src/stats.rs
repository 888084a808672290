use crate::builder::TilePattern;
use crate::layout::LayoutParameters;
use crate::types::*;

/// Calculate page and item counts for a booklet
pub fn calculate_statistics(params: &LayoutParameters) -> BookletStatistics {
    statistics_with_tile(params, TilePattern::compute(params).dot_count())
}

/// Counts for a booklet whose tile has already been built
pub(crate) fn statistics_with_tile(
    params: &LayoutParameters,
    dots_per_tile: usize,
) -> BookletStatistics {
    let title_pages = usize::from(params.title.enabled);
    let list_pages = params.structure.list_pages;
    let items = params.total_items();
    let detail_pages = params.total_detail_pages();

    BookletStatistics {
        title_pages,
        index_pages: 1,
        list_pages,
        items,
        detail_pages,
        total_pages: title_pages + 1 + list_pages + detail_pages,
        dots_per_tile,
    }
}

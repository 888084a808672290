use tempfile::tempdir;
use todo_booklet::constants::{self, mm_to_pt};
use todo_booklet::*;

#[test]
fn test_default_statistics() {
    let params = BookletOptions::default().resolve().unwrap();
    let stats = calculate_statistics(&params);

    assert_eq!(stats.title_pages, 0);
    assert_eq!(stats.index_pages, 1);
    assert_eq!(stats.list_pages, 30);
    assert_eq!(stats.items, 1200);
    assert_eq!(stats.detail_pages, 2400);
    assert_eq!(stats.total_pages, 2431);
    assert!(stats.dots_per_tile > 0);
}

#[test]
fn test_statistics_count_title_page() {
    let mut options = BookletOptions::default();
    options.title_page.enabled = true;
    let stats = calculate_statistics(&options.resolve().unwrap());
    assert_eq!(stats.title_pages, 1);
    assert_eq!(stats.total_pages, 2432);
}

#[test]
fn test_landscape_swaps_dimensions() {
    let mut options = BookletOptions::default();
    options.orientation = Orientation::Landscape;
    let params = options.resolve().unwrap();
    assert!((params.page_width - mm_to_pt(297.0)).abs() < 1e-3);
    assert!((params.page_height - mm_to_pt(210.0)).abs() < 1e-3);
}

#[test]
fn test_margins_wider_than_page_rejected() {
    let mut options = BookletOptions::default();
    options.margins.left_mm = 120.0;
    options.margins.right_mm = 100.0;
    assert!(matches!(options.resolve(), Err(BookletError::InvalidLayout(_))));
}

#[test]
fn test_margins_taller_than_page_rejected() {
    let mut options = BookletOptions::default();
    options.margins.top_mm = 200.0;
    options.margins.bottom_mm = 100.0;
    assert!(matches!(options.resolve(), Err(BookletError::InvalidLayout(_))));
}

#[test]
fn test_degenerate_custom_page_rejected() {
    let mut options = BookletOptions::default();
    options.paper_size = PaperSize::Custom;
    options.custom_page.width_mm = 0.0;
    assert!(matches!(options.resolve(), Err(BookletError::InvalidLayout(_))));
}

#[test]
fn test_custom_page_size_in_millimeters() {
    let mut options = BookletOptions::default();
    options.paper_size = PaperSize::Custom;
    options.custom_page.width_mm = 100.0;
    options.custom_page.height_mm = 150.0;

    let params = options.resolve().unwrap();
    assert!((params.page_width - mm_to_pt(100.0)).abs() < 1e-3);
    assert!((params.page_height - mm_to_pt(150.0)).abs() < 1e-3);

    options.orientation = Orientation::Landscape;
    let params = options.resolve().unwrap();
    assert!((params.page_width - mm_to_pt(150.0)).abs() < 1e-3);
    assert!((params.page_height - mm_to_pt(100.0)).abs() < 1e-3);
}

#[test]
fn test_custom_page_size_from_pixels() {
    let mut options = BookletOptions::default();
    options.paper_size = PaperSize::Custom;
    options.custom_page.method = CustomSizeMethod::PixelsAtPpi;
    options.custom_page.pixels_width = 1404;
    options.custom_page.pixels_height = 1872;
    options.custom_page.ppi = 300;

    let (w, h) = options.page_size_mm();
    assert!((w - 1404.0 / 300.0 * 25.4).abs() < 1e-3);
    assert!((h - 1872.0 / 300.0 * 25.4).abs() < 1e-3);
}

#[test]
fn test_named_size_ignores_custom_page() {
    let mut options = BookletOptions::default();
    options.paper_size = PaperSize::A5;
    options.custom_page.width_mm = 100.0;
    assert_eq!(options.page_size_mm(), (148.0, 210.0));
}

#[test]
fn test_oversized_counts_fall_back_to_defaults() {
    let mut options = BookletOptions::default();
    options.structure.items_per_column = usize::MAX / 2;
    options.structure.list_pages = usize::MAX;
    options.structure.detail_pages_per_item = constants::MAX_DETAIL_PAGES_PER_ITEM + 1;

    let params = options.resolve().unwrap();
    assert_eq!(params.structure, BookletOptions::default().structure);
    assert_eq!(calculate_statistics(&params).total_pages, 2431);
}

#[test]
fn test_largest_counts_accepted() {
    let mut options = BookletOptions::default();
    options.structure.items_per_column = constants::MAX_ITEMS_PER_COLUMN;
    options.structure.list_pages = constants::MAX_LIST_PAGES;
    options.structure.detail_pages_per_item = constants::MAX_DETAIL_PAGES_PER_ITEM;

    let params = options.resolve().unwrap();
    assert_eq!(params.structure.items_per_column, constants::MAX_ITEMS_PER_COLUMN);
    assert_eq!(
        params.page_count(),
        1 + 1000 + 1000 * 100 * 2 * constants::MAX_DETAIL_PAGES_PER_ITEM
    );
}

#[test]
fn test_invalid_counts_fall_back_to_defaults() {
    let mut options = BookletOptions::default();
    options.structure.items_per_column = 0;
    options.structure.columns = 3;
    options.structure.list_pages = 0;
    options.structure.detail_pages_per_item = 0;
    options.dot_grid.spacing_mm = -2.0;
    options.fonts.header = f32::NAN;

    let params = options.resolve().unwrap();
    let defaults = BookletOptions::default();
    assert_eq!(params.structure, defaults.structure);
    assert!((params.grid.spacing - mm_to_pt(defaults.dot_grid.spacing_mm)).abs() < 1e-3);
    assert_eq!(params.fonts.header, defaults.fonts.header);
}

#[test]
fn test_auto_scale_follows_page_size() {
    let mut options = BookletOptions::default();
    options.paper_size = PaperSize::A5;
    options.auto_scale = AutoScale {
        margins: true,
        dot_spacing: true,
        items: true,
    };
    let small = options.resolve().unwrap();

    options.paper_size = PaperSize::A3;
    let large = options.resolve().unwrap();

    assert!(small.margins.top < large.margins.top);
    assert!(small.grid.spacing < large.grid.spacing);
    assert!(small.structure.items_per_column <= large.structure.items_per_column);
    assert!((10..=30).contains(&small.structure.items_per_column));
    assert!((10..=30).contains(&large.structure.items_per_column));
}

#[test]
fn test_single_column_booklet() {
    let mut options = BookletOptions::default();
    options.structure.columns = 1;
    options.structure.list_pages = 3;
    let params = options.resolve().unwrap();
    assert_eq!(params.items_per_page(), 20);
    assert_eq!(params.total_items(), 60);
}

#[tokio::test]
async fn test_config_file_round_trip() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("booklet.json");

    let mut options = BookletOptions::default();
    options.paper_size = PaperSize::Letter;
    options.orientation = Orientation::Landscape;
    options.structure.items_per_column = 12;
    options.numbers.placement = NumberPlacement::InsideRight;
    options.title_page.enabled = true;
    options.title_page.text = "Q3 Projects".to_string();
    options.title_page.decoration = TitleDecoration::Frame;
    options.index_spacing = IndexSpacing::Full;
    options.save(&path).await.unwrap();

    let loaded = BookletOptions::load(&path).await.unwrap();
    assert_eq!(loaded, options);
}

#[tokio::test]
async fn test_config_file_with_partial_keys() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("partial.json");
    tokio::fs::write(&path, r#"{ "items_per_col": 8, "columns": "two", "page_format": "A5" }"#)
        .await
        .unwrap();

    let loaded = BookletOptions::load(&path).await.unwrap();
    let defaults = BookletOptions::default();
    assert_eq!(loaded.structure.items_per_column, 8);
    assert_eq!(loaded.structure.columns, defaults.structure.columns);
    assert_eq!(loaded.paper_size, PaperSize::A5);
    assert_eq!(loaded.margins, defaults.margins);
}

#[tokio::test]
async fn test_malformed_config_file() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("broken.json");
    tokio::fs::write(&path, "{ not json").await.unwrap();

    let result = BookletOptions::load(&path).await;
    assert!(matches!(result, Err(BookletError::Config(_))));
}

#[tokio::test]
async fn test_missing_config_file() {
    let dir = tempdir().unwrap();
    let result = BookletOptions::load(dir.path().join("absent.json")).await;
    assert!(matches!(result, Err(BookletError::Io(_))));
}

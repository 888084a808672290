use crate::constants::{
    ICON_BOX_INSET_MM, INDEX_TOP_OFFSET, LINE_RIGHT_INSET_MM, LIST_HEADER_BAND_MM,
    MAX_DETAIL_PAGES_PER_ITEM, MAX_ITEMS_PER_COLUMN, MAX_LIST_PAGES, MM_PER_INCH, mm_to_pt,
};
use crate::layout::{DotGrid, LayoutParameters, NumberStyle, PageMargins};
use crate::types::*;
use log::warn;

/// Default output file name
pub const DEFAULT_OUTPUT_FILENAME: &str = "todo-a4-custom.pdf";

/// How a custom page size is entered
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CustomSizeMethod {
    #[default]
    Millimeters,
    /// Screen pixels at a pixel density, for e-readers
    PixelsAtPpi,
}

impl CustomSizeMethod {
    pub fn label(self) -> &'static str {
        match self {
            CustomSizeMethod::Millimeters => "Millimeters",
            CustomSizeMethod::PixelsAtPpi => "Pixels + PPI (for e-readers)",
        }
    }

    pub fn from_label(label: &str) -> Option<Self> {
        let label = label.trim().to_ascii_lowercase();
        if label.starts_with("pixels") {
            Some(CustomSizeMethod::PixelsAtPpi)
        } else if label.starts_with("millimeters") || label.starts_with("direct") {
            Some(CustomSizeMethod::Millimeters)
        } else {
            None
        }
    }
}

/// Custom page size, used when the paper size is `Custom`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CustomPage {
    pub method: CustomSizeMethod,
    pub width_mm: f32,
    pub height_mm: f32,
    pub pixels_width: u32,
    pub pixels_height: u32,
    pub ppi: u32,
}

impl Default for CustomPage {
    fn default() -> Self {
        Self {
            method: CustomSizeMethod::Millimeters,
            width_mm: 210.0,
            height_mm: 297.0,
            pixels_width: 1404,
            pixels_height: 1872,
            ppi: 300,
        }
    }
}

impl CustomPage {
    /// Portrait dimensions for the selected input method
    pub fn dimensions_mm(&self) -> (f32, f32) {
        match self.method {
            CustomSizeMethod::Millimeters => (self.width_mm, self.height_mm),
            CustomSizeMethod::PixelsAtPpi => {
                let ppi = self.ppi.max(1) as f32;
                (
                    self.pixels_width as f32 / ppi * MM_PER_INCH,
                    self.pixels_height as f32 / ppi * MM_PER_INCH,
                )
            }
        }
    }
}

/// Margins around the page content, in millimeters
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Margins {
    pub left_mm: f32,
    pub right_mm: f32,
    pub top_mm: f32,
    pub bottom_mm: f32,
}

impl Default for Margins {
    fn default() -> Self {
        Self {
            left_mm: 8.0,
            right_mm: 8.0,
            top_mm: 18.0,
            bottom_mm: 8.0,
        }
    }
}

/// Dot grid background of the detail pages
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DotGridOptions {
    pub spacing_mm: f32,
    pub radius_mm: f32,
    /// Gray level of the dots (0 = black, 1 = white)
    pub intensity: f32,
}

impl Default for DotGridOptions {
    fn default() -> Self {
        Self {
            spacing_mm: 7.0,
            radius_mm: 0.3,
            intensity: 0.7,
        }
    }
}

/// Shape of the booklet
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Structure {
    pub items_per_column: usize,
    /// 1 or 2
    pub columns: usize,
    pub list_pages: usize,
    pub detail_pages_per_item: usize,
}

impl Default for Structure {
    fn default() -> Self {
        Self {
            items_per_column: 20,
            columns: 2,
            list_pages: 30,
            detail_pages_per_item: 2,
        }
    }
}

/// Font sizes in points
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FontSizes {
    pub header: f32,
    pub icon: f32,
    pub detail: f32,
    pub item_number: f32,
}

impl Default for FontSizes {
    fn default() -> Self {
        Self {
            header: 14.0,
            icon: 13.0,
            detail: 12.0,
            item_number: 7.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Palette {
    pub line: Color,
    pub text: Color,
    pub item_number: Color,
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            line: Color::gray(0x69 as f32 / 255.0),
            text: Color::gray(0x45 as f32 / 255.0),
            item_number: Color::gray(0x80 as f32 / 255.0),
        }
    }
}

/// Item number placement, offsets in millimeters
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NumberOptions {
    pub placement: NumberPlacement,
    pub offset_left_mm: f32,
    pub offset_right_mm: f32,
    pub offset_y_mm: f32,
}

impl Default for NumberOptions {
    fn default() -> Self {
        Self {
            placement: NumberPlacement::Outside,
            offset_left_mm: 0.0,
            offset_right_mm: 0.0,
            offset_y_mm: -1.0,
        }
    }
}

/// Rules drawn through the dot grid rows and columns
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GuideLines {
    pub enabled: bool,
    pub horizontal_color: Color,
    pub vertical_color: Color,
    /// Stroke widths in points
    pub horizontal_width: f32,
    pub vertical_width: f32,
}

impl Default for GuideLines {
    fn default() -> Self {
        Self {
            enabled: false,
            horizontal_color: Color::gray(0xE0 as f32 / 255.0),
            vertical_color: Color::gray(0xE0 as f32 / 255.0),
            horizontal_width: 0.5,
            vertical_width: 0.5,
        }
    }
}

/// Optional cover page
#[derive(Debug, Clone, PartialEq)]
pub struct TitlePage {
    pub enabled: bool,
    pub text: String,
    pub font: StandardFont,
    pub size: f32,
    pub color: Color,
    pub description: String,
    pub description_font: StandardFont,
    pub description_size: f32,
    pub description_color: Color,
    pub alignment: TitleAlignment,
    pub position: TitlePosition,
    pub add_date: bool,
    pub decoration: TitleDecoration,
}

impl Default for TitlePage {
    fn default() -> Self {
        Self {
            enabled: false,
            text: "My Todo List".to_string(),
            font: StandardFont::HelveticaBold,
            size: 48.0,
            color: Color::BLACK,
            description: String::new(),
            description_font: StandardFont::Helvetica,
            description_size: 18.0,
            description_color: Color::gray(0x66 as f32 / 255.0),
            alignment: TitleAlignment::Center,
            position: TitlePosition::GoldenRatio,
            add_date: false,
            decoration: TitleDecoration::SimpleLine,
        }
    }
}

/// Settings derived from the page size instead of taken literally
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct AutoScale {
    pub margins: bool,
    pub dot_spacing: bool,
    pub items: bool,
}

/// Complete user-facing booklet configuration
#[derive(Debug, Clone, PartialEq)]
pub struct BookletOptions {
    // Page
    pub paper_size: PaperSize,
    pub orientation: Orientation,
    pub custom_page: CustomPage,
    pub auto_scale: AutoScale,

    // Layout
    pub margins: Margins,
    pub dot_grid: DotGridOptions,
    pub structure: Structure,

    // Typography and colors
    pub fonts: FontSizes,
    pub colors: Palette,
    pub numbers: NumberOptions,

    // Extras
    pub guide_lines: GuideLines,
    pub title_page: TitlePage,
    pub index_spacing: IndexSpacing,

    // Output
    pub output_filename: String,
}

impl Default for BookletOptions {
    fn default() -> Self {
        Self {
            paper_size: PaperSize::A4,
            orientation: Orientation::Portrait,
            custom_page: CustomPage::default(),
            auto_scale: AutoScale::default(),
            margins: Margins::default(),
            dot_grid: DotGridOptions::default(),
            structure: Structure::default(),
            fonts: FontSizes::default(),
            colors: Palette::default(),
            numbers: NumberOptions::default(),
            guide_lines: GuideLines::default(),
            title_page: TitlePage::default(),
            index_spacing: IndexSpacing::default(),
            output_filename: DEFAULT_OUTPUT_FILENAME.to_string(),
        }
    }
}

impl BookletOptions {
    /// Page dimensions in millimeters with orientation applied
    pub fn page_size_mm(&self) -> (f32, f32) {
        let (w, h) = self
            .paper_size
            .dimensions_mm()
            .unwrap_or_else(|| self.custom_page.dimensions_mm());
        match self.orientation {
            Orientation::Portrait => (w, h),
            Orientation::Landscape => (h, w),
        }
    }

    /// Resolve into layout parameters in points.
    ///
    /// Invalid numeric fields fall back to their defaults with a warning;
    /// a page whose margins leave no room to draw is rejected.
    pub fn resolve(&self) -> Result<LayoutParameters> {
        let (width_mm, height_mm) = self.page_size_mm();
        if !(width_mm.is_finite() && height_mm.is_finite() && width_mm > 0.0 && height_mm > 0.0) {
            return Err(BookletError::InvalidLayout(format!(
                "page size {width_mm}×{height_mm} mm is not a positive size"
            )));
        }

        let defaults = BookletOptions::default();
        let scale = (width_mm / 210.0).min(height_mm / 297.0);

        let margins = if self.auto_scale.margins {
            let horizontal = (8.0 * scale).round().max(3.0);
            Margins {
                left_mm: horizontal,
                right_mm: horizontal,
                top_mm: (18.0 * scale).round().max(5.0),
                bottom_mm: (8.0 * scale).round().max(3.0),
            }
        } else {
            Margins {
                left_mm: non_negative_or(self.margins.left_mm, defaults.margins.left_mm, "margin_left"),
                right_mm: non_negative_or(
                    self.margins.right_mm,
                    defaults.margins.right_mm,
                    "margin_right",
                ),
                top_mm: non_negative_or(self.margins.top_mm, defaults.margins.top_mm, "margin_top"),
                bottom_mm: non_negative_or(
                    self.margins.bottom_mm,
                    defaults.margins.bottom_mm,
                    "margin_bottom",
                ),
            }
        };

        let spacing_mm = if self.auto_scale.dot_spacing {
            ((7.0 * scale * 10.0).round() / 10.0).clamp(3.0, 15.0)
        } else {
            positive_or(self.dot_grid.spacing_mm, defaults.dot_grid.spacing_mm, "dot_spacing")
        };
        let radius_mm = positive_or(self.dot_grid.radius_mm, defaults.dot_grid.radius_mm, "dot_radius");
        let intensity = if (0.0..=1.0).contains(&self.dot_grid.intensity) {
            self.dot_grid.intensity
        } else {
            warn!(
                "dot_color_intensity = {} is outside 0..1, using {}",
                self.dot_grid.intensity, defaults.dot_grid.intensity
            );
            defaults.dot_grid.intensity
        };

        let mut structure = sanitize_structure(self.structure, defaults.structure);
        if self.auto_scale.items {
            let available = height_mm - margins.top_mm - margins.bottom_mm - 30.0;
            structure.items_per_column = ((available / 12.0).floor().max(0.0) as usize).clamp(10, 30);
        }

        let fonts = FontSizes {
            header: positive_or(self.fonts.header, defaults.fonts.header, "font_size_header"),
            icon: positive_or(self.fonts.icon, defaults.fonts.icon, "font_size_icon"),
            detail: positive_or(self.fonts.detail, defaults.fonts.detail, "font_size_detail"),
            item_number: positive_or(self.fonts.item_number, defaults.fonts.item_number, "num_size"),
        };

        let guides = GuideLines {
            horizontal_width: positive_or(
                self.guide_lines.horizontal_width,
                defaults.guide_lines.horizontal_width,
                "guide_h_width",
            ),
            vertical_width: positive_or(
                self.guide_lines.vertical_width,
                defaults.guide_lines.vertical_width,
                "guide_v_width",
            ),
            ..self.guide_lines
        };

        let title = TitlePage {
            size: positive_or(self.title_page.size, defaults.title_page.size, "title_size"),
            description_size: positive_or(
                self.title_page.description_size,
                defaults.title_page.description_size,
                "desc_size",
            ),
            ..self.title_page.clone()
        };

        let params = LayoutParameters {
            page_width: mm_to_pt(width_mm),
            page_height: mm_to_pt(height_mm),
            orientation: self.orientation,
            margins: PageMargins {
                left: mm_to_pt(margins.left_mm),
                right: mm_to_pt(margins.right_mm),
                top: mm_to_pt(margins.top_mm),
                bottom: mm_to_pt(margins.bottom_mm),
            },
            grid: DotGrid {
                spacing: mm_to_pt(spacing_mm),
                radius: mm_to_pt(radius_mm),
                color: Color::gray(intensity),
            },
            structure,
            fonts,
            colors: self.colors,
            numbers: NumberStyle {
                placement: self.numbers.placement,
                offset_left: mm_to_pt(finite_or(self.numbers.offset_left_mm, 0.0, "num_offset_x_left")),
                offset_right: mm_to_pt(finite_or(
                    self.numbers.offset_right_mm,
                    0.0,
                    "num_offset_x_right",
                )),
                offset_y: mm_to_pt(finite_or(self.numbers.offset_y_mm, -1.0, "num_offset_y")),
            },
            guides,
            title,
            index_spacing: self.index_spacing,
        };

        check_usable_area(&params)?;
        Ok(params)
    }
}

fn sanitize_structure(structure: Structure, defaults: Structure) -> Structure {
    let in_range = |value: usize, max: usize, default: usize, name: &str| {
        if (1..=max).contains(&value) {
            value
        } else {
            warn!("{name} = {value} must be between 1 and {max}, using {default}");
            default
        }
    };

    let columns = if matches!(structure.columns, 1 | 2) {
        structure.columns
    } else {
        warn!("columns = {} must be 1 or 2, using {}", structure.columns, defaults.columns);
        defaults.columns
    };

    Structure {
        items_per_column: in_range(
            structure.items_per_column,
            MAX_ITEMS_PER_COLUMN,
            defaults.items_per_column,
            "items_per_col",
        ),
        columns,
        list_pages: in_range(
            structure.list_pages,
            MAX_LIST_PAGES,
            defaults.list_pages,
            "pages_of_todos",
        ),
        detail_pages_per_item: in_range(
            structure.detail_pages_per_item,
            MAX_DETAIL_PAGES_PER_ITEM,
            defaults.detail_pages_per_item,
            "detail_pages_per_todo",
        ),
    }
}

fn positive_or(value: f32, default: f32, name: &str) -> f32 {
    if value.is_finite() && value > 0.0 {
        value
    } else {
        warn!("{name} = {value} must be positive, using {default}");
        default
    }
}

fn non_negative_or(value: f32, default: f32, name: &str) -> f32 {
    if value.is_finite() && value >= 0.0 {
        value
    } else {
        warn!("{name} = {value} must not be negative, using {default}");
        default
    }
}

fn finite_or(value: f32, default: f32, name: &str) -> f32 {
    if value.is_finite() {
        value
    } else {
        warn!("{name} = {value} is not a number, using {default}");
        default
    }
}

/// Reject margins that leave nothing to draw on
fn check_usable_area(params: &LayoutParameters) -> Result<()> {
    let usable_width = params.usable_width();
    if usable_width <= 0.0 {
        return Err(BookletError::InvalidLayout(format!(
            "left and right margins ({:.1} pt) leave no width on a {:.1} pt page",
            params.margins.left + params.margins.right,
            params.page_width
        )));
    }

    let list_height = params.usable_height() - mm_to_pt(LIST_HEADER_BAND_MM);
    if list_height <= 0.0 {
        return Err(BookletError::InvalidLayout(format!(
            "top and bottom margins ({:.1} pt) leave no room for todo rows on a {:.1} pt page",
            params.margins.top + params.margins.bottom,
            params.page_height
        )));
    }

    if params.usable_height() <= INDEX_TOP_OFFSET {
        return Err(BookletError::InvalidLayout(
            "top and bottom margins leave no room for index entries".to_string(),
        ));
    }

    let column_width = usable_width / params.structure.columns as f32;
    let min_column = mm_to_pt(LINE_RIGHT_INSET_MM.max(ICON_BOX_INSET_MM));
    if column_width <= min_column {
        return Err(BookletError::InvalidLayout(format!(
            "columns of {:.1} pt are too narrow for a todo line and its icon (need more than {:.1} pt)",
            column_width, min_column
        )));
    }

    Ok(())
}

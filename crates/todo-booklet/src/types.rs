use thiserror::Error;

#[derive(Error, Debug)]
pub enum BookletError {
    #[error("PDF error: {0}")]
    Pdf(#[from] lopdf::Error),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Invalid configuration: {0}")]
    Config(String),
    #[error("Invalid layout: {0}")]
    InvalidLayout(String),
    #[error("Link on page {page} targets unknown bookmark '{name}'")]
    UnresolvedBookmark { name: String, page: usize },
    #[error("Bookmark '{0}' registered twice")]
    DuplicateBookmark(String),
    #[error("Canvas error: {0}")]
    Canvas(String),
    #[error("Task join error: {0}")]
    TaskJoin(#[from] tokio::task::JoinError),
}

pub type Result<T> = std::result::Result<T, BookletError>;

/// Paper orientation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Orientation {
    /// Portrait: height > width (default for most paper sizes)
    #[default]
    Portrait,
    /// Landscape: width > height
    Landscape,
}

/// Standard paper sizes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PaperSize {
    A3,
    #[default]
    A4,
    A5,
    B4,
    B5,
    Letter,
    Legal,
    Tabloid,
    /// Size taken from [`crate::CustomPage`]
    Custom,
}

impl PaperSize {
    /// All named sizes, in the order they are offered to users.
    pub const NAMED: [PaperSize; 8] = [
        PaperSize::A3,
        PaperSize::A4,
        PaperSize::A5,
        PaperSize::B4,
        PaperSize::B5,
        PaperSize::Letter,
        PaperSize::Legal,
        PaperSize::Tabloid,
    ];

    /// Portrait dimensions of a named size; `None` for `Custom`
    pub fn dimensions_mm(self) -> Option<(f32, f32)> {
        match self {
            PaperSize::A3 => Some((297.0, 420.0)),
            PaperSize::A4 => Some((210.0, 297.0)),
            PaperSize::A5 => Some((148.0, 210.0)),
            PaperSize::B4 => Some((250.0, 353.0)),
            PaperSize::B5 => Some((176.0, 250.0)),
            PaperSize::Letter => Some((215.9, 279.4)),
            PaperSize::Legal => Some((215.9, 355.6)),
            PaperSize::Tabloid => Some((279.4, 431.8)),
            PaperSize::Custom => None,
        }
    }

    /// Display label used by the configuration exchange format
    pub fn label(self) -> &'static str {
        match self {
            PaperSize::A3 => "A3 (297×420 mm)",
            PaperSize::A4 => "A4 (210×297 mm)",
            PaperSize::A5 => "A5 (148×210 mm)",
            PaperSize::B4 => "B4 (250×353 mm)",
            PaperSize::B5 => "B5 (176×250 mm)",
            PaperSize::Letter => "Letter (216×279 mm)",
            PaperSize::Legal => "Legal (216×356 mm)",
            PaperSize::Tabloid => "Tabloid (279×432 mm)",
            PaperSize::Custom => "Custom",
        }
    }

    /// Parse a size from its label or the label's first word ("A4")
    pub fn from_label(label: &str) -> Option<PaperSize> {
        let label = label.trim();
        if label.eq_ignore_ascii_case("custom") {
            return Some(PaperSize::Custom);
        }
        let prefix = label.split_whitespace().next()?;
        PaperSize::NAMED.into_iter().find(|size| {
            size.label() == label
                || size
                    .label()
                    .split_whitespace()
                    .next()
                    .is_some_and(|name| name.eq_ignore_ascii_case(prefix))
        })
    }
}

/// RGB color with components in `0.0..=1.0`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
}

impl Color {
    pub const BLACK: Color = Color::gray(0.0);

    pub const fn rgb(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b }
    }

    pub const fn gray(level: f32) -> Self {
        Self::rgb(level, level, level)
    }

    /// Parse `#RRGGBB`, `RRGGBB` or `#RGB`
    pub fn from_hex(hex: &str) -> Option<Self> {
        let digits = hex.trim().trim_start_matches('#');
        let expanded: String = match digits.len() {
            3 => digits.chars().flat_map(|c| [c, c]).collect(),
            6 => digits.to_string(),
            _ => return None,
        };
        let channel = |i: usize| {
            u8::from_str_radix(expanded.get(i..i + 2)?, 16)
                .ok()
                .map(|v| v as f32 / 255.0)
        };
        Some(Self::rgb(channel(0)?, channel(2)?, channel(4)?))
    }

    pub fn to_hex(self) -> String {
        let byte = |c: f32| (c.clamp(0.0, 1.0) * 255.0).round() as u8;
        format!("#{:02X}{:02X}{:02X}", byte(self.r), byte(self.g), byte(self.b))
    }
}

/// The standard PDF fonts the booklet can use without embedding
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum StandardFont {
    Helvetica,
    HelveticaBold,
    TimesRoman,
    TimesBold,
    Courier,
    CourierBold,
}

impl StandardFont {
    pub const ALL: [StandardFont; 6] = [
        StandardFont::Helvetica,
        StandardFont::HelveticaBold,
        StandardFont::TimesRoman,
        StandardFont::TimesBold,
        StandardFont::Courier,
        StandardFont::CourierBold,
    ];

    /// PostScript name, as written in the `BaseFont` entry
    pub fn base_font(self) -> &'static str {
        match self {
            StandardFont::Helvetica => "Helvetica",
            StandardFont::HelveticaBold => "Helvetica-Bold",
            StandardFont::TimesRoman => "Times-Roman",
            StandardFont::TimesBold => "Times-Bold",
            StandardFont::Courier => "Courier",
            StandardFont::CourierBold => "Courier-Bold",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        StandardFont::ALL
            .into_iter()
            .find(|font| font.base_font().eq_ignore_ascii_case(name.trim()))
    }
}

/// Where the per-page item number is drawn relative to its todo line
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum NumberPlacement {
    /// Left column in the left margin, right column in the right margin
    #[default]
    Outside,
    /// Just after the start of the line
    InsideLeft,
    /// Just before the detail icon
    InsideRight,
    Hidden,
}

impl NumberPlacement {
    pub fn label(self) -> &'static str {
        match self {
            NumberPlacement::Outside => "Outside (left/right)",
            NumberPlacement::InsideLeft => "Inside (left)",
            NumberPlacement::InsideRight => "Inside (right)",
            NumberPlacement::Hidden => "Hidden",
        }
    }

    pub fn from_label(label: &str) -> Option<Self> {
        let label = label.trim().to_ascii_lowercase();
        match label.as_str() {
            "outside (left/right)" | "outside" => Some(NumberPlacement::Outside),
            "inside (left)" | "inside-left" => Some(NumberPlacement::InsideLeft),
            "inside (right)" | "inside-right" => Some(NumberPlacement::InsideRight),
            "hidden" => Some(NumberPlacement::Hidden),
            _ => None,
        }
    }
}

/// Horizontal alignment of the title page text
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TitleAlignment {
    #[default]
    Center,
    Left,
    Right,
}

impl TitleAlignment {
    pub fn label(self) -> &'static str {
        match self {
            TitleAlignment::Center => "Center",
            TitleAlignment::Left => "Left",
            TitleAlignment::Right => "Right",
        }
    }

    pub fn from_label(label: &str) -> Option<Self> {
        match label.trim().to_ascii_lowercase().as_str() {
            "center" => Some(TitleAlignment::Center),
            "left" => Some(TitleAlignment::Left),
            "right" => Some(TitleAlignment::Right),
            _ => None,
        }
    }
}

/// Vertical placement of the title baseline
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TitlePosition {
    Top,
    Center,
    #[default]
    GoldenRatio,
}

impl TitlePosition {
    /// Fraction of the page height, measured from the bottom edge
    pub fn fraction(self) -> f32 {
        match self {
            TitlePosition::Top => 1.0 - 0.2,
            TitlePosition::Center => 0.5,
            TitlePosition::GoldenRatio => 0.618,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            TitlePosition::Top => "Top",
            TitlePosition::Center => "Center",
            TitlePosition::GoldenRatio => "Golden Ratio",
        }
    }

    pub fn from_label(label: &str) -> Option<Self> {
        match label.trim().to_ascii_lowercase().as_str() {
            "top" => Some(TitlePosition::Top),
            "center" => Some(TitlePosition::Center),
            "golden ratio" | "golden-ratio" => Some(TitlePosition::GoldenRatio),
            _ => None,
        }
    }
}

/// Ornament drawn under the title block
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TitleDecoration {
    None,
    #[default]
    SimpleLine,
    DoubleLine,
    Dots,
    Frame,
}

impl TitleDecoration {
    pub fn label(self) -> &'static str {
        match self {
            TitleDecoration::None => "None",
            TitleDecoration::SimpleLine => "Simple Line",
            TitleDecoration::DoubleLine => "Double Line",
            TitleDecoration::Dots => "Dots",
            TitleDecoration::Frame => "Frame",
        }
    }

    pub fn from_label(label: &str) -> Option<Self> {
        match label.trim().to_ascii_lowercase().as_str() {
            "none" => Some(TitleDecoration::None),
            "simple line" | "simple-line" => Some(TitleDecoration::SimpleLine),
            "double line" | "double-line" => Some(TitleDecoration::DoubleLine),
            "dots" => Some(TitleDecoration::Dots),
            "frame" => Some(TitleDecoration::Frame),
            _ => None,
        }
    }
}

/// How much vertical space the index page spreads its entries over
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IndexSpacing {
    /// Half height up to `threshold` list pages, full height above
    Auto { threshold: usize },
    Half,
    Full,
}

/// List page count up to which the index uses half its height
pub const DEFAULT_INDEX_HALF_HEIGHT_THRESHOLD: usize = 30;

impl Default for IndexSpacing {
    fn default() -> Self {
        IndexSpacing::Auto {
            threshold: DEFAULT_INDEX_HALF_HEIGHT_THRESHOLD,
        }
    }
}

impl IndexSpacing {
    /// Fraction of the available column height used for `list_pages` entries
    pub fn height_fraction(self, list_pages: usize) -> f32 {
        match self {
            IndexSpacing::Auto { threshold } if list_pages <= threshold => 0.5,
            IndexSpacing::Auto { .. } => 1.0,
            IndexSpacing::Half => 0.5,
            IndexSpacing::Full => 1.0,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            IndexSpacing::Auto { .. } => "auto",
            IndexSpacing::Half => "half",
            IndexSpacing::Full => "full",
        }
    }
}

/// Page and item counts of a booklet
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BookletStatistics {
    /// 1 when a title page precedes the index
    pub title_pages: usize,
    pub index_pages: usize,
    pub list_pages: usize,
    /// Total number of todo items
    pub items: usize,
    pub detail_pages: usize,
    pub total_pages: usize,
    /// Dots in the shared tile pattern
    pub dots_per_tile: usize,
}

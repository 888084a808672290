//! Flat configuration exchange
//!
//! Options travel as one JSON object of named parameters (`items_per_col`,
//! `margin_left`, `color_line`, ...). Export then import gives back the same
//! options; on import, a missing or ill-typed field keeps its default.

use crate::options::{BookletOptions, CustomSizeMethod};
use crate::types::*;
use log::{debug, warn};
use serde_json::{Map, Value};
use std::path::Path;

/// Flat parameter mapping
pub type ConfigMap = Map<String, Value>;

fn number(value: f32) -> Value {
    Value::from(f64::from(value))
}

/// Typed lookups with per-field fallback
struct Reader<'a> {
    map: &'a ConfigMap,
}

impl Reader<'_> {
    /// Value of `key`, or `None` after logging why the default is kept
    fn get<T>(&self, key: &str, convert: impl FnOnce(&Value) -> Option<T>) -> Option<T> {
        let Some(value) = self.map.get(key) else {
            debug!("config: '{key}' missing, keeping default");
            return None;
        };
        let converted = convert(value);
        if converted.is_none() {
            warn!("config: '{key}' has unusable value {value}, keeping default");
        }
        converted
    }

    fn f32(&self, key: &str, default: f32) -> f32 {
        self.get(key, |v| v.as_f64().map(|n| n as f32))
            .unwrap_or(default)
    }

    fn usize(&self, key: &str, default: usize) -> usize {
        self.get(key, |v| {
            v.as_u64()
                .or_else(|| v.as_f64().filter(|n| *n >= 0.0 && n.fract() == 0.0).map(|n| n as u64))
                .and_then(|n| usize::try_from(n).ok())
        })
        .unwrap_or(default)
    }

    fn u32(&self, key: &str, default: u32) -> u32 {
        self.get(key, |v| v.as_u64().and_then(|n| u32::try_from(n).ok()))
            .unwrap_or(default)
    }

    fn bool(&self, key: &str, default: bool) -> bool {
        self.get(key, Value::as_bool).unwrap_or(default)
    }

    fn string(&self, key: &str, default: &str) -> String {
        self.get(key, |v| v.as_str().map(str::to_string))
            .unwrap_or_else(|| default.to_string())
    }

    fn parsed<T>(&self, key: &str, default: T, parse: impl FnOnce(&str) -> Option<T>) -> T {
        self.get(key, |v| v.as_str().and_then(parse))
            .unwrap_or(default)
    }

    fn color(&self, key: &str, default: Color) -> Color {
        self.parsed(key, default, Color::from_hex)
    }

    fn font(&self, key: &str, default: StandardFont) -> StandardFont {
        self.parsed(key, default, StandardFont::from_name)
    }
}

impl BookletOptions {
    /// Export as the flat parameter mapping
    pub fn to_config_map(&self) -> ConfigMap {
        let custom = &self.custom_page;
        let title = &self.title_page;
        let threshold = match self.index_spacing {
            IndexSpacing::Auto { threshold } => threshold,
            _ => DEFAULT_INDEX_HALF_HEIGHT_THRESHOLD,
        };

        let entries: Vec<(&str, Value)> = vec![
            // Page
            ("page_format", Value::from(self.paper_size.label())),
            ("landscape", Value::from(self.orientation == Orientation::Landscape)),
            ("custom_method", Value::from(custom.method.label())),
            ("custom_width", number(custom.width_mm)),
            ("custom_height", number(custom.height_mm)),
            ("pixels_width", Value::from(custom.pixels_width)),
            ("pixels_height", Value::from(custom.pixels_height)),
            ("ppi", Value::from(custom.ppi)),
            ("auto_margins", Value::from(self.auto_scale.margins)),
            ("auto_items", Value::from(self.auto_scale.items)),
            ("auto_dot_spacing", Value::from(self.auto_scale.dot_spacing)),
            // Structure
            ("items_per_col", Value::from(self.structure.items_per_column)),
            ("columns", Value::from(self.structure.columns)),
            ("pages_of_todos", Value::from(self.structure.list_pages)),
            ("detail_pages_per_todo", Value::from(self.structure.detail_pages_per_item)),
            // Margins and grid
            ("margin_left", number(self.margins.left_mm)),
            ("margin_right", number(self.margins.right_mm)),
            ("margin_top", number(self.margins.top_mm)),
            ("margin_bottom", number(self.margins.bottom_mm)),
            ("dot_spacing", number(self.dot_grid.spacing_mm)),
            ("dot_radius", number(self.dot_grid.radius_mm)),
            ("dot_color_intensity", number(self.dot_grid.intensity)),
            // Typography and colors
            ("font_size_header", number(self.fonts.header)),
            ("font_size_icon", number(self.fonts.icon)),
            ("font_size_detail", number(self.fonts.detail)),
            ("num_size", number(self.fonts.item_number)),
            ("color_line", Value::from(self.colors.line.to_hex())),
            ("color_text", Value::from(self.colors.text.to_hex())),
            ("num_color_hex", Value::from(self.colors.item_number.to_hex())),
            // Item numbers
            ("num_placement", Value::from(self.numbers.placement.label())),
            ("num_offset_x_left", number(self.numbers.offset_left_mm)),
            ("num_offset_x_right", number(self.numbers.offset_right_mm)),
            ("num_offset_y", number(self.numbers.offset_y_mm)),
            // Guide lines
            ("guide_lines_enabled", Value::from(self.guide_lines.enabled)),
            ("guide_h_color", Value::from(self.guide_lines.horizontal_color.to_hex())),
            ("guide_v_color", Value::from(self.guide_lines.vertical_color.to_hex())),
            ("guide_h_width", number(self.guide_lines.horizontal_width)),
            ("guide_v_width", number(self.guide_lines.vertical_width)),
            // Title page
            ("title_page_enabled", Value::from(title.enabled)),
            ("title_text", Value::from(title.text.clone())),
            ("title_font", Value::from(title.font.base_font())),
            ("title_size", number(title.size)),
            ("title_color", Value::from(title.color.to_hex())),
            ("title_description", Value::from(title.description.clone())),
            ("desc_font", Value::from(title.description_font.base_font())),
            ("desc_size", number(title.description_size)),
            ("desc_color", Value::from(title.description_color.to_hex())),
            ("title_alignment", Value::from(title.alignment.label())),
            ("title_position", Value::from(title.position.label())),
            ("title_add_date", Value::from(title.add_date)),
            ("title_decoration", Value::from(title.decoration.label())),
            // Index and output
            ("index_spacing", Value::from(self.index_spacing.label())),
            ("index_half_height_threshold", Value::from(threshold)),
            ("output_filename", Value::from(self.output_filename.clone())),
        ];

        entries
            .into_iter()
            .map(|(key, value)| (key.to_string(), value))
            .collect()
    }

    /// Import from the flat parameter mapping; unusable fields keep their defaults
    pub fn from_config_map(map: &ConfigMap) -> Self {
        let r = Reader { map };
        let d = BookletOptions::default();

        let mut options = BookletOptions::default();

        // Page
        options.orientation = if r.bool("landscape", false) {
            Orientation::Landscape
        } else {
            Orientation::Portrait
        };
        options.custom_page.method =
            r.parsed("custom_method", d.custom_page.method, CustomSizeMethod::from_label);
        options.custom_page.width_mm = r.f32("custom_width", d.custom_page.width_mm);
        options.custom_page.height_mm = r.f32("custom_height", d.custom_page.height_mm);
        options.custom_page.pixels_width = r.u32("pixels_width", d.custom_page.pixels_width);
        options.custom_page.pixels_height = r.u32("pixels_height", d.custom_page.pixels_height);
        options.custom_page.ppi = r.u32("ppi", d.custom_page.ppi);
        options.paper_size = r.parsed("page_format", d.paper_size, PaperSize::from_label);
        options.auto_scale.margins = r.bool("auto_margins", d.auto_scale.margins);
        options.auto_scale.items = r.bool("auto_items", d.auto_scale.items);
        options.auto_scale.dot_spacing = r.bool("auto_dot_spacing", d.auto_scale.dot_spacing);

        // Structure
        options.structure.items_per_column = r.usize("items_per_col", d.structure.items_per_column);
        options.structure.columns = r.usize("columns", d.structure.columns);
        options.structure.list_pages = r.usize("pages_of_todos", d.structure.list_pages);
        options.structure.detail_pages_per_item =
            r.usize("detail_pages_per_todo", d.structure.detail_pages_per_item);

        // Margins and grid
        options.margins.left_mm = r.f32("margin_left", d.margins.left_mm);
        options.margins.right_mm = r.f32("margin_right", d.margins.right_mm);
        options.margins.top_mm = r.f32("margin_top", d.margins.top_mm);
        options.margins.bottom_mm = r.f32("margin_bottom", d.margins.bottom_mm);
        options.dot_grid.spacing_mm = r.f32("dot_spacing", d.dot_grid.spacing_mm);
        options.dot_grid.radius_mm = r.f32("dot_radius", d.dot_grid.radius_mm);
        options.dot_grid.intensity = r.f32("dot_color_intensity", d.dot_grid.intensity);

        // Typography and colors
        options.fonts.header = r.f32("font_size_header", d.fonts.header);
        options.fonts.icon = r.f32("font_size_icon", d.fonts.icon);
        options.fonts.detail = r.f32("font_size_detail", d.fonts.detail);
        options.fonts.item_number = r.f32("num_size", d.fonts.item_number);
        options.colors.line = r.color("color_line", d.colors.line);
        options.colors.text = r.color("color_text", d.colors.text);
        options.colors.item_number = r.color("num_color_hex", d.colors.item_number);

        // Item numbers
        options.numbers.placement =
            r.parsed("num_placement", d.numbers.placement, NumberPlacement::from_label);
        options.numbers.offset_left_mm = r.f32("num_offset_x_left", d.numbers.offset_left_mm);
        options.numbers.offset_right_mm = r.f32("num_offset_x_right", d.numbers.offset_right_mm);
        options.numbers.offset_y_mm = r.f32("num_offset_y", d.numbers.offset_y_mm);

        // Guide lines
        let guides = &mut options.guide_lines;
        guides.enabled = r.bool("guide_lines_enabled", d.guide_lines.enabled);
        guides.horizontal_color = r.color("guide_h_color", d.guide_lines.horizontal_color);
        guides.vertical_color = r.color("guide_v_color", d.guide_lines.vertical_color);
        guides.horizontal_width = r.f32("guide_h_width", d.guide_lines.horizontal_width);
        guides.vertical_width = r.f32("guide_v_width", d.guide_lines.vertical_width);

        // Title page
        let title = &mut options.title_page;
        let dt = &d.title_page;
        title.enabled = r.bool("title_page_enabled", dt.enabled);
        title.text = r.string("title_text", &dt.text);
        title.font = r.font("title_font", dt.font);
        title.size = r.f32("title_size", dt.size);
        title.color = r.color("title_color", dt.color);
        title.description = r.string("title_description", &dt.description);
        title.description_font = r.font("desc_font", dt.description_font);
        title.description_size = r.f32("desc_size", dt.description_size);
        title.description_color = r.color("desc_color", dt.description_color);
        title.alignment = r.parsed("title_alignment", dt.alignment, TitleAlignment::from_label);
        title.position = r.parsed("title_position", dt.position, TitlePosition::from_label);
        title.add_date = r.bool("title_add_date", dt.add_date);
        title.decoration = r.parsed("title_decoration", dt.decoration, TitleDecoration::from_label);

        // Index and output
        let threshold =
            r.usize("index_half_height_threshold", DEFAULT_INDEX_HALF_HEIGHT_THRESHOLD);
        options.index_spacing = r.parsed("index_spacing", d.index_spacing, |label| {
            match label.trim().to_ascii_lowercase().as_str() {
                "auto" => Some(IndexSpacing::Auto { threshold }),
                "half" => Some(IndexSpacing::Half),
                "full" => Some(IndexSpacing::Full),
                _ => None,
            }
        });
        options.output_filename = r.string("output_filename", &d.output_filename);

        options
    }

    /// Load options from a JSON file holding the flat parameter mapping
    pub async fn load(path: impl AsRef<Path>) -> Result<Self> {
        let bytes = tokio::fs::read(path).await?;
        let map: ConfigMap = serde_json::from_slice(&bytes)
            .map_err(|e| BookletError::Config(format!("Failed to parse config: {}", e)))?;
        Ok(Self::from_config_map(&map))
    }

    /// Save options to a JSON file as the flat parameter mapping
    pub async fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let json = serde_json::to_string_pretty(&self.to_config_map())
            .map_err(|e| BookletError::Config(format!("Failed to serialize config: {}", e)))?;
        tokio::fs::write(path, json).await?;
        Ok(())
    }
}

use serde::Deserialize;
use std::fmt;
use std::path::Path;
use std::str::FromStr;

/// Application configuration loaded from config.yaml
#[derive(Debug, Deserialize, Clone, Default, PartialEq)]
#[serde(default)]
pub struct AppConfig {
    /// Column detection tuning
    pub detection: DetectionConfig,

    /// Canvas layout and annotation settings
    pub display: DisplayConfig,
}

/// Settings for the smear filter and column detector
#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct DetectionConfig {
    /// Luminance difference that counts as an edge (strictly greater than)
    pub threshold: u8,

    /// Rows a pixel can influence below itself in the smear filter
    pub max_lookback: u32,
}

impl Default for DetectionConfig {
    fn default() -> Self {
        Self {
            threshold: column_scan::DEFAULT_THRESHOLD,
            max_lookback: column_scan::DEFAULT_MAX_LOOKBACK,
        }
    }
}

/// How boundary sequences are drawn over the processed thumbnail
#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum AnnotationStyle {
    /// Consecutive entries read as (offset, width) pairs, drawn as corner
    /// marks joined by a diagonal
    #[default]
    SpanPairs,
    /// One vertical line per distinct boundary, mapped into the cell
    BoundaryLines,
    /// No boundary overlay
    None,
}

/// Settings for the canvas compositor and view state
#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct DisplayConfig {
    /// Edge length of cached thumbnails in pixels
    pub thumbnail_size: u32,

    /// Gap between cells and around the canvas edge
    pub spacing: u32,

    pub min_zoom: f32,
    pub max_zoom: f32,

    /// Zoom change per wheel notch
    pub zoom_step: f32,

    /// Pixels moved by a line-up/line-down scroll
    pub scroll_line: i32,

    pub background: Color,

    /// Draw a diagonal across every cell
    pub debug_cross: bool,
    pub cross_color: Color,

    pub annotation: AnnotationStyle,
    pub annotation_color: Color,

    /// Arm length of span corner marks, before zoom
    pub corner_mark: f32,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            thumbnail_size: column_scan::DEFAULT_THUMBNAIL_SIZE,
            spacing: 10,
            min_zoom: 0.5,
            max_zoom: 100.0,
            zoom_step: 0.1,
            scroll_line: 10,
            background: Color::WHITE,
            debug_cross: true,
            cross_color: Color::new(200, 200, 200),
            annotation: AnnotationStyle::SpanPairs,
            annotation_color: Color::new(0, 255, 0),
            corner_mark: 6.0,
        }
    }
}

impl AppConfig {
    /// Load configuration from a YAML file, falling back to defaults
    pub fn load(path: Option<&Path>) -> Self {
        let Some(path) = path else {
            tracing::debug!("No config file given, using defaults");
            return Self::default();
        };

        match std::fs::read_to_string(path) {
            Ok(content) => match Self::from_yaml(&content) {
                Ok(config) => {
                    tracing::info!(
                        path = %path.display(),
                        threshold = config.detection.threshold,
                        thumbnail_size = config.display.thumbnail_size,
                        "Loaded configuration"
                    );
                    config
                }
                Err(e) => {
                    tracing::warn!(%e, "Failed to parse config, using defaults");
                    Self::default()
                }
            },
            Err(e) => {
                tracing::warn!(%e, path = %path.display(), "Failed to read config, using defaults");
                Self::default()
            }
        }
    }

    /// Parse configuration from YAML text
    pub fn from_yaml(content: &str) -> Result<Self, serde_yaml::Error> {
        let mut config: Self = serde_yaml::from_str(content)?;
        config.display.normalize();
        Ok(config)
    }

    /// Build the processing pipeline described by the detection section
    pub fn pipeline(&self) -> column_scan::ColumnPipeline {
        column_scan::ColumnPipeline::new()
            .threshold(self.detection.threshold)
            .max_lookback(self.detection.max_lookback)
    }
}

impl DisplayConfig {
    /// Repair values that would make layout meaningless
    fn normalize(&mut self) {
        if self.thumbnail_size == 0 {
            tracing::warn!("thumbnail_size must be positive, using default");
            self.thumbnail_size = column_scan::DEFAULT_THUMBNAIL_SIZE;
        }
        let defaults = Self::default();
        self.min_zoom = zoom_bound("min_zoom", self.min_zoom, defaults.min_zoom);
        self.max_zoom = zoom_bound("max_zoom", self.max_zoom, defaults.max_zoom);
        if self.max_zoom < self.min_zoom {
            tracing::warn!(
                min_zoom = self.min_zoom,
                max_zoom = self.max_zoom,
                "max_zoom below min_zoom, swapping"
            );
            std::mem::swap(&mut self.min_zoom, &mut self.max_zoom);
        }
    }
}

/// A zoom bound must be finite and positive
fn zoom_bound(name: &str, value: f32, default: f32) -> f32 {
    if value.is_finite() && value > 0.0 {
        return value;
    }
    tracing::warn!(
        name,
        value,
        default,
        "Zoom bound must be finite and positive, using default"
    );
    default
}

/// An opaque RGB color, written as `#RRGGBB` in config files
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(try_from = "String")]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const WHITE: Self = Self::new(255, 255, 255);
    pub const BLACK: Self = Self::new(0, 0, 0);

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

impl FromStr for Color {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let hex = s.trim().trim_start_matches('#');
        if hex.len() != 6 || !hex.is_ascii() {
            return Err(format!("expected #RRGGBB, got {s:?}"));
        }
        let channel = |range: std::ops::Range<usize>| {
            u8::from_str_radix(&hex[range], 16).map_err(|e| format!("invalid color {s:?}: {e}"))
        };
        Ok(Self::new(channel(0..2)?, channel(2..4)?, channel(4..6)?))
    }
}

impl TryFrom<String> for Color {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();

        assert_eq!(config.detection.threshold, 20);
        assert_eq!(config.detection.max_lookback, 40);
        assert_eq!(config.display.thumbnail_size, 500);
        assert_eq!(config.display.spacing, 10);
        assert_eq!(config.display.min_zoom, 0.5);
        assert_eq!(config.display.max_zoom, 100.0);
        assert_eq!(config.display.annotation, AnnotationStyle::SpanPairs);
        assert_eq!(config.display.background, Color::WHITE);
    }

    #[test]
    fn test_deserialize_config() {
        let yaml = r##"
detection:
  threshold: 35
  max_lookback: 12
display:
  thumbnail_size: 256
  spacing: 4
  zoom_step: 0.25
  background: "#102030"
  annotation: boundary_lines
  annotation_color: "#FF0000"
"##;

        let config = AppConfig::from_yaml(yaml).unwrap();

        assert_eq!(config.detection.threshold, 35);
        assert_eq!(config.detection.max_lookback, 12);
        assert_eq!(config.display.thumbnail_size, 256);
        assert_eq!(config.display.spacing, 4);
        assert_eq!(config.display.zoom_step, 0.25);
        assert_eq!(config.display.background, Color::new(0x10, 0x20, 0x30));
        assert_eq!(config.display.annotation, AnnotationStyle::BoundaryLines);
        assert_eq!(config.display.annotation_color, Color::new(255, 0, 0));
        // Unspecified fields keep their defaults
        assert_eq!(config.display.min_zoom, 0.5);
        assert!(config.display.debug_cross);
    }

    #[test]
    fn test_empty_yaml_gives_defaults() {
        let config = AppConfig::from_yaml("{}").unwrap();
        assert_eq!(config, AppConfig::default());
    }

    #[test]
    fn test_invalid_color_is_rejected() {
        let yaml = "display:\n  background: \"#12345\"\n";
        assert!(AppConfig::from_yaml(yaml).is_err());
    }

    #[test]
    fn test_swapped_zoom_bounds_are_repaired() {
        let yaml = "display:\n  min_zoom: 4.0\n  max_zoom: 2.0\n";
        let config = AppConfig::from_yaml(yaml).unwrap();
        assert_eq!(config.display.min_zoom, 2.0);
        assert_eq!(config.display.max_zoom, 4.0);
    }

    #[test]
    fn test_nan_max_zoom_falls_back() {
        let yaml = "display:\n  max_zoom: .nan\n";
        let config = AppConfig::from_yaml(yaml).unwrap();
        assert_eq!(config.display.min_zoom, 0.5);
        assert_eq!(config.display.max_zoom, 100.0);
    }

    #[test]
    fn test_non_positive_zoom_bounds_fall_back() {
        let yaml = "display:\n  max_zoom: -2.0\n";
        let config = AppConfig::from_yaml(yaml).unwrap();
        assert_eq!(config.display.min_zoom, 0.5);
        assert_eq!(config.display.max_zoom, 100.0);

        let yaml = "display:\n  min_zoom: .inf\n  max_zoom: 0.0\n";
        let config = AppConfig::from_yaml(yaml).unwrap();
        assert_eq!(config.display.min_zoom, 0.5);
        assert_eq!(config.display.max_zoom, 100.0);
    }

    #[test]
    fn test_load_missing_file_falls_back() {
        let config = AppConfig::load(Some(Path::new("/nonexistent/colfind.yaml")));
        assert_eq!(config, AppConfig::default());
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.yaml");
        std::fs::write(&path, "detection:\n  threshold: 5\n").unwrap();

        let config = AppConfig::load(Some(&path));
        assert_eq!(config.detection.threshold, 5);
    }

    #[test]
    fn test_color_display_roundtrip() {
        let color: Color = "#0a0B0c".parse().unwrap();
        assert_eq!(color, Color::new(10, 11, 12));
        assert_eq!(color.to_string(), "#0A0B0C");
    }
}

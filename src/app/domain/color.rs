//! Hex color helpers for position and tag badges.

use validator::ValidationError;

/// Badge color used when a position has no color of its own.
pub const DEFAULT_BADGE_COLOR: &str = "#6b7280";

/// A validated `#rrggbb` color (3-digit input is expanded, output is lowercase).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HexColor(String);

impl HexColor {
    pub fn new(input: &str) -> Result<Self, ValidationError> {
        match parse_rgb(input) {
            Some(value) => Ok(Self(format!("#{:06x}", value))),
            None => {
                let mut error = ValidationError::new("invalid_color");
                error.message = Some("Color must be a hex value like #3366ff.".into());
                Err(error)
            }
        }
    }

    /// Empty input means "no color".
    pub fn optional(input: Option<&str>) -> Result<Option<Self>, ValidationError> {
        match input.map(str::trim) {
            None | Some("") => Ok(None),
            Some(s) => Self::new(s).map(Some),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

fn parse_rgb(hex: &str) -> Option<u32> {
    let digits = hex.trim();
    let digits = digits.strip_prefix('#').unwrap_or(digits);
    if !digits.chars().all(|c| c.is_ascii_hexdigit()) {
        return None;
    }
    let expanded: String = match digits.len() {
        3 => digits.chars().flat_map(|c| [c, c]).collect(),
        6 => digits.to_string(),
        _ => return None,
    };
    u32::from_str_radix(&expanded, 16).ok()
}

fn channels(value: u32) -> [u32; 3] {
    [(value >> 16) & 0xff, (value >> 8) & 0xff, value & 0xff]
}

/// Darken a hex color by `percent` (0–100). Unparseable input yields black.
pub fn darken_color(hex: &str, percent: f64) -> String {
    let Some(value) = parse_rgb(hex) else {
        return "#000000".to_string();
    };
    let factor = 1.0 - percent.clamp(0.0, 100.0) / 100.0;
    let [r, g, b] = channels(value).map(|c| (c as f64 * factor).round() as u32);
    format!("#{:06x}", (r << 16) | (g << 8) | b)
}

/// `"R, G, B"` for use in `rgba(...)` styles, `None` if the input is not a hex color.
pub fn hex_to_rgb(hex: &str) -> Option<String> {
    let [r, g, b] = channels(parse_rgb(hex)?);
    Some(format!("{}, {}, {}", r, g, b))
}

/// Precomputed styles for rendering a colored badge.
#[derive(Debug, Clone)]
pub struct BadgeStyle {
    pub background: String,
    pub border: String,
}

impl BadgeStyle {
    pub fn for_color(color: Option<&str>) -> Self {
        let base = color
            .filter(|c| parse_rgb(c).is_some())
            .unwrap_or(DEFAULT_BADGE_COLOR);
        let rgb = hex_to_rgb(base).unwrap_or_else(|| "107, 114, 128".to_string());
        Self {
            background: format!("rgba({}, 0.15)", rgb),
            border: darken_color(base, 20.0),
        }
    }
}

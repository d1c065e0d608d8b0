//! Cell fill colors.
//!
//! Fills are stored as the strings the user gave, so anything a browser
//! accepts is allowed: `#rgb`/`#rrggbb` hex (with optional alpha), CSS color
//! functions and named colors. Parsing here only decides whether a fill is
//! usable and, for image import, turns pixels back into lowercase hex.

use image::Rgba;
use lightningcss::traits::Parse;
use lightningcss::values::color::CssColor;
use thiserror::Error;

use crate::error::PixiconError;

/// Why a fill string was rejected.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ColorError {
    #[error("empty color string")]
    Empty,
    /// Hex digits after `#` must number 3, 4, 6 or 8
    #[error("invalid color length {0}, expected 3, 4, 6, or 8")]
    InvalidLength(usize),
    #[error("invalid hex character '{0}'")]
    InvalidHex(char),
    /// Rejected by the CSS color parser
    #[error("CSS parse error: {0}")]
    CssParse(String),
}

impl From<ColorError> for PixiconError {
    fn from(e: ColorError) -> Self {
        PixiconError::invalid_param(format!("Invalid color: {e}"), "data.props.fill")
    }
}

/// Resolve a fill string to 8-bit RGBA.
///
/// ```
/// use pixicon::color::parse_color;
///
/// assert_eq!(parse_color("#F00").unwrap(), image::Rgba([255, 0, 0, 255]));
/// assert_eq!(parse_color("rgb(0, 255, 0)").unwrap(), image::Rgba([0, 255, 0, 255]));
/// assert_eq!(parse_color("blue").unwrap(), image::Rgba([0, 0, 255, 255]));
/// ```
pub fn parse_color(s: &str) -> Result<Rgba<u8>, ColorError> {
    let s = s.trim();
    if s.is_empty() {
        return Err(ColorError::Empty);
    }

    match s.strip_prefix('#') {
        Some(hex) => parse_hex_color(hex),
        None => parse_css_color(s),
    }
}

/// Whether `s` is a color a cell can be filled with.
pub fn is_valid_color(s: &str) -> bool {
    parse_color(s).is_ok()
}

/// `#rrggbb` for an 8-bit RGB triple.
pub fn rgb_to_hex(r: u8, g: u8, b: u8) -> String {
    format!("#{r:02x}{g:02x}{b:02x}")
}

/// Canonical `#rrggbb` form of any parseable color, dropping alpha.
pub fn normalize_hex(s: &str) -> Result<String, ColorError> {
    let Rgba([r, g, b, _]) = parse_color(s)?;
    Ok(rgb_to_hex(r, g, b))
}

fn parse_hex_color(hex: &str) -> Result<Rgba<u8>, ColorError> {
    let digits = hex
        .chars()
        .map(|c| c.to_digit(16).map(|d| d as u8).ok_or(ColorError::InvalidHex(c)))
        .collect::<Result<Vec<u8>, _>>()?;

    match digits.as_slice() {
        // short forms double each digit
        [r, g, b] => Ok(Rgba([r * 17, g * 17, b * 17, 255])),
        [r, g, b, a] => Ok(Rgba([r * 17, g * 17, b * 17, a * 17])),
        [r1, r2, g1, g2, b1, b2] => Ok(Rgba([r1 * 16 + r2, g1 * 16 + g2, b1 * 16 + b2, 255])),
        [r1, r2, g1, g2, b1, b2, a1, a2] => Ok(Rgba([r1 * 16 + r2, g1 * 16 + g2, b1 * 16 + b2, a1 * 16 + a2])),
        _ => Err(ColorError::InvalidLength(digits.len())),
    }
}

/// Parse a CSS color using lightningcss (rgb, hsl, hwb, oklch, named colors)
fn parse_css_color(s: &str) -> Result<Rgba<u8>, ColorError> {
    let css_color = CssColor::parse_string(s).map_err(|e| ColorError::CssParse(e.to_string()))?;
    css_color_to_rgba(css_color)
}

fn css_color_to_rgba(color: CssColor) -> Result<Rgba<u8>, ColorError> {
    use lightningcss::values::color::FloatColor;

    let rgb_color = color
        .to_rgb()
        .map_err(|_| ColorError::CssParse("cannot convert color to RGB".to_string()))?;

    match rgb_color {
        CssColor::RGBA(rgba) => Ok(Rgba([rgba.red, rgba.green, rgba.blue, rgba.alpha])),
        CssColor::Float(float_color) => match float_color.as_ref() {
            FloatColor::RGB(rgb) => {
                let channel = |v: f32| (v * 255.0).round().clamp(0.0, 255.0) as u8;
                Ok(Rgba([channel(rgb.r), channel(rgb.g), channel(rgb.b), channel(rgb.alpha)]))
            }
            _ => Err(ColorError::CssParse("unexpected float color format".to_string())),
        },
        _ => Err(ColorError::CssParse("color conversion did not produce RGB".to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_hex_forms() {
        assert_eq!(parse_color("#6366f1").unwrap(), Rgba([0x63, 0x66, 0xf1, 255]));
        assert_eq!(parse_color("#fff").unwrap(), Rgba([255, 255, 255, 255]));
        assert_eq!(parse_color("#ff000080").unwrap(), Rgba([255, 0, 0, 128]));
        assert_eq!(parse_color("#F00F").unwrap(), Rgba([255, 0, 0, 255]));
    }

    #[test]
    fn test_parse_hex_errors() {
        assert_eq!(parse_color(""), Err(ColorError::Empty));
        assert_eq!(parse_color("#12345"), Err(ColorError::InvalidLength(5)));
        assert_eq!(parse_color("#gg0000"), Err(ColorError::InvalidHex('g')));
    }

    #[test]
    fn test_parse_css_functions() {
        assert_eq!(parse_color("hsl(0, 100%, 50%)").unwrap(), Rgba([255, 0, 0, 255]));
        assert_eq!(parse_color("transparent").unwrap()[3], 0);
        assert!(parse_color("not-a-color").is_err());
    }

    #[test]
    fn test_rgb_to_hex() {
        assert_eq!(rgb_to_hex(99, 102, 241), "#6366f1");
        assert_eq!(rgb_to_hex(0, 0, 0), "#000000");
        assert_eq!(normalize_hex("red").unwrap(), "#ff0000");
        assert_eq!(normalize_hex("#ABC").unwrap(), "#aabbcc");
    }

    #[test]
    fn test_color_error_converts() {
        let err: PixiconError = ColorError::Empty.into();
        assert_eq!(err.kind(), "INVALID_PARAM");
    }
}

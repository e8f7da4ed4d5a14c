use std::fmt;
use std::str::FromStr;

use crate::foundation::error::{CardError, CardResult};

/// Font family every surface starts with.
pub const DEFAULT_FAMILY: &str = "sans-serif";

/// Font descriptor in the spirit of the CSS `font` shorthand: a pixel size and a family list.
#[derive(Clone, Debug, PartialEq)]
pub struct Font {
    /// Size in pixels.
    pub size_px: f32,
    /// Comma separated family list, for example `"SegoeUI, sans-serif"`.
    pub family: String,
}

impl Font {
    /// Build a font, rejecting non-positive sizes.
    pub fn new(size_px: f32, family: impl Into<String>) -> CardResult<Self> {
        if !size_px.is_finite() || size_px <= 0.0 {
            return Err(CardError::validation(
                "font size_px must be finite and > 0",
            ));
        }
        Ok(Self {
            size_px,
            family: family.into(),
        })
    }

    /// Same family at a different size.
    pub fn with_size(&self, size_px: f32) -> CardResult<Self> {
        Self::new(size_px, self.family.clone())
    }

    /// Individual family names with surrounding quotes and whitespace removed.
    pub fn families(&self) -> impl Iterator<Item = &str> {
        self.family
            .split(',')
            .map(|f| f.trim().trim_matches(|c| c == '"' || c == '\''))
            .filter(|f| !f.is_empty())
    }
}

impl Default for Font {
    fn default() -> Self {
        Self {
            size_px: 10.0,
            family: DEFAULT_FAMILY.to_owned(),
        }
    }
}

impl fmt::Display for Font {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}px {}", self.size_px, self.family)
    }
}

/// Parses `"<size>px <family>"`, e.g. `"30px sans-serif"`.
impl FromStr for Font {
    type Err = CardError;

    fn from_str(s: &str) -> CardResult<Self> {
        let s = s.trim();
        let (size, family) = s
            .split_once(char::is_whitespace)
            .ok_or_else(|| CardError::validation(format!("font \"{s}\" is missing a family")))?;
        let size = size
            .strip_suffix("px")
            .ok_or_else(|| CardError::validation(format!("font size \"{size}\" must end in px")))?;
        let size_px: f32 = size
            .parse()
            .map_err(|_| CardError::validation(format!("invalid font size \"{size}\"")))?;
        Self::new(size_px, family.trim())
    }
}

/// Horizontal anchoring of text relative to its x coordinate.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TextAlign {
    /// Text starts at x.
    #[default]
    Left,
    /// Text is centered on x.
    Center,
    /// Text ends at x.
    Right,
    /// Same as [`TextAlign::Left`] for left-to-right text.
    Start,
    /// Same as [`TextAlign::Right`] for left-to-right text.
    End,
}

impl TextAlign {
    /// Left edge of a run `width` pixels wide anchored at `x`.
    pub fn origin_x(self, x: f64, width: f64) -> f64 {
        match self {
            Self::Left | Self::Start => x,
            Self::Center => x - width / 2.0,
            Self::Right | Self::End => x - width,
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/text/font.rs"]
mod tests;

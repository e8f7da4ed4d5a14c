use crate::assets::loader::ImageRef;
use crate::foundation::core::Rgba8;
use crate::foundation::error::{CardError, CardResult};

/// Resolved theme: accent color, background image, and optional font family.
#[derive(Clone, Debug)]
pub struct Theme {
    /// Registry name, or the locator for custom themes.
    pub name: String,
    /// Accent color used for both fill and stroke.
    pub color: Rgba8,
    /// Background image.
    pub background: ImageRef,
    /// Preferred font family.
    pub font: Option<String>,
}

impl Theme {
    /// Theme whose background is an arbitrary locator, with a white accent.
    pub fn custom(locator: impl Into<String>) -> Self {
        let locator = locator.into();
        Self {
            name: locator.clone(),
            color: Rgba8::WHITE,
            background: ImageRef::Locator(locator),
            font: None,
        }
    }
}

/// A fixed registry entry.
#[derive(Clone, Copy, Debug)]
pub struct BuiltinTheme {
    /// Identifier callers select the theme by.
    pub name: &'static str,
    /// Accent color.
    pub color: Rgba8,
    /// Embedded background PNG.
    pub image: &'static [u8],
    /// Preferred font family.
    pub font: Option<&'static str>,
}

impl BuiltinTheme {
    /// Materialize the entry as a [`Theme`].
    pub fn to_theme(&self) -> Theme {
        Theme {
            name: self.name.to_owned(),
            color: self.color,
            background: ImageRef::Embedded(self.image),
            font: self.font.map(str::to_owned),
        }
    }
}

macro_rules! builtin {
    ($name:literal, $color:expr, $font:expr) => {
        BuiltinTheme {
            name: $name,
            color: $color,
            image: include_bytes!(concat!("../../assets/themes/", $name, ".png")),
            font: $font,
        }
    };
}

/// Themes of the legacy surface API, matched case-insensitively.
pub const LEGACY_THEMES: [BuiltinTheme; 6] = [
    builtin!("dark", Rgba8::rgb(0xff, 0xff, 0xff), None),
    builtin!("sakura", Rgba8::rgb(0x7d, 0x0b, 0x2b), None),
    builtin!("blue", Rgba8::rgb(0x04, 0x0f, 0x57), None),
    builtin!("bamboo", Rgba8::rgb(0x13, 0x7a, 0x0d), None),
    builtin!("desert", Rgba8::rgb(0x00, 0x00, 0x00), None),
    builtin!("code", Rgba8::rgb(0xff, 0xff, 0xff), None),
];

/// Themes of the extended composer, matched case-sensitively.
pub const EXTENDED_THEMES: [BuiltinTheme; 8] = [
    builtin!("dark", Rgba8::rgb(0xff, 0xff, 0xff), None),
    builtin!("sakura", Rgba8::rgb(0x7d, 0x0b, 0x2b), None),
    builtin!("blue", Rgba8::rgb(0x04, 0x0f, 0x57), None),
    builtin!("bamboo", Rgba8::rgb(0x13, 0x7a, 0x0d), None),
    builtin!("desert", Rgba8::rgb(0x00, 0x00, 0x00), None),
    builtin!("code", Rgba8::rgb(0xff, 0xff, 0xff), Some("DejaVu Sans Mono")),
    builtin!("midnight", Rgba8::rgb(0xc9, 0xd6, 0xff), None),
    builtin!("mint", Rgba8::rgb(0x0b, 0x4f, 0x3c), None),
];

/// Theme the legacy composer uses when none is given.
pub const DEFAULT_LEGACY_THEME: &str = "sakura";
/// Theme the extended composer uses when none is given.
pub const DEFAULT_EXTENDED_THEME: &str = "code";

/// Look up a legacy theme, ignoring case.
pub fn resolve_theme(id: &str) -> CardResult<Theme> {
    LEGACY_THEMES
        .iter()
        .find(|t| t.name.eq_ignore_ascii_case(id))
        .map(BuiltinTheme::to_theme)
        .ok_or_else(|| CardError::invalid_theme(id, LEGACY_THEMES.iter().map(|t| t.name)))
}

/// Look up an extended theme by its exact name.
pub fn resolve_extended_theme(id: &str) -> CardResult<Theme> {
    EXTENDED_THEMES
        .iter()
        .find(|t| t.name == id)
        .map(BuiltinTheme::to_theme)
        .ok_or_else(|| CardError::invalid_theme(id, EXTENDED_THEMES.iter().map(|t| t.name)))
}

/// Theme selection of the legacy composer.
///
/// Built-in names go through [`resolve_theme`]. A miss that looks like an image locator becomes a
/// [`Theme::custom`]; its image is only fetched later, so a bad locator fails as
/// [`CardError::ImageLoad`]. Any other miss is [`CardError::InvalidTheme`].
pub fn select_legacy_theme(id: &str) -> CardResult<Theme> {
    match resolve_theme(id) {
        Ok(theme) => Ok(theme),
        Err(_) if looks_like_locator(id) => Ok(Theme::custom(id)),
        Err(e) => Err(e),
    }
}

pub(crate) fn looks_like_locator(id: &str) -> bool {
    id.contains('/') || id.contains('\\') || id.contains('.') || id.contains("://")
}

#[cfg(test)]
#[path = "../../tests/unit/theme/registry.rs"]
mod tests;

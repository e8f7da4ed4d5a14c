use std::fmt;
use std::sync::Arc;

use crate::assets::loader::ImageRef;
use crate::foundation::core::{CardSize, Point, Rgba8};
use crate::foundation::error::{CardError, CardResult};
use crate::render::raster::ImageFormat;
use crate::render::surface::Surface;
use crate::text::font::{Font, TextAlign};
use crate::theme::registry::{DEFAULT_EXTENDED_THEME, Theme, resolve_extended_theme};

/// Text object that draws itself instead of being placed in a fixed slot.
pub trait DrawText: Send + Sync {
    /// Draw onto `surface`.
    fn draw(&self, surface: &mut Surface) -> CardResult<()>;
}

/// Positioned text with its own optional styling.
///
/// Unset style fields inherit the surface's current state. The surface state is restored after
/// drawing.
#[derive(Clone, Debug, PartialEq, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StyledText {
    /// Text to draw.
    pub text: String,
    /// Anchor x.
    pub x: f64,
    /// Baseline y.
    pub y: f64,
    /// Size in pixels.
    #[serde(default)]
    pub size: Option<f32>,
    /// Family list.
    #[serde(default)]
    pub font: Option<String>,
    /// Fill color.
    #[serde(default)]
    pub color: Option<Rgba8>,
    /// Alignment relative to `x`.
    #[serde(default)]
    pub align: Option<TextAlign>,
}

impl DrawText for StyledText {
    fn draw(&self, surface: &mut Surface) -> CardResult<()> {
        let saved = (
            surface.font().clone(),
            surface.fill_color(),
            surface.text_align(),
        );

        let current = surface.font();
        let font = Font::new(
            self.size.unwrap_or(current.size_px),
            self.font.clone().unwrap_or_else(|| current.family.clone()),
        )?;
        surface.set_font(font);
        if let Some(color) = self.color {
            surface.set_fill_color(color);
        }
        if let Some(align) = self.align {
            surface.set_text_align(align);
        }
        let drawn = surface.fill_text(&self.text, self.x, self.y);

        surface.set_font(saved.0);
        surface.set_fill_color(saved.1);
        surface.set_text_align(saved.2);
        drawn
    }
}

/// Content of a title, text or subtitle slot.
#[derive(Clone)]
pub enum TextContent {
    /// Literal string drawn at the slot's position and size. Empty strings are skipped.
    Plain(String),
    /// Object drawn through its own [`DrawText::draw`].
    Custom(Arc<dyn DrawText>),
}

impl TextContent {
    /// Wrap a drawable text object.
    pub fn custom(text: impl DrawText + 'static) -> Self {
        Self::Custom(Arc::new(text))
    }
}

impl fmt::Debug for TextContent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Plain(s) => f.debug_tuple("Plain").field(s).finish(),
            Self::Custom(_) => f.write_str("Custom(..)"),
        }
    }
}

impl From<&str> for TextContent {
    fn from(s: &str) -> Self {
        Self::Plain(s.to_owned())
    }
}

impl From<String> for TextContent {
    fn from(s: String) -> Self {
        Self::Plain(s)
    }
}

impl<'de> serde::Deserialize<'de> for TextContent {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        #[derive(serde::Deserialize)]
        #[serde(untagged)]
        enum Repr {
            Plain(String),
            Styled(StyledText),
        }

        Ok(match Repr::deserialize(deserializer)? {
            Repr::Plain(s) => Self::Plain(s),
            Repr::Styled(t) => Self::custom(t),
        })
    }
}

/// Caller-defined theme object.
#[derive(Clone, Debug, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ThemeSpec {
    /// Accent color.
    pub color: Rgba8,
    /// Background image.
    pub image: ImageRef,
    /// Preferred font family.
    #[serde(default)]
    pub font: Option<String>,
}

/// Theme as given in options: a registry name or a full theme object.
#[derive(Clone, Debug, serde::Deserialize)]
#[serde(untagged)]
pub enum ThemeChoice {
    /// Name from the extended registry, matched case-sensitively.
    Named(String),
    /// Theme object used as-is.
    Custom(ThemeSpec),
}

impl ThemeChoice {
    /// Resolve against the extended registry.
    pub fn resolve(&self) -> CardResult<Theme> {
        match self {
            Self::Named(name) => resolve_extended_theme(name),
            Self::Custom(spec) => Ok(Theme {
                name: "custom".to_owned(),
                color: spec.color,
                background: spec.image.clone(),
                font: spec.font.clone(),
            }),
        }
    }
}

impl From<&str> for ThemeChoice {
    fn from(name: &str) -> Self {
        Self::Named(name.to_owned())
    }
}

/// Horizontal placement of the avatar.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AvatarAlign {
    /// Flush with the left edge.
    #[default]
    Left,
    /// Centered horizontally.
    Center,
    /// Flush with the right edge.
    Right,
}

/// `card` options.
#[derive(Clone, Debug, Default, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CardOptions {
    /// Stroke an accent border around the card.
    pub border: Option<bool>,
    /// Round the card's corners.
    pub rounded: Option<bool>,
    /// Blur the background image.
    pub blur: Option<bool>,
}

/// `avatar` options.
#[derive(Clone, Debug, Default, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AvatarOptions {
    /// Avatar image; no avatar is drawn without one.
    pub image: Option<ImageRef>,
    /// Radius as a fraction of half the card height.
    pub image_radius: Option<f64>,
    /// Horizontal placement.
    pub align: Option<AvatarAlign>,
    /// Width of the accent ring around the avatar.
    pub outline_width: Option<f64>,
    /// Corner radius as a fraction of the avatar radius; unset or zero means a circle.
    pub border_radius: Option<f64>,
}

/// `text` options.
#[derive(Clone, Debug, Default, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TextOptions {
    /// First line, 30px.
    pub title: Option<TextContent>,
    /// Second line, sized by length.
    pub text: Option<TextContent>,
    /// Third line, 25px.
    pub subtitle: Option<TextContent>,
    /// Text color; defaults to the theme accent.
    pub color: Option<Rgba8>,
    /// Font family; defaults to the theme font.
    pub font: Option<String>,
    /// Alignment of the text slots.
    pub align: Option<TextAlign>,
}

/// `generation` options.
#[derive(Clone, Debug, Default, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationOptions {
    /// Output format.
    pub format: Option<ImageFormat>,
}

/// Options of the extended composer, as supplied by callers. Every field is optional.
#[derive(Clone, Debug, Default, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RenderOptions {
    /// Theme name or object; `code` when absent.
    pub theme: Option<ThemeChoice>,
    /// Card decoration.
    pub card: Option<CardOptions>,
    /// Avatar image and shape.
    pub avatar: Option<AvatarOptions>,
    /// Text slots and styling.
    pub text: Option<TextOptions>,
    /// Output settings.
    pub generation: Option<GenerationOptions>,
}

/// Card decoration with defaults applied.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CardStyle {
    /// Default `true`.
    pub border: bool,
    /// Default `true`.
    pub rounded: bool,
    /// Default `true`.
    pub blur: bool,
}

/// Avatar settings with defaults applied.
#[derive(Clone, Debug)]
pub struct AvatarStyle {
    /// Avatar image, if any.
    pub image: Option<ImageRef>,
    /// Default `0.8`.
    pub image_radius: f64,
    /// Default [`AvatarAlign::Left`].
    pub align: AvatarAlign,
    /// Default `0`.
    pub outline_width: f64,
    /// No default; unset means a circle.
    pub border_radius: Option<f64>,
}

impl AvatarStyle {
    /// Radius in pixels: half the surface height times `image_radius`.
    pub fn radius(&self, size: CardSize) -> f64 {
        size.h() / 2.0 * self.image_radius
    }

    /// Top-left corner of the avatar's bounding square.
    pub fn origin(&self, size: CardSize) -> Point {
        let radius = self.radius(size);
        let x = match self.align {
            AvatarAlign::Left => 0.0,
            AvatarAlign::Center => (size.w() - radius * 2.0) / 2.0,
            AvatarAlign::Right => size.w() - radius * 2.0,
        };
        Point::new(x, size.h() / 2.0 - radius)
    }
}

/// Text settings with defaults applied.
#[derive(Clone, Debug)]
pub struct TextStyle {
    /// Title slot.
    pub title: Option<TextContent>,
    /// Text slot.
    pub text: Option<TextContent>,
    /// Subtitle slot.
    pub subtitle: Option<TextContent>,
    /// Explicit text color.
    pub color: Option<Rgba8>,
    /// Explicit font family.
    pub font: Option<String>,
    /// Default [`TextAlign::Left`].
    pub align: TextAlign,
}

/// Fully populated options; drawing code never sees an absent defaulted field.
#[derive(Clone, Debug)]
pub struct NormalizedOptions {
    /// Resolved theme.
    pub theme: Theme,
    /// Card decoration.
    pub card: CardStyle,
    /// Avatar settings.
    pub avatar: AvatarStyle,
    /// Text settings.
    pub text: TextStyle,
    /// Default [`ImageFormat::Png`].
    pub format: ImageFormat,
}

impl NormalizedOptions {
    /// Color used for text: the explicit text color, else the theme accent.
    pub fn text_color(&self) -> Rgba8 {
        self.text.color.unwrap_or(self.theme.color)
    }

    /// Font family list for the text slots.
    pub fn font_family(&self) -> String {
        let primary = self
            .text
            .font
            .as_deref()
            .or(self.theme.font.as_deref())
            .unwrap_or("SegoeUI");
        format!("{primary}, SegoeUI, SegoeUIEmoji")
    }
}

/// Default avatar radius fraction.
pub const DEFAULT_IMAGE_RADIUS: f64 = 0.8;

impl RenderOptions {
    /// Fill every absent field with its default and resolve the theme.
    ///
    /// Present values are kept as given, including `false` and `0`.
    pub fn normalize(self) -> CardResult<NormalizedOptions> {
        let theme = self
            .theme
            .unwrap_or_else(|| ThemeChoice::from(DEFAULT_EXTENDED_THEME))
            .resolve()?;

        let card = self.card.unwrap_or_default();
        let avatar = self.avatar.unwrap_or_default();
        let text = self.text.unwrap_or_default();
        let generation = self.generation.unwrap_or_default();

        let image_radius = avatar.image_radius.unwrap_or(DEFAULT_IMAGE_RADIUS);
        if !image_radius.is_finite() || image_radius < 0.0 {
            return Err(CardError::validation(
                "avatar.imageRadius must be finite and >= 0",
            ));
        }
        let outline_width = avatar.outline_width.unwrap_or(0.0);
        if !outline_width.is_finite() || outline_width < 0.0 {
            return Err(CardError::validation(
                "avatar.outlineWidth must be finite and >= 0",
            ));
        }
        if avatar.border_radius.is_some_and(|r| !r.is_finite() || r < 0.0) {
            return Err(CardError::validation(
                "avatar.borderRadius must be finite and >= 0",
            ));
        }

        Ok(NormalizedOptions {
            theme,
            card: CardStyle {
                border: card.border.unwrap_or(true),
                rounded: card.rounded.unwrap_or(true),
                blur: card.blur.unwrap_or(true),
            },
            avatar: AvatarStyle {
                image: avatar.image,
                image_radius,
                align: avatar.align.unwrap_or_default(),
                outline_width,
                border_radius: avatar.border_radius,
            },
            text: TextStyle {
                title: text.title,
                text: text.text,
                subtitle: text.subtitle,
                color: text.color,
                font: text.font,
                align: text.align.unwrap_or_default(),
            },
            format: generation.format.unwrap_or_default(),
        })
    }
}

#[cfg(test)]
#[path = "../../tests/unit/compose/options.rs"]
mod tests;

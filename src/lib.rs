//! Themed welcome/goodbye cards for chat bots, rasterized on the CPU.
//!
//! Two entry points live on [`Composer`]:
//!
//! - [`Composer::compose`] resolves a legacy theme, draws its background and runs an ordered list
//!   of [`Module`]s against a 700x250 [`Surface`]. [`Composer::welcome_image`] and
//!   [`Composer::goodbye_image`] wrap the common module lists into PNG attachments.
//! - [`Composer::hydrate`] renders from [`RenderOptions`]: a static themed layer, up to three text
//!   slots, and an aligned, clipped avatar, encoded to the requested [`ImageFormat`].
//!
//! Images are fetched through an [`ImageLoader`]; renders share nothing mutable, so concurrent
//! renders on one composer never interfere.
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod assets;
mod compose;
mod foundation;
mod pipeline;
mod render;
mod subject;
mod text;
mod theme;

pub use crate::foundation::core::{
    Affine, BezPath, CARD_HEIGHT, CARD_WIDTH, CardSize, Point, Rect, Rgba8,
};
pub use crate::foundation::error::{CardError, CardResult};

pub use crate::assets::decode::{Bitmap, decode_image};
pub use crate::assets::fonts::{DEJAVU_SANS, DEJAVU_SANS_MONO, FontBook};
pub use crate::assets::loader::{
    ASSETS_DIR_ENV, FsImageLoader, ImageLoader, ImageRef, MemoryImageLoader, load_image,
};

pub use crate::theme::registry::{
    BuiltinTheme, DEFAULT_EXTENDED_THEME, DEFAULT_LEGACY_THEME, EXTENDED_THEMES, LEGACY_THEMES,
    Theme, resolve_extended_theme, resolve_theme, select_legacy_theme,
};

pub use crate::text::font::{DEFAULT_FAMILY, Font, TextAlign};
pub use crate::text::sizing::{change_font_size, font_size_for};

pub use crate::render::blur::{BACKGROUND_BLUR_RADIUS, blur_bitmap};
pub use crate::render::raster::{ImageFormat, Raster};
pub use crate::render::shape::{avatar_clip_path, circle_path, rounded_rect_path};
pub use crate::render::surface::Surface;

pub use crate::pipeline::builtin::{BUILTIN_MODULES, BuiltinModule};
pub use crate::pipeline::module::{CardModule, Module};
pub use crate::pipeline::runner::{Pipeline, PipelineState, run_modules};

pub use crate::compose::composer::Composer;
pub use crate::compose::legacy::CardAttachment;
pub use crate::compose::options::{
    AvatarAlign, AvatarOptions, AvatarStyle, CardOptions, CardStyle, DEFAULT_IMAGE_RADIUS, DrawText,
    GenerationOptions, NormalizedOptions, RenderOptions, StyledText, TextContent, TextOptions,
    TextStyle, ThemeChoice, ThemeSpec,
};
pub use crate::compose::snap::{NoSnap, SnapHook};
pub use crate::compose::static_card::{
    CARD_BORDER_WIDTH, CARD_CORNER_RADIUS, StaticCard, ThemedStaticCard,
};
pub use crate::subject::{Member, Subject};

use async_trait::async_trait;

use crate::assets::decode::Bitmap;
use crate::assets::fonts::FontBook;
use crate::assets::loader::{ImageLoader, load_image};
use crate::compose::options::NormalizedOptions;
use crate::foundation::core::{CardSize, Rect};
use crate::foundation::error::CardResult;
use crate::render::blur::{BACKGROUND_BLUR_RADIUS, blur_bitmap};
use crate::render::shape::{avatar_clip_path, rounded_rect_path};
use crate::render::surface::Surface;

/// Builds the pre-rendered background layer of the extended composer.
#[async_trait]
pub trait StaticCard: Send + Sync {
    /// Render a card-sized background for `options`.
    async fn render(
        &self,
        options: &NormalizedOptions,
        loader: &dyn ImageLoader,
        fonts: &FontBook,
    ) -> CardResult<Bitmap>;
}

/// Corner radius of rounded cards.
pub const CARD_CORNER_RADIUS: f64 = 25.0;
/// Width of the accent border.
pub const CARD_BORDER_WIDTH: f64 = 6.0;

/// Theme background with optional blur, rounded corners, border and avatar outline ring.
#[derive(Clone, Copy, Debug, Default)]
pub struct ThemedStaticCard;

#[async_trait]
impl StaticCard for ThemedStaticCard {
    async fn render(
        &self,
        options: &NormalizedOptions,
        loader: &dyn ImageLoader,
        fonts: &FontBook,
    ) -> CardResult<Bitmap> {
        let size = CardSize::CARD;
        let full = Rect::new(0.0, 0.0, size.w(), size.h());
        let theme = &options.theme;

        let mut background = load_image(loader, &theme.background).await?;
        if options.card.blur {
            background = blur_bitmap(&background, BACKGROUND_BLUR_RADIUS)?;
        }

        let mut surface = Surface::card(fonts.clone())?;
        if options.card.rounded {
            surface.clip(&rounded_rect_path(full, CARD_CORNER_RADIUS, 0.0));
        }
        surface.draw_image(&background, full)?;

        if options.card.border {
            surface.set_stroke_color(theme.color);
            surface.set_line_width(CARD_BORDER_WIDTH);
            let inset = CARD_BORDER_WIDTH / 2.0;
            if options.card.rounded {
                surface.stroke_path(&rounded_rect_path(
                    full,
                    CARD_CORNER_RADIUS - inset,
                    -inset,
                ));
            } else {
                surface.stroke_rect(full.inset(-inset));
            }
        }

        let avatar = &options.avatar;
        if avatar.image.is_some() && avatar.outline_width > 0.0 {
            surface.set_fill_color(theme.color);
            surface.fill_path(&avatar_clip_path(
                avatar.origin(size),
                avatar.radius(size),
                avatar.border_radius,
                0.0,
            ));
        }

        tracing::trace!(
            blur = options.card.blur,
            rounded = options.card.rounded,
            border = options.card.border,
            "rendered static card"
        );
        surface.snapshot()?.into_bitmap()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/compose/static_card.rs"]
mod tests;

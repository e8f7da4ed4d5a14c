use crate::assets::loader::load_image;
use crate::compose::composer::Composer;
use crate::compose::options::{NormalizedOptions, RenderOptions, TextContent};
use crate::foundation::core::{CardSize, Rect};
use crate::foundation::error::CardResult;
use crate::render::shape::avatar_clip_path;
use crate::render::surface::Surface;
use crate::text::font::Font;
use crate::text::sizing::{change_font_size, font_size_for};

impl Composer {
    /// Render a card from caller options: static layer, up to three text slots, then the avatar.
    ///
    /// Returns the encoded image in the requested format (PNG by default).
    #[tracing::instrument(skip(self, options))]
    pub async fn hydrate(&self, options: RenderOptions) -> CardResult<Vec<u8>> {
        let options = options.normalize()?;
        self.hydrate_normalized(&options).await
    }

    /// [`Composer::hydrate`] for options that are already normalized.
    pub async fn hydrate_normalized(&self, options: &NormalizedOptions) -> CardResult<Vec<u8>> {
        let size = CardSize::CARD;
        let (w, h) = (size.w(), size.h());

        let mut surface = Surface::card(self.fonts.clone())?;
        tracing::debug!("created canvas");

        let layer = self
            .static_card
            .render(options, self.loader(), &self.fonts)
            .await?;
        surface.draw_image(&layer, Rect::new(0.0, 0.0, w, h))?;
        tracing::debug!("static layer");

        surface.set_fill_color(options.text_color());
        surface.set_font(Font::new(30.0, options.font_family())?);
        surface.set_text_align(options.text.align);

        let slots = [
            (&options.text.title, w / 2.7, h / 3.5),
            (&options.text.text, w / 2.7, h / 1.8),
            (&options.text.subtitle, w / 2.7, h / 1.3),
        ];
        for (index, (content, x, y)) in slots.into_iter().enumerate() {
            match content {
                Some(TextContent::Plain(text)) if !text.is_empty() => {
                    let size_px = match index {
                        0 => 30.0,
                        1 => font_size_for(text),
                        _ => 25.0,
                    };
                    change_font_size(&mut surface, size_px)?;
                    surface.fill_text(text, x, y)?;
                }
                Some(TextContent::Custom(drawable)) => drawable.draw(&mut surface)?,
                _ => {}
            }
        }
        tracing::debug!("text");

        let avatar = &options.avatar;
        if let Some(image) = &avatar.image {
            let radius = avatar.radius(size);
            let origin = avatar.origin(size);
            let ow = avatar.outline_width;

            surface.clip(&avatar_clip_path(origin, radius, avatar.border_radius, -ow));
            let bitmap = load_image(self.loader(), image).await?;
            surface.draw_image(
                &bitmap,
                Rect::new(
                    origin.x + ow,
                    origin.y + ow,
                    origin.x + radius * 2.0 - ow,
                    origin.y + radius * 2.0 - ow,
                ),
            )?;
        }
        tracing::debug!("avatar");

        let mut raster = surface.snapshot()?;
        self.snap.snap(&mut raster)?;
        let bytes = raster.encode(options.format)?;
        tracing::debug!(len = bytes.len(), format = options.format.mime(), "buffer");
        Ok(bytes)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/compose/hydrate.rs"]
mod tests;

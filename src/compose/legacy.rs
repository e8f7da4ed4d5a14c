use crate::assets::loader::load_image;
use crate::compose::composer::Composer;
use crate::foundation::core::{Point, Rect};
use crate::foundation::error::CardResult;
use crate::pipeline::builtin::BuiltinModule;
use crate::pipeline::module::Module;
use crate::pipeline::runner::Pipeline;
use crate::render::raster::ImageFormat;
use crate::render::surface::Surface;
use crate::subject::Subject;
use crate::theme::registry::{DEFAULT_LEGACY_THEME, select_legacy_theme};

/// Encoded card plus the file name it is attached under.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CardAttachment {
    /// `welcome.png` or `goodbye.png`.
    pub filename: String,
    /// PNG bytes.
    pub data: Vec<u8>,
}

const WELCOME_MODULES: [BuiltinModule; 4] = [
    BuiltinModule::WelcomeText,
    BuiltinModule::UserText,
    BuiltinModule::MemberCount,
    BuiltinModule::AvatarImg,
];

const GOODBYE_MODULES: [BuiltinModule; 3] = [
    BuiltinModule::GoodbyeText,
    BuiltinModule::UserText,
    BuiltinModule::AvatarImg,
];

impl Composer {
    /// Draw a 700x250 card: themed background, a full-surface border, then `modules` in order
    /// with fill and stroke set to the theme accent.
    ///
    /// `theme` is a legacy registry name (any case) or, failing that, an image locator used as the
    /// background. Any error aborts the render.
    #[tracing::instrument(skip(self, subject, modules), fields(tag = subject.tag()))]
    pub async fn compose<I, M>(
        &self,
        theme: &str,
        subject: &dyn Subject,
        modules: I,
    ) -> CardResult<Surface>
    where
        I: IntoIterator<Item = M>,
        M: Into<Module>,
    {
        let theme = select_legacy_theme(theme)?;

        let mut surface = Surface::card(self.fonts.clone())?;
        tracing::debug!("created canvas");

        let background = load_image(self.loader(), &theme.background).await?;
        surface.draw_image_at(&background, Point::ORIGIN)?;
        surface.stroke_rect(Rect::new(0.0, 0.0, surface.width(), surface.height()));
        tracing::debug!(theme = %theme.name, "background");

        surface.set_fill_color(theme.color);
        surface.set_stroke_color(theme.color);

        Pipeline::new(modules)
            .run(&mut surface, subject, self.loader())
            .await?;
        tracing::debug!("modules");

        Ok(surface)
    }

    /// Welcome card (`welcome.png`); theme defaults to `sakura`.
    pub async fn welcome_image(
        &self,
        subject: &dyn Subject,
        theme: Option<&str>,
    ) -> CardResult<CardAttachment> {
        let surface = self
            .compose(theme.unwrap_or(DEFAULT_LEGACY_THEME), subject, WELCOME_MODULES)
            .await?;
        Ok(CardAttachment {
            filename: "welcome.png".to_owned(),
            data: surface.encode(ImageFormat::Png)?,
        })
    }

    /// Goodbye card (`goodbye.png`); theme defaults to `sakura`.
    pub async fn goodbye_image(
        &self,
        subject: &dyn Subject,
        theme: Option<&str>,
    ) -> CardResult<CardAttachment> {
        let surface = self
            .compose(theme.unwrap_or(DEFAULT_LEGACY_THEME), subject, GOODBYE_MODULES)
            .await?;
        Ok(CardAttachment {
            filename: "goodbye.png".to_owned(),
            data: surface.encode(ImageFormat::Png)?,
        })
    }
}

#[cfg(test)]
#[path = "../../tests/unit/compose/legacy.rs"]
mod tests;

use async_trait::async_trait;

use crate::assets::loader::{ImageLoader, load_image};
use crate::foundation::core::{Point, Rect};
use crate::foundation::error::CardResult;
use crate::pipeline::module::CardModule;
use crate::render::shape::circle_path;
use crate::render::surface::Surface;
use crate::subject::Subject;
use crate::text::font::Font;
use crate::text::sizing::font_size_for;

/// Draw steps selectable by name.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum BuiltinModule {
    /// "Welcome to this server," at 30px.
    WelcomeText,
    /// "Goodbye," at 30px.
    GoodbyeText,
    /// The subject's tag, sized by its length.
    UserText,
    /// "MemberCount: N" at 24px.
    MemberCount,
    /// The subject's avatar in a circle on the left.
    AvatarImg,
}

/// Lookup table from step name to built-in.
pub const BUILTIN_MODULES: [(&str, BuiltinModule); 5] = [
    ("welcomeText", BuiltinModule::WelcomeText),
    ("goodbyeText", BuiltinModule::GoodbyeText),
    ("userText", BuiltinModule::UserText),
    ("memberCount", BuiltinModule::MemberCount),
    ("avatarImg", BuiltinModule::AvatarImg),
];

const LABEL_FAMILY: &str = "sans-serif";

impl BuiltinModule {
    /// Exact, case-sensitive lookup.
    pub fn from_name(name: &str) -> Option<Self> {
        BUILTIN_MODULES
            .iter()
            .find(|(n, _)| *n == name)
            .map(|(_, m)| *m)
    }

    /// Name the step is selected by.
    pub fn name(self) -> &'static str {
        match self {
            Self::WelcomeText => "welcomeText",
            Self::GoodbyeText => "goodbyeText",
            Self::UserText => "userText",
            Self::MemberCount => "memberCount",
            Self::AvatarImg => "avatarImg",
        }
    }

    /// Run the step.
    pub async fn apply(
        self,
        surface: &mut Surface,
        subject: &dyn Subject,
        loader: &dyn ImageLoader,
    ) -> CardResult<()> {
        let (w, h) = (surface.width(), surface.height());
        match self {
            Self::WelcomeText => {
                surface.set_font(Font::new(30.0, LABEL_FAMILY)?);
                surface.fill_text("Welcome to this server,", w / 2.7, h / 3.5)
            }
            Self::GoodbyeText => {
                surface.set_font(Font::new(30.0, LABEL_FAMILY)?);
                surface.fill_text("Goodbye,", w / 2.7, h / 3.5)
            }
            Self::UserText => {
                let tag = subject.tag();
                surface.set_font(Font::new(font_size_for(tag), LABEL_FAMILY)?);
                surface.fill_text(&format!("{tag}!"), w / 2.7, h / 1.8)
            }
            Self::MemberCount => {
                surface.set_font(Font::new(24.0, LABEL_FAMILY)?);
                let label = format!("MemberCount: {}", subject.member_count());
                surface.fill_text(&label, w / 2.7, h / 1.3)
            }
            Self::AvatarImg => {
                surface.set_line_width(6.0);
                surface.clip(&circle_path(Point::new(h / 2.0, h / 2.0), h / 2.5, 0.0));
                let avatar = load_image(loader, subject.avatar()).await?;
                surface.draw_image(&avatar, Rect::new(25.0, 25.0, 225.0, 225.0))
            }
        }
    }
}

#[async_trait(?Send)]
impl CardModule for BuiltinModule {
    fn name(&self) -> &str {
        BuiltinModule::name(*self)
    }

    async fn draw(
        &self,
        surface: &mut Surface,
        subject: &dyn Subject,
        loader: &dyn ImageLoader,
    ) -> CardResult<()> {
        self.apply(surface, subject, loader).await
    }
}

#[cfg(test)]
#[path = "../../tests/unit/pipeline/builtin.rs"]
mod tests;

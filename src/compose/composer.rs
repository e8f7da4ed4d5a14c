use std::fmt;
use std::sync::Arc;

use crate::assets::fonts::FontBook;
use crate::assets::loader::{FsImageLoader, ImageLoader};
use crate::compose::snap::{NoSnap, SnapHook};
use crate::compose::static_card::{StaticCard, ThemedStaticCard};

/// Entry point for rendering cards; holds the collaborators every render shares.
///
/// A composer carries no per-render state: each call allocates its own [`Surface`], so one
/// composer can serve any number of concurrent renders.
///
/// [`Surface`]: crate::Surface
#[derive(Clone)]
pub struct Composer {
    pub(crate) loader: Arc<dyn ImageLoader>,
    pub(crate) fonts: FontBook,
    pub(crate) static_card: Arc<dyn StaticCard>,
    pub(crate) snap: Arc<dyn SnapHook>,
}

impl Composer {
    /// Composer using `loader`, the default fonts, [`ThemedStaticCard`] and [`NoSnap`].
    pub fn new(loader: impl ImageLoader + 'static) -> Self {
        Self::with_shared_loader(Arc::new(loader))
    }

    /// Like [`Composer::new`] for an already shared loader.
    pub fn with_shared_loader(loader: Arc<dyn ImageLoader>) -> Self {
        Self {
            loader,
            fonts: FontBook::default(),
            static_card: Arc::new(ThemedStaticCard),
            snap: Arc::new(NoSnap),
        }
    }

    /// Replace the font book.
    pub fn with_fonts(mut self, fonts: FontBook) -> Self {
        self.fonts = fonts;
        self
    }

    /// Replace the static-card builder of the extended path.
    pub fn with_static_card(mut self, static_card: impl StaticCard + 'static) -> Self {
        self.static_card = Arc::new(static_card);
        self
    }

    /// Replace the post-processing hook of the extended path.
    pub fn with_snap(mut self, snap: impl SnapHook + 'static) -> Self {
        self.snap = Arc::new(snap);
        self
    }

    /// Image loader shared by every render.
    pub fn loader(&self) -> &dyn ImageLoader {
        self.loader.as_ref()
    }

    /// Fonts available to every render.
    pub fn fonts(&self) -> &FontBook {
        &self.fonts
    }
}

impl Default for Composer {
    /// Filesystem loader rooted at `$DISCORD_CARD_ASSETS_DIR`.
    fn default() -> Self {
        Self::new(FsImageLoader::from_env())
    }
}

impl fmt::Debug for Composer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Composer")
            .field("fonts", &self.fonts)
            .finish_non_exhaustive()
    }
}

//! Bitmaps, image references, the loader collaborator, and embedded fonts.

pub(crate) mod decode;
pub(crate) mod fonts;
pub(crate) mod loader;

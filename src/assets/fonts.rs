use std::sync::Arc;

use crate::foundation::error::{CardError, CardResult};

/// DejaVu Sans, the default family of every [`FontBook`].
pub const DEJAVU_SANS: &[u8] = include_bytes!("../../assets/fonts/DejaVuSans.ttf");
/// DejaVu Sans Mono, used by the monospace themes.
pub const DEJAVU_SANS_MONO: &[u8] = include_bytes!("../../assets/fonts/DejaVuSansMono.ttf");

#[derive(Clone)]
pub(crate) struct FontFace {
    pub(crate) family: String,
    pub(crate) bytes: Arc<Vec<u8>>,
}

/// Set of font faces available to a render.
///
/// Faces are registered by family name; the first registered face is the fallback for generic or
/// unknown families.
#[derive(Clone)]
pub struct FontBook {
    faces: Vec<FontFace>,
}

impl FontBook {
    /// An empty book. Rendering text with it fails until a face is added.
    pub fn empty() -> Self {
        Self { faces: Vec::new() }
    }

    /// Register font bytes under `family`.
    pub fn add_face(&mut self, family: impl Into<String>, bytes: impl Into<Vec<u8>>) -> CardResult<()> {
        let family = family.into();
        let bytes = bytes.into();
        if family.trim().is_empty() {
            return Err(CardError::validation("font family name must be non-empty"));
        }
        if bytes.is_empty() {
            return Err(CardError::validation(format!(
                "font bytes for `{family}` are empty"
            )));
        }
        self.faces.push(FontFace {
            family,
            bytes: Arc::new(bytes),
        });
        Ok(())
    }

    /// Builder-style [`FontBook::add_face`].
    pub fn with_face(mut self, family: impl Into<String>, bytes: impl Into<Vec<u8>>) -> CardResult<Self> {
        self.add_face(family, bytes)?;
        Ok(self)
    }

    /// Family names in registration order.
    pub fn families(&self) -> impl Iterator<Item = &str> {
        self.faces.iter().map(|f| f.family.as_str())
    }

    /// Name of the fallback family, if any face is registered.
    pub fn default_family(&self) -> Option<&str> {
        self.faces.first().map(|f| f.family.as_str())
    }

    pub(crate) fn faces(&self) -> &[FontFace] {
        &self.faces
    }
}

impl Default for FontBook {
    fn default() -> Self {
        Self {
            faces: vec![
                FontFace {
                    family: "DejaVu Sans".to_owned(),
                    bytes: Arc::new(DEJAVU_SANS.to_vec()),
                },
                FontFace {
                    family: "DejaVu Sans Mono".to_owned(),
                    bytes: Arc::new(DEJAVU_SANS_MONO.to_vec()),
                },
            ],
        }
    }
}

impl std::fmt::Debug for FontBook {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list().entries(self.families()).finish()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/assets/fonts.rs"]
mod tests;

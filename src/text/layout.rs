use std::borrow::Cow;
use std::collections::HashMap;
use std::sync::Arc;

use crate::assets::fonts::{FontBook, FontFace};
use crate::foundation::core::Rgba8;
use crate::foundation::error::{CardError, CardResult};
use crate::text::font::Font;

/// Parley brush carrying a straight-alpha fill color.
#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) struct TextBrush(pub(crate) Rgba8);

impl Default for TextBrush {
    fn default() -> Self {
        Self(Rgba8::BLACK)
    }
}

/// Single-line layout plus the metrics needed to place it on a baseline.
pub(crate) struct LaidOutText {
    pub(crate) layout: parley::Layout<TextBrush>,
    pub(crate) width: f32,
    /// Distance from the layout's top edge to the first baseline.
    pub(crate) baseline: f32,
}

/// Stateful helper for building Parley text layouts from a [`FontBook`].
///
/// Faces are registered with Parley the first time a font selects them.
pub(crate) struct TextLayoutEngine {
    book: FontBook,
    font_ctx: parley::FontContext,
    layout_ctx: parley::LayoutContext<TextBrush>,
    registered: HashMap<String, String>,
}

impl TextLayoutEngine {
    pub(crate) fn new(book: FontBook) -> Self {
        Self {
            book,
            font_ctx: parley::FontContext::default(),
            layout_ctx: parley::LayoutContext::new(),
            registered: HashMap::new(),
        }
    }

    /// Pick the face for `font`: the first listed family the book knows, else the book default.
    pub(crate) fn select_face(&self, font: &Font) -> CardResult<FontFace> {
        let faces = self.book.faces();
        font.families()
            .find_map(|name| faces.iter().find(|f| f.family.eq_ignore_ascii_case(name)))
            .or_else(|| faces.first())
            .cloned()
            .ok_or_else(|| CardError::render("font book has no faces"))
    }

    fn parley_family(&mut self, font: &Font) -> CardResult<String> {
        let face = self.select_face(font)?;
        if let Some(name) = self.registered.get(&face.family) {
            return Ok(name.clone());
        }

        let data: Arc<dyn AsRef<[u8]> + Send + Sync> = face.bytes.clone();
        let families = self
            .font_ctx
            .collection
            .register_fonts(parley::fontique::Blob::new(data), None);
        let family_id = families.first().map(|(id, _)| *id).ok_or_else(|| {
            CardError::render(format!("no font families registered for `{}`", face.family))
        })?;
        let name = self
            .font_ctx
            .collection
            .family_name(family_id)
            .ok_or_else(|| CardError::render("registered font family has no name"))?
            .to_string();

        tracing::trace!(family = %face.family, parley = %name, "registered font");
        self.registered.insert(face.family, name.clone());
        Ok(name)
    }

    /// Shape `text` on a single line.
    pub(crate) fn layout_line(
        &mut self,
        text: &str,
        font: &Font,
        color: Rgba8,
    ) -> CardResult<LaidOutText> {
        if !font.size_px.is_finite() || font.size_px <= 0.0 {
            return Err(CardError::validation(
                "font size_px must be finite and > 0",
            ));
        }
        let family_name = self.parley_family(font)?;

        let mut builder = self
            .layout_ctx
            .ranged_builder(&mut self.font_ctx, text, 1.0, true);
        builder.push_default(parley::style::StyleProperty::FontFamily(
            parley::style::FontFamily::Source(Cow::Owned(family_name)),
        ));
        builder.push_default(parley::style::StyleProperty::FontSize(font.size_px));
        builder.push_default(parley::style::StyleProperty::Brush(TextBrush(color)));

        let mut layout: parley::Layout<TextBrush> = builder.build(text);
        layout.break_all_lines(None);
        layout.align(
            parley::Alignment::Start,
            parley::AlignmentOptions::default(),
        );

        let width = layout.width();
        let baseline = layout
            .lines()
            .next()
            .map(|line| line.metrics().baseline)
            .unwrap_or(font.size_px);

        Ok(LaidOutText {
            layout,
            width,
            baseline,
        })
    }
}

#[cfg(test)]
#[path = "../../tests/unit/text/layout.rs"]
mod tests;

use crate::foundation::error::CardResult;
use crate::render::surface::Surface;

/// Pixel size for a single line of text, chosen from its character count alone.
///
/// Longer strings get smaller sizes: 29+ chars → 18px, 24+ → 22px, 19+ → 28px, otherwise 35px.
/// Glyph widths are never measured, so very wide scripts can still overflow the card.
pub fn font_size_for(text: &str) -> f32 {
    match text.chars().count() {
        n if n >= 29 => 18.0,
        n if n >= 24 => 22.0,
        n if n >= 19 => 28.0,
        _ => 35.0,
    }
}

/// Change the surface's font size while keeping its family.
pub fn change_font_size(surface: &mut Surface, size_px: f32) -> CardResult<()> {
    let font = surface.font().with_size(size_px)?;
    surface.set_font(font);
    Ok(())
}

#[cfg(test)]
#[path = "../../tests/unit/text/sizing.rs"]
mod tests;

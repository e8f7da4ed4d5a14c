use std::fmt;

use crate::assets::decode::Bitmap;
use crate::assets::fonts::FontBook;
use crate::foundation::core::{Affine, BezPath, CardSize, Point, Rect, Rgba8};
use crate::foundation::error::{CardError, CardResult};
use crate::render::raster::{ImageFormat, Raster};
use crate::text::font::{Font, TextAlign};
use crate::text::layout::TextLayoutEngine;

/// Mutable raster canvas plus its drawing state, owned by exactly one render.
///
/// Drawing state (colors, line width, font, alignment, clip) persists across calls the way a 2D
/// canvas context does: whatever one pipeline step sets is what the next step sees. Clips in
/// particular are never undone automatically; call [`Surface::reset_clip`] to drop them.
pub struct Surface {
    size: CardSize,
    ctx: vello_cpu::RenderContext,
    text: TextLayoutEngine,
    fill: Rgba8,
    stroke: Rgba8,
    line_width: f64,
    font: Font,
    text_align: TextAlign,
    clip_depth: usize,
}

impl Surface {
    /// Allocate a transparent surface.
    pub fn new(width: u32, height: u32, fonts: FontBook) -> CardResult<Self> {
        if width == 0 || height == 0 {
            return Err(CardError::validation("surface width/height must be non-zero"));
        }
        let w: u16 = width
            .try_into()
            .map_err(|_| CardError::validation("surface width exceeds u16"))?;
        let h: u16 = height
            .try_into()
            .map_err(|_| CardError::validation("surface height exceeds u16"))?;

        Ok(Self {
            size: CardSize { width, height },
            ctx: vello_cpu::RenderContext::new(w, h),
            text: TextLayoutEngine::new(fonts),
            fill: Rgba8::BLACK,
            stroke: Rgba8::BLACK,
            line_width: 1.0,
            font: Font::default(),
            text_align: TextAlign::default(),
            clip_depth: 0,
        })
    }

    /// Allocate a 700x250 card surface.
    pub fn card(fonts: FontBook) -> CardResult<Self> {
        Self::new(CardSize::CARD.width, CardSize::CARD.height, fonts)
    }

    /// Surface dimensions.
    pub fn size(&self) -> CardSize {
        self.size
    }

    /// Width in pixels.
    pub fn width(&self) -> f64 {
        self.size.w()
    }

    /// Height in pixels.
    pub fn height(&self) -> f64 {
        self.size.h()
    }

    /// Current fill color.
    pub fn fill_color(&self) -> Rgba8 {
        self.fill
    }

    /// Set the color used by fills and text.
    pub fn set_fill_color(&mut self, color: Rgba8) {
        self.fill = color;
    }

    /// Current stroke color.
    pub fn stroke_color(&self) -> Rgba8 {
        self.stroke
    }

    /// Set the color used by strokes.
    pub fn set_stroke_color(&mut self, color: Rgba8) {
        self.stroke = color;
    }

    /// Current stroke width.
    pub fn line_width(&self) -> f64 {
        self.line_width
    }

    /// Set the stroke width; non-finite or non-positive widths are ignored, as on a canvas.
    pub fn set_line_width(&mut self, width: f64) {
        if width.is_finite() && width > 0.0 {
            self.line_width = width;
        }
    }

    /// Current font.
    pub fn font(&self) -> &Font {
        &self.font
    }

    /// Set the font used by [`Surface::fill_text`] and [`Surface::measure_text`].
    pub fn set_font(&mut self, font: Font) {
        self.font = font;
    }

    /// Current text alignment.
    pub fn text_align(&self) -> TextAlign {
        self.text_align
    }

    /// Set how text is anchored to its x coordinate.
    pub fn set_text_align(&mut self, align: TextAlign) {
        self.text_align = align;
    }

    /// Fill `rect` with the fill color.
    pub fn fill_rect(&mut self, rect: Rect) {
        self.ctx.set_paint(self.fill.to_cpu());
        self.ctx.fill_rect(&rect);
    }

    /// Stroke the outline of `rect`, centered on its edges.
    pub fn stroke_rect(&mut self, rect: Rect) {
        self.apply_stroke();
        self.ctx.stroke_rect(&rect);
    }

    /// Fill `path` with the fill color.
    pub fn fill_path(&mut self, path: &BezPath) {
        self.ctx.set_paint(self.fill.to_cpu());
        self.ctx.fill_path(path);
    }

    /// Stroke `path` with the stroke color and line width.
    pub fn stroke_path(&mut self, path: &BezPath) {
        self.apply_stroke();
        self.ctx.stroke_path(path);
    }

    fn apply_stroke(&mut self) {
        self.ctx.set_paint(self.stroke.to_cpu());
        self.ctx.set_stroke(kurbo::Stroke::new(self.line_width));
    }

    /// Draw `bitmap` scaled into `dest`.
    pub fn draw_image(&mut self, bitmap: &Bitmap, dest: Rect) -> CardResult<()> {
        if bitmap.width == 0 || bitmap.height == 0 || dest.width() <= 0.0 || dest.height() <= 0.0
        {
            return Ok(());
        }
        let (iw, ih) = (f64::from(bitmap.width), f64::from(bitmap.height));
        let paint = bitmap.to_paint()?;

        self.ctx.set_transform(
            Affine::translate((dest.x0, dest.y0))
                * Affine::scale_non_uniform(dest.width() / iw, dest.height() / ih),
        );
        self.ctx.set_paint(paint);
        self.ctx.fill_rect(&Rect::new(0.0, 0.0, iw, ih));
        self.ctx.reset_transform();
        Ok(())
    }

    /// Draw `bitmap` at its natural size with its top-left corner at `at`.
    pub fn draw_image_at(&mut self, bitmap: &Bitmap, at: Point) -> CardResult<()> {
        let dest = Rect::new(
            at.x,
            at.y,
            at.x + f64::from(bitmap.width),
            at.y + f64::from(bitmap.height),
        );
        self.draw_image(bitmap, dest)
    }

    /// Intersect the clip region with `path`. The clip stays until [`Surface::reset_clip`].
    pub fn clip(&mut self, path: &BezPath) {
        self.ctx.reset_transform();
        self.ctx.push_clip_path(path);
        self.clip_depth += 1;
    }

    /// Drop every clip installed with [`Surface::clip`].
    pub fn reset_clip(&mut self) {
        for _ in 0..self.clip_depth {
            self.ctx.pop_clip_path();
        }
        self.clip_depth = 0;
    }

    /// Number of clips currently installed.
    pub fn clip_depth(&self) -> usize {
        self.clip_depth
    }

    /// Width in pixels of `text` in the current font.
    pub fn measure_text(&mut self, text: &str) -> CardResult<f64> {
        if text.is_empty() {
            return Ok(0.0);
        }
        let laid = self.text.layout_line(text, &self.font, self.fill)?;
        Ok(f64::from(laid.width))
    }

    /// Draw `text` in the fill color with its alphabetic baseline at `y`.
    ///
    /// `x` is interpreted through the current [`TextAlign`].
    pub fn fill_text(&mut self, text: &str, x: f64, y: f64) -> CardResult<()> {
        if text.is_empty() {
            return Ok(());
        }
        let laid = self.text.layout_line(text, &self.font, self.fill)?;
        let left = self.text_align.origin_x(x, f64::from(laid.width));
        let top = y - f64::from(laid.baseline);

        self.ctx.set_transform(Affine::translate((left, top)));
        for line in laid.layout.lines() {
            for item in line.items() {
                let parley::layout::PositionedLayoutItem::GlyphRun(run) = item else {
                    continue;
                };

                let brush = run.style().brush;
                self.ctx.set_paint(brush.0.to_cpu());

                let glyphs = run.positioned_glyphs().map(|g| vello_cpu::Glyph {
                    id: g.id,
                    x: g.x,
                    y: g.y,
                });
                self.ctx
                    .glyph_run(run.run().font())
                    .font_size(run.run().font_size())
                    .fill_glyphs(glyphs);
            }
        }
        self.ctx.reset_transform();
        Ok(())
    }

    /// Rasterize everything drawn so far. Drawing may continue afterwards.
    pub fn snapshot(&self) -> CardResult<Raster> {
        let w: u16 = self
            .size
            .width
            .try_into()
            .map_err(|_| CardError::render("surface width exceeds u16"))?;
        let h: u16 = self
            .size
            .height
            .try_into()
            .map_err(|_| CardError::render("surface height exceeds u16"))?;

        let mut pixmap = vello_cpu::Pixmap::new(w, h);
        self.ctx.render_to_pixmap(&mut pixmap);
        Ok(Raster {
            width: self.size.width,
            height: self.size.height,
            data: pixmap.data_as_u8_slice().to_vec(),
        })
    }

    /// Rasterize and encode to `format`.
    pub fn encode(&self, format: ImageFormat) -> CardResult<Vec<u8>> {
        self.snapshot()?.encode(format)
    }
}

impl fmt::Debug for Surface {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Surface")
            .field("size", &self.size)
            .field("fill", &self.fill)
            .field("stroke", &self.stroke)
            .field("line_width", &self.line_width)
            .field("font", &self.font)
            .field("text_align", &self.text_align)
            .field("clip_depth", &self.clip_depth)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/surface.rs"]
mod tests;

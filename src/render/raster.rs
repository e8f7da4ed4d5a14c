use std::io::Cursor;

use crate::assets::decode::{Bitmap, unpremultiply_rgba8_in_place};
use crate::foundation::error::{CardError, CardResult};

/// Output image format of a finished card.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum ImageFormat {
    /// Lossless PNG with alpha.
    #[default]
    #[serde(rename = "png", alias = "image/png", alias = "PNG")]
    Png,
    /// Baseline JPEG; alpha is dropped.
    #[serde(
        rename = "jpeg",
        alias = "jpg",
        alias = "image/jpeg",
        alias = "JPEG",
        alias = "JPG"
    )]
    Jpeg,
    /// Lossless WebP with alpha.
    #[serde(rename = "webp", alias = "image/webp", alias = "WEBP")]
    WebP,
}

impl ImageFormat {
    /// MIME type of the encoded bytes.
    pub fn mime(self) -> &'static str {
        match self {
            Self::Png => "image/png",
            Self::Jpeg => "image/jpeg",
            Self::WebP => "image/webp",
        }
    }

    /// Conventional file extension, without the dot.
    pub fn extension(self) -> &'static str {
        match self {
            Self::Png => "png",
            Self::Jpeg => "jpg",
            Self::WebP => "webp",
        }
    }

    fn to_image(self) -> image::ImageFormat {
        match self {
            Self::Png => image::ImageFormat::Png,
            Self::Jpeg => image::ImageFormat::Jpeg,
            Self::WebP => image::ImageFormat::WebP,
        }
    }
}

/// Rasterized snapshot of a surface.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Raster {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
    /// Row-major premultiplied RGBA8.
    pub data: Vec<u8>,
}

impl Raster {
    /// Premultiplied pixel at `(x, y)`, or `None` outside the raster.
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let idx = ((y as usize) * (self.width as usize) + (x as usize)) * 4;
        let px = self.data.get(idx..idx + 4)?;
        Some([px[0], px[1], px[2], px[3]])
    }

    /// Reuse the pixels as a drawable bitmap.
    pub fn into_bitmap(self) -> CardResult<Bitmap> {
        Bitmap::from_premul(self.width, self.height, self.data)
    }

    /// Encode to `format`.
    pub fn encode(&self, format: ImageFormat) -> CardResult<Vec<u8>> {
        let mut straight = self.data.clone();
        unpremultiply_rgba8_in_place(&mut straight);
        let rgba = image::RgbaImage::from_raw(self.width, self.height, straight)
            .ok_or_else(|| CardError::encode("raster byte len does not match dimensions"))?;

        let img = match format {
            ImageFormat::Jpeg => {
                image::DynamicImage::ImageRgb8(image::DynamicImage::ImageRgba8(rgba).to_rgb8())
            }
            ImageFormat::Png | ImageFormat::WebP => image::DynamicImage::ImageRgba8(rgba),
        };

        let mut out = Vec::new();
        img.write_to(&mut Cursor::new(&mut out), format.to_image())
            .map_err(|e| CardError::encode(format!("{}: {e}", format.mime())))?;
        Ok(out)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/raster.rs"]
mod tests;

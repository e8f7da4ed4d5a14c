use crate::assets::decode::Bitmap;
use crate::foundation::error::{CardError, CardResult};

/// Blur radius used for themed card backgrounds.
pub const BACKGROUND_BLUR_RADIUS: u32 = 6;

/// Gaussian blur of a premultiplied bitmap; sigma is half the radius.
pub fn blur_bitmap(bitmap: &Bitmap, radius: u32) -> CardResult<Bitmap> {
    let sigma = (radius as f32 / 2.0).max(0.5);
    let out = blur_rgba8_premul(
        &bitmap.rgba8_premul,
        bitmap.width,
        bitmap.height,
        radius,
        sigma,
    )?;
    Bitmap::from_premul(bitmap.width, bitmap.height, out)
}

/// Separable Gaussian blur over premultiplied RGBA8 with edge clamping.
pub(crate) fn blur_rgba8_premul(
    src: &[u8],
    width: u32,
    height: u32,
    radius: u32,
    sigma: f32,
) -> CardResult<Vec<u8>> {
    let len = (width as usize)
        .checked_mul(height as usize)
        .and_then(|v| v.checked_mul(4))
        .ok_or_else(|| CardError::render("blur buffer size overflow"))?;
    if src.len() != len {
        return Err(CardError::render("blur source does not match width*height*4"));
    }
    if radius == 0 || len == 0 {
        return Ok(src.to_vec());
    }

    let kernel = kernel_q16(radius, sigma)?;
    let mut tmp = vec![0u8; len];
    let mut out = vec![0u8; len];
    convolve(src, &mut tmp, width, height, &kernel, Axis::X);
    convolve(&tmp, &mut out, width, height, &kernel, Axis::Y);
    Ok(out)
}

/// Normalized weights in 16.16 fixed point; they sum to exactly 1.0.
fn kernel_q16(radius: u32, sigma: f32) -> CardResult<Vec<u32>> {
    if !sigma.is_finite() || sigma <= 0.0 {
        return Err(CardError::validation("blur sigma must be > 0"));
    }
    let r = radius as i32;
    let denom = 2.0 * f64::from(sigma) * f64::from(sigma);
    let raw: Vec<f64> = (-r..=r)
        .map(|i| (-f64::from(i * i) / denom).exp())
        .collect();
    let sum: f64 = raw.iter().sum();

    let mut weights: Vec<u32> = raw
        .iter()
        .map(|w| ((w / sum) * 65536.0).round().clamp(0.0, 65536.0) as u32)
        .collect();
    let total: i64 = weights.iter().map(|&w| i64::from(w)).sum();
    let mid = weights.len() / 2;
    weights[mid] = (i64::from(weights[mid]) + 65536 - total).clamp(0, 65536) as u32;
    Ok(weights)
}

#[derive(Clone, Copy)]
enum Axis {
    X,
    Y,
}

fn convolve(src: &[u8], dst: &mut [u8], width: u32, height: u32, kernel: &[u32], axis: Axis) {
    let (w, h) = (width as i64, height as i64);
    let r = (kernel.len() / 2) as i64;
    for y in 0..h {
        for x in 0..w {
            let mut acc = [0u64; 4];
            for (i, &k) in kernel.iter().enumerate() {
                let d = i as i64 - r;
                let (sx, sy) = match axis {
                    Axis::X => ((x + d).clamp(0, w - 1), y),
                    Axis::Y => (x, (y + d).clamp(0, h - 1)),
                };
                let idx = ((sy * w + sx) as usize) * 4;
                for (c, a) in acc.iter_mut().enumerate() {
                    *a += u64::from(k) * u64::from(src[idx + c]);
                }
            }
            let out = ((y * w + x) as usize) * 4;
            for (c, a) in acc.iter().enumerate() {
                dst[out + c] = ((a + 32768) >> 16).min(255) as u8;
            }
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/blur.rs"]
mod tests;

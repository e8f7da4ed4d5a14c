use std::io::Cursor;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use super::*;
use crate::assets::loader::MemoryImageLoader;
use crate::compose::options::{StyledText, TextContent};
use crate::foundation::core::Rgba8;
use crate::foundation::error::CardError;
use crate::render::raster::Raster;

const BLUE: [u8; 4] = [0, 0, 255, 255];

fn png(w: u32, h: u32, px: [u8; 4]) -> Vec<u8> {
    let img = image::RgbaImage::from_pixel(w, h, image::Rgba(px));
    let mut buf = Vec::new();
    image::DynamicImage::ImageRgba8(img)
        .write_to(&mut Cursor::new(&mut buf), image::ImageFormat::Png)
        .unwrap();
    buf
}

fn composer() -> Composer {
    Composer::new(MemoryImageLoader::new().with("me.png", png(16, 16, BLUE)))
}

fn options(json: &str) -> RenderOptions {
    serde_json::from_str(json).unwrap()
}

fn decode(bytes: &[u8]) -> image::RgbaImage {
    image::load_from_memory(bytes).unwrap().to_rgba8()
}

#[tokio::test]
async fn default_card_is_a_png_with_left_avatar() {
    let bytes = composer()
        .hydrate(options(r#"{ "avatar": { "image": "me.png" } }"#))
        .await
        .unwrap();
    let img = decode(&bytes);
    assert_eq!(img.dimensions(), (700, 250));
    assert_eq!(img.get_pixel(100, 125).0, BLUE);
    assert_ne!(img.get_pixel(350, 125).0, BLUE);
}

#[tokio::test]
async fn avatar_alignment_and_outline() {
    let bytes = composer()
        .hydrate(options(
            r#"{ "theme": "sakura", "avatar": { "image": "me.png", "align": "right", "outlineWidth": 10 } }"#,
        ))
        .await
        .unwrap();
    let img = decode(&bytes);
    // Right-aligned: the square spans x 500..700.
    assert_eq!(img.get_pixel(600, 125).0, BLUE);
    assert_ne!(img.get_pixel(100, 125).0, BLUE);
    // Ring between the outer radius 100 and the inner radius 90.
    assert_eq!(img.get_pixel(600, 30).0, [0x7d, 0x0b, 0x2b, 255]);
    assert_eq!(img.get_pixel(600, 40).0, BLUE);
}

#[tokio::test]
async fn rounded_avatar_fills_corners() {
    let bytes = composer()
        .hydrate(options(
            r#"{ "avatar": { "image": "me.png", "borderRadius": 0.1 } }"#,
        ))
        .await
        .unwrap();
    let img = decode(&bytes);
    // Near the square's corner, outside the circle.
    assert_eq!(img.get_pixel(15, 40).0, BLUE);
}

#[tokio::test]
async fn text_slots_draw_in_the_theme_color() {
    let bytes = composer()
        .hydrate(options(
            r#"{ "theme": "code", "card": { "blur": false }, "text": { "title": "Welcome", "text": "somebody", "subtitle": "" } }"#,
        ))
        .await
        .unwrap();
    let img = decode(&bytes);
    let white_in = |y0: u32, y1: u32| {
        (y0..y1)
            .flat_map(|y| (259..600).map(move |x| (x, y)))
            .filter(|&(x, y)| img.get_pixel(x, y).0 == [255, 255, 255, 255])
            .count()
    };
    assert!(white_in(45, 75) > 20);
    assert!(white_in(110, 142) > 20);
    assert_eq!(white_in(170, 200), 0);
}

#[tokio::test]
async fn custom_text_objects_draw_themselves() {
    let mut opts = RenderOptions::default().normalize().unwrap();
    opts.card.blur = false;
    opts.text.title = Some(TextContent::custom(StyledText {
        text: "Hey".to_owned(),
        x: 350.0,
        y: 125.0,
        size: Some(40.0),
        font: None,
        color: Some(Rgba8::rgb(255, 0, 0)),
        align: None,
    }));
    let bytes = composer().hydrate_normalized(&opts).await.unwrap();
    let img = decode(&bytes);
    let red = (90..130)
        .flat_map(|y| (340..450).map(move |x| (x, y)))
        .any(|(x, y)| img.get_pixel(x, y).0 == [255, 0, 0, 255]);
    assert!(red);
}

#[tokio::test]
async fn snap_hook_runs_before_encoding() {
    let calls = Arc::new(AtomicUsize::new(0));
    let seen = Arc::clone(&calls);
    let composer = composer().with_snap(move |raster: &mut Raster| -> Result<(), CardError> {
        seen.fetch_add(1, Ordering::SeqCst);
        raster.data[..4].copy_from_slice(&[1, 2, 3, 255]);
        Ok(())
    });
    let bytes = composer.hydrate(RenderOptions::default()).await.unwrap();
    assert_eq!(calls.load(Ordering::SeqCst), 1);
    assert_eq!(decode(&bytes).get_pixel(0, 0).0, [1, 2, 3, 255]);
}

#[tokio::test]
async fn format_and_errors() {
    let bytes = composer()
        .hydrate(options(r#"{ "generation": { "format": "jpeg" } }"#))
        .await
        .unwrap();
    assert_eq!(
        image::guess_format(&bytes).unwrap(),
        image::ImageFormat::Jpeg
    );

    let err = composer()
        .hydrate(options(r#"{ "theme": "neon" }"#))
        .await
        .unwrap_err();
    assert!(matches!(err, CardError::InvalidTheme { .. }));

    let err = composer()
        .hydrate(options(r#"{ "avatar": { "image": "missing.png" } }"#))
        .await
        .unwrap_err();
    assert!(matches!(err, CardError::ImageLoad { .. }));
}

use super::*;
use crate::assets::loader::MemoryImageLoader;
use crate::compose::options::RenderOptions;

async fn render(json: &str) -> Bitmap {
    let options: RenderOptions = serde_json::from_str(json).unwrap();
    ThemedStaticCard
        .render(
            &options.normalize().unwrap(),
            &MemoryImageLoader::new(),
            &FontBook::default(),
        )
        .await
        .unwrap()
}

#[tokio::test]
async fn rounded_card_has_transparent_corners_and_border() {
    let bitmap = render(r#"{ "theme": "sakura" }"#).await;
    assert_eq!((bitmap.width, bitmap.height), (700, 250));
    assert_eq!(bitmap.pixel(0, 0).map(|p| p[3]), Some(0));
    assert_eq!(bitmap.pixel(2, 125), Some([0x7d, 0x0b, 0x2b, 255]));
    assert_eq!(bitmap.pixel(350, 125).map(|p| p[3]), Some(255));
}

#[tokio::test]
async fn flags_can_be_switched_off() {
    let bitmap = render(
        r#"{ "theme": "sakura", "card": { "rounded": false, "border": false, "blur": false } }"#,
    )
    .await;
    assert_eq!(bitmap.pixel(0, 0).map(|p| p[3]), Some(255));
    assert_ne!(bitmap.pixel(2, 125), Some([0x7d, 0x0b, 0x2b, 255]));
}

#[tokio::test]
async fn outline_ring_fills_the_avatar_shape() {
    let bitmap = render(
        r#"{ "theme": "sakura", "card": { "border": false }, "avatar": { "image": "a.png", "outlineWidth": 5 } }"#,
    )
    .await;
    assert_eq!(bitmap.pixel(100, 125), Some([0x7d, 0x0b, 0x2b, 255]));

    let without = render(r#"{ "theme": "sakura", "avatar": { "outlineWidth": 5 } }"#).await;
    assert_ne!(without.pixel(100, 125), Some([0x7d, 0x0b, 0x2b, 255]));
}

#[tokio::test]
async fn missing_custom_background_is_an_image_error() {
    let options: RenderOptions = serde_json::from_str(
        r##"{ "theme": { "color": "#ffffff", "image": "nowhere.png" } }"##,
    )
    .unwrap();
    let err = ThemedStaticCard
        .render(
            &options.normalize().unwrap(),
            &MemoryImageLoader::new(),
            &FontBook::default(),
        )
        .await
        .unwrap_err();
    assert!(matches!(err, crate::foundation::error::CardError::ImageLoad { .. }));
}

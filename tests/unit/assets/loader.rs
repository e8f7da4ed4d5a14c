use std::io::Cursor;

use super::*;

fn tiny_png() -> Vec<u8> {
    let img = image::RgbaImage::from_pixel(3, 2, image::Rgba([10, 20, 30, 255]));
    let mut buf = Vec::new();
    image::DynamicImage::ImageRgba8(img)
        .write_to(&mut Cursor::new(&mut buf), image::ImageFormat::Png)
        .unwrap();
    buf
}

#[test]
fn relative_paths_stay_below_the_root() {
    let rel = |s: &str| asset_relative_path(s);
    assert_eq!(rel("a/./b.png").unwrap(), Path::new("a").join("b.png"));
    assert_eq!(rel("a\\b.png").unwrap(), Path::new("a").join("b.png"));
    assert_eq!(rel("a//b.png").unwrap(), Path::new("a").join("b.png"));
    assert!(rel("../secret.png").is_err());
    assert!(rel("a/../../secret.png").is_err());
    assert!(rel("/abs.png").is_err());
    assert!(rel("\\\\server\\share.png").is_err());
    assert!(rel("C:\\Windows\\x.png").is_err());
    assert!(rel("").is_err());
    assert!(rel("./").is_err());
}

#[test]
fn network_locators_are_detected() {
    assert!(is_network_locator("https://cdn.example.com/a.png"));
    assert!(is_network_locator("HTTP://x"));
    assert!(!is_network_locator("images/a.png"));
}

#[tokio::test]
async fn memory_loader_serves_registered_images() {
    let loader = MemoryImageLoader::new().with("avatar", tiny_png());
    let bitmap = loader.load("avatar").await.unwrap();
    assert_eq!((bitmap.width, bitmap.height), (3, 2));

    let err = loader.load("missing").await.unwrap_err();
    assert!(matches!(err, CardError::ImageLoad { ref locator, .. } if locator == "missing"));
}

#[tokio::test]
async fn load_image_decodes_in_memory_refs_without_loader() {
    let loader = MemoryImageLoader::new();
    let bitmap = load_image(&loader, &ImageRef::from(tiny_png()))
        .await
        .unwrap();
    assert_eq!(bitmap.width, 3);

    let err = load_image(&loader, &ImageRef::Bytes(vec![1, 2, 3].into()))
        .await
        .unwrap_err();
    assert!(matches!(err, CardError::ImageLoad { .. }));
}

#[tokio::test]
async fn fs_loader_reads_relative_to_root() {
    let dir = std::env::temp_dir().join(format!("discord-card-loader-{}", std::process::id()));
    std::fs::create_dir_all(dir.join("img")).unwrap();
    std::fs::write(dir.join("img/a.png"), tiny_png()).unwrap();

    let loader = FsImageLoader::new(&dir);
    let bitmap = loader.load("img/a.png").await.unwrap();
    assert_eq!((bitmap.width, bitmap.height), (3, 2));

    let abs = dir.join("img/a.png");
    let bitmap = loader.load(abs.to_str().unwrap()).await.unwrap();
    assert_eq!(bitmap.width, 3);

    assert!(matches!(
        loader.load("img/missing.png").await,
        Err(CardError::ImageLoad { .. })
    ));
    assert!(matches!(
        loader.load("https://example.com/a.png").await,
        Err(CardError::ImageLoad { .. })
    ));

    std::fs::remove_dir_all(&dir).ok();
}

#[test]
fn describe_hides_raw_bytes() {
    assert_eq!(ImageRef::from("a.png").describe(), "a.png");
    assert_eq!(
        ImageRef::Bytes(vec![0u8; 5].into()).describe(),
        "<5 in-memory bytes>"
    );
}

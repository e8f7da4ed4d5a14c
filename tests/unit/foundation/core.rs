use super::*;
use serde_json::json;

#[test]
fn parses_hex_rgb_and_rgba() {
    assert_eq!("#7d0b2b".parse::<Rgba8>().unwrap(), Rgba8::rgb(0x7d, 0x0b, 0x2b));
    assert_eq!("#FFF".parse::<Rgba8>().unwrap(), Rgba8::WHITE);
    assert_eq!(
        "#0000ff80".parse::<Rgba8>().unwrap(),
        Rgba8::new(0, 0, 255, 128)
    );
}

#[test]
fn parses_named_colors() {
    assert_eq!("White".parse::<Rgba8>().unwrap(), Rgba8::WHITE);
    assert_eq!("transparent".parse::<Rgba8>().unwrap().a, 0);
}

#[test]
fn rejects_malformed_colors() {
    assert!("7d0b2b".parse::<Rgba8>().is_err());
    assert!("#12345".parse::<Rgba8>().is_err());
    assert!("#gg0000".parse::<Rgba8>().is_err());
}

#[test]
fn display_round_trips_through_serde() {
    let c = Rgba8::new(1, 2, 3, 4);
    let v = serde_json::to_value(c).unwrap();
    assert_eq!(v, json!("#01020304"));
    let back: Rgba8 = serde_json::from_value(v).unwrap();
    assert_eq!(back, c);
}

#[test]
fn premultiplies_with_rounding() {
    assert_eq!(Rgba8::new(255, 128, 0, 128).to_premul(), [128, 64, 0, 128]);
    assert_eq!(Rgba8::WHITE.to_premul(), [255, 255, 255, 255]);
}

#[test]
fn card_size_is_fixed() {
    assert_eq!(CardSize::CARD.width, 700);
    assert_eq!(CardSize::CARD.height, 250);
    assert_eq!(CardSize::CARD.w(), 700.0);
}

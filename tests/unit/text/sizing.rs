use super::*;
use crate::assets::fonts::FontBook;
use crate::text::font::Font;

#[test]
fn breakpoints() {
    assert_eq!(font_size_for(&"a".repeat(18)), 35.0);
    assert_eq!(font_size_for(&"a".repeat(19)), 28.0);
    assert_eq!(font_size_for(&"a".repeat(24)), 22.0);
    assert_eq!(font_size_for(&"a".repeat(29)), 18.0);
    assert_eq!(font_size_for(&"a".repeat(30)), 18.0);
    assert_eq!(font_size_for(""), 35.0);
}

#[test]
fn non_increasing_in_length() {
    let mut prev = f32::INFINITY;
    for n in 0..64 {
        let size = font_size_for(&"x".repeat(n));
        assert!(size <= prev, "size grew at {n} chars");
        prev = size;
    }
}

#[test]
fn counts_chars_not_bytes() {
    // 18 two-byte chars stay in the largest class.
    assert_eq!(font_size_for(&"é".repeat(18)), 35.0);
}

#[test]
fn change_font_size_keeps_family() {
    let mut surface = Surface::new(10, 10, FontBook::default()).unwrap();
    surface.set_font(Font::new(30.0, "SegoeUI, sans-serif").unwrap());
    change_font_size(&mut surface, 22.0).unwrap();
    assert_eq!(surface.font().size_px, 22.0);
    assert_eq!(surface.font().family, "SegoeUI, sans-serif");
    assert!(change_font_size(&mut surface, 0.0).is_err());
}

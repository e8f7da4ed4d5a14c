use super::*;
use crate::assets::fonts::FontBook;

fn parse(json: &str) -> RenderOptions {
    serde_json::from_str(json).unwrap()
}

#[test]
fn empty_options_get_every_default() {
    let n = RenderOptions::default().normalize().unwrap();
    assert_eq!(n.theme.name, "code");
    assert_eq!(
        n.card,
        CardStyle {
            border: true,
            rounded: true,
            blur: true
        }
    );
    assert_eq!(n.avatar.image_radius, 0.8);
    assert_eq!(n.avatar.align, AvatarAlign::Left);
    assert_eq!(n.avatar.outline_width, 0.0);
    assert!(n.avatar.border_radius.is_none());
    assert!(n.avatar.image.is_none());
    assert_eq!(n.text.align, TextAlign::Left);
    assert_eq!(n.format, ImageFormat::Png);
}

#[test]
fn explicit_falsy_values_are_kept() {
    let n = parse(
        r#"{
            "card": { "border": false, "rounded": false, "blur": false },
            "avatar": { "outlineWidth": 0, "borderRadius": 0, "align": "right" },
            "text": { "align": "center" },
            "generation": { "format": "image/jpeg" }
        }"#,
    )
    .normalize()
    .unwrap();
    assert_eq!(
        n.card,
        CardStyle {
            border: false,
            rounded: false,
            blur: false
        }
    );
    assert_eq!(n.avatar.border_radius, Some(0.0));
    assert_eq!(n.avatar.align, AvatarAlign::Right);
    assert_eq!(n.text.align, TextAlign::Center);
    assert_eq!(n.format, ImageFormat::Jpeg);
}

#[test]
fn partial_sections_fill_only_missing_fields() {
    let n = parse(r#"{ "card": { "blur": false }, "avatar": { "imageRadius": 0.5 } }"#)
        .normalize()
        .unwrap();
    assert!(n.card.border && n.card.rounded && !n.card.blur);
    assert_eq!(n.avatar.image_radius, 0.5);
}

#[test]
fn theme_names_and_objects() {
    let n = parse(r#"{ "theme": "midnight" }"#).normalize().unwrap();
    assert_eq!(n.theme.name, "midnight");

    let err = parse(r#"{ "theme": "Midnight" }"#).normalize().unwrap_err();
    assert!(matches!(err, CardError::InvalidTheme { ref given, .. } if given == "Midnight"));

    let n = parse(r##"{ "theme": { "color": "#112233", "image": "bg/custom.png", "font": "Mono" } }"##)
        .normalize()
        .unwrap();
    assert_eq!(n.theme.color, Rgba8::rgb(0x11, 0x22, 0x33));
    assert!(matches!(n.theme.background, ImageRef::Locator(ref l) if l == "bg/custom.png"));
    assert_eq!(n.font_family(), "Mono, SegoeUI, SegoeUIEmoji");

    // Neither a string nor a theme object.
    assert!(serde_json::from_str::<RenderOptions>(r#"{ "theme": 5 }"#).is_err());
}

#[test]
fn text_color_and_font_fall_back_to_theme() {
    let n = RenderOptions::default().normalize().unwrap();
    assert_eq!(n.text_color(), Rgba8::WHITE);
    assert_eq!(n.font_family(), "DejaVu Sans Mono, SegoeUI, SegoeUIEmoji");

    let n = parse(r##"{ "theme": "sakura", "text": { "color": "#00ff00" } }"##)
        .normalize()
        .unwrap();
    assert_eq!(n.text_color(), Rgba8::rgb(0, 255, 0));
    assert_eq!(n.font_family(), "SegoeUI, SegoeUI, SegoeUIEmoji");
}

#[test]
fn rejects_unusable_geometry() {
    assert!(parse(r#"{ "avatar": { "imageRadius": -0.1 } }"#).normalize().is_err());
    assert!(parse(r#"{ "avatar": { "outlineWidth": -1 } }"#).normalize().is_err());
    assert!(parse(r#"{ "avatar": { "borderRadius": -0.5 } }"#).normalize().is_err());
}

#[test]
fn zero_image_radius_is_kept() {
    let n = parse(r#"{ "avatar": { "image": "me.png", "imageRadius": 0 } }"#)
        .normalize()
        .unwrap();
    assert_eq!(n.avatar.image_radius, 0.0);
    assert_eq!(n.avatar.radius(CardSize::CARD), 0.0);
}

#[test]
fn avatar_placement_follows_alignment() {
    let size = CardSize::CARD;
    let mut avatar = RenderOptions::default().normalize().unwrap().avatar;
    assert_eq!(avatar.radius(size), 100.0);
    assert_eq!(avatar.origin(size), Point::new(0.0, 25.0));
    avatar.align = AvatarAlign::Center;
    assert_eq!(avatar.origin(size), Point::new(250.0, 25.0));
    avatar.align = AvatarAlign::Right;
    assert_eq!(avatar.origin(size), Point::new(500.0, 25.0));
    avatar.image_radius = 1.0;
    assert_eq!(avatar.origin(size), Point::new(450.0, 0.0));
}

#[test]
fn text_slots_accept_strings_and_objects() {
    let opts = parse(
        r##"{ "text": { "title": "Hi", "subtitle": { "text": "x", "x": 10, "y": 20, "color": "#ff0000" } } }"##,
    );
    let text = opts.text.unwrap();
    assert!(matches!(text.title, Some(TextContent::Plain(ref s)) if s == "Hi"));
    assert!(matches!(text.subtitle, Some(TextContent::Custom(_))));
    assert!(text.text.is_none());
}

#[test]
fn styled_text_restores_surface_state() {
    let mut surface = Surface::new(100, 40, FontBook::default()).unwrap();
    surface.set_fill_color(Rgba8::WHITE);
    let styled = StyledText {
        text: "Hey".to_owned(),
        x: 5.0,
        y: 30.0,
        size: Some(20.0),
        font: None,
        color: Some(Rgba8::rgb(255, 0, 0)),
        align: Some(TextAlign::Left),
    };
    styled.draw(&mut surface).unwrap();
    assert_eq!(surface.fill_color(), Rgba8::WHITE);
    assert_eq!(surface.font(), &Font::default());

    let r = surface.snapshot().unwrap();
    let red = (0..40)
        .flat_map(|y| (0..100).map(move |x| (x, y)))
        .filter_map(|(x, y)| r.pixel(x, y))
        .any(|p| p[3] == 255 && p[0] == 255 && p[1] == 0);
    assert!(red);
}

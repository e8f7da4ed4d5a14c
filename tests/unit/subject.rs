use super::*;

#[test]
fn display_name_defaults_to_tag() {
    let mut member = Member::new("shortname#0001", "avatars/a.png", 42);
    assert_eq!(member.display_name(), "shortname#0001");
    member.display_name = Some("Short".to_owned());
    assert_eq!(member.display_name(), "Short");
    assert_eq!(member.tag(), "shortname#0001");
}

#[test]
fn deserializes_camel_case() {
    let member: Member = serde_json::from_str(
        r#"{"tag":"x#1","avatar":"https://cdn.example.com/a.png","memberCount":7}"#,
    )
    .unwrap();
    assert_eq!(member.member_count(), 7);
    assert!(matches!(member.avatar(), ImageRef::Locator(l) if l.starts_with("https://")));
}

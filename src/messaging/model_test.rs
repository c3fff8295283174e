use super::*;

#[test]
fn label_serializes_with_style_class_and_camel_case() {
    let label = Label {
        id: "l2".into(),
        name: "Sales".into(),
        color: LabelColor::Green,
        sub_labels: vec![SubLabel { id: "sl2-1".into(), name: "Hot Lead".into() }],
    };
    let json = serde_json::to_value(&label).unwrap();
    assert_eq!(json["color"], "bg-green-500");
    assert_eq!(json["subLabels"][0]["name"], "Hot Lead");
}

#[test]
fn chat_deserializes_seed_shape() {
    let raw = r#"{
        "id": "c9",
        "type": "personal",
        "participants": [
            { "id": "u1", "name": "Biz", "avatarUrl": "a", "isTeamMember": true },
            { "id": "u7", "name": "Customer", "avatarUrl": "b" }
        ],
        "labelIds": ["l1"],
        "messages": [
            { "id": "m1", "senderId": "u7", "content": "hi", "timestamp": 5, "type": "text" }
        ]
    }"#;
    let chat: Chat = serde_json::from_str(raw).unwrap();
    assert_eq!(chat.kind, ChatKind::Personal);
    assert_eq!(chat.customer().map(|u| u.id.as_str()), Some("u7"));
    assert!(chat.has_label("l1"));
    assert_eq!(chat.last_message().map(|m| m.kind), Some(MessageKind::Text));
    assert!(chat.name.is_none());
}

#[test]
fn optional_media_fields_are_omitted() {
    let msg = Message {
        id: "m1".into(),
        sender_id: "u1".into(),
        content: "hello".into(),
        timestamp: 0,
        kind: MessageKind::Text,
        media_url: None,
        file_name: None,
    };
    let json = serde_json::to_value(&msg).unwrap();
    assert_eq!(json["type"], "text");
    assert!(json.get("mediaUrl").is_none());
    assert!(json.get("fileName").is_none());
}

#[test]
fn color_parses_from_name_or_class() {
    assert_eq!("pink".parse::<LabelColor>().unwrap(), LabelColor::Pink);
    assert_eq!("bg-indigo-500".parse::<LabelColor>().unwrap(), LabelColor::Indigo);
    assert!("teal".parse::<LabelColor>().is_err());
}

#[test]
fn palette_has_eight_distinct_colors() {
    let names: std::collections::HashSet<_> = LabelColor::PALETTE.iter().map(|c| c.name()).collect();
    assert_eq!(names.len(), 8);
    assert_eq!(LabelColor::default(), LabelColor::Blue);
}

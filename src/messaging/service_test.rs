use super::*;
use crate::messaging::repository::MemoryRepository;
use crate::messaging::seed;

fn setup() -> (Arc<MemoryRepository>, MessageService) {
    let repo = Arc::new(MemoryRepository::new(seed::snapshot_at(1_700_000_000_000)));
    let service = MessageService::new(repo.clone());
    (repo, service)
}

#[test]
fn text_is_stored_as_typed_from_business_account() {
    let (repo, service) = setup();
    let sent = service.send_text("c2", "  123456789  ").unwrap();

    assert_eq!(sent.content, "  123456789  ");
    assert_eq!(sent.sender_id, "u1");
    assert_eq!(sent.kind, MessageKind::Text);
    assert!(sent.id.starts_with('m'));
    assert_eq!(repo.chat("c2").unwrap().last_message(), Some(&sent));
}

#[test]
fn blank_text_is_not_sent() {
    let (repo, service) = setup();
    assert!(matches!(service.send_text("c2", " \n\t "), Err(StoreError::EmptyMessage)));
    assert_eq!(repo.chat("c2").unwrap().messages.len(), 2);
}

#[test]
fn unknown_chat_is_reported() {
    let (_repo, service) = setup();
    assert!(matches!(service.send_text("c77", "hello"), Err(StoreError::UnknownChat(_))));
}

#[test]
fn image_attachment_keeps_caption_and_file() {
    let (_repo, service) = setup();
    let photo = Attachment {
        file_name: "shelf.png".into(),
        mime_type: "image/png".into(),
        media_url: "file:///tmp/shelf.png".into(),
    };
    let sent = service.send_attachment("c1", &photo, "in stock").unwrap();
    assert_eq!(sent.kind, MessageKind::Image);
    assert_eq!(sent.content, "in stock");
    assert_eq!(sent.file_name.as_deref(), Some("shelf.png"));
    assert_eq!(sent.media_url.as_deref(), Some("file:///tmp/shelf.png"));
}

#[test]
fn non_image_attachment_is_a_document() {
    assert_eq!(attachment_kind("application/pdf"), MessageKind::Document);
    assert_eq!(attachment_kind("video/mp4"), MessageKind::Document);
    assert_eq!(attachment_kind("image/jpeg"), MessageKind::Image);
}

#[test]
fn voice_note_is_audio_without_text() {
    let (_repo, service) = setup();
    let clip = VoiceClip::new(vec![1, 2, 3], 1_700_000_123_456);
    let sent = service.send_voice_note("c3", &clip).unwrap();
    assert_eq!(sent.kind, MessageKind::Audio);
    assert_eq!(sent.content, "");
    assert_eq!(sent.file_name.as_deref(), Some("voice-message-1700000123456.webm"));
}

#[test]
fn rapid_sends_get_distinct_ids() {
    let (repo, service) = setup();
    let a = service.send_text("c1", "one").unwrap();
    let b = service.send_text("c1", "two").unwrap();
    assert_ne!(a.id, b.id);
    assert!(b.timestamp > a.timestamp);
    assert_eq!(repo.chat("c1").unwrap().messages.len(), 6);
}

#[test]
fn custom_sender() {
    let (_repo, service) = setup();
    let service = service.with_sender("u5");
    assert_eq!(service.sender_id(), "u5");
    assert_eq!(service.send_text("c4", "on it").unwrap().sender_id, "u5");
}

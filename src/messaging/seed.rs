//! Demo inbox: one business account, customers, a team chat and five labels.
//!
//! Message timestamps are relative to the moment the seed is built.

use super::model::{Chat, ChatKind, Label, LabelColor, Message, MessageKind, Snapshot, SubLabel, User};

/// The business account every outgoing message is sent from.
pub const BUSINESS_USER_ID: &str = "u1";

const MINUTE_MS: i64 = 60 * 1000;
const HOUR_MS: i64 = 60 * MINUTE_MS;

fn user(id: &str, name: &str, seed: &str, is_team_member: bool) -> User {
    User {
        id: id.to_owned(),
        name: name.to_owned(),
        avatar_url: format!("https://picsum.photos/seed/{seed}/200/200"),
        is_team_member,
    }
}

#[must_use]
pub fn users() -> Vec<User> {
    vec![
        user("u1", "My Business WA", "wa-biz", true),
        user("u2", "Nusrat Jahan", "u2", false),
        user("u3", "Rahim Ahmed", "u3", false),
        user("u4", "Fatima Begum", "u4", false),
        user("u5", "Agent Jones", "u5", true),
        user("u6", "Internal Support", "u6", true),
    ]
}

fn label(id: &str, name: &str, color: LabelColor, subs: &[(&str, &str)]) -> Label {
    Label {
        id: id.to_owned(),
        name: name.to_owned(),
        color,
        sub_labels: subs
            .iter()
            .map(|(id, name)| SubLabel { id: (*id).to_owned(), name: (*name).to_owned() })
            .collect(),
    }
}

#[must_use]
pub fn labels() -> Vec<Label> {
    vec![
        label("l1", "New Customer", LabelColor::Blue, &[]),
        label(
            "l2",
            "Sales",
            LabelColor::Green,
            &[("sl2-1", "Hot Lead"), ("sl2-2", "Cold Lead"), ("sl2-3", "Negotiation")],
        ),
        label("l3", "VIP", LabelColor::Yellow, &[]),
        label("l4", "Payment Due", LabelColor::Red, &[]),
        label("l5", "Support", LabelColor::Purple, &[]),
    ]
}

fn text(id: &str, sender: &str, content: &str, timestamp: i64) -> Message {
    Message {
        id: id.to_owned(),
        sender_id: sender.to_owned(),
        content: content.to_owned(),
        timestamp,
        kind: MessageKind::Text,
        media_url: None,
        file_name: None,
    }
}

fn ids(list: &[&str]) -> Vec<String> {
    list.iter().map(|s| (*s).to_owned()).collect()
}

/// Seed chats with timestamps relative to `now_ms`.
#[must_use]
pub fn chats_at(now_ms: i64) -> Vec<Chat> {
    let people = users();
    let pick = |idx: &[usize]| idx.iter().map(|&i| people[i].clone()).collect::<Vec<_>>();

    vec![
        Chat {
            id: "c1".into(),
            kind: ChatKind::Personal,
            participants: pick(&[0, 1]),
            label_ids: ids(&["l1", "l2"]),
            messages: vec![
                text("m1", "u2", "হ্যালো, আমি আপনাদের নতুন প্রোডাক্ট সম্পর্কে জানতে চাই।", now_ms - 5 * MINUTE_MS),
                text(
                    "m2",
                    "u1",
                    "অবশ্যই! আমাদের নতুন OmniConnect প্ল্যাটফর্মটি আপনার ব্যবসায়ের জন্য সেরা সমাধান। আপনি কি জানতে চান?",
                    now_ms - 4 * MINUTE_MS,
                ),
                text("m3", "u2", "এটার দাম কত?", now_ms - 3 * MINUTE_MS),
                Message {
                    kind: MessageKind::Image,
                    media_url: Some("https://picsum.photos/seed/img1/400/300".into()),
                    ..text("m4", "u2", "এই মডেলটা কি স্টকে আছে?", now_ms - 2 * MINUTE_MS)
                },
            ],
            name: None,
            avatar_url: None,
        },
        Chat {
            id: "c2".into(),
            kind: ChatKind::Personal,
            participants: pick(&[0, 2]),
            label_ids: ids(&["l3"]),
            messages: vec![
                text("m5", "u3", "আমার অ্যাকাউন্টে একটি সমস্যা হয়েছে।", now_ms - 2 * HOUR_MS),
                text("m6", "u1", "দুঃখিত আপনার সমস্যার জন্য। আপনার অ্যাকাউন্ট নম্বরটি দিন।", now_ms - HOUR_MS),
            ],
            name: None,
            avatar_url: None,
        },
        Chat {
            id: "c3".into(),
            kind: ChatKind::Personal,
            participants: pick(&[0, 3]),
            label_ids: ids(&["l4"]),
            messages: vec![
                text("m7", "u4", "আমার পেমেন্ট এখনো বাকি আছে?", now_ms - 24 * HOUR_MS),
                text("m8", "u1", "আমি চেক করে জানাচ্ছি।", now_ms - 23 * HOUR_MS),
                Message {
                    kind: MessageKind::Document,
                    media_url: Some("https://example.com/invoice.pdf".into()),
                    file_name: Some("invoice.pdf".into()),
                    ..text("m9", "u1", "আপনার ইনভয়েসটি এখানে।", now_ms - 22 * HOUR_MS)
                },
            ],
            name: None,
            avatar_url: None,
        },
        Chat {
            id: "c4".into(),
            kind: ChatKind::Team,
            participants: pick(&[0, 4, 5]),
            label_ids: Vec::new(),
            messages: vec![
                text("m10", "u1", "Team, we have a new feature request from a VIP client.", now_ms - 30 * MINUTE_MS),
                text("m11", "u5", "What is it?", now_ms - 29 * MINUTE_MS),
            ],
            name: Some("Team Discussion".into()),
            avatar_url: Some("https://picsum.photos/seed/team/200/200".into()),
        },
    ]
}

/// Full seed snapshot stamped against the current clock.
#[must_use]
pub fn snapshot() -> Snapshot {
    snapshot_at(crate::now_ms())
}

#[must_use]
pub fn snapshot_at(now_ms: i64) -> Snapshot {
    Snapshot { users: users(), labels: labels(), chats: chats_at(now_ms) }
}

#[cfg(test)]
#[path = "seed_test.rs"]
mod tests;

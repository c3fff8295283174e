use super::*;
use crate::messaging::model::{LabelColor, User};
use crate::messaging::seed;

fn seed_chats() -> Vec<Chat> {
    seed::chats_at(1_700_000_000_000)
}

fn names<'a>(chats: &[&'a Chat]) -> Vec<&'a str> {
    chats.iter().map(|&c| display_name(c)).collect()
}

fn bare_chat(id: &str, kind: ChatKind, participants: Vec<User>) -> Chat {
    Chat {
        id: id.into(),
        kind,
        participants,
        messages: Vec::new(),
        label_ids: Vec::new(),
        name: None,
        avatar_url: None,
    }
}

#[test]
fn customers_tab_excludes_team_chats() {
    let chats = seed_chats();
    let shown = filter_chats(&chats, ChatTab::Customers, "");
    assert_eq!(names(&shown), ["Nusrat Jahan", "Rahim Ahmed", "Fatima Begum"]);
}

#[test]
fn team_tab_shows_only_team_chats() {
    let chats = seed_chats();
    let shown = filter_chats(&chats, ChatTab::Team, "");
    assert_eq!(names(&shown), ["Team Discussion"]);
}

#[test]
fn search_is_case_insensitive_substring() {
    let chats = seed_chats();
    assert_eq!(names(&filter_chats(&chats, ChatTab::Customers, "RAHIM")), ["Rahim Ahmed"]);
    assert_eq!(names(&filter_chats(&chats, ChatTab::Customers, "ja")), ["Nusrat Jahan"]);
    assert!(filter_chats(&chats, ChatTab::Customers, "team").is_empty());
    assert_eq!(filter_chats(&chats, ChatTab::Team, "disc").len(), 1);
}

#[test]
fn listed_iff_tab_and_name_match() {
    let chats = seed_chats();
    for tab in [ChatTab::Customers, ChatTab::Team] {
        for search in ["", "a", "AH", "x", "Begum", "team"] {
            let shown: Vec<&str> = filter_chats(&chats, tab, search).into_iter().map(|c| c.id.as_str()).collect();
            for chat in &chats {
                let expected = tab.matches(chat.kind)
                    && display_name(chat).to_lowercase().contains(&search.to_lowercase());
                assert_eq!(shown.contains(&chat.id.as_str()), expected, "{tab} / {search:?} / {}", chat.id);
            }
        }
    }
}

#[test]
fn display_name_falls_back_to_unknown() {
    let only_team = seed::users().into_iter().filter(|u| u.is_team_member).collect();
    let chat = bare_chat("cx", ChatKind::Group, only_team);
    assert_eq!(display_name(&chat), UNKNOWN_NAME);
    assert_eq!(avatar_url(&chat), DEFAULT_AVATAR_URL);
}

#[test]
fn empty_chat_name_and_avatar_fall_back_to_customer() {
    let customer = seed::users().into_iter().find(|u| u.id == "u2").unwrap();
    let mut chat = bare_chat("cy", ChatKind::Personal, vec![customer.clone()]);
    chat.name = Some(String::new());
    chat.avatar_url = Some(String::new());
    assert_eq!(display_name(&chat), customer.name);
    assert_eq!(avatar_url(&chat), customer.avatar_url);
}

#[test]
fn group_chats_count_as_customers() {
    assert!(ChatTab::Customers.matches(ChatKind::Group));
    assert!(!ChatTab::Team.matches(ChatKind::Group));
}

#[test]
fn summary_uses_last_message_and_label_order() {
    let chats = seed_chats();
    let mut labels = seed::labels();
    labels.reverse();
    let summary = summarize(&chats[0], &labels);

    assert_eq!(summary.name, "Nusrat Jahan");
    assert_eq!(summary.avatar_url, "https://picsum.photos/seed/u2/200/200");
    assert_eq!(summary.preview, "এই মডেলটা কি স্টকে আছে?");
    assert!(summary.time.is_some());
    let ids: Vec<_> = summary.labels.iter().map(|l| l.id.as_str()).collect();
    assert_eq!(ids, ["l2", "l1"]);
    assert_eq!(summary.pill().map(|l| l.color), Some(LabelColor::Green));
}

#[test]
fn summary_of_empty_chat() {
    let chat = bare_chat("cy", ChatKind::Personal, seed::users());
    let summary = summarize(&chat, &seed::labels());
    assert_eq!(summary.preview, NO_MESSAGES_PREVIEW);
    assert_eq!(summary.time, None);
    assert!(summary.pill().is_none());
}

#[test]
fn label_membership_queries() {
    let chats = seed_chats();
    assert_eq!(label_chat_count(&chats, "l1"), 1);
    assert_eq!(label_chat_count(&chats, "l5"), 0);
    let with_vip: Vec<_> = chats_with_label(&chats, "l3").iter().map(|c| c.id.clone()).collect();
    assert_eq!(with_vip, ["c2"]);
}

#[test]
fn clock_formatting() {
    assert_eq!(format_clock(0), "00:00");
    assert_eq!(format_clock((13 * 60 + 7) * 60_000 + 59_999), "13:07");
    assert_eq!(format_clock(-60_000), "23:59");
}

#[test]
fn tab_parsing() {
    assert_eq!("Team".parse::<ChatTab>().unwrap(), ChatTab::Team);
    assert_eq!("customers".parse::<ChatTab>().unwrap(), ChatTab::Customers);
    assert!("archived".parse::<ChatTab>().is_err());
}

use super::BubbleList;
use crate::domain::models::Author;
use crate::domain::models::Message;
use crate::domain::services::Themes;

#[test]
fn it_has_no_cached_lines() {
    let theme = Themes::get("dusk").unwrap();
    let bubble_list = BubbleList::new(theme);

    assert_eq!(bubble_list.cache.len(), 0);
    assert_eq!(bubble_list.len(), 0);
}

#[test]
fn it_caches_lines_per_message() {
    let theme = Themes::get("dusk").unwrap();
    let messages = vec![
        Message::new(1, Author::Confab, "Hi there!"),
        Message::new(2, Author::Agent, "Hello!"),
    ];

    let mut bubble_list = BubbleList::new(theme);
    bubble_list.set_messages(&messages, 50, false);

    assert_eq!(bubble_list.cache.len(), 2);
    assert_eq!(bubble_list.len(), 6);
}

#[test]
fn it_counts_trace_lines_when_traces_are_shown() {
    let theme = Themes::get("dusk").unwrap();
    let messages = vec![Message::new_with_trace(1, Author::Agent, "Hi!", "stage one")];

    let mut bubble_list = BubbleList::new(theme);
    bubble_list.set_messages(&messages, 50, false);
    assert_eq!(bubble_list.len(), 3);

    bubble_list.set_messages(&messages, 50, true);
    assert_eq!(bubble_list.len(), 5);
}

#[test]
fn it_drops_cache_entries_for_replaced_messages() {
    let theme = Themes::get("dusk").unwrap();
    let before = vec![
        Message::new(1, Author::User, "one"),
        Message::new(2, Author::Agent, "two"),
    ];
    let after = vec![Message::new(3, Author::User, "restored")];

    let mut bubble_list = BubbleList::new(theme);
    bubble_list.set_messages(&before, 50, false);
    assert_eq!(bubble_list.cache.len(), 2);

    bubble_list.set_messages(&after, 50, false);
    assert_eq!(bubble_list.cache.len(), 1);
    assert!(bubble_list.cache.contains_key(&3));
}

#[test]
fn it_invalidates_the_cache_on_width_changes() {
    let theme = Themes::get("dusk").unwrap();
    let messages = vec![Message::new(
        1,
        Author::Agent,
        "a reply that is long enough to wrap at narrow widths but not at wide ones",
    )];

    let mut bubble_list = BubbleList::new(theme);
    bubble_list.set_messages(&messages, 100, false);
    let wide_len = bubble_list.len();

    bubble_list.set_messages(&messages, 30, false);
    assert!(bubble_list.len() > wide_len);
}

use charge_edit::buffer::TextBuffer;
use charge_edit::search::{self, FindOutcome, SearchQuery};

#[test]
fn find_cycles_through_matches() {
    let mut buffer = TextBuffer::from_text("cat dog cat");
    let query = SearchQuery::literal("cat");

    let first = search::find_in_buffer(&mut buffer, &query);
    assert_eq!(first.totals_text(), "1 of 2");

    let second = search::find_in_buffer(&mut buffer, &query);
    assert_eq!(second.totals_text(), "2 of 2");

    let third = search::find_in_buffer(&mut buffer, &query);
    assert_eq!(third.totals_text(), "1 of 2");
    assert_eq!(buffer.selection().start, 0);
}

#[test]
fn find_wraps_when_nothing_follows_cursor() {
    let mut buffer = TextBuffer::from_text("cat dog cat dog");
    buffer.set_cursor(12);
    match search::find_in_buffer(&mut buffer, &SearchQuery::literal("cat")) {
        FindOutcome::Found(result) => {
            assert_eq!(result.start, 0);
            assert_eq!(result.match_num, 1);
            assert!(result.wrapped);
        }
        other => panic!("expected wrap, got {:?}", other),
    }
}

#[test]
fn replace_walks_occurrences_one_by_one() {
    let mut buffer = TextBuffer::from_text("foo bar foo");
    let query = SearchQuery::literal("foo");

    // 何も選択していなければ置換せず最初のマッチを選ぶだけ
    let outcome = search::replace_in_buffer(&mut buffer, &query, "baz");
    assert!(!outcome.replaced);
    assert_eq!(buffer.as_str(), "foo bar foo");
    assert_eq!(buffer.selected_text(), "foo");

    let outcome = search::replace_in_buffer(&mut buffer, &query, "baz");
    assert!(outcome.replaced);
    assert_eq!(buffer.as_str(), "baz bar foo");
    assert_eq!(outcome.next.totals_text(), "1 of 1");

    let outcome = search::replace_in_buffer(&mut buffer, &query, "baz");
    assert!(outcome.replaced);
    assert_eq!(buffer.as_str(), "baz bar baz");
    assert_eq!(outcome.next, FindOutcome::NotFound);
}

#[test]
fn literal_mode_does_not_interpret_pattern() {
    let mut buffer = TextBuffer::from_text("f(x) = a.b");
    let outcome = search::find_in_buffer(&mut buffer, &SearchQuery::literal("("));
    assert_eq!(outcome.totals_text(), "1 of 1");
    assert_eq!(buffer.selected_text(), "(");

    let outcome = search::find_in_buffer(&mut buffer, &SearchQuery::regex("("));
    assert!(matches!(outcome, FindOutcome::Invalid(_)));
}

#[test]
fn regex_mode_matches_case_insensitively() {
    let mut buffer = TextBuffer::from_text("Error: 1\nerror: 22");
    let query = SearchQuery::regex(r"error: \d+");
    let outcome = search::find_in_buffer(&mut buffer, &query);
    assert_eq!(outcome.totals_text(), "1 of 2");
    assert_eq!(buffer.selected_text(), "Error: 1");
}

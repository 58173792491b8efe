//! TextBuffer / indent / cursor の性質テスト

use charge_edit::buffer::{indent, CursorStatus, TextBuffer};
use proptest::prelude::*;
use proptest::test_runner::Config as ProptestConfig;

fn text_strategy() -> impl Strategy<Value = String> {
    proptest::collection::vec(prop_oneof![Just('\n'), Just(' '), Just('a'), Just('あ')], 0..64)
        .prop_map(|chars| chars.into_iter().collect::<String>())
}

proptest! {
    #![proptest_config(ProptestConfig { cases: 128, .. ProptestConfig::default() })]

    #[test]
    fn line_and_column_are_one_based(text in text_strategy(), cursor in 0usize..80) {
        let status = CursorStatus::compute(&text, cursor);
        prop_assert!(status.line >= 1);
        prop_assert!(status.column >= 1);
        prop_assert_eq!(status.total_lines, text.matches('\n').count() + 1);
        prop_assert!(status.line <= status.total_lines);
    }

    #[test]
    fn tab_inserts_width_spaces_at_cursor(text in text_strategy(), cursor in 0usize..80, width in 1usize..9) {
        let mut buffer = TextBuffer::from_text(text.clone());
        buffer.set_cursor(cursor);
        let k = buffer.cursor();

        indent::insert_tab(&mut buffer, width);

        let expected: String = text
            .chars()
            .take(k)
            .chain(std::iter::repeat(' ').take(width))
            .chain(text.chars().skip(k))
            .collect();
        prop_assert_eq!(buffer.as_str(), expected.as_str());
        prop_assert_eq!(buffer.cursor(), k + width);
    }

    #[test]
    fn tab_then_backspace_restores_text(text in text_strategy(), cursor in 0usize..80, width in 1usize..9) {
        let mut buffer = TextBuffer::from_text(text.clone());
        buffer.set_cursor(cursor);
        let k = buffer.cursor();

        indent::insert_tab(&mut buffer, width);
        prop_assert!(indent::backspace(&mut buffer, width, true));

        prop_assert_eq!(buffer.as_str(), text.as_str());
        prop_assert_eq!(buffer.cursor(), k);
    }

    #[test]
    fn newline_keeps_whole_indent_groups(groups in 0usize..4, extra in 0usize..4, width in 1usize..6) {
        let extra = extra % width;
        let line = format!("{}{}x", " ".repeat(groups * width), " ".repeat(extra));
        let mut buffer = TextBuffer::from_text(line.clone());
        buffer.set_cursor(line.chars().count());

        indent::newline(&mut buffer, width, true);

        let expected = format!("{}\n{}", line, " ".repeat(groups * width));
        prop_assert_eq!(buffer.as_str(), expected.as_str());
    }
}

#[test]
fn tab_in_ab_at_every_offset() {
    for k in 0..=2 {
        let mut buffer = TextBuffer::from_text("ab");
        buffer.set_cursor(k);
        indent::insert_tab(&mut buffer, 4);
        let expected: String = "ab"
            .chars()
            .take(k)
            .chain("    ".chars())
            .chain("ab".chars().skip(k))
            .collect();
        assert_eq!(buffer.as_str(), expected);
        assert_eq!(buffer.cursor(), k + 4);
    }
}

#[test]
fn backspace_removes_group_or_single_space() {
    let mut four = TextBuffer::from_text("x    ");
    four.set_cursor(5);
    indent::backspace(&mut four, 4, true);
    assert_eq!(four.as_str(), "x");

    let mut three = TextBuffer::from_text("x   ");
    three.set_cursor(4);
    indent::backspace(&mut three, 4, true);
    assert_eq!(three.as_str(), "x  ");
}

#[test]
fn enter_carries_one_indent_level() {
    let mut buffer = TextBuffer::from_text("    foo");
    buffer.set_cursor(7);
    indent::newline(&mut buffer, 4, true);
    assert_eq!(buffer.as_str(), "    foo\n    ");
    assert_eq!(buffer.cursor(), 12);
}

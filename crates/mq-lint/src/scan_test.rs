use super::*;

#[test]
fn test_line_number() {
    let content = "first\nsecond\nthird";
    assert_eq!(line_number(content, 0), 1);
    assert_eq!(line_number(content, 6), 2);
    assert_eq!(line_number(content, content.len()), 3);
}

#[test]
fn test_lookahead_is_bounded() {
    let content = "x".repeat(1000);
    assert_eq!(lookahead(&content, 10).len(), LOOKAHEAD_CHARS);
    assert_eq!(lookahead(&content, 900).len(), 100);
}

#[test]
fn test_lookahead_respects_char_boundaries() {
    let content = "é".repeat(400);
    let window = lookahead(&content, 0);
    assert_eq!(window.chars().count(), LOOKAHEAD_CHARS);
}

#[test]
fn test_excerpt_trims_line() {
    let content = "a\n    DROP TABLE users;  \nb";
    assert_eq!(excerpt(content, 6), "DROP TABLE users;");
}

#[test]
fn test_excerpt_truncates_long_lines() {
    let content = format!("DROP TABLE {}", "t".repeat(200));
    let text = excerpt(&content, 0);
    assert!(text.ends_with("..."));
    assert_eq!(text.chars().count(), EXCERPT_CHARS + 3);
}

#[test]
fn test_scan_filters_on_window() {
    let record = crate::test_utils::record("0001", "op.call(a=1)\nop.call(b=2)\n");
    let pattern = Regex::new(r"\bop\.call\b").unwrap();

    let hits = scan(&record, &pattern, "call", |_, window| {
        window.starts_with("op.call(b")
    });
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].line, 2);
    assert_eq!(hits[0].message, "call: op.call(b=2)");

    assert_eq!(scan_all(&record, &pattern, "call").len(), 2);
}

#![allow(clippy::float_cmp)]

use super::*;

#[test]
fn new_session_has_empty_draft() {
    let s = TextSession::new(Point::new(10.0, 20.0), "#ff0000", 24.0);
    assert!(s.draft.is_empty());
    assert_eq!(s.color, "#ff0000");
    assert_eq!(s.size, 24.0);
}

#[test]
fn empty_draft_is_discarded() {
    let s = TextSession::new(Point::new(0.0, 0.0), "#000000", 20.0);
    assert!(s.into_shape().is_none());
}

#[test]
fn whitespace_draft_is_discarded() {
    let mut s = TextSession::new(Point::new(0.0, 0.0), "#000000", 20.0);
    s.set_draft("  \n\t ");
    assert!(s.into_shape().is_none());
}

#[test]
fn draft_is_committed_at_anchor() {
    let mut s = TextSession::new(Point::new(7.0, 9.0), "#000000", 20.0);
    s.set_draft("hel");
    s.set_draft("hello");
    assert_eq!(s.into_shape(), Some(Shape::Text { x: 7.0, y: 9.0, text: "hello".into() }));
}

#[test]
fn committed_text_keeps_inner_whitespace() {
    let mut s = TextSession::new(Point::new(0.0, 0.0), "#000000", 20.0);
    s.set_draft(" two words ");
    assert_eq!(s.into_shape(), Some(Shape::Text { x: 0.0, y: 0.0, text: " two words ".into() }));
}

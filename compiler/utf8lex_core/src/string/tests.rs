use super::*;
use pretty_assertions::assert_eq;

#[test]
fn from_str_fills_to_capacity() {
    let s = ByteString::from("héllo");
    assert_eq!(s.len(), 6);
    assert_eq!(s.max_capacity(), 6);
    assert_eq!(s.as_bytes(), "héllo".as_bytes());
}

#[test]
fn push_within_capacity() {
    let mut s = ByteString::with_capacity(8);
    assert!(s.is_empty());
    s.push_str("abc").unwrap();
    s.push_bytes(b"de").unwrap();
    assert_eq!(s.as_bytes(), b"abcde");
}

#[test]
fn push_past_capacity_is_bad_length() {
    let mut s = ByteString::with_capacity(4);
    s.push_str("abc").unwrap();
    let error = s.push_str("de").unwrap_err();
    assert_eq!(error.code, ErrorCode::BadLength);
    assert_eq!(error.offset, Some(5));
    assert_eq!(s.as_bytes(), b"abc");
}

#[test]
fn prepend_grows_capacity() {
    let mut s = ByteString::from("cd");
    s.prepend(b"ab");
    assert_eq!(s.as_bytes(), b"abcd");
    assert_eq!(s.max_capacity(), 4);
    s.truncate(1);
    assert_eq!(s.as_bytes(), b"a");
}

#[test]
fn debug_is_lossy() {
    let s = ByteString::from(vec![b'a', 0xFF]);
    assert_eq!(format!("{s:?}"), "ByteString(\"a\u{FFFD}\", 2/2)");
}

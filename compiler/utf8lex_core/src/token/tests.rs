use super::*;
use pretty_assertions::assert_eq;

fn leaf(name: &str, text: &str, start: usize) -> Token {
    let mut loc = Locations::starting_at([start, start, start, 0]);
    for unit in crate::location::Unit::ALL.into_iter().take(3) {
        loc[unit].length = text.chars().count();
    }
    Token {
        rule: RuleId::new(0),
        definition: DefinitionId::new(0),
        name: Arc::from(name),
        loc,
        bytes: text.as_bytes().to_vec(),
        sub_tokens: Vec::new(),
    }
}

#[test]
fn copy_string_into_large_enough_buffer() {
    let token = leaf("id", "first_name", 0);
    let mut dest = [0u8; 16];
    assert_eq!(token.copy_string(&mut dest).unwrap(), 10);
    assert_eq!(&dest[..10], b"first_name");
}

#[test]
fn copy_string_too_small_is_bad_length() {
    let token = leaf("id", "first_name", 0);
    let mut dest = [0u8; 4];
    let error = token.copy_string(&mut dest).unwrap_err();
    assert_eq!(error.code, ErrorCode::BadLength);
    assert_eq!(dest, [0u8; 4]);
}

#[test]
fn sub_token_lookup_by_name_and_index() {
    let mut token = leaf("assign", "a=1", 0);
    token.sub_tokens = vec![leaf("id", "a", 0), leaf("op", "=", 1), leaf("id", "1", 2)];

    assert_eq!(token.sub_token("id", 0).unwrap().text(), "a");
    assert_eq!(token.sub_token("id", 1).unwrap().text(), "1");
    assert_eq!(token.sub_token("op", 0).unwrap().loc[crate::location::Unit::Byte].start, 1);
    assert_eq!(
        token.sub_token("id", 2).unwrap_err().code,
        ErrorCode::NotFound
    );
    assert_eq!(
        sub_token_find(&token.sub_tokens, "missing", 0).unwrap_err().code,
        ErrorCode::NotFound
    );
}

#[test]
fn display_shows_name_text_and_location() {
    let token = leaf("number", "42", 3);
    assert_eq!(
        token.to_string(),
        "number \"42\" (byte 3+2, char 3+2, grapheme 3+2, line 0+0)"
    );
}

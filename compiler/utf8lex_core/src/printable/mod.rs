//! Display-safe rendering of token bytes.
//!
//! [`printable_str`] escapes backslashes, quotes, C-style control sequences
//! and undecodable bytes so arbitrary input can be shown on one line.
//! [`unescape_printable`] reverses it.
//!
//! | Input | Output |
//! |---|---|
//! | `\` | `\\` |
//! | `"` / `'` | `\"` / `\'` (with the matching flag) |
//! | NUL, BEL, BS, HT, LF, VT, FF, CR | `\0 \a \b \t \n \v \f \r` |
//! | other ASCII control, undecodable byte | `\xHH` |
//! | C1 control, or non-ASCII with [`PrintableFlags::ASCII_ONLY`] | `\u{HHHH}` |

use std::fmt::Write;

use bitflags::bitflags;

use crate::error::{ErrorCode, LexError, LexResult};

bitflags! {
    /// Escaping options for [`printable_str`].
    #[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, Default)]
    pub struct PrintableFlags: u8 {
        /// Escape `"`.
        const DOUBLE_QUOTE = 1 << 0;
        /// Escape `'`.
        const SINGLE_QUOTE = 1 << 1;
        /// Leave LF and CR as they are.
        const RAW_NEWLINES = 1 << 2;
        /// Escape every non-ASCII code point.
        const ASCII_ONLY = 1 << 3;
    }
}

const HEX: &[u8; 16] = b"0123456789ABCDEF";

fn push_hex_byte(out: &mut String, byte: u8) {
    out.push_str("\\x");
    out.push(char::from(HEX[usize::from(byte >> 4)]));
    out.push(char::from(HEX[usize::from(byte & 0xF)]));
}

fn escape_char(c: char, flags: PrintableFlags, out: &mut String) {
    match c {
        '\\' => out.push_str("\\\\"),
        '"' if flags.contains(PrintableFlags::DOUBLE_QUOTE) => out.push_str("\\\""),
        '\'' if flags.contains(PrintableFlags::SINGLE_QUOTE) => out.push_str("\\'"),
        '\n' | '\r' if flags.contains(PrintableFlags::RAW_NEWLINES) => out.push(c),
        '\0' => out.push_str("\\0"),
        '\u{07}' => out.push_str("\\a"),
        '\u{08}' => out.push_str("\\b"),
        '\t' => out.push_str("\\t"),
        '\n' => out.push_str("\\n"),
        '\u{0B}' => out.push_str("\\v"),
        '\u{0C}' => out.push_str("\\f"),
        '\r' => out.push_str("\\r"),
        c if c.is_ascii_control() => push_hex_byte(out, u8::try_from(c).unwrap_or(0)),
        c if c.is_control() || (!c.is_ascii() && flags.contains(PrintableFlags::ASCII_ONLY)) => {
            let _ = write!(out, "\\u{{{:X}}}", u32::from(c));
        }
        c => out.push(c),
    }
}

/// Append the escaped form of `src` to `dest`, writing at most `max_bytes`.
///
/// Escapes are never split. When the next one does not fit, rendering stops
/// with `MORE`; the error offset is the number of `src` bytes rendered.
pub fn printable_str(
    dest: &mut String,
    max_bytes: usize,
    src: &[u8],
    flags: PrintableFlags,
) -> LexResult<()> {
    let mut written = 0;
    let mut consumed = 0;
    let mut piece = String::with_capacity(12);

    let mut emit = |piece: &str, consumed: usize| -> LexResult<()> {
        if written + piece.len() > max_bytes {
            return Err(LexError::at(ErrorCode::More, consumed));
        }
        dest.push_str(piece);
        written += piece.len();
        Ok(())
    };

    for chunk in src.utf8_chunks() {
        for c in chunk.valid().chars() {
            piece.clear();
            escape_char(c, flags, &mut piece);
            emit(&piece, consumed)?;
            consumed += c.len_utf8();
        }
        for &byte in chunk.invalid() {
            piece.clear();
            push_hex_byte(&mut piece, byte);
            emit(&piece, consumed)?;
            consumed += 1;
        }
    }
    Ok(())
}

/// Escape all of `src` into a new string.
pub fn printable(src: &[u8], flags: PrintableFlags) -> String {
    let mut out = String::with_capacity(src.len());
    // Unbounded: cannot truncate.
    let _ = printable_str(&mut out, usize::MAX, src, flags);
    out
}

fn bad_escape(offset: usize) -> LexError {
    LexError::with_detail(ErrorCode::BadUtf8, "invalid escape sequence").with_offset(offset)
}

/// Decode the output of [`printable_str`] back into bytes.
///
/// Fails with `BAD_UTF8` at the offset of a malformed escape.
pub fn unescape_printable(src: &str) -> LexResult<Vec<u8>> {
    let mut out = Vec::with_capacity(src.len());
    let mut chars = src.char_indices();

    while let Some((at, c)) = chars.next() {
        if c != '\\' {
            out.extend_from_slice(c.encode_utf8(&mut [0; 4]).as_bytes());
            continue;
        }
        let Some((_, escape)) = chars.next() else {
            return Err(bad_escape(at));
        };
        let byte = match escape {
            '\\' => b'\\',
            '"' => b'"',
            '\'' => b'\'',
            '0' => 0,
            'a' => 0x07,
            'b' => 0x08,
            't' => b'\t',
            'n' => b'\n',
            'v' => 0x0B,
            'f' => 0x0C,
            'r' => b'\r',
            'x' => {
                let mut value = 0u32;
                for _ in 0..2 {
                    let digit = chars
                        .next()
                        .and_then(|(_, d)| d.to_digit(16))
                        .ok_or_else(|| bad_escape(at))?;
                    value = value * 16 + digit;
                }
                u8::try_from(value).map_err(|_| bad_escape(at))?
            }
            'u' => {
                if chars.next().map(|(_, open)| open) != Some('{') {
                    return Err(bad_escape(at));
                }
                let mut value = 0u32;
                let mut digits = 0;
                loop {
                    match chars.next() {
                        Some((_, '}')) if digits > 0 => break,
                        Some((_, d)) if digits < 6 => {
                            value = value * 16 + d.to_digit(16).ok_or_else(|| bad_escape(at))?;
                            digits += 1;
                        }
                        _ => return Err(bad_escape(at)),
                    }
                }
                let decoded = char::from_u32(value).ok_or_else(|| bad_escape(at))?;
                out.extend_from_slice(decoded.encode_utf8(&mut [0; 4]).as_bytes());
                continue;
            }
            _ => return Err(bad_escape(at)),
        };
        out.push(byte);
    }
    Ok(out)
}

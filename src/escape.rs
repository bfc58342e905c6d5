//! Escape handling for CEF fields
//!
//! CEF uses two escaping grammars depending on where a string lands:
//! - Header fields: `\` becomes `\\` and `|` becomes `\|`
//! - Extension keys and values: newline becomes `\n`, carriage return
//!   becomes `\r`, `=` becomes `\=` and `\` becomes `\\`
//!
//! Both run as a single pass over the original characters, so escaped
//! output is never escaped again. Applying either function twice to the
//! same value is a bug.

use std::borrow::Cow;

const CEF_ESCAPE: char = '\\';
const CEF_HEADER_DELIM: char = '|';
const CEF_EXT_ASSIGN: char = '=';

/// Escape a header field (zero-copy when no escaping needed)
pub fn escape_header_field_cow(field: &str) -> Cow<'_, str> {
    // Fast path: check if any escaping is needed
    if !field.contains(|c: char| matches!(c, CEF_ESCAPE | CEF_HEADER_DELIM)) {
        return Cow::Borrowed(field);
    }

    let mut out = String::with_capacity(field.len() + 8);
    for ch in field.chars() {
        if matches!(ch, CEF_ESCAPE | CEF_HEADER_DELIM) {
            out.push(CEF_ESCAPE);
        }
        out.push(ch);
    }
    Cow::Owned(out)
}

/// Escape a header field (always allocates)
pub fn escape_header_field(field: &str) -> String {
    escape_header_field_cow(field).into_owned()
}

/// Escape an extension key or value (zero-copy when no escaping needed)
pub fn escape_extension_field_cow(field: &str) -> Cow<'_, str> {
    if !field.contains(|c: char| matches!(c, '\n' | '\r' | CEF_EXT_ASSIGN | CEF_ESCAPE)) {
        return Cow::Borrowed(field);
    }

    let mut out = String::with_capacity(field.len() + 8);
    for ch in field.chars() {
        match ch {
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            CEF_EXT_ASSIGN => out.push_str("\\="),
            CEF_ESCAPE => out.push_str("\\\\"),
            _ => out.push(ch),
        }
    }
    Cow::Owned(out)
}

/// Escape an extension key or value (always allocates)
pub fn escape_extension_field(field: &str) -> String {
    escape_extension_field_cow(field).into_owned()
}

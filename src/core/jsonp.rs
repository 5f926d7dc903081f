use serde_json::Value;

use crate::utils::error::{MobilityError, Result};

/// Strips the JSONP `callback(...)` envelope and parses the interior.
///
/// The service escapes non-ASCII text as `\uXXXX`, so the raw body is
/// decoded first; the payload is then located between the first `(` and
/// the last `)` by explicit delimiter scanning. Anything malformed is a
/// hard error for the caller, never silently swallowed.
pub fn unwrap(raw: &str) -> Result<Value> {
    let decoded = decode_unicode_escapes(raw);

    let open = decoded
        .find('(')
        .ok_or_else(|| malformed("no opening parenthesis"))?;
    let close = decoded
        .rfind(')')
        .ok_or_else(|| malformed("no closing parenthesis"))?;
    if close < open {
        return Err(malformed("closing parenthesis precedes the opening one"));
    }

    serde_json::from_str(&decoded[open + 1..close])
        .map_err(|e| malformed(&format!("payload is not valid JSON: {e}")))
}

fn malformed(message: &str) -> MobilityError {
    MobilityError::MalformedResponse {
        message: message.to_string(),
    }
}

/// Decodes `\uXXXX` escape sequences, including surrogate pairs.
/// Malformed escapes are left verbatim.
pub fn decode_unicode_escapes(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    let mut rest = raw;
    while let Some(at) = rest.find("\\u") {
        out.push_str(&rest[..at]);
        let tail = &rest[at..];
        match take_escape(tail) {
            Some((ch, used)) => {
                out.push(ch);
                rest = &tail[used..];
            }
            None => {
                out.push_str("\\u");
                rest = &tail[2..];
            }
        }
    }
    out.push_str(rest);
    out
}

/// Reads one escape starting at `\u`. Returns the decoded character and
/// how many input bytes it consumed (6, or 12 for a surrogate pair).
fn take_escape(text: &str) -> Option<(char, usize)> {
    let high = u32::from_str_radix(text.get(2..6)?, 16).ok()?;
    if (0xD800..0xDC00).contains(&high) {
        if text.get(6..8)? != "\\u" {
            return None;
        }
        let low = u32::from_str_radix(text.get(8..12)?, 16).ok()?;
        if !(0xDC00..0xE000).contains(&low) {
            return None;
        }
        let combined = 0x10000 + ((high - 0xD800) << 10) + (low - 0xDC00);
        return char::from_u32(combined).map(|ch| (ch, 12));
    }
    char::from_u32(high).map(|ch| (ch, 6))
}

//! Percent-encoding and decoding.

pub(crate) mod table;

use self::table::Table;
use crate::{error::UriError, ParseFlags};

/// What to do with a valid percent-encoded octet.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Mode {
    /// Decode every octet to its raw byte.
    DecodeAll,
    /// Decode only unreserved octets; re-emit the rest with uppercase
    /// hex digits.
    Normalize,
}

/// Failure inside the codec, before it is attributed to a component.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum DecodeError {
    /// A `%` not followed by two hex digits, under strict parsing.
    Escape,
    /// Decoded bytes were not valid UTF-8, under `UTF8_ONLY`.
    Utf8,
}

impl DecodeError {
    /// Attributes this failure to the component being decoded.
    pub(crate) fn into_uri(self, component: UriError) -> UriError {
        match self {
            DecodeError::Escape => UriError::Misc,
            DecodeError::Utf8 => component,
        }
    }
}

const fn hex_digit(b: u8) -> Option<u8> {
    match b {
        b'0'..=b'9' => Some(b - b'0'),
        b'A'..=b'F' => Some(b - b'A' + 10),
        b'a'..=b'f' => Some(b - b'a' + 10),
        _ => None,
    }
}

/// Decodes the percent-escapes of `part` into raw bytes.
///
/// A `%` not introducing a valid escape is an error under `STRICT` and is
/// passed through as a literal byte otherwise.
pub(crate) fn decode_bytes(
    part: &str,
    mode: Mode,
    flags: ParseFlags,
) -> Result<Vec<u8>, DecodeError> {
    let s = part.as_bytes();
    let mut out = Vec::with_capacity(s.len());
    let mut i = 0;
    while i < s.len() {
        let x = s[i];
        if x != b'%' {
            out.push(x);
            i += 1;
            continue;
        }
        let octet = if i + 2 < s.len() {
            match (hex_digit(s[i + 1]), hex_digit(s[i + 2])) {
                (Some(hi), Some(lo)) => Some((hi << 4) | lo),
                _ => None,
            }
        } else {
            None
        };
        match octet {
            Some(octet) => {
                if mode == Mode::DecodeAll || table::UNRESERVED.allows(octet) {
                    out.push(octet);
                } else {
                    out.push(b'%');
                    out.push(s[i + 1].to_ascii_uppercase());
                    out.push(s[i + 2].to_ascii_uppercase());
                }
                i += 3;
            }
            None => {
                if flags.contains(ParseFlags::STRICT) {
                    return Err(DecodeError::Escape);
                }
                out.push(b'%');
                i += 1;
            }
        }
    }
    Ok(out)
}

/// Decodes `part` into a string, applying the UTF-8 policy.
///
/// Invalid byte sequences are re-escaped in place unless `UTF8_ONLY` is
/// set, in which case they are an error.
pub(crate) fn decode_part(
    part: &str,
    mode: Mode,
    flags: ParseFlags,
) -> Result<String, DecodeError> {
    let bytes = decode_bytes(part, mode, flags)?;
    match String::from_utf8(bytes) {
        Ok(s) => Ok(s),
        Err(_) if flags.contains(ParseFlags::UTF8_ONLY) => Err(DecodeError::Utf8),
        Err(e) => {
            let bytes = e.into_bytes();
            let mut out = String::with_capacity(bytes.len());
            let mut rest = &bytes[..];
            loop {
                match std::str::from_utf8(rest) {
                    Ok(s) => {
                        out.push_str(s);
                        break;
                    }
                    Err(e) => {
                        let (valid, after) = rest.split_at(e.valid_up_to());
                        // SAFETY: `valid_up_to` bytes are known valid UTF-8.
                        out.push_str(unsafe { std::str::from_utf8_unchecked(valid) });
                        let bad = e.error_len().unwrap_or(after.len());
                        for &x in &after[..bad] {
                            table::encode_byte(x, &mut out);
                        }
                        rest = &after[bad..];
                    }
                }
            }
            Ok(out)
        }
    }
}

/// Appends `s` to the buffer, percent-encoding bytes the table disallows.
pub(crate) fn encode_to(buf: &mut String, s: &str, table: &Table) {
    for &x in s.as_bytes() {
        table.encode(x, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn decode(part: &str, mode: Mode, flags: ParseFlags) -> Result<String, DecodeError> {
        decode_part(part, mode, flags)
    }

    #[test]
    fn normalize_decodes_unreserved_only() {
        let out = decode("%41%2F", Mode::Normalize, ParseFlags::empty()).unwrap();
        assert_eq!(out, "A%2F");
    }

    #[test]
    fn normalize_uppercases_kept_escapes() {
        let out = decode("%3a%2f", Mode::Normalize, ParseFlags::empty()).unwrap();
        assert_eq!(out, "%3A%2F");
    }

    #[test]
    fn decode_all_decodes_everything() {
        let out = decode("%41%2F", Mode::DecodeAll, ParseFlags::empty()).unwrap();
        assert_eq!(out, "A/");
    }

    #[test]
    fn stray_percent_strict_and_lenient() {
        assert_eq!(
            decode("a%zzb", Mode::DecodeAll, ParseFlags::STRICT),
            Err(DecodeError::Escape)
        );
        let out = decode("a%zzb", Mode::DecodeAll, ParseFlags::empty()).unwrap();
        assert_eq!(out, "a%zzb");
    }

    #[test]
    fn invalid_utf8_is_reescaped() {
        let out = decode("a%FFb", Mode::DecodeAll, ParseFlags::empty()).unwrap();
        assert_eq!(out, "a%FFb");
        assert_eq!(
            decode("a%FFb", Mode::DecodeAll, ParseFlags::UTF8_ONLY),
            Err(DecodeError::Utf8)
        );
    }
}

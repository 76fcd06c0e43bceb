//! Parsing `attr=value` parameter lists.

use crate::{
    encoding::{decode_part, Mode},
    ParseFlags,
};
use std::collections::HashMap;

/// Parses a list of `attr=value` pairs into a map.
///
/// Pairs are separated by `separator`; a trailing separator is allowed.
/// Both attributes and values are fully percent-decoded. When
/// `case_insensitive` is set, attribute names are folded to ASCII
/// lowercase, so later pairs overwrite earlier ones that differ only in
/// case.
///
/// Returns `None` when any pair lacks an `=`.
///
/// # Examples
///
/// ```
/// use pliant_uri::parse_params;
///
/// let map = parse_params("a=1&b=2", '&', false).unwrap();
/// assert_eq!(map["a"], "1");
/// assert_eq!(map["b"], "2");
///
/// assert!(parse_params("a=1&borked", '&', false).is_none());
/// ```
#[must_use]
pub fn parse_params(
    params: &str,
    separator: char,
    case_insensitive: bool,
) -> Option<HashMap<String, String>> {
    let mut map = HashMap::new();
    let mut rest = params;
    while !rest.is_empty() {
        let (chunk, next) = match rest.split_once(separator) {
            Some((chunk, next)) => (chunk, next),
            None => (rest, ""),
        };
        let (attr, value) = chunk.split_once('=')?;
        let mut attr = decode_part(attr, Mode::DecodeAll, ParseFlags::empty()).ok()?;
        let value = decode_part(value, Mode::DecodeAll, ParseFlags::empty()).ok()?;
        if case_insensitive {
            attr.make_ascii_lowercase();
        }
        map.insert(attr, value);
        rest = next;
    }
    Some(map)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn separators() {
        let map = parse_params("a=1;b=2", ';', false).unwrap();
        assert_eq!(map.len(), 2);
        assert_eq!(map["a"], "1");
        assert_eq!(map["b"], "2");
    }

    #[test]
    fn trailing_separator() {
        let map = parse_params("a=1&", '&', false).unwrap();
        assert_eq!(map.len(), 1);
    }

    #[test]
    fn missing_eq_aborts() {
        assert!(parse_params("a=1&b", '&', false).is_none());
    }

    #[test]
    fn decoding_and_case_folding() {
        let map = parse_params("N%41ME=a%20b", '&', true).unwrap();
        assert_eq!(map["name"], "a b");
    }

    #[test]
    fn later_pair_wins() {
        let map = parse_params("A=1&a=2", '&', true).unwrap();
        assert_eq!(map.len(), 1);
        assert_eq!(map["a"], "2");
    }

    #[test]
    fn empty_input() {
        assert_eq!(parse_params("", '&', false), Some(HashMap::new()));
    }
}

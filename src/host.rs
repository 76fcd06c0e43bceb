//! Resolving a raw host span into its stored decoded form.

use crate::{
    encoding::{decode_bytes, Mode},
    error::UriError,
    ParseFlags,
};

/// Resolves a raw host span into the decoded text stored on the record.
///
/// Bracketed spans must hold an IPv6 address and are stored without the
/// brackets. Bare IPv4 and IPv6 literals are stored verbatim. Everything
/// else is percent-decoded, checked against IP smuggling, and converted
/// to ASCII when it is an internationalized name.
pub(crate) fn parse_host(raw: &str, flags: ParseFlags) -> Result<String, UriError> {
    // HTML5 hosts tolerate stray percent signs even under strict parsing.
    let dflags = if flags.contains(ParseFlags::HTML5) {
        flags - ParseFlags::STRICT
    } else {
        flags
    };

    if flags.contains(ParseFlags::NON_DNS) {
        let bytes = decode_bytes(raw, Mode::DecodeAll, dflags)
            .map_err(|_| UriError::BadHost)?;
        return String::from_utf8(bytes).map_err(|_| UriError::BadHost);
    }

    if let Some(rest) = raw.strip_prefix('[') {
        let inner = rest.strip_suffix(']').ok_or(UriError::BadHost)?;
        if is_ip_address(inner) && inner.contains(':') {
            return Ok(inner.to_owned());
        }
        return Err(UriError::BadHost);
    }

    if is_ip_address(raw) {
        return Ok(raw.to_owned());
    }

    let bytes = decode_bytes(raw, Mode::DecodeAll, dflags).map_err(|_| UriError::BadHost)?;
    let decoded = String::from_utf8(bytes).map_err(|_| UriError::BadHost)?;
    if is_ip_address(&decoded) {
        // an IP literal hidden behind escapes
        return Err(UriError::BadHost);
    }
    if decoded.is_ascii() {
        return Ok(decoded);
    }
    if flags.contains(ParseFlags::NO_IRI) {
        return Err(UriError::BadHost);
    }
    idna::domain_to_ascii(&decoded).map_err(|_| UriError::BadHost)
}

/// Returns `true` if the string is exactly an IPv4 or IPv6 address.
pub(crate) fn is_ip_address(s: &str) -> bool {
    parse_v4(s.as_bytes()).is_some() || parse_v6(s.as_bytes()).is_some()
}

struct Reader<'a> {
    bytes: &'a [u8],
    pos: usize,
}

impl<'a> Reader<'a> {
    fn new(bytes: &'a [u8]) -> Self {
        Reader { bytes, pos: 0 }
    }

    fn has_remaining(&self) -> bool {
        self.pos < self.bytes.len()
    }

    fn peek(&self, i: usize) -> Option<u8> {
        self.bytes.get(self.pos + i).copied()
    }

    fn skip(&mut self, n: usize) {
        self.pos += n;
    }

    fn read(&mut self, b: u8) -> bool {
        if self.peek(0) == Some(b) {
            self.skip(1);
            true
        } else {
            false
        }
    }

    // Reads an IPv4 octet. Leading zeros are rejected so that every
    // address has exactly one textual form.
    fn read_v4_octet(&mut self) -> Option<u8> {
        let mut res = self.peek(0)?.checked_sub(b'0').filter(|&x| x <= 9)? as u16;
        self.skip(1);
        if res == 0 {
            return Some(0);
        }
        for _ in 0..2 {
            match self.peek(0).and_then(|x| x.checked_sub(b'0')).filter(|&x| x <= 9) {
                Some(x) => {
                    res = res * 10 + x as u16;
                    self.skip(1);
                }
                None => break,
            }
        }
        u8::try_from(res).ok()
    }

    fn read_v4(&mut self) -> Option<u32> {
        let mut addr = (self.read_v4_octet()? as u32) << 24;
        for i in (0..3).rev() {
            if !self.read(b'.') {
                return None;
            }
            addr |= (self.read_v4_octet()? as u32) << (i * 8);
        }
        Some(addr)
    }

    fn read_v6_segment(&mut self) -> Option<Seg> {
        let colon = self.read(b':');
        let mut x = 0u16;
        let mut i = 0;
        while i < 4 {
            match self.peek(i).map(hex_value) {
                Some(Some(v)) => x = (x << 4) | v as u16,
                Some(None) if self.peek(i) == Some(b'.') && i != 0 => {
                    return Some(Seg::MaybeV4(colon));
                }
                _ if i == 0 => {
                    return if colon {
                        if self.read(b':') {
                            Some(Seg::Ellipsis)
                        } else {
                            Some(Seg::SingleColon)
                        }
                    } else {
                        None
                    };
                }
                _ => {
                    self.skip(i);
                    return Some(Seg::Normal(x, colon));
                }
            }
            i += 1;
        }
        if self.peek(4).map(hex_value) == Some(None) || self.peek(4).is_none() {
            self.skip(4);
            Some(Seg::Normal(x, colon))
        } else {
            None
        }
    }
}

enum Seg {
    Normal(u16, bool),
    Ellipsis,
    MaybeV4(bool),
    SingleColon,
}

fn hex_value(b: u8) -> Option<u8> {
    match b {
        b'0'..=b'9' => Some(b - b'0'),
        b'A'..=b'F' => Some(b - b'A' + 10),
        b'a'..=b'f' => Some(b - b'a' + 10),
        _ => None,
    }
}

fn parse_v4(bytes: &[u8]) -> Option<u32> {
    let mut r = Reader::new(bytes);
    let addr = r.read_v4()?;
    (!r.has_remaining()).then_some(addr)
}

fn parse_v6(bytes: &[u8]) -> Option<[u16; 8]> {
    let mut r = Reader::new(bytes);
    let mut segs = [0u16; 8];
    let mut ellipsis_i = 8;

    let mut i = 0;
    while i < 8 {
        match r.read_v6_segment()? {
            Seg::Normal(seg, colon) => {
                if colon == (i == 0 || i == ellipsis_i) {
                    return None;
                }
                segs[i] = seg;
                i += 1;
            }
            Seg::Ellipsis => {
                if ellipsis_i != 8 {
                    return None;
                }
                ellipsis_i = i;
            }
            Seg::MaybeV4(colon) => {
                if i > 6 || colon == (i == 0 || i == ellipsis_i) {
                    return None;
                }
                let octets = r.read_v4()?.to_be_bytes();
                segs[i] = u16::from_be_bytes([octets[0], octets[1]]);
                segs[i + 1] = u16::from_be_bytes([octets[2], octets[3]]);
                i += 2;
                break;
            }
            Seg::SingleColon => return None,
        }
        if !r.has_remaining() {
            break;
        }
    }

    if r.has_remaining() {
        return None;
    }
    if ellipsis_i == 8 {
        if i != 8 {
            return None;
        }
    } else {
        if i == 8 {
            return None;
        }
        segs.copy_within(ellipsis_i..i, 8 - (i - ellipsis_i));
        segs[ellipsis_i..8 - (i - ellipsis_i)].fill(0);
    }
    Some(segs)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn v4_literals() {
        assert!(is_ip_address("127.0.0.1"));
        assert!(is_ip_address("255.255.255.255"));
        assert!(!is_ip_address("127.0.0.001"));
        assert!(!is_ip_address("127.1"));
        assert!(!is_ip_address("256.0.0.1"));
        assert!(!is_ip_address("127.0.0.1."));
    }

    #[test]
    fn v6_literals() {
        assert!(is_ip_address("::"));
        assert!(is_ip_address("::1"));
        assert!(is_ip_address("1:2:3:4:5:6:7:8"));
        assert!(is_ip_address("fe80::1"));
        assert!(is_ip_address("::1.1.1.1"));
        assert!(!is_ip_address("::01.1.1.1"));
        assert!(!is_ip_address("1:2:3:4:5:6:7:8:9"));
        assert!(!is_ip_address("1:2:3:4:5:6:7"));
        assert!(!is_ip_address(":"));
        assert!(!is_ip_address("::1::"));
        assert!(!is_ip_address("12345::"));
    }

    #[test]
    fn bracketed_requires_v6() {
        assert_eq!(
            parse_host("[::1]", ParseFlags::empty()).as_deref(),
            Ok("::1")
        );
        assert_eq!(parse_host("[abc]", ParseFlags::empty()), Err(UriError::BadHost));
        assert_eq!(parse_host("[::1", ParseFlags::empty()), Err(UriError::BadHost));
        assert_eq!(
            parse_host("[127.0.0.1]", ParseFlags::empty()),
            Err(UriError::BadHost)
        );
    }

    #[test]
    fn smuggled_ip_rejected() {
        assert_eq!(
            parse_host("%31%32%37.0.0.1", ParseFlags::empty()),
            Err(UriError::BadHost)
        );
    }

    #[test]
    fn idn_conversion() {
        assert_eq!(
            parse_host("b\u{fc}cher.de", ParseFlags::empty()).as_deref(),
            Ok("xn--bcher-kva.de")
        );
        assert_eq!(
            parse_host("b\u{fc}cher.de", ParseFlags::NO_IRI),
            Err(UriError::BadHost)
        );
    }

    #[test]
    fn non_dns_is_opaque() {
        assert_eq!(
            parse_host("anything%20goes", ParseFlags::NON_DNS).as_deref(),
            Ok("anything goes")
        );
    }
}

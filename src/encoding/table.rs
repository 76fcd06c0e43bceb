//! Byte pattern tables from RFC 3986, documented with the ABNF notation
//! of [RFC 2234].
//!
//! [RFC 2234]: https://datatracker.ietf.org/doc/html/rfc2234/

const HEX_DIGITS: &[u8; 16] = b"0123456789ABCDEF";

/// Appends a byte to the buffer as an uppercase percent-encoded octet.
pub(crate) fn encode_byte(x: u8, buf: &mut String) {
    buf.push('%');
    buf.push(HEX_DIGITS[(x >> 4) as usize] as char);
    buf.push(HEX_DIGITS[(x & 0b1111) as usize] as char);
}

/// A table determining the bytes allowed to appear unencoded in a component.
#[derive(Clone, Copy)]
pub(crate) struct Table {
    arr: [bool; 256],
    allows_enc: bool,
}

impl Table {
    /// Generates a table that only allows the given unencoded bytes.
    pub(crate) const fn gen(mut bytes: &[u8]) -> Table {
        let mut arr = [false; 256];
        while let [cur, rem @ ..] = bytes {
            assert!(*cur != b'%', "cannot allow unencoded %");
            arr[*cur as usize] = true;
            bytes = rem;
        }
        Table {
            arr,
            allows_enc: false,
        }
    }

    /// Marks this table as allowing percent-encoded octets.
    pub(crate) const fn enc(mut self) -> Table {
        self.allows_enc = true;
        self
    }

    /// Combines two tables into one, allowing what either of them allows.
    pub(crate) const fn or(mut self, other: &Table) -> Table {
        let mut i = 0;
        while i < 256 {
            self.arr[i] |= other.arr[i];
            i += 1;
        }
        self.allows_enc |= other.allows_enc;
        self
    }

    /// Subtracts from this table, disallowing what `other` allows.
    pub(crate) const fn sub(mut self, other: &Table) -> Table {
        let mut i = 0;
        while i < 256 {
            if other.arr[i] {
                self.arr[i] = false;
            }
            i += 1;
        }
        self
    }

    /// Returns `true` if the given unencoded byte is allowed by the table.
    #[inline]
    pub(crate) const fn allows(&self, x: u8) -> bool {
        self.arr[x as usize]
    }

    /// Appends a byte to the buffer, percent-encoding it unless the table
    /// allows it unencoded.
    #[inline]
    pub(crate) fn encode(&self, x: u8, buf: &mut String) {
        if self.allows(x) {
            buf.push(x as char);
        } else {
            encode_byte(x, buf);
        }
    }

    /// Validates the given byte sequence with the table.
    pub(crate) const fn validate(&self, s: &[u8]) -> bool {
        let mut i = 0;
        while i < s.len() {
            let x = s[i];
            if x == b'%' {
                if !self.allows_enc || i + 2 >= s.len() {
                    return false;
                }
                if !(HEXDIG.allows(s[i + 1]) && HEXDIG.allows(s[i + 2])) {
                    return false;
                }
                i += 3;
            } else {
                if !self.allows(x) {
                    return false;
                }
                i += 1;
            }
        }
        true
    }
}

const fn gen(bytes: &[u8]) -> Table {
    Table::gen(bytes)
}

/// ALPHA = A-Z / a-z
pub(crate) const ALPHA: &Table =
    &gen(b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz");

/// DIGIT = 0-9
pub(crate) const DIGIT: &Table = &gen(b"0123456789");

/// HEXDIG = DIGIT / "A" / "B" / "C" / "D" / "E" / "F"
///                / "a" / "b" / "c" / "d" / "e" / "f"
pub(crate) const HEXDIG: &Table = &DIGIT.or(&gen(b"ABCDEFabcdef"));

/// sub-delims = "!" / "$" / "&" / "'" / "(" / ")"
///            / "*" / "+" / "," / ";" / "="
pub(crate) const SUB_DELIMS: &Table = &gen(b"!$&'()*+,;=");

/// unreserved = ALPHA / DIGIT / "-" / "." / "_" / "~"
pub(crate) const UNRESERVED: &Table = &ALPHA.or(DIGIT).or(&gen(b"-._~"));

/// pchar = unreserved / pct-encoded / sub-delims / ":" / "@"
pub(crate) const PCHAR: &Table = &UNRESERVED.or(SUB_DELIMS).or(&gen(b":@")).enc();

/// scheme = 1*( ALPHA / DIGIT / "+" / "-" / "." )
///
/// The splitter commits any non-empty run of these bytes followed by ":",
/// so the leading-ALPHA restriction of RFC 3986 is not part of this table.
pub(crate) const SCHEME: &Table = &ALPHA.or(DIGIT).or(&gen(b"+-."));

/// userinfo = *( unreserved / pct-encoded / sub-delims / ":" )
pub(crate) const USERINFO: &Table = &UNRESERVED.or(SUB_DELIMS).or(&gen(b":")).enc();

/// The user (or password) field proper, with the ":" and ";" delimiters
/// that split userinfo excluded so they survive a round trip.
pub(crate) const USER: &Table = &USERINFO.sub(&gen(b":;"));

/// reg-name = *( unreserved / pct-encoded / sub-delims )
pub(crate) const REG_NAME: &Table = &UNRESERVED.or(SUB_DELIMS).enc();

/// path = *( pchar / "/" )
pub(crate) const PATH: &Table = &PCHAR.or(&gen(b"/"));

/// query = *( pchar / "/" / "?" )
pub(crate) const QUERY: &Table = &PCHAR.or(&gen(b"/?"));

/// fragment = *( pchar / "/" / "?" )
pub(crate) const FRAGMENT: &Table = QUERY;

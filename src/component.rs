//! Borrowed component types.

use crate::encoding::table;
use ref_cast::{ref_cast_custom, RefCastCustom};
use std::hash;

/// The [scheme] component of a URI.
///
/// [scheme]: https://datatracker.ietf.org/doc/html/rfc3986/#section-3.1
#[derive(RefCastCustom)]
#[repr(transparent)]
pub struct Scheme {
    inner: str,
}

impl Scheme {
    #[ref_cast_custom]
    pub(crate) const fn new_validated(scheme: &str) -> &Scheme;

    /// Converts a string slice to `&Scheme`.
    ///
    /// Returns `None` if the string is empty or contains a byte outside
    /// the scheme character set. A leading digit is accepted, matching
    /// what the splitter commits before a `:`.
    #[must_use]
    pub const fn new(s: &str) -> Option<&Scheme> {
        if !s.is_empty() && table::SCHEME.validate(s.as_bytes()) {
            Some(Scheme::new_validated(s))
        } else {
            None
        }
    }

    /// Converts a string slice to `&Scheme`, panicking on validation failure.
    ///
    /// # Panics
    ///
    /// Panics if the string is not a valid scheme.
    #[must_use]
    pub const fn new_or_panic(s: &str) -> &Scheme {
        match Scheme::new(s) {
            Some(scheme) => scheme,
            None => panic!("invalid scheme"),
        }
    }

    /// Returns the scheme as a string slice in its original case.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.inner
    }
}

impl PartialEq for Scheme {
    /// Compares case-insensitively.
    fn eq(&self, other: &Self) -> bool {
        self.inner.eq_ignore_ascii_case(&other.inner)
    }
}

impl Eq for Scheme {}

impl hash::Hash for Scheme {
    fn hash<H: hash::Hasher>(&self, state: &mut H) {
        for x in self.inner.as_bytes() {
            x.to_ascii_lowercase().hash(state);
        }
    }
}

/// Returns the default port of a scheme, for the schemes that have one.
pub(crate) fn default_port(scheme: &str) -> Option<u16> {
    match scheme {
        "http" => Some(80),
        "https" => Some(443),
        "ftp" => Some(21),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scheme_validation() {
        assert!(Scheme::new("http").is_some());
        assert!(Scheme::new("coap+ws").is_some());
        assert!(Scheme::new("1pv").is_some());
        assert!(Scheme::new("").is_none());
        assert!(Scheme::new("ht tp").is_none());
        assert!(Scheme::new("a:b").is_none());
    }

    #[test]
    fn scheme_eq_ignores_case() {
        assert_eq!(Scheme::new_or_panic("HTTP"), Scheme::new_or_panic("http"));
    }

    #[test]
    fn default_ports() {
        assert_eq!(default_port("http"), Some(80));
        assert_eq!(default_port("https"), Some(443));
        assert_eq!(default_port("ftp"), Some(21));
        assert_eq!(default_port("gopher"), None);
    }
}

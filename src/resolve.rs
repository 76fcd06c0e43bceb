//! Reference resolution against a base URI.

use crate::{error::UriError, ParseFlags, Uri};

/// The decoded components of a URI reference, before resolution.
#[derive(Default)]
pub(crate) struct RefParts {
    pub(crate) scheme: Option<String>,
    pub(crate) user: Option<String>,
    pub(crate) password: Option<String>,
    pub(crate) auth_params: Option<String>,
    pub(crate) raw_userinfo: Option<String>,
    pub(crate) host: Option<String>,
    pub(crate) raw_host: Option<String>,
    pub(crate) port: Option<u16>,
    pub(crate) path: String,
    pub(crate) query: Option<String>,
    pub(crate) fragment: Option<String>,
}

/// Finishes a reference parsed without a base.
///
/// The path is kept as written; dot segments are only removed when
/// resolving against a base.
pub(crate) fn into_absolute(r: RefParts, flags: ParseFlags) -> Result<Uri, UriError> {
    let scheme = r.scheme.ok_or(UriError::NotAbsolute)?;
    Ok(Uri {
        scheme,
        user: r.user,
        password: r.password,
        auth_params: r.auth_params,
        raw_userinfo: r.raw_userinfo,
        host: r.host,
        raw_host: r.raw_host,
        port: r.port,
        path: r.path,
        query: r.query,
        fragment: r.fragment,
        flags,
    })
}

/// Resolves a reference against a base URI.
///
/// Follows the transform-references precedence: the reference's own
/// scheme wins outright, then its authority, then its path, with the
/// base filling in whatever the reference leaves out. The fragment is
/// always the reference's.
pub(crate) fn resolve(mut r: RefParts, base: &Uri, flags: ParseFlags) -> Uri {
    let scheme;
    if let Some(s) = r.scheme {
        scheme = s;
        remove_dot_segments(&mut r.path);
    } else {
        scheme = base.scheme.clone();
        if r.host.is_some() {
            remove_dot_segments(&mut r.path);
        } else {
            if r.path.is_empty() {
                r.path = base.path.clone();
                if r.query.is_none() {
                    r.query = base.query.clone();
                }
            } else {
                if !r.path.starts_with('/') {
                    r.path = match base.path.rfind('/') {
                        Some(last) => format!("{}{}", &base.path[..=last], r.path),
                        None => format!("/{}", r.path),
                    };
                }
                remove_dot_segments(&mut r.path);
            }
            r.user = base.user.clone();
            r.password = base.password.clone();
            r.auth_params = base.auth_params.clone();
            r.raw_userinfo = base.raw_userinfo.clone();
            r.host = base.host.clone();
            r.raw_host = base.raw_host.clone();
            r.port = base.port;
        }
    }
    Uri {
        scheme,
        user: r.user,
        password: r.password,
        auth_params: r.auth_params,
        raw_userinfo: r.raw_userinfo,
        host: r.host,
        raw_host: r.raw_host,
        port: r.port,
        path: r.path,
        query: r.query,
        fragment: r.fragment,
        flags,
    }
}

/// Removes `.` and `..` segments from a path, in place.
///
/// This is the restart-scan form of the algorithm: complete segments of
/// the form `<segment>/../` are elided one at a time from the left, with
/// leading `../` runs left alone until the final clamping step.
pub(crate) fn remove_dot_segments(path: &mut String) {
    if path.is_empty() {
        return;
    }
    // byte offsets may fall inside a multibyte character, so the scan
    // works on the raw bytes
    let mut buf = std::mem::take(path).into_bytes();

    // "/./" -> "/", and a trailing "/." loses its dot
    let mut i = 1;
    while i + 1 < buf.len() {
        if buf[i - 1] == b'/' && buf[i] == b'.' && buf[i + 1] == b'/' {
            buf.drain(i..i + 2);
        } else {
            i += 1;
        }
    }
    if buf.ends_with(b"/.") {
        buf.pop();
    }

    // "<segment>/../" -> "", restarting the scan after each elision;
    // a "../" segment is skipped, never elided
    let mut p = 1;
    while p < buf.len() {
        // never start an elision inside a multibyte character
        if buf[p] & 0xC0 == 0x80 {
            p += 1;
            continue;
        }
        if buf[p..].starts_with(b"../") {
            p += 3;
            continue;
        }
        let q = match memchr::memchr(b'/', &buf[p + 1..]) {
            Some(off) => p + 1 + off,
            None => break,
        };
        if !buf[q..].starts_with(b"/../") {
            p = q + 1;
            continue;
        }
        buf.drain(p..q + 4);
        p = 1;
    }

    // a trailing "<segment>/.." removes the segment
    if let Some(q) = memchr::memrchr(b'/', &buf) {
        if buf[q..] == *b"/.." && q > 0 {
            let mut p = q - 1;
            while p > 0 && buf[p] != b'/' {
                p -= 1;
            }
            let boundary = buf.get(p + 1).map_or(true, |&b| b & 0xC0 != 0x80);
            if !buf[p..].starts_with(b"/../") && boundary {
                buf.truncate(p + 1);
            }
        }
    }

    // clamp leading "../" runs at the root
    while buf.starts_with(b"/../") {
        buf.drain(0..3);
    }
    if buf == b"/.." {
        buf.truncate(1);
    }

    // SAFETY: every removal was bounded by ASCII bytes, so the buffer
    // is still valid UTF-8.
    *path = unsafe { String::from_utf8_unchecked(buf) };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[track_caller]
    fn check(input: &str, expected: &str) {
        let mut path = input.to_owned();
        remove_dot_segments(&mut path);
        assert_eq!(path, expected, "input: {input:?}");
    }

    #[test]
    fn single_dots() {
        check("/a/./b", "/a/b");
        check("/a/.", "/a/");
        check("/./a", "/a");
        check("/.", "/");
        check("/a/././b/./", "/a/b/");
    }

    #[test]
    fn double_dots() {
        check("/a/b/../c", "/a/c");
        check("/a/b/..", "/a/");
        check("/a/b/c/../../d", "/a/d");
        check("/..", "/");
        check("/../a", "/a");
        check("/../../a", "/a");
        check("/a/../../../b", "/b");
    }

    #[test]
    fn relative_forms_kept() {
        check("a/b", "a/b");
        check("../a", "../a");
        check("a/../b", "a/../b");
        check("a/..", "a");
    }

    #[test]
    fn multibyte_segments() {
        check("/\u{e9}/./x", "/\u{e9}/x");
        check("/\u{e9}/../x", "/x");
        check("\u{e9}/..", "\u{e9}/..");
    }

    #[test]
    fn fixpoint() {
        for input in ["/a/./b/../c/.", "/../../x/y/../z", "a/.././b"] {
            let mut once = input.to_owned();
            remove_dot_segments(&mut once);
            let mut twice = once.clone();
            remove_dot_segments(&mut twice);
            assert_eq!(once, twice, "input: {input:?}");
        }
    }
}

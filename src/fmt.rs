use crate::{component::Scheme, error::UriError, ToStringFlags, Uri};
use std::fmt;

impl fmt::Display for UriError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let msg = match self {
            UriError::BadHost => "invalid host",
            UriError::BadPort => "invalid port",
            UriError::BadUser => "invalid user",
            UriError::BadPassword => "invalid password",
            UriError::BadAuthParams => "invalid auth params",
            UriError::BadPath => "invalid path",
            UriError::BadQuery => "invalid query",
            UriError::BadFragment => "invalid fragment",
            UriError::NotAbsolute => "URI is not absolute",
            UriError::Misc => "invalid percent-encoded octet",
        };
        f.write_str(msg)
    }
}

impl fmt::Display for Uri {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_string_with(ToStringFlags::empty()))
    }
}

impl fmt::Debug for Uri {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Uri")
            .field("scheme", &self.scheme())
            .field("user", &self.user())
            .field("password", &self.password())
            .field("auth_params", &self.auth_params())
            .field("host", &self.host())
            .field("port", &self.port())
            .field("path", &self.path())
            .field("query", &self.query())
            .field("fragment", &self.fragment())
            .finish()
    }
}

impl fmt::Display for Scheme {
    #[inline]
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self.as_str(), f)
    }
}

impl fmt::Debug for Scheme {
    #[inline]
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self.as_str(), f)
    }
}

/// An error occurred when parsing or reparsing a URI.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum UriError {
    /// The host could not be resolved to a usable form.
    BadHost,
    /// The span after a port colon was empty, non-numeric, or out of range.
    BadPort,
    /// The user field could not be decoded.
    BadUser,
    /// The password field could not be decoded.
    BadPassword,
    /// The auth-params field could not be decoded.
    BadAuthParams,
    /// The path could not be decoded.
    BadPath,
    /// The query could not be decoded.
    BadQuery,
    /// The fragment could not be decoded.
    BadFragment,
    /// An absolute URI was required but the input has no scheme.
    NotAbsolute,
    /// The percent-encoding grammar was violated under strict parsing.
    Misc,
}

impl std::error::Error for UriError {}

//! Field tag parsing.
//!
//! A field declares its header mapping with a tag string: the first comma separated token is the
//! header name, the remaining tokens are options. An empty name means "use the field identifier",
//! and the bare tag `-` drops the field from both directions.
//!
//! ```
//! use micro_header::protocol::parse_tag;
//!
//! let (name, options) = parse_tag("X-Goog-Channel-Token,omitempty");
//! assert_eq!(name, "X-Goog-Channel-Token");
//! assert!(options.omit_empty());
//! ```

/// Tag that excludes a field from encoding and decoding.
pub const SKIP_TAG: &str = "-";

/// Skip the field while encoding when its value is empty, and while decoding when the header is
/// absent.
pub const OMIT_EMPTY: &str = "omitempty";

/// Render booleans as `1`/`0` instead of `true`/`false`.
pub const BOOL_AS_INT: &str = "int";

/// Render timestamps as unix seconds instead of an http date.
pub const UNIX_TIME: &str = "unix";

/// Option tokens that follow the header name in a field tag.
///
/// Tokens are kept verbatim; unknown ones are simply never asked for.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Options {
    tokens: Vec<String>,
}

impl Options {
    pub fn new<I, S>(tokens: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self { tokens: tokens.into_iter().map(Into::into).collect() }
    }

    pub fn contains(&self, option: &str) -> bool {
        self.tokens.iter().any(|token| token == option)
    }

    #[inline]
    pub fn omit_empty(&self) -> bool {
        self.contains(OMIT_EMPTY)
    }

    #[inline]
    pub fn bool_as_int(&self) -> bool {
        self.contains(BOOL_AS_INT)
    }

    #[inline]
    pub fn unix_time(&self) -> bool {
        self.contains(UNIX_TIME)
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.tokens.iter().map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }
}

/// Splits a field tag into its header name and options.
pub fn parse_tag(tag: &str) -> (&str, Options) {
    let mut tokens = tag.split(',');
    // split always yields at least one item
    let name = tokens.next().unwrap_or_default();
    (name, Options::new(tokens))
}

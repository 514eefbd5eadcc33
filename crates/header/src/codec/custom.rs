//! Custom header codecs.
//!
//! A field type implementing [`EncodeHeader`] and/or [`DecodeHeader`] takes over its own header
//! representation. The generic walk hands it the resolved header name and the whole header map,
//! so one field may read or write a family of related keys.
//!
//! [`Indexed`] is the stock codec for such a family: a series stored under `name.0`, `name.1`, ...

use http::{HeaderMap, HeaderName, HeaderValue};

use crate::codec::Scalar;
use crate::protocol::{Error, Options};

/// Writes a value into a header map in a non-standard way.
pub trait EncodeHeader {
    /// Appends the header representation of `self` under `name` (or keys derived from it).
    ///
    /// # Errors
    ///
    /// Any error returned here stops the encoding and is handed back to the caller unchanged.
    fn encode_header(&self, name: &HeaderName, headers: &mut HeaderMap) -> Result<(), Error>;

    /// Whether `omitempty` should drop the value. Defaults to never.
    fn is_empty_header(&self) -> bool {
        false
    }
}

/// Reads a value from a header map in a non-standard way.
pub trait DecodeHeader {
    /// Updates `self` in place from the headers found under `name` (or keys derived from it).
    ///
    /// # Errors
    ///
    /// Any error returned here stops the decoding and is handed back to the caller unchanged.
    fn decode_header(&mut self, headers: &HeaderMap, name: &HeaderName) -> Result<(), Error>;

    /// Whether `headers` holds anything [`decode_header`](Self::decode_header) would read.
    ///
    /// An absent optional record is allocated only when one of its fields claims a header.
    /// Defaults to the presence of `name` itself; codecs reading derived keys override it.
    fn claims_header(headers: &HeaderMap, name: &HeaderName) -> bool
    where
        Self: Sized,
    {
        headers.contains_key(name)
    }
}

/// An absent value encodes like a freshly defaulted one.
impl<T: EncodeHeader + Default> EncodeHeader for Option<T> {
    fn encode_header(&self, name: &HeaderName, headers: &mut HeaderMap) -> Result<(), Error> {
        match self {
            Some(value) => value.encode_header(name, headers),
            None => T::default().encode_header(name, headers),
        }
    }

    fn is_empty_header(&self) -> bool {
        self.is_none()
    }
}

/// An absent value is allocated before decoding into it.
impl<T: DecodeHeader + Default> DecodeHeader for Option<T> {
    fn decode_header(&mut self, headers: &HeaderMap, name: &HeaderName) -> Result<(), Error> {
        self.get_or_insert_with(T::default).decode_header(headers, name)
    }

    fn claims_header(headers: &HeaderMap, name: &HeaderName) -> bool {
        T::claims_header(headers, name)
    }
}

/// A series of values spread over indexed keys: `arg.0`, `arg.1`, `arg.2`, ...
///
/// Decoding collects every `name.<index>` key, orders the values by numeric index and ignores
/// gaps. When no such key exists the current value is kept.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Indexed<T>(pub Vec<T>);

impl<T> Indexed<T> {
    pub fn into_inner(self) -> Vec<T> {
        self.0
    }
}

impl<T> From<Vec<T>> for Indexed<T> {
    fn from(values: Vec<T>) -> Self {
        Self(values)
    }
}

impl<T: Scalar> EncodeHeader for Indexed<T> {
    fn encode_header(&self, name: &HeaderName, headers: &mut HeaderMap) -> Result<(), Error> {
        let options = Options::default();
        for (index, item) in self.0.iter().enumerate() {
            let key = HeaderName::try_from(format!("{name}.{index}")).map_err(Error::custom)?;
            let text = item.format(&options).map_err(|source| Error::unencodable(key.as_str(), source))?;
            let value = HeaderValue::try_from(text).map_err(|e| Error::unencodable(key.as_str(), e.into()))?;
            headers.append(key, value);
        }
        Ok(())
    }

    fn is_empty_header(&self) -> bool {
        self.0.is_empty()
    }
}

impl<T: Scalar> DecodeHeader for Indexed<T> {
    fn decode_header(&mut self, headers: &HeaderMap, name: &HeaderName) -> Result<(), Error> {
        let options = Options::default();
        let mut series = Vec::new();

        for key in headers.keys() {
            let Some(index) = series_index(key, name) else {
                continue;
            };
            // keys() only yields names that hold a value
            let Some(value) = headers.get(key) else {
                continue;
            };
            let text = value.to_str().map_err(|e| Error::format(key.as_str(), T::KIND, String::from_utf8_lossy(value.as_bytes()), e.into()))?;
            let item = T::parse(text, &options).map_err(|source| Error::format(key.as_str(), T::KIND, text, source))?;
            series.push((index, item));
        }

        if !series.is_empty() {
            series.sort_by_key(|(index, _)| *index);
            self.0 = series.into_iter().map(|(_, item)| item).collect();
        }
        Ok(())
    }

    fn claims_header(headers: &HeaderMap, name: &HeaderName) -> bool {
        headers.keys().any(|key| series_index(key, name).is_some())
    }
}

/// Extracts `n` from a key shaped `name.n` where `n` is all ascii digits.
fn series_index(key: &HeaderName, name: &HeaderName) -> Option<usize> {
    let digits = key.as_str().strip_prefix(name.as_str())?.strip_prefix('.')?;
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    digits.parse().ok()
}

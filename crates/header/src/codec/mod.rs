//! Conversion between records and header maps.
//!
//! # Architecture
//!
//! - Record walks (`header`):
//!   - `HeaderEncoder`: appends the entries of a record to a map
//!   - `HeaderDecoder`: assigns a record in place from a map
//!
//! - Single values (`scalar`):
//!   - [`Scalar`]: format and parse one header value, honouring the `int` and `unix` options
//!
//! - Custom codecs (`custom`):
//!   - [`EncodeHeader`] / [`DecodeHeader`]: types that bring their own header representation
//!   - [`Indexed`]: a series spread over `name.0`, `name.1`, ...
//!
//! # Example
//!
//! ```
//! use micro_header::{decode, encode, header_record};
//!
//! #[derive(Debug, Default, PartialEq)]
//! struct Cache {
//!     max_age: u32,
//!     public: bool,
//! }
//!
//! header_record! {
//!     Cache {
//!         max_age: "X-Max-Age",
//!         public: "X-Public,int",
//!     }
//! }
//!
//! let headers = encode(&Cache { max_age: 60, public: true }).unwrap();
//! assert_eq!(headers["x-max-age"], "60");
//! assert_eq!(headers["x-public"], "1");
//!
//! let mut cache = Cache::default();
//! decode(&headers, &mut cache).unwrap();
//! assert_eq!(cache, Cache { max_age: 60, public: true });
//! ```

mod custom;
mod header;
mod scalar;

pub use custom::DecodeHeader;
pub use custom::EncodeHeader;
pub use custom::Indexed;
pub use scalar::Scalar;
pub use scalar::ScalarKind;

use http::HeaderMap;
use tracing::trace;

use crate::protocol::Error;
use crate::schema::Record;
use header::{HeaderDecoder, HeaderEncoder};

/// Values [`encode`] accepts: any record, or an optional one.
pub trait Encode {
    /// Appends the header representation of `self` to `dst`.
    ///
    /// # Errors
    ///
    /// See [`encode`].
    fn encode_into(&self, dst: &mut HeaderMap) -> Result<(), Error>;
}

impl<R: Record> Encode for R {
    fn encode_into(&self, dst: &mut HeaderMap) -> Result<(), Error> {
        encode_record(self, dst)
    }
}

/// `None` encodes to nothing.
impl<R: Record> Encode for Option<R> {
    fn encode_into(&self, dst: &mut HeaderMap) -> Result<(), Error> {
        match self {
            Some(record) => encode_record(record, dst),
            None => {
                trace!(record = R::schema().record_name(), "encode absent record");
                Ok(())
            }
        }
    }
}

/// Targets [`decode`] accepts: any record, or an optional one.
pub trait Decode {
    /// Assigns `self` from `src`.
    ///
    /// # Errors
    ///
    /// See [`decode`].
    fn decode_from(&mut self, src: &HeaderMap) -> Result<(), Error>;
}

impl<R: Record> Decode for R {
    fn decode_from(&mut self, src: &HeaderMap) -> Result<(), Error> {
        decode_record(src, self)
    }
}

/// `None` is replaced by a default record before decoding.
impl<R: Record + Default> Decode for Option<R> {
    fn decode_from(&mut self, src: &HeaderMap) -> Result<(), Error> {
        decode_record(src, self.get_or_insert_with(R::default))
    }
}

/// Encodes a record into a new header map.
///
/// Fields are visited in declaration order. Skipped, private and `omitempty`-empty fields
/// write nothing; sequences write one entry per element; flattened embedded records are
/// written after the record's own fields.
///
/// # Errors
///
/// - [`Error::InvalidRecord`] when the record's schema declares an invalid header name
/// - [`Error::Unencodable`] when a value can't be rendered as a header value
/// - any error raised by a custom codec, unchanged
pub fn encode<E: Encode + ?Sized>(value: &E) -> Result<HeaderMap, Error> {
    let mut headers = HeaderMap::new();
    value.encode_into(&mut headers)?;
    Ok(headers)
}

/// Decodes `src` into `target` in place.
///
/// Only fields whose header is present are assigned. Scalars take the first value of their
/// header, `Vec` fields take all of them.
///
/// # Errors
///
/// - [`Error::InvalidRecord`] when the record's schema declares an invalid header name
/// - [`Error::Format`] for the first header value that can't be parsed into its field; the
///   fields before it keep their new value
/// - any error raised by a custom codec, unchanged
pub fn decode<D: Decode + ?Sized>(src: &HeaderMap, target: &mut D) -> Result<(), Error> {
    target.decode_from(src)
}

pub(crate) fn encode_record<R: Record>(record: &R, dst: &mut HeaderMap) -> Result<(), Error> {
    HeaderEncoder.encode(record, dst)
}

pub(crate) fn decode_record<R: Record>(src: &HeaderMap, record: &mut R) -> Result<(), Error> {
    HeaderDecoder.decode(src, record)
}

//! Declarative conversion between Rust structs and http header maps
//!
//! This crate maps the fields of a struct onto the entries of an [`http::HeaderMap`] and back.
//! Each struct describes its fields once, with a tag per field in the `name,opt1,opt2` form, and
//! gets a header encoder and decoder for free.
//!
//! # Features
//!
//! - Scalars: strings, booleans, every integer width, floats and timestamps
//! - Optional fields, sequences expanding into repeated headers, fixed-size arrays
//! - Nested records sharing the parent namespace, and flattened embedded records
//! - Field options: `omitempty`, `int` booleans, `unix` timestamps
//! - Custom per-type codecs through [`EncodeHeader`] and [`DecodeHeader`]
//!
//! # Example
//!
//! ```
//! use std::time::{Duration, SystemTime, UNIX_EPOCH};
//! use micro_header::{decode, encode, header_record};
//!
//! #[derive(Debug, Default, PartialEq)]
//! struct Options {
//!     content_type: String,
//!     content_length: i64,
//!     last_modified: Option<SystemTime>,
//!     if_none_match: Vec<String>,
//!     user_agent: Option<String>,
//!     debug: bool,
//!     request_id: String,
//! }
//!
//! header_record! {
//!     Options {
//!         content_type: "Content-Type",
//!         content_length: "Content-Length",
//!         last_modified: "Last-Modified",
//!         if_none_match: "If-None-Match",
//!         user_agent: "User-Agent,omitempty",
//!         debug: "X-Debug,int",
//!         request_id: "-",
//!     }
//! }
//!
//! let options = Options {
//!     content_type: "application/json".into(),
//!     content_length: 2,
//!     last_modified: Some(UNIX_EPOCH + Duration::from_secs(946_730_096)),
//!     if_none_match: vec!["foobar".into(), "foobaz".into()],
//!     user_agent: None,
//!     debug: true,
//!     request_id: "ignored".into(),
//! };
//!
//! let headers = encode(&options).unwrap();
//! assert_eq!(headers["content-type"], "application/json");
//! assert_eq!(headers["last-modified"], "Sat, 01 Jan 2000 12:34:56 GMT");
//! assert_eq!(headers.get_all("if-none-match").iter().count(), 2);
//! assert_eq!(headers["x-debug"], "1");
//! assert!(!headers.contains_key("user-agent"));
//! assert!(!headers.contains_key("request-id"));
//!
//! let mut decoded = Options::default();
//! decode(&headers, &mut decoded).unwrap();
//! assert_eq!(decoded, Options { request_id: String::new(), ..options });
//! ```
//!
//! # Architecture
//!
//! The crate is organized into several key modules:
//!
//! - [`schema`]: Record descriptor tables and field resolution
//! - [`codec`]: The encoder and decoder walks and the scalar conversions
//! - [`protocol`]: Field tags, dynamic values and error types
//!
//! # Core Components
//!
//! ## Records
//!
//! A [`Record`] exposes a static [`Schema`], resolved once per type: header names are
//! canonicalized to lower case and validated, tags are parsed into [`protocol::Options`]. The
//! [`header_record!`] macro writes the impl; [`SchemaBuilder`] does the same by hand.
//!
//! ## Field resolution
//!
//! - the tag `-` skips the field
//! - an embedded record without a declared name is flattened into its parent
//! - private fields are skipped
//! - otherwise the declared name, or the field identifier, is the header name
//!
//! ## Error Handling
//!
//! Every operation returns [`protocol::Error`]:
//!
//! - [`protocol::Error::InvalidRecord`]: the record declares an invalid header name
//! - [`protocol::Error::Format`]: a header value doesn't parse as its field's kind
//! - [`protocol::Error::Unencodable`]: a field value can't be written as a header value
//! - [`protocol::Error::Custom`]: raised by a custom codec
//!
//! # Limitations
//!
//! - Only one `Option` layer around a scalar is supported
//! - Nested records share one flat namespace; colliding names repeat on encode

pub mod codec;
pub mod protocol;
pub mod schema;

mod utils;
pub(crate) use utils::ensure;

pub use codec::{Decode, DecodeHeader, Encode, EncodeHeader, Indexed, Scalar, decode, encode};
pub use protocol::{Dynamic, Error};
pub use schema::{Record, Schema, SchemaBuilder};

pub use http::{HeaderMap, HeaderName, HeaderValue};

#[doc(hidden)]
pub mod __private {
    pub use once_cell::sync::Lazy;
}

//! Walks a record's schema against a header map.
//!
//! - [`HeaderEncoder`]: appends one entry per value of every encodable field
//! - [`HeaderDecoder`]: assigns fields in place from the values found under their names
//!
//! Both visit fields in declaration order and process flattened embedded records after the
//! record's own fields.

mod header_decoder;
mod header_encoder;

pub(crate) use header_decoder::HeaderDecoder;
pub(crate) use header_encoder::HeaderEncoder;

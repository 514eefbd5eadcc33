use std::num::{ParseFloatError, ParseIntError};

use http::header::{InvalidHeaderValue, ToStrError};
use thiserror::Error;

use crate::codec::ScalarKind;

#[derive(Debug, Error)]
pub enum Error {
    #[error("invalid header record `{record}`: {reason}")]
    InvalidRecord { record: &'static str, reason: String },

    #[error("invalid {kind} value {value:?} for field `{field}`: {source}")]
    Format {
        field: String,
        kind: ScalarKind,
        value: String,
        #[source]
        source: ScalarError,
    },

    #[error("field `{field}` can't be encoded as header value: {source}")]
    Unencodable {
        field: String,
        #[source]
        source: ScalarError,
    },

    #[error(transparent)]
    Custom(Box<dyn std::error::Error + Send + Sync>),
}

impl Error {
    pub fn invalid_record<S: ToString>(record: &'static str, reason: S) -> Self {
        Self::InvalidRecord { record, reason: reason.to_string() }
    }

    pub fn format<F: Into<String>, V: Into<String>>(field: F, kind: ScalarKind, value: V, source: ScalarError) -> Self {
        Self::Format { field: field.into(), kind, value: value.into(), source }
    }

    pub fn unencodable<F: Into<String>>(field: F, source: ScalarError) -> Self {
        Self::Unencodable { field: field.into(), source }
    }

    /// Wraps an error raised by a custom header codec.
    pub fn custom<E: Into<Box<dyn std::error::Error + Send + Sync>>>(e: E) -> Self {
        Self::Custom(e.into())
    }
}

/// Reasons a single header value can't be converted from or to a scalar.
#[derive(Debug, Error)]
pub enum ScalarError {
    #[error("invalid integer: {source}")]
    InvalidInteger {
        #[from]
        source: ParseIntError,
    },

    #[error("invalid float: {source}")]
    InvalidFloat {
        #[from]
        source: ParseFloatError,
    },

    #[error("invalid boolean, expect {expected}")]
    InvalidBool { expected: &'static str },

    #[error("invalid http date: {source}")]
    InvalidDate {
        #[from]
        source: httpdate::Error,
    },

    #[error("time out of range: {reason}")]
    TimeOutOfRange { reason: &'static str },

    #[error("invalid header value: {source}")]
    InvalidHeaderValue {
        #[from]
        source: InvalidHeaderValue,
    },

    #[error("header value is not visible ascii: {source}")]
    NotText {
        #[from]
        source: ToStrError,
    },
}

impl ScalarError {
    pub fn invalid_bool(expected: &'static str) -> Self {
        Self::InvalidBool { expected }
    }

    pub fn time_out_of_range(reason: &'static str) -> Self {
        Self::TimeOutOfRange { reason }
    }
}

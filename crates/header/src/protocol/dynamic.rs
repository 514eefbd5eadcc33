//! Opaque header values whose kind is only known at runtime.

use std::time::SystemTime;

use crate::codec::Scalar;
use crate::protocol::{Options, ScalarError};

/// A field value of unconstrained kind.
///
/// Encoding renders the contained value with the same rules as a statically typed field (a
/// [`Dynamic::List`] expands into one header entry per element). Decoding can't know the
/// original kind, so it yields [`Dynamic::Text`] for a single header value and
/// [`Dynamic::List`] when the header carries several values.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum Dynamic {
    #[default]
    Null,
    Text(String),
    Integer(i64),
    Unsigned(u64),
    Float(f64),
    Bool(bool),
    Time(SystemTime),
    List(Vec<String>),
}

impl Dynamic {
    #[inline]
    pub fn is_null(&self) -> bool {
        matches!(self, Dynamic::Null)
    }

    pub(crate) fn to_values(&self, options: &Options) -> Result<Vec<String>, ScalarError> {
        let value = match self {
            Dynamic::Null => return Ok(Vec::new()),
            Dynamic::List(values) => return Ok(values.clone()),
            Dynamic::Text(text) => text.clone(),
            Dynamic::Integer(n) => n.format(options)?,
            Dynamic::Unsigned(n) => n.format(options)?,
            Dynamic::Float(n) => n.format(options)?,
            Dynamic::Bool(b) => b.format(options)?,
            Dynamic::Time(t) => t.format(options)?,
        };
        Ok(vec![value])
    }

    pub(crate) fn from_values(values: &[&str]) -> Self {
        match values {
            [] => Dynamic::Null,
            [value] => Dynamic::Text((*value).to_owned()),
            values => Dynamic::List(values.iter().map(|value| (*value).to_owned()).collect()),
        }
    }
}

impl From<&str> for Dynamic {
    fn from(value: &str) -> Self {
        Dynamic::Text(value.to_owned())
    }
}

impl From<String> for Dynamic {
    fn from(value: String) -> Self {
        Dynamic::Text(value)
    }
}

impl From<i64> for Dynamic {
    fn from(value: i64) -> Self {
        Dynamic::Integer(value)
    }
}

impl From<u64> for Dynamic {
    fn from(value: u64) -> Self {
        Dynamic::Unsigned(value)
    }
}

impl From<f64> for Dynamic {
    fn from(value: f64) -> Self {
        Dynamic::Float(value)
    }
}

impl From<bool> for Dynamic {
    fn from(value: bool) -> Self {
        Dynamic::Bool(value)
    }
}

impl From<SystemTime> for Dynamic {
    fn from(value: SystemTime) -> Self {
        Dynamic::Time(value)
    }
}

impl From<Vec<String>> for Dynamic {
    fn from(value: Vec<String>) -> Self {
        Dynamic::List(value)
    }
}

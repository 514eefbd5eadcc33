//! String conversions for single header values.
//!
//! Every scalar field type implements [`Scalar`], which renders a value to header text and
//! parses it back. Two field options change the textual form:
//!
//! - `int`: booleans become `1`/`0` instead of `true`/`false`
//! - `unix`: timestamps become signed unix seconds instead of an http date
//!   (`Sat, 01 Jan 2000 12:34:56 GMT`, always in GMT)
//!
//! Numbers use their locale independent decimal form. Strings pass through verbatim.

use std::fmt;
use std::num::FpCategory;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use crate::ensure;
use crate::protocol::{Options, ScalarError};

/// Seconds from the epoch to 10000-01-01T00:00:00Z, the first instant an http date can't express.
const MAX_HTTP_DATE_SECS: u64 = 253_402_300_800;

/// The kind of a scalar, used to describe conversion failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScalarKind {
    String,
    Bool,
    Int,
    Uint,
    Float,
    Time,
}

impl fmt::Display for ScalarKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ScalarKind::String => "string",
            ScalarKind::Bool => "boolean",
            ScalarKind::Int => "integer",
            ScalarKind::Uint => "unsigned integer",
            ScalarKind::Float => "float",
            ScalarKind::Time => "time",
        };
        f.write_str(name)
    }
}

/// A value that occupies exactly one header value.
pub trait Scalar: Sized {
    const KIND: ScalarKind;

    /// Renders the value as header text.
    ///
    /// # Errors
    ///
    /// Returns [`ScalarError`] when the value has no textual form under `options`, e.g. a time
    /// before 1970 rendered as an http date.
    fn format(&self, options: &Options) -> Result<String, ScalarError>;

    /// Parses header text into a value.
    ///
    /// # Errors
    ///
    /// Returns [`ScalarError`] when `text` is not a valid representation of `Self`.
    fn parse(text: &str, options: &Options) -> Result<Self, ScalarError>;

    /// Whether the value is the zero value skipped by `omitempty`.
    fn is_empty(&self) -> bool;
}

impl Scalar for String {
    const KIND: ScalarKind = ScalarKind::String;

    fn format(&self, _options: &Options) -> Result<String, ScalarError> {
        Ok(self.clone())
    }

    fn parse(text: &str, _options: &Options) -> Result<Self, ScalarError> {
        Ok(text.to_owned())
    }

    fn is_empty(&self) -> bool {
        String::is_empty(self)
    }
}

impl Scalar for bool {
    const KIND: ScalarKind = ScalarKind::Bool;

    fn format(&self, options: &Options) -> Result<String, ScalarError> {
        let text = match (options.bool_as_int(), *self) {
            (true, true) => "1",
            (true, false) => "0",
            (false, true) => "true",
            (false, false) => "false",
        };
        Ok(text.to_owned())
    }

    fn parse(text: &str, options: &Options) -> Result<Self, ScalarError> {
        if options.bool_as_int() {
            return match text {
                "1" => Ok(true),
                "0" => Ok(false),
                _ => Err(ScalarError::invalid_bool("1 or 0")),
            };
        }

        match text {
            "1" | "t" | "T" | "TRUE" | "true" | "True" => Ok(true),
            "0" | "f" | "F" | "FALSE" | "false" | "False" => Ok(false),
            _ => Err(ScalarError::invalid_bool("true or false")),
        }
    }

    fn is_empty(&self) -> bool {
        !*self
    }
}

macro_rules! integer_scalar {
    ($kind:ident => $($ty:ty),+) => {
        $(
            impl Scalar for $ty {
                const KIND: ScalarKind = ScalarKind::$kind;

                fn format(&self, _options: &Options) -> Result<String, ScalarError> {
                    Ok(self.to_string())
                }

                fn parse(text: &str, _options: &Options) -> Result<Self, ScalarError> {
                    Ok(text.parse::<$ty>()?)
                }

                fn is_empty(&self) -> bool {
                    *self == 0
                }
            }
        )+
    };
}

integer_scalar!(Int => i8, i16, i32, i64, i128, isize);
integer_scalar!(Uint => u8, u16, u32, u64, u128, usize);

macro_rules! float_scalar {
    ($($ty:ty),+) => {
        $(
            impl Scalar for $ty {
                const KIND: ScalarKind = ScalarKind::Float;

                fn format(&self, _options: &Options) -> Result<String, ScalarError> {
                    Ok(self.to_string())
                }

                fn parse(text: &str, _options: &Options) -> Result<Self, ScalarError> {
                    Ok(text.parse::<$ty>()?)
                }

                fn is_empty(&self) -> bool {
                    self.classify() == FpCategory::Zero
                }
            }
        )+
    };
}

float_scalar!(f32, f64);

impl Scalar for SystemTime {
    const KIND: ScalarKind = ScalarKind::Time;

    fn format(&self, options: &Options) -> Result<String, ScalarError> {
        if options.unix_time() {
            return Ok(unix_seconds(*self).to_string());
        }

        let Ok(since_epoch) = self.duration_since(UNIX_EPOCH) else {
            return Err(ScalarError::time_out_of_range("http date can't express time before 1970"));
        };
        ensure!(since_epoch.as_secs() < MAX_HTTP_DATE_SECS, ScalarError::time_out_of_range("http date can't express year after 9999"));
        Ok(httpdate::fmt_http_date(*self))
    }

    fn parse(text: &str, options: &Options) -> Result<Self, ScalarError> {
        if options.unix_time() {
            return from_unix_seconds(text.parse::<i64>()?);
        }
        Ok(httpdate::parse_http_date(text)?)
    }

    /// The epoch is the zero time.
    fn is_empty(&self) -> bool {
        *self == UNIX_EPOCH
    }
}

/// Whole seconds since the epoch, floored for times before it.
fn unix_seconds(time: SystemTime) -> i64 {
    match time.duration_since(UNIX_EPOCH) {
        Ok(after) => i64::try_from(after.as_secs()).unwrap_or(i64::MAX),
        Err(before) => {
            let before = before.duration();
            let secs = i64::try_from(before.as_secs()).unwrap_or(i64::MAX);
            if before.subsec_nanos() > 0 { -secs - 1 } else { -secs }
        }
    }
}

fn from_unix_seconds(secs: i64) -> Result<SystemTime, ScalarError> {
    let offset = Duration::from_secs(secs.unsigned_abs());
    let time = if secs >= 0 { UNIX_EPOCH.checked_add(offset) } else { UNIX_EPOCH.checked_sub(offset) };
    time.ok_or_else(|| ScalarError::time_out_of_range("unix seconds overflow the system clock"))
}

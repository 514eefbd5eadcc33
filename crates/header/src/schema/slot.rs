//! Type-erased field accessors.
//!
//! A [`Slot`] pairs a field's getter and setter with the behaviour of its kind. The set of kinds
//! is closed: scalars (optionally behind one `Option` layer), sequences, header maps, nested
//! records and custom codecs. Which kind a field has is decided by its Rust type when the
//! descriptor table is built, through [`HeaderField`] and [`NestedField`].

use http::{HeaderMap, HeaderName};

use crate::codec::{self, DecodeHeader, EncodeHeader, Scalar, ScalarKind};
use crate::protocol::{Dynamic, Error, Options, ScalarError};
use crate::schema::Record;

/// Accessors of one record field, specialised for the kind of the field.
pub struct Slot<R> {
    pub(crate) kind: SlotKind<R>,
}

impl<R> std::fmt::Debug for Slot<R> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.kind {
            SlotKind::Value(slot) => f.debug_tuple("Value").field(&slot.kind()).finish(),
            SlotKind::Sequence(slot) => f.debug_tuple("Sequence").field(&slot.kind()).finish(),
            SlotKind::Headers(_) => f.write_str("Headers"),
            SlotKind::Record(_) => f.write_str("Record"),
            SlotKind::Custom(_) => f.write_str("Custom"),
        }
    }
}

pub(crate) enum SlotKind<R> {
    Value(Box<dyn ValueSlot<R>>),
    Sequence(Box<dyn SequenceSlot<R>>),
    Headers(Box<dyn HeadersSlot<R>>),
    Record(Box<dyn RecordSlot<R>>),
    Custom(Box<dyn CustomSlot<R>>),
}

impl<R> SlotKind<R> {
    /// Whether the field currently holds the zero value skipped by `omitempty`.
    pub(crate) fn is_empty(&self, record: &R) -> bool {
        match self {
            SlotKind::Value(slot) => slot.is_empty(record),
            SlotKind::Sequence(slot) => slot.is_empty(record),
            SlotKind::Headers(slot) => slot.headers(record).is_none_or(HeaderMap::is_empty),
            SlotKind::Record(slot) => slot.is_empty(record),
            SlotKind::Custom(slot) => slot.is_empty(record),
        }
    }
}

/// A field holding a single scalar, possibly behind `Option`.
pub(crate) trait ValueSlot<R>: Send + Sync {
    fn kind(&self) -> ScalarKind;

    fn is_empty(&self, record: &R) -> bool;

    /// `None` when the optional layer is unset.
    fn format(&self, record: &R, options: &Options) -> Option<Result<String, ScalarError>>;

    fn assign(&self, record: &mut R, text: &str, options: &Options) -> Result<(), ScalarError>;
}

/// The value at `index` of a multi-valued header was rejected.
#[derive(Debug)]
pub(crate) struct Rejected {
    pub(crate) index: usize,
    pub(crate) source: ScalarError,
}

/// A field holding several values under one header name.
pub(crate) trait SequenceSlot<R>: Send + Sync {
    fn kind(&self) -> ScalarKind;

    fn is_empty(&self, record: &R) -> bool;

    fn format(&self, record: &R, options: &Options) -> Result<Vec<String>, ScalarError>;

    fn assign(&self, record: &mut R, values: &[&str], options: &Options) -> Result<(), Rejected>;
}

/// A field holding a whole header map.
pub(crate) trait HeadersSlot<R>: Send + Sync {
    fn headers<'r>(&self, record: &'r R) -> Option<&'r HeaderMap>;

    fn assign(&self, record: &mut R, headers: HeaderMap);
}

/// A field holding another record.
pub(crate) trait RecordSlot<R>: Send + Sync {
    fn is_empty(&self, record: &R) -> bool;

    fn encode(&self, record: &R, headers: &mut HeaderMap) -> Result<(), Error>;

    fn decode(&self, record: &mut R, headers: &HeaderMap) -> Result<(), Error>;

    /// Whether any header the nested record reads is present.
    fn claims(&self, headers: &HeaderMap) -> bool;
}

/// A field whose type brings its own codec.
pub(crate) trait CustomSlot<R>: Send + Sync {
    fn is_empty(&self, record: &R) -> bool;

    fn encode(&self, record: &R, name: &HeaderName, headers: &mut HeaderMap) -> Result<(), Error>;

    fn decode(&self, record: &mut R, headers: &HeaderMap, name: &HeaderName) -> Result<(), Error>;

    /// Whether the codec would read anything from `headers` under `name`.
    fn claims(&self, headers: &HeaderMap, name: &HeaderName) -> bool;
}

mod sealed {
    pub trait Sealed {}
}

/// Field types the generic walk knows how to convert.
///
/// Implemented for every [`Scalar`], `Option` of a scalar, `Vec` and arrays of scalars,
/// [`Dynamic`] and [`HeaderMap`]. Nested records use [`NestedField`]; custom codecs are
/// declared with [`SchemaBuilder::custom`](super::SchemaBuilder::custom).
pub trait HeaderField: sealed::Sealed + Sized + 'static {
    #[doc(hidden)]
    fn slot<R: 'static>(get: fn(&R) -> &Self, get_mut: fn(&mut R) -> &mut Self) -> Slot<R>;
}

/// Record types that can be nested in another record, directly or behind `Option`.
pub trait NestedField: Sized + 'static {
    #[doc(hidden)]
    fn slot<R: 'static>(get: fn(&R) -> &Self, get_mut: fn(&mut R) -> &mut Self) -> Slot<R>;
}

struct Plain<R, T> {
    get: fn(&R) -> &T,
    get_mut: fn(&mut R) -> &mut T,
}

impl<R, T: Scalar> ValueSlot<R> for Plain<R, T> {
    fn kind(&self) -> ScalarKind {
        T::KIND
    }

    fn is_empty(&self, record: &R) -> bool {
        (self.get)(record).is_empty()
    }

    fn format(&self, record: &R, options: &Options) -> Option<Result<String, ScalarError>> {
        Some((self.get)(record).format(options))
    }

    fn assign(&self, record: &mut R, text: &str, options: &Options) -> Result<(), ScalarError> {
        *(self.get_mut)(record) = T::parse(text, options)?;
        Ok(())
    }
}

struct Optional<R, T> {
    get: fn(&R) -> &Option<T>,
    get_mut: fn(&mut R) -> &mut Option<T>,
}

impl<R, T: Scalar> ValueSlot<R> for Optional<R, T> {
    fn kind(&self) -> ScalarKind {
        T::KIND
    }

    fn is_empty(&self, record: &R) -> bool {
        (self.get)(record).is_none()
    }

    fn format(&self, record: &R, options: &Options) -> Option<Result<String, ScalarError>> {
        (self.get)(record).as_ref().map(|value| value.format(options))
    }

    fn assign(&self, record: &mut R, text: &str, options: &Options) -> Result<(), ScalarError> {
        *(self.get_mut)(record) = Some(T::parse(text, options)?);
        Ok(())
    }
}

fn format_all<'a, T: Scalar + 'a>(items: impl IntoIterator<Item = &'a T>, options: &Options) -> Result<Vec<String>, ScalarError> {
    items.into_iter().map(|item| item.format(options)).collect()
}

fn parse_all<T: Scalar>(values: &[&str], options: &Options) -> Result<Vec<T>, Rejected> {
    values
        .iter()
        .enumerate()
        .map(|(index, text)| T::parse(text, options).map_err(|source| Rejected { index, source }))
        .collect()
}

struct List<R, T> {
    get: fn(&R) -> &Vec<T>,
    get_mut: fn(&mut R) -> &mut Vec<T>,
}

impl<R, T: Scalar> SequenceSlot<R> for List<R, T> {
    fn kind(&self) -> ScalarKind {
        T::KIND
    }

    fn is_empty(&self, record: &R) -> bool {
        (self.get)(record).is_empty()
    }

    fn format(&self, record: &R, options: &Options) -> Result<Vec<String>, ScalarError> {
        format_all((self.get)(record), options)
    }

    fn assign(&self, record: &mut R, values: &[&str], options: &Options) -> Result<(), Rejected> {
        *(self.get_mut)(record) = parse_all(values, options)?;
        Ok(())
    }
}

struct Array<R, T, const N: usize> {
    get: fn(&R) -> &[T; N],
    get_mut: fn(&mut R) -> &mut [T; N],
}

impl<R, T: Scalar, const N: usize> SequenceSlot<R> for Array<R, T, N> {
    fn kind(&self) -> ScalarKind {
        T::KIND
    }

    fn is_empty(&self, _record: &R) -> bool {
        N == 0
    }

    fn format(&self, record: &R, options: &Options) -> Result<Vec<String>, ScalarError> {
        format_all((self.get)(record), options)
    }

    /// Fills the leading elements; extra values are ignored and missing ones keep their value.
    fn assign(&self, record: &mut R, values: &[&str], options: &Options) -> Result<(), Rejected> {
        let parsed: Vec<T> = parse_all(&values[..values.len().min(N)], options)?;
        for (element, item) in (self.get_mut)(record).iter_mut().zip(parsed) {
            *element = item;
        }
        Ok(())
    }
}

struct DynamicValue<R> {
    get: fn(&R) -> &Dynamic,
    get_mut: fn(&mut R) -> &mut Dynamic,
}

impl<R> SequenceSlot<R> for DynamicValue<R> {
    fn kind(&self) -> ScalarKind {
        ScalarKind::String
    }

    fn is_empty(&self, record: &R) -> bool {
        (self.get)(record).is_null()
    }

    fn format(&self, record: &R, options: &Options) -> Result<Vec<String>, ScalarError> {
        (self.get)(record).to_values(options)
    }

    fn assign(&self, record: &mut R, values: &[&str], _options: &Options) -> Result<(), Rejected> {
        *(self.get_mut)(record) = Dynamic::from_values(values);
        Ok(())
    }
}

struct Headers<R> {
    get: fn(&R) -> &HeaderMap,
    get_mut: fn(&mut R) -> &mut HeaderMap,
}

impl<R> HeadersSlot<R> for Headers<R> {
    fn headers<'r>(&self, record: &'r R) -> Option<&'r HeaderMap> {
        Some((self.get)(record))
    }

    fn assign(&self, record: &mut R, headers: HeaderMap) {
        *(self.get_mut)(record) = headers;
    }
}

struct OptionalHeaders<R> {
    get: fn(&R) -> &Option<HeaderMap>,
    get_mut: fn(&mut R) -> &mut Option<HeaderMap>,
}

impl<R> HeadersSlot<R> for OptionalHeaders<R> {
    fn headers<'r>(&self, record: &'r R) -> Option<&'r HeaderMap> {
        (self.get)(record).as_ref()
    }

    fn assign(&self, record: &mut R, headers: HeaderMap) {
        *(self.get_mut)(record) = Some(headers);
    }
}

struct Nested<R, T> {
    get: fn(&R) -> &T,
    get_mut: fn(&mut R) -> &mut T,
}

impl<R, T: Record> RecordSlot<R> for Nested<R, T> {
    fn is_empty(&self, _record: &R) -> bool {
        false
    }

    fn encode(&self, record: &R, headers: &mut HeaderMap) -> Result<(), Error> {
        codec::encode_record((self.get)(record), headers)
    }

    fn decode(&self, record: &mut R, headers: &HeaderMap) -> Result<(), Error> {
        codec::decode_record(headers, (self.get_mut)(record))
    }

    fn claims(&self, headers: &HeaderMap) -> bool {
        T::schema().claims(headers)
    }
}

struct OptionalNested<R, T> {
    get: fn(&R) -> &Option<T>,
    get_mut: fn(&mut R) -> &mut Option<T>,
}

impl<R, T: Record + Default> RecordSlot<R> for OptionalNested<R, T> {
    fn is_empty(&self, record: &R) -> bool {
        (self.get)(record).is_none()
    }

    fn encode(&self, record: &R, headers: &mut HeaderMap) -> Result<(), Error> {
        match (self.get)(record) {
            Some(nested) => codec::encode_record(nested, headers),
            None => Ok(()),
        }
    }

    /// Allocates the nested record only when one of its headers is present.
    fn decode(&self, record: &mut R, headers: &HeaderMap) -> Result<(), Error> {
        let slot = (self.get_mut)(record);
        if let Some(nested) = slot {
            return codec::decode_record(headers, nested);
        }

        if !T::schema().claims(headers) {
            return Ok(());
        }

        let mut nested = T::default();
        codec::decode_record(headers, &mut nested)?;
        *slot = Some(nested);
        Ok(())
    }

    fn claims(&self, headers: &HeaderMap) -> bool {
        T::schema().claims(headers)
    }
}

pub(crate) struct Codec<R, T> {
    pub(crate) get: fn(&R) -> &T,
    pub(crate) get_mut: fn(&mut R) -> &mut T,
}

impl<R, T: EncodeHeader + DecodeHeader> CustomSlot<R> for Codec<R, T> {
    fn is_empty(&self, record: &R) -> bool {
        (self.get)(record).is_empty_header()
    }

    fn encode(&self, record: &R, name: &HeaderName, headers: &mut HeaderMap) -> Result<(), Error> {
        (self.get)(record).encode_header(name, headers)
    }

    fn decode(&self, record: &mut R, headers: &HeaderMap, name: &HeaderName) -> Result<(), Error> {
        (self.get_mut)(record).decode_header(headers, name)
    }

    fn claims(&self, headers: &HeaderMap, name: &HeaderName) -> bool {
        T::claims_header(headers, name)
    }
}

/// A custom codec that only encodes; decoding leaves the field untouched.
pub(crate) struct EncodeOnly<R, T> {
    pub(crate) get: fn(&R) -> &T,
}

impl<R, T: EncodeHeader> CustomSlot<R> for EncodeOnly<R, T> {
    fn is_empty(&self, record: &R) -> bool {
        (self.get)(record).is_empty_header()
    }

    fn encode(&self, record: &R, name: &HeaderName, headers: &mut HeaderMap) -> Result<(), Error> {
        (self.get)(record).encode_header(name, headers)
    }

    fn decode(&self, _record: &mut R, _headers: &HeaderMap, _name: &HeaderName) -> Result<(), Error> {
        Ok(())
    }

    fn claims(&self, _headers: &HeaderMap, _name: &HeaderName) -> bool {
        false
    }
}

/// A custom codec that only decodes; encoding writes nothing.
pub(crate) struct DecodeOnly<R, T> {
    pub(crate) get_mut: fn(&mut R) -> &mut T,
}

impl<R, T: DecodeHeader> CustomSlot<R> for DecodeOnly<R, T> {
    fn is_empty(&self, _record: &R) -> bool {
        true
    }

    fn encode(&self, _record: &R, _name: &HeaderName, _headers: &mut HeaderMap) -> Result<(), Error> {
        Ok(())
    }

    fn decode(&self, record: &mut R, headers: &HeaderMap, name: &HeaderName) -> Result<(), Error> {
        (self.get_mut)(record).decode_header(headers, name)
    }

    fn claims(&self, headers: &HeaderMap, name: &HeaderName) -> bool {
        T::claims_header(headers, name)
    }
}

impl<R> Slot<R> {
    fn new(kind: SlotKind<R>) -> Self {
        Self { kind }
    }

    pub(crate) fn custom(slot: impl CustomSlot<R> + 'static) -> Self {
        Self::new(SlotKind::Custom(Box::new(slot)))
    }
}

impl<T: Scalar + 'static> sealed::Sealed for T {}

impl<T: Scalar + 'static> HeaderField for T {
    fn slot<R: 'static>(get: fn(&R) -> &Self, get_mut: fn(&mut R) -> &mut Self) -> Slot<R> {
        Slot::new(SlotKind::Value(Box::new(Plain { get, get_mut })))
    }
}

impl<T: Scalar + 'static> sealed::Sealed for Option<T> {}

impl<T: Scalar + 'static> HeaderField for Option<T> {
    fn slot<R: 'static>(get: fn(&R) -> &Self, get_mut: fn(&mut R) -> &mut Self) -> Slot<R> {
        Slot::new(SlotKind::Value(Box::new(Optional { get, get_mut })))
    }
}

impl<T: Scalar + 'static> sealed::Sealed for Vec<T> {}

impl<T: Scalar + 'static> HeaderField for Vec<T> {
    fn slot<R: 'static>(get: fn(&R) -> &Self, get_mut: fn(&mut R) -> &mut Self) -> Slot<R> {
        Slot::new(SlotKind::Sequence(Box::new(List { get, get_mut })))
    }
}

impl<T: Scalar + 'static, const N: usize> sealed::Sealed for [T; N] {}

impl<T: Scalar + 'static, const N: usize> HeaderField for [T; N] {
    fn slot<R: 'static>(get: fn(&R) -> &Self, get_mut: fn(&mut R) -> &mut Self) -> Slot<R> {
        Slot::new(SlotKind::Sequence(Box::new(Array { get, get_mut })))
    }
}

impl sealed::Sealed for Dynamic {}

impl HeaderField for Dynamic {
    fn slot<R: 'static>(get: fn(&R) -> &Self, get_mut: fn(&mut R) -> &mut Self) -> Slot<R> {
        Slot::new(SlotKind::Sequence(Box::new(DynamicValue { get, get_mut })))
    }
}

impl sealed::Sealed for HeaderMap {}

impl HeaderField for HeaderMap {
    fn slot<R: 'static>(get: fn(&R) -> &Self, get_mut: fn(&mut R) -> &mut Self) -> Slot<R> {
        Slot::new(SlotKind::Headers(Box::new(Headers { get, get_mut })))
    }
}

impl sealed::Sealed for Option<HeaderMap> {}

impl HeaderField for Option<HeaderMap> {
    fn slot<R: 'static>(get: fn(&R) -> &Self, get_mut: fn(&mut R) -> &mut Self) -> Slot<R> {
        Slot::new(SlotKind::Headers(Box::new(OptionalHeaders { get, get_mut })))
    }
}

impl<T: Record> NestedField for T {
    fn slot<R: 'static>(get: fn(&R) -> &Self, get_mut: fn(&mut R) -> &mut Self) -> Slot<R> {
        Slot::new(SlotKind::Record(Box::new(Nested { get, get_mut })))
    }
}

impl<T: Record + Default> NestedField for Option<T> {
    fn slot<R: 'static>(get: fn(&R) -> &Self, get_mut: fn(&mut R) -> &mut Self) -> Slot<R> {
        Slot::new(SlotKind::Record(Box::new(OptionalNested { get, get_mut })))
    }
}

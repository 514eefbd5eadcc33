//! Record descriptors.
//!
//! Rust has no runtime reflection, so every record type carries a static descriptor table, its
//! [`Schema`]. The table lists the fields in declaration order together with their tag and
//! accessors, and is resolved once (header names validated, options parsed, kinds fixed) the
//! first time the schema is used.
//!
//! Schemas are usually written with [`header_record!`](crate::header_record), which expands to
//! a [`SchemaBuilder`] chain stored in a lazily initialized static:
//!
//! ```
//! use micro_header::{header_record, Record};
//!
//! #[derive(Debug, Default)]
//! struct Channel {
//!     id: String,
//!     token: String,
//! }
//!
//! header_record! {
//!     Channel {
//!         id: "X-Goog-Channel-ID",
//!         token: "X-Goog-Channel-Token,omitempty",
//!     }
//! }
//!
//! let names: Vec<_> = Channel::schema().header_names().map(|name| name.as_str()).collect();
//! assert_eq!(names, ["x-goog-channel-id", "x-goog-channel-token"]);
//! ```

use std::fmt;

use http::{HeaderMap, HeaderName, HeaderValue};
use tracing::{debug, error, warn};

use crate::codec::{DecodeHeader, EncodeHeader};
use crate::protocol::Error;

mod field;
mod macros;
mod slot;

pub use field::Visibility;
pub use slot::HeaderField;
pub use slot::NestedField;
pub use slot::Slot;

pub(crate) use field::Resolution;
pub(crate) use slot::Rejected;
pub(crate) use slot::SlotKind;

use field::FieldDecl;
use slot::{Codec, DecodeOnly, EncodeOnly};

/// A struct that converts to and from http headers.
///
/// Implement it with [`header_record!`](crate::header_record), or by hand by returning a
/// static schema built with [`Schema::builder`].
pub trait Record: Sized + 'static {
    /// The resolved descriptor table of this record type.
    fn schema() -> &'static Schema<Self>;

    /// Encodes `self` into a fresh header map.
    ///
    /// # Errors
    ///
    /// See [`encode`](crate::encode).
    fn to_headers(&self) -> Result<HeaderMap, Error> {
        crate::encode(self)
    }

    /// Decodes a new record from `headers`, starting from the default value.
    ///
    /// # Errors
    ///
    /// See [`decode`](crate::decode).
    fn from_headers(headers: &HeaderMap) -> Result<Self, Error>
    where
        Self: Default,
    {
        let mut record = Self::default();
        crate::decode(headers, &mut record)?;
        Ok(record)
    }
}

/// A resolved field.
pub(crate) struct Field<R> {
    pub(crate) ident: &'static str,
    pub(crate) resolution: Resolution,
    pub(crate) slot: SlotKind<R>,
}

/// The resolved descriptor table of record type `R`.
pub struct Schema<R> {
    record: &'static str,
    fields: Vec<Field<R>>,
    /// why the table was rejected, reported on every encode and decode
    fault: Option<String>,
}

impl<R: 'static> Schema<R> {
    pub fn builder() -> SchemaBuilder<R> {
        SchemaBuilder { decls: Vec::new() }
    }
}

impl<R> Schema<R> {
    /// The Rust type name of the record.
    pub fn record_name(&self) -> &'static str {
        self.record
    }

    /// Header names of the record's own fields, in declaration order.
    ///
    /// Skipped and flattened fields have no name of their own and are not listed.
    pub fn header_names(&self) -> impl Iterator<Item = &HeaderName> {
        self.fields.iter().filter_map(|field| match &field.resolution {
            Resolution::Named { name, .. } => Some(name),
            Resolution::Skip | Resolution::Flatten => None,
        })
    }

    pub fn is_valid(&self) -> bool {
        self.fault.is_none()
    }

    pub(crate) fn fields(&self) -> &[Field<R>] {
        &self.fields
    }

    pub(crate) fn check(&self) -> Result<(), Error> {
        match &self.fault {
            None => Ok(()),
            Some(reason) => {
                error!(record = self.record, reason = %reason, "invalid header record");
                Err(Error::invalid_record(self.record, reason))
            }
        }
    }

    /// Whether `headers` holds a value for any field of this record, nested records included.
    pub(crate) fn claims(&self, headers: &HeaderMap) -> bool {
        self.fields.iter().any(|field| match (&field.resolution, &field.slot) {
            (Resolution::Flatten | Resolution::Named { .. }, SlotKind::Record(nested)) => nested.claims(headers),
            (Resolution::Skip | Resolution::Flatten, _) => false,
            (Resolution::Named { name, options }, _) if options.omit_empty() && headers.get(name).is_none_or(HeaderValue::is_empty) => false,
            (Resolution::Named { name, .. }, SlotKind::Custom(slot)) => slot.claims(headers, name),
            (Resolution::Named { .. }, SlotKind::Headers(_)) => !headers.is_empty(),
            (Resolution::Named { name, .. }, _) => headers.contains_key(name),
        })
    }
}

impl<R> fmt::Debug for Schema<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut fields = f.debug_map();
        for field in &self.fields {
            match &field.resolution {
                Resolution::Skip => fields.entry(&field.ident, &"-"),
                Resolution::Flatten => fields.entry(&field.ident, &"<flatten>"),
                Resolution::Named { name, .. } => fields.entry(&field.ident, name),
            };
        }
        fields.finish()?;
        if let Some(fault) = &self.fault {
            write!(f, " (invalid: {fault})")?;
        }
        Ok(())
    }
}

/// Builds the descriptor table of record type `R`.
///
/// Every declaration takes the field identifier, its tag (`""` for none) and accessors. Fields
/// are encoded and decoded in declaration order.
pub struct SchemaBuilder<R> {
    decls: Vec<(FieldDecl, Slot<R>)>,
}

impl<R> fmt::Debug for SchemaBuilder<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.decls.iter().map(|(decl, slot)| (decl.ident, slot))).finish()
    }
}

impl<R: 'static> SchemaBuilder<R> {
    /// Declares a scalar, optional scalar, sequence, [`Dynamic`](crate::Dynamic) or
    /// [`HeaderMap`] field.
    pub fn field<T: HeaderField>(mut self, ident: &'static str, tag: &'static str, get: fn(&R) -> &T, get_mut: fn(&mut R) -> &mut T) -> Self {
        self.decls.push((FieldDecl::new(ident, tag), T::slot(get, get_mut)));
        self
    }

    /// Declares a named nested record. Its fields share the parent's header namespace.
    pub fn nested<T: NestedField>(mut self, ident: &'static str, tag: &'static str, get: fn(&R) -> &T, get_mut: fn(&mut R) -> &mut T) -> Self {
        self.decls.push((FieldDecl::new(ident, tag), T::slot(get, get_mut)));
        self
    }

    /// Declares an embedded record. Without a declared name its fields are flattened into the
    /// parent and processed after the parent's own fields.
    pub fn embed<T: NestedField>(mut self, ident: &'static str, tag: &'static str, get: fn(&R) -> &T, get_mut: fn(&mut R) -> &mut T) -> Self {
        self.decls.push((FieldDecl::embedded(ident, tag), T::slot(get, get_mut)));
        self
    }

    /// Declares a field whose type encodes and decodes itself.
    pub fn custom<T>(mut self, ident: &'static str, tag: &'static str, get: fn(&R) -> &T, get_mut: fn(&mut R) -> &mut T) -> Self
    where
        T: EncodeHeader + DecodeHeader + 'static,
    {
        self.decls.push((FieldDecl::new(ident, tag), Slot::custom(Codec { get, get_mut })));
        self
    }

    /// Declares a field whose type only knows how to encode itself; decoding skips it.
    pub fn custom_encoder<T>(mut self, ident: &'static str, tag: &'static str, get: fn(&R) -> &T) -> Self
    where
        T: EncodeHeader + 'static,
    {
        self.decls.push((FieldDecl::new(ident, tag), Slot::custom(EncodeOnly { get })));
        self
    }

    /// Declares a field whose type only knows how to decode itself; encoding skips it.
    pub fn custom_decoder<T>(mut self, ident: &'static str, tag: &'static str, get_mut: fn(&mut R) -> &mut T) -> Self
    where
        T: DecodeHeader + 'static,
    {
        self.decls.push((FieldDecl::new(ident, tag), Slot::custom(DecodeOnly { get_mut })));
        self
    }

    /// Marks the previously declared field as private. Private fields are never encoded or
    /// decoded, except embedded records without a declared name, which are still flattened.
    pub fn private(mut self) -> Self {
        if let Some((decl, _)) = self.decls.last_mut() {
            decl.visibility = Visibility::Private;
        }
        self
    }

    /// Resolves every declaration.
    ///
    /// A declaration whose header name is invalid doesn't panic; the schema is marked invalid and
    /// every encode or decode of the record fails with [`Error::InvalidRecord`].
    pub fn build(self) -> Schema<R> {
        let record = std::any::type_name::<R>();
        let mut fields = Vec::with_capacity(self.decls.len());
        let mut faults = Vec::new();

        for (decl, slot) in self.decls {
            match field::resolve(&decl) {
                Ok(resolution) => fields.push(Field { ident: decl.ident, resolution, slot: slot.kind }),
                Err(e) => faults.push(format!("field `{}` has an invalid header name: {e}", decl.ident)),
            }
        }

        let fault = (!faults.is_empty()).then(|| faults.join("; "));
        match &fault {
            None => debug!(record, fields = fields.len(), "built header schema"),
            Some(fault) => warn!(record, fault = %fault, "header schema rejected"),
        }

        Schema { record, fields, fault }
    }
}

//! Field metadata resolution.
//!
//! Turns a field declaration (identifier, tag, visibility, embedding) into the plan both walks
//! follow. Resolution only looks at the declaration, never at field values, and runs once per
//! record type when its [`Schema`](super::Schema) is built.

use http::HeaderName;
use http::header::InvalidHeaderName;

use crate::protocol::{Options, SKIP_TAG, parse_tag};

/// Whether a field belongs to the public shape of its record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Visibility {
    Public,
    Private,
}

/// A field as declared in a record's descriptor table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct FieldDecl {
    pub(crate) ident: &'static str,
    pub(crate) tag: &'static str,
    pub(crate) visibility: Visibility,
    /// an anonymous nested record whose fields join the parent namespace
    pub(crate) embedded: bool,
}

/// What the encoder and decoder do with a field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Resolution {
    Skip,
    /// walk the embedded record's fields after the parent's own fields
    Flatten,
    Named { name: HeaderName, options: Options },
}

impl FieldDecl {
    pub(crate) fn new(ident: &'static str, tag: &'static str) -> Self {
        Self { ident, tag, visibility: Visibility::Public, embedded: false }
    }

    pub(crate) fn embedded(ident: &'static str, tag: &'static str) -> Self {
        Self { embedded: true, ..Self::new(ident, tag) }
    }
}

/// Resolves a declaration into its [`Resolution`].
///
/// Precedence:
/// 1. the tag `-` always skips
/// 2. an embedded record without a declared name is flattened, whatever its visibility
/// 3. private fields are skipped
/// 4. the declared name wins, otherwise the identifier is the header name
pub(crate) fn resolve(decl: &FieldDecl) -> Result<Resolution, InvalidHeaderName> {
    if decl.tag == SKIP_TAG {
        return Ok(Resolution::Skip);
    }

    let (name, options) = parse_tag(decl.tag);
    if name.is_empty() && decl.embedded {
        return Ok(Resolution::Flatten);
    }

    if decl.visibility == Visibility::Private {
        return Ok(Resolution::Skip);
    }

    let name = if name.is_empty() { decl.ident } else { name };
    let name = HeaderName::from_bytes(name.as_bytes())?;
    Ok(Resolution::Named { name, options })
}

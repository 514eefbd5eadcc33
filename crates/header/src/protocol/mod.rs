//! Core data model shared by the encoder and the decoder.
//!
//! - **Field tags** (`options`): the declarative `name,opt1,opt2` syntax
//!   - [`parse_tag`]: splits a tag into header name and [`Options`]
//!   - [`SKIP_TAG`], [`OMIT_EMPTY`], [`BOOL_AS_INT`], [`UNIX_TIME`]: recognized tokens
//!
//! - **Dynamic values** (`dynamic`): [`Dynamic`] holds a field value whose kind is decided at
//!   runtime
//!
//! - **Error Handling** (`error`):
//!   - [`Error`]: Top-level error type returned by encoding and decoding
//!   - [`ScalarError`]: Why a single value could not be converted

mod dynamic;
pub use dynamic::Dynamic;

mod options;
pub use options::parse_tag;
pub use options::Options;
pub use options::{BOOL_AS_INT, OMIT_EMPTY, SKIP_TAG, UNIX_TIME};

mod error;
pub use error::Error;
pub use error::ScalarError;

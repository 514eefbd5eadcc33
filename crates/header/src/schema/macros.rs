/// Implements [`Record`](crate::Record) for a struct by listing its header fields.
///
/// Each entry is a field identifier with an optional tag literal and an optional mode
/// attribute. Fields that aren't listed are invisible to the encoder and the decoder.
///
/// | mode           | field type                                     | builder call                   |
/// |----------------|------------------------------------------------|--------------------------------|
/// | (none)         | scalar, `Option`, `Vec`, array, `Dynamic`, `HeaderMap` | [`field`]              |
/// | `#[private]`   | same, never encoded nor decoded                | [`field`] + [`private`]        |
/// | `#[nested]`    | another record, or `Option` of one             | [`nested`]                     |
/// | `#[embed]`     | another record, flattened unless named         | [`embed`]                      |
/// | `#[custom]`    | [`EncodeHeader`] + [`DecodeHeader`]            | [`custom`]                     |
/// | `#[encoder]`   | [`EncodeHeader`]                               | [`custom_encoder`]             |
/// | `#[decoder]`   | [`DecodeHeader`]                               | [`custom_decoder`]             |
///
/// [`field`]: crate::SchemaBuilder::field
/// [`private`]: crate::SchemaBuilder::private
/// [`nested`]: crate::SchemaBuilder::nested
/// [`embed`]: crate::SchemaBuilder::embed
/// [`custom`]: crate::SchemaBuilder::custom
/// [`custom_encoder`]: crate::SchemaBuilder::custom_encoder
/// [`custom_decoder`]: crate::SchemaBuilder::custom_decoder
/// [`EncodeHeader`]: crate::EncodeHeader
/// [`DecodeHeader`]: crate::DecodeHeader
///
/// # Example
///
/// ```
/// use std::time::SystemTime;
/// use micro_header::{header_record, Indexed};
///
/// #[derive(Debug, Default)]
/// struct Common {
///     request_id: String,
/// }
///
/// header_record! {
///     Common {
///         request_id: "X-Request-Id",
///     }
/// }
///
/// #[derive(Debug, Default)]
/// struct Upload {
///     common: Common,
///     name: String,
///     size: Option<u64>,
///     modified: Option<SystemTime>,
///     parts: Indexed<String>,
///     checksum: String,
/// }
///
/// header_record! {
///     Upload {
///         #[embed] common,
///         name: "X-Upload-Name",
///         size: "Content-Length,omitempty",
///         modified: "Last-Modified,unix",
///         #[custom] parts: "X-Part",
///         checksum: "-",
///     }
/// }
/// ```
#[macro_export]
macro_rules! header_record {
    ($record:ident { $( $(#[$mode:ident])? $field:ident $(: $tag:literal)? ),* $(,)? }) => {
        impl $crate::Record for $record {
            fn schema() -> &'static $crate::Schema<Self> {
                static SCHEMA: $crate::__private::Lazy<$crate::Schema<$record>> = $crate::__private::Lazy::new(|| {
                    let builder = $crate::Schema::<$record>::builder();
                    $(
                        let builder = $crate::header_record!(@field builder, [$($mode)?], $field, concat!("" $(, $tag)?));
                    )*
                    builder.build()
                });
                &SCHEMA
            }
        }
    };

    (@field $builder:ident, [], $field:ident, $tag:expr) => {
        $builder.field(stringify!($field), $tag, |r| &r.$field, |r| &mut r.$field)
    };
    (@field $builder:ident, [private], $field:ident, $tag:expr) => {
        $builder.field(stringify!($field), $tag, |r| &r.$field, |r| &mut r.$field).private()
    };
    (@field $builder:ident, [nested], $field:ident, $tag:expr) => {
        $builder.nested(stringify!($field), $tag, |r| &r.$field, |r| &mut r.$field)
    };
    (@field $builder:ident, [embed], $field:ident, $tag:expr) => {
        $builder.embed(stringify!($field), $tag, |r| &r.$field, |r| &mut r.$field)
    };
    (@field $builder:ident, [custom], $field:ident, $tag:expr) => {
        $builder.custom(stringify!($field), $tag, |r| &r.$field, |r| &mut r.$field)
    };
    (@field $builder:ident, [encoder], $field:ident, $tag:expr) => {
        $builder.custom_encoder(stringify!($field), $tag, |r| &r.$field)
    };
    (@field $builder:ident, [decoder], $field:ident, $tag:expr) => {
        $builder.custom_decoder(stringify!($field), $tag, |r| &mut r.$field)
    };
    (@field $builder:ident, [$other:ident], $field:ident, $tag:expr) => {
        compile_error!(concat!("unknown header field mode `", stringify!($other), "`"))
    };
}

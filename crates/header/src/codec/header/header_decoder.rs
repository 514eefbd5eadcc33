//! Header map to record deserialization.

use http::{HeaderMap, HeaderName, HeaderValue};
use tracing::trace;

use crate::codec::ScalarKind;
use crate::protocol::Error;
use crate::schema::{Record, Rejected, Resolution, SlotKind};

/// Assigns the fields of a record from a header map.
///
/// Fields whose header is absent keep their current value. Scalars read the first value of
/// their header, sequences read all of them. A header map field captures the whole input
/// unless it is empty.
pub(crate) struct HeaderDecoder;

impl HeaderDecoder {
    pub(crate) fn decode<R: Record>(&self, src: &HeaderMap, record: &mut R) -> Result<(), Error> {
        let schema = R::schema();
        schema.check()?;

        let mut flattened = Vec::new();
        for field in schema.fields() {
            let (name, options) = match &field.resolution {
                Resolution::Skip => continue,
                Resolution::Flatten => {
                    flattened.push(field);
                    continue;
                }
                Resolution::Named { name, options } => (name, options),
            };

            // present but empty counts as absent
            if options.omit_empty() && src.get(name).is_none_or(HeaderValue::is_empty) {
                trace!(field = field.ident, header = %name, "omit empty header");
                continue;
            }

            match &field.slot {
                SlotKind::Custom(slot) => slot.decode(record, src, name)?,
                SlotKind::Headers(slot) => {
                    if src.is_empty() {
                        trace!(field = field.ident, "no headers to capture");
                        continue;
                    }
                    slot.assign(record, src.clone());
                }
                SlotKind::Record(slot) => {
                    trace!(field = field.ident, "decode nested record");
                    slot.decode(record, src)?;
                }
                SlotKind::Value(slot) => {
                    let Some(value) = src.get(name) else {
                        trace!(field = field.ident, header = %name, "header absent");
                        continue;
                    };
                    let text = to_text(name, slot.kind(), value)?;
                    slot.assign(record, text, options).map_err(|source| Error::format(name.as_str(), slot.kind(), text, source))?;
                }
                SlotKind::Sequence(slot) => {
                    let values = src.get_all(name).iter().map(|value| to_text(name, slot.kind(), value)).collect::<Result<Vec<_>, _>>()?;
                    if values.is_empty() {
                        trace!(field = field.ident, header = %name, "header absent");
                        continue;
                    }
                    slot.assign(record, &values, options).map_err(|Rejected { index, source }| {
                        let value = values.get(index).copied().unwrap_or_default();
                        Error::format(name.as_str(), slot.kind(), value, source)
                    })?;
                }
            }
        }

        for field in flattened {
            if let SlotKind::Record(slot) = &field.slot {
                trace!(field = field.ident, "decode flattened record");
                slot.decode(record, src)?;
            }
        }

        Ok(())
    }
}

fn to_text<'v>(name: &HeaderName, kind: ScalarKind, value: &'v HeaderValue) -> Result<&'v str, Error> {
    value.to_str().map_err(|e| Error::format(name.as_str(), kind, String::from_utf8_lossy(value.as_bytes()), e.into()))
}

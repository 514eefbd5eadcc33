//! Record to header map serialization.

use http::{HeaderMap, HeaderName, HeaderValue};
use tracing::trace;

use crate::protocol::Error;
use crate::schema::{Record, Resolution, SlotKind};

/// Appends the header representation of a record to an existing map.
///
/// The encoder never removes or replaces entries, so nested records sharing a header name with
/// their parent end up as several values of that name.
pub(crate) struct HeaderEncoder;

impl HeaderEncoder {
    pub(crate) fn encode<R: Record>(&self, record: &R, dst: &mut HeaderMap) -> Result<(), Error> {
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

            if options.omit_empty() && field.slot.is_empty(record) {
                trace!(field = field.ident, header = %name, "omit empty field");
                continue;
            }

            match &field.slot {
                SlotKind::Custom(slot) => slot.encode(record, name, dst)?,
                SlotKind::Sequence(slot) => {
                    let values = slot.format(record, options).map_err(|source| Error::unencodable(name.as_str(), source))?;
                    for value in values {
                        append(dst, name, value)?;
                    }
                }
                SlotKind::Value(slot) => match slot.format(record, options) {
                    Some(value) => {
                        let value = value.map_err(|source| Error::unencodable(name.as_str(), source))?;
                        append(dst, name, value)?;
                    }
                    None => trace!(field = field.ident, "skip absent optional"),
                },
                SlotKind::Headers(slot) => {
                    if let Some(headers) = slot.headers(record) {
                        for (key, value) in headers {
                            dst.append(key.clone(), value.clone());
                        }
                    }
                }
                SlotKind::Record(slot) => {
                    trace!(field = field.ident, "encode nested record");
                    slot.encode(record, dst)?;
                }
            }
        }

        for field in flattened {
            if let SlotKind::Record(slot) = &field.slot {
                trace!(field = field.ident, "encode flattened record");
                slot.encode(record, dst)?;
            }
        }

        Ok(())
    }
}

fn append(dst: &mut HeaderMap, name: &HeaderName, value: String) -> Result<(), Error> {
    let value = HeaderValue::try_from(value).map_err(|e| Error::unencodable(name.as_str(), e.into()))?;
    dst.append(name.clone(), value);
    Ok(())
}

use serde::ser::SerializeMap;
use serde::Serializer;

/// Serialize ordered `(name, value)` pairs as a map, keeping column order.
///
/// Backs the `Serialize` impl of [`Fields`](super::model::Fields), so a
/// sample's `raw` and `extra` come out as JSON objects in file column order.
pub fn serialize_fields_as_map<S>(fields: &[(String, String)], serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    let mut map = serializer.serialize_map(Some(fields.len()))?;
    for (k, v) in fields {
        map.serialize_entry(k, v)?;
    }
    map.end()
}

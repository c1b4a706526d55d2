//! Endpoint descriptors and the data plumbing around raw records
//!
//! Everything here is data and pure functions: where a response body hides
//! its record array, which raw fields the local filter inspects, and how a
//! raw record projects into the fixed display shape. Adding another listing
//! to an existing provider means building a descriptor, not writing code.

use crate::types::{RawRecord, Record};
use serde_json::Value;

/// Ordered fallbacks locating the record array inside a response body.
///
/// Paths are dotted key chains tried in order; a body that is itself a bare
/// array is accepted after every path misses. The field-service platform
/// alone has served `result.entityList`, a plain `result` array, and a bare
/// array, depending on endpoint and account age.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Envelope {
    paths: Vec<String>,
}

impl Envelope {
    pub fn new<I, S>(paths: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            paths: paths.into_iter().map(Into::into).collect(),
        }
    }

    /// Extract the page's record list, or `None` when nothing matched.
    ///
    /// Callers treat `None` the same as an empty list: the page carried no
    /// records.
    pub fn extract(&self, body: &Value) -> Option<Vec<RawRecord>> {
        for path in &self.paths {
            if let Some(list) = lookup_path(body, path).and_then(Value::as_array) {
                return Some(object_entries(list));
            }
        }
        body.as_array().map(|list| object_entries(list))
    }
}

fn lookup_path<'a>(body: &'a Value, path: &str) -> Option<&'a Value> {
    let mut current = body;
    for segment in path.split('.') {
        current = current.get(segment)?;
    }
    Some(current)
}

/// Keep the object entries; a stray scalar inside the list is dropped.
fn object_entries(list: &[Value]) -> Vec<RawRecord> {
    list.iter()
        .filter_map(|value| value.as_object().cloned())
        .collect()
}

/// Source-field fallbacks for each display field, in priority order.
///
/// A source counts as present when it holds a non-null scalar; empty
/// strings fall through to the next source. A display field with no
/// present source projects as `None`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldMap {
    pub id: Vec<String>,
    pub name: Vec<String>,
    pub code: Vec<String>,
    pub description: Vec<String>,
    pub quantity: Vec<String>,
    pub price: Vec<String>,
}

impl FieldMap {
    /// Project a raw record into the fixed display shape.
    pub fn project(&self, raw: &RawRecord) -> Record {
        Record {
            id: string_field(raw, &self.id),
            name: string_field(raw, &self.name),
            code: string_field(raw, &self.code),
            description: string_field(raw, &self.description),
            quantity: number_field(raw, &self.quantity),
            price: number_field(raw, &self.price),
        }
    }
}

/// First present, non-empty source rendered as text.
pub(crate) fn string_field<S: AsRef<str>>(raw: &RawRecord, sources: &[S]) -> Option<String> {
    sources.iter().find_map(|name| {
        raw.get(name.as_ref())
            .and_then(scalar_text)
            .filter(|text| !text.is_empty())
    })
}

/// First source holding a number, or a string that parses as one.
pub(crate) fn number_field<S: AsRef<str>>(raw: &RawRecord, sources: &[S]) -> Option<f64> {
    sources.iter().find_map(|name| match raw.get(name.as_ref()) {
        Some(Value::Number(n)) => n.as_f64(),
        Some(Value::String(s)) => s.trim().parse().ok(),
        _ => None,
    })
}

/// Text rendering of a scalar, for display and for substring matching.
/// Numbers use their plain decimal form so numeric codes stay searchable.
fn scalar_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

/// Case-insensitive substring match over the configured search fields.
///
/// `needle` must already be trimmed and lowercased. An empty needle accepts
/// every record; a record missing all search fields matches nothing else.
pub(crate) fn record_matches<S: AsRef<str>>(
    raw: &RawRecord,
    search_fields: &[S],
    needle: &str,
) -> bool {
    if needle.is_empty() {
        return true;
    }
    search_fields.iter().any(|field| {
        raw.get(field.as_ref())
            .and_then(scalar_text)
            .is_some_and(|text| text.to_lowercase().contains(needle))
    })
}

/// One remote listing resource, described entirely by data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EndpointDescriptor {
    /// Name used for selection and logging ("products", "equipments", ...)
    pub name: String,
    /// Path under the provider's base URL
    pub path: String,
    /// RPC call name for call-style APIs; `None` for plain REST listings
    pub call: Option<String>,
    /// Where the record array hides in the response body
    pub envelope: Envelope,
    /// Raw fields the local filter inspects
    pub search_fields: Vec<String>,
    /// Projection table into the display shape
    pub fields: FieldMap,
}

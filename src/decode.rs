//! Type-directed request decoding.
//!
//! # Responsibilities
//! - Decode JSON bodies into a target shape
//! - Flatten multipart form fields and query parameters into key→value maps
//! - Merge all sources onto the shape's zero value in a fixed precedence order
//!
//! # Design Decisions
//! - One decode path serves JSON, form data, and query strings by funneling
//!   everything through a common flattened-map representation
//! - Precedence: zero value, then body, then query — later sources overwrite
//!   same-named fields, so callers can adjust parameters via the query string
//!   without altering the body
//! - A query or form key appearing more than once is dropped entirely rather
//!   than merged into a list
//! - Numeric-looking strings from flat sources are coerced to integers;
//!   everything else stays text

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::{Map, Value};

use crate::context::RequestContext;
use crate::error::{BindError, BindResult};

/// Populate a `T` from the request's body and query string.
///
/// The merge starts from the JSON encoding of `T::default()`, so fields no
/// source supplies keep the shape's zero value; validation decides whether
/// that is acceptable.
pub async fn decode<T>(ctx: &mut RequestContext) -> BindResult<T>
where
    T: Default + Serialize + DeserializeOwned,
{
    let mut value = serde_json::to_value(T::default())
        .map_err(|e| BindError::decode(format!("unrepresentable target shape: {e}")))?;

    if !ctx.body().is_empty() {
        if ctx.is_multipart() {
            let form = ctx.form().await?;
            let flat = flatten(form.fields());
            merge_flat(&mut value, flat)?;
        } else {
            let body: Value = serde_json::from_slice(ctx.body())
                .map_err(|e| BindError::decode(format!("invalid json body: {e}")))?;
            merge(&mut value, body);
        }
    }

    let query = flatten(&ctx.query_pairs());
    merge_flat(&mut value, query)?;

    serde_json::from_value(value).map_err(|e| BindError::decode(e.to_string()))
}

/// Flatten key/value pairs into a single-valued map.
///
/// Keys with more than one value are dropped entirely. Values are coerced
/// with [`coerce`].
pub(crate) fn flatten(pairs: &[(String, String)]) -> Map<String, Value> {
    let mut flat = Map::new();
    for (key, value) in pairs {
        let repeated = pairs.iter().filter(|(k, _)| k == key).count() > 1;
        if !repeated {
            flat.insert(key.clone(), coerce(value));
        }
    }
    flat
}

/// Coerce a flat-source string: integers become numbers, the rest stays text.
pub(crate) fn coerce(value: &str) -> Value {
    match value.parse::<i64>() {
        Ok(n) => Value::from(n),
        Err(_) => Value::String(value.to_string()),
    }
}

/// Merge a flattened map onto the target, field by field.
///
/// A non-empty map cannot land on a non-object target (e.g. a top-level
/// array shape); that is a decode error. An empty map is a no-op.
fn merge_flat(target: &mut Value, flat: Map<String, Value>) -> BindResult<()> {
    if flat.is_empty() {
        return Ok(());
    }
    match target {
        Value::Object(fields) => {
            for (key, value) in flat {
                fields.insert(key, value);
            }
            Ok(())
        }
        _ => Err(BindError::decode(
            "cannot merge fields into non-object shape",
        )),
    }
}

/// Merge a decoded body value onto the target.
///
/// Objects merge recursively so a partial body lands on the zeroed shape
/// without clearing sibling fields; anything else replaces the target
/// wholesale. A `null` body leaves the target untouched.
fn merge(target: &mut Value, source: Value) {
    match (target, source) {
        (_, Value::Null) => {}
        (Value::Object(fields), Value::Object(source_fields)) => {
            for (key, value) in source_fields {
                match fields.get_mut(&key) {
                    Some(existing) => merge(existing, value),
                    None => {
                        fields.insert(key, value);
                    }
                }
            }
        }
        (target, source) => *target = source,
    }
}

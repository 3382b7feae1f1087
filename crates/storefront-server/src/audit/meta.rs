//! Metadata serialization for the `audit_log.meta` text column

use serde::Serialize;

/// Null stays null, strings are stored verbatim, everything else becomes JSON
/// text. A payload that cannot be serialized is stored as null.
pub fn serialize_meta<M: Serialize + ?Sized>(meta: Option<&M>) -> Option<String> {
    let value = match serde_json::to_value(meta?) {
        Ok(value) => value,
        Err(e) => {
            tracing::warn!(error = %e, "Audit meta could not be serialized, storing null");
            return None;
        },
    };

    match value {
        serde_json::Value::Null => None,
        serde_json::Value::String(s) => Some(s),
        other => Some(other.to_string()),
    }
}

//! PATCH bodies distinguish "absent" from "explicitly null"
//!
//! Fields are declared as `Option<Option<T>>`:
//!
//! - absent -> `None` (leave the column alone)
//! - `null` -> `Some(None)` (write NULL)
//! - value -> `Some(Some(v))`
//!
//! ```rust,ignore
//! #[derive(Deserialize)]
//! struct UpdateBrandCommand {
//!     #[serde(default, deserialize_with = "deserialize_some")]
//!     name: Option<Option<String>>,
//! }
//! ```

use serde::{Deserialize, Deserializer};

/// Wrap whatever is present, including `null`, in `Some`.
pub fn deserialize_some<'de, T, D>(deserializer: D) -> Result<Option<T>, D::Error>
where
    T: Deserialize<'de>,
    D: Deserializer<'de>,
{
    T::deserialize(deserializer).map(Some)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Deserialize)]
    struct Body {
        #[serde(default, deserialize_with = "deserialize_some")]
        name: Option<Option<String>>,
    }

    #[test]
    fn test_absent_null_and_value() {
        let absent: Body = serde_json::from_str("{}").unwrap();
        assert_eq!(absent.name, None);

        let null: Body = serde_json::from_str(r#"{"name":null}"#).unwrap();
        assert_eq!(null.name, Some(None));

        let value: Body = serde_json::from_str(r#"{"name":"Fendt"}"#).unwrap();
        assert_eq!(value.name, Some(Some("Fendt".to_string())));
    }
}

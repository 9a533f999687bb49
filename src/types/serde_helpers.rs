//! Serde helpers for the API's form-encoded payloads.
//!
//! Form fields are flat strings, so lists travel either comma-separated or
//! as JSON text inside a single field.

use std::fmt::Display;

use serde::{Serialize, Serializer};

/// Serialize a slice of values as one comma-separated string.
///
/// # Example
///
/// ```rust
/// use serde::Serialize;
/// use soundslice_api_client::types::serde_helpers::comma_separated;
///
/// #[derive(Serialize)]
/// struct Form<'a> {
///     #[serde(serialize_with = "comma_separated::serialize")]
///     order: &'a [u64],
/// }
///
/// let form = serde_urlencoded::to_string(Form { order: &[3, 1, 2] }).unwrap();
/// assert_eq!(form, "order=3%2C1%2C2");
/// ```
pub mod comma_separated {
    use super::*;

    /// Serialize values joined with `,`.
    pub fn serialize<V, T, S>(values: &V, serializer: S) -> Result<S::Ok, S::Error>
    where
        V: AsRef<[T]> + ?Sized,
        T: Display,
        S: Serializer,
    {
        let s = values
            .as_ref()
            .iter()
            .map(|v| v.to_string())
            .collect::<Vec<_>>()
            .join(",");
        serializer.serialize_str(&s)
    }
}

/// Serialize a value as its compact JSON text.
pub mod json_string {
    use super::*;

    /// Serialize `value` with `serde_json` and emit the text as a string.
    pub fn serialize<T, S>(value: &T, serializer: S) -> Result<S::Ok, S::Error>
    where
        T: Serialize + ?Sized,
        S: Serializer,
    {
        let text = serde_json::to_string(value).map_err(serde::ser::Error::custom)?;
        serializer.serialize_str(&text)
    }
}

#[cfg(test)]
mod tests {
    use serde::Serialize;

    use super::*;

    #[derive(Serialize)]
    struct Form<'a> {
        #[serde(serialize_with = "json_string::serialize")]
        points: &'a [[f64; 2]],
    }

    #[test]
    fn test_json_string_in_form() {
        let form = serde_urlencoded::to_string(Form {
            points: &[[0.0, 0.5], [1.0, 2.25]],
        })
        .unwrap();
        let decoded: Vec<(String, String)> = serde_urlencoded::from_str(&form).unwrap();
        assert_eq!(decoded[0].0, "points");
        assert_eq!(decoded[0].1, "[[0.0,0.5],[1.0,2.25]]");
    }

    #[derive(Serialize)]
    struct Order<'a> {
        #[serde(serialize_with = "comma_separated::serialize")]
        order: &'a [u64],
    }

    #[test]
    fn test_comma_separated_empty() {
        let form = serde_urlencoded::to_string(Order { order: &[] }).unwrap();
        assert_eq!(form, "order=");
    }
}

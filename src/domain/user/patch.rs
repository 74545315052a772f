//! Partial-update plumbing for nullable fields.
//!
//! A patch field is `Option<Option<T>>`: `None` leaves the stored value alone,
//! `Some(None)` clears it, `Some(Some(v))` replaces it.

use serde::{Deserialize, Deserializer};

/// Deserializes a present field (including `null`) as `Some(..)`.
///
/// Pair with `#[serde(default)]` so an absent field stays `None`.
pub fn nullable<'de, T, D>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    T: Deserialize<'de>,
    D: Deserializer<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

/// Writes each present patch field onto the matching target field.
macro_rules! apply_present {
    ($target:expr, $patch:expr, [$($field:ident),+ $(,)?]) => {
        $(
            if let Some(value) = $patch.$field {
                $target.$field = value;
            }
        )+
    };
}

pub(crate) use apply_present;

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Deserialize)]
    struct Sample {
        #[serde(default, deserialize_with = "nullable")]
        age: Option<Option<i32>>,
    }

    #[test]
    fn absent_null_and_value_are_distinct() {
        let absent: Sample = serde_json::from_str("{}").unwrap();
        let null: Sample = serde_json::from_str(r#"{"age": null}"#).unwrap();
        let value: Sample = serde_json::from_str(r#"{"age": 30}"#).unwrap();

        assert_eq!(absent.age, None);
        assert_eq!(null.age, Some(None));
        assert_eq!(value.age, Some(Some(30)));
    }
}

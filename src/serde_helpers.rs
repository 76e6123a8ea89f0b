//! Serde helpers for request payload encodings.

/// Deserialize a field into `Option<Option<T>>` so that an explicit JSON
/// `null` can be told apart from an omitted field.
///
/// Pair with `#[serde(default)]`: an absent key leaves the field `None`,
/// `null` yields `Some(None)` and a value yields `Some(Some(v))`.
pub mod explicit_null {
    use serde::{Deserialize, Deserializer, Serialize, Serializer};

    pub fn serialize<T, S>(value: &Option<Option<T>>, serializer: S) -> Result<S::Ok, S::Error>
    where
        T: Serialize,
        S: Serializer,
    {
        match value {
            Some(Some(v)) => v.serialize(serializer),
            _ => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, T, D>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
    where
        T: Deserialize<'de>,
        D: Deserializer<'de>,
    {
        Option::<T>::deserialize(deserializer).map(Some)
    }
}

use serde::{Deserialize, Deserializer};

/// Deserializes a value the service may send as `null`, substituting the
/// type's default.
///
/// ```
/// use serde::Deserialize;
///
/// #[derive(Deserialize)]
/// struct Entry {
///     #[serde(default, deserialize_with = "tablo_metadata::nullable::deserialize")]
///     cast: Vec<String>,
/// }
///
/// let entry: Entry = serde_json::from_str(r#"{"cast": null}"#).unwrap();
/// assert!(entry.cast.is_empty());
/// ```
pub fn deserialize<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    let o: Option<T> = Deserialize::deserialize(deserializer)?;
    Ok(o.unwrap_or_default())
}

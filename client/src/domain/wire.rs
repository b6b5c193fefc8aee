//! Lenient decoding helpers shared by API records.

use serde::{Deserialize, Deserializer};

/// Decode a field where an explicit `null` means the same as a missing key.
///
/// Pair with `#[serde(default)]` so absent keys also take `T::default()`.
pub(crate) fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

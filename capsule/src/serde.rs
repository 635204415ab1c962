use anyhow::Result;
use base64::{
    alphabet,
    engine::{DecodePaddingMode, GeneralPurpose, GeneralPurposeConfig},
};
use log::warn;
use serde::{de::DeserializeOwned, Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Standard alphabet, always padded on output, padding optional on input
pub const BASE64_ENGINE: GeneralPurpose = GeneralPurpose::new(
    &alphabet::STANDARD,
    GeneralPurposeConfig::new().with_decode_padding_mode(DecodePaddingMode::Indifferent),
);

/// Helper trait to serialize any serde-implementing value to JSON text
pub trait Json: Serialize {
    fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }
}

impl<T> Json for T where T: Serialize {}

/// Deserialize an optional field, reading a value of the wrong shape (an
/// enum variant this crate does not know, a number out of range) as absent
/// instead of failing the whole document.
///
/// Use together with `#[serde(default)]`.
pub fn lenient<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = match Option::<Value>::deserialize(deserializer)? {
        Some(value) => value,
        None => return Ok(None),
    };

    match T::deserialize(&value) {
        Ok(parsed) => Ok(Some(parsed)),
        Err(error) => {
            warn!("Ignoring unreadable field value {value}: {error}");
            Ok(None)
        }
    }
}

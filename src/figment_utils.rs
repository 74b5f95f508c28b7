//! Helpers for using the figment config parsing library

use figment::providers::Format;
use json5 as json;

/// A figment provider that can parse JSON5.
///
/// The config file is JSON5 so users can leave comments and trailing commas in it, which the
/// stock figment JSON provider rejects.
pub struct JsonProvider;

impl Format for JsonProvider {
    type Error = json::Error;

    const NAME: &'static str = "JSON5";

    fn from_str<'de, T: serde::de::DeserializeOwned>(string: &'de str) -> Result<T, Self::Error> {
        json::from_str(string)
    }
}

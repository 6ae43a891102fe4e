//! Common types and utilities for the iControl REST API

use serde::Deserialize;

/// Error body returned by iControl REST on failed requests
#[derive(Debug, Deserialize)]
pub struct ApiErrorResponse {
    pub code: Option<u16>,
    pub message: Option<String>,
}

/// Encodes a partition-qualified object name for use as a URL path segment.
/// iControl REST addresses `/Common/al1` as `~Common~al1`.
pub fn encode_name(name: &str) -> String {
    urlencoding::encode(&name.replace('/', "~")).into_owned()
}

/// An object type living under a fixed iControl REST collection
pub trait BigIpApiResource {
    fn api_path() -> &'static str;

    fn resource_path(name: &str) -> String {
        format!("{}/{}", Self::api_path(), encode_name(name))
    }
}

/// Accepts either a JSON string or a JSON number for a textual field.
/// Several iControl properties (timeouts, ports) switch representation
/// between versions.
pub mod string_or_number {
    use serde::{Deserialize, Deserializer};

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum StringOrNumber {
            String(String),
            I64(i64),
            F64(f64),
        }

        Ok(
            Option::<StringOrNumber>::deserialize(deserializer)?.map(|v| match v {
                StringOrNumber::String(s) => s,
                StringOrNumber::I64(n) => n.to_string(),
                StringOrNumber::F64(n) => n.to_string(),
            }),
        )
    }
}

/// Accepts either a JSON number or a numeric string for an integer field
pub mod number_or_string {
    use serde::{Deserialize, Deserializer};

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum NumberOrString {
            I64(i64),
            String(String),
        }

        match Option::<NumberOrString>::deserialize(deserializer)? {
            Some(NumberOrString::I64(n)) => Ok(Some(n)),
            Some(NumberOrString::String(s)) => {
                s.parse::<i64>().map(Some).map_err(serde::de::Error::custom)
            }
            None => Ok(None),
        }
    }
}

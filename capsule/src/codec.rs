//! The content URI format stored in a capsule's on-chain string field.
//!
//! Content is serialized to JSON and carried as a data URI. The primary form
//! base64-encodes the UTF-8 bytes of the JSON text:
//!
//! ```text
//! data:application/json;base64,eyJ0aXRsZSI6IkhpIn0=
//! ```
//!
//! If the byte transport cannot produce a payload, the JSON text is
//! percent-escaped instead:
//!
//! ```text
//! data:application/json,%7B%22title%22%3A%22Hi%22%7D
//! ```
//!
//! Older capsules were written by an encoder that mapped each character of
//! the JSON text straight to one byte before base64, so non-ASCII text in
//! them only survives as Latin-1. The decoder accepts those as well.

use anyhow::{anyhow, Result};
use base64::Engine;
use log::{debug, error, warn};

use crate::{content::CapsuleContent, error::DecodeError, serde::Json, serde::BASE64_ENGINE};

pub const BASE64_PREFIX: &str = "data:application/json;base64,";
pub const PERCENT_ESCAPED_PREFIX: &str = "data:application/json,";

/// The binary-to-text step of the primary encoding
pub trait TransportEncoding {
    fn encode(&self, bytes: &[u8]) -> Result<String>;

    fn decode(&self, payload: &str) -> Result<Vec<u8>>;
}

/// Standard-alphabet base64
#[derive(Clone, Copy, Debug, Default)]
pub struct Base64Transport;

impl TransportEncoding for Base64Transport {
    fn encode(&self, bytes: &[u8]) -> Result<String> {
        Ok(BASE64_ENGINE.encode(bytes))
    }

    fn decode(&self, payload: &str) -> Result<Vec<u8>> {
        BASE64_ENGINE
            .decode(payload.trim())
            .map_err(|error| anyhow!(error))
    }
}

/// A content URI split into its tag and payload
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ContentUri<'a> {
    Base64(&'a str),
    PercentEscaped(&'a str),
}

impl<'a> TryFrom<&'a str> for ContentUri<'a> {
    type Error = DecodeError;

    fn try_from(uri: &'a str) -> Result<Self, Self::Error> {
        if let Some(payload) = uri.strip_prefix(BASE64_PREFIX) {
            Ok(ContentUri::Base64(payload))
        } else if let Some(payload) = uri.strip_prefix(PERCENT_ESCAPED_PREFIX) {
            Ok(ContentUri::PercentEscaped(payload))
        } else {
            Err(DecodeError::UnrecognizedTag)
        }
    }
}

/// Encodes content into content URIs and decodes them back
#[derive(Clone, Debug, Default)]
pub struct ContentCodec<T = Base64Transport> {
    transport: T,
}

impl<T> ContentCodec<T>
where
    T: TransportEncoding,
{
    pub fn new(transport: T) -> Self {
        ContentCodec { transport }
    }

    /// Produce the content URI for a record. Only JSON serialization can
    /// fail; a failing byte transport degrades to the percent-escaped form.
    pub fn encode(&self, content: &CapsuleContent) -> Result<String> {
        let json = content.to_json()?;

        match self.transport.encode(json.as_bytes()) {
            Ok(payload) => Ok(format!("{BASE64_PREFIX}{payload}")),
            Err(error) => {
                warn!("Base64 encoding failed, using percent-escaped fallback: {error}");
                Ok(format!(
                    "{PERCENT_ESCAPED_PREFIX}{}",
                    urlencoding::encode(&json)
                ))
            }
        }
    }

    /// Decode a content URI, reporting why it could not be decoded
    pub fn try_decode(&self, uri: &str) -> Result<CapsuleContent, DecodeError> {
        match ContentUri::try_from(uri)? {
            ContentUri::Base64(payload) => {
                let bytes = self
                    .transport
                    .decode(payload)
                    .map_err(|error| DecodeError::MalformedTransportEncoding(error.to_string()))?;

                match parse_utf8(&bytes) {
                    Ok(content) => Ok(content),
                    Err(utf8_error) => {
                        debug!("Not a UTF-8 JSON payload ({utf8_error}), retrying as legacy text");
                        parse_latin1(&bytes)
                    }
                }
            }
            ContentUri::PercentEscaped(payload) => {
                let json = urlencoding::decode(payload)
                    .map_err(|error| DecodeError::MalformedTransportEncoding(error.to_string()))?;
                Ok(serde_json::from_str(&json)?)
            }
        }
    }

    /// Decode a content URI, substituting a placeholder record for anything
    /// that cannot be decoded
    pub fn decode(&self, uri: &str) -> CapsuleContent {
        match self.try_decode(uri) {
            Ok(content) => content,
            Err(DecodeError::UnrecognizedTag) => CapsuleContent::unknown(),
            Err(decode_error) => {
                error!("Error parsing content URI: {decode_error}");
                CapsuleContent::undecodable()
            }
        }
    }
}

fn parse_utf8(bytes: &[u8]) -> Result<CapsuleContent, DecodeError> {
    let json = std::str::from_utf8(bytes)
        .map_err(|error| DecodeError::MalformedTransportEncoding(error.to_string()))?;
    Ok(serde_json::from_str(json)?)
}

fn parse_latin1(bytes: &[u8]) -> Result<CapsuleContent, DecodeError> {
    let json: String = bytes.iter().copied().map(char::from).collect();
    Ok(serde_json::from_str(&json)?)
}

/// Encode with the default base64 transport
pub fn encode(content: &CapsuleContent) -> Result<String> {
    ContentCodec::<Base64Transport>::default().encode(content)
}

/// Decode with the default base64 transport; never fails
pub fn decode(uri: &str) -> CapsuleContent {
    ContentCodec::<Base64Transport>::default().decode(uri)
}

/// Decode with the default base64 transport, reporting failures
pub fn try_decode(uri: &str) -> Result<CapsuleContent, DecodeError> {
    ContentCodec::<Base64Transport>::default().try_decode(uri)
}

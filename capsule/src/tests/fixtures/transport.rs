use anyhow::{anyhow, Result};

use crate::codec::{Base64Transport, TransportEncoding};

/// A transport whose encoder always fails; decoding is plain base64
pub struct FailingTransport;

impl TransportEncoding for FailingTransport {
    fn encode(&self, _bytes: &[u8]) -> Result<String> {
        Err(anyhow!("Transport unavailable"))
    }

    fn decode(&self, payload: &str) -> Result<Vec<u8>> {
        Base64Transport.decode(payload)
    }
}

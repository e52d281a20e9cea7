//! Payload encoding.
//!
//! Tracks are stored as `data:` URIs, `data:<mime>;base64,<data>`. The text
//! form is what the track store keeps; the bytes are what a decoder plays.

use base64::{Engine, engine::general_purpose::STANDARD};

use crate::{Error, Result};

pub const BASE64_MARKER: &str = ";base64,";
pub const DEFAULT_MIME: &str = "audio/mpeg";

const DATA_SCHEME: &str = "data:";

pub fn encode(bytes: &[u8], mime: &str) -> String {
    let body = STANDARD.encode(bytes);

    let mut payload =
        String::with_capacity(DATA_SCHEME.len() + mime.len() + BASE64_MARKER.len() + body.len());
    payload.push_str(DATA_SCHEME);
    payload.push_str(mime);
    payload.push_str(BASE64_MARKER);
    payload.push_str(&body);
    payload
}

pub fn encode_audio(bytes: &[u8]) -> String {
    encode(bytes, DEFAULT_MIME)
}

/// Decode everything after the first `;base64,` marker.
pub fn decode(payload: &str) -> Result<Vec<u8>> {
    let start = payload
        .find(BASE64_MARKER)
        .ok_or_else(|| Error::MalformedPayload("missing base64 marker".to_string()))?
        + BASE64_MARKER.len();

    STANDARD
        .decode(payload[start..].trim_end())
        .map_err(|e| Error::MalformedPayload(e.to_string()))
}

/// The mime type declared in front of the marker, if the payload has one.
pub fn mime_of(payload: &str) -> Option<&str> {
    let end = payload.find(BASE64_MARKER)?;
    let mime = payload[..end].strip_prefix(DATA_SCHEME)?;

    (!mime.is_empty()).then_some(mime)
}

pub fn mime_for(name: &str) -> &'static str {
    let ext = name
        .rsplit_once('.')
        .map(|(_, ext)| ext.to_ascii_lowercase())
        .unwrap_or_default();

    match ext.as_str() {
        "mp3" => "audio/mpeg",
        "m4a" | "mp4" => "audio/mp4",
        "flac" => "audio/flac",
        "ogg" | "oga" => "audio/ogg",
        "wav" => "audio/wav",
        _ => "application/octet-stream",
    }
}

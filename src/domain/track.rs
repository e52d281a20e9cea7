use crate::codec;

pub type TrackId = String;

/// One imported track. The payload is the `data:` URI text produced by
/// [`codec::encode`]; it is never mutated after import.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Track {
    pub id: TrackId,
    pub payload: String,
}

impl Track {
    pub fn new(id: impl Into<TrackId>, payload: impl Into<String>) -> Self {
        Track {
            id: id.into(),
            payload: payload.into(),
        }
    }

    /// Encode raw audio bytes, picking the mime type from the id's extension.
    pub fn from_bytes(id: impl Into<TrackId>, bytes: &[u8]) -> Self {
        let id = id.into();
        let payload = codec::encode(bytes, codec::mime_for(&id));

        Track { id, payload }
    }

    pub fn decode(&self) -> crate::Result<Vec<u8>> {
        codec::decode(&self.payload)
    }

    pub fn mime(&self) -> Option<&str> {
        codec::mime_of(&self.payload)
    }
}

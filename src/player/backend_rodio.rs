use anyhow::Result;
use rodio::{Decoder, OutputStream, OutputStreamBuilder, Sink, decoder::builder::SeekMode};
use std::{io::Cursor, time::Duration};

use crate::player::MediaSource;

pub struct RodioBackend {
    sink: Sink,
    loaded: bool,
    _stream: OutputStream,
}

impl RodioBackend {
    pub fn new() -> Result<Self> {
        let stream = OutputStreamBuilder::open_default_stream()?;
        let sink = Sink::connect_new(stream.mixer());

        Ok(Self {
            sink,
            loaded: false,
            _stream: stream,
        })
    }

    /// Decode from the start and leave the sink paused on the new source.
    pub fn load(&mut self, source: &MediaSource) -> Result<()> {
        let decoder = decode(source)?;

        // `clear` also pauses the sink
        self.sink.clear();
        self.sink.append(decoder);
        self.loaded = true;
        Ok(())
    }

    pub fn unload(&mut self) {
        self.sink.clear();
        self.loaded = false;
    }

    pub fn is_loaded(&self) -> bool {
        self.loaded
    }

    pub fn play(&mut self) {
        self.sink.play();
    }

    pub fn pause(&mut self) {
        self.sink.pause();
    }

    pub fn seek(&mut self, secs: f64) -> Result<()> {
        self.sink.try_seek(Duration::from_secs_f64(secs))?;
        Ok(())
    }

    pub fn position(&self) -> Duration {
        self.sink.get_pos()
    }

    pub fn is_paused(&self) -> bool {
        self.sink.is_paused()
    }

    pub fn track_ended(&self) -> bool {
        self.loaded && self.sink.empty()
    }
}

fn decode(source: &MediaSource) -> Result<Decoder<Cursor<Vec<u8>>>> {
    let len = source.bytes.len() as u64;

    let mut builder = Decoder::builder()
        .with_data(Cursor::new(source.bytes.clone()))
        .with_byte_len(len)
        .with_seek_mode(SeekMode::Nearest)
        .with_seekable(true);

    if let Some(mime) = &source.mime {
        builder = builder.with_mime_type(mime);
    }

    if let Some((_, ext)) = source.id.rsplit_once('.') {
        builder = builder.with_hint(ext);
    }

    Ok(builder.build()?)
}

use crate::{Error, Result, TrackId};

/// In-memory play order plus a cursor. Rebuilt on every startup; order
/// changes are never persisted.
#[derive(Debug, Default)]
pub struct PlaylistSession {
    order: Vec<TrackId>,
    cursor: Option<usize>,
}

impl PlaylistSession {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuild the order from storage. A resume track goes first and takes
    /// the cursor. Unless `dedupe` is set, the resume id is also kept at its
    /// stored position, so it can appear twice.
    pub fn initialize(&mut self, stored: Vec<TrackId>, resume: Option<TrackId>, dedupe: bool) {
        match resume {
            Some(id) => {
                let mut order = Vec::with_capacity(stored.len() + 1);
                order.push(id.clone());
                order.extend(stored.into_iter().filter(|s| !dedupe || *s != id));

                self.order = order;
                self.cursor = Some(0);
            }
            None => {
                self.order = stored;
                self.cursor = None;
            }
        }
    }

    pub fn add_track(&mut self, id: TrackId) {
        self.order.push(id);
    }

    /// Bounds-checked lookup. Does not move the cursor.
    pub fn track_at(&self, index: usize) -> Result<&TrackId> {
        self.order.get(index).ok_or(Error::IndexOutOfRange {
            index,
            len: self.order.len(),
        })
    }

    pub fn set_cursor(&mut self, index: usize) -> Result<()> {
        self.track_at(index)?;
        self.cursor = Some(index);
        Ok(())
    }

    /// Index after the cursor, wrapping to the start. Without a cursor the
    /// first track is next.
    pub fn next_index(&self) -> Result<usize> {
        if self.order.is_empty() {
            return Err(Error::EmptyPlaylist);
        }

        Ok(match self.cursor {
            Some(i) => (i + 1) % self.order.len(),
            None => 0,
        })
    }

    pub fn current(&self) -> Option<&TrackId> {
        self.cursor.and_then(|i| self.order.get(i))
    }

    pub fn cursor(&self) -> Option<usize> {
        self.cursor
    }

    pub fn order(&self) -> &[TrackId] {
        &self.order
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }
}

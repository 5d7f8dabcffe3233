//! The display boundary: where renders and diagnostics are handed off.

use crate::encode::EncodedPayload;

/// Named output slots for renders.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Slot {
    /// The unedited resize of the latest upload.
    Preview,
    /// The latest adjustment render.
    Target,
}

/// Receives everything the session publishes.
///
/// The browser host implements this against `<img>` and status elements;
/// [`MemoryPublisher`] keeps everything in memory.
pub trait Publisher {
    /// Replace the contents of `slot` with `payload`.
    fn publish(&mut self, slot: Slot, payload: &EncodedPayload);

    /// Show a human-readable diagnostic.
    fn status(&mut self, message: &str);
}

/// A publisher that records the current value of every slot, plus a full
/// history of publications.
#[derive(Debug, Default, Clone)]
pub struct MemoryPublisher {
    preview: Option<EncodedPayload>,
    target: Option<EncodedPayload>,
    status: Option<String>,
    history: Vec<Slot>,
}

impl MemoryPublisher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn slot(&self, slot: Slot) -> Option<&EncodedPayload> {
        match slot {
            Slot::Preview => self.preview.as_ref(),
            Slot::Target => self.target.as_ref(),
        }
    }

    pub fn preview(&self) -> Option<&EncodedPayload> {
        self.preview.as_ref()
    }

    pub fn target(&self) -> Option<&EncodedPayload> {
        self.target.as_ref()
    }

    /// The last diagnostic shown, if any.
    pub fn last_status(&self) -> Option<&str> {
        self.status.as_deref()
    }

    /// Slots in the order they were published to.
    pub fn history(&self) -> &[Slot] {
        &self.history
    }

    /// Number of render publications so far.
    pub fn publish_count(&self) -> usize {
        self.history.len()
    }
}

impl Publisher for MemoryPublisher {
    fn publish(&mut self, slot: Slot, payload: &EncodedPayload) {
        self.history.push(slot);
        match slot {
            Slot::Preview => self.preview = Some(payload.clone()),
            Slot::Target => self.target = Some(payload.clone()),
        }
    }

    fn status(&mut self, message: &str) {
        self.status = Some(message.to_string());
    }
}

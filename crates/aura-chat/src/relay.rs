//! Message relay
//!
//! Sends a selected prompt into the chat. The host may wire up a primary
//! send path, a fallback (stuff the composer and click send), both, or
//! neither; with neither available delivery drops silently.

/// One way of pushing a message into the chat
pub trait MessageSink {
    /// Attempt delivery; false means this path could not take the message
    fn send(&mut self, text: &str) -> bool;
}

/// How a message ended up being delivered
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Delivery {
    Primary,
    Fallback,
    Dropped,
}

/// Two-path delivery with silent degradation
#[derive(Default)]
pub struct MessageRelay {
    primary: Option<Box<dyn MessageSink>>,
    fallback: Option<Box<dyn MessageSink>>,
}

impl MessageRelay {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_primary(mut self, sink: impl MessageSink + 'static) -> Self {
        self.primary = Some(Box::new(sink));
        self
    }

    pub fn with_fallback(mut self, sink: impl MessageSink + 'static) -> Self {
        self.fallback = Some(Box::new(sink));
        self
    }

    /// Deliver a message through the first path that takes it
    ///
    /// Blank text is dropped without touching either path.
    pub fn deliver(&mut self, text: &str) -> Delivery {
        if text.trim().is_empty() {
            return Delivery::Dropped;
        }

        if let Some(primary) = self.primary.as_mut() {
            if primary.send(text) {
                return Delivery::Primary;
            }
            log::debug!("Primary send path refused message, trying fallback");
        }

        if let Some(fallback) = self.fallback.as_mut() {
            if fallback.send(text) {
                return Delivery::Fallback;
            }
        }

        log::debug!("No send path available, message dropped");
        Delivery::Dropped
    }
}

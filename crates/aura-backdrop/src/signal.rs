//! Host theme signal
//!
//! The host feeds theme readings (a dark-mode flag, or None when it has no
//! reading) through a channel; the engine drains it on its own cadence.
//! Consecutive identical readings are collapsed at the source, so the
//! consumer only ever sees changes.

use std::sync::mpsc::{self, Receiver, Sender};

/// Producer half held by the host integration
pub struct ThemeSignalSource {
    sender: Sender<Option<bool>>,
    last: Option<Option<bool>>,
}

impl ThemeSignalSource {
    /// Publish a reading; duplicates of the previous reading are dropped
    pub fn publish(&mut self, dark: Option<bool>) {
        if self.last == Some(dark) {
            return;
        }
        self.last = Some(dark);
        let _ = self.sender.send(dark);
    }
}

/// Consumer half held by the engine
pub struct ThemeSignal {
    receiver: Receiver<Option<bool>>,
}

impl ThemeSignal {
    /// Create a connected source/consumer pair
    pub fn channel() -> (ThemeSignalSource, ThemeSignal) {
        let (sender, receiver) = mpsc::channel();
        (
            ThemeSignalSource { sender, last: None },
            ThemeSignal { receiver },
        )
    }

    /// Next pending reading without blocking
    pub fn try_recv(&self) -> Option<Option<bool>> {
        self.receiver.try_recv().ok()
    }

    /// Latest pending reading, discarding any it superseded
    pub fn drain(&self) -> Option<Option<bool>> {
        let mut latest = None;
        while let Ok(reading) = self.receiver.try_recv() {
            latest = Some(reading);
        }
        latest
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_publish_and_receive() {
        let (mut source, signal) = ThemeSignal::channel();
        source.publish(Some(true));
        assert_eq!(signal.try_recv(), Some(Some(true)));
        assert_eq!(signal.try_recv(), None);
    }

    #[test]
    fn test_consecutive_duplicates_collapse() {
        let (mut source, signal) = ThemeSignal::channel();
        source.publish(Some(false));
        source.publish(Some(false));
        source.publish(Some(false));

        assert_eq!(signal.try_recv(), Some(Some(false)));
        assert_eq!(signal.try_recv(), None);
    }

    #[test]
    fn test_alternating_readings_pass_through() {
        let (mut source, signal) = ThemeSignal::channel();
        source.publish(Some(true));
        source.publish(Some(false));
        source.publish(Some(true));

        assert_eq!(signal.try_recv(), Some(Some(true)));
        assert_eq!(signal.try_recv(), Some(Some(false)));
        assert_eq!(signal.try_recv(), Some(Some(true)));
    }

    #[test]
    fn test_drain_keeps_latest() {
        let (mut source, signal) = ThemeSignal::channel();
        source.publish(Some(true));
        source.publish(None);
        source.publish(Some(false));

        assert_eq!(signal.drain(), Some(Some(false)));
        assert_eq!(signal.drain(), None);
    }

    #[test]
    fn test_missing_reading_is_a_value() {
        let (mut source, signal) = ThemeSignal::channel();
        source.publish(None);
        assert_eq!(signal.try_recv(), Some(None));
    }
}

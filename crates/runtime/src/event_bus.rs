use crate::frame::Frame;

/// A frame-stamped event record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Stamped<E> {
    pub frame_index: u64,
    pub event: E,
}

/// Frame-stamped event log, drained by the host.
///
/// The event type is supplied by the embedding crate as a stable enum; the
/// bus itself only guarantees ordering (emission order within and across
/// frames) and that `drain` hands each event out exactly once.
#[derive(Debug)]
pub struct EventBus<E> {
    events: Vec<Stamped<E>>,
}

impl<E> Default for EventBus<E> {
    fn default() -> Self {
        Self { events: Vec::new() }
    }
}

impl<E> EventBus<E> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn emit(&mut self, frame: Frame, event: E) {
        self.events.push(Stamped {
            frame_index: frame.index,
            event,
        });
    }

    pub fn events(&self) -> &[Stamped<E>] {
        &self.events
    }

    pub fn drain(&mut self) -> Vec<Stamped<E>> {
        std::mem::take(&mut self.events)
    }
}

#[cfg(test)]
mod tests {
    use super::EventBus;
    use crate::frame::Frame;

    #[derive(Debug, Clone, PartialEq, Eq)]
    enum TestEvent {
        Clicked(&'static str),
        Cleared,
    }

    #[test]
    fn records_events_with_frame_index() {
        let mut bus = EventBus::new();
        bus.emit(Frame::new(2, 0.1), TestEvent::Clicked("a"));
        assert_eq!(bus.events().len(), 1);
        assert_eq!(bus.events()[0].frame_index, 2);
        assert_eq!(bus.events()[0].event, TestEvent::Clicked("a"));
    }

    #[test]
    fn drain_hands_events_out_once_in_order() {
        let mut bus = EventBus::new();
        bus.emit(Frame::new(0, 1.0), TestEvent::Clicked("a"));
        bus.emit(Frame::new(1, 1.0), TestEvent::Cleared);
        let drained = bus.drain();
        assert_eq!(drained.len(), 2);
        assert_eq!(drained[0].event, TestEvent::Clicked("a"));
        assert_eq!(drained[1].event, TestEvent::Cleared);
        assert!(bus.events().is_empty());
        assert!(bus.drain().is_empty());
    }
}

mod bus;
mod events;

use parking_lot::Mutex;
use std::sync::Arc;

pub use bus::EventBus;
pub use events::CanvasEvent;

pub trait EventHandler: Send {
    fn handle_event(&mut self, event: &CanvasEvent);
}

/// Handler that buffers events until the owner drains them.
///
/// Clones share one buffer, so the shell keeps a clone and subscribes another.
#[derive(Debug, Clone, Default)]
pub struct EventQueue {
    events: Arc<Mutex<Vec<CanvasEvent>>>,
}

impl EventQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn drain(&self) -> Vec<CanvasEvent> {
        std::mem::take(&mut *self.events.lock())
    }

    pub fn len(&self) -> usize {
        self.events.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.lock().is_empty()
    }
}

impl EventHandler for EventQueue {
    fn handle_event(&mut self, event: &CanvasEvent) {
        self.events.lock().push(event.clone());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_queue_receives_bus_events() {
        let bus = EventBus::new();
        let queue = EventQueue::new();
        bus.subscribe(Box::new(queue.clone()));

        bus.emit(CanvasEvent::SurfaceNeedsRedraw);
        bus.emit(CanvasEvent::HistoryAvailabilityChanged {
            can_undo: true,
            can_redo: false,
        });

        assert_eq!(queue.len(), 2);
        let events = queue.drain();
        assert_eq!(events[0], CanvasEvent::SurfaceNeedsRedraw);
        assert!(queue.is_empty());
    }
}

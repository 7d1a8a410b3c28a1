use crate::{
    input::events::MapEvent,
    prelude::{HashMap, VecDeque},
};

/// Event listener callback type
pub type EventCallback = Box<dyn Fn(&MapEvent) + Send + Sync>;

/// Event management system for the map
#[derive(Default)]
pub struct EventManager {
    /// Event listeners by event type
    listeners: HashMap<String, Vec<EventCallback>>,
    /// Event queue for processing
    event_queue: VecDeque<MapEvent>,
}

impl EventManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an event listener
    pub fn on<F>(&mut self, event_type: &str, callback: F)
    where
        F: Fn(&MapEvent) + Send + Sync + 'static,
    {
        self.listeners
            .entry(event_type.to_string())
            .or_default()
            .push(Box::new(callback));
    }

    /// Emit an event to the queue
    pub fn emit(&mut self, event: MapEvent) {
        self.event_queue.push_back(event);
    }

    /// Drains queued events in arrival order, notifying listeners on the way
    pub fn process_events(&mut self) -> Vec<MapEvent> {
        let events: Vec<_> = self.event_queue.drain(..).collect();

        for event in &events {
            if let Some(callbacks) = self.listeners.get(event.event_type()) {
                for callback in callbacks {
                    callback(event);
                }
            }
        }

        events
    }

    /// Clear all events from the queue
    pub fn clear_events(&mut self) {
        self.event_queue.clear();
    }

    /// Get number of pending events
    pub fn pending_events(&self) -> usize {
        self.event_queue.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::geo::LatLng;
    use std::sync::{
        atomic::{AtomicUsize, Ordering},
        Arc,
    };

    #[test]
    fn test_events_drain_in_order() {
        let mut manager = EventManager::new();
        manager.emit(MapEvent::ZoomEnd { zoom: 3.0 });
        manager.emit(MapEvent::MoveEnd {
            center: LatLng::new(1.0, 2.0),
        });
        assert_eq!(manager.pending_events(), 2);

        let events = manager.process_events();
        assert_eq!(events[0], MapEvent::ZoomEnd { zoom: 3.0 });
        assert_eq!(events[1].event_type(), "moveend");
        assert_eq!(manager.pending_events(), 0);
    }

    #[test]
    fn test_listeners_receive_matching_events() {
        let mut manager = EventManager::new();
        let zooms = Arc::new(AtomicUsize::new(0));
        let counter = zooms.clone();
        manager.on("zoomend", move |_| {
            counter.fetch_add(1, Ordering::SeqCst);
        });

        manager.emit(MapEvent::ZoomEnd { zoom: 3.0 });
        manager.emit(MapEvent::ZoomEnd { zoom: 4.0 });
        manager.emit(MapEvent::MoveEnd {
            center: LatLng::default(),
        });
        manager.process_events();

        assert_eq!(zooms.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn test_clear_events() {
        let mut manager = EventManager::new();
        manager.emit(MapEvent::ZoomEnd { zoom: 3.0 });
        manager.clear_events();
        assert!(manager.process_events().is_empty());
    }
}

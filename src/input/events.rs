use crate::core::geo::{LatLng, Point};
use crate::layers::manager::OverlayHandle;

/// Map event types that can be emitted by the map
#[derive(Debug, Clone, PartialEq)]
pub enum MapEvent {
    /// Map finished its initial setup
    Load { center: LatLng, zoom: f64 },
    /// Map view has changed (center or zoom)
    ViewChanged { center: LatLng, zoom: f64 },
    /// Pan ended
    MoveEnd { center: LatLng },
    /// Zoom ended
    ZoomEnd { zoom: f64 },
    /// Map container was resized
    Resize { size: Point },
    /// Overlay was attached to the map
    OverlayAdd { handle: OverlayHandle },
    /// Overlay was detached from the map
    OverlayRemove { handle: OverlayHandle },
}

impl MapEvent {
    /// Name used when registering listeners for this event
    pub fn event_type(&self) -> &'static str {
        match self {
            MapEvent::Load { .. } => "load",
            MapEvent::ViewChanged { .. } => "viewchanged",
            MapEvent::MoveEnd { .. } => "moveend",
            MapEvent::ZoomEnd { .. } => "zoomend",
            MapEvent::Resize { .. } => "resize",
            MapEvent::OverlayAdd { .. } => "overlayadd",
            MapEvent::OverlayRemove { .. } => "overlayremove",
        }
    }

    /// Whether the visible region may have changed, so density data must be refetched
    pub fn is_viewport_trigger(&self) -> bool {
        matches!(
            self,
            MapEvent::Load { .. }
                | MapEvent::MoveEnd { .. }
                | MapEvent::Resize { .. }
                | MapEvent::ZoomEnd { .. }
        )
    }
}

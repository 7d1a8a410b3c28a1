use crate::{
    core::{
        bounds::GeoBounds,
        config::HeatmapOptions,
        geo::{LatLng, Point},
        viewport::Viewport,
    },
    input::{EventManager, MapEvent},
    layers::{
        heatmap::{HeatGrid, HeatPoint, HeatmapLayer, OverlayOptions},
        manager::{OverlayHandle, OverlayManager},
    },
    traits::MapView,
    MapError, Result,
};

/// Headless map: a viewport, an event queue and the attached heat overlays
pub struct Map {
    viewport: Viewport,
    overlays: OverlayManager,
    event_manager: EventManager,
}

impl Map {
    pub fn new(center: LatLng, zoom: f64, size: Point) -> Self {
        Self::with_viewport(Viewport::new(center, zoom, size))
    }

    pub fn with_viewport(viewport: Viewport) -> Self {
        Self {
            viewport,
            overlays: OverlayManager::new(),
            event_manager: EventManager::new(),
        }
    }

    /// Map opened at the configured default center and zoom
    pub fn from_options(options: &HeatmapOptions, size: Point) -> Result<Self> {
        options.validate()?;

        let mut viewport = Viewport::new(options.default_center, options.default_zoom, size);
        viewport.set_zoom_limits(options.min_zoom, options.max_zoom);
        viewport.set_zoom(options.default_zoom);
        Ok(Self::with_viewport(viewport))
    }

    /// Signals that the map is ready; queues a `Load` event
    pub fn load(&mut self) {
        self.event_manager.emit(MapEvent::Load {
            center: self.viewport.center,
            zoom: self.viewport.zoom,
        });
    }

    pub fn set_view(&mut self, center: LatLng, zoom: f64) -> Result<()> {
        if !center.is_valid() {
            return Err(MapError::InvalidCoordinates(center.to_string()));
        }
        if !zoom.is_finite() {
            return Err(MapError::InvalidCoordinates(format!("zoom {}", zoom)));
        }

        let old_center = self.viewport.center;
        let old_zoom = self.viewport.zoom;

        self.viewport.set_center(center);
        self.viewport.set_zoom(zoom);

        let center_changed = self.viewport.center != old_center;
        let zoom_changed = self.viewport.zoom != old_zoom;

        if center_changed || zoom_changed {
            self.event_manager.emit(MapEvent::ViewChanged {
                center: self.viewport.center,
                zoom: self.viewport.zoom,
            });
        }
        if center_changed {
            self.event_manager.emit(MapEvent::MoveEnd {
                center: self.viewport.center,
            });
        }
        if zoom_changed {
            self.event_manager.emit(MapEvent::ZoomEnd {
                zoom: self.viewport.zoom,
            });
        }

        Ok(())
    }

    /// Zooms around the current center
    pub fn zoom_to(&mut self, zoom: f64) -> Result<()> {
        if !zoom.is_finite() {
            return Err(MapError::InvalidCoordinates(format!("zoom {}", zoom)));
        }

        let old_zoom = self.viewport.zoom;
        self.viewport.set_zoom(zoom);

        if self.viewport.zoom != old_zoom {
            self.event_manager.emit(MapEvent::ZoomEnd {
                zoom: self.viewport.zoom,
            });
        }

        Ok(())
    }

    /// Pans by a pixel offset
    pub fn pan(&mut self, delta: Point) {
        let old_center = self.viewport.center;
        self.viewport.pan(delta);

        if self.viewport.center != old_center {
            self.event_manager.emit(MapEvent::MoveEnd {
                center: self.viewport.center,
            });
        }
    }

    pub fn resize(&mut self, size: Point) {
        if self.viewport.size != size {
            self.viewport.set_size(size);
            self.event_manager.emit(MapEvent::Resize { size });
        }
    }

    /// Registers a listener for an event type (`"moveend"`, `"overlayadd"`, ...)
    pub fn on<F>(&mut self, event_type: &str, callback: F)
    where
        F: Fn(&MapEvent) + Send + Sync + 'static,
    {
        self.event_manager.on(event_type, callback);
    }

    /// Dispatches queued events to listeners and returns them
    pub fn process_events(&mut self) -> Vec<MapEvent> {
        self.event_manager.process_events()
    }

    pub fn pending_events(&self) -> usize {
        self.event_manager.pending_events()
    }

    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    pub fn overlay(&self, handle: OverlayHandle) -> Option<&HeatmapLayer> {
        self.overlays.get(handle)
    }

    /// Handles of attached overlays, oldest first
    pub fn overlay_handles(&self) -> Vec<OverlayHandle> {
        self.overlays.handles().to_vec()
    }

    pub fn overlay_count(&self) -> usize {
        self.overlays.len()
    }

    /// Rasterizes every attached overlay for the current viewport
    pub fn render(&self) -> Vec<(OverlayHandle, HeatGrid)> {
        self.overlays
            .handles()
            .iter()
            .filter_map(|handle| {
                self.overlays
                    .get(*handle)
                    .map(|layer| (*handle, layer.rasterize(&self.viewport)))
            })
            .collect()
    }
}

impl MapView for Map {
    fn bounds(&self) -> GeoBounds {
        GeoBounds::from(self.viewport.bounds())
    }

    fn zoom(&self) -> f64 {
        self.viewport.zoom
    }

    fn center(&self) -> LatLng {
        self.viewport.center
    }

    fn set_view(&mut self, center: LatLng, zoom: f64) -> Result<()> {
        Map::set_view(self, center, zoom)
    }

    fn add_overlay(
        &mut self,
        points: Vec<HeatPoint>,
        options: OverlayOptions,
    ) -> Result<OverlayHandle> {
        let handle = self.overlays.attach(HeatmapLayer::new(points, options));
        self.event_manager.emit(MapEvent::OverlayAdd { handle });
        Ok(handle)
    }

    fn remove_overlay(&mut self, handle: OverlayHandle) -> Result<()> {
        self.overlays.detach(handle)?;
        self.event_manager.emit(MapEvent::OverlayRemove { handle });
        Ok(())
    }
}

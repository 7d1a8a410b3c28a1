use crate::{layers::heatmap::HeatmapLayer, prelude::HashMap, MapError, Result};
use serde::{Deserialize, Serialize};

/// Opaque identity of an overlay attached to a map
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct OverlayHandle(u64);

impl std::fmt::Display for OverlayHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "overlay#{}", self.0)
    }
}

/// Manages the heat overlays attached to a map, in attach order
pub struct OverlayManager {
    overlays: HashMap<OverlayHandle, HeatmapLayer>,
    /// Attach order, used for rendering
    render_order: Vec<OverlayHandle>,
    next_id: u64,
}

impl OverlayManager {
    pub fn new() -> Self {
        Self {
            overlays: HashMap::default(),
            render_order: Vec::new(),
            next_id: 1,
        }
    }

    /// Attaches an overlay and issues a handle never used before
    pub fn attach(&mut self, layer: HeatmapLayer) -> OverlayHandle {
        let handle = OverlayHandle(self.next_id);
        self.next_id += 1;

        self.overlays.insert(handle, layer);
        self.render_order.push(handle);
        handle
    }

    /// Detaches an overlay, returning it
    pub fn detach(&mut self, handle: OverlayHandle) -> Result<HeatmapLayer> {
        let layer = self
            .overlays
            .remove(&handle)
            .ok_or(MapError::UnknownOverlay(handle))?;
        self.render_order.retain(|id| *id != handle);
        Ok(layer)
    }

    pub fn get(&self, handle: OverlayHandle) -> Option<&HeatmapLayer> {
        self.overlays.get(&handle)
    }

    /// Attached handles in attach order
    pub fn handles(&self) -> &[OverlayHandle] {
        &self.render_order
    }

    pub fn len(&self) -> usize {
        self.overlays.len()
    }

    pub fn is_empty(&self) -> bool {
        self.overlays.is_empty()
    }
}

impl Default for OverlayManager {
    fn default() -> Self {
        Self::new()
    }
}

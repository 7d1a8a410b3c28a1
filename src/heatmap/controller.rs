//! Keeps the heat overlay in step with the map viewport
//!
//! Every viewport trigger starts its own fetch straight away. In-flight
//! fetches are polled on the caller's task and applied in the order they
//! complete, so the last response to arrive is the one on screen, even if it
//! was requested for an older viewport. Nothing is cancelled or retried.

use crate::{
    core::bounds::GeoBounds,
    data::density::DensityResult,
    heatmap::{intensity::IntensityTransformer, radius::radius_for},
    input::events::MapEvent,
    layers::{heatmap::OverlayOptions, manager::OverlayHandle},
    traits::{DensitySource, MapView},
    FetchError, MapError, RefreshError,
};
use futures::{
    future::BoxFuture,
    stream::{FuturesUnordered, StreamExt},
    FutureExt,
};
use std::sync::Arc;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RefreshState {
    Idle,
    /// At least one fetch is in flight
    Refreshing,
}

/// What happened to one fetch once it finished
#[derive(Debug)]
pub struct Completion {
    /// Start order of the fetch, from 1
    pub sequence: u64,
    /// Region the fetch asked for
    pub bounds: GeoBounds,
    /// New overlay on success; on failure the previous overlay is untouched
    pub outcome: Result<OverlayHandle, RefreshError>,
}

struct FetchOutcome {
    sequence: u64,
    bounds: GeoBounds,
    result: Result<DensityResult, FetchError>,
}

pub struct HeatmapController {
    source: Arc<dyn DensitySource>,
    transformer: IntensityTransformer,
    in_flight: FuturesUnordered<BoxFuture<'static, FetchOutcome>>,
    /// The only overlay this controller has attached, if any
    overlay: Option<OverlayHandle>,
    next_sequence: u64,
    last_applied: Option<u64>,
}

impl HeatmapController {
    pub fn new(source: Arc<dyn DensitySource>, transformer: IntensityTransformer) -> Self {
        Self {
            source,
            transformer,
            in_flight: FuturesUnordered::new(),
            overlay: None,
            next_sequence: 1,
            last_applied: None,
        }
    }

    pub fn state(&self) -> RefreshState {
        if self.in_flight.is_empty() {
            RefreshState::Idle
        } else {
            RefreshState::Refreshing
        }
    }

    /// Handle of the overlay currently shown
    pub fn overlay(&self) -> Option<OverlayHandle> {
        self.overlay
    }

    pub fn in_flight(&self) -> usize {
        self.in_flight.len()
    }

    /// Starts a fetch if `event` may have changed the visible region
    pub fn handle_event<M: MapView + ?Sized>(&mut self, event: &MapEvent, map: &M) -> Option<u64> {
        if event.is_viewport_trigger() {
            log::debug!("{} triggers a density refresh", event.event_type());
            Some(self.refresh(map))
        } else {
            None
        }
    }

    /// Starts a fetch for the map's current bounds and returns its sequence number.
    ///
    /// Fetches already in flight keep running.
    pub fn refresh<M: MapView + ?Sized>(&mut self, map: &M) -> u64 {
        let sequence = self.next_sequence;
        self.next_sequence += 1;

        let bounds = map.bounds();
        let source = Arc::clone(&self.source);
        log::debug!(
            "start fetch #{} for {} ({} already in flight)",
            sequence,
            bounds,
            self.in_flight.len()
        );

        self.in_flight.push(
            async move {
                let result = source.fetch(bounds).await;
                FetchOutcome {
                    sequence,
                    bounds,
                    result,
                }
            }
            .boxed(),
        );

        sequence
    }

    /// Waits for the next fetch to finish and applies it to `map`.
    ///
    /// Returns `None` when nothing is in flight.
    pub async fn next_completion<M: MapView + ?Sized>(&mut self, map: &mut M) -> Option<Completion> {
        let FetchOutcome {
            sequence,
            bounds,
            result,
        } = self.in_flight.next().await?;

        let outcome = match result {
            Ok(result) => self.apply(sequence, &result, map),
            Err(e) => {
                log::warn!("fetch #{} for {} failed: {}", sequence, bounds, e);
                Err(RefreshError::Fetch(e))
            }
        };

        Some(Completion {
            sequence,
            bounds,
            outcome,
        })
    }

    /// Waits for every in-flight fetch, applying each as it completes
    pub async fn settle<M: MapView + ?Sized>(&mut self, map: &mut M) -> Vec<Completion> {
        let mut completions = Vec::with_capacity(self.in_flight.len());
        while let Some(completion) = self.next_completion(map).await {
            completions.push(completion);
        }
        completions
    }

    /// Swaps the displayed overlay for one built from `result`
    fn apply<M: MapView + ?Sized>(
        &mut self,
        sequence: u64,
        result: &DensityResult,
        map: &mut M,
    ) -> Result<OverlayHandle, RefreshError> {
        let points = self.transformer.transform(&result.samples, result.max_count);
        let radius = radius_for(map.zoom());

        if let Some(previous) = self.overlay.take() {
            match map.remove_overlay(previous) {
                Ok(()) => {}
                // Already gone from the map, nothing left to detach
                Err(MapError::UnknownOverlay(_)) => {
                    log::warn!("{} was detached outside the controller", previous);
                }
                Err(e) => {
                    self.overlay = Some(previous);
                    return Err(e.into());
                }
            }
        }

        let handle = map.add_overlay(points, OverlayOptions::with_radius(radius))?;
        self.overlay = Some(handle);

        if self.last_applied.is_some_and(|last| last > sequence) {
            log::debug!(
                "fetch #{} completed after #{}; showing the older viewport",
                sequence,
                self.last_applied.unwrap_or_default()
            );
        }
        self.last_applied = Some(sequence);

        log::info!(
            "fetch #{} rendered as {}: {} points, radius {}",
            sequence,
            handle,
            result.samples.len(),
            radius
        );
        Ok(handle)
    }
}

use ipv6_heatmap::{
    core::{bounds::GeoBounds, config::HeatmapOptions, constants::HEAT_MODIFIER, geo::LatLng},
    data::{density::DensitySample, proto, DensityResult},
    layers::{
        heatmap::{HeatPoint, HeatmapLayer, OverlayOptions},
        manager::{OverlayHandle, OverlayManager},
    },
    DensityFetcher, FetchError, HeatmapController, IntensityTransformer, MapView,
    NoGeolocator, RefreshError, RefreshState, ViewportBootstrap,
};
use std::{sync::Arc, time::Duration};
use wiremock::{
    matchers::{header, method, path, query_param},
    Mock, MockServer, ResponseTemplate,
};

/// End-to-end tests of the refresh pipeline against a mock data service
#[cfg(test)]
mod pipeline_tests {
    use super::*;

    /// Map stand-in with a fixed visible region that records overlay traffic
    struct StubMap {
        bounds: GeoBounds,
        zoom: f64,
        center: LatLng,
        overlays: OverlayManager,
        /// Largest number of overlays attached at once
        max_attached: usize,
        log: Vec<String>,
    }

    impl StubMap {
        fn new(bounds: GeoBounds, zoom: f64) -> Self {
            Self {
                bounds,
                zoom,
                center: LatLng::new(0.0, 0.0),
                overlays: OverlayManager::new(),
                max_attached: 0,
                log: Vec::new(),
            }
        }

        fn overlay(&self, handle: OverlayHandle) -> &HeatmapLayer {
            self.overlays.get(handle).expect("overlay attached")
        }
    }

    impl MapView for StubMap {
        fn bounds(&self) -> GeoBounds {
            self.bounds
        }

        fn zoom(&self) -> f64 {
            self.zoom
        }

        fn center(&self) -> LatLng {
            self.center
        }

        fn set_view(&mut self, center: LatLng, zoom: f64) -> ipv6_heatmap::Result<()> {
            self.center = center;
            self.zoom = zoom;
            self.log.push(format!("view {} @ {}", center, zoom));
            Ok(())
        }

        fn add_overlay(
            &mut self,
            points: Vec<HeatPoint>,
            options: OverlayOptions,
        ) -> ipv6_heatmap::Result<OverlayHandle> {
            let handle = self.overlays.attach(HeatmapLayer::new(points, options));
            self.max_attached = self.max_attached.max(self.overlays.len());
            self.log.push(format!("add {}", handle));
            Ok(handle)
        }

        fn remove_overlay(&mut self, handle: OverlayHandle) -> ipv6_heatmap::Result<()> {
            self.overlays.detach(handle)?;
            self.log.push(format!("remove {}", handle));
            Ok(())
        }
    }

    fn scenario_bounds() -> GeoBounds {
        GeoBounds::new(30.0, 40.0, -80.0, -70.0)
    }

    fn payload(max_count: u64, counts: &[u64]) -> Vec<u8> {
        let samples = counts
            .iter()
            .map(|count| DensitySample::new(35.0, -75.0, *count))
            .collect();
        proto::encode(&DensityResult::new(max_count, samples))
    }

    fn controller_for(server: &MockServer) -> HeatmapController {
        let options = HeatmapOptions::default().with_api_root(server.uri());
        let fetcher = DensityFetcher::new(&options).unwrap();
        HeatmapController::new(Arc::new(fetcher), IntensityTransformer::default())
    }

    fn approx_eq(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-6
    }

    /// Bounds become the documented query and intensities are log-scaled
    #[tokio::test]
    async fn test_refresh_renders_log_scaled_overlay() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/v1/ipv6"))
            .and(query_param("minLatitude", "30"))
            .and(query_param("maxLatitude", "40"))
            .and(query_param("minLongitude", "-80"))
            .and(query_param("maxLongitude", "-70"))
            .and(header("accept", "application/x-protobuf"))
            .respond_with(ResponseTemplate::new(200).set_body_bytes(payload(100, &[100, 1])))
            .expect(1)
            .mount(&server)
            .await;

        let mut controller = controller_for(&server);
        let mut map = StubMap::new(scenario_bounds(), 12.0);

        controller.refresh(&map);
        let completion = controller.next_completion(&mut map).await.unwrap();
        let handle = completion.outcome.unwrap();

        let points = map.overlay(handle).points();
        assert_eq!(points.len(), 2);
        assert!(approx_eq(points[0].intensity, HEAT_MODIFIER));
        assert!(approx_eq(
            points[1].intensity,
            HEAT_MODIFIER * 2f64.ln() / 101f64.ln()
        ));
        assert_eq!(map.overlay(handle).radius(), 30);
        assert_eq!(controller.state(), RefreshState::Idle);
    }

    /// A failing service leaves the rendered overlay in place
    #[tokio::test]
    async fn test_server_error_keeps_overlay() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/v1/ipv6"))
            .respond_with(ResponseTemplate::new(200).set_body_bytes(payload(10, &[10, 3])))
            .up_to_n_times(1)
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/v1/ipv6"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;

        let mut controller = controller_for(&server);
        let mut map = StubMap::new(scenario_bounds(), 8.0);

        controller.refresh(&map);
        let rendered = controller.settle(&mut map).await.remove(0).outcome.unwrap();

        controller.refresh(&map);
        let failed = controller.next_completion(&mut map).await.unwrap();

        assert!(matches!(
            failed.outcome,
            Err(RefreshError::Fetch(FetchError::Status { status: 500, .. }))
        ));
        assert_eq!(controller.overlay(), Some(rendered));
        assert_eq!(map.overlays.len(), 1);
        assert_eq!(map.overlay(rendered).point_count(), 2);
    }

    /// Garbage bodies surface as decode failures
    #[tokio::test]
    async fn test_malformed_body_is_decode_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/v1/ipv6"))
            .respond_with(ResponseTemplate::new(200).set_body_bytes(vec![0x0a, 0x32, 0x08]))
            .mount(&server)
            .await;

        let options = HeatmapOptions::default().with_api_root(server.uri());
        let fetcher = DensityFetcher::new(&options).unwrap();

        let result = fetcher.fetch(scenario_bounds()).await;
        assert!(matches!(result, Err(FetchError::Decode(_))));
    }

    /// Empty listings render an empty overlay rather than failing
    #[tokio::test]
    async fn test_empty_listing() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/v1/ipv6"))
            .respond_with(ResponseTemplate::new(200).set_body_bytes(Vec::new()))
            .mount(&server)
            .await;

        let mut controller = controller_for(&server);
        let mut map = StubMap::new(scenario_bounds(), 3.0);

        controller.refresh(&map);
        let handle = controller.settle(&mut map).await.remove(0).outcome.unwrap();

        assert_eq!(map.overlay(handle).point_count(), 0);
        assert_eq!(map.overlay(handle).radius(), 10);
    }

    /// Nothing listening on the port: a transport failure, no overlay
    #[tokio::test]
    async fn test_unreachable_service_is_transport_error() {
        let port = {
            let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
            listener.local_addr().unwrap().port()
        };
        let options = HeatmapOptions::default().with_api_root(format!("http://127.0.0.1:{}", port));
        let fetcher = DensityFetcher::new(&options).unwrap();

        let result = fetcher.fetch(scenario_bounds()).await;
        assert!(matches!(result, Err(FetchError::Transport(_))));

        let mut controller =
            HeatmapController::new(Arc::new(fetcher), IntensityTransformer::default());
        let mut map = StubMap::new(scenario_bounds(), 12.0);

        controller.refresh(&map);
        let completion = controller.next_completion(&mut map).await.unwrap();

        assert!(matches!(
            completion.outcome,
            Err(RefreshError::Fetch(FetchError::Transport(_)))
        ));
        assert_eq!(controller.overlay(), None);
        assert!(map.overlays.is_empty());
    }

    /// A request cut off by the client timeout keeps the rendered overlay
    #[tokio::test]
    async fn test_timed_out_fetch_keeps_overlay() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/v1/ipv6"))
            .respond_with(ResponseTemplate::new(200).set_body_bytes(payload(4, &[4, 2, 1])))
            .up_to_n_times(1)
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/v1/ipv6"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_bytes(payload(4, &[4]))
                    .set_delay(Duration::from_secs(5)),
            )
            .mount(&server)
            .await;

        let options = HeatmapOptions::default()
            .with_api_root(server.uri())
            .with_request_timeout(Duration::from_millis(200));
        let fetcher = DensityFetcher::new(&options).unwrap();
        let mut controller =
            HeatmapController::new(Arc::new(fetcher), IntensityTransformer::default());
        let mut map = StubMap::new(scenario_bounds(), 12.0);

        controller.refresh(&map);
        let rendered = controller.settle(&mut map).await.remove(0).outcome.unwrap();

        controller.refresh(&map);
        let failed = controller.next_completion(&mut map).await.unwrap();

        assert!(matches!(
            failed.outcome,
            Err(RefreshError::Fetch(FetchError::Transport(_)))
        ));
        assert_eq!(controller.overlay(), Some(rendered));
        assert_eq!(map.overlay(rendered).point_count(), 3);
    }

    /// The slower, older request answers last and stays on screen
    #[tokio::test]
    async fn test_last_completion_wins_with_single_overlay() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/v1/ipv6"))
            .and(query_param("minLatitude", "30"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_bytes(payload(5, &[5]))
                    .set_delay(Duration::from_millis(300)),
            )
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/v1/ipv6"))
            .and(query_param("minLatitude", "0"))
            .respond_with(ResponseTemplate::new(200).set_body_bytes(payload(5, &[5, 4, 3])))
            .mount(&server)
            .await;

        let mut controller = controller_for(&server);
        let mut map = StubMap::new(scenario_bounds(), 12.0);

        let older = controller.refresh(&map);
        map.bounds = GeoBounds::new(0.0, 10.0, 0.0, 10.0);
        let newer = controller.refresh(&map);
        assert_eq!(controller.state(), RefreshState::Refreshing);

        let completions = controller.settle(&mut map).await;
        let order: Vec<u64> = completions.iter().map(|c| c.sequence).collect();
        assert_eq!(order, vec![newer, older]);

        let shown = controller.overlay().unwrap();
        assert_eq!(map.overlay(shown).point_count(), 1);
        assert_eq!(map.overlays.len(), 1);
        assert_eq!(map.max_attached, 1);

        let swaps: Vec<&str> = map.log.iter().map(|entry| entry.as_str()).collect();
        assert_eq!(swaps, vec!["add overlay#1", "remove overlay#1", "add overlay#2"]);
    }

    /// Without a location fix the map opens on the default center
    #[tokio::test]
    async fn test_denied_geolocation_centers_on_default() {
        let options = HeatmapOptions::default();
        let bootstrap = ViewportBootstrap::from_options(
            Arc::new(NoGeolocator(ipv6_heatmap::GeolocationError::Denied)),
            &options,
        );
        let mut map = StubMap::new(scenario_bounds(), 12.0);

        let center = bootstrap.run(&mut map).await.unwrap();

        assert_eq!(center, LatLng::new(35.8750625, -78.84066989999997));
        assert_eq!(map.center, center);
        assert_eq!(map.zoom, 12.0);
    }
}

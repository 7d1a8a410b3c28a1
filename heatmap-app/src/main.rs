use clap::Parser;
use ipv6_heatmap::{
    core::{config::HeatmapOptions, geo::LatLng, geo::Point, map::Map},
    heatmap::Completion,
    DensityFetcher, FixedGeolocator, Geolocator, HeatmapController, IntensityTransformer,
    NoGeolocator, ViewportBootstrap,
};
use std::sync::Arc;

/// Fetches IPv6 address density for a map viewport and renders the heat overlay
#[derive(Debug, Parser)]
#[command(name = "heatmap-app", version, about)]
struct Args {
    /// Root URL of the density data service (overrides HEATMAP_API_ROOT)
    #[arg(long)]
    api_root: Option<String>,

    /// Viewport width in pixels
    #[arg(long, default_value_t = 1200.0)]
    width: f64,

    /// Viewport height in pixels
    #[arg(long, default_value_t = 800.0)]
    height: f64,

    /// Initial zoom level
    #[arg(long)]
    zoom: Option<f64>,

    /// Position reported by the geolocator, as LAT,LNG; without it no fix is available
    #[arg(long, allow_hyphen_values = true)]
    location: Option<LatLng>,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    env_logger::init();
    let args = Args::parse();

    let mut options = HeatmapOptions::from_env();
    if let Some(api_root) = args.api_root {
        options = options.with_api_root(api_root);
    }
    if let Some(zoom) = args.zoom {
        options.default_zoom = zoom;
    }
    options.validate()?;

    let mut map = Map::from_options(&options, Point::new(args.width, args.height))?;
    let fetcher = DensityFetcher::new(&options)?;
    let mut controller = HeatmapController::new(
        Arc::new(fetcher),
        IntensityTransformer::new(options.heat_modifier),
    );

    let geolocator: Arc<dyn Geolocator> = match args.location {
        Some(position) => Arc::new(FixedGeolocator(position)),
        None => Arc::new(NoGeolocator::default()),
    };
    let bootstrap = ViewportBootstrap::from_options(geolocator, &options);

    map.load();
    dispatch_events(&mut map, &mut controller);

    // Fetches started by `load` keep applying while the user is located
    let (_, completions) = bootstrap.run_alongside(&mut map, &mut controller).await?;
    for completion in &completions {
        report(completion);
    }
    dispatch_events(&mut map, &mut controller);

    for completion in controller.settle(&mut map).await {
        report(&completion);
    }

    match controller.overlay().and_then(|handle| map.overlay(handle)) {
        Some(layer) => {
            let grid = layer.rasterize(map.viewport());
            println!("center:      {}", map.viewport().center);
            println!("zoom:        {}", map.viewport().zoom);
            println!("points:      {}", layer.point_count());
            println!("radius:      {}px", layer.radius());
            println!("peak:        {:.1}", layer.peak_intensity());
            println!(
                "hot cells:   {}/{}",
                grid.hot_cells(),
                grid.width * grid.height
            );
        }
        None => println!("no heat overlay rendered"),
    }

    Ok(())
}

/// Hands queued map events to the controller, starting a fetch per viewport change
fn dispatch_events(map: &mut Map, controller: &mut HeatmapController) {
    for event in map.process_events() {
        controller.handle_event(&event, &*map);
    }
}

fn report(completion: &Completion) {
    match &completion.outcome {
        Ok(handle) => log::info!(
            "fetch #{} for {} rendered as {}",
            completion.sequence,
            completion.bounds,
            handle
        ),
        Err(e) => log::error!(
            "fetch #{} for {} failed: {}",
            completion.sequence,
            completion.bounds,
            e
        ),
    }
}

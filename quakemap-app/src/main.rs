use std::{path::PathBuf, str::FromStr, time::Duration};

use anyhow::Context;
use clap::Parser;
use quakemap::{
    data::source::{load_features, source_for},
    input::events::WheelDeltaMode,
    EventHandled, InputEvent, MapConfig, Point, QuakeMap, Viewport,
};

/// Interval between checks for finished tile downloads
const POLL_INTERVAL: Duration = Duration::from_millis(50);

#[derive(Parser, Debug)]
#[command(author, version, about = "Earthquakes over raster map tiles, rendered to SVG")]
struct Args {
    /// JSON configuration file (every field optional)
    #[arg(long)]
    config: Option<PathBuf>,

    /// GeoJSON file path or http(s) URL, overrides the configured location
    #[arg(long)]
    data: Option<String>,

    /// Window width; the surface is never narrower than the configured minimum
    #[arg(long, default_value_t = 960.0)]
    width: f64,

    /// Window height; the surface is never shorter than the configured minimum
    #[arg(long, default_value_t = 500.0)]
    height: f64,

    /// Gesture to replay, in order:
    /// drag:dx,dy | wheel:dy@x,y | dblclick:x,y | shift-dblclick:x,y
    #[arg(long = "gesture")]
    gestures: Vec<Gesture>,

    /// Download the visible tiles instead of only listing their URLs
    #[arg(long)]
    fetch_tiles: bool,

    /// How long to wait for tile downloads before writing the output
    #[arg(long, default_value_t = 2000)]
    wait_ms: u64,

    /// Output SVG file; stdout when omitted
    #[arg(long)]
    output: Option<PathBuf>,
}

/// A scripted interaction
#[derive(Debug, Clone, PartialEq)]
enum Gesture {
    Drag { dx: f64, dy: f64 },
    Wheel { delta_y: f64, position: Point },
    DoubleClick { position: Point, shift: bool },
}

impl FromStr for Gesture {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (kind, args) = s
            .split_once(':')
            .ok_or_else(|| format!("expected <kind>:<args>, got '{s}'"))?;
        match kind {
            "drag" => {
                let delta = parse_pair(args)?;
                Ok(Gesture::Drag { dx: delta.x, dy: delta.y })
            }
            "wheel" => {
                let (delta, position) = args
                    .split_once('@')
                    .ok_or_else(|| format!("expected wheel:dy@x,y, got '{s}'"))?;
                Ok(Gesture::Wheel {
                    delta_y: parse_number(delta)?,
                    position: parse_pair(position)?,
                })
            }
            "dblclick" | "shift-dblclick" => Ok(Gesture::DoubleClick {
                position: parse_pair(args)?,
                shift: kind == "shift-dblclick",
            }),
            other => Err(format!("unknown gesture '{other}'")),
        }
    }
}

impl Gesture {
    /// Events a user would produce for this gesture on `viewport`
    fn events(&self, viewport: &Viewport) -> Vec<InputEvent> {
        match *self {
            Gesture::Drag { dx, dy } => {
                let start = viewport.center();
                vec![
                    InputEvent::DragStart { position: start },
                    InputEvent::Drag { position: start.add(&Point::new(dx, dy)) },
                    InputEvent::DragEnd,
                ]
            }
            Gesture::Wheel { delta_y, position } => vec![InputEvent::Wheel {
                delta_y,
                delta_mode: WheelDeltaMode::Pixel,
                position,
            }],
            Gesture::DoubleClick { position, shift } => {
                vec![InputEvent::DoubleClick { position, shift }]
            }
        }
    }
}

fn parse_number(s: &str) -> Result<f64, String> {
    let value = s
        .trim()
        .parse::<f64>()
        .map_err(|e| format!("invalid number '{s}': {e}"))?;
    if !value.is_finite() {
        return Err(format!("number must be finite, got '{s}'"));
    }
    Ok(value)
}

fn parse_pair(s: &str) -> Result<Point, String> {
    let (x, y) = s
        .split_once(',')
        .ok_or_else(|| format!("expected x,y, got '{s}'"))?;
    Ok(Point::new(parse_number(x)?, parse_number(y)?))
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    env_logger::init();

    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => MapConfig::from_file(path)
            .with_context(|| format!("failed to read config {}", path.display()))?,
        None => MapConfig::default(),
    };
    if let Some(data) = &args.data {
        config.data.location = data.clone();
    }

    let source = source_for(&config.data.location);
    let features = match load_features(source.as_ref()).await {
        Ok(features) => features,
        Err(e) => {
            log::error!("failed to load {}: {}", source.describe(), e);
            return Err(e).context("earthquake data could not be loaded");
        }
    };

    let window = Viewport::new(args.width, args.height);
    let mut map = if args.fetch_tiles {
        QuakeMap::with_http_tiles(&config, window, features)?
    } else {
        QuakeMap::offline(&config, window, features)?
    };
    map.on_hover(|feature| {
        log::info!("hovering M{} at {:?}", feature.magnitude, feature.location)
    });

    for gesture in &args.gestures {
        let viewport = *map.viewport();
        for event in gesture.events(&viewport) {
            if map.handle_event(&event) == EventHandled::NotHandled {
                log::debug!("event ignored: {:?}", event);
            }
        }
    }
    let t = map.transform();
    log::info!(
        "view: k={} translate=({:.1}, {:.1}), {} tiles",
        t.k,
        t.x,
        t.y,
        map.raster().len()
    );

    if args.fetch_tiles {
        tokio::select! {
            _ = wait_for_tiles(&mut map, Duration::from_millis(args.wait_ms)) => {}
            _ = tokio::signal::ctrl_c() => log::warn!("interrupted, writing partial output"),
        }
    }

    let svg = map.to_svg();
    match &args.output {
        Some(path) => {
            tokio::fs::write(path, svg)
                .await
                .with_context(|| format!("failed to write {}", path.display()))?;
            log::info!("wrote {}", path.display());
        }
        None => println!("{svg}"),
    }

    Ok(())
}

/// Places downloaded tiles until none are pending or `budget` runs out
async fn wait_for_tiles(map: &mut QuakeMap, budget: Duration) {
    let deadline = tokio::time::Instant::now() + budget;
    loop {
        map.poll_tiles();
        if map.raster().pending_count() == 0 || tokio::time::Instant::now() >= deadline {
            break;
        }
        tokio::time::sleep(POLL_INTERVAL).await;
    }
    let pending = map.raster().pending_count();
    if pending > 0 {
        log::warn!("{} tiles still pending after {:?}", pending, budget);
    }
}

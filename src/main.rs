//! Headless CLI - replays a pointer trace through the trail simulator
//!
//! Run with: cargo run --features cli --bin trail-cli
//!
//! Environment:
//! - `TRAIL_TRACE`: JSON trace `[{"t":ms,"x":..,"y":..}]` (default: synthetic sweep)
//! - `TRAIL_FPS`: frame rate (default 60)
//! - `TRAIL_VIEWPORT`: `WIDTHxHEIGHT` (default 1280x720)

#[cfg(not(target_arch = "wasm32"))]
#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    use cursor_trail::core::{FpsCounter, Viewport};
    use cursor_trail::replay::{load_trace, synthetic_sweep, ReplaySession};
    use cursor_trail::time::now_ms;
    use std::time::Duration;
    use tracing::{info, warn};
    use tracing_subscriber::{fmt, EnvFilter};

    const DEFAULT_FPS: f64 = 60.0;
    const DEFAULT_VIEWPORT: Viewport = Viewport { width: 1280, height: 720 };
    const SWEEP_DURATION_MS: f64 = 3_000.0;
    const SWEEP_INTERVAL_MS: f64 = 8.0;

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,cursor_trail=debug"));
    fmt().with_env_filter(filter).with_target(true).init();

    let fps = match std::env::var("TRAIL_FPS") {
        Ok(raw) => raw.parse::<f64>().unwrap_or_else(|_| {
            warn!(value = %raw, "Invalid TRAIL_FPS, using default");
            DEFAULT_FPS
        }),
        Err(_) => DEFAULT_FPS,
    };

    let viewport = match std::env::var("TRAIL_VIEWPORT") {
        Ok(raw) => Viewport::parse(&raw).unwrap_or_else(|| {
            warn!(value = %raw, "Invalid TRAIL_VIEWPORT, using default");
            DEFAULT_VIEWPORT
        }),
        Err(_) => DEFAULT_VIEWPORT,
    };

    let samples = match std::env::var("TRAIL_TRACE") {
        Ok(path) => {
            info!(path = %path, "Loading pointer trace");
            load_trace(&path)?
        }
        Err(_) => {
            info!(duration_ms = SWEEP_DURATION_MS, "Using synthetic sweep");
            synthetic_sweep(viewport, SWEEP_DURATION_MS, SWEEP_INTERVAL_MS)
        }
    };

    let mut session = ReplaySession::new(samples, viewport, fps)?;
    let mut frame_interval = tokio::time::interval(Duration::from_secs_f64(1.0 / fps).max(Duration::from_millis(1)));
    let mut stats_interval = tokio::time::interval(Duration::from_secs(1));
    let mut fps_counter = FpsCounter::new();

    loop {
        tokio::select! {
            _ = frame_interval.tick() => {
                session.step();
                fps_counter.tick(now_ms());
                if session.is_finished() {
                    break;
                }
            }
            _ = stats_interval.tick() => {
                let stats = session.stats();
                info!(
                    live = session.live(),
                    pending = session.pending_samples(),
                    emitted = stats.emitted,
                    trims = stats.trims,
                    fps = format!("{:.1}", fps_counter.fps()),
                    "stats"
                );
            }
        }
    }

    let summary = session.summary();
    info!(frames = summary.frames, peak_live = summary.peak_live, "Replay finished");
    println!("{}", serde_json::to_string_pretty(&summary)?);
    Ok(())
}

#[cfg(target_arch = "wasm32")]
fn main() {}

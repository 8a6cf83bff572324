use spark_emitter::{EmitterConfig, EmitterResult, ParticleEmitter, ViewportSize};
use std::env;

const DEFAULT_VIEWPORT: (f64, f64) = (800.0, 600.0);

fn main() {
    initialize_logging();

    if let Err(e) = run() {
        tracing::error!(target: "emitter", "{}", e);
        eprintln!("Emitter failed to start: {}", e);
        std::process::exit(1);
    }
}

/// 初始化日志系统
///
/// 日志级别可以通过`RUST_LOG`环境变量控制。
fn initialize_logging() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .try_init();
}

/// 用法: spark_emitter [CONFIG_PATH] [WIDTH HEIGHT]
fn run() -> EmitterResult<()> {
    let args: Vec<String> = env::args().skip(1).collect();

    let mut config = match args.first() {
        Some(path) => EmitterConfig::from_file(path)?,
        None => EmitterConfig::load_or_default(),
    };
    config.apply_env_overrides()?;

    let viewport = match (args.get(1), args.get(2)) {
        (Some(w), Some(h)) => match (w.parse(), h.parse()) {
            (Ok(width), Ok(height)) => ViewportSize::new(width, height),
            _ => {
                tracing::warn!(target: "emitter", "Invalid viewport {}x{}, using default", w, h);
                DEFAULT_VIEWPORT.into()
            }
        },
        _ => DEFAULT_VIEWPORT.into(),
    };

    let emitter = ParticleEmitter::new(config)?;
    let particles = emitter.spawn(viewport, &mut rand::thread_rng());

    let visible_at_half = emitter
        .frames_at_time(&particles, emitter.config().cycle_duration / 2.0)
        .iter()
        .filter(|frame| frame.is_visible())
        .count();
    let mean_travel = if particles.is_empty() {
        0.0
    } else {
        particles.iter().map(|p| p.position.distance()).sum::<f64>() / particles.len() as f64
    };

    tracing::info!(
        target: "emitter",
        particles = particles.len(),
        width = viewport.width,
        height = viewport.height,
        visible_at_half,
        mean_travel,
        "Emitter sampled"
    );
    Ok(())
}

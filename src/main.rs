//! Live face detection on a camera or RTSP stream using `OpenCV`'s YuNet detector.

use anyhow::{Context, Result};
use clap::Parser;
use log::{error, info, warn};
use yunet_stream::{
    app::{FrameDisplay, HeadlessDisplay, HighGuiDisplay, StreamApp},
    cli::Args,
    config::Config,
    constants::KEY_WAIT_MS,
    face_detection::FaceDetector,
    video_source::{FrameSource, VideoSource},
    Error,
};

fn main() -> Result<()> {
    // Parse command line arguments
    let args = Args::parse();

    // Initialize logger
    if args.debug {
        env_logger::init_from_env(env_logger::Env::new().default_filter_or("debug"));
    } else {
        env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));
    }

    info!("YuNet stream demo");

    // Load configuration if provided
    let mut config = if let Some(config_path) = &args.config {
        info!("Loading configuration from: {}", config_path.display());
        match Config::from_file(config_path) {
            Ok(cfg) => cfg,
            Err(e) => {
                warn!("Failed to load config file: {}. Using defaults.", e);
                Config::default()
            }
        }
    } else {
        Config::default()
    };
    args.apply_to(&mut config);
    config.validate().context("invalid configuration")?;

    let detector = FaceDetector::new(&args.model, &config.detector)
        .with_context(|| format!("failed to load model {}", args.model.display()))?;
    info!("Using {} detector", detector.name());

    let source: VideoSource = config.capture.source.parse()?;
    let capture = match source.open() {
        Ok(capture) => capture,
        Err(e @ Error::CaptureOpen(_)) => {
            error!("Error opening video capture.");
            return Err(e.into());
        }
        Err(e) => return Err(e.into()),
    };

    if config.display.enabled {
        let display = HighGuiDisplay::new(&config.display.window_name, KEY_WAIT_MS)?;
        run(StreamApp::new(capture, detector, display, &config)?)
    } else {
        info!("Running headless");
        run(StreamApp::new(capture, detector, HeadlessDisplay::default(), &config)?)
    }
}

fn run<S, V>(mut app: StreamApp<S, FaceDetector, V>) -> Result<()>
where
    S: FrameSource,
    V: FrameDisplay,
{
    let summary = app.run()?;
    info!(
        "Processed {} of {} frames, {} faces",
        summary.frames_processed, summary.frames_read, summary.faces_detected
    );
    Ok(())
}

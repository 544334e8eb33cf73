//! Camera View CLI
//!
//! Drives a camera view against the mock native layer, showing the props
//! handed to the native view and the capture requests sent to the module.

use camera_view::{
    bridge::{EventEmitter, MockCameraModule, MockNativeView, BAR_CODE_READ_EVENT},
    config::{FileConfig, ModeValue},
    constants::Constants,
    view::{CameraView, CaptureOverrides, Lifecycle},
};
use clap::Parser;
use serde_json::json;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::{Duration, TryFromFloatSecsError};
use tokio::sync::Notify;
use tracing::{info, warn};

#[derive(Debug, Parser)]
#[command(name = "camera-view", version, about = "Camera view demo against a mock native layer")]
struct Args {
    /// TOML configuration file ([camera] and optional [constants] sections)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// TOML enumeration table, overriding the platform defaults
    #[arg(long)]
    constants: Option<PathBuf>,

    /// Capture mode override, by name or code
    #[arg(short, long)]
    mode: Option<ModeValue>,

    /// Capture target override, by name or code
    #[arg(short, long)]
    target: Option<ModeValue>,

    /// Maximum video length in seconds; records until Ctrl-C when unset
    #[arg(short, long)]
    seconds: Option<f64>,

    /// Preferred video time scale
    #[arg(long)]
    time_scale: Option<u32>,

    /// Capture without audio
    #[arg(long)]
    no_audio: bool,

    /// Simulate a barcode read with this data before capturing
    #[arg(long)]
    scan: Vec<String>,

    /// Print the normalized native props as JSON
    #[arg(long)]
    print_props: bool,
}

/// Converts `--seconds` into a timer length. Unset or non-positive values
/// mean "record until Ctrl-C".
fn recording_limit(seconds: Option<f64>) -> Result<Option<Duration>, TryFromFloatSecsError> {
    match seconds {
        Some(s) if s > 0.0 => Duration::try_from_secs_f64(s).map(Some),
        _ => Ok(None),
    }
}

#[tokio::main]
async fn main() {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    let args = Args::parse();
    info!("Camera View v{}", camera_view::VERSION);

    let limit = match recording_limit(args.seconds) {
        Ok(limit) => limit,
        Err(e) => {
            eprintln!("Invalid --seconds: {}", e);
            std::process::exit(1);
        }
    };

    let file_config = match &args.config {
        Some(path) => match FileConfig::from_file(path) {
            Ok(config) => config,
            Err(e) => {
                eprintln!("Failed to load config: {}", e);
                std::process::exit(1);
            }
        },
        None => FileConfig::default(),
    };

    let constants = match &args.constants {
        Some(path) => match Constants::from_file(path) {
            Ok(constants) => constants,
            Err(e) => {
                eprintln!("Failed to load constants: {}", e);
                std::process::exit(1);
            }
        },
        None => file_config
            .constants
            .clone()
            .unwrap_or_else(Constants::platform_defaults),
    };

    let module = Arc::new(MockCameraModule::with_constants(constants.clone()));
    let view = Arc::new(MockNativeView::new());
    let config = file_config.camera.on_bar_code_read(|payload| {
        info!(%payload, "Barcode read");
    });

    let mut camera = CameraView::new(
        config,
        Arc::new(constants),
        module.clone(),
        view,
        EventEmitter::global().clone(),
    );

    camera.mount();
    camera.authorization_settled().await;
    if !camera.is_authorized() {
        warn!("Camera not authorized; continuing with mock module");
    }

    let props = camera.render();
    if args.print_props {
        match serde_json::to_string_pretty(&props) {
            Ok(json) => println!("{}", json),
            Err(e) => warn!("Failed to encode props: {}", e),
        }
    }

    match (camera.field_of_view(), camera.has_flash()) {
        (Ok(fov), Ok(flash)) => info!(fov, flash, "Native capabilities"),
        (fov, flash) => warn!(?fov, ?flash, "Capability query failed"),
    }

    for data in &args.scan {
        EventEmitter::global().emit(BAR_CODE_READ_EVENT, &json!({ "type": "qr", "data": data }));
    }

    let mut overrides = CaptureOverrides {
        mode: args.mode,
        target: args.target,
        total_seconds: args.seconds,
        preferred_time_scale: args.time_scale,
        ..Default::default()
    };
    if args.no_audio {
        overrides.audio = Some(false);
    }

    let pending = camera.capture(overrides);

    if camera.is_recording() {
        match limit {
            Some(limit) => {
                info!(seconds = limit.as_secs_f64(), "Recording");
                tokio::time::sleep(limit).await;
            }
            None => {
                let interrupted = Arc::new(Notify::new());
                let notify = Arc::clone(&interrupted);
                if let Err(e) = ctrlc::set_handler(move || notify.notify_one()) {
                    eprintln!("Failed to install Ctrl-C handler: {}", e);
                    eprintln!("Pass --seconds to record for a fixed time");
                    camera.stop_capture();
                    let _ = pending.await;
                    camera.unmount();
                    std::process::exit(1);
                }
                info!("Recording until Ctrl-C");
                interrupted.notified().await;
            }
        }
        camera.stop_capture();
    }

    let exit_code = match pending.await {
        Ok(output) => {
            match serde_json::to_string_pretty(&output) {
                Ok(json) => println!("{}", json),
                Err(e) => warn!("Failed to encode capture output: {}", e),
            }
            0
        }
        Err(e) => {
            eprintln!("Capture failed: {}", e);
            1
        }
    };

    camera.unmount();
    info!(requests = module.captures().len(), "Done");
    std::process::exit(exit_code);
}

//! Camera View Library
//!
//! A declarative camera view that sits between application code and a
//! platform's native camera layer. Applications describe the camera they
//! want using readable names; the view translates those into the numeric
//! codes the platform expects, forwards them to the native preview, and
//! proxies capture commands to the native module.
//!
//! # Architecture
//!
//! ```text
//! CameraConfig ─▶ normalize ─▶ NativeView
//!      │
//!  capture/stop ─▶ NativeCameraModule
//!
//! EventEmitter ─▶ on_bar_code_read
//! ```
//!
//! Sensor access, encoding and permission prompts live on the native side
//! and are reached only through the traits in [`bridge`].
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//! use camera_view::{
//!     bridge::{EventEmitter, MockCameraModule, MockNativeView, NativeCameraModule},
//!     config::CameraConfig,
//!     view::{CameraView, CaptureOverrides, Lifecycle},
//! };
//!
//! # async fn run() {
//! let module = Arc::new(MockCameraModule::new());
//! let constants = Arc::new(module.constants());
//!
//! let config = CameraConfig::default()
//!     .with_camera_type("front")
//!     .on_bar_code_read(|payload| println!("scanned {}", payload));
//!
//! let mut camera = CameraView::new(
//!     config,
//!     constants,
//!     module,
//!     Arc::new(MockNativeView::new()),
//!     EventEmitter::global().clone(),
//! );
//!
//! camera.mount();
//! camera.render();
//!
//! let photo = camera.capture(CaptureOverrides::default()).await.unwrap();
//! println!("saved to {:?}", photo.path);
//!
//! camera.unmount();
//! # }
//! ```

#![warn(missing_docs)]
#![warn(rust_2018_idioms)]
#![deny(unsafe_code)]

pub mod bridge;
pub mod config;
pub mod constants;
pub mod view;

// Re-export commonly used types at crate root
pub use bridge::{
    CaptureOutput, CaptureRequest, EventEmitter, NativeCameraModule, NativeError, NativeProps,
    NativeView,
};
pub use config::{CameraConfig, ConfigError, FileConfig, ModeValue};
pub use constants::{Category, Constants};
pub use view::{CameraView, CaptureOverrides, Lifecycle};

/// Library version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

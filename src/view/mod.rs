//! The camera view component and its pure helpers.
//!
//! ```text
//! CameraConfig ──normalize──▶ NativeProps ──▶ NativeView
//!       │
//!       └──build_request──▶ CaptureRequest ──▶ NativeCameraModule
//! ```

mod capture;
mod component;
pub mod normalize;

pub use capture::{
    build_request, is_video_mode, CaptureOverrides, DEFAULT_TIME_SCALE, UNBOUNDED_SECONDS,
};
pub use component::{CameraView, Lifecycle, ViewEvent, ViewState};
pub use normalize::{normalize, resolve};

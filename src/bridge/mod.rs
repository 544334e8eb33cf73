//! Boundary between camera views and the platform.
//!
//! Everything the platform provides is reached through the traits in this
//! module: the camera module for imperative calls, the native view for
//! property updates, and the event emitter for asynchronous notifications.

mod events;
mod mock;
mod native;

pub use events::{EventEmitter, Subscription, BAR_CODE_READ_EVENT};
pub use mock::{MockCameraModule, MockNativeView};
pub use native::{
    CaptureOutput, CaptureRequest, NativeCameraModule, NativeError, NativeFuture, NativeProps,
    NativeView,
};

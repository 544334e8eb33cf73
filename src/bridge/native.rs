//! Native camera module and view abstractions.
//!
//! The platform side owns the sensor, encoders and preview surface. This
//! module defines the narrow surface a camera view talks to, so a real
//! platform binding and the mock implementations used in tests are
//! interchangeable.

use crate::config::Style;
use crate::constants::Constants;
use chrono::{DateTime, Utc};
use futures::future::BoxFuture;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

/// Errors reported by the native layer.
///
/// These are returned to callers exactly as the native side produced them.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum NativeError {
    /// No native camera module is registered.
    #[error("native camera module unavailable")]
    ModuleUnavailable,
    /// The native side refused the call.
    #[error("native call rejected ({code}): {message}")]
    Rejected {
        /// Platform error code.
        code: String,
        /// Human-readable reason.
        message: String,
    },
    /// The platform does not implement this operation.
    #[error("operation not supported by native layer: {0}")]
    Unsupported(&'static str),
    /// The capture ended before producing media.
    #[error("capture cancelled")]
    Cancelled,
}

impl NativeError {
    /// Shorthand for [`NativeError::Rejected`].
    pub fn rejected(code: impl Into<String>, message: impl Into<String>) -> Self {
        NativeError::Rejected {
            code: code.into(),
            message: message.into(),
        }
    }
}

/// Pending result of an asynchronous native call.
pub type NativeFuture<T> = BoxFuture<'static, Result<T, NativeError>>;

/// Property set handed to the native view.
///
/// Mode fields are plain codes; names never reach this type.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NativeProps {
    /// Aspect code.
    pub aspect: Option<i64>,
    /// Camera facing code.
    #[serde(rename = "type")]
    pub camera_type: Option<i64>,
    /// Orientation code.
    pub orientation: Option<i64>,
    /// Flash mode code.
    pub flash_mode: Option<i64>,
    /// Torch mode code.
    pub torch_mode: Option<i64>,
    /// Capture mode code.
    pub capture_mode: Option<i64>,
    /// Capture target code.
    pub capture_target: Option<i64>,
    /// Record audio with video.
    pub capture_audio: bool,
    /// Show the platform focus indicator.
    pub default_on_focus_component: bool,
    /// The native side only emits focus events when someone listens.
    pub focus_events: bool,
    /// Same, for zoom events.
    pub zoom_events: bool,
    /// Layout attributes.
    pub style: Style,
}

/// Parameters for a single capture call.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CaptureRequest {
    /// Record audio with video.
    pub audio: bool,
    /// Capture mode code.
    pub mode: Option<i64>,
    /// Capture target code.
    pub target: Option<i64>,
    /// Maximum video length; `-1` records until stopped.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_seconds: Option<f64>,
    /// Video time scale.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub preferred_time_scale: Option<u32>,
    /// Caller options the view does not interpret.
    #[serde(flatten)]
    pub extra: serde_json::Map<String, Value>,
}

/// Result of a completed capture.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CaptureOutput {
    /// Location of the stored media for disk, gallery and temp targets.
    pub path: Option<String>,
    /// Encoded image data for the in-memory target.
    pub data: Option<String>,
    /// When the native side finished the capture.
    pub captured_at: DateTime<Utc>,
}

/// The platform camera module.
///
/// Calls are made from the UI thread. Anything that talks to hardware
/// returns a [`NativeFuture`] and must not block.
pub trait NativeCameraModule: Send + Sync {
    /// Enumeration table published by the platform.
    fn constants(&self) -> Constants;

    /// Starts an authorization status query.
    ///
    /// Platforms without a permission model return `None`.
    fn check_device_authorization_status(&self) -> Option<NativeFuture<bool>> {
        None
    }

    /// Starts a capture. The native call is issued before this returns.
    fn capture(&self, request: CaptureRequest) -> NativeFuture<CaptureOutput>;

    /// Ends an in-progress video capture.
    fn stop_capture(&self);

    /// Horizontal field of view of the active sensor, in degrees.
    fn field_of_view(&self) -> Result<f64, NativeError>;

    /// Whether the active sensor has a flash unit.
    fn has_flash(&self) -> Result<bool, NativeError>;
}

/// The platform preview surface.
pub trait NativeView: Send + Sync {
    /// Applies a full property set.
    fn render(&self, props: &NativeProps);

    /// Applies raw properties directly, bypassing normalization.
    fn set_native_props(&self, props: serde_json::Map<String, Value>);
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_props_serialize_with_native_keys() {
        let props = NativeProps {
            camera_type: Some(2),
            flash_mode: Some(1),
            ..Default::default()
        };
        let value = serde_json::to_value(&props).unwrap();

        assert_eq!(value["type"], json!(2));
        assert_eq!(value["flashMode"], json!(1));
        assert_eq!(value["aspect"], Value::Null);
    }

    #[test]
    fn test_request_flattens_extra_options() {
        let mut extra = serde_json::Map::new();
        extra.insert("title".into(), json!("holiday"));

        let request = CaptureRequest {
            audio: true,
            mode: Some(1),
            target: Some(2),
            total_seconds: Some(-1.0),
            preferred_time_scale: Some(30),
            extra,
        };
        let value = serde_json::to_value(&request).unwrap();

        assert_eq!(value["totalSeconds"], json!(-1.0));
        assert_eq!(value["preferredTimeScale"], json!(30));
        assert_eq!(value["title"], json!("holiday"));
    }

    #[test]
    fn test_still_request_omits_video_fields() {
        let request = CaptureRequest {
            audio: false,
            mode: Some(0),
            ..Default::default()
        };
        let value = serde_json::to_value(&request).unwrap();

        assert!(value.get("totalSeconds").is_none());
        assert!(value.get("preferredTimeScale").is_none());
    }
}

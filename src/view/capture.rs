//! Capture request construction.

use super::normalize::resolve;
use crate::bridge::CaptureRequest;
use crate::config::{CameraConfig, ModeValue};
use crate::constants::{Category, Constants};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// `totalSeconds` value meaning "record until stopped".
pub const UNBOUNDED_SECONDS: f64 = -1.0;

/// Time scale applied to video captures that do not set one.
pub const DEFAULT_TIME_SCALE: u32 = 30;

/// Request keys owned by the view; callers cannot set them through `extra`.
pub const RESERVED_KEYS: [&str; 5] = [
    "audio",
    "mode",
    "target",
    "totalSeconds",
    "preferredTimeScale",
];

/// Per-call capture options. Set fields take precedence over the view
/// configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CaptureOverrides {
    /// Record audio with video captures.
    pub audio: Option<bool>,
    /// Capture mode, by name or code.
    pub mode: Option<ModeValue>,
    /// Capture target, by name or code.
    pub target: Option<ModeValue>,
    /// Maximum video length in seconds.
    pub total_seconds: Option<f64>,
    /// Video time scale.
    pub preferred_time_scale: Option<u32>,
    /// Forwarded to the native module as-is, minus [`RESERVED_KEYS`].
    #[serde(flatten)]
    pub extra: serde_json::Map<String, Value>,
}

impl CaptureOverrides {
    /// Overrides selecting video mode.
    pub fn video() -> Self {
        Self {
            mode: Some(ModeValue::name("video")),
            ..Default::default()
        }
    }

    /// Sets the capture mode.
    pub fn with_mode(mut self, mode: impl Into<ModeValue>) -> Self {
        self.mode = Some(mode.into());
        self
    }

    /// Sets the capture target.
    pub fn with_target(mut self, target: impl Into<ModeValue>) -> Self {
        self.target = Some(target.into());
        self
    }

    /// Enables or disables audio recording.
    pub fn with_audio(mut self, audio: bool) -> Self {
        self.audio = Some(audio);
        self
    }

    /// Sets the maximum video length.
    pub fn with_total_seconds(mut self, seconds: f64) -> Self {
        self.total_seconds = Some(seconds);
        self
    }

    /// Sets the video time scale.
    pub fn with_time_scale(mut self, scale: u32) -> Self {
        self.preferred_time_scale = Some(scale);
        self
    }

    /// Adds an option passed through to the native module.
    pub fn with_extra(mut self, key: impl Into<String>, value: Value) -> Self {
        self.extra.insert(key.into(), value);
        self
    }
}

/// Returns true if `mode` is the table's video code.
pub fn is_video_mode(mode: Option<i64>, constants: &Constants) -> bool {
    mode.is_some() && mode == constants.code(Category::CaptureMode, "video")
}

/// Merges configuration and overrides into a native capture request.
///
/// Video requests always carry a duration and a time scale: a missing or
/// non-positive duration becomes [`UNBOUNDED_SECONDS`] and a missing or
/// zero time scale becomes [`DEFAULT_TIME_SCALE`].
pub fn build_request(
    config: &CameraConfig,
    constants: &Constants,
    overrides: CaptureOverrides,
) -> CaptureRequest {
    let mut extra = overrides.extra;
    for key in RESERVED_KEYS {
        if let Some(value) = extra.remove(key) {
            tracing::warn!(key, %value, "Ignoring reserved key in extra capture options");
        }
    }

    let mode_source = overrides.mode.as_ref().or(config.mode(Category::CaptureMode));
    let target_source = overrides
        .target
        .as_ref()
        .or(config.mode(Category::CaptureTarget));

    let mut request = CaptureRequest {
        audio: overrides.audio.unwrap_or(config.capture_audio),
        mode: resolve(mode_source, Category::CaptureMode, constants),
        target: resolve(target_source, Category::CaptureTarget, constants),
        total_seconds: overrides.total_seconds,
        preferred_time_scale: overrides.preferred_time_scale,
        extra,
    };

    if is_video_mode(request.mode, constants) {
        request.total_seconds = Some(match request.total_seconds {
            Some(seconds) if seconds > 0.0 => seconds,
            _ => UNBOUNDED_SECONDS,
        });
        request.preferred_time_scale = Some(match request.preferred_time_scale {
            Some(scale) if scale > 0 => scale,
            _ => DEFAULT_TIME_SCALE,
        });
    }

    request
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn constants() -> Constants {
        Constants::platform_defaults()
    }

    #[test]
    fn test_still_request_from_config() {
        let request = build_request(
            &CameraConfig::default(),
            &constants(),
            CaptureOverrides::default(),
        );

        assert!(request.audio);
        assert_eq!(request.mode, Some(0));
        assert_eq!(request.target, Some(2));
        assert_eq!(request.total_seconds, None);
        assert_eq!(request.preferred_time_scale, None);
    }

    #[test]
    fn test_overrides_win() {
        let overrides = CaptureOverrides::default()
            .with_audio(false)
            .with_target("memory")
            .with_extra("metadata", json!({"location": "here"}));
        let request = build_request(&CameraConfig::default(), &constants(), overrides);

        assert!(!request.audio);
        assert_eq!(request.target, Some(0));
        assert_eq!(request.extra["metadata"], json!({"location": "here"}));
    }

    #[test]
    fn test_video_defaults() {
        let request = build_request(
            &CameraConfig::default(),
            &constants(),
            CaptureOverrides::video(),
        );

        assert_eq!(request.mode, Some(1));
        assert_eq!(request.total_seconds, Some(UNBOUNDED_SECONDS));
        assert_eq!(request.preferred_time_scale, Some(DEFAULT_TIME_SCALE));
    }

    #[test]
    fn test_video_keeps_positive_values() {
        let overrides = CaptureOverrides::video()
            .with_total_seconds(12.5)
            .with_time_scale(600);
        let request = build_request(&CameraConfig::default(), &constants(), overrides);

        assert_eq!(request.total_seconds, Some(12.5));
        assert_eq!(request.preferred_time_scale, Some(600));
    }

    #[test]
    fn test_video_clamps_non_positive_duration() {
        for seconds in [0.0, -5.0] {
            let overrides = CaptureOverrides::video()
                .with_total_seconds(seconds)
                .with_time_scale(0);
            let request = build_request(&CameraConfig::default(), &constants(), overrides);

            assert_eq!(request.total_seconds, Some(UNBOUNDED_SECONDS));
            assert_eq!(request.preferred_time_scale, Some(DEFAULT_TIME_SCALE));
        }
    }

    #[test]
    fn test_video_mode_from_config_and_code() {
        let config = CameraConfig::default().with_capture_mode("video");
        let request = build_request(&config, &constants(), CaptureOverrides::default());
        assert_eq!(request.total_seconds, Some(UNBOUNDED_SECONDS));

        let overrides = CaptureOverrides::default().with_mode(1_i64);
        let request = build_request(&CameraConfig::default(), &constants(), overrides);
        assert!(is_video_mode(request.mode, &constants()));
    }

    #[test]
    fn test_extra_cannot_replace_resolved_fields() {
        let overrides = CaptureOverrides::video()
            .with_extra("totalSeconds", json!(0))
            .with_extra("mode", json!("video"))
            .with_extra("target", json!("memory"))
            .with_extra("audio", json!("yes"))
            .with_extra("preferredTimeScale", json!(0))
            .with_extra("title", json!("clip"));
        let request = build_request(&CameraConfig::default(), &constants(), overrides);
        let wire = serde_json::to_value(&request).unwrap();

        assert_eq!(
            wire,
            json!({
                "audio": true,
                "mode": 1,
                "target": 2,
                "totalSeconds": -1.0,
                "preferredTimeScale": 30,
                "title": "clip"
            })
        );
    }

    #[test]
    fn test_still_mode_leaves_duration_alone() {
        let overrides = CaptureOverrides::default().with_total_seconds(-10.0);
        let request = build_request(&CameraConfig::default(), &constants(), overrides);
        assert_eq!(request.total_seconds, Some(-10.0));
    }

    #[test]
    fn test_overrides_from_json() {
        let overrides: CaptureOverrides = serde_json::from_value(json!({
            "mode": "video",
            "totalSeconds": 3,
            "title": "clip"
        }))
        .unwrap();

        assert_eq!(overrides.mode, Some(ModeValue::name("video")));
        assert_eq!(overrides.total_seconds, Some(3.0));
        assert_eq!(overrides.extra["title"], json!("clip"));
    }
}
